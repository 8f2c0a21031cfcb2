// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Compact token codec.
//!
//! A session token is three independently base64url-encoded segments
//! (header, payload, signature) joined by dots. This module only splits
//! and (de)codes segments; it attaches no meaning to their contents.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use serde::{Deserialize, Serialize};

use crate::error::{AuthError, AuthResult};

/// Separator between token segments.
const SEGMENT_DELIMITER: char = '.';

// =============================================================================
// RawToken
// =============================================================================

/// A token split into its three still-encoded segments.
///
/// Parsing is purely structural: a `RawToken` says nothing about whether
/// the segments decode, let alone whether the signature holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawToken {
    /// The encoded header segment.
    pub header: String,
    /// The encoded payload segment.
    pub payload: String,
    /// The encoded signature segment.
    pub signature: String,
}

impl RawToken {
    /// Splits a compact token into its segments.
    ///
    /// Fails with [`AuthError::MalformedToken`] unless the input contains
    /// exactly three non-empty segments. A missing segment is always an
    /// error, never a partial-trust state.
    pub fn parse(token: &str) -> AuthResult<Self> {
        let segments: Vec<&str> = token.split(SEGMENT_DELIMITER).collect();
        if segments.len() != 3 || segments.iter().any(|s| s.is_empty()) {
            return Err(AuthError::MalformedToken);
        }

        Ok(Self {
            header: segments[0].to_string(),
            payload: segments[1].to_string(),
            signature: segments[2].to_string(),
        })
    }

    /// Returns the byte sequence the signature covers: `header.payload`,
    /// both still encoded.
    pub fn signing_input(&self) -> String {
        format!("{}{}{}", self.header, SEGMENT_DELIMITER, self.payload)
    }
}

// =============================================================================
// TokenHeader
// =============================================================================

/// The decoded header segment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenHeader {
    /// Declared signing algorithm.
    pub alg: String,
    /// Token type marker.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub typ: Option<String>,
}

impl TokenHeader {
    /// The only algorithm this core will ever accept.
    pub const HS256: &'static str = "HS256";

    /// Creates the header every issued token carries.
    pub fn hs256() -> Self {
        Self {
            alg: Self::HS256.to_string(),
            typ: Some("JWT".to_string()),
        }
    }

    /// Returns `true` if the declared algorithm is HMAC-SHA-256.
    ///
    /// There is no algorithm negotiation: anything else is invalid and
    /// must be rejected before signature verification is attempted.
    pub fn is_supported(&self) -> bool {
        self.alg == Self::HS256
    }
}

// =============================================================================
// Segment codec
// =============================================================================

/// Decodes a single base64url segment into raw bytes.
///
/// Trailing `=` padding is accepted and stripped before decoding, so both
/// padded and unpadded producers are understood. The standard base64
/// alphabet (`+`, `/`) is not.
pub fn decode_segment(segment: &str) -> AuthResult<Vec<u8>> {
    URL_SAFE_NO_PAD
        .decode(segment.trim_end_matches('='))
        .map_err(|_| AuthError::MalformedSegment)
}

/// Encodes raw bytes as an unpadded base64url segment.
pub fn encode_segment(bytes: &[u8]) -> String {
    URL_SAFE_NO_PAD.encode(bytes)
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_three_segments() {
        let token = RawToken::parse("aGVhZGVy.cGF5bG9hZA.c2ln").unwrap();
        assert_eq!(token.header, "aGVhZGVy");
        assert_eq!(token.payload, "cGF5bG9hZA");
        assert_eq!(token.signature, "c2ln");
    }

    #[test]
    fn test_parse_missing_segment() {
        assert_eq!(RawToken::parse("abc.def"), Err(AuthError::MalformedToken));
        assert_eq!(RawToken::parse("abc"), Err(AuthError::MalformedToken));
        assert_eq!(
            RawToken::parse("a.b.c.d"),
            Err(AuthError::MalformedToken)
        );
    }

    #[test]
    fn test_parse_empty_segment() {
        assert_eq!(RawToken::parse("abc..def"), Err(AuthError::MalformedToken));
        assert_eq!(RawToken::parse(".b.c"), Err(AuthError::MalformedToken));
        assert_eq!(RawToken::parse("a.b."), Err(AuthError::MalformedToken));
        assert_eq!(RawToken::parse(""), Err(AuthError::MalformedToken));
    }

    #[test]
    fn test_signing_input() {
        let token = RawToken::parse("aa.bb.cc").unwrap();
        assert_eq!(token.signing_input(), "aa.bb");
    }

    #[test]
    fn test_segment_round_trip() {
        let bytes = b"{\"sub\":42}";
        let encoded = encode_segment(bytes);
        assert!(!encoded.contains('='));
        assert_eq!(decode_segment(&encoded).unwrap(), bytes);
    }

    #[test]
    fn test_decode_accepts_padding() {
        // "payload" encodes to an unpadded length; force padding manually
        let padded = format!("{}==", encode_segment(b"hi"));
        assert_eq!(decode_segment(&padded).unwrap(), b"hi");
    }

    #[test]
    fn test_decode_rejects_standard_alphabet() {
        assert_eq!(decode_segment("a+b/"), Err(AuthError::MalformedSegment));
        assert_eq!(decode_segment("!!!"), Err(AuthError::MalformedSegment));
    }

    #[test]
    fn test_header_supported() {
        assert!(TokenHeader::hs256().is_supported());

        let other = TokenHeader {
            alg: "RS256".to_string(),
            typ: None,
        };
        assert!(!other.is_supported());

        let none = TokenHeader {
            alg: "none".to_string(),
            typ: None,
        };
        assert!(!none.is_supported());
    }
}
