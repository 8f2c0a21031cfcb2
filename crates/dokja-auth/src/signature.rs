// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! HMAC-SHA-256 signing and verification.
//!
//! Verification goes through `ring::hmac::verify`, which recomputes the
//! tag and compares it in constant time. A byte-by-byte comparison that
//! exits on the first mismatch would leak the mismatch position through
//! timing and must not be introduced here.

use ring::hmac;

/// Length in bytes of an HMAC-SHA-256 tag.
pub const TAG_LEN: usize = 32;

/// Computes the HMAC-SHA-256 tag over the UTF-8 bytes of `signing_input`.
pub fn sign(signing_input: &str, secret: &[u8]) -> Vec<u8> {
    let key = hmac::Key::new(hmac::HMAC_SHA256, secret);
    hmac::sign(&key, signing_input.as_bytes()).as_ref().to_vec()
}

/// Returns `true` iff `signature` is the HMAC-SHA-256 tag of
/// `signing_input` under `secret`, compared in constant time.
pub fn verify(signing_input: &str, signature: &[u8], secret: &[u8]) -> bool {
    let key = hmac::Key::new(hmac::HMAC_SHA256, secret);
    hmac::verify(&key, signing_input.as_bytes(), signature).is_ok()
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &[u8] = b"test-secret-key-32-bytes-long!!!";

    #[test]
    fn test_sign_and_verify() {
        let tag = sign("header.payload", SECRET);
        assert_eq!(tag.len(), TAG_LEN);
        assert!(verify("header.payload", &tag, SECRET));
    }

    #[test]
    fn test_verify_rejects_wrong_secret() {
        let tag = sign("header.payload", SECRET);
        assert!(!verify("header.payload", &tag, b"another-secret-entirely!!!!!!!!!"));
    }

    #[test]
    fn test_verify_rejects_modified_input() {
        let tag = sign("header.payload", SECRET);
        assert!(!verify("header.Payload", &tag, SECRET));
    }

    #[test]
    fn test_verify_rejects_truncated_tag() {
        let tag = sign("header.payload", SECRET);
        assert!(!verify("header.payload", &tag[..TAG_LEN - 1], SECRET));
        assert!(!verify("header.payload", &[], SECRET));
    }

    #[test]
    fn test_sign_is_deterministic() {
        assert_eq!(sign("abc.def", SECRET), sign("abc.def", SECRET));
    }
}
