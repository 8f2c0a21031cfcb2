// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Per-principal fixed-window rate limiting.
//!
//! A fixed window, not a sliding one: the counter resets at hard window
//! boundaries, so a principal can spend a full allowance at the end of
//! one window and another immediately after it rolls. Up to 2×max in a
//! short straddling interval is an accepted trade-off of the scheme.
//!
//! State lives in a map owned by this instance and shared by reference
//! with request handlers. Nothing is persisted and nothing crosses
//! process boundaries; when several instances run, each keeps its own
//! independent counters.

use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use dashmap::DashMap;

/// Default number of actions allowed per principal per window.
pub const DEFAULT_MAX_ACTIONS: u32 = 5;

/// Default window length.
pub const DEFAULT_WINDOW: Duration = Duration::from_secs(60);

// =============================================================================
// WindowEntry
// =============================================================================

/// Counter state for one principal.
///
/// Owned and mutated exclusively by the limiter; never removed on the
/// allow/deny path. [`RateLimiter::sweep_stale`] may reclaim entries
/// whose window has passed.
#[derive(Debug, Clone, Copy)]
struct WindowEntry {
    count: u32,
    window_reset_at: u64,
}

// =============================================================================
// RateLimiter
// =============================================================================

/// Fixed-window counter keyed by principal id.
///
/// The per-key `entry` access holds the shard lock for the whole
/// read-modify-write, so updates within one process are never lost.
/// Concurrent requests from the same principal are not linearized beyond
/// that, which is accepted best-effort accuracy.
pub struct RateLimiter {
    entries: DashMap<i64, WindowEntry>,
    max_actions: u32,
    window_secs: u64,
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ACTIONS, DEFAULT_WINDOW)
    }
}

impl RateLimiter {
    /// Creates a limiter allowing `max_actions` per principal per `window`.
    pub fn new(max_actions: u32, window: Duration) -> Self {
        Self {
            entries: DashMap::new(),
            max_actions,
            window_secs: window.as_secs(),
        }
    }

    /// Records an action attempt and returns whether it is allowed.
    pub fn allow(&self, principal_id: i64) -> bool {
        self.allow_at(principal_id, unix_now())
    }

    /// Clock-injected variant of [`Self::allow`], used by tests and the
    /// sweeper. `now` is Unix seconds.
    pub fn allow_at(&self, principal_id: i64, now: u64) -> bool {
        let mut entry = self.entries.entry(principal_id).or_insert(WindowEntry {
            count: 0,
            window_reset_at: now + self.window_secs,
        });

        if now > entry.window_reset_at {
            entry.count = 1;
            entry.window_reset_at = now + self.window_secs;
            true
        } else if entry.count < self.max_actions {
            entry.count += 1;
            true
        } else {
            // Denied attempts do not touch the counter
            false
        }
    }

    /// Seconds until the principal's current window resets, if an entry
    /// exists. Used for the `Retry-After` rejection header.
    pub fn retry_after(&self, principal_id: i64) -> Option<u64> {
        let now = unix_now();
        self.entries
            .get(&principal_id)
            .map(|entry| entry.window_reset_at.saturating_sub(now).max(1))
    }

    /// Removes entries whose window has already passed.
    ///
    /// Purely a memory reclaim: a swept principal's next action starts a
    /// fresh window exactly as it would have with the stale entry still
    /// present, so allow/deny behavior is unchanged.
    pub fn sweep_stale(&self) {
        self.sweep_stale_at(unix_now());
    }

    fn sweep_stale_at(&self, now: u64) {
        let before = self.entries.len();
        self.entries.retain(|_, entry| entry.window_reset_at >= now);

        let swept = before - self.entries.len();
        if swept > 0 {
            tracing::debug!(swept, remaining = self.entries.len(), "swept stale rate-limit entries");
        }
    }

    /// Number of principals currently tracked.
    pub fn tracked_principals(&self) -> usize {
        self.entries.len()
    }

    /// Spawns a background task that periodically sweeps stale entries.
    pub fn start_sweep_task(self: &Arc<Self>, interval: Duration) {
        let limiter = Arc::clone(self);
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            loop {
                ticker.tick().await;
                limiter.sweep_stale();
            }
        });
    }
}

impl std::fmt::Debug for RateLimiter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RateLimiter")
            .field("max_actions", &self.max_actions)
            .field("window_secs", &self.window_secs)
            .field("tracked", &self.entries.len())
            .finish()
    }
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allows_up_to_max_then_denies() {
        let limiter = RateLimiter::default();

        for _ in 0..5 {
            assert!(limiter.allow(1));
        }
        assert!(!limiter.allow(1));
    }

    #[test]
    fn test_denial_does_not_consume() {
        let limiter = RateLimiter::new(2, DEFAULT_WINDOW);

        assert!(limiter.allow_at(1, 100));
        assert!(limiter.allow_at(1, 101));
        // Repeated denials stay denials; the counter is untouched
        assert!(!limiter.allow_at(1, 102));
        assert!(!limiter.allow_at(1, 103));
    }

    #[test]
    fn test_window_reset_after_expiry() {
        let limiter = RateLimiter::default();

        for i in 0..5 {
            assert!(limiter.allow_at(1, 1000 + i));
        }
        assert!(!limiter.allow_at(1, 1005));

        // 61 seconds past the first call the window has rolled
        assert!(limiter.allow_at(1, 1061));
        // and the fresh window has its own full allowance
        for i in 0..4 {
            assert!(limiter.allow_at(1, 1062 + i));
        }
        assert!(!limiter.allow_at(1, 1066));
    }

    #[test]
    fn test_principals_are_independent() {
        let limiter = RateLimiter::new(2, DEFAULT_WINDOW);

        assert!(limiter.allow_at(1, 100));
        assert!(limiter.allow_at(1, 100));
        assert!(!limiter.allow_at(1, 100));

        assert!(limiter.allow_at(2, 100));
        assert!(limiter.allow_at(2, 100));
    }

    #[test]
    fn test_boundary_burst_is_possible() {
        // Fixed-window semantics: a full allowance at the end of one
        // window plus a full allowance right after the roll all land.
        let limiter = RateLimiter::default();

        let mut allowed = 0;
        for _ in 0..5 {
            if limiter.allow_at(1, 1059) {
                allowed += 1;
            }
        }
        for _ in 0..5 {
            if limiter.allow_at(1, 1061) {
                allowed += 1;
            }
        }

        assert_eq!(allowed, 10);
    }

    #[test]
    fn test_sweep_removes_only_stale_entries() {
        let limiter = RateLimiter::default();

        limiter.allow_at(1, 100); // resets at 160
        limiter.allow_at(2, 500); // resets at 560
        assert_eq!(limiter.tracked_principals(), 2);

        limiter.sweep_stale_at(300);
        assert_eq!(limiter.tracked_principals(), 1);

        // The swept principal starts over as if never seen
        assert!(limiter.allow_at(1, 300));
    }

    #[test]
    fn test_sweep_does_not_change_allow_deny() {
        let limiter = RateLimiter::new(1, DEFAULT_WINDOW);

        assert!(limiter.allow_at(1, 100));
        assert!(!limiter.allow_at(1, 110));

        // Sweeping mid-window keeps the live entry and its denial
        limiter.sweep_stale_at(110);
        assert!(!limiter.allow_at(1, 120));
    }

    #[test]
    fn test_retry_after_reports_window_remainder() {
        let limiter = RateLimiter::default();
        assert!(limiter.retry_after(99).is_none());

        limiter.allow(7);
        let remaining = limiter.retry_after(7).unwrap();
        assert!(remaining >= 1 && remaining <= 60);
    }
}
