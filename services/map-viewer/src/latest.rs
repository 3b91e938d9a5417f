//! Latest-wins request tokens.

use std::sync::atomic::{AtomicU64, Ordering};

/// Monotonic token counter for one update target.
///
/// Every request takes a token; its response is applied only while that
/// token is still the newest. Issuing a token without a request
/// invalidates everything in flight.
#[derive(Debug, Default)]
pub struct LatestWins {
    counter: AtomicU64,
}

impl LatestWins {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn issue(&self) -> u64 {
        self.counter.fetch_add(1, Ordering::SeqCst) + 1
    }

    pub fn is_current(&self, token: u64) -> bool {
        self.counter.load(Ordering::SeqCst) == token
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_newer_token_supersedes() {
        let latest = LatestWins::new();
        let first = latest.issue();
        assert!(latest.is_current(first));
        let second = latest.issue();
        assert!(second > first);
        assert!(!latest.is_current(first));
        assert!(latest.is_current(second));
    }

    #[test]
    fn test_fresh_counter_has_no_current_token() {
        let latest = LatestWins::new();
        assert!(!latest.is_current(1));
    }
}
