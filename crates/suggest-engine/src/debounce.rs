//! Query Debounce
//!
//! Turns per-keystroke input into settled queries. The caller owns the
//! actual timer: `note_input` hands out an epoch token, and `settle`
//! decides whether the timer that fired is still the current one and
//! whether the value is worth emitting.

/// Quiet period with no further input before a query settles (ms)
pub const QUIET_MS: u32 = 300;

/// Explicit timer-reset debounce state
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryDebouncer {
    epoch: u64,
    last_emitted: Option<String>,
}

impl QueryDebouncer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a keystroke. The returned token belongs to the timer the
    /// caller starts now; any later keystroke invalidates it.
    pub fn note_input(&mut self) -> u64 {
        self.epoch += 1;
        self.epoch
    }

    /// Called when the timer for `token` fires. Returns the settled
    /// query, or `None` if a newer keystroke arrived in the meantime or
    /// the value is the same as the last emission.
    ///
    /// Short and empty values still settle; whether they trigger a
    /// search is the resolver's call.
    pub fn settle(&mut self, token: u64, value: &str) -> Option<String> {
        if token != self.epoch {
            return None;
        }
        if self.last_emitted.as_deref() == Some(value) {
            return None;
        }
        self.last_emitted = Some(value.to_string());
        Some(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn newer_keystroke_invalidates_pending_token() {
        let mut deb = QueryDebouncer::new();
        let first = deb.note_input();
        let second = deb.note_input();

        assert_eq!(deb.settle(first, "ap"), None);
        assert_eq!(deb.settle(second, "app"), Some("app".to_string()));
    }

    #[test]
    fn unchanged_value_is_suppressed() {
        let mut deb = QueryDebouncer::new();
        let token = deb.note_input();
        assert_eq!(deb.settle(token, "app"), Some("app".to_string()));

        let token = deb.note_input();
        assert_eq!(deb.settle(token, "app"), None);

        let token = deb.note_input();
        assert_eq!(deb.settle(token, "apple"), Some("apple".to_string()));
    }

    #[test]
    fn short_and_empty_values_still_settle() {
        let mut deb = QueryDebouncer::new();
        let token = deb.note_input();
        assert_eq!(deb.settle(token, "a"), Some("a".to_string()));

        let token = deb.note_input();
        assert_eq!(deb.settle(token, ""), Some(String::new()));
    }

    #[test]
    fn stale_token_does_not_mark_value_as_emitted() {
        let mut deb = QueryDebouncer::new();
        let stale = deb.note_input();
        let current = deb.note_input();

        assert_eq!(deb.settle(stale, "app"), None);
        // The value never settled, so the current timer may still emit it
        assert_eq!(deb.settle(current, "app"), Some("app".to_string()));
    }
}
