//! Suggestion Search
//!
//! Sequence-numbered search resolution. Each issued search carries a
//! monotonically increasing sequence number; a response is applied only
//! if it carries the latest one, which keeps a slow response to an old
//! query from clobbering a fast response to a newer one. There is no
//! request cancellation; superseded responses simply fall out here.

use crate::models::Suggestion;

/// Minimum query length that triggers a backend search
pub const MIN_QUERY_LEN: usize = 2;

/// Bare sequence tracker for searches that need stale-response
/// suppression without suggestion decoration (user search).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchSequence {
    issued: u64,
}

impl SearchSequence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate the sequence number for the search being issued now
    pub fn next(&mut self) -> u64 {
        self.issued += 1;
        self.issued
    }

    /// Whether a response tagged `seq` is still the latest
    pub fn is_current(&self, seq: u64) -> bool {
        seq == self.issued
    }
}

/// What to do with a settled query
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchPlan {
    /// Issue a backend search tagged with this sequence number
    Search(u64),
    /// Below the minimum length: clear suggestions, skip the backend
    ShowNothing,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SuggestionResolver {
    min_len: usize,
    seq: SearchSequence,
}

impl Default for SuggestionResolver {
    fn default() -> Self {
        Self::new(MIN_QUERY_LEN)
    }
}

impl SuggestionResolver {
    pub fn new(min_len: usize) -> Self {
        Self { min_len, seq: SearchSequence::new() }
    }

    /// Handle a settled query, allocating the next sequence number when
    /// the query is long enough to search.
    ///
    /// Short queries still consume a sequence number so that a search
    /// in flight when the user shortens the query cannot repopulate the
    /// cleared panel.
    pub fn begin(&mut self, query: &str) -> SearchPlan {
        if query.chars().count() < self.min_len {
            self.seq.next();
            return SearchPlan::ShowNothing;
        }
        SearchPlan::Search(self.seq.next())
    }

    /// Apply a backend response. Returns the suggestion list to display,
    /// or `None` when the response is stale.
    ///
    /// If no result matches the query case-insensitively, a "create new"
    /// suggestion carrying the literal query text is appended, so the
    /// list is never empty for a query that was searched. A failed search
    /// is fed through here as an empty result set by the caller.
    pub fn apply(&self, seq: u64, query: &str, results: Vec<Suggestion>) -> Option<Vec<Suggestion>> {
        if !self.seq.is_current(seq) {
            return None;
        }
        let mut suggestions = results;
        let lowered = query.to_lowercase();
        let has_exact = suggestions.iter().any(|s| s.name.to_lowercase() == lowered);
        if !has_exact {
            suggestions.push(Suggestion::create_new(query));
        }
        Some(suggestions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CREATE_NEW_ID;

    fn entity(id: i64, name: &str) -> Suggestion {
        Suggestion {
            id,
            name: name.to_string(),
            category_name: "Fruits".to_string(),
            default_unit: "lbs".to_string(),
            is_create_new: false,
        }
    }

    #[test]
    fn short_query_skips_the_backend() {
        let mut resolver = SuggestionResolver::default();
        assert_eq!(resolver.begin(""), SearchPlan::ShowNothing);
        assert_eq!(resolver.begin("a"), SearchPlan::ShowNothing);
        assert!(matches!(resolver.begin("ap"), SearchPlan::Search(_)));
    }

    #[test]
    fn slow_response_to_earlier_query_is_discarded() {
        let mut resolver = SuggestionResolver::default();
        let SearchPlan::Search(first) = resolver.begin("app") else {
            panic!("expected a search");
        };
        let SearchPlan::Search(second) = resolver.begin("apple") else {
            panic!("expected a search");
        };

        // The later query's response arrives first and wins
        let applied = resolver.apply(second, "apple", vec![entity(1, "Apples")]);
        assert!(applied.is_some());

        // The earlier query's response straggles in afterwards
        assert_eq!(resolver.apply(first, "app", vec![entity(2, "App Soda")]), None);
    }

    #[test]
    fn create_new_is_appended_without_an_exact_match() {
        let mut resolver = SuggestionResolver::default();
        let SearchPlan::Search(seq) = resolver.begin("app") else {
            panic!("expected a search");
        };

        let suggestions = resolver
            .apply(seq, "app", vec![entity(1, "Apples"), entity(2, "Apple Juice")])
            .unwrap();

        assert_eq!(suggestions.len(), 3);
        let last = suggestions.last().unwrap();
        assert!(last.is_create_new);
        assert_eq!(last.id, CREATE_NEW_ID);
        assert_eq!(last.name, "app");
        assert_eq!(suggestions.iter().filter(|s| s.is_create_new).count(), 1);
    }

    #[test]
    fn exact_match_suppresses_create_new() {
        let mut resolver = SuggestionResolver::default();
        let SearchPlan::Search(seq) = resolver.begin("Apples") else {
            panic!("expected a search");
        };

        let suggestions = resolver
            .apply(seq, "Apples", vec![entity(1, "apples"), entity(2, "Apple Juice")])
            .unwrap();

        assert_eq!(suggestions.len(), 2);
        assert!(suggestions.iter().all(|s| !s.is_create_new));
    }

    #[test]
    fn shortening_the_query_invalidates_a_pending_search() {
        let mut resolver = SuggestionResolver::default();
        let SearchPlan::Search(pending) = resolver.begin("app") else {
            panic!("expected a search");
        };

        // The user deletes down to one character before the response lands
        assert_eq!(resolver.begin("a"), SearchPlan::ShowNothing);

        // The cleared panel must stay cleared
        assert_eq!(resolver.apply(pending, "app", vec![entity(1, "Apples")]), None);
    }

    #[test]
    fn failed_search_still_offers_create_new() {
        let mut resolver = SuggestionResolver::default();
        let SearchPlan::Search(seq) = resolver.begin("quinoa") else {
            panic!("expected a search");
        };

        // Search failures are fed through as an empty result set
        let suggestions = resolver.apply(seq, "quinoa", Vec::new()).unwrap();
        assert_eq!(suggestions.len(), 1);
        assert!(suggestions[0].is_create_new);
    }

    #[test]
    fn bare_sequence_tracks_only_the_latest() {
        let mut seq = SearchSequence::new();
        let first = seq.next();
        let second = seq.next();
        assert!(!seq.is_current(first));
        assert!(seq.is_current(second));
    }
}
