//! Keyboard Selection
//!
//! Highlight navigation over the suggestion panel. Pure transitions
//! over `(highlighted index, list length)`; the component owns the
//! index signal and the panel visibility.

/// No suggestion highlighted
pub const NO_HIGHLIGHT: i32 = -1;

/// Grace period after blur before the panel closes (ms). Long enough
/// for a click landing on the panel to commit first; this is a race
/// mitigation, not an input debounce.
pub const BLUR_CLOSE_DELAY_MS: u32 = 200;

/// Result of a keydown over the suggestion panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    /// Move the highlight and swallow the key
    Highlight(i32),
    /// Commit the suggestion at this index and close
    Commit(usize),
    /// No highlight: treat the raw query text as a create request
    SubmitQuery,
    /// Close the panel and reset the highlight
    Dismiss,
    /// Not ours; let the browser handle it
    Ignored,
}

/// ArrowDown: wraps to 0 from the last index or from no highlight.
/// No-op on an empty list.
pub fn next_index(highlighted: i32, len: usize) -> i32 {
    if len == 0 {
        return highlighted;
    }
    if highlighted < len as i32 - 1 {
        highlighted + 1
    } else {
        0
    }
}

/// ArrowUp: wraps to the last index from the top or from no highlight.
/// No-op on an empty list.
pub fn prev_index(highlighted: i32, len: usize) -> i32 {
    if len == 0 {
        return highlighted;
    }
    if highlighted > 0 {
        highlighted - 1
    } else {
        len as i32 - 1
    }
}

pub fn handle_key(key: &str, highlighted: i32, len: usize, has_query: bool) -> KeyOutcome {
    match key {
        "ArrowDown" => KeyOutcome::Highlight(next_index(highlighted, len)),
        "ArrowUp" => KeyOutcome::Highlight(prev_index(highlighted, len)),
        "Enter" => {
            if highlighted >= 0 && (highlighted as usize) < len {
                KeyOutcome::Commit(highlighted as usize)
            } else if has_query {
                KeyOutcome::SubmitQuery
            } else {
                KeyOutcome::Ignored
            }
        }
        "Escape" => KeyOutcome::Dismiss,
        _ => KeyOutcome::Ignored,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arrow_down_wraps_to_first() {
        assert_eq!(next_index(NO_HIGHLIGHT, 3), 0);
        assert_eq!(next_index(0, 3), 1);
        assert_eq!(next_index(2, 3), 0);
    }

    #[test]
    fn arrow_up_wraps_to_last() {
        assert_eq!(prev_index(0, 3), 2);
        assert_eq!(prev_index(NO_HIGHLIGHT, 3), 2);
        assert_eq!(prev_index(2, 3), 1);
    }

    #[test]
    fn arrows_are_noops_on_an_empty_list() {
        assert_eq!(next_index(NO_HIGHLIGHT, 0), NO_HIGHLIGHT);
        assert_eq!(prev_index(NO_HIGHLIGHT, 0), NO_HIGHLIGHT);
    }

    #[test]
    fn enter_commits_the_highlighted_suggestion() {
        assert_eq!(handle_key("Enter", 1, 3, true), KeyOutcome::Commit(1));
    }

    #[test]
    fn enter_without_highlight_submits_the_raw_text() {
        assert_eq!(handle_key("Enter", NO_HIGHLIGHT, 3, true), KeyOutcome::SubmitQuery);
        assert_eq!(handle_key("Enter", NO_HIGHLIGHT, 3, false), KeyOutcome::Ignored);
    }

    #[test]
    fn escape_dismisses_and_other_keys_are_ignored() {
        assert_eq!(handle_key("Escape", 1, 3, true), KeyOutcome::Dismiss);
        assert_eq!(handle_key("Tab", 1, 3, true), KeyOutcome::Ignored);
        assert_eq!(handle_key("a", NO_HIGHLIGHT, 3, true), KeyOutcome::Ignored);
    }
}
