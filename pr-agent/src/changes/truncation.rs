//! Size bounds for diff text returned to a caller
//!
//! Both policies cut on line boundaries only and report enough about the
//! original text for the caller to ask for more.

use serde::Serialize;

/// Default number of lines kept by [`TruncationPolicy::LineCount`]
pub const DEFAULT_MAX_DIFF_LINES: usize = 500;

/// Rule governing how much of a diff is kept
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TruncationPolicy {
    /// Keep whole lines while the kept text stays within this many characters
    CharBudget(usize),
    /// Keep the first N lines and append a marker describing the cut
    LineCount(usize),
}

impl TruncationPolicy {
    /// Pick the policy for a request: a line limit when one was given, the
    /// character budget otherwise
    pub fn for_request(max_lines: Option<usize>, char_budget: usize) -> Self {
        match max_lines {
            Some(lines) => Self::LineCount(lines),
            None => Self::CharBudget(char_budget),
        }
    }

    /// Apply this policy to `text`
    pub fn apply(self, text: &str) -> Truncated {
        match self {
            Self::CharBudget(budget) => truncate_to_char_budget(text, budget),
            Self::LineCount(max_lines) => truncate_to_line_count(text, max_lines),
        }
    }
}

/// Outcome of applying a [`TruncationPolicy`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Truncated {
    /// Kept text, possibly followed by a truncation marker
    pub content: String,
    /// Whether anything was dropped
    pub truncated: bool,
    /// Length of the input in characters
    pub original_chars: usize,
    /// Number of `\n`-separated lines in the input
    pub original_lines: usize,
}

fn line_count(text: &str) -> usize {
    text.split('\n').count()
}

/// Keep whole lines until adding the next one (plus its newline) would
/// exceed `budget` characters
///
/// Text already within the budget comes back unchanged.
pub fn truncate_to_char_budget(text: &str, budget: usize) -> Truncated {
    let original_chars = text.chars().count();
    let original_lines = line_count(text);

    if original_chars <= budget {
        return Truncated {
            content: text.to_string(),
            truncated: false,
            original_chars,
            original_lines,
        };
    }

    let mut kept_chars = 0usize;
    let mut end = 0usize;
    let mut kept_any = false;

    for line in text.split('\n') {
        let cost = line.chars().count() + 1;
        if kept_chars + cost > budget {
            break;
        }
        kept_chars += cost;
        end += line.len() + 1;
        kept_any = true;
    }

    // drop the separator after the last kept line
    let content = if kept_any {
        text[..end - 1].to_string()
    } else {
        String::new()
    };

    Truncated {
        content,
        truncated: true,
        original_chars,
        original_lines,
    }
}

/// Keep the first `max_lines` lines followed by a marker naming how many
/// lines were shown
pub fn truncate_to_line_count(text: &str, max_lines: usize) -> Truncated {
    let original_chars = text.chars().count();
    let lines: Vec<&str> = text.split('\n').collect();
    let original_lines = lines.len();

    if original_lines <= max_lines {
        return Truncated {
            content: text.to_string(),
            truncated: false,
            original_chars,
            original_lines,
        };
    }

    let mut content = lines[..max_lines].join("\n");
    content.push_str(&format!(
        "\n\n... Output truncated. Showing {max_lines} of {original_lines} lines ..."
    ));
    content.push_str("\n... Use max_diff_lines parameter to see more ...");

    Truncated {
        content,
        truncated: true,
        original_chars,
        original_lines,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn diff_of(lines: usize, width: usize) -> String {
        (0..lines)
            .map(|i| format!("+{:0>width$}", i, width = width - 1))
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_under_budget_is_identical() {
        let diff = "diff --git a/x b/x\n+hello\n-world\n";
        let result = truncate_to_char_budget(diff, 20_000);
        assert!(!result.truncated);
        assert_eq!(result.content, diff);
        assert_eq!(result.original_chars, diff.len());
    }

    #[test]
    fn test_exactly_at_budget_is_not_truncated() {
        let diff = "abcd\nefgh";
        let result = truncate_to_char_budget(diff, diff.len());
        assert!(!result.truncated);
        assert_eq!(result.content, diff);
    }

    #[test]
    fn test_over_budget_never_exceeds_budget() {
        let diff = diff_of(3000, 10);
        assert_eq!(diff.chars().count(), 3000 * 11 - 1);

        for budget in [1, 10, 11, 12, 100, 1000, 20_000] {
            let result = truncate_to_char_budget(&diff, budget);
            assert!(result.truncated);
            assert!(
                result.content.chars().count() <= budget,
                "budget {budget} exceeded"
            );
            assert_eq!(result.original_chars, 32_999);
        }
    }

    #[test]
    fn test_char_budget_keeps_whole_lines() {
        let diff = diff_of(100, 10);
        let result = truncate_to_char_budget(&diff, 35);
        // three 10-char lines plus newlines use 33 characters; a fourth would need 44
        assert_eq!(result.content.split('\n').count(), 3);
        assert!(diff.starts_with(&result.content));
        for line in result.content.split('\n') {
            assert_eq!(line.len(), 10);
        }
    }

    #[test]
    fn test_char_budget_counts_characters_not_bytes() {
        let diff = "é".repeat(10) + "\n" + &"ü".repeat(10);
        let result = truncate_to_char_budget(&diff, 15);
        assert!(result.truncated);
        assert_eq!(result.content, "é".repeat(10));
        assert_eq!(result.original_chars, 21);
    }

    #[test]
    fn test_char_budget_first_line_too_long() {
        let diff = format!("{}\nshort", "x".repeat(50));
        let result = truncate_to_char_budget(&diff, 20);
        assert!(result.truncated);
        assert_eq!(result.content, "");
    }

    #[test]
    fn test_thirty_thousand_character_diff() {
        let diff = diff_of(3000, 10) + "\n";
        assert_eq!(diff.len(), 33_000);
        let diff = &diff[..30_000];

        let result = truncate_to_char_budget(diff, 20_000);
        assert!(result.truncated);
        assert_eq!(result.original_chars, 30_000);
        assert!(result.content.len() <= 20_000);
    }

    #[test]
    fn test_line_count_under_limit() {
        let diff = diff_of(10, 5);
        let result = truncate_to_line_count(&diff, 500);
        assert!(!result.truncated);
        assert_eq!(result.content, diff);
        assert_eq!(result.original_lines, 10);
    }

    #[test]
    fn test_line_count_over_limit_appends_marker() {
        let diff = diff_of(20, 5);
        let result = truncate_to_line_count(&diff, 5);
        assert!(result.truncated);
        assert_eq!(result.original_lines, 20);

        let (kept, marker) = result.content.split_once("\n\n").unwrap();
        assert_eq!(kept.split('\n').count(), 5);
        assert!(diff.starts_with(kept));
        assert!(marker.contains("Showing 5 of 20 lines"));
        assert!(marker.contains("max_diff_lines"));
    }

    #[test]
    fn test_policy_selection() {
        assert_eq!(
            TruncationPolicy::for_request(None, 20_000),
            TruncationPolicy::CharBudget(20_000)
        );
        assert_eq!(
            TruncationPolicy::for_request(Some(DEFAULT_MAX_DIFF_LINES), 20_000),
            TruncationPolicy::LineCount(500)
        );
    }

    #[test]
    fn test_empty_input() {
        let result = TruncationPolicy::CharBudget(10).apply("");
        assert!(!result.truncated);
        assert_eq!(result.content, "");

        let result = TruncationPolicy::LineCount(10).apply("");
        assert!(!result.truncated);
        assert_eq!(result.original_lines, 1);
    }
}
