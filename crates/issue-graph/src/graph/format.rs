//! Node label text formatting.

use crate::config::FormatOptions;

/// Characters appended to a truncated summary.
const ELLIPSIS: &str = "...";

/// Shorten a summary for display and escape it for a quoted Graphviz string.
///
/// With word wrap, summaries longer than the maximum are filled onto several
/// lines of at most that width. Otherwise summaries are cut to the maximum
/// and suffixed with `...`, but only when the cut removes more than two
/// characters; a shorter cut would make the label longer than the original.
pub fn format_summary(summary: &str, options: &FormatOptions) -> String {
    let max = options.max_summary_length;
    let length = summary.chars().count();

    let shortened = if options.word_wrap {
        if length > max {
            textwrap::fill(summary, max.max(1))
        } else {
            summary.to_string()
        }
    } else if length > max.saturating_add(2) {
        let mut cut: String = summary.chars().take(max).collect();
        cut.push_str(ELLIPSIS);
        cut
    } else {
        summary.to_string()
    };

    escape(&shortened)
}

/// Escape backslashes, quotes and newlines for a double-quoted Graphviz string.
pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            '\n' => escaped.push_str("\\n"),
            '\r' => {}
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn truncating(max: usize) -> FormatOptions {
        FormatOptions {
            word_wrap: false,
            max_summary_length: max,
        }
    }

    fn wrapping(max: usize) -> FormatOptions {
        FormatOptions {
            word_wrap: true,
            max_summary_length: max,
        }
    }

    #[rstest]
    #[case::shorter_than_max("abcdefghi", "abcdefghi")]
    #[case::exactly_max("abcdefghij", "abcdefghij")]
    #[case::max_plus_one("abcdefghijk", "abcdefghijk")]
    #[case::max_plus_two("abcdefghijkl", "abcdefghijkl")]
    #[case::max_plus_three("abcdefghijklm", "abcdefghij...")]
    #[case::much_longer("abcdefghijklmnopqrstuvwxyz", "abcdefghij...")]
    fn test_truncation_threshold(#[case] summary: &str, #[case] expected: &str) {
        assert_eq!(format_summary(summary, &truncating(10)), expected);
    }

    #[test]
    fn test_truncation_counts_characters_not_bytes() {
        let summary = "ääääääääääääää";
        assert_eq!(format_summary(summary, &truncating(10)), "ääääääääää...");
    }

    #[test]
    fn test_word_wrap_breaks_long_summaries() {
        let formatted = format_summary("the quick brown fox jumps", &wrapping(10));
        assert_eq!(formatted, "the quick\\nbrown fox\\njumps");
    }

    #[test]
    fn test_word_wrap_leaves_short_summaries() {
        assert_eq!(format_summary("short one", &wrapping(10)), "short one");
    }

    #[test]
    fn test_quotes_are_escaped() {
        assert_eq!(
            format_summary(r#"Fix "login" page"#, &truncating(30)),
            r#"Fix \"login\" page"#
        );
    }

    #[test]
    fn test_huge_maximum_leaves_summary_untouched() {
        assert_eq!(format_summary("short", &truncating(usize::MAX)), "short");
    }

    #[test]
    fn test_backslashes_are_escaped() {
        assert_eq!(escape(r#"path\to"#), r#"path\\to"#);
        assert_eq!(escape(r#"ends with \""#), r#"ends with \\\""#);
    }

    #[test]
    fn test_embedded_newlines_are_escaped() {
        assert_eq!(escape("line one\nline two"), "line one\\nline two");
        assert_eq!(escape("crlf\r\nend"), "crlf\\nend");
    }
}
