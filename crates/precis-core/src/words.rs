//! Word counting for display next to the input and the summary.

use crate::summarizer::WHITESPACE;

/// Count the whitespace-delimited words of `text`.
///
/// Leading and trailing control characters and spaces (everything up to
/// U+0020) are trimmed, then the rest is split on runs of ASCII whitespace,
/// the same separator the summarizer tokenizes with. Other Unicode spaces
/// such as U+00A0 do not separate words.
///
/// Accepts `&str` or `Option<&str>`; `None`, empty, and whitespace-only text
/// all count zero.
///
/// ```
/// use precis_core::count_words;
///
/// assert_eq!(count_words("  a  b   c "), 3);
/// assert_eq!(count_words(None), 0);
/// ```
pub fn count_words<'a>(text: impl Into<Option<&'a str>>) -> usize {
    let Some(text) = text.into() else {
        return 0;
    };
    let trimmed = text.trim_matches(|c: char| c <= ' ');
    if trimmed.is_empty() {
        return 0;
    }
    WHITESPACE.split(trimmed).count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::summarizer::tokens;

    #[test]
    fn test_missing_and_empty() {
        assert_eq!(count_words(None), 0);
        assert_eq!(count_words(""), 0);
        assert_eq!(count_words(Some("")), 0);
    }

    #[test]
    fn test_counts_whitespace_runs() {
        assert_eq!(count_words("  a  b   c "), 3);
        assert_eq!(count_words("one\ttwo\nthree"), 3);
        assert_eq!(count_words("single"), 1);
    }

    #[test]
    fn test_whitespace_only_is_zero() {
        assert_eq!(count_words("   \n\t "), 0);
    }

    #[test]
    fn test_punctuation_counts_as_word() {
        assert_eq!(count_words("Wait -- what?"), 3);
    }

    #[test]
    fn test_unicode_spaces_do_not_separate_words() {
        assert_eq!(count_words("a\u{2003}b"), 1);
        assert_eq!(count_words("a\u{a0}b"), 1);
    }

    #[test]
    fn test_trims_control_characters() {
        assert_eq!(count_words("\u{1} a"), 1);
        assert_eq!(count_words("a \u{7}"), 1);
        assert_eq!(count_words("\u{0}\u{1f}"), 0);
        // Interior control characters are not separators.
        assert_eq!(count_words("a\u{1}b c"), 2);
    }

    #[test]
    fn test_agrees_with_summarizer_tokens() {
        for text in ["a\u{2003}b", "a\u{a0}b", "\u{1} a", "one two\tthree", " x\u{0B}y "] {
            assert_eq!(count_words(text), tokens(text).count(), "{text:?}");
        }
    }
}
