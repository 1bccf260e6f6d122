// WHY: buffer statistics shown next to every buffer and written by --stats-out
// Read-only and repeatable; lengths count Unicode scalar values, not bytes

use serde::{Deserialize, Serialize};

/// Word, character and paragraph counts for one text snapshot
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TextStats {
    /// Maximal runs of non-whitespace characters
    pub words: usize,
    /// Length of the untrimmed text
    pub chars: usize,
    /// Segments separated by a blank line
    pub paragraphs: usize,
}

/// Compute word, character and paragraph counts
///
/// `chars` always reflects the original text, even when it holds only whitespace.
pub fn get_stats(text: &str) -> TextStats {
    if text.is_empty() {
        return TextStats::default();
    }

    let chars = text.chars().count();
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return TextStats {
            words: 0,
            chars,
            paragraphs: 0,
        };
    }

    TextStats {
        words: trimmed.split_whitespace().count(),
        chars,
        paragraphs: count_paragraphs(trimmed),
    }
}

/// One more than the number of whitespace runs holding at least two line breaks
fn count_paragraphs(trimmed: &str) -> usize {
    let mut paragraphs = 1;
    let mut breaks_in_run = 0;

    for ch in trimmed.chars() {
        if !ch.is_whitespace() {
            if breaks_in_run >= 2 {
                paragraphs += 1;
            }
            breaks_in_run = 0;
        } else if ch == '\n' {
            breaks_in_run += 1;
        }
    }

    paragraphs
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_text() {
        assert_eq!(get_stats(""), TextStats { words: 0, chars: 0, paragraphs: 0 });
    }

    #[test]
    fn test_whitespace_only_keeps_char_count() {
        assert_eq!(get_stats("   "), TextStats { words: 0, chars: 3, paragraphs: 0 });
        assert_eq!(get_stats("\n\n\t"), TextStats { words: 0, chars: 3, paragraphs: 0 });
    }

    #[test]
    fn test_words_and_paragraphs() {
        assert_eq!(get_stats("a b\n\nc"), TextStats { words: 3, chars: 6, paragraphs: 2 });
    }

    #[test]
    fn test_blank_line_with_spaces_separates_paragraphs() {
        let stats = get_stats("one\n   \n\ntwo\nstill two\n \t\nthree");
        assert_eq!(stats.paragraphs, 3);
        assert_eq!(stats.words, 5);
    }

    #[test]
    fn test_single_break_is_same_paragraph() {
        assert_eq!(get_stats("line one\nline two").paragraphs, 1);
    }

    #[test]
    fn test_chars_count_untrimmed_scalars() {
        let stats = get_stats("  zażółć  ");
        assert_eq!(stats.chars, 10);
        assert_eq!(stats.words, 1);
    }

    #[test]
    fn test_repeatable() {
        let text = "Same text.\n\nTwice.";
        assert_eq!(get_stats(text), get_stats(text));
    }
}
