// WHY: regex-automata meta regexes give leftmost-first, non-greedy matching;
// back-references are unsupported, so each `(X)(.*?)\1` becomes one alternative per delimiter

use anyhow::Result;
use regex_automata::meta::Regex;
use std::sync::LazyLock;
use tracing::debug;

/// `<`, optional `/`, one or more non-`>` characters, then `>` or end of text
const TAG_PATTERN: &str = r"</?[^>]+(?:>|$)";
/// `**inner**` or `__inner__`, shortest span, not crossing a line break
const BOLD_PATTERN: &str = r"\*\*(.*?)\*\*|__(.*?)__";
/// `*inner*` or `_inner_`, applied after bold markers are gone
const ITALIC_PATTERN: &str = r"\*(.*?)\*|_(.*?)_";

static STRIPPER: LazyLock<FormattingStripper> = LazyLock::new(|| {
    FormattingStripper::new().expect("built-in formatting patterns must compile")
});

/// Compiled markup patterns for [`strip_formatting`]
pub struct FormattingStripper {
    tag: Regex,
    bold: Regex,
    italic: Regex,
}

impl FormattingStripper {
    /// Compile the tag, bold and italic patterns
    pub fn new() -> Result<Self> {
        debug!("Compiling formatting patterns");
        Ok(Self {
            tag: Regex::new(TAG_PATTERN)?,
            bold: Regex::new(BOLD_PATTERN)?,
            italic: Regex::new(ITALIC_PATTERN)?,
        })
    }

    /// Remove HTML-like tags, then bold markers, then italic markers
    pub fn strip(&self, text: &str) -> String {
        if text.is_empty() {
            return String::new();
        }
        let untagged = remove_matches(&self.tag, text);
        let unbolded = replace_with_inner(&self.bold, &untagged);
        replace_with_inner(&self.italic, &unbolded)
    }
}

/// Remove presentation markup while keeping the enclosed text
///
/// `"<b>hi</b> **bold** *it*"` becomes `"hi bold it"`. Unbalanced markers
/// such as a lone `*` are left in place; nested bold/italic markers unwrap
/// because bold is removed before italic.
pub fn strip_formatting(text: &str) -> String {
    STRIPPER.strip(text)
}

fn remove_matches(re: &Regex, text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut last = 0;
    for m in re.find_iter(text) {
        result.push_str(&text[last..m.start()]);
        last = m.end();
    }
    result.push_str(&text[last..]);
    result
}

/// Replace each match with whichever capture group participated in it
fn replace_with_inner(re: &Regex, text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut last = 0;
    for caps in re.captures_iter(text) {
        let Some(whole) = caps.get_match() else {
            continue;
        };
        result.push_str(&text[last..whole.start()]);
        if let Some(inner) = (1..caps.group_len()).find_map(|group| caps.get_group(group)) {
            result.push_str(&text[inner.range()]);
        }
        last = whole.end();
    }
    result.push_str(&text[last..]);
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_formatting_basic() {
        assert_eq!(strip_formatting("<b>hi</b> **bold** *it*"), "hi bold it");
    }

    #[test]
    fn test_strip_formatting_tags() {
        assert_eq!(strip_formatting("<p class=\"x\">para</p>"), "para");
        assert_eq!(strip_formatting("keep <unterminated tag"), "keep ");
        assert_eq!(strip_formatting("a <> b"), "a <> b");
        assert_eq!(strip_formatting("<br/>line"), "line");
    }

    #[test]
    fn test_strip_formatting_underscore_markers() {
        assert_eq!(strip_formatting("__strong__ and _soft_"), "strong and soft");
    }

    #[test]
    fn test_strip_formatting_nested_markers() {
        assert_eq!(strip_formatting("**bold *italic* bold**"), "bold italic bold");
    }

    #[test]
    fn test_strip_formatting_unbalanced_markers_survive() {
        assert_eq!(strip_formatting("2 * 3 = 6"), "2 * 3 = 6");
        // Unclosed bold degrades to an empty italic pair
        assert_eq!(strip_formatting("**open only"), "open only");
        assert_eq!(strip_formatting("a_b"), "a_b");
    }

    #[test]
    fn test_strip_formatting_markers_do_not_cross_lines() {
        assert_eq!(strip_formatting("*one\ntwo*"), "*one\ntwo*");
    }

    #[test]
    fn test_strip_formatting_empty_pairs_and_snake_case() {
        assert_eq!(strip_formatting("****"), "");
        assert_eq!(strip_formatting("snake_case_name"), "snakecasename");
        assert_eq!(strip_formatting(""), "");
    }

    #[test]
    fn test_stripper_reusable_instance() {
        let stripper = FormattingStripper::new().unwrap();
        assert_eq!(stripper.strip("<i>x</i>"), "x");
        assert_eq!(stripper.strip("_y_"), "y");
    }
}
