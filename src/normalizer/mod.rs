// WHY: the normalization engine is a set of total, pure `&str -> String` transforms
// Each filter lives in its own module; `launder_all` fixes the composition order

use tracing::debug;

pub mod debreak;
pub mod formatting;
pub mod sentence_case;
pub mod spacing;

pub use debreak::smart_debreak;
pub use formatting::{strip_formatting, FormattingStripper};
pub use sentence_case::{to_sentence_case, SENTENCE_TERMINATORS};
pub use spacing::fix_spacing;

/// Word character for de-breaking and sentence casing: Unicode alphanumeric or `_`
pub fn is_word_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_'
}

/// Full cleanup cycle: de-break, then strip markup, then fix spacing
///
/// De-breaking depends on the original line structure, so it runs first;
/// spacing runs last because the earlier steps leave stray blanks behind.
pub fn launder_all(text: &str) -> String {
    debug!("Laundering {} bytes", text.len());
    let debroken = smart_debreak(text);
    let stripped = strip_formatting(&debroken);
    fix_spacing(&stripped)
}
