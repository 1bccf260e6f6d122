use super::is_word_char;

/// Characters that end a sentence and capitalize the next word
pub const SENTENCE_TERMINATORS: &[char] = &['.', '!', '?'];

/// Lowercase the text, then capitalize the first word character of the text
/// and the first word character after each `.`, `!` or `?`
///
/// Only whitespace may sit between the trigger and the capitalized character;
/// anything else cancels the trigger. There is no abbreviation handling, so
/// `"mr. smith"` becomes `"Mr. Smith"` only because of the period.
pub fn to_sentence_case(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }

    let lower = text.to_lowercase();
    let mut result = String::with_capacity(lower.len());
    // Start of text behaves like a terminator
    let mut capitalize_next = true;

    for ch in lower.chars() {
        if SENTENCE_TERMINATORS.contains(&ch) {
            capitalize_next = true;
            result.push(ch);
        } else if ch.is_whitespace() {
            result.push(ch);
        } else if capitalize_next && is_word_char(ch) {
            result.extend(ch.to_uppercase());
            capitalize_next = false;
        } else {
            capitalize_next = false;
            result.push(ch);
        }
    }

    result
}
