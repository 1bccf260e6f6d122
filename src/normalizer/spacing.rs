// WHY: line-oriented whitespace cleanup; only horizontal whitespace is touched
// so paragraph structure survives everything except the final whole-text trim
// Every line terminator is a boundary on its own, so a second pass sees the same lines

/// Normalize horizontal whitespace on every line and trim the whole text
///
/// Tabs and runs of blanks collapse to one space, each line loses leading and
/// trailing blanks, and the result is trimmed. Line terminators (`\n`, `\r`,
/// U+0085, U+2028, U+2029) are kept as they are.
pub fn fix_spacing(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }

    let mut result = String::with_capacity(text.len());
    let mut pending_space = false;
    let mut line_has_content = false;

    for ch in text.chars() {
        if is_line_terminator(ch) {
            // Trailing blanks of the line are dropped with the pending space
            result.push(ch);
            pending_space = false;
            line_has_content = false;
        } else if is_horizontal_whitespace(ch) {
            // Leading blanks never set a pending space
            pending_space = line_has_content;
        } else {
            if pending_space {
                result.push(' ');
                pending_space = false;
            }
            result.push(ch);
            line_has_content = true;
        }
    }

    let trimmed = result.trim();
    if trimmed.len() != result.len() {
        return trimmed.to_string();
    }
    result
}

/// Characters that end a line and are never collapsed
pub fn is_line_terminator(ch: char) -> bool {
    matches!(ch, '\n' | '\r' | '\u{0085}' | '\u{2028}' | '\u{2029}')
}

/// Blanks other than line terminators
pub fn is_horizontal_whitespace(ch: char) -> bool {
    ch.is_whitespace() && !is_line_terminator(ch)
}
