// WHY: hard-wrapped text (PDF extraction, fixed-width mail) breaks words and sentences mid-line
// Rejoins hyphenated words first, then folds single line breaks into spaces

use super::is_word_char;

/// Rejoin hard-wrapped text while keeping blank-line paragraph separators
///
/// `"exam-\nple"` becomes `"example"`, `"line one\nline two\n\nnew para"` becomes
/// `"line one line two\n\nnew para"`. A CRLF pair counts as one line break.
///
/// Word characters on both sides of the hyphen are Unicode alphanumerics or
/// `_` (see [`is_word_char`](super::is_word_char)), not just ASCII `\w`, so
/// `"naï-\nve"` and `"Stra-\nße"` rejoin too.
pub fn smart_debreak(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }
    let joined = join_hyphenated(text);
    fold_single_breaks(&joined)
}

/// Drop `-` + inline whitespace + one break + inline whitespace between two word characters
/// WHY: the trailing word character is never consumed, so `a-\nb-\nc` rejoins both breaks
fn join_hyphenated(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut result = String::with_capacity(text.len());
    let mut prev: Option<char> = None;
    let mut i = 0;

    while i < chars.len() {
        let ch = chars[i];
        if ch == '-' && prev.is_some_and(is_word_char) {
            if let Some(resume) = hyphen_break_end(&chars, i + 1) {
                // Skip hyphen and break; the next word character is emitted normally
                i = resume;
                continue;
            }
        }
        result.push(ch);
        prev = Some(ch);
        i += 1;
    }

    result
}

/// Index of the word character that ends a hyphen break starting at `start`, if any
fn hyphen_break_end(chars: &[char], start: usize) -> Option<usize> {
    let mut j = skip_inline_whitespace(chars, start);
    // `\r` before `\n` is inline whitespace here, so CRLF is covered too
    if chars.get(j) != Some(&'\n') {
        return None;
    }
    j = skip_inline_whitespace(chars, j + 1);
    match chars.get(j) {
        Some(&c) if is_word_char(c) => Some(j),
        _ => None,
    }
}

fn skip_inline_whitespace(chars: &[char], mut pos: usize) -> usize {
    while let Some(&c) = chars.get(pos) {
        if c == '\n' || !c.is_whitespace() {
            break;
        }
        pos += 1;
    }
    pos
}

/// Replace every lone line break that follows a non-break character with a space
fn fold_single_breaks(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    // Last character written that is not part of a line break
    let mut after_content = false;

    while let Some(ch) = chars.next() {
        let is_crlf = ch == '\r' && chars.peek() == Some(&'\n');
        if ch != '\n' && !is_crlf {
            result.push(ch);
            after_content = true;
            continue;
        }

        if is_crlf {
            chars.next();
        }
        let next_is_break = match chars.peek() {
            Some('\n') => true,
            Some('\r') => {
                let mut lookahead = chars.clone();
                lookahead.next();
                lookahead.peek() == Some(&'\n')
            }
            _ => false,
        };

        if after_content && !next_is_break {
            result.push(' ');
            after_content = true;
        } else {
            result.push_str(if is_crlf { "\r\n" } else { "\n" });
            after_content = false;
        }
    }

    result
}
