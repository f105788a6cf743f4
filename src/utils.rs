/// Number of characters used for diagnostic previews
pub const PREVIEW_CHARS: usize = 200;

/// Length of a string in characters
pub fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Keeps at most `max_chars` characters, never splitting a character
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Short single-line preview of extracted content for logs
pub fn preview(text: &str) -> String {
    let short = truncate_chars(text, PREVIEW_CHARS);
    let mut line = short.split_whitespace().collect::<Vec<_>>().join(" ");
    if short.len() < text.len() {
        line.push_str("...");
    }
    line
}
