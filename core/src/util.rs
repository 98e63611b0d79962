/// Shorten `text` to at most `upper_bound` bytes, backing off to the last
/// space inside the window, and append `suffix`. Shorter text is returned
/// unchanged.
pub fn truncate_text(text: &str, suffix: &str, upper_bound: usize) -> String {
    if text.len() <= upper_bound {
        return text.to_string();
    }
    let mut end = upper_bound;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    let mut truncated = &text[..end];
    if let Some(space) = truncated.rfind(' ') {
        if space > 0 {
            truncated = &text[..space];
        }
    }
    format!("{truncated}{suffix}")
}
