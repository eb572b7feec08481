//! Cleanup of generated text.

/// Strip quote artifacts left behind by the summarizer.
///
/// Removes escaped (`\"`, `\'`) and literal (`"`, `'`) quotes, then trims
/// surrounding whitespace. After one pass no quote character remains, so
/// `clean(clean(x)) == clean(x)`.
pub fn clean(text: &str) -> String {
    text.replace("\\\"", "")
        .replace("\\'", "")
        .replace(['"', '\''], "")
        .trim()
        .to_string()
}
