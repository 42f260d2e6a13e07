//! Small string helpers used when picking apart message bodies.

/// Split `text` at every occurrence of `sep`.
///
/// An empty separator yields one element per character; an empty `text`
/// with a non-empty separator yields `[""]`.
pub fn split(text: &str, sep: &str) -> Vec<String> {
    if sep.is_empty() {
        return text.chars().map(String::from).collect();
    }
    text.split(sep).map(str::to_string).collect()
}

/// Strip leading and trailing characters that appear anywhere in `cutset`.
pub fn trim(text: &str, cutset: &str) -> String {
    if cutset.is_empty() {
        return text.to_string();
    }
    text.trim_matches(|c: char| cutset.contains(c)).to_string()
}

/// Text strictly between the first `start` and the first `end` after it.
///
/// Empty when either marker is missing.
pub fn substring_between(text: &str, start: &str, end: &str) -> String {
    let Some(found) = text.find(start) else {
        return String::new();
    };
    let rest = &text[found + start.len()..];
    match rest.find(end) {
        Some(stop) => rest[..stop].to_string(),
        None => String::new(),
    }
}
