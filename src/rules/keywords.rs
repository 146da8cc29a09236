/// Lowercases `text` and splits it into word tokens.
///
/// Anything that is not alphanumeric or `-` separates tokens.
pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !(c.is_alphanumeric() || c == '-'))
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// Lowercased, trimmed text with runs of whitespace collapsed to one space.
pub fn normalize(text: &str) -> String {
    tokenize(text).join(" ")
}

/// Returns `true` if `phrase` occurs in `tokens` as a contiguous token sequence.
pub fn contains_phrase(tokens: &[String], phrase: &str) -> bool {
    let needle: Vec<&str> = phrase.split_whitespace().collect();
    if needle.is_empty() || needle.len() > tokens.len() {
        return false;
    }
    tokens
        .windows(needle.len())
        .any(|window| window.iter().zip(&needle).all(|(t, n)| t == n))
}

/// Returns `true` if any keyword occurs in `tokens`.
pub fn contains_any(tokens: &[String], keywords: &[&str]) -> bool {
    keywords.iter().any(|k| contains_phrase(tokens, k))
}
