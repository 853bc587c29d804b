//! Token normalization.
//!
//! A word becomes a token by lower-casing it and dropping every character that is
//! neither alphabetic nor numeric. Words with nothing left are not indexed.

/// Normalizes one whitespace-delimited word. The flag is `false` when the word
/// should not be indexed.
pub fn normalize(word: &str) -> (String, bool) {
    let token: String = word
        .chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect();
    let valid = !token.is_empty();
    (token, valid)
}

/// Valid tokens of a line, in order of appearance.
pub fn tokenize_line(line: &str) -> Vec<String> {
    line.split_whitespace()
        .filter_map(|word| match normalize(word) {
            (token, true) => Some(token),
            _ => None,
        })
        .collect()
}
