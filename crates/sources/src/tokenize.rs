//! Whitespace tokenizing shared by the line-oriented adapters.

/// The `n`th whitespace-separated token; runs of spaces and tabs collapse
pub fn nth_token(line: &str, n: usize) -> Option<&str> {
    line.split_whitespace().nth(n)
}
