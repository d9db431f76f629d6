//! Table display helpers for CLI commands

/// Truncate a string for table display, handling Unicode safely.
///
/// If the string exceeds `max_len` characters, it is truncated with "..." appended.
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{truncated}...")
    }
}

/// One-character flag column: `symbol` when set, blank otherwise.
pub fn marker(set: bool, symbol: char) -> char {
    if set {
        symbol
    } else {
        ' '
    }
}
