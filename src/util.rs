//! Shared utility functions

/// Shorten a string for log output, appending "..." if anything was cut.
/// Counts characters rather than bytes so multi-byte text never splits.
pub fn snippet(s: &str, max_chars: usize) -> String {
    let mut chars = s.char_indices();
    match chars.nth(max_chars) {
        None => s.to_string(),
        Some((byte_end, _)) => format!("{}...", &s[..byte_end]),
    }
}
