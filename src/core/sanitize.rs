// src/core/sanitize.rs
use std::sync::LazyLock;

use regex::Regex;

static PAREN_COUNT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\((\d+)\)").expect("static regex"));

/// Collapse every whitespace run to a single space and trim the ends.
pub fn normalize_ws(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_space = false;
    for ch in s.chars() {
        if ch.is_whitespace() {
            if !prev_space { out.push(' '); prev_space = true; }
        } else { out.push(ch); prev_space = false; }
    }
    out.trim().to_string()
}

/// First number wrapped in parentheses, e.g. `"Current calls (42)"` → `Some(42)`.
/// Non-digit content inside the parentheses does not count.
pub fn parenthesized_count(s: &str) -> Option<u32> {
    PAREN_COUNT
        .captures(s)
        .and_then(|c| c.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ws_is_collapsed() {
        assert_eq!(normalize_ws("  Party \n\t Submission  "), "Party Submission");
        assert_eq!(normalize_ws("\n\n"), "");
    }

    #[test]
    fn count_from_title() {
        assert_eq!(parenthesized_count("Current calls for submissions (42)"), Some(42));
        assert_eq!(parenthesized_count("Previous (7) and more (9)"), Some(7));
        assert_eq!(parenthesized_count("No count here"), None);
        assert_eq!(parenthesized_count("Odd (n/a) (3)"), Some(3));
        assert_eq!(parenthesized_count("Overflow (99999999999)"), None);
    }
}
