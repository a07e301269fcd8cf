//! String utilities for the domain layer.

/// Truncate a string to a maximum length with ellipsis (UTF-8 safe)
///
/// Uses byte length for max_len but ensures truncation occurs at valid
/// UTF-8 character boundaries.
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        s.to_string()
    } else {
        let target = max_len.saturating_sub(3);
        let mut end = target.min(s.len());
        while end > 0 && !s.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...", &s[..end])
    }
}

/// Single-line preview of a message body, for log lines.
pub fn preview(s: &str, max_len: usize) -> String {
    let flattened: String = s
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    truncate(&flattened, max_len)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_ascii() {
        assert_eq!(truncate("hello", 10), "hello");
        assert_eq!(truncate("hello world", 8), "hello...");
    }

    #[test]
    fn test_truncate_multibyte() {
        // 'ä' is 2 bytes; cutting inside it must back up to the boundary
        assert_eq!(truncate("ääääää", 8), "ää...");
        assert_eq!(truncate("ääääää", 12), "ääääää");
    }

    #[test]
    fn test_truncate_alert_marker() {
        // '▸' is 3 bytes
        assert_eq!(truncate("ALERT ▸ db", 9), "ALERT ...");
    }

    #[test]
    fn test_preview_flattens_whitespace() {
        assert_eq!(preview("line one\n\n  line two", 100), "line one line two");
        assert_eq!(preview("a b c d e f", 8), "a b c...");
    }
}
