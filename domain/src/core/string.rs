//! String helpers for log lines and list views.

/// Single-line preview of `s`, at most `max_chars` characters.
///
/// Newlines and runs of whitespace collapse to one space; an ellipsis marks
/// truncation. Counts characters, not bytes, so multi-byte text is never split.
pub fn preview(s: &str, max_chars: usize) -> String {
    let collapsed = s.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.chars().count() <= max_chars {
        return collapsed;
    }
    let keep = max_chars.saturating_sub(1);
    let mut out: String = collapsed.chars().take(keep).collect();
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preview_short_text_unchanged() {
        assert_eq!(preview("hello", 10), "hello");
    }

    #[test]
    fn test_preview_collapses_whitespace() {
        assert_eq!(preview("a\n\nb   c", 10), "a b c");
    }

    #[test]
    fn test_preview_truncates_by_chars() {
        assert_eq!(preview("你好世界和平", 4), "你好世…");
    }

    #[test]
    fn test_preview_zero_budget() {
        assert_eq!(preview("abc", 0), "…");
    }
}
