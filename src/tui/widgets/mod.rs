pub mod help;
pub mod lyrics_pane;
pub mod player_bar;
pub mod results;
pub mod root;
pub mod search_bar;
pub mod visualizer;

/// Char-count truncation with a `...` tail; good enough for track titles.
pub(crate) fn truncate_str(s: &str, max_len: usize) -> String {
    if max_len == 0 {
        return String::new();
    }
    let char_count: usize = s.chars().count();
    if char_count <= max_len {
        s.to_string()
    } else if max_len > 3 {
        let truncated: String = s.chars().take(max_len - 3).collect();
        format!("{truncated}...")
    } else {
        s.chars().take(max_len).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::truncate_str;

    #[test]
    fn truncate_leaves_short_strings_alone() {
        assert_eq!(truncate_str("abc", 10), "abc");
        assert_eq!(truncate_str("abcdef", 6), "abcdef");
    }

    #[test]
    fn truncate_adds_ellipsis() {
        assert_eq!(truncate_str("abcdefgh", 6), "abc...");
        assert_eq!(truncate_str("abcdefgh", 2), "ab");
        assert_eq!(truncate_str("abc", 0), "");
    }
}
