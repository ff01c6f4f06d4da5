/// Case-insensitive substring test. `needle` must already be lowercase.
pub fn contains_folded(haystack: Option<&str>, needle: &str) -> bool {
    haystack.is_some_and(|h| h.to_lowercase().contains(needle))
}

/// Normalized search needle; `None` when the query is blank.
pub fn search_needle(query: &str) -> Option<String> {
    let trimmed = query.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_lowercase())
}

/// Split a comma-separated input into trimmed, non-empty entries.
pub fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Treat blank text inputs as absent.
pub fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_list_drops_blanks() {
        assert_eq!(split_list(" Rust, ,SQL ,"), vec!["Rust", "SQL"]);
        assert!(split_list("  ").is_empty());
    }

    #[test]
    fn needle_is_trimmed_and_lowercased() {
        assert_eq!(search_needle("  ACME "), Some("acme".to_string()));
        assert_eq!(search_needle("   "), None);
        assert!(contains_folded(Some("Acme Corp"), "acme"));
        assert!(!contains_folded(None, "acme"));
    }
}
