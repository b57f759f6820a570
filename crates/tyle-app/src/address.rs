// Address bar text -> URL.

/// Turn typed text into something a pane can open.
///
/// A single word that looks like a host (contains a dot) or already starts
/// with `http` is treated as a URL and gets `https://` when it has no scheme.
/// Anything else becomes a search query appended to `search_prefix`.
/// Blank input yields `None`.
pub fn resolve_address(text: &str, search_prefix: &str) -> Option<String> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    if !text.contains(' ') && (text.contains('.') || text.starts_with("http")) {
        if text.starts_with("http") {
            return Some(text.to_string());
        }
        return Some(format!("https://{}", text));
    }

    let query: Vec<&str> = text.split_whitespace().collect();
    Some(format!("{}{}", search_prefix, query.join("+")))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEARCH: &str = "https://www.google.com/search?q=";

    #[test]
    fn bare_host_gets_https() {
        assert_eq!(
            resolve_address("example.com", SEARCH).as_deref(),
            Some("https://example.com")
        );
    }

    #[test]
    fn existing_scheme_is_kept() {
        assert_eq!(
            resolve_address("http://localhost:8080", SEARCH).as_deref(),
            Some("http://localhost:8080")
        );
    }

    #[test]
    fn words_become_search() {
        assert_eq!(
            resolve_address("  tiling window managers ", SEARCH).as_deref(),
            Some("https://www.google.com/search?q=tiling+window+managers")
        );
    }

    #[test]
    fn dotted_text_with_spaces_is_a_search() {
        assert_eq!(
            resolve_address("rust 1.80 release", SEARCH).as_deref(),
            Some("https://www.google.com/search?q=rust+1.80+release")
        );
    }

    #[test]
    fn single_word_without_dot_is_a_search() {
        assert_eq!(
            resolve_address("localhost", "https://duckduckgo.com/?q=").as_deref(),
            Some("https://duckduckgo.com/?q=localhost")
        );
    }

    #[test]
    fn blank_is_none() {
        assert_eq!(resolve_address("   ", SEARCH), None);
    }
}
