//! Wikilink extraction (`[[Title]]`)

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;

static WIKILINK: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[\[([^\]]+)\]\]").expect("valid wikilink regex"));

/// Extract the titles referenced by `[[...]]` links.
///
/// Each title is trimmed; duplicates are dropped keeping the first occurrence.
/// Case is preserved, so `[[Alpha]]` and `[[alpha]]` are distinct here.
pub fn extract_links(content: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut links = Vec::new();

    for cap in WIKILINK.captures_iter(content) {
        let title = cap[1].trim();
        if seen.insert(title.to_string()) {
            links.push(title.to_string());
        }
    }

    links
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_links_dedup_keeps_case() {
        let links = extract_links("See [[Alpha]] and [[ alpha ]] and [[Alpha]]");
        assert_eq!(links, vec!["Alpha", "alpha"]);
    }

    #[test]
    fn test_extract_links_empty() {
        assert!(extract_links("").is_empty());
        assert!(extract_links("no links here [single] [[unclosed").is_empty());
    }

    #[test]
    fn test_extract_links_first_occurrence_order() {
        let links = extract_links("[[B]] then [[A]] then [[B]] then [[C]]");
        assert_eq!(links, vec!["B", "A", "C"]);
    }

    #[test]
    fn test_extract_links_inner_bracket_stops_match() {
        // `]` is not allowed inside a link name
        assert!(extract_links("[[a]b]]").is_empty());
        assert_eq!(extract_links("[[[Nested]]]"), vec!["[Nested"]);
    }

    #[test]
    fn test_extract_links_multiline_content() {
        let content = "# Title\n\nSee [[Vectors]].\n\n- [[Matrices]]\n";
        assert_eq!(extract_links(content), vec!["Vectors", "Matrices"]);
    }
}
