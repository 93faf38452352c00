//! Markdown rendering using pulldown-cmark

use pulldown_cmark::{html, Options, Parser};

use crate::constants as C;
use crate::frontmatter;
use crate::store::Corpus;

/// Render a markdown body to HTML
pub fn render_html(markdown: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);

    let parser = Parser::new_ext(markdown, options);
    let mut out = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut out, parser);
    out
}

/// One-line text preview of a note: header dropped, heading markers and
/// emphasis stars removed, newlines folded, cut at `max_chars`.
pub fn plain_preview(content: &str, max_chars: usize) -> String {
    let body = frontmatter::strip_frontmatter(content);

    let cleaned = body
        .lines()
        .map(|line| line.trim_start_matches('#').trim_start())
        .collect::<Vec<_>>()
        .join(" ")
        .replace('*', "");
    let cleaned = cleaned.trim();

    if cleaned.chars().count() > max_chars {
        let mut out: String = cleaned.chars().take(max_chars).collect();
        out.push_str(C::ELLIPSIS);
        out
    } else {
        cleaned.to_string()
    }
}

/// [`plain_preview`] of a stored note. Missing or unreadable notes preview as empty.
pub fn note_preview<S: Corpus + ?Sized>(
    store: &S,
    category: &str,
    subcategory: &str,
    title: &str,
    max_chars: usize,
) -> String {
    match store.read_note(category, subcategory, title) {
        Ok(content) => plain_preview(content.as_deref().unwrap_or_default(), max_chars),
        Err(e) => {
            log::warn!("no preview for {}/{}/{}: {}", category, subcategory, title, e);
            String::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::NoteStore;
    use tempfile::TempDir;

    #[test]
    fn test_render_html() {
        let html = render_html("# Title\n\nSome **bold** text.");
        assert!(html.contains("<h1>Title</h1>"));
        assert!(html.contains("<strong>bold</strong>"));
    }

    #[test]
    fn test_render_html_table() {
        let html = render_html("| a | b |\n|---|---|\n| 1 | 2 |\n");
        assert!(html.contains("<table>"));
    }

    #[test]
    fn test_plain_preview_strips_markup() {
        let content = "---\ntitle: X\n---\n\n# Heading\n\nSome **bold** and *italic* text.";
        assert_eq!(plain_preview(content, 80), "Heading  Some bold and italic text.");
    }

    #[test]
    fn test_plain_preview_truncates() {
        let content = "word ".repeat(30);
        let preview = plain_preview(&content, 10);
        assert_eq!(preview, "word word ...");
    }

    #[test]
    fn test_plain_preview_empty() {
        assert_eq!(plain_preview("", 40), "");
    }

    #[test]
    fn test_note_preview_degrades_per_note() {
        let temp_dir = TempDir::new().unwrap();
        let store = NoteStore::new(temp_dir.path().join("notes"));
        store.write_note("X", "Y", "Fine", "# Fine\n\nreadable").unwrap();
        store.write_note("X", "Y", "Broken", "").unwrap();
        std::fs::write(store.note_path("X", "Y", "Broken"), [0xff, 0xfe]).unwrap();

        assert_eq!(note_preview(&store, "X", "Y", "Broken", 40), "");
        assert_eq!(note_preview(&store, "X", "Y", "Ghost", 40), "");
        assert_eq!(note_preview(&store, "X", "Y", "Fine", 40), "Fine  readable");
    }
}
