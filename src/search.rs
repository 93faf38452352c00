//! Full-text search over note titles and contents

use std::io;

use serde::Serialize;

use crate::constants as C;
use crate::frontmatter;
use crate::store::Corpus;
use crate::util;

/// One matching note. `preview` carries highlight markers around the match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchResult {
    pub category: String,
    pub subcategory: String,
    pub title: String,
    pub preview: String,
}

/// Case-insensitive substring search.
///
/// Results follow corpus traversal order; there is no relevance ranking.
/// A blank query returns nothing without touching the disk. Notes that
/// fail to read are skipped.
pub fn search<S: Corpus + ?Sized>(store: &S, query: &str) -> io::Result<Vec<SearchResult>> {
    let query = query.trim();
    if query.is_empty() {
        return Ok(Vec::new());
    }

    let needle = fold_case(query);
    let mut results = Vec::new();

    for note in store.all_notes()? {
        let content = match store.read_note(&note.category, &note.subcategory, &note.title) {
            Ok(Some(content)) => content,
            Ok(None) => continue,
            Err(e) => {
                log::warn!("search skipped {}: {}", note, e);
                continue;
            }
        };

        if fold_case(&note.title).contains(&needle) || fold_case(&content).contains(&needle) {
            results.push(SearchResult {
                preview: make_preview(frontmatter::strip_frontmatter(&content), &needle),
                category: note.category,
                subcategory: note.subcategory,
                title: note.title,
            });
        }
    }

    log::debug!("search {:?}: {} result(s)", query, results.len());
    Ok(results)
}

/// Context snippet around the first match of `needle` (already case-folded) in `body`.
///
/// Falls back to the start of the body when the match is not in it (title-only hits).
pub fn make_preview(body: &str, needle: &str) -> String {
    let preview = match find_ignore_case(body, needle) {
        Some((start, end)) => {
            let chars: Vec<(usize, char)> = body.char_indices().collect();
            let match_start = chars.partition_point(|&(i, _)| i < start);
            let match_end = chars.partition_point(|&(i, _)| i < end);

            let window_start = match_start.saturating_sub(C::PREVIEW_CONTEXT_CHARS);
            let window_end = (match_end + C::PREVIEW_CONTEXT_CHARS).min(chars.len());
            let byte_at = |idx: usize| chars.get(idx).map(|&(i, _)| i).unwrap_or(body.len());

            let mut out = String::new();
            if window_start > 0 {
                out.push_str(C::ELLIPSIS);
            }
            out.push_str(&body[byte_at(window_start)..start]);
            out.push_str(C::HIGHLIGHT_OPEN);
            out.push_str(&body[start..end]);
            out.push_str(C::HIGHLIGHT_CLOSE);
            out.push_str(&body[end..byte_at(window_end)]);
            if window_end < chars.len() {
                out.push_str(C::ELLIPSIS);
            }
            out
        }
        None => {
            let mut out: String = body.chars().take(C::PREVIEW_FALLBACK_CHARS).collect();
            if body.chars().count() > C::PREVIEW_FALLBACK_CHARS {
                out.push_str(C::ELLIPSIS);
            }
            out
        }
    };

    preview.replace("\r\n", " ").replace(['\n', '\r'], " ")
}

/// HTML for a preview: everything escaped except the highlight markers
pub fn preview_html(preview: &str) -> String {
    util::escape_html(preview)
        .replace(&util::escape_html(C::HIGHLIGHT_OPEN), C::HIGHLIGHT_OPEN)
        .replace(&util::escape_html(C::HIGHLIGHT_CLOSE), C::HIGHLIGHT_CLOSE)
}

/// Terminal rendering of a preview: markers become `**`
pub fn preview_plain(preview: &str) -> String {
    preview.replace(C::HIGHLIGHT_OPEN, "**").replace(C::HIGHLIGHT_CLOSE, "**")
}

/// Per-character lowercase, so folded offsets can be mapped back to the source
fn fold_case(s: &str) -> String {
    s.chars().flat_map(char::to_lowercase).collect()
}

/// Byte range in `haystack` of the first case-insensitive match of `needle`
fn find_ignore_case(haystack: &str, needle: &str) -> Option<(usize, usize)> {
    if needle.is_empty() {
        return None;
    }

    let mut folded = String::with_capacity(haystack.len());
    // origin[b] = byte offset in haystack of the char that produced folded byte b
    let mut origin = Vec::with_capacity(haystack.len());
    for (i, c) in haystack.char_indices() {
        for lc in c.to_lowercase() {
            let before = folded.len();
            folded.push(lc);
            origin.resize(origin.len() + (folded.len() - before), i);
        }
    }

    let start = folded.find(needle)?;
    let end = start + needle.len();
    let first = origin[start];
    let last = origin[end - 1];
    let last_len = haystack[last..].chars().next().map(char::len_utf8).unwrap_or(0);
    Some((first, last + last_len))
}
