//! Note header block
//!
//! Notes written by the CLI start with a small YAML block:
//!
//! ```text
//! ---
//! category: Math
//! subcategory: Algebra
//! title: Vectors
//! created: 2026-10-19
//! ---
//!
//! body...
//! ```
//!
//! The header is a writer convention. Readers treat its absence as normal.

use std::io;

use chrono::Local;
use serde::Serialize;

use crate::constants as C;

/// Header fields recorded at the top of a note
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NoteHeader {
    pub category: String,
    pub subcategory: String,
    pub title: String,
    pub created: String,
}

impl NoteHeader {
    /// Header stamped with today's date
    pub fn new(category: &str, subcategory: &str, title: &str) -> Self {
        Self {
            category: category.to_string(),
            subcategory: subcategory.to_string(),
            title: title.to_string(),
            created: Local::now().format(C::CREATED_DATE_FORMAT).to_string(),
        }
    }
}

/// Build the full file content: header block, blank line, body
pub fn compose_note(header: &NoteHeader, body: &str) -> io::Result<String> {
    let yaml = serde_yaml::to_string(header)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e.to_string()))?;
    Ok(format!(
        "{delim}\n{yaml}{delim}\n\n{body}",
        delim = C::FRONTMATTER_DELIMITER,
        yaml = yaml,
        body = body
    ))
}

/// Split content into the raw header text (if any) and the remainder
pub fn split_frontmatter(content: &str) -> (Option<&str>, &str) {
    let Some(rest) = content.strip_prefix(C::FRONTMATTER_DELIMITER) else {
        return (None, content);
    };

    let closing = format!("\n{}", C::FRONTMATTER_DELIMITER);
    let Some(end) = rest.find(&closing) else {
        return (None, content);
    };

    let header = &rest[..end];
    let after = &rest[end + closing.len()..];
    // Drop the remainder of the closing delimiter line
    let body = match after.find('\n') {
        Some(nl) => &after[nl + 1..],
        None => "",
    };

    (Some(header), body)
}

/// Body of a note with the header removed and surrounding whitespace trimmed
pub fn strip_frontmatter(content: &str) -> &str {
    split_frontmatter(content).1.trim()
}

/// Body of text handed in for saving. Only a recognised note header is
/// removed; any other leading `---` block is user content and kept verbatim.
pub fn strip_known_header(input: &str) -> &str {
    if parse_header(input).is_some() {
        strip_frontmatter(input)
    } else {
        input
    }
}

/// Parse the header block. Also understands the older German keys.
pub fn parse_header(content: &str) -> Option<NoteHeader> {
    let (raw, _) = split_frontmatter(content);
    let raw = raw?;
    if raw.len() > C::MAX_FRONTMATTER_SIZE {
        return None;
    }

    let yaml: serde_yaml::Value = serde_yaml::from_str(raw).ok()?;
    let map = yaml.as_mapping()?;

    let field = |keys: &[&str]| -> Option<String> {
        map.iter().find_map(|(k, v)| {
            let key = k.as_str()?;
            if keys.iter().any(|candidate| key.eq_ignore_ascii_case(candidate)) {
                scalar_to_string(v)
            } else {
                None
            }
        })
    };

    Some(NoteHeader {
        category: field(&["category", "Oberkategorie"])?,
        subcategory: field(&["subcategory", "Unterkategorie"])?,
        title: field(&["title", "Thema"])?,
        created: field(&["created", "Erstellt"]).unwrap_or_default(),
    })
}

fn scalar_to_string(value: &serde_yaml::Value) -> Option<String> {
    match value {
        serde_yaml::Value::String(s) => Some(s.clone()),
        serde_yaml::Value::Number(n) => Some(n.to_string()),
        serde_yaml::Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
