//! Utility functions for name validation and common formatting

use std::io;
use std::path::Path;

/// Validate a category, subcategory or note title before it is used as a path segment.
///
/// Names double as directory and file names, so anything that could escape the
/// notes root or split into several segments is rejected.
pub fn validate_name(kind: &str, name: &str) -> io::Result<()> {
    if name.trim().is_empty() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{} name cannot be empty", kind),
        ));
    }

    if name == "." || name == ".." {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{} name cannot be '{}'", kind, name),
        ));
    }

    if let Some(c) = name.chars().find(|&c| c == '/' || c == '\\' || c.is_control()) {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{} name '{}' contains forbidden character {:?}", kind, name.escape_debug(), c),
        ));
    }

    Ok(())
}

/// Wrap an I/O error with the operation that failed, keeping its kind
pub fn with_context(err: io::Error, what: impl AsRef<str>) -> io::Error {
    io::Error::new(err.kind(), format!("{}: {}", what.as_ref(), err))
}

/// Display a path with forward slashes (cross-platform standard)
pub fn display_path(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

/// Format a byte count for humans (B, KB, MB)
pub fn format_bytes(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{} B", bytes)
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    }
}

/// Escape HTML special characters
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_name_accepts_plain_names() {
        assert!(validate_name("Category", "Math").is_ok());
        assert!(validate_name("Title", "Linear Algebra: Basics").is_ok());
        assert!(validate_name("Title", "Über Ähnlichkeit").is_ok());
    }

    #[test]
    fn test_validate_name_rejects_empty() {
        let err = validate_name("Title", "   ").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
    }

    #[test]
    fn test_validate_name_rejects_traversal() {
        assert!(validate_name("Category", "..").is_err());
        assert!(validate_name("Category", ".").is_err());
        assert!(validate_name("Category", "../etc").is_err());
        assert!(validate_name("Title", "a\\b").is_err());
        assert!(validate_name("Title", "a\0b").is_err());
    }

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(512), "512 B");
        assert_eq!(format_bytes(2048), "2.0 KB");
        assert_eq!(format_bytes(3 * 1024 * 1024), "3.0 MB");
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("<a href=\"x\">&'"), "&lt;a href=&quot;x&quot;&gt;&amp;&#039;");
    }

    #[test]
    fn test_with_context_keeps_kind() {
        let err = with_context(io::Error::new(io::ErrorKind::PermissionDenied, "denied"), "Failed to write note 'A/B/C'");
        assert_eq!(err.kind(), io::ErrorKind::PermissionDenied);
        assert_eq!(err.to_string(), "Failed to write note 'A/B/C': denied");
    }
}
