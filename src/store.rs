//! Corpus store - the category / subcategory / note tree on disk
//!
//! Layout: `<notes>/<category>/<subcategory>/<title>.md`. Every call reads
//! straight from the filesystem; nothing is cached between calls.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::constants as C;
use crate::frontmatter::{self, NoteHeader};
use crate::util;

/// Identifies one note by its place in the hierarchy
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NoteRef {
    pub category: String,
    pub subcategory: String,
    pub title: String,
}

impl NoteRef {
    pub fn new(category: impl Into<String>, subcategory: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            subcategory: subcategory.into(),
            title: title.into(),
        }
    }

    /// Parse `category/subcategory/title` (the title may not contain '/')
    pub fn parse(reference: &str) -> Option<Self> {
        let mut parts = reference.splitn(3, '/');
        let category = parts.next()?.trim();
        let subcategory = parts.next()?.trim();
        let title = parts.next()?.trim();
        if category.is_empty() || subcategory.is_empty() || title.is_empty() {
            return None;
        }
        Some(Self::new(category, subcategory, title))
    }
}

impl std::fmt::Display for NoteRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}/{}", self.category, self.subcategory, self.title)
    }
}

/// Collection size summary
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Stats {
    pub categories: usize,
    pub subcategories: usize,
    pub notes: usize,
}

/// Read access to a note corpus.
///
/// The graph builder and search engine only see this trait, so an indexed
/// implementation can stand in for [`NoteStore`] without touching them.
/// Listings are sorted; missing paths list as empty and read as `None`.
pub trait Corpus {
    fn list_categories(&self) -> io::Result<Vec<String>>;

    fn list_subcategories(&self, category: &str) -> io::Result<Vec<String>>;

    fn list_notes(&self, category: &str, subcategory: &str) -> io::Result<Vec<String>>;

    fn read_note(&self, category: &str, subcategory: &str, title: &str) -> io::Result<Option<String>>;

    /// Like [`Corpus::read_note`], but badly encoded text is repaired instead of failing
    fn read_note_lossy(&self, category: &str, subcategory: &str, title: &str) -> io::Result<Option<String>> {
        self.read_note(category, subcategory, title)
    }

    /// Every note in traversal order: sorted category, then subcategory, then title
    fn all_notes(&self) -> io::Result<Vec<NoteRef>> {
        let mut notes = Vec::new();
        for category in self.list_categories()? {
            for subcategory in self.list_subcategories(&category)? {
                for title in self.list_notes(&category, &subcategory)? {
                    notes.push(NoteRef::new(category.as_str(), subcategory.as_str(), title));
                }
            }
        }
        Ok(notes)
    }

    fn stats(&self) -> io::Result<Stats> {
        let mut stats = Stats::default();
        for category in self.list_categories()? {
            stats.categories += 1;
            for subcategory in self.list_subcategories(&category)? {
                stats.subcategories += 1;
                stats.notes += self.list_notes(&category, &subcategory)?.len();
            }
        }
        Ok(stats)
    }
}

/// Filesystem-backed corpus rooted at the notes directory
#[derive(Debug, Clone)]
pub struct NoteStore {
    root: PathBuf,
}

impl NoteStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of a note file (whether or not it exists)
    pub fn note_path(&self, category: &str, subcategory: &str, title: &str) -> PathBuf {
        self.root
            .join(category)
            .join(subcategory)
            .join(format!("{}.{}", title, C::NOTE_EXTENSION))
    }

    pub fn note_exists(&self, category: &str, subcategory: &str, title: &str) -> bool {
        self.note_path(category, subcategory, title).is_file()
    }

    /// Create a category directory (idempotent)
    pub fn create_category(&self, name: &str) -> io::Result<PathBuf> {
        util::validate_name("Category", name)?;
        let dir = self.root.join(name);
        fs::create_dir_all(&dir)
            .map_err(|e| util::with_context(e, format!("Failed to create category '{}'", name)))?;
        log::info!("created category {}", name);
        Ok(dir)
    }

    /// Create a subcategory directory, and its category if needed (idempotent)
    pub fn create_subcategory(&self, category: &str, name: &str) -> io::Result<PathBuf> {
        util::validate_name("Category", category)?;
        util::validate_name("Subcategory", name)?;
        let dir = self.root.join(category).join(name);
        fs::create_dir_all(&dir).map_err(|e| {
            util::with_context(e, format!("Failed to create subcategory '{}/{}'", category, name))
        })?;
        log::info!("created subcategory {}/{}", category, name);
        Ok(dir)
    }

    /// Create or overwrite a note. Last writer wins.
    pub fn write_note(&self, category: &str, subcategory: &str, title: &str, content: &str) -> io::Result<PathBuf> {
        util::validate_name("Category", category)?;
        util::validate_name("Subcategory", subcategory)?;
        util::validate_name("Title", title)?;

        let what = || format!("Failed to write note '{}/{}/{}'", category, subcategory, title);
        let dir = self.root.join(category).join(subcategory);
        fs::create_dir_all(&dir).map_err(|e| util::with_context(e, what()))?;

        let path = self.note_path(category, subcategory, title);
        fs::write(&path, content).map_err(|e| util::with_context(e, what()))?;
        log::info!("wrote note {}/{}/{} ({} bytes)", category, subcategory, title, content.len());
        Ok(path)
    }

    /// Save user-supplied text under a fresh note header.
    ///
    /// A header already present in `input` is replaced; the `created` date of
    /// an existing note is kept. An existing note that cannot be read is simply
    /// overwritten.
    pub fn save_note(&self, category: &str, subcategory: &str, title: &str, input: &str) -> io::Result<PathBuf> {
        util::validate_name("Title", title)?;

        let mut header = NoteHeader::new(category, subcategory, title);
        let previous = match self.read_note(category, subcategory, title) {
            Ok(existing) => existing.as_deref().and_then(frontmatter::parse_header),
            Err(e) => {
                log::warn!("overwriting unreadable note {}/{}/{}: {}", category, subcategory, title, e);
                None
            }
        };
        if let Some(old) = previous.filter(|old| !old.created.is_empty()) {
            header.created = old.created;
        }

        let body = frontmatter::strip_known_header(input);
        self.write_note(category, subcategory, title, &frontmatter::compose_note(&header, body)?)
    }

    /// Remove a category with everything below it. Returns false if it did not exist.
    pub fn delete_category(&self, name: &str) -> io::Result<bool> {
        util::validate_name("Category", name)?;
        let removed = remove_dir(&self.root.join(name))
            .map_err(|e| util::with_context(e, format!("Failed to delete category '{}'", name)))?;
        if removed {
            log::info!("deleted category {}", name);
        }
        Ok(removed)
    }

    pub fn delete_subcategory(&self, category: &str, name: &str) -> io::Result<bool> {
        util::validate_name("Category", category)?;
        util::validate_name("Subcategory", name)?;
        let removed = remove_dir(&self.root.join(category).join(name)).map_err(|e| {
            util::with_context(e, format!("Failed to delete subcategory '{}/{}'", category, name))
        })?;
        if removed {
            log::info!("deleted subcategory {}/{}", category, name);
        }
        Ok(removed)
    }

    pub fn delete_note(&self, category: &str, subcategory: &str, title: &str) -> io::Result<bool> {
        util::validate_name("Category", category)?;
        util::validate_name("Subcategory", subcategory)?;
        util::validate_name("Title", title)?;

        let path = self.note_path(category, subcategory, title);
        match fs::remove_file(&path) {
            Ok(()) => {
                log::info!("deleted note {}/{}/{}", category, subcategory, title);
                Ok(true)
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(util::with_context(
                e,
                format!("Failed to delete note '{}/{}/{}'", category, subcategory, title),
            )),
        }
    }
}

impl Corpus for NoteStore {
    fn list_categories(&self) -> io::Result<Vec<String>> {
        fs::create_dir_all(&self.root).map_err(|e| {
            util::with_context(e, format!("Failed to create notes directory '{}'", util::display_path(&self.root)))
        })?;
        list_dirs(&self.root)
    }

    fn list_subcategories(&self, category: &str) -> io::Result<Vec<String>> {
        list_dirs(&self.root.join(category))
    }

    fn list_notes(&self, category: &str, subcategory: &str) -> io::Result<Vec<String>> {
        let dir = self.root.join(category).join(subcategory);
        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(util::with_context(e, format!("Failed to list '{}'", util::display_path(&dir)))),
        };

        let suffix = format!(".{}", C::NOTE_EXTENSION);
        let mut titles = Vec::new();
        for entry in entries.filter_map(|e| e.ok()) {
            if !entry.path().is_file() {
                continue;
            }
            if let Some(name) = entry.file_name().to_str() {
                if let Some(title) = name.strip_suffix(&suffix) {
                    titles.push(title.to_string());
                }
            }
        }

        titles.sort();
        Ok(titles)
    }

    fn read_note(&self, category: &str, subcategory: &str, title: &str) -> io::Result<Option<String>> {
        let path = self.note_path(category, subcategory, title);
        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(util::with_context(
                e,
                format!("Failed to read note '{}/{}/{}'", category, subcategory, title),
            )),
        }
    }

    fn read_note_lossy(&self, category: &str, subcategory: &str, title: &str) -> io::Result<Option<String>> {
        let path = self.note_path(category, subcategory, title);
        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(util::with_context(
                    e,
                    format!("Failed to read note '{}/{}/{}'", category, subcategory, title),
                ))
            }
        };

        match String::from_utf8(bytes) {
            Ok(content) => Ok(Some(content)),
            Err(e) => {
                log::warn!("note {}/{}/{} is not valid UTF-8, replacing bad bytes", category, subcategory, title);
                Ok(Some(String::from_utf8_lossy(e.as_bytes()).into_owned()))
            }
        }
    }
}

/// Sorted names of the directories directly under `dir`; empty if `dir` is missing
fn list_dirs(dir: &Path) -> io::Result<Vec<String>> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(util::with_context(e, format!("Failed to list '{}'", util::display_path(dir)))),
    };

    let mut names = Vec::new();
    for entry in entries.filter_map(|e| e.ok()) {
        if entry.path().is_dir() {
            if let Some(name) = entry.file_name().to_str() {
                names.push(name.to_string());
            }
        }
    }

    names.sort();
    Ok(names)
}

fn remove_dir(dir: &Path) -> io::Result<bool> {
    match fs::remove_dir_all(dir) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e),
    }
}
