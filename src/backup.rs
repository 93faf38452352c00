//! JSON backup, restore and folder sync
//!
//! Interchange format:
//!
//! ```json
//! { "version": 1, "created": "2026-10-19T08:00:00.000Z",
//!   "notes": [ { "category": "...", "subcategory": "...", "title": "...", "content": "..." } ] }
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::{Local, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::constants as C;
use crate::store::{Corpus, NoteStore};
use crate::util;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Backup {
    #[serde(default = "default_version")]
    pub version: u32,
    #[serde(default)]
    pub created: String,
    pub notes: Vec<BackupNote>,
}

/// A note in a backup. Older backups used the German field names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackupNote {
    #[serde(alias = "oberkategorie")]
    pub category: String,
    #[serde(alias = "unterkategorie")]
    pub subcategory: String,
    #[serde(alias = "thema")]
    pub title: String,
    #[serde(default)]
    pub content: String,
}

fn default_version() -> u32 {
    C::BACKUP_VERSION
}

/// Snapshot every note in traversal order.
///
/// Badly encoded notes are included with the bad bytes replaced; any other
/// read failure aborts the whole backup.
pub fn create_backup<S: Corpus + ?Sized>(store: &S) -> io::Result<Backup> {
    let mut notes = Vec::new();
    for note in store.all_notes()? {
        let content = store
            .read_note_lossy(&note.category, &note.subcategory, &note.title)?
            .unwrap_or_default();
        notes.push(BackupNote {
            category: note.category,
            subcategory: note.subcategory,
            title: note.title,
            content,
        });
    }

    Ok(Backup {
        version: C::BACKUP_VERSION,
        created: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        notes,
    })
}

/// Write a backup of the whole corpus to `path`. Returns the number of notes.
pub fn save_backup_to_file<S: Corpus + ?Sized>(store: &S, path: &Path) -> io::Result<usize> {
    let backup = create_backup(store)?;
    let what = || format!("Failed to write backup '{}'", util::display_path(path));

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| util::with_context(e, what()))?;
    }

    let json = serde_json::to_string_pretty(&backup)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e.to_string()))?;
    fs::write(path, json).map_err(|e| util::with_context(e, what()))?;

    log::info!("saved backup of {} note(s) to {}", backup.notes.len(), util::display_path(path));
    Ok(backup.notes.len())
}

/// Load a backup file. Missing or malformed files yield `None`.
pub fn load_backup_from_file(path: &Path) -> Option<Backup> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            log::warn!("cannot read backup {}: {}", util::display_path(path), e);
            return None;
        }
    };

    match serde_json::from_str(&content) {
        Ok(backup) => Some(backup),
        Err(e) => {
            log::warn!("invalid backup {}: {}", util::display_path(path), e);
            None
        }
    }
}

/// Upsert every note of the backup, in array order. Returns the number restored.
pub fn restore_backup(store: &NoteStore, backup: &Backup) -> io::Result<usize> {
    let mut restored = 0;
    for note in &backup.notes {
        store.write_note(&note.category, &note.subcategory, &note.title, &note.content)?;
        restored += 1;
    }
    log::info!("restored {} note(s)", restored);
    Ok(restored)
}

/// Write the sync backup file into `dir`. Returns the number of notes.
pub fn sync_to_path<S: Corpus + ?Sized>(store: &S, dir: &Path) -> io::Result<usize> {
    save_backup_to_file(store, &sync_file(dir))
}

/// Location of the backup file inside a sync folder
pub fn sync_file(dir: &Path) -> PathBuf {
    dir.join(C::SYNC_BACKUP_FILENAME)
}

/// Fresh timestamped backup file name inside `dir`
pub fn default_backup_file(dir: &Path) -> PathBuf {
    let stamp = Local::now().format(C::BACKUP_TIMESTAMP_FORMAT);
    dir.join(format!("{}{}.{}", C::BACKUP_FILE_PREFIX, stamp, C::BACKUP_EXTENSION))
}

/// Backup files in `dir`, newest name first. Empty if `dir` is missing.
pub fn list_backups(dir: &Path) -> io::Result<Vec<PathBuf>> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(e),
    };

    let mut files: Vec<PathBuf> = entries
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.is_file() && p.extension().map(|ext| ext == C::BACKUP_EXTENSION).unwrap_or(false))
        .collect();

    files.sort();
    files.reverse();
    Ok(files)
}
