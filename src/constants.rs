//! Constants for wasibase
//!
//! File names, markers and tuning values shared across the crate.

// === File and Directory Names ===

/// Default base directory under the user's home
pub const DEFAULT_BASE_DIR: &str = ".wasibase";

/// Subdirectory holding the category tree
pub const NOTES_SUBDIR: &str = "notes";

/// Subdirectory for backup files
pub const BACKUPS_SUBDIR: &str = "backups";

/// Persisted settings file
pub const CONFIG_FILENAME: &str = "config.json";

/// File written into the sync folder
pub const SYNC_BACKUP_FILENAME: &str = "wasibase-backup.json";

/// Prefix for generated backup file names
pub const BACKUP_FILE_PREFIX: &str = "wasibase-backup-";

/// Extension of note files (without dot)
pub const NOTE_EXTENSION: &str = "md";

/// Extension of backup files (without dot)
pub const BACKUP_EXTENSION: &str = "json";

// === Environment Variables ===

/// Overrides the base directory
pub const ENV_HOME: &str = "WASIBASE_HOME";

// === Frontmatter ===

/// Delimiter line of the header block
pub const FRONTMATTER_DELIMITER: &str = "---";

/// Maximum size of frontmatter to parse (prevents DoS on malformed files)
pub const MAX_FRONTMATTER_SIZE: usize = 64 * 1024; // 64KB

/// Date format of the `created` header field
pub const CREATED_DATE_FORMAT: &str = "%Y-%m-%d";

// === Graph Ids ===

pub const CATEGORY_ID_PREFIX: &str = "category:";
pub const SUBCATEGORY_ID_PREFIX: &str = "subcategory:";
pub const NOTE_ID_PREFIX: &str = "note:";

// === Search Preview ===

/// Opening highlight marker around the matched substring
pub const HIGHLIGHT_OPEN: &str = "<mark>";

/// Closing highlight marker
pub const HIGHLIGHT_CLOSE: &str = "</mark>";

/// Characters of context on each side of a match
pub const PREVIEW_CONTEXT_CHARS: usize = 50;

/// Length of the fallback preview when the match is not in the body
pub const PREVIEW_FALLBACK_CHARS: usize = 100;

/// Ellipsis for truncated previews
pub const ELLIPSIS: &str = "...";

/// Length of the list preview shown next to note titles
pub const LIST_PREVIEW_CHARS: usize = 80;

// === Backup ===

/// Current backup format version
pub const BACKUP_VERSION: u32 = 1;

/// Timestamp format used in generated backup file names
pub const BACKUP_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H-%M-%S";
