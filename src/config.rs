//! Base directory layout and persisted settings
//!
//! The base directory is resolved in this order:
//! 1. `--home <PATH>`
//! 2. `$WASIBASE_HOME`
//! 3. `~/.wasibase`

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::constants as C;
use crate::store::NoteStore;
use crate::util;

/// Resolve the base directory from the CLI flag, environment and home directory
pub fn base_path(home: Option<&str>) -> PathBuf {
    if let Some(h) = home {
        return PathBuf::from(h);
    }

    // Treat empty strings as unset
    if let Some(env_home) = std::env::var(C::ENV_HOME).ok().filter(|s| !s.is_empty()) {
        return PathBuf::from(env_home);
    }

    dirs::home_dir()
        .map(|p| p.join(C::DEFAULT_BASE_DIR))
        .unwrap_or_else(|| PathBuf::from(C::DEFAULT_BASE_DIR))
}

/// Well-known locations under the base directory
#[derive(Debug, Clone)]
pub struct Paths {
    pub base: PathBuf,
    pub notes: PathBuf,
    pub backups: PathBuf,
    pub config_file: PathBuf,
}

impl Paths {
    pub fn new(base: impl Into<PathBuf>) -> Self {
        let base = base.into();
        Self {
            notes: base.join(C::NOTES_SUBDIR),
            backups: base.join(C::BACKUPS_SUBDIR),
            config_file: base.join(C::CONFIG_FILENAME),
            base,
        }
    }

    pub fn store(&self) -> NoteStore {
        NoteStore::new(&self.notes)
    }
}

/// Everything a command needs to locate data and format output
#[derive(Debug, Clone)]
pub struct Context {
    pub paths: Paths,
    /// Whether to output in JSON format
    pub json: bool,
}

impl Context {
    pub fn new(home: Option<&str>, json: bool) -> Self {
        Self {
            paths: Paths::new(base_path(home)),
            json,
        }
    }

    pub fn store(&self) -> NoteStore {
        self.paths.store()
    }

    pub fn load_config(&self) -> Config {
        Config::load(&self.paths.config_file)
    }

    pub fn save_config(&self, config: &Config) -> io::Result<()> {
        config.save(&self.paths.config_file)
    }
}

/// Settings persisted in `config.json`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sync_path: Option<PathBuf>,
}

impl Config {
    /// Load settings; a missing or unreadable file gives the defaults
    pub fn load(path: &Path) -> Self {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                if e.kind() != io::ErrorKind::NotFound {
                    log::warn!("cannot read config {}: {}", util::display_path(path), e);
                }
                return Self::default();
            }
        };

        serde_json::from_str(&content).unwrap_or_else(|e| {
            log::warn!("ignoring invalid config {}: {}", util::display_path(path), e);
            Self::default()
        })
    }

    pub fn save(&self, path: &Path) -> io::Result<()> {
        let what = || format!("Failed to save config '{}'", util::display_path(path));
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| util::with_context(e, what()))?;
        }
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e.to_string()))?;
        fs::write(path, json).map_err(|e| util::with_context(e, what()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_base_path_flag_wins() {
        assert_eq!(base_path(Some("/tmp/wb")), PathBuf::from("/tmp/wb"));
    }

    #[test]
    fn test_paths_layout() {
        let paths = Paths::new("/data/wb");
        assert_eq!(paths.notes, PathBuf::from("/data/wb/notes"));
        assert_eq!(paths.backups, PathBuf::from("/data/wb/backups"));
        assert_eq!(paths.config_file, PathBuf::from("/data/wb/config.json"));
        assert_eq!(paths.store().root(), Path::new("/data/wb/notes"));
    }

    #[test]
    fn test_config_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested/config.json");

        assert_eq!(Config::load(&path), Config::default());

        let config = Config { sync_path: Some(PathBuf::from("/cloud/Wasibase")) };
        config.save(&path).unwrap();
        let raw = fs::read_to_string(&path).unwrap();
        assert!(raw.contains("\"syncPath\""));
        assert_eq!(Config::load(&path), config);
    }

    #[test]
    fn test_config_invalid_falls_back() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.json");
        fs::write(&path, "not json").unwrap();

        assert_eq!(Config::load(&path), Config::default());
    }

    #[test]
    fn test_config_disabled_sync_omits_key() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.json");
        Config::default().save(&path).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "{}");
    }
}
