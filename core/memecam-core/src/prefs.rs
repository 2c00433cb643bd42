//! Per-user "do not show this modal again" preferences.
//!
//! A tiny key→bool store consulted before every modal open. Persisted as JSON
//! under the user's home directory; a missing or malformed file degrades to
//! empty preferences rather than an error.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use fs_err as fs;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{MemecamError, Result};
use crate::types::ModalId;

/// Stored skip choices, keyed by modal.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModalPrefs {
    #[serde(default)]
    skip: BTreeMap<ModalId, bool>,
}

impl ModalPrefs {
    /// Whether the user chose to bypass this modal in future sessions.
    pub fn skip(&self, modal: ModalId) -> bool {
        self.skip.get(&modal).copied().unwrap_or(false)
    }

    pub fn set_skip(&mut self, modal: ModalId, skip: bool) {
        if skip {
            self.skip.insert(modal, true);
        } else {
            self.skip.remove(&modal);
        }
    }

    /// Loads preferences from the default location, returning empty
    /// preferences if the file is missing or unreadable.
    pub fn load() -> Self {
        match prefs_path() {
            Some(path) => Self::load_from(&path),
            None => Self::default(),
        }
    }

    /// Loads preferences from an explicit path (used by tests and custom
    /// hosts). Any read or parse problem degrades to defaults.
    pub fn load_from(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_else(|err| {
                warn!(path = %path.display(), error = %err, "malformed prefs file, using defaults");
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    /// Saves preferences to the default location.
    pub fn save(&self) -> Result<()> {
        let path = prefs_path().ok_or_else(|| MemecamError::Io {
            context: "resolving prefs path".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "no home directory"),
        })?;
        self.save_to(&path)
    }

    /// Saves preferences to an explicit path, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| MemecamError::Io {
                context: format!("creating {}", parent.display()),
                source,
            })?;
        }
        let content = serde_json::to_string_pretty(self).map_err(|source| MemecamError::Json {
            context: "serializing prefs".to_string(),
            source,
        })?;
        fs::write(path, content).map_err(|source| MemecamError::Io {
            context: format!("writing {}", path.display()),
            source,
        })
    }
}

/// `~/.memecam/prefs.json`
fn prefs_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".memecam").join("prefs.json"))
}
