//! Configuration loading and saving.
//!
//! All the tunables that drifted across revisions of the flow (hold duration,
//! finger tolerances, confidence cutoff) live here rather than as constants.
//! Loading degrades to defaults when the file is missing or malformed.

use std::path::{Path, PathBuf};
use std::time::Duration;

use fs_err as fs;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{MemecamError, Result};
use crate::gesture::{ClassifierConfig, TargetGesture};

/// Top-level Memecam configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemecamConfig {
    /// How long the gesture must be held before a capture fires.
    #[serde(default = "default_hold_threshold_ms")]
    pub hold_threshold_ms: u64,
    /// Which gesture this deployment hunts for.
    #[serde(default)]
    pub target_gesture: TargetGesture,
    #[serde(default = "default_min_confidence")]
    pub min_confidence: f32,
    #[serde(default = "default_extension_tolerance")]
    pub extension_tolerance: f32,
    #[serde(default = "default_fold_tolerance")]
    pub fold_tolerance: f32,
    #[serde(default = "default_obscured_threshold")]
    pub obscured_threshold: f32,
}

fn default_hold_threshold_ms() -> u64 {
    2000
}

fn default_min_confidence() -> f32 {
    0.5
}

fn default_extension_tolerance() -> f32 {
    0.05
}

fn default_fold_tolerance() -> f32 {
    0.025
}

fn default_obscured_threshold() -> f32 {
    0.03
}

impl Default for MemecamConfig {
    fn default() -> Self {
        Self {
            hold_threshold_ms: default_hold_threshold_ms(),
            target_gesture: TargetGesture::default(),
            min_confidence: default_min_confidence(),
            extension_tolerance: default_extension_tolerance(),
            fold_tolerance: default_fold_tolerance(),
            obscured_threshold: default_obscured_threshold(),
        }
    }
}

impl MemecamConfig {
    pub fn hold_threshold(&self) -> Duration {
        Duration::from_millis(self.hold_threshold_ms)
    }

    pub fn classifier(&self) -> ClassifierConfig {
        ClassifierConfig {
            min_confidence: self.min_confidence,
            extension_tolerance: self.extension_tolerance,
            fold_tolerance: self.fold_tolerance,
            obscured_threshold: self.obscured_threshold,
        }
    }

    /// Loads configuration from the default location, falling back to
    /// defaults when absent.
    pub fn load() -> Self {
        match config_path() {
            Some(path) => Self::load_from(&path),
            None => Self::default(),
        }
    }

    pub fn load_from(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_else(|err| {
                warn!(path = %path.display(), error = %err, "malformed config, using defaults");
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    pub fn save(&self) -> Result<()> {
        let path = config_path().ok_or_else(|| MemecamError::Io {
            context: "resolving config path".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "no home directory"),
        })?;
        self.save_to(&path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| MemecamError::Io {
                context: format!("creating {}", parent.display()),
                source,
            })?;
        }
        let content = serde_json::to_string_pretty(self).map_err(|source| MemecamError::Json {
            context: "serializing config".to_string(),
            source,
        })?;
        fs::write(path, content).map_err(|source| MemecamError::Io {
            context: format!("writing {}", path.display()),
            source,
        })
    }
}

/// `~/.memecam/config.json`
fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".memecam").join("config.json"))
}
