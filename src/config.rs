//! moana configuration.
//!
//! Loaded from `~/.moana/config.toml`. Everything is optional; a missing
//! file means defaults.

use std::path::PathBuf;
use std::{fs, io};

use serde::Deserialize;

/// moana configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct Config {
    /// Prefill for the captain field on `trip new`.
    pub default_captain: Option<String>,

    /// Prefill for the deckhand field on `trip new`.
    pub default_deckhand: Option<String>,
}

impl Config {
    /// Load config from `~/.moana/config.toml`, tolerating a missing file.
    pub fn load() -> Result<Self, String> {
        let Some(path) = Self::path() else {
            return Ok(Self::default());
        };

        let contents = match fs::read_to_string(&path) {
            Ok(s) => s,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => return Err(format!("failed to read {}: {e}", path.display())),
        };

        toml::from_str(&contents)
            .map_err(|e| format!("invalid config at {}: {e}", path.display()))
    }

    /// The config file path: `~/.moana/config.toml`.
    #[must_use]
    pub fn path() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(".moana").join("config.toml"))
    }
}
