//! Configuration management for vidshelf
//!
//! Handles config file loading and catalogue path resolution.
//! Config is stored at ~/.config/vidshelf/config.toml

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Environment variable naming the catalogue file
pub const LIBRARY_ENV: &str = "VIDSHELF_LIBRARY";

/// Catalogue used when nothing else is configured
pub const DEFAULT_LIBRARY: &str = "videos.txt";

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Config {
    /// Catalogue file (`Title|id|tags` lines)
    pub library_path: Option<PathBuf>,
    /// Seed for PLAY_RANDOM, for reproducible sessions
    pub random_seed: Option<u64>,
    /// Interactive prompt
    pub prompt: Option<String>,
    /// tracing filter directive, e.g. "vidshelf=debug"
    pub log_filter: Option<String>,
}

impl Config {
    /// Get config file path (~/.config/vidshelf/config.toml)
    pub fn path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("vidshelf").join("config.toml"))
    }

    /// Load config from the default location, or return default if not found
    pub fn load() -> Self {
        Self::path()
            .map(|p| Self::load_from(&p))
            .unwrap_or_default()
    }

    /// Load config from an explicit file. Missing or invalid files yield defaults.
    pub fn load_from(path: &Path) -> Self {
        std::fs::read_to_string(path)
            .ok()
            .and_then(|s| match toml::from_str(&s) {
                Ok(config) => Some(config),
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "Ignoring invalid config");
                    None
                }
            })
            .unwrap_or_default()
    }

    /// Resolve the catalogue path with fallback chain:
    /// 1. Explicit path (command line)
    /// 2. Environment variable VIDSHELF_LIBRARY
    /// 3. `library_path` from the config file
    /// 4. ./videos.txt
    pub fn library_path(&self, explicit: Option<&Path>) -> PathBuf {
        if let Some(path) = explicit {
            return path.to_path_buf();
        }
        if let Some(path) = std::env::var_os(LIBRARY_ENV).filter(|p| !p.is_empty()) {
            return PathBuf::from(path);
        }
        self.library_path
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_LIBRARY))
    }

    pub fn prompt(&self) -> &str {
        self.prompt.as_deref().unwrap_or("> ")
    }
}
