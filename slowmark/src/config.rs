//! Optional user settings, read once at startup from
//! `<config dir>/slowmark/config.json`. slowMark never writes this file.

use crate::host::Mode;
use serde::Deserialize;
use slowcore::storage::{config_dir, documents_dir, load_json, StorageError};
use std::path::{Path, PathBuf};

/// Smallest editor font; the code view draws two points below it.
pub const MIN_FONT_SIZE: f32 = 8.0;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub window_size: [f32; 2],
    /// Where the open/save browser starts; the documents folder if unset.
    pub start_dir: Option<PathBuf>,
    pub default_mode: Mode,
    pub editor_font_size: f32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            window_size: [800.0, 600.0],
            start_dir: None,
            default_mode: Mode::Plain,
            editor_font_size: 16.0,
        }
    }
}

impl Config {
    pub fn path() -> PathBuf {
        config_dir("slowmark").join("config.json")
    }

    /// Load settings, falling back to defaults when the file is absent or bad.
    pub fn load() -> Self {
        Self::load_from(&Self::path())
    }

    pub fn load_from(path: &Path) -> Self {
        match load_json::<Self>(path) {
            Ok(mut config) => {
                if config.editor_font_size < MIN_FONT_SIZE {
                    log::warn!(
                        "editor_font_size {} too small, using {}",
                        config.editor_font_size,
                        MIN_FONT_SIZE
                    );
                    config.editor_font_size = MIN_FONT_SIZE;
                }
                config
            }
            Err(StorageError::NotFound(_)) => Self::default(),
            Err(e) => {
                log::warn!("ignoring {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    pub fn browse_dir(&self) -> PathBuf {
        self.start_dir
            .clone()
            .filter(|dir| dir.is_dir())
            .unwrap_or_else(documents_dir)
    }
}
