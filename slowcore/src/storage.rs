//! Storage utilities for Slow Computer apps
//!
//! Handles the file browser used by open/save dialogs, and JSON settings.

use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("File not found: {0}")]
    NotFound(PathBuf),
}

pub type Result<T> = std::result::Result<T, StorageError>;

/// Read a JSON settings file into `T`.
pub fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    if !path.exists() {
        return Err(StorageError::NotFound(path.to_path_buf()));
    }
    let contents = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&contents)?)
}

/// A named set of file extensions shown in the browser's filter dropdown.
///
/// An extension of `"*"` matches every file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileFilter {
    pub name: String,
    pub extensions: Vec<String>,
}

impl FileFilter {
    pub fn new(name: &str, extensions: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            extensions: extensions.iter().map(|e| e.to_lowercase()).collect(),
        }
    }

    pub fn matches(&self, path: &Path) -> bool {
        if self.extensions.iter().any(|e| e == "*") {
            return true;
        }
        let ext = path
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default();
        self.extensions.iter().any(|f| *f == ext)
    }

    /// Label for the dropdown, e.g. `markdown (*.md)`.
    pub fn label(&self) -> String {
        let patterns: Vec<String> = self
            .extensions
            .iter()
            .map(|e| if e == "*" { "*.*".to_string() } else { format!("*.{}", e) })
            .collect();
        format!("{} ({})", self.name, patterns.join(", "))
    }
}

/// Simple file browser state
#[derive(Debug, Clone)]
pub struct FileBrowser {
    pub current_dir: PathBuf,
    pub entries: Vec<FileEntry>,
    pub selected_index: Option<usize>,
    pub filters: Vec<FileFilter>,
    pub active_filter: usize,
}

#[derive(Debug, Clone)]
pub struct FileEntry {
    pub name: String,
    pub path: PathBuf,
    pub is_directory: bool,
}

impl FileBrowser {
    pub fn new(start_dir: PathBuf) -> Self {
        let mut browser = Self {
            current_dir: start_dir,
            entries: Vec::new(),
            selected_index: None,
            filters: Vec::new(),
            active_filter: 0,
        };
        browser.refresh();
        browser
    }

    pub fn with_filters(mut self, filters: Vec<FileFilter>) -> Self {
        self.filters = filters;
        self.active_filter = 0;
        self.refresh();
        self
    }

    pub fn active_filter(&self) -> Option<&FileFilter> {
        self.filters.get(self.active_filter)
    }

    pub fn set_active_filter(&mut self, index: usize) {
        if index < self.filters.len() && index != self.active_filter {
            self.active_filter = index;
            self.refresh();
        }
    }

    pub fn refresh(&mut self) {
        self.entries.clear();
        self.selected_index = None;

        // Add parent directory entry
        if let Some(parent) = self.current_dir.parent() {
            self.entries.push(FileEntry {
                name: "..".to_string(),
                path: parent.to_path_buf(),
                is_directory: true,
            });
        }

        let read_dir = match std::fs::read_dir(&self.current_dir) {
            Ok(read_dir) => read_dir,
            Err(e) => {
                log::warn!("cannot list {}: {}", self.current_dir.display(), e);
                return;
            }
        };

        let mut dirs = Vec::new();
        let mut files = Vec::new();

        for entry in read_dir.flatten() {
            let path = entry.path();
            let name = entry.file_name().to_string_lossy().to_string();

            // Skip hidden files
            if name.starts_with('.') {
                continue;
            }

            let is_directory = path.is_dir();

            if !is_directory {
                if let Some(filter) = self.active_filter() {
                    if !filter.matches(&path) {
                        continue;
                    }
                }
            }

            let entry = FileEntry {
                name,
                path,
                is_directory,
            };

            if is_directory {
                dirs.push(entry);
            } else {
                files.push(entry);
            }
        }

        dirs.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
        files.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));

        // Directories first, then files
        self.entries.extend(dirs);
        self.entries.extend(files);
    }

    pub fn navigate_to(&mut self, path: PathBuf) {
        if path.is_dir() {
            self.current_dir = path;
            self.refresh();
        }
    }

    pub fn selected_entry(&self) -> Option<&FileEntry> {
        self.selected_index.and_then(|i| self.entries.get(i))
    }

    /// Directory a save should land in: the selected folder if one is
    /// highlighted, otherwise the folder being browsed.
    pub fn save_directory(&self) -> PathBuf {
        match self.selected_entry() {
            Some(entry) if entry.is_directory && entry.name != ".." => entry.path.clone(),
            _ => self.current_dir.clone(),
        }
    }
}

/// Get the config directory for Slow Computer apps
pub fn config_dir(app_name: &str) -> PathBuf {
    directories::ProjectDirs::from("co", "slowcomputer", app_name)
        .map(|dirs| dirs.config_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Get the documents directory
pub fn documents_dir() -> PathBuf {
    directories::UserDirs::new()
        .and_then(|dirs| dirs.document_dir().map(|p| p.to_path_buf()))
        .unwrap_or_else(|| PathBuf::from("."))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn touch(dir: &Path, name: &str) {
        std::fs::write(dir.join(name), "").unwrap();
    }

    #[test]
    fn test_filter_matches_extension_case_insensitively() {
        let md = FileFilter::new("markdown", &["md"]);
        assert!(md.matches(Path::new("notes.md")));
        assert!(md.matches(Path::new("NOTES.MD")));
        assert!(!md.matches(Path::new("notes.txt")));
        assert!(!md.matches(Path::new("README")));
    }

    #[test]
    fn test_wildcard_filter_matches_everything() {
        let all = FileFilter::new("all files", &["*"]);
        assert!(all.matches(Path::new("a.bin")));
        assert!(all.matches(Path::new("Makefile")));
        assert_eq!(all.label(), "all files (*.*)");
    }

    #[test]
    fn test_browser_lists_dirs_first_and_applies_filter() {
        let tmp = tempfile::tempdir().unwrap();
        touch(tmp.path(), "b.md");
        touch(tmp.path(), "a.txt");
        touch(tmp.path(), ".hidden.md");
        std::fs::create_dir(tmp.path().join("zdir")).unwrap();

        let mut browser = FileBrowser::new(tmp.path().to_path_buf()).with_filters(vec![
            FileFilter::new("markdown", &["md"]),
            FileFilter::new("text", &["txt"]),
        ]);
        let names: Vec<&str> = browser.entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["..", "zdir", "b.md"]);

        browser.set_active_filter(1);
        let names: Vec<&str> = browser.entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["..", "zdir", "a.txt"]);
    }

    #[test]
    fn test_save_directory_prefers_selected_folder() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::create_dir(tmp.path().join("drafts")).unwrap();
        let mut browser = FileBrowser::new(tmp.path().to_path_buf());
        assert_eq!(browser.save_directory(), tmp.path());

        let idx = browser.entries.iter().position(|e| e.name == "drafts").unwrap();
        browser.selected_index = Some(idx);
        assert_eq!(browser.save_directory(), tmp.path().join("drafts"));
    }

    #[test]
    fn test_load_json_missing_file_is_not_found() {
        let tmp = tempfile::tempdir().unwrap();
        let result: Result<serde_json::Value> = load_json(&tmp.path().join("nope.json"));
        assert!(matches!(result, Err(StorageError::NotFound(_))));
    }
}
