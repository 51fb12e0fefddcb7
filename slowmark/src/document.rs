//! Document model for slowMark
//!
//! A single text file held fully in memory. The title is never stored; it is
//! derived from the path so it follows every open and save-as.

use std::path::{Path, PathBuf};

/// Title shown while the document has never been saved.
pub const UNTITLED: &str = "Untitled";

/// The one open document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    /// File path if opened or saved; `None` for a new document
    pub path: Option<PathBuf>,
    /// The text body
    pub content: String,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_file(path: PathBuf, content: String) -> Self {
        Self {
            path: Some(path),
            content,
        }
    }

    /// File name without extension, or [`UNTITLED`].
    pub fn title(&self) -> String {
        self.path
            .as_deref()
            .and_then(title_for_path)
            .unwrap_or_else(|| UNTITLED.to_string())
    }

    pub fn line_count(&self) -> usize {
        self.content.lines().count().max(1)
    }

    pub fn word_count(&self) -> usize {
        self.content.split_whitespace().count()
    }

    pub fn char_count(&self) -> usize {
        self.content.chars().count()
    }
}

fn title_for_path(path: &Path) -> Option<String> {
    path.file_stem().map(|s| s.to_string_lossy().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_document_is_untitled_and_empty() {
        let doc = Document::new();
        assert_eq!(doc.path, None);
        assert_eq!(doc.content, "");
        assert_eq!(doc.title(), "Untitled");
    }

    #[test]
    fn test_title_drops_extension() {
        let doc = Document::from_file(PathBuf::from("/home/me/notes/todo.md"), String::new());
        assert_eq!(doc.title(), "todo");

        let doc = Document::from_file(PathBuf::from("archive.tar.txt"), String::new());
        assert_eq!(doc.title(), "archive.tar");

        let doc = Document::from_file(PathBuf::from("README"), String::new());
        assert_eq!(doc.title(), "README");
    }

    #[test]
    fn test_stats() {
        let doc = Document::from_file(PathBuf::from("a.md"), "# Title\nsome body text".into());
        assert_eq!(doc.line_count(), 2);
        assert_eq!(doc.word_count(), 5);
        assert_eq!(doc.char_count(), 22);
        assert_eq!(Document::new().line_count(), 1);
    }
}
