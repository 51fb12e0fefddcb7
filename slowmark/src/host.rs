//! The boundary between the document core and whatever runs it.
//!
//! [`DocumentState`](crate::state::DocumentState) only ever reaches dialogs,
//! notices and the front-end through [`HostServices`]. The egui shell
//! implements it in `shell.rs`; tests use a fake.

use slowcore::storage::FileFilter;
use std::path::PathBuf;
use thiserror::Error;

/// Default name offered by the save dialog.
pub const DEFAULT_FILE_NAME: &str = "untitled.md";

pub fn open_filters() -> Vec<FileFilter> {
    vec![
        FileFilter::new("markdown", &["md"]),
        FileFilter::new("text", &["txt"]),
        FileFilter::new("all files", &["*"]),
    ]
}

pub fn save_filters() -> Vec<FileFilter> {
    vec![
        FileFilter::new("markdown", &["md"]),
        FileFilter::new("text", &["txt"]),
    ]
}

/// What the core asks a host for when it needs a file location. The egui
/// picker is built from the same value.
#[derive(Debug, Clone, PartialEq)]
pub struct PickRequest {
    pub title: String,
    pub filters: Vec<FileFilter>,
    /// Prefilled file name; only save dialogs have one.
    pub default_name: Option<String>,
}

impl PickRequest {
    pub fn open() -> Self {
        Self {
            title: "open markdown file".to_string(),
            filters: open_filters(),
            default_name: None,
        }
    }

    pub fn save() -> Self {
        Self {
            title: "save file".to_string(),
            filters: save_filters(),
            default_name: Some(DEFAULT_FILE_NAME.to_string()),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct HostError(pub String);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Error,
}

/// How the front-end presents the document. Never affects stored content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Plain,
    Structured,
}

impl Mode {
    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Plain => "plain",
            Mode::Structured => "structured",
        }
    }
}

/// Fire-and-forget notifications for the front-end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// New content to show, sent after New and after a successful Open.
    DocumentOpened(String),
    ModeChangeRequested(Mode),
}

pub trait HostServices {
    /// `Ok(None)` means the user cancelled.
    fn pick_open_file(
        &mut self,
        title: &str,
        filters: &[FileFilter],
    ) -> Result<Option<PathBuf>, HostError>;

    /// `Ok(None)` means the user cancelled.
    fn pick_save_file(
        &mut self,
        title: &str,
        filters: &[FileFilter],
        default_name: &str,
    ) -> Result<Option<PathBuf>, HostError>;

    fn notify(&mut self, kind: NoticeKind, title: &str, message: &str);

    fn emit(&mut self, event: Event);

    /// Terminate the application now, without asking about unsaved work.
    fn quit(&mut self);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_open_filters_accept_any_file_last() {
        let filters = open_filters();
        assert_eq!(filters.len(), 3);
        assert!(filters[0].matches(Path::new("a.md")));
        assert!(filters[1].matches(Path::new("a.txt")));
        assert!(filters[2].matches(Path::new("a.rs")));
    }

    #[test]
    fn test_save_filters_are_markdown_and_text_only() {
        let filters = save_filters();
        assert!(filters.iter().all(|f| !f.matches(Path::new("a.rs"))));
        assert!(filters[0].matches(Path::new(DEFAULT_FILE_NAME)));
    }

    #[test]
    fn test_only_save_requests_prefill_a_name() {
        assert_eq!(PickRequest::open().default_name, None);
        assert_eq!(PickRequest::save().default_name.as_deref(), Some("untitled.md"));
        assert_eq!(PickRequest::save().filters, save_filters());
    }

    #[test]
    fn test_mode_names() {
        assert_eq!(Mode::Plain.as_str(), "plain");
        assert_eq!(Mode::Structured.as_str(), "structured");
        assert_eq!(serde_json::to_string(&Mode::Structured).unwrap(), "\"structured\"");
    }
}
