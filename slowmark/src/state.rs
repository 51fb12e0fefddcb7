//! The single-document state and its file operations.
//!
//! Every operation runs to completion on the calling thread. Dialogs and
//! notices go through [`HostServices`]; the filesystem is touched directly
//! with blocking `std::fs` calls.

use crate::document::Document;
use crate::error::{DocumentError, Result};
use crate::host::{save_filters, Event, HostServices, NoticeKind, PickRequest};
use std::path::Path;

const OPEN_ERROR_TITLE: &str = "open file error";
const READ_ERROR_TITLE: &str = "read file error";
const SAVE_ERROR_TITLE: &str = "save file error";
const SAVED_TITLE: &str = "saved";

/// Owns the one open [`Document`].
#[derive(Debug, Default)]
pub struct DocumentState {
    document: Document,
}

impl DocumentState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn content(&self) -> &str {
        &self.document.content
    }

    pub fn current_file(&self) -> Option<&Path> {
        self.document.path.as_deref()
    }

    pub fn title(&self) -> String {
        self.document.title()
    }

    /// Replace the in-memory text. The front-end calls this on every edit.
    pub fn set_content(&mut self, text: impl Into<String>) {
        self.document.content = text.into();
    }

    /// Discard the current document and start an empty, unsaved one.
    pub fn new_file(&mut self, host: &mut dyn HostServices) {
        self.document = Document::new();
        log::debug!("new document");
        host.emit(Event::DocumentOpened(String::new()));
    }

    /// Pick a file and load it, replacing the current document.
    ///
    /// On any failure the current document is left untouched.
    pub fn open_file(&mut self, host: &mut dyn HostServices) -> Result<String> {
        let request = PickRequest::open();
        let path = match host.pick_open_file(&request.title, &request.filters) {
            Ok(Some(path)) => path,
            Ok(None) => {
                log::debug!("open cancelled");
                return Err(DocumentError::UserCancelled);
            }
            Err(e) => return Err(report(host, OPEN_ERROR_TITLE, DocumentError::Dialog(e.0))),
        };

        // non-UTF-8 files fail here with InvalidData
        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) => return Err(report(host, READ_ERROR_TITLE, DocumentError::io(&path, e))),
        };

        log::info!("opened {} ({} bytes)", path.display(), content.len());
        self.document = Document::from_file(path, content.clone());
        host.emit(Event::DocumentOpened(content.clone()));
        Ok(content)
    }

    /// Write to the current path, or prompt for one if the document is new.
    pub fn save_file(&mut self, host: &mut dyn HostServices) -> Result<()> {
        let Some(path) = self.document.path.clone() else {
            return self.save_as_file(host);
        };
        self.write_to(host, &path)
    }

    /// Prompt for a location and write there. The document only adopts the
    /// new path once the write has succeeded.
    pub fn save_as_file(&mut self, host: &mut dyn HostServices) -> Result<()> {
        let request = PickRequest::save();
        let default_name = request.default_name.as_deref().unwrap_or_default();
        let path = match host.pick_save_file(&request.title, &request.filters, default_name) {
            Ok(Some(path)) => path,
            Ok(None) => {
                log::debug!("save as cancelled");
                return Err(DocumentError::UserCancelled);
            }
            Err(e) => return Err(report(host, SAVE_ERROR_TITLE, DocumentError::Dialog(e.0))),
        };

        self.write_to(host, &path)?;
        self.document.path = Some(path);
        Ok(())
    }

    /// Quit immediately. Unsaved content is dropped.
    pub fn shutdown(&self, host: &mut dyn HostServices) {
        log::info!("shutting down");
        host.quit();
    }

    fn write_to(&self, host: &mut dyn HostServices, path: &Path) -> Result<()> {
        if let Err(e) = std::fs::write(path, self.document.content.as_bytes()) {
            return Err(report(host, SAVE_ERROR_TITLE, DocumentError::io(path, e)));
        }
        log::info!("saved {} ({} bytes)", path.display(), self.document.content.len());
        host.notify(
            NoticeKind::Info,
            SAVED_TITLE,
            &format!("saved to: {}", path.display()),
        );
        Ok(())
    }
}

/// Log a failure and show it to the user, handing the error back.
fn report(host: &mut dyn HostServices, title: &str, err: DocumentError) -> DocumentError {
    log::warn!("{}: {}", title, err);
    let message = match &err {
        DocumentError::Io { source, .. } => source.to_string(),
        other => other.to_string(),
    };
    host.notify(NoticeKind::Error, title, &message);
    err
}

/// Whether a dropped file is something slowMark edits (markdown or text).
pub fn is_supported_document(path: &Path) -> bool {
    save_filters().iter().any(|filter| filter.matches(path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::HostError;
    use slowcore::storage::FileFilter;
    use std::collections::VecDeque;
    use std::path::PathBuf;

    type Pick = std::result::Result<Option<PathBuf>, HostError>;

    #[derive(Default)]
    struct FakeHost {
        open_answers: VecDeque<Pick>,
        save_answers: VecDeque<Pick>,
        save_prompts: Vec<(String, Vec<FileFilter>, String)>,
        notices: Vec<(NoticeKind, String, String)>,
        events: Vec<Event>,
        quit: bool,
    }

    impl FakeHost {
        fn opening(path: &Path) -> Self {
            let mut host = Self::default();
            host.open_answers.push_back(Ok(Some(path.to_path_buf())));
            host
        }

        fn saving(path: &Path) -> Self {
            let mut host = Self::default();
            host.save_answers.push_back(Ok(Some(path.to_path_buf())));
            host
        }

        fn errors(&self) -> Vec<&(NoticeKind, String, String)> {
            self.notices.iter().filter(|n| n.0 == NoticeKind::Error).collect()
        }
    }

    impl HostServices for FakeHost {
        fn pick_open_file(&mut self, _title: &str, _filters: &[FileFilter]) -> Pick {
            self.open_answers.pop_front().unwrap_or(Ok(None))
        }

        fn pick_save_file(&mut self, title: &str, filters: &[FileFilter], default_name: &str) -> Pick {
            self.save_prompts
                .push((title.to_string(), filters.to_vec(), default_name.to_string()));
            self.save_answers.pop_front().unwrap_or(Ok(None))
        }

        fn notify(&mut self, kind: NoticeKind, title: &str, message: &str) {
            self.notices.push((kind, title.to_string(), message.to_string()));
        }

        fn emit(&mut self, event: Event) {
            self.events.push(event);
        }

        fn quit(&mut self) {
            self.quit = true;
        }
    }

    fn loaded_state(dir: &Path) -> DocumentState {
        let path = dir.join("loaded.md");
        std::fs::write(&path, "loaded").unwrap();
        let mut state = DocumentState::new();
        state.open_file(&mut FakeHost::opening(&path)).unwrap();
        state
    }

    #[test]
    fn test_new_file_always_clears_everything() {
        let tmp = tempfile::tempdir().unwrap();
        let mut state = loaded_state(tmp.path());
        state.set_content("edited");

        let mut host = FakeHost::default();
        state.new_file(&mut host);
        assert_eq!(state.current_file(), None);
        assert_eq!(state.content(), "");
        assert_eq!(state.title(), "Untitled");
        assert_eq!(host.events, vec![Event::DocumentOpened(String::new())]);

        state.new_file(&mut host);
        assert_eq!(state.document(), &Document::new());
    }

    #[test]
    fn test_open_reads_file_exactly() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("Title.md");
        std::fs::write(&path, "# Title\nBody").unwrap();

        let mut state = DocumentState::new();
        let mut host = FakeHost::opening(&path);
        let content = state.open_file(&mut host).unwrap();

        assert_eq!(content, "# Title\nBody");
        assert_eq!(state.content(), "# Title\nBody");
        assert_eq!(state.current_file(), Some(path.as_path()));
        assert_eq!(state.title(), "Title");
        assert_eq!(host.events, vec![Event::DocumentOpened("# Title\nBody".into())]);
        assert!(host.notices.is_empty());
    }

    #[test]
    fn test_open_refuses_invalid_utf8_and_leaves_file_alone() {
        let tmp = tempfile::tempdir().unwrap();
        let mut state = loaded_state(tmp.path());
        let before = state.document().clone();
        let path = tmp.path().join("latin1.txt");
        std::fs::write(&path, b"caf\xe9\n").unwrap();

        let mut host = FakeHost::opening(&path);
        let err = state.open_file(&mut host).unwrap_err();
        assert!(matches!(
            err,
            DocumentError::Io { ref source, .. } if source.kind() == std::io::ErrorKind::InvalidData
        ));
        assert_eq!(state.document(), &before);
        assert_eq!(host.errors().len(), 1);
        assert_eq!(host.errors()[0].1, READ_ERROR_TITLE);
        assert!(host.events.is_empty());

        // saving afterwards writes the still-open document, never the refused file
        state.save_file(&mut FakeHost::default()).unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), b"caf\xe9\n");
        assert_eq!(std::fs::read_to_string(tmp.path().join("loaded.md")).unwrap(), "loaded");
    }

    #[test]
    fn test_cancelled_open_changes_nothing() {
        let tmp = tempfile::tempdir().unwrap();
        let mut state = loaded_state(tmp.path());
        state.set_content("unsaved edits");
        let before = state.document().clone();

        let mut host = FakeHost::default();
        let err = state.open_file(&mut host).unwrap_err();
        assert!(err.is_cancelled());
        assert_eq!(state.document(), &before);
        assert!(host.notices.is_empty());
        assert!(host.events.is_empty());
    }

    #[test]
    fn test_failed_read_reports_and_keeps_state() {
        let tmp = tempfile::tempdir().unwrap();
        let mut state = loaded_state(tmp.path());
        let before = state.document().clone();

        let mut host = FakeHost::opening(&tmp.path().join("missing.md"));
        let err = state.open_file(&mut host).unwrap_err();
        assert!(matches!(err, DocumentError::Io { .. }));
        assert_eq!(state.document(), &before);
        assert_eq!(host.errors().len(), 1);
        assert_eq!(host.errors()[0].1, READ_ERROR_TITLE);
        assert!(host.events.is_empty());
    }

    #[test]
    fn test_dialog_failure_is_reported() {
        let mut state = DocumentState::new();
        let mut host = FakeHost::default();
        host.open_answers.push_back(Err(HostError("no display".into())));

        let err = state.open_file(&mut host).unwrap_err();
        assert!(matches!(err, DocumentError::Dialog(ref m) if m == "no display"));
        assert_eq!(host.errors()[0].1, OPEN_ERROR_TITLE);
        assert_eq!(host.errors()[0].2, "dialog failed: no display");
    }

    #[test]
    fn test_save_as_then_open_round_trips() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("draft.md");

        let mut state = DocumentState::new();
        state.set_content("line one\n\n- item\n");
        let mut host = FakeHost::saving(&path);
        state.save_as_file(&mut host).unwrap();
        assert_eq!(state.current_file(), Some(path.as_path()));
        assert_eq!(host.notices.len(), 1);
        assert_eq!(host.notices[0].0, NoticeKind::Info);
        assert_eq!(host.notices[0].2, format!("saved to: {}", path.display()));

        let mut reopened = DocumentState::new();
        let content = reopened.open_file(&mut FakeHost::opening(&path)).unwrap();
        assert_eq!(content, "line one\n\n- item\n");
    }

    #[test]
    fn test_save_without_path_prompts_like_save_as() {
        let tmp = tempfile::tempdir().unwrap();

        let mut via_save = DocumentState::new();
        via_save.set_content("same");
        let mut save_host = FakeHost::saving(&tmp.path().join("a.md"));
        via_save.save_file(&mut save_host).unwrap();

        let mut via_save_as = DocumentState::new();
        via_save_as.set_content("same");
        let mut save_as_host = FakeHost::saving(&tmp.path().join("a.md"));
        via_save_as.save_as_file(&mut save_as_host).unwrap();

        assert_eq!(save_host.save_prompts, save_as_host.save_prompts);
        assert_eq!(save_host.save_prompts[0].2, "untitled.md");
        assert_eq!(save_host.save_prompts[0].1, save_filters());
        assert_eq!(via_save.current_file(), via_save_as.current_file());

        // both cancel the same way too
        let mut cancelled = DocumentState::new();
        assert!(cancelled.save_file(&mut FakeHost::default()).unwrap_err().is_cancelled());
        assert!(cancelled.save_as_file(&mut FakeHost::default()).unwrap_err().is_cancelled());
    }

    #[test]
    fn test_save_overwrites_current_path_without_prompt() {
        let tmp = tempfile::tempdir().unwrap();
        let mut state = loaded_state(tmp.path());
        state.set_content("rewritten");

        let mut host = FakeHost::default();
        state.save_file(&mut host).unwrap();
        assert!(host.save_prompts.is_empty());
        assert_eq!(std::fs::read_to_string(tmp.path().join("loaded.md")).unwrap(), "rewritten");
    }

    #[test]
    fn test_failed_save_as_keeps_path_and_retry_succeeds() {
        let tmp = tempfile::tempdir().unwrap();
        let mut state = DocumentState::new();
        state.set_content("keep me");

        let mut host = FakeHost::saving(&tmp.path().join("no/such/dir/a.md"));
        let err = state.save_as_file(&mut host).unwrap_err();
        assert!(matches!(err, DocumentError::Io { .. }));
        assert_eq!(state.current_file(), None);
        assert_eq!(host.errors()[0].1, SAVE_ERROR_TITLE);

        let good = tmp.path().join("a.md");
        state.save_file(&mut FakeHost::saving(&good)).unwrap();
        assert_eq!(state.current_file(), Some(good.as_path()));
        assert_eq!(std::fs::read_to_string(&good).unwrap(), "keep me");
    }

    #[test]
    fn test_failed_save_to_existing_path_keeps_path() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("sub");
        std::fs::create_dir(&dir).unwrap();
        let path = dir.join("note.md");

        let mut state = DocumentState::new();
        state.save_as_file(&mut FakeHost::saving(&path)).unwrap();

        std::fs::remove_dir_all(&dir).unwrap();
        let mut host = FakeHost::default();
        assert!(matches!(state.save_file(&mut host), Err(DocumentError::Io { .. })));
        assert_eq!(state.current_file(), Some(path.as_path()));

        std::fs::create_dir(&dir).unwrap();
        state.save_file(&mut FakeHost::default()).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_current_file_tracks_first_successful_open_or_save_as() {
        let tmp = tempfile::tempdir().unwrap();
        let mut state = DocumentState::new();
        assert_eq!(state.current_file(), None);

        let _ = state.open_file(&mut FakeHost::default());
        assert_eq!(state.current_file(), None);

        let path = tmp.path().join("Chosen Name.txt");
        state.save_as_file(&mut FakeHost::saving(&path)).unwrap();
        assert_eq!(state.current_file(), Some(path.as_path()));
        assert_eq!(state.title(), "Chosen Name");
    }

    #[test]
    fn test_shutdown_quits_without_saving() {
        let mut state = DocumentState::new();
        state.set_content("never written");
        let mut host = FakeHost::default();
        state.shutdown(&mut host);
        assert!(host.quit);
        assert!(host.save_prompts.is_empty());
    }

    #[test]
    fn test_supported_document_extensions() {
        assert!(is_supported_document(Path::new("x.md")));
        assert!(is_supported_document(Path::new("x.TXT")));
        assert!(!is_supported_document(Path::new("x.png")));
    }
}
