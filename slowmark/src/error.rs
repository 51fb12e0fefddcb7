//! Errors returned by document operations.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DocumentError {
    /// The user dismissed a file dialog without choosing anything.
    #[error("no file selected")]
    UserCancelled,
    #[error("{}: {}", path.display(), source)]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The picker itself failed before the user could choose.
    #[error("dialog failed: {0}")]
    Dialog(String),
}

impl DocumentError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io { path: path.into(), source }
    }

    /// Cancellation is a silent no-op, never reported to the user.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::UserCancelled)
    }
}

pub type Result<T> = std::result::Result<T, DocumentError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::ErrorKind;

    #[test]
    fn test_io_error_message_names_path_and_cause() {
        let err = DocumentError::io(
            "/tmp/notes.md",
            std::io::Error::new(ErrorKind::PermissionDenied, "permission denied"),
        );
        assert_eq!(err.to_string(), "/tmp/notes.md: permission denied");
        assert!(!err.is_cancelled());
    }

    #[test]
    fn test_only_user_cancelled_is_silent() {
        assert!(DocumentError::UserCancelled.is_cancelled());
        assert!(!DocumentError::Dialog("no display".into()).is_cancelled());
    }
}
