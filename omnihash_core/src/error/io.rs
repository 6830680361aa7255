//! I/O related error types

use thiserror::Error;

/// I/O error raised while streaming an input item
#[derive(Error, Debug)]
#[error("{}", format_io_error(self))]
pub struct IoError {
    /// The kind of I/O error
    pub kind: IoErrorKind,
    /// Label of the input item being read (if known)
    pub label: Option<String>,
    /// Underlying I/O error
    #[source]
    pub source: std::io::Error,
}

/// Kind of I/O error
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IoErrorKind {
    /// Source vanished mid-read
    NotFound,
    /// Permission denied
    PermissionDenied,
    /// The connection feeding the source dropped
    ConnectionLost,
    /// Generic I/O error
    Other,
}

impl IoError {
    /// Create an I/O error from a standard I/O error
    pub fn from_std(source: std::io::Error) -> Self {
        let kind = match source.kind() {
            std::io::ErrorKind::NotFound => IoErrorKind::NotFound,
            std::io::ErrorKind::PermissionDenied => IoErrorKind::PermissionDenied,
            std::io::ErrorKind::ConnectionReset
            | std::io::ErrorKind::ConnectionAborted
            | std::io::ErrorKind::BrokenPipe
            | std::io::ErrorKind::UnexpectedEof
            | std::io::ErrorKind::TimedOut => IoErrorKind::ConnectionLost,
            _ => IoErrorKind::Other,
        };

        Self {
            kind,
            label: None,
            source,
        }
    }

    /// Attach the input label
    pub fn with_label(mut self, label: &str) -> Self {
        self.label = Some(label.to_string());
        self
    }
}

fn format_io_error(error: &IoError) -> String {
    let what = match error.kind {
        IoErrorKind::NotFound => "Input disappeared while reading",
        IoErrorKind::PermissionDenied => "Permission denied while reading",
        IoErrorKind::ConnectionLost => "Connection lost while reading",
        IoErrorKind::Other => "I/O error while reading",
    };

    match &error.label {
        Some(label) => format!("{what} '{label}': {}", error.source),
        None => format!("{what}: {}", error.source),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_from_std_io_error() {
        let error = IoError::from_std(io::Error::new(io::ErrorKind::NotFound, "Not found"));

        assert_eq!(error.kind, IoErrorKind::NotFound);
        assert!(error.label.is_none());
        assert!(error.to_string().contains("Not found"));
    }

    #[test]
    fn test_connection_kinds() {
        for kind in [
            io::ErrorKind::ConnectionReset,
            io::ErrorKind::UnexpectedEof,
            io::ErrorKind::TimedOut,
        ] {
            let error = IoError::from_std(io::Error::new(kind, "net"));
            assert_eq!(error.kind, IoErrorKind::ConnectionLost);
        }
    }

    #[test]
    fn test_with_label() {
        let error = IoError::from_std(io::Error::other("Generic error")).with_label("data.bin");

        assert_eq!(error.kind, IoErrorKind::Other);
        assert_eq!(error.label.as_deref(), Some("data.bin"));
        assert!(error.to_string().contains("'data.bin'"));
    }
}
