//! Error types for the omnihash core library
//!
//! Errors are grouped into categories so the front end can decide how to
//! present them and which exit code to use.

use thiserror::Error;

pub mod internal;
pub mod io;
pub mod validation;

pub use self::io::{IoError, IoErrorKind};
pub use self::validation::ValidationError;
pub use internal::InternalError;

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the omnihash core library
///
/// Errors are categorized into three main types:
/// - I/O errors: failures while pulling bytes out of a chunk source
/// - Validation errors: invalid configuration handed to the engine
/// - Internal errors: broken engine invariants
#[derive(Error, Debug)]
pub enum Error {
    /// I/O related errors
    #[error(transparent)]
    Io(#[from] IoError),

    /// Validation related errors
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Internal library errors
    #[error(transparent)]
    Internal(#[from] InternalError),
}

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Self::Io(IoError::from_std(source))
    }
}

impl Error {
    /// Attach an input label to an I/O error, leaving other categories untouched
    pub fn with_label(self, label: &str) -> Self {
        match self {
            Self::Io(io_err) => Self::Io(io_err.with_label(label)),
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as StdError;
    use std::io;

    #[test]
    fn test_from_io_error() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "gone");
        let error: Error = io_error.into();

        match error {
            Error::Io(io_err) => assert_eq!(io_err.kind, IoErrorKind::NotFound),
            _ => panic!("Expected Io error"),
        }
    }

    #[test]
    fn test_with_label_only_touches_io() {
        let error = Error::from(io::Error::other("boom")).with_label("LICENSE");
        assert!(error.to_string().contains("LICENSE"));

        let error = Error::Validation(ValidationError::invalid_parameter("chunk_size", "zero"))
            .with_label("LICENSE");
        assert!(!error.to_string().contains("LICENSE"));
    }

    #[test]
    fn test_error_source_chain() {
        let error = Error::from(io::Error::new(io::ErrorKind::BrokenPipe, "pipe closed"));
        assert!(error.source().is_some());
    }

    #[test]
    fn test_error_is_send_and_sync() {
        fn assert_send<T: Send>() {}
        fn assert_sync<T: Sync>() {}

        assert_send::<Error>();
        assert_sync::<Error>();
    }

    #[test]
    fn test_error_display_formatting() {
        let errors = vec![
            Error::from(io::Error::other("disk on fire")),
            Error::Validation(ValidationError::invalid_parameter("chunk_size", "zero")),
            Error::Internal(InternalError::fanout("digester count changed")),
        ];

        for error in errors {
            let display = format!("{error}");
            assert!(!display.is_empty());
        }
    }
}
