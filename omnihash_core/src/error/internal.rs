//! Internal library error types

use thiserror::Error;

/// Internal library errors
#[derive(Error, Debug)]
pub enum InternalError {
    /// The fan-out engine lost track of a view
    #[error("Fan-out failed: {message}")]
    Fanout { message: String },
}

impl InternalError {
    /// Create a fan-out error
    pub fn fanout(message: impl Into<String>) -> Self {
        Self::Fanout {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fanout_error() {
        let error = InternalError::fanout("view 3 fell behind");
        assert!(error.to_string().contains("Fan-out failed"));
        assert!(error.to_string().contains("view 3"));
    }
}
