//! Error handling for the datrie library.
//!
//! Construction and queries are infallible; errors only surface at the
//! persistence boundary (`dump`/`load`).

use thiserror::Error;

/// Main error type for the datrie library.
#[derive(Error, Debug)]
pub enum DatrieError {
    /// I/O related errors, including gzip stream failures.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A dump file that does not conform to the persistence format.
    #[error("invalid dump format: {message}")]
    InvalidFormat {
        /// Description of the malformed field or missing section.
        message: String,
    },
}

impl DatrieError {
    /// Create an invalid format error.
    pub fn invalid_format<S: Into<String>>(message: S) -> Self {
        Self::InvalidFormat {
            message: message.into(),
        }
    }

    /// Get the error category for logging/metrics.
    pub fn category(&self) -> &'static str {
        match self {
            Self::Io(_) => "io",
            Self::InvalidFormat { .. } => "format",
        }
    }
}

/// Result type alias for convenience.
pub type Result<T> = std::result::Result<T, DatrieError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = DatrieError::invalid_format("truncated header");
        assert_eq!(err.category(), "format");
        let display = format!("{}", err);
        assert!(display.contains("invalid dump format"));
        assert!(display.contains("truncated header"));
    }

    #[test]
    fn test_from_io_error() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let err: DatrieError = io_error.into();
        assert_eq!(err.category(), "io");
        assert!(format!("{}", err).contains("I/O error"));
    }
}
