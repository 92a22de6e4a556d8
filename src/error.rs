//! Custom error types for the income splitter
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions.

use thiserror::Error;

/// Why an amount token was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AmountProblem {
    NotANumber,
    NotPositive,
}

impl std::fmt::Display for AmountProblem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotANumber => write!(f, "not a number"),
            Self::NotPositive => write!(f, "must be a positive number"),
        }
    }
}

/// The main error type for income splitter operations
#[derive(Error, Debug)]
pub enum SplitterError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Validation errors for settings and models
    #[error("Validation error: {0}")]
    Validation(String),

    /// Message does not look like `<amount> <source>`
    #[error("Malformed entry: {0}")]
    InputFormat(String),

    /// Amount token is not a usable number
    #[error("Invalid amount '{input}': {problem}")]
    InputValue {
        input: String,
        problem: AmountProblem,
    },

    /// Confirm or cancel arrived with nothing staged for the user
    #[error("No pending entry for user {0}")]
    NoPendingEntry(i64),

    /// Storage errors
    #[error("Storage error: {0}")]
    Storage(String),
}

impl SplitterError {
    /// Create a "not a number" error for an amount token
    pub fn not_a_number(input: impl Into<String>) -> Self {
        Self::InputValue {
            input: input.into(),
            problem: AmountProblem::NotANumber,
        }
    }

    /// Create a "must be positive" error for an amount token
    pub fn not_positive(input: impl Into<String>) -> Self {
        Self::InputValue {
            input: input.into(),
            problem: AmountProblem::NotPositive,
        }
    }

    /// Check if this error was caused by what the user typed
    pub fn is_user_input(&self) -> bool {
        matches!(self, Self::InputFormat(_) | Self::InputValue { .. })
    }

    /// Check if this is a storage error
    pub fn is_storage(&self) -> bool {
        matches!(self, Self::Storage(_))
    }
}

impl From<std::io::Error> for SplitterError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for SplitterError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<rusqlite::Error> for SplitterError {
    fn from(err: rusqlite::Error) -> Self {
        Self::Storage(err.to_string())
    }
}

/// Result type alias for income splitter operations
pub type SplitterResult<T> = Result<T, SplitterError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SplitterError::Config("test error".into());
        assert_eq!(err.to_string(), "Configuration error: test error");
    }

    #[test]
    fn test_input_value_error() {
        let err = SplitterError::not_a_number("abc");
        assert_eq!(err.to_string(), "Invalid amount 'abc': not a number");
        assert!(err.is_user_input());
        assert!(!err.is_storage());
    }

    #[test]
    fn test_no_pending_entry_error() {
        let err = SplitterError::NoPendingEntry(42);
        assert_eq!(err.to_string(), "No pending entry for user 42");
        assert!(!err.is_user_input());
    }

    #[test]
    fn test_from_sqlite_error() {
        let sql_err = rusqlite::Error::InvalidQuery;
        let err: SplitterError = sql_err.into();
        assert!(err.is_storage());
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: SplitterError = io_err.into();
        assert!(matches!(err, SplitterError::Io(_)));
    }
}
