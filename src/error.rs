//! Error types for the bayes-sift library.
//!
//! All fallible operations return [`Result`], whose error type is the
//! [`ClassifierError`] enum. Only configuration, analysis and persistence can
//! fail; training and inference over unseen data never produce an error.
//!
//! # Examples
//!
//! ```
//! use bayes_sift::error::{ClassifierError, Result};
//!
//! fn load_settings() -> Result<()> {
//!     Err(ClassifierError::config("default_prob is missing"))
//! }
//!
//! match load_settings() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::io;

use thiserror::Error;

/// The main error type for classifier operations.
#[derive(Error, Debug)]
pub enum ClassifierError {
    /// I/O errors (file operations, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Invalid or missing configuration. Fatal at construction.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Analysis-related errors (tokenization, filtering, etc.)
    #[error("Analysis error: {0}")]
    Analysis(String),

    /// Storage-related errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Binary snapshot encoding errors
    #[error("Bincode error: {0}")]
    Bincode(#[from] bincode::Error),

    /// Background autosave errors
    #[error("Autosave error: {0}")]
    Autosave(String),

    /// Invalid operation
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),
}

/// Result type alias for operations that may fail with ClassifierError.
pub type Result<T> = std::result::Result<T, ClassifierError>;

impl ClassifierError {
    /// Create a new configuration error.
    pub fn config<S: Into<String>>(msg: S) -> Self {
        ClassifierError::Config(msg.into())
    }

    /// Create a new analysis error.
    pub fn analysis<S: Into<String>>(msg: S) -> Self {
        ClassifierError::Analysis(msg.into())
    }

    /// Create a new storage error.
    pub fn storage<S: Into<String>>(msg: S) -> Self {
        ClassifierError::Storage(msg.into())
    }

    /// Create a new autosave error.
    pub fn autosave<S: Into<String>>(msg: S) -> Self {
        ClassifierError::Autosave(msg.into())
    }

    /// Create a new invalid operation error.
    pub fn invalid_operation<S: Into<String>>(msg: S) -> Self {
        ClassifierError::InvalidOperation(msg.into())
    }

    /// Whether this error came from the persistence layer.
    pub fn is_persistence(&self) -> bool {
        matches!(
            self,
            ClassifierError::Io(_)
                | ClassifierError::Storage(_)
                | ClassifierError::Json(_)
                | ClassifierError::Bincode(_)
        )
    }
}
