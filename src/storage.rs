//! Storage abstraction layer.
//!
//! This module provides the persistence capability of the classifier in two
//! layers:
//!
//! - **Storage trait**: named byte blobs on a pluggable backend
//!   ([`file::FileStorage`] on disk, [`memory::MemoryStorage`] in memory)
//! - **ModelStore trait**: save and load a whole [`crate::model::Model`]
//!   ([`snapshot::SnapshotStore`] encodes it onto any `Storage`)
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use bayes_sift::model::Model;
//! use bayes_sift::storage::memory::MemoryStorage;
//! use bayes_sift::storage::snapshot::{ModelStore, SnapshotFormat, SnapshotStore};
//!
//! # fn main() -> bayes_sift::error::Result<()> {
//! let store = SnapshotStore::new(Arc::new(MemoryStorage::new()), "model.json", SnapshotFormat::Json);
//! let mut model = Model::new();
//! model.record(["cheap"], "spam");
//! store.save(&model)?;
//! assert_eq!(store.load()?, model);
//! # Ok(())
//! # }
//! ```

use std::io::{Read, Write};

use crate::error::{ClassifierError, Result};

pub mod file;
pub mod memory;
pub mod snapshot;

/// A trait for storage backends that can store and retrieve named blobs.
pub trait Storage: Send + Sync + std::fmt::Debug {
    /// Open a file for reading.
    ///
    /// The file must exist, or this returns [`StorageError::FileNotFound`].
    fn open_input(&self, name: &str) -> Result<Box<dyn StorageInput>>;

    /// Create (or truncate) a file for writing.
    ///
    /// The content becomes visible once the output is closed.
    fn create_output(&self, name: &str) -> Result<Box<dyn StorageOutput>>;

    /// Check if a file exists.
    fn file_exists(&self, name: &str) -> bool;

    /// Delete a file. Deleting a missing file is not an error.
    fn delete_file(&self, name: &str) -> Result<()>;

    /// Rename a file, replacing `new_name` if it exists.
    fn rename_file(&self, old_name: &str, new_name: &str) -> Result<()>;

    /// Human-readable location of a file, for logging.
    fn location(&self, name: &str) -> String;
}

/// A trait for reading data from storage.
pub trait StorageInput: Read + Send + std::fmt::Debug {
    /// Get the size of the input stream.
    fn size(&self) -> Result<u64>;
}

/// A trait for writing data to storage.
pub trait StorageOutput: Write + Send + std::fmt::Debug {
    /// Flush buffered data and sync it to the backend.
    fn flush_and_sync(&mut self) -> Result<()>;

    /// Close the output, publishing its content.
    fn close(&mut self) -> Result<()>;
}

/// Error types specific to storage operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    /// File not found.
    FileNotFound(String),

    /// I/O error.
    IoError(String),

    /// Output already closed.
    OutputClosed(String),
}

impl std::fmt::Display for StorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageError::FileNotFound(name) => write!(f, "File not found: {name}"),
            StorageError::IoError(msg) => write!(f, "I/O error: {msg}"),
            StorageError::OutputClosed(name) => write!(f, "Output is closed: {name}"),
        }
    }
}

impl std::error::Error for StorageError {}

impl From<StorageError> for ClassifierError {
    fn from(err: StorageError) -> Self {
        ClassifierError::storage(err.to_string())
    }
}
