//! Model snapshots.
//!
//! [`ModelStore`] is the persistence capability the classifier depends on:
//! save a whole [`Model`] and load it back unchanged. [`SnapshotStore`]
//! implements it on top of any [`Storage`] backend, writing to a temporary
//! file first and renaming it into place so a reader never sees a partial
//! snapshot.

use std::fmt;
use std::io::{BufReader, Read, Write};
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

use bincode::Options;
use serde::{Deserialize, Serialize};

use crate::error::{ClassifierError, Result};
use crate::model::Model;
use crate::storage::Storage;
use crate::storage::file::FileStorage;

/// Suffix of the temporary file a snapshot is staged in.
pub const SNAPSHOT_TEMP_SUFFIX: &str = ".tmp";

/// Bincode settings for snapshots: fixed-width integers, and a byte limit
/// when decoding so a corrupt length prefix cannot trigger a huge allocation.
fn bincode_options() -> impl Options {
    bincode::DefaultOptions::new()
        .with_fixint_encoding()
        .allow_trailing_bytes()
}

/// Persistence capability for a classifier model.
pub trait ModelStore: Send + Sync + fmt::Debug {
    /// Persist `model`, replacing any previous snapshot.
    fn save(&self, model: &Model) -> Result<()>;

    /// Load the last saved model.
    fn load(&self) -> Result<Model>;

    /// Whether a snapshot has been saved.
    fn exists(&self) -> bool;

    /// Where the snapshot lives, for logging.
    fn describe(&self) -> String;
}

/// On-disk encoding of a snapshot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SnapshotFormat {
    /// JSON object with `category` and `words` tables.
    #[default]
    Json,
    /// Compact bincode encoding.
    Bincode,
}

impl SnapshotFormat {
    fn encode<W: Write>(self, writer: W, model: &Model) -> Result<()> {
        match self {
            SnapshotFormat::Json => serde_json::to_writer(writer, model)?,
            SnapshotFormat::Bincode => bincode_options().serialize_into(writer, model)?,
        }
        Ok(())
    }

    /// Decode a snapshot of `size` bytes.
    fn decode<R: Read>(self, reader: R, size: u64) -> Result<Model> {
        let model = match self {
            SnapshotFormat::Json => serde_json::from_reader(reader)?,
            SnapshotFormat::Bincode => bincode_options()
                .with_limit(size)
                .deserialize_from(reader)?,
        };
        Ok(model)
    }
}

impl fmt::Display for SnapshotFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SnapshotFormat::Json => write!(f, "json"),
            SnapshotFormat::Bincode => write!(f, "bincode"),
        }
    }
}

impl FromStr for SnapshotFormat {
    type Err = ClassifierError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(SnapshotFormat::Json),
            "bincode" => Ok(SnapshotFormat::Bincode),
            other => Err(ClassifierError::config(format!(
                "unknown snapshot format: {other}"
            ))),
        }
    }
}

/// A [`ModelStore`] writing one named snapshot into a [`Storage`].
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    storage: Arc<dyn Storage>,
    name: String,
    format: SnapshotFormat,
}

impl SnapshotStore {
    /// Create a store for snapshot `name` in `storage`.
    pub fn new<S: Into<String>>(storage: Arc<dyn Storage>, name: S, format: SnapshotFormat) -> Self {
        SnapshotStore {
            storage,
            name: name.into(),
            format,
        }
    }

    /// Create a store for the snapshot file at `path`.
    ///
    /// The parent directory is created if missing.
    pub fn for_path<P: AsRef<Path>>(path: P, format: SnapshotFormat) -> Result<Self> {
        let path = path.as_ref();
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| {
                ClassifierError::config(format!(
                    "snapshot path has no file name: {}",
                    path.display()
                ))
            })?;
        let directory = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        Ok(SnapshotStore::new(
            Arc::new(FileStorage::new(directory)?),
            name,
            format,
        ))
    }

    /// The snapshot encoding.
    pub fn format(&self) -> SnapshotFormat {
        self.format
    }

    /// The snapshot file name.
    pub fn name(&self) -> &str {
        &self.name
    }

    fn temp_name(&self) -> String {
        format!("{}{SNAPSHOT_TEMP_SUFFIX}", self.name)
    }
}

impl ModelStore for SnapshotStore {
    fn save(&self, model: &Model) -> Result<()> {
        let temp_name = self.temp_name();

        let written = (|| {
            let mut output = self.storage.create_output(&temp_name)?;
            self.format.encode(&mut output, model)?;
            output.close()
        })();

        if let Err(e) = written {
            let _ = self.storage.delete_file(&temp_name);
            return Err(e);
        }

        self.storage.rename_file(&temp_name, &self.name)
    }

    fn load(&self) -> Result<Model> {
        let input = self.storage.open_input(&self.name)?;
        let size = input.size()?;
        self.format.decode(BufReader::new(input), size)
    }

    fn exists(&self) -> bool {
        self.storage.file_exists(&self.name)
    }

    fn describe(&self) -> String {
        format!("{} ({})", self.storage.location(&self.name), self.format)
    }
}
