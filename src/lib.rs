//! # Bayes Sift
//!
//! A naive Bayes text classifier.
//!
//! ## Features
//!
//! - Training from free text or delimiter-separated term lists
//! - Smoothed per-word probabilities and ranked document categorization
//! - Pluggable tokenizers and persistence backends
//! - JSON or bincode snapshots with periodic autosave
//! - Safe concurrent training and inference
//!
//! ## Example
//!
//! ```no_run
//! use bayes_sift::prelude::*;
//!
//! let config = ClassifierConfig::builder("data/model.json").build()?;
//! let classifier = Classifier::from_config(&config)?;
//!
//! classifier.train("buy cheap pills now", "spam")?;
//! classifier.train("meeting agenda attached", "ham")?;
//!
//! let ranked = classifier.categorize("cheap pills")?;
//! assert_eq!(ranked[0].label, "spam");
//! classifier.export()?;
//! # Ok::<(), bayes_sift::error::ClassifierError>(())
//! ```

pub mod analysis;
pub mod classifier;
pub mod cli;
pub mod config;
pub mod error;
pub mod model;
pub mod storage;

pub mod prelude {
    pub use crate::analysis::analyzer::{Analyzer, PipelineAnalyzer};
    pub use crate::classifier::{AutosavePolicy, AutosaveTask, Classifier, ScoreItem};
    pub use crate::config::ClassifierConfig;
    pub use crate::error::{ClassifierError, Result};
    pub use crate::model::{CategoryTable, Model};
    pub use crate::storage::snapshot::{ModelStore, SnapshotFormat, SnapshotStore};
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
