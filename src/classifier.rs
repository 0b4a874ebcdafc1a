//! Naive Bayes classification.
//!
//! The [`Classifier`] engine trains on labelled documents and ranks
//! categories for new ones; [`AutosaveTask`] exports it periodically.

pub mod autosave;
pub mod engine;
pub mod estimator;
pub mod score;

pub use autosave::{AutosavePolicy, AutosaveStats, AutosaveTask};
pub use engine::Classifier;
pub use estimator::ProbabilityEstimator;
pub use score::{MAX_RESULTS, ScoreItem, Scores};
