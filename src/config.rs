//! Classifier configuration.
//!
//! Every recognised option is a typed field of [`ClassifierConfig`]. A
//! configuration is parsed and validated once, before the classifier is
//! built; any problem is reported as [`ClassifierError::Config`].
//!
//! # Example
//!
//! ```
//! use bayes_sift::config::ClassifierConfig;
//!
//! let config = ClassifierConfig::from_json_str(r#"{
//!     "default_prob": 0.5,
//!     "default_weight": 1.0,
//!     "storage": { "path": "data/model.json", "autosave_interval_secs": 60 }
//! }"#).unwrap();
//!
//! assert_eq!(config.storage.autosave_interval_secs, 60);
//! assert_eq!(config.analysis.min_token_chars, 2);
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::analysis::token_filter::min_length::DEFAULT_MIN_TOKEN_CHARS;
use crate::analysis::tokenizer::delimiter::DEFAULT_DELIMITER;
use crate::error::{ClassifierError, Result};
use crate::storage::snapshot::SnapshotFormat;

/// Recommended prior probability for a term in a category.
pub const DEFAULT_PROB: f64 = 0.5;

/// Recommended weight of the prior, equivalent to one observation.
pub const DEFAULT_WEIGHT: f64 = 1.0;

/// Default number of consecutive autosave failures before autosave stops.
pub const DEFAULT_MAX_AUTOSAVE_FAILURES: u32 = 3;

/// Complete configuration of a classifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClassifierConfig {
    /// Assumed probability of a term in a category before any evidence, in [0, 1].
    pub default_prob: f64,

    /// Weight of `default_prob`, in units of observations. Must be >= 0.
    pub default_weight: f64,

    /// Log every trained term at debug level.
    #[serde(default)]
    pub debug: bool,

    /// Score documents with a sum of log-probabilities instead of a product.
    #[serde(default)]
    pub log_space: bool,

    /// Tokenizer settings.
    #[serde(default)]
    pub analysis: AnalysisConfig,

    /// Persistence settings.
    pub storage: StorageSettings,
}

/// Which tokenizer segments ordinary documents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenizerKind {
    /// Unicode word boundaries, with Chinese and Japanese runs split into
    /// character bigrams.
    #[default]
    CjkBigram,
    /// Unicode word boundaries (UAX #29).
    UnicodeWord,
    /// Whitespace separated words.
    Whitespace,
    /// Matches of a regular expression (see [`AnalysisConfig::pattern`]).
    Regex,
}

/// Tokenizer settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct AnalysisConfig {
    /// Tokenizer for ordinary documents.
    pub tokenizer: TokenizerKind,

    /// Pattern for [`TokenizerKind::Regex`].
    pub pattern: Option<String>,

    /// Tokens with fewer trimmed characters are discarded.
    pub min_token_chars: usize,

    /// Fold tokens to lowercase.
    pub lowercase: bool,

    /// Words removed before training and scoring.
    pub stop_words: Vec<String>,

    /// Separator for delimited training.
    pub delimiter: char,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        AnalysisConfig {
            tokenizer: TokenizerKind::default(),
            pattern: None,
            min_token_chars: DEFAULT_MIN_TOKEN_CHARS,
            lowercase: false,
            stop_words: Vec::new(),
            delimiter: DEFAULT_DELIMITER,
        }
    }
}

/// Persistence settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StorageSettings {
    /// Snapshot file path.
    pub path: PathBuf,

    /// Snapshot encoding.
    #[serde(default)]
    pub format: SnapshotFormat,

    /// Seconds between automatic exports; 0 disables autosave.
    #[serde(default)]
    pub autosave_interval_secs: u64,

    /// Consecutive failures after which autosave stops; 0 retries forever.
    #[serde(default = "default_max_autosave_failures")]
    pub max_autosave_failures: u32,
}

fn default_max_autosave_failures() -> u32 {
    DEFAULT_MAX_AUTOSAVE_FAILURES
}

impl StorageSettings {
    /// Settings for a JSON snapshot at `path` without autosave.
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        StorageSettings {
            path: path.into(),
            format: SnapshotFormat::default(),
            autosave_interval_secs: 0,
            max_autosave_failures: DEFAULT_MAX_AUTOSAVE_FAILURES,
        }
    }

    /// The autosave period, or `None` when disabled.
    pub fn autosave_interval(&self) -> Option<Duration> {
        (self.autosave_interval_secs > 0).then(|| Duration::from_secs(self.autosave_interval_secs))
    }
}

/// The numeric settings the classifier engine scores with.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EngineSettings {
    /// Assumed probability of an unseen term.
    pub default_prob: f64,
    /// Weight of the assumed probability.
    pub default_weight: f64,
    /// Log every trained term.
    pub debug: bool,
    /// Use log-space document scores.
    pub log_space: bool,
}

impl Default for EngineSettings {
    fn default() -> Self {
        EngineSettings {
            default_prob: DEFAULT_PROB,
            default_weight: DEFAULT_WEIGHT,
            debug: false,
            log_space: false,
        }
    }
}

impl EngineSettings {
    /// Check the numeric ranges.
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.default_prob) {
            return Err(ClassifierError::config(format!(
                "default_prob must be within [0, 1], got {}",
                self.default_prob
            )));
        }
        if !self.default_weight.is_finite() || self.default_weight < 0.0 {
            return Err(ClassifierError::config(format!(
                "default_weight must be a finite number >= 0, got {}",
                self.default_weight
            )));
        }
        Ok(())
    }
}

impl ClassifierConfig {
    /// Start building a configuration storing its snapshot at `path`.
    pub fn builder<P: Into<PathBuf>>(path: P) -> ClassifierConfigBuilder {
        ClassifierConfigBuilder::new(path)
    }

    /// Parse and validate a JSON configuration.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: ClassifierConfig = serde_json::from_str(json)
            .map_err(|e| ClassifierError::config(format!("invalid configuration: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON configuration file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| {
            ClassifierError::config(format!("cannot read {}: {e}", path.display()))
        })?;
        Self::from_json_str(&json)
    }

    /// Check every field.
    pub fn validate(&self) -> Result<()> {
        self.engine_settings().validate()?;

        if self.analysis.tokenizer == TokenizerKind::Regex {
            match self.analysis.pattern.as_deref() {
                Some(pattern) if !pattern.is_empty() => {
                    regex::Regex::new(pattern).map_err(|e| {
                        ClassifierError::config(format!("analysis.pattern is invalid: {e}"))
                    })?;
                }
                _ => {
                    return Err(ClassifierError::config(
                        "analysis.pattern is required for the regex tokenizer",
                    ));
                }
            }
        }

        if self.storage.path.as_os_str().is_empty() {
            return Err(ClassifierError::config("storage.path must not be empty"));
        }

        Ok(())
    }

    /// The engine-level numeric settings.
    pub fn engine_settings(&self) -> EngineSettings {
        EngineSettings {
            default_prob: self.default_prob,
            default_weight: self.default_weight,
            debug: self.debug,
            log_space: self.log_space,
        }
    }
}

/// Builder for [`ClassifierConfig`].
#[derive(Debug, Clone)]
pub struct ClassifierConfigBuilder {
    config: ClassifierConfig,
}

impl ClassifierConfigBuilder {
    fn new<P: Into<PathBuf>>(path: P) -> Self {
        ClassifierConfigBuilder {
            config: ClassifierConfig {
                default_prob: DEFAULT_PROB,
                default_weight: DEFAULT_WEIGHT,
                debug: false,
                log_space: false,
                analysis: AnalysisConfig::default(),
                storage: StorageSettings::new(path),
            },
        }
    }

    /// Set the assumed probability.
    pub fn default_prob(mut self, prob: f64) -> Self {
        self.config.default_prob = prob;
        self
    }

    /// Set the weight of the assumed probability.
    pub fn default_weight(mut self, weight: f64) -> Self {
        self.config.default_weight = weight;
        self
    }

    /// Enable per-term debug logging.
    pub fn debug(mut self, debug: bool) -> Self {
        self.config.debug = debug;
        self
    }

    /// Use log-space document scores.
    pub fn log_space(mut self, log_space: bool) -> Self {
        self.config.log_space = log_space;
        self
    }

    /// Replace the tokenizer settings.
    pub fn analysis(mut self, analysis: AnalysisConfig) -> Self {
        self.config.analysis = analysis;
        self
    }

    /// Set the snapshot encoding.
    pub fn format(mut self, format: SnapshotFormat) -> Self {
        self.config.storage.format = format;
        self
    }

    /// Set the autosave period in seconds (0 disables).
    pub fn autosave_interval_secs(mut self, secs: u64) -> Self {
        self.config.storage.autosave_interval_secs = secs;
        self
    }

    /// Validate and return the configuration.
    pub fn build(self) -> Result<ClassifierConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}
