//! The classifier engine.
//!
//! [`Classifier`] owns the [`Model`] and exposes training, word scoring,
//! document categorization and snapshot import/export. The model sits behind
//! a single reader-writer lock: training takes the write lock once per
//! document, so concurrent training never loses increments, and every read
//! path (scoring, listing, export) sees a consistent model.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use ahash::AHashSet;
use log::{debug, info, warn};
use parking_lot::{Mutex, RwLock};

use crate::analysis::analyzer::{Analyzer, PipelineAnalyzer};
use crate::analysis::tokenizer::Tokenizer;
use crate::analysis::tokenizer::cjk_bigram::CjkBigramTokenizer;
use crate::analysis::tokenizer::regex::RegexTokenizer;
use crate::analysis::tokenizer::unicode_word::UnicodeWordTokenizer;
use crate::analysis::tokenizer::whitespace::WhitespaceTokenizer;
use crate::classifier::estimator::ProbabilityEstimator;
use crate::classifier::score::{MAX_RESULTS, ScoreItem, Scores};
use crate::config::{AnalysisConfig, ClassifierConfig, EngineSettings, TokenizerKind};
use crate::error::{ClassifierError, Result};
use crate::model::{CategoryTable, Model, ModelStats};
use crate::storage::snapshot::{ModelStore, SnapshotStore};

/// A naive Bayes text classifier.
///
/// `Classifier` is `Send + Sync`; share it between threads with an `Arc`.
pub struct Classifier {
    settings: EngineSettings,
    analyzer: Arc<dyn Analyzer>,
    delimited: Arc<dyn Analyzer>,
    store: Arc<dyn ModelStore>,
    model: RwLock<Model>,
    /// Serializes export and import against each other.
    persistence: Mutex<()>,
    /// Set when the startup load failed; export must not overwrite that snapshot.
    unreadable_snapshot: AtomicBool,
}

impl std::fmt::Debug for Classifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Classifier")
            .field("settings", &self.settings)
            .field("analyzer", &self.analyzer.name())
            .field("delimited", &self.delimited.name())
            .field("store", &self.store)
            .finish_non_exhaustive()
    }
}

impl Classifier {
    /// Create an empty classifier from its collaborators.
    pub fn new(
        settings: EngineSettings,
        analyzer: Arc<dyn Analyzer>,
        delimited: Arc<dyn Analyzer>,
        store: Arc<dyn ModelStore>,
    ) -> Result<Self> {
        settings.validate()?;

        Ok(Classifier {
            settings,
            analyzer,
            delimited,
            store,
            model: RwLock::new(Model::new()),
            persistence: Mutex::new(()),
            unreadable_snapshot: AtomicBool::new(false),
        })
    }

    /// Build a classifier from configuration and load its snapshot.
    ///
    /// A missing snapshot starts an empty model. A snapshot that exists but
    /// cannot be read is logged and the classifier starts empty too; use
    /// [`Classifier::open`] to treat that as an error instead.
    ///
    /// After such a failure [`Classifier::export`] refuses to overwrite the
    /// unreadable snapshot until [`Classifier::import`] succeeds or the model
    /// is [reset](Classifier::reset).
    pub fn from_config(config: &ClassifierConfig) -> Result<Self> {
        let classifier = Self::build(config)?;
        if let Err(e) = classifier.load_existing() {
            warn!(
                "Failed to load snapshot {}, starting empty; it will not be overwritten: {e}",
                classifier.store.describe()
            );
            classifier.unreadable_snapshot.store(true, Ordering::Release);
        }
        Ok(classifier)
    }

    /// Build a classifier from configuration, failing if an existing snapshot
    /// cannot be loaded.
    pub fn open(config: &ClassifierConfig) -> Result<Self> {
        let classifier = Self::build(config)?;
        classifier.load_existing()?;
        Ok(classifier)
    }

    fn build(config: &ClassifierConfig) -> Result<Self> {
        config.validate()?;

        let analyzer = segmenter_from_config(&config.analysis)?;
        let delimited = PipelineAnalyzer::delimited(config.analysis.delimiter);
        let store = SnapshotStore::for_path(&config.storage.path, config.storage.format)?;

        Self::new(
            config.engine_settings(),
            Arc::new(analyzer),
            Arc::new(delimited),
            Arc::new(store),
        )
    }

    fn load_existing(&self) -> Result<()> {
        if self.store.exists() {
            info!("Loading snapshot {}", self.store.describe());
            self.import()
        } else {
            info!(
                "No snapshot at {}, starting with an empty model",
                self.store.describe()
            );
            Ok(())
        }
    }

    /// The numeric settings in use.
    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    /// The persistence collaborator.
    pub fn store(&self) -> &Arc<dyn ModelStore> {
        &self.store
    }

    /// Train on `document` labelled `category`, segmenting with the analyzer.
    ///
    /// Each distinct term is counted once per document. Empty (after
    /// trimming) documents or categories are ignored.
    pub fn train(&self, document: &str, category: &str) -> Result<()> {
        self.train_with(self.analyzer.as_ref(), document, category)
    }

    /// Train on a delimiter-separated `document` labelled `category`.
    pub fn train_delimited(&self, document: &str, category: &str) -> Result<()> {
        self.train_with(self.delimited.as_ref(), document, category)
    }

    fn train_with(&self, analyzer: &dyn Analyzer, document: &str, category: &str) -> Result<()> {
        let document = document.trim();
        let category = category.trim();
        if document.is_empty() || category.is_empty() {
            warn!("Ignoring training call with an empty document or category");
            return Ok(());
        }

        let terms = analyzer.segment(document)?;
        let mut seen = AHashSet::with_capacity(terms.len());
        let unique: Vec<&str> = terms
            .iter()
            .map(String::as_str)
            .filter(|term| seen.insert(*term))
            .collect();

        self.model.write().record(unique.iter().copied(), category);

        if self.settings.debug {
            for term in &unique {
                debug!("Trained term {term:?} under {category:?}");
            }
        }

        Ok(())
    }

    /// Smoothed probability of `word` per category.
    ///
    /// With a category, the result holds that category only. Without one, it
    /// holds the best [`MAX_RESULTS`] categories the word was observed under.
    /// A word never trained yields an empty list.
    pub fn score_word(&self, word: &str, category: Option<&str>) -> Vec<ScoreItem> {
        let model = self.model.read();
        if !model.terms.contains(word) {
            return Vec::new();
        }

        let estimator = ProbabilityEstimator::new(&model);
        let mut scores = Scores::new();
        match category {
            Some(category) => scores.append(category, self.word_probability(&estimator, word, category)),
            None => {
                for category in model.terms.categories_for_term(word) {
                    scores.append(category, self.word_probability(&estimator, word, category));
                }
            }
        }
        scores.top(MAX_RESULTS)
    }

    /// Rank categories by their unnormalized posterior for `document`.
    ///
    /// The score of a category is its share of trained documents times the
    /// product of the smoothed probabilities of every term in the document
    /// (repeated terms included). With `log_space` enabled the logarithm of
    /// that value is returned instead. Returns the best [`MAX_RESULTS`]
    /// categories, or nothing when no document has been trained.
    pub fn categorize(&self, document: &str) -> Result<Vec<ScoreItem>> {
        let terms = self.analyzer.segment(document.trim())?;

        let model = self.model.read();
        if model.categories.total() <= 0.0 {
            return Ok(Vec::new());
        }

        let estimator = ProbabilityEstimator::new(&model);
        let mut scores = Scores::with_capacity(model.categories.len());
        for (category, _) in model.categories.iter() {
            let prior = estimator.category_probability(category);
            let score = if self.settings.log_space {
                terms.iter().fold(prior.ln(), |acc, term| {
                    acc + self.word_probability(&estimator, term, category).ln()
                })
            } else {
                terms.iter().fold(prior, |acc, term| {
                    acc * self.word_probability(&estimator, term, category)
                })
            };
            scores.append(category, score);
        }

        Ok(scores.top(MAX_RESULTS))
    }

    fn word_probability(
        &self,
        estimator: &ProbabilityEstimator<'_>,
        word: &str,
        category: &str,
    ) -> f64 {
        estimator.weighted_conditional_probability(
            word,
            category,
            self.settings.default_weight,
            self.settings.default_prob,
        )
    }

    /// A copy of the category table.
    pub fn categories(&self) -> CategoryTable {
        self.model.read().categories.clone()
    }

    /// Summary counts of the model.
    pub fn stats(&self) -> ModelStats {
        self.model.read().stats()
    }

    /// A point-in-time copy of the whole model.
    pub fn snapshot(&self) -> Model {
        self.model.read().clone()
    }

    /// Forget everything learned so far.
    ///
    /// This also allows exporting over a snapshot that failed to load.
    pub fn reset(&self) {
        self.model.write().clear();
        self.unreadable_snapshot.store(false, Ordering::Release);
        info!("Model reset");
    }

    /// Whether the snapshot found at startup could not be loaded.
    pub fn has_unreadable_snapshot(&self) -> bool {
        self.unreadable_snapshot.load(Ordering::Acquire)
    }

    /// Save the model through the persistence collaborator.
    ///
    /// The model is copied under the read lock, which is released before
    /// encoding, so training continues while the snapshot is written.
    ///
    /// Fails without writing anything while the snapshot found at startup is
    /// unreadable.
    pub fn export(&self) -> Result<()> {
        let _guard = self.persistence.lock();
        if self.has_unreadable_snapshot() {
            return Err(ClassifierError::invalid_operation(format!(
                "refusing to overwrite {}, which failed to load; import it or reset first",
                self.store.describe()
            )));
        }
        let snapshot = self.snapshot();
        self.store.save(&snapshot)?;
        info!(
            "Exported {} terms in {} categories to {}",
            snapshot.terms.len(),
            snapshot.categories.len(),
            self.store.describe()
        );
        Ok(())
    }

    /// Replace the model with the last saved snapshot.
    ///
    /// On failure the current model is left untouched.
    pub fn import(&self) -> Result<()> {
        let _guard = self.persistence.lock();
        let model = self.store.load()?;
        let stats = model.stats();
        *self.model.write() = model;
        self.unreadable_snapshot.store(false, Ordering::Release);
        info!(
            "Imported {} terms in {} categories from {}",
            stats.terms,
            stats.categories,
            self.store.describe()
        );
        Ok(())
    }
}

/// Build the segmenting analyzer described by `config`.
pub fn segmenter_from_config(config: &AnalysisConfig) -> Result<PipelineAnalyzer> {
    let tokenizer: Arc<dyn Tokenizer> = match config.tokenizer {
        TokenizerKind::CjkBigram => Arc::new(CjkBigramTokenizer::new()),
        TokenizerKind::UnicodeWord => Arc::new(UnicodeWordTokenizer::new()),
        TokenizerKind::Whitespace => Arc::new(WhitespaceTokenizer::new()),
        TokenizerKind::Regex => {
            let pattern = config.pattern.as_deref().ok_or_else(|| {
                ClassifierError::config("analysis.pattern is required for the regex tokenizer")
            })?;
            Arc::new(RegexTokenizer::with_pattern(pattern)?)
        }
    };

    Ok(PipelineAnalyzer::segmenter(
        tokenizer,
        config.lowercase,
        &config.stop_words,
        config.min_token_chars,
    ))
}
