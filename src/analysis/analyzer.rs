//! Analyzers combine a tokenizer with a chain of filters.
//!
//! An [`Analyzer`] is the tokenizer capability the classifier consumes: it
//! turns a document into the ordered sequence of terms used for training
//! and categorization.

use std::sync::Arc;

use crate::analysis::token::TokenStream;
use crate::analysis::token_filter::Filter;
use crate::analysis::token_filter::lowercase::LowercaseFilter;
use crate::analysis::token_filter::min_length::MinLengthFilter;
use crate::analysis::token_filter::remove_empty::RemoveEmptyFilter;
use crate::analysis::token_filter::stop::StopFilter;
use crate::analysis::tokenizer::Tokenizer;
use crate::analysis::tokenizer::delimiter::DelimiterTokenizer;
use crate::error::Result;

/// Trait for analyzers that convert text into processed tokens.
pub trait Analyzer: Send + Sync {
    /// Analyze the given text and return a stream of tokens.
    fn analyze(&self, text: &str) -> Result<TokenStream>;

    /// Get the name of this analyzer (for debugging and configuration).
    fn name(&self) -> &str;

    /// Segment `text` into the ordered sequence of term strings.
    fn segment(&self, text: &str) -> Result<Vec<String>> {
        Ok(self.analyze(text)?.map(|token| token.text).collect())
    }
}

/// A configurable analyzer that combines a tokenizer with a chain of filters.
#[derive(Clone)]
pub struct PipelineAnalyzer {
    tokenizer: Arc<dyn Tokenizer>,
    filters: Vec<Arc<dyn Filter>>,
    name: String,
}

impl PipelineAnalyzer {
    /// Create a new pipeline analyzer with the given tokenizer.
    pub fn new(tokenizer: Arc<dyn Tokenizer>) -> Self {
        PipelineAnalyzer {
            name: format!("pipeline_{}", tokenizer.name()),
            tokenizer,
            filters: Vec::new(),
        }
    }

    /// Add a filter to the pipeline.
    pub fn add_filter(mut self, filter: Arc<dyn Filter>) -> Self {
        self.filters.push(filter);
        self
    }

    /// Set a custom name for this analyzer.
    pub fn with_name<S: Into<String>>(mut self, name: S) -> Self {
        self.name = name.into();
        self
    }

    /// Get the tokenizer used by this analyzer.
    pub fn tokenizer(&self) -> &Arc<dyn Tokenizer> {
        &self.tokenizer
    }

    /// Get the filters used by this analyzer.
    pub fn filters(&self) -> &[Arc<dyn Filter>] {
        &self.filters
    }

    /// The segmenter used for ordinary documents.
    ///
    /// Runs `tokenizer → [lowercase] → [stop words] → min length → remove empty`.
    /// The stop filter is only added for a non-empty list.
    pub fn segmenter(
        tokenizer: Arc<dyn Tokenizer>,
        lowercase: bool,
        stop_words: &[String],
        min_token_chars: usize,
    ) -> Self {
        let mut analyzer = PipelineAnalyzer::new(tokenizer);
        if lowercase {
            analyzer = analyzer.add_filter(Arc::new(LowercaseFilter::new()));
        }
        if !stop_words.is_empty() {
            analyzer = analyzer.add_filter(Arc::new(StopFilter::from_words(
                stop_words.iter().cloned(),
            )));
        }
        analyzer
            .add_filter(Arc::new(MinLengthFilter::new(min_token_chars)))
            .add_filter(Arc::new(RemoveEmptyFilter::new()))
    }

    /// The analyzer used for delimiter-separated documents.
    ///
    /// Segments are used verbatim: no case folding and no length filter.
    pub fn delimited(delimiter: char) -> Self {
        PipelineAnalyzer::new(Arc::new(DelimiterTokenizer::new(delimiter)))
    }
}

impl std::fmt::Debug for PipelineAnalyzer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let filters: Vec<&str> = self.filters.iter().map(|filter| filter.name()).collect();
        f.debug_struct("PipelineAnalyzer")
            .field("name", &self.name)
            .field("tokenizer", &self.tokenizer.name())
            .field("filters", &filters)
            .finish()
    }
}

impl Analyzer for PipelineAnalyzer {
    fn analyze(&self, text: &str) -> Result<TokenStream> {
        let mut tokens = self.tokenizer.tokenize(text)?;

        for filter in &self.filters {
            tokens = filter.filter(tokens)?;
        }

        Ok(tokens)
    }

    fn name(&self) -> &str {
        &self.name
    }
}
