//! Tokenizer implementations for text analysis.
//!
//! Tokenizers are the first step in the analysis pipeline: they split a
//! document into an ordered sequence of candidate terms.
//!
//! # Available Tokenizers
//!
//! - [`unicode_word::UnicodeWordTokenizer`] - Uses Unicode word boundaries
//! - [`cjk_bigram::CjkBigramTokenizer`] - Unicode words, with CJK runs as bigrams
//! - [`whitespace::WhitespaceTokenizer`] - Splits on whitespace characters
//! - [`regex::RegexTokenizer`] - Custom regex-based tokenization
//! - [`delimiter::DelimiterTokenizer`] - Splits on a fixed delimiter character
//!
//! # Examples
//!
//! ```
//! use bayes_sift::analysis::tokenizer::Tokenizer;
//! use bayes_sift::analysis::tokenizer::whitespace::WhitespaceTokenizer;
//!
//! let tokenizer = WhitespaceTokenizer::new();
//! let tokens: Vec<_> = tokenizer.tokenize("Hello world").unwrap().collect();
//! assert_eq!(tokens.len(), 2);
//! ```

use crate::analysis::token::TokenStream;
use crate::error::Result;

/// Trait for tokenizers that convert text into tokens.
///
/// The trait requires `Send + Sync` so a single tokenizer can be shared by
/// every thread that trains or queries the classifier.
///
/// # Examples
///
/// Implementing a custom tokenizer:
///
/// ```
/// use bayes_sift::analysis::token::{Token, TokenStream};
/// use bayes_sift::analysis::tokenizer::Tokenizer;
/// use bayes_sift::error::Result;
///
/// struct CommaTokenizer;
///
/// impl Tokenizer for CommaTokenizer {
///     fn tokenize(&self, text: &str) -> Result<TokenStream> {
///         let tokens: Vec<Token> = text
///             .split(',')
///             .enumerate()
///             .map(|(i, s)| Token::new(s.trim(), i))
///             .collect();
///         Ok(Box::new(tokens.into_iter()))
///     }
///
///     fn name(&self) -> &'static str {
///         "comma"
///     }
/// }
/// ```
pub trait Tokenizer: Send + Sync {
    /// Tokenize the given text into a stream of tokens.
    fn tokenize(&self, text: &str) -> Result<TokenStream>;

    /// Get the name of this tokenizer (for debugging and configuration).
    fn name(&self) -> &'static str;
}

pub mod cjk_bigram;
pub mod delimiter;
pub mod regex;
pub mod unicode_word;
pub mod whitespace;
