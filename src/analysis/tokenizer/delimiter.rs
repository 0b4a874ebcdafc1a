//! Fixed-delimiter tokenizer implementation.
//!
//! Used for documents that arrive pre-segmented, e.g. `"tag1/tag2/tag3"`.
//! Segments are kept exactly as written: no trimming and no length
//! filtering. Only empty segments (from doubled or trailing delimiters) are
//! dropped.
//!
//! # Examples
//!
//! ```
//! use bayes_sift::analysis::tokenizer::Tokenizer;
//! use bayes_sift::analysis::tokenizer::delimiter::DelimiterTokenizer;
//!
//! let tokenizer = DelimiterTokenizer::new('/');
//! let texts: Vec<_> = tokenizer.tokenize("a/b/a").unwrap().map(|t| t.text).collect();
//! assert_eq!(texts, vec!["a", "b", "a"]);
//! ```

use super::Tokenizer;
use crate::analysis::token::{Token, TokenStream};
use crate::error::Result;

/// The delimiter used when none is configured.
pub const DEFAULT_DELIMITER: char = '/';

/// A tokenizer that splits text on a single delimiter character.
#[derive(Clone, Debug)]
pub struct DelimiterTokenizer {
    delimiter: char,
}

impl DelimiterTokenizer {
    /// Create a tokenizer splitting on `delimiter`.
    pub fn new(delimiter: char) -> Self {
        DelimiterTokenizer { delimiter }
    }

    /// The delimiter character.
    pub fn delimiter(&self) -> char {
        self.delimiter
    }
}

impl Default for DelimiterTokenizer {
    fn default() -> Self {
        Self::new(DEFAULT_DELIMITER)
    }
}

impl Tokenizer for DelimiterTokenizer {
    fn tokenize(&self, text: &str) -> Result<TokenStream> {
        let mut tokens = Vec::new();
        let mut start = 0;

        for segment in text.split(self.delimiter) {
            let end = start + segment.len();
            if !segment.is_empty() {
                tokens.push(Token::with_offsets(segment, tokens.len(), start, end));
            }
            start = end + self.delimiter.len_utf8();
        }

        Ok(Box::new(tokens.into_iter()))
    }

    fn name(&self) -> &'static str {
        "delimiter"
    }
}
