//! Minimum length filter implementation.
//!
//! Drops tokens whose trimmed character count is below a minimum. With the
//! default minimum of two, single-character and whitespace-only tokens are
//! discarded, since they are too common to tell categories apart.

use crate::analysis::token::TokenStream;
use crate::analysis::token_filter::Filter;
use crate::error::Result;

/// Default minimum number of characters a token must have.
pub const DEFAULT_MIN_TOKEN_CHARS: usize = 2;

/// A filter that removes tokens shorter than `min_chars` characters.
#[derive(Clone, Debug)]
pub struct MinLengthFilter {
    min_chars: usize,
}

impl MinLengthFilter {
    /// Create a filter with the given minimum character count.
    pub fn new(min_chars: usize) -> Self {
        MinLengthFilter { min_chars }
    }

    /// The minimum character count.
    pub fn min_chars(&self) -> usize {
        self.min_chars
    }
}

impl Default for MinLengthFilter {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_TOKEN_CHARS)
    }
}

impl Filter for MinLengthFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        let min_chars = self.min_chars;
        Ok(Box::new(
            tokens.filter(move |token| token.trimmed_char_count() >= min_chars),
        ))
    }

    fn name(&self) -> &'static str {
        "min_length"
    }
}
