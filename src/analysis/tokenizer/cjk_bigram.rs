//! CJK bigram tokenizer implementation.
//!
//! Chinese and Japanese text carries no spaces, and UAX #29 splits
//! ideographs one character per segment. Single characters are too weak to
//! classify on (and the default minimum token length drops them), so runs of
//! adjacent ideographs and kana are emitted as overlapping character bigrams
//! instead. Everything else is segmented like
//! [`UnicodeWordTokenizer`](super::unicode_word::UnicodeWordTokenizer).
//!
//! # Examples
//!
//! ```
//! use bayes_sift::analysis::tokenizer::Tokenizer;
//! use bayes_sift::analysis::tokenizer::cjk_bigram::CjkBigramTokenizer;
//!
//! let tokenizer = CjkBigramTokenizer::new();
//! let tokens: Vec<_> = tokenizer
//!     .tokenize("购买药品 now")
//!     .unwrap()
//!     .map(|t| t.text)
//!     .collect();
//!
//! assert_eq!(tokens, vec!["购买", "买药", "药品", "now"]);
//! ```

use unicode_segmentation::UnicodeSegmentation;

use crate::analysis::token::{Token, TokenStream};
use crate::analysis::tokenizer::Tokenizer;
use crate::error::Result;

/// A tokenizer that turns ideograph and kana runs into character bigrams.
#[derive(Clone, Debug, Default)]
pub struct CjkBigramTokenizer;

impl CjkBigramTokenizer {
    /// Create a new CJK bigram tokenizer.
    pub fn new() -> Self {
        CjkBigramTokenizer
    }
}

/// Han ideographs (including extensions and compatibility forms) and kana.
fn is_cjk(c: char) -> bool {
    matches!(
        c,
        '\u{3040}'..='\u{30FF}'
            | '\u{3400}'..='\u{4DBF}'
            | '\u{4E00}'..='\u{9FFF}'
            | '\u{F900}'..='\u{FAFF}'
            | '\u{20000}'..='\u{2FA1F}'
    )
}

/// Emit the bigrams of the run spanning `text[start..end]`.
///
/// A run of one character is emitted as is.
fn push_bigrams(text: &str, (start, end): (usize, usize), tokens: &mut Vec<Token>) {
    let chars: Vec<(usize, usize)> = text[start..end]
        .char_indices()
        .map(|(i, c)| (start + i, start + i + c.len_utf8()))
        .collect();

    if let [(from, to)] = chars[..] {
        tokens.push(Token::with_offsets(&text[from..to], tokens.len(), from, to));
        return;
    }

    for pair in chars.windows(2) {
        let (from, _) = pair[0];
        let (_, to) = pair[1];
        tokens.push(Token::with_offsets(&text[from..to], tokens.len(), from, to));
    }
}

impl Tokenizer for CjkBigramTokenizer {
    fn tokenize(&self, text: &str) -> Result<TokenStream> {
        let mut tokens = Vec::new();
        // Byte range of the CJK run being accumulated.
        let mut run: Option<(usize, usize)> = None;

        for (start, word) in text.split_word_bound_indices() {
            if !word.chars().any(char::is_alphanumeric) {
                continue;
            }
            let end = start + word.len();

            if word.chars().all(is_cjk) {
                match run {
                    Some((run_start, run_end)) if run_end == start => run = Some((run_start, end)),
                    _ => {
                        if let Some(pending) = run {
                            push_bigrams(text, pending, &mut tokens);
                        }
                        run = Some((start, end));
                    }
                }
            } else {
                if let Some(pending) = run.take() {
                    push_bigrams(text, pending, &mut tokens);
                }
                tokens.push(Token::with_offsets(word, tokens.len(), start, end));
            }
        }

        if let Some(pending) = run {
            push_bigrams(text, pending, &mut tokens);
        }

        Ok(Box::new(tokens.into_iter()))
    }

    fn name(&self) -> &'static str {
        "cjk_bigram"
    }
}
