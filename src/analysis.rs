//! Text analysis for the classifier.
//!
//! This module provides the tokenizer capability: tokenizers split a
//! document into candidate terms, filters clean the stream up, and
//! analyzers chain the two.

pub mod analyzer;
pub mod token;
pub mod token_filter;
pub mod tokenizer;
