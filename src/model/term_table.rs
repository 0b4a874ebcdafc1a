//! Term frequency table.
//!
//! Maps every observed term to the number of training documents, per
//! category, that contained it. A term is only ever inserted together with
//! at least one category count, so inner maps are never empty.

use std::collections::HashMap;

use ahash::RandomState;
use serde::{Deserialize, Serialize};

/// Hash map using the ahash hasher.
pub type FastMap<K, V> = HashMap<K, V, RandomState>;

/// Per-category counts for a single term.
pub type CategoryCounts = FastMap<String, f64>;

/// Mapping of term → category → document count.
///
/// Counts are stored as `f64` because every consumer divides them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TermFrequencyTable {
    terms: FastMap<String, CategoryCounts>,
}

impl TermFrequencyTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Increment the count of `term` under `category` by one.
    pub fn increment(&mut self, term: &str, category: &str) {
        match self.terms.get_mut(term) {
            Some(counts) => match counts.get_mut(category) {
                Some(count) => *count += 1.0,
                None => {
                    counts.insert(category.to_string(), 1.0);
                }
            },
            None => {
                let mut counts = CategoryCounts::default();
                counts.insert(category.to_string(), 1.0);
                self.terms.insert(term.to_string(), counts);
            }
        }
    }

    /// Count of `term` under `category`, or `None` if the pair was never observed.
    pub fn lookup(&self, term: &str, category: &str) -> Option<f64> {
        self.terms.get(term)?.get(category).copied()
    }

    /// Whether `term` has been observed at all.
    pub fn contains(&self, term: &str) -> bool {
        self.terms.contains_key(term)
    }

    /// Sum of the counts of `term` over every category (0 when unseen).
    pub fn total_for_term(&self, term: &str) -> f64 {
        self.terms
            .get(term)
            .map(|counts| counts.values().sum())
            .unwrap_or(0.0)
    }

    /// Categories `term` has been observed under, sorted by name.
    pub fn categories_for_term(&self, term: &str) -> Vec<&str> {
        let mut categories: Vec<&str> = self
            .terms
            .get(term)
            .map(|counts| counts.keys().map(String::as_str).collect())
            .unwrap_or_default();
        categories.sort_unstable();
        categories
    }

    /// Per-category counts of `term`.
    pub fn counts(&self, term: &str) -> Option<&CategoryCounts> {
        self.terms.get(term)
    }

    /// Iterate over all terms and their per-category counts.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &CategoryCounts)> {
        self.terms.iter().map(|(term, counts)| (term.as_str(), counts))
    }

    /// Number of distinct terms.
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// Whether no term has been observed.
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Remove every term.
    pub fn clear(&mut self) {
        self.terms.clear();
    }
}
