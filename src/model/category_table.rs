//! Category table.
//!
//! Maps each category label to the number of training calls made with it.
//! Counts only grow; [`CategoryTable::clear`] is the only way back to zero.

use serde::{Deserialize, Serialize};

use crate::model::term_table::FastMap;

/// Mapping of category → number of trained documents.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryTable {
    counts: FastMap<String, f64>,
}

impl CategoryTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one more document for `category`.
    pub fn increment(&mut self, category: &str) {
        match self.counts.get_mut(category) {
            Some(count) => *count += 1.0,
            None => {
                self.counts.insert(category.to_string(), 1.0);
            }
        }
    }

    /// Number of documents trained under `category` (0 when unseen).
    pub fn count(&self, category: &str) -> f64 {
        self.counts.get(category).copied().unwrap_or(0.0)
    }

    /// Whether `category` has been trained at least once.
    pub fn contains(&self, category: &str) -> bool {
        self.counts.contains_key(category)
    }

    /// Sum of the document counts of every category.
    pub fn total(&self) -> f64 {
        self.counts.values().sum()
    }

    /// Iterate over categories and their document counts.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.counts
            .iter()
            .map(|(category, count)| (category.as_str(), *count))
    }

    /// Category names sorted ascending.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.counts.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Number of categories.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Whether no category has been trained.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Reset every count.
    pub fn clear(&mut self) {
        self.counts.clear();
    }
}
