//! The in-memory frequency model.
//!
//! A [`Model`] pairs the [`TermFrequencyTable`] with the [`CategoryTable`].
//! It is the unit of persistence: snapshots encode and decode it whole.
//! Its serialized field names (`category`, `words`) are kept stable so
//! existing snapshots stay readable.

pub mod category_table;
pub mod term_table;

use serde::{Deserialize, Serialize};

pub use self::category_table::CategoryTable;
pub use self::term_table::{CategoryCounts, FastMap, TermFrequencyTable};

/// The learned state of a classifier.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Model {
    /// Documents trained per category.
    #[serde(rename = "category", default)]
    pub categories: CategoryTable,

    /// Per-category document frequency of every term.
    #[serde(rename = "words", default)]
    pub terms: TermFrequencyTable,
}

/// Summary counts of a [`Model`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModelStats {
    /// Number of distinct terms.
    pub terms: usize,
    /// Number of categories.
    pub categories: usize,
    /// Total number of trained documents.
    pub documents: f64,
}

impl Model {
    /// Create an empty model.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one training document given its distinct terms.
    ///
    /// Callers are responsible for de-duplicating `terms`.
    pub fn record<'a, I>(&mut self, terms: I, category: &str)
    where
        I: IntoIterator<Item = &'a str>,
    {
        for term in terms {
            self.terms.increment(term, category);
        }
        self.categories.increment(category);
    }

    /// Summary counts.
    pub fn stats(&self) -> ModelStats {
        ModelStats {
            terms: self.terms.len(),
            categories: self.categories.len(),
            documents: self.categories.total(),
        }
    }

    /// Whether nothing has been trained.
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty() && self.terms.is_empty()
    }

    /// Reset both tables.
    pub fn clear(&mut self) {
        self.terms.clear();
        self.categories.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_updates_both_tables() {
        let mut model = Model::new();
        model.record(["buy", "cheap"], "spam");
        model.record(["agenda"], "ham");

        assert_eq!(model.categories.count("spam"), 1.0);
        assert_eq!(model.terms.lookup("cheap", "spam"), Some(1.0));

        let stats = model.stats();
        assert_eq!(stats.terms, 3);
        assert_eq!(stats.categories, 2);
        assert_eq!(stats.documents, 2.0);
    }

    #[test]
    fn test_json_layout() {
        let mut model = Model::new();
        model.record(["cheap"], "spam");

        let value = serde_json::to_value(&model).unwrap();
        assert_eq!(value["category"]["spam"], 1.0);
        assert_eq!(value["words"]["cheap"]["spam"], 1.0);

        let decoded: Model = serde_json::from_value(value).unwrap();
        assert_eq!(decoded, model);
    }

    #[test]
    fn test_missing_tables_decode_as_empty() {
        let decoded: Model = serde_json::from_str("{}").unwrap();
        assert!(decoded.is_empty());
    }
}
