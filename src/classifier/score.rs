//! Ranked inference results.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

/// Maximum number of entries a ranked result holds.
pub const MAX_RESULTS: usize = 10;

/// A category label with its score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreItem {
    /// Category name.
    pub label: String,
    /// Probability (per-word scoring) or unnormalized posterior (document scoring).
    pub probability: f64,
}

impl ScoreItem {
    /// Create a new score item.
    pub fn new<S: Into<String>>(label: S, probability: f64) -> Self {
        ScoreItem {
            label: label.into(),
            probability,
        }
    }
}

/// Higher probability first; equal probabilities by label ascending.
fn rank(a: &ScoreItem, b: &ScoreItem) -> Ordering {
    b.probability
        .total_cmp(&a.probability)
        .then_with(|| a.label.cmp(&b.label))
}

/// Collects scores and ranks them.
#[derive(Debug, Clone, Default)]
pub struct Scores {
    items: Vec<ScoreItem>,
}

impl Scores {
    /// Create an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty collection with room for `capacity` items.
    pub fn with_capacity(capacity: usize) -> Self {
        Scores {
            items: Vec::with_capacity(capacity),
        }
    }

    /// Add a score.
    pub fn append<S: Into<String>>(&mut self, label: S, probability: f64) {
        self.items.push(ScoreItem::new(label, probability));
    }

    /// Number of collected scores.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether nothing was collected.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// All scores in ranked order.
    pub fn ranked(mut self) -> Vec<ScoreItem> {
        self.items.sort_by(rank);
        self.items
    }

    /// The `n` best scores in ranked order.
    pub fn top(self, n: usize) -> Vec<ScoreItem> {
        let mut ranked = self.ranked();
        ranked.truncate(n);
        ranked
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ranked_by_probability_descending() {
        let mut scores = Scores::new();
        scores.append("ham", 0.2);
        scores.append("spam", 0.7);
        scores.append("news", 0.4);

        let labels: Vec<String> = scores.ranked().into_iter().map(|s| s.label).collect();
        assert_eq!(labels, vec!["spam", "news", "ham"]);
    }

    #[test]
    fn test_ties_broken_by_label() {
        let mut scores = Scores::new();
        scores.append("zeta", 0.5);
        scores.append("alpha", 0.5);
        scores.append("mid", 0.5);
        scores.append("top", 0.9);

        let labels: Vec<String> = scores.ranked().into_iter().map(|s| s.label).collect();
        assert_eq!(labels, vec!["top", "alpha", "mid", "zeta"]);
    }

    #[test]
    fn test_top_truncates() {
        let mut scores = Scores::with_capacity(15);
        for i in 0..15 {
            scores.append(format!("c{i:02}"), i as f64);
        }
        assert_eq!(scores.len(), 15);

        let top = scores.top(MAX_RESULTS);
        assert_eq!(top.len(), MAX_RESULTS);
        assert_eq!(top[0].label, "c14");
        assert_eq!(top[9].label, "c05");
    }

    #[test]
    fn test_empty() {
        let scores = Scores::new();
        assert!(scores.is_empty());
        assert!(scores.top(MAX_RESULTS).is_empty());
    }
}
