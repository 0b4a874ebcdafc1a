//! Conditional probability estimation.
//!
//! Turns the raw counts of a [`Model`] into probabilities. The weighted
//! estimate blends the empirical frequency of a term with an assumed prior so
//! that rare terms are not over-trusted and unseen terms do not zero out a
//! whole document score:
//!
//! ```text
//! weighted = (weight * assumed + total * raw) / (weight + total)
//! ```
//!
//! where `total` is the number of documents containing the term across every
//! category. The result always lies between `assumed` and `raw`.

use crate::model::Model;

/// Read-only probability view over a model.
#[derive(Debug, Clone, Copy)]
pub struct ProbabilityEstimator<'a> {
    model: &'a Model,
}

impl<'a> ProbabilityEstimator<'a> {
    /// Create an estimator over `model`.
    pub fn new(model: &'a Model) -> Self {
        ProbabilityEstimator { model }
    }

    /// Fraction of the documents of `category` that contained `term`.
    ///
    /// 0 when the term was never observed, or never under `category`, or when
    /// `category` has no trained documents.
    pub fn raw_conditional_probability(&self, term: &str, category: &str) -> f64 {
        let Some(count) = self.model.terms.lookup(term, category) else {
            return 0.0;
        };
        let documents = self.model.categories.count(category);
        if documents > 0.0 { count / documents } else { 0.0 }
    }

    /// Raw probability smoothed towards `assumed_prob` with strength `weight`.
    ///
    /// Returns `assumed_prob` when there is neither prior weight nor evidence.
    pub fn weighted_conditional_probability(
        &self,
        term: &str,
        category: &str,
        weight: f64,
        assumed_prob: f64,
    ) -> f64 {
        let basic = self.raw_conditional_probability(term, category);
        let total = self.model.terms.total_for_term(term);
        let denominator = weight + total;
        if denominator <= 0.0 {
            return assumed_prob;
        }
        (weight * assumed_prob + total * basic) / denominator
    }

    /// Share of all trained documents that belong to `category`.
    ///
    /// 0 when nothing has been trained.
    pub fn category_probability(&self, category: &str) -> f64 {
        let total = self.model.categories.total();
        if total > 0.0 {
            self.model.categories.count(category) / total
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-12;

    fn spam_ham_model() -> Model {
        let mut model = Model::new();
        model.record(["buy", "cheap", "pills"], "spam");
        model.record(["cheap", "offer"], "spam");
        model.record(["meeting", "agenda", "attached"], "ham");
        model
    }

    #[test]
    fn test_raw_probability() {
        let model = spam_ham_model();
        let estimator = ProbabilityEstimator::new(&model);

        assert!((estimator.raw_conditional_probability("cheap", "spam") - 1.0).abs() < EPSILON);
        assert!((estimator.raw_conditional_probability("buy", "spam") - 0.5).abs() < EPSILON);
        assert_eq!(estimator.raw_conditional_probability("buy", "ham"), 0.0);
        assert_eq!(estimator.raw_conditional_probability("unknown", "spam"), 0.0);
        assert_eq!(estimator.raw_conditional_probability("buy", "never-trained"), 0.0);
    }

    #[test]
    fn test_weighted_probability() {
        let model = spam_ham_model();
        let estimator = ProbabilityEstimator::new(&model);

        // buy: raw 0.5 under spam, seen in 1 document overall.
        let p = estimator.weighted_conditional_probability("buy", "spam", 1.0, 0.5);
        assert!((p - 0.5).abs() < EPSILON);

        // buy under ham: raw 0, total 1 → (0.5 + 0) / 2.
        let p = estimator.weighted_conditional_probability("buy", "ham", 1.0, 0.5);
        assert!((p - 0.25).abs() < EPSILON);

        // cheap: raw 1.0 under spam, total 2 → (0.5 + 2) / 3.
        let p = estimator.weighted_conditional_probability("cheap", "spam", 1.0, 0.5);
        assert!((p - 2.5 / 3.0).abs() < EPSILON);
    }

    #[test]
    fn test_unseen_term_falls_back_to_prior() {
        let model = spam_ham_model();
        let estimator = ProbabilityEstimator::new(&model);

        let p = estimator.weighted_conditional_probability("unknown", "spam", 1.0, 0.3);
        assert!((p - 0.3).abs() < EPSILON);

        let p = estimator.weighted_conditional_probability("unknown", "spam", 0.0, 0.3);
        assert!((p - 0.3).abs() < EPSILON);
    }

    #[test]
    fn test_zero_weight_is_raw_probability() {
        let model = spam_ham_model();
        let estimator = ProbabilityEstimator::new(&model);

        let p = estimator.weighted_conditional_probability("buy", "spam", 0.0, 0.9);
        assert!((p - 0.5).abs() < EPSILON);
    }

    #[test]
    fn test_weighted_within_prior_and_raw() {
        let model = spam_ham_model();
        let estimator = ProbabilityEstimator::new(&model);

        for term in ["buy", "cheap", "pills", "offer", "meeting", "unknown"] {
            for category in ["spam", "ham", "other"] {
                for weight in [0.0, 0.5, 1.0, 3.0, 100.0] {
                    for assumed in [0.0, 0.1, 0.5, 1.0] {
                        let raw = estimator.raw_conditional_probability(term, category);
                        let p = estimator
                            .weighted_conditional_probability(term, category, weight, assumed);
                        let low = raw.min(assumed) - EPSILON;
                        let high = raw.max(assumed) + EPSILON;
                        assert!(
                            (low..=high).contains(&p),
                            "{term}/{category} w={weight} a={assumed}: {p} not in [{raw}, {assumed}]"
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn test_category_probability() {
        let model = spam_ham_model();
        let estimator = ProbabilityEstimator::new(&model);

        assert!((estimator.category_probability("spam") - 2.0 / 3.0).abs() < EPSILON);
        assert_eq!(estimator.category_probability("other"), 0.0);
        assert_eq!(
            ProbabilityEstimator::new(&Model::new()).category_probability("spam"),
            0.0
        );
    }
}
