//! Weighted-attribute fitness
//!
//! The fitness of a team is the weight-scaled average of per-attribute
//! team means, normalized by the number of weighted attributes.

use std::sync::Arc;

use crate::candidate::{AttributeWeights, Candidate};

/// Scores gene sequences against a fixed set of attribute weights
#[derive(Clone, Debug)]
pub struct FitnessEvaluator {
    weights: AttributeWeights,
}

impl FitnessEvaluator {
    /// Create an evaluator over the given weights
    pub fn new(weights: AttributeWeights) -> Self {
        Self { weights }
    }

    /// The weighting this evaluator scores against
    pub fn weights(&self) -> &AttributeWeights {
        &self.weights
    }

    /// Score a gene sequence
    ///
    /// For every weighted attribute the arithmetic mean across members is
    /// scaled by the attribute's weight; the sum is then divided by the
    /// attribute count. Weights are not required to sum to 1.
    pub fn evaluate(&self, members: &[Arc<Candidate>]) -> f64 {
        if members.is_empty() || self.weights.is_empty() {
            return 0.0;
        }

        let member_count = members.len() as f64;
        let mut total = 0.0;
        for (attribute, weight) in self.weights.iter() {
            let sum: f64 = members.iter().map(|member| member.attribute(attribute)).sum();
            total += weight * (sum / member_count);
        }
        total / self.weights.len() as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::candidate::Candidate;

    fn member(id: u32, values: &[(&str, f64)]) -> Arc<Candidate> {
        let mut candidate = Candidate::new(id, format!("member-{id}"), "developer");
        for (attribute, value) in values {
            candidate = candidate.with_attribute(*attribute, *value);
        }
        Arc::new(candidate)
    }

    #[test]
    fn test_single_attribute_pair_formula() {
        // Two members, one attribute of weight w: fitness = w * (v1 + v2) / 2
        let evaluator = FitnessEvaluator::new(AttributeWeights::new().with_weight("experience", 2.0));
        let members = vec![
            member(1, &[("experience", 4.0)]),
            member(2, &[("experience", 6.0)]),
        ];

        assert_eq!(evaluator.evaluate(&members), 2.0 * 5.0);
    }

    #[test]
    fn test_multiple_attributes_normalized_by_count() {
        let evaluator = FitnessEvaluator::new(
            AttributeWeights::new()
                .with_weight("experience", 1.0)
                .with_weight("communication", 3.0),
        );
        let members = vec![
            member(1, &[("experience", 2.0), ("communication", 4.0)]),
            member(2, &[("experience", 4.0), ("communication", 0.0)]),
        ];

        // experience mean 3, communication mean 2: (1*3 + 3*2) / 2
        assert_eq!(evaluator.evaluate(&members), (3.0 + 6.0) / 2.0);
    }

    #[test]
    fn test_missing_attribute_scores_zero() {
        let evaluator = FitnessEvaluator::new(AttributeWeights::new().with_weight("leadership", 1.0));
        let members = vec![member(1, &[("experience", 5.0)])];

        assert_eq!(evaluator.evaluate(&members), 0.0);
    }

    #[test]
    fn test_empty_members_score_zero() {
        let evaluator = FitnessEvaluator::new(AttributeWeights::new().with_weight("experience", 1.0));
        assert_eq!(evaluator.evaluate(&[]), 0.0);
    }

    #[test]
    fn test_weights_need_not_sum_to_one() {
        let evaluator = FitnessEvaluator::new(
            AttributeWeights::new()
                .with_weight("a", 10.0)
                .with_weight("b", 10.0),
        );
        let members = vec![member(1, &[("a", 1.0), ("b", 3.0)])];

        assert_eq!(evaluator.evaluate(&members), (10.0 + 30.0) / 2.0);
    }
}
