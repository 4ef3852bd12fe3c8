//! Candidate pool entities
//!
//! Candidates, the pools they are drawn from, and the run-level
//! team-definition and attribute-weight parameters.
//!
//! Categories and attributes live in ordered maps so that iteration order
//! is stable and seeded runs replay the exact same trajectory.

use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::ConfigurationError;

/// Unique identity of a candidate within a pool
pub type CandidateId = u32;

/// A single selectable member
///
/// Immutable once loaded; teams share candidates by reference counting
/// instead of copying attribute maps around.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    /// Unique id across the whole pool
    pub id: CandidateId,
    /// Display name
    pub name: String,
    /// Category the candidate belongs to
    pub category: String,
    /// Named numeric attributes
    pub attributes: BTreeMap<String, f64>,
}

impl Candidate {
    /// Create a candidate without attributes
    pub fn new(id: CandidateId, name: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            category: category.into(),
            attributes: BTreeMap::new(),
        }
    }

    /// Add one attribute value
    pub fn with_attribute(mut self, name: impl Into<String>, value: f64) -> Self {
        self.attributes.insert(name.into(), value);
        self
    }

    /// Attribute value, 0 when the candidate does not carry the attribute
    pub fn attribute(&self, name: &str) -> f64 {
        self.attributes.get(name).copied().unwrap_or(0.0)
    }
}

/// Read-only pool of candidates grouped by category
#[derive(Clone, Debug, Default)]
pub struct CandidatePool {
    categories: BTreeMap<String, Vec<Arc<Candidate>>>,
}

impl CandidatePool {
    /// Create an empty pool
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a pool from a flat candidate list, grouping by category
    ///
    /// Rejects duplicate candidate ids; the uniqueness invariant of teams
    /// is meaningless over a pool that repeats ids.
    pub fn from_candidates<I>(candidates: I) -> Result<Self, ConfigurationError>
    where
        I: IntoIterator<Item = Candidate>,
    {
        let mut pool = Self::new();
        let mut seen = HashSet::new();
        for candidate in candidates {
            if !seen.insert(candidate.id) {
                return Err(ConfigurationError::DuplicateCandidateId(candidate.id));
            }
            pool.categories
                .entry(candidate.category.clone())
                .or_default()
                .push(Arc::new(candidate));
        }
        Ok(pool)
    }

    /// Candidates available in a category, in roster order
    ///
    /// Unknown categories yield an empty slice.
    pub fn category(&self, name: &str) -> &[Arc<Candidate>] {
        self.categories.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Whether the pool carries the named category
    pub fn has_category(&self, name: &str) -> bool {
        self.categories.contains_key(name)
    }

    /// Category names in stable order
    pub fn category_names(&self) -> impl Iterator<Item = &str> {
        self.categories.keys().map(String::as_str)
    }

    /// Total candidate count across all categories
    pub fn len(&self) -> usize {
        self.categories.values().map(Vec::len).sum()
    }

    /// Whether the pool holds no candidates at all
    pub fn is_empty(&self) -> bool {
        self.categories.values().all(Vec::is_empty)
    }
}

/// Required member count per category; fixes the chromosome shape for a run
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TeamDefinition {
    counts: BTreeMap<String, usize>,
}

impl TeamDefinition {
    /// Create an empty definition
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the required count for one category
    pub fn with_count(mut self, category: impl Into<String>, count: usize) -> Self {
        self.counts.insert(category.into(), count);
        self
    }

    /// Build a definition from a category-to-count map
    pub fn from_counts(counts: BTreeMap<String, usize>) -> Self {
        Self { counts }
    }

    /// Number of genes in a conforming team
    pub fn team_size(&self) -> usize {
        self.counts.values().sum()
    }

    /// Category/count pairs in stable order
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.counts.iter().map(|(category, &count)| (category.as_str(), count))
    }

    /// Whether no category is required
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

/// Non-negative weight per scored attribute
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AttributeWeights {
    weights: BTreeMap<String, f64>,
}

impl AttributeWeights {
    /// Create an empty weighting
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the weight for one attribute
    pub fn with_weight(mut self, attribute: impl Into<String>, weight: f64) -> Self {
        self.weights.insert(attribute.into(), weight);
        self
    }

    /// Build a weighting from an attribute-to-weight map
    pub fn from_weights(weights: BTreeMap<String, f64>) -> Self {
        Self { weights }
    }

    /// Number of weighted attributes; the fitness normalizer
    pub fn len(&self) -> usize {
        self.weights.len()
    }

    /// Whether no attribute is weighted
    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    /// Attribute/weight pairs in stable order
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.weights.iter().map(|(attribute, &weight)| (attribute.as_str(), weight))
    }

    /// Check the run-start weight rules: at least one attribute, every
    /// weight finite and non-negative
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.weights.is_empty() {
            return Err(ConfigurationError::NoWeightedAttributes);
        }
        for (attribute, &weight) in &self.weights {
            if !weight.is_finite() || weight < 0.0 {
                return Err(ConfigurationError::InvalidWeight {
                    attribute: attribute.clone(),
                    weight,
                });
            }
        }
        Ok(())
    }
}
