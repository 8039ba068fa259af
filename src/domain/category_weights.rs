//! Category affinity weights used by the auction score.
//!
//! The table is injected into the [`crate::service::AuctionService`] so it
//! can differ per deployment (`CATEGORY_WEIGHTS`) or per test.

use std::collections::HashMap;
use std::str::FromStr;

use rust_decimal::Decimal;

/// How strongly category affinity scales the bid: 0.5.
pub const CATEGORY_WEIGHT_FACTOR: Decimal = Decimal::from_parts(5, 0, 0, false, 1);

/// Largest weight accepted from a `label=weight` list.
pub const MAX_CATEGORY_WEIGHT: Decimal = Decimal::from_parts(1_000, 0, 0, false, 0);

/// Error returned when a `label=weight` list cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CategoryWeightsError {
    /// An entry was not of the form `label=weight`.
    #[error("malformed category weight entry: {0:?}")]
    MalformedEntry(String),

    /// The weight part of an entry was not a decimal number.
    #[error("invalid weight for category {label}: {value:?}")]
    InvalidWeight {
        /// Category label of the entry.
        label: String,
        /// Raw weight text.
        value: String,
    },

    /// The weight was negative or above [`MAX_CATEGORY_WEIGHT`].
    #[error("weight for category {label} must be between 0 and {max}: {value}")]
    OutOfRange {
        /// Category label of the entry.
        label: String,
        /// Parsed weight.
        value: Decimal,
        /// Upper bound.
        max: Decimal,
    },
}

/// Mapping from category label to affinity weight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryWeights {
    weights: HashMap<String, Decimal>,
}

impl CategoryWeights {
    /// Creates a table from an explicit mapping. Weights are taken as-is;
    /// an affinity that overflows surfaces as `None` from
    /// [`CategoryWeights::affinity`].
    #[must_use]
    pub fn new(weights: HashMap<String, Decimal>) -> Self {
        Self { weights }
    }

    /// Returns the weight configured for `category`, if any.
    #[must_use]
    pub fn weight(&self, category: &str) -> Option<Decimal> {
        self.weights.get(category).copied()
    }

    /// Affinity sum for a category set: `1` plus the weight of every label
    /// that has one. Unweighted labels contribute nothing.
    ///
    /// Returns `None` if the sum does not fit in a [`Decimal`].
    #[must_use]
    pub fn affinity<S: AsRef<str>>(&self, categories: &[S]) -> Option<Decimal> {
        categories
            .iter()
            .filter_map(|c| self.weight(c.as_ref()))
            .try_fold(Decimal::ONE, Decimal::checked_add)
    }

    /// Iterates over `(label, weight)` pairs in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Decimal)> {
        self.weights.iter().map(|(label, w)| (label.as_str(), *w))
    }

    /// Number of configured labels.
    #[must_use]
    pub fn len(&self) -> usize {
        self.weights.len()
    }

    /// Returns `true` if no label carries a weight.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }
}

impl Default for CategoryWeights {
    fn default() -> Self {
        let weights = [
            ("electronics", Decimal::new(15, 1)),
            ("sale", Decimal::new(12, 1)),
            ("fashion", Decimal::new(105, 2)),
            ("travel", Decimal::new(9, 1)),
            ("finance", Decimal::new(55, 2)),
        ]
        .into_iter()
        .map(|(label, weight)| (label.to_string(), weight))
        .collect();
        Self { weights }
    }
}

impl FromStr for CategoryWeights {
    type Err = CategoryWeightsError;

    /// Parses `electronics=1.5,sale=1.2`. Blank input yields an empty table.
    /// Weights must lie in `0..=MAX_CATEGORY_WEIGHT`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut weights = HashMap::new();
        for entry in s.split(',').map(str::trim).filter(|e| !e.is_empty()) {
            let Some((label, value)) = entry.split_once('=') else {
                return Err(CategoryWeightsError::MalformedEntry(entry.to_string()));
            };
            let (label, value) = (label.trim(), value.trim());
            if label.is_empty() {
                return Err(CategoryWeightsError::MalformedEntry(entry.to_string()));
            }
            let weight =
                Decimal::from_str(value).map_err(|_| CategoryWeightsError::InvalidWeight {
                    label: label.to_string(),
                    value: value.to_string(),
                })?;
            if weight < Decimal::ZERO || weight > MAX_CATEGORY_WEIGHT {
                return Err(CategoryWeightsError::OutOfRange {
                    label: label.to_string(),
                    value: weight,
                    max: MAX_CATEGORY_WEIGHT,
                });
            }
            weights.insert(label.to_string(), weight);
        }
        Ok(Self { weights })
    }
}
