//! Chart data types
//!
//! The aggregate payload served by `GET /api/chart-data` and the fixed chart
//! slots it is rendered into.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::error::{ChartError, ChartResult};

/// Positionally paired labels and values for one chart
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChartDataset {
    pub labels: Vec<String>,
    pub values: Vec<f64>,
}

impl ChartDataset {
    /// Create a dataset from parallel label and value sequences
    pub fn new(labels: Vec<String>, values: Vec<f64>) -> Self {
        Self { labels, values }
    }

    /// Build a dataset from `(label, value)` pairs, keeping their order
    pub fn from_pairs<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        let (labels, values) = pairs
            .into_iter()
            .map(|(label, value)| (label.into(), value))
            .unzip();
        Self { labels, values }
    }

    /// Number of categories (the value series length)
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Sum of all values in the series
    pub fn total(&self) -> f64 {
        self.values.iter().sum()
    }

    /// Label at `index`, empty when the label list is shorter than the values
    pub fn label_at(&self, index: usize) -> &str {
        self.labels.get(index).map(String::as_str).unwrap_or("")
    }

    /// Check the pairing invariant: equal lengths and finite values.
    ///
    /// The renderers never call this; the endpoint contract is trusted. It is
    /// used where a payload enters the system from a file.
    pub fn validate(&self, slot: ChartSlot) -> ChartResult<()> {
        if self.labels.len() != self.values.len() {
            return Err(ChartError::LengthMismatch {
                slot,
                labels: self.labels.len(),
                values: self.values.len(),
            });
        }

        if let Some(index) = self.values.iter().position(|v| !v.is_finite()) {
            return Err(ChartError::NonFiniteValue { slot, index });
        }

        Ok(())
    }
}

/// Body of the aggregate-data endpoint.
///
/// `account_types` and `owners` hold account counts per group; `frns` holds
/// the summed balance per institution reference.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChartData {
    pub account_types: ChartDataset,
    pub owners: ChartDataset,
    pub frns: ChartDataset,
}

impl ChartData {
    /// Decode an endpoint body
    pub fn from_json(body: &str) -> ChartResult<Self> {
        serde_json::from_str(body).map_err(|e| ChartError::Decode(e.to_string()))
    }

    /// Dataset feeding the given slot
    pub fn dataset(&self, slot: ChartSlot) -> &ChartDataset {
        match slot {
            ChartSlot::AccountType => &self.account_types,
            ChartSlot::Owner => &self.owners,
            ChartSlot::Institution => &self.frns,
        }
    }

    /// Validate every dataset, reporting the first failure
    pub fn validate(&self) -> ChartResult<()> {
        ChartSlot::ALL
            .iter()
            .try_for_each(|slot| self.dataset(*slot).validate(*slot))
    }
}

/// One of the three fixed chart mount points
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartSlot {
    /// Accounts per account type (pie)
    AccountType,
    /// Accounts per owner code (doughnut)
    Owner,
    /// Total balance per institution reference (bar)
    Institution,
}

impl ChartSlot {
    pub const ALL: [ChartSlot; 3] = [ChartSlot::AccountType, ChartSlot::Owner, ChartSlot::Institution];

    /// Chart kind rendered in this slot. Fixed, never data-driven.
    pub fn kind(self) -> ChartKind {
        match self {
            ChartSlot::AccountType => ChartKind::Pie,
            ChartSlot::Owner => ChartKind::Doughnut,
            ChartSlot::Institution => ChartKind::Bar,
        }
    }

    /// Stable index, used by the registry's slot table
    pub fn index(self) -> usize {
        match self {
            ChartSlot::AccountType => 0,
            ChartSlot::Owner => 1,
            ChartSlot::Institution => 2,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ChartSlot::AccountType => "account_type",
            ChartSlot::Owner => "owner",
            ChartSlot::Institution => "institution",
        }
    }
}

impl fmt::Display for ChartSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Chart.js chart type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Pie,
    Doughnut,
    Bar,
}

impl ChartKind {
    /// Pie and doughnut share the share-of-total tooltip
    pub fn is_circular(self) -> bool {
        matches!(self, ChartKind::Pie | ChartKind::Doughnut)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_endpoint_body() {
        let body = r#"{
            "account_types": {"labels": ["Savings", "ISA"], "values": [1500.0, 2500.5]},
            "owners": {"labels": ["a", "j"], "values": [3000, 1000.5]},
            "frns": {"labels": ["123456"], "values": [4000.5]}
        }"#;

        let data = ChartData::from_json(body).unwrap();
        assert_eq!(data.account_types.labels, vec!["Savings", "ISA"]);
        assert_eq!(data.owners.values, vec![3000.0, 1000.5]);
        assert_eq!(data.dataset(ChartSlot::Institution).len(), 1);
        assert!(data.validate().is_ok());
    }

    #[test]
    fn test_decode_rejects_non_numeric_values() {
        let body = r#"{
            "account_types": {"labels": ["Savings"], "values": ["lots"]},
            "owners": {"labels": [], "values": []},
            "frns": {"labels": [], "values": []}
        }"#;

        assert!(matches!(ChartData::from_json(body), Err(ChartError::Decode(_))));
    }

    #[test]
    fn test_validate_length_mismatch() {
        let dataset = ChartDataset::new(vec!["a".into()], vec![1.0, 2.0]);
        let err = dataset.validate(ChartSlot::Owner).unwrap_err();
        assert!(matches!(
            err,
            ChartError::LengthMismatch { slot: ChartSlot::Owner, labels: 1, values: 2 }
        ));
    }

    #[test]
    fn test_validate_non_finite() {
        let dataset = ChartDataset::from_pairs([("x", 1.0), ("y", f64::NAN)]);
        assert!(matches!(
            dataset.validate(ChartSlot::Institution),
            Err(ChartError::NonFiniteValue { index: 1, .. })
        ));
    }

    #[test]
    fn test_from_pairs_preserves_order() {
        let dataset = ChartDataset::from_pairs([("z", 3.0), ("a", 1.0), ("m", 2.0)]);
        assert_eq!(dataset.labels, vec!["z", "a", "m"]);
        assert_eq!(dataset.values, vec![3.0, 1.0, 2.0]);
        assert_eq!(dataset.total(), 6.0);
    }

    #[test]
    fn test_label_at_out_of_range() {
        let dataset = ChartDataset::new(vec!["only".into()], vec![1.0, 2.0]);
        assert_eq!(dataset.label_at(0), "only");
        assert_eq!(dataset.label_at(1), "");
    }

    #[test]
    fn test_slot_kinds_are_fixed() {
        assert_eq!(ChartSlot::AccountType.kind(), ChartKind::Pie);
        assert_eq!(ChartSlot::Owner.kind(), ChartKind::Doughnut);
        assert_eq!(ChartSlot::Institution.kind(), ChartKind::Bar);
        assert!(ChartKind::Doughnut.is_circular());
        assert!(!ChartKind::Bar.is_circular());
    }
}
