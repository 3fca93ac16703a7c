//! Per-panel summary statistics.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A small mapping from statistic name to scalar, returned by panel
/// renderers alongside the drawn panel.
///
/// Summaries are plain values with no identity: cheap to clone, ordered
/// by statistic name, and serializable for downstream reporting.
///
/// # Example
///
/// ```
/// use conil_traits::PanelSummary;
///
/// let mut summary = PanelSummary::new();
/// summary.set("ic_mean", 0.034);
/// summary.set("ic_std", 0.12);
///
/// assert_eq!(summary.get("ic_mean"), Some(0.034));
/// assert_eq!(summary.get("ir"), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PanelSummary(BTreeMap<String, f64>);

impl PanelSummary {
    /// Creates an empty summary.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a statistic, replacing any previous value under the same name.
    pub fn set(&mut self, name: &str, value: f64) {
        self.0.insert(name.to_string(), value);
    }

    /// Looks up a statistic by name.
    pub fn get(&self, name: &str) -> Option<f64> {
        self.0.get(name).copied()
    }

    /// Iterates over (name, value) pairs in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Number of recorded statistics.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns whether no statistics have been recorded.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
