use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::model::dimension::Dimension;

/// One persisted include/exclude rule for a single attribute value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Filter {
    pub value: String,
    #[serde(default)]
    pub exclude: bool,
}

/// Persisted filter rules, keyed by dimension (written to filters.json).
///
/// Invariant: at most one rule per (dimension, value) pair.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FilterSet {
    pub rules: IndexMap<Dimension, Vec<Filter>>,
}

impl FilterSet {
    /// The rules for one dimension, if any are set.
    pub fn rules_for(&self, dimension: Dimension) -> &[Filter] {
        self.rules.get(&dimension).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Look up the rule for a value: `None` if absent, otherwise the
    /// rule's exclude flag.
    pub fn state_of(&self, dimension: Dimension, value: &str) -> Option<bool> {
        self.rules_for(dimension)
            .iter()
            .find(|f| f.value == value)
            .map(|f| f.exclude)
    }

    pub fn is_empty(&self) -> bool {
        self.rules.values().all(Vec::is_empty)
    }
}
