use serde::{Deserialize, Serialize};

use crate::model::task::Task;

/// One axis of attribute aggregation, filtering, and sorting.
///
/// The serialized names match the keys used in the persisted filter and
/// sorting state (`priority`, `projects`, ..., with `t` for the threshold
/// dimension).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dimension {
    Priority,
    Projects,
    Contexts,
    Due,
    #[serde(rename = "t")]
    Threshold,
    Rec,
    Pm,
    Created,
    Completed,
}

impl Dimension {
    /// All dimensions, in the order the attribute drawer presents them.
    pub const ALL: [Dimension; 9] = [
        Dimension::Priority,
        Dimension::Projects,
        Dimension::Contexts,
        Dimension::Due,
        Dimension::Threshold,
        Dimension::Rec,
        Dimension::Pm,
        Dimension::Created,
        Dimension::Completed,
    ];

    /// The stable key used in persisted filter/sort state.
    pub fn as_str(self) -> &'static str {
        match self {
            Dimension::Priority => "priority",
            Dimension::Projects => "projects",
            Dimension::Contexts => "contexts",
            Dimension::Due => "due",
            Dimension::Threshold => "t",
            Dimension::Rec => "rec",
            Dimension::Pm => "pm",
            Dimension::Created => "created",
            Dimension::Completed => "completed",
        }
    }

    /// Human-readable label for the presentation layer.
    pub fn display_name(self) -> &'static str {
        match self {
            Dimension::Priority => "Priority",
            Dimension::Projects => "Projects",
            Dimension::Contexts => "Contexts",
            Dimension::Due => "Due",
            Dimension::Threshold => "Threshold",
            Dimension::Rec => "Recurrence",
            Dimension::Pm => "Progress",
            Dimension::Created => "Created",
            Dimension::Completed => "Completed",
        }
    }

    /// Resolve a persisted key back to a dimension. Unknown keys yield
    /// `None`; callers treat those as no-ops rather than errors.
    pub fn from_key(key: &str) -> Option<Dimension> {
        Dimension::ALL.iter().copied().find(|d| d.as_str() == key)
    }

    /// The display values a task exhibits in this dimension. Multi-valued
    /// dimensions (projects, contexts) yield one entry per tag; absent
    /// attributes yield none.
    pub fn values(self, task: &Task) -> Vec<String> {
        match self {
            Dimension::Priority => task.priority.iter().map(|p| p.to_string()).collect(),
            Dimension::Projects => task.projects.clone(),
            Dimension::Contexts => task.contexts.clone(),
            Dimension::Due => task.due.iter().map(|d| d.to_string()).collect(),
            Dimension::Threshold => task.t.iter().map(|d| d.to_string()).collect(),
            Dimension::Rec => task.rec.iter().cloned().collect(),
            Dimension::Pm => task.pm.iter().cloned().collect(),
            Dimension::Created => task.created.iter().map(|d| d.to_string()).collect(),
            Dimension::Completed => task.completed.iter().map(|d| d.to_string()).collect(),
        }
    }
}
