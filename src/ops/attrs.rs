use indexmap::IndexMap;

use crate::model::config::Settings;
use crate::model::dimension::Dimension;
use crate::model::task::Task;

/// Count and notify state for one attribute value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize)]
pub struct AttributeValue {
    pub count: usize,
    /// True if any contributing task notifies; only meaningful for the
    /// due dimension.
    pub notify: bool,
}

/// Per-dimension mapping from display value to count/notify, in order of
/// first appearance. Built fresh from one Task collection on every run.
pub type AttributeIndex = IndexMap<Dimension, IndexMap<String, AttributeValue>>;

/// Build the attribute index over the unfiltered task universe, so
/// counts stay visible for values the filter set currently excludes.
/// Hidden tasks are left out unless `show_hidden`; completed tasks
/// unless `show_completed`. Existing entries are never pruned, even at
/// count zero, so the presentation layer can render them disabled.
pub fn aggregate(tasks: &[Task], settings: &Settings) -> AttributeIndex {
    let mut index: AttributeIndex = Dimension::ALL
        .iter()
        .map(|&dim| (dim, IndexMap::new()))
        .collect();

    for task in tasks {
        if task.hidden && !settings.show_hidden {
            continue;
        }
        if task.complete && !settings.show_completed {
            continue;
        }
        for (&dim, values) in index.iter_mut() {
            for value in dim.values(task) {
                let entry = values.entry(value).or_default();
                entry.count += 1;
                if dim == Dimension::Due && task.notify {
                    entry.notify = true;
                }
            }
        }
    }

    index
}
