use std::cmp::Ordering;

use crate::model::config::{Settings, SortKey};
use crate::model::dimension::Dimension;
use crate::model::task::Task;

/// Order a task collection by the compound sort keys, stably.
///
/// Keys are evaluated left to right; the first non-equal comparison
/// decides, and a total tie falls back to original id order. A key
/// naming an unknown dimension compares everything equal instead of
/// failing. With `file_sorting` set, the keys are bypassed entirely and
/// file order is preserved.
pub fn sort(tasks: &[Task], keys: &[SortKey], settings: &Settings) -> Vec<Task> {
    let mut sorted = tasks.to_vec();
    if settings.file_sorting {
        return sorted;
    }

    let dims: Vec<(Dimension, bool)> = keys
        .iter()
        .filter_map(|key| Dimension::from_key(&key.value).map(|d| (d, key.invert)))
        .collect();

    sorted.sort_by(|a, b| {
        for &(dim, invert) in &dims {
            let ord = compare_dimension(a, b, dim, invert);
            if ord != Ordering::Equal {
                return ord;
            }
        }
        a.id.cmp(&b.id)
    });
    sorted
}

fn compare_dimension(a: &Task, b: &Task, dim: Dimension, invert: bool) -> Ordering {
    match dim {
        Dimension::Priority => compare_present(a.priority, b.priority, invert),
        Dimension::Due => compare_present(a.due, b.due, invert),
        Dimension::Threshold => compare_present(a.t, b.t, invert),
        Dimension::Created => compare_present(a.created, b.created, invert),
        Dimension::Completed => compare_present(a.completed, b.completed, invert),
        Dimension::Projects => compare_present(joined(&a.projects), joined(&b.projects), invert),
        Dimension::Contexts => compare_present(joined(&a.contexts), joined(&b.contexts), invert),
        Dimension::Rec => compare_present(a.rec.clone(), b.rec.clone(), invert),
        Dimension::Pm => compare_present(a.pm.clone(), b.pm.clone(), invert),
    }
}

/// Absent values sort after present ones regardless of `invert`; the
/// flag reverses only the ordering among present values.
fn compare_present<T: Ord>(a: Option<T>, b: Option<T>, invert: bool) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(a), Some(b)) => {
            if invert {
                b.cmp(&a)
            } else {
                a.cmp(&b)
            }
        }
    }
}

/// Multi-valued dimensions compare as their comma-joined string; an
/// empty tag list counts as absent.
fn joined(values: &[String]) -> Option<String> {
    if values.is_empty() {
        None
    } else {
        Some(values.join(","))
    }
}
