use serde::Serialize;

use crate::model::filter::FilterSet;
use crate::model::task::Task;
use crate::ops::pipeline::Snapshot;

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct SnapshotJson<'a> {
    pub tasks: &'a [Task],
    pub attributes: AttributesJson<'a>,
    pub headers: &'a indexmap::IndexMap<&'static str, &'static str>,
    pub filters: &'a FilterSet,
    pub badge: usize,
}

#[derive(Serialize)]
pub struct AttributesJson<'a> {
    #[serde(flatten)]
    pub dimensions: indexmap::IndexMap<
        &'static str,
        &'a indexmap::IndexMap<String, crate::ops::attrs::AttributeValue>,
    >,
}

pub fn snapshot_json(snapshot: &Snapshot) -> SnapshotJson<'_> {
    SnapshotJson {
        tasks: &snapshot.tasks,
        attributes: AttributesJson {
            dimensions: snapshot
                .attributes
                .iter()
                .map(|(dim, values)| (dim.as_str(), values))
                .collect(),
        },
        headers: &snapshot.headers,
        filters: &snapshot.filters,
        badge: snapshot.badge,
    }
}

// ---------------------------------------------------------------------------
// Plain text output
// ---------------------------------------------------------------------------

/// Print the task view, one verbatim line per task with a notify marker.
pub fn print_snapshot(snapshot: &Snapshot) {
    for task in &snapshot.tasks {
        let marker = if task.notify { "!" } else { " " };
        println!("{:>4} {} {}", task.id, marker, task.string);
    }
    if snapshot.badge > 0 {
        println!("\n{} task(s) need attention", snapshot.badge);
    }
    for request in &snapshot.notifications {
        println!("reminder: {} - {}", request.title, request.body);
    }
}

/// Print the attribute index grouped by dimension, skipping empty ones.
pub fn print_attributes(snapshot: &Snapshot) {
    for (dim, values) in &snapshot.attributes {
        if values.is_empty() {
            continue;
        }
        println!("{}:", snapshot.headers[dim.as_str()]);
        for (value, attr) in values {
            let state = match snapshot.filters.state_of(*dim, value) {
                Some(true) => " [excluded]",
                Some(false) => " [selected]",
                None => "",
            };
            let notify = if attr.notify { " !" } else { "" };
            println!("  {} ({}){}{}", value, attr.count, state, notify);
        }
    }
}
