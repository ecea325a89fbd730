use indexmap::IndexMap;

use crate::model::config::Settings;
use crate::model::filter::FilterSet;
use crate::model::task::Task;
use crate::ops::attrs::{self, AttributeIndex};
use crate::ops::build::{BuildContext, build};
use crate::ops::filter;
use crate::ops::notify::NotificationRequest;
use crate::ops::sort;
use crate::parse::task_parser::SkipReason;

/// The result of one pipeline run, handed to the presentation layer.
/// Everything here is rebuilt wholesale; nothing carries over between
/// runs except the scheduler state inside [`BuildContext`].
#[derive(Debug)]
pub struct Snapshot {
    /// The filtered, sorted view.
    pub tasks: Vec<Task>,
    /// Attribute index over the unfiltered universe.
    pub attributes: AttributeIndex,
    /// Dimension key to human-readable label, for the attribute drawer.
    pub headers: IndexMap<&'static str, &'static str>,
    /// Echo of the filter rules the view was produced with.
    pub filters: FilterSet,
    /// Published to the OS-badge collaborator after the run.
    pub badge: usize,
    /// Reminders to dispatch; empty for (task, due) pairs already fired
    /// this process.
    pub notifications: Vec<NotificationRequest>,
    /// Lines that failed to parse, with the id slot each consumed.
    pub skipped: Vec<(usize, SkipReason)>,
}

/// Run the full ingestion → enrichment → aggregation → filter → sort
/// pipeline over already-materialized file contents.
///
/// Synchronous and free of I/O; the caller serializes runs, so the
/// published snapshot always reflects one input state.
pub fn run(
    file_contents: &[String],
    filters: &FilterSet,
    settings: &Settings,
    ctx: &mut BuildContext,
) -> Snapshot {
    let outcome = build(file_contents, settings, ctx);
    let attributes = attrs::aggregate(&outcome.tasks, settings);
    let visible = filter::apply(&outcome.tasks, filters, settings);
    let sorted = sort::sort(&visible, &settings.sorting, settings);

    Snapshot {
        tasks: sorted,
        attributes,
        headers: header_mapping(),
        filters: filters.clone(),
        badge: ctx.badge,
        notifications: ctx.notifier.take_pending(),
        skipped: outcome.skipped,
    }
}

fn header_mapping() -> IndexMap<&'static str, &'static str> {
    crate::model::dimension::Dimension::ALL
        .iter()
        .map(|d| (d.as_str(), d.display_name()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::dimension::Dimension;
    use crate::ops::filter::toggle;
    use pretty_assertions::assert_eq;

    fn run_once(source: &str, filters: &FilterSet, settings: &Settings) -> Snapshot {
        let mut ctx = BuildContext::new("2025-01-02".parse().unwrap());
        run(&[source.to_string()], filters, settings, &mut ctx)
    }

    #[test]
    fn snapshot_carries_view_attributes_and_badge() {
        let source = "(A) Buy milk due:2025-01-01 +errands @home\nx 2025-01-01 2024-12-20 Buy milk\nidle task";
        let snapshot = run_once(source, &FilterSet::default(), &Settings::default());

        assert_eq!(snapshot.tasks.len(), 3);
        assert_eq!(snapshot.badge, 1);
        assert_eq!(snapshot.notifications.len(), 1);
        assert_eq!(snapshot.headers["t"], "Threshold");
        assert_eq!(snapshot.attributes[&Dimension::Projects]["errands"].count, 1);
        // default sort puts the prioritized task first
        assert_eq!(snapshot.tasks[0].priority, Some('A'));
    }

    #[test]
    fn attributes_reflect_unfiltered_universe() {
        let mut filters = FilterSet::default();
        toggle(&mut filters, Dimension::Projects, "home", false);
        let snapshot = run_once("a +home\nb +garden", &filters, &Settings::default());

        assert_eq!(snapshot.tasks.len(), 1);
        assert_eq!(snapshot.attributes[&Dimension::Projects]["garden"].count, 1);
        assert_eq!(snapshot.filters, filters);
    }

    #[test]
    fn reruns_do_not_redispatch_notifications() {
        let mut ctx = BuildContext::new("2025-01-02".parse().unwrap());
        let source = ["pay rent due:2025-01-01".to_string()];
        let settings = Settings::default();
        let filters = FilterSet::default();

        let first = run(&source, &filters, &settings, &mut ctx);
        assert_eq!(first.notifications.len(), 1);
        assert_eq!(first.badge, 1);

        let second = run(&source, &filters, &settings, &mut ctx);
        assert!(second.notifications.is_empty());
        assert_eq!(second.badge, 1);
    }
}
