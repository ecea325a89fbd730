use crate::model::config::Settings;
use crate::model::dimension::Dimension;
use crate::model::filter::{Filter, FilterSet};
use crate::model::task::Task;

/// Apply the persisted filter rules plus the visibility gates.
///
/// Within one dimension, include rules are OR'd (any included value
/// keeps the task) and exclude rules drop the task on any match. Across
/// dimensions the predicates AND together. Filtering never invents
/// tasks and is idempotent.
pub fn apply(tasks: &[Task], filters: &FilterSet, settings: &Settings) -> Vec<Task> {
    tasks
        .iter()
        .filter(|task| is_visible(task, filters, settings))
        .cloned()
        .collect()
}

fn is_visible(task: &Task, filters: &FilterSet, settings: &Settings) -> bool {
    if task.complete && !settings.show_completed {
        return false;
    }
    if task.hidden && !settings.show_hidden {
        return false;
    }

    for (&dimension, rules) in &filters.rules {
        let values = dimension.values(task);

        if rules
            .iter()
            .filter(|r| r.exclude)
            .any(|r| values.iter().any(|v| *v == r.value))
        {
            return false;
        }

        let includes: Vec<&Filter> = rules.iter().filter(|r| !r.exclude).collect();
        if !includes.is_empty()
            && !includes.iter().any(|r| values.iter().any(|v| *v == r.value))
        {
            return false;
        }
    }

    true
}

/// Cycle the rule state for one attribute value: absent becomes an
/// include (or an exclude when the exclusive modifier is held), an
/// include under the modifier becomes an exclude, and any present rule
/// clicked plainly is removed.
///
/// A comma-joined composite value is split into its atomic values first;
/// each atom is toggled independently and empty atoms are ignored.
pub fn toggle(filters: &mut FilterSet, dimension: Dimension, value: &str, exclusive: bool) {
    for atom in value.split(',') {
        let atom = atom.trim();
        if atom.is_empty() {
            continue;
        }
        toggle_single(filters, dimension, atom, exclusive);
    }
}

fn toggle_single(filters: &mut FilterSet, dimension: Dimension, value: &str, exclusive: bool) {
    let rules = filters.rules.entry(dimension).or_default();

    match rules.iter().position(|f| f.value == value) {
        None => rules.push(Filter {
            value: value.to_string(),
            exclude: exclusive,
        }),
        Some(idx) if exclusive && !rules[idx].exclude => rules[idx].exclude = true,
        Some(idx) => {
            rules.remove(idx);
        }
    }

    if rules.is_empty() {
        filters.rules.shift_remove(&dimension);
    }
}
