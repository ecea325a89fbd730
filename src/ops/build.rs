use chrono::NaiveDate;

use crate::model::config::Settings;
use crate::model::task::Task;
use crate::ops::notify::NotificationScheduler;
use crate::parse::dates::{DateConfig, extract_speaking_dates};
use crate::parse::task_parser::{self, SkipReason};

/// Per-process pipeline state threaded through build passes: the badge
/// counter and the notification scheduler. Everything else is rebuilt
/// from scratch each run.
#[derive(Debug)]
pub struct BuildContext {
    /// Local calendar day the pass resolves dates against.
    pub today: NaiveDate,
    /// Count of notify-eligible incomplete tasks; reset every pass and
    /// published to the OS-badge collaborator after the batch.
    pub badge: usize,
    pub notifier: NotificationScheduler,
}

impl BuildContext {
    pub fn new(today: NaiveDate) -> Self {
        BuildContext {
            today,
            badge: 0,
            notifier: NotificationScheduler::new(),
        }
    }
}

/// The result of one build pass. Skipped lines are reported with their
/// consumed id slot so tests can assert on the failure path.
#[derive(Debug, Default)]
pub struct BuildOutcome {
    pub tasks: Vec<Task>,
    pub skipped: Vec<(usize, SkipReason)>,
}

/// Parse and enrich all active file contents into one ordered Task
/// collection.
///
/// Contents are concatenated in file-list order and split on CR, LF, or
/// CRLF. Blank and whitespace-only lines are discarded before ids are
/// assigned; a line that fails to parse consumes its id slot but is
/// dropped from the collection without aborting the batch.
pub fn build(file_contents: &[String], settings: &Settings, ctx: &mut BuildContext) -> BuildOutcome {
    let date_config = DateConfig::from_settings(settings);
    let mut outcome = BuildOutcome::default();
    ctx.badge = 0;

    let lines = file_contents
        .iter()
        .flat_map(|content| content.split(['\r', '\n']))
        .filter(|line| !line.trim().is_empty());

    for (id, line) in lines.enumerate() {
        match make_task(id, line, &date_config, ctx) {
            Ok(task) => outcome.tasks.push(task),
            Err(reason) => outcome.skipped.push((id, reason)),
        }
    }

    outcome
}

fn make_task(
    id: usize,
    line: &str,
    date_config: &DateConfig,
    ctx: &mut BuildContext,
) -> Result<Task, SkipReason> {
    let parsed = task_parser::parse(line)?;
    let dates = extract_speaking_dates(&parsed.body, ctx.today, date_config);

    let hidden = parsed.extension("h") == Some("1");
    let pm = parsed.extension("pm").map(str::to_string);
    let rec = parsed.extension("rec").map(str::to_string);

    let (due, due_string, due_notify) = match dates.due {
        Some(d) => (Some(d.date), Some(d.string), d.notify),
        None => (None, None, false),
    };
    let (t, t_string) = match dates.t {
        Some(d) => (Some(d.date), Some(d.string)),
        None => (None, None),
    };

    let notify = due_notify && !parsed.complete;
    if notify {
        ctx.badge += 1;
        if let Some(due) = due {
            ctx.notifier.schedule(id, due, &parsed.body, ctx.today);
        }
    }

    Ok(Task {
        id,
        body: parsed.body,
        complete: parsed.complete,
        priority: parsed.priority,
        created: parsed.created,
        completed: parsed.completed,
        projects: parsed.projects,
        contexts: parsed.contexts,
        due,
        due_string,
        t,
        t_string,
        notify,
        hidden,
        pm,
        rec,
        string: line.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn day(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn contents(s: &str) -> Vec<String> {
        vec![s.to_string()]
    }

    #[test]
    fn due_yesterday_notifies_and_bumps_badge() {
        let mut ctx = BuildContext::new(day("2025-01-02"));
        let outcome = build(
            &contents("(A) Buy milk due:2025-01-01 +errands @home"),
            &Settings::default(),
            &mut ctx,
        );

        let task = &outcome.tasks[0];
        assert_eq!(task.priority, Some('A'));
        assert!(task.body.contains("Buy milk"));
        assert_eq!(task.due, Some(day("2025-01-01")));
        assert!(task.notify);
        assert_eq!(task.projects, vec!["errands"]);
        assert_eq!(task.contexts, vec!["home"]);
        assert!(!task.complete);
        assert_eq!(ctx.badge, 1);
        assert_eq!(ctx.notifier.take_pending().len(), 1);
    }

    #[test]
    fn completed_task_never_notifies() {
        let mut ctx = BuildContext::new(day("2025-01-02"));
        let outcome = build(
            &contents("x 2025-01-01 2024-12-20 Buy milk due:2025-01-01"),
            &Settings::default(),
            &mut ctx,
        );

        let task = &outcome.tasks[0];
        assert!(task.complete);
        assert_eq!(task.completed, Some(day("2025-01-01")));
        assert_eq!(task.created, Some(day("2024-12-20")));
        assert!(!task.notify);
        assert_eq!(ctx.badge, 0);
        assert!(ctx.notifier.take_pending().is_empty());
    }

    #[test]
    fn blank_lines_do_not_consume_id_slots() {
        let mut ctx = BuildContext::new(day("2025-01-02"));
        let outcome = build(
            &contents("first\n\n   \r\nsecond\r\nthird\n"),
            &Settings::default(),
            &mut ctx,
        );

        let ids: Vec<usize> = outcome.tasks.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![0, 1, 2]);
        assert_eq!(outcome.tasks[1].body, "second");
    }

    #[test]
    fn files_concatenate_in_list_order() {
        let mut ctx = BuildContext::new(day("2025-01-02"));
        let outcome = build(
            &["alpha\nbravo".to_string(), "charlie".to_string()],
            &Settings::default(),
            &mut ctx,
        );

        let bodies: Vec<&str> = outcome.tasks.iter().map(|t| t.body.as_str()).collect();
        assert_eq!(bodies, vec!["alpha", "bravo", "charlie"]);
        assert_eq!(outcome.tasks[2].id, 2);
    }

    #[test]
    fn unparsable_line_consumes_its_slot_but_is_dropped() {
        let mut ctx = BuildContext::new(day("2025-01-02"));
        let outcome = build(
            &contents("first\nx 2025-01-01\nlast"),
            &Settings::default(),
            &mut ctx,
        );

        assert_eq!(outcome.tasks.len(), 2);
        assert_eq!(outcome.skipped, vec![(1, SkipReason::EmptyBody)]);
        assert_eq!(outcome.tasks[1].id, 2);
        assert_eq!(ctx.badge, 0);
    }

    #[test]
    fn badge_resets_between_passes() {
        let mut ctx = BuildContext::new(day("2025-01-02"));
        let source = contents("pay rent due:2025-01-01");
        build(&source, &Settings::default(), &mut ctx);
        assert_eq!(ctx.badge, 1);

        build(&contents("nothing due here"), &Settings::default(), &mut ctx);
        assert_eq!(ctx.badge, 0);

        // same pair again: badge counts it, scheduler stays quiet
        ctx.notifier.take_pending();
        build(&source, &Settings::default(), &mut ctx);
        assert_eq!(ctx.badge, 1);
        assert!(ctx.notifier.take_pending().is_empty());
    }

    #[test]
    fn verbatim_line_is_preserved() {
        let mut ctx = BuildContext::new(day("2025-01-02"));
        let line = "(B) 2024-12-01 write letter @desk";
        let outcome = build(&contents(line), &Settings::default(), &mut ctx);
        assert_eq!(outcome.tasks[0].string, line);
    }

    #[test]
    fn hidden_and_extension_markers() {
        let mut ctx = BuildContext::new(day("2025-01-02"));
        let outcome = build(
            &contents("water plants rec:1w pm:60 h:1"),
            &Settings::default(),
            &mut ctx,
        );

        let task = &outcome.tasks[0];
        assert!(task.hidden);
        assert_eq!(task.rec.as_deref(), Some("1w"));
        assert_eq!(task.pm.as_deref(), Some("60"));
    }
}
