use std::collections::HashSet;

use chrono::NaiveDate;

/// One reminder handed to the OS-notification collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationRequest {
    /// Task id within the build pass that produced the request.
    pub id: usize,
    pub title: String,
    pub body: String,
}

/// One-shot reminder scheduling for due tasks.
///
/// Keyed by (task body, due date) so a given task fires at most once per
/// process lifetime per due date, even across pipeline runs. This set is
/// the only state in the core that outlives a single run.
#[derive(Debug, Default)]
pub struct NotificationScheduler {
    seen: HashSet<(String, NaiveDate)>,
    pending: Vec<NotificationRequest>,
}

impl NotificationScheduler {
    pub fn new() -> Self {
        NotificationScheduler::default()
    }

    /// Register a reminder for a due task. A repeat of an already-seen
    /// (body, due) pair is a no-op.
    pub fn schedule(&mut self, id: usize, due: NaiveDate, body: &str, today: NaiveDate) {
        let key = (body.to_string(), due);
        if self.seen.contains(&key) {
            return;
        }
        self.seen.insert(key);
        self.pending.push(NotificationRequest {
            id,
            title: title_for(due, today),
            body: body.to_string(),
        });
    }

    /// Drain the requests queued since the last call. Fire-and-forget:
    /// the caller hands these to the OS collaborator.
    pub fn take_pending(&mut self) -> Vec<NotificationRequest> {
        std::mem::take(&mut self.pending)
    }
}

fn title_for(due: NaiveDate, today: NaiveDate) -> String {
    let days = (due - today).num_days();
    match days {
        ..=-1 => "Overdue".to_string(),
        0 => "Due today".to_string(),
        1 => "Due tomorrow".to_string(),
        n => format!("Due in {n} days"),
    }
}
