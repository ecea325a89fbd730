use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single parsed todo.txt line with its derived attributes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Zero-based position among the non-blank lines of one build pass.
    /// Not stable across rebuilds if line ordering changes.
    pub id: usize,
    /// Task text with attribute tokens retained; the completion marker,
    /// priority, and creation/completion dates are stripped.
    pub body: String,
    /// Whether the line carries the `x ` completion marker.
    pub complete: bool,
    /// Priority letter from a leading `(A)`..`(Z)` marker.
    pub priority: Option<char>,
    /// Creation date, when present on the line.
    pub created: Option<NaiveDate>,
    /// Completion date; only meaningful when `complete` is true.
    pub completed: Option<NaiveDate>,
    /// `+project` tags, de-duplicated, in order of first appearance.
    pub projects: Vec<String>,
    /// `@context` tags, de-duplicated, in order of first appearance.
    pub contexts: Vec<String>,
    /// Resolved `due:` date.
    pub due: Option<NaiveDate>,
    /// Display form of the `due:` token (original phrasing, or the
    /// absolute date when relative-to-absolute conversion is on).
    pub due_string: Option<String>,
    /// Resolved `t:` threshold date.
    pub t: Option<NaiveDate>,
    /// Display form of the `t:` token.
    pub t_string: Option<String>,
    /// Due today or overdue (optionally within the configured future
    /// window) and not complete.
    pub notify: bool,
    /// `h:1` extension.
    pub hidden: bool,
    /// `pm:` progress marker extension.
    pub pm: Option<String>,
    /// `rec:` recurrence rule extension.
    pub rec: Option<String>,
    /// The verbatim source line, for re-display and copying.
    pub string: String,
}
