use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// One entry in the task-file list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceFile {
    pub path: PathBuf,
    /// Whether this file contributes to the current view.
    #[serde(default)]
    pub active: bool,
}

/// One key of the compound sort order, evaluated left to right.
///
/// `value` is a persisted dimension key; an unknown key is tolerated and
/// compares everything as equal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortKey {
    pub id: String,
    pub value: String,
    #[serde(default)]
    pub invert: bool,
}

/// Configuration from config.toml.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Default: completed tasks stay visible.
    #[serde(default = "default_true")]
    pub show_completed: bool,
    /// Default: `h:1` tasks stay visible.
    #[serde(default = "default_true")]
    pub show_hidden: bool,
    /// Insert today's date as creation date when adding a task.
    #[serde(default)]
    pub append_creation_date: bool,
    /// Keep tasks in file order instead of applying the sort keys.
    #[serde(default)]
    pub file_sorting: bool,
    /// Show relative date tokens as resolved absolute dates.
    #[serde(default = "default_true")]
    pub convert_relative_to_absolute_dates: bool,
    /// Notify on threshold dates up to `future_window_days` ahead.
    #[serde(default = "default_true")]
    pub threshold_date_in_the_future: bool,
    /// Notify on due dates up to `future_window_days` ahead.
    #[serde(default = "default_true")]
    pub due_date_in_the_future: bool,
    /// Size of the look-ahead window, in days, boundary inclusive.
    #[serde(default = "default_future_window_days")]
    pub future_window_days: i64,
    // Table-valued fields stay last so the settings serialize cleanly
    // back to TOML.
    #[serde(default)]
    pub files: Vec<SourceFile>,
    #[serde(default = "default_sorting")]
    pub sorting: Vec<SortKey>,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            show_completed: true,
            show_hidden: true,
            append_creation_date: false,
            file_sorting: false,
            convert_relative_to_absolute_dates: true,
            threshold_date_in_the_future: true,
            due_date_in_the_future: true,
            future_window_days: default_future_window_days(),
            files: Vec::new(),
            sorting: default_sorting(),
        }
    }
}

impl Settings {
    /// The files contributing to the current view, in list order.
    pub fn active_files(&self) -> impl Iterator<Item = &SourceFile> {
        self.files.iter().filter(|f| f.active)
    }
}

fn default_true() -> bool {
    true
}

fn default_future_window_days() -> i64 {
    7
}

fn default_sorting() -> Vec<SortKey> {
    ["priority", "projects", "contexts", "due", "t", "completed", "created"]
        .iter()
        .enumerate()
        .map(|(i, value)| SortKey {
            id: (i + 1).to_string(),
            value: value.to_string(),
            invert: false,
        })
        .collect()
}
