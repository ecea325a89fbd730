use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "sift", about = concat!("sift v", env!("CARGO_PKG_VERSION"), " - your todo.txt, filtered and sorted"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Use a different config directory (default: ~/.config/sift)
    #[arg(short = 'C', long = "config-dir", global = true)]
    pub config_dir: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the filtered, sorted task view
    List(ListArgs),
    /// Add a task line to the active file
    Add(AddArgs),
    /// Toggle a filter value (include -> exclude -> off)
    Filter(FilterArgs),
    /// Show or change the sort order
    Sort(SortArgs),
    /// Show or change settings
    Config(ConfigArgs),
    /// Manage the task file list
    File(FileCmd),
}

#[derive(Args)]
pub struct ListArgs {
    /// Ignore persisted filters for this run
    #[arg(long)]
    pub no_filters: bool,
    /// Show the attribute index (per-value counts) instead of tasks
    #[arg(short = 'a', long)]
    pub attributes: bool,
}

#[derive(Args)]
pub struct AddArgs {
    /// The task line, todo.txt syntax
    pub text: String,
}

#[derive(Args)]
pub struct FilterArgs {
    /// Dimension key (priority, projects, contexts, due, t, rec, pm,
    /// created, completed)
    pub dimension: Option<String>,
    /// Attribute value; comma-joined composites toggle each atom
    pub value: Option<String>,
    /// Toggle with the exclusive modifier (select -> exclude)
    #[arg(short = 'x', long)]
    pub exclude: bool,
    /// Remove all filter rules
    #[arg(long, conflicts_with_all = ["dimension", "value"])]
    pub clear: bool,
}

#[derive(Args)]
pub struct SortArgs {
    /// Dimension key to move to the front of the sort order
    pub dimension: Option<String>,
    /// Invert that dimension's ordering
    #[arg(long)]
    pub invert: bool,
    /// Restore the default sort order
    #[arg(long, conflicts_with = "dimension")]
    pub reset: bool,
}

#[derive(Args)]
pub struct ConfigArgs {
    /// Option name; omit to show all
    pub key: Option<String>,
    /// New value (true/false, or days for future_window_days)
    pub value: Option<String>,
}

#[derive(Args)]
pub struct FileCmd {
    #[command(subcommand)]
    pub action: FileAction,
}

#[derive(Subcommand)]
pub enum FileAction {
    /// Add a todo.txt file and make it active
    Add { path: String },
    /// Remove a file from the list by index
    Remove { index: usize },
    /// Make the file at the given index the active one
    Use { index: usize },
    /// List the configured files
    List,
}
