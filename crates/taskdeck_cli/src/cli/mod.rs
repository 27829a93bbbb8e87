use clap::{Parser, Subcommand, ValueEnum};
use taskdeck_core::model::{Priority, TaskFilter, TaskSort};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Output JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Skip confirmation prompts for destructive commands
    #[arg(long, global = true)]
    pub yes: bool,

    /// Override the configured language (en, zh-tw)
    #[arg(long, global = true)]
    pub lang: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Add a new task
    ///
    /// Example: taskdeck add "Buy milk" --priority high --due 2026-09-01
    Add {
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long, value_enum, default_value_t = PriorityArg::Medium)]
        priority: PriorityArg,
        /// Due date (YYYY-MM-DD)
        #[arg(long)]
        due: Option<String>,
    },
    /// Edit a task's fields
    ///
    /// Example: taskdeck edit task-1 --title "Buy organic milk"
    Edit {
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long, value_enum)]
        priority: Option<PriorityArg>,
        /// Due date (YYYY-MM-DD)
        #[arg(long)]
        due: Option<String>,
        /// Remove the due date
        #[arg(long, conflicts_with = "due")]
        clear_due: bool,
    },
    /// Toggle a task between pending and completed
    ///
    /// Example: taskdeck toggle task-1
    Toggle {
        id: String,
    },
    /// Delete a task (asks for confirmation)
    ///
    /// Example: taskdeck delete task-1 --yes
    Delete {
        id: String,
    },
    /// Delete every task and erase stored data (asks for confirmation)
    Clear,
    /// List tasks
    ///
    /// Example: taskdeck list --filter pending --sort priority --search milk
    List {
        #[arg(long, value_enum, default_value_t = FilterArg::All)]
        filter: FilterArg,
        #[arg(long, value_enum, default_value_t = SortArg::Created)]
        sort: SortArg,
        #[arg(long, default_value = "")]
        search: String,
    },
    /// Export tasks to a dated JSON backup file
    ///
    /// Example: taskdeck export --dir ~/backups
    Export {
        /// Directory for the backup file (defaults to the current directory)
        #[arg(long)]
        dir: Option<String>,
    },
    /// Import tasks from a JSON backup file, replacing the current list
    ///
    /// Example: taskdeck import tasks-backup-2026-08-23.json
    Import {
        file: String,
    },
    /// Show stored-data information
    Info,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriorityArg {
    Low,
    Medium,
    High,
}

impl From<PriorityArg> for Priority {
    fn from(value: PriorityArg) -> Self {
        match value {
            PriorityArg::Low => Priority::Low,
            PriorityArg::Medium => Priority::Medium,
            PriorityArg::High => Priority::High,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterArg {
    All,
    Pending,
    Completed,
}

impl From<FilterArg> for TaskFilter {
    fn from(value: FilterArg) -> Self {
        match value {
            FilterArg::All => TaskFilter::All,
            FilterArg::Pending => TaskFilter::Pending,
            FilterArg::Completed => TaskFilter::Completed,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortArg {
    Created,
    Due,
    Priority,
    Title,
}

impl From<SortArg> for TaskSort {
    fn from(value: SortArg) -> Self {
        match value {
            SortArg::Created => TaskSort::CreatedAt,
            SortArg::Due => TaskSort::DueDate,
            SortArg::Priority => TaskSort::Priority,
            SortArg::Title => TaskSort::Title,
        }
    }
}
