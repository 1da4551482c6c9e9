use crate::types::{LogLevel, OutputFormat};
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "battlecards")]
#[command(about = "Browse and edit competitive battle cards", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Workspace directory (defaults to $BATTLECARDS_PATH, then the system data dir)
    #[arg(long, global = true)]
    pub data_dir: Option<String>,

    #[arg(long, default_value = "plain", global = true)]
    pub format: OutputFormat,

    #[arg(long, default_value = "warn", global = true)]
    pub log_level: LogLevel,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Interactive terminal UI (the default)
    Browse,

    /// Print the rendered cards
    Show {
        /// Card to show (defaults to the first card)
        #[arg(long)]
        card: Option<String>,

        /// Sub-tab of the card to show
        #[arg(long)]
        tab: Option<String>,

        /// Expand a row of the shown tab; repeatable
        #[arg(long, value_name = "ROW")]
        expand: Vec<usize>,
    },

    /// Print the JSON value stored at a path
    Get {
        /// e.g. acme-cloud.tabs[0].content[1].row[2]
        path: String,
    },

    /// Change the document (requires the edit password)
    Edit {
        #[arg(long, env = "BATTLECARDS_PASSWORD", hide_env_values = true)]
        password: Option<String>,

        #[command(subcommand)]
        command: EditCommand,
    },

    /// Clear saved data so the next start loads the seed again
    Reset {
        #[arg(long)]
        yes: bool,
    },

    /// Write a default config.toml into the workspace
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },

    /// Print the effective configuration
    Config,
}

#[derive(Subcommand)]
pub enum EditCommand {
    /// Replace the value at a path
    Set {
        path: String,
        value: String,

        /// Parse VALUE as JSON instead of taking it as text
        #[arg(long)]
        json: bool,
    },

    /// Remove the card, tab, row or detail at a path
    Delete {
        path: String,

        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },

    AddCard {
        title: String,
    },

    AddTab {
        card: String,
        title: String,
    },

    /// Add a column to the tab at TAB_PATH, e.g. acme-cloud.tabs[0]
    AddColumn {
        tab_path: String,
        header: String,
    },

    /// Append a row to CONTENT_PATH, e.g. acme-cloud.tabs[0].content
    AddRow {
        content_path: String,
    },

    /// Append a detail bullet to DETAILS_PATH, e.g. acme-cloud.tabs[0].content[1].details
    AddDetail {
        details_path: String,
    },
}
