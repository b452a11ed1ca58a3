//! CLI definitions and entry point.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

pub mod commands;

/// Issue tracker with optimistic concurrency (`SQLite`)
#[derive(Parser, Debug)]
#[command(name = "dk", author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Database path (auto-discover .docket/*.db if not set)
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// `SQLite` busy timeout in ms
    #[arg(long, global = true)]
    pub lock_timeout: Option<u64>,

    /// Increase logging verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (no output except errors)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize a docket workspace
    Init {
        /// Overwrite existing DB
        #[arg(long)]
        force: bool,
    },

    /// Create a new issue
    Create(CreateArgs),

    /// List issues
    List(ListArgs),

    /// Show issue details
    Show {
        /// Issue ID
        id: i64,
    },

    /// Update an issue (guarded by the version you last saw)
    Update(UpdateArgs),

    /// Add or list comments
    Comment(CommentArgs),

    /// Manage labels
    Label {
        #[command(subcommand)]
        command: LabelCommands,
    },

    /// Set status on many issues in one transaction
    BulkStatus(BulkStatusArgs),

    /// Manage users
    User {
        #[command(subcommand)]
        command: UserCommands,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Args, Debug, Default)]
pub struct CreateArgs {
    /// Issue title
    pub title: String,

    /// Description
    #[arg(long, short = 'd')]
    pub description: Option<String>,

    /// Initial status (configured default when omitted)
    #[arg(long, short = 's')]
    pub status: Option<String>,

    /// Assign to user ID
    #[arg(long, short = 'a')]
    pub assignee: Option<i64>,

    /// Labels (comma-separated)
    #[arg(long, short = 'l', value_delimiter = ',')]
    pub labels: Vec<String>,

    /// Output only issue ID
    #[arg(long)]
    pub silent: bool,
}

#[derive(Args, Debug, Default)]
pub struct ListArgs {
    /// Filter by status (comma-separated)
    #[arg(long, short = 's', value_delimiter = ',')]
    pub status: Vec<String>,

    /// Filter by assignee user ID
    #[arg(long, short = 'a')]
    pub assignee: Option<i64>,

    /// Only unassigned issues
    #[arg(long, conflicts_with = "assignee")]
    pub unassigned: bool,

    /// Filter by label
    #[arg(long, short = 'l')]
    pub label: Option<String>,

    /// Filter by title substring
    #[arg(long)]
    pub title_contains: Option<String>,

    /// Limit number of results
    #[arg(long, short = 'n')]
    pub limit: Option<usize>,

    /// Sort field (created, updated, title, id)
    #[arg(long)]
    pub sort: Option<String>,

    /// Reverse sort order
    #[arg(long, short = 'r')]
    pub reverse: bool,
}

#[derive(Args, Debug, Default)]
pub struct UpdateArgs {
    /// Issue ID
    pub id: i64,

    /// Version the caller last observed
    #[arg(long, value_name = "N")]
    pub expect_version: i64,

    /// Update title
    #[arg(long)]
    pub title: Option<String>,

    /// Update description (empty string clears)
    #[arg(long, visible_alias = "body")]
    pub description: Option<String>,

    /// Clear the description
    #[arg(long, conflicts_with = "description")]
    pub clear_description: bool,

    /// Change status
    #[arg(long, short = 's')]
    pub status: Option<String>,

    /// Assign to user ID
    #[arg(long, short = 'a')]
    pub assignee: Option<i64>,

    /// Clear the assignee
    #[arg(long, conflicts_with = "assignee")]
    pub unassign: bool,
}

#[derive(Args, Debug, Default)]
pub struct CommentArgs {
    /// Issue ID
    pub id: i64,

    /// Comment text (omit to list existing comments)
    pub body: Option<String>,

    /// Author user ID
    #[arg(long, short = 'a')]
    pub author: Option<i64>,
}

#[derive(Subcommand, Debug)]
pub enum LabelCommands {
    /// Replace the full label set on an issue
    Set(LabelSetArgs),
    /// List labels for an issue, or all labels with counts
    List(LabelListArgs),
}

#[derive(Args, Debug, Default)]
pub struct LabelSetArgs {
    /// Issue ID
    pub id: i64,

    /// Label names (comma-separated; none clears all labels)
    #[arg(value_delimiter = ',')]
    pub labels: Vec<String>,
}

#[derive(Args, Debug, Default)]
pub struct LabelListArgs {
    /// Issue ID (omit for project-wide label counts)
    pub id: Option<i64>,
}

#[derive(Args, Debug, Default)]
pub struct BulkStatusArgs {
    /// Issue IDs, processed in the order given
    #[arg(required = true)]
    pub ids: Vec<i64>,

    /// Status to apply
    #[arg(long, short = 's')]
    pub status: String,
}

#[derive(Subcommand, Debug)]
pub enum UserCommands {
    /// Register a new user
    Add(UserAddArgs),
    /// List all users
    List,
}

#[derive(Args, Debug, Default)]
pub struct UserAddArgs {
    /// Display name
    #[arg(long, short = 'n')]
    pub name: String,

    /// Email address (must be unique)
    #[arg(long, short = 'e')]
    pub email: String,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Print a config value from the merged view
    Get {
        /// Config key
        key: String,
    },
    /// Store a runtime config value in the database
    Set {
        /// Config key
        key: String,

        /// Value to store
        value: String,
    },
    /// Show the merged configuration with sources
    List,
}
