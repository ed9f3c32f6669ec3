use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// WasteWatch gamification engine admin tool.
#[derive(Parser, Debug)]
#[command(name = "wastewatch")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// SQLite database file
    #[arg(long = "database", env = "WASTEWATCH_DATABASE_PATH")]
    pub database: Option<PathBuf>,

    /// Directory for rolling log files
    #[arg(long = "log-dir", env = "WASTEWATCH_LOG_DIR")]
    pub log_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Insert missing badges from the built-in catalog or a JSON file
    Seed {
        #[arg(long)]
        catalog: Option<PathBuf>,
    },

    /// List catalog badges
    Catalog {
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        rarity: Option<String>,
        /// Include inactive badges
        #[arg(long)]
        all: bool,
    },

    /// Activate or deactivate a badge
    SetBadgeActive {
        badge_id: String,
        #[arg(long, action = clap::ArgAction::Set)]
        active: bool,
    },

    /// Re-evaluate every active badge for a user
    Check { user_id: String },

    /// A user's badge progress
    Badges {
        user_id: String,
        #[arg(long)]
        completed_only: bool,
        #[arg(long)]
        page: Option<u32>,
        #[arg(long)]
        limit: Option<u32>,
    },

    Profile { user_id: String },

    Stats {
        user_id: String,
        #[arg(long, default_value = "all_time")]
        period: String,
    },

    Leaderboard {
        #[arg(long = "type", default_value = "points")]
        leaderboard_type: String,
        #[arg(long, default_value = "all_time")]
        period: String,
        #[arg(long)]
        limit: Option<u32>,
        #[arg(long)]
        page: Option<u32>,
    },

    Rank {
        user_id: String,
        #[arg(long = "type", default_value = "points")]
        leaderboard_type: String,
        #[arg(long, default_value = "all_time")]
        period: String,
    },

    /// Today's challenges; completed ones are rewarded
    Challenges { user_id: String },

    Level { points: i64 },

    /// Flag a special action as done for a user
    RecordAction { user_id: String, action: String },

    /// Newest notifications in a user's inbox
    Notifications {
        user_id: String,
        #[arg(long, default_value_t = 20)]
        limit: u32,
    },
}
