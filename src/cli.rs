//! CLI interface for tokenboard
//!
//! Defines the command-line interface using clap: `preview` parses a report
//! without saving, `ingest` runs the full upload pipeline against the local
//! snapshot store, and `leaderboard`/`models`/`user` query it.
//!
//! # Example
//!
//! ```bash
//! # Inspect a report without recording it
//! tokenboard preview usage.csv
//!
//! # Record it on the local leaderboard
//! tokenboard ingest usage.csv --name "Ada Lovelace" --tool cursor
//!
//! # Show the board, most tokens first
//! tokenboard leaderboard --sort tokens --limit 20
//! ```

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tokenboard_core::{SourceTool, Visibility};
use tokenboard_store::LeaderboardSort;

/// Track AI coding assistant usage on a local leaderboard
#[derive(Parser, Debug, Clone)]
#[command(name = "tokenboard")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Only log warnings and errors
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Path to the leaderboard snapshot file
    #[arg(long, global = true)]
    pub data_file: Option<PathBuf>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Parse a usage report and show its summary without saving
    Preview {
        /// The CSV file to parse
        file: PathBuf,
    },

    /// Parse a usage report and record it on the leaderboard
    Ingest {
        /// The CSV file to ingest
        file: PathBuf,

        /// Display name to record the stats under
        #[arg(long)]
        name: String,

        /// Which assistant produced the report
        #[arg(long, value_enum, default_value = "cursor")]
        tool: ToolArg,

        /// How much of the stats public listings may show
        #[arg(long, value_enum, default_value = "public-minimal")]
        visibility: VisibilityArg,

        /// X handle to show next to the entry
        #[arg(long)]
        x_handle: Option<String>,
    },

    /// Show the ranked leaderboard
    Leaderboard {
        /// Sort key
        #[arg(long, value_enum, default_value = "tokens")]
        sort: SortArg,

        /// Only entries from this source tool
        #[arg(long, value_enum)]
        tool: Option<ToolArg>,

        /// Only entries whose headline model equals this name
        #[arg(long)]
        model: Option<String>,

        /// Only display names containing this text
        #[arg(long)]
        search: Option<String>,

        /// Page size
        #[arg(long, default_value_t = 50)]
        limit: usize,

        /// Page offset
        #[arg(long, default_value_t = 0)]
        offset: usize,
    },

    /// Show global per-model usage stats
    Models {
        /// How many models to show
        #[arg(long, default_value_t = 20)]
        limit: usize,
    },

    /// Show one user's stats by slug
    User {
        /// The user's slug
        slug: String,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolArg {
    Cursor,
    Claude,
    Codex,
    Other,
}

impl From<ToolArg> for SourceTool {
    fn from(arg: ToolArg) -> Self {
        match arg {
            ToolArg::Cursor => SourceTool::Cursor,
            ToolArg::Claude => SourceTool::Claude,
            ToolArg::Codex => SourceTool::Codex,
            ToolArg::Other => SourceTool::Other,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisibilityArg {
    PublicMinimal,
    PublicExtended,
    Private,
}

impl From<VisibilityArg> for Visibility {
    fn from(arg: VisibilityArg) -> Self {
        match arg {
            VisibilityArg::PublicMinimal => Visibility::PublicMinimal,
            VisibilityArg::PublicExtended => Visibility::PublicExtended,
            VisibilityArg::Private => Visibility::Private,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortArg {
    Tokens,
    Requests,
    Cost,
    Recent,
    Xp,
}

impl From<SortArg> for LeaderboardSort {
    fn from(arg: SortArg) -> Self {
        match arg {
            SortArg::Tokens => LeaderboardSort::Tokens,
            SortArg::Requests => LeaderboardSort::Requests,
            SortArg::Cost => LeaderboardSort::Cost,
            SortArg::Recent => LeaderboardSort::Recent,
            SortArg::Xp => LeaderboardSort::Xp,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_ingest_command() {
        let cli = Cli::parse_from([
            "tokenboard",
            "ingest",
            "usage.csv",
            "--name",
            "Ada",
            "--tool",
            "claude",
        ]);
        let Command::Ingest { name, tool, .. } = cli.command else {
            panic!("expected ingest command");
        };
        assert_eq!(name, "Ada");
        assert_eq!(tool, ToolArg::Claude);
    }

    #[test]
    fn value_enums_map_to_domain_types() {
        assert_eq!(SourceTool::from(ToolArg::Codex), SourceTool::Codex);
        assert_eq!(
            Visibility::from(VisibilityArg::PublicExtended),
            Visibility::PublicExtended
        );
        assert_eq!(LeaderboardSort::from(SortArg::Xp), LeaderboardSort::Xp);
    }
}
