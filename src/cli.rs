//! Command-line interface definition using clap.
//!
//! This module defines:
//! - [`Args`] - top-level arguments and global flags
//! - [`Command`] - the `analyze`, `users` and `show` subcommands
//! - [`AnalyzeArgs`] / [`RangeArgs`] - shared option groups
//!
//! The argument types convert into library types, so the binary stays a thin
//! wrapper:
//!
//! ```rust
//! use chatlens::cli::{Args, Command};
//! use clap::Parser;
//!
//! let args = Args::parse_from(["chatlens", "analyze", "chat.txt", "--user", "Alice"]);
//! let Command::Analyze(analyze) = args.command else { unreachable!() };
//! let filter = analyze.filter_config()?;
//! assert!(filter.has_user_filter());
//! # Ok::<(), chatlens::ChatlensError>(())
//! ```

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::core::filter::{FilterConfig, OVERALL, Selection};
use crate::error::ChatlensError;

/// Analyze WhatsApp chat exports: activity timelines, busiest users,
/// word and emoji frequency, sentiment.
#[derive(Parser, Debug, Clone)]
#[command(name = "chatlens")]
#[command(version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    chatlens analyze \"WhatsApp Chat with Family.txt\"
    chatlens analyze chat.txt --user Alice --start 2024-01-01 --out-dir report
    chatlens analyze chat.txt --json --no-artifacts
    chatlens users chat.txt
    chatlens show chat.txt --start 2024-03-01 --end 2024-03-31")]
pub struct Args {
    /// Print debug logs (same as RUST_LOG=debug)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Compute every statistic and write the artifacts
    Analyze(AnalyzeArgs),

    /// List the participants that can be selected
    Users {
        /// Path to the exported chat (.txt)
        input: PathBuf,
    },

    /// Print the parsed messages
    Show {
        /// Path to the exported chat (.txt)
        input: PathBuf,

        #[command(flatten)]
        range: RangeArgs,
    },
}

/// Inclusive date range options.
#[derive(clap::Args, Debug, Clone, Default)]
pub struct RangeArgs {
    /// Only messages on or after this date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub start: Option<String>,

    /// Only messages on or before this date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub end: Option<String>,
}

impl RangeArgs {
    /// Builds a date-only filter.
    pub fn filter_config(&self) -> Result<FilterConfig, ChatlensError> {
        let mut config = FilterConfig::new();
        if let Some(start) = &self.start {
            config = config.with_start_date(start)?;
        }
        if let Some(end) = &self.end {
            config = config.with_end_date(end)?;
        }
        Ok(config)
    }
}

#[derive(clap::Args, Debug, Clone)]
pub struct AnalyzeArgs {
    /// Path to the exported chat (.txt)
    pub input: PathBuf,

    #[command(flatten)]
    pub range: RangeArgs,

    /// Participant to analyze, or "overall" for everyone
    #[arg(short, long, value_name = "NAME", default_value = OVERALL)]
    pub user: String,

    /// Number of most common words to report
    #[arg(long, value_name = "N")]
    pub top: Option<usize>,

    /// Directory for word_frequency.csv, emoji_usage.csv and wordcloud.svg
    #[arg(short, long, value_name = "DIR", default_value = ".")]
    pub out_dir: PathBuf,

    /// Also write the whole report as report.json
    #[arg(long)]
    pub json: bool,

    /// JSON file overriding analysis settings
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Print the report without writing any file
    #[arg(long)]
    pub no_artifacts: bool,
}

impl AnalyzeArgs {
    pub fn selection(&self) -> Selection {
        Selection::from(self.user.as_str())
    }

    /// Date range plus sender selection.
    pub fn filter_config(&self) -> Result<FilterConfig, ChatlensError> {
        Ok(self.range.filter_config()?.with_selection(self.selection()))
    }
}
