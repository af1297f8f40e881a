//! CLI argument definitions using clap
//!
//! Commands:
//! - reeldex list  [--source <csv>] [--config <json>]
//! - reeldex query [--date-from D] [--date-to D] [--score-from S] [--score-to S]
//! - reeldex stats

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use serde::Deserialize;

use crate::query::QueryText;

/// reeldex - range queries over a movie catalog by release date and rating
#[derive(Parser, Debug)]
#[command(name = "reeldex")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List every record, ordered by release date
    List {
        #[command(flatten)]
        common: CommonArgs,
    },

    /// List records whose release date and rating fall in the given ranges
    Query {
        #[command(flatten)]
        common: CommonArgs,

        #[command(flatten)]
        bounds: BoundArgs,
    },

    /// Show the load report and index statistics
    Stats {
        #[command(flatten)]
        common: CommonArgs,
    },
}

/// Options shared by every command
#[derive(Args, Debug, Clone, Default)]
pub struct CommonArgs {
    /// CSV source (overrides the config file)
    #[arg(long)]
    pub source: Option<PathBuf>,

    /// Path to a JSON configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Reject rows without an identifier and unparseable fields or bounds
    #[arg(long)]
    pub strict: bool,

    /// Output format (overrides the config file)
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Log more (-v: info, -vv: trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

/// Range bounds as typed; empty or omitted means open
#[derive(Args, Debug, Clone, Default)]
pub struct BoundArgs {
    /// Earliest release date, YYYY-MM-DD
    #[arg(long)]
    pub date_from: Option<String>,

    /// Latest release date, YYYY-MM-DD
    #[arg(long)]
    pub date_to: Option<String>,

    /// Lowest vote average
    #[arg(long, allow_hyphen_values = true)]
    pub score_from: Option<String>,

    /// Highest vote average
    #[arg(long, allow_hyphen_values = true)]
    pub score_to: Option<String>,
}

impl From<BoundArgs> for QueryText {
    fn from(args: BoundArgs) -> Self {
        QueryText {
            date_from: args.date_from,
            date_to: args.date_to,
            score_from: args.score_from,
            score_to: args.score_to,
        }
    }
}

/// How records are written to stdout
#[derive(ValueEnum, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Fixed-width columns
    #[default]
    Table,
    /// One JSON object per line
    Json,
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
