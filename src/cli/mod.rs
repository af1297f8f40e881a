//! CLI module for reeldex
//!
//! Commands: `list`, `query`, `stats`.
//! Results go to stdout; structured logs go to stderr.

mod args;
mod commands;
mod config;
mod errors;
mod io;

pub use args::{BoundArgs, Cli, Command, CommonArgs, OutputFormat};
pub use commands::{run, run_command};
pub use config::Config;
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::StatsOutput;
