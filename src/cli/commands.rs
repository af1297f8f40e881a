//! CLI command implementations
//!
//! Every command resolves its configuration, loads the catalog from the
//! CSV source, then writes results to stdout. Nothing is written until
//! the load and the query have both succeeded.

use std::io::{self, Write};

use crate::ingest::{load_catalog, LoadOutcome};
use crate::observability::{log_event_with_fields, Event, Logger};
use crate::query::{CatalogQuery, QueryExecutor, QueryText};

use super::args::{Cli, Command, CommonArgs};
use super::config::Config;
use super::errors::CliResult;
use super::io::{write_records, write_stats, StatsOutput};

/// Run the CLI with parsed arguments
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();
    let stdout = io::stdout();
    let mut out = stdout.lock();
    run_command(cli.command, &mut out)
}

/// Run a specific command
pub fn run_command<W: Write>(command: Command, out: &mut W) -> CliResult<()> {
    match command {
        Command::List { common } => list(&common, out),
        Command::Query { common, bounds } => query(&common, &bounds.into(), out),
        Command::Stats { common } => stats(&common, out),
    }
}

/// Resolve configuration and load the catalog it points at
fn prepare(common: &CommonArgs) -> CliResult<(Config, LoadOutcome)> {
    let config = Config::resolve(common)?;
    Logger::set_min_severity(config.log_level);

    let source = config.source_path.display().to_string();
    log_event_with_fields(
        Event::ConfigLoaded,
        &[
            ("source", source.as_str()),
            ("validation", format!("{:?}", config.validation).as_str()),
        ],
    );

    let outcome = load_catalog(&config.source_path, &config.load_options())?;
    Ok((config, outcome))
}

/// List every record in presentation order
pub fn list<W: Write>(common: &CommonArgs, out: &mut W) -> CliResult<()> {
    let (config, outcome) = prepare(common)?;

    let output = QueryExecutor::new(&outcome.catalog).execute(&CatalogQuery::all());
    write_records(out, &output.records, config.output)
}

/// List records matching the given release date and rating bounds
pub fn query<W: Write>(common: &CommonArgs, text: &QueryText, out: &mut W) -> CliResult<()> {
    let (config, outcome) = prepare(common)?;

    log_event_with_fields(
        Event::QueryReceived,
        &[
            ("date_from", text.date_from.as_deref().unwrap_or("")),
            ("date_to", text.date_to.as_deref().unwrap_or("")),
            ("score_from", text.score_from.as_deref().unwrap_or("")),
            ("score_to", text.score_to.as_deref().unwrap_or("")),
        ],
    );

    let query = match CatalogQuery::from_text(text, config.validation) {
        Ok(query) => query,
        Err(e) => {
            log_event_with_fields(
                Event::QueryRejected,
                &[("code", e.code()), ("reason", e.to_string().as_str())],
            );
            return Err(e.into());
        }
    };

    let output = QueryExecutor::new(&outcome.catalog).execute(&query);
    write_records(out, &output.records, config.output)
}

/// Show the load report and index statistics
pub fn stats<W: Write>(common: &CommonArgs, out: &mut W) -> CliResult<()> {
    let (config, outcome) = prepare(common)?;

    let stats = StatsOutput {
        load: outcome.report,
        catalog: outcome.catalog.stats(),
    };
    write_stats(out, &stats, config.output)
}
