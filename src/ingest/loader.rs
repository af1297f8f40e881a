//! Catalog loader
//!
//! Reads a CSV source into a `Catalog`:
//! 1. Read the whole file (missing file is `REEL_RESOURCE_NOT_FOUND`)
//! 2. Map header names to column positions (last duplicate wins)
//! 3. For each row, resolve identifier, title, release date and rating
//!    through their column aliases
//! 4. Store the record and index every field that parsed
//!
//! The catalog is built privately and returned only when every row was
//! consumed, so a failed load leaves nothing observable.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::catalog::{Catalog, Record};
use crate::observability::{log_event_with_fields, Event, ObservationScope};

use super::csv::{CsvReader, CsvRow};
use super::errors::{IngestError, IngestResult};
use super::parse::{parse_date, parse_score};

const ID_COLUMNS: &[&str] = &["id", "movie_id", "Id"];
const TITLE_COLUMNS: &[&str] = &["title", "original_title", "Title"];
const RELEASE_COLUMNS: &[&str] = &["release_date", "ReleaseDate", "releaseDate", "release"];
const SCORE_COLUMNS: &[&str] = &["vote_average", "VoteAverage", "rating", "vote"];

/// How the loader treats rows and fields it cannot use
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationMode {
    /// Skip rows without an identifier, index around unparseable fields
    #[default]
    Permissive,
    /// Abort the load on the first such row or field
    Strict,
}

/// Loader settings
#[derive(Debug, Clone, Copy, Default)]
pub struct LoadOptions {
    pub mode: ValidationMode,
}

impl LoadOptions {
    pub fn strict() -> Self {
        Self {
            mode: ValidationMode::Strict,
        }
    }
}

/// Counters collected while loading
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LoadReport {
    /// Data rows read (header and blank lines excluded)
    pub rows_read: usize,
    /// Distinct identifiers in the store
    pub records_stored: usize,
    /// Rows dropped for lacking an identifier
    pub rows_without_id: usize,
    /// Non-empty release dates that failed to parse
    pub unparseable_dates: usize,
    /// Non-empty ratings that failed to parse
    pub unparseable_scores: usize,
}

/// A successfully built catalog and how it was built
#[derive(Debug)]
pub struct LoadOutcome {
    pub catalog: Catalog,
    pub report: LoadReport,
}

/// Column positions by header name
struct Header {
    columns: HashMap<String, usize>,
}

impl Header {
    fn new(row: CsvRow) -> Self {
        let columns = row
            .cells
            .into_iter()
            .enumerate()
            .map(|(pos, name)| (name, pos))
            .collect();
        Self { columns }
    }

    /// First non-empty value among `aliases`
    fn first_present<'r>(&self, row: &'r CsvRow, aliases: &[&str]) -> Option<&'r str> {
        aliases
            .iter()
            .filter_map(|name| self.columns.get(*name))
            .filter_map(|pos| row.cells.get(*pos))
            .map(String::as_str)
            .find(|value| !value.is_empty())
    }
}

/// Loads a catalog from the CSV file at `path`.
pub fn load_catalog(path: &Path, options: &LoadOptions) -> IngestResult<LoadOutcome> {
    let source = path.display().to_string();
    let scope = ObservationScope::with_fields("LOAD", &[("source", source.as_str())]);

    let result = fs::read_to_string(path)
        .map_err(|e| IngestError::from_io(path, e))
        .and_then(|content| load_catalog_from_str(&content, options));

    match result {
        Ok(outcome) => {
            let report = &outcome.report;
            scope.complete_with_fields(&[
                ("records", report.records_stored.to_string().as_str()),
                ("rows", report.rows_read.to_string().as_str()),
            ]);
            Ok(outcome)
        }
        Err(e) => {
            scope.fail(e.to_string().as_str());
            Err(e)
        }
    }
}

/// Loads a catalog from CSV text already in memory.
pub fn load_catalog_from_str(content: &str, options: &LoadOptions) -> IngestResult<LoadOutcome> {
    let mut rows = CsvReader::new(content);
    let header = match rows.next() {
        Some(row) => Header::new(row?),
        None => return Err(IngestError::malformed(1, "missing header row")),
    };

    let mut builder = Catalog::builder();
    let mut report = LoadReport::default();

    for row in rows {
        let row = row?;
        report.rows_read += 1;

        let Some(id) = header.first_present(&row, ID_COLUMNS) else {
            if options.mode == ValidationMode::Strict {
                return Err(IngestError::MissingIdentifier { line: row.line });
            }
            report.rows_without_id += 1;
            log_event_with_fields(Event::RowSkipped, &[("line", row.line.to_string().as_str())]);
            continue;
        };

        let title = header.first_present(&row, TITLE_COLUMNS).unwrap_or_default();

        let release_raw = header.first_present(&row, RELEASE_COLUMNS);
        let release_date = release_raw.and_then(parse_date);
        if let (Some(raw), None) = (release_raw, release_date) {
            report.unparseable_dates += 1;
            degrade(options, row.line, "release_date", raw)?;
        }

        let score_raw = header.first_present(&row, SCORE_COLUMNS);
        let vote_average = score_raw.and_then(parse_score);
        if let (Some(raw), None) = (score_raw, vote_average) {
            report.unparseable_scores += 1;
            degrade(options, row.line, "vote_average", raw)?;
        }

        builder.add(
            Record::new(id, title)
                .with_release_date(release_date)
                .with_vote_average(vote_average),
        );
    }

    let catalog = builder.build();
    report.records_stored = catalog.store().len();

    log_event_with_fields(
        Event::IndexBuilt,
        &[
            ("release_keys", catalog.release_index().len().to_string().as_str()),
            ("score_keys", catalog.score_index().len().to_string().as_str()),
        ],
    );

    Ok(LoadOutcome { catalog, report })
}

/// A field that failed to parse: fatal in strict mode, traced otherwise.
fn degrade(options: &LoadOptions, line: usize, field: &'static str, raw: &str) -> IngestResult<()> {
    if options.mode == ValidationMode::Strict {
        return Err(IngestError::UnparseableField {
            line,
            field,
            value: raw.to_string(),
        });
    }
    log_event_with_fields(
        Event::FieldUnparsed,
        &[("field", field), ("line", line.to_string().as_str()), ("value", raw)],
    );
    Ok(())
}
