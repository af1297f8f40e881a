//! Ingestion: CSV source -> `Catalog`
//!
//! # Failure model
//!
//! - Missing source file: `REEL_RESOURCE_NOT_FOUND`, load aborted
//! - Broken CSV framing: `REEL_MALFORMED_SOURCE`, load aborted
//! - Row without identifier: skipped (strict mode: aborted)
//! - Unparseable date or rating: field treated as absent, record still
//!   stored (strict mode: aborted)

mod csv;
mod errors;
mod loader;
mod parse;

pub use csv::{CsvReader, CsvRow};
pub use errors::{IngestError, IngestResult};
pub use loader::{
    load_catalog, load_catalog_from_str, LoadOptions, LoadOutcome, LoadReport, ValidationMode,
};
pub use parse::{parse_date, parse_score};
