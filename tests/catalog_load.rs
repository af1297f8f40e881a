//! Catalog Load Tests
//!
//! Tests for loading a CSV source from disk:
//! - Missing source fails with REEL_RESOURCE_NOT_FOUND
//! - Unparseable fields are stored but not indexed
//! - Quoted fields, BOM and CRLF are read as written
//! - Strict mode aborts the load without a partial catalog

use std::fs;
use std::path::PathBuf;

use chrono::NaiveDate;
use reeldex::index::Score;
use reeldex::ingest::{load_catalog, IngestError, LoadOptions};
use tempfile::TempDir;

// =============================================================================
// Helper Functions
// =============================================================================

fn write_source(dir: &TempDir, content: &str) -> PathBuf {
    let path = dir.path().join("horror_movies.csv");
    fs::write(&path, content).unwrap();
    path
}

fn date(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(y, m, d)
}

// =============================================================================
// Source Resolution Tests
// =============================================================================

/// A missing file is reported as not found, not as an I/O failure.
#[test]
fn test_missing_source_not_found() {
    let dir = TempDir::new().unwrap();
    let err = load_catalog(&dir.path().join("nope.csv"), &LoadOptions::default()).unwrap_err();

    assert!(err.is_not_found());
    assert_eq!(err.code(), "REEL_RESOURCE_NOT_FOUND");
}

/// A directory is not a readable source.
#[test]
fn test_directory_source_fails() {
    let dir = TempDir::new().unwrap();
    assert!(load_catalog(dir.path(), &LoadOptions::default()).is_err());
}

// =============================================================================
// Field Handling Tests
// =============================================================================

/// Bad dates and ratings leave the record stored but out of that index.
#[test]
fn test_unparseable_fields_stored_not_indexed() {
    let dir = TempDir::new().unwrap();
    let path = write_source(
        &dir,
        "id,title,release_date,vote_average\n\
         10,Good,1999-07-30,6.4\n\
         11,Bad Date,July 1999,6.0\n\
         12,Bad Vote,1999-08-01,great\n\
         13,Impossible Date,1999-02-30,5.5\n",
    );

    let outcome = load_catalog(&path, &LoadOptions::default()).unwrap();
    let catalog = &outcome.catalog;

    assert_eq!(catalog.store().len(), 4);
    assert_eq!(outcome.report.unparseable_dates, 2);
    assert_eq!(outcome.report.unparseable_scores, 1);

    let dated = catalog.release_index().range_ids(None, None);
    assert!(dated.contains("10"));
    assert!(!dated.contains("11"));
    assert!(dated.contains("12"));
    assert!(!dated.contains("13"));

    let rated = catalog.score_index().range_ids(None, None);
    assert!(rated.contains("11"));
    assert!(!rated.contains("12"));

    assert_eq!(catalog.store().get("11").unwrap().release_date, None);
    assert_eq!(catalog.store().get("12").unwrap().vote_average, None);
}

/// Quoted titles keep commas, quotes and line breaks.
#[test]
fn test_quoted_fields() {
    let dir = TempDir::new().unwrap();
    let path = write_source(
        &dir,
        "id,title,release_date,vote_average\r\n\
         20,\"Tucker and Dale vs. Evil\",2010-01-22,7.0\r\n\
         21,\"Hello, Mary Lou\",1987-10-09,4.9\r\n\
         22,\"The \"\"Thing\"\"\",1982-06-25,8.1\r\n\
         23,\"Two\nLines\",2001-01-01,5.0\r\n",
    );

    let catalog = load_catalog(&path, &LoadOptions::default()).unwrap().catalog;
    let store = catalog.store();

    assert_eq!(store.get("21").unwrap().title, "Hello, Mary Lou");
    assert_eq!(store.get("22").unwrap().title, "The \"Thing\"");
    assert_eq!(store.get("23").unwrap().title, "Two\nLines");
    assert_eq!(store.get("20").unwrap().release_date, date(2010, 1, 22));
    assert_eq!(store.get("22").unwrap().vote_average, Score::new(8.1));
}

/// A leading byte-order mark does not hide the first header name.
#[test]
fn test_bom_header() {
    let dir = TempDir::new().unwrap();
    let path = write_source(&dir, "\u{feff}id,title\n30,Saw\n");

    let catalog = load_catalog(&path, &LoadOptions::default()).unwrap().catalog;
    assert_eq!(catalog.store().get("30").unwrap().title, "Saw");
}

/// Header-only source loads an empty catalog.
#[test]
fn test_header_only_source() {
    let dir = TempDir::new().unwrap();
    let path = write_source(&dir, "id,title,release_date,vote_average\n");

    let outcome = load_catalog(&path, &LoadOptions::default()).unwrap();
    assert!(outcome.catalog.store().is_empty());
    assert!(outcome.catalog.release_index().is_empty());
    assert_eq!(outcome.report.rows_read, 0);
}

// =============================================================================
// Failure Atomicity Tests
// =============================================================================

/// An unterminated quote fails the whole load.
#[test]
fn test_unterminated_quote_fails() {
    let dir = TempDir::new().unwrap();
    let path = write_source(&dir, "id,title\n1,Fine\n2,\"Never closed\n");

    let err = load_catalog(&path, &LoadOptions::default()).unwrap_err();
    assert_eq!(err.code(), "REEL_MALFORMED_SOURCE");
}

/// Strict mode stops at the first row without an identifier.
#[test]
fn test_strict_missing_identifier() {
    let dir = TempDir::new().unwrap();
    let path = write_source(&dir, "id,title\n1,Fine\n,Anonymous\n");

    match load_catalog(&path, &LoadOptions::strict()) {
        Err(IngestError::MissingIdentifier { line }) => assert_eq!(line, 3),
        other => panic!("unexpected result: {:?}", other.map(|o| o.report)),
    }
}

/// Permissive mode counts and skips the same row.
#[test]
fn test_permissive_skips_missing_identifier() {
    let dir = TempDir::new().unwrap();
    let path = write_source(&dir, "id,title\n1,Fine\n,Anonymous\n");

    let outcome = load_catalog(&path, &LoadOptions::default()).unwrap();
    assert_eq!(outcome.report.rows_without_id, 1);
    assert_eq!(outcome.catalog.store().len(), 1);
}
