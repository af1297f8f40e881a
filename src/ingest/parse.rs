//! Field parsers shared by ingestion and query bounds
//!
//! Both are total: malformed input yields `None`, never an error.

use std::sync::OnceLock;

use chrono::NaiveDate;
use regex::Regex;

use crate::index::Score;

static DATE_SHAPE: OnceLock<Regex> = OnceLock::new();

fn date_shape() -> &'static Regex {
    DATE_SHAPE.get_or_init(|| {
        Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$").expect("date pattern is a valid regex")
    })
}

/// Parses `YYYY-MM-DD`: exactly four, two and two ASCII digits.
///
/// Shorter components ("2021-1-5") and impossible dates ("2021-02-30")
/// are rejected.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    if !date_shape().is_match(s) {
        return None;
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

/// Parses a float after trimming surrounding whitespace.
///
/// Accepts the usual float spellings including `inf`; NaN is rejected since
/// it has no place in an ordered index.
pub fn parse_score(s: &str) -> Option<Score> {
    let value: f64 = s.trim().parse().ok()?;
    Score::new(value)
}
