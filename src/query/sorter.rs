//! Presentation ordering for query results
//!
//! Release date ascending with undated records last; identifier breaks ties.

use std::cmp::Ordering;

use crate::catalog::Record;

/// Sorts result records
pub struct ResultSorter;

impl ResultSorter {
    /// Sorts in place; the order is total, so the result is deterministic.
    pub fn sort(records: &mut [&Record]) {
        records.sort_by(|a, b| Self::compare(a, b));
    }

    fn compare(a: &Record, b: &Record) -> Ordering {
        let by_date = match (a.release_date, b.release_date) {
            (Some(a_date), Some(b_date)) => a_date.cmp(&b_date),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        };
        by_date.then_with(|| a.id.cmp(&b.id))
    }
}
