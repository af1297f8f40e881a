//! Key types for the catalog indices
//!
//! Release dates index directly as `chrono::NaiveDate`. Ratings are `f64`,
//! which is not `Ord`, so they are wrapped in `Score`.

use std::cmp::Ordering;
use std::fmt;

use serde::Serialize;

/// A rating usable as a tree key.
///
/// Built only from non-NaN values, so `f64::total_cmp` agrees with numeric
/// order. `-0.0` is folded into `0.0` so both land on the same node.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(transparent)]
pub struct Score(f64);

impl Score {
    /// Wraps `value`, rejecting NaN
    pub fn new(value: f64) -> Option<Self> {
        if value.is_nan() {
            return None;
        }
        // Collapses -0.0 as well
        let value = if value == 0.0 { 0.0 } else { value };
        Some(Score(value))
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

impl PartialEq for Score {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Score {}

impl PartialOrd for Score {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Score {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
