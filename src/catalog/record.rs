//! Catalog record type

use chrono::NaiveDate;
use serde::Serialize;

use crate::index::Score;

/// One title in the catalog
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Record {
    /// Identifier, unique within a store
    pub id: String,
    /// Display title (empty when the source had none)
    pub title: String,
    /// Release date, `None` when absent or unparseable
    pub release_date: Option<NaiveDate>,
    /// Average rating, `None` when absent or unparseable
    pub vote_average: Option<Score>,
}

impl Record {
    /// Creates a record with no indexable fields
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            release_date: None,
            vote_average: None,
        }
    }

    pub fn with_release_date(mut self, date: Option<NaiveDate>) -> Self {
        self.release_date = date;
        self
    }

    pub fn with_vote_average(mut self, score: Option<Score>) -> Self {
        self.vote_average = score;
        self
    }
}
