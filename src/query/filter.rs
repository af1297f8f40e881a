//! Range filters and the two-dimension catalog query

use chrono::NaiveDate;

use crate::index::Score;
use crate::ingest::{parse_date, parse_score, ValidationMode};

use super::errors::{QueryError, QueryResult};

/// Inclusive `[low, high]` constraint; `None` leaves that side open
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangeFilter<K> {
    pub low: Option<K>,
    pub high: Option<K>,
}

impl<K> Default for RangeFilter<K> {
    fn default() -> Self {
        Self::unbounded()
    }
}

impl<K> RangeFilter<K> {
    pub fn unbounded() -> Self {
        Self {
            low: None,
            high: None,
        }
    }

    pub fn new(low: Option<K>, high: Option<K>) -> Self {
        Self { low, high }
    }

    pub fn between(low: K, high: K) -> Self {
        Self::new(Some(low), Some(high))
    }

    pub fn at_least(low: K) -> Self {
        Self::new(Some(low), None)
    }

    pub fn at_most(high: K) -> Self {
        Self::new(None, Some(high))
    }

    /// A filter with neither bound imposes no constraint
    pub fn is_constrained(&self) -> bool {
        self.low.is_some() || self.high.is_some()
    }

    /// Builds a filter from user text.
    ///
    /// Empty or missing text is an open side. Text that `parse` rejects is
    /// also an open side in permissive mode, and `REEL_INVALID_BOUND` in
    /// strict mode.
    pub fn parse_with(
        low: Option<&str>,
        high: Option<&str>,
        field: &'static str,
        mode: ValidationMode,
        parse: impl Fn(&str) -> Option<K>,
    ) -> QueryResult<Self> {
        let bound = |text: Option<&str>| -> QueryResult<Option<K>> {
            let Some(text) = text.map(str::trim).filter(|t| !t.is_empty()) else {
                return Ok(None);
            };
            match parse(text) {
                Some(value) => Ok(Some(value)),
                None if mode == ValidationMode::Strict => Err(QueryError::InvalidBound {
                    field,
                    value: text.to_string(),
                }),
                None => Ok(None),
            }
        };
        Ok(Self::new(bound(low)?, bound(high)?))
    }
}

/// Bounds as typed by a user, before parsing
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryText {
    pub date_from: Option<String>,
    pub date_to: Option<String>,
    pub score_from: Option<String>,
    pub score_to: Option<String>,
}

/// Constraint on both indexed dimensions
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CatalogQuery {
    pub release: RangeFilter<NaiveDate>,
    pub score: RangeFilter<Score>,
}

impl CatalogQuery {
    /// Matches every record
    pub fn all() -> Self {
        Self::default()
    }

    pub fn with_release(mut self, release: RangeFilter<NaiveDate>) -> Self {
        self.release = release;
        self
    }

    pub fn with_score(mut self, score: RangeFilter<Score>) -> Self {
        self.score = score;
        self
    }

    pub fn is_constrained(&self) -> bool {
        self.release.is_constrained() || self.score.is_constrained()
    }

    /// Parses user text with the ingestion field parsers
    pub fn from_text(text: &QueryText, mode: ValidationMode) -> QueryResult<Self> {
        let release = RangeFilter::parse_with(
            text.date_from.as_deref(),
            text.date_to.as_deref(),
            "release_date",
            mode,
            parse_date,
        )?;
        let score = RangeFilter::parse_with(
            text.score_from.as_deref(),
            text.score_to.as_deref(),
            "vote_average",
            mode,
            parse_score,
        )?;
        Ok(Self { release, score })
    }
}
