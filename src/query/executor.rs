//! Query execution
//!
//! # Execution Flow (strict order)
//!
//! 1. Range-scan each constrained dimension for an identifier set
//! 2. Intersect the sets (no constrained dimension: every record)
//! 3. Resolve identifiers against the record store
//! 4. Sort by release date ascending, undated last, identifier tie-break

use std::collections::HashSet;

use chrono::NaiveDate;

use crate::catalog::{Catalog, Record};
use crate::index::Score;
use crate::observability::{log_event_with_fields, Event};

use super::filter::{CatalogQuery, RangeFilter};
use super::sorter::ResultSorter;

/// Lookup surface the executor needs from a catalog
pub trait CatalogLookup {
    /// Identifiers whose release date falls in `filter`
    fn release_ids(&self, filter: &RangeFilter<NaiveDate>) -> HashSet<String>;

    /// Identifiers whose rating falls in `filter`
    fn score_ids(&self, filter: &RangeFilter<Score>) -> HashSet<String>;

    fn resolve(&self, id: &str) -> Option<&Record>;

    fn all_records(&self) -> Vec<&Record>;
}

impl CatalogLookup for Catalog {
    fn release_ids(&self, filter: &RangeFilter<NaiveDate>) -> HashSet<String> {
        self.release_index()
            .range_ids(filter.low.as_ref(), filter.high.as_ref())
    }

    fn score_ids(&self, filter: &RangeFilter<Score>) -> HashSet<String> {
        self.score_index()
            .range_ids(filter.low.as_ref(), filter.high.as_ref())
    }

    fn resolve(&self, id: &str) -> Option<&Record> {
        self.store().get(id)
    }

    fn all_records(&self) -> Vec<&Record> {
        self.store().all().collect()
    }
}

/// Result of executing a catalog query
#[derive(Debug, Clone)]
pub struct QueryOutput<'a> {
    /// Matching records in presentation order
    pub records: Vec<&'a Record>,
    /// False when no dimension was constrained
    pub constrained: bool,
}

impl QueryOutput<'_> {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn ids(&self) -> Vec<&str> {
        self.records.iter().map(|r| r.id.as_str()).collect()
    }
}

/// Executes catalog queries against a built catalog
pub struct QueryExecutor<'a, C: CatalogLookup> {
    catalog: &'a C,
}

impl<'a, C: CatalogLookup> QueryExecutor<'a, C> {
    pub fn new(catalog: &'a C) -> Self {
        Self { catalog }
    }

    /// Identifier set matching `query`, `None` when it constrains nothing.
    pub fn matching_ids(&self, query: &CatalogQuery) -> Option<HashSet<String>> {
        let release = query
            .release
            .is_constrained()
            .then(|| self.catalog.release_ids(&query.release));
        let score = query
            .score
            .is_constrained()
            .then(|| self.catalog.score_ids(&query.score));

        match (release, score) {
            (None, None) => None,
            (Some(ids), None) | (None, Some(ids)) => Some(ids),
            (Some(a), Some(b)) => Some(intersect(a, b)),
        }
    }

    /// Runs `query` and returns the sorted matching records.
    pub fn execute(&self, query: &CatalogQuery) -> QueryOutput<'a> {
        let constrained = query.is_constrained();
        let mut records = match self.matching_ids(query) {
            None => self.catalog.all_records(),
            Some(ids) => ids.iter().filter_map(|id| self.catalog.resolve(id)).collect(),
        };

        ResultSorter::sort(&mut records);

        log_event_with_fields(
            Event::QueryExecuted,
            &[
                ("constrained", if constrained { "true" } else { "false" }),
                ("rows", records.len().to_string().as_str()),
            ],
        );

        QueryOutput {
            records,
            constrained,
        }
    }
}

/// Set intersection, iterating the smaller side
fn intersect(a: HashSet<String>, b: HashSet<String>) -> HashSet<String> {
    let (small, large) = if a.len() <= b.len() { (a, b) } else { (b, a) };
    small.into_iter().filter(|id| large.contains(id)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn score(v: f64) -> Score {
        Score::new(v).unwrap()
    }

    fn sample() -> Catalog {
        let mut builder = Catalog::builder();
        builder
            .add(
                Record::new("1", "Halloween")
                    .with_release_date(Some(date(1978, 10, 25)))
                    .with_vote_average(Some(score(7.6))),
            )
            .add(
                Record::new("2", "The Thing")
                    .with_release_date(Some(date(1982, 6, 25)))
                    .with_vote_average(Some(score(8.1))),
            )
            .add(
                Record::new("3", "Poltergeist")
                    .with_release_date(Some(date(1982, 6, 4)))
                    .with_vote_average(Some(score(7.1))),
            )
            .add(Record::new("4", "Lost Reel").with_vote_average(Some(score(7.9))));
        builder.build()
    }

    #[test]
    fn test_unconstrained_returns_everything() {
        let catalog = sample();
        let executor = QueryExecutor::new(&catalog);

        assert_eq!(executor.matching_ids(&CatalogQuery::all()), None);

        let output = executor.execute(&CatalogQuery::all());
        assert!(!output.constrained);
        assert_eq!(output.ids(), vec!["1", "3", "2", "4"]);
    }

    #[test]
    fn test_single_dimension() {
        let catalog = sample();
        let executor = QueryExecutor::new(&catalog);

        let query = CatalogQuery::all()
            .with_release(RangeFilter::between(date(1982, 1, 1), date(1982, 12, 31)));
        assert_eq!(executor.execute(&query).ids(), vec!["3", "2"]);

        let query = CatalogQuery::all().with_score(RangeFilter::at_least(score(7.8)));
        assert_eq!(executor.execute(&query).ids(), vec!["2", "4"]);
    }

    #[test]
    fn test_two_dimensions_intersect() {
        let catalog = sample();
        let executor = QueryExecutor::new(&catalog);

        let query = CatalogQuery::all()
            .with_release(RangeFilter::at_most(date(1982, 12, 31)))
            .with_score(RangeFilter::between(score(7.5), score(10.0)));
        assert_eq!(executor.execute(&query).ids(), vec!["1", "2"]);
    }

    #[test]
    fn test_reversed_bounds_empty() {
        let catalog = sample();
        let executor = QueryExecutor::new(&catalog);

        let query = CatalogQuery::all().with_score(RangeFilter::between(score(9.0), score(1.0)));
        let output = executor.execute(&query);
        assert!(output.constrained);
        assert!(output.is_empty());
    }

    #[test]
    fn test_intersect_keeps_common_ids() {
        let a: HashSet<String> = ["x", "y", "z"].iter().map(|s| s.to_string()).collect();
        let b: HashSet<String> = ["y", "z", "w", "v"].iter().map(|s| s.to_string()).collect();
        let mut common: Vec<String> = intersect(a, b).into_iter().collect();
        common.sort();
        assert_eq!(common, vec!["y".to_string(), "z".to_string()]);
    }
}
