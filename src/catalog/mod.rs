//! Catalog: the record store together with its range indices
//!
//! A `Catalog` only exists fully built. The loader assembles one through
//! `CatalogBuilder` and hands it out only on success, so no caller ever sees
//! a half-indexed store.

mod record;
mod store;

pub use record::Record;
pub use store::RecordStore;

use chrono::NaiveDate;

use crate::index::{IndexStats, RangeTree, Score};

/// Record store plus the release-date and rating indices
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    store: RecordStore,
    release_index: RangeTree<NaiveDate, String>,
    score_index: RangeTree<Score, String>,
}

impl Catalog {
    pub fn builder() -> CatalogBuilder {
        CatalogBuilder::default()
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    pub fn release_index(&self) -> &RangeTree<NaiveDate, String> {
        &self.release_index
    }

    pub fn score_index(&self) -> &RangeTree<Score, String> {
        &self.score_index
    }

    pub fn stats(&self) -> CatalogStats {
        CatalogStats {
            records: self.store.len(),
            release_date: self.release_index.stats(),
            vote_average: self.score_index.stats(),
            release_date_span: self
                .release_index
                .min_key()
                .zip(self.release_index.max_key())
                .map(|(lo, hi)| (*lo, *hi)),
            vote_average_span: self
                .score_index
                .min_key()
                .zip(self.score_index.max_key())
                .map(|(lo, hi)| (*lo, *hi)),
        }
    }
}

/// Summary of a built catalog
#[derive(Debug, Clone, serde::Serialize)]
pub struct CatalogStats {
    pub records: usize,
    pub release_date: IndexStats,
    pub vote_average: IndexStats,
    /// Smallest and largest indexed date
    pub release_date_span: Option<(NaiveDate, NaiveDate)>,
    /// Smallest and largest indexed rating
    pub vote_average_span: Option<(Score, Score)>,
}

/// Accumulates records and index entries until `build()`
#[derive(Debug, Default)]
pub struct CatalogBuilder {
    catalog: Catalog,
}

impl CatalogBuilder {
    /// Stores `record` and indexes its present fields.
    ///
    /// Index entries accumulate even when a later record replaces an earlier
    /// one with the same identifier.
    pub fn add(&mut self, record: Record) -> &mut Self {
        let id = record.id.clone();
        self.catalog
            .release_index
            .insert_opt(record.release_date, id.clone());
        self.catalog.score_index.insert_opt(record.vote_average, id);
        self.catalog.store.insert_record(record);
        self
    }

    pub fn build(self) -> Catalog {
        self.catalog
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_builder_indexes_present_fields_only() {
        let mut builder = Catalog::builder();
        builder
            .add(
                Record::new("1", "Halloween")
                    .with_release_date(Some(date(1978, 10, 25)))
                    .with_vote_average(Score::new(7.6)),
            )
            .add(Record::new("2", "Undated").with_vote_average(Score::new(5.0)))
            .add(Record::new("3", "Unrated").with_release_date(Some(date(2001, 1, 1))));
        let catalog = builder.build();

        assert_eq!(catalog.store().len(), 3);
        assert_eq!(catalog.release_index().id_count(), 2);
        assert_eq!(catalog.score_index().id_count(), 2);
        assert!(!catalog.release_index().range_ids(None, None).contains("2"));
        assert!(!catalog.score_index().range_ids(None, None).contains("3"));
    }

    #[test]
    fn test_stats_spans() {
        let mut builder = Catalog::builder();
        builder
            .add(Record::new("a", "").with_release_date(Some(date(1990, 5, 1))))
            .add(Record::new("b", "").with_release_date(Some(date(1960, 5, 1))));
        let stats = builder.build().stats();

        assert_eq!(stats.records, 2);
        assert_eq!(stats.release_date.keys, 2);
        assert_eq!(
            stats.release_date_span,
            Some((date(1960, 5, 1), date(1990, 5, 1)))
        );
        assert_eq!(stats.vote_average_span, None);
    }
}
