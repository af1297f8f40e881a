//! Query subsystem for reeldex
//!
//! Turns per-dimension range filters into identifier sets, intersects them,
//! and resolves the survivors against the record store.
//!
//! # Invariants
//!
//! - A dimension with no bounds imposes no constraint
//! - Bounds are inclusive; reversed bounds match nothing
//! - Output order is total: release date, undated last, then identifier

mod errors;
mod executor;
mod filter;
mod sorter;

pub use errors::{QueryError, QueryResult};
pub use executor::{CatalogLookup, QueryExecutor, QueryOutput};
pub use filter::{CatalogQuery, QueryText, RangeFilter};
pub use sorter::ResultSorter;
