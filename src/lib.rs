//! reeldex - ordered range indices over a movie catalog
//!
//! Records are loaded from CSV into a store keyed by identifier, with a
//! red-black tree index on release date and another on vote average.
//! Queries range-scan each constrained index and intersect the results.

pub mod catalog;
pub mod cli;
pub mod index;
pub mod ingest;
pub mod observability;
pub mod query;
