//! Ordered multi-map index for reeldex
//!
//! Indexes are derived, in-memory-only state built once per catalog load.
//!
//! # Design Principles
//!
//! - Derived state: indexes mirror the record store, never the source of truth
//! - In-memory only: no persistence
//! - Grow-only: no removal, duplicate keys merge into one node
//!
//! # Invariants
//!
//! - Red-black balance holds after every insert
//! - One node per distinct key, keys strictly increasing in order
//! - Range lookups are inclusive on both ends

mod errors;
mod keys;
mod rbtree;

pub use errors::InvariantViolation;
pub use keys::Score;
pub use rbtree::{Color, IndexStats, Iter, NodeId, RangeTree};
