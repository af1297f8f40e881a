//! Query error types
//!
//! Error codes:
//! - REEL_INVALID_BOUND (REJECT, strict mode only)
//!
//! Range lookups themselves never fail; only turning user text into bounds
//! can, and only when strict validation is requested.

use thiserror::Error;

/// Result type for query operations
pub type QueryResult<T> = Result<T, QueryError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    #[error("invalid {field} bound '{value}'")]
    InvalidBound { field: &'static str, value: String },
}

impl QueryError {
    pub fn code(&self) -> &'static str {
        match self {
            QueryError::InvalidBound { .. } => "REEL_INVALID_BOUND",
        }
    }
}
