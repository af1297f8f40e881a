//! Ingest error types
//!
//! Error codes:
//! - REEL_RESOURCE_NOT_FOUND (FATAL)
//! - REEL_IO_ERROR (FATAL)
//! - REEL_MALFORMED_SOURCE (FATAL)
//! - REEL_MISSING_IDENTIFIER (strict mode only)
//! - REEL_UNPARSEABLE_FIELD (strict mode only)
//!
//! Every ingest error aborts the whole load: no catalog is produced.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result type for ingest operations
pub type IngestResult<T> = Result<T, IngestError>;

/// Load failures
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("source not found: {}", .0.display())]
    ResourceNotFound(PathBuf),

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed source at line {line}: {reason}")]
    MalformedSource { line: usize, reason: String },

    #[error("row at line {line} has no identifier")]
    MissingIdentifier { line: usize },

    #[error("row at line {line}: cannot parse {field} value '{value}'")]
    UnparseableField {
        line: usize,
        field: &'static str,
        value: String,
    },
}

impl IngestError {
    pub fn malformed(line: usize, reason: impl Into<String>) -> Self {
        IngestError::MalformedSource {
            line,
            reason: reason.into(),
        }
    }

    /// Maps a read failure, singling out the missing-file case.
    pub fn from_io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        let path = path.into();
        if source.kind() == io::ErrorKind::NotFound {
            IngestError::ResourceNotFound(path)
        } else {
            IngestError::Io { path, source }
        }
    }

    /// Returns the string code
    pub fn code(&self) -> &'static str {
        match self {
            IngestError::ResourceNotFound(_) => "REEL_RESOURCE_NOT_FOUND",
            IngestError::Io { .. } => "REEL_IO_ERROR",
            IngestError::MalformedSource { .. } => "REEL_MALFORMED_SOURCE",
            IngestError::MissingIdentifier { .. } => "REEL_MISSING_IDENTIFIER",
            IngestError::UnparseableField { .. } => "REEL_UNPARSEABLE_FIELD",
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, IngestError::ResourceNotFound(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_maps_to_resource_error() {
        let err = IngestError::from_io(
            "missing.csv",
            io::Error::new(io::ErrorKind::NotFound, "gone"),
        );
        assert!(err.is_not_found());
        assert_eq!(err.code(), "REEL_RESOURCE_NOT_FOUND");
        assert!(err.to_string().contains("missing.csv"));
    }

    #[test]
    fn test_other_io_kept_as_io() {
        let err = IngestError::from_io(
            "locked.csv",
            io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(!err.is_not_found());
        assert_eq!(err.code(), "REEL_IO_ERROR");
    }

    #[test]
    fn test_unparseable_display() {
        let err = IngestError::UnparseableField {
            line: 4,
            field: "release_date",
            value: "2021/12/31".to_string(),
        };
        let display = err.to_string();
        assert!(display.contains("line 4"));
        assert!(display.contains("2021/12/31"));
    }
}
