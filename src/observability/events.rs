//! Observability events for reeldex
//!
//! Events are explicit and typed. The load lifecycle itself
//! (`LOAD_BEGIN` / `LOAD_COMPLETE` / `LOAD_FAILED`) is emitted by
//! `ObservationScope`.

use std::fmt;

use super::logger::Severity;

/// Observable events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Configuration
    /// Configuration resolved (file and flags merged)
    ConfigLoaded,

    // Ingestion
    /// Row dropped for lacking an identifier
    RowSkipped,
    /// Field present but unparseable, treated as absent
    FieldUnparsed,
    /// Indices built from the loaded records
    IndexBuilt,

    // Query operations
    /// Query received
    QueryReceived,
    /// Query executed successfully
    QueryExecuted,
    /// Query rejected (strict bound parsing)
    QueryRejected,
}

impl Event {
    /// Returns the string representation of the event
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::RowSkipped => "ROW_SKIPPED",
            Event::FieldUnparsed => "FIELD_UNPARSED",
            Event::IndexBuilt => "INDEX_BUILT",
            Event::QueryReceived => "QUERY_BEGIN",
            Event::QueryExecuted => "QUERY_COMPLETE",
            Event::QueryRejected => "QUERY_REJECTED",
        }
    }

    /// Severity the event is logged at.
    ///
    /// Degraded rows and fields are routine for messy sources, so they
    /// stay at TRACE.
    pub fn severity(&self) -> Severity {
        match self {
            Event::RowSkipped | Event::FieldUnparsed | Event::IndexBuilt => Severity::Trace,
            Event::QueryRejected => Severity::Warn,
            Event::ConfigLoaded | Event::QueryReceived | Event::QueryExecuted => Severity::Info,
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
