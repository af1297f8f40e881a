//! Observability subsystem for reeldex
//!
//! - Structured logging (JSON lines on stderr)
//! - Typed events
//! - Begin/complete scopes around long operations
//!
//! Observability is read-only: it never changes what an operation returns.
//!
//! ```ignore
//! use reeldex::observability::{Logger, Event, ObservationScope};
//!
//! Logger::info("QUERY_COMPLETE", &[("rows", "42")]);
//!
//! let scope = ObservationScope::new("LOAD");
//! // ... do work ...
//! scope.complete();
//! ```

mod events;
mod logger;
mod scope;

pub use events::Event;
pub use logger::{Logger, Severity};
pub use scope::ObservationScope;

/// Log an event at its own severity
pub fn log_event(event: Event) {
    Logger::log(event.severity(), event.as_str(), &[]);
}

/// Log an event with fields at its own severity
pub fn log_event_with_fields(event: Event, fields: &[(&str, &str)]) {
    Logger::log(event.severity(), event.as_str(), fields);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_event() {
        // Verifies no panic
        log_event(Event::ConfigLoaded);
        log_event(Event::IndexBuilt);
    }

    #[test]
    fn test_log_event_with_fields() {
        log_event_with_fields(Event::RowSkipped, &[("line", "12")]);
    }
}
