//! Observability subsystem
//!
//! - Structured logging (JSON, one line per event)
//! - Monotonic query counters
//! - Lifecycle event tracing
//!
//! # Principles
//!
//! 1. Observability is read-only
//! 2. No side effects on query results
//! 3. No background threads
//!
//! # Usage
//!
//! ```ignore
//! use salesdb::observability::{Logger, MetricsRegistry, ObservationScope};
//!
//! Logger::info("QUERY_COMPLETE", &[("view", "summary")]);
//!
//! let metrics = MetricsRegistry::new();
//! metrics.record_query(1000);
//!
//! let scope = ObservationScope::new("QUERY");
//! scope.complete(&[]);
//! ```

mod events;
mod logger;
mod metrics;
mod scope;

pub use events::Event;
pub use logger::{Logger, Severity};
pub use metrics::{MetricsRegistry, MetricsSnapshot};
pub use scope::ObservationScope;

/// Log a lifecycle event
pub fn log_event(event: Event) {
    log_event_with_fields(event, &[]);
}

/// Log a lifecycle event with fields
pub fn log_event_with_fields(event: Event, fields: &[(&str, &str)]) {
    let severity = if event.is_fatal() {
        Severity::Fatal
    } else {
        Severity::Info
    };
    Logger::log(severity, event.as_str(), fields);
}
