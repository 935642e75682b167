//! Lifecycle and query events
//!
//! Events are explicit and typed; the logger writes their string form.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Boot & Lifecycle
    BootStart,
    /// Dataset loaded and readiness gate open
    BootComplete,
    ConfigLoaded,
    DatasetLoaded,
    /// Dataset failed to load (FATAL)
    DatasetLoadFailed,
    /// HTTP listener bound
    Serving,

    // Queries
    QueryReceived,
    QueryExecuted,
    QueryRejected,
    /// Query arrived before the readiness gate opened
    QueryNotReady,
}

impl Event {
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::BootStart => "SALESDB_STARTUP_BEGIN",
            Event::BootComplete => "SALESDB_STARTUP_COMPLETE",
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::DatasetLoaded => "DATASET_LOADED",
            Event::DatasetLoadFailed => "DATASET_LOAD_FAILED",
            Event::Serving => "SALESDB_SERVING",
            Event::QueryReceived => "QUERY_BEGIN",
            Event::QueryExecuted => "QUERY_COMPLETE",
            Event::QueryRejected => "QUERY_REJECTED",
            Event::QueryNotReady => "QUERY_NOT_READY",
        }
    }

    pub fn is_fatal(&self) -> bool {
        matches!(self, Event::DatasetLoadFailed)
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
