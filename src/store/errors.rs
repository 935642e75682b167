//! Record store error types
//!
//! Error codes:
//! - SALES_STORE_NOT_READY (ERROR)
//! - SALES_STORE_ALREADY_LOADED (ERROR)

use std::fmt;

/// Store-specific error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreErrorCode {
    /// A query arrived before the dataset finished loading
    SalesStoreNotReady,
    /// The readiness gate was opened twice
    SalesStoreAlreadyLoaded,
}

impl StoreErrorCode {
    pub fn code(&self) -> &'static str {
        match self {
            StoreErrorCode::SalesStoreNotReady => "SALES_STORE_NOT_READY",
            StoreErrorCode::SalesStoreAlreadyLoaded => "SALES_STORE_ALREADY_LOADED",
        }
    }
}

impl fmt::Display for StoreErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Record store error
#[derive(Debug, Clone)]
pub struct StoreError {
    code: StoreErrorCode,
    message: String,
}

impl StoreError {
    pub fn not_ready() -> Self {
        Self {
            code: StoreErrorCode::SalesStoreNotReady,
            message: "Dataset is still loading".into(),
        }
    }

    pub fn already_loaded() -> Self {
        Self {
            code: StoreErrorCode::SalesStoreAlreadyLoaded,
            message: "Dataset was already loaded for this process".into(),
        }
    }

    pub fn code(&self) -> StoreErrorCode {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[ERROR] {}: {}", self.code, self.message)
    }
}

impl std::error::Error for StoreError {}

pub type StoreResult<T> = Result<T, StoreError>;
