//! Filter error types
//!
//! Error codes:
//! - SALES_INVALID_DATE_BOUND (REJECT)

use std::fmt;

/// Severity levels for filter errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Client request rejected
    Reject,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Reject => write!(f, "REJECT"),
        }
    }
}

/// Filter-specific error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterErrorCode {
    /// Date bound unparseable, or date_from later than date_to
    SalesInvalidDateBound,
}

impl FilterErrorCode {
    pub fn code(&self) -> &'static str {
        match self {
            FilterErrorCode::SalesInvalidDateBound => "SALES_INVALID_DATE_BOUND",
        }
    }

    pub fn severity(&self) -> Severity {
        Severity::Reject
    }
}

impl fmt::Display for FilterErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Filter error with context
#[derive(Debug, Clone, PartialEq)]
pub struct FilterError {
    code: FilterErrorCode,
    message: String,
    /// Name of the offending parameter, if any
    field: Option<String>,
}

impl FilterError {
    /// A date bound that cannot be parsed as a calendar date
    pub fn unparseable_date(field: impl Into<String>, raw: &str) -> Self {
        let f = field.into();
        Self {
            code: FilterErrorCode::SalesInvalidDateBound,
            message: format!("'{}' is not a valid date for {} (expected YYYY-MM-DD)", raw, f),
            field: Some(f),
        }
    }

    /// date_from later than date_to
    pub fn inverted_range(from: impl fmt::Display, to: impl fmt::Display) -> Self {
        Self {
            code: FilterErrorCode::SalesInvalidDateBound,
            message: format!("date_from {} is later than date_to {}", from, to),
            field: None,
        }
    }

    pub fn code(&self) -> FilterErrorCode {
        self.code
    }

    pub fn severity(&self) -> Severity {
        self.code.severity()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn field(&self) -> Option<&str> {
        self.field.as_deref()
    }
}

impl fmt::Display for FilterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {}: {}",
            self.code.severity(),
            self.code.code(),
            self.message
        )
    }
}

impl std::error::Error for FilterError {}

pub type FilterResult<T> = Result<T, FilterError>;
