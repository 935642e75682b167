//! Aggregation error types
//!
//! Error codes:
//! - SALES_EMPTY_AGGREGATE_MEAN (UNDEFINED)
//!
//! An empty-aggregate mean never aborts a view. `reduce` converts it into
//! `MetricValue::Undefined` and keeps computing the remaining metrics.

use std::fmt;

/// Aggregation-specific error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AggregateErrorCode {
    /// Mean requested over zero records
    SalesEmptyAggregateMean,
}

impl AggregateErrorCode {
    pub fn code(&self) -> &'static str {
        match self {
            AggregateErrorCode::SalesEmptyAggregateMean => "SALES_EMPTY_AGGREGATE_MEAN",
        }
    }
}

impl fmt::Display for AggregateErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AggregateError {
    code: AggregateErrorCode,
    message: String,
}

impl AggregateError {
    pub fn empty_mean(attribute: &str) -> Self {
        Self {
            code: AggregateErrorCode::SalesEmptyAggregateMean,
            message: format!("mean of '{}' over zero records is undefined", attribute),
        }
    }

    pub fn code(&self) -> AggregateErrorCode {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for AggregateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[UNDEFINED] {}: {}", self.code, self.message)
    }
}

impl std::error::Error for AggregateError {}

pub type AggregateResult<T> = Result<T, AggregateError>;
