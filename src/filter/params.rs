//! Raw filter parameters as received from callers
//!
//! Callers send strings; `"all"` or an empty value means no restriction.
//! Conversion into a [`FilterPredicate`] validates the date bounds before any
//! record is looked at.

use chrono::NaiveDate;
use serde::Deserialize;

use super::errors::{FilterError, FilterResult};
use super::predicate::FilterPredicate;

/// Wildcard value accepted for the categorical criteria
pub const MATCH_ANY: &str = "all";

/// Date format accepted for `date_from` / `date_to`
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Unvalidated filter parameters
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct FilterParams {
    #[serde(default)]
    pub branch: Option<String>,
    #[serde(default)]
    pub product_line: Option<String>,
    #[serde(default)]
    pub customer_type: Option<String>,
    #[serde(default)]
    pub date_from: Option<String>,
    #[serde(default)]
    pub date_to: Option<String>,
}

impl FilterParams {
    /// Validates the parameters and builds the predicate.
    pub fn to_predicate(&self) -> FilterResult<FilterPredicate> {
        let date_from = parse_bound("date_from", self.date_from.as_deref())?;
        let date_to = parse_bound("date_to", self.date_to.as_deref())?;

        let mut predicate = FilterPredicate::all().with_date_range(date_from, date_to)?;

        if let Some(branch) = category(self.branch.as_deref()) {
            predicate = predicate.with_branch(branch);
        }
        if let Some(product_line) = category(self.product_line.as_deref()) {
            predicate = predicate.with_product_line(product_line);
        }
        if let Some(customer_type) = category(self.customer_type.as_deref()) {
            predicate = predicate.with_customer_type(customer_type);
        }

        Ok(predicate)
    }
}

fn category(raw: Option<&str>) -> Option<&str> {
    raw.filter(|v| !v.is_empty() && *v != MATCH_ANY)
}

fn parse_bound(field: &str, raw: Option<&str>) -> FilterResult<Option<NaiveDate>> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => NaiveDate::parse_from_str(value, DATE_FORMAT)
            .map(Some)
            .map_err(|_| FilterError::unparseable_date(field, value)),
    }
}
