//! Filter Predicate subsystem
//!
//! Builds predicates from optional criteria and applies them to the record
//! store.
//!
//! # Invariants
//!
//! - Criteria combine with AND; an absent criterion restricts nothing
//! - Invalid date bounds are rejected at construction, before any scan
//! - `apply` preserves store order and never fabricates records

mod errors;
mod params;
mod predicate;

pub use errors::{FilterError, FilterErrorCode, FilterResult};
pub use params::{FilterParams, DATE_FORMAT, MATCH_ANY};
pub use predicate::{Criterion, FilterPredicate, Selection};
