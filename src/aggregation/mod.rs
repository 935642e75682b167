//! Aggregation Pipeline subsystem
//!
//! Generic group-by / reduce machinery shared by every catalog view.
//!
//! # Flow
//!
//! 1. `group_by` buckets a filtered selection by a key function
//! 2. `reduce` folds each bucket with a `ReduceSpec`
//! 3. Results come back as an ordered `Tabulation`
//!
//! # Invariants
//!
//! - Empty groups are never emitted
//! - Mean is sum / count; an empty mean is `MetricValue::Undefined`
//! - Rounding happens only at the output boundary

mod errors;
mod group;
mod pipeline;
mod reducer;

pub use errors::{AggregateError, AggregateErrorCode, AggregateResult};
pub use group::{group_by, GroupKey, Grouped, RatingValue, COMPOSITE_SEPARATOR};
pub use pipeline::{reduce, Metrics, ReduceSpec, Tabulation};
pub use reducer::{
    distinct_count, frequency, mean, round2, sum, Accumulator, CategoryAttribute,
    FrequencyTable, MetricValue, NumericAttribute, Reducer,
};
