//! Query Catalog
//!
//! Named analytical views over the record store. Every view is a fixed
//! composition of filter, group-by key and reducers.
//!
//! # Ordering
//!
//! - Category groups: order of first occurrence
//! - Sales over time: ascending date
//! - Time analysis and rating distribution: ascending value

mod result;
mod view;
mod views;

pub use result::{
    DailySales, Demographics, FilterOptions, HourlySales, Performance, RatingsAnalysis,
    SalesBreakdown, Summary,
};
pub use view::{UnknownView, View, ViewResult};
pub use views::{
    branch_comparison, customer_segments, demographics, filter_options, product_performance,
    ratings_analysis, sales_by_branch, sales_by_payment, sales_by_product_line, sales_over_time,
    summary, time_analysis,
};
