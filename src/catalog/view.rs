//! Named views and uniform dispatch
//!
//! Lets the gateway and the CLI address a view by its name and get back a
//! serializable result without matching on every view themselves.

use std::fmt;
use std::str::FromStr;

use serde::ser::{Serialize, Serializer};

use crate::filter::FilterPredicate;
use crate::store::RecordStore;

use super::result::{
    DailySales, Demographics, HourlySales, Performance, RatingsAnalysis, SalesBreakdown, Summary,
};
use super::views;

/// Every view in the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum View {
    Summary,
    SalesByBranch,
    SalesByProductLine,
    SalesByPayment,
    Demographics,
    SalesOverTime,
    RatingsAnalysis,
    TimeAnalysis,
    ProductPerformance,
    BranchComparison,
    CustomerSegments,
}

impl View {
    pub const ALL: [View; 11] = [
        View::Summary,
        View::SalesByBranch,
        View::SalesByProductLine,
        View::SalesByPayment,
        View::Demographics,
        View::SalesOverTime,
        View::RatingsAnalysis,
        View::TimeAnalysis,
        View::ProductPerformance,
        View::BranchComparison,
        View::CustomerSegments,
    ];

    /// Stable name, also used as the HTTP path segment
    pub fn name(&self) -> &'static str {
        match self {
            View::Summary => "summary",
            View::SalesByBranch => "sales-by-branch",
            View::SalesByProductLine => "sales-by-product-line",
            View::SalesByPayment => "sales-by-payment",
            View::Demographics => "customer-demographics",
            View::SalesOverTime => "sales-over-time",
            View::RatingsAnalysis => "ratings-analysis",
            View::TimeAnalysis => "time-analysis",
            View::ProductPerformance => "product-performance",
            View::BranchComparison => "branch-comparison",
            View::CustomerSegments => "customer-segments",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            View::Summary => "Total sales, mean rating, transaction and product-line counts",
            View::SalesByBranch => "Revenue per branch",
            View::SalesByProductLine => "Revenue per product line",
            View::SalesByPayment => "Revenue per payment method",
            View::Demographics => "Gender and customer-type frequencies",
            View::SalesOverTime => "Daily revenue, ascending by date",
            View::RatingsAnalysis => "Mean ratings and rating distribution",
            View::TimeAnalysis => "Revenue per hour of day",
            View::ProductPerformance => "Rounded metrics per product line",
            View::BranchComparison => "Rounded metrics per branch",
            View::CustomerSegments => "Rounded metrics per customer type and gender",
        }
    }

    /// Runs the view against a store
    pub fn evaluate(&self, store: &RecordStore, predicate: &FilterPredicate) -> ViewResult {
        match self {
            View::Summary => ViewResult::Summary(views::summary(store, predicate)),
            View::SalesByBranch => ViewResult::Sales(views::sales_by_branch(store, predicate)),
            View::SalesByProductLine => {
                ViewResult::Sales(views::sales_by_product_line(store, predicate))
            }
            View::SalesByPayment => ViewResult::Sales(views::sales_by_payment(store, predicate)),
            View::Demographics => ViewResult::Demographics(views::demographics(store, predicate)),
            View::SalesOverTime => ViewResult::Daily(views::sales_over_time(store, predicate)),
            View::RatingsAnalysis => {
                ViewResult::Ratings(views::ratings_analysis(store, predicate))
            }
            View::TimeAnalysis => ViewResult::Hourly(views::time_analysis(store, predicate)),
            View::ProductPerformance => {
                ViewResult::Performance(views::product_performance(store, predicate))
            }
            View::BranchComparison => {
                ViewResult::Performance(views::branch_comparison(store, predicate))
            }
            View::CustomerSegments => {
                ViewResult::Segments(views::customer_segments(store, predicate))
            }
        }
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Unknown view name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownView(pub String);

impl fmt::Display for UnknownView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown view '{}'", self.0)
    }
}

impl std::error::Error for UnknownView {}

impl FromStr for View {
    type Err = UnknownView;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        View::ALL
            .iter()
            .copied()
            .find(|v| v.name() == s)
            .ok_or_else(|| UnknownView(s.to_string()))
    }
}

/// Output of any view
#[derive(Debug, Clone, PartialEq)]
pub enum ViewResult {
    Summary(Summary),
    Sales(SalesBreakdown),
    Demographics(Demographics),
    Daily(DailySales),
    Ratings(RatingsAnalysis),
    Hourly(HourlySales),
    Performance(Performance<String>),
    Segments(Performance<(String, String)>),
}

impl ViewResult {
    /// Number of groups in the result (1 for the summary)
    pub fn group_count(&self) -> usize {
        match self {
            ViewResult::Summary(_) => 1,
            ViewResult::Sales(t) => t.len(),
            ViewResult::Demographics(d) => d.gender.len() + d.customer_type.len(),
            ViewResult::Daily(d) => d.len(),
            ViewResult::Ratings(r) => r.rating_distribution.len(),
            ViewResult::Hourly(h) => h.len(),
            ViewResult::Performance(p) => p.len(),
            ViewResult::Segments(s) => s.len(),
        }
    }
}

impl Serialize for ViewResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ViewResult::Summary(v) => v.serialize(serializer),
            ViewResult::Sales(v) => v.serialize(serializer),
            ViewResult::Demographics(v) => v.serialize(serializer),
            ViewResult::Daily(v) => v.serialize(serializer),
            ViewResult::Ratings(v) => v.serialize(serializer),
            ViewResult::Hourly(v) => v.serialize(serializer),
            ViewResult::Performance(v) => v.serialize(serializer),
            ViewResult::Segments(v) => v.serialize(serializer),
        }
    }
}
