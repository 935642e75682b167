//! Result shapes returned by catalog views

use chrono::NaiveDate;
use serde::ser::{Serialize, SerializeSeq, SerializeStruct, Serializer};

use crate::aggregation::{FrequencyTable, MetricValue, Metrics, RatingValue, Tabulation};

/// Whole-selection summary
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct Summary {
    pub total_sales: f64,
    /// `None` when the selection is empty; serialized as `null`
    pub average_rating: Option<f64>,
    /// Number of matching transactions
    pub total_customers: u64,
    /// Distinct product lines among matching transactions
    pub product_lines: u64,
}

/// Category → summed revenue
pub type SalesBreakdown = Tabulation<String, f64>;

/// Gender and customer-type frequency tables
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct Demographics {
    pub gender: FrequencyTable,
    pub customer_type: FrequencyTable,
}

/// Daily revenue, ascending by date.
///
/// Serialized as a list of `{"Date": "YYYY-MM-DD", "Total": n}` rows.
#[derive(Debug, Clone, PartialEq)]
pub struct DailySales(pub Tabulation<NaiveDate, f64>);

impl DailySales {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&NaiveDate, &f64)> {
        self.0.iter()
    }
}

struct DailyRow<'a> {
    date: &'a NaiveDate,
    total: f64,
}

impl Serialize for DailyRow<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut row = serializer.serialize_struct("DailyRow", 2)?;
        row.serialize_field("Date", &self.date.format("%Y-%m-%d").to_string())?;
        row.serialize_field("Total", &self.total)?;
        row.end()
    }
}

impl Serialize for DailySales {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.0.len()))?;
        for (date, total) in self.0.iter() {
            seq.serialize_element(&DailyRow {
                date,
                total: *total,
            })?;
        }
        seq.end()
    }
}

/// Rating means and the rating-value distribution
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct RatingsAnalysis {
    pub average_by_branch: Tabulation<String, MetricValue>,
    pub average_by_product: Tabulation<String, MetricValue>,
    /// Ascending by rating value
    pub rating_distribution: Tabulation<RatingValue, u64>,
}

/// Hour of day → summed revenue, ascending by hour
pub type HourlySales = Tabulation<u32, f64>;

/// Group → rounded metric block
pub type Performance<K> = Tabulation<K, Metrics>;

/// Distinct values the dashboard offers as filter choices
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct FilterOptions {
    pub branches: Vec<String>,
    pub product_lines: Vec<String>,
    pub customer_types: Vec<String>,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
}
