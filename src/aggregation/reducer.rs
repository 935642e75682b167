//! Reducers and the attributes they read
//!
//! A reducer folds a bucket of records into one metric. Reducers are pure and
//! do not depend on traversal order beyond floating-point rounding, which the
//! compensated sum keeps below output precision.

use std::collections::HashSet;

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::store::Transaction;

use super::errors::{AggregateError, AggregateResult};

/// Numeric transaction attributes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumericAttribute {
    Quantity,
    Total,
    GrossIncome,
    Rating,
}

impl NumericAttribute {
    pub fn extract(&self, record: &Transaction) -> f64 {
        match self {
            NumericAttribute::Quantity => record.quantity,
            NumericAttribute::Total => record.total,
            NumericAttribute::GrossIncome => record.gross_income,
            NumericAttribute::Rating => record.rating,
        }
    }

    /// Column name as it appears in the source file
    pub fn column(&self) -> &'static str {
        match self {
            NumericAttribute::Quantity => "Quantity",
            NumericAttribute::Total => "Total",
            NumericAttribute::GrossIncome => "gross income",
            NumericAttribute::Rating => "Rating",
        }
    }
}

/// Categorical transaction attributes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CategoryAttribute {
    Branch,
    ProductLine,
    CustomerType,
    Gender,
    Payment,
}

impl CategoryAttribute {
    pub fn extract<'a>(&self, record: &'a Transaction) -> &'a str {
        match self {
            CategoryAttribute::Branch => &record.branch,
            CategoryAttribute::ProductLine => &record.product_line,
            CategoryAttribute::CustomerType => &record.customer_type,
            CategoryAttribute::Gender => &record.gender,
            CategoryAttribute::Payment => &record.payment,
        }
    }

    pub fn column(&self) -> &'static str {
        match self {
            CategoryAttribute::Branch => "Branch",
            CategoryAttribute::ProductLine => "Product line",
            CategoryAttribute::CustomerType => "Customer type",
            CategoryAttribute::Gender => "Gender",
            CategoryAttribute::Payment => "Payment",
        }
    }
}

/// A reducer bound to the attribute it reads
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reducer {
    Sum(NumericAttribute),
    /// Sum of a count-like attribute; whole results come out as integers
    Tally(NumericAttribute),
    Mean(NumericAttribute),
    Count,
    DistinctCount(CategoryAttribute),
    Frequency(CategoryAttribute),
}

impl Reducer {
    /// Folds a bucket into a single metric.
    ///
    /// An empty-bucket mean becomes `MetricValue::Undefined`.
    pub fn apply(&self, bucket: &[&Transaction]) -> MetricValue {
        match self {
            Reducer::Sum(attr) => MetricValue::Number(sum(bucket, *attr)),
            Reducer::Tally(attr) => MetricValue::whole_or_number(sum(bucket, *attr)),
            Reducer::Mean(attr) => match mean(bucket, *attr) {
                Ok(value) => MetricValue::Number(value),
                Err(_) => MetricValue::Undefined,
            },
            Reducer::Count => MetricValue::Count(bucket.len() as u64),
            Reducer::DistinctCount(attr) => MetricValue::Count(distinct_count(bucket, *attr)),
            Reducer::Frequency(attr) => MetricValue::Frequency(frequency(bucket, *attr)),
        }
    }
}

/// Neumaier-compensated running sum
#[derive(Debug, Clone, Copy, Default)]
pub struct Accumulator {
    sum: f64,
    compensation: f64,
}

impl Accumulator {
    pub fn add(&mut self, value: f64) {
        let t = self.sum + value;
        if self.sum.abs() >= value.abs() {
            self.compensation += (self.sum - t) + value;
        } else {
            self.compensation += (value - t) + self.sum;
        }
        self.sum = t;
    }

    pub fn value(&self) -> f64 {
        self.sum + self.compensation
    }
}

pub fn sum(bucket: &[&Transaction], attr: NumericAttribute) -> f64 {
    let mut acc = Accumulator::default();
    for record in bucket {
        acc.add(attr.extract(record));
    }
    acc.value()
}

/// Mean computed as sum / count
pub fn mean(bucket: &[&Transaction], attr: NumericAttribute) -> AggregateResult<f64> {
    if bucket.is_empty() {
        return Err(AggregateError::empty_mean(attr.column()));
    }
    Ok(sum(bucket, attr) / bucket.len() as f64)
}

pub fn distinct_count(bucket: &[&Transaction], attr: CategoryAttribute) -> u64 {
    bucket
        .iter()
        .map(|record| attr.extract(record))
        .collect::<HashSet<_>>()
        .len() as u64
}

/// Counts per category value, in order of first occurrence
pub fn frequency(bucket: &[&Transaction], attr: CategoryAttribute) -> FrequencyTable {
    let mut table = FrequencyTable::default();
    for record in bucket {
        table.increment(attr.extract(record));
    }
    table
}

/// Rounds half away from zero to two decimal places
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Ordered value → count table
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrequencyTable {
    entries: Vec<(String, u64)>,
}

impl FrequencyTable {
    fn increment(&mut self, value: &str) {
        match self.entries.iter_mut().find(|(k, _)| k == value) {
            Some((_, count)) => *count += 1,
            None => self.entries.push((value.to_string(), 1)),
        }
    }

    pub fn get(&self, value: &str) -> Option<u64> {
        self.entries
            .iter()
            .find(|(k, _)| k == value)
            .map(|(_, count)| *count)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn total(&self) -> u64 {
        self.entries.iter().map(|(_, c)| c).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.entries.iter().map(|(k, c)| (k.as_str(), *c))
    }
}

impl Serialize for FrequencyTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (value, count) in &self.entries {
            map.serialize_entry(value, count)?;
        }
        map.end()
    }
}

/// One computed metric
#[derive(Debug, Clone, PartialEq)]
pub enum MetricValue {
    Number(f64),
    Count(u64),
    /// Mean over zero records
    Undefined,
    Frequency(FrequencyTable),
}

impl MetricValue {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            MetricValue::Number(v) => Some(*v),
            MetricValue::Count(c) => Some(*c as f64),
            _ => None,
        }
    }

    pub fn as_count(&self) -> Option<u64> {
        match self {
            MetricValue::Count(c) => Some(*c),
            _ => None,
        }
    }

    pub fn as_frequency(&self) -> Option<&FrequencyTable> {
        match self {
            MetricValue::Frequency(table) => Some(table),
            _ => None,
        }
    }

    /// `Count` when `value` is a non-negative whole number, `Number` otherwise
    pub fn whole_or_number(value: f64) -> Self {
        if value >= 0.0 && value.fract() == 0.0 && value <= u64::MAX as f64 {
            MetricValue::Count(value as u64)
        } else {
            MetricValue::Number(value)
        }
    }

    pub fn is_undefined(&self) -> bool {
        matches!(self, MetricValue::Undefined)
    }

    pub(crate) fn rounded(self) -> Self {
        match self {
            MetricValue::Number(v) => MetricValue::Number(round2(v)),
            other => other,
        }
    }
}

impl Serialize for MetricValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            MetricValue::Number(v) => serializer.serialize_f64(*v),
            MetricValue::Count(c) => serializer.serialize_u64(*c),
            MetricValue::Undefined => serializer.serialize_none(),
            MetricValue::Frequency(table) => table.serialize(serializer),
        }
    }
}
