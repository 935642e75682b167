//! Reduce step and tabulated results
//!
//! A [`ReduceSpec`] names each output field and the reducer that fills it.
//! Accumulation runs at full precision; rounding, when requested, happens once
//! on the finished metric.

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::store::Transaction;

use super::group::{GroupKey, Grouped};
use super::reducer::{sum, FrequencyTable, MetricValue, NumericAttribute, Reducer};

/// Output field name → reducer, in output order
#[derive(Debug, Clone, Default)]
pub struct ReduceSpec {
    fields: Vec<(String, Reducer)>,
    rounded: bool,
}

impl ReduceSpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(mut self, name: impl Into<String>, reducer: Reducer) -> Self {
        self.fields.push((name.into(), reducer));
        self
    }

    /// Round numeric outputs to two decimals, half away from zero
    pub fn rounded(mut self) -> Self {
        self.rounded = true;
        self
    }

    pub fn is_rounded(&self) -> bool {
        self.rounded
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &Reducer)> {
        self.fields.iter().map(|(n, r)| (n.as_str(), r))
    }
}

/// Named metrics for one bucket, in `ReduceSpec` field order
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Metrics {
    values: Vec<(String, MetricValue)>,
}

impl Metrics {
    pub fn get(&self, name: &str) -> Option<&MetricValue> {
        self.values.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    pub fn number(&self, name: &str) -> Option<f64> {
        self.get(name).and_then(MetricValue::as_number)
    }

    pub fn count(&self, name: &str) -> Option<u64> {
        self.get(name).and_then(MetricValue::as_count)
    }

    pub fn frequency(&self, name: &str) -> Option<&FrequencyTable> {
        self.get(name).and_then(MetricValue::as_frequency)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &MetricValue)> {
        self.values.iter().map(|(n, v)| (n.as_str(), v))
    }
}

impl Serialize for Metrics {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.values.len()))?;
        for (name, value) in &self.values {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

/// Applies every reducer in `spec` to `bucket`.
///
/// Never fails: a mean over an empty bucket is recorded as
/// `MetricValue::Undefined` and the other fields are still computed.
pub fn reduce(bucket: &[&Transaction], spec: &ReduceSpec) -> Metrics {
    let values = spec
        .fields
        .iter()
        .map(|(name, reducer)| {
            let value = reducer.apply(bucket);
            let value = if spec.rounded { value.rounded() } else { value };
            (name.clone(), value)
        })
        .collect();

    Metrics { values }
}

/// Ordered mapping from group key to a value
#[derive(Debug, Clone, PartialEq)]
pub struct Tabulation<K, V> {
    entries: Vec<(K, V)>,
}

impl<K, V> Tabulation<K, V> {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.entries.iter().map(|(k, _)| k)
    }

    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.entries.iter().map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.entries.iter().map(|(k, v)| (k, v))
    }

    pub fn get(&self, key: &K) -> Option<&V>
    where
        K: PartialEq,
    {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Transforms every value, keeping keys and order
    pub fn map_values<W>(self, f: impl Fn(V) -> W) -> Tabulation<K, W> {
        Tabulation {
            entries: self.entries.into_iter().map(|(k, v)| (k, f(v))).collect(),
        }
    }
}

impl<K, V> FromIterator<(K, V)> for Tabulation<K, V> {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl<K: GroupKey, V: Serialize> Serialize for Tabulation<K, V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(&key.label(), value)?;
        }
        map.end()
    }
}

impl<'a, K: Clone> Grouped<'a, K> {
    /// Reduces every group with the same spec
    pub fn reduce(&self, spec: &ReduceSpec) -> Tabulation<K, Metrics> {
        self.iter()
            .map(|(key, bucket)| (key.clone(), reduce(bucket, spec)))
            .collect()
    }

    /// Applies a single reducer to every group
    pub fn reduce_with(&self, reducer: Reducer) -> Tabulation<K, MetricValue> {
        self.iter()
            .map(|(key, bucket)| (key.clone(), reducer.apply(bucket)))
            .collect()
    }

    /// Per-group sum of one attribute
    pub fn sum(&self, attr: NumericAttribute) -> Tabulation<K, f64> {
        self.iter()
            .map(|(key, bucket)| (key.clone(), sum(bucket, attr)))
            .collect()
    }

    /// Per-group record count
    pub fn count(&self) -> Tabulation<K, u64> {
        self.iter()
            .map(|(key, bucket)| (key.clone(), bucket.len() as u64))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregation::{group_by, CategoryAttribute, NumericAttribute};
    use crate::store::TransactionBuilder;

    fn records() -> Vec<Transaction> {
        vec![
            TransactionBuilder::new("A", 10.004).quantity(2.0).rating(8.0).build(),
            TransactionBuilder::new("A", 5.0).quantity(1.0).rating(6.0).build(),
            TransactionBuilder::new("B", 7.0).quantity(4.0).rating(9.0).build(),
        ]
    }

    fn spec() -> ReduceSpec {
        ReduceSpec::new()
            .field("Total", Reducer::Sum(NumericAttribute::Total))
            .field("Rating", Reducer::Mean(NumericAttribute::Rating))
            .field("n", Reducer::Count)
            .field("branches", Reducer::DistinctCount(CategoryAttribute::Branch))
    }

    #[test]
    fn test_reduce_frequency_field() {
        let records = vec![
            TransactionBuilder::new("A", 1.0).gender("Female").build(),
            TransactionBuilder::new("A", 1.0).gender("Male").build(),
            TransactionBuilder::new("B", 1.0).gender("Female").build(),
        ];
        let bucket: Vec<_> = records.iter().collect();
        let spec = ReduceSpec::new()
            .field("gender", Reducer::Frequency(CategoryAttribute::Gender))
            .field("n", Reducer::Count)
            .rounded();
        let metrics = reduce(&bucket, &spec);

        let gender = metrics.frequency("gender").unwrap();
        assert_eq!(gender.get("Female"), Some(2));
        assert!(metrics.frequency("n").is_none());
        assert_eq!(
            serde_json::to_string(&metrics).unwrap(),
            r#"{"gender":{"Female":2,"Male":1},"n":3}"#
        );
    }

    #[test]
    fn test_reduce_whole_bucket() {
        let records = records();
        let bucket: Vec<_> = records.iter().collect();
        let metrics = reduce(&bucket, &spec());

        assert!((metrics.number("Total").unwrap() - 22.004).abs() < 1e-9);
        assert_eq!(metrics.count("n"), Some(3));
        assert_eq!(metrics.count("branches"), Some(2));
        let names: Vec<_> = metrics.iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["Total", "Rating", "n", "branches"]);
    }

    #[test]
    fn test_reduce_empty_bucket_keeps_other_metrics() {
        let metrics = reduce(&[], &spec());
        assert_eq!(metrics.number("Total"), Some(0.0));
        assert!(metrics.get("Rating").unwrap().is_undefined());
        assert_eq!(metrics.count("n"), Some(0));
    }

    #[test]
    fn test_rounding_applies_at_output() {
        let records = records();
        let bucket: Vec<_> = records.iter().collect();
        let metrics = reduce(&bucket, &spec().rounded());
        assert_eq!(metrics.number("Total"), Some(22.0));
        assert_eq!(metrics.number("Rating"), Some(7.67));
    }

    #[test]
    fn test_grouped_reduce_serializes_in_order() {
        let records = records();
        let table = group_by(&records, |t| t.branch.clone())
            .reduce(&ReduceSpec::new().field("Quantity", Reducer::Sum(NumericAttribute::Quantity)));
        let json = serde_json::to_string(&table).unwrap();
        assert_eq!(json, r#"{"A":{"Quantity":3.0},"B":{"Quantity":4.0}}"#);
    }
}
