//! Group-by over a record subset
//!
//! Keys compare by value. Groups keep the order in which their key first
//! appeared; `sorted` reorders them for views that need ascending keys.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;
use std::hash::{Hash, Hasher};

use chrono::NaiveDate;

use crate::store::Transaction;

/// A key that can be rendered as an output label
pub trait GroupKey {
    fn label(&self) -> String;
}

impl GroupKey for String {
    fn label(&self) -> String {
        self.clone()
    }
}

impl GroupKey for NaiveDate {
    fn label(&self) -> String {
        self.format("%Y-%m-%d").to_string()
    }
}

impl GroupKey for u32 {
    fn label(&self) -> String {
        self.to_string()
    }
}

/// Separator used when rendering composite keys
pub const COMPOSITE_SEPARATOR: char = '|';

impl GroupKey for (String, String) {
    fn label(&self) -> String {
        format!("{}{}{}", self.0, COMPOSITE_SEPARATOR, self.1)
    }
}

/// A rating used as a group key.
///
/// `-0.0` and `0.0` are the same key. Past that, equality and hashing use the
/// bit pattern and ordering is the IEEE total order, so ascending sorts are
/// deterministic.
#[derive(Debug, Clone, Copy)]
pub struct RatingValue(pub f64);

impl RatingValue {
    /// The rating with negative zero folded into zero
    pub fn value(&self) -> f64 {
        if self.0 == 0.0 {
            0.0
        } else {
            self.0
        }
    }
}

impl PartialEq for RatingValue {
    fn eq(&self, other: &Self) -> bool {
        self.value().to_bits() == other.value().to_bits()
    }
}

impl Eq for RatingValue {}

impl Hash for RatingValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.value().to_bits().hash(state);
    }
}

impl PartialOrd for RatingValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for RatingValue {
    fn cmp(&self, other: &Self) -> Ordering {
        self.value().total_cmp(&other.value())
    }
}

impl fmt::Display for RatingValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.value())
    }
}

impl GroupKey for RatingValue {
    fn label(&self) -> String {
        self.to_string()
    }
}

/// Records bucketed by key
#[derive(Debug, Clone)]
pub struct Grouped<'a, K> {
    groups: Vec<(K, Vec<&'a Transaction>)>,
}

/// Buckets records by `key_fn`, preserving first-occurrence order of keys.
///
/// Only keys that occur produce a group, so no bucket is ever empty.
pub fn group_by<'a, K, F, I>(records: I, key_fn: F) -> Grouped<'a, K>
where
    K: Eq + Hash + Clone,
    F: Fn(&Transaction) -> K,
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut index: HashMap<K, usize> = HashMap::new();
    let mut groups: Vec<(K, Vec<&'a Transaction>)> = Vec::new();

    for record in records {
        let key = key_fn(record);
        match index.get(&key) {
            Some(&slot) => groups[slot].1.push(record),
            None => {
                index.insert(key.clone(), groups.len());
                groups.push((key, vec![record]));
            }
        }
    }

    Grouped { groups }
}

impl<'a, K> Grouped<'a, K> {
    /// Reorders groups by ascending key (stable)
    pub fn sorted(mut self) -> Self
    where
        K: Ord,
    {
        self.groups.sort_by(|a, b| a.0.cmp(&b.0));
        self
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.groups.iter().map(|(k, _)| k)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, &[&'a Transaction])> {
        self.groups.iter().map(|(k, bucket)| (k, bucket.as_slice()))
    }

    pub fn bucket(&self, key: &K) -> Option<&[&'a Transaction]>
    where
        K: PartialEq,
    {
        self.groups
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, bucket)| bucket.as_slice())
    }
}
