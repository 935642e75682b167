//! Filter predicate over transactions
//!
//! Five optional criteria combined with AND. An absent criterion places no
//! restriction on its dimension. There is no OR and no negation.

use chrono::NaiveDate;

use crate::store::{RecordStore, Transaction};

use super::errors::{FilterError, FilterResult};

/// One optional filter criterion
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Criterion<T> {
    /// No restriction on this dimension
    #[default]
    Any,
    /// Only values equal to this one pass
    Exactly(T),
}

impl<T> Criterion<T> {
    pub fn is_any(&self) -> bool {
        matches!(self, Criterion::Any)
    }

    pub fn value(&self) -> Option<&T> {
        match self {
            Criterion::Any => None,
            Criterion::Exactly(v) => Some(v),
        }
    }
}

impl<T> From<Option<T>> for Criterion<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => Criterion::Exactly(v),
            None => Criterion::Any,
        }
    }
}

impl Criterion<String> {
    fn admits(&self, actual: &str) -> bool {
        match self {
            Criterion::Any => true,
            Criterion::Exactly(expected) => expected == actual,
        }
    }
}

/// Composable AND-combination of optional equality and date-range criteria
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FilterPredicate {
    branch: Criterion<String>,
    product_line: Criterion<String>,
    customer_type: Criterion<String>,
    date_from: Option<NaiveDate>,
    date_to: Option<NaiveDate>,
}

impl FilterPredicate {
    /// A predicate that matches every record
    pub fn all() -> Self {
        Self::default()
    }

    pub fn with_branch(mut self, branch: impl Into<String>) -> Self {
        self.branch = Criterion::Exactly(branch.into());
        self
    }

    pub fn with_product_line(mut self, product_line: impl Into<String>) -> Self {
        self.product_line = Criterion::Exactly(product_line.into());
        self
    }

    pub fn with_customer_type(mut self, customer_type: impl Into<String>) -> Self {
        self.customer_type = Criterion::Exactly(customer_type.into());
        self
    }

    /// Sets the inclusive date range.
    ///
    /// Fails with `SALES_INVALID_DATE_BOUND` when `from` is later than `to`.
    pub fn with_date_range(
        mut self,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> FilterResult<Self> {
        if let (Some(f), Some(t)) = (from, to) {
            if f > t {
                return Err(FilterError::inverted_range(f, t));
            }
        }
        self.date_from = from;
        self.date_to = to;
        Ok(self)
    }

    pub fn branch(&self) -> &Criterion<String> {
        &self.branch
    }

    pub fn product_line(&self) -> &Criterion<String> {
        &self.product_line
    }

    pub fn customer_type(&self) -> &Criterion<String> {
        &self.customer_type
    }

    pub fn date_from(&self) -> Option<NaiveDate> {
        self.date_from
    }

    pub fn date_to(&self) -> Option<NaiveDate> {
        self.date_to
    }

    /// Returns true if no criterion restricts anything
    pub fn is_unrestricted(&self) -> bool {
        self.branch.is_any()
            && self.product_line.is_any()
            && self.customer_type.is_any()
            && self.date_from.is_none()
            && self.date_to.is_none()
    }

    /// Checks a single record against every criterion
    pub fn matches(&self, record: &Transaction) -> bool {
        self.branch.admits(&record.branch)
            && self.product_line.admits(&record.product_line)
            && self.customer_type.admits(&record.customer_type)
            && self.date_from.map_or(true, |from| record.date >= from)
            && self.date_to.map_or(true, |to| record.date <= to)
    }

    /// Scans the whole store and keeps matching records in store order.
    pub fn apply<'a>(&self, store: &'a RecordStore) -> Selection<'a> {
        let mut records = Vec::new();
        let mut scanned = 0;

        for record in store.iter() {
            scanned += 1;
            if self.matches(record) {
                records.push(record);
            }
        }

        Selection { records, scanned }
    }
}

/// Records that passed a predicate, in original store order
#[derive(Debug, Clone)]
pub struct Selection<'a> {
    records: Vec<&'a Transaction>,
    scanned: usize,
}

impl<'a> Selection<'a> {
    pub fn records(&self) -> &[&'a Transaction] {
        &self.records
    }

    /// Number of store records examined to build this selection
    pub fn scanned(&self) -> usize {
        self.scanned
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a Transaction> + '_ {
        self.records.iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::FilterErrorCode;
    use crate::store::TransactionBuilder;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2019, 3, d).unwrap()
    }

    fn store() -> RecordStore {
        vec![
            TransactionBuilder::new("A", 10.0)
                .id(0)
                .customer_type("Member")
                .date(day(1))
                .build(),
            TransactionBuilder::new("B", 7.0)
                .id(1)
                .product_line("Food and beverages")
                .date(day(2))
                .build(),
            TransactionBuilder::new("A", 5.0)
                .id(2)
                .product_line("Food and beverages")
                .date(day(3))
                .build(),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_unrestricted_matches_everything() {
        let store = store();
        let selection = FilterPredicate::all().apply(&store);
        assert_eq!(selection.len(), 3);
        assert_eq!(selection.scanned(), 3);
        assert!(FilterPredicate::all().is_unrestricted());
    }

    #[test]
    fn test_equality_criteria_and_combined() {
        let store = store();
        let predicate = FilterPredicate::all()
            .with_branch("A")
            .with_product_line("Food and beverages");
        let ids: Vec<_> = predicate.apply(&store).iter().map(|t| t.id.0).collect();
        assert_eq!(ids, vec![2]);
    }

    #[test]
    fn test_customer_type_exact_match() {
        let store = store();
        let predicate = FilterPredicate::all().with_customer_type("member");
        assert!(predicate.apply(&store).is_empty());
    }

    #[test]
    fn test_date_bounds_inclusive() {
        let store = store();
        let predicate = FilterPredicate::all()
            .with_date_range(Some(day(2)), Some(day(3)))
            .unwrap();
        let ids: Vec<_> = predicate.apply(&store).iter().map(|t| t.id.0).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn test_single_sided_date_bound() {
        let store = store();
        let predicate = FilterPredicate::all()
            .with_date_range(None, Some(day(1)))
            .unwrap();
        assert_eq!(predicate.apply(&store).len(), 1);
    }

    #[test]
    fn test_inverted_range_rejected() {
        let err = FilterPredicate::all()
            .with_date_range(Some(day(3)), Some(day(1)))
            .unwrap_err();
        assert_eq!(err.code(), FilterErrorCode::SalesInvalidDateBound);
    }

    #[test]
    fn test_no_match_is_empty_not_error() {
        let store = store();
        let selection = FilterPredicate::all().with_branch("Z").apply(&store);
        assert!(selection.is_empty());
        assert_eq!(selection.scanned(), 3);
    }

    #[test]
    fn test_criterion_from_option() {
        assert_eq!(Criterion::from(Some(3)), Criterion::Exactly(3));
        assert!(Criterion::<u8>::from(None).is_any());
    }
}
