//! Transaction record model
//!
//! One immutable `Transaction` per source row. Records are validated by the
//! ingestion loader; nothing here re-checks them.

use chrono::{NaiveDate, NaiveTime, Timelike};
use serde::Serialize;

/// Opaque ordinal assigned at load time, stable within a process run
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct TransactionId(pub u64);

impl TransactionId {
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

/// A single retail transaction
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Transaction {
    pub id: TransactionId,
    /// Invoice identifier as printed in the source file
    pub invoice_id: String,
    pub branch: String,
    pub city: String,
    pub customer_type: String,
    pub gender: String,
    pub product_line: String,
    pub payment: String,
    pub date: NaiveDate,
    pub time_of_day: NaiveTime,
    pub unit_price: f64,
    pub quantity: f64,
    pub tax: f64,
    /// Authoritative revenue figure
    pub total: f64,
    pub cogs: f64,
    pub gross_income: f64,
    /// Customer rating in [0, 10]
    pub rating: f64,
}

impl Transaction {
    /// Hour of day (0-23) derived from `time_of_day`
    pub fn hour(&self) -> u32 {
        self.time_of_day.hour()
    }
}

/// Builder for transactions, used by the loader and by tests
#[derive(Debug, Clone)]
pub struct TransactionBuilder {
    inner: Transaction,
}

impl TransactionBuilder {
    /// Starts a record with the given branch and total; every other field
    /// takes a neutral default.
    pub fn new(branch: impl Into<String>, total: f64) -> Self {
        Self {
            inner: Transaction {
                id: TransactionId(0),
                invoice_id: String::new(),
                branch: branch.into(),
                city: String::new(),
                customer_type: "Normal".to_string(),
                gender: "Female".to_string(),
                product_line: "Health and beauty".to_string(),
                payment: "Cash".to_string(),
                date: NaiveDate::from_ymd_opt(2019, 1, 1).unwrap_or_default(),
                time_of_day: NaiveTime::from_hms_opt(12, 0, 0).unwrap_or_default(),
                unit_price: total,
                quantity: 1.0,
                tax: 0.0,
                total,
                cogs: total,
                gross_income: 0.0,
                rating: 0.0,
            },
        }
    }

    pub fn id(mut self, id: u64) -> Self {
        self.inner.id = TransactionId(id);
        self
    }

    pub fn invoice_id(mut self, invoice_id: impl Into<String>) -> Self {
        self.inner.invoice_id = invoice_id.into();
        self
    }

    pub fn city(mut self, city: impl Into<String>) -> Self {
        self.inner.city = city.into();
        self
    }

    pub fn customer_type(mut self, customer_type: impl Into<String>) -> Self {
        self.inner.customer_type = customer_type.into();
        self
    }

    pub fn gender(mut self, gender: impl Into<String>) -> Self {
        self.inner.gender = gender.into();
        self
    }

    pub fn product_line(mut self, product_line: impl Into<String>) -> Self {
        self.inner.product_line = product_line.into();
        self
    }

    pub fn payment(mut self, payment: impl Into<String>) -> Self {
        self.inner.payment = payment.into();
        self
    }

    pub fn date(mut self, date: NaiveDate) -> Self {
        self.inner.date = date;
        self
    }

    pub fn time_of_day(mut self, time: NaiveTime) -> Self {
        self.inner.time_of_day = time;
        self
    }

    pub fn unit_price(mut self, unit_price: f64) -> Self {
        self.inner.unit_price = unit_price;
        self
    }

    pub fn quantity(mut self, quantity: f64) -> Self {
        self.inner.quantity = quantity;
        self
    }

    pub fn tax(mut self, tax: f64) -> Self {
        self.inner.tax = tax;
        self
    }

    pub fn cogs(mut self, cogs: f64) -> Self {
        self.inner.cogs = cogs;
        self
    }

    pub fn gross_income(mut self, gross_income: f64) -> Self {
        self.inner.gross_income = gross_income;
        self
    }

    pub fn rating(mut self, rating: f64) -> Self {
        self.inner.rating = rating;
        self
    }

    pub fn build(self) -> Transaction {
        self.inner
    }
}
