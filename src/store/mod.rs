//! Record Store subsystem
//!
//! Holds the immutable, ordered collection of transactions produced by the
//! ingestion loader, plus the readiness gate that guards first access.
//!
//! # Invariants
//!
//! - Insertion order equals source order
//! - Read-only after construction; lifetime equals process lifetime
//! - Queries are accepted only after the gate is opened

mod errors;
mod record;
mod store;

pub use errors::{StoreError, StoreErrorCode, StoreResult};
pub use record::{Transaction, TransactionBuilder, TransactionId};
pub use store::{RecordStore, StoreGate};
