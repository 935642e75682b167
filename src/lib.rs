//! salesdb - filterable aggregation over retail sales transactions
//!
//! Core: an immutable record store, a conjunctive filter predicate and a
//! generic group-by/reduce pipeline, composed into a catalog of named views.
//! Edges: CSV ingestion, an HTTP query gateway and a CLI.

pub mod aggregation;
pub mod catalog;
pub mod filter;
pub mod store;

pub mod ingestion;
pub mod observability;

pub mod cli;
pub mod http_server;
