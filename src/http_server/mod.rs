//! # Query Gateway
//!
//! HTTP front end over the query catalog.
//!
//! # Endpoints
//!
//! - `/health` - Health check (reports `loading` until the dataset is in)
//! - `/api/<view>` - One endpoint per catalog view
//! - `/api/filter-options` - Distinct filter choices
//! - `/observability/metrics` - Query counters
//!
//! # Invariants
//!
//! - Every view endpoint answers 503 before the dataset is loaded
//! - Invalid filters answer 400 and never reach the catalog

mod analytics_routes;
mod errors;
mod observability_routes;

pub mod config;
pub mod server;

pub use analytics_routes::{analytics_routes, AnalyticsState};
pub use config::HttpServerConfig;
pub use errors::{ErrorResponse, GatewayError, GatewayResult};
pub use observability_routes::{
    health_routes, observability_routes, HealthResponse, ObservabilityState,
};
pub use server::HttpServer;
