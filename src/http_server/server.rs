//! # HTTP Server
//!
//! Combines the analytics and observability routers behind one CORS layer.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

use crate::observability::{Event, Logger, MetricsRegistry};
use crate::store::StoreGate;

use super::analytics_routes::{analytics_routes, AnalyticsState};
use super::config::HttpServerConfig;
use super::observability_routes::{health_routes, observability_routes, ObservabilityState};

/// HTTP server for the sales dashboard
pub struct HttpServer {
    config: HttpServerConfig,
    router: Router,
}

impl HttpServer {
    /// Create a server over `gate`. Queries answer 503 until the gate is set.
    pub fn new(
        config: HttpServerConfig,
        gate: Arc<StoreGate>,
        metrics: Arc<MetricsRegistry>,
    ) -> Self {
        let router = Self::build_router(&config, gate, metrics);
        Self { config, router }
    }

    fn build_router(
        config: &HttpServerConfig,
        gate: Arc<StoreGate>,
        metrics: Arc<MetricsRegistry>,
    ) -> Router {
        let analytics_state = Arc::new(AnalyticsState::new(gate.clone(), metrics.clone()));
        let observability_state = Arc::new(ObservabilityState { gate, metrics });

        let cors = if config.cors_origins.is_empty() {
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        } else {
            let origins: Vec<_> = config
                .cors_origins
                .iter()
                .filter_map(|s| s.parse().ok())
                .collect();

            CorsLayer::new()
                .allow_origin(AllowOrigin::list(origins))
                .allow_methods(Any)
                .allow_headers(Any)
        };

        Router::new()
            .merge(health_routes(observability_state.clone()))
            .nest("/api", analytics_routes(analytics_state))
            .nest("/observability", observability_routes(observability_state))
            .layer(cors)
    }

    /// Get the socket address
    pub fn socket_addr(&self) -> String {
        self.config.socket_addr()
    }

    /// Get the router (for testing)
    pub fn router(self) -> Router {
        self.router
    }

    /// Bind and serve until the process exits
    pub async fn start(self) -> Result<(), std::io::Error> {
        let addr: SocketAddr = self.config.socket_addr().parse().map_err(|e| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("invalid socket address '{}': {}", self.config.socket_addr(), e),
            )
        })?;

        let listener = TcpListener::bind(addr).await?;
        let shown = addr.to_string();
        Logger::info(Event::Serving.as_str(), &[("addr", shown.as_str())]);

        axum::serve(listener, self.router).await?;

        Ok(())
    }
}
