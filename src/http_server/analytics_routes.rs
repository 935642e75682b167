//! Analytics HTTP Routes
//!
//! One GET endpoint per catalog view under `/api`, plus the filter choices
//! the dashboard renders. All endpoints take the same query parameters:
//! `branch`, `product_line`, `customer_type` (`all` or empty means any),
//! and `date_from` / `date_to` as `YYYY-MM-DD`.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};

use crate::catalog::{self, FilterOptions, View, ViewResult};
use crate::filter::FilterParams;
use crate::observability::{Event, Logger, MetricsRegistry, ObservationScope};
use crate::store::StoreGate;

use super::errors::{GatewayError, GatewayResult};

// ==================
// Shared State
// ==================

/// Analytics state shared across handlers
pub struct AnalyticsState {
    pub gate: Arc<StoreGate>,
    pub metrics: Arc<MetricsRegistry>,
}

impl AnalyticsState {
    pub fn new(gate: Arc<StoreGate>, metrics: Arc<MetricsRegistry>) -> Self {
        Self { gate, metrics }
    }
}

// ==================
// Router
// ==================

/// Create analytics routes (nested under `/api`)
pub fn analytics_routes(state: Arc<AnalyticsState>) -> Router {
    let mut router = Router::new().route("/filter-options", get(filter_options_handler));

    for view in View::ALL {
        router = router.route(
            &format!("/{}", view.name()),
            get(
                move |state: State<Arc<AnalyticsState>>, params: Query<FilterParams>| {
                    view_handler(view, state, params)
                },
            ),
        );
    }

    // Lookup by catalog name; unknown names are 404
    router
        .route("/views/:name", get(named_view_handler))
        .with_state(state)
}

// ==================
// Handlers
// ==================

async fn view_handler(
    view: View,
    State(state): State<Arc<AnalyticsState>>,
    Query(params): Query<FilterParams>,
) -> GatewayResult<(StatusCode, Json<ViewResult>)> {
    run_view(&state, view, params).await
}

async fn named_view_handler(
    State(state): State<Arc<AnalyticsState>>,
    Path(name): Path<String>,
    Query(params): Query<FilterParams>,
) -> GatewayResult<(StatusCode, Json<ViewResult>)> {
    let view: View = name.parse()?;
    run_view(&state, view, params).await
}

async fn filter_options_handler(
    State(state): State<Arc<AnalyticsState>>,
) -> GatewayResult<(StatusCode, Json<FilterOptions>)> {
    let store = state.gate.get().inspect_err(|_| {
        state.metrics.increment_queries_not_ready();
    })?;
    Ok((StatusCode::OK, Json(catalog::filter_options(&store))))
}

/// Validate, evaluate off the async workers, and account for the query.
async fn run_view(
    state: &AnalyticsState,
    view: View,
    params: FilterParams,
) -> GatewayResult<(StatusCode, Json<ViewResult>)> {
    let store = match state.gate.get() {
        Ok(store) => store,
        Err(err) => {
            state.metrics.increment_queries_not_ready();
            Logger::warn(Event::QueryNotReady.as_str(), &[("view", view.name())]);
            return Err(err.into());
        }
    };

    let predicate = match params.to_predicate() {
        Ok(predicate) => predicate,
        Err(err) => {
            state.metrics.increment_queries_rejected();
            Logger::warn(
                Event::QueryRejected.as_str(),
                &[("view", view.name()), ("reason", err.message())],
            );
            return Err(err.into());
        }
    };

    let scope = ObservationScope::with_fields("QUERY", &[("view", view.name())]);
    let scanned = store.len() as u64;

    let result = tokio::task::spawn_blocking(move || view.evaluate(&store, &predicate))
        .await
        .map_err(|e| GatewayError::Internal(e.to_string()));

    match result {
        Ok(result) => {
            state.metrics.record_query(scanned);
            let groups = result.group_count().to_string();
            scope.complete(&[("groups", groups.as_str())]);
            Ok((StatusCode::OK, Json(result)))
        }
        Err(err) => {
            scope.fail(&err.to_string());
            Err(err)
        }
    }
}
