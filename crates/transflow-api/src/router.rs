//! Axum router construction for the query API.
//!
//! Assembles all REST routes into a single [`Router`] with CORS enabled
//! for cross-origin dashboard access and HTTP request tracing.

use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Build the complete Axum router for the query API.
///
/// Static segments take precedence over captures, so
/// `/domains/{domain}/first` is matched before `/domains/{domain}/{id}`.
pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/status", get(handlers::status))
        .route("/api/simulations", get(handlers::list_simulations))
        // Vehicles
        .route(
            "/api/simulations/{sim}/vehicles",
            get(handlers::list_vehicles),
        )
        .route(
            "/api/simulations/{sim}/vehicles/{id}/series",
            get(handlers::get_vehicle_series),
        )
        .route(
            "/api/simulations/{sim}/vehicles/{id}/at/{t}",
            get(handlers::get_vehicle_at),
        )
        .route(
            "/api/simulations/{sim}/vehicles/{id}/range",
            get(handlers::get_vehicle_range),
        )
        .route(
            "/api/simulations/{sim}/vehicle-types",
            get(handlers::list_vehicle_types),
        )
        .route(
            "/api/simulations/{sim}/vehicle-types/{id}",
            get(handlers::get_vehicle_type),
        )
        // Any domain
        .route(
            "/api/simulations/{sim}/domains/{domain}",
            get(handlers::list_domain_entities),
        )
        .route(
            "/api/simulations/{sim}/domains/{domain}/first",
            get(handlers::list_domain_first_snapshots),
        )
        .route(
            "/api/simulations/{sim}/domains/{domain}/{id}",
            get(handlers::get_domain_series),
        )
        .route(
            "/api/simulations/{sim}/domains/{domain}/{id}/at/{t}",
            get(handlers::get_domain_snapshot),
        )
        .route(
            "/api/simulations/{sim}/domains/{domain}/{id}/range",
            get(handlers::get_domain_range),
        )
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
