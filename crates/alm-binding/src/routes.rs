//! Router assembly.

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::services::BindingService;
use crate::state::AppState;

/// Build the application router with all routes.
pub fn build_router(state: AppState, binding_service: BindingService) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Health check routes (no actor required)
    let health_routes = Router::new()
        .route("/health", get(handlers::health_check))
        .route("/api/health", get(handlers::api_health))
        .with_state(state);

    let binding_routes = Router::new()
        .route(
            "/api/alm_settings/set_binding",
            post(handlers::bindings::set_binding),
        )
        .route(
            "/api/alm_settings/delete_binding",
            post(handlers::bindings::delete_binding),
        )
        .route(
            "/api/alm_settings/count_binding",
            get(handlers::bindings::count_binding),
        )
        .route(
            "/api/alm_settings/get_binding",
            get(handlers::bindings::get_binding),
        )
        .with_state(binding_service);

    Router::new()
        .merge(health_routes)
        .merge(binding_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
