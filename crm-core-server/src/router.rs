use axum::extract::DefaultBodyLimit;
use axum::middleware;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::auth::require_bearer;
use crate::routes::{customer_routes, health};
use crate::state::AppState;

/// Upper bound for request bodies, uploads included
pub const MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

/// Build the full router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    // Bearer token required; rejected before any extractor reads the body
    let protected = Router::new()
        .route("/api/customers", post(customer_routes::create_customer))
        .route(
            "/api/customers/:id",
            get(customer_routes::get_customer)
                .put(customer_routes::update_customer)
                .delete(customer_routes::delete_customer),
        )
        .route(
            "/api/customers/:id/status",
            get(customer_routes::status_details).post(customer_routes::change_status),
        )
        .route("/api/customers/:id/history", get(customer_routes::history))
        .route("/api/customers/:id/logo", post(customer_routes::upload_logo))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_bearer));

    let public = Router::new().route("/health", get(health::health));

    public
        .merge(protected)
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
