use axum::{middleware, routing::get, Router};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::middleware::session::{make_span_with_session_id, session_middleware};

use super::handlers;
use super::AppState;

/// Creates the main API router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/api/v1", api_routes())
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(middleware::from_fn(session_middleware))
                .layer(TraceLayer::new_for_http().make_span_with(make_span_with_session_id))
                .layer(CorsLayer::permissive()),
        )
}

/// API routes under /api/v1
fn api_routes() -> Router<AppState> {
    Router::new()
        // Category selector and catalog
        .route("/categories", get(handlers::get_categories))
        .route("/categories/:category/titles", get(handlers::get_titles))
        .route("/categories/:category/top-rated", get(handlers::get_top_rated))
        .route(
            "/categories/:category/recommendations",
            get(handlers::get_recommendations),
        )
        // Metadata lookup
        .route("/metadata", get(handlers::get_metadata))
        // Session selection
        .route(
            "/selection",
            get(handlers::get_selection)
                .put(handlers::put_selection)
                .delete(handlers::delete_selection),
        )
}
