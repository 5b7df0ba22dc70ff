use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;

use crate::{AppState, middleware::log_requests, routes};

pub const BODY_LIMIT_BYTES: usize = 100 * 1024;

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(routes::health::health_check))
        .route("/token", post(routes::token::issue_token))
        .route("/call", post(routes::call::place_call))
        .layer(
            ServiceBuilder::new()
                .layer(axum::middleware::from_fn(log_requests))
                .layer(CorsLayer::permissive())
                .layer(DefaultBodyLimit::max(BODY_LIMIT_BYTES)),
        )
        .with_state(state)
}
