//! Router assembly.

use axum::extract::DefaultBodyLimit;
use axum::http::{header, HeaderValue, Method};
use axum::routing::{get, post};
use axum::{middleware, Router};
use std::time::Duration;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::config::{ApiConfig, CorsConfig};
use crate::handlers;
use crate::middleware::request_id;
use crate::state::AppState;

/// Build the application router
pub fn router(state: AppState, config: &ApiConfig) -> Router {
    Router::new()
        .route("/compare-pose/", post(handlers::compare_pose))
        .route("/feedback/", post(handlers::feedback))
        .route("/current-pose/", get(handlers::current_pose))
        .route("/health", get(handlers::health))
        .layer(middleware::from_fn(request_id))
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(Duration::from_secs(config.http.timeout_secs)))
        .layer(DefaultBodyLimit::max(config.http.max_body_size))
        .layer(cors_layer(&config.cors))
        .with_state(state)
}

fn cors_layer(config: &CorsConfig) -> CorsLayer {
    let origins = if config.allowed_origins.iter().any(|origin| origin == "*") {
        AllowOrigin::any()
    } else {
        let origins: Vec<HeaderValue> = config
            .allowed_origins
            .iter()
            .filter_map(|origin| match origin.parse() {
                Ok(value) => Some(value),
                Err(_) => {
                    tracing::warn!("Ignoring invalid CORS origin {:?}", origin);
                    None
                }
            })
            .collect();
        AllowOrigin::list(origins)
    };

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
        .max_age(Duration::from_secs(config.max_age_secs))
}
