//! Axum application setup
//!
//! Creates and configures the Axum application with routes and middleware.

use crate::{Result, config::Settings, resolver::ConfigResolver};
use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Configuration resolver
    pub resolver: Arc<ConfigResolver>,
    /// Application settings
    pub settings: Arc<Settings>,
    /// Server start time for uptime calculation
    pub start_time: std::time::Instant,
}

/// Create the main Axum application with routes and middleware
pub fn create_app(settings: Settings) -> Result<Router> {
    let resolver = ConfigResolver::new(settings)?;
    Ok(create_app_with_resolver(resolver))
}

/// Create the application around an existing resolver
pub fn create_app_with_resolver(resolver: ConfigResolver) -> Router {
    let settings = Arc::new(resolver.settings().clone());
    let enable_cors = settings.server.enable_cors;
    let request_timeout = settings.server.timeout;

    let state = AppState {
        resolver: Arc::new(resolver),
        settings,
        start_time: std::time::Instant::now(),
    };

    let router = Router::new()
        .route(
            "/atera/v1/calculator-config",
            get(super::handlers::calculator_config),
        )
        .route(
            "/atera/v1/calculator-config/fallback",
            get(super::handlers::fallback_config),
        )
        .route(
            "/atera/v1/estimate",
            get(super::handlers::estimate_query).post(super::handlers::estimate_body),
        )
        .route(
            "/atera/v1/settings",
            get(super::handlers::get_settings).put(super::handlers::update_settings),
        )
        .route(
            "/atera/v1/invalidate_cache",
            post(super::handlers::invalidate_cache),
        )
        .route("/ping", get(super::handlers::ping))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(TimeoutLayer::new(request_timeout)),
        );

    let router = if enable_cors {
        router.layer(CorsLayer::permissive())
    } else {
        router
    };

    router.with_state(state)
}
