//! minirig-advisor library - HTTP front end for the build advisor
//!
//! Serves the component catalog, CPU/motherboard compatibility checks, power
//! estimates, build reports, recommendations and shared builds.

use std::sync::Arc;

use axum::Router;
use minirig_common::Catalog;
use sqlx::SqlitePool;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub mod api;
pub mod error;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Read-only component catalog, loaded once at startup
    pub catalog: Arc<Catalog>,
    /// Shared build store
    pub db: SqlitePool,
}

impl AppState {
    /// Create new application state
    pub fn new(catalog: Catalog, db: SqlitePool) -> Self {
        Self {
            catalog: Arc::new(catalog),
            db,
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    use axum::routing::{get, post};

    let api = Router::new()
        .route("/api/components", get(api::list_components))
        .route("/api/components/:id", get(api::get_component))
        .route("/api/compatibility/check", post(api::check_pair))
        .route("/api/compatibility/:cpu_id", get(api::check_cpu_against_motherboards))
        .route("/api/power", post(api::estimate))
        .route("/api/builds/check", post(api::check_build_report))
        .route("/api/builds", post(api::create_build))
        .route("/api/builds/:share_code", get(api::get_build))
        .route("/api/recommendations", post(api::recommendations))
        .route("/api/recommend", post(api::recommend_for_budget))
        .route("/api/buildinfo", get(api::get_build_info));

    Router::new()
        .merge(api)
        .merge(api::health_routes())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
