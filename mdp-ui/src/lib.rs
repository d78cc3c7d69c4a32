//! mdp-ui library - MDP survey and dashboard HTTP service
//!
//! Collects rotation evaluations, stores them, and serves the dashboard's
//! aggregate, individual, and comparison views plus CSV export.

use axum::routing::{delete, get, post};
use axum::Router;
use tower_http::cors::CorsLayer;

pub mod api;
pub mod notify;
pub mod store;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    pub store: store::EvaluationStore,
    pub notifier: notify::Notifier,
}

impl AppState {
    pub fn new(store: store::EvaluationStore, notifier: notify::Notifier) -> Self {
        Self { store, notifier }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(api::health))
        .route("/api/evaluations", get(api::list_evaluations))
        .route("/api/evaluations", post(api::submit_evaluation))
        .route("/api/evaluations/:id", delete(api::delete_evaluation))
        .route("/api/dashboard/cohort", get(api::cohort_view))
        .route("/api/dashboard/individual/:mdp", get(api::individual_view))
        .route("/api/dashboard/compare", get(api::compare_view))
        .route("/api/export/evaluations.csv", get(api::export_csv))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
