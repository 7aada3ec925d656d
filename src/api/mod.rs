use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::search::SearchClient;

pub mod error;
pub mod handlers;
pub mod models;

/// Shared by every handler; read-only after startup.
pub struct AppState {
    pub search: SearchClient,
}

impl AppState {
    pub fn new(search: SearchClient) -> Self {
        Self { search }
    }
}

pub fn create_router(state: Arc<AppState>) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(handlers::health_handler))
        .route("/search", get(handlers::search_handler))
        .route("/knowledge", get(handlers::knowledge_handler))
        .route("/analyze", post(handlers::analyze_handler))
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
