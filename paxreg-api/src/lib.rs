//! paxreg-api library - passenger registry HTTP service
//!
//! Exposes the CRUD surface over the passenger store plus the outbound
//! cpf-verification passthrough.

use axum::routing::{get, post};
use axum::Router;
use sqlx::SqlitePool;
use tower_http::trace::TraceLayer;

pub mod api;
pub mod error;
pub mod services;

pub use error::{ApiError, ApiResult};
use services::verify_client::VerifyClient;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: SqlitePool,
    /// Outbound cpf-verification client
    pub verifier: VerifyClient,
}

impl AppState {
    /// Create new application state
    pub fn new(db: SqlitePool, verifier: VerifyClient) -> Self {
        Self { db, verifier }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(
            "/passageiro",
            post(api::create_passenger)
                .get(api::get_passenger)
                .put(api::update_passenger)
                .delete(api::delete_passenger),
        )
        .route("/passageiros", get(api::list_passengers))
        .route("/contato", post(api::add_contact))
        .route("/external-data", get(api::get_external_data))
        .merge(api::health_routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
