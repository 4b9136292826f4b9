//! HTTP API layer with Axum routes.
//!
//! This crate provides:
//! - Payroll upload and reconciliation
//! - In-memory ledger sessions editable over REST
//! - JSON error responses

pub mod error;
pub mod routes;
pub mod sessions;
pub mod upload;

use std::sync::Arc;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use nomina_core::payroll::{EmployeeDirectory, ReconciliationService};
use nomina_shared::LedgerConfig;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

pub use error::ApiError;
pub use sessions::LedgerSessions;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Employee directory used by reconciliation.
    pub directory: Arc<dyn EmployeeDirectory>,
    /// Reconciliation pipeline.
    pub reconciliation: ReconciliationService,
    /// Live ledger sessions.
    pub sessions: Arc<LedgerSessions>,
    /// Defaults for new ledger sessions and upload limits.
    pub ledger_config: LedgerConfig,
}

impl AppState {
    /// Creates state with the statutory payroll policy and no sessions.
    #[must_use]
    pub fn new(directory: Arc<dyn EmployeeDirectory>, ledger_config: LedgerConfig) -> Self {
        Self {
            directory,
            reconciliation: ReconciliationService::default(),
            sessions: Arc::new(LedgerSessions::from_config(&ledger_config)),
            ledger_config,
        }
    }
}

/// Creates the main application router.
pub fn create_router(state: AppState) -> Router {
    let max_upload_bytes = state.ledger_config.max_upload_bytes;

    Router::new()
        .nest("/api/v1", routes::api_routes())
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(max_upload_bytes))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
