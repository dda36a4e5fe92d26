//! HTTP surface: the public quote endpoint, the admin API, and health.

pub mod admin;
pub mod routes;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;

use crate::intake::IntakeService;
use crate::store::LeadStore;

pub use admin::admin_routes;
pub use routes::quote_routes;

/// Shared handles for every handler.
#[derive(Clone)]
pub struct AppState {
    pub intake: Arc<IntakeService>,
    /// `None` when the database could not be opened at startup.
    pub store: Option<Arc<dyn LeadStore>>,
}

/// GET /health
async fn health(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "store": state.store.is_some(),
    }))
}

/// The full application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .with_state(state.clone())
        .merge(quote_routes(state.clone()))
        .merge(admin_routes(state))
}

/// Bind `addr` and serve until the process exits.
pub async fn serve(addr: SocketAddr, state: AppState) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(addr = %listener.local_addr()?, "Quote desk listening");
    axum::serve(listener, router(state)).await
}
