//! REST API over the dashboard's configurations, KPIs and log records.
//!
//! Provides three GET endpoints:
//! - `/configurations`: every configuration with filenames and artifact status
//! - `/kpi?station=&battery=`: derived KPIs for one configuration
//! - `/records?station=&battery=&mode=`: log rows, preview or full

mod handlers;
mod types;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::routing::get;

use crate::dashboard::Dashboard;

/// Immutable application state shared across all request handlers.
///
/// Every request reloads the log from disk, so no locks are needed.
pub struct AppState {
    /// Settings, folder layout and reference tables.
    pub dashboard: Dashboard,
}

/// Builds the axum router with all API routes.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/configurations", get(handlers::get_configurations))
        .route("/kpi", get(handlers::get_kpi))
        .route("/records", get(handlers::get_records))
        .with_state(state)
}

/// Binds to the given address and serves the API.
///
/// # Panics
///
/// Panics if the TCP listener cannot bind to `addr`.
pub async fn serve(state: Arc<AppState>, addr: SocketAddr) {
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind to {addr}: {e}"));
    log::info!("API server listening on http://{addr}");
    eprintln!("API server listening on http://{addr}");
    axum::serve(listener, app)
        .await
        .unwrap_or_else(|e| panic!("server error: {e}"));
}
