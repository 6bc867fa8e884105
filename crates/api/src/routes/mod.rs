pub mod evaluation;
pub mod health;
pub mod sessions;
pub mod settings;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /qc/evaluate                 live evaluation preview, nothing stored (POST)
///
/// /sessions                    list history, record session, delete all (GET, POST, DELETE)
/// /sessions/{id}               get, delete
/// /sessions/{id}/report        formatted report view (GET)
///
/// /settings                    get, update limits and logo (GET, PUT)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/qc", evaluation::router())
        .nest("/sessions", sessions::router())
        .nest("/settings", settings::router())
}
