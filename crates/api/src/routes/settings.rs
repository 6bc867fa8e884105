//! Route definitions for QC settings.
//!
//! ```text
//! GET  /      current limits and logo reference
//! PUT  /      partial update
//! ```

use axum::routing::get;
use axum::Router;

use crate::handlers::settings;
use crate::state::AppState;

/// Settings routes, nested at `/settings`.
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(settings::get).put(settings::update))
}
