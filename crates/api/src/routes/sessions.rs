//! Route definitions for QC session history.
//!
//! ```text
//! GET    /                 list (?q=&limit=&offset=)
//! POST   /                 evaluate and record a session
//! DELETE /                 delete all sessions (?confirm=true)
//! GET    /{id}             get
//! DELETE /{id}             delete
//! GET    /{id}/report      formatted report view
//! ```

use axum::routing::get;
use axum::Router;

use crate::handlers::sessions;
use crate::state::AppState;

/// Session routes, nested at `/sessions`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(sessions::list)
                .post(sessions::create)
                .delete(sessions::delete_all),
        )
        .route("/{id}", get(sessions::get_by_id).delete(sessions::delete))
        .route("/{id}/report", get(sessions::get_report))
}
