//! Route definitions for the evaluation preview.
//!
//! ```text
//! POST /evaluate        evaluate supplied tests against current limits
//! ```

use axum::routing::post;
use axum::Router;

use crate::handlers::evaluation;
use crate::state::AppState;

/// Evaluation routes, nested at `/qc`.
pub fn router() -> Router<AppState> {
    Router::new().route("/evaluate", post(evaluation::evaluate_preview))
}
