//! Shared query parameter types for API handlers.

use serde::Deserialize;

/// Query parameters for the session history list (`?q=&limit=&offset=`).
///
/// `limit` and `offset` are clamped in the repository layer via
/// `clamp_limit` / `clamp_offset`; `q` is normalised with
/// `normalize_search_term`.
#[derive(Debug, Default, Deserialize)]
pub struct SessionListParams {
    pub q: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Query parameters for the bulk session delete (`?confirm=true`).
#[derive(Debug, Default, Deserialize)]
pub struct ClearSessionsParams {
    #[serde(default)]
    pub confirm: bool,
}
