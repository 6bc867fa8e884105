//! Handlers for the QC settings (tolerance limits and report logo).

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use mxqc_db::models::qc_settings::UpdateQcSettings;
use mxqc_db::repositories::QcSettingsRepo;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/settings
pub async fn get(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let settings = QcSettingsRepo::get(&state.pool).await?;
    Ok(Json(DataResponse { data: settings }))
}

/// PUT /api/v1/settings
///
/// Partial update. The limits that would result are validated as a whole
/// before anything is stored. New limits only affect sessions recorded
/// afterwards.
pub async fn update(
    State(state): State<AppState>,
    Json(body): Json<UpdateQcSettings>,
) -> AppResult<impl IntoResponse> {
    let current = QcSettingsRepo::get(&state.pool).await?;
    body.merged_limits(&current.limits()).validate()?;

    let settings = QcSettingsRepo::update(&state.pool, &body).await?;
    Ok(Json(DataResponse { data: settings }))
}
