//! Handlers for recording, browsing and deleting QC sessions.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use mxqc_core::error::CoreError;
use mxqc_core::evaluator::evaluate_session;
use mxqc_core::history::normalize_search_term;
use mxqc_core::machine::MachineInfo;
use mxqc_core::readings::{collect_dose_points, RawDosePoint};
use mxqc_core::report::build_report;
use mxqc_core::types::DbId;
use mxqc_db::models::qc_session::{CreateQcSession, QcSession};
use mxqc_db::repositories::{QcSessionRepo, QcSettingsRepo};
use mxqc_db::DbPool;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::handlers::evaluation::{KvSubmission, RepeatabilitySubmission};
use crate::query::{ClearSessionsParams, SessionListParams};
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /api/v1/sessions`: the full data-entry form.
#[derive(Debug, Deserialize)]
pub struct CreateSessionRequest {
    pub machine: MachineInfo,
    pub kv: KvSubmission,
    pub repeatability: RepeatabilitySubmission,
    #[serde(default)]
    pub linearity: Vec<RawDosePoint>,
}

async fn find_session(pool: &DbPool, id: DbId) -> AppResult<QcSession> {
    QcSessionRepo::find_by_id(pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "QcSession",
            id,
        }))
}

// ---------------------------------------------------------------------------
// Record
// ---------------------------------------------------------------------------

/// POST /api/v1/sessions
///
/// Evaluates all three tests against the current settings and stores the
/// result. Nothing is written unless every test could be evaluated.
pub async fn create(
    State(state): State<AppState>,
    Json(body): Json<CreateSessionRequest>,
) -> AppResult<impl IntoResponse> {
    body.machine.check()?;
    let kv = body.kv.to_inputs()?;
    let repeatability = body.repeatability.to_inputs()?;
    let dose_points = collect_dose_points(&body.linearity);

    let limits = QcSettingsRepo::get(&state.pool).await?.limits();
    let evaluation = evaluate_session(&kv, &repeatability, &dose_points, &limits)?;

    let session = QcSessionRepo::create(
        &state.pool,
        &CreateQcSession {
            machine: body.machine,
            evaluation,
        },
    )
    .await?;

    tracing::info!(
        session_id = session.id,
        hospital = %session.hospital,
        overall_passed = session.overall_passed,
        "QC session recorded"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: session })))
}

// ---------------------------------------------------------------------------
// Browse
// ---------------------------------------------------------------------------

/// GET /api/v1/sessions?q=&limit=&offset=
///
/// Newest first. `q` matches hospital, model, technician or session date.
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<SessionListParams>,
) -> AppResult<impl IntoResponse> {
    let search = normalize_search_term(params.q.as_deref());
    let page =
        QcSessionRepo::list(&state.pool, search.as_deref(), params.limit, params.offset).await?;
    Ok(Json(DataResponse { data: page }))
}

/// GET /api/v1/sessions/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let session = find_session(&state.pool, id).await?;
    Ok(Json(DataResponse { data: session }))
}

/// GET /api/v1/sessions/{id}/report
///
/// The stored session formatted for display. Verdicts come from the
/// stored snapshot, never from the current settings; only the logo is
/// taken from the settings.
pub async fn get_report(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let session = find_session(&state.pool, id).await?;
    let settings = QcSettingsRepo::get(&state.pool).await?;
    let report = build_report(
        session.id,
        &session.machine_info(),
        session.created_at,
        &session.evaluation(),
        settings.hospital_logo.as_deref(),
    );
    Ok(Json(DataResponse { data: report }))
}

// ---------------------------------------------------------------------------
// Delete
// ---------------------------------------------------------------------------

/// DELETE /api/v1/sessions/{id}
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if QcSessionRepo::delete(&state.pool, id).await? {
        tracing::info!(session_id = id, "QC session deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "QcSession",
            id,
        }))
    }
}

/// Body of a bulk delete response.
#[derive(Debug, Serialize)]
pub struct DeletedSessions {
    pub deleted: u64,
}

/// DELETE /api/v1/sessions?confirm=true
///
/// Removes the entire session history. Settings are kept. Refused unless
/// `confirm=true` is passed.
pub async fn delete_all(
    State(state): State<AppState>,
    Query(params): Query<ClearSessionsParams>,
) -> AppResult<impl IntoResponse> {
    if !params.confirm {
        return Err(AppError::BadRequest(
            "Deleting all sessions requires confirm=true".to_string(),
        ));
    }
    let deleted = QcSessionRepo::delete_all(&state.pool).await?;
    Ok(Json(DataResponse {
        data: DeletedSessions { deleted },
    }))
}
