//! Handlers for the evaluation preview and the shared submission payloads.
//!
//! The data-entry client submits readings as loosely typed values (numbers,
//! numeric text, blanks). The types here normalise them into evaluator
//! inputs; the same types are reused when a session is recorded.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use mxqc_core::error::CoreError;
use mxqc_core::evaluator::{
    evaluate_kv_test, evaluate_linearity_test, evaluate_repeatability_test, KvInputs,
    KvTestResult, LinearityTestResult, RepeatabilityInputs, RepeatabilityTestResult,
};
use mxqc_core::limits::LimitsConfig;
use mxqc_core::readings::{
    collect_dose_points, collect_readings, validate_nominal, RawDosePoint, RawReading,
};
use mxqc_db::repositories::QcSettingsRepo;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Submission payloads
// ---------------------------------------------------------------------------

/// kV accuracy entries: the selected kV and the meter readings.
#[derive(Debug, Clone, Deserialize)]
pub struct KvSubmission {
    pub nominal_kv: f64,
    #[serde(default)]
    pub readings: Vec<RawReading>,
}

impl KvSubmission {
    pub fn to_inputs(&self) -> Result<KvInputs, CoreError> {
        validate_nominal(self.nominal_kv, "nominal_kv")?;
        Ok(KvInputs {
            nominal_kv: self.nominal_kv,
            readings: collect_readings(&self.readings),
        })
    }
}

/// Output repeatability entries: the selected mAs and the dose readings.
#[derive(Debug, Clone, Deserialize)]
pub struct RepeatabilitySubmission {
    pub nominal_mas: f64,
    #[serde(default)]
    pub readings: Vec<RawReading>,
}

impl RepeatabilitySubmission {
    pub fn to_inputs(&self) -> Result<RepeatabilityInputs, CoreError> {
        validate_nominal(self.nominal_mas, "nominal_mas")?;
        Ok(RepeatabilityInputs {
            nominal_mas: self.nominal_mas,
            readings: collect_readings(&self.readings),
        })
    }
}

// ---------------------------------------------------------------------------
// Preview
// ---------------------------------------------------------------------------

/// Request body for `POST /api/v1/qc/evaluate`. Omitted tests are skipped.
#[derive(Debug, Default, Deserialize)]
pub struct EvaluateRequest {
    pub kv: Option<KvSubmission>,
    pub repeatability: Option<RepeatabilitySubmission>,
    pub linearity: Option<Vec<RawDosePoint>>,
}

/// Results for whichever tests were supplied.
///
/// `overall_passed` is only present when all three tests were evaluated.
#[derive(Debug, Serialize)]
pub struct EvaluationPreview {
    pub kv_test: Option<KvTestResult>,
    pub repeatability_test: Option<RepeatabilityTestResult>,
    pub linearity_test: Option<LinearityTestResult>,
    pub overall_passed: Option<bool>,
    /// The limits the verdicts were computed against.
    pub limits: LimitsConfig,
}

/// POST /api/v1/qc/evaluate
///
/// Evaluates the supplied tests against the current settings. Nothing is
/// stored.
pub async fn evaluate_preview(
    State(state): State<AppState>,
    Json(body): Json<EvaluateRequest>,
) -> AppResult<impl IntoResponse> {
    if body.kv.is_none() && body.repeatability.is_none() && body.linearity.is_none() {
        return Err(AppError::BadRequest(
            "Supply at least one of kv, repeatability or linearity".to_string(),
        ));
    }

    let limits = QcSettingsRepo::get(&state.pool).await?.limits();

    let kv_test = body
        .kv
        .as_ref()
        .map(|kv| {
            let inputs = kv.to_inputs()?;
            evaluate_kv_test(&inputs.readings, inputs.nominal_kv, &limits)
        })
        .transpose()?;

    let repeatability_test = body
        .repeatability
        .as_ref()
        .map(|rep| {
            let inputs = rep.to_inputs()?;
            evaluate_repeatability_test(&inputs.readings, inputs.nominal_mas, &limits)
        })
        .transpose()?;

    let linearity_test = body
        .linearity
        .as_deref()
        .map(|raw| evaluate_linearity_test(&collect_dose_points(raw), &limits))
        .transpose()?;

    let overall_passed = match (&kv_test, &repeatability_test, &linearity_test) {
        (Some(kv), Some(rep), Some(lin)) => Some(kv.passed && rep.passed && lin.passed),
        _ => None,
    };

    Ok(Json(DataResponse {
        data: EvaluationPreview {
            kv_test,
            repeatability_test,
            linearity_test,
            overall_passed,
            limits,
        },
    }))
}
