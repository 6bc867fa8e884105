//! QC evaluation engine: statistics and pass/fail rules for the three
//! fixed test protocols (kV accuracy, output repeatability, output
//! linearity) plus the aggregate session verdict.
//!
//! Every function here is a pure function of its arguments. Results are
//! immutable snapshots; nothing recomputes them after the fact.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::limits::LimitsConfig;
use crate::stats::{
    coefficient_of_variation, finite_values, mean, percent_deviation,
    regression_through_origin, sample_sd,
};

// ---------------------------------------------------------------------------
// Test identifiers
// ---------------------------------------------------------------------------

/// kV accuracy test.
pub const TEST_KV_ACCURACY: &str = "kv_accuracy";
/// Output (dose) repeatability test.
pub const TEST_REPEATABILITY: &str = "output_repeatability";
/// Output linearity test (dose vs mAs).
pub const TEST_LINEARITY: &str = "output_linearity";

/// Number of repeated exposures required by the kV and repeatability tests.
pub const REQUIRED_EXPOSURES: usize = 3;
/// Minimum number of valid mAs/dose points for the linearity fit.
pub const MIN_LINEARITY_POINTS: usize = 2;

// ---------------------------------------------------------------------------
// Inputs
// ---------------------------------------------------------------------------

/// Typed inputs for the kV accuracy test.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KvInputs {
    pub nominal_kv: f64,
    pub readings: Vec<f64>,
}

/// Typed inputs for the output repeatability test.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepeatabilityInputs {
    pub nominal_mas: f64,
    pub readings: Vec<f64>,
}

/// One exposure of the linearity test.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DosePoint {
    pub mas: f64,
    pub dose: f64,
}

impl DosePoint {
    /// Usable for the fit: both values finite and `mas > 0`.
    pub fn is_valid(&self) -> bool {
        self.mas.is_finite() && self.dose.is_finite() && self.mas > 0.0
    }
}

// ---------------------------------------------------------------------------
// Results
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KvTestResult {
    pub nominal_kv: f64,
    pub readings: Vec<f64>,
    pub mean: f64,
    pub sd: f64,
    pub cv: f64,
    /// Signed percentage deviation of the mean from nominal (display value).
    pub deviation_pct: f64,
    pub passed: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepeatabilityTestResult {
    /// Carried through for reporting; not used in the verdict.
    pub nominal_mas: f64,
    pub readings: Vec<f64>,
    pub mean: f64,
    pub sd: f64,
    pub cv: f64,
    pub passed: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearityTestResult {
    /// The points actually used by the fit (after filtering).
    pub data_points: Vec<DosePoint>,
    pub slope: f64,
    pub r_squared: f64,
    pub passed: bool,
}

/// All three test results plus the aggregate verdict.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionEvaluation {
    pub kv_test: KvTestResult,
    pub repeatability_test: RepeatabilityTestResult,
    pub linearity_test: LinearityTestResult,
    pub overall_passed: bool,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Filter to finite readings and require exactly [`REQUIRED_EXPOSURES`].
fn exact_exposures(test: &'static str, readings: &[f64]) -> Result<Vec<f64>, CoreError> {
    let valid = finite_values(readings);
    if valid.len() != REQUIRED_EXPOSURES {
        return Err(CoreError::InsufficientData {
            test,
            required: REQUIRED_EXPOSURES,
            found: valid.len(),
        });
    }
    Ok(valid)
}

/// Reject a result whose numbers cannot be stored or compared.
///
/// Finite inputs of extreme magnitude can still overflow the sums; such a
/// result would serialize its numbers as `null`.
fn ensure_finite(test: &'static str, fields: &[(&str, f64)]) -> Result<(), CoreError> {
    match fields.iter().find(|(_, v)| !v.is_finite()) {
        Some((name, v)) => Err(CoreError::Validation(format!(
            "{test}: {name} evaluates to {v}; input values are out of range"
        ))),
        None => Ok(()),
    }
}

// ---------------------------------------------------------------------------
// Evaluations
// ---------------------------------------------------------------------------

/// Evaluate the kV accuracy test.
///
/// Passes only when BOTH the relative deviation
/// (`|mean - nominal| / nominal * 100 <= kv_deviation_limit_pct`) and the
/// absolute deviation (`|mean - nominal| <= kv_absolute_limit_kv`) are
/// within limits. A zero nominal can never satisfy the relative check.
pub fn evaluate_kv_test(
    readings: &[f64],
    nominal_kv: f64,
    limits: &LimitsConfig,
) -> Result<KvTestResult, CoreError> {
    let readings = exact_exposures(TEST_KV_ACCURACY, readings)?;

    let m = mean(&readings);
    let sd = sample_sd(&readings, m);
    let cv = coefficient_of_variation(sd, m);
    let deviation_pct = percent_deviation(m, nominal_kv);

    let abs_dev = (m - nominal_kv).abs();
    let abs_dev_pct = abs_dev / nominal_kv * 100.0;
    // NaN/∞ comparisons are false, so nominal == 0 fails here.
    let passed =
        abs_dev_pct <= limits.kv_deviation_limit_pct && abs_dev <= limits.kv_absolute_limit_kv;

    ensure_finite(
        TEST_KV_ACCURACY,
        &[
            ("nominal_kv", nominal_kv),
            ("mean", m),
            ("sd", sd),
            ("cv", cv),
            ("deviation_pct", deviation_pct),
        ],
    )?;

    Ok(KvTestResult {
        nominal_kv,
        readings,
        mean: m,
        sd,
        cv,
        deviation_pct,
        passed,
    })
}

/// Evaluate the output repeatability test: `passed = cv <= repeatability_cv_limit`.
pub fn evaluate_repeatability_test(
    readings: &[f64],
    nominal_mas: f64,
    limits: &LimitsConfig,
) -> Result<RepeatabilityTestResult, CoreError> {
    let readings = exact_exposures(TEST_REPEATABILITY, readings)?;

    let m = mean(&readings);
    let sd = sample_sd(&readings, m);
    let cv = coefficient_of_variation(sd, m);
    ensure_finite(
        TEST_REPEATABILITY,
        &[("nominal_mas", nominal_mas), ("mean", m), ("sd", sd), ("cv", cv)],
    )?;

    Ok(RepeatabilityTestResult {
        nominal_mas,
        readings,
        mean: m,
        sd,
        cv,
        passed: cv <= limits.repeatability_cv_limit,
    })
}

/// Evaluate output linearity with a regression through the origin.
///
/// Points with a non-finite value or `mas <= 0` are discarded first; at
/// least [`MIN_LINEARITY_POINTS`] must remain.
/// `passed = r_squared >= linearity_r_squared_limit`.
pub fn evaluate_linearity_test(
    data_points: &[DosePoint],
    limits: &LimitsConfig,
) -> Result<LinearityTestResult, CoreError> {
    let valid: Vec<DosePoint> = data_points.iter().copied().filter(DosePoint::is_valid).collect();
    if valid.len() < MIN_LINEARITY_POINTS {
        return Err(CoreError::InsufficientData {
            test: TEST_LINEARITY,
            required: MIN_LINEARITY_POINTS,
            found: valid.len(),
        });
    }

    let pairs: Vec<(f64, f64)> = valid.iter().map(|p| (p.mas, p.dose)).collect();
    let fit = regression_through_origin(&pairs);
    ensure_finite(
        TEST_LINEARITY,
        &[("slope", fit.slope), ("r_squared", fit.r_squared)],
    )?;

    Ok(LinearityTestResult {
        data_points: valid,
        slope: fit.slope,
        r_squared: fit.r_squared,
        passed: fit.r_squared >= limits.linearity_r_squared_limit,
    })
}

/// Run all three evaluations. Any error aborts the whole session so a
/// partial result is never produced.
pub fn evaluate_session(
    kv: &KvInputs,
    repeatability: &RepeatabilityInputs,
    linearity: &[DosePoint],
    limits: &LimitsConfig,
) -> Result<SessionEvaluation, CoreError> {
    let kv_test = evaluate_kv_test(&kv.readings, kv.nominal_kv, limits)?;
    let repeatability_test =
        evaluate_repeatability_test(&repeatability.readings, repeatability.nominal_mas, limits)?;
    let linearity_test = evaluate_linearity_test(linearity, limits)?;

    let overall_passed = kv_test.passed && repeatability_test.passed && linearity_test.passed;

    Ok(SessionEvaluation {
        kv_test,
        repeatability_test,
        linearity_test,
        overall_passed,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
