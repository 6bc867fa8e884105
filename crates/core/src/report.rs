//! Display formatting for stored QC sessions.
//!
//! Builds a [`SessionReport`] of pre-formatted strings from a session's
//! stored results. Precision is fixed per quantity (see the `*_DP`
//! constants). Formatting never feeds back into stored values.

use serde::Serialize;

use crate::evaluator::{
    KvTestResult, LinearityTestResult, RepeatabilityTestResult, SessionEvaluation,
};
use crate::machine::MachineInfo;
use crate::types::{DbId, Timestamp};

// ---------------------------------------------------------------------------
// Precision
// ---------------------------------------------------------------------------

/// Raw readings, kV/dose means, kV SD and % deviation.
pub const MEAN_DP: usize = 2;
/// Repeatability SD.
pub const REPEATABILITY_SD_DP: usize = 3;
/// CV, R² and slope.
pub const RATIO_DP: usize = 4;
/// mAs column of the linearity table.
pub const MAS_DP: usize = 1;
/// Nominal kV / mAs settings.
pub const NOMINAL_DP: usize = 1;

// ---------------------------------------------------------------------------
// Labels
// ---------------------------------------------------------------------------

pub const LABEL_PASS: &str = "PASS";
pub const LABEL_FAIL: &str = "FAIL";
pub const BANNER_ALL_PASSED: &str = "ALL TESTS PASSED";
pub const BANNER_SOME_FAILED: &str = "ONE OR MORE TESTS FAILED";

/// `PASS` / `FAIL`.
pub fn verdict_label(passed: bool) -> &'static str {
    if passed {
        LABEL_PASS
    } else {
        LABEL_FAIL
    }
}

/// Overall banner text for a session verdict.
pub fn overall_banner(passed: bool) -> &'static str {
    if passed {
        BANNER_ALL_PASSED
    } else {
        BANNER_SOME_FAILED
    }
}

/// Format with a fixed number of decimal places.
pub fn fixed(value: f64, dp: usize) -> String {
    format!("{value:.dp$}")
}

// ---------------------------------------------------------------------------
// Report view
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct KvReport {
    pub nominal_kv: String,
    pub readings: Vec<String>,
    pub mean: String,
    pub sd: String,
    pub cv: String,
    pub deviation: String,
    pub verdict: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct RepeatabilityReport {
    pub nominal_mas: String,
    pub readings: Vec<String>,
    pub mean: String,
    pub sd: String,
    pub cv: String,
    pub verdict: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct LinearityRow {
    pub mas: String,
    pub dose: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct LinearityReport {
    pub rows: Vec<LinearityRow>,
    pub slope: String,
    pub r_squared: String,
    pub verdict: &'static str,
}

/// Everything a screen, print or PDF renderer needs, already formatted.
#[derive(Debug, Clone, Serialize)]
pub struct SessionReport {
    pub session_id: DbId,
    /// Logo reference from the settings at the time the report is rendered.
    pub hospital_logo: Option<String>,
    pub machine: MachineInfo,
    pub recorded_at: Timestamp,
    pub kv_test: KvReport,
    pub repeatability_test: RepeatabilityReport,
    pub linearity_test: LinearityReport,
    pub overall_passed: bool,
    pub overall_banner: &'static str,
}

fn format_all(values: &[f64], dp: usize) -> Vec<String> {
    values.iter().map(|v| fixed(*v, dp)).collect()
}

fn kv_report(r: &KvTestResult) -> KvReport {
    KvReport {
        nominal_kv: fixed(r.nominal_kv, NOMINAL_DP),
        readings: format_all(&r.readings, MEAN_DP),
        mean: format!("{} kV", fixed(r.mean, MEAN_DP)),
        sd: fixed(r.sd, MEAN_DP),
        cv: fixed(r.cv, RATIO_DP),
        deviation: format!("{}%", fixed(r.deviation_pct, MEAN_DP)),
        verdict: verdict_label(r.passed),
    }
}

fn repeatability_report(r: &RepeatabilityTestResult) -> RepeatabilityReport {
    RepeatabilityReport {
        nominal_mas: fixed(r.nominal_mas, NOMINAL_DP),
        readings: format_all(&r.readings, MEAN_DP),
        mean: format!("{} \u{03bc}Gy", fixed(r.mean, MEAN_DP)),
        sd: fixed(r.sd, REPEATABILITY_SD_DP),
        cv: fixed(r.cv, RATIO_DP),
        verdict: verdict_label(r.passed),
    }
}

fn linearity_report(r: &LinearityTestResult) -> LinearityReport {
    LinearityReport {
        rows: r
            .data_points
            .iter()
            .map(|p| LinearityRow {
                mas: fixed(p.mas, MAS_DP),
                dose: fixed(p.dose, MEAN_DP),
            })
            .collect(),
        slope: fixed(r.slope, RATIO_DP),
        r_squared: fixed(r.r_squared, RATIO_DP),
        verdict: verdict_label(r.passed),
    }
}

/// Build the display report for a stored session.
///
/// The overall verdict is taken from `evaluation.overall_passed` as stored.
pub fn build_report(
    session_id: DbId,
    machine: &MachineInfo,
    recorded_at: Timestamp,
    evaluation: &SessionEvaluation,
    hospital_logo: Option<&str>,
) -> SessionReport {
    SessionReport {
        session_id,
        hospital_logo: hospital_logo.map(str::to_string),
        machine: machine.clone(),
        recorded_at,
        kv_test: kv_report(&evaluation.kv_test),
        repeatability_test: repeatability_report(&evaluation.repeatability_test),
        linearity_test: linearity_report(&evaluation.linearity_test),
        overall_passed: evaluation.overall_passed,
        overall_banner: overall_banner(evaluation.overall_passed),
    }
}
