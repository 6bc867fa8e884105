//! Normalisation of data-entry values into typed evaluator inputs.
//!
//! Operators type readings into free-form fields, so a submitted value may
//! be a JSON number, a numeric string (`" 80.1 "`), an empty string or
//! `null`. This module turns those into plain `f64` collections; anything
//! blank, unparseable or non-finite is dropped. Count requirements are
//! enforced later by the evaluator.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::evaluator::DosePoint;
use crate::threshold_validation::validate_positive;

/// A single value as submitted by the data-entry form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawReading {
    Number(f64),
    Text(String),
    Blank,
}

impl RawReading {
    /// The numeric value, if the entry holds a finite number.
    pub fn value(&self) -> Option<f64> {
        let v = match self {
            RawReading::Number(n) => *n,
            RawReading::Text(s) => s.trim().parse::<f64>().ok()?,
            RawReading::Blank => return None,
        };
        v.is_finite().then_some(v)
    }
}

impl From<f64> for RawReading {
    fn from(v: f64) -> Self {
        RawReading::Number(v)
    }
}

impl From<&str> for RawReading {
    fn from(s: &str) -> Self {
        RawReading::Text(s.to_string())
    }
}

/// One row of the linearity table as submitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawDosePoint {
    pub mas: RawReading,
    pub dose: RawReading,
}

/// Parse every entry, keeping only finite numbers in submission order.
pub fn collect_readings(raw: &[RawReading]) -> Vec<f64> {
    raw.iter().filter_map(RawReading::value).collect()
}

/// Parse linearity rows, keeping rows where both cells hold a number.
///
/// `mas > 0` is not checked here; the evaluator applies that filter.
pub fn collect_dose_points(raw: &[RawDosePoint]) -> Vec<DosePoint> {
    raw.iter()
        .filter_map(|p| {
            Some(DosePoint {
                mas: p.mas.value()?,
                dose: p.dose.value()?,
            })
        })
        .collect()
}

/// Validate a nominal setting (kV or mAs) entered by the operator.
pub fn validate_nominal(value: f64, name: &str) -> Result<(), CoreError> {
    validate_positive(value, name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_and_numeric_text_are_accepted() {
        let raw = vec![RawReading::from(80.1), RawReading::from(" 79.8 "), RawReading::from("80.3")];
        assert_eq!(collect_readings(&raw), vec![80.1, 79.8, 80.3]);
    }

    #[test]
    fn blanks_and_garbage_are_dropped() {
        let raw = vec![
            RawReading::from(""),
            RawReading::Blank,
            RawReading::from("abc"),
            RawReading::from("NaN"),
            RawReading::from("inf"),
            RawReading::from(10.0),
        ];
        assert_eq!(collect_readings(&raw), vec![10.0]);
    }

    #[test]
    fn deserializes_mixed_json_array() {
        let raw: Vec<RawReading> = serde_json::from_str(r#"[80.1, "79.8", null, ""]"#).unwrap();
        assert_eq!(raw[0], RawReading::Number(80.1));
        assert_eq!(raw[1], RawReading::Text("79.8".into()));
        assert_eq!(raw[2], RawReading::Blank);
        assert_eq!(collect_readings(&raw), vec![80.1, 79.8]);
    }

    #[test]
    fn dose_rows_need_both_cells() {
        let raw: Vec<RawDosePoint> = serde_json::from_str(
            r#"[
                {"mas": "1", "dose": "10.1"},
                {"mas": 2, "dose": ""},
                {"mas": null, "dose": 30},
                {"mas": 0, "dose": 0}
            ]"#,
        )
        .unwrap();
        let pts = collect_dose_points(&raw);
        assert_eq!(
            pts,
            vec![
                DosePoint { mas: 1.0, dose: 10.1 },
                DosePoint { mas: 0.0, dose: 0.0 },
            ]
        );
    }

    #[test]
    fn nominal_must_be_positive() {
        assert!(validate_nominal(80.0, "nominal_kv").is_ok());
        assert!(validate_nominal(0.0, "nominal_kv").is_err());
        assert!(validate_nominal(-2.0, "nominal_mas").is_err());
    }
}
