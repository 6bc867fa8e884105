//! Tolerance limits applied by the QC evaluator.
//!
//! A [`LimitsConfig`] is an explicit value passed into every evaluation
//! call. The evaluator never reads stored or global settings on its own.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::threshold_validation::{validate_positive, validate_unit_range};

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

/// Maximum allowed % deviation of mean kV from nominal.
pub const DEFAULT_KV_DEVIATION_LIMIT_PCT: f64 = 10.0;
/// Maximum allowed absolute deviation of mean kV from nominal (kV).
pub const DEFAULT_KV_ABSOLUTE_LIMIT_KV: f64 = 5.0;
/// Maximum allowed coefficient of variation for dose repeatability.
pub const DEFAULT_REPEATABILITY_CV_LIMIT: f64 = 0.05;
/// Minimum allowed R² for the mAs/dose linearity fit.
pub const DEFAULT_LINEARITY_R_SQUARED_LIMIT: f64 = 0.98;

// ---------------------------------------------------------------------------
// LimitsConfig
// ---------------------------------------------------------------------------

/// Pass/fail thresholds for the three QC tests.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LimitsConfig {
    pub kv_deviation_limit_pct: f64,
    pub kv_absolute_limit_kv: f64,
    pub repeatability_cv_limit: f64,
    pub linearity_r_squared_limit: f64,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            kv_deviation_limit_pct: DEFAULT_KV_DEVIATION_LIMIT_PCT,
            kv_absolute_limit_kv: DEFAULT_KV_ABSOLUTE_LIMIT_KV,
            repeatability_cv_limit: DEFAULT_REPEATABILITY_CV_LIMIT,
            linearity_r_squared_limit: DEFAULT_LINEARITY_R_SQUARED_LIMIT,
        }
    }
}

impl LimitsConfig {
    /// Check every limit is in its allowed range.
    ///
    /// kV limits must be positive; the CV and R² limits must lie in `[0, 1]`.
    pub fn validate(&self) -> Result<(), CoreError> {
        validate_positive(self.kv_deviation_limit_pct, "kv_deviation_limit_pct")?;
        validate_positive(self.kv_absolute_limit_kv, "kv_absolute_limit_kv")?;
        validate_unit_range(self.repeatability_cv_limit, "repeatability_cv_limit")?;
        validate_unit_range(self.linearity_r_squared_limit, "linearity_r_squared_limit")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_published_values() {
        let l = LimitsConfig::default();
        assert_eq!(l.kv_deviation_limit_pct, 10.0);
        assert_eq!(l.kv_absolute_limit_kv, 5.0);
        assert_eq!(l.repeatability_cv_limit, 0.05);
        assert_eq!(l.linearity_r_squared_limit, 0.98);
    }

    #[test]
    fn defaults_are_valid() {
        assert!(LimitsConfig::default().validate().is_ok());
    }

    #[test]
    fn zero_kv_limit_rejected() {
        let l = LimitsConfig {
            kv_absolute_limit_kv: 0.0,
            ..LimitsConfig::default()
        };
        assert!(l.validate().is_err());
    }

    #[test]
    fn cv_limit_above_one_rejected() {
        let l = LimitsConfig {
            repeatability_cv_limit: 1.5,
            ..LimitsConfig::default()
        };
        assert!(l.validate().is_err());
    }

    #[test]
    fn r_squared_limit_bounds_accepted() {
        for v in [0.0, 1.0] {
            let l = LimitsConfig {
                linearity_r_squared_limit: v,
                ..LimitsConfig::default()
            };
            assert!(l.validate().is_ok());
        }
    }

    #[test]
    fn deserializes_from_snake_case_json() {
        let l: LimitsConfig = serde_json::from_str(
            r#"{"kv_deviation_limit_pct":5,"kv_absolute_limit_kv":2,"repeatability_cv_limit":0.1,"linearity_r_squared_limit":0.9}"#,
        )
        .unwrap();
        assert_eq!(l.kv_deviation_limit_pct, 5.0);
        assert_eq!(l.linearity_r_squared_limit, 0.9);
    }
}
