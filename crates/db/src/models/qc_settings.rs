//! QC settings models and DTOs.
//!
//! Maps to the singleton `qc_settings` table (migration 000002).

use mxqc_core::limits::LimitsConfig;
use mxqc_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Primary key of the only settings row.
pub const SETTINGS_ROW_ID: DbId = 1;

// ---------------------------------------------------------------------------
// Entity
// ---------------------------------------------------------------------------

/// The row from the `qc_settings` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct QcSettings {
    pub id: DbId,
    /// Reference to the report logo (URL or data URI). Upload handling is
    /// done elsewhere.
    pub hospital_logo: Option<String>,
    pub kv_deviation_limit_pct: f64,
    pub kv_absolute_limit_kv: f64,
    pub repeatability_cv_limit: f64,
    pub linearity_r_squared_limit: f64,
    pub updated_at: Timestamp,
}

impl QcSettings {
    /// The tolerance limits to pass into an evaluation.
    pub fn limits(&self) -> LimitsConfig {
        LimitsConfig {
            kv_deviation_limit_pct: self.kv_deviation_limit_pct,
            kv_absolute_limit_kv: self.kv_absolute_limit_kv,
            repeatability_cv_limit: self.repeatability_cv_limit,
            linearity_r_squared_limit: self.linearity_r_squared_limit,
        }
    }
}

// ---------------------------------------------------------------------------
// Update DTO
// ---------------------------------------------------------------------------

/// DTO for updating settings. `None` fields are left unchanged; an empty
/// `hospital_logo` clears the logo.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateQcSettings {
    pub hospital_logo: Option<String>,
    pub kv_deviation_limit_pct: Option<f64>,
    pub kv_absolute_limit_kv: Option<f64>,
    pub repeatability_cv_limit: Option<f64>,
    pub linearity_r_squared_limit: Option<f64>,
}

impl UpdateQcSettings {
    /// The limits that would be in force after applying this update.
    pub fn merged_limits(&self, current: &LimitsConfig) -> LimitsConfig {
        LimitsConfig {
            kv_deviation_limit_pct: self
                .kv_deviation_limit_pct
                .unwrap_or(current.kv_deviation_limit_pct),
            kv_absolute_limit_kv: self
                .kv_absolute_limit_kv
                .unwrap_or(current.kv_absolute_limit_kv),
            repeatability_cv_limit: self
                .repeatability_cv_limit
                .unwrap_or(current.repeatability_cv_limit),
            linearity_r_squared_limit: self
                .linearity_r_squared_limit
                .unwrap_or(current.linearity_r_squared_limit),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merged_limits_keeps_unset_fields() {
        let update = UpdateQcSettings {
            repeatability_cv_limit: Some(0.1),
            ..Default::default()
        };
        let merged = update.merged_limits(&LimitsConfig::default());
        assert_eq!(merged.repeatability_cv_limit, 0.1);
        assert_eq!(merged.kv_deviation_limit_pct, 10.0);
        assert_eq!(merged.kv_absolute_limit_kv, 5.0);
        assert_eq!(merged.linearity_r_squared_limit, 0.98);
    }

    #[test]
    fn empty_update_is_identity() {
        let current = LimitsConfig {
            kv_deviation_limit_pct: 7.0,
            ..LimitsConfig::default()
        };
        assert_eq!(UpdateQcSettings::default().merged_limits(&current), current);
    }
}
