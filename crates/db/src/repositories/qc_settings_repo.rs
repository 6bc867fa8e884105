//! Repository for the singleton `qc_settings` table.

use mxqc_core::limits::LimitsConfig;
use sqlx::PgPool;

use crate::models::qc_settings::{QcSettings, UpdateQcSettings, SETTINGS_ROW_ID};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "\
    id, hospital_logo, kv_deviation_limit_pct, kv_absolute_limit_kv, \
    repeatability_cv_limit, linearity_r_squared_limit, updated_at";

/// Provides read/update access to QC settings.
pub struct QcSettingsRepo;

impl QcSettingsRepo {
    /// Get the current settings.
    ///
    /// The migration seeds the row; if it has been removed it is recreated
    /// with default limits.
    pub async fn get(pool: &PgPool) -> Result<QcSettings, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM qc_settings WHERE id = $1");
        let row = sqlx::query_as::<_, QcSettings>(&query)
            .bind(SETTINGS_ROW_ID)
            .fetch_optional(pool)
            .await?;
        if let Some(settings) = row {
            return Ok(settings);
        }

        tracing::warn!("QC settings row missing, reseeding defaults");
        Self::seed_defaults(pool).await
    }

    /// Apply a partial update. Only non-`None` fields are changed.
    ///
    /// Range checks are the caller's responsibility (see
    /// `LimitsConfig::validate`); the table's CHECK constraints are the
    /// last line.
    pub async fn update(
        pool: &PgPool,
        input: &UpdateQcSettings,
    ) -> Result<QcSettings, sqlx::Error> {
        // Guarantees the row exists before updating it.
        Self::get(pool).await?;

        let query = format!(
            "UPDATE qc_settings SET
                hospital_logo = CASE WHEN $2::TEXT IS NULL THEN hospital_logo
                                     ELSE NULLIF($2, '') END,
                kv_deviation_limit_pct = COALESCE($3, kv_deviation_limit_pct),
                kv_absolute_limit_kv = COALESCE($4, kv_absolute_limit_kv),
                repeatability_cv_limit = COALESCE($5, repeatability_cv_limit),
                linearity_r_squared_limit = COALESCE($6, linearity_r_squared_limit),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, QcSettings>(&query)
            .bind(SETTINGS_ROW_ID)
            .bind(&input.hospital_logo)
            .bind(input.kv_deviation_limit_pct)
            .bind(input.kv_absolute_limit_kv)
            .bind(input.repeatability_cv_limit)
            .bind(input.linearity_r_squared_limit)
            .fetch_one(pool)
            .await?;

        tracing::info!(
            kv_deviation_limit_pct = row.kv_deviation_limit_pct,
            kv_absolute_limit_kv = row.kv_absolute_limit_kv,
            repeatability_cv_limit = row.repeatability_cv_limit,
            linearity_r_squared_limit = row.linearity_r_squared_limit,
            "QC settings updated"
        );
        Ok(row)
    }

    async fn seed_defaults(pool: &PgPool) -> Result<QcSettings, sqlx::Error> {
        let defaults = LimitsConfig::default();
        let query = format!(
            "INSERT INTO qc_settings
                (id, kv_deviation_limit_pct, kv_absolute_limit_kv,
                 repeatability_cv_limit, linearity_r_squared_limit)
             VALUES ($1, $2, $3, $4, $5)
             ON CONFLICT (id) DO UPDATE SET id = EXCLUDED.id
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, QcSettings>(&query)
            .bind(SETTINGS_ROW_ID)
            .bind(defaults.kv_deviation_limit_pct)
            .bind(defaults.kv_absolute_limit_kv)
            .bind(defaults.repeatability_cv_limit)
            .bind(defaults.linearity_r_squared_limit)
            .fetch_one(pool)
            .await
    }
}
