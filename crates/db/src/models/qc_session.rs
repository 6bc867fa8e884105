//! QC session models and DTOs.
//!
//! Maps to the `qc_sessions` table (migration 000001). The three test
//! results are stored as JSONB snapshots and never recomputed.

use chrono::NaiveDate;
use mxqc_core::evaluator::{
    KvTestResult, LinearityTestResult, RepeatabilityTestResult, SessionEvaluation,
};
use mxqc_core::machine::MachineInfo;
use mxqc_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::types::Json;
use sqlx::FromRow;

// ---------------------------------------------------------------------------
// Entity
// ---------------------------------------------------------------------------

/// A row from the `qc_sessions` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct QcSession {
    pub id: DbId,
    pub hospital: String,
    pub room: String,
    pub model: String,
    pub serial: String,
    pub tube_serial: String,
    pub detector_serial: String,
    pub tech_name: String,
    pub session_date: NaiveDate,
    pub kv_test: Json<KvTestResult>,
    pub repeatability_test: Json<RepeatabilityTestResult>,
    pub linearity_test: Json<LinearityTestResult>,
    pub overall_passed: bool,
    pub created_at: Timestamp,
}

impl QcSession {
    /// The machine/operator metadata recorded with this session.
    pub fn machine_info(&self) -> MachineInfo {
        MachineInfo {
            hospital: self.hospital.clone(),
            room: self.room.clone(),
            model: self.model.clone(),
            serial: self.serial.clone(),
            tube_serial: self.tube_serial.clone(),
            detector_serial: self.detector_serial.clone(),
            tech_name: self.tech_name.clone(),
            session_date: self.session_date,
        }
    }

    /// The stored evaluation snapshot, exactly as persisted.
    pub fn evaluation(&self) -> SessionEvaluation {
        SessionEvaluation {
            kv_test: self.kv_test.0.clone(),
            repeatability_test: self.repeatability_test.0.clone(),
            linearity_test: self.linearity_test.0.clone(),
            overall_passed: self.overall_passed,
        }
    }
}

// ---------------------------------------------------------------------------
// Create DTO
// ---------------------------------------------------------------------------

/// Everything needed to insert a finished session.
///
/// Only constructed after a full, successful evaluation so a partial
/// session can never be written.
#[derive(Debug, Clone)]
pub struct CreateQcSession {
    pub machine: MachineInfo,
    pub evaluation: SessionEvaluation,
}

// ---------------------------------------------------------------------------
// List DTO
// ---------------------------------------------------------------------------

/// One page of session history plus the total match count.
#[derive(Debug, Serialize)]
pub struct QcSessionPage {
    pub items: Vec<QcSession>,
    pub total: i64,
    pub limit: i64,
    pub offset: i64,
}
