//! Machine and operator metadata recorded with every QC session.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::CoreError;

/// Maximum length of any free-text metadata field.
pub const MAX_FIELD_LEN: u64 = 200;

/// Identification of the X-ray unit under test and who tested it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct MachineInfo {
    #[validate(length(min = 1, max = MAX_FIELD_LEN), custom(function = "not_blank"))]
    pub hospital: String,
    #[validate(length(min = 1, max = MAX_FIELD_LEN), custom(function = "not_blank"))]
    pub room: String,
    #[validate(length(min = 1, max = MAX_FIELD_LEN), custom(function = "not_blank"))]
    pub model: String,
    #[validate(length(min = 1, max = MAX_FIELD_LEN), custom(function = "not_blank"))]
    pub serial: String,
    #[validate(length(min = 1, max = MAX_FIELD_LEN), custom(function = "not_blank"))]
    pub tube_serial: String,
    #[validate(length(min = 1, max = MAX_FIELD_LEN), custom(function = "not_blank"))]
    pub detector_serial: String,
    #[validate(length(min = 1, max = MAX_FIELD_LEN), custom(function = "not_blank"))]
    pub tech_name: String,
    pub session_date: NaiveDate,
}

fn not_blank(value: &str) -> Result<(), validator::ValidationError> {
    if value.trim().is_empty() {
        return Err(validator::ValidationError::new("blank"));
    }
    Ok(())
}

impl MachineInfo {
    /// Validate all fields, reporting offending field names in a single
    /// `CoreError::Validation`.
    pub fn check(&self) -> Result<(), CoreError> {
        self.validate().map_err(|errs| {
            let mut fields: Vec<String> =
                errs.field_errors().keys().map(|k| k.to_string()).collect();
            fields.sort_unstable();
            CoreError::Validation(format!(
                "Machine information is incomplete or too long (max {MAX_FIELD_LEN} chars): {}",
                fields.join(", ")
            ))
        })
    }
}
