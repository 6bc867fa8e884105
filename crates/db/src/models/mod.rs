//! Row types and DTOs, one module per table.

pub mod qc_session;
pub mod qc_settings;
