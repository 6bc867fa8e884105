//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod qc_session_repo;
pub mod qc_settings_repo;

pub use qc_session_repo::QcSessionRepo;
pub use qc_settings_repo::QcSettingsRepo;
