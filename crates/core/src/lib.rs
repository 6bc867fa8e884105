//! Domain logic for mobile X-ray quality control.
//!
//! Everything in this crate is pure: no database, no I/O, no global state.
//! Persistence lives in `mxqc-db` and the HTTP surface in `mxqc-api`.

pub mod error;
pub mod evaluator;
pub mod history;
pub mod limits;
pub mod machine;
pub mod readings;
pub mod report;
pub mod stats;
pub mod threshold_validation;
pub mod types;
