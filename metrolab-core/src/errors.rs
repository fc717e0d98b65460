//! Error types for the session store surface
//!
//! The calculation path never raises: malformed cells are discarded,
//! unknown unit pairs pass through unchanged, and parameters without
//! calibration or readings are skipped. Errors exist only at the store
//! mutation surface, where a caller names a record by id and that id
//! does not exist.
//!
//! Variants are kept small and `Copy` so they can be returned cheaply
//! and matched without allocation.

use thiserror_no_std::Error;

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors produced by [`SessionStore`](crate::store::SessionStore) mutations.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreError {
    /// No parameter with the given id exists.
    #[error("no parameter with id {param_id}")]
    UnknownParameter {
        /// The id the caller asked for.
        param_id: u32,
    },

    /// No calibration record with the given id exists.
    #[error("no calibration with id {calibration_id}")]
    UnknownCalibration {
        /// The id the caller asked for.
        calibration_id: u32,
    },

    /// No saved project with the given id exists.
    #[error("no project with id {project_id}")]
    UnknownProject {
        /// The id the caller asked for.
        project_id: u32,
    },
}
