//! Core error types for courtside-core.
//!
//! The run engine itself never fails mid-run -- adjustments clamp and
//! illegal transitions are no-ops -- so errors only arise at the edges:
//! template validation and (de)serialization.

use thiserror::Error;

/// Core error type for courtside-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Template validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Validation errors for workout/catalog templates.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// Drill ids within a workout must be unique
    #[error("Workout '{workout_id}' contains duplicate drill id '{drill_id}'")]
    DuplicateDrillId { workout_id: String, drill_id: String },
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
