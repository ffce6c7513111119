//! Error types for KAIROS

use thiserror::Error;

/// Core KAIROS errors
///
/// All failures are local and synchronous: an operation either returns a
/// valid value or fails leaving prior state unchanged.
#[derive(Error, Debug)]
pub enum KairosError {
    // Hierarchy errors
    #[error("Unknown level: {0}")]
    UnknownLevel(String),

    #[error("Invalid reconfiguration: {0}")]
    InvalidReconfiguration(String),

    // Arithmetic errors
    #[error("Subtraction would cross below the zero timepoint")]
    NegativeResult,

    // Scheduling errors
    #[error("Unsatisfiable dependencies: {remaining} unscheduled task(s) can never become ready")]
    UnsatisfiableDependency { remaining: usize },
}

/// Result type for KAIROS operations
pub type KairosResult<T> = Result<T, KairosError>;
