//! Leave guard error types

use thiserror::Error;

/// Failure raised by a leave guard. The state machine treats every
/// failure exactly like a denial.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GuardError {
    #[error("Leave guard failed: {0}")]
    Failed(String),

    #[error("Leave guard was dropped before answering")]
    Dropped,
}
