//! Engine error types.
//!
//! Configuration and move errors are returned to the immediate caller.
//! Solver results are never errors; see [`crate::SolveOutcome`].

use thiserror::Error;

use crate::Move;

/// Errors returned by engine operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// Board size, piece filter or hash does not describe a playable board.
    #[error("Invalid configuration: {reason}")]
    InvalidConfiguration { reason: String },

    /// The move cannot be applied to this state.
    #[error("Illegal move {mv}: {reason}")]
    IllegalMove { mv: Move, reason: String },

    /// No registered state under this hash or node id.
    #[error("Unknown state: {key}")]
    UnknownState { key: String },
}

impl EngineError {
    pub(crate) fn config(reason: impl Into<String>) -> EngineError {
        EngineError::InvalidConfiguration {
            reason: reason.into(),
        }
    }

    pub(crate) fn illegal(mv: Move, reason: impl Into<String>) -> EngineError {
        EngineError::IllegalMove {
            mv,
            reason: reason.into(),
        }
    }

    pub(crate) fn unknown(key: impl ToString) -> EngineError {
        EngineError::UnknownState {
            key: key.to_string(),
        }
    }
}

/// Result alias for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;
