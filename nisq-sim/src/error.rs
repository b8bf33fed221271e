//! Error types for the simulator

use nisq_core::QuantumError;
use nisq_state::StateError;
use thiserror::Error;

/// Result type for simulator operations
pub type Result<T> = std::result::Result<T, SimulatorError>;

/// Errors that can occur during simulation
///
/// Every error is fatal for the run that raised it.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SimulatorError {
    /// Device profile, gate or circuit problem
    #[error(transparent)]
    Core(#[from] QuantumError),

    /// Density matrix or sampling problem
    #[error(transparent)]
    State(#[from] StateError),

    /// Invalid configuration or run parameters
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl SimulatorError {
    /// Whether the run failed on a gate the device or catalog doesn't know
    pub fn is_unknown_gate(&self) -> bool {
        matches!(self, Self::Core(QuantumError::UnknownGate(_)))
    }

    /// Whether the run failed on a qubit index (out of range, repeated, or
    /// wrong arity)
    pub fn is_qubit_index_error(&self) -> bool {
        match self {
            Self::Core(err) => err.is_qubit_index_error(),
            Self::State(err) => matches!(
                err,
                StateError::InvalidQubitIndex { .. } | StateError::DuplicateQubit { .. }
            ),
            Self::InvalidConfig(_) => false,
        }
    }
}
