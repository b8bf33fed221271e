//! Error types for density matrix operations

use thiserror::Error;

/// Errors that can occur while evolving or sampling a density matrix
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StateError {
    /// Invalid qubit index
    #[error("Invalid qubit index {index} for {num_qubits}-qubit state")]
    InvalidQubitIndex { index: usize, num_qubits: usize },

    /// The same qubit targeted twice by one operator
    #[error("Qubit {index} targeted more than once")]
    DuplicateQubit { index: usize },

    /// Invalid state or operator dimension
    #[error("Invalid dimension {dimension}")]
    InvalidDimension { dimension: usize },

    /// Dimension mismatch
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// Memory allocation error
    #[error("Failed to allocate a density matrix for {num_qubits} qubits")]
    AllocationError { num_qubits: usize },

    /// Diagonal does not describe a probability distribution
    #[error(
        "Non-physical state: negative probability mass {negative_mass:.3e} \
         (tolerance {tolerance:.1e}), clipped total {total}"
    )]
    NonPhysicalState {
        negative_mass: f64,
        tolerance: f64,
        total: f64,
    },
}

/// Result type for density matrix operations
pub type Result<T> = std::result::Result<T, StateError>;
