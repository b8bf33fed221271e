//! Error types for device profiles, gates and compiled circuits

use thiserror::Error;

/// Errors raised while describing a device or a compiled circuit
#[derive(Debug, Error, Clone, PartialEq)]
pub enum QuantumError {
    /// Malformed error rate, duration or coherence time in a device profile
    #[error("Invalid device profile: {0}")]
    InvalidDeviceProfile(String),

    /// Gate name with no operator table entry, or missing from the device gate set
    #[error("Unknown gate '{0}'")]
    UnknownGate(String),

    /// Qubit index outside the register
    #[error("Invalid qubit index {0}: register has only {1} qubits")]
    InvalidQubit(usize, usize),

    /// Same qubit named twice in one gate operation
    #[error("Duplicate qubit {0} in gate operation")]
    DuplicateQubit(usize),

    /// Gate applied to the wrong number of qubits
    #[error("Gate '{gate}' requires {expected} qubits, but {actual} were provided")]
    InvalidQubitCount {
        gate: String,
        expected: usize,
        actual: usize,
    },

    /// Circuit-level inconsistency (layout, size)
    #[error("Invalid circuit: {0}")]
    InvalidCircuit(String),

    /// Noise channel parameter outside its physical range
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Serialization failed
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// Deserialization failed
    #[error("Deserialization error: {0}")]
    DeserializationError(String),

    /// Serialized data written by a newer format version
    #[error("Format version mismatch: expected at most {expected}, found {actual}")]
    VersionMismatch { expected: u32, actual: u32 },
}

impl QuantumError {
    /// Create an invalid qubit error
    pub fn invalid_qubit(qubit: usize, num_qubits: usize) -> Self {
        Self::InvalidQubit(qubit, num_qubits)
    }

    /// Create an invalid qubit count error
    pub fn invalid_qubit_count(gate: impl Into<String>, expected: usize, actual: usize) -> Self {
        Self::InvalidQubitCount {
            gate: gate.into(),
            expected,
            actual,
        }
    }

    /// Create an invalid device profile error
    pub fn invalid_device(msg: impl Into<String>) -> Self {
        Self::InvalidDeviceProfile(msg.into())
    }

    /// Whether this error belongs to the qubit-index family
    /// (out of range, repeated, or wrong arity)
    pub fn is_qubit_index_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidQubit(..) | Self::DuplicateQubit(_) | Self::InvalidQubitCount { .. }
        )
    }
}
