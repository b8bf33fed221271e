//! Core types for noisy density-matrix simulation
//!
//! This crate describes *what* is simulated:
//! - [`DeviceProfile`]: native gates with error rates and durations, coupling
//!   map, per-qubit T1/T2
//! - [`CompiledCircuit`]: a routed gate list over physical qubits plus the
//!   final [`QubitLayout`]
//! - [`GateKind`]: the closed native gate catalog and its operator tables
//! - [`noise`]: Kraus channels for gate errors and idle decoherence
//!
//! # Example
//! ```
//! use nisq_core::{CompiledCircuit, DeviceProfile, GateKind, QubitLayout};
//!
//! let device = DeviceProfile::ideal(2).unwrap();
//! let mut circuit = CompiledCircuit::new(2, QubitLayout::identity(2)).unwrap();
//! circuit.push(GateKind::H, &[0]).unwrap();
//! circuit.push(GateKind::Cx, &[0, 1]).unwrap();
//! assert!(circuit.gates().iter().all(|op| device.supports(op.kind())));
//! ```

pub mod circuit;
pub mod device;
pub mod error;
pub mod gate;
pub mod matrices;
pub mod noise;
pub mod qubit;

#[cfg(feature = "serialization")]
pub mod serialization;

// Re-exports for convenience
pub use circuit::{CompiledCircuit, QubitLayout};
pub use device::{DeviceProfile, DeviceProfileBuilder, GateSpec, QubitProperties};
pub use error::QuantumError;
pub use gate::{GateKind, GateOp};
pub use num_complex::Complex64;
pub use qubit::QubitId;

/// Type alias for results in nisq-core
pub type Result<T> = std::result::Result<T, QuantumError>;
