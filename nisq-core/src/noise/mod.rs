//! Noise channels for noisy density-matrix simulation
//!
//! Two error sources are modelled:
//!
//! - **Gate errors**: every native gate is followed by a bit-flip with the
//!   probability calibrated on the device
//! - **Idle decoherence**: qubits waiting while another gate runs undergo
//!   amplitude damping (T1) and pure dephasing (T2)
//!
//! Both are expressed as Kraus sets behind the [`NoiseChannel`] trait, so
//! the state backend can apply any of them the same way.
//!
//! # Usage
//!
//! ```
//! use nisq_core::noise::{AmplitudeDamping, GateErrorChannel, NoiseChannel};
//! use nisq_core::GateKind;
//!
//! let gate = GateErrorChannel::new(GateKind::H, 0.001).unwrap();
//! let relax = AmplitudeDamping::from_t1(100_000.0, 50.0).unwrap();
//! assert!(gate.verify_completeness(1e-12));
//! assert!(relax.verify_completeness(1e-12));
//! ```

pub mod channels;
pub mod types;

pub use channels::{AmplitudeDamping, GateErrorChannel, IdleDecoherence, PhaseDamping};
pub use types::{KrausOperator, NoiseChannel};
