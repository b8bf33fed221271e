//! Density-matrix state backend for noisy circuit simulation
//!
//! This crate owns the numerical side of a run:
//!
//! - [`DensityMatrix`]: the full `2^n × 2^n` state with ping-pong buffers
//! - [`lifting`]: embedding 1- and 2-qubit operators into the register,
//!   either as explicit Kronecker products routed through a [`SwapNetwork`]
//!   or by direct index contraction
//! - [`sampling`]: diagonal → probabilities → shots
//!
//! # Example
//!
//! ```
//! use nisq_core::GateKind;
//! use nisq_state::{sampling, DensityMatrix, LiftingStrategy};
//!
//! let mut dm = DensityMatrix::new(2).unwrap();
//! dm.apply_unitary(&GateKind::X.matrix(), &[0], LiftingStrategy::Contraction).unwrap();
//!
//! let probs = sampling::probabilities(&dm, 1e-6).unwrap();
//! assert_eq!(probs, vec![0.0, 0.0, 1.0, 0.0]);
//! assert_eq!(sampling::format_bitstring(2, 2), "10");
//! ```

pub mod density_matrix;
pub mod error;
pub mod lifting;
pub mod sampling;

pub use density_matrix::{DensityMatrix, DEFAULT_PARALLEL_THRESHOLD};
pub use error::{Result, StateError};
pub use lifting::{LiftingStrategy, SwapNetwork};
