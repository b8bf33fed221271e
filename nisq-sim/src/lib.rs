//! Noisy density-matrix simulator for routed circuits
//!
//! A [`NoisySimulator`] takes a [`DeviceProfile`](nisq_core::DeviceProfile)
//! and a [`CompiledCircuit`](nisq_core::CompiledCircuit), evolves the full
//! density matrix gate by gate with calibrated gate errors and T1/T2 idle
//! decoherence, then samples measurement outcomes and reports them in
//! logical qubit order.
//!
//! # Example
//!
//! ```
//! use nisq_core::{CompiledCircuit, DeviceProfile, GateKind, QubitLayout};
//! use nisq_sim::{NoisySimulator, SimulatorConfig};
//!
//! let device = DeviceProfile::builder(1)
//!     .gate("x", 1.0, 35.0)
//!     .build()
//!     .unwrap();
//! let mut circuit = CompiledCircuit::new(1, QubitLayout::identity(1)).unwrap();
//! circuit.push(GateKind::X, &[0]).unwrap();
//!
//! // A certain bit-flip error undoes the x gate
//! let simulator = NoisySimulator::new(device, circuit).unwrap();
//! let counts = simulator.simulate(100).unwrap();
//! assert_eq!(counts.get("0"), 100);
//! ```

pub mod config;
pub mod error;
pub mod evolver;
pub mod remap;
pub mod result;
pub mod simulator;

pub use config::SimulatorConfig;
pub use error::{Result, SimulatorError};
pub use evolver::{EvolutionStats, NoisyEvolver};
pub use nisq_state::LiftingStrategy;
pub use remap::BitOrder;
pub use result::{MeasurementCounts, SimulationResult};
pub use simulator::NoisySimulator;
