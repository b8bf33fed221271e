//! Simulator configuration

use crate::error::{Result, SimulatorError};
use crate::remap::BitOrder;
use nisq_state::sampling::DEFAULT_NEGATIVE_MASS_TOLERANCE;
use nisq_state::{LiftingStrategy, DEFAULT_PARALLEL_THRESHOLD};

/// Configuration for the noisy simulator
#[derive(Debug, Clone, PartialEq)]
pub struct SimulatorConfig {
    /// Random number generator seed for reproducibility
    ///
    /// If None, the sampler is seeded from system entropy.
    ///
    /// Default: None (random)
    pub seed: Option<u64>,

    /// Follow every gate with its calibrated bit-flip error
    ///
    /// Default: true
    pub apply_gate_errors: bool,

    /// Apply T1/T2 decoherence to idle qubits
    ///
    /// Default: true
    pub apply_decoherence: bool,

    /// How local operators are applied to the density matrix
    ///
    /// Default: [`LiftingStrategy::Contraction`]
    pub lifting: LiftingStrategy,

    /// Character order of reported bitstrings
    ///
    /// Default: [`BitOrder::LittleEndian`] (logical qubit 0 rightmost)
    pub bit_order: BitOrder,

    /// Trace drift logged as a warning after a step
    ///
    /// Default: 1e-9
    pub trace_tolerance: f64,

    /// Negative diagonal mass tolerated before sampling fails
    ///
    /// Default: 1e-6
    pub negative_mass_tolerance: f64,

    /// Log progress every this many gates; 0 disables progress logging
    ///
    /// Default: 1000
    pub progress_interval: usize,

    /// Minimum number of qubits to split contraction work across threads
    ///
    /// Default: 7
    pub parallel_threshold: usize,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            seed: None,
            apply_gate_errors: true,
            apply_decoherence: true,
            lifting: LiftingStrategy::default(),
            bit_order: BitOrder::default(),
            trace_tolerance: 1e-9,
            negative_mass_tolerance: DEFAULT_NEGATIVE_MASS_TOLERANCE,
            progress_interval: 1000,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        }
    }
}

impl SimulatorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Noise-free evolution: no gate errors, no idle decoherence
    pub fn ideal() -> Self {
        Self {
            apply_gate_errors: false,
            apply_decoherence: false,
            ..Default::default()
        }
    }

    /// Create a configuration for debugging
    ///
    /// - Deterministic seed
    /// - Progress logged after every gate
    /// - Explicit Kronecker lifting
    pub fn debug() -> Self {
        Self {
            seed: Some(42),
            progress_interval: 1,
            lifting: LiftingStrategy::Kronecker,
            ..Default::default()
        }
    }

    /// Set the random seed for deterministic sampling
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_gate_errors(mut self, enabled: bool) -> Self {
        self.apply_gate_errors = enabled;
        self
    }

    pub fn with_decoherence(mut self, enabled: bool) -> Self {
        self.apply_decoherence = enabled;
        self
    }

    pub fn with_lifting(mut self, lifting: LiftingStrategy) -> Self {
        self.lifting = lifting;
        self
    }

    pub fn with_bit_order(mut self, bit_order: BitOrder) -> Self {
        self.bit_order = bit_order;
        self
    }

    pub fn with_trace_tolerance(mut self, tolerance: f64) -> Self {
        self.trace_tolerance = tolerance;
        self
    }

    pub fn with_negative_mass_tolerance(mut self, tolerance: f64) -> Self {
        self.negative_mass_tolerance = tolerance;
        self
    }

    pub fn with_progress_interval(mut self, interval: usize) -> Self {
        self.progress_interval = interval;
        self
    }

    pub fn with_parallel_threshold(mut self, num_qubits: usize) -> Self {
        self.parallel_threshold = num_qubits;
        self
    }

    /// Validate the configuration
    ///
    /// # Errors
    /// Returns [`SimulatorError::InvalidConfig`] for a negative or NaN tolerance
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("trace_tolerance", self.trace_tolerance),
            ("negative_mass_tolerance", self.negative_mass_tolerance),
        ] {
            if !(value >= 0.0) {
                return Err(SimulatorError::InvalidConfig(format!(
                    "{} must be non-negative, got {}",
                    name, value
                )));
            }
        }
        Ok(())
    }
}
