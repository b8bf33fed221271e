//! Gate-by-gate density-matrix evolution
//!
//! For each gate of a compiled circuit the evolver
//!
//! 1. lets every idle qubit decohere for the gate's duration (amplitude
//!    damping, then dephasing when the qubit has a pure-dephasing rate),
//! 2. applies the gate together with its bit-flip error as one Kraus channel,
//! 3. latches the target of a `measure` so it receives no further idle noise.
//!
//! Idle qubits are all qubits of the register except the gate's targets and
//! the qubits already measured.

use crate::config::SimulatorConfig;
use crate::error::Result;
use log::{debug, info, warn};
use nisq_core::noise::{GateErrorChannel, IdleDecoherence, NoiseChannel};
use nisq_core::{CompiledCircuit, DeviceProfile, GateOp, QuantumError};
use nisq_state::DensityMatrix;
use std::collections::BTreeSet;
use std::time::{Duration, Instant};

/// Counters collected during one run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EvolutionStats {
    /// Gates applied so far
    pub gates_applied: usize,
    /// Gates applied together with a bit-flip error channel
    pub gate_error_channels: usize,
    /// Single-qubit idle channels applied
    pub idle_channels: usize,
    /// Measurement gates seen
    pub measurements: usize,
    /// Trace after the last step
    pub final_trace: f64,
    /// Purity after the last step
    pub final_purity: f64,
    /// Wall time spent in [`NoisyEvolver::run`]
    pub evolution_time: Duration,
}

/// Check that `circuit` can run on `device`
///
/// # Errors
/// - [`QuantumError::InvalidCircuit`] if the circuit uses more qubits than
///   the device has
/// - [`QuantumError::InvalidQubit`] for an out-of-range gate target
/// - [`QuantumError::UnknownGate`] for a gate the device doesn't offer
pub fn validate_circuit(device: &DeviceProfile, circuit: &CompiledCircuit) -> Result<()> {
    if circuit.num_qubits() > device.num_qubits() {
        return Err(QuantumError::InvalidCircuit(format!(
            "circuit uses {} qubits, device has {}",
            circuit.num_qubits(),
            device.num_qubits()
        ))
        .into());
    }
    circuit.validate()?;
    for op in circuit.gates() {
        device.gate_spec(op.kind())?;
    }
    Ok(())
}

/// Steps a density matrix through a compiled circuit
///
/// # Example
/// ```
/// use nisq_core::{CompiledCircuit, DeviceProfile, GateKind, QubitLayout};
/// use nisq_sim::{NoisyEvolver, SimulatorConfig};
///
/// let device = DeviceProfile::ideal(2).unwrap();
/// let mut circuit = CompiledCircuit::new(2, QubitLayout::identity(2)).unwrap();
/// circuit.push(GateKind::X, &[1]).unwrap();
/// let config = SimulatorConfig::default();
///
/// let mut evolver = NoisyEvolver::new(&device, &circuit, &config).unwrap();
/// while evolver.step().unwrap() {}
/// assert!((evolver.state().get(1, 1).re - 1.0).abs() < 1e-12);
/// ```
pub struct NoisyEvolver<'a> {
    device: &'a DeviceProfile,
    circuit: &'a CompiledCircuit,
    config: &'a SimulatorConfig,
    state: DensityMatrix,
    measured: BTreeSet<usize>,
    next_gate: usize,
    stats: EvolutionStats,
}

impl<'a> NoisyEvolver<'a> {
    /// Validate the run and prepare |0…0⟩⟨0…0|
    pub fn new(
        device: &'a DeviceProfile,
        circuit: &'a CompiledCircuit,
        config: &'a SimulatorConfig,
    ) -> Result<Self> {
        config.validate()?;
        validate_circuit(device, circuit)?;

        let state = DensityMatrix::new(circuit.num_qubits())?
            .with_parallel_threshold(config.parallel_threshold);
        let stats = EvolutionStats {
            final_trace: state.trace(),
            final_purity: 1.0,
            ..Default::default()
        };

        Ok(Self {
            device,
            circuit,
            config,
            state,
            measured: BTreeSet::new(),
            next_gate: 0,
            stats,
        })
    }

    /// Apply the next gate
    ///
    /// Returns `Ok(false)` once every gate has been applied. Callers that
    /// need to abort a long run simply stop stepping.
    pub fn step(&mut self) -> Result<bool> {
        let circuit = self.circuit;
        let Some(op) = circuit.gates().get(self.next_gate) else {
            return Ok(false);
        };

        self.apply_gate(op)?;
        self.next_gate += 1;
        self.stats.gates_applied += 1;
        self.stats.final_trace = self.state.trace();

        debug!(
            "step {}/{}: {:?} (trace {:.12})",
            self.next_gate,
            circuit.len(),
            op,
            self.stats.final_trace
        );
        if (self.stats.final_trace - 1.0).abs() > self.config.trace_tolerance {
            warn!(
                "trace drifted to {:.12} after {:?} (step {})",
                self.stats.final_trace, op, self.next_gate
            );
        }
        let interval = self.config.progress_interval;
        if interval > 0 && self.next_gate % interval == 0 {
            info!("applied {}/{} gates", self.next_gate, circuit.len());
        }

        Ok(true)
    }

    /// Apply every remaining gate
    pub fn run(&mut self) -> Result<()> {
        let start = Instant::now();
        while self.step()? {}
        self.stats.final_purity = self.state.purity();
        self.stats.evolution_time += start.elapsed();
        Ok(())
    }

    fn apply_gate(&mut self, op: &GateOp) -> Result<()> {
        let spec = *self.device.gate_spec(op.kind())?;
        let targets = op.qubit_indices();
        let strategy = self.config.lifting;

        if self.config.apply_decoherence && spec.duration > 0.0 {
            for qubit in 0..self.state.num_qubits() {
                if op.acts_on(qubit) || self.measured.contains(&qubit) {
                    continue;
                }
                let props = self
                    .device
                    .qubit(qubit)
                    .ok_or_else(|| QuantumError::invalid_qubit(qubit, self.device.num_qubits()))?;
                let idle = IdleDecoherence::new(props, spec.duration)?;
                if idle.is_trivial() {
                    continue;
                }
                for channel in idle.channels() {
                    self.state
                        .apply_kraus_channel(&channel.kraus_operators(), &[qubit], strategy)?;
                    self.stats.idle_channels += 1;
                }
            }
        }

        if self.config.apply_gate_errors && spec.error_rate > 0.0 {
            let channel = GateErrorChannel::new(op.kind(), spec.error_rate)?;
            self.state
                .apply_kraus_channel(&channel.kraus_operators(), &targets, strategy)?;
            self.stats.gate_error_channels += 1;
        } else {
            self.state
                .apply_unitary(&op.kind().matrix(), &targets, strategy)?;
        }

        if op.kind().is_measurement() {
            self.measured.insert(targets[0]);
            self.stats.measurements += 1;
        }
        Ok(())
    }

    /// Current density matrix
    pub fn state(&self) -> &DensityMatrix {
        &self.state
    }

    /// Physical qubits measured so far
    pub fn measured_qubits(&self) -> &BTreeSet<usize> {
        &self.measured
    }

    /// Index of the next gate to apply
    pub fn position(&self) -> usize {
        self.next_gate
    }

    pub fn is_finished(&self) -> bool {
        self.next_gate >= self.circuit.len()
    }

    pub fn stats(&self) -> &EvolutionStats {
        &self.stats
    }

    /// Consume the evolver, returning the final state and statistics
    pub fn finish(mut self) -> (DensityMatrix, EvolutionStats) {
        self.stats.final_purity = self.state.purity();
        (self.state, self.stats)
    }
}

impl std::fmt::Debug for NoisyEvolver<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NoisyEvolver")
            .field("position", &self.next_gate)
            .field("gates", &self.circuit.len())
            .field("measured", &self.measured)
            .field("state", &self.state)
            .finish()
    }
}
