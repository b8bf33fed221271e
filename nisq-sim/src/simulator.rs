//! Noisy simulator entry point

use crate::config::SimulatorConfig;
use crate::error::{Result, SimulatorError};
use crate::evolver::{validate_circuit, EvolutionStats, NoisyEvolver};
use crate::remap::report_bitstring;
use crate::result::{MeasurementCounts, SimulationResult};
use log::{debug, info};
use nisq_core::{CompiledCircuit, DeviceProfile};
use nisq_state::{sampling, DensityMatrix};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::BTreeMap;
use std::time::Instant;

/// Density-matrix simulator for a routed circuit on a noisy device
///
/// Every run starts from a fresh |0…0⟩ state; the simulator itself holds no
/// mutable state between runs.
///
/// # Example
///
/// ```
/// use nisq_core::{CompiledCircuit, DeviceProfile, GateKind, QubitLayout};
/// use nisq_sim::{NoisySimulator, SimulatorConfig};
///
/// let device = DeviceProfile::builder(2)
///     .gate("h", 0.0, 35.0)
///     .gate("cx", 0.0, 300.0)
///     .edge(0, 1)
///     .build()
///     .unwrap();
///
/// let mut circuit = CompiledCircuit::new(2, QubitLayout::identity(2)).unwrap();
/// circuit.push(GateKind::H, &[0]).unwrap();
/// circuit.push(GateKind::Cx, &[0, 1]).unwrap();
///
/// let simulator = NoisySimulator::new(device, circuit)
///     .unwrap()
///     .with_config(SimulatorConfig::new().with_seed(7))
///     .unwrap();
/// let counts = simulator.simulate(1000).unwrap();
/// assert_eq!(counts.get("00") + counts.get("11"), 1000);
/// ```
#[derive(Debug, Clone)]
pub struct NoisySimulator {
    device: DeviceProfile,
    circuit: CompiledCircuit,
    config: SimulatorConfig,
}

impl NoisySimulator {
    /// Create a simulator with the default configuration
    ///
    /// # Errors
    /// Fails if the circuit is wider than the device, targets a qubit outside
    /// its register, or uses a gate the device has no calibration for.
    pub fn new(device: DeviceProfile, circuit: CompiledCircuit) -> Result<Self> {
        validate_circuit(&device, &circuit)?;
        Ok(Self {
            device,
            circuit,
            config: SimulatorConfig::default(),
        })
    }

    /// Replace the configuration
    pub fn with_config(mut self, config: SimulatorConfig) -> Result<Self> {
        config.validate()?;
        self.config = config;
        Ok(self)
    }

    pub fn config(&self) -> &SimulatorConfig {
        &self.config
    }

    pub fn device(&self) -> &DeviceProfile {
        &self.device
    }

    pub fn circuit(&self) -> &CompiledCircuit {
        &self.circuit
    }

    /// A step-wise evolver over this simulator's circuit
    pub fn evolver(&self) -> Result<NoisyEvolver<'_>> {
        NoisyEvolver::new(&self.device, &self.circuit, &self.config)
    }

    /// Evolve the whole circuit and return ρ in physical qubit order
    pub fn final_density_matrix(&self) -> Result<DensityMatrix> {
        Ok(self.evolve()?.0)
    }

    /// Evolve the circuit and sample `shots` outcomes
    ///
    /// Keys of the returned histogram are in logical qubit order, arranged
    /// according to the configured [`BitOrder`](crate::BitOrder).
    ///
    /// # Errors
    /// - [`SimulatorError::InvalidConfig`] if `shots` is zero
    /// - any validation or evolution error of the run
    /// - [`nisq_state::StateError::NonPhysicalState`] if the final diagonal
    ///   cannot be turned into probabilities
    pub fn simulate(&self, shots: usize) -> Result<MeasurementCounts> {
        Ok(self.run(shots)?.counts)
    }

    /// Like [`simulate`](Self::simulate), also returning the final state and
    /// run statistics
    pub fn run(&self, shots: usize) -> Result<SimulationResult> {
        if shots == 0 {
            return Err(SimulatorError::InvalidConfig(
                "shots must be greater than zero".to_string(),
            ));
        }

        let (state, stats) = self.evolve()?;
        let counts = self.sample(&state, shots)?;
        Ok(SimulationResult {
            state,
            counts,
            stats,
        })
    }

    fn evolve(&self) -> Result<(DensityMatrix, EvolutionStats)> {
        info!(
            "simulating {} gates on {} qubits",
            self.circuit.len(),
            self.circuit.num_qubits()
        );
        let mut evolver = self.evolver()?;
        evolver.run()?;
        let (state, stats) = evolver.finish();
        info!(
            "evolution finished in {:?}: trace {:.12}, purity {:.6}",
            stats.evolution_time, stats.final_trace, stats.final_purity
        );
        Ok((state, stats))
    }

    fn sample(&self, state: &DensityMatrix, shots: usize) -> Result<MeasurementCounts> {
        let start = Instant::now();
        let probs = sampling::probabilities(state, self.config.negative_mass_tolerance)?;

        let mut rng = match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let mut by_index: BTreeMap<usize, usize> = BTreeMap::new();
        for index in sampling::sample_indices(&probs, shots, &mut rng)? {
            *by_index.entry(index).or_insert(0) += 1;
        }

        let num_qubits = state.num_qubits();
        let layout = self.circuit.layout();
        let mut counts = MeasurementCounts::new(shots);
        for (index, count) in by_index {
            let physical = sampling::format_bitstring(index, num_qubits);
            counts.add(
                report_bitstring(&physical, layout, self.config.bit_order),
                count,
            );
        }

        debug!(
            "sampled {} shots into {} outcomes in {:?}",
            shots,
            counts.num_outcomes(),
            start.elapsed()
        );
        Ok(counts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nisq_core::{GateKind, QubitLayout};

    fn single_qubit(gate: &str, error_rate: f64) -> NoisySimulator {
        let device = DeviceProfile::builder(1)
            .gate(gate, error_rate, 50.0)
            .build()
            .unwrap();
        let mut circuit = CompiledCircuit::new(1, QubitLayout::identity(1)).unwrap();
        circuit.push_named(gate, &[0]).unwrap();
        NoisySimulator::new(device, circuit).unwrap()
    }

    #[test]
    fn test_zero_shots_rejected() {
        let err = single_qubit("x", 0.0).simulate(0).unwrap_err();
        assert!(matches!(err, SimulatorError::InvalidConfig(_)));
    }

    #[test]
    fn test_certain_bit_flip_undoes_x() {
        let counts = single_qubit("x", 1.0).simulate(100).unwrap();
        assert_eq!(counts.get("0"), 100);
        assert_eq!(counts.num_outcomes(), 1);
    }

    #[test]
    fn test_run_reports_state_and_stats() {
        let simulator = single_qubit("h", 0.0);
        let result = simulator.run(10).unwrap();
        assert_eq!(result.num_qubits(), 1);
        assert_eq!(result.total_shots(), 10);
        assert_eq!(result.stats.gates_applied, 1);
        assert!((result.stats.final_trace - 1.0).abs() < 1e-12);
        assert!((result.state.get(0, 1).re - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_same_seed_same_counts() {
        let simulator = single_qubit("h", 0.0)
            .with_config(SimulatorConfig::new().with_seed(11))
            .unwrap();
        assert_eq!(simulator.simulate(500).unwrap(), simulator.simulate(500).unwrap());
    }

    #[test]
    fn test_invalid_config_rejected() {
        let result = single_qubit("x", 0.0)
            .with_config(SimulatorConfig::new().with_trace_tolerance(f64::NAN));
        assert!(result.is_err());
    }

    #[test]
    fn test_final_density_matrix_is_physical_order() {
        let device = DeviceProfile::ideal(2).unwrap();
        let mut circuit = CompiledCircuit::new(2, QubitLayout::new(vec![1, 0]).unwrap()).unwrap();
        circuit.push(GateKind::X, &[0]).unwrap();
        let simulator = NoisySimulator::new(device, circuit).unwrap();

        let state = simulator.final_density_matrix().unwrap();
        // physical qubit 0 is the MSB: |10⟩ is index 2
        assert!((state.get(2, 2).re - 1.0).abs() < 1e-12);
    }
}
