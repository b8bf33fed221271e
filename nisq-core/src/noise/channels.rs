//! Noise channels used by the density-matrix evolver

use super::types::{KrausOperator, NoiseChannel};
use crate::matrices;
use crate::{DeviceProfile, GateKind, QuantumError, QubitProperties, Result};
use num_complex::Complex64;

fn check_probability(what: &str, p: f64) -> Result<()> {
    // NaN fails `contains`
    if !(0.0..=1.0).contains(&p) {
        return Err(QuantumError::ValidationError(format!(
            "{} must be in [0,1], got {}",
            what, p
        )));
    }
    Ok(())
}

fn check_elapsed(dt: f64) -> Result<()> {
    if !dt.is_finite() || dt < 0.0 {
        return Err(QuantumError::ValidationError(format!(
            "Elapsed time must be finite and non-negative, got {}",
            dt
        )));
    }
    Ok(())
}

/// A native gate followed by a bit-flip with probability p
///
/// The ideal operator and its error are fused into one two-element Kraus set.
/// Two-qubit gates flip both operands together.
///
/// # Kraus Operators
/// ```text
/// K₀ = √(1-p) G
/// K₁ = √p X^{⊗k} G
/// ```
///
/// # Example
/// ```
/// # use nisq_core::noise::{GateErrorChannel, NoiseChannel};
/// # use nisq_core::GateKind;
/// let channel = GateErrorChannel::new(GateKind::Cx, 0.02).unwrap();
/// assert_eq!(channel.num_qubits(), 2);
/// assert!(channel.verify_completeness(1e-12));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GateErrorChannel {
    kind: GateKind,
    error_rate: f64,
}

impl GateErrorChannel {
    /// # Errors
    /// Returns error if `error_rate` is not in [0, 1]
    pub fn new(kind: GateKind, error_rate: f64) -> Result<Self> {
        check_probability("Gate error rate", error_rate)?;
        Ok(Self { kind, error_rate })
    }

    /// Channel for `kind` with the error rate calibrated on `device`
    ///
    /// # Errors
    /// Returns [`QuantumError::UnknownGate`] if the device doesn't offer the gate
    pub fn for_device(device: &DeviceProfile, kind: GateKind) -> Result<Self> {
        let spec = device.gate_spec(kind)?;
        Self::new(kind, spec.error_rate)
    }

    pub fn kind(&self) -> GateKind {
        self.kind
    }

    pub fn error_rate(&self) -> f64 {
        self.error_rate
    }

    /// X on every operand of the gate
    fn flip(&self) -> Vec<Complex64> {
        let x = matrices::flatten2(&matrices::PAULI_X);
        match self.kind.num_qubits() {
            1 => x,
            _ => matrices::kron(&x, 2, &x, 2),
        }
    }
}

impl NoiseChannel for GateErrorChannel {
    fn kraus_operators(&self) -> Vec<KrausOperator> {
        let p = self.error_rate;
        let gate = self.kind.matrix();
        let flipped = matrices::matmul(&self.flip(), &gate, self.kind.dimension());

        vec![
            KrausOperator::scaled(gate, (1.0 - p).sqrt()),
            KrausOperator::scaled(flipped, p.sqrt()),
        ]
    }

    fn num_qubits(&self) -> usize {
        self.kind.num_qubits()
    }

    fn name(&self) -> &str {
        "gate_error"
    }

    fn description(&self) -> String {
        format!("{} with {}% bit-flip", self.kind, self.error_rate * 100.0)
    }
}

/// Amplitude damping channel
///
/// Models energy relaxation (T1 decay) from |1⟩ to |0⟩.
///
/// For a qubit idle for Δt: γ = 1 - exp(-Δt/T1)
///
/// # Kraus Operators
/// ```text
/// K₀ = [[1, 0], [0, √(1-γ)]]
/// K₁ = [[0, √γ], [0, 0]]
/// ```
///
/// # Example
/// ```
/// # use nisq_core::noise::AmplitudeDamping;
/// let channel = AmplitudeDamping::from_t1(50_000.0, 300.0).unwrap();
/// assert!(channel.gamma() > 0.0 && channel.gamma() < 0.01);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AmplitudeDamping {
    /// Decay probability γ ∈ [0, 1]
    gamma: f64,
}

impl AmplitudeDamping {
    /// # Errors
    /// Returns error if gamma is not in [0, 1]
    pub fn new(gamma: f64) -> Result<Self> {
        check_probability("Gamma", gamma)?;
        Ok(Self { gamma })
    }

    /// Create from T1 relaxation time and the elapsed time `dt`
    ///
    /// An infinite T1 gives γ = 0.
    pub fn from_t1(t1: f64, dt: f64) -> Result<Self> {
        if !(t1 > 0.0) {
            return Err(QuantumError::ValidationError(format!(
                "T1 must be positive, got {}",
                t1
            )));
        }
        check_elapsed(dt)?;

        Self::new(1.0 - (-dt / t1).exp())
    }

    pub fn gamma(&self) -> f64 {
        self.gamma
    }
}

impl NoiseChannel for AmplitudeDamping {
    fn kraus_operators(&self) -> Vec<KrausOperator> {
        let zero = Complex64::new(0.0, 0.0);
        let one = Complex64::new(1.0, 0.0);
        let k0 = [[one, zero], [zero, Complex64::new((1.0 - self.gamma).sqrt(), 0.0)]];
        let k1 = [[zero, Complex64::new(self.gamma.sqrt(), 0.0)], [zero, zero]];

        vec![
            KrausOperator::single_qubit(&k0, 1.0),
            KrausOperator::single_qubit(&k1, 1.0),
        ]
    }

    fn num_qubits(&self) -> usize {
        1
    }

    fn name(&self) -> &str {
        "amplitude_damping"
    }
}

/// Pure dephasing channel
///
/// A phase flip with probability p. Unlike a symmetric phase-damping
/// parametrisation, p covers the whole [0, 1] range so that long idle
/// periods saturate at p → 1.
///
/// For a qubit idle for Δt with pure-dephasing rate 1/Tφ:
/// p = 1 - exp(-Δt/Tφ)
///
/// # Kraus Operators
/// ```text
/// K₀ = √(1-p) I
/// K₁ = √p Z
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhaseDamping {
    /// Phase-flip probability p ∈ [0, 1]
    probability: f64,
}

impl PhaseDamping {
    /// # Errors
    /// Returns error if probability is not in [0, 1]
    pub fn new(probability: f64) -> Result<Self> {
        check_probability("Dephasing probability", probability)?;
        Ok(Self { probability })
    }

    /// Create from a pure-dephasing rate `1/Tφ` and the elapsed time `dt`
    pub fn from_dephasing_rate(rate: f64, dt: f64) -> Result<Self> {
        if !rate.is_finite() || rate < 0.0 {
            return Err(QuantumError::ValidationError(format!(
                "Dephasing rate must be finite and non-negative, got {}",
                rate
            )));
        }
        check_elapsed(dt)?;

        Self::new(1.0 - (-dt * rate).exp())
    }

    pub fn probability(&self) -> f64 {
        self.probability
    }
}

impl NoiseChannel for PhaseDamping {
    fn kraus_operators(&self) -> Vec<KrausOperator> {
        let p = self.probability;
        vec![
            KrausOperator::single_qubit(&matrices::IDENTITY, (1.0 - p).sqrt()),
            KrausOperator::single_qubit(&matrices::PAULI_Z, p.sqrt()),
        ]
    }

    fn num_qubits(&self) -> usize {
        1
    }

    fn name(&self) -> &str {
        "phase_damping"
    }
}

/// Decoherence of one idle qubit over one gate duration
///
/// Amplitude damping always applies. Dephasing is only present when the
/// clamped pure-dephasing rate is strictly positive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IdleDecoherence {
    amplitude: AmplitudeDamping,
    dephasing: Option<PhaseDamping>,
}

impl IdleDecoherence {
    /// # Errors
    /// Returns error if `dt` is negative or non-finite
    pub fn new(props: &QubitProperties, dt: f64) -> Result<Self> {
        let amplitude = AmplitudeDamping::from_t1(props.t1, dt)?;
        let rate = props.dephasing_rate();
        let dephasing = if rate > 0.0 {
            Some(PhaseDamping::from_dephasing_rate(rate, dt)?)
        } else {
            None
        };
        Ok(Self {
            amplitude,
            dephasing,
        })
    }

    pub fn amplitude(&self) -> &AmplitudeDamping {
        &self.amplitude
    }

    pub fn dephasing(&self) -> Option<&PhaseDamping> {
        self.dephasing.as_ref()
    }

    /// Channels in application order: amplitude damping, then dephasing
    pub fn channels(&self) -> impl Iterator<Item = &dyn NoiseChannel> {
        std::iter::once(&self.amplitude as &dyn NoiseChannel)
            .chain(self.dephasing.iter().map(|d| d as &dyn NoiseChannel))
    }

    /// Whether every channel is the identity (zero elapsed time or a
    /// qubit that never decoheres)
    pub fn is_trivial(&self) -> bool {
        self.amplitude.gamma() == 0.0
            && self.dephasing.map_or(true, |d| d.probability() == 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const TOLERANCE: f64 = 1e-10;

    #[test]
    fn test_gate_error_channel_completeness() {
        for kind in GateKind::ALL {
            for p in [0.0, 0.02, 0.5, 1.0] {
                let channel = GateErrorChannel::new(kind, p).unwrap();
                assert!(channel.verify_completeness(TOLERANCE), "{} p={}", kind, p);
                assert_eq!(channel.kraus_operators().len(), 2);
                assert_eq!(channel.num_qubits(), kind.num_qubits());
            }
        }
    }

    #[test]
    fn test_gate_error_flips_after_gate() {
        // K1 for h is √p·X·H
        let channel = GateErrorChannel::new(GateKind::H, 0.25).unwrap();
        let k1 = &channel.kraus_operators()[1];
        let h = std::f64::consts::FRAC_1_SQRT_2;
        assert_relative_eq!(k1.get(0, 0).re, 0.5 * h, epsilon = 1e-12);
        assert_relative_eq!(k1.get(0, 1).re, -0.5 * h, epsilon = 1e-12);
        assert_relative_eq!(k1.get(1, 0).re, 0.5 * h, epsilon = 1e-12);
        assert_relative_eq!(k1.get(1, 1).re, 0.5 * h, epsilon = 1e-12);
    }

    #[test]
    fn test_two_qubit_error_flips_both_operands() {
        // X⊗X·CNOT maps |00⟩ to |11⟩
        let channel = GateErrorChannel::new(GateKind::Cx, 1.0).unwrap();
        let k1 = &channel.kraus_operators()[1];
        assert_eq!(k1.dimension, 4);
        assert_relative_eq!(k1.get(3, 0).re, 1.0);
        assert_relative_eq!(k1.get(0, 0).norm(), 0.0);
    }

    #[test]
    fn test_gate_error_invalid_probability() {
        assert!(GateErrorChannel::new(GateKind::X, -0.1).is_err());
        assert!(GateErrorChannel::new(GateKind::X, 1.1).is_err());
        assert!(GateErrorChannel::new(GateKind::X, f64::NAN).is_err());
    }

    #[test]
    fn test_gate_error_for_device() {
        let device = DeviceProfile::builder(1)
            .gate_percent("x", 0.2, 50.0)
            .build()
            .unwrap();
        let channel = GateErrorChannel::for_device(&device, GateKind::X).unwrap();
        assert_relative_eq!(channel.error_rate(), 0.002);
        assert_eq!(
            GateErrorChannel::for_device(&device, GateKind::H),
            Err(QuantumError::UnknownGate("h".to_string()))
        );
    }

    #[test]
    fn test_amplitude_damping_channel() {
        let channel = AmplitudeDamping::new(0.05).unwrap();
        assert_eq!(channel.gamma(), 0.05);
        assert_eq!(channel.name(), "amplitude_damping");
        assert_eq!(channel.kraus_operators().len(), 2);
        assert!(channel.verify_completeness(TOLERANCE));
    }

    #[test]
    fn test_amplitude_damping_from_t1() {
        let channel = AmplitudeDamping::from_t1(50.0, 0.1).unwrap();
        let expected_gamma = 1.0 - (-0.1f64 / 50.0).exp();
        assert!((channel.gamma() - expected_gamma).abs() < TOLERANCE);

        assert_eq!(AmplitudeDamping::from_t1(f64::INFINITY, 300.0).unwrap().gamma(), 0.0);
        assert!(AmplitudeDamping::from_t1(0.0, 1.0).is_err());
        assert!(AmplitudeDamping::from_t1(10.0, -1.0).is_err());
    }

    #[test]
    fn test_phase_damping_full_range() {
        for p in [0.0, 0.03, 0.5, 0.9, 1.0] {
            let channel = PhaseDamping::new(p).unwrap();
            assert!(channel.verify_completeness(TOLERANCE));
        }
        assert!(PhaseDamping::new(-0.1).is_err());
        assert!(PhaseDamping::new(1.01).is_err());
    }

    #[test]
    fn test_phase_damping_from_rate() {
        let channel = PhaseDamping::from_dephasing_rate(0.01, 20.0).unwrap();
        assert_relative_eq!(channel.probability(), 1.0 - (-0.2f64).exp(), epsilon = 1e-15);
        assert!(PhaseDamping::from_dephasing_rate(-1.0, 1.0).is_err());
    }

    #[test]
    fn test_idle_decoherence_skips_clamped_dephasing() {
        // T2 > 2·T1 clamps the pure-dephasing rate to zero
        let props = QubitProperties { t1: 10.0, t2: 40.0 };
        let idle = IdleDecoherence::new(&props, 5.0).unwrap();
        assert!(idle.dephasing().is_none());
        assert_eq!(idle.channels().count(), 1);

        let props = QubitProperties { t1: 100.0, t2: 50.0 };
        let idle = IdleDecoherence::new(&props, 5.0).unwrap();
        assert!(idle.dephasing().is_some());
        let names: Vec<&str> = idle.channels().map(|c| c.name()).collect();
        assert_eq!(names, vec!["amplitude_damping", "phase_damping"]);
    }

    #[test]
    fn test_idle_decoherence_trivial() {
        let props = QubitProperties { t1: 100.0, t2: 50.0 };
        assert!(IdleDecoherence::new(&props, 0.0).unwrap().is_trivial());
        assert!(IdleDecoherence::new(&QubitProperties::default(), 1e6)
            .unwrap()
            .is_trivial());
        assert!(!IdleDecoherence::new(&props, 1.0).unwrap().is_trivial());
    }
}
