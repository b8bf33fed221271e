//! Density matrix representation for mixed quantum states
//!
//! A density matrix ρ is a positive semi-definite, Hermitian matrix with
//! Tr(ρ) = 1. Noise is applied as Kraus channels, ρ → Σᵢ Kᵢ ρ Kᵢ†, with each
//! Kᵢ acting on one or two qubits and lifted to the full register by the
//! chosen [`LiftingStrategy`].
//!
//! # Example
//!
//! ```
//! use nisq_core::noise::{AmplitudeDamping, NoiseChannel};
//! use nisq_core::GateKind;
//! use nisq_state::{DensityMatrix, LiftingStrategy};
//!
//! let mut dm = DensityMatrix::new(2).unwrap();
//! dm.apply_unitary(&GateKind::X.matrix(), &[1], LiftingStrategy::default()).unwrap();
//!
//! let damping = AmplitudeDamping::new(0.5).unwrap();
//! dm.apply_kraus_channel(&damping.kraus_operators(), &[1], LiftingStrategy::default())
//!     .unwrap();
//! assert!((dm.get(0, 0).re - 0.5).abs() < 1e-12);
//! assert!((dm.trace() - 1.0).abs() < 1e-12);
//! ```

use crate::error::{Result, StateError};
use crate::lifting::{self, LiftingStrategy, TargetIndex};
use log::debug;
use nisq_core::matrices;
use nisq_core::noise::KrausOperator;
use num_complex::Complex64;
use std::fmt;

const ZERO: Complex64 = Complex64::new(0.0, 0.0);

/// Register size from which the contraction kernels split rows across threads
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 7;

/// Density matrix of an `n`-qubit register
///
/// Stores the full 2^n × 2^n density matrix in row-major order, in physical
/// tensor order with qubit 0 as the most significant bit. Two scratch
/// buffers of the same size are kept alongside so that applying a channel
/// never reallocates. Memory usage: 3 · 4^n complex numbers.
#[derive(Clone)]
pub struct DensityMatrix {
    num_qubits: usize,

    /// 2^num_qubits
    dimension: usize,

    /// Density matrix elements in row-major order
    matrix: Vec<Complex64>,

    /// Holds K·ρ during a channel application
    scratch: Vec<Complex64>,

    /// Σ Kᵢ ρ Kᵢ†, swapped with `matrix` once complete
    accum: Vec<Complex64>,

    parallel_threshold: usize,
}

impl DensityMatrix {
    /// Create a new density matrix initialized to |0...0⟩⟨0...0|
    ///
    /// # Errors
    /// Returns error if `num_qubits` is zero or the matrix cannot be addressed
    pub fn new(num_qubits: usize) -> Result<Self> {
        if num_qubits == 0 {
            return Err(StateError::InvalidDimension { dimension: 1 });
        }
        let dimension = u32::try_from(num_qubits)
            .ok()
            .and_then(|n| 1usize.checked_shl(n))
            .ok_or(StateError::AllocationError { num_qubits })?;
        let size = dimension
            .checked_mul(dimension)
            .ok_or(StateError::AllocationError { num_qubits })?;
        debug!(
            "allocating {}-qubit density matrix ({} bytes per buffer)",
            num_qubits,
            size * std::mem::size_of::<Complex64>()
        );

        let mut matrix = vec![ZERO; size];
        matrix[0] = Complex64::new(1.0, 0.0);

        Ok(Self {
            num_qubits,
            dimension,
            matrix,
            scratch: vec![ZERO; size],
            accum: vec![ZERO; size],
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        })
    }

    /// Create from raw row-major elements
    pub fn from_matrix(num_qubits: usize, elements: Vec<Complex64>) -> Result<Self> {
        let mut dm = Self::new(num_qubits)?;
        if elements.len() != dm.matrix.len() {
            return Err(StateError::DimensionMismatch {
                expected: dm.matrix.len(),
                actual: elements.len(),
            });
        }
        dm.matrix = elements;
        Ok(dm)
    }

    /// Split contraction rows across threads from `num_qubits` qubits upward
    pub fn with_parallel_threshold(mut self, num_qubits: usize) -> Self {
        self.parallel_threshold = num_qubits;
        self
    }

    #[inline]
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Get matrix dimension (2^num_qubits)
    #[inline]
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Get a matrix element ρᵢⱼ
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Complex64 {
        self.matrix[row * self.dimension + col]
    }

    /// Get reference to the full matrix data
    pub fn matrix(&self) -> &[Complex64] {
        &self.matrix
    }

    /// Real parts of the diagonal, in basis-index order
    pub fn diagonal(&self) -> Vec<f64> {
        (0..self.dimension).map(|i| self.get(i, i).re).collect()
    }

    /// Apply a Kraus channel: ρ → Σᵢ Kᵢ ρ Kᵢ†
    ///
    /// Every operator must have side `2^targets.len()`. Targets are physical
    /// qubits in operand order.
    ///
    /// # Errors
    /// - [`StateError::InvalidQubitIndex`] / [`StateError::DuplicateQubit`]
    ///   for bad targets
    /// - [`StateError::DimensionMismatch`] when an operator's size doesn't
    ///   match the number of targets
    pub fn apply_kraus_channel(
        &mut self,
        kraus_ops: &[KrausOperator],
        targets: &[usize],
        strategy: LiftingStrategy,
    ) -> Result<()> {
        let terms: Vec<&[Complex64]> = kraus_ops.iter().map(|k| k.matrix.as_slice()).collect();
        self.apply_terms(&terms, targets, strategy)
    }

    /// Apply a unitary: ρ → U ρ U†
    pub fn apply_unitary(
        &mut self,
        unitary: &[Complex64],
        targets: &[usize],
        strategy: LiftingStrategy,
    ) -> Result<()> {
        self.apply_terms(&[unitary], targets, strategy)
    }

    fn apply_terms(
        &mut self,
        terms: &[&[Complex64]],
        targets: &[usize],
        strategy: LiftingStrategy,
    ) -> Result<()> {
        lifting::check_targets(targets, self.num_qubits)?;
        if terms.is_empty() {
            return Err(StateError::InvalidDimension { dimension: 0 });
        }
        let local_dim = 1usize << targets.len();
        for term in terms {
            if term.len() != local_dim * local_dim {
                return Err(StateError::DimensionMismatch {
                    expected: local_dim * local_dim,
                    actual: term.len(),
                });
            }
        }

        self.accum.fill(ZERO);
        match strategy {
            LiftingStrategy::Contraction => self.contract(terms, targets),
            LiftingStrategy::Kronecker => self.kronecker(terms, targets)?,
        }
        std::mem::swap(&mut self.matrix, &mut self.accum);
        Ok(())
    }

    fn contract(&mut self, terms: &[&[Complex64]], targets: &[usize]) {
        let index = TargetIndex::new(targets, self.num_qubits);
        let parallel =
            self.num_qubits >= self.parallel_threshold && rayon::current_num_threads() > 1;

        for term in terms {
            lifting::contract_rows(
                term,
                &index,
                &self.matrix,
                &mut self.scratch,
                self.dimension,
                parallel,
            );
            lifting::contract_columns_into(
                term,
                &index,
                &self.scratch,
                &mut self.accum,
                self.dimension,
                parallel,
            );
        }
    }

    fn kronecker(&mut self, terms: &[&[Complex64]], targets: &[usize]) -> Result<()> {
        let dim = self.dimension;
        for term in terms {
            let full = lifting::lift(term, targets, self.num_qubits)?;
            let left = matrices::matmul(&full, &self.matrix, dim);
            let product = matrices::matmul(&left, &matrices::adjoint(&full, dim), dim);
            for (acc, value) in self.accum.iter_mut().zip(product) {
                *acc += value;
            }
        }
        Ok(())
    }

    /// Calculate trace: Tr(ρ)
    pub fn trace(&self) -> f64 {
        (0..self.dimension).map(|i| self.get(i, i).re).sum()
    }

    /// Calculate the purity: Tr(ρ²)
    ///
    /// Returns 1 for pure states, < 1 for mixed states.
    pub fn purity(&self) -> f64 {
        let dim = self.dimension;
        let mut trace = ZERO;
        for i in 0..dim {
            for j in 0..dim {
                trace += self.get(i, j) * self.get(j, i);
            }
        }
        trace.re
    }

    /// Check unit trace, Hermiticity and non-negative diagonal within `tolerance`
    pub fn is_valid(&self, tolerance: f64) -> bool {
        if (self.trace() - 1.0).abs() > tolerance {
            return false;
        }

        for i in 0..self.dimension {
            for j in (i + 1)..self.dimension {
                if (self.get(i, j) - self.get(j, i).conj()).norm() > tolerance {
                    return false;
                }
            }
        }

        (0..self.dimension).all(|i| self.get(i, i).re >= -tolerance)
    }

    /// Largest elementwise distance to another matrix of the same size
    pub fn max_difference(&self, other: &Self) -> Result<f64> {
        if other.dimension != self.dimension {
            return Err(StateError::DimensionMismatch {
                expected: self.dimension,
                actual: other.dimension,
            });
        }
        Ok(self
            .matrix
            .iter()
            .zip(&other.matrix)
            .map(|(a, b)| (a - b).norm())
            .fold(0.0, f64::max))
    }
}

impl fmt::Debug for DensityMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "DensityMatrix {{ qubits: {}, dim: {}, trace: {:.6}, purity: {:.4} }}",
            self.num_qubits,
            self.dimension,
            self.trace(),
            self.purity()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nisq_core::noise::{AmplitudeDamping, GateErrorChannel, NoiseChannel, PhaseDamping};
    use nisq_core::GateKind;

    const TOL: f64 = 1e-10;
    const BOTH: [LiftingStrategy; 2] = [LiftingStrategy::Contraction, LiftingStrategy::Kronecker];

    #[test]
    fn test_new_density_matrix() {
        let dm = DensityMatrix::new(2).unwrap();
        assert_eq!(dm.num_qubits(), 2);
        assert_eq!(dm.dimension(), 4);
        assert!((dm.trace() - 1.0).abs() < TOL);
        assert!((dm.purity() - 1.0).abs() < TOL);
        assert!(DensityMatrix::new(0).is_err());
    }

    #[test]
    fn test_x_on_qubit_zero_sets_most_significant_bit() {
        for strategy in BOTH {
            let mut dm = DensityMatrix::new(3).unwrap();
            dm.apply_unitary(&GateKind::X.matrix(), &[0], strategy).unwrap();
            assert!((dm.get(4, 4).re - 1.0).abs() < TOL, "{:?}", strategy);
        }
    }

    #[test]
    fn test_identity_is_noop() {
        let h = GateKind::H.matrix();
        for strategy in BOTH {
            let mut dm = DensityMatrix::new(3).unwrap();
            dm.apply_unitary(&h, &[1], strategy).unwrap();
            dm.apply_unitary(&GateKind::Cx.matrix(), &[1, 2], strategy).unwrap();
            let before = dm.clone();

            dm.apply_unitary(&GateKind::I.matrix(), &[0], strategy).unwrap();
            assert!(dm.max_difference(&before).unwrap() < 1e-14);
        }
    }

    #[test]
    fn test_bell_state() {
        let mut dm = DensityMatrix::new(2).unwrap();
        dm.apply_unitary(&GateKind::H.matrix(), &[0], LiftingStrategy::Contraction)
            .unwrap();
        dm.apply_unitary(&GateKind::Cx.matrix(), &[0, 1], LiftingStrategy::Contraction)
            .unwrap();

        assert!((dm.get(0, 0).re - 0.5).abs() < TOL);
        assert!((dm.get(3, 3).re - 0.5).abs() < TOL);
        assert!((dm.get(0, 3).re - 0.5).abs() < TOL);
        assert!(dm.get(1, 1).norm() < TOL);
        assert!((dm.purity() - 1.0).abs() < TOL);
    }

    #[test]
    fn test_amplitude_damping_decays_excited_state() {
        let mut dm = DensityMatrix::new(1).unwrap();
        dm.apply_unitary(&GateKind::X.matrix(), &[0], LiftingStrategy::Contraction)
            .unwrap();
        let channel = AmplitudeDamping::new(1.0).unwrap();
        dm.apply_kraus_channel(&channel.kraus_operators(), &[0], LiftingStrategy::Contraction)
            .unwrap();
        assert!((dm.get(0, 0).re - 1.0).abs() < TOL);
    }

    #[test]
    fn test_dephasing_kills_coherence() {
        let mut dm = DensityMatrix::new(1).unwrap();
        dm.apply_unitary(&GateKind::H.matrix(), &[0], LiftingStrategy::Contraction)
            .unwrap();
        let channel = PhaseDamping::new(0.5).unwrap();
        dm.apply_kraus_channel(&channel.kraus_operators(), &[0], LiftingStrategy::Contraction)
            .unwrap();
        assert!(dm.get(0, 1).norm() < TOL);
        assert!((dm.get(1, 1).re - 0.5).abs() < TOL);
    }

    #[test]
    fn test_trace_preserved_by_gate_errors() {
        for p in [0.0, 0.01, 0.3, 0.77, 1.0] {
            let mut dm = DensityMatrix::new(3).unwrap();
            for (kind, targets) in [
                (GateKind::H, vec![0]),
                (GateKind::Cx, vec![0, 2]),
                (GateKind::T, vec![1]),
                (GateKind::Swap, vec![2, 1]),
                (GateKind::Cz, vec![1, 0]),
            ] {
                let channel = GateErrorChannel::new(kind, p).unwrap();
                dm.apply_kraus_channel(&channel.kraus_operators(), &targets, LiftingStrategy::Contraction)
                    .unwrap();
            }
            assert!((dm.trace() - 1.0).abs() < 1e-9, "p = {}", p);
            assert!(dm.is_valid(1e-9));
        }
    }

    #[test]
    fn test_rejects_bad_targets() {
        let mut dm = DensityMatrix::new(2).unwrap();
        let x = GateKind::X.matrix();
        assert_eq!(
            dm.apply_unitary(&x, &[2], LiftingStrategy::Contraction),
            Err(StateError::InvalidQubitIndex { index: 2, num_qubits: 2 })
        );
        assert_eq!(
            dm.apply_unitary(&GateKind::Cx.matrix(), &[1, 1], LiftingStrategy::Contraction),
            Err(StateError::DuplicateQubit { index: 1 })
        );
        assert_eq!(
            dm.apply_unitary(&x, &[0, 1], LiftingStrategy::Contraction),
            Err(StateError::DimensionMismatch { expected: 16, actual: 4 })
        );
    }

    #[test]
    fn test_parallel_kernels_match_sequential() {
        let mut sequential = DensityMatrix::new(4).unwrap().with_parallel_threshold(usize::MAX);
        let mut parallel = DensityMatrix::new(4).unwrap().with_parallel_threshold(0);
        let channel = GateErrorChannel::new(GateKind::Cx, 0.1).unwrap();
        for dm in [&mut sequential, &mut parallel] {
            dm.apply_unitary(&GateKind::H.matrix(), &[3], LiftingStrategy::Contraction)
                .unwrap();
            dm.apply_kraus_channel(&channel.kraus_operators(), &[3, 0], LiftingStrategy::Contraction)
                .unwrap();
        }
        assert!(sequential.max_difference(&parallel).unwrap() < 1e-14);
    }
}
