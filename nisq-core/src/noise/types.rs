//! Kraus operators and the channel trait

use crate::matrices;
use crate::{QuantumError, Result};
use num_complex::Complex64;
use std::fmt;

/// A Kraus operator acting on one or two qubits
///
/// Channels are described by a set of Kraus operators {K_i} with
/// Σ K_i† K_i = I, transforming a density matrix as ρ → Σ_i K_i ρ K_i†.
/// For two-qubit operators the first operand is the high bit of the local
/// index.
#[derive(Clone, Debug, PartialEq)]
pub struct KrausOperator {
    /// Row-major matrix elements
    pub matrix: Vec<Complex64>,
    /// Side of the square matrix (2 or 4)
    pub dimension: usize,
}

impl KrausOperator {
    /// Create a Kraus operator from a row-major matrix
    ///
    /// # Errors
    /// Returns error if dimension is not a power of 2 or the matrix size doesn't match
    pub fn new(matrix: Vec<Complex64>, dimension: usize) -> Result<Self> {
        if dimension < 2 || !dimension.is_power_of_two() {
            return Err(QuantumError::InvalidCircuit(format!(
                "Kraus operator dimension must be a power of 2, got {}",
                dimension
            )));
        }
        if matrix.len() != dimension * dimension {
            return Err(QuantumError::InvalidCircuit(format!(
                "Matrix size {} doesn't match dimension {}×{}",
                matrix.len(),
                dimension,
                dimension
            )));
        }
        Ok(Self { matrix, dimension })
    }

    /// `factor · m` for a 2×2 table
    pub fn single_qubit(m: &[[Complex64; 2]; 2], factor: f64) -> Self {
        Self {
            matrix: matrices::flatten2(m).into_iter().map(|z| z * factor).collect(),
            dimension: 2,
        }
    }

    /// `factor · m` for an already flattened operator; the dimension is
    /// taken from the element count
    pub(crate) fn scaled(matrix: Vec<Complex64>, factor: f64) -> Self {
        let dimension = if matrix.len() == 16 { 4 } else { 2 };
        Self {
            matrix: matrix.into_iter().map(|z| z * factor).collect(),
            dimension,
        }
    }

    /// Number of qubits this operator acts on
    #[inline]
    pub fn num_qubits(&self) -> usize {
        self.dimension.trailing_zeros() as usize
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Complex64 {
        self.matrix[row * self.dimension + col]
    }

    /// Conjugate transpose
    pub fn adjoint(&self) -> Self {
        Self {
            matrix: matrices::adjoint(&self.matrix, self.dimension),
            dimension: self.dimension,
        }
    }
}

/// A noise process expressed as a Kraus set
pub trait NoiseChannel: Send + Sync + fmt::Debug {
    /// Kraus operators defining the channel
    fn kraus_operators(&self) -> Vec<KrausOperator>;

    /// Number of qubits the channel acts on
    fn num_qubits(&self) -> usize;

    /// Short channel name, e.g. "amplitude_damping"
    fn name(&self) -> &str;

    fn description(&self) -> String {
        format!("{}-qubit {} channel", self.num_qubits(), self.name())
    }

    /// Check Σ K_i† K_i = I within `tolerance`
    fn verify_completeness(&self, tolerance: f64) -> bool {
        let operators = self.kraus_operators();
        let Some(first) = operators.first() else {
            return false;
        };

        let dim = first.dimension;
        let mut sum = vec![Complex64::new(0.0, 0.0); dim * dim];
        for kraus in &operators {
            let product = matrices::matmul(&kraus.adjoint().matrix, &kraus.matrix, dim);
            for (acc, value) in sum.iter_mut().zip(product) {
                *acc += value;
            }
        }

        (0..dim).all(|i| {
            (0..dim).all(|j| {
                let expected = if i == j { 1.0 } else { 0.0 };
                (sum[i * dim + j] - Complex64::new(expected, 0.0)).norm() <= tolerance
            })
        })
    }
}
