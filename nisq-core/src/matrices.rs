//! Constant operator tables for the native gate set
//!
//! Two-qubit matrices are written in operand order: the first operand is the
//! high bit of the 4-dimensional local index (`|q_a q_b⟩`).

use num_complex::Complex64;

const ZERO: Complex64 = Complex64::new(0.0, 0.0);
const ONE: Complex64 = Complex64::new(1.0, 0.0);
const I: Complex64 = Complex64::new(0.0, 1.0);
const NEG_I: Complex64 = Complex64::new(0.0, -1.0);
const NEG_ONE: Complex64 = Complex64::new(-1.0, 0.0);

const INV_SQRT2: f64 = std::f64::consts::FRAC_1_SQRT_2;

/// I = [[1, 0],
///      [0, 1]]
pub const IDENTITY: [[Complex64; 2]; 2] = [[ONE, ZERO], [ZERO, ONE]];

/// X = [[0, 1],
///      [1, 0]]
pub const PAULI_X: [[Complex64; 2]; 2] = [[ZERO, ONE], [ONE, ZERO]];

/// Y = [[0, -i],
///      [i,  0]]
pub const PAULI_Y: [[Complex64; 2]; 2] = [[ZERO, NEG_I], [I, ZERO]];

/// Z = [[1,  0],
///      [0, -1]]
pub const PAULI_Z: [[Complex64; 2]; 2] = [[ONE, ZERO], [ZERO, NEG_ONE]];

/// H = 1/√2 * [[1,  1],
///             [1, -1]]
pub const HADAMARD: [[Complex64; 2]; 2] = [
    [Complex64::new(INV_SQRT2, 0.0), Complex64::new(INV_SQRT2, 0.0)],
    [Complex64::new(INV_SQRT2, 0.0), Complex64::new(-INV_SQRT2, 0.0)],
];

/// S = [[1, 0],
///      [0, i]]
pub const S_GATE: [[Complex64; 2]; 2] = [[ONE, ZERO], [ZERO, I]];

/// T = [[1, 0],
///      [0, e^(iπ/4)]]
pub const T_GATE: [[Complex64; 2]; 2] = [
    [ONE, ZERO],
    [ZERO, Complex64::new(INV_SQRT2, INV_SQRT2)],
];

/// CNOT, control on the first operand
pub const CNOT: [[Complex64; 4]; 4] = [
    [ONE, ZERO, ZERO, ZERO],
    [ZERO, ONE, ZERO, ZERO],
    [ZERO, ZERO, ZERO, ONE],
    [ZERO, ZERO, ONE, ZERO],
];

/// CZ = diag(1, 1, 1, -1)
pub const CZ: [[Complex64; 4]; 4] = [
    [ONE, ZERO, ZERO, ZERO],
    [ZERO, ONE, ZERO, ZERO],
    [ZERO, ZERO, ONE, ZERO],
    [ZERO, ZERO, ZERO, NEG_ONE],
];

/// SWAP exchanges |01⟩ and |10⟩
pub const SWAP: [[Complex64; 4]; 4] = [
    [ONE, ZERO, ZERO, ZERO],
    [ZERO, ZERO, ONE, ZERO],
    [ZERO, ONE, ZERO, ZERO],
    [ZERO, ZERO, ZERO, ONE],
];

/// Flatten a 2×2 table into row-major order
pub fn flatten2(m: &[[Complex64; 2]; 2]) -> Vec<Complex64> {
    m.iter().flat_map(|row| row.iter().copied()).collect()
}

/// Flatten a 4×4 table into row-major order
pub fn flatten4(m: &[[Complex64; 4]; 4]) -> Vec<Complex64> {
    m.iter().flat_map(|row| row.iter().copied()).collect()
}

/// Row-major product of two square matrices of side `dim`
pub fn matmul(a: &[Complex64], b: &[Complex64], dim: usize) -> Vec<Complex64> {
    let mut out = vec![ZERO; dim * dim];
    for i in 0..dim {
        for k in 0..dim {
            let a_ik = a[i * dim + k];
            if a_ik == ZERO {
                continue;
            }
            for j in 0..dim {
                out[i * dim + j] += a_ik * b[k * dim + j];
            }
        }
    }
    out
}

/// Kronecker product `a ⊗ b` of square matrices with sides `da` and `db`
pub fn kron(a: &[Complex64], da: usize, b: &[Complex64], db: usize) -> Vec<Complex64> {
    let dim = da * db;
    let mut out = vec![ZERO; dim * dim];
    for ar in 0..da {
        for ac in 0..da {
            let a_val = a[ar * da + ac];
            if a_val == ZERO {
                continue;
            }
            for br in 0..db {
                for bc in 0..db {
                    out[(ar * db + br) * dim + ac * db + bc] = a_val * b[br * db + bc];
                }
            }
        }
    }
    out
}

/// Conjugate transpose of a square matrix of side `dim`
pub fn adjoint(m: &[Complex64], dim: usize) -> Vec<Complex64> {
    let mut out = vec![ZERO; dim * dim];
    for i in 0..dim {
        for j in 0..dim {
            out[j * dim + i] = m[i * dim + j].conj();
        }
    }
    out
}
