//! Embedding one- and two-qubit operators into the full register
//!
//! Two strategies are provided and must agree to floating tolerance:
//!
//! - [`LiftingStrategy::Kronecker`] builds the explicit `2^n × 2^n` operator
//!   `I ⊗ … ⊗ K ⊗ … ⊗ I`. Two-qubit operators on non-adjacent qubits are
//!   routed through a [`SwapNetwork`].
//! - [`LiftingStrategy::Contraction`] never materialises the lifted
//!   operator. It combines the rows (and then the columns) of ρ that differ
//!   only in the target bits.
//!
//! Qubit 0 is the most significant bit of a basis index, so qubit `t` of an
//! `n`-qubit register lives at bit `n - 1 - t`. For two-qubit operators the
//! first operand is the high bit of the local index.

use crate::error::{Result, StateError};
use nisq_core::{matrices, QubitId};
use num_complex::Complex64;
use rayon::prelude::*;

const ZERO: Complex64 = Complex64::new(0.0, 0.0);

/// How a local operator is applied to the full density matrix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LiftingStrategy {
    /// Explicit Kronecker-product operator, swap network for distant pairs
    Kronecker,
    /// Direct index contraction on the flat matrix
    #[default]
    Contraction,
}

/// Check that `targets` names one or two distinct qubits of the register
pub fn check_targets(targets: &[usize], num_qubits: usize) -> Result<()> {
    if targets.is_empty() || targets.len() > 2 {
        return Err(StateError::InvalidDimension {
            dimension: 1 << targets.len(),
        });
    }
    for &index in targets {
        if index >= num_qubits {
            return Err(StateError::InvalidQubitIndex { index, num_qubits });
        }
    }
    if targets.len() == 2 && targets[0] == targets[1] {
        return Err(StateError::DuplicateQubit { index: targets[0] });
    }
    Ok(())
}

/// Adjacent-swap plan that brings two qubits next to each other
///
/// The lower-indexed operand is moved forward one slot at a time until it
/// sits directly before the higher-indexed one. The gate then acts on slots
/// `gate_position` and `gate_position + 1`, and the mirrored swaps put every
/// qubit back in its starting slot.
///
/// # Example
/// ```
/// use nisq_state::SwapNetwork;
///
/// let plan = SwapNetwork::plan(0, 3).unwrap();
/// assert_eq!(plan.forward(), &[(0, 1), (1, 2)]);
/// assert_eq!(plan.gate_position(), 2);
/// assert_eq!(plan.reverse(), &[(1, 2), (0, 1)]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwapNetwork {
    forward: Vec<(usize, usize)>,
    gate_position: usize,
    reverse: Vec<(usize, usize)>,
    operands_reversed: bool,
}

impl SwapNetwork {
    /// Plan the swaps for a gate with operands `(first, second)`
    ///
    /// # Errors
    /// Returns [`StateError::DuplicateQubit`] if both operands are the same qubit
    pub fn plan(first: usize, second: usize) -> Result<Self> {
        if first == second {
            return Err(StateError::DuplicateQubit { index: first });
        }
        let (lo, hi) = (first.min(second), first.max(second));
        let forward: Vec<(usize, usize)> = (lo..hi - 1).map(|p| (p, p + 1)).collect();
        let reverse = forward.iter().rev().copied().collect();

        Ok(Self {
            forward,
            gate_position: hi - 1,
            reverse,
            operands_reversed: first > second,
        })
    }

    /// Swaps applied before the gate, in order
    pub fn forward(&self) -> &[(usize, usize)] {
        &self.forward
    }

    /// Slot of the first of the two adjacent positions the gate acts on
    pub fn gate_position(&self) -> usize {
        self.gate_position
    }

    /// Swaps applied after the gate, in order
    pub fn reverse(&self) -> &[(usize, usize)] {
        &self.reverse
    }

    /// Whether the gate's first operand is the higher-indexed qubit, in
    /// which case the local operator is conjugated by SWAP
    pub fn operands_reversed(&self) -> bool {
        self.operands_reversed
    }

    pub fn is_adjacent(&self) -> bool {
        self.forward.is_empty()
    }

    /// Which qubit occupies each slot while the gate runs
    pub fn gate_layout(&self, num_qubits: usize) -> Vec<usize> {
        let mut layout: Vec<usize> = (0..num_qubits).collect();
        apply_swaps(&mut layout, &self.forward);
        layout
    }

    /// Which qubit occupies each slot once the mirrored swaps have run
    pub fn final_layout(&self, num_qubits: usize) -> Vec<usize> {
        let mut layout = self.gate_layout(num_qubits);
        apply_swaps(&mut layout, &self.reverse);
        layout
    }
}

fn apply_swaps(layout: &mut [usize], swaps: &[(usize, usize)]) {
    for &(a, b) in swaps {
        layout.swap(a, b);
    }
}

fn identity(dim: usize) -> Vec<Complex64> {
    let mut m = vec![ZERO; dim * dim];
    for i in 0..dim {
        m[i * dim + i] = Complex64::new(1.0, 0.0);
    }
    m
}

/// `I_{2^left} ⊗ op ⊗ I_{2^right}` for an operator of side `op_dim`
fn embed(op: &[Complex64], op_dim: usize, left: usize, right: usize) -> Vec<Complex64> {
    let (left_dim, right_dim) = (1usize << left, 1usize << right);
    let partial = matrices::kron(&identity(left_dim), left_dim, op, op_dim);
    matrices::kron(&partial, left_dim * op_dim, &identity(right_dim), right_dim)
}

/// Full-register operator for a single-qubit `op` on `target`
///
/// `target` must be below `num_qubits`; [`lift`] checks it.
pub(crate) fn lift_single(op: &[Complex64], target: usize, num_qubits: usize) -> Vec<Complex64> {
    embed(op, 2, target, QubitId::new(target).bit_position(num_qubits))
}

/// Full-register operator for a two-qubit `op` on slots `position` and `position + 1`
pub(crate) fn lift_adjacent(op: &[Complex64], position: usize, num_qubits: usize) -> Vec<Complex64> {
    embed(op, 4, position, QubitId::new(position + 1).bit_position(num_qubits))
}

/// Full-register operator for a two-qubit `op` with operands `(first, second)`
///
/// Builds `P† · A · P`, where `P` is the forward swap sequence and `A` the
/// operator lifted at the adjacent gate position.
pub(crate) fn lift_two(
    op: &[Complex64],
    first: usize,
    second: usize,
    num_qubits: usize,
) -> Result<Vec<Complex64>> {
    check_targets(&[first, second], num_qubits)?;
    let plan = SwapNetwork::plan(first, second)?;
    let dim = 1usize << num_qubits;

    let swap = matrices::flatten4(&matrices::SWAP);
    let local = if plan.operands_reversed() {
        matrices::matmul(&matrices::matmul(&swap, op, 4), &swap, 4)
    } else {
        op.to_vec()
    };

    let mut full = lift_adjacent(&local, plan.gate_position(), num_qubits);
    // Innermost swap first: S_1 · … · S_m · A · S_m · … · S_1
    for &(slot, _) in plan.reverse() {
        let s = lift_adjacent(&swap, slot, num_qubits);
        full = matrices::matmul(&matrices::matmul(&s, &full, dim), &s, dim);
    }
    Ok(full)
}

/// Full-register operator for `op` on `targets`, by Kronecker construction
pub fn lift(op: &[Complex64], targets: &[usize], num_qubits: usize) -> Result<Vec<Complex64>> {
    check_targets(targets, num_qubits)?;
    let expected = 1usize << (2 * targets.len());
    if op.len() != expected {
        return Err(StateError::DimensionMismatch {
            expected,
            actual: op.len(),
        });
    }
    match targets {
        [target] => Ok(lift_single(op, *target, num_qubits)),
        [first, second] => lift_two(op, *first, *second, num_qubits),
        _ => Err(StateError::InvalidDimension {
            dimension: 1 << targets.len(),
        }),
    }
}

/// Basis-index bookkeeping for the target qubits of one operator
#[derive(Debug, Clone)]
pub(crate) struct TargetIndex {
    /// Bit mask of each target, in operand order
    masks: Vec<usize>,
    /// `offsets[l]` has exactly the target bits of local index `l` set
    offsets: Vec<usize>,
    /// Clears every target bit
    clear: usize,
}

impl TargetIndex {
    pub(crate) fn new(targets: &[usize], num_qubits: usize) -> Self {
        let masks: Vec<usize> = targets
            .iter()
            .map(|&t| 1usize << QubitId::new(t).bit_position(num_qubits))
            .collect();
        let k = masks.len();
        let offsets = (0..1usize << k)
            .map(|local| {
                masks
                    .iter()
                    .enumerate()
                    .filter(|(i, _)| (local >> (k - 1 - i)) & 1 == 1)
                    .fold(0, |acc, (_, &mask)| acc | mask)
            })
            .collect();
        let clear = !masks.iter().fold(0, |acc, &mask| acc | mask);

        Self {
            masks,
            offsets,
            clear,
        }
    }

    /// Local operator index of a basis index
    #[inline]
    pub(crate) fn local(&self, index: usize) -> usize {
        self.masks
            .iter()
            .fold(0, |acc, &mask| (acc << 1) | usize::from(index & mask != 0))
    }

    #[inline]
    pub(crate) fn base(&self, index: usize) -> usize {
        index & self.clear
    }

    #[inline]
    pub(crate) fn offset(&self, local: usize) -> usize {
        self.offsets[local]
    }

    #[inline]
    pub(crate) fn local_dim(&self) -> usize {
        self.offsets.len()
    }
}

/// `output = K · input` for a local operator `op`
pub(crate) fn contract_rows(
    op: &[Complex64],
    index: &TargetIndex,
    input: &[Complex64],
    output: &mut [Complex64],
    dim: usize,
    parallel: bool,
) {
    let d = index.local_dim();
    let kernel = |(row, out_row): (usize, &mut [Complex64])| {
        out_row.fill(ZERO);
        let local = index.local(row);
        let base = index.base(row);
        for source_local in 0..d {
            let coef = op[local * d + source_local];
            if coef == ZERO {
                continue;
            }
            let start = (base | index.offset(source_local)) * dim;
            for (out, &value) in out_row.iter_mut().zip(&input[start..start + dim]) {
                *out += coef * value;
            }
        }
    };

    if parallel {
        output.par_chunks_mut(dim).enumerate().for_each(kernel);
    } else {
        output.chunks_mut(dim).enumerate().for_each(kernel);
    }
}

/// `accum += input · K†` for a local operator `op`
pub(crate) fn contract_columns_into(
    op: &[Complex64],
    index: &TargetIndex,
    input: &[Complex64],
    accum: &mut [Complex64],
    dim: usize,
    parallel: bool,
) {
    let d = index.local_dim();
    let kernel = |(row, acc_row): (usize, &mut [Complex64])| {
        let in_row = &input[row * dim..(row + 1) * dim];
        for (col, acc) in acc_row.iter_mut().enumerate() {
            let local = index.local(col);
            let base = index.base(col);
            let mut sum = ZERO;
            for source_local in 0..d {
                let coef = op[local * d + source_local];
                if coef == ZERO {
                    continue;
                }
                sum += in_row[base | index.offset(source_local)] * coef.conj();
            }
            *acc += sum;
        }
    };

    if parallel {
        accum.par_chunks_mut(dim).enumerate().for_each(kernel);
    } else {
        accum.chunks_mut(dim).enumerate().for_each(kernel);
    }
}
