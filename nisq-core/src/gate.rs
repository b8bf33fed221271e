//! Native gate catalog and gate operations
//!
//! The gate set is closed: every name the simulator understands maps to a
//! [`GateKind`] variant with a fixed operator table. Names are parsed exactly,
//! with no alias substitution, so `"CNOT"` is rejected where `"cx"` is expected.

use crate::matrices;
use crate::{QuantumError, QubitId, Result};
use num_complex::Complex64;
use smallvec::SmallVec;
use std::fmt;
use std::str::FromStr;

/// A gate from the fixed single-/two-qubit operator tables
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(feature = "serialization", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serialization", serde(rename_all = "lowercase"))]
pub enum GateKind {
    X,
    Y,
    Z,
    H,
    S,
    T,
    I,
    /// Computational-basis measurement; acts as identity on the state and
    /// latches the qubit for the rest of the run
    Measure,
    Cx,
    Cz,
    Swap,
}

impl GateKind {
    /// Every gate in the catalog, single-qubit gates first
    pub const ALL: [GateKind; 11] = [
        GateKind::X,
        GateKind::Y,
        GateKind::Z,
        GateKind::H,
        GateKind::S,
        GateKind::T,
        GateKind::I,
        GateKind::Measure,
        GateKind::Cx,
        GateKind::Cz,
        GateKind::Swap,
    ];

    /// Canonical lowercase name
    pub fn name(&self) -> &'static str {
        match self {
            GateKind::X => "x",
            GateKind::Y => "y",
            GateKind::Z => "z",
            GateKind::H => "h",
            GateKind::S => "s",
            GateKind::T => "t",
            GateKind::I => "i",
            GateKind::Measure => "measure",
            GateKind::Cx => "cx",
            GateKind::Cz => "cz",
            GateKind::Swap => "swap",
        }
    }

    /// Number of qubits the gate acts on
    pub fn num_qubits(&self) -> usize {
        match self {
            GateKind::Cx | GateKind::Cz | GateKind::Swap => 2,
            _ => 1,
        }
    }

    /// Side of the operator matrix (2 or 4)
    #[inline]
    pub fn dimension(&self) -> usize {
        1 << self.num_qubits()
    }

    #[inline]
    pub fn is_measurement(&self) -> bool {
        matches!(self, GateKind::Measure)
    }

    /// Ideal operator in row-major order
    pub fn matrix(&self) -> Vec<Complex64> {
        match self {
            GateKind::X => matrices::flatten2(&matrices::PAULI_X),
            GateKind::Y => matrices::flatten2(&matrices::PAULI_Y),
            GateKind::Z => matrices::flatten2(&matrices::PAULI_Z),
            GateKind::H => matrices::flatten2(&matrices::HADAMARD),
            GateKind::S => matrices::flatten2(&matrices::S_GATE),
            GateKind::T => matrices::flatten2(&matrices::T_GATE),
            GateKind::I | GateKind::Measure => matrices::flatten2(&matrices::IDENTITY),
            GateKind::Cx => matrices::flatten4(&matrices::CNOT),
            GateKind::Cz => matrices::flatten4(&matrices::CZ),
            GateKind::Swap => matrices::flatten4(&matrices::SWAP),
        }
    }
}

impl FromStr for GateKind {
    type Err = QuantumError;

    fn from_str(name: &str) -> Result<Self> {
        GateKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.name() == name)
            .ok_or_else(|| QuantumError::UnknownGate(name.to_string()))
    }
}

impl fmt::Display for GateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A gate applied to specific physical qubits
///
/// # Example
/// ```
/// use nisq_core::{GateKind, GateOp};
///
/// let op = GateOp::new(GateKind::Cx, &[0, 3]).unwrap();
/// assert_eq!(op.qubit_indices(), vec![0, 3]);
/// ```
#[derive(Clone, PartialEq)]
pub struct GateOp {
    kind: GateKind,
    qubits: SmallVec<[QubitId; 2]>,
    params: Vec<f64>,
}

impl GateOp {
    /// Create a gate operation
    ///
    /// # Errors
    /// Returns error if:
    /// - Qubit count doesn't match the gate's arity
    /// - Duplicate qubits specified
    pub fn new(kind: GateKind, qubits: &[usize]) -> Result<Self> {
        if qubits.len() != kind.num_qubits() {
            return Err(QuantumError::invalid_qubit_count(
                kind.name(),
                kind.num_qubits(),
                qubits.len(),
            ));
        }

        for i in 0..qubits.len() {
            for j in (i + 1)..qubits.len() {
                if qubits[i] == qubits[j] {
                    return Err(QuantumError::DuplicateQubit(qubits[i]));
                }
            }
        }

        Ok(Self {
            kind,
            qubits: qubits.iter().copied().map(QubitId::new).collect(),
            params: Vec::new(),
        })
    }

    /// Create a gate operation from a gate name
    ///
    /// # Errors
    /// Returns [`QuantumError::UnknownGate`] when the name is not in the catalog
    pub fn parse(name: &str, qubits: &[usize]) -> Result<Self> {
        Self::new(name.parse()?, qubits)
    }

    /// Attach gate parameters; they are carried but do not enter the noise model
    pub fn with_params(mut self, params: Vec<f64>) -> Self {
        self.params = params;
        self
    }

    #[inline]
    pub fn kind(&self) -> GateKind {
        self.kind
    }

    #[inline]
    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    #[inline]
    pub fn qubits(&self) -> &[QubitId] {
        &self.qubits
    }

    /// Target qubits as raw indices, in operand order
    pub fn qubit_indices(&self) -> Vec<usize> {
        self.qubits.iter().map(|q| q.index()).collect()
    }

    #[inline]
    pub fn params(&self) -> &[f64] {
        &self.params
    }

    /// Whether this operation touches `qubit`
    pub fn acts_on(&self, qubit: usize) -> bool {
        self.qubits.iter().any(|q| q.index() == qubit)
    }
}

impl fmt::Debug for GateOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.kind.name())?;
        for (i, q) in self.qubits.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", q.index())?;
        }
        write!(f, ")")
    }
}

impl fmt::Display for GateOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Gate: {} - Qubits: [", self.kind.name())?;
        for (i, q) in self.qubits.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", q.index())?;
        }
        write!(f, "]")
    }
}
