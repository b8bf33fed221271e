//! Compiled circuits
//!
//! A [`CompiledCircuit`] is what the external transpiler hands the simulator:
//! the final, routed gate list in execution order over physical qubits, and
//! the [`QubitLayout`] telling which physical qubit carries each logical one.

use crate::{GateKind, GateOp, QuantumError, Result};
use std::collections::{BTreeMap, HashMap};
use std::fmt;

/// Bijective logical → physical qubit mapping
///
/// # Example
/// ```
/// use nisq_core::QubitLayout;
///
/// let layout = QubitLayout::new(vec![2, 0, 1]).unwrap();
/// assert_eq!(layout.physical(0), 2);
/// assert!(!layout.is_identity());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QubitLayout {
    logical_to_physical: Vec<usize>,
}

impl QubitLayout {
    /// Create a layout where entry `i` is the physical index of logical qubit `i`
    ///
    /// # Errors
    /// Returns [`QuantumError::InvalidCircuit`] if the mapping is not a
    /// permutation of `0..len`
    pub fn new(logical_to_physical: Vec<usize>) -> Result<Self> {
        let n = logical_to_physical.len();
        let mut seen = vec![false; n];
        for (logical, &physical) in logical_to_physical.iter().enumerate() {
            if physical >= n {
                return Err(QuantumError::InvalidCircuit(format!(
                    "logical qubit {} mapped to physical qubit {} outside 0..{}",
                    logical, physical, n
                )));
            }
            if std::mem::replace(&mut seen[physical], true) {
                return Err(QuantumError::InvalidCircuit(format!(
                    "physical qubit {} assigned to more than one logical qubit",
                    physical
                )));
            }
        }
        Ok(Self { logical_to_physical })
    }

    /// The trivial layout on `num_qubits` qubits
    pub fn identity(num_qubits: usize) -> Self {
        Self {
            logical_to_physical: (0..num_qubits).collect(),
        }
    }

    /// Build from a `logical → physical` map, as transpilers usually report it
    ///
    /// # Errors
    /// Returns [`QuantumError::InvalidCircuit`] if the keys are not exactly
    /// `0..len` or the values are not a permutation of them
    pub fn from_map(map: &HashMap<usize, usize>) -> Result<Self> {
        let ordered: BTreeMap<usize, usize> = map.iter().map(|(&l, &p)| (l, p)).collect();
        for (expected, &logical) in ordered.keys().enumerate() {
            if logical != expected {
                return Err(QuantumError::InvalidCircuit(format!(
                    "layout has no entry for logical qubit {}",
                    expected
                )));
            }
        }
        Self::new(ordered.into_values().collect())
    }

    /// Physical index holding logical qubit `logical`
    #[inline]
    pub fn physical(&self, logical: usize) -> usize {
        self.logical_to_physical[logical]
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.logical_to_physical.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.logical_to_physical.is_empty()
    }

    pub fn is_identity(&self) -> bool {
        self.logical_to_physical
            .iter()
            .enumerate()
            .all(|(logical, &physical)| logical == physical)
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.logical_to_physical
    }
}

/// A routed gate sequence over physical qubits plus its final layout
///
/// # Example
/// ```
/// use nisq_core::{CompiledCircuit, GateKind, QubitLayout};
///
/// let mut circuit = CompiledCircuit::new(2, QubitLayout::identity(2)).unwrap();
/// circuit.push(GateKind::H, &[0]).unwrap();
/// circuit.push(GateKind::Cx, &[0, 1]).unwrap();
/// assert_eq!(circuit.len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledCircuit {
    num_qubits: usize,
    gates: Vec<GateOp>,
    layout: QubitLayout,
}

impl CompiledCircuit {
    /// Create an empty circuit
    ///
    /// # Errors
    /// Returns [`QuantumError::InvalidCircuit`] if the layout does not cover
    /// exactly `num_qubits` qubits
    pub fn new(num_qubits: usize, layout: QubitLayout) -> Result<Self> {
        if num_qubits == 0 {
            return Err(QuantumError::InvalidCircuit(
                "circuit must have at least one qubit".to_string(),
            ));
        }
        if layout.len() != num_qubits {
            return Err(QuantumError::InvalidCircuit(format!(
                "layout covers {} qubits, circuit has {}",
                layout.len(),
                num_qubits
            )));
        }
        Ok(Self {
            num_qubits,
            gates: Vec::new(),
            layout,
        })
    }

    /// Append a gate operation
    ///
    /// # Errors
    /// Returns [`QuantumError::InvalidQubit`] if any target is outside the register
    pub fn add_gate(&mut self, op: GateOp) -> Result<()> {
        for qubit in op.qubits() {
            if qubit.index() >= self.num_qubits {
                return Err(QuantumError::invalid_qubit(qubit.index(), self.num_qubits));
            }
        }
        self.gates.push(op);
        Ok(())
    }

    /// Append a gate by kind
    pub fn push(&mut self, kind: GateKind, qubits: &[usize]) -> Result<()> {
        self.add_gate(GateOp::new(kind, qubits)?)
    }

    /// Append a gate by name, e.g. from a transpiler's instruction list
    pub fn push_named(&mut self, name: &str, qubits: &[usize]) -> Result<()> {
        self.add_gate(GateOp::parse(name, qubits)?)
    }

    #[inline]
    pub const fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.gates.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.gates.is_empty()
    }

    pub fn gates(&self) -> &[GateOp] {
        &self.gates
    }

    pub fn layout(&self) -> &QubitLayout {
        &self.layout
    }

    /// Re-check every operation against the register size
    pub fn validate(&self) -> Result<()> {
        for op in &self.gates {
            for qubit in op.qubits() {
                if qubit.index() >= self.num_qubits {
                    return Err(QuantumError::invalid_qubit(qubit.index(), self.num_qubits));
                }
            }
        }
        Ok(())
    }
}

impl fmt::Display for CompiledCircuit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Circuit details:")?;
        writeln!(f, "    Number of qubits: {}", self.num_qubits)?;
        writeln!(f, "    Circuit gates:")?;
        for op in &self.gates {
            writeln!(f, "        {}", op)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_validation() {
        assert!(QubitLayout::new(vec![1, 0, 2]).is_ok());
        assert!(QubitLayout::new(vec![0, 0]).is_err());
        assert!(QubitLayout::new(vec![0, 2]).is_err());
        assert!(QubitLayout::identity(4).is_identity());
    }

    #[test]
    fn test_layout_from_map() {
        let map: HashMap<usize, usize> = [(0, 3), (1, 0), (2, 1), (3, 2)].into_iter().collect();
        let layout = QubitLayout::from_map(&map).unwrap();
        assert_eq!(layout.as_slice(), &[3, 0, 1, 2]);

        let gappy: HashMap<usize, usize> = [(0, 0), (2, 1)].into_iter().collect();
        assert!(QubitLayout::from_map(&gappy).is_err());
    }

    #[test]
    fn test_circuit_rejects_out_of_range_qubit() {
        let mut circuit = CompiledCircuit::new(2, QubitLayout::identity(2)).unwrap();
        assert_eq!(
            circuit.push(GateKind::Cx, &[0, 2]),
            Err(QuantumError::InvalidQubit(2, 2))
        );
        assert!(circuit.is_empty());
    }

    #[test]
    fn test_circuit_layout_size_mismatch() {
        assert!(CompiledCircuit::new(3, QubitLayout::identity(2)).is_err());
        assert!(CompiledCircuit::new(0, QubitLayout::identity(0)).is_err());
    }

    #[test]
    fn test_push_named_unknown_gate() {
        let mut circuit = CompiledCircuit::new(1, QubitLayout::identity(1)).unwrap();
        assert_eq!(
            circuit.push_named("rz", &[0]),
            Err(QuantumError::UnknownGate("rz".to_string()))
        );
    }

    #[test]
    fn test_display() {
        let mut circuit = CompiledCircuit::new(2, QubitLayout::identity(2)).unwrap();
        circuit.push(GateKind::H, &[0]).unwrap();
        circuit.push(GateKind::Cx, &[0, 1]).unwrap();
        let text = circuit.to_string();
        assert!(text.contains("Number of qubits: 2"));
        assert!(text.contains("Gate: cx - Qubits: [0, 1]"));
    }
}
