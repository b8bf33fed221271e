//! Compiled circuit serialization types

use crate::{CompiledCircuit, GateOp, QubitLayout, Result};
use serde::{Deserialize, Serialize};

/// Serialized gate operation
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct SerializedGateOp {
    /// Gate name from the native catalog
    pub gate: String,
    /// Physical target qubits in operand order
    pub qubits: Vec<usize>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub params: Vec<f64>,
}

impl From<&GateOp> for SerializedGateOp {
    fn from(op: &GateOp) -> Self {
        Self {
            gate: op.name().to_string(),
            qubits: op.qubit_indices(),
            params: op.params().to_vec(),
        }
    }
}

/// Serialized compiled circuit
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct SerializedCircuit {
    /// Format version for compatibility checking
    pub version: u32,
    pub num_qubits: usize,
    pub operations: Vec<SerializedGateOp>,
    /// Entry `i` is the physical qubit holding logical qubit `i`; omitted
    /// means the identity layout
    #[serde(default)]
    pub logical_to_physical: Option<Vec<usize>>,
}

impl From<&CompiledCircuit> for SerializedCircuit {
    fn from(circuit: &CompiledCircuit) -> Self {
        Self {
            version: super::FORMAT_VERSION,
            num_qubits: circuit.num_qubits(),
            operations: circuit.gates().iter().map(SerializedGateOp::from).collect(),
            logical_to_physical: Some(circuit.layout().as_slice().to_vec()),
        }
    }
}

impl SerializedCircuit {
    /// Rebuild and validate the circuit
    pub fn into_circuit(self) -> Result<CompiledCircuit> {
        super::check_version(self.version)?;

        let layout = match self.logical_to_physical {
            Some(mapping) => QubitLayout::new(mapping)?,
            None => QubitLayout::identity(self.num_qubits),
        };
        let mut circuit = CompiledCircuit::new(self.num_qubits, layout)?;
        for op in self.operations {
            circuit.add_gate(GateOp::parse(&op.gate, &op.qubits)?.with_params(op.params))?;
        }
        Ok(circuit)
    }
}

impl CompiledCircuit {
    /// Serialize the circuit to JSON
    ///
    /// # Errors
    /// Returns error if serialization fails
    pub fn to_json(&self) -> Result<String> {
        super::to_json(&SerializedCircuit::from(self), false)
    }

    /// Serialize the circuit to pretty-printed JSON
    pub fn to_json_pretty(&self) -> Result<String> {
        super::to_json(&SerializedCircuit::from(self), true)
    }

    /// Load and validate a circuit from JSON
    pub fn from_json(json: &str) -> Result<Self> {
        super::from_json::<SerializedCircuit>(json)?.into_circuit()
    }
}
