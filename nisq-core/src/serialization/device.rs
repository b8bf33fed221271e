//! Device profile serialization types

use crate::{DeviceProfile, QubitProperties, Result};
use serde::{Deserialize, Serialize};

/// Serialized gate calibration
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct SerializedGateSpec {
    pub name: String,
    pub error_rate: f64,
    pub duration: f64,
}

/// Serialized coherence times; `null` stands for a qubit that never decoheres
///
/// JSON has no representation for infinity, so infinite times are written
/// as absent values.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct SerializedQubit {
    pub t1: Option<f64>,
    pub t2: Option<f64>,
}

impl From<&QubitProperties> for SerializedQubit {
    fn from(props: &QubitProperties) -> Self {
        let finite = |t: f64| t.is_finite().then_some(t);
        Self {
            t1: finite(props.t1),
            t2: finite(props.t2),
        }
    }
}

/// Serialized device profile
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct SerializedDevice {
    /// Format version for compatibility checking
    pub version: u32,
    pub num_qubits: usize,
    pub gates: Vec<SerializedGateSpec>,
    #[serde(default)]
    pub connectivity: Vec<(usize, usize)>,
    #[serde(default)]
    pub qubits: Vec<SerializedQubit>,
}

impl From<&DeviceProfile> for SerializedDevice {
    fn from(device: &DeviceProfile) -> Self {
        Self {
            version: super::FORMAT_VERSION,
            num_qubits: device.num_qubits(),
            gates: device
                .gates()
                .map(|(kind, spec)| SerializedGateSpec {
                    name: kind.name().to_string(),
                    error_rate: spec.error_rate,
                    duration: spec.duration,
                })
                .collect(),
            connectivity: device.connectivity().iter().copied().collect(),
            qubits: (0..device.num_qubits())
                .filter_map(|q| device.qubit(q))
                .map(SerializedQubit::from)
                .collect(),
        }
    }
}

impl SerializedDevice {
    /// Rebuild and validate the profile
    ///
    /// # Errors
    /// Returns [`QuantumError::VersionMismatch`](crate::QuantumError::VersionMismatch)
    /// for a newer format, or any error [`DeviceProfileBuilder::build`](crate::DeviceProfileBuilder::build)
    /// reports
    pub fn into_device(self) -> Result<DeviceProfile> {
        super::check_version(self.version)?;

        let mut builder = DeviceProfile::builder(self.num_qubits);
        for gate in &self.gates {
            builder = builder.gate(&gate.name, gate.error_rate, gate.duration);
        }
        builder = builder.edges(self.connectivity);
        for (qubit, props) in self.qubits.iter().enumerate() {
            builder = builder.coherence(
                qubit,
                props.t1.unwrap_or(f64::INFINITY),
                props.t2.unwrap_or(f64::INFINITY),
            );
        }
        builder.build()
    }
}

impl DeviceProfile {
    /// Serialize the profile to JSON
    ///
    /// # Errors
    /// Returns error if serialization fails
    pub fn to_json(&self) -> Result<String> {
        super::to_json(&SerializedDevice::from(self), false)
    }

    /// Serialize the profile to pretty-printed JSON
    pub fn to_json_pretty(&self) -> Result<String> {
        super::to_json(&SerializedDevice::from(self), true)
    }

    /// Load and validate a profile from JSON
    ///
    /// # Errors
    /// Returns [`QuantumError::DeserializationError`](crate::QuantumError::DeserializationError)
    /// for malformed JSON, otherwise the same errors as building the profile in code
    pub fn from_json(json: &str) -> Result<Self> {
        super::from_json::<SerializedDevice>(json)?.into_device()
    }
}
