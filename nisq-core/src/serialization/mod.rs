//! JSON persistence for device profiles and compiled circuits
//!
//! Serialized forms are plain DTOs. Loading always goes back through
//! [`DeviceProfileBuilder`](crate::DeviceProfileBuilder) and
//! [`CompiledCircuit::add_gate`](crate::CompiledCircuit::add_gate), so a
//! JSON file can never produce a profile or circuit the in-process
//! constructors would reject.

pub mod circuit;
pub mod device;

pub use circuit::{SerializedCircuit, SerializedGateOp};
pub use device::{SerializedDevice, SerializedGateSpec, SerializedQubit};

use crate::{QuantumError, Result};

/// Serialization format version
pub const FORMAT_VERSION: u32 = 1;

pub(crate) fn check_version(version: u32) -> Result<()> {
    if version > FORMAT_VERSION {
        return Err(QuantumError::VersionMismatch {
            expected: FORMAT_VERSION,
            actual: version,
        });
    }
    Ok(())
}

pub(crate) fn to_json<T: serde::Serialize>(value: &T, pretty: bool) -> Result<String> {
    let encoded = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    };
    encoded.map_err(|e| QuantumError::SerializationError(format!("JSON serialization failed: {}", e)))
}

pub(crate) fn from_json<T: serde::de::DeserializeOwned>(json: &str) -> Result<T> {
    serde_json::from_str(json)
        .map_err(|e| QuantumError::DeserializationError(format!("JSON deserialization failed: {}", e)))
}
