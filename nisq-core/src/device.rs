//! Device profiles
//!
//! A [`DeviceProfile`] is the static description of a noisy device: which
//! native gates it offers, how long each takes and how often it fails, how its
//! qubits are coupled, and the T1/T2 coherence times of every qubit.
//!
//! Profiles are immutable. They are assembled with a [`DeviceProfileBuilder`]
//! and every calibration value is validated once in [`DeviceProfileBuilder::build`],
//! so the simulator never sees a negative probability or a non-positive
//! coherence time.
//!
//! # Example
//!
//! ```
//! use nisq_core::{DeviceProfile, GateKind};
//!
//! let device = DeviceProfile::builder(3)
//!     .gate("h", 0.001, 50.0)
//!     .gate("cx", 0.02, 300.0)
//!     .gate("measure", 0.001, 100.0)
//!     .edge(0, 1)
//!     .edge(1, 2)
//!     .uniform_coherence(100_000.0, 80_000.0)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(device.num_qubits(), 3);
//! assert!(device.are_connected(2, 1));
//! assert_eq!(device.gate_spec(GateKind::Cx).unwrap().duration, 300.0);
//! ```

use crate::{GateKind, QuantumError, Result};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Calibration of one native gate
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serialization", derive(serde::Serialize, serde::Deserialize))]
pub struct GateSpec {
    /// Probability in [0, 1] that the gate is followed by a bit-flip
    pub error_rate: f64,

    /// Nominal gate duration, in the same time unit as T1/T2
    pub duration: f64,
}

/// Coherence properties of a single qubit
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QubitProperties {
    /// T1 relaxation time
    pub t1: f64,

    /// T2 dephasing time
    pub t2: f64,
}

impl Default for QubitProperties {
    /// A qubit that never decoheres
    fn default() -> Self {
        Self {
            t1: f64::INFINITY,
            t2: f64::INFINITY,
        }
    }
}

impl QubitProperties {
    /// Pure-dephasing rate `1/Tφ = 1/T2 - 1/(2·T1)`, floored at zero.
    ///
    /// A device reporting `T2 > 2·T1` is unphysical; the rate is clamped
    /// rather than rejected.
    pub fn dephasing_rate(&self) -> f64 {
        (1.0 / self.t2 - 1.0 / (2.0 * self.t1)).max(0.0)
    }
}

/// Static description of a noisy, connectivity-limited device
#[derive(Debug, Clone, PartialEq)]
pub struct DeviceProfile {
    num_qubits: usize,
    gate_specs: BTreeMap<GateKind, GateSpec>,
    connectivity: BTreeSet<(usize, usize)>,
    qubits: Vec<QubitProperties>,
}

impl DeviceProfile {
    /// Start describing a device with `num_qubits` qubits
    pub fn builder(num_qubits: usize) -> DeviceProfileBuilder {
        DeviceProfileBuilder::new(num_qubits)
    }

    /// A noiseless device: every catalog gate with zero error and zero
    /// duration, all-to-all connectivity, infinite T1/T2
    pub fn ideal(num_qubits: usize) -> Result<Self> {
        let mut builder = Self::builder(num_qubits);
        for kind in GateKind::ALL {
            builder = builder.gate(kind.name(), 0.0, 0.0);
        }
        for a in 0..num_qubits {
            for b in (a + 1)..num_qubits {
                builder = builder.edge(a, b);
            }
        }
        builder.build()
    }

    #[inline]
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Calibration for a gate
    ///
    /// # Errors
    /// Returns [`QuantumError::UnknownGate`] if the device does not offer the gate
    pub fn gate_spec(&self, kind: GateKind) -> Result<&GateSpec> {
        self.gate_specs
            .get(&kind)
            .ok_or_else(|| QuantumError::UnknownGate(kind.name().to_string()))
    }

    /// Whether the gate is part of the device's native gate set
    pub fn supports(&self, kind: GateKind) -> bool {
        self.gate_specs.contains_key(&kind)
    }

    /// Native gates with their calibration, in catalog order
    pub fn gates(&self) -> impl Iterator<Item = (GateKind, &GateSpec)> {
        self.gate_specs.iter().map(|(kind, spec)| (*kind, spec))
    }

    /// Coherence properties of a qubit
    pub fn qubit(&self, qubit: usize) -> Option<&QubitProperties> {
        self.qubits.get(qubit)
    }

    /// Coupled pairs, each stored as `(low, high)`
    pub fn connectivity(&self) -> &BTreeSet<(usize, usize)> {
        &self.connectivity
    }

    /// Whether two qubits share a coupler (order-insensitive)
    pub fn are_connected(&self, a: usize, b: usize) -> bool {
        self.connectivity.contains(&ordered_pair(a, b))
    }

    /// Neighbour list per qubit, each sorted ascending
    pub fn coupling_map(&self) -> Vec<Vec<usize>> {
        let mut map = vec![Vec::new(); self.num_qubits];
        for &(a, b) in &self.connectivity {
            map[a].push(b);
            map[b].push(a);
        }
        for neighbours in &mut map {
            neighbours.sort_unstable();
        }
        map
    }
}

impl fmt::Display for DeviceProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "The properties for this device are:")?;
        writeln!(f, "    Number of qubits: {}", self.num_qubits)?;
        writeln!(f, "    Available gates:")?;
        for (kind, spec) in self.gates() {
            writeln!(
                f,
                "        Gate {} - Error rate: {}% - Delay: {}",
                kind,
                spec.error_rate * 100.0,
                spec.duration
            )?;
        }
        writeln!(f, "    Coupling Map:")?;
        for (qubit, neighbours) in self.coupling_map().iter().enumerate() {
            let list: Vec<String> = neighbours.iter().map(|n| n.to_string()).collect();
            writeln!(f, "        Q{} -> {}", qubit, list.join(", "))?;
        }
        Ok(())
    }
}

/// Builder for [`DeviceProfile`]
///
/// Gate names are kept as given until [`build`](Self::build), which is where
/// every check happens.
#[derive(Debug, Clone)]
pub struct DeviceProfileBuilder {
    num_qubits: usize,
    gates: Vec<(String, f64, f64)>,
    edges: Vec<(usize, usize)>,
    qubits: Vec<QubitProperties>,
    stray_qubits: Vec<usize>,
}

impl DeviceProfileBuilder {
    pub fn new(num_qubits: usize) -> Self {
        Self {
            num_qubits,
            gates: Vec::new(),
            edges: Vec::new(),
            qubits: vec![QubitProperties::default(); num_qubits],
            stray_qubits: Vec::new(),
        }
    }

    /// Declare a native gate with its error probability and duration
    pub fn gate(mut self, name: &str, error_rate: f64, duration: f64) -> Self {
        self.gates.push((name.to_string(), error_rate, duration));
        self
    }

    /// Declare a native gate with its error rate given in percent
    pub fn gate_percent(self, name: &str, error_percent: f64, duration: f64) -> Self {
        self.gate(name, error_percent / 100.0, duration)
    }

    /// Add a coupler between two qubits
    pub fn edge(mut self, a: usize, b: usize) -> Self {
        self.edges.push((a, b));
        self
    }

    /// Add several couplers
    pub fn edges(mut self, edges: impl IntoIterator<Item = (usize, usize)>) -> Self {
        self.edges.extend(edges);
        self
    }

    /// Set T1/T2 for one qubit; indices outside the device are reported by `build`
    pub fn coherence(mut self, qubit: usize, t1: f64, t2: f64) -> Self {
        match self.qubits.get_mut(qubit) {
            Some(props) => *props = QubitProperties { t1, t2 },
            None => self.stray_qubits.push(qubit),
        }
        self
    }

    /// Set the same T1/T2 on every qubit
    pub fn uniform_coherence(mut self, t1: f64, t2: f64) -> Self {
        for props in &mut self.qubits {
            *props = QubitProperties { t1, t2 };
        }
        self
    }

    /// Validate and freeze the profile
    ///
    /// # Errors
    /// - [`QuantumError::UnknownGate`] for a gate name outside the catalog
    /// - [`QuantumError::InvalidDeviceProfile`] for an empty device, an error
    ///   rate outside [0, 1], a negative or non-finite duration, a
    ///   non-positive T1/T2, a repeated gate, or a malformed coupler
    pub fn build(self) -> Result<DeviceProfile> {
        if self.num_qubits == 0 {
            return Err(QuantumError::invalid_device("device must have at least one qubit"));
        }

        let mut gate_specs = BTreeMap::new();
        for (name, error_rate, duration) in self.gates {
            let kind: GateKind = name.parse()?;
            if !(0.0..=1.0).contains(&error_rate) {
                return Err(QuantumError::invalid_device(format!(
                    "error rate for gate '{}' must be in [0,1], got {}",
                    name, error_rate
                )));
            }
            if !duration.is_finite() || duration < 0.0 {
                return Err(QuantumError::invalid_device(format!(
                    "duration for gate '{}' must be finite and non-negative, got {}",
                    name, duration
                )));
            }
            if gate_specs
                .insert(kind, GateSpec { error_rate, duration })
                .is_some()
            {
                return Err(QuantumError::invalid_device(format!(
                    "gate '{}' declared more than once",
                    name
                )));
            }
        }

        if let Some(&qubit) = self.stray_qubits.first() {
            return Err(QuantumError::invalid_device(format!(
                "coherence times given for qubit {} on a {}-qubit device",
                qubit, self.num_qubits
            )));
        }
        for (qubit, props) in self.qubits.iter().enumerate() {
            // NaN fails both comparisons
            if !(props.t1 > 0.0) || !(props.t2 > 0.0) {
                return Err(QuantumError::invalid_device(format!(
                    "T1/T2 of qubit {} must be positive, got T1={} T2={}",
                    qubit, props.t1, props.t2
                )));
            }
        }

        let mut connectivity = BTreeSet::new();
        for (a, b) in self.edges {
            if a >= self.num_qubits || b >= self.num_qubits {
                return Err(QuantumError::invalid_device(format!(
                    "coupler ({}, {}) references a qubit outside the {}-qubit device",
                    a, b, self.num_qubits
                )));
            }
            if a == b {
                return Err(QuantumError::invalid_device(format!(
                    "coupler ({}, {}) connects a qubit to itself",
                    a, b
                )));
            }
            connectivity.insert(ordered_pair(a, b));
        }

        Ok(DeviceProfile {
            num_qubits: self.num_qubits,
            gate_specs,
            connectivity,
            qubits: self.qubits,
        })
    }
}

#[inline]
fn ordered_pair(a: usize, b: usize) -> (usize, usize) {
    if a < b {
        (a, b)
    } else {
        (b, a)
    }
}
