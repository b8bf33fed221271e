//! Physical → logical outcome remapping
//!
//! Samples come out of the density matrix in physical order: character `i`
//! of the bitstring is physical qubit `i`. Reporting undoes the routing in
//! two separate steps:
//!
//! 1. [`remap_bitstring`]: logical position `i` takes the bit of physical
//!    qubit `logical_to_physical[i]`.
//! 2. [`BitOrder::apply`]: a single, final choice of which end of the string
//!    holds logical qubit 0.

use crate::result::MeasurementCounts;
use nisq_core::QubitLayout;

/// Character order of reported bitstrings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BitOrder {
    /// Logical qubit 0 is the rightmost character, as transpilers usually
    /// report counts
    #[default]
    LittleEndian,
    /// Logical qubit 0 is the leftmost character
    BigEndian,
}

impl BitOrder {
    /// Turn a logical-order bitstring (qubit 0 first) into reporting order
    pub fn apply(self, logical: &str) -> String {
        match self {
            BitOrder::LittleEndian => logical.chars().rev().collect(),
            BitOrder::BigEndian => logical.to_string(),
        }
    }
}

/// Reorder a physical-order bitstring into logical order
///
/// The layout must cover exactly as many qubits as the string has
/// characters; the compiled circuit guarantees that.
pub fn remap_bitstring(physical: &str, layout: &QubitLayout) -> String {
    let bits = physical.as_bytes();
    (0..layout.len())
        .map(|logical| char::from(bits[layout.physical(logical)]))
        .collect()
}

/// [`remap_bitstring`] applied to every key of a histogram
pub fn remap_counts(counts: &MeasurementCounts, layout: &QubitLayout) -> MeasurementCounts {
    let mut remapped = MeasurementCounts::new(counts.total_shots());
    for (bitstring, &count) in counts.counts() {
        remapped.add(remap_bitstring(bitstring, layout), count);
    }
    remapped
}

/// Full reporting transform: remap, then apply the bit order
pub fn report_bitstring(physical: &str, layout: &QubitLayout, order: BitOrder) -> String {
    order.apply(&remap_bitstring(physical, layout))
}
