//! Physical qubit addressing

use std::fmt;

/// Index of a physical qubit on the device
///
/// Physical qubits are laid out in tensor order: qubit 0 is the most
/// significant bit of a basis-state index.
///
/// # Example
/// ```
/// use nisq_core::QubitId;
///
/// let q = QubitId::new(0);
/// assert_eq!(q.bit_position(3), 2);
/// ```
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(feature = "serialization", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serialization", serde(transparent))]
pub struct QubitId(usize);

impl QubitId {
    #[inline]
    pub const fn new(id: usize) -> Self {
        Self(id)
    }

    #[inline]
    pub const fn index(&self) -> usize {
        self.0
    }

    /// Position of this qubit's bit inside a basis-state index of an
    /// `num_qubits`-qubit register (qubit 0 is the highest bit)
    #[inline]
    pub const fn bit_position(&self, num_qubits: usize) -> usize {
        num_qubits - 1 - self.0
    }
}

impl fmt::Display for QubitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "q{}", self.0)
    }
}

impl From<usize> for QubitId {
    #[inline]
    fn from(id: usize) -> Self {
        Self::new(id)
    }
}

impl From<QubitId> for usize {
    #[inline]
    fn from(qid: QubitId) -> Self {
        qid.index()
    }
}
