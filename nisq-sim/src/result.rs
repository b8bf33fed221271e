//! Simulation result types

use crate::evolver::EvolutionStats;
use nisq_state::DensityMatrix;
use std::collections::BTreeMap;
use std::fmt;

/// Result of a noisy simulation
#[derive(Debug, Clone)]
pub struct SimulationResult {
    /// Final density matrix, in physical qubit order
    pub state: DensityMatrix,

    /// Reported measurement histogram
    pub counts: MeasurementCounts,

    /// Evolution statistics
    pub stats: EvolutionStats,
}

impl SimulationResult {
    pub fn num_qubits(&self) -> usize {
        self.state.num_qubits()
    }

    pub fn total_shots(&self) -> usize {
        self.counts.total_shots()
    }
}

/// Measurement outcome counts
///
/// Maps bitstrings to the number of times they were observed. All keys have
/// the same length, so iteration order is ascending integer value.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MeasurementCounts {
    /// Map from bitstring to count
    counts: BTreeMap<String, usize>,
    /// Total number of shots
    total_shots: usize,
}

impl MeasurementCounts {
    /// Create an empty histogram for `total_shots` shots
    pub fn new(total_shots: usize) -> Self {
        Self {
            counts: BTreeMap::new(),
            total_shots,
        }
    }

    /// Create from a counts map; the total is the sum of the counts
    pub fn from_counts(counts: BTreeMap<String, usize>) -> Self {
        let total_shots = counts.values().sum();
        Self {
            counts,
            total_shots,
        }
    }

    /// Add `count` observations of `bitstring`
    pub fn add(&mut self, bitstring: String, count: usize) {
        *self.counts.entry(bitstring).or_insert(0) += count;
    }

    /// Get the count for a specific bitstring
    pub fn get(&self, bitstring: &str) -> usize {
        self.counts.get(bitstring).copied().unwrap_or(0)
    }

    /// Get the probability of a specific bitstring
    pub fn probability(&self, bitstring: &str) -> f64 {
        if self.total_shots == 0 {
            0.0
        } else {
            self.get(bitstring) as f64 / self.total_shots as f64
        }
    }

    /// Observed bitstrings, ascending
    pub fn bitstrings(&self) -> impl Iterator<Item = &String> {
        self.counts.keys()
    }

    pub fn counts(&self) -> &BTreeMap<String, usize> {
        &self.counts
    }

    pub fn total_shots(&self) -> usize {
        self.total_shots
    }

    /// Sum of all recorded counts
    pub fn recorded_shots(&self) -> usize {
        self.counts.values().sum()
    }

    /// Number of distinct outcomes observed
    pub fn num_outcomes(&self) -> usize {
        self.counts.len()
    }

    /// Most frequent outcome; ties go to the smallest bitstring
    pub fn most_common(&self) -> Option<(&String, usize)> {
        let mut best: Option<(&String, usize)> = None;
        for (bs, &count) in &self.counts {
            if best.map_or(true, |(_, best_count)| count > best_count) {
                best = Some((bs, count));
            }
        }
        best
    }

    /// Outcomes sorted by frequency (descending), ties ascending by bitstring
    pub fn sorted(&self) -> Vec<(&String, usize)> {
        let mut sorted: Vec<_> = self.counts.iter().map(|(bs, &count)| (bs, count)).collect();
        sorted.sort_by(|a, b| b.1.cmp(&a.1));
        sorted
    }

    /// Convert to a probability distribution
    pub fn to_probabilities(&self) -> BTreeMap<String, f64> {
        self.counts
            .keys()
            .map(|bs| (bs.clone(), self.probability(bs)))
            .collect()
    }
}

impl fmt::Display for MeasurementCounts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Measurement Counts ({} shots):", self.total_shots)?;

        let sorted = self.sorted();
        for (bitstring, count) in sorted.iter().take(10) {
            writeln!(
                f,
                "  {}: {} ({:.2}%)",
                bitstring,
                count,
                self.probability(bitstring) * 100.0
            )?;
        }

        if sorted.len() > 10 {
            writeln!(f, "  ... and {} more outcomes", sorted.len() - 10)?;
        }

        Ok(())
    }
}
