//! Outcome probabilities and shot sampling from a density matrix

use crate::density_matrix::DensityMatrix;
use crate::error::{Result, StateError};
use log::debug;
use rand::distributions::{Distribution, WeightedIndex};
use rand::Rng;

/// Negative diagonal mass tolerated before a state is declared non-physical
pub const DEFAULT_NEGATIVE_MASS_TOLERANCE: f64 = 1e-6;

/// Computational-basis outcome probabilities of `state`
///
/// The real diagonal is clipped at zero and renormalised. Round-off can
/// leave tiny negative entries; more than `tolerance` of negative mass in
/// total means the evolution went wrong and is reported instead of hidden.
///
/// # Errors
/// Returns [`StateError::NonPhysicalState`] if the negative mass exceeds
/// `tolerance` or nothing positive remains after clipping
pub fn probabilities(state: &DensityMatrix, tolerance: f64) -> Result<Vec<f64>> {
    let diagonal = state.diagonal();
    let negative_mass: f64 = diagonal.iter().filter(|&&p| p < 0.0).map(|p| -p).sum();
    let mut probs: Vec<f64> = diagonal.into_iter().map(|p| p.max(0.0)).collect();
    let total: f64 = probs.iter().sum();

    if negative_mass > tolerance || !(total > 0.0) {
        return Err(StateError::NonPhysicalState {
            negative_mass,
            tolerance,
            total,
        });
    }

    if negative_mass > 0.0 {
        debug!("clipped {:e} of negative diagonal mass", negative_mass);
    }
    for p in &mut probs {
        *p /= total;
    }
    Ok(probs)
}

/// Draw `shots` basis-state indices from a categorical distribution
///
/// # Errors
/// Returns [`StateError::NonPhysicalState`] if `probs` cannot be used as
/// sampling weights
pub fn sample_indices<R: Rng + ?Sized>(probs: &[f64], shots: usize, rng: &mut R) -> Result<Vec<usize>> {
    if shots == 0 {
        return Ok(Vec::new());
    }
    let dist = WeightedIndex::new(probs).map_err(|_| StateError::NonPhysicalState {
        negative_mass: probs.iter().filter(|&&p| p < 0.0).map(|p| -p).sum(),
        tolerance: 0.0,
        total: probs.iter().sum(),
    })?;
    Ok((0..shots).map(|_| dist.sample(rng)).collect())
}

/// `n`-character bitstring of a basis index, most significant bit first
///
/// With qubit 0 as the MSB, character `i` is the value of physical qubit `i`.
pub fn format_bitstring(index: usize, num_qubits: usize) -> String {
    format!("{:0width$b}", index, width = num_qubits)
}
