//! Minimum-entropy cell selection and weighted pattern choice

use crate::algorithm::bitset::PatternSet;
use crate::algorithm::propagation::Wave;
use crate::analysis::weights::PatternWeights;
use crate::io::configuration::ENTROPY_NOISE;
use crate::math::probability::weighted_index;

/// Result of scanning the wave for the next cell to collapse
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Observation {
    /// This cell has the lowest entropy among undecided anchor cells
    Cell(usize),
    /// Every anchor cell holds exactly one pattern
    Finished,
    /// Some anchor cell has no pattern left
    Contradiction,
}

/// Find the undecided anchor cell with the lowest noisy entropy
///
/// `noise` supplies values in `[0, 1)`; it is only consulted for cells that
/// could beat the current minimum so the seeded sequence stays short.
pub fn next_unobserved_cell(wave: &Wave, mut noise: impl FnMut() -> f64) -> Observation {
    let mut min = f64::INFINITY;
    let mut selected = None;

    for cell in 0..wave.len() {
        if !wave.is_anchor(cell) {
            continue;
        }
        let remaining = wave.remaining(cell);
        if remaining == 0 {
            return Observation::Contradiction;
        }

        let entropy = wave.entropy(cell);
        if remaining > 1 && entropy <= min {
            let noisy = ENTROPY_NOISE.mul_add(noise(), entropy);
            if noisy < min {
                min = noisy;
                selected = Some(cell);
            }
        }
    }

    selected.map_or(Observation::Finished, Observation::Cell)
}

/// Pick one of the remaining patterns weighted by corpus frequency
pub fn choose_pattern(candidates: &PatternSet, weights: &PatternWeights, roll: f64) -> Option<usize> {
    let indices = candidates.to_vec();
    let distribution: Vec<f64> = indices.iter().map(|&t| weights.weight(t)).collect();
    indices.get(weighted_index(&distribution, roll)).copied()
}
