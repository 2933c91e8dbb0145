//! Wave state and stack-based constraint propagation
//!
//! The wave holds, for every solver cell, the set of patterns that may still
//! be anchored there. Banning a pattern pushes it on a stack; propagation pops
//! bans and decrements the support counts of neighbouring patterns, banning
//! any pattern whose support in some direction drops to zero.

use crate::algorithm::bitset::PatternSet;
use crate::analysis::weights::PatternWeights;
use crate::math::probability::entropy_from_sums;
use crate::spatial::tiles::PatternCatalog;
use ndarray::Array3;

/// Column offset for each propagation direction (left, up, right, down)
pub const DX: [i32; 4] = [-1, 0, 1, 0];
/// Row offset for each propagation direction (left, up, right, down)
pub const DY: [i32; 4] = [0, 1, 0, -1];
/// Index of the opposite direction
pub const OPPOSITE: [usize; 4] = [2, 3, 0, 1];

/// Compatible neighbours of every pattern in every direction
#[derive(Debug, Clone)]
pub struct Propagator {
    rules: Vec<Vec<Vec<usize>>>,
}

impl Propagator {
    /// Build adjacency rules by overlap agreement
    ///
    /// `rules[d][t]` lists the patterns that may sit one cell away from `t`
    /// in direction `d`.
    pub fn build(catalog: &PatternCatalog) -> Self {
        let count = catalog.len();
        let rules = (0..4)
            .map(|d| {
                (0..count)
                    .map(|t1| {
                        (0..count)
                            .filter(|&t2| catalog.agrees(t1, t2, DX[d], DY[d]))
                            .collect()
                    })
                    .collect()
            })
            .collect();
        Self { rules }
    }

    /// Patterns compatible with `pattern` one step in direction `direction`
    pub fn compatible(&self, direction: usize, pattern: usize) -> &[usize] {
        self.rules
            .get(direction)
            .and_then(|by_pattern| by_pattern.get(pattern))
            .map_or(&[], Vec::as_slice)
    }
}

/// Per-cell pattern possibilities with incremental entropy bookkeeping
#[derive(Debug, Clone)]
pub struct Wave {
    width: usize,
    height: usize,
    pattern_size: usize,
    periodic: bool,
    cells: Vec<PatternSet>,
    /// Remaining support per (cell, pattern, direction)
    compatible: Array3<i32>,
    sums_of_ones: Vec<usize>,
    sums_of_weights: Vec<f64>,
    sums_of_weight_log_weights: Vec<f64>,
    entropies: Vec<f64>,
    stack: Vec<(usize, usize)>,
    contradiction: bool,
}

impl Wave {
    /// Create a wave where every pattern is possible at every cell
    pub fn new(
        width: usize,
        height: usize,
        pattern_size: usize,
        periodic: bool,
        propagator: &Propagator,
        weights: &PatternWeights,
    ) -> Self {
        let cell_count = width * height;
        let pattern_count = weights.len();

        let mut compatible = Array3::zeros((cell_count, pattern_count, 4));
        for ((_, t, d), support) in compatible.indexed_iter_mut() {
            *support = propagator.compatible(OPPOSITE[d], t).len() as i32;
        }

        Self {
            width,
            height,
            pattern_size,
            periodic,
            cells: vec![PatternSet::all(pattern_count); cell_count],
            compatible,
            sums_of_ones: vec![pattern_count; cell_count],
            sums_of_weights: vec![weights.sum_of_weights; cell_count],
            sums_of_weight_log_weights: vec![weights.sum_of_weight_log_weights; cell_count],
            entropies: vec![weights.starting_entropy; cell_count],
            stack: Vec::with_capacity(cell_count * pattern_count),
            contradiction: pattern_count == 0,
        }
    }

    /// Wave width in cells
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Wave height in cells
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Total number of cells
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether the wave has no cells
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Flat index of `(x, y)`
    pub const fn index(&self, x: usize, y: usize) -> usize {
        x + y * self.width
    }

    /// Whether a full pattern anchored at this cell fits inside the wave
    ///
    /// Always true for periodic output. Only anchor cells are observed.
    pub const fn is_anchor(&self, cell: usize) -> bool {
        if self.periodic {
            return true;
        }
        let x = cell % self.width;
        let y = cell / self.width;
        x + self.pattern_size <= self.width && y + self.pattern_size <= self.height
    }

    /// Patterns still possible at a cell
    pub fn cell(&self, cell: usize) -> Option<&PatternSet> {
        self.cells.get(cell)
    }

    /// Number of patterns still possible at a cell
    pub fn remaining(&self, cell: usize) -> usize {
        self.sums_of_ones.get(cell).copied().unwrap_or(0)
    }

    /// Current entropy of a cell
    pub fn entropy(&self, cell: usize) -> f64 {
        self.entropies.get(cell).copied().unwrap_or(0.0)
    }

    /// Whether some cell has run out of patterns
    pub const fn is_contradicted(&self) -> bool {
        self.contradiction
    }

    /// Remove a pattern from a cell and queue it for propagation
    pub fn ban(&mut self, cell: usize, pattern: usize, weights: &PatternWeights) {
        let Some(set) = self.cells.get_mut(cell) else {
            return;
        };
        if !set.remove(pattern) {
            return;
        }

        for d in 0..4 {
            if let Some(support) = self.compatible.get_mut((cell, pattern, d)) {
                *support = 0;
            }
        }
        self.stack.push((cell, pattern));

        if let Some(ones) = self.sums_of_ones.get_mut(cell) {
            *ones = ones.saturating_sub(1);
            if *ones == 0 {
                self.contradiction = true;
            }
        }
        if let (Some(sum), Some(sum_log), Some(entropy)) = (
            self.sums_of_weights.get_mut(cell),
            self.sums_of_weight_log_weights.get_mut(cell),
            self.entropies.get_mut(cell),
        ) {
            *sum -= weights.weight(pattern);
            *sum_log -= weights.weight_log_weights.get(pattern).copied().unwrap_or(0.0);
            *entropy = entropy_from_sums(*sum, *sum_log);
        }
    }

    /// Ban every pattern at `cell` except `keep`
    pub fn collapse(&mut self, cell: usize, keep: usize, weights: &PatternWeights) {
        let others: Vec<usize> = self
            .cells
            .get(cell)
            .map(|set| set.iter().filter(|&t| t != keep).collect())
            .unwrap_or_default();
        for pattern in others {
            self.ban(cell, pattern, weights);
        }
    }

    /// Drain the ban stack, returning `false` once a contradiction appears
    pub fn propagate(&mut self, propagator: &Propagator, weights: &PatternWeights) -> bool {
        while let Some((cell, pattern)) = self.stack.pop() {
            let x1 = (cell % self.width) as i32;
            let y1 = (cell / self.width) as i32;

            for d in 0..4 {
                let Some(neighbour) = self.neighbour(x1, y1, d) else {
                    continue;
                };
                for &other in propagator.compatible(d, pattern) {
                    let exhausted = self
                        .compatible
                        .get_mut((neighbour, other, d))
                        .is_some_and(|support| {
                            *support -= 1;
                            *support == 0
                        });
                    if exhausted {
                        self.ban(neighbour, other, weights);
                    }
                }
            }
        }
        !self.contradiction
    }

    fn neighbour(&self, x1: i32, y1: i32, direction: usize) -> Option<usize> {
        let width = self.width as i32;
        let height = self.height as i32;
        let n = self.pattern_size as i32;
        let mut x2 = x1 + DX.get(direction).copied().unwrap_or(0);
        let mut y2 = y1 + DY.get(direction).copied().unwrap_or(0);

        if self.periodic {
            x2 = x2.rem_euclid(width);
            y2 = y2.rem_euclid(height);
        } else if x2 < 0 || y2 < 0 || x2 + n > width || y2 + n > height {
            return None;
        }
        Some(self.index(x2 as usize, y2 as usize))
    }
}
