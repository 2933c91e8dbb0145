use bitvec::prelude::*;
use std::fmt;

/// Fixed-size bitset of the patterns still possible at one cell
///
/// Indices are 0-based pattern indices into the `PatternCatalog`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PatternSet {
    bits: BitVec,
}

impl PatternSet {
    /// Create a set with no patterns present
    pub fn new(pattern_count: usize) -> Self {
        Self {
            bits: bitvec![0; pattern_count],
        }
    }

    /// Create a set containing every pattern
    pub fn all(pattern_count: usize) -> Self {
        Self {
            bits: bitvec![1; pattern_count],
        }
    }

    /// Insert a pattern index
    pub fn insert(&mut self, pattern: usize) {
        if pattern < self.bits.len() {
            self.bits.set(pattern, true);
        }
    }

    /// Remove a pattern index, returning whether it was present
    pub fn remove(&mut self, pattern: usize) -> bool {
        if self.contains(pattern) {
            self.bits.set(pattern, false);
            true
        } else {
            false
        }
    }

    /// Test pattern membership
    pub fn contains(&self, pattern: usize) -> bool {
        self.bits.get(pattern).as_deref() == Some(&true)
    }

    /// Test if no patterns are present
    pub fn is_empty(&self) -> bool {
        self.bits.not_any()
    }

    /// Count patterns in the set
    pub fn count(&self) -> usize {
        self.bits.count_ones()
    }

    /// Iterate over present pattern indices in ascending order
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.bits.iter_ones()
    }

    /// Extract all pattern indices as a vector
    pub fn to_vec(&self) -> Vec<usize> {
        self.iter().collect()
    }
}

impl fmt::Display for PatternSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PatternSet({} patterns: {:?})", self.count(), self.to_vec())
    }
}
