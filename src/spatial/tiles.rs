//! Overlapping pattern extraction
//!
//! Slides an N×N window across the corpus, expands each window into its
//! rotation/reflection variants and merges duplicates. The number of times a
//! pattern was seen becomes its weight during generation.

use crate::analysis::patterns::Corpus;
use crate::io::configuration::MAX_SYMMETRY;
use crate::io::error::{Result, invalid_parameter, invalid_source};
use std::collections::HashMap;

/// An N×N block of colour indices stored row-major (`x + y * N`)
pub type Pattern = Vec<usize>;

/// Deduplicated patterns with occurrence counts
#[derive(Debug, Clone)]
pub struct PatternCatalog {
    size: usize,
    patterns: Vec<Pattern>,
    counts: Vec<usize>,
}

impl PatternCatalog {
    /// Extract every N×N pattern of the corpus
    ///
    /// With `periodic_input` the corpus wraps so every cell anchors a
    /// pattern; otherwise only windows fully inside the corpus are read.
    /// Each window contributes its first `symmetry` variants in the order
    /// identity, reflection, rotation, rotation+reflection, and so on.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `size` is zero or `symmetry` is outside `1..=8`
    /// - A non-periodic corpus is smaller than the pattern size
    pub fn extract(
        corpus: &Corpus,
        size: usize,
        periodic_input: bool,
        symmetry: usize,
    ) -> Result<Self> {
        if size == 0 {
            return Err(invalid_parameter(
                "pattern_size",
                &size,
                &"patterns must be at least 1x1",
            ));
        }
        if symmetry == 0 || symmetry > MAX_SYMMETRY {
            return Err(invalid_parameter(
                "symmetry",
                &symmetry,
                &format!("must be between 1 and {MAX_SYMMETRY}"),
            ));
        }

        let (width, height) = (corpus.width(), corpus.height());
        if !periodic_input && (size > width || size > height) {
            return Err(invalid_source(&format!(
                "{width}x{height} corpus is smaller than the {size}x{size} pattern size"
            )));
        }

        let x_max = if periodic_input { width } else { width - size + 1 };
        let y_max = if periodic_input { height } else { height - size + 1 };

        let mut patterns = Vec::new();
        let mut counts = Vec::new();
        let mut index: HashMap<Pattern, usize> = HashMap::new();

        for y in 0..y_max {
            for x in 0..x_max {
                let base = build(size, |dx, dy| corpus.wrapped(x + dx, y + dy));
                for variant in variants(&base, size).into_iter().take(symmetry) {
                    if let Some(&existing) = index.get(&variant) {
                        if let Some(count) = counts.get_mut(existing) {
                            *count += 1;
                        }
                    } else {
                        index.insert(variant.clone(), patterns.len());
                        patterns.push(variant);
                        counts.push(1);
                    }
                }
            }
        }

        Ok(Self {
            size,
            patterns,
            counts,
        })
    }

    /// Pattern edge length N
    pub const fn size(&self) -> usize {
        self.size
    }

    /// Number of distinct patterns
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// Whether no pattern was extracted
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// All distinct patterns in discovery order
    pub fn patterns(&self) -> &[Pattern] {
        &self.patterns
    }

    /// Occurrence count for each pattern
    pub fn counts(&self) -> &[usize] {
        &self.counts
    }

    /// Colour at the anchor (bottom-left) cell of a pattern
    pub fn anchor_colour(&self, pattern: usize) -> Option<usize> {
        self.patterns.get(pattern).and_then(|p| p.first()).copied()
    }

    /// Whether pattern `b` shifted by `(dx, dy)` agrees with `a` on their overlap
    pub fn agrees(&self, a: usize, b: usize, dx: i32, dy: i32) -> bool {
        match (self.patterns.get(a), self.patterns.get(b)) {
            (Some(first), Some(second)) => agrees(first, second, dx, dy, self.size),
            _ => false,
        }
    }
}

/// Build a pattern cell by cell from `f(x, y)`
fn build(size: usize, f: impl Fn(usize, usize) -> usize) -> Pattern {
    let mut pattern = vec![0; size * size];
    for y in 0..size {
        for x in 0..size {
            if let Some(cell) = pattern.get_mut(x + y * size) {
                *cell = f(x, y);
            }
        }
    }
    pattern
}

fn cell(pattern: &[usize], x: usize, y: usize, size: usize) -> usize {
    pattern.get(x + y * size).copied().unwrap_or(0)
}

fn rotate(pattern: &[usize], size: usize) -> Pattern {
    build(size, |x, y| cell(pattern, size - 1 - y, x, size))
}

fn reflect(pattern: &[usize], size: usize) -> Pattern {
    build(size, |x, y| cell(pattern, size - 1 - x, y, size))
}

/// The eight dihedral variants of a pattern
fn variants(base: &[usize], size: usize) -> Vec<Pattern> {
    let mut out = Vec::with_capacity(MAX_SYMMETRY);
    let mut current = base.to_vec();
    for _ in 0..4 {
        let mirrored = reflect(&current, size);
        let next = rotate(&current, size);
        out.push(current);
        out.push(mirrored);
        current = next;
    }
    out
}

/// Overlap test for two patterns offset by `(dx, dy)`
pub fn agrees(a: &[usize], b: &[usize], dx: i32, dy: i32, size: usize) -> bool {
    let n = size as i32;
    let (x_min, x_max) = if dx < 0 { (0, dx + n) } else { (dx, n) };
    let (y_min, y_max) = if dy < 0 { (0, dy + n) } else { (dy, n) };

    for y in y_min..y_max {
        for x in x_min..x_max {
            let left = a.get((x + n * y) as usize);
            let right = b.get((x - dx + n * (y - dy)) as usize);
            if left != right {
                return false;
            }
        }
    }
    true
}
