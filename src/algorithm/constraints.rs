//! Resolved-cell capture and re-seeding across window rebuilds
//!
//! Capture and apply both go through world coordinates, so a snapshot taken
//! from one placement lines up exactly with any later origin or size. Cells
//! that fall outside the new bounds are dropped; that loss is expected.

use crate::algorithm::solver::SolverHandle;
use crate::io::error::Result;
use crate::spatial::grid::BoundingBox;
use std::collections::BTreeMap;
use tracing::trace;

/// Resolved tiles keyed by world coordinate
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedSnapshot {
    cells: BTreeMap<[i32; 2], usize>,
}

impl ResolvedSnapshot {
    /// Record every resolved cell of `handle` inside `region`
    ///
    /// `region` is the world rectangle whose minimum corner maps to solver
    /// cell `(0, 0)`. Undecided cells are skipped.
    ///
    /// # Errors
    ///
    /// Propagates sampling errors from the handle
    pub fn capture<H: SolverHandle>(handle: &H, region: &BoundingBox) -> Result<Self> {
        let mut cells = BTreeMap::new();
        for y in 0..region.height() {
            for x in 0..region.width() {
                if let Some(tile) = handle.sample(x, y)? {
                    let world = [region.min[0] + x as i32, region.min[1] + y as i32];
                    cells.insert(world, tile);
                }
            }
        }
        Ok(Self { cells })
    }

    /// Pre-seed `handle` with every captured cell inside `region`
    ///
    /// Returns the number of cells seeded.
    ///
    /// # Errors
    ///
    /// Propagates errors from `SolverHandle::constrain`
    pub fn apply<H: SolverHandle>(&self, handle: &mut H, region: &BoundingBox) -> Result<usize> {
        let mut seeded = 0;
        for (&world, &tile) in &self.cells {
            let Some([x, y]) = region.local(world) else {
                continue;
            };
            handle.constrain(x, y, tile)?;
            seeded += 1;
        }
        let dropped = self.cells.len() - seeded;
        if dropped > 0 {
            trace!(dropped, seeded, "constraints outside new window dropped");
        }
        Ok(seeded)
    }

    /// Record a single cell
    pub fn insert(&mut self, world: [i32; 2], tile: usize) {
        self.cells.insert(world, tile);
    }

    /// Captured tile at a world cell
    pub fn get(&self, world: [i32; 2]) -> Option<usize> {
        self.cells.get(&world).copied()
    }

    /// Number of captured cells
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether nothing was captured
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Captured cells in world-coordinate order
    pub fn iter(&self) -> impl Iterator<Item = ([i32; 2], usize)> + '_ {
        self.cells.iter().map(|(&world, &tile)| (world, tile))
    }
}
