//! Renderer contract and an in-memory world canvas
//!
//! The orchestrator hands each resolved cell to a `Renderer` exactly once per
//! window placement and calls `clear` when a placement is replaced.
//! `TileCanvas` records what it was given so the world can be exported or
//! inspected afterwards.

use crate::io::error::{AlgorithmError, Result};
use crate::spatial::grid::BoundingBox;
use std::collections::HashMap;

/// Receives resolved cells in world coordinates
pub trait Renderer {
    /// Instantiate the visual for one resolved cell
    ///
    /// # Errors
    ///
    /// Returns `InvalidTileIndex` if the tile has no visual
    fn present(&mut self, x: i32, y: i32, tile: usize) -> Result<()>;

    /// Drop every visual belonging to the current placement
    fn clear(&mut self);
}

/// World map of presented tiles
///
/// `world` keeps the latest tile ever presented at each cell so regions the
/// window has left remain visible in exports. `visible` holds only the
/// current placement.
#[derive(Debug, Clone, Default)]
pub struct TileCanvas {
    tile_count: usize,
    world: HashMap<[i32; 2], usize>,
    visible: HashMap<[i32; 2], usize>,
    /// Presents per cell within the current placement
    present_counts: HashMap<[i32; 2], usize>,
    placements: usize,
    presented: usize,
    duplicates: usize,
}

impl TileCanvas {
    /// Canvas accepting tile indices below `tile_count`
    pub fn new(tile_count: usize) -> Self {
        Self {
            tile_count,
            ..Self::default()
        }
    }

    /// Latest tile ever presented at each world cell
    pub const fn world(&self) -> &HashMap<[i32; 2], usize> {
        &self.world
    }

    /// Tiles presented for the current placement
    pub const fn visible(&self) -> &HashMap<[i32; 2], usize> {
        &self.visible
    }

    /// Tile at a world cell in the current placement
    pub fn visible_tile(&self, pos: [i32; 2]) -> Option<usize> {
        self.visible.get(&pos).copied()
    }

    /// Number of placements cleared so far
    pub const fn placements(&self) -> usize {
        self.placements
    }

    /// Total presents across all placements
    pub const fn presented(&self) -> usize {
        self.presented
    }

    /// Presents that hit a cell already presented in the same placement
    pub const fn duplicates(&self) -> usize {
        self.duplicates
    }

    /// Bounding box of every world cell ever presented
    pub fn bounds(&self) -> Option<BoundingBox> {
        let mut cells = self.world.keys();
        let first = *cells.next()?;
        let mut bounds = BoundingBox {
            min: first,
            max: first,
        };
        for pos in cells {
            bounds.min = [bounds.min[0].min(pos[0]), bounds.min[1].min(pos[1])];
            bounds.max = [bounds.max[0].max(pos[0]), bounds.max[1].max(pos[1])];
        }
        Some(bounds)
    }
}

impl Renderer for TileCanvas {
    fn present(&mut self, x: i32, y: i32, tile: usize) -> Result<()> {
        if tile >= self.tile_count {
            return Err(AlgorithmError::InvalidTileIndex {
                index: tile,
                max_tiles: self.tile_count,
            });
        }

        let count = self.present_counts.entry([x, y]).or_insert(0);
        *count += 1;
        if *count > 1 {
            self.duplicates += 1;
        }

        self.world.insert([x, y], tile);
        self.visible.insert([x, y], tile);
        self.presented += 1;
        Ok(())
    }

    fn clear(&mut self) {
        self.visible.clear();
        self.present_counts.clear();
        self.placements += 1;
    }
}
