//! Solver contract used by the regeneration orchestrator
//!
//! The orchestrator never looks inside a solver. It creates one handle per
//! window geometry, seeds it, runs it with a budget and samples the result.
//! Handles are never resized: a new geometry always means a new handle, which
//! costs O(window area) per regeneration.

use crate::io::configuration::WindowConfig;
use crate::io::error::Result;

/// Outcome of a bounded solver run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// Every cell holds a single value
    Resolved,
    /// Some cell has no value left; the handle is dead
    Contradiction,
    /// The iteration budget ran out before either of the above
    Incomplete,
}

/// Fixed solver parameters shared by every handle a factory creates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SolverSettings {
    /// Overlapping pattern size N
    pub pattern_size: usize,
    /// Whether the corpus wraps when extracting patterns
    pub periodic_input: bool,
    /// Whether the solver grid wraps at its edges
    pub periodic_output: bool,
    /// Rotation/reflection variants per pattern
    pub symmetry: usize,
    /// Pattern index pinned to the bottom row (0 = none)
    pub foundation: usize,
}

impl From<&WindowConfig> for SolverSettings {
    fn from(config: &WindowConfig) -> Self {
        Self {
            pattern_size: config.pattern_size,
            periodic_input: config.periodic_input,
            periodic_output: config.periodic_output,
            symmetry: config.symmetry,
            foundation: config.foundation,
        }
    }
}

/// A single-use solver instance bound to one grid size
pub trait SolverHandle {
    /// Grid width in cells, overlap band included
    fn width(&self) -> usize;

    /// Grid height in cells, overlap band included
    fn height(&self) -> usize;

    /// Pre-seed a cell with a tile value
    ///
    /// # Errors
    ///
    /// Returns an error if the cell is out of bounds, the tile is unknown, or
    /// the handle has already started running
    fn constrain(&mut self, x: usize, y: usize, tile: usize) -> Result<()>;

    /// Run for at most `iteration_budget` observations (0 = unbounded)
    ///
    /// Running an `Incomplete` handle again continues where it stopped.
    fn run(&mut self, seed: u64, iteration_budget: usize) -> RunOutcome;

    /// Resolved tile at a cell, or `None` while it is still undecided
    ///
    /// # Errors
    ///
    /// Returns `SampleOutOfBounds` for coordinates outside the handle
    fn sample(&self, x: usize, y: usize) -> Result<Option<usize>>;
}

/// Builds fresh solver handles for a requested geometry
pub trait SolverFactory {
    /// Handle type produced by this factory
    type Handle: SolverHandle;

    /// Create an unsolved handle of the given size
    ///
    /// # Errors
    ///
    /// Returns an error if the geometry is unusable for this solver
    fn create(&self, width: usize, height: usize) -> Result<Self::Handle>;
}
