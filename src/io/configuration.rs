//! Window constants and runtime configuration defaults

use crate::io::error::{Result, invalid_parameter};

/// Visible window edge length in cells
pub const DEFAULT_BASE_VISIBLE_SIZE: usize = 16;

/// Edge length of the overlapping patterns read from the corpus
pub const DEFAULT_PATTERN_SIZE: usize = 2;

/// Number of rotation/reflection variants folded into each pattern
pub const DEFAULT_SYMMETRY: usize = 1;

/// Largest meaningful symmetry count (4 rotations x 2 reflections)
pub const MAX_SYMMETRY: usize = 8;

/// Foundation pattern index (0 disables the foundation row)
pub const DEFAULT_FOUNDATION: usize = 0;

/// Fixed seed for reproducible generation
pub const DEFAULT_SEED: u64 = 0;

/// Observation budget per solver run (0 = unbounded)
pub const DEFAULT_ITERATION_BUDGET: usize = 0;

/// Ticks to suppress slide regeneration after one occurs (0 = no throttle)
pub const DEFAULT_COOLDOWN_TICKS: u32 = 0;

// Component of a unit direction needed before a side is extended
/// Directional extension threshold
pub const EXTENSION_THRESHOLD: f32 = 0.2;

/// Squared input magnitude below which the viewpoint counts as idle
pub const MIN_MOVE_SQR_MAGNITUDE: f32 = 0.0001;

/// Viewpoint speed in cells per second used by the walk simulation
pub const DEFAULT_MOVE_SPEED: f32 = 5.0;

/// Simulated tick length in seconds
pub const DEFAULT_TICK_SECONDS: f32 = 1.0 / 60.0;

/// Default scripted walk for the command-line driver
pub const DEFAULT_WALK: &str = "R120,U60,L90,D30";

// Noise added to cell entropy so ties break by seed rather than scan order
/// Entropy tie-break noise scale
pub const ENTROPY_NOISE: f64 = 1e-6;

// Output settings
/// Suffix added to the world image filename
pub const WORLD_SUFFIX: &str = "_world";
/// Suffix added to the viewpoint animation filename
pub const VISUALIZATION_SUFFIX: &str = "_walk";
/// Delay between GIF animation frames
pub const GIF_FRAME_DELAY_MS: u32 = 50;
/// Ticks between captured animation frames
pub const FRAME_INTERVAL_TICKS: usize = 4;
/// Colour drawn for cells nothing was presented to
pub const UNSOLVED_COLOR: [u8; 4] = [0, 0, 0, 0];

/// Runtime configuration surface for the window controller
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WindowConfig {
    /// Visible window edge length in cells
    pub base_visible_size: usize,
    /// Overlapping pattern size N
    pub pattern_size: usize,
    /// Whether the corpus wraps when extracting patterns
    pub periodic_input: bool,
    /// Whether the generated window wraps at its edges
    pub periodic_output: bool,
    /// Rotation/reflection variants per pattern (1..=8)
    pub symmetry: usize,
    /// Pattern index pinned to the bottom row (0 = none)
    pub foundation: usize,
    /// Seed handed to every solver run
    pub seed: u64,
    /// Observation budget per solver run (0 = unbounded)
    pub iteration_budget: usize,
    /// Slide cooldown in ticks
    pub cooldown_ticks: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            base_visible_size: DEFAULT_BASE_VISIBLE_SIZE,
            pattern_size: DEFAULT_PATTERN_SIZE,
            periodic_input: false,
            periodic_output: false,
            symmetry: DEFAULT_SYMMETRY,
            foundation: DEFAULT_FOUNDATION,
            seed: DEFAULT_SEED,
            iteration_budget: DEFAULT_ITERATION_BUDGET,
            cooldown_ticks: DEFAULT_COOLDOWN_TICKS,
        }
    }
}

impl WindowConfig {
    /// Width of the overlap band that keeps neighbouring placements consistent
    pub const fn overlap(&self) -> usize {
        self.pattern_size.saturating_sub(1)
    }

    /// Solver grid edge length before any extension
    pub const fn base_dimension(&self) -> usize {
        self.base_visible_size + self.overlap()
    }

    /// Check every field against its documented range
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` for a zero visible size or pattern size, or
    /// a symmetry count outside `1..=8`
    pub fn validate(&self) -> Result<()> {
        if self.base_visible_size == 0 {
            return Err(invalid_parameter(
                "base_visible_size",
                &self.base_visible_size,
                &"window must show at least one cell",
            ));
        }
        if self.pattern_size == 0 {
            return Err(invalid_parameter(
                "pattern_size",
                &self.pattern_size,
                &"patterns must be at least 1x1",
            ));
        }
        if self.symmetry == 0 || self.symmetry > MAX_SYMMETRY {
            return Err(invalid_parameter(
                "symmetry",
                &self.symmetry,
                &format!("must be between 1 and {MAX_SYMMETRY}"),
            ));
        }
        Ok(())
    }
}
