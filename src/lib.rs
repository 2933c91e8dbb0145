//! Endless procedural tile worlds around a moving viewpoint
//!
//! An overlapping-pattern solver fills a window that follows the viewpoint.
//! When the window slides, grows or shrinks, cells it already resolved are
//! re-seeded into the new solve so the world never shows a seam.

#![forbid(unsafe_code)]

/// Solver contract, overlapping-model solver and the regeneration orchestrator
pub mod algorithm;
/// Corpus loading and pattern weights
pub mod analysis;
/// Per-tick controller, viewpoint tracking and scripted walks
pub mod control;
/// Input/output operations, configuration and error handling
pub mod io;
/// Entropy and weighted-choice helpers
pub mod math;
/// Window geometry, extension state machine and pattern extraction
pub mod spatial;

pub use io::error::{AlgorithmError, Result};
