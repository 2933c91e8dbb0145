//! Spatial data structures for the generation window
//!
//! This module contains spatial-related functionality including:
//! - Window geometry and per-side extension flags
//! - The directional extension state machine
//! - Overlapping pattern extraction

/// Directional extension state machine
pub mod extension;
/// Window geometry in world coordinates
pub mod grid;
/// Overlapping pattern extraction utilities
pub mod tiles;

pub use grid::WindowState;
