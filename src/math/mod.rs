//! Mathematical utilities for the solver

/// Entropy and weighted-choice helpers
pub mod probability;
