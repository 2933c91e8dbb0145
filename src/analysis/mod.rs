//! Corpus processing for the overlapping solver

/// Corpus loading and colour indexing
pub mod patterns;
/// Pattern weights and entropy baselines
pub mod weights;
