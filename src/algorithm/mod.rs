/// Compact pattern sets for wave cells
pub mod bitset;
/// Resolved-cell capture and re-seeding across rebuilds
pub mod constraints;
/// Overlapping-model solver factory and handles
pub mod executor;
/// Single entry point for window regeneration
pub mod orchestrator;
/// Wave state and stack-based constraint propagation
pub mod propagation;
/// Minimum-entropy observation and weighted pattern choice
pub mod selection;
/// Solver contract used by the orchestrator
pub mod solver;
