//! Input/output operations, configuration and error handling

/// Renderer contract and in-memory world canvas
pub mod canvas;
/// Command-line interface and walk processing
pub mod cli;
/// Window constants and runtime configuration
pub mod configuration;
/// Error types for the crate
pub mod error;
/// PNG export of the generated world
pub mod image;
/// Terminal progress reporting
pub mod progress;
/// Animated capture of the visible window
pub mod visualization;
