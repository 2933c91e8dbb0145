//! Host-loop driving of the generation window
//!
//! This module contains the per-tick control surface including:
//! - Desired-origin tracking and cell-crossing debounce
//! - The slide cooldown
//! - Scripted viewpoint walks standing in for camera and input
//! - The controller wiring both update phases to the orchestrator

/// Two-phase window controller
pub mod controller;
/// Slide cooldown
pub mod throttle;
/// Desired-origin and movement tracking
pub mod viewpoint;
/// Scripted viewpoint walks
pub mod walk;

pub use controller::{ControllerBuilder, WindowController};
