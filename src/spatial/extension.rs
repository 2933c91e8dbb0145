//! Directional window extension
//!
//! Each side of the window is a two-state machine: `NotExtended` becomes
//! `Extended` when movement heads toward that side, and `Extended` returns to
//! `NotExtended` once the window has scrolled fully past the viewpoint's
//! visible span on that side. Transitions are pure functions from the current
//! window to a new placement; applying them is the orchestrator's job.
//!
//! Opposite sides of one axis are never extended together. Heading toward a
//! side whose opposite carries the extension swaps it over in one step, so an
//! axis is always either base size or base + 1.

use crate::io::configuration::EXTENSION_THRESHOLD;
use crate::spatial::grid::{Placement, Side, WindowState};

/// State of a single side
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SideState {
    /// The side sits at its base position
    NotExtended,
    /// The side carries one extra cell
    Extended,
}

impl SideState {
    /// State of `side` in the given window
    pub const fn of(window: &WindowState, side: Side) -> Self {
        if window.is_extended(side) {
            Self::Extended
        } else {
            Self::NotExtended
        }
    }
}

/// A change to the extension flags of one axis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtensionTransition {
    /// Grow the window by one cell on this side
    Extend(Side),
    /// Drop the extra cell from this side
    Retract(Side),
    /// Move the extension of one axis from `retract` to `extend`
    Swap {
        /// Side gaining the extra cell
        extend: Side,
        /// Opposite side losing it
        retract: Side,
    },
}

impl ExtensionTransition {
    /// Placement after this transition
    ///
    /// Negative sides move the origin so every retained cell keeps its world
    /// position: extending left shifts the origin one cell left, retracting
    /// left shifts it back.
    pub fn apply(self, placement: Placement) -> Placement {
        match self {
            Self::Extend(side) => shift(placement, side, true),
            Self::Retract(side) => shift(placement, side, false),
            Self::Swap { extend, retract } => shift(shift(placement, retract, false), extend, true),
        }
    }
}

fn shift(mut placement: Placement, side: Side, extend: bool) -> Placement {
    if placement.extensions.is_extended(side) == extend {
        return placement;
    }
    let step = if extend { -1 } else { 1 };
    match side {
        Side::Left => placement.origin[0] += step,
        Side::Down => placement.origin[1] += step,
        Side::Right | Side::Up => {}
    }
    placement.extensions.set(side, extend);
    placement
}

/// Component of `direction` pointing toward `side`
const fn component_toward(direction: [f32; 2], side: Side) -> f32 {
    match side {
        Side::Right => direction[0],
        Side::Left => -direction[0],
        Side::Up => direction[1],
        Side::Down => -direction[1],
    }
}

/// Threshold and view span used to drive the per-side state machines
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectionalExtension {
    threshold: f32,
    half_span: f32,
}

impl DirectionalExtension {
    /// Manager for a viewpoint that sees `base_visible_size` cells per axis
    pub fn new(base_visible_size: usize) -> Self {
        Self {
            threshold: EXTENSION_THRESHOLD,
            half_span: base_visible_size as f32 * 0.5,
        }
    }

    /// `NotExtended -> Extended` for `side`, if movement calls for it
    ///
    /// Fires when the direction's component toward `side` exceeds the
    /// threshold and `side` isn't extended yet. Returns a swap when the
    /// opposite side holds the axis extension.
    pub fn extend_transition(
        &self,
        window: &WindowState,
        side: Side,
        direction: [f32; 2],
    ) -> Option<ExtensionTransition> {
        if component_toward(direction, side) <= self.threshold {
            return None;
        }
        match (SideState::of(window, side), SideState::of(window, side.opposite())) {
            (SideState::Extended, _) => None,
            (SideState::NotExtended, SideState::Extended) => Some(ExtensionTransition::Swap {
                extend: side,
                retract: side.opposite(),
            }),
            (SideState::NotExtended, SideState::NotExtended) => {
                Some(ExtensionTransition::Extend(side))
            }
        }
    }

    /// `Extended -> NotExtended` for `side`, once the window's far edge on
    /// that side has left the viewpoint's visible span
    pub fn retract_transition(
        &self,
        window: &WindowState,
        side: Side,
        viewpoint: [f32; 2],
    ) -> Option<ExtensionTransition> {
        if SideState::of(window, side) == SideState::NotExtended {
            return None;
        }

        let origin = window.origin();
        let out_of_view = match side {
            Side::Right => {
                ((origin[0] + window.visible_width() as i32) as f32) < viewpoint[0] - self.half_span
            }
            Side::Left => (origin[0] as f32) > viewpoint[0] + self.half_span,
            Side::Up => {
                ((origin[1] + window.visible_height() as i32) as f32) < viewpoint[1] - self.half_span
            }
            Side::Down => (origin[1] as f32) > viewpoint[1] + self.half_span,
        };

        out_of_view.then_some(ExtensionTransition::Retract(side))
    }
}
