//! Desired-origin computation and movement sampling

use crate::io::configuration::MIN_MOVE_SQR_MAGNITUDE;

/// Follows the viewpoint and turns it into window requests
///
/// The desired visible origin is `floor(position - size / 2)` per axis.
/// Extension checks are debounced to whole-cell crossings; sub-cell motion
/// never reaches the extension manager.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewpointTracker {
    half_span: f32,
    last_cell: [i32; 2],
    last_direction: [f32; 2],
}

impl ViewpointTracker {
    /// Tracker for a window showing `base_visible_size` cells, starting at
    /// `position`
    pub fn new(base_visible_size: usize, position: [f32; 2]) -> Self {
        Self {
            half_span: base_visible_size as f32 * 0.5,
            last_cell: Self::cell_of(position),
            last_direction: [0.0, 0.0],
        }
    }

    /// Visible-window origin centred on `position`
    pub fn desired_origin(&self, position: [f32; 2]) -> [i32; 2] {
        [
            (position[0] - self.half_span).floor() as i32,
            (position[1] - self.half_span).floor() as i32,
        ]
    }

    /// Discrete cell containing `position`
    pub fn cell_of(position: [f32; 2]) -> [i32; 2] {
        [position[0].floor() as i32, position[1].floor() as i32]
    }

    /// Store a movement sample, returning the normalized direction
    ///
    /// Returns `None` and keeps the previous direction while the input is
    /// idle.
    pub fn record_direction(&mut self, direction: [f32; 2]) -> Option<[f32; 2]> {
        let sqr = direction[0].mul_add(direction[0], direction[1] * direction[1]);
        if sqr < MIN_MOVE_SQR_MAGNITUDE {
            return None;
        }
        let length = sqr.sqrt();
        let normalized = [direction[0] / length, direction[1] / length];
        self.last_direction = normalized;
        Some(normalized)
    }

    /// Whether `position` lies in a different cell than last time
    pub fn crossed_cell(&mut self, position: [f32; 2]) -> bool {
        let cell = Self::cell_of(position);
        if cell == self.last_cell {
            return false;
        }
        self.last_cell = cell;
        true
    }

    /// Last non-idle normalized direction
    pub const fn last_direction(&self) -> [f32; 2] {
        self.last_direction
    }
}
