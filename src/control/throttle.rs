//! Slide cooldown
//!
//! Only slide-triggered regenerations are throttled. Extension checks fire on
//! cell crossings and never consult the throttle.

/// Tick counter suppressing slides after one occurs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Throttle {
    cooldown: u32,
    remaining: u32,
}

impl Throttle {
    /// Throttle skipping `cooldown` ticks after each slide (0 disables it)
    pub const fn new(cooldown: u32) -> Self {
        Self {
            cooldown,
            remaining: 0,
        }
    }

    /// Whether a slide may run this tick
    ///
    /// Called once per tick. While the counter is non-zero it is decremented
    /// and the slide check is skipped.
    pub const fn allow(&mut self) -> bool {
        if self.remaining > 0 {
            self.remaining -= 1;
            false
        } else {
            true
        }
    }

    /// Restart the cooldown after a slide
    pub const fn arm(&mut self) {
        self.remaining = self.cooldown;
    }

    /// Ticks left before slides resume
    pub const fn remaining(&self) -> u32 {
        self.remaining
    }

    /// Configured cooldown length
    pub const fn cooldown(&self) -> u32 {
        self.cooldown
    }
}
