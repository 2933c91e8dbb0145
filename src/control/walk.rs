//! Scripted viewpoint walks
//!
//! A walk is a list of legs such as `R40,UR20,I5,L10`: each leg holds a
//! direction for a number of ticks. Letters combine, so `UR` heads
//! diagonally; `I` idles in place.

use crate::io::configuration::{DEFAULT_MOVE_SPEED, DEFAULT_TICK_SECONDS};
use crate::io::error::{AlgorithmError, Result, invalid_parameter};
use std::str::FromStr;

/// One straight segment of a walk
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WalkLeg {
    /// Raw input direction (not normalized)
    pub direction: [f32; 2],
    /// Ticks spent on this leg
    pub ticks: usize,
}

/// Ordered walk legs
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WalkPlan {
    legs: Vec<WalkLeg>,
}

impl WalkPlan {
    /// Plan from explicit legs
    pub const fn new(legs: Vec<WalkLeg>) -> Self {
        Self { legs }
    }

    /// Legs in order
    pub fn legs(&self) -> &[WalkLeg] {
        &self.legs
    }

    /// Length of the whole walk in ticks
    pub fn total_ticks(&self) -> usize {
        self.legs.iter().map(|leg| leg.ticks).sum()
    }

    /// Input direction during `tick`, zero once the walk is over
    pub fn direction_at(&self, tick: usize) -> [f32; 2] {
        let mut start = 0;
        for leg in &self.legs {
            if tick < start + leg.ticks {
                return leg.direction;
            }
            start += leg.ticks;
        }
        [0.0, 0.0]
    }
}

fn parse_leg(token: &str) -> Result<WalkLeg> {
    let split = token
        .find(|c: char| c.is_ascii_digit())
        .ok_or_else(|| invalid_parameter("walk", &token, &"leg has no tick count"))?;
    let (letters, count) = token.split_at(split);
    if letters.is_empty() {
        return Err(invalid_parameter("walk", &token, &"leg has no direction"));
    }

    let mut direction = [0.0_f32, 0.0];
    for letter in letters.chars() {
        match letter.to_ascii_uppercase() {
            'R' => direction[0] += 1.0,
            'L' => direction[0] -= 1.0,
            'U' => direction[1] += 1.0,
            'D' => direction[1] -= 1.0,
            'I' => {}
            other => {
                return Err(invalid_parameter(
                    "walk",
                    &token,
                    &format!("unknown direction '{other}'"),
                ));
            }
        }
    }

    let ticks = count
        .parse::<usize>()
        .map_err(|e| invalid_parameter("walk", &token, &e))?;
    Ok(WalkLeg { direction, ticks })
}

impl FromStr for WalkPlan {
    type Err = AlgorithmError;

    fn from_str(s: &str) -> Result<Self> {
        let legs = s
            .split(',')
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .map(parse_leg)
            .collect::<Result<Vec<_>>>()?;
        if legs.is_empty() {
            return Err(invalid_parameter("walk", &s, &"walk has no legs"));
        }
        Ok(Self { legs })
    }
}

/// Viewpoint position and input direction for one tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WalkStep {
    /// Tick index, starting at 0
    pub tick: usize,
    /// Viewpoint after moving
    pub position: [f32; 2],
    /// Normalized input direction (zero when idle)
    pub direction: [f32; 2],
}

/// Moves a viewpoint along a plan at constant speed
#[derive(Debug, Clone)]
pub struct ViewpointWalker {
    plan: WalkPlan,
    position: [f32; 2],
    speed: f32,
    tick_seconds: f32,
    tick: usize,
}

impl ViewpointWalker {
    /// Walker starting at `start` with the default speed and tick length
    pub const fn new(plan: WalkPlan, start: [f32; 2]) -> Self {
        Self {
            plan,
            position: start,
            speed: DEFAULT_MOVE_SPEED,
            tick_seconds: DEFAULT_TICK_SECONDS,
            tick: 0,
        }
    }

    /// Override movement speed in cells per second
    #[must_use]
    pub const fn with_speed(mut self, speed: f32) -> Self {
        self.speed = speed;
        self
    }

    /// Override the simulated tick length
    #[must_use]
    pub const fn with_tick_seconds(mut self, tick_seconds: f32) -> Self {
        self.tick_seconds = tick_seconds;
        self
    }

    /// Current viewpoint position
    pub const fn position(&self) -> [f32; 2] {
        self.position
    }

    /// Ticks walked so far
    pub const fn ticks_walked(&self) -> usize {
        self.tick
    }

    /// The plan being walked
    pub const fn plan(&self) -> &WalkPlan {
        &self.plan
    }

    /// Advance one tick, or `None` once the plan is exhausted
    pub fn step(&mut self) -> Option<WalkStep> {
        if self.tick >= self.plan.total_ticks() {
            return None;
        }

        let raw = self.plan.direction_at(self.tick);
        let length = raw[0].hypot(raw[1]);
        let direction = if length > 0.0 {
            [raw[0] / length, raw[1] / length]
        } else {
            [0.0, 0.0]
        };

        let distance = self.speed * self.tick_seconds;
        self.position = [
            direction[0].mul_add(distance, self.position[0]),
            direction[1].mul_add(distance, self.position[1]),
        ];

        let step = WalkStep {
            tick: self.tick,
            position: self.position,
            direction,
        };
        self.tick += 1;
        Some(step)
    }
}

impl Iterator for ViewpointWalker {
    type Item = WalkStep;

    fn next(&mut self) -> Option<Self::Item> {
        self.step()
    }
}
