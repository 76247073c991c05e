//! Ball-related components and resources

use bevy::prelude::*;

use crate::constants::{BALL_SPEED, DEFAULT_TICK_RATE, SERVE_DIRECTION};

/// Marker for the ball entity
#[derive(Component)]
pub struct Ball;

/// Per-tick displacement direction, scaled by `BallSpeed::step`.
/// The z component is carried but always zero on the table plane.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct BallDirection(pub Vec3);

impl Default for BallDirection {
    fn default() -> Self {
        Self(SERVE_DIRECTION)
    }
}

/// Ball speed and the tick rate it is divided over
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct BallSpeed {
    /// World units per second along a unit direction component
    pub units_per_second: f32,
    /// Fixed update frequency in Hz
    pub tick_rate: f64,
}

impl Default for BallSpeed {
    fn default() -> Self {
        Self {
            units_per_second: BALL_SPEED,
            tick_rate: DEFAULT_TICK_RATE,
        }
    }
}

impl BallSpeed {
    /// Distance travelled per tick for each unit of direction
    pub fn step(&self) -> f32 {
        if self.tick_rate <= 0.0 {
            return 0.0;
        }
        (self.units_per_second as f64 / self.tick_rate) as f32
    }
}
