//! Paddle components

use bevy::prelude::*;

/// Marker for the pointer-driven paddle on the left
#[derive(Component)]
pub struct PlayerPaddle;

/// Marker for the ball-tracking paddle on the right
#[derive(Component)]
pub struct CpuPaddle;
