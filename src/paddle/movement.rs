//! Paddle movement systems

use bevy::prelude::*;

use crate::ball::Ball;
use crate::constants::{CPU_X, PLAYER_X};
use crate::input::PointerInput;
use crate::paddle::components::*;

/// Place the player paddle at the pointer height.
/// Runs in FixedUpdate before the ball advances.
pub fn move_player_paddle(
    pointer: Res<PointerInput>,
    mut paddle_query: Query<&mut Transform, With<PlayerPaddle>>,
) {
    for mut transform in &mut paddle_query {
        transform.translation = Vec3::new(PLAYER_X, pointer.table_y, 0.0);
    }
}

/// Keep the CPU paddle level with the ball.
/// Runs in FixedUpdate after the ball advances.
pub fn cpu_follow_ball(
    ball_query: Query<&Transform, (With<Ball>, Without<CpuPaddle>)>,
    mut paddle_query: Query<&mut Transform, With<CpuPaddle>>,
) {
    let Ok(ball_transform) = ball_query.single() else {
        return;
    };
    for mut transform in &mut paddle_query {
        transform.translation = Vec3::new(CPU_X, ball_transform.translation.y, 0.0);
    }
}
