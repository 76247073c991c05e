//! Scoring module - rally tally and re-serve after a miss

use bevy::prelude::*;
use serde::Serialize;

use crate::ball::{Ball, BallDirection};
use crate::constants::{OUT_OF_PLAY_X, SERVE_DIRECTION};
use crate::events::{EventBus, GameEvent};

/// Rally statistics for the current session
#[derive(Resource, Default, Debug, Clone, PartialEq, Serialize)]
pub struct Rally {
    /// Player returns since the last serve
    pub current: u32,
    /// Longest rally this session
    pub longest: u32,
    /// Player returns this session
    pub returns: u32,
    pub serves: u32,
    pub misses: u32,
    pub wall_bounces: u32,
    pub color_changes: u32,
}

impl Rally {
    /// Count a player paddle return
    pub fn record_return(&mut self) {
        self.current += 1;
        self.returns += 1;
        self.longest = self.longest.max(self.current);
    }

    /// Count a miss and end the rally. Returns the rally length that just ended.
    pub fn record_miss(&mut self) -> u32 {
        self.misses += 1;
        std::mem::take(&mut self.current)
    }
}

/// True once the ball has passed the back of the player paddle heading left
pub fn is_out_of_play(position: Vec3, direction: Vec3) -> bool {
    position.x < OUT_OF_PLAY_X && direction.x < 0.0
}

/// Put the ball back at the center with the serve direction
pub fn serve(transform: &mut Transform, direction: &mut BallDirection) {
    transform.translation = Vec3::ZERO;
    direction.0 = SERVE_DIRECTION;
}

/// Emit the opening serve once the ball exists
pub fn initial_serve(mut rally: ResMut<Rally>, mut event_bus: ResMut<EventBus>) {
    rally.serves += 1;
    event_bus.emit(GameEvent::Serve);
}

/// Re-serve when the ball gets past the player.
/// Runs in FixedUpdate after the ball advances.
pub fn check_out_of_play(
    mut rally: ResMut<Rally>,
    mut event_bus: ResMut<EventBus>,
    mut ball_query: Query<(&mut Transform, &mut BallDirection), With<Ball>>,
) {
    for (mut transform, mut direction) in &mut ball_query {
        if !is_out_of_play(transform.translation, direction.0) {
            continue;
        }

        let ended = rally.record_miss();
        info!("Missed after {} returns (best {})", ended, rally.longest);

        serve(&mut transform, &mut direction);
        rally.serves += 1;
        event_bus.emit_all([GameEvent::Miss { rally: ended }, GameEvent::Serve]);
    }
}
