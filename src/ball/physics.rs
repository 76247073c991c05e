//! Ball kinematics: per-tick advance with axis-aligned reflection

use bevy::prelude::*;

use crate::ball::components::*;
use crate::constants::*;
use crate::events::{EventBus, GameEvent, Wall};
use crate::glow::GlowColors;
use crate::helpers::{ReflectAxis, reflect};
use crate::paddle::PlayerPaddle;
use crate::scoring::Rally;

/// Horizontal contact that flips the X direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HorizontalContact {
    /// Returned by the player paddle
    PlayerPaddle,
    /// Reached the right edge of the table (CPU side always returns)
    RightBoundary,
}

/// Vertical contact that flips the Y direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerticalContact {
    TopWall,
    BottomWall,
}

/// Result of advancing the ball by one tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BallStep {
    pub position: Vec3,
    pub direction: Vec3,
    pub horizontal: Option<HorizontalContact>,
    pub vertical: Option<VerticalContact>,
}

/// Advance the ball one tick.
///
/// Contacts are tested against the look-ahead position `position + step * direction`.
/// The X axis is resolved first, then the ball moves along the (possibly flipped)
/// X direction; the Y axis is resolved the same way from the same look-ahead.
/// The right boundary reflects unconditionally; the left side only reflects
/// when the player paddle is within reach and the ball is moving left.
pub fn step_ball(position: Vec3, direction: Vec3, paddle_y: f32, step: f32) -> BallStep {
    let mut direction = direction;
    let next_x = position.x + step * direction.x;
    let next_y = position.y + step * direction.y;

    let horizontal = if next_x < -(TABLE_WIDTH / 2.0) + BALL_RADIUS
        && (next_y - paddle_y).abs() <= PADDLE_REACH
        && direction.x < 0.0
    {
        Some(HorizontalContact::PlayerPaddle)
    } else if next_x > TABLE_WIDTH / 2.0 - BALL_RADIUS {
        Some(HorizontalContact::RightBoundary)
    } else {
        None
    };
    if horizontal.is_some() {
        reflect(&mut direction, ReflectAxis::Vertical);
    }
    let x = position.x + step * direction.x;

    let vertical = if next_y < -(TABLE_HEIGHT / 2.0) {
        Some(VerticalContact::BottomWall)
    } else if next_y > TABLE_HEIGHT / 2.0 {
        Some(VerticalContact::TopWall)
    } else {
        None
    };
    if vertical.is_some() {
        reflect(&mut direction, ReflectAxis::Horizontal);
    }
    let y = position.y + step * direction.y;

    BallStep {
        position: Vec3::new(x, y, 0.0),
        direction,
        horizontal,
        vertical,
    }
}

/// Advance the ball, reflect on contact, and cycle the glow color on horizontal hits.
/// Runs in FixedUpdate after the player paddle has been placed.
pub fn advance_ball(
    speed: Res<BallSpeed>,
    mut glow: ResMut<GlowColors>,
    mut rally: ResMut<Rally>,
    mut event_bus: ResMut<EventBus>,
    paddle_query: Query<&Transform, (With<PlayerPaddle>, Without<Ball>)>,
    mut ball_query: Query<(&mut Transform, &mut BallDirection), With<Ball>>,
) {
    // Without a paddle the ball can never be returned on the left
    let paddle_y = paddle_query
        .single()
        .map(|t| t.translation.y)
        .unwrap_or(f32::INFINITY);
    let step = speed.step();

    for (mut transform, mut direction) in &mut ball_query {
        let result = step_ball(transform.translation, direction.0, paddle_y, step);
        transform.translation = result.position;
        direction.0 = result.direction;

        if let Some(contact) = result.horizontal {
            match contact {
                HorizontalContact::PlayerPaddle => {
                    rally.record_return();
                    event_bus.emit(GameEvent::PaddleReturn {
                        rally: rally.current,
                    });
                }
                HorizontalContact::RightBoundary => {
                    event_bus.emit(GameEvent::BoundaryBounce);
                }
            }
            let index = glow.advance();
            rally.color_changes += 1;
            event_bus.emit(GameEvent::ColorChange { index });
        }

        if let Some(contact) = result.vertical {
            rally.wall_bounces += 1;
            let wall = match contact {
                VerticalContact::TopWall => Wall::Top,
                VerticalContact::BottomWall => Wall::Bottom,
            };
            event_bus.emit(GameEvent::WallBounce { wall });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::helpers::on_table;

    const STEP: f32 = 30.0 / 144.0;

    #[test]
    fn test_free_flight_moves_by_step() {
        let result = step_ball(Vec3::ZERO, SERVE_DIRECTION, 0.0, STEP);
        assert_eq!(result.horizontal, None);
        assert_eq!(result.vertical, None);
        assert_eq!(result.direction, SERVE_DIRECTION);
        assert!((result.position.x - STEP).abs() < 1e-6);
        assert!((result.position.y - STEP * 0.5).abs() < 1e-6);
        assert_eq!(result.position.z, 0.0);
    }

    #[test]
    fn test_top_wall_negates_vertical() {
        let pos = Vec3::new(0.0, TABLE_HEIGHT / 2.0 - 0.05, 0.0);
        let result = step_ball(pos, Vec3::new(1.0, 0.5, 0.0), 0.0, STEP);
        assert_eq!(result.vertical, Some(VerticalContact::TopWall));
        assert_eq!(result.direction.y, -0.5);
        assert_eq!(result.direction.x, 1.0);
        assert!(result.position.y < pos.y);
    }

    #[test]
    fn test_bottom_wall_negates_vertical() {
        let pos = Vec3::new(2.0, -(TABLE_HEIGHT / 2.0) + 0.05, 0.0);
        let result = step_ball(pos, Vec3::new(-1.0, -0.5, 0.0), 0.0, STEP);
        assert_eq!(result.vertical, Some(VerticalContact::BottomWall));
        assert_eq!(result.direction, Vec3::new(-1.0, 0.5, 0.0));
        assert!(result.position.y > pos.y);
    }

    #[test]
    fn test_aligned_paddle_returns_ball() {
        let pos = Vec3::new(-(TABLE_WIDTH / 2.0) + BALL_RADIUS + 0.1, 1.0, 0.0);
        let result = step_ball(pos, Vec3::new(-1.0, 0.5, 0.0), 1.0, STEP);
        assert_eq!(result.horizontal, Some(HorizontalContact::PlayerPaddle));
        assert_eq!(result.direction.x, 1.0);
        assert!(result.position.x > pos.x);
    }

    #[test]
    fn test_paddle_reach_edge_is_inclusive() {
        let pos = Vec3::new(-(TABLE_WIDTH / 2.0) + BALL_RADIUS + 0.1, 0.0, 0.0);
        let dir = Vec3::new(-1.0, 0.0, 0.0);
        let result = step_ball(pos, dir, PADDLE_REACH, STEP);
        assert_eq!(result.horizontal, Some(HorizontalContact::PlayerPaddle));

        let result = step_ball(pos, dir, PADDLE_REACH + 0.01, STEP);
        assert_eq!(result.horizontal, None);
    }

    #[test]
    fn test_misaligned_paddle_lets_ball_through() {
        let pos = Vec3::new(-(TABLE_WIDTH / 2.0) + BALL_RADIUS + 0.1, 3.0, 0.0);
        let result = step_ball(pos, Vec3::new(-1.0, 0.0, 0.0), -3.0, STEP);
        assert_eq!(result.horizontal, None);
        assert_eq!(result.direction.x, -1.0);
        assert!(result.position.x < pos.x);
    }

    #[test]
    fn test_paddle_ignores_ball_moving_right() {
        // Ball already past the paddle line but heading back onto the table
        let pos = Vec3::new(-(TABLE_WIDTH / 2.0), 0.0, 0.0);
        let result = step_ball(pos, Vec3::new(1.0, 0.0, 0.0), 0.0, STEP);
        assert_eq!(result.horizontal, None);
        assert_eq!(result.direction.x, 1.0);
    }

    #[test]
    fn test_right_boundary_always_reflects() {
        let pos = Vec3::new(TABLE_WIDTH / 2.0 - BALL_RADIUS - 0.05, -4.0, 0.0);
        // Paddle far away on the other side: alignment is irrelevant on the right
        let result = step_ball(pos, Vec3::new(1.0, 0.0, 0.0), 100.0, STEP);
        assert_eq!(result.horizontal, Some(HorizontalContact::RightBoundary));
        assert_eq!(result.direction.x, -1.0);
        assert!(result.position.x < pos.x);
    }

    #[test]
    fn test_corner_reflects_both_axes() {
        let pos = Vec3::new(
            TABLE_WIDTH / 2.0 - BALL_RADIUS - 0.05,
            TABLE_HEIGHT / 2.0 - 0.05,
            0.0,
        );
        let result = step_ball(pos, Vec3::new(1.0, 0.5, 0.0), 0.0, STEP);
        assert_eq!(result.horizontal, Some(HorizontalContact::RightBoundary));
        assert_eq!(result.vertical, Some(VerticalContact::TopWall));
        assert_eq!(result.direction, Vec3::new(-1.0, -0.5, 0.0));
    }

    #[test]
    fn test_ball_stays_on_table_over_long_rally() {
        // Paddle tracks the ball perfectly, so the ball never leaves the table
        let mut pos = Vec3::ZERO;
        let mut dir = SERVE_DIRECTION;
        for _ in 0..20_000 {
            let result = step_ball(pos, dir, pos.y, STEP);
            pos = result.position;
            dir = result.direction;
            assert!(on_table(pos.truncate()), "ball escaped: {}", pos);
        }
    }

    #[test]
    fn test_advance_ball_paddle_hit_advances_color_once() {
        let mut app = App::new();
        app.init_resource::<BallSpeed>();
        app.init_resource::<GlowColors>();
        app.init_resource::<Rally>();
        app.insert_resource(EventBus::new());
        app.add_systems(Update, advance_ball);

        app.world_mut().spawn((PlayerPaddle, Transform::from_xyz(PLAYER_X, 0.0, 0.0)));
        let ball = app
            .world_mut()
            .spawn((
                Ball,
                Transform::from_xyz(-7.2, 0.0, 0.0),
                BallDirection(Vec3::new(-1.0, 0.5, 0.0)),
            ))
            .id();

        app.update();

        let world = app.world();
        assert_eq!(world.resource::<GlowColors>().index(), 1);
        assert_eq!(world.resource::<Rally>().returns, 1);
        assert_eq!(world.get::<BallDirection>(ball).unwrap().0.x, 1.0);
        let events: Vec<_> = app
            .world_mut()
            .resource_mut::<EventBus>()
            .take()
            .into_iter()
            .map(|e| e.event)
            .collect();
        assert_eq!(
            events,
            vec![
                GameEvent::PaddleReturn { rally: 1 },
                GameEvent::ColorChange { index: 1 }
            ]
        );
    }
}
