//! Headless App Builder
//!
//! Provides a reusable builder for creating headless Bevy apps that run the
//! fixed-rate rally systems without a window or renderer.
//! Used by the simulation runner and by system-level tests.

use bevy::app::ScheduleRunnerPlugin;
use bevy::prelude::*;
use std::time::Duration;

use crate::add_fixed_rally_systems;
use crate::ball::{Ball, BallDirection, BallSpeed};
use crate::constants::{
    BALL_SPEED, CPU_X, DEFAULT_TICK_RATE, MAX_TICK_RATE, MIN_TICK_RATE, PLAYER_X,
};
use crate::events::{EventBus, EventLogger, log_bus_events};
use crate::glow::{GlowColors, GlowSettings};
use crate::input::PointerInput;
use crate::paddle::{CpuPaddle, PlayerPaddle};
use crate::scoring::{Rally, initial_serve};

/// Builder for creating headless Bevy apps
pub struct HeadlessAppBuilder {
    tick_rate: f64,
    ball_speed: f32,
    minimal_threads: bool,
}

impl Default for HeadlessAppBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl HeadlessAppBuilder {
    /// Create a new builder with default settings
    pub fn new() -> Self {
        Self {
            tick_rate: DEFAULT_TICK_RATE,
            ball_speed: BALL_SPEED,
            minimal_threads: false,
        }
    }

    /// Set the fixed tick rate (default: 144), clamped to the supported range.
    /// Non-finite rates fall back to the default.
    pub fn with_tick_rate(mut self, tick_rate: f64) -> Self {
        self.tick_rate = if tick_rate.is_finite() {
            tick_rate.clamp(MIN_TICK_RATE, MAX_TICK_RATE)
        } else {
            DEFAULT_TICK_RATE
        };
        self
    }

    /// Set the ball speed in units per second (default: 30)
    pub fn with_ball_speed(mut self, ball_speed: f32) -> Self {
        self.ball_speed = ball_speed;
        self
    }

    /// Enable minimal thread mode (task pools = 1)
    ///
    /// Use this when running many apps in parallel to avoid hitting OS thread limits.
    pub fn with_minimal_threads(mut self) -> Self {
        self.minimal_threads = true;
        self
    }

    /// Build the app with minimal plugins, rally resources, and rally systems
    ///
    /// The returned app has:
    /// - MinimalPlugins with ScheduleRunnerPlugin
    /// - Ball, paddles (no meshes) spawned at Startup, plus the opening serve
    /// - FixedUpdate rally systems followed by the bus logger
    ///
    /// Callers drive ticks with `run_schedule(FixedUpdate)` after `finish`,
    /// `cleanup`, and one `update` to run Startup.
    pub fn build(self) -> App {
        let mut app = App::new();
        let frame = Duration::from_secs_f64(1.0 / self.tick_rate.max(1.0));

        if self.minimal_threads {
            app.add_plugins(
                MinimalPlugins
                    .set(ScheduleRunnerPlugin::run_loop(frame))
                    .set(TaskPoolPlugin {
                        task_pool_options: TaskPoolOptions::with_num_threads(1),
                    }),
            );
        } else {
            app.add_plugins(MinimalPlugins.set(ScheduleRunnerPlugin::run_loop(frame)));
        }

        app.insert_resource(Time::<Fixed>::from_hz(self.tick_rate));
        app.insert_resource(BallSpeed {
            units_per_second: self.ball_speed,
            tick_rate: self.tick_rate,
        });
        app.init_resource::<PointerInput>();
        app.init_resource::<GlowColors>();
        app.insert_resource(GlowSettings {
            enabled: false,
            ..default()
        });
        app.init_resource::<Rally>();
        app.insert_resource(EventBus::new());
        app.init_resource::<EventLogger>();

        app.add_systems(Startup, (spawn_headless_pieces, initial_serve).chain());
        add_fixed_rally_systems(&mut app);
        app.add_systems(FixedUpdate, log_bus_events.after(crate::paddle::cpu_follow_ball));

        app
    }
}

/// Spawn the ball and paddles without meshes or materials
pub fn spawn_headless_pieces(mut commands: Commands) {
    commands.spawn((Ball, Transform::from_translation(Vec3::ZERO), BallDirection::default()));
    commands.spawn((PlayerPaddle, Transform::from_xyz(PLAYER_X, 0.0, 0.0)));
    commands.spawn((CpuPaddle, Transform::from_xyz(CPU_X, 0.0, 0.0)));
}

/// Finish building and run Startup once
pub fn prepare(app: &mut App) {
    app.finish();
    app.cleanup();
    app.update();
}

/// Advance the app by one fixed tick
pub fn tick(app: &mut App) {
    app.world_mut().run_schedule(FixedUpdate);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::TABLE_WIDTH;

    #[test]
    fn test_builder_creates_app() {
        let app = HeadlessAppBuilder::new().build();
        assert!(app.world().contains_resource::<Rally>());
        assert!(app.world().contains_resource::<BallSpeed>());
        assert!(app.world().contains_resource::<GlowColors>());
    }

    #[test]
    fn test_out_of_range_tick_rate_is_clamped() {
        let app = HeadlessAppBuilder::new().with_tick_rate(0.0).build();
        assert_eq!(app.world().resource::<BallSpeed>().tick_rate, MIN_TICK_RATE);
        let app = HeadlessAppBuilder::new().with_tick_rate(f64::INFINITY).build();
        assert_eq!(app.world().resource::<BallSpeed>().tick_rate, DEFAULT_TICK_RATE);
    }

    #[test]
    fn test_minimal_threads_creates_app() {
        let app = HeadlessAppBuilder::new().with_minimal_threads().build();
        assert!(app.world().contains_resource::<Rally>());
    }

    #[test]
    fn test_startup_spawns_and_serves() {
        let mut app = HeadlessAppBuilder::new().build();
        prepare(&mut app);

        let world = app.world_mut();
        let balls = world.query_filtered::<Entity, With<Ball>>().iter(world).count();
        assert_eq!(balls, 1);
        assert_eq!(world.resource::<Rally>().serves, 1);
    }

    #[test]
    fn test_right_bounce_cycles_color_and_cpu_follows() {
        let mut app = HeadlessAppBuilder::new().with_tick_rate(60.0).build();
        prepare(&mut app);

        // 0.5 units per tick: the right boundary is reached within 15 ticks
        for _ in 0..20 {
            tick(&mut app);
        }

        let world = app.world_mut();
        let (ball_y, dir) = {
            let mut query = world.query_filtered::<(&Transform, &BallDirection), With<Ball>>();
            let (transform, dir) = query.single(world).unwrap();
            (transform.translation.y, dir.0)
        };
        assert!(dir.x < 0.0);
        assert_eq!(world.resource::<GlowColors>().index(), 1);
        assert_eq!(world.resource::<Rally>().color_changes, 1);

        let mut cpu = world.query_filtered::<&Transform, With<CpuPaddle>>();
        let cpu_transform = cpu.single(world).unwrap();
        assert_eq!(cpu_transform.translation.y, ball_y);
        assert_eq!(cpu_transform.translation.x, CPU_X);

        let mut balls = world.query_filtered::<&Transform, With<Ball>>();
        assert!(balls.single(world).unwrap().translation.x <= TABLE_WIDTH / 2.0);
    }
}
