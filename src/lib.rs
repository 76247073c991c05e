//! Glowpong - single-player 3D pong with a glowing, color-cycling ball, built with Bevy
//!
//! This crate provides all game components, resources, and systems organized into modules.

// Core modules
pub mod config_watcher;
pub mod constants;
pub mod events;
pub mod helpers;
pub mod settings;
pub mod simulation;

// Game logic modules
pub mod ball;
pub mod glow;
pub mod input;
pub mod paddle;
pub mod palettes;
pub mod rig;
pub mod scoring;
pub mod ui;
pub mod world;

use bevy::prelude::*;

// Re-export commonly used types for convenience
pub use ball::{Ball, BallDirection, BallSpeed, BallStep, step_ball};
pub use config_watcher::ConfigWatcher;
pub use constants::*;
pub use events::{BusEvent, EventBus, EventLogConfig, EventLogger, GameEvent, Wall};
pub use glow::{BallLight, GlowCamera, GlowColors, GlowSettings};
pub use helpers::*;
pub use input::PointerInput;
pub use paddle::{CpuPaddle, PlayerPaddle};
pub use palettes::PaletteDatabase;
pub use rig::{CameraRig, RigLook};
pub use scoring::Rally;
pub use settings::{CurrentSettings, GameSettings, SETTINGS_FILE};
pub use ui::{DebugSettings, DebugText, RallyText};
pub use world::{Floor, TableWall};

/// Register the fixed-rate rally chain: tick stamp, paddle, ball, re-serve, CPU paddle.
/// Shared by the windowed game and the headless simulation.
pub fn add_fixed_rally_systems(app: &mut App) {
    app.add_systems(
        FixedUpdate,
        (
            events::advance_bus_tick,
            paddle::move_player_paddle,
            ball::advance_ball,
            scoring::check_out_of_play,
            paddle::cpu_follow_ball,
        )
            .chain(),
    );
}
