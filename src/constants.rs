//! Tunable constants for glowpong
//!
//! Table geometry, ball kinematics and glow defaults. All sizes are world units.

use bevy::prelude::*;

// =============================================================================
// TABLE GEOMETRY
// =============================================================================

pub const TABLE_WIDTH: f32 = 15.0;
pub const TABLE_HEIGHT: f32 = 10.0;
pub const TABLE_DEPTH: f32 = 1.0;
pub const FLOOR_Z: f32 = -1.0; // Floor sits one unit behind the play plane

pub const WALL_WIDTH: f32 = TABLE_WIDTH;
pub const WALL_HEIGHT: f32 = 1.0;
pub const WALL_DEPTH: f32 = 1.0;
pub const TOP_WALL_Y: f32 = TABLE_HEIGHT / 2.0 + WALL_HEIGHT / 2.0;
pub const BOTTOM_WALL_Y: f32 = -(TABLE_HEIGHT / 2.0) - WALL_HEIGHT / 2.0;

// =============================================================================
// PADDLES
// =============================================================================

pub const PADDLE_WIDTH: f32 = 1.0;
pub const PADDLE_HEIGHT: f32 = 3.0;
pub const PADDLE_DEPTH: f32 = 1.0;
pub const PLAYER_X: f32 = -(TABLE_WIDTH / 2.0 + PADDLE_WIDTH / 2.0);
pub const CPU_X: f32 = TABLE_WIDTH / 2.0 + PADDLE_WIDTH / 2.0;

/// Vertical span the pointer is mapped onto (table height minus both walls)
pub const POINTER_TRAVEL: f32 = TABLE_HEIGHT - 2.0 * WALL_HEIGHT;

// =============================================================================
// BALL
// =============================================================================

pub const BALL_RADIUS: f32 = 0.25;
pub const BALL_SPEED: f32 = 30.0; // Units per second, divided by tick rate for per-tick step
pub const SERVE_DIRECTION: Vec3 = Vec3::new(1.0, 0.5, 0.0);

/// Player paddle reach: ball center within this of the paddle center counts as a return
pub const PADDLE_REACH: f32 = PADDLE_WIDTH + BALL_RADIUS;

/// Ball is out of play once it passes the back face of the player paddle
pub const OUT_OF_PLAY_X: f32 = PLAYER_X - PADDLE_WIDTH / 2.0 - BALL_RADIUS;

// =============================================================================
// LOOP
// =============================================================================

pub const DEFAULT_TICK_RATE: f64 = 144.0;
pub const MIN_TICK_RATE: f64 = 30.0;
pub const MAX_TICK_RATE: f64 = 480.0;

// =============================================================================
// CAMERA
// =============================================================================

pub const CAMERA_DISTANCE: f32 = 10.0;
pub const CAMERA_FOV_DEGREES: f32 = 60.0;
pub const RIG_UNITS_PER_SECOND: f32 = 1.0;
pub const RIG_DEGREES_PER_SECOND: f32 = 60.0;

// =============================================================================
// GLOW
// =============================================================================

pub const DEFAULT_GLOW_ON: bool = true;
pub const DEFAULT_BLUR_RADIUS: f32 = 25.0;
pub const DEFAULT_GLOW_STRENGTH: f32 = 3.0;
pub const PADDLE_GLOW: f32 = 0.15; // Emissive fraction of paddle color so paddles show in the bloom
pub const LIGHT_INTENSITY: f32 = 2_000_000.0; // Lumens; point light rides with the ball
pub const LIGHT_RANGE: f32 = 60.0; // Covers the whole table so falloff stays near-constant

// =============================================================================
// COLORS
// =============================================================================

pub const BACKGROUND_COLOR: Color = Color::srgb(0.02, 0.02, 0.03);
pub const FLOOR_COLOR: Color = Color::srgb(0.35, 0.35, 0.4);
pub const WALL_COLOR: Color = Color::srgb(0.6, 0.6, 0.65);
pub const PADDLE_COLOR: Color = Color::srgb(0.85, 0.85, 0.9);
pub const TEXT_PRIMARY: Color = Color::srgb(0.95, 0.95, 0.95);
pub const TEXT_SECONDARY: Color = Color::srgb(0.6, 0.6, 0.65);

// =============================================================================
// FILES
// =============================================================================

pub const GLOW_PALETTE_FILE: &str = "assets/glow_palette.txt";
