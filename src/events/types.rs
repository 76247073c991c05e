//! Event type definitions for the logging system

use serde::{Deserialize, Serialize};

/// Which wall the ball bounced off
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Wall {
    Top,
    Bottom,
}

impl std::fmt::Display for Wall {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Wall::Top => write!(f, "top"),
            Wall::Bottom => write!(f, "bottom"),
        }
    }
}

/// All game events that can be logged
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    // === Session Events ===
    /// Session started (generated once per game launch)
    SessionStart {
        session_id: String, // UUID v4
        timestamp: String,  // RFC 3339
    },

    // === Rally Events ===
    /// Ball served from the center of the table
    Serve,
    /// Player paddle returned the ball
    PaddleReturn { rally: u32 },
    /// Ball reached the right boundary (CPU side)
    BoundaryBounce,
    /// Ball bounced off a wall
    WallBounce { wall: Wall },
    /// Glow palette advanced
    ColorChange { index: usize },
    /// Ball passed the player paddle
    Miss { rally: u32 },

    // === Config Events ===
    /// Glow pass turned on or off
    GlowToggled { enabled: bool },
    /// Settings or palette reloaded from disk
    SettingsReloaded,
}
