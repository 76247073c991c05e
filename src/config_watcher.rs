//! Config file auto-reload system
//!
//! Polls the settings and palette files every few seconds and reloads them
//! when their modification time changes.

use bevy::prelude::*;
use std::fs;
use std::time::SystemTime;

use crate::ball::BallSpeed;
use crate::constants::GLOW_PALETTE_FILE;
use crate::events::{EventBus, GameEvent};
use crate::glow::{GlowColors, GlowSettings};
use crate::palettes::PaletteDatabase;
use crate::settings::{CurrentSettings, GameSettings, SETTINGS_FILE};

/// How often to check for config changes (seconds)
const CHECK_INTERVAL: f32 = 3.0;

/// Tracks modification times of config files for hot-reload
#[derive(Resource)]
pub struct ConfigWatcher {
    /// Time since last check
    pub timer: f32,
    pub settings_path: String,
    pub palette_path: String,
    /// Last known modification times
    pub settings_mtime: Option<SystemTime>,
    pub palette_mtime: Option<SystemTime>,
}

impl Default for ConfigWatcher {
    fn default() -> Self {
        Self::new(SETTINGS_FILE, GLOW_PALETTE_FILE)
    }
}

impl ConfigWatcher {
    pub fn new(settings_path: &str, palette_path: &str) -> Self {
        Self {
            timer: 0.0,
            settings_path: settings_path.to_string(),
            palette_path: palette_path.to_string(),
            settings_mtime: get_mtime(settings_path),
            palette_mtime: get_mtime(palette_path),
        }
    }
}

/// Get file modification time, or None if file doesn't exist
fn get_mtime(path: &str) -> Option<SystemTime> {
    fs::metadata(path).ok().and_then(|m| m.modified().ok())
}

/// Check for config file changes and reload as needed.
#[allow(clippy::too_many_arguments)]
pub fn check_config_changes(
    time: Res<Time>,
    mut watcher: ResMut<ConfigWatcher>,
    mut current_settings: ResMut<CurrentSettings>,
    mut glow_settings: ResMut<GlowSettings>,
    mut ball_speed: ResMut<BallSpeed>,
    mut fixed_time: ResMut<Time<Fixed>>,
    mut glow: ResMut<GlowColors>,
    mut event_bus: ResMut<EventBus>,
) {
    watcher.timer += time.delta_secs();

    if watcher.timer < CHECK_INTERVAL {
        return;
    }
    watcher.timer = 0.0;

    let mut reloaded = false;

    let new_settings_mtime = get_mtime(&watcher.settings_path);
    if new_settings_mtime != watcher.settings_mtime {
        watcher.settings_mtime = new_settings_mtime;
        let settings = current_settings.reapply(GameSettings::load_from(&watcher.settings_path));
        info!("Auto-reloaded settings from {}", watcher.settings_path);

        // Only touch resources that actually differ so change detection stays quiet
        let new_glow = settings.glow();
        if *glow_settings != new_glow {
            *glow_settings = new_glow;
        }
        let new_speed = settings.ball_speed();
        if *ball_speed != new_speed {
            if ball_speed.tick_rate != new_speed.tick_rate {
                fixed_time.set_timestep_hz(new_speed.tick_rate);
                info!("Tick rate now {} Hz", new_speed.tick_rate);
            }
            *ball_speed = new_speed;
        }
        if settings.fullscreen != current_settings.settings.fullscreen {
            info!("Window mode changes apply on restart");
        }
        current_settings.settings = settings;
        reloaded = true;
    }

    let new_palette_mtime = get_mtime(&watcher.palette_path);
    if new_palette_mtime != watcher.palette_mtime {
        watcher.palette_mtime = new_palette_mtime;
        let palette = PaletteDatabase::load_or_create(&watcher.palette_path);
        glow.set_palette(&palette);
        info!("Auto-reloaded glow palette from {}", watcher.palette_path);
        reloaded = true;
    }

    if reloaded {
        event_bus.emit(GameEvent::SettingsReloaded);
    }
}
