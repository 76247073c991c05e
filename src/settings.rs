//! Persistent settings for game initialization
//!
//! Saves and loads window, loop, and glow settings to/from a JSON file in the
//! config directory. Command-line flags override the file for one run.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::ball::BallSpeed;
use crate::constants::*;
use crate::glow::GlowSettings;

/// Path to the settings file
pub const SETTINGS_FILE: &str = "config/settings.json";

/// Persistent settings that survive between sessions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameSettings {
    /// Borderless fullscreen on the primary monitor (ignores window size)
    pub fullscreen: bool,
    pub window_width: u32,
    pub window_height: u32,
    /// Fixed update rate in Hz
    pub tick_rate: f64,
    /// Ball speed in units per second
    pub ball_speed: f32,
    pub glow_on: bool,
    pub blur_radius: f32,
    pub glow_strength: f32,
    /// Write a JSON-lines event log under logs/
    pub event_log: bool,
    /// Show the debug overlay at startup
    pub debug_overlay: bool,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            fullscreen: true,
            window_width: 1920,
            window_height: 1080,
            tick_rate: DEFAULT_TICK_RATE,
            ball_speed: BALL_SPEED,
            glow_on: DEFAULT_GLOW_ON,
            blur_radius: DEFAULT_BLUR_RADIUS,
            glow_strength: DEFAULT_GLOW_STRENGTH,
            event_log: false,
            debug_overlay: false,
        }
    }
}

impl GameSettings {
    /// Load settings from the default file, or return defaults if it doesn't exist
    pub fn load() -> Self {
        Self::load_from(SETTINGS_FILE)
    }

    /// Load settings from a path, falling back to defaults on any error
    pub fn load_from(path: &str) -> Self {
        if !Path::new(path).exists() {
            info!("No {} found, using defaults", path);
            return Self::default();
        }

        match fs::read_to_string(path) {
            Ok(content) => match serde_json::from_str::<Self>(&content) {
                Ok(settings) => {
                    info!("Loaded settings from {}", path);
                    settings.sanitized()
                }
                Err(e) => {
                    warn!("Failed to parse {}: {}, using defaults", path, e);
                    Self::default()
                }
            },
            Err(e) => {
                warn!("Failed to read {}: {}, using defaults", path, e);
                Self::default()
            }
        }
    }

    /// Save settings to the default file
    pub fn save(&self) -> Result<(), std::io::Error> {
        self.save_to(SETTINGS_FILE)
    }

    /// Save settings to a path, creating the parent directory
    pub fn save_to(&self, path: &str) -> Result<(), std::io::Error> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;

        if let Some(parent) = Path::new(path).parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(path, json)?;
        info!("Saved settings to {}", path);
        Ok(())
    }

    /// Clamp values into ranges the game loop can run with
    pub fn sanitized(mut self) -> Self {
        if !self.tick_rate.is_finite() {
            self.tick_rate = DEFAULT_TICK_RATE;
        }
        self.tick_rate = self.tick_rate.clamp(MIN_TICK_RATE, MAX_TICK_RATE);
        if !self.ball_speed.is_finite() || self.ball_speed <= 0.0 {
            self.ball_speed = BALL_SPEED;
        }
        self.window_width = self.window_width.max(320);
        self.window_height = self.window_height.max(240);
        self.blur_radius = self.blur_radius.max(0.0);
        self.glow_strength = self.glow_strength.max(0.0);
        self
    }

    /// Apply command-line overrides: --windowed, --fullscreen, --no-glow,
    /// --fps <hz>, --speed <units/s>, --event-log, --debug
    pub fn apply_args(&mut self, args: &[String]) {
        let mut i = 1;
        while i < args.len() {
            match args[i].as_str() {
                "--windowed" => self.fullscreen = false,
                "--fullscreen" => self.fullscreen = true,
                "--no-glow" => self.glow_on = false,
                "--event-log" => self.event_log = true,
                "--debug" => self.debug_overlay = true,
                "--fps" => {
                    i += 1;
                    match args.get(i).and_then(|s| s.parse::<f64>().ok()) {
                        Some(hz) => self.tick_rate = hz,
                        None => warn!("--fps needs a number"),
                    }
                }
                "--speed" => {
                    i += 1;
                    match args.get(i).and_then(|s| s.parse::<f32>().ok()) {
                        Some(speed) => self.ball_speed = speed,
                        None => warn!("--speed needs a number"),
                    }
                }
                other => warn!("Unknown argument: {}", other),
            }
            i += 1;
        }
        *self = self.clone().sanitized();
    }

    /// Glow pass configuration
    pub fn glow(&self) -> GlowSettings {
        GlowSettings {
            enabled: self.glow_on,
            blur_radius: self.blur_radius,
            strength: self.glow_strength,
        }
    }

    /// Ball speed over the configured tick rate
    pub fn ball_speed(&self) -> BallSpeed {
        BallSpeed {
            units_per_second: self.ball_speed,
            tick_rate: self.tick_rate,
        }
    }
}

/// Resource tracking the active settings and the command line they were built with
#[derive(Resource, Debug, Clone, Default)]
pub struct CurrentSettings {
    pub settings: GameSettings,
    /// Re-applied to every reload so overrides last the whole run
    pub args: Vec<String>,
}

impl CurrentSettings {
    /// Settings from the file with command-line overrides applied
    pub fn from_file_and_args(file_settings: GameSettings, args: Vec<String>) -> Self {
        let mut settings = file_settings;
        settings.apply_args(&args);
        Self { settings, args }
    }

    /// Settings reloaded from disk, with this run's overrides applied again
    pub fn reapply(&self, file_settings: GameSettings) -> GameSettings {
        let mut settings = file_settings;
        settings.apply_args(&self.args);
        settings
    }
}
