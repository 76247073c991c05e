//! Glow pass: HDR bloom on the main camera, driven by glow settings

use bevy::post_process::bloom::Bloom;
use bevy::prelude::*;

use crate::constants::{
    DEFAULT_BLUR_RADIUS, DEFAULT_GLOW_ON, DEFAULT_GLOW_STRENGTH, PADDLE_COLOR, PADDLE_GLOW,
};
use crate::events::{EventBus, GameEvent};

/// Marker for the camera that carries the glow pass
#[derive(Component)]
pub struct GlowCamera;

/// Glow pass configuration
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct GlowSettings {
    pub enabled: bool,
    /// Blur radius in pixels at 1080p; 25 is the reference spread
    pub blur_radius: f32,
    /// Blend strength of the blurred glow over the scene
    pub strength: f32,
}

impl Default for GlowSettings {
    fn default() -> Self {
        Self {
            enabled: DEFAULT_GLOW_ON,
            blur_radius: DEFAULT_BLUR_RADIUS,
            strength: DEFAULT_GLOW_STRENGTH,
        }
    }
}

impl GlowSettings {
    /// Bloom intensity: saturating in strength, 3.0 maps to 0.3
    pub fn bloom_intensity(&self) -> f32 {
        let strength = self.strength.max(0.0);
        0.4 * strength / (strength + 1.0)
    }

    /// Low-frequency boost grows with blur radius so wide blurs spread further
    pub fn bloom_spread(&self) -> f32 {
        let scale = (self.blur_radius / DEFAULT_BLUR_RADIUS).max(0.0);
        (Bloom::NATURAL.low_frequency_boost * scale).clamp(0.0, 1.0)
    }

    /// Bloom component for the camera, or None when the glow pass is off
    pub fn bloom(&self) -> Option<Bloom> {
        if !self.enabled {
            return None;
        }
        Some(Bloom {
            intensity: self.bloom_intensity(),
            low_frequency_boost: self.bloom_spread(),
            ..Bloom::NATURAL
        })
    }

    /// Emissive term for a glowing material of the given color
    pub fn emissive(&self, color: Color) -> LinearRgba {
        if self.enabled {
            LinearRgba::from(color) * self.strength.max(0.0)
        } else {
            LinearRgba::BLACK
        }
    }

    /// Faint paddle emissive, so the paddles show in the bloom. Off with the glow.
    pub fn paddle_emissive(&self) -> LinearRgba {
        if self.enabled {
            LinearRgba::from(PADDLE_COLOR) * PADDLE_GLOW
        } else {
            LinearRgba::BLACK
        }
    }
}

/// Insert or remove bloom on the glow camera when settings change
pub fn sync_bloom(
    mut commands: Commands,
    settings: Res<GlowSettings>,
    camera_query: Query<Entity, With<GlowCamera>>,
) {
    if !settings.is_changed() {
        return;
    }
    for camera in &camera_query {
        match settings.bloom() {
            Some(bloom) => {
                commands.entity(camera).insert(bloom);
            }
            None => {
                commands.entity(camera).remove::<Bloom>();
            }
        }
    }
}

/// G toggles the glow pass
pub fn toggle_glow(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut settings: ResMut<GlowSettings>,
    mut event_bus: ResMut<EventBus>,
) {
    if keyboard.just_pressed(KeyCode::KeyG) {
        settings.enabled = !settings.enabled;
        info!("Glow {}", if settings.enabled { "on" } else { "off" });
        event_bus.emit(GameEvent::GlowToggled {
            enabled: settings.enabled,
        });
    }
}
