//! Debug overlay: frame rate, ball state, and glow state

use bevy::diagnostic::{DiagnosticsStore, FrameTimeDiagnosticsPlugin};
use bevy::prelude::*;

use crate::ball::{Ball, BallDirection, BallSpeed};
use crate::constants::TEXT_SECONDARY;
use crate::events::EventBus;
use crate::glow::{GlowColors, GlowSettings};
use crate::helpers::on_table;

/// Debug settings resource
#[derive(Resource, Default)]
pub struct DebugSettings {
    pub visible: bool,
}

/// Debug text component
#[derive(Component)]
pub struct DebugText;

/// Spawn the debug text, bottom left
pub fn spawn_debug_text(commands: &mut Commands, visible: bool) {
    commands.spawn((
        Text::new(""),
        TextFont {
            font_size: 14.0,
            ..default()
        },
        TextColor(TEXT_SECONDARY),
        Node {
            position_type: PositionType::Absolute,
            left: Val::Px(10.0),
            bottom: Val::Px(10.0),
            ..default()
        },
        if visible {
            Visibility::Inherited
        } else {
            Visibility::Hidden
        },
        DebugText,
    ));
}

/// Toggle debug UI visibility (F1 / Tab)
pub fn toggle_debug(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut settings: ResMut<DebugSettings>,
    mut text_query: Query<&mut Visibility, With<DebugText>>,
) {
    let pressed = keyboard.just_pressed(KeyCode::F1) || keyboard.just_pressed(KeyCode::Tab);

    if pressed {
        settings.visible = !settings.visible;
        if let Ok(mut visibility) = text_query.single_mut() {
            *visibility = if settings.visible {
                Visibility::Inherited
            } else {
                Visibility::Hidden
            };
        }
    }
}

/// Update debug text display
#[allow(clippy::too_many_arguments)]
pub fn update_debug_text(
    debug_settings: Res<DebugSettings>,
    diagnostics: Res<DiagnosticsStore>,
    speed: Res<BallSpeed>,
    glow: Res<GlowColors>,
    glow_settings: Res<GlowSettings>,
    event_bus: Res<EventBus>,
    ball_query: Query<(&Transform, &BallDirection), With<Ball>>,
    mut text_query: Query<&mut Text, With<DebugText>>,
) {
    if !debug_settings.visible {
        return;
    }

    let Ok(mut text) = text_query.single_mut() else {
        return;
    };

    let fps = diagnostics
        .get(&FrameTimeDiagnosticsPlugin::FPS)
        .and_then(|d| d.smoothed())
        .unwrap_or(0.0);

    let ball_str = match ball_query.single() {
        Ok((transform, direction)) => format!(
            "Ball ({:.2}, {:.2}) dir ({:.2}, {:.2}){}",
            transform.translation.x,
            transform.translation.y,
            direction.0.x,
            direction.0.y,
            if on_table(transform.translation.truncate()) {
                ""
            } else {
                " off table"
            }
        ),
        Err(_) => "Ball -".to_string(),
    };

    text.0 = format!(
        "{:.0} fps | tick #{} at {:.0} Hz step {:.4} | {} | Color {}/{} | Glow {} (r {:.0}, s {:.1}) | {} events",
        fps,
        event_bus.tick(),
        speed.tick_rate,
        speed.step(),
        ball_str,
        glow.index() + 1,
        glow.len(),
        if glow_settings.enabled { "on" } else { "off" },
        glow_settings.blur_radius,
        glow_settings.strength,
        event_bus.emitted(),
    );
}
