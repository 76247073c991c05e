//! HUD components and systems (rally display)

use bevy::prelude::*;

use crate::constants::TEXT_PRIMARY;
use crate::scoring::Rally;

/// Rally text component
#[derive(Component)]
pub struct RallyText;

/// Format the rally line shown at the top of the screen
pub fn rally_line(rally: &Rally) -> String {
    format!(
        "Rally {}  |  Best {}  |  Misses {}",
        rally.current, rally.longest, rally.misses
    )
}

/// Spawn the rally text, top center
pub fn spawn_hud(commands: &mut Commands) {
    commands
        .spawn(Node {
            position_type: PositionType::Absolute,
            top: Val::Px(12.0),
            width: Val::Percent(100.0),
            justify_content: JustifyContent::Center,
            ..default()
        })
        .with_children(|parent| {
            parent.spawn((
                Text::new(rally_line(&Rally::default())),
                TextFont {
                    font_size: 24.0,
                    ..default()
                },
                TextColor(TEXT_PRIMARY),
                RallyText,
            ));
        });
}

/// Update rally display
pub fn update_rally_text(rally: Res<Rally>, mut text_query: Query<&mut Text, With<RallyText>>) {
    if !rally.is_changed() {
        return;
    }
    let Ok(mut text) = text_query.single_mut() else {
        return;
    };
    text.0 = rally_line(&rally);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rally_line() {
        let rally = Rally {
            current: 3,
            longest: 7,
            misses: 2,
            ..default()
        };
        assert_eq!(rally_line(&rally), "Rally 3  |  Best 7  |  Misses 2");
    }
}
