//! Input module - PointerInput resource and capture systems

use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use crate::helpers::pointer_to_table_y;

/// Latest pointer height, already mapped onto the table
#[derive(Resource, Default, Debug, Clone, Copy, PartialEq)]
pub struct PointerInput {
    pub table_y: f32,
}

/// Runs in Update to sample the cursor before FixedUpdate consumes it.
/// A cursor outside the window keeps the last known height.
pub fn capture_pointer(
    windows: Query<&Window, With<PrimaryWindow>>,
    mut pointer: ResMut<PointerInput>,
) {
    let Ok(window) = windows.single() else {
        return;
    };
    if let Some(cursor) = window.cursor_position() {
        pointer.table_y = pointer_to_table_y(cursor.y, window.height());
    }
}

/// Escape quits
pub fn exit_on_escape(keyboard: Res<ButtonInput<KeyCode>>, mut exit: MessageWriter<AppExit>) {
    if keyboard.just_pressed(KeyCode::Escape) {
        info!("Exiting");
        exit.write(AppExit::Success);
    }
}
