//! Keyboard-driven camera rig
//!
//! The rig carries position and yaw; its child look node carries pitch so
//! looking up and down never tilts the movement plane.

use bevy::prelude::*;

use crate::constants::{CAMERA_DISTANCE, RIG_DEGREES_PER_SECOND, RIG_UNITS_PER_SECOND};

/// Movable camera base (position + yaw)
#[derive(Component)]
pub struct CameraRig;

/// Child of the rig that pitches the camera
#[derive(Component)]
pub struct RigLook;

/// Starting rig transform: on the Z axis facing the table
pub fn rig_home() -> Transform {
    Transform::from_xyz(0.0, 0.0, CAMERA_DISTANCE)
}

/// Requested rig motion for one frame, in rig-local axes
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct RigMotion {
    /// -1..1 per axis: x right, y up, z backward
    pub translate: Vec3,
    /// Positive turns left
    pub yaw: f32,
    /// Positive looks up
    pub pitch: f32,
    pub reset: bool,
}

/// W/S forward/back, A/D left/right, R/F up/down, Q/E turn, T/Y look up/down, Home resets
pub fn read_rig_motion(keyboard: &ButtonInput<KeyCode>) -> RigMotion {
    let axis = |neg: KeyCode, pos: KeyCode| -> f32 {
        let mut v = 0.0;
        if keyboard.pressed(neg) {
            v -= 1.0;
        }
        if keyboard.pressed(pos) {
            v += 1.0;
        }
        v
    };

    RigMotion {
        translate: Vec3::new(
            axis(KeyCode::KeyA, KeyCode::KeyD),
            axis(KeyCode::KeyF, KeyCode::KeyR),
            axis(KeyCode::KeyW, KeyCode::KeyS),
        ),
        yaw: axis(KeyCode::KeyE, KeyCode::KeyQ),
        pitch: axis(KeyCode::KeyY, KeyCode::KeyT),
        reset: keyboard.just_pressed(KeyCode::Home),
    }
}

/// Move the rig from keyboard input
pub fn update_rig(
    keyboard: Res<ButtonInput<KeyCode>>,
    time: Res<Time>,
    mut rig_query: Query<&mut Transform, (With<CameraRig>, Without<RigLook>)>,
    mut look_query: Query<&mut Transform, With<RigLook>>,
) {
    let motion = read_rig_motion(&keyboard);
    let dt = time.delta_secs();
    let turn = RIG_DEGREES_PER_SECOND.to_radians() * dt;

    for mut rig in &mut rig_query {
        if motion.reset {
            *rig = rig_home();
            continue;
        }
        let offset = rig.rotation * (motion.translate * RIG_UNITS_PER_SECOND * dt);
        rig.translation += offset;
        if motion.yaw != 0.0 {
            rig.rotate_local_y(motion.yaw * turn);
        }
    }

    for mut look in &mut look_query {
        if motion.reset {
            *look = Transform::IDENTITY;
        } else if motion.pitch != 0.0 {
            look.rotate_local_x(motion.pitch * turn);
        }
    }
}
