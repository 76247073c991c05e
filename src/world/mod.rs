//! World components and scene spawning for the table, paddles, ball, light, and camera

use bevy::prelude::*;

use crate::ball::{Ball, BallDirection};
use crate::constants::*;
use crate::glow::{BallLight, GlowCamera, GlowColors, GlowSettings};
use crate::paddle::{CpuPaddle, PlayerPaddle};
use crate::rig::{CameraRig, RigLook, rig_home};

/// Marker for the table floor
#[derive(Component)]
pub struct Floor;

/// Top or bottom boundary wall
#[derive(Component, Clone, Copy, PartialEq, Eq, Debug)]
pub enum TableWall {
    Top,
    Bottom,
}

// ============================================================================
// Scene spawning functions (shared between the game and tests)
// ============================================================================

/// Spawn the floor and both walls
pub fn spawn_table(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
) {
    // Matte floor
    let floor_material = materials.add(StandardMaterial {
        base_color: FLOOR_COLOR,
        perceptual_roughness: 1.0,
        reflectance: 0.1,
        ..default()
    });
    commands.spawn((
        Mesh3d(meshes.add(Cuboid::new(TABLE_WIDTH, TABLE_HEIGHT, TABLE_DEPTH))),
        MeshMaterial3d(floor_material),
        Transform::from_xyz(0.0, 0.0, FLOOR_Z),
        Floor,
    ));

    // Walls share one glossy material and one mesh
    let wall_material = materials.add(StandardMaterial {
        base_color: WALL_COLOR,
        perceptual_roughness: 0.3,
        ..default()
    });
    let wall_mesh = meshes.add(Cuboid::new(WALL_WIDTH, WALL_HEIGHT, WALL_DEPTH));
    for (wall, y) in [(TableWall::Top, TOP_WALL_Y), (TableWall::Bottom, BOTTOM_WALL_Y)] {
        commands.spawn((
            Mesh3d(wall_mesh.clone()),
            MeshMaterial3d(wall_material.clone()),
            Transform::from_xyz(0.0, y, 0.0),
            wall,
        ));
    }
}

/// Spawn the player and CPU paddles at table center height
pub fn spawn_paddles(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    glow_settings: &GlowSettings,
) {
    let paddle_mesh = meshes.add(Cuboid::new(PADDLE_WIDTH, PADDLE_HEIGHT, PADDLE_DEPTH));
    let paddle_material = materials.add(StandardMaterial {
        base_color: PADDLE_COLOR,
        perceptual_roughness: 0.3,
        emissive: glow_settings.paddle_emissive(),
        ..default()
    });

    commands.spawn((
        Mesh3d(paddle_mesh.clone()),
        MeshMaterial3d(paddle_material.clone()),
        Transform::from_xyz(PLAYER_X, 0.0, 0.0),
        PlayerPaddle,
    ));
    commands.spawn((
        Mesh3d(paddle_mesh),
        MeshMaterial3d(paddle_material),
        Transform::from_xyz(CPU_X, 0.0, 0.0),
        CpuPaddle,
    ));
}

/// Spawn the ball with its glow material, plus the point light that rides with it
pub fn spawn_ball(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    glow: &GlowColors,
    glow_settings: &GlowSettings,
) -> Entity {
    let color = glow.current();
    let glow_material = materials.add(StandardMaterial {
        base_color: color,
        emissive: glow_settings.emissive(color),
        perceptual_roughness: 0.2,
        ..default()
    });

    let ball = commands
        .spawn((
            Mesh3d(meshes.add(Sphere::new(BALL_RADIUS))),
            MeshMaterial3d(glow_material),
            Transform::from_translation(Vec3::ZERO),
            Ball,
            BallDirection::default(),
        ))
        .id();

    // Wide range and no shadows: near-constant attenuation across the table
    commands.spawn((
        PointLight {
            color,
            intensity: LIGHT_INTENSITY,
            range: LIGHT_RANGE,
            radius: BALL_RADIUS,
            shadows_enabled: false,
            ..default()
        },
        Transform::from_translation(Vec3::ZERO),
        BallLight,
    ));

    ball
}

/// Spawn the camera rig with a perspective camera carrying the glow pass
pub fn spawn_camera(commands: &mut Commands, glow_settings: &GlowSettings) {
    let bloom = glow_settings.bloom();
    commands
        .spawn((CameraRig, rig_home(), Visibility::default()))
        .with_children(|parent| {
            let mut camera = parent.spawn((
                Camera3d::default(),
                Projection::Perspective(PerspectiveProjection {
                    fov: CAMERA_FOV_DEGREES.to_radians(),
                    ..default()
                }),
                Transform::IDENTITY,
                RigLook,
                GlowCamera,
            ));
            if let Some(bloom) = bloom {
                camera.insert(bloom);
            }
        });
}
