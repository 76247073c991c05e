//! Glowpong - single-player 3D pong with a glowing ball, built with Bevy
//!
//! Main entry point: app setup and system registration.

use bevy::{
    diagnostic::FrameTimeDiagnosticsPlugin,
    prelude::*,
    window::{MonitorSelection, WindowMode, WindowResolution},
};
use glowpong::{
    ConfigWatcher, CurrentSettings, DebugSettings, EventBus, EventLogConfig, EventLogger,
    GLOW_PALETTE_FILE, GameSettings, GlowColors, GlowSettings, PaletteDatabase, PointerInput,
    Rally, SETTINGS_FILE, add_fixed_rally_systems, config_watcher, constants::*, events, glow,
    input, rig, scoring, ui, world,
};
use std::path::{Path, PathBuf};

fn main() {
    // Load persistent settings
    let file_settings = GameSettings::load();

    // Save settings on first run to ensure the file exists
    if !Path::new(SETTINGS_FILE).exists()
        && let Err(e) = file_settings.save()
    {
        warn!("Failed to save initial settings: {}", e);
    }

    // Command-line flags override the file for this run, reloads included
    let current_settings =
        CurrentSettings::from_file_and_args(file_settings, std::env::args().collect());
    let settings = &current_settings.settings;

    // Load glow palette (creates default file if missing)
    let palette_db = PaletteDatabase::load_or_create(GLOW_PALETTE_FILE);
    let glow_colors = GlowColors::new(&palette_db);

    let window_mode = if settings.fullscreen {
        WindowMode::BorderlessFullscreen(MonitorSelection::Primary)
    } else {
        WindowMode::Windowed
    };

    let mut app = App::new();
    app.add_plugins((
        DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                resolution: WindowResolution::new(settings.window_width, settings.window_height),
                mode: window_mode,
                title: "Glowpong".into(),
                ..default()
            }),
            ..default()
        }),
        FrameTimeDiagnosticsPlugin::default(),
    ))
    .insert_resource(ClearColor(BACKGROUND_COLOR))
    .insert_resource(Time::<Fixed>::from_hz(settings.tick_rate))
    .insert_resource(settings.ball_speed())
    .insert_resource(settings.glow())
    .insert_resource(glow_colors)
    .insert_resource(DebugSettings {
        visible: settings.debug_overlay,
    })
    .insert_resource(EventLogger::new(EventLogConfig {
        log_dir: PathBuf::from("logs"),
        enabled: settings.event_log,
    }))
    .insert_resource(EventBus::new())
    .insert_resource(current_settings.clone())
    .init_resource::<PointerInput>()
    .init_resource::<Rally>()
    .init_resource::<ConfigWatcher>()
    .add_systems(
        Startup,
        (setup, scoring::initial_serve, events::start_event_log).chain(),
    )
    // Pointer is sampled every frame and consumed by the fixed-rate chain
    .add_systems(
        Update,
        (
            input::capture_pointer,
            input::exit_on_escape,
            events::update_event_bus_time,
        ),
    )
    .add_systems(
        Update,
        (
            glow::toggle_glow,
            glow::sync_bloom,
            glow::apply_glow_color,
            glow::apply_paddle_glow,
            glow::light_follows_ball,
        )
            .chain(),
    )
    .add_systems(
        Update,
        (
            rig::update_rig,
            ui::toggle_debug,
            ui::update_debug_text,
            ui::update_rally_text,
            config_watcher::check_config_changes,
        ),
    )
    // Drain the bus last so every event raised this frame is logged
    .add_systems(PostUpdate, events::log_bus_events);

    add_fixed_rally_systems(&mut app);

    app.run();
}

/// Setup the scene: table, paddles, glowing ball, camera rig, and UI
fn setup(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    glow_colors: Res<GlowColors>,
    glow_settings: Res<GlowSettings>,
    debug_settings: Res<DebugSettings>,
) {
    world::spawn_table(&mut commands, &mut meshes, &mut materials);
    world::spawn_paddles(&mut commands, &mut meshes, &mut materials, &glow_settings);
    world::spawn_ball(
        &mut commands,
        &mut meshes,
        &mut materials,
        &glow_colors,
        &glow_settings,
    );
    world::spawn_camera(&mut commands, &glow_settings);

    ui::spawn_hud(&mut commands);
    ui::spawn_debug_text(&mut commands, debug_settings.visible);

    info!(
        "Glowpong ready: {} glow colors, glow {}",
        glow_colors.len(),
        if glow_settings.enabled { "on" } else { "off" }
    );
}
