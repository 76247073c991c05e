//! Glow color cycle and the systems that push it into the scene

use bevy::prelude::*;

use crate::ball::Ball;
use crate::glow::GlowSettings;
use crate::paddle::{CpuPaddle, PlayerPaddle};
use crate::palettes::PaletteDatabase;

/// Marker for the point light that rides with the ball
#[derive(Component)]
pub struct BallLight;

/// Current position in the glow palette
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct GlowColors {
    colors: Vec<Color>,
    index: usize,
}

impl Default for GlowColors {
    fn default() -> Self {
        Self::new(&PaletteDatabase::default())
    }
}

impl GlowColors {
    /// Start at the first color of the palette
    pub fn new(palette: &PaletteDatabase) -> Self {
        let colors = if palette.is_empty() {
            PaletteDatabase::default_palette().colors
        } else {
            palette.colors.clone()
        };
        Self { colors, index: 0 }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Color at the current index
    pub fn current(&self) -> Color {
        self.colors[self.index]
    }

    /// Step to the next color, wrapping at the end. Returns the new index.
    pub fn advance(&mut self) -> usize {
        self.index = (self.index + 1) % self.colors.len();
        self.index
    }

    /// Swap in a reloaded palette, keeping the index when it is still valid
    pub fn set_palette(&mut self, palette: &PaletteDatabase) {
        if palette.is_empty() {
            return;
        }
        self.colors = palette.colors.clone();
        self.index %= self.colors.len();
    }
}

/// Push the current glow color into the ball material and the ball light.
/// The ball material doubles as the glow material: its emissive term feeds the bloom.
pub fn apply_glow_color(
    glow: Res<GlowColors>,
    settings: Res<GlowSettings>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    ball_query: Query<&MeshMaterial3d<StandardMaterial>, With<Ball>>,
    mut light_query: Query<&mut PointLight, With<BallLight>>,
) {
    if !glow.is_changed() && !settings.is_changed() {
        return;
    }

    let color = glow.current();
    for material_handle in &ball_query {
        if let Some(material) = materials.get_mut(&material_handle.0) {
            material.base_color = color;
            material.emissive = settings.emissive(color);
        }
    }
    for mut light in &mut light_query {
        light.color = color;
    }
}

/// Switch the paddle emissive with the glow pass
pub fn apply_paddle_glow(
    settings: Res<GlowSettings>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    paddle_query: Query<
        &MeshMaterial3d<StandardMaterial>,
        Or<(With<PlayerPaddle>, With<CpuPaddle>)>,
    >,
) {
    if !settings.is_changed() {
        return;
    }
    for material_handle in &paddle_query {
        if let Some(material) = materials.get_mut(&material_handle.0) {
            material.emissive = settings.paddle_emissive();
        }
    }
}

/// Keep the point light on the ball
pub fn light_follows_ball(
    ball_query: Query<&Transform, (With<Ball>, Without<BallLight>)>,
    mut light_query: Query<&mut Transform, With<BallLight>>,
) {
    let Ok(ball_transform) = ball_query.single() else {
        return;
    };
    for mut light_transform in &mut light_query {
        light_transform.translation = ball_transform.translation;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advance_wraps_modulo_palette() {
        let mut glow = GlowColors::default();
        assert_eq!(glow.index(), 0);
        for expected in 1..7 {
            assert_eq!(glow.advance(), expected);
        }
        assert_eq!(glow.advance(), 0);
        assert_eq!(glow.current(), Color::srgb(1.0, 1.0, 1.0));
    }

    #[test]
    fn test_set_palette_keeps_index_in_range() {
        let mut glow = GlowColors::default();
        for _ in 0..5 {
            glow.advance();
        }
        let short = PaletteDatabase {
            colors: vec![Color::srgb(1.0, 0.0, 0.0), Color::srgb(0.0, 1.0, 0.0)],
        };
        glow.set_palette(&short);
        assert_eq!(glow.len(), 2);
        assert_eq!(glow.index(), 1);
        assert_eq!(glow.current(), Color::srgb(0.0, 1.0, 0.0));
    }

    #[test]
    fn test_empty_palette_is_ignored() {
        let mut glow = GlowColors::default();
        glow.set_palette(&PaletteDatabase { colors: Vec::new() });
        assert_eq!(glow.len(), 7);
        assert!(!GlowColors::new(&PaletteDatabase { colors: Vec::new() }).is_empty());
    }

    #[test]
    fn test_apply_glow_color_updates_material_and_light() {
        let mut app = App::new();
        app.init_resource::<Assets<StandardMaterial>>();
        app.init_resource::<GlowColors>();
        app.init_resource::<GlowSettings>();
        app.add_systems(Update, apply_glow_color);

        let handle = app
            .world_mut()
            .resource_mut::<Assets<StandardMaterial>>()
            .add(StandardMaterial::default());
        app.world_mut().spawn((Ball, MeshMaterial3d(handle.clone())));
        let light = app.world_mut().spawn((BallLight, PointLight::default())).id();

        app.world_mut().resource_mut::<GlowColors>().advance();
        app.update();

        let red = Color::srgb(1.0, 0.0, 0.0);
        let materials = app.world().resource::<Assets<StandardMaterial>>();
        let material = materials.get(&handle).unwrap();
        assert_eq!(material.base_color, red);
        assert_eq!(app.world().get::<PointLight>(light).unwrap().color, red);
    }

    #[test]
    fn test_paddle_glow_follows_settings() {
        let mut app = App::new();
        app.init_resource::<Assets<StandardMaterial>>();
        app.init_resource::<GlowSettings>();
        app.add_systems(Update, apply_paddle_glow);

        let handle = app
            .world_mut()
            .resource_mut::<Assets<StandardMaterial>>()
            .add(StandardMaterial::default());
        app.world_mut().spawn((PlayerPaddle, MeshMaterial3d(handle.clone())));
        app.world_mut().spawn((CpuPaddle, MeshMaterial3d(handle.clone())));

        app.update();
        let lit = GlowSettings::default().paddle_emissive();
        let materials = app.world().resource::<Assets<StandardMaterial>>();
        assert_eq!(materials.get(&handle).unwrap().emissive, lit);

        app.world_mut().resource_mut::<GlowSettings>().enabled = false;
        app.update();
        let materials = app.world().resource::<Assets<StandardMaterial>>();
        assert_eq!(materials.get(&handle).unwrap().emissive, LinearRgba::BLACK);
    }

    #[test]
    fn test_light_follows_ball() {
        let mut app = App::new();
        app.add_systems(Update, light_follows_ball);
        app.world_mut()
            .spawn((Ball, Transform::from_xyz(1.0, 2.0, 0.0)));
        let light = app
            .world_mut()
            .spawn((BallLight, Transform::default()))
            .id();

        app.update();

        let transform = app.world().get::<Transform>(light).unwrap();
        assert_eq!(transform.translation, Vec3::new(1.0, 2.0, 0.0));
    }
}
