//! Utility functions for glowpong

use bevy::prelude::*;

use crate::constants::{POINTER_TRAVEL, TABLE_HEIGHT, TABLE_WIDTH};

/// Axis for bounce reflection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReflectAxis {
    /// Reflect on vertical axis (horizontal collision - negate X)
    Vertical,
    /// Reflect on horizontal axis (vertical collision - negate Y)
    Horizontal,
}

/// Negate one component of a direction vector (elastic bounce, speed preserved)
pub fn reflect(direction: &mut Vec3, axis: ReflectAxis) {
    match axis {
        ReflectAxis::Vertical => direction.x = -direction.x,
        ReflectAxis::Horizontal => direction.y = -direction.y,
    }
}

/// Move a value toward a target by a maximum delta
pub fn move_toward(current: f32, target: f32, max_delta: f32) -> f32 {
    if (target - current).abs() <= max_delta {
        target
    } else {
        current + (target - current).signum() * max_delta
    }
}

/// Map a cursor height (pixels, measured down from the top of the window)
/// to a paddle height on the table. Top edge maps to +POINTER_TRAVEL/2.
pub fn pointer_to_table_y(cursor_y: f32, window_height: f32) -> f32 {
    if window_height <= 0.0 {
        return 0.0;
    }
    -(cursor_y / window_height * POINTER_TRAVEL - POINTER_TRAVEL / 2.0)
}

/// True if a point lies inside the table's play area (walls excluded)
pub fn on_table(position: Vec2) -> bool {
    position.x.abs() <= TABLE_WIDTH / 2.0 && position.y.abs() <= TABLE_HEIGHT / 2.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reflect_axes() {
        let mut dir = Vec3::new(1.0, 0.5, 0.0);
        reflect(&mut dir, ReflectAxis::Vertical);
        assert_eq!(dir, Vec3::new(-1.0, 0.5, 0.0));
        reflect(&mut dir, ReflectAxis::Horizontal);
        assert_eq!(dir, Vec3::new(-1.0, -0.5, 0.0));
    }

    #[test]
    fn test_pointer_mapping_endpoints() {
        assert!((pointer_to_table_y(0.0, 1080.0) - 4.0).abs() < 1e-5);
        assert!(pointer_to_table_y(540.0, 1080.0).abs() < 1e-5);
        assert!((pointer_to_table_y(1080.0, 1080.0) + 4.0).abs() < 1e-5);
    }

    #[test]
    fn test_pointer_mapping_zero_height_window() {
        assert_eq!(pointer_to_table_y(100.0, 0.0), 0.0);
    }

    #[test]
    fn test_move_toward() {
        assert_eq!(move_toward(0.0, 1.0, 0.25), 0.25);
        assert_eq!(move_toward(0.0, -1.0, 0.25), -0.25);
        assert_eq!(move_toward(0.9, 1.0, 0.25), 1.0);
    }

    #[test]
    fn test_on_table() {
        assert!(on_table(Vec2::ZERO));
        assert!(on_table(Vec2::new(7.5, -5.0)));
        assert!(!on_table(Vec2::new(7.6, 0.0)));
        assert!(!on_table(Vec2::new(0.0, 5.1)));
    }
}
