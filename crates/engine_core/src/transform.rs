//! Transform component and utilities for spatial positioning.

use glam::{Mat4, Quat, Vec3};

/// A 3D transform representing position and rotation.
///
/// Right-handed, Y up. Local forward is `-Z`, local right is `+X`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
        }
    }
}

impl Transform {
    /// Create a new transform at the given position.
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Create a new transform with position and rotation.
    pub fn from_position_rotation(position: Vec3, rotation: Quat) -> Self {
        Self { position, rotation }
    }

    /// Get the forward direction (negative Z in right-handed coordinates).
    pub fn forward(&self) -> Vec3 {
        self.rotation * -Vec3::Z
    }

    /// Get the right direction (positive X).
    pub fn right(&self) -> Vec3 {
        self.rotation * Vec3::X
    }

    /// Get the left direction (negative X).
    pub fn left(&self) -> Vec3 {
        -self.right()
    }

    /// Copy of this transform moved `distance` along its own forward axis.
    pub fn advanced(&self, distance: f32) -> Self {
        Self {
            position: self.position + self.forward() * distance,
            ..*self
        }
    }

    /// Copy of this transform yawed about its local up axis.
    /// Positive angles turn left.
    pub fn yawed(&self, angle: f32) -> Self {
        Self {
            rotation: (self.rotation * Quat::from_rotation_y(angle)).normalize(),
            ..*self
        }
    }

    /// Signed distance of `point` in front of this transform, measured along `forward()`.
    pub fn distance_ahead(&self, point: Vec3) -> f32 {
        (point - self.position).dot(self.forward())
    }

    /// Face `target`, keeping the transform upright.
    pub fn look_at(&mut self, target: Vec3, up: Vec3) {
        let forward = target - self.position;
        if forward.length_squared() > 0.0001 {
            self.rotation = Quat::from_mat4(&Mat4::look_at_rh(self.position, target, up)).inverse();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn default_faces_negative_z() {
        let t = Transform::default();
        assert!(t.forward().abs_diff_eq(Vec3::NEG_Z, 1e-6));
        assert!(t.right().abs_diff_eq(Vec3::X, 1e-6));
        assert!(t.left().abs_diff_eq(Vec3::NEG_X, 1e-6));
    }

    #[test]
    fn positive_yaw_turns_left() {
        let t = Transform::default().yawed(FRAC_PI_2);
        assert!(t.forward().abs_diff_eq(Vec3::NEG_X, 1e-5));
        let t = Transform::default().yawed(-FRAC_PI_2);
        assert!(t.forward().abs_diff_eq(Vec3::X, 1e-5));
    }

    #[test]
    fn advanced_moves_along_forward() {
        let t = Transform::default().yawed(FRAC_PI_2).advanced(4.0);
        assert!(t.position.abs_diff_eq(Vec3::new(-4.0, 0.0, 0.0), 1e-5));
    }

    #[test]
    fn distance_ahead_is_signed() {
        let t = Transform::from_position(Vec3::new(0.0, 0.0, -10.0));
        assert!((t.distance_ahead(Vec3::new(3.0, 0.0, -17.0)) - 7.0).abs() < 1e-5);
        assert!((t.distance_ahead(Vec3::new(0.0, 0.0, -5.0)) + 5.0).abs() < 1e-5);
    }

    #[test]
    fn position_and_rotation_make_the_whole_transform() {
        let rotation = Quat::from_rotation_y(FRAC_PI_2);
        let t = Transform::from_position_rotation(Vec3::X, rotation);
        assert_eq!(t, Transform { position: Vec3::X, rotation });
        assert_eq!(Transform::from_position(Vec3::Y).rotation, Quat::IDENTITY);
    }

    #[test]
    fn look_at_points_forward_at_target() {
        let mut t = Transform::from_position(Vec3::ZERO);
        t.look_at(Vec3::new(10.0, 0.0, 0.0), Vec3::Y);
        assert!(t.forward().abs_diff_eq(Vec3::X, 1e-5));
    }
}
