// Math utilities and the character transform

use glam::{Quat, Vec3};

/// Local axis the character faces along
pub const LOCAL_FORWARD: Vec3 = Vec3::Z;
/// Local axis pointing to the character's side
pub const LOCAL_SIDEWAYS: Vec3 = Vec3::X;

/// Position and orientation of a renderable in world space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    pub const IDENTITY: Self = Self {
        position: Vec3::ZERO,
        rotation: Quat::IDENTITY,
    };

    /// World-space forward direction (unit length)
    pub fn forward(&self) -> Vec3 {
        (self.rotation * LOCAL_FORWARD).normalize()
    }

    /// World-space sideways direction (unit length)
    pub fn sideways(&self) -> Vec3 {
        (self.rotation * LOCAL_SIDEWAYS).normalize()
    }

    /// Compose a rotation of `angle` radians about the vertical axis onto the current orientation
    pub fn rotate_yaw(&mut self, angle: f32) {
        let turn = Quat::from_axis_angle(Vec3::Y, angle);
        self.rotation = (self.rotation * turn).normalize();
    }
}

/// Clamp the magnitude of `value` to `limit.abs()`, keeping the sign of `value`
pub fn clamp_magnitude(value: f32, limit: f32) -> f32 {
    value.signum() * value.abs().min(limit.abs())
}

/// Treat negative or non-finite frame deltas as zero
pub fn sanitize_delta(dt: f32) -> f32 {
    if dt.is_finite() && dt > 0.0 {
        dt
    } else {
        0.0
    }
}

/// Linear interpolation
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}
