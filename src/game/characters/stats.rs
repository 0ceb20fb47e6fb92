// Character movement stats
// Acceleration and deceleration are asymmetric per axis: x is lateral, y
// drives turning, z is forward.

use glam::Vec3;
use std::f32::consts::PI;

/// Movement tuning for the controlled character
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MovementStats {
    /// Per-axis acceleration (units/second²; y is the turn rate factor)
    pub acceleration: Vec3,
    /// Per-axis velocity damping, applied as `velocity * deceleration * dt`
    pub deceleration: Vec3,
    /// Acceleration multiplier while the sprint modifier is held
    pub sprint_multiplier: f32,
    /// Radians turned per second per unit of `acceleration.y`
    pub turn_rate: f32,
}

/// Stats used when a controller is built without custom tuning
pub const BASE_STATS: MovementStats = MovementStats {
    acceleration: Vec3::new(1.0, 0.25, 25.0),
    deceleration: Vec3::new(-0.0005, -0.0001, -5.0),
    sprint_multiplier: 2.0,
    turn_rate: 4.0 * PI,
};

impl Default for MovementStats {
    fn default() -> Self {
        BASE_STATS
    }
}

impl MovementStats {
    /// Get the standard character stats
    pub fn standard() -> Self {
        BASE_STATS
    }

    /// Yaw change in radians for one tick of a held turn key
    pub fn turn_angle(&self, dt: f32) -> f32 {
        self.turn_rate * dt * self.acceleration.y
    }
}
