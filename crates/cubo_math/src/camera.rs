use glam::{Quat, Vec3};

/// Orthonormal camera frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraBasis {
    pub forward: Vec3,
    pub right: Vec3,
    pub up: Vec3,
}

/// Orbiting look-at camera.
///
/// Owned by the render loop; the tracer only reads it.
#[derive(Debug, Clone, Copy)]
pub struct Camera {
    pub position: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    /// Degrees per unit of `rotate` input
    pub increment: f32,
}

impl Camera {
    /// Create a new camera
    pub fn new(position: Vec3, target: Vec3, up: Vec3, increment: f32) -> Self {
        Self {
            position,
            target,
            up,
            increment,
        }
    }

    /// Derive the forward/right/up frame from position, target and up hint.
    pub fn basis(&self) -> CameraBasis {
        let forward = (self.target - self.position).normalize();
        let right = forward.cross(self.up).normalize();
        let up = right.cross(forward).normalize();
        CameraBasis { forward, right, up }
    }

    /// Move along the viewing direction (negative moves away from the target).
    pub fn move_forward(&mut self, delta: f32) {
        let forward = (self.target - self.position).normalize();
        self.position += forward * delta;
    }

    /// Orbit the position around the target.
    ///
    /// `delta_x` turns about world Y, `delta_y` about world X, each scaled
    /// by `increment` degrees.
    pub fn rotate(&mut self, delta_x: f32, delta_y: f32) {
        let yaw = Quat::from_axis_angle(Vec3::Y, (delta_x * self.increment).to_radians());
        let pitch = Quat::from_axis_angle(Vec3::X, (delta_y * self.increment).to_radians());
        let rotation = (yaw * pitch).normalize();
        self.position = rotation * (self.position - self.target) + self.target;
    }

    /// Distance from the position to the target.
    pub fn distance(&self) -> f32 {
        self.position.distance(self.target)
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Vec3::new(8.0, 8.0, 8.0), Vec3::ZERO, Vec3::Y, 10.0)
    }
}
