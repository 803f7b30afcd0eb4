//! Primary ray generation.

use cubo_math::{Camera, Ray};
use std::f32::consts::PI;

/// Maps pixel coordinates to world-space primary rays.
///
/// Pixel (0, 0) is the top-left corner; rays pass through pixel centers.
#[derive(Debug, Clone, Copy)]
pub struct RayGenerator {
    pub image_width: u32,
    pub image_height: u32,
    /// Vertical field of view in radians
    pub fov: f32,
}

impl RayGenerator {
    /// 800x600 with a 60 degree vertical field of view.
    pub fn new() -> Self {
        Self {
            image_width: 800,
            image_height: 600,
            fov: PI / 3.0,
        }
    }

    /// Set image resolution.
    pub fn with_resolution(mut self, width: u32, height: u32) -> Self {
        self.image_width = width;
        self.image_height = height;
        self
    }

    /// Set the vertical field of view (radians).
    pub fn with_fov(mut self, fov: f32) -> Self {
        self.fov = fov;
        self
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.image_width as f32 / self.image_height as f32
    }

    /// Generate the primary ray through pixel (x, y).
    pub fn primary_ray(&self, camera: &Camera, x: u32, y: u32) -> Ray {
        let half_height = (self.fov / 2.0).tan();

        let screen_x = (2.0 * (x as f32 + 0.5)) / self.image_width as f32 - 1.0;
        let screen_y = -(2.0 * (y as f32 + 0.5)) / self.image_height as f32 + 1.0;
        let screen_x = screen_x * self.aspect_ratio() * half_height;
        let screen_y = screen_y * half_height;

        let basis = camera.basis();
        let direction = (basis.forward + basis.right * screen_x + basis.up * screen_y).normalize();

        Ray::new(camera.position, direction)
    }
}

impl Default for RayGenerator {
    fn default() -> Self {
        Self::new()
    }
}
