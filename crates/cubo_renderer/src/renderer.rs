//! Recursive ray caster.
//!
//! Implements Whitted-style ray tracing with:
//! - Nearest-hit lookup over the flat scene list
//! - Ambient/diffuse/specular shading with distance-softened shadows
//! - Mirror reflection and refraction, bounded by a maximum depth

use crate::{phong, reflect, refract, shadow_factor, RayGenerator, Scene};
use cubo_core::{rgb8, Color, Light, SceneDescription, SceneResult};
use cubo_math::{Camera, Interval, Ray, Vec3};
use std::path::Path;

/// Render configuration.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Recursion depth at which tracing stops and returns the background
    pub max_depth: u32,
    /// Color returned when a ray hits nothing or runs out of depth
    pub background: Color,
    /// Fraction of the diffuse color always present
    pub ambient_strength: f32,
    /// Offset along the normal for secondary ray origins
    pub bias: f32,
    /// Shadow distance scale; see [`shadow_factor`]
    pub shadow_softness: f32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            max_depth: 5,
            background: rgb8(127, 169, 255),
            ambient_strength: 0.4,
            bias: 1e-4,
            shadow_softness: 0.5,
        }
    }
}

/// Counters gathered while tracing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TraceStats {
    /// Number of `cast_ray` evaluations (primary and secondary)
    pub rays: u64,
    /// Deepest recursion level entered
    pub max_depth_reached: u32,
}

impl TraceStats {
    /// Combine counters from another trace.
    pub fn merge(&mut self, other: TraceStats) {
        self.rays += other.rays;
        self.max_depth_reached = self.max_depth_reached.max(other.max_depth_reached);
    }
}

/// Everything a render pass reads: scene, light, camera and settings.
///
/// Built once, then shared immutably by all render threads.
pub struct RenderContext {
    pub scene: Scene,
    pub light: Light,
    pub camera: Camera,
    pub rays: RayGenerator,
    pub config: RenderConfig,
}

impl RenderContext {
    pub fn new(scene: Scene, light: Light, camera: Camera) -> Self {
        Self {
            scene,
            light,
            camera,
            rays: RayGenerator::default(),
            config: RenderConfig::default(),
        }
    }

    /// Build the primitives, light and camera of a scene description.
    pub fn from_description(desc: &SceneDescription) -> SceneResult<Self> {
        let scene = Scene::from_description(desc)?;
        Ok(Self::new(scene, desc.light, desc.camera.to_camera()))
    }

    /// Set the primary ray generator.
    pub fn with_rays(mut self, rays: RayGenerator) -> Self {
        self.rays = rays;
        self
    }

    /// Set the render configuration.
    pub fn with_config(mut self, config: RenderConfig) -> Self {
        self.config = config;
        self
    }

    /// Compute the color seen along a ray.
    ///
    /// `direction` must be unit length. `depth` counts bounces already taken;
    /// primary rays start at 0.
    pub fn cast_ray(&self, origin: Vec3, direction: Vec3, depth: u32) -> Color {
        let mut stats = TraceStats::default();
        self.cast_ray_with_stats(origin, direction, depth, &mut stats)
    }

    /// [`cast_ray`](Self::cast_ray), also counting rays and recursion depth.
    pub fn cast_ray_with_stats(
        &self,
        origin: Vec3,
        direction: Vec3,
        depth: u32,
        stats: &mut TraceStats,
    ) -> Color {
        debug_assert!(
            (direction.length() - 1.0).abs() < 1e-3,
            "ray direction must be unit length, got {direction:?}"
        );
        stats.rays += 1;
        stats.max_depth_reached = stats.max_depth_reached.max(depth);

        let config = &self.config;
        let Some(hit) = self.scene.closest_hit(&Ray::new(origin, direction)) else {
            return config.background;
        };
        if depth >= config.max_depth {
            return config.background;
        }

        let material = hit.material();
        let point = hit.record.point;
        let normal = hit.record.normal;

        let light_dir = (self.light.position - point).normalize();
        let view_dir = (origin - point).normalize();

        let shadow = shadow_factor(
            &self.scene,
            point + normal * config.bias,
            light_dir,
            hit.index,
            config.shadow_softness,
        );
        let local = phong(
            material,
            &self.light,
            normal,
            light_dir,
            view_dir,
            shadow,
            config.ambient_strength,
        );

        let mut reflected = Color::ZERO;
        if material.is_reflective() && depth < config.max_depth {
            let reflect_origin = point + normal * config.bias;
            let reflect_dir = reflect(direction, normal);
            reflected = self.cast_ray_with_stats(reflect_origin, reflect_dir, depth + 1, stats)
                * material.reflectivity;
        }

        let mut refracted = Color::ZERO;
        if material.is_transparent() && depth < config.max_depth {
            // Total internal reflection transmits nothing
            if let Some(refract_dir) = refract(direction, normal, material.refraction_index) {
                let refract_origin = point - normal * config.bias;
                refracted = self.cast_ray_with_stats(refract_origin, refract_dir, depth + 1, stats)
                    * material.transparency;
            }
        }

        local.total() + reflected + refracted
    }

    /// Trace the primary ray of pixel (x, y).
    pub fn render_pixel(&self, x: u32, y: u32, stats: &mut TraceStats) -> Color {
        let ray = self.rays.primary_ray(&self.camera, x, y);
        self.cast_ray_with_stats(ray.origin, ray.direction, 0, stats)
    }
}

/// Clamp a color to [0, 1] and convert to 8-bit RGBA.
///
/// No gamma is applied.
pub fn color_to_rgba(color: Color) -> [u8; 4] {
    let r = (255.0 * Interval::UNIT.clamp(color.x)) as u8;
    let g = (255.0 * Interval::UNIT.clamp(color.y)) as u8;
    let b = (255.0 * Interval::UNIT.clamp(color.z)) as u8;
    [r, g, b, 255]
}

/// Simple image buffer for storing render output.
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Color>,
}

impl ImageBuffer {
    /// Create a new image buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::ZERO; (width * height) as usize],
        }
    }

    /// Get the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> Color {
        self.pixels[(y * self.width + x) as usize]
    }

    /// Set the pixel at (x, y).
    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        self.pixels[(y * self.width + x) as usize] = color;
    }

    /// Convert to RGBA bytes (for display or saving).
    pub fn to_rgba(&self) -> Vec<u8> {
        let rgba: Vec<[u8; 4]> = self.pixels.iter().map(|c| color_to_rgba(*c)).collect();
        bytemuck::cast_slice(&rgba).to_vec()
    }

    /// Write the image as an 8-bit RGBA PNG.
    pub fn save_png(&self, path: impl AsRef<Path>) -> image::ImageResult<()> {
        image::save_buffer(
            path,
            &self.to_rgba(),
            self.width,
            self.height,
            image::ColorType::Rgba8,
        )
    }
}

/// Render the entire image on the calling thread.
///
/// Reference path for tests; [`crate::render_parallel`] produces the same
/// pixels.
pub fn render(ctx: &RenderContext) -> (ImageBuffer, TraceStats) {
    let mut image = ImageBuffer::new(ctx.rays.image_width, ctx.rays.image_height);
    let mut stats = TraceStats::default();

    for y in 0..image.height {
        for x in 0..image.width {
            let color = ctx.render_pixel(x, y, &mut stats);
            image.set(x, y, color);
        }
    }

    (image, stats)
}
