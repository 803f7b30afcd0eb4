//! Cubo Renderer - CPU Whitted-style ray tracing for block worlds.
//!
//! Every pixel casts one primary ray; the nearest block it strikes is shaded
//! with ambient, diffuse and specular terms under a single point light, and
//! reflective or transparent materials spawn secondary rays up to a fixed
//! recursion depth.

mod bucket;
mod camera;
mod cube;
mod hittable;
mod renderer;
mod scene;
mod shading;
mod shadow;
mod sphere;

pub use bucket::{generate_buckets, render_bucket, render_parallel, Bucket, BucketResult, DEFAULT_BUCKET_SIZE};
pub use camera::RayGenerator;
pub use cube::Cube;
pub use hittable::{HitRecord, Hittable};
pub use renderer::{color_to_rgba, render, ImageBuffer, RenderConfig, RenderContext, TraceStats};
pub use scene::{Scene, SceneHit};
pub use shading::{phong, reflect, refract, Phong};
pub use shadow::shadow_factor;
pub use sphere::Sphere;

/// Re-export common scene and math types
pub use cubo_core::{Color, Light, Material};
pub use cubo_math::{Aabb, Camera, Interval, Ray, Vec3};
