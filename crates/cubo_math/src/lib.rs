// Re-export glam for convenience
pub use glam::*;

// Cubo math types
mod aabb;
mod camera;
mod interval;
mod ray;

pub use aabb::{Aabb, SlabHit};
pub use camera::{Camera, CameraBasis};
pub use interval::Interval;
pub use ray::Ray;
