//! Hittable trait and HitRecord for ray-object intersection.

use cubo_core::Material;
use cubo_math::{Aabb, Ray, Vec3};

/// Record of a ray-object intersection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitRecord {
    /// Parameter t where the intersection occurs (always > 0)
    pub t: f32,
    /// Point of intersection
    pub point: Vec3,
    /// Unit surface normal, always pointing against the ray
    pub normal: Vec3,
}

impl HitRecord {
    /// Build a record at parameter `t` along `ray`.
    #[inline]
    pub fn new(ray: &Ray, t: f32, normal: Vec3) -> Self {
        debug_assert!(t > 0.0, "hit distance must be positive, got {t}");
        Self {
            t,
            point: ray.at(t),
            normal,
        }
    }
}

/// Trait for objects that can be hit by rays.
///
/// Implementors are immutable once the scene is built and are shared across
/// render threads.
pub trait Hittable: Send + Sync {
    /// Intersect a ray (unit direction) with this object.
    ///
    /// Returns the nearest hit strictly in front of the origin, or `None`.
    fn intersect(&self, ray: &Ray) -> Option<HitRecord>;

    /// Surface material of this object.
    fn material(&self) -> &Material;

    /// Get the axis-aligned bounding box of this object.
    fn bounding_box(&self) -> Aabb;
}
