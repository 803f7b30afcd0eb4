//! Axis-aligned cube primitive.

use crate::hittable::{HitRecord, Hittable};
use cubo_core::Material;
use cubo_math::{Aabb, Ray, Vec3};

/// An axis-aligned cube given by its center and edge length.
#[derive(Debug, Clone)]
pub struct Cube {
    bounds: Aabb,
    material: Material,
}

impl Cube {
    /// Create a new cube. `size` must be positive.
    pub fn new(center: Vec3, size: f32, material: Material) -> Self {
        debug_assert!(size > 0.0, "cube edge length must be positive");
        Self {
            bounds: Aabb::from_center_size(center, size),
            material,
        }
    }
}

impl Hittable for Cube {
    fn intersect(&self, ray: &Ray) -> Option<HitRecord> {
        let hit = self.bounds.slab_hit(ray)?;
        Some(HitRecord::new(ray, hit.t, hit.normal))
    }

    fn material(&self) -> &Material {
        &self.material
    }

    fn bounding_box(&self) -> Aabb {
        self.bounds
    }
}
