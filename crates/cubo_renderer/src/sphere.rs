//! Sphere primitive for ray tracing.

use crate::hittable::{HitRecord, Hittable};
use cubo_core::Material;
use cubo_math::{Aabb, Ray, Vec3};

/// A sphere primitive.
#[derive(Debug, Clone)]
pub struct Sphere {
    center: Vec3,
    radius: f32,
    material: Material,
    bbox: Aabb,
}

impl Sphere {
    /// Create a new sphere.
    pub fn new(center: Vec3, radius: f32, material: Material) -> Self {
        let radius = radius.max(0.0);
        let rvec = Vec3::splat(radius);
        let bbox = Aabb::from_points(center - rvec, center + rvec);

        Self {
            center,
            radius,
            material,
            bbox,
        }
    }
}

impl Hittable for Sphere {
    fn intersect(&self, ray: &Ray) -> Option<HitRecord> {
        let oc = self.center - ray.origin;
        let a = ray.direction.length_squared();
        let h = ray.direction.dot(oc);
        let c = oc.length_squared() - self.radius * self.radius;

        let discriminant = h * h - a * c;
        if discriminant < 0.0 {
            return None;
        }

        let sqrtd = discriminant.sqrt();

        // Nearest root in front of the origin
        let mut root = (h - sqrtd) / a;
        if root <= 0.0 {
            root = (h + sqrtd) / a;
            if root <= 0.0 {
                return None;
            }
        }

        let point = ray.at(root);
        let outward_normal = (point - self.center) / self.radius;
        // Hits from inside report the inward normal
        let normal = if ray.direction.dot(outward_normal) > 0.0 {
            -outward_normal
        } else {
            outward_normal
        };

        Some(HitRecord::new(ray, root, normal))
    }

    fn material(&self) -> &Material {
        &self.material
    }

    fn bounding_box(&self) -> Aabb {
        self.bbox
    }
}
