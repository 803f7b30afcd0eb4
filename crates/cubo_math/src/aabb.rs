use crate::{Interval, Ray, Vec3};

/// Tolerance used when matching the chosen hit distance back to the axis
/// that produced it.
pub const NORMAL_EPSILON: f32 = 0.001;

/// Axis-Aligned Bounding Box.
///
/// An AABB is defined by three intervals (one per axis) that bound a 3D volume.
/// Besides bounding other primitives it is itself the solid block the tracer
/// renders, so [`Aabb::slab_hit`] also recovers the face normal.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Aabb {
    pub x: Interval,
    pub y: Interval,
    pub z: Interval,
}

/// Result of a successful ray/box slab test.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SlabHit {
    /// Ray parameter of the hit, always > 0
    pub t: f32,
    /// Unit axis normal, facing against the ray
    pub normal: Vec3,
}

impl Aabb {
    /// Create an AABB from two corner points.
    pub fn from_points(a: Vec3, b: Vec3) -> Self {
        let x = Interval::new(a.x.min(b.x), a.x.max(b.x));
        let y = Interval::new(a.y.min(b.y), a.y.max(b.y));
        let z = Interval::new(a.z.min(b.z), a.z.max(b.z));
        Self { x, y, z }
    }

    /// Create a cube-shaped AABB with the given center and edge length.
    pub fn from_center_size(center: Vec3, size: f32) -> Self {
        let half = size / 2.0;
        Self {
            x: Interval::centered(center.x, half),
            y: Interval::centered(center.y, half),
            z: Interval::centered(center.z, half),
        }
    }

    /// Create an AABB that surrounds two other AABBs.
    pub fn surrounding(box0: &Aabb, box1: &Aabb) -> Self {
        Self {
            x: Interval::surrounding(&box0.x, &box1.x),
            y: Interval::surrounding(&box0.y, &box1.y),
            z: Interval::surrounding(&box0.z, &box1.z),
        }
    }

    /// Minimum corner.
    pub fn min(&self) -> Vec3 {
        Vec3::new(self.x.min, self.y.min, self.z.min)
    }

    /// Maximum corner.
    pub fn max(&self) -> Vec3 {
        Vec3::new(self.x.max, self.y.max, self.z.max)
    }

    /// Returns true if every axis interval is non-empty.
    pub fn is_empty(&self) -> bool {
        self.x.min > self.x.max || self.y.min > self.y.max || self.z.min > self.z.max
    }

    /// Intersect a ray with the box using the slab method.
    ///
    /// The per-axis entry/exit distances are computed with the reciprocal
    /// direction, so an axis the ray runs parallel to contributes `±inf`
    /// and drops out of the min/max reduction. When the origin is inside the
    /// box the exit distance is reported instead of the entry distance.
    ///
    /// The normal is the unit vector of the axis whose slab produced the
    /// chosen distance (ties go to x, then y, then z), signed to oppose the
    /// ray direction on that axis.
    pub fn slab_hit(&self, ray: &Ray) -> Option<SlabHit> {
        let inv_dir = ray.inv_direction();

        let t1 = (self.min() - ray.origin) * inv_dir;
        let t2 = (self.max() - ray.origin) * inv_dir;

        let t_near = t1.min(t2);
        let t_far = t1.max(t2);

        let t_enter = t_near.max_element();
        let t_exit = t_far.min_element();

        if t_enter > t_exit || t_exit < 0.0 {
            return None;
        }

        let (t, candidates) = if t_enter > 0.0 {
            (t_enter, t_near)
        } else {
            (t_exit, t_far)
        };
        if t <= 0.0 {
            return None;
        }

        let axis = (0..3)
            .find(|&i| (t - candidates[i]).abs() < NORMAL_EPSILON)
            .unwrap_or(0);
        let mut normal = Vec3::ZERO;
        normal[axis] = -ray.direction[axis].signum();

        Some(SlabHit { t, normal })
    }

    /// Static constants
    pub const EMPTY: Aabb = Aabb {
        x: Interval::EMPTY,
        y: Interval::EMPTY,
        z: Interval::EMPTY,
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_box() -> Aabb {
        Aabb::from_center_size(Vec3::ZERO, 1.0)
    }

    #[test]
    fn test_aabb_from_points() {
        let a = Vec3::new(10.0, 0.0, 0.0);
        let b = Vec3::new(0.0, 10.0, 10.0);
        let aabb = Aabb::from_points(a, b);

        assert_eq!(aabb.min(), Vec3::ZERO);
        assert_eq!(aabb.max(), Vec3::splat(10.0));
    }

    #[test]
    fn test_aabb_from_center_size() {
        let aabb = Aabb::from_center_size(Vec3::new(1.0, 2.0, 3.0), 2.0);

        assert_eq!(aabb.min(), Vec3::new(0.0, 1.0, 2.0));
        assert_eq!(aabb.max(), Vec3::new(2.0, 3.0, 4.0));
    }

    #[test]
    fn test_aabb_surrounding() {
        let box1 = Aabb::from_points(Vec3::ZERO, Vec3::new(5.0, 5.0, 5.0));
        let box2 = Aabb::from_points(Vec3::new(3.0, 3.0, 3.0), Vec3::new(10.0, 10.0, 10.0));
        let surrounding = Aabb::surrounding(&box1, &box2);

        assert_eq!(surrounding.x.min, 0.0);
        assert_eq!(surrounding.x.max, 10.0);
        assert!(Aabb::EMPTY.is_empty());
        assert_eq!(Aabb::surrounding(&Aabb::EMPTY, &box1), box1);
    }

    #[test]
    fn test_slab_hit_front_face() {
        let ray = Ray::new(Vec3::new(0.0, 0.0, -5.0), Vec3::Z);
        let hit = unit_box().slab_hit(&ray).unwrap();

        assert!((hit.t - 4.5).abs() < 1e-6);
        assert_eq!(hit.normal, Vec3::new(0.0, 0.0, -1.0));
    }

    #[test]
    fn test_slab_hit_each_axis_normal_opposes_ray() {
        let cases = [
            (Vec3::new(5.0, 0.0, 0.0), -Vec3::X, Vec3::X),
            (Vec3::new(-5.0, 0.0, 0.0), Vec3::X, -Vec3::X),
            (Vec3::new(0.0, 5.0, 0.0), -Vec3::Y, Vec3::Y),
            (Vec3::new(0.0, -5.0, 0.0), Vec3::Y, -Vec3::Y),
            (Vec3::new(0.0, 0.0, 5.0), -Vec3::Z, Vec3::Z),
        ];

        for (origin, direction, expected) in cases {
            let hit = unit_box().slab_hit(&Ray::new(origin, direction)).unwrap();
            assert_eq!(hit.normal, expected, "origin {origin:?}");
            assert!(hit.normal.dot(direction) <= 0.0);
        }
    }

    #[test]
    fn test_slab_miss_and_behind() {
        // Ray pointing away
        let ray = Ray::new(Vec3::new(0.0, 0.0, -5.0), Vec3::new(0.0, 0.0, -1.0));
        assert!(unit_box().slab_hit(&ray).is_none());

        // Ray missing the box
        let ray = Ray::new(Vec3::new(10.0, 0.0, 0.0), Vec3::new(0.0, 0.0, 1.0));
        assert!(unit_box().slab_hit(&ray).is_none());
    }

    #[test]
    fn test_slab_hit_from_inside_uses_exit() {
        let ray = Ray::new(Vec3::new(0.0, 0.2, 0.0), Vec3::Y);
        let hit = unit_box().slab_hit(&ray).unwrap();

        assert!((hit.t - 0.3).abs() < 1e-6);
        assert_eq!(hit.normal, -Vec3::Y);
        assert!(hit.normal.dot(ray.direction) <= 0.0);
    }

    #[test]
    fn test_slab_hit_parallel_axis_inside_slab() {
        // Zero x component; origin.x lies strictly inside the x slab.
        let direction = Vec3::new(0.0, -1.0, -1.0).normalize();
        let ray = Ray::new(Vec3::new(0.25, 3.0, 3.0), direction);
        let hit = unit_box().slab_hit(&ray).unwrap();

        assert!(hit.t.is_finite() && hit.t > 0.0);
        assert!(hit.normal.is_finite());
        assert!((hit.normal.length() - 1.0).abs() < 1e-6);
        assert_eq!(hit.normal.x, 0.0);
    }

    #[test]
    fn test_slab_parallel_axis_outside_slab_misses() {
        let ray = Ray::new(Vec3::new(2.0, 3.0, 0.0), -Vec3::Y);
        assert!(unit_box().slab_hit(&ray).is_none());
    }

    #[test]
    fn test_slab_hit_edge_tie_prefers_x() {
        // Diagonal ray through the x/y edge enters both slabs at once.
        let direction = Vec3::new(-1.0, -1.0, 0.0).normalize();
        let ray = Ray::new(Vec3::new(2.5, 2.5, 0.0), direction);
        let hit = unit_box().slab_hit(&ray).unwrap();

        assert_eq!(hit.normal, Vec3::X);
    }
}
