use crate::Vec3;

/// A ray in 3D space with an origin and a direction.
///
/// Every ray the tracer casts carries a unit-length direction; callers
/// normalize before constructing.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    /// Create a new ray.
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self { origin, direction }
    }

    /// Get the point along the ray at parameter t.
    ///
    /// Returns: origin + t * direction
    #[inline]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    /// Component-wise reciprocal of the direction.
    ///
    /// A zero component maps to an infinity carrying the sign of that zero,
    /// which the slab test relies on.
    #[inline]
    pub fn inv_direction(&self) -> Vec3 {
        self.direction.recip()
    }
}
