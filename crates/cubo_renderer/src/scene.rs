//! Scene index: the flat list of primitives and nearest-hit lookup.

use crate::hittable::{HitRecord, Hittable};
use crate::{Cube, Sphere};
use cubo_core::{Material, ObjectDescription, SceneDescription, SceneResult};
use cubo_math::{Aabb, Ray};

/// Nearest hit found by [`Scene::closest_hit`].
#[derive(Clone, Copy)]
pub struct SceneHit<'a> {
    /// Position of the hit object in scene order
    pub index: usize,
    pub object: &'a dyn Hittable,
    pub record: HitRecord,
}

impl<'a> SceneHit<'a> {
    pub fn material(&self) -> &'a Material {
        self.object.material()
    }
}

/// An append-only list of hittable objects.
///
/// Every query scans all objects; there is no acceleration structure.
pub struct Scene {
    objects: Vec<Box<dyn Hittable>>,
    bbox: Aabb,
}

impl Scene {
    /// Create a new empty scene.
    pub fn new() -> Self {
        Self {
            objects: Vec::new(),
            bbox: Aabb::EMPTY,
        }
    }

    /// Build the primitives of a scene description, in description order.
    pub fn from_description(desc: &SceneDescription) -> SceneResult<Self> {
        desc.validate()?;

        let mut scene = Self::new();
        for object in &desc.objects {
            let material = desc.resolve_material(object.material_name())?;
            match *object {
                ObjectDescription::Cube { center, size, .. } => {
                    scene.add(Box::new(Cube::new(center, size, material)));
                }
                ObjectDescription::Sphere { center, radius, .. } => {
                    scene.add(Box::new(Sphere::new(center, radius, material)));
                }
            }
        }

        let bounds = scene.bounds();
        log::info!(
            "Built scene '{}' with {} objects, bounds ({:.2}, {:.2}, {:.2}) to ({:.2}, {:.2}, {:.2})",
            desc.name,
            scene.len(),
            bounds.x.min,
            bounds.y.min,
            bounds.z.min,
            bounds.x.max,
            bounds.y.max,
            bounds.z.max
        );

        Ok(scene)
    }

    /// Add an object to the scene.
    pub fn add(&mut self, object: Box<dyn Hittable>) {
        self.bbox = Aabb::surrounding(&self.bbox, &object.bounding_box());
        self.objects.push(object);
    }

    /// Get the number of objects.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Check if the scene is empty.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Union of all object bounds (`Aabb::EMPTY` for an empty scene).
    pub fn bounds(&self) -> Aabb {
        self.bbox
    }

    /// Iterate over objects with their scene index.
    pub fn objects(&self) -> impl Iterator<Item = (usize, &dyn Hittable)> + '_ {
        self.objects.iter().map(|o| &**o).enumerate()
    }

    /// Find the nearest object hit by `ray`.
    ///
    /// On an exact distance tie the object added first wins.
    pub fn closest_hit(&self, ray: &Ray) -> Option<SceneHit<'_>> {
        let mut closest: Option<SceneHit<'_>> = None;

        for (index, object) in self.objects() {
            let Some(record) = object.intersect(ray) else {
                continue;
            };
            if closest.map_or(true, |c| record.t < c.record.t) {
                closest = Some(SceneHit {
                    index,
                    object,
                    record,
                });
            }
        }

        closest
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}
