//! Distance-softened shadow estimate.

use crate::Scene;
use cubo_math::{Interval, Ray, Vec3};

/// Fraction of light reaching `origin` along `light_dir`, in [0, 1].
///
/// Every object other than `skip` that the shadow ray hits contributes
/// `clamp(distance * softness, 0, 1)`; the smallest contribution wins. With
/// no occluder the point is fully lit. Occluders beyond the light still
/// count.
pub fn shadow_factor(scene: &Scene, origin: Vec3, light_dir: Vec3, skip: usize, softness: f32) -> f32 {
    let ray = Ray::new(origin, light_dir);

    scene
        .objects()
        .filter(|&(index, _)| index != skip)
        .filter_map(|(_, object)| object.intersect(&ray))
        .filter(|rec| rec.t > 0.0)
        .map(|rec| Interval::UNIT.clamp(rec.t * softness))
        .fold(1.0, f32::min)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Cube, Material};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn cube_at(center: Vec3) -> Box<Cube> {
        Box::new(Cube::new(center, 1.0, Material::default()))
    }

    #[test]
    fn test_no_occluders_is_fully_lit() {
        let mut scene = Scene::new();
        assert_eq!(shadow_factor(&scene, Vec3::ZERO, Vec3::Y, 0, 0.5), 1.0);

        // An object off to the side does not occlude
        scene.add(cube_at(Vec3::new(5.0, 0.0, 0.0)));
        assert_eq!(shadow_factor(&scene, Vec3::ZERO, Vec3::Y, usize::MAX, 0.5), 1.0);
    }

    #[test]
    fn test_near_occluder_softness() {
        let mut scene = Scene::new();
        // Bottom face at y = 1.0
        scene.add(cube_at(Vec3::new(0.0, 1.5, 0.0)));

        let factor = shadow_factor(&scene, Vec3::ZERO, Vec3::Y, usize::MAX, 0.5);
        assert!((factor - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_far_occluder_clamps_to_one() {
        let mut scene = Scene::new();
        scene.add(cube_at(Vec3::new(0.0, 10.0, 0.0)));

        assert_eq!(shadow_factor(&scene, Vec3::ZERO, Vec3::Y, usize::MAX, 0.5), 1.0);
    }

    #[test]
    fn test_most_occluding_wins() {
        let mut scene = Scene::new();
        scene.add(cube_at(Vec3::new(0.0, 1.5, 0.0))); // t = 1.0
        scene.add(cube_at(Vec3::new(0.0, 0.9, 0.0))); // t = 0.4

        let factor = shadow_factor(&scene, Vec3::ZERO, Vec3::Y, usize::MAX, 0.5);
        assert!((factor - 0.2).abs() < 1e-6);
    }

    #[test]
    fn test_skips_shaded_object() {
        let mut scene = Scene::new();
        scene.add(cube_at(Vec3::new(0.0, 1.5, 0.0)));

        assert_eq!(shadow_factor(&scene, Vec3::ZERO, Vec3::Y, 0, 0.5), 1.0);
    }

    #[test]
    fn test_factor_always_in_unit_range() {
        let mut scene = Scene::new();
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..20 {
            scene.add(cube_at(Vec3::new(
                rng.gen_range(-4.0..4.0),
                rng.gen_range(-4.0..4.0),
                rng.gen_range(-4.0..4.0),
            )));
        }

        for _ in 0..200 {
            let origin = Vec3::new(
                rng.gen_range(-5.0..5.0),
                rng.gen_range(-5.0..5.0),
                rng.gen_range(-5.0..5.0),
            );
            let dir = Vec3::new(
                rng.gen_range(-1.0..1.0),
                rng.gen_range(-1.0..1.0),
                rng.gen_range(-1.0..1.0),
            );
            if dir.length_squared() < 1e-4 {
                continue;
            }
            let factor = shadow_factor(&scene, origin, dir.normalize(), usize::MAX, 0.5);
            assert!((0.0..=1.0).contains(&factor), "factor {factor}");
        }
    }
}
