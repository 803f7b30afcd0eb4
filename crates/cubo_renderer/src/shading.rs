//! Local illumination (ambient + diffuse + specular) and the reflect/refract
//! helpers used by the ray caster.

use cubo_core::{Color, Light, Material};
use cubo_math::Vec3;

/// The three local lighting terms at a surface point.
///
/// The sum is not energy-normalized and is left unclamped; channels well
/// above 1.0 are expected under a bright light and are only clamped when the
/// image is written.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Phong {
    pub ambient: Color,
    pub diffuse: Color,
    pub specular: Color,
}

impl Phong {
    /// ambient + diffuse + specular
    #[inline]
    pub fn total(&self) -> Color {
        self.ambient + self.diffuse + self.specular
    }
}

/// Evaluate the lighting model.
///
/// `normal`, `light_dir` (surface toward light) and `view_dir` (surface toward
/// the ray origin) must be unit length. `shadow` scales the diffuse term
/// only; highlights stay visible inside soft shadows.
pub fn phong(
    material: &Material,
    light: &Light,
    normal: Vec3,
    light_dir: Vec3,
    view_dir: Vec3,
    shadow: f32,
    ambient_strength: f32,
) -> Phong {
    let ambient = material.diffuse * ambient_strength;

    let lambert = normal.dot(light_dir).max(0.0) * shadow;
    let diffuse = material.diffuse * light.intensity * lambert * material.albedo;

    let reflect_dir = reflect(-light_dir, normal);
    let spec_intensity = reflect_dir
        .dot(view_dir)
        .max(0.0)
        .powf(material.specular_coefficient);
    let specular = light.color * light.intensity * spec_intensity * material.specular_albedo;

    Phong {
        ambient,
        diffuse,
        specular,
    }
}

/// Reflect a vector about a normal.
#[inline]
pub fn reflect(v: Vec3, n: Vec3) -> Vec3 {
    v - 2.0 * v.dot(n) * n
}

/// Refract `incident` through a surface with normal `n` (facing the incident
/// ray) using `eta` as the ratio of indices.
///
/// Returns `None` on total internal reflection.
#[inline]
pub fn refract(incident: Vec3, n: Vec3, eta: f32) -> Option<Vec3> {
    let cos_i = n.dot(incident);
    let k = 1.0 - eta * eta * (1.0 - cos_i * cos_i);
    if k < 0.0 {
        return None;
    }
    Some(eta * incident - (eta * cos_i + k.sqrt()) * n)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn light_above() -> Light {
        Light::new(Vec3::new(0.0, 10.0, 0.0), 2.0, Color::ONE)
    }

    #[test]
    fn test_ambient_term() {
        let mat = Material::new(Color::new(0.5, 0.25, 1.0));
        let shade = phong(&mat, &light_above(), Vec3::Y, Vec3::Y, Vec3::Y, 1.0, 0.4);

        assert_eq!(shade.ambient, Color::new(0.5, 0.25, 1.0) * 0.4);
    }

    #[test]
    fn test_diffuse_facing_light() {
        let mat = Material::new(Color::ONE);
        let shade = phong(&mat, &light_above(), Vec3::Y, Vec3::Y, Vec3::X, 1.0, 0.4);

        // intensity 2.0 * cos 1.0 * albedo 0.2
        assert!((shade.diffuse - Color::splat(0.4)).length() < 1e-6);
    }

    #[test]
    fn test_back_facing_light_has_no_diffuse_or_specular() {
        let mut mat = Material::new(Color::ONE);
        mat.specular_coefficient = 8.0;
        let shade = phong(&mat, &light_above(), Vec3::NEG_Y, Vec3::Y, Vec3::NEG_Y, 1.0, 0.4);

        assert_eq!(shade.diffuse, Color::ZERO);
        assert_eq!(shade.specular, Color::ZERO);
        assert_eq!(shade.total(), shade.ambient);
    }

    #[test]
    fn test_specular_peak_on_mirror_direction() {
        let mut mat = Material::new(Color::ZERO);
        mat.specular_coefficient = 50.0;
        mat.specular_albedo = 0.5;
        let light_dir = Vec3::new(1.0, 1.0, 0.0).normalize();
        let view_dir = Vec3::new(-1.0, 1.0, 0.0).normalize();

        let shade = phong(&mat, &light_above(), Vec3::Y, light_dir, view_dir, 1.0, 0.4);
        // intensity 2.0 * 1.0^50 * 0.5
        assert!((shade.specular - Color::ONE).length() < 1e-4);

        let off_peak = phong(&mat, &light_above(), Vec3::Y, light_dir, Vec3::Y, 1.0, 0.4);
        assert!(off_peak.specular.x < shade.specular.x);
    }

    #[test]
    fn test_shadow_scales_diffuse() {
        let mat = Material::new(Color::ONE);
        let lit = phong(&mat, &light_above(), Vec3::Y, Vec3::Y, Vec3::X, 1.0, 0.4);
        let half = phong(&mat, &light_above(), Vec3::Y, Vec3::Y, Vec3::X, 0.5, 0.4);

        assert!((half.diffuse * 2.0 - lit.diffuse).length() < 1e-6);
        assert_eq!(half.ambient, lit.ambient);
        assert_eq!(half.specular, lit.specular);
    }

    #[test]
    fn test_reflect() {
        let v = Vec3::new(1.0, -1.0, 0.0);
        assert_eq!(reflect(v, Vec3::Y), Vec3::new(1.0, 1.0, 0.0));
    }

    #[test]
    fn test_refract_unit_ratio_passes_straight() {
        let dir = Vec3::new(1.0, -1.0, 0.0).normalize();
        let out = refract(dir, Vec3::Y, 1.0).unwrap();
        assert!((out - dir).length() < 1e-6);
    }

    #[test]
    fn test_refract_normal_incidence() {
        let out = refract(Vec3::NEG_Z, Vec3::Z, 1.33).unwrap();
        assert!((out - Vec3::NEG_Z).length() < 1e-6);
    }

    #[test]
    fn test_refract_is_unit_length() {
        let dir = Vec3::new(0.3, -1.0, 0.2).normalize();
        let out = refract(dir, Vec3::Y, 1.2).unwrap();
        assert!((out.length() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_refract_total_internal_reflection() {
        let grazing = Vec3::new(1.0, -0.1, 0.0).normalize();
        assert!(refract(grazing, Vec3::Y, 1.33).is_none());
    }
}
