//! Surface materials and the point light.

use cubo_math::Vec3;
use serde::{Deserialize, Serialize};

/// Color type alias (RGB, 0-1 per channel, unclamped while shading)
pub type Color = Vec3;

/// Build a color from 8-bit channels.
pub fn rgb8(r: u8, g: u8, b: u8) -> Color {
    Color::new(r as f32, g as f32, b as f32) / 255.0
}

/// Phong-style surface description.
///
/// `reflectivity` and `transparency` are independent weights; nothing
/// forces their sum to stay below one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Material {
    /// Base color used by the ambient and diffuse terms
    pub diffuse: Color,
    /// Diffuse weight
    pub albedo: f32,
    /// Specular weight
    pub specular_albedo: f32,
    /// Phong shininess exponent
    pub specular_coefficient: f32,
    /// Mirror weight (0-1)
    pub reflectivity: f32,
    /// Refraction weight (0-1)
    pub transparency: f32,
    /// Index of refraction (>= 1)
    pub refraction_index: f32,
}

impl Default for Material {
    fn default() -> Self {
        Self::new(rgb8(128, 128, 128))
    }
}

/// Names accepted by [`Material::preset`].
pub const PRESET_NAMES: [&str; 10] = [
    "grass",
    "dirt",
    "water",
    "wood",
    "cherry_blossom",
    "stone",
    "rubber",
    "ivory",
    "mirror",
    "glass",
];

impl Material {
    /// Opaque matte material with the given color.
    pub fn new(diffuse: Color) -> Self {
        Self {
            diffuse,
            albedo: 0.2,
            specular_albedo: 0.2,
            specular_coefficient: 0.0,
            reflectivity: 0.0,
            transparency: 0.0,
            refraction_index: 1.0,
        }
    }

    /// Fully specified material.
    pub fn with_params(
        diffuse: Color,
        albedo: f32,
        specular_albedo: f32,
        specular_coefficient: f32,
        reflectivity: f32,
        transparency: f32,
        refraction_index: f32,
    ) -> Self {
        Self {
            diffuse,
            albedo,
            specular_albedo,
            specular_coefficient,
            reflectivity,
            transparency,
            refraction_index,
        }
    }

    /// True if the material spawns a reflected ray.
    pub fn is_reflective(&self) -> bool {
        self.reflectivity > 0.0
    }

    /// True if the material spawns a refracted ray.
    pub fn is_transparent(&self) -> bool {
        self.transparency > 0.0
    }

    pub fn grass() -> Self {
        Self::with_params(rgb8(0, 230, 0), 0.2, 0.2, 0.0, 0.0, 0.0, 1.0)
    }

    pub fn dirt() -> Self {
        Self::with_params(rgb8(125, 84, 41), 0.2, 0.2, 1.0, 0.0, 0.0, 1.0)
    }

    pub fn water() -> Self {
        Self::with_params(rgb8(173, 216, 230), 0.1, 0.5, 10.0, 0.5, 0.1, 1.33)
    }

    pub fn wood() -> Self {
        Self::with_params(rgb8(224, 199, 174), 0.2, 0.2, 0.0, 0.0, 0.0, 1.0)
    }

    pub fn cherry_blossom() -> Self {
        Self::with_params(rgb8(255, 183, 197), 0.6, 0.8, 10.0, 0.0, 0.0, 1.0)
    }

    pub fn stone() -> Self {
        Self::with_params(rgb8(128, 128, 128), 0.6, 0.3, 30.0, 0.05, 0.0, 1.0)
    }

    pub fn rubber() -> Self {
        Self::with_params(rgb8(80, 0, 0), 0.9, 0.1, 10.0, 0.0, 0.0, 1.0)
    }

    pub fn ivory() -> Self {
        Self::with_params(rgb8(100, 100, 80), 0.5, 0.5, 50.0, 0.4, 0.0, 1.0)
    }

    pub fn mirror() -> Self {
        Self::with_params(rgb8(255, 255, 255), 0.0, 10.0, 1425.0, 0.9, 0.0, 1.0)
    }

    pub fn glass() -> Self {
        Self::with_params(rgb8(255, 255, 255), 0.0, 10.0, 1425.0, 0.2, 1.0, 1.0)
    }

    /// Look up a named preset.
    pub fn preset(name: &str) -> Option<Self> {
        let material = match name {
            "grass" => Self::grass(),
            "dirt" => Self::dirt(),
            "water" => Self::water(),
            "wood" => Self::wood(),
            "cherry_blossom" => Self::cherry_blossom(),
            "stone" => Self::stone(),
            "rubber" => Self::rubber(),
            "ivory" => Self::ivory(),
            "mirror" => Self::mirror(),
            "glass" => Self::glass(),
            _ => return None,
        };
        Some(material)
    }
}

/// A single point light.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Light {
    pub position: Vec3,
    /// Scalar multiplier applied to the diffuse and specular terms
    pub intensity: f32,
    pub color: Color,
}

impl Light {
    pub fn new(position: Vec3, intensity: f32, color: Color) -> Self {
        Self {
            position,
            intensity,
            color,
        }
    }
}

impl Default for Light {
    fn default() -> Self {
        Self::new(Vec3::new(4.0, 5.0, 0.0), 100.0, rgb8(253, 158, 0))
    }
}
