//! Declarative scene descriptions.
//!
//! A [`SceneDescription`] lists the light, the camera rig and the blocks of a
//! world. It is renderer-agnostic: the renderer turns it into intersectable
//! primitives once, before any frame is traced.

use std::collections::BTreeMap;
use std::path::Path;

use cubo_math::{Camera, Vec3};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::material::{Light, Material};

/// Errors that can occur while loading or validating a scene.
#[derive(Error, Debug)]
pub enum SceneError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Scene parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Unknown material: {0}")]
    UnknownMaterial(String),

    #[error("Invalid primitive: {0}")]
    InvalidPrimitive(String),
}

/// Result type for scene operations.
pub type SceneResult<T> = Result<T, SceneError>;

/// Serializable camera rig settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraDescription {
    pub position: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub increment: f32,
}

impl Default for CameraDescription {
    fn default() -> Self {
        let camera = Camera::default();
        Self {
            position: camera.position,
            target: camera.target,
            up: camera.up,
            increment: camera.increment,
        }
    }
}

impl CameraDescription {
    pub fn to_camera(&self) -> Camera {
        Camera::new(self.position, self.target, self.up, self.increment)
    }
}

/// One primitive in the scene, referring to its material by name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObjectDescription {
    Cube {
        center: Vec3,
        size: f32,
        material: String,
    },
    Sphere {
        center: Vec3,
        radius: f32,
        material: String,
    },
}

impl ObjectDescription {
    /// Name of the material this object uses.
    pub fn material_name(&self) -> &str {
        match self {
            ObjectDescription::Cube { material, .. } | ObjectDescription::Sphere { material, .. } => {
                material
            }
        }
    }

    fn validate(&self) -> SceneResult<()> {
        let (kind, extent) = match self {
            ObjectDescription::Cube { size, .. } => ("cube size", *size),
            ObjectDescription::Sphere { radius, .. } => ("sphere radius", *radius),
        };
        if !(extent.is_finite() && extent > 0.0) {
            return Err(SceneError::InvalidPrimitive(format!(
                "{kind} must be positive, got {extent}"
            )));
        }
        Ok(())
    }
}

/// A complete world: light, camera, named materials and objects.
///
/// Object order is significant; it is the order the renderer scans in and
/// breaks exact distance ties with.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneDescription {
    pub name: String,
    pub light: Light,
    pub camera: CameraDescription,
    /// Scene-local materials; these shadow presets of the same name
    pub materials: BTreeMap<String, Material>,
    pub objects: Vec<ObjectDescription>,
}

impl SceneDescription {
    /// Create an empty scene with the default light and camera.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Parse and validate a scene from JSON text.
    pub fn from_json(json: &str) -> SceneResult<Self> {
        let scene: SceneDescription = serde_json::from_str(json)?;
        scene.validate()?;
        Ok(scene)
    }

    /// Resolve a material name against scene materials, then presets.
    pub fn resolve_material(&self, name: &str) -> SceneResult<Material> {
        self.materials
            .get(name)
            .copied()
            .or_else(|| Material::preset(name))
            .ok_or_else(|| SceneError::UnknownMaterial(name.to_string()))
    }

    /// Check every object has a positive extent and a resolvable material.
    pub fn validate(&self) -> SceneResult<()> {
        for (name, material) in &self.materials {
            if material.reflectivity + material.transparency > 1.0 {
                log::warn!(
                    "Material '{name}' reflects and transmits more than it receives ({} + {})",
                    material.reflectivity,
                    material.transparency
                );
            }
        }
        for object in &self.objects {
            object.validate()?;
            if let Err(e) = self.resolve_material(object.material_name()) {
                log::warn!("Scene '{}' references an unknown material", self.name);
                return Err(e);
            }
        }
        Ok(())
    }

    /// Register a named material for this scene.
    pub fn add_material(&mut self, name: impl Into<String>, material: Material) {
        self.materials.insert(name.into(), material);
    }

    /// Append a cube with the given center and edge length.
    pub fn add_cube(&mut self, center: Vec3, size: f32, material: impl Into<String>) {
        self.objects.push(ObjectDescription::Cube {
            center,
            size,
            material: material.into(),
        });
    }

    /// Append a sphere.
    pub fn add_sphere(&mut self, center: Vec3, radius: f32, material: impl Into<String>) {
        self.objects.push(ObjectDescription::Sphere {
            center,
            radius,
            material: material.into(),
        });
    }

    /// A grass block sitting on a dirt block sunk 0.2 below it.
    pub fn add_grass_and_dirt_block(&mut self, base: Vec3, dirt: &str, grass: &str) {
        self.add_cube(base + Vec3::new(0.0, -0.2, 0.0), 1.0, dirt);
        self.add_cube(base, 1.0, grass);
    }

    /// A 3x3 grid of grass-and-dirt blocks centered on `center` in the XZ plane.
    pub fn add_centered_grid(&mut self, center: Vec3, dirt: &str, grass: &str) {
        let start = center - Vec3::new(1.0, 0.0, 1.0);
        for x in 0..3 {
            for z in 0..3 {
                let position = start + Vec3::new(x as f32, 0.0, z as f32);
                self.add_grass_and_dirt_block(position, dirt, grass);
            }
        }
    }

    /// The built-in demo world: stone terraces, grass hills, a blossom tree
    /// and a column of water.
    pub fn demo() -> Self {
        let mut scene = Self::new("demo");

        scene.add_centered_grid(Vec3::new(-2.0, -1.0, 2.0), "stone", "stone");
        scene.add_centered_grid(Vec3::new(1.0, -1.0, 0.0), "stone", "stone");
        scene.add_centered_grid(Vec3::new(0.0, -2.0, 2.0), "stone", "stone");

        scene.add_centered_grid(Vec3::new(0.0, 0.0, 0.0), "dirt", "grass");
        scene.add_centered_grid(Vec3::new(-1.0, 1.0, -1.0), "dirt", "grass");
        scene.add_centered_grid(Vec3::new(-2.0, 0.0, 1.0), "dirt", "grass");

        // Trunk
        for y in 2..5 {
            scene.add_cube(Vec3::new(-1.0, y as f32, -1.0), 1.0, "wood");
        }

        // Canopy
        scene.add_centered_grid(Vec3::new(-1.0, 4.0, -1.0), "cherry_blossom", "cherry_blossom");
        scene.add_cube(Vec3::new(-1.0, 5.0, -1.0), 1.0, "cherry_blossom");

        scene.add_cube(Vec3::new(0.0, 0.0, 2.0), 1.0, "water");
        scene.add_cube(Vec3::new(0.0, -1.0, 2.0), 1.0, "water");
        scene.add_cube(Vec3::new(0.0, -2.0, 2.0), 1.0, "water");
        scene.add_cube(Vec3::new(0.0, 1.0, 1.0), 1.0, "water");

        scene
    }
}

/// Load and validate a scene description from a JSON file.
pub fn load_scene(path: impl AsRef<Path>) -> SceneResult<SceneDescription> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)?;
    let scene = SceneDescription::from_json(&text)?;

    log::info!(
        "Loaded scene '{}' from {}: {} objects, {} materials",
        scene.name,
        path.display(),
        scene.objects.len(),
        scene.materials.len()
    );

    Ok(scene)
}
