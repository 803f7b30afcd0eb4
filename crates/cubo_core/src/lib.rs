//! Cubo Core - Scene data for the block ray tracer.
//!
//! This crate provides:
//!
//! - **Surface and light types**: `Material` (with the named presets of the
//!   demo world), `Light`, `Color`
//! - **Scene descriptions**: `SceneDescription`, loadable from JSON and
//!   buildable in code, including the built-in demo world
//!
//! # Example
//!
//! ```ignore
//! use cubo_core::load_scene;
//!
//! let scene = load_scene("scenes/terrace.json")?;
//! println!("Loaded {} objects", scene.objects.len());
//! ```

pub mod material;
pub mod scene;

// Re-export commonly used types
pub use material::{rgb8, Color, Light, Material};
pub use scene::{
    load_scene, CameraDescription, ObjectDescription, SceneDescription, SceneError, SceneResult,
};
