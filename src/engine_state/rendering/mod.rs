//! Rendering-facing side of the voxel engine.
//!
//! This module contains everything the engine hands to a renderer: mesh
//! generation, the vertex format, shared materials with their presentation
//! modes, and the render target contract. Drawing itself happens outside this
//! crate.

pub mod materials;
pub mod meshing;
pub mod target;
mod vertex;

// Re-export commonly used types
pub use materials::{MaterialState, Materials, Presentation, PresentationMode};
pub use meshing::{ChunkMesh, ChunkMeshes, Face, MeshKind};
pub use target::{AttachedMesh, RenderTarget, SceneTarget};
pub use vertex::Vertex;
