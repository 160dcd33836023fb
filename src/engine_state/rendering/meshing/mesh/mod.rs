//! Mesh generation for voxel rendering.
//!
//! This module converts voxel data into surface geometry the rendering
//! collaborator can upload as-is.
//!
//! # Architecture
//! - [`ChunkMeshes`]: The opaque and translucent meshes of one chunk
//! - [`ChunkMesh`]: Faces, vertices and indices of one mesh
//! - [`Face`]: A single visible face of a voxel
//! - Culled meshing: emits every face not hidden by its neighbor

mod culled;
mod face;
mod mesh;

pub use culled::build_chunk_meshes;
pub use face::Face;
pub use mesh::*;
