//! Mesh generation for voxel chunks.
//!
//! This module handles the conversion of voxel data into surface geometry.
//! The key goals are:
//! 1. Emit only faces that can actually be seen
//! 2. Keep opaque and translucent geometry apart so they can use different
//!    material settings
//! 3. Produce buffers that can be uploaded as raw bytes
//!
//! # Architecture
//! - `mesh/`: Contains the face, mesh and meshing algorithm definitions
//!
//! Meshes are rebuilt wholesale: a chunk never patches an existing buffer.

/// Core mesh generation algorithms and data structures.
mod mesh;

// Re-export the mesh module's public interface for external use
pub use mesh::*;
