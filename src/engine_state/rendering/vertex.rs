//! Vertex data structures for chunk meshes.
//!
//! This module defines the vertex format handed to the rendering
//! collaborator. The layout is plain old data so buffers can be uploaded as
//! raw bytes.

use cgmath::Point3;

use crate::engine_state::voxels::voxel::{VoxelSide, VoxelType};

/// A vertex of a chunk mesh.
///
/// Represents a single face corner in world space together with the voxel
/// type and side it belongs to. Atlas-region selection happens downstream
/// from `voxel_id` and `side`.
///
/// # Memory Layout
/// - Position: 3x i32 (12 bytes)
/// - Voxel Id: u32 (4 bytes)
/// - Side: u32 (4 bytes)
/// - Texture Coordinates: [f32; 2] (8 bytes)
///
/// Total size: 28 bytes
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    /// X coordinate in world space
    pub x: i32,
    /// Y coordinate in world space
    pub y: i32,
    /// Z coordinate in world space
    pub z: i32,
    /// Stable id of the voxel type that owns the face
    pub voxel_id: u32,
    /// Index of the voxel side (see [`VoxelSide`]) the face covers
    pub side: u32,
    /// UV texture coordinates within the face (0.0-1.0)
    pub tex_coords: [f32; 2],
}

impl Vertex {
    /// Creates a new vertex.
    ///
    /// # Arguments
    /// * `pos` - The corner position in world space
    /// * `voxel` - The voxel type that owns the face
    /// * `side` - The side of the voxel the face covers
    /// * `u` - U texture coordinate (0 or 1)
    /// * `v` - V texture coordinate (0 or 1)
    pub fn new(pos: Point3<i32>, voxel: VoxelType, side: VoxelSide, u: u8, v: u8) -> Self {
        Vertex {
            x: pos.x,
            y: pos.y,
            z: pos.z,
            voxel_id: voxel.id() as u32,
            side: side as u32,
            tex_coords: [u as f32, v as f32],
        }
    }

    /// The vertex position as a point.
    pub fn position(&self) -> Point3<i32> {
        Point3::new(self.x, self.y, self.z)
    }
}
