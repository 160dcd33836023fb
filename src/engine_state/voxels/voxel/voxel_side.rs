//! # Voxel Side Module
//!
//! This module defines the six faces of a voxel and the axis direction each
//! one faces. The meshing step iterates over them for face culling.

use cgmath::Vector3;

/// Represents the six possible faces of a voxel.
///
/// Each variant is assigned a unique integer value so it can be packed into a
/// vertex. The order is: [Front, Back, Bottom, Top, Left, Right]
#[derive(PartialEq, Eq, Hash, Copy, Clone, Debug)]
pub enum VoxelSide {
    /// The front face (facing positive Z)
    Front = 0,

    /// The back face (facing negative Z)
    Back = 1,

    /// The bottom face (facing negative Y)
    Bottom = 2,

    /// The top face (facing positive Y)
    Top = 3,

    /// The left face (facing negative X)
    Left = 4,

    /// The right face (facing positive X)
    Right = 5,
}

impl VoxelSide {
    /// Returns an array containing all six faces in a consistent order.
    ///
    /// The order is: [Front, Back, Bottom, Top, Left, Right]
    pub fn all() -> [VoxelSide; 6] {
        [
            VoxelSide::Front,
            VoxelSide::Back,
            VoxelSide::Bottom,
            VoxelSide::Top,
            VoxelSide::Left,
            VoxelSide::Right,
        ]
    }

    /// The outward unit normal of this face, in voxel steps.
    pub fn normal(self) -> Vector3<i32> {
        match self {
            VoxelSide::Front => Vector3::new(0, 0, 1),
            VoxelSide::Back => Vector3::new(0, 0, -1),
            VoxelSide::Bottom => Vector3::new(0, -1, 0),
            VoxelSide::Top => Vector3::new(0, 1, 0),
            VoxelSide::Left => Vector3::new(-1, 0, 0),
            VoxelSide::Right => Vector3::new(1, 0, 0),
        }
    }

    /// The face on the opposite side of a voxel.
    pub fn opposite(self) -> VoxelSide {
        match self {
            VoxelSide::Front => VoxelSide::Back,
            VoxelSide::Back => VoxelSide::Front,
            VoxelSide::Bottom => VoxelSide::Top,
            VoxelSide::Top => VoxelSide::Bottom,
            VoxelSide::Left => VoxelSide::Right,
            VoxelSide::Right => VoxelSide::Left,
        }
    }
}
