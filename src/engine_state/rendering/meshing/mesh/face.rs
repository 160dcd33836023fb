use cgmath::Point3;

use crate::engine_state::voxels::voxel::{VoxelSide, VoxelType};

/// Represents a single visible quad face of a voxel.
///
/// A face carries the world position of the voxel it belongs to, the voxel's
/// type and which side of the voxel it covers. That is everything the
/// rendering collaborator needs to pick an atlas region for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Face {
    /// World voxel coordinate of the voxel owning this face
    pub position: Point3<i32>,
    /// The type of the owning voxel, used for texture selection downstream
    pub voxel: VoxelType,
    /// Which side of the voxel this face covers
    pub side: VoxelSide,
}

impl Face {
    /// Creates a new face for the voxel at the given world coordinates.
    pub fn new(position: Point3<i32>, voxel: VoxelType, side: VoxelSide) -> Self {
        Face {
            position,
            voxel,
            side,
        }
    }

    /// Computes the four corners of the face in world space.
    ///
    /// # Returns
    /// The corners in the order `[lower-left, lower-right, upper-left,
    /// upper-right]`, as seen from outside the voxel looking at the face.
    /// Walking `ll -> lr -> ur` is therefore counter-clockwise from the
    /// outside.
    pub fn corners(&self) -> [Point3<i32>; 4] {
        let Point3 { x, y, z } = self.position;

        match self.side {
            VoxelSide::Front => [
                Point3::new(x, y, z + 1),
                Point3::new(x + 1, y, z + 1),
                Point3::new(x, y + 1, z + 1),
                Point3::new(x + 1, y + 1, z + 1),
            ],

            VoxelSide::Back => [
                Point3::new(x + 1, y, z),
                Point3::new(x, y, z),
                Point3::new(x + 1, y + 1, z),
                Point3::new(x, y + 1, z),
            ],

            VoxelSide::Bottom => [
                Point3::new(x, y, z),
                Point3::new(x + 1, y, z),
                Point3::new(x, y, z + 1),
                Point3::new(x + 1, y, z + 1),
            ],

            VoxelSide::Top => [
                Point3::new(x, y + 1, z + 1),
                Point3::new(x + 1, y + 1, z + 1),
                Point3::new(x, y + 1, z),
                Point3::new(x + 1, y + 1, z),
            ],

            VoxelSide::Left => [
                Point3::new(x, y, z),
                Point3::new(x, y, z + 1),
                Point3::new(x, y + 1, z),
                Point3::new(x, y + 1, z + 1),
            ],

            VoxelSide::Right => [
                Point3::new(x + 1, y, z + 1),
                Point3::new(x + 1, y, z),
                Point3::new(x + 1, y + 1, z + 1),
                Point3::new(x + 1, y + 1, z),
            ],
        }
    }

    /// The voxel on the other side of this face.
    pub fn facing_voxel(&self) -> Point3<i32> {
        self.position + self.side.normal()
    }
}
