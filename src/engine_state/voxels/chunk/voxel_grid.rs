//! # Voxel Grid Module
//!
//! Dense storage for one chunk's voxels.
//!
//! Alongside the dense array of voxel types the grid keeps an occupancy bit
//! vector (1 bit per voxel, set for every non-air voxel). The meshing scan
//! walks the set bits only, so the mostly-empty upper part of a chunk costs
//! one bit per voxel rather than a full visit.
//!
//! Voxels are laid out in layers: x varies fastest, then z, then y.

use bitvec::prelude::*;
use cgmath::Point3;

use crate::engine_state::voxels::{
    coords::{CHUNK_HEIGHT, CHUNK_LAYER_SIZE, CHUNK_SIZE, CHUNK_VOLUME},
    voxel::VoxelType,
};

/// A dense `CHUNK_SIZE x CHUNK_HEIGHT x CHUNK_SIZE` array of voxel types.
///
/// Pure data: the grid knows nothing about its chunk's position, its
/// neighbors or geometry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VoxelGrid {
    voxels: Vec<VoxelType>,
    /// One bit per voxel; set when the voxel is not air.
    occupied: BitVec,
}

impl Default for VoxelGrid {
    fn default() -> Self {
        Self::new()
    }
}

impl VoxelGrid {
    /// Creates a grid filled with air.
    pub fn new() -> Self {
        VoxelGrid {
            voxels: vec![VoxelType::Air; CHUNK_VOLUME],
            occupied: bitvec![0; CHUNK_VOLUME],
        }
    }

    /// Creates a grid where every voxel has the given type.
    pub fn filled(voxel: VoxelType) -> Self {
        VoxelGrid {
            voxels: vec![voxel; CHUNK_VOLUME],
            occupied: BitVec::repeat(!voxel.is_empty(), CHUNK_VOLUME),
        }
    }

    fn index(local: Point3<usize>) -> usize {
        debug_assert!(
            Self::contains(local.x as i32, local.y as i32, local.z as i32),
            "local position {:?} outside the chunk",
            local
        );
        local.x + CHUNK_SIZE as usize * local.z + CHUNK_LAYER_SIZE * local.y
    }

    fn position_of(index: usize) -> Point3<usize> {
        let size = CHUNK_SIZE as usize;
        Point3::new(
            index % size,
            index / CHUNK_LAYER_SIZE,
            (index % CHUNK_LAYER_SIZE) / size,
        )
    }

    /// Whether a (possibly negative) local position lies inside the grid.
    pub fn contains(x: i32, y: i32, z: i32) -> bool {
        (0..CHUNK_SIZE).contains(&x) && (0..CHUNK_HEIGHT).contains(&y) && (0..CHUNK_SIZE).contains(&z)
    }

    /// Gets the voxel at a local position.
    ///
    /// # Panics
    /// Panics if the position is outside the grid.
    pub fn get(&self, local: Point3<usize>) -> VoxelType {
        self.voxels[Self::index(local)]
    }

    /// Gets the voxel at a signed local position, or `None` outside the grid.
    pub fn get_checked(&self, x: i32, y: i32, z: i32) -> Option<VoxelType> {
        if Self::contains(x, y, z) {
            Some(self.get(Point3::new(x as usize, y as usize, z as usize)))
        } else {
            None
        }
    }

    /// Sets the voxel at a local position and returns the voxel it replaced.
    ///
    /// # Panics
    /// Panics if the position is outside the grid.
    pub fn set(&mut self, local: Point3<usize>, voxel: VoxelType) -> VoxelType {
        let index = Self::index(local);
        self.occupied.set(index, !voxel.is_empty());
        std::mem::replace(&mut self.voxels[index], voxel)
    }

    /// Whether the voxel at a local position is anything other than air.
    pub fn is_occupied(&self, local: Point3<usize>) -> bool {
        self.occupied[Self::index(local)]
    }

    /// The number of non-air voxels in the grid.
    pub fn occupied_count(&self) -> usize {
        self.occupied.count_ones()
    }

    /// Whether the grid holds nothing but air.
    pub fn is_empty(&self) -> bool {
        self.occupied.not_any()
    }

    /// Iterates over every non-air voxel with its local position, in layout
    /// order.
    pub fn occupied(&self) -> impl Iterator<Item = (Point3<usize>, VoxelType)> + '_ {
        self.occupied
            .iter_ones()
            .map(move |index| (Self::position_of(index), self.voxels[index]))
    }

    /// The local height of the topmost opaque voxel in a column, if any.
    pub fn surface_height(&self, x: usize, z: usize) -> Option<usize> {
        (0..CHUNK_HEIGHT as usize)
            .rev()
            .find(|&y| self.get(Point3::new(x, y, z)).is_opaque())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_tracks_occupancy() {
        let mut grid = VoxelGrid::new();
        assert!(grid.is_empty());

        let local = Point3::new(3, 40, 7);
        assert_eq!(grid.set(local, VoxelType::Stone), VoxelType::Air);
        assert!(grid.is_occupied(local));
        assert_eq!(grid.occupied_count(), 1);

        assert_eq!(grid.set(local, VoxelType::Air), VoxelType::Stone);
        assert!(!grid.is_occupied(local));
        assert!(grid.is_empty());
    }

    #[test]
    fn occupied_iteration_reports_positions() {
        let mut grid = VoxelGrid::new();
        grid.set(Point3::new(15, 0, 0), VoxelType::Dirt);
        grid.set(Point3::new(0, 63, 15), VoxelType::Water);
        grid.set(Point3::new(4, 9, 12), VoxelType::Wood);

        let found: Vec<_> = grid.occupied().collect();
        assert_eq!(
            found,
            vec![
                (Point3::new(15, 0, 0), VoxelType::Dirt),
                (Point3::new(4, 9, 12), VoxelType::Wood),
                (Point3::new(0, 63, 15), VoxelType::Water),
            ]
        );
    }

    #[test]
    fn checked_access_rejects_outside_positions() {
        let grid = VoxelGrid::filled(VoxelType::Stone);
        assert_eq!(grid.get_checked(0, 0, 0), Some(VoxelType::Stone));
        assert_eq!(grid.get_checked(-1, 0, 0), None);
        assert_eq!(grid.get_checked(0, CHUNK_HEIGHT, 0), None);
        assert_eq!(grid.get_checked(0, 0, CHUNK_SIZE), None);
        assert_eq!(grid.occupied_count(), CHUNK_VOLUME);
    }

    #[test]
    fn surface_height_skips_water() {
        let mut grid = VoxelGrid::new();
        grid.set(Point3::new(2, 5, 2), VoxelType::Sand);
        grid.set(Point3::new(2, 6, 2), VoxelType::Water);
        assert_eq!(grid.surface_height(2, 2), Some(5));
        assert_eq!(grid.surface_height(3, 3), None);
    }
}
