//! # Chunk Neighbors Module
//!
//! Lateral directions between chunks and the borrowed view of neighbor grids
//! used while meshing.

use super::voxel_grid::VoxelGrid;
use crate::engine_state::voxels::{coords::CHUNK_SIZE, voxel::VoxelType};

/// The four lateral directions in which a chunk can have a neighbor.
///
/// North is toward negative z and west toward negative x.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ChunkDirection {
    /// Toward negative z.
    North = 0,
    /// Toward positive x.
    East = 1,
    /// Toward positive z.
    South = 2,
    /// Toward negative x.
    West = 3,
}

impl ChunkDirection {
    /// All lateral directions, indexed by their discriminant.
    pub const ALL: [ChunkDirection; 4] = [
        ChunkDirection::North,
        ChunkDirection::East,
        ChunkDirection::South,
        ChunkDirection::West,
    ];

    /// The `(dx, dz)` chunk step in this direction.
    pub fn offset(self) -> (i32, i32) {
        match self {
            ChunkDirection::North => (0, -1),
            ChunkDirection::East => (1, 0),
            ChunkDirection::South => (0, 1),
            ChunkDirection::West => (-1, 0),
        }
    }

    /// The direction pointing back.
    pub fn opposite(self) -> ChunkDirection {
        match self {
            ChunkDirection::North => ChunkDirection::South,
            ChunkDirection::East => ChunkDirection::West,
            ChunkDirection::South => ChunkDirection::North,
            ChunkDirection::West => ChunkDirection::East,
        }
    }

    /// The slot of this direction in a chunk's neighbor array.
    pub fn index(self) -> usize {
        self as usize
    }

    /// The direction a local position steps into when it leaves the chunk
    /// laterally, or `None` if `(x, z)` is still inside.
    pub fn leaving(x: i32, z: i32) -> Option<ChunkDirection> {
        if x < 0 {
            Some(ChunkDirection::West)
        } else if x >= CHUNK_SIZE {
            Some(ChunkDirection::East)
        } else if z < 0 {
            Some(ChunkDirection::North)
        } else if z >= CHUNK_SIZE {
            Some(ChunkDirection::South)
        } else {
            None
        }
    }
}

/// Read-only access to the voxel grids of a chunk's lateral neighbors.
///
/// A missing slot means the neighbor has not been created (or not wired)
/// yet. Faces facing a missing neighbor are treated as exposed so the edge of
/// the loaded world never shows holes.
#[derive(Clone, Copy, Default)]
pub struct ChunkNeighborhood<'a> {
    sides: [Option<&'a VoxelGrid>; 4],
}

impl<'a> ChunkNeighborhood<'a> {
    /// Creates a neighborhood from grids indexed by [`ChunkDirection::index`].
    pub fn new(sides: [Option<&'a VoxelGrid>; 4]) -> Self {
        ChunkNeighborhood { sides }
    }

    /// A neighborhood with no neighbors at all.
    pub fn isolated() -> Self {
        ChunkNeighborhood::default()
    }

    /// The neighbor grid in a direction, if present.
    pub fn side(&self, direction: ChunkDirection) -> Option<&'a VoxelGrid> {
        self.sides[direction.index()]
    }

    /// Looks up the voxel at a local position that lies just outside the
    /// chunk, wrapping it into the neighbor's local space.
    ///
    /// Returns air when the neighbor is missing.
    pub fn voxel_across(&self, direction: ChunkDirection, x: i32, y: i32, z: i32) -> VoxelType {
        self.side(direction)
            .and_then(|grid| grid.get_checked(x.rem_euclid(CHUNK_SIZE), y, z.rem_euclid(CHUNK_SIZE)))
            .unwrap_or(VoxelType::Air)
    }
}
