//! # Coordinate Module
//!
//! Chunk-lattice constants and the mapping between world voxel coordinates,
//! chunk coordinates and chunk-local coordinates.
//!
//! The horizontal lattice is unbounded in both directions. Mapping always
//! floors toward negative infinity, so the voxel at `x = -1` lives in chunk
//! `-1`, local `x = CHUNK_SIZE - 1`. Vertically the world is a single slab:
//! `y` must lie in `[0, CHUNK_HEIGHT)` or there is no voxel at all.

use cgmath::Point3;
use serde::{Deserialize, Serialize};

use super::chunk::neighbors::ChunkDirection;

/// The lateral side length of a chunk in voxels.
pub const CHUNK_SIZE: i32 = 16;
/// The vertical extent of every chunk (and of the world) in voxels.
pub const CHUNK_HEIGHT: i32 = 64;
/// The number of voxels in one horizontal layer of a chunk.
pub const CHUNK_LAYER_SIZE: usize = (CHUNK_SIZE * CHUNK_SIZE) as usize;
/// The total number of voxels in a chunk.
pub const CHUNK_VOLUME: usize = CHUNK_LAYER_SIZE * CHUNK_HEIGHT as usize;

/// Identifies a chunk on the horizontal lattice.
///
/// `x` and `z` are measured in chunks, not voxels. Chunk `(cx, cz)` covers the
/// world voxels `cx * CHUNK_SIZE .. (cx + 1) * CHUNK_SIZE` on x (and likewise
/// on z) for the full height of the world.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ChunkCoord {
    /// Chunk index along the world x axis.
    pub x: i32,
    /// Chunk index along the world z axis.
    pub z: i32,
}

impl ChunkCoord {
    /// Creates a chunk coordinate from its lattice indices.
    pub const fn new(x: i32, z: i32) -> Self {
        ChunkCoord { x, z }
    }

    /// Returns the chunk that owns the given world voxel column.
    pub fn of_voxel(position: Point3<i32>) -> Self {
        ChunkCoord {
            x: position.x.div_euclid(CHUNK_SIZE),
            z: position.z.div_euclid(CHUNK_SIZE),
        }
    }

    /// Returns the chunk containing a continuous world-space position.
    pub fn of_world_position(position: Point3<f32>) -> Self {
        ChunkCoord {
            x: (position.x / CHUNK_SIZE as f32).floor() as i32,
            z: (position.z / CHUNK_SIZE as f32).floor() as i32,
        }
    }

    /// Returns the coordinate displaced by `(dx, dz)` chunks.
    ///
    /// Saturates at the ends of the lattice.
    pub fn offset(self, dx: i32, dz: i32) -> Self {
        ChunkCoord::new(self.x.saturating_add(dx), self.z.saturating_add(dz))
    }

    /// Returns the adjacent chunk coordinate in the given lateral direction.
    pub fn neighbor(self, direction: ChunkDirection) -> Self {
        let (dx, dz) = direction.offset();
        self.offset(dx, dz)
    }

    /// The world position of this chunk's local voxel `(0, 0, 0)`.
    pub fn origin(self) -> Point3<i32> {
        Point3::new(self.x.saturating_mul(CHUNK_SIZE), 0, self.z.saturating_mul(CHUNK_SIZE))
    }

    /// The world-space centre of the chunk's footprint at ground level.
    pub fn center(self) -> Point3<f32> {
        let half = CHUNK_SIZE as f32 / 2.0;
        Point3::new(
            self.x as f32 * CHUNK_SIZE as f32 + half,
            0.0,
            self.z as f32 * CHUNK_SIZE as f32 + half,
        )
    }
}

/// Splits a world voxel coordinate into its owning chunk and the chunk-local
/// position.
///
/// Returns `None` when `y` is outside `[0, CHUNK_HEIGHT)`; such coordinates
/// have no voxel.
pub fn split_voxel(position: Point3<i32>) -> Option<(ChunkCoord, Point3<usize>)> {
    if !(0..CHUNK_HEIGHT).contains(&position.y) {
        return None;
    }

    let local = Point3::new(
        position.x.rem_euclid(CHUNK_SIZE) as usize,
        position.y as usize,
        position.z.rem_euclid(CHUNK_SIZE) as usize,
    );

    Some((ChunkCoord::of_voxel(position), local))
}

/// Floors a continuous world position onto the voxel lattice.
pub fn voxel_of(position: Point3<f32>) -> Point3<i32> {
    Point3::new(
        position.x.floor() as i32,
        position.y.floor() as i32,
        position.z.floor() as i32,
    )
}

/// Converts a chunk-local position back into world voxel coordinates.
pub fn to_world(coord: ChunkCoord, local: Point3<usize>) -> Point3<i32> {
    let origin = coord.origin();
    Point3::new(
        origin.x + local.x as i32,
        local.y as i32,
        origin.z + local.z as i32,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_coordinates_floor_toward_negative_infinity() {
        assert_eq!(ChunkCoord::of_voxel(Point3::new(-1, 0, -1)), ChunkCoord::new(-1, -1));
        assert_eq!(ChunkCoord::of_voxel(Point3::new(-16, 0, 15)), ChunkCoord::new(-1, 0));
        assert_eq!(ChunkCoord::of_voxel(Point3::new(-17, 0, 16)), ChunkCoord::new(-2, 1));
    }

    #[test]
    fn every_voxel_lies_inside_its_chunk() {
        for v in -100..100 {
            let coord = ChunkCoord::of_voxel(Point3::new(v, 5, -v));
            assert!(coord.x * CHUNK_SIZE <= v && v < (coord.x + 1) * CHUNK_SIZE);
            assert!(coord.z * CHUNK_SIZE <= -v && -v < (coord.z + 1) * CHUNK_SIZE);
        }
    }

    #[test]
    fn split_and_rejoin() {
        let position = Point3::new(-1, 10, 33);
        let (coord, local) = split_voxel(position).unwrap();

        assert_eq!(coord, ChunkCoord::new(-1, 2));
        assert_eq!(local, Point3::new(15, 10, 1));
        assert_eq!(to_world(coord, local), position);
    }

    #[test]
    fn out_of_range_heights_have_no_voxel() {
        assert!(split_voxel(Point3::new(0, -1, 0)).is_none());
        assert!(split_voxel(Point3::new(0, CHUNK_HEIGHT, 0)).is_none());
        assert!(split_voxel(Point3::new(0, CHUNK_HEIGHT - 1, 0)).is_some());
    }

    #[test]
    fn offsets_saturate() {
        let edge = ChunkCoord::new(i32::MAX, i32::MIN);

        assert_eq!(edge.offset(3, -3), edge);
        assert_eq!(edge.offset(-1, 1), ChunkCoord::new(i32::MAX - 1, i32::MIN + 1));
        assert_eq!(edge.origin(), Point3::new(i32::MAX, 0, i32::MIN));
    }

    #[test]
    fn world_positions_floor_like_voxels() {
        assert_eq!(
            ChunkCoord::of_world_position(Point3::new(-0.5, 3.0, 15.9)),
            ChunkCoord::new(-1, 0)
        );
        assert_eq!(voxel_of(Point3::new(-0.5, 3.7, 15.9)), Point3::new(-1, 3, 15));
    }
}
