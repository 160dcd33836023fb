//! # Chunk Store Module
//!
//! Sparse storage of every chunk created during the session.
//!
//! Chunks live in a hash map keyed by [`ChunkCoord`], so the lattice is
//! unbounded in both directions, negative coordinates included. The store is
//! the only owner of chunks; everything else refers to them by coordinate.
//! Chunks are never removed.

use std::collections::HashMap;

use log::debug;

use super::{
    chunk::{
        neighbors::{ChunkDirection, ChunkNeighborhood},
        Chunk,
    },
    coords::ChunkCoord,
    generation::ChunkGenerator,
};

/// The sparse map of all created chunks.
#[derive(Debug, Default)]
pub struct ChunkStore {
    chunks: HashMap<ChunkCoord, Chunk>,
}

impl ChunkStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// The number of chunks created so far.
    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    /// Whether no chunk has been created.
    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// Whether a chunk exists at a coordinate.
    pub fn contains(&self, coord: ChunkCoord) -> bool {
        self.chunks.contains_key(&coord)
    }

    /// Looks up a chunk without creating it.
    pub fn get(&self, coord: ChunkCoord) -> Option<&Chunk> {
        self.chunks.get(&coord)
    }

    /// Looks up a chunk mutably without creating it.
    pub fn get_mut(&mut self, coord: ChunkCoord) -> Option<&mut Chunk> {
        self.chunks.get_mut(&coord)
    }

    /// Iterates over the coordinates of every created chunk.
    pub fn coords(&self) -> impl Iterator<Item = ChunkCoord> + '_ {
        self.chunks.keys().copied()
    }

    /// Returns the chunk at a coordinate, generating it first if it does not
    /// exist yet.
    ///
    /// The chunk is fully terrain-generated before it is registered, so no
    /// caller ever sees a partially initialized chunk. Creating a chunk
    /// remeshes every adjacent chunk that already has meshes, since their
    /// boundary faces were built against missing space.
    pub fn get_or_create(&mut self, coord: ChunkCoord, generator: &ChunkGenerator) -> &mut Chunk {
        if !self.contains(coord) {
            debug!("Generating chunk {:?}", coord);
            self.chunks.insert(coord, Chunk::generated(coord, generator.generate(coord)));
            self.remesh_meshed_neighbors(coord);
        }

        self.chunks
            .entry(coord)
            .or_insert_with(|| Chunk::generated(coord, generator.generate(coord)))
    }

    fn remesh_meshed_neighbors(&mut self, coord: ChunkCoord) {
        for direction in ChunkDirection::ALL {
            let neighbor = coord.neighbor(direction);
            if self.get(neighbor).is_some_and(Chunk::has_meshes) {
                debug!("Remeshing {:?} after {:?} appeared beside it", neighbor, coord);
                self.update_mesh(neighbor);
            }
        }
    }

    /// Ensures all four lateral neighbors of a chunk exist and links them
    /// both ways.
    ///
    /// # Panics
    /// Panics if the chunk itself does not exist.
    pub fn wire_neighbors(&mut self, coord: ChunkCoord, generator: &ChunkGenerator) {
        assert!(self.contains(coord), "wiring neighbors of missing chunk {:?}", coord);

        for direction in ChunkDirection::ALL {
            let neighbor = coord.neighbor(direction);
            self.get_or_create(neighbor, generator)
                .set_neighbor(direction.opposite(), coord);

            if let Some(chunk) = self.chunks.get_mut(&coord) {
                chunk.set_neighbor(direction, neighbor);
            }
        }

        debug_assert!(self.wiring_is_symmetric(coord), "asymmetric wiring around {:?}", coord);
    }

    /// Checks that every wired neighbor of a chunk exists and points back.
    pub fn wiring_is_symmetric(&self, coord: ChunkCoord) -> bool {
        let Some(chunk) = self.get(coord) else {
            return false;
        };

        ChunkDirection::ALL.iter().all(|&direction| match chunk.neighbor(direction) {
            None => true,
            Some(neighbor) => self
                .get(neighbor)
                .is_some_and(|other| other.neighbor(direction.opposite()) == Some(coord)),
        })
    }

    /// Borrows the grids of every existing lateral neighbor of a chunk for
    /// meshing, wired or not.
    pub fn neighborhood_of(&self, coord: ChunkCoord) -> ChunkNeighborhood<'_> {
        ChunkNeighborhood::new(ChunkDirection::ALL.map(|direction| {
            self.get(coord.neighbor(direction)).map(Chunk::grid)
        }))
    }

    /// Rebuilds a chunk's meshes from its grid and its neighbors' grids.
    ///
    /// # Returns
    /// `false` if the chunk does not exist.
    pub fn update_mesh(&mut self, coord: ChunkCoord) -> bool {
        let meshes = match self.get(coord) {
            Some(chunk) => chunk.build_meshes(&self.neighborhood_of(coord)),
            None => return false,
        };

        match self.chunks.get_mut(&coord) {
            Some(chunk) => {
                chunk.replace_meshes(meshes);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use cgmath::Point3;

    use super::*;
    use crate::engine_state::voxels::{
        generation::{GenerationMethod, TerrainConfig},
        voxel::{VoxelSide, VoxelType},
    };

    fn flat() -> ChunkGenerator {
        ChunkGenerator::new(GenerationMethod::Flat { height: 4 }, TerrainConfig::default(), 0)
    }

    #[test]
    fn get_or_create_is_idempotent() {
        let mut store = ChunkStore::new();
        let generator = flat();
        let coord = ChunkCoord::new(-5, 2);

        store.get_or_create(coord, &generator).set_voxel(Point3::new(1, 10, 1), VoxelType::Wood);
        let chunk = store.get_or_create(coord, &generator);

        assert_eq!(chunk.voxel(Point3::new(1, 10, 1)), VoxelType::Wood);
        assert!(chunk.terrain_generated());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn lookups_never_create() {
        let store = ChunkStore::new();
        assert!(store.get(ChunkCoord::new(0, 0)).is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn wiring_is_bidirectional() {
        let mut store = ChunkStore::new();
        let generator = flat();
        let coord = ChunkCoord::new(0, 0);

        store.get_or_create(coord, &generator);
        store.wire_neighbors(coord, &generator);

        assert_eq!(store.len(), 5);
        assert!(store.get(coord).unwrap().neighbors_wired());
        for direction in ChunkDirection::ALL {
            let neighbor = coord.neighbor(direction);
            assert!(store.wiring_is_symmetric(neighbor));
            assert_eq!(store.get(neighbor).unwrap().neighbor(direction.opposite()), Some(coord));
        }
    }

    #[test]
    fn neighbors_cull_boundary_faces() {
        let mut store = ChunkStore::new();
        let generator = flat();
        let coord = ChunkCoord::new(0, 0);

        store.get_or_create(coord, &generator);
        assert!(store.update_mesh(coord));
        let isolated = store.get(coord).unwrap().meshes().unwrap().opaque.clone();
        assert!(isolated.has_face_at(Point3::new(0, 0, 0), VoxelSide::Left));

        // Each of the four new neighbors remeshes the chunk as it appears.
        store.wire_neighbors(coord, &generator);
        assert_eq!(store.get(coord).unwrap().mesh_revision(), 5);
        let wired = &store.get(coord).unwrap().meshes().unwrap().opaque;
        assert!(!wired.has_face_at(Point3::new(0, 0, 0), VoxelSide::Left));
        assert!(wired.face_count() < isolated.face_count());

        assert!(!store.update_mesh(ChunkCoord::new(40, 40)));
    }

    #[test]
    fn unwired_neighbors_still_cull() {
        let mut store = ChunkStore::new();
        let generator = flat();
        let coord = ChunkCoord::new(0, 0);
        let west = coord.neighbor(ChunkDirection::West);

        store.get_or_create(coord, &generator);
        store.get_or_create(west, &generator);
        assert!(store.update_mesh(coord));

        let opaque = &store.get(coord).unwrap().meshes().unwrap().opaque;
        assert!(!opaque.has_face_at(Point3::new(0, 0, 0), VoxelSide::Left));
        assert!(opaque.has_face_at(Point3::new(15, 0, 0), VoxelSide::Right));
    }

    #[test]
    fn new_chunks_refresh_meshed_neighbors() {
        let mut store = ChunkStore::new();
        let generator = flat();
        let coord = ChunkCoord::new(3, 3);

        store.get_or_create(coord, &generator);
        store.update_mesh(coord);
        assert!(store.get(coord).unwrap().meshes().unwrap().opaque.has_face_at(Point3::new(63, 0, 48), VoxelSide::Right));

        store.get_or_create(coord.neighbor(ChunkDirection::East), &generator);

        let chunk = store.get(coord).unwrap();
        assert_eq!(chunk.mesh_revision(), 2);
        assert!(!chunk.meshes().unwrap().opaque.has_face_at(Point3::new(63, 0, 48), VoxelSide::Right));
    }
}
