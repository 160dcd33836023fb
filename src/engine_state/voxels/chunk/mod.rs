//! # Chunk Module
//!
//! This module provides the `Chunk` struct: one `CHUNK_SIZE x CHUNK_HEIGHT x
//! CHUNK_SIZE` column of the world together with the state derived from it.
//!
//! ## Ownership
//!
//! Chunks are owned exclusively by the chunk store. A chunk refers to its
//! lateral neighbors by coordinate only, so the neighbor graph holds no
//! references and has no cycles. The grids of the neighbors are borrowed for
//! the duration of a mesh build through a [`ChunkNeighborhood`].
//!
//! ## Meshes
//!
//! A chunk starts without meshes. Every build replaces both meshes wholesale
//! and bumps the chunk's mesh revision, which lets the streamer tell a fresh
//! mesh from one it has already handed to the render target.

use cgmath::Point3;

use crate::engine_state::rendering::meshing::{build_chunk_meshes, ChunkMeshes};

use self::{
    neighbors::{ChunkDirection, ChunkNeighborhood},
    voxel_grid::VoxelGrid,
};
use super::{coords::ChunkCoord, coords::CHUNK_SIZE, voxel::VoxelType};

pub mod neighbors;
pub mod voxel_grid;

/// A column of voxels in the world.
#[derive(Debug, Clone)]
pub struct Chunk {
    /// The position of this chunk in chunk coordinates (not voxel coordinates).
    coord: ChunkCoord,

    /// The voxels of the chunk.
    grid: VoxelGrid,

    /// Coordinates of the wired lateral neighbors, indexed by
    /// [`ChunkDirection::index`]. `None` until the neighbor is wired.
    neighbors: [Option<ChunkCoord>; 4],

    /// The last built meshes, if the chunk was ever meshed.
    meshes: Option<ChunkMeshes>,

    terrain_generated: bool,
    decorations_applied: bool,
    mesh_revision: u64,
}

impl Chunk {
    /// Creates a chunk from freshly generated terrain.
    ///
    /// # Arguments
    /// * `coord` - The chunk coordinates of the new chunk
    /// * `grid` - The generated voxels
    pub fn generated(coord: ChunkCoord, grid: VoxelGrid) -> Self {
        Chunk {
            coord,
            grid,
            neighbors: [None; 4],
            meshes: None,
            terrain_generated: true,
            decorations_applied: false,
            mesh_revision: 0,
        }
    }

    /// The coordinate of this chunk.
    pub fn coord(&self) -> ChunkCoord {
        self.coord
    }

    /// Read access to the voxels.
    pub fn grid(&self) -> &VoxelGrid {
        &self.grid
    }

    /// Gets the voxel at a local position.
    pub fn voxel(&self, local: Point3<usize>) -> VoxelType {
        self.grid.get(local)
    }

    /// Sets the voxel at a local position, returning the voxel it replaced.
    ///
    /// The meshes are left untouched; the caller is responsible for
    /// remeshing this chunk and the neighbors reported by
    /// [`Chunk::chunk_neighbors_of_voxel`].
    pub fn set_voxel(&mut self, local: Point3<usize>, voxel: VoxelType) -> VoxelType {
        self.grid.set(local, voxel)
    }

    /// Whether the terrain pass has run.
    pub fn terrain_generated(&self) -> bool {
        self.terrain_generated
    }

    /// Whether the decoration pass has run.
    pub fn decorations_applied(&self) -> bool {
        self.decorations_applied
    }

    /// Runs a decoration pass over the voxels unless one already ran.
    ///
    /// # Returns
    /// `true` if `decorate` was called.
    ///
    /// # Panics
    /// Panics if the terrain has not been generated yet.
    pub fn apply_decorations(&mut self, decorate: impl FnOnce(ChunkCoord, &mut VoxelGrid)) -> bool {
        assert!(
            self.terrain_generated,
            "decorating chunk {:?} before its terrain was generated",
            self.coord
        );

        if self.decorations_applied {
            return false;
        }

        decorate(self.coord, &mut self.grid);
        self.decorations_applied = true;
        true
    }

    /// The wired neighbor in a direction.
    pub fn neighbor(&self, direction: ChunkDirection) -> Option<ChunkCoord> {
        self.neighbors[direction.index()]
    }

    /// All neighbor slots, indexed by [`ChunkDirection::index`].
    pub fn neighbors(&self) -> [Option<ChunkCoord>; 4] {
        self.neighbors
    }

    /// Records the neighbor in a direction.
    pub fn set_neighbor(&mut self, direction: ChunkDirection, coord: ChunkCoord) {
        debug_assert_eq!(
            self.coord.neighbor(direction),
            coord,
            "chunk {:?} wired to a non-adjacent chunk",
            self.coord
        );
        self.neighbors[direction.index()] = Some(coord);
    }

    /// Whether every lateral neighbor has been wired.
    pub fn neighbors_wired(&self) -> bool {
        self.neighbors.iter().all(Option::is_some)
    }

    /// Lists the lateral neighbor coordinates whose meshes depend on the voxel
    /// at a local position, whether or not those chunks exist.
    ///
    /// A voxel on the `x = 0` plane touches the west neighbor, on
    /// `x = CHUNK_SIZE - 1` the east neighbor, and likewise north and south
    /// for `z`. A corner voxel touches two neighbors; an interior voxel none.
    pub fn chunk_neighbors_of_voxel(&self, local: Point3<usize>) -> Vec<ChunkCoord> {
        let last = (CHUNK_SIZE - 1) as usize;
        let mut touched = Vec::with_capacity(2);

        if local.x == 0 {
            touched.push(ChunkDirection::West);
        } else if local.x == last {
            touched.push(ChunkDirection::East);
        }

        if local.z == 0 {
            touched.push(ChunkDirection::North);
        } else if local.z == last {
            touched.push(ChunkDirection::South);
        }

        touched
            .into_iter()
            .map(|direction| self.coord.neighbor(direction))
            .collect()
    }

    /// The current meshes, if the chunk was meshed.
    pub fn meshes(&self) -> Option<&ChunkMeshes> {
        self.meshes.as_ref()
    }

    /// Whether the chunk has meshes.
    pub fn has_meshes(&self) -> bool {
        self.meshes.is_some()
    }

    /// The revision of the current meshes; 0 before the first build.
    pub fn mesh_revision(&self) -> u64 {
        self.mesh_revision
    }

    /// Builds new meshes from the grid and the neighbors' grids without
    /// installing them.
    pub fn build_meshes(&self, neighborhood: &ChunkNeighborhood) -> ChunkMeshes {
        build_chunk_meshes(
            &self.grid,
            neighborhood,
            self.coord.origin(),
            self.mesh_revision + 1,
        )
    }

    /// Installs meshes produced by [`Chunk::build_meshes`], replacing the
    /// previous ones.
    pub fn replace_meshes(&mut self, meshes: ChunkMeshes) {
        debug_assert!(meshes.revision() > self.mesh_revision, "stale meshes for {:?}", self.coord);
        self.mesh_revision = meshes.revision();
        self.meshes = Some(meshes);
    }

    /// Rebuilds the meshes in place.
    pub fn update_mesh(&mut self, neighborhood: &ChunkNeighborhood) {
        let meshes = self.build_meshes(neighborhood);
        self.replace_meshes(meshes);
    }
}
