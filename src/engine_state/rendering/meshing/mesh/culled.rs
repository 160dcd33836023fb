//! Culled per-face meshing.
//!
//! Every non-air voxel is tested against its six axis-aligned neighbors and
//! only the faces that can be seen are emitted. Neighbors across the chunk's
//! lateral faces are read from the neighbor chunks' grids; a missing neighbor
//! counts as air so the edge of the loaded world is closed.

use cgmath::Point3;
use log::trace;
use web_time::Instant;

use super::{face::Face, mesh::ChunkMeshes};
use crate::engine_state::voxels::{
    chunk::{
        neighbors::{ChunkDirection, ChunkNeighborhood},
        voxel_grid::VoxelGrid,
    },
    coords::CHUNK_HEIGHT,
    voxel::{VoxelSide, VoxelType},
};

/// Looks up the voxel on the other side of `side` from a local position.
///
/// # Arguments
/// * `grid` - The grid of the chunk being meshed
/// * `neighborhood` - The grids of the chunk's lateral neighbors
/// * `local` - The local position of the voxel whose face is tested
/// * `side` - The side being tested
///
/// # Returns
/// The adjacent voxel. Positions above or below the world are air.
fn adjacent_voxel(
    grid: &VoxelGrid,
    neighborhood: &ChunkNeighborhood,
    local: Point3<usize>,
    side: VoxelSide,
) -> VoxelType {
    let normal = side.normal();
    let x = local.x as i32 + normal.x;
    let y = local.y as i32 + normal.y;
    let z = local.z as i32 + normal.z;

    if !(0..CHUNK_HEIGHT).contains(&y) {
        return VoxelType::Air;
    }

    match ChunkDirection::leaving(x, z) {
        Some(direction) => neighborhood.voxel_across(direction, x, y, z),
        None => grid.get(Point3::new(x as usize, y as usize, z as usize)),
    }
}

/// Builds the opaque and translucent meshes of one chunk.
///
/// # Arguments
/// * `grid` - The chunk's voxels
/// * `neighborhood` - Read access to the lateral neighbors' voxels
/// * `origin` - World position of the chunk's local `(0, 0, 0)`
/// * `revision` - Revision tag written into both meshes
///
/// # Returns
/// The mesh pair. Opaque voxels go to the opaque mesh and water to the
/// translucent mesh.
///
/// # Performance
/// Only occupied voxels are visited, by walking the grid's occupancy bits, so
/// the scan is O(volume) in the worst case and much cheaper for the sparse
/// upper part of a terrain chunk.
pub fn build_chunk_meshes(
    grid: &VoxelGrid,
    neighborhood: &ChunkNeighborhood,
    origin: Point3<i32>,
    revision: u64,
) -> ChunkMeshes {
    let start = Instant::now();
    let mut meshes = ChunkMeshes::new(revision);

    for (local, voxel) in grid.occupied() {
        let target = if voxel.is_translucent() {
            &mut meshes.translucent
        } else {
            &mut meshes.opaque
        };
        let world = Point3::new(
            origin.x + local.x as i32,
            origin.y + local.y as i32,
            origin.z + local.z as i32,
        );

        for side in VoxelSide::all() {
            if voxel.shows_face_against(adjacent_voxel(grid, neighborhood, local, side)) {
                target.add_face(Face::new(world, voxel, side));
            }
        }
    }

    trace!(
        "Meshed chunk at {:?} ({} opaque faces, {} translucent faces) in {:?}",
        origin,
        meshes.opaque.face_count(),
        meshes.translucent.face_count(),
        start.elapsed()
    );

    meshes
}
