//! # Decoration Module
//!
//! Trees planted on top of generated terrain.
//!
//! Decoration runs once per chunk after its terrain. Placement is seeded from
//! the world seed and the chunk coordinate, so a chunk decorates the same way
//! every time it is generated. Trunks keep [`TRUNK_MARGIN`] voxels away from
//! the chunk's lateral faces, which keeps every canopy inside the chunk and
//! leaves boundary voxels as the terrain made them.

use cgmath::Point3;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::engine_state::voxels::{
    chunk::voxel_grid::VoxelGrid,
    coords::{ChunkCoord, CHUNK_HEIGHT, CHUNK_SIZE},
    voxel::VoxelType,
};

/// Minimum distance between a trunk and the chunk's lateral faces.
pub const TRUNK_MARGIN: i32 = 3;
/// Horizontal reach of the widest canopy layer from the trunk.
const CANOPY_RADIUS: i32 = 2;
/// Minimum distance between two trunks in the same chunk.
const TRUNK_SPACING: i32 = 3;

/// Tree placement settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecorationConfig {
    /// Whether trees are planted at all
    pub trees: bool,
    /// Chance for each eligible column to try to grow a tree (0.0-1.0)
    pub tree_density: f32,
}

impl Default for DecorationConfig {
    fn default() -> Self {
        DecorationConfig {
            trees: true,
            tree_density: 0.02,
        }
    }
}

/// Plants trees on grass above sea level.
#[derive(Debug, Clone)]
pub struct TreeDecorator {
    config: DecorationConfig,
    seed: u32,
    sea_level: i32,
}

impl TreeDecorator {
    /// Creates a decorator for a world seed.
    pub fn new(config: DecorationConfig, seed: u32, sea_level: i32) -> Self {
        TreeDecorator {
            config,
            seed,
            sea_level,
        }
    }

    /// The random stream of one chunk.
    fn rng_for(&self, coord: ChunkCoord) -> fastrand::Rng {
        let x = coord.x as u32 as u64;
        let z = coord.z as u32 as u64;
        let key = ((self.seed as u64) << 32)
            ^ x.wrapping_mul(0x9E37_79B9_7F4A_7C15)
            ^ z.wrapping_mul(0xC2B2_AE3D_27D4_EB4F);
        fastrand::Rng::with_seed(key)
    }

    /// Decorates one chunk's terrain in place.
    ///
    /// # Returns
    /// The number of trees planted.
    pub fn decorate(&self, coord: ChunkCoord, grid: &mut VoxelGrid) -> usize {
        if !self.config.trees || self.config.tree_density <= 0.0 {
            return 0;
        }

        let mut rng = self.rng_for(coord);
        let mut trunks: Vec<(i32, i32)> = Vec::new();

        for z in TRUNK_MARGIN..CHUNK_SIZE - TRUNK_MARGIN {
            for x in TRUNK_MARGIN..CHUNK_SIZE - TRUNK_MARGIN {
                // Both draws happen for every column so each column's values
                // depend only on its position, never on the density.
                let roll = rng.f32();
                let trunk_height = rng.i32(4..=6);
                if roll >= self.config.tree_density {
                    continue;
                }

                let crowded = trunks
                    .iter()
                    .any(|&(tx, tz)| (tx - x).abs() < TRUNK_SPACING && (tz - z).abs() < TRUNK_SPACING);
                if crowded {
                    continue;
                }

                if self.plant(grid, x, z, trunk_height) {
                    trunks.push((x, z));
                }
            }
        }

        if !trunks.is_empty() {
            debug!("Planted {} trees in chunk {:?}", trunks.len(), coord);
        }
        trunks.len()
    }

    /// Grows one tree on the column `(x, z)` if it is grass above sea level
    /// with room for the whole tree.
    fn plant(&self, grid: &mut VoxelGrid, x: i32, z: i32, trunk_height: i32) -> bool {
        let Some(surface) = grid.surface_height(x as usize, z as usize) else {
            return false;
        };
        let surface = surface as i32;
        let top = surface + trunk_height;

        if surface <= self.sea_level
            || top + 2 >= CHUNK_HEIGHT
            || grid.get(local(x, surface, z)) != VoxelType::Grass
        {
            return false;
        }

        grid.set(local(x, surface, z), VoxelType::Dirt);
        for y in surface + 1..=top {
            grid.set(local(x, y, z), VoxelType::Wood);
        }

        // Two wide layers around the top of the trunk, then a narrow cap.
        for dy in -1..=2 {
            let radius = if dy <= 0 { CANOPY_RADIUS } else { 1 };
            for dz in -radius..=radius {
                for dx in -radius..=radius {
                    let corner = dx.abs() == radius && dz.abs() == radius;
                    if (corner && radius > 1) || (dy == 2 && dx != 0 && dz != 0) {
                        continue;
                    }

                    let position = local(x + dx, top + dy, z + dz);
                    if grid.get(position).is_empty() {
                        grid.set(position, VoxelType::Leaves);
                    }
                }
            }
        }

        true
    }
}

fn local(x: i32, y: i32, z: i32) -> Point3<usize> {
    Point3::new(x as usize, y as usize, z as usize)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine_state::voxels::generation::terrain::{TerrainConfig, TerrainGenerator};

    fn flat_grass(height: i32) -> VoxelGrid {
        let mut grid = VoxelGrid::new();
        for z in 0..CHUNK_SIZE {
            for x in 0..CHUNK_SIZE {
                for y in 0..height {
                    let voxel = if y == height - 1 { VoxelType::Grass } else { VoxelType::Dirt };
                    grid.set(local(x, y, z), voxel);
                }
            }
        }
        grid
    }

    fn dense() -> DecorationConfig {
        DecorationConfig {
            trees: true,
            tree_density: 1.0,
        }
    }

    #[test]
    fn decoration_is_deterministic() {
        let decorator = TreeDecorator::new(dense(), 9, 10);
        let mut first = flat_grass(20);
        let mut second = flat_grass(20);

        let planted = decorator.decorate(ChunkCoord::new(4, -2), &mut first);
        decorator.decorate(ChunkCoord::new(4, -2), &mut second);

        assert!(planted > 0);
        assert_eq!(first, second);
    }

    #[test]
    fn placement_is_fixed_for_a_seed() {
        let config = DecorationConfig {
            trees: true,
            tree_density: 0.25,
        };
        let mut grid = flat_grass(20);
        TreeDecorator::new(config, 9, 10).decorate(ChunkCoord::new(4, -2), &mut grid);

        // (x, z, trunk height) for every column holding a trunk.
        let mut trunks = Vec::new();
        for z in 0..CHUNK_SIZE {
            for x in 0..CHUNK_SIZE {
                let height = (20..CHUNK_HEIGHT)
                    .filter(|&y| grid.get(local(x, y, z)) == VoxelType::Wood)
                    .count();
                if height > 0 {
                    trunks.push((x, z, height));
                }
            }
        }

        assert_eq!(
            trunks,
            vec![(4, 4, 4), (8, 4, 4), (3, 7, 4), (8, 7, 4), (11, 7, 5), (9, 10, 4), (4, 11, 5)]
        );
    }

    #[test]
    fn boundary_voxels_are_never_touched() {
        let decorator = TreeDecorator::new(dense(), 1, 10);
        let original = flat_grass(20);
        let mut grid = original.clone();
        decorator.decorate(ChunkCoord::new(0, 0), &mut grid);

        for y in 0..CHUNK_HEIGHT {
            for i in 0..CHUNK_SIZE {
                for (x, z) in [(0, i), (CHUNK_SIZE - 1, i), (i, 0), (i, CHUNK_SIZE - 1)] {
                    assert_eq!(grid.get(local(x, y, z)), original.get(local(x, y, z)));
                }
            }
        }
    }

    #[test]
    fn nothing_grows_under_water() {
        let decorator = TreeDecorator::new(dense(), 1, 30);
        let mut grid = flat_grass(20);
        assert_eq!(decorator.decorate(ChunkCoord::new(0, 0), &mut grid), 0);
        assert_eq!(grid, flat_grass(20));
    }

    #[test]
    fn disabled_trees_leave_terrain_alone() {
        let config = DecorationConfig {
            trees: false,
            tree_density: 1.0,
        };
        let terrain = TerrainGenerator::new(TerrainConfig::default(), 5);
        let original = terrain.generate(ChunkCoord::new(0, 0));
        let mut grid = original.clone();

        assert_eq!(TreeDecorator::new(config, 5, 26).decorate(ChunkCoord::new(0, 0), &mut grid), 0);
        assert_eq!(grid, original);
    }
}
