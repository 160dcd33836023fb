//! # Generation Module
//!
//! Fills new chunks with voxels.
//!
//! Multiple generation strategies are supported:
//! - Noise heightfield terrain for natural-looking worlds
//! - Flat worlds with a fixed number of layers, for testing
//! - Solid chunks (all voxels filled)
//! - Empty chunks (all voxels air)
//!
//! Every strategy is a pure function of the chunk coordinate and the world
//! seed.

use cgmath::Point3;
use serde::{Deserialize, Serialize};

use super::{
    chunk::voxel_grid::VoxelGrid,
    coords::{ChunkCoord, CHUNK_HEIGHT, CHUNK_SIZE},
    voxel::VoxelType,
};

pub mod decoration;
pub mod terrain;

pub use decoration::{DecorationConfig, TreeDecorator};
pub use terrain::{TerrainConfig, TerrainGenerator};

/// The method used to generate new chunks.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "snake_case")]
pub enum GenerationMethod {
    /// Noise heightfield terrain.
    #[default]
    Terrain,
    /// The bottom `height` layers filled: grass on top, dirt, then stone.
    Flat {
        /// Number of filled layers
        height: i32,
    },
    /// Every voxel stone.
    Solid,
    /// Every voxel air.
    Empty,
}

/// Generates chunk voxels with the configured method.
#[derive(Debug, Clone)]
pub struct ChunkGenerator {
    method: GenerationMethod,
    terrain: TerrainGenerator,
}

impl ChunkGenerator {
    /// Creates a generator.
    ///
    /// # Arguments
    /// * `method` - Which generation strategy to use
    /// * `terrain` - Terrain parameters; the dirt depth also applies to flat worlds
    /// * `seed` - The world seed
    pub fn new(method: GenerationMethod, terrain: TerrainConfig, seed: u32) -> Self {
        ChunkGenerator {
            method,
            terrain: TerrainGenerator::new(terrain, seed),
        }
    }

    /// The generation strategy.
    pub fn method(&self) -> &GenerationMethod {
        &self.method
    }

    /// The terrain generator used by [`GenerationMethod::Terrain`].
    pub fn terrain(&self) -> &TerrainGenerator {
        &self.terrain
    }

    /// The level below which columns are flooded, or `None` for methods that
    /// never place water.
    pub fn sea_level(&self) -> Option<i32> {
        match self.method {
            GenerationMethod::Terrain => Some(self.terrain.config().sea_level),
            _ => None,
        }
    }

    /// Generates the voxels of one chunk.
    pub fn generate(&self, coord: ChunkCoord) -> VoxelGrid {
        match &self.method {
            GenerationMethod::Terrain => self.terrain.generate(coord),
            GenerationMethod::Flat { height } => self.flat(*height),
            GenerationMethod::Solid => VoxelGrid::filled(VoxelType::Stone),
            GenerationMethod::Empty => VoxelGrid::new(),
        }
    }

    fn flat(&self, height: i32) -> VoxelGrid {
        let height = height.clamp(0, CHUNK_HEIGHT);
        let dirt_depth = self.terrain.config().dirt_depth;
        let mut grid = VoxelGrid::new();

        for y in 0..height {
            let voxel = terrain::layer_at(y, height - 1, -1, dirt_depth);
            for z in 0..CHUNK_SIZE as usize {
                for x in 0..CHUNK_SIZE as usize {
                    grid.set(Point3::new(x, y as usize, z), voxel);
                }
            }
        }

        grid
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flat_worlds_have_the_requested_height() {
        let generator = ChunkGenerator::new(GenerationMethod::Flat { height: 5 }, TerrainConfig::default(), 0);
        let grid = generator.generate(ChunkCoord::new(-9, 9));

        assert_eq!(grid.occupied_count(), 5 * CHUNK_SIZE as usize * CHUNK_SIZE as usize);
        assert_eq!(grid.get(Point3::new(3, 4, 3)), VoxelType::Grass);
        assert_eq!(grid.get(Point3::new(3, 3, 3)), VoxelType::Dirt);
        assert_eq!(grid.get(Point3::new(3, 0, 3)), VoxelType::Stone);
        assert_eq!(grid.get(Point3::new(3, 5, 3)), VoxelType::Air);
    }

    #[test]
    fn solid_and_empty() {
        let solid = ChunkGenerator::new(GenerationMethod::Solid, TerrainConfig::default(), 0);
        let empty = ChunkGenerator::new(GenerationMethod::Empty, TerrainConfig::default(), 0);

        assert!(solid.generate(ChunkCoord::new(0, 0)).get_checked(0, CHUNK_HEIGHT - 1, 0).unwrap().is_opaque());
        assert!(empty.generate(ChunkCoord::new(0, 0)).is_empty());
        assert_eq!(empty.sea_level(), None);
    }

    #[test]
    fn methods_deserialize_from_tagged_json() {
        let flat: GenerationMethod = serde_json::from_str(r#"{"method": "flat", "height": 12}"#).unwrap();
        assert_eq!(flat, GenerationMethod::Flat { height: 12 });

        let terrain: GenerationMethod = serde_json::from_str(r#"{"method": "terrain"}"#).unwrap();
        assert_eq!(terrain, GenerationMethod::Terrain);
    }
}
