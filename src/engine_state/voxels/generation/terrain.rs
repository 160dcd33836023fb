//! # Terrain Module
//!
//! Heightfield terrain from fractal Perlin noise.
//!
//! The noise field is sampled once per world column at world-space `(x, z)`,
//! so neighboring chunks agree along their shared faces and the same
//! `(chunk, seed)` always produces the same voxels.

use cgmath::Point3;
use log::warn;
use noise::{Fbm, MultiFractal, NoiseFn, Perlin};
use serde::{Deserialize, Serialize};

use crate::engine_state::voxels::{
    chunk::voxel_grid::VoxelGrid,
    coords::{ChunkCoord, CHUNK_HEIGHT, CHUNK_SIZE},
    voxel::VoxelType,
};

/// The largest octave count accepted for the terrain noise.
pub const MAX_OCTAVES: usize = 32;

/// Parameters of the terrain heightfield.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerrainConfig {
    /// Surface height where the noise is zero
    pub base_height: f64,
    /// How far the noise moves the surface up or down
    pub amplitude: f64,
    /// Frequency of the first octave, in cycles per voxel
    pub frequency: f64,
    /// Number of noise octaves
    pub octaves: usize,
    /// Amplitude falloff between octaves
    pub persistence: f64,
    /// Frequency growth between octaves
    pub lacunarity: f64,
    /// Columns whose surface is at or below this height are covered with
    /// water up to it
    pub sea_level: i32,
    /// Number of dirt layers between the surface and the stone
    pub dirt_depth: i32,
}

impl Default for TerrainConfig {
    fn default() -> Self {
        TerrainConfig {
            base_height: 28.0,
            amplitude: 14.0,
            frequency: 0.01,
            octaves: 4,
            persistence: 0.5,
            lacunarity: 2.0,
            sea_level: 26,
            dirt_depth: 3,
        }
    }
}

/// Picks the voxel of a solid column at height `y` below a surface at
/// `surface`.
pub fn layer_at(y: i32, surface: i32, sea_level: i32, dirt_depth: i32) -> VoxelType {
    if y == surface {
        if surface > sea_level {
            VoxelType::Grass
        } else {
            VoxelType::Sand
        }
    } else if y >= surface - dirt_depth {
        VoxelType::Dirt
    } else {
        VoxelType::Stone
    }
}

/// Clamps a raw surface height into the world's vertical range.
///
/// NaN and infinite heights come from degenerate noise parameters; they are
/// pinned to the floor rather than propagated.
pub fn clamp_height(raw: f64) -> i32 {
    if raw.is_nan() {
        return 0;
    }
    raw.floor().clamp(0.0, (CHUNK_HEIGHT - 1) as f64) as i32
}

/// Deterministic noise-based terrain.
#[derive(Clone, Debug)]
pub struct TerrainGenerator {
    config: TerrainConfig,
    seed: u32,
    noise: Fbm<Perlin>,
}

impl TerrainGenerator {
    /// Creates a generator for a world seed.
    pub fn new(config: TerrainConfig, seed: u32) -> Self {
        // Each octave is seeded with `seed + octave`, which must not overflow.
        let noise = Fbm::<Perlin>::new(seed.min(u32::MAX - MAX_OCTAVES as u32))
            .set_octaves(config.octaves.clamp(1, MAX_OCTAVES))
            .set_frequency(config.frequency)
            .set_persistence(config.persistence)
            .set_lacunarity(config.lacunarity);

        TerrainGenerator { config, seed, noise }
    }

    /// The terrain parameters.
    pub fn config(&self) -> &TerrainConfig {
        &self.config
    }

    /// The seed the noise was built from.
    pub fn seed(&self) -> u32 {
        self.seed
    }

    /// The surface height of a world column, clamped to `[0, CHUNK_HEIGHT)`.
    pub fn height_at(&self, x: i32, z: i32) -> i32 {
        let sample = self.noise.get([x as f64, z as f64]);
        clamp_height(self.config.base_height + self.config.amplitude * sample)
    }

    /// Generates the voxels of a chunk.
    ///
    /// # Arguments
    /// * `coord` - The chunk to generate
    ///
    /// # Returns
    /// A grid with stone, dirt and a grass (or sand) top in every column, and
    /// water filling columns below sea level.
    pub fn generate(&self, coord: ChunkCoord) -> VoxelGrid {
        let origin = coord.origin();
        let sea_level = self.config.sea_level.min(CHUNK_HEIGHT - 1);
        let mut grid = VoxelGrid::new();
        let mut clamped = 0;

        for z in 0..CHUNK_SIZE {
            for x in 0..CHUNK_SIZE {
                let raw = self.config.base_height
                    + self.config.amplitude * self.noise.get([(origin.x + x) as f64, (origin.z + z) as f64]);
                let surface = clamp_height(raw);
                if raw.is_nan() || raw < 0.0 || raw >= CHUNK_HEIGHT as f64 {
                    clamped += 1;
                }

                for y in 0..=surface {
                    let voxel = layer_at(y, surface, sea_level, self.config.dirt_depth);
                    grid.set(Point3::new(x as usize, y as usize, z as usize), voxel);
                }
                for y in surface + 1..=sea_level {
                    grid.set(Point3::new(x as usize, y as usize, z as usize), VoxelType::Water);
                }
            }
        }

        if clamped > 0 {
            warn!("Clamped {} column heights in chunk {:?}", clamped, coord);
        }

        grid
    }
}
