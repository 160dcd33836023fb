//! # World Module
//!
//! This module provides the `World` struct, the façade over chunk storage,
//! generation and streaming.
//!
//! ## Architecture
//!
//! The world uses a sparse storage approach where only chunks that have been
//! requested by streaming (or created as a neighbor of such a chunk) exist.
//! This allows for effectively infinite world sizes.
//!
//! ## Voxel Access
//!
//! Reads and writes address voxels by world coordinates and never create
//! chunks. A write synchronously remeshes the owning chunk and every neighbor
//! whose boundary faces could have changed, so no frame ever sees a mesh that
//! disagrees with the voxels.

use cgmath::Point3;
use log::{debug, info};

use super::{
    chunk::Chunk,
    coords::{self, ChunkCoord},
    generation::{ChunkGenerator, TreeDecorator},
    store::ChunkStore,
    streamer::{StreamingReport, StreamingWindow, WorldStreamer},
    voxel::VoxelType,
};
use crate::{
    config::WorldConfig,
    engine_state::rendering::{Materials, Presentation, PresentationMode, RenderTarget},
};

/// Represents a voxel world composed of chunks.
#[derive(Debug)]
pub struct World {
    store: ChunkStore,
    generator: ChunkGenerator,
    decorator: Option<TreeDecorator>,
    streamer: WorldStreamer,
    materials: Materials,
    seed: u32,
    presentation: PresentationMode,
}

impl World {
    /// Creates a new, empty world.
    ///
    /// # Arguments
    /// * `config` - World settings; a missing seed is drawn at random here
    ///   and fixed for the lifetime of the world
    pub fn new(config: &WorldConfig) -> Self {
        let seed = config.seed.unwrap_or_else(|| fastrand::u32(..));
        let generator = ChunkGenerator::new(config.generation.clone(), config.terrain.clone(), seed);
        let decorator = match generator.sea_level() {
            Some(sea_level) if config.decorations.trees => {
                Some(TreeDecorator::new(config.decorations.clone(), seed, sea_level))
            }
            _ => None,
        };

        info!(
            "Created world with seed {} ({:?}, render distance {})",
            seed, config.generation, config.render_distance
        );

        World {
            store: ChunkStore::new(),
            generator,
            decorator,
            streamer: WorldStreamer::new(config.render_distance),
            materials: Materials::new(),
            seed,
            presentation: PresentationMode::Normal,
        }
    }

    /// The generation seed.
    pub fn seed(&self) -> u32 {
        self.seed
    }

    /// The chunk store.
    pub fn store(&self) -> &ChunkStore {
        &self.store
    }

    /// The chunk generator.
    pub fn generator(&self) -> &ChunkGenerator {
        &self.generator
    }

    /// The streamer.
    pub fn streamer(&self) -> WorldStreamer {
        self.streamer
    }

    /// Looks up a chunk without creating it.
    pub fn chunk(&self, coord: ChunkCoord) -> Option<&Chunk> {
        self.store.get(coord)
    }

    /// The shared materials.
    pub fn materials(&self) -> &Materials {
        &self.materials
    }

    /// Mutable access to the shared materials, for setup before streaming
    /// begins.
    pub fn materials_mut(&mut self) -> &mut Materials {
        &mut self.materials
    }

    /// The current presentation mode.
    pub fn presentation_mode(&self) -> PresentationMode {
        self.presentation
    }

    /// Switches presentation mode. Voxels and meshes are untouched.
    pub fn set_presentation_mode(&mut self, mode: PresentationMode) {
        self.presentation = mode;
    }

    /// The presentation derived from the materials and the current mode.
    pub fn presentation(&self) -> Presentation {
        self.materials.present(self.presentation)
    }

    /// Returns the chunk at a coordinate, generating it if needed.
    pub fn get_or_create_chunk(&mut self, coord: ChunkCoord) -> &mut Chunk {
        self.store.get_or_create(coord, &self.generator)
    }

    /// Gets the voxel at a world voxel coordinate.
    ///
    /// # Returns
    /// `None` if `y` is outside the world or the owning chunk was never
    /// created. Reading never creates a chunk.
    pub fn get_voxel(&self, position: Point3<i32>) -> Option<VoxelType> {
        let (coord, local) = coords::split_voxel(position)?;
        self.store.get(coord).map(|chunk| chunk.voxel(local))
    }

    /// Gets the voxel containing a continuous world position.
    pub fn get_voxel_at(&self, position: Point3<f32>) -> Option<VoxelType> {
        self.get_voxel(coords::voxel_of(position))
    }

    /// Sets the voxel at a world voxel coordinate and remeshes everything it
    /// affects.
    ///
    /// An edit marks the owning chunk as decorated, so a later decoration
    /// pass never overwrites it.
    ///
    /// # Returns
    /// The chunks that were remeshed, owning chunk first. Empty when the
    /// write was dropped because `y` is outside the world or the owning chunk
    /// does not exist; writes never create chunks.
    pub fn set_voxel(&mut self, position: Point3<i32>, voxel: VoxelType) -> Vec<ChunkCoord> {
        let Some((coord, local)) = coords::split_voxel(position) else {
            return Vec::new();
        };
        let Some(chunk) = self.store.get_mut(coord) else {
            return Vec::new();
        };

        // Edited chunks are never decorated afterwards.
        chunk.apply_decorations(|_, _| {});
        chunk.set_voxel(local, voxel);
        let touched = chunk.chunk_neighbors_of_voxel(local);

        let mut remeshed = vec![coord];
        remeshed.extend(touched.into_iter().filter(|&neighbor| self.store.contains(neighbor)));

        for &affected in &remeshed {
            self.store.update_mesh(affected);
        }

        debug!("Set {:?} to {:?}, remeshed {:?}", position, voxel, remeshed);
        remeshed
    }

    /// Sets the voxel containing a continuous world position.
    pub fn set_voxel_at(&mut self, position: Point3<f32>, voxel: VoxelType) -> Vec<ChunkCoord> {
        self.set_voxel(coords::voxel_of(position), voxel)
    }

    /// Brings a chunk to the state streaming needs before attaching it:
    /// created, wired to all four neighbors, decorated once and meshed.
    pub fn prepare_chunk(&mut self, coord: ChunkCoord) {
        self.store.get_or_create(coord, &self.generator);
        self.store.wire_neighbors(coord, &self.generator);

        let decorator = self.decorator.as_ref();
        if let Some(chunk) = self.store.get_mut(coord) {
            chunk.apply_decorations(|coord, grid| {
                if let Some(decorator) = decorator {
                    decorator.decorate(coord, grid);
                }
            });
        }

        self.store.update_mesh(coord);
    }

    /// Runs one streaming tick for a window.
    pub fn update<T: RenderTarget + ?Sized>(
        &mut self,
        window: StreamingWindow,
        observer_chunk: ChunkCoord,
        target: &mut T,
    ) -> StreamingReport {
        let streamer = self.streamer;
        streamer.tick(self, window, observer_chunk, target)
    }

    /// Runs one streaming tick for the window around a chunk at the world's
    /// render distance.
    pub fn update_around<T: RenderTarget + ?Sized>(
        &mut self,
        center: ChunkCoord,
        target: &mut T,
    ) -> StreamingReport {
        let window = self.streamer.window_around(center);
        self.update(window, center, target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine_state::{
        rendering::SceneTarget,
        voxels::{
            chunk::neighbors::ChunkDirection,
            coords::CHUNK_SIZE,
            generation::{DecorationConfig, GenerationMethod},
        },
    };

    fn flat_world() -> World {
        World::new(&WorldConfig {
            seed: Some(1),
            generation: GenerationMethod::Flat { height: 8 },
            ..WorldConfig::default()
        })
    }

    #[test]
    fn reads_and_writes_never_create_chunks() {
        let mut world = flat_world();

        assert_eq!(world.get_voxel(Point3::new(100, 3, 100)), None);
        assert!(world.set_voxel(Point3::new(100, 3, 100), VoxelType::Stone).is_empty());
        assert!(world.store().is_empty());
    }

    #[test]
    fn writes_round_trip_including_air() {
        let mut world = flat_world();
        world.get_or_create_chunk(ChunkCoord::new(-1, 0));

        for voxel in [VoxelType::Leaves, VoxelType::Air, VoxelType::Water] {
            world.set_voxel(Point3::new(-3, 20, 5), voxel);
            assert_eq!(world.get_voxel(Point3::new(-3, 20, 5)), Some(voxel));
        }
    }

    #[test]
    fn out_of_range_heights_are_absent() {
        let mut world = flat_world();
        world.get_or_create_chunk(ChunkCoord::new(0, 0));

        assert_eq!(world.get_voxel(Point3::new(1, -1, 1)), None);
        assert!(world.set_voxel(Point3::new(1, 64, 1), VoxelType::Stone).is_empty());
        assert_eq!(world.get_voxel_at(Point3::new(1.5, 7.9, 1.5)), Some(VoxelType::Grass));
    }

    #[test]
    fn boundary_edits_remesh_the_neighbor() {
        let mut world = flat_world();
        let coord = ChunkCoord::new(0, 0);
        world.prepare_chunk(coord);

        let west = coord.neighbor(ChunkDirection::West);
        assert_eq!(world.set_voxel(Point3::new(0, 8, 5), VoxelType::Stone), vec![coord, west]);
        assert_eq!(
            world.set_voxel(Point3::new(CHUNK_SIZE / 2, 8, CHUNK_SIZE / 2), VoxelType::Stone),
            vec![coord]
        );
    }

    #[test]
    fn prepared_chunks_are_decorated_once() {
        let mut world = flat_world();
        let coord = ChunkCoord::new(2, 2);
        world.prepare_chunk(coord);

        let chunk = world.chunk(coord).unwrap();
        assert!(chunk.decorations_applied());
        assert!(chunk.neighbors_wired());
        assert_eq!(chunk.mesh_revision(), 1);
    }

    #[test]
    fn edits_survive_deferred_decoration() {
        let mut world = World::new(&WorldConfig {
            seed: Some(11),
            decorations: DecorationConfig {
                trees: true,
                tree_density: 1.0,
            },
            ..WorldConfig::default()
        });
        let coord = ChunkCoord::new(0, 0);
        let surface = world.get_or_create_chunk(coord).grid().surface_height(3, 3).unwrap() as i32;
        let above = Point3::new(3, surface + 1, 3);

        world.set_voxel(above, VoxelType::Water);
        world.prepare_chunk(coord);

        assert_eq!(world.get_voxel(above), Some(VoxelType::Water));
        assert!(world.chunk(coord).unwrap().decorations_applied());
    }

    #[test]
    fn streaming_attaches_the_window() {
        let mut world = flat_world();
        let mut scene = SceneTarget::new();

        let report = world.update_around(ChunkCoord::new(0, 0), &mut scene);
        assert_eq!(report.attached.len(), 25);
        assert_eq!(scene.attached_chunks().len(), 25);

        let again = world.update_around(ChunkCoord::new(0, 0), &mut scene);
        assert!(again.is_empty());
    }
}
