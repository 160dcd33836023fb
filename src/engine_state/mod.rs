//! # Engine State Module
//!
//! The core engine module that manages the state and functionality of the voxel engine.
//!
//! ## Key Components
//!
//! * `EngineState` - The frame driver tying the world, the observer and the render target together
//! * `observer` - The point of view: window bounds, collision and voxel placement
//! * `rendering` - Mesh generation, materials and the render target contract
//! * `voxels` - Voxel data, chunks, generation, storage and streaming
//!
//! ## Frame Model
//!
//! Each frame runs one update step followed by one render step, never
//! overlapping. Everything in the update step (movement, edits, chunk
//! generation, meshing, streaming) completes synchronously before the render
//! target is drawn.

use cgmath::{Point3, Vector3};
use log::{debug, info};

use crate::{config::WorldConfig, error::EngineError};

use self::{
    observer::{collision, placement, Observer, ObserverState, PlacementOutcome},
    rendering::{MeshKind, PresentationMode, RenderTarget},
    voxels::{ChunkCoord, StreamingReport, StreamingWindow, VoxelType, World},
};

pub mod observer;
pub mod rendering;
pub mod voxels;

/// Name of the texture atlas bound to every chunk mesh.
pub const TEXTURE_ATLAS: &str = "voxel_atlas.png";

/// The main state container for the voxel engine.
///
/// This struct owns the world and the observer and drives the render target
/// each frame. It handles observer movement, voxel edits and the debug toggle
/// and keeps the render target in sync with the world after each of them.
pub struct EngineState<T: RenderTarget> {
    world: World,
    observer: ObserverState,
    target: T,
}

impl<T: RenderTarget> EngineState<T> {
    /// Creates the engine.
    ///
    /// Binds the shared materials to the target once and places the observer
    /// just above the terrain of the world's origin column. No chunk is
    /// attached until the first [`EngineState::update`].
    ///
    /// # Errors
    /// Returns an error if the configuration is invalid.
    pub fn new(config: &WorldConfig, mut target: T) -> Result<Self, EngineError> {
        config.validate()?;

        let mut world = World::new(config);
        world.materials_mut().bind_texture(TEXTURE_ATLAS)?;
        target.bind_materials(world.materials());

        let spawn = Self::spawn_point(&mut world);
        info!("Observer spawned at {:?}", spawn);

        Ok(EngineState {
            world,
            observer: ObserverState::new(spawn, config.render_distance),
            target,
        })
    }

    /// The eye position above the highest voxel of the origin column.
    fn spawn_point(world: &mut World) -> Point3<f32> {
        let surface = world
            .get_or_create_chunk(ChunkCoord::new(0, 0))
            .grid()
            .surface_height(0, 0)
            .map_or(0.0, |y| y as f32 + 1.0);

        Point3::new(0.5, surface + collision::EYE_TO_FEET, 0.5)
    }

    /// The world.
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Mutable access to the world.
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// The observer.
    pub fn observer(&self) -> &ObserverState {
        &self.observer
    }

    /// Mutable access to the observer, e.g. to feed it ray hits.
    pub fn observer_mut(&mut self) -> &mut ObserverState {
        &mut self.observer
    }

    /// The render target.
    pub fn target(&self) -> &T {
        &self.target
    }

    /// Runs one streaming tick for the observer's current window.
    pub fn update(&mut self) -> StreamingReport {
        let window = StreamingWindow::from_bounds(self.observer.rendering_window_bounds());
        let observer_chunk = self.observer.current_chunk_coordinate();
        self.world.update(window, observer_chunk, &mut self.target)
    }

    /// Moves the observer, stopping at solid voxels.
    ///
    /// # Returns
    /// The movement that was actually applied.
    pub fn move_observer(&mut self, delta: Vector3<f32>) -> Vector3<f32> {
        let allowed = collision::resolve_movement(&self.world, self.observer.position, delta);
        self.observer.position += allowed;
        allowed
    }

    /// Places (or with air, removes) a voxel at the observer's targeted
    /// surface.
    ///
    /// Remeshed chunks that are attached are re-attached right away, so the
    /// next render shows the edit.
    pub fn place_voxel(&mut self, voxel: VoxelType) -> PlacementOutcome {
        let outcome = placement::place_voxel(&mut self.world, &self.observer, voxel);

        if let PlacementOutcome::Placed(_, remeshed) = &outcome {
            for &coord in remeshed {
                self.refresh_attached(coord);
            }
        }

        outcome
    }

    fn refresh_attached(&mut self, coord: ChunkCoord) {
        let Some(meshes) = self.world.chunk(coord).and_then(|chunk| chunk.meshes()) else {
            return;
        };

        for kind in MeshKind::ALL {
            if self.target.is_attached(coord, kind) {
                self.target.attach(coord, kind, meshes.get(kind));
            }
        }
    }

    /// Switches between normal and debug presentation and applies the new
    /// mode right away.
    pub fn toggle_debug(&mut self) -> PresentationMode {
        let mode = self.world.presentation_mode().toggled();
        self.world.set_presentation_mode(mode);
        debug!("Presentation mode set to {:?}", mode);

        self.update();
        mode
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine_state::{
        observer::TargetedSurface,
        rendering::SceneTarget,
        voxels::generation::GenerationMethod,
    };

    fn flat_engine() -> EngineState<SceneTarget> {
        let config = WorldConfig {
            seed: Some(3),
            render_distance: 1,
            generation: GenerationMethod::Flat { height: 10 },
            ..WorldConfig::default()
        };
        EngineState::new(&config, SceneTarget::new()).unwrap()
    }

    #[test]
    fn observer_spawns_on_the_surface() {
        let engine = flat_engine();
        let feet = engine.observer().occupied_volume().min.y;

        assert!((feet - 10.0).abs() < 1e-5);
        assert_eq!(engine.target().materials().unwrap().texture(), Some(TEXTURE_ATLAS));
    }

    #[test]
    fn gravity_stops_at_the_ground() {
        let mut engine = flat_engine();
        let moved = engine.move_observer(Vector3::new(0.0, -0.5, 0.0));

        assert_eq!(moved.y, 0.0);
    }

    #[test]
    fn edits_refresh_attached_meshes() {
        let mut engine = flat_engine();
        engine.update();
        let coord = ChunkCoord::new(0, 0);
        let before = engine.target().attached_revision(coord, MeshKind::Opaque).unwrap();

        engine.observer_mut().set_targeted_surface(Some(TargetedSurface {
            position: Point3::new(5.5, 10.0, 5.5),
            normal: Vector3::new(0.0, 1.0, 0.0),
        }));
        let outcome = engine.place_voxel(VoxelType::Wood);

        assert_eq!(outcome, PlacementOutcome::Placed(Point3::new(5, 10, 5), vec![coord]));
        assert_eq!(engine.world().get_voxel(Point3::new(5, 10, 5)), Some(VoxelType::Wood));
        assert!(engine.target().attached_revision(coord, MeshKind::Opaque).unwrap() > before);
    }

    #[test]
    fn debug_toggle_keeps_meshes() {
        let mut engine = flat_engine();
        engine.update();
        let attaches = engine.target().attach_count();

        assert_eq!(engine.toggle_debug(), PresentationMode::Debug);
        let presentation = engine.target().presentation().unwrap();
        assert!(!presentation.fog);
        assert_eq!(engine.target().chunk_outline(), Some(ChunkCoord::new(0, 0).center()));
        assert_eq!(engine.target().attach_count(), attaches);

        assert_eq!(engine.toggle_debug(), PresentationMode::Normal);
        assert_eq!(engine.target().chunk_outline(), None);
    }
}
