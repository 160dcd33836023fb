#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![warn(rustdoc::invalid_rust_codeblocks)]

//! # Voxel World
//!
//! Chunk management and meshing for an unbounded, procedurally generated
//! voxel world.
//!
//! The world is split into columns of `16 x 64 x 16` voxels. Chunks are
//! generated lazily from a seed, streamed in and out of a square window
//! around a moving observer, and turned into opaque and translucent surface
//! meshes for a renderer. Editing a voxel remeshes every chunk whose surface
//! it touches before returning.
//!
//! ## Key Modules
//!
//! * `config` - JSON world configuration
//! * `engine_state` - The world, the observer, meshing and the frame driver
//! * `error` - The crate error type
//!
//! ## Usage
//!
//! ```text
//! let config = WorldConfig::from_path("world.json")?;
//! let mut engine = EngineState::new(&config, SceneTarget::new())?;
//! engine.update();
//! ```

use cgmath::Vector3;
use log::info;

pub mod config;
pub mod engine_state;
pub mod error;

pub use config::WorldConfig;
pub use engine_state::{
    observer::{Observer, ObserverState, PlacementOutcome, TargetedSurface},
    rendering::{RenderTarget, SceneTarget},
    voxels::{ChunkCoord, VoxelType, World},
    EngineState,
};
pub use error::EngineError;

/// Number of simulated frames spent walking east.
const WALK_FRAMES: usize = 64;

/// Runs a headless session: loads the configuration named by the first
/// command line argument (or the defaults), walks the observer across chunk
/// boundaries, digs out the voxel below it and toggles debug mode, logging
/// what every tick streamed.
pub fn run() -> Result<(), EngineError> {
    let mut log_builder = env_logger::Builder::new();
    log_builder
        .target(env_logger::Target::Stdout)
        .parse_env("RUST_LOG")
        .init();

    info!("Logger initialized");

    let config = match std::env::args().nth(1) {
        Some(path) => WorldConfig::from_path(path)?,
        None => WorldConfig::default(),
    };

    let mut engine = EngineState::new(&config, SceneTarget::new())?;
    let report = engine.update();
    info!("Initial load attached {} chunks", report.attached.len());

    for frame in 0..WALK_FRAMES {
        engine.move_observer(Vector3::new(1.0, 0.0, 0.25));
        engine.move_observer(Vector3::new(0.0, -0.5, 0.0));

        let report = engine.update();
        if !report.attached.is_empty() || !report.detached.is_empty() {
            info!(
                "Frame {}: observer in chunk {:?}, attached {:?}, detached {:?}",
                frame,
                engine.observer().current_chunk_coordinate(),
                report.attached,
                report.detached
            );
        }
    }

    let feet = engine.observer().occupied_volume().min;
    engine.observer_mut().set_targeted_surface(Some(TargetedSurface {
        position: feet,
        normal: Vector3::new(0.0, 1.0, 0.0),
    }));
    info!("Digging below the observer: {:?}", engine.place_voxel(VoxelType::Air));

    engine.toggle_debug();
    info!(
        "Debug presentation applied; {} faces attached across {} chunks",
        engine.target().face_count(),
        engine.target().attached_chunks().len()
    );

    Ok(())
}
