//! # Voxel Engine Core
//!
//! This module contains the core voxel engine functionality, providing the foundation
//! for representing, generating, editing and streaming a voxel-based world.
//!
//! ## Architecture
//!
//! The voxel system is organized into several key components:
//!
//! * **Voxel**: Defines voxel types, their ids and their sides
//! * **Coords**: Maps world voxel coordinates onto the chunk lattice
//! * **Chunk**: A fixed-size column of voxels plus its meshes and neighbor links
//! * **Generation**: Terrain and decoration passes that fill new chunks
//! * **Store**: The sparse map owning every chunk
//! * **Streamer**: Keeps the chunks around the observer attached to the renderer
//! * **World**: Coordinates all of the above behind a single façade
//!
//! ## Data Flow
//!
//! 1. The streamer computes the window of chunks around the observer
//! 2. Missing chunks are generated, wired to their neighbors and decorated
//! 3. Each chunk is meshed from its own voxels and its neighbors' boundary voxels
//! 4. Meshes are attached to the render target; chunks leaving the window are detached
//!
//! Voxel edits go through the world, which remeshes the edited chunk and every
//! neighbor touching the edited voxel before returning.
//!
//! Everything runs on the caller's thread; a tick either completes or does not
//! start.

pub mod chunk;
pub mod coords;
pub mod generation;
pub mod store;
pub mod streamer;
pub mod voxel;
pub mod world;

pub use chunk::Chunk;
pub use coords::{ChunkCoord, CHUNK_HEIGHT, CHUNK_SIZE};
pub use store::ChunkStore;
pub use streamer::{StreamingReport, StreamingWindow, WorldStreamer};
pub use voxel::{VoxelSide, VoxelType};
pub use world::World;
