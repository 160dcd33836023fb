//! # Voxel Module
//!
//! Voxel type definitions and voxel face handling.

pub mod voxel_side;
pub mod voxel_type;

pub use voxel_side::VoxelSide;
pub use voxel_type::VoxelType;

/// The underlying integer type used for voxel ids.
pub type VoxelId = u8;
