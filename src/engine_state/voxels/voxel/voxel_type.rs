//! # Voxel Type Module
//!
//! This module defines the different kinds of voxels in the world together
//! with the properties the meshing, collision and editing code need from them.

use num_derive::FromPrimitive;
use serde::{Deserialize, Serialize};

use super::VoxelId;

/// Enumerates all voxel types in the world.
///
/// Each variant carries a stable numeric id (its discriminant). Ids are what
/// vertices carry downstream and what a hotbar or a serialized grid would
/// index by, so existing values must never be renumbered.
///
/// Exactly one variant, [`VoxelType::Air`], represents the absence of a voxel.
#[derive(
    Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, FromPrimitive, Serialize, Deserialize,
)]
#[repr(u8)]
pub enum VoxelType {
    /// Empty space. Never meshed, never collides.
    #[default]
    Air = 0,

    /// The bulk material below the dirt layer.
    Stone = 1,

    /// Sub-surface layer between grass and stone.
    Dirt = 2,

    /// The topmost solid layer of dry land.
    Grass = 3,

    /// Fills columns up to sea level. Translucent and passable.
    Water = 4,

    /// Tree trunks.
    Wood = 5,

    /// Tree canopies.
    Leaves = 6,

    /// Surface of submerged columns and shorelines.
    Sand = 7,
}

impl VoxelType {
    /// Every voxel type, ordered by id.
    pub const ALL: [VoxelType; 8] = [
        VoxelType::Air,
        VoxelType::Stone,
        VoxelType::Dirt,
        VoxelType::Grass,
        VoxelType::Water,
        VoxelType::Wood,
        VoxelType::Leaves,
        VoxelType::Sand,
    ];

    /// The stable numeric id of this voxel type.
    pub fn id(self) -> VoxelId {
        self as VoxelId
    }

    /// Looks up a voxel type by its numeric id.
    ///
    /// Returns `None` for ids that do not name a voxel type.
    pub fn from_id(id: VoxelId) -> Option<Self> {
        num_traits::FromPrimitive::from_u8(id)
    }

    /// Whether this is the designated empty value.
    pub fn is_empty(self) -> bool {
        self == VoxelType::Air
    }

    /// Whether this voxel is rendered into the translucent mesh.
    pub fn is_translucent(self) -> bool {
        self == VoxelType::Water
    }

    /// Whether this voxel is rendered into the opaque mesh and hides the
    /// faces of whatever touches it.
    pub fn is_opaque(self) -> bool {
        !self.is_empty() && !self.is_translucent()
    }

    /// Whether an observer can move through this voxel.
    pub fn is_passable(self) -> bool {
        matches!(self, VoxelType::Air | VoxelType::Water)
    }

    /// Decides whether a face of `self` touching `neighbor` is visible.
    ///
    /// Opaque voxels show every face that is not covered by another opaque
    /// voxel, so terrain stays visible through water. Translucent voxels only
    /// show faces against air; water against water or against a solid wall
    /// is culled.
    pub fn shows_face_against(self, neighbor: VoxelType) -> bool {
        if self.is_empty() {
            false
        } else if self.is_translucent() {
            neighbor.is_empty()
        } else {
            !neighbor.is_opaque()
        }
    }
}
