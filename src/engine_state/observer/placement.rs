//! Placing and removing voxels at the observer's targeted surface.

use cgmath::Point3;
use log::debug;

use super::{Observer, TargetedSurface};
use crate::engine_state::voxels::{coords, ChunkCoord, VoxelType, World};

/// The result of a placement attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlacementOutcome {
    /// The observer is not looking at any surface.
    NoTarget,
    /// The target cell overlaps the observer; nothing changed.
    Blocked(Point3<i32>),
    /// The target cell is outside the world or in a chunk that does not
    /// exist; nothing changed.
    OutOfWorld(Point3<i32>),
    /// The voxel was written. Holds the chunks that were remeshed.
    Placed(Point3<i32>, Vec<ChunkCoord>),
}

/// The voxel cell an edit at a surface applies to.
///
/// Placing steps half a voxel out of the surface along its normal, into the
/// empty cell in front of it. Removing (placing air) steps half a voxel in,
/// into the voxel that was hit.
pub fn target_cell(surface: &TargetedSurface, voxel: VoxelType) -> Point3<i32> {
    let step = if voxel.is_empty() { -0.5 } else { 0.5 };
    coords::voxel_of(surface.position + surface.normal * step)
}

/// Places `voxel` at the surface the observer is targeting.
///
/// Placing a non-air voxel in a cell that overlaps the observer's own volume
/// is refused. Removing is never refused.
pub fn place_voxel<O: Observer + ?Sized>(world: &mut World, observer: &O, voxel: VoxelType) -> PlacementOutcome {
    let Some(surface) = observer.targeted_surface() else {
        return PlacementOutcome::NoTarget;
    };

    let cell = target_cell(&surface, voxel);
    if !voxel.is_empty() && observer.occupied_volume().overlaps_voxel(cell) {
        debug!("Refused to place {:?} at {:?} inside the observer", voxel, cell);
        return PlacementOutcome::Blocked(cell);
    }

    let remeshed = world.set_voxel(cell, voxel);
    if remeshed.is_empty() {
        PlacementOutcome::OutOfWorld(cell)
    } else {
        PlacementOutcome::Placed(cell, remeshed)
    }
}

#[cfg(test)]
mod tests {
    use cgmath::Vector3;

    use super::*;

    #[test]
    fn placement_steps_out_and_removal_steps_in() {
        let surface = TargetedSurface {
            position: Point3::new(3.25, 8.0, -0.5),
            normal: Vector3::new(0.0, 1.0, 0.0),
        };

        assert_eq!(target_cell(&surface, VoxelType::Stone), Point3::new(3, 8, -1));
        assert_eq!(target_cell(&surface, VoxelType::Air), Point3::new(3, 7, -1));
    }
}
