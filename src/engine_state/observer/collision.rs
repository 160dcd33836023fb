//! Observer bounding volume and movement collision.
//!
//! Collision tests each corner of the observer's box against the voxel it
//! would move into, one axis at a time. An axis is blocked as soon as any
//! corner would enter a solid voxel along it; the other axes still move. This
//! lets the observer slide along walls, but it is an approximation: a corner
//! that only collides when moving diagonally is not caught.

use cgmath::{Point3, Vector3};

use crate::engine_state::voxels::{coords, World};

/// Half the width and depth of the observer's box.
pub const HALF_WIDTH: f32 = 0.4;
/// Half the height of the observer's box.
pub const HALF_HEIGHT: f32 = 0.875;
/// How far below the eye the centre of the box sits.
pub const EYE_TO_CENTER: f32 = 0.75;
/// How far below the eye the observer's feet are.
pub const EYE_TO_FEET: f32 = EYE_TO_CENTER + HALF_HEIGHT;

/// An axis-aligned box in world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    /// Lowest corner
    pub min: Point3<f32>,
    /// Highest corner
    pub max: Point3<f32>,
}

impl BoundingBox {
    /// The box occupied by an observer whose eye is at `eye`.
    pub fn around_eye(eye: Point3<f32>) -> Self {
        let center = Point3::new(eye.x, eye.y - EYE_TO_CENTER, eye.z);
        let half = Vector3::new(HALF_WIDTH, HALF_HEIGHT, HALF_WIDTH);
        BoundingBox {
            min: center - half,
            max: center + half,
        }
    }

    /// The eight corners of the box.
    pub fn corners(&self) -> [Point3<f32>; 8] {
        let (min, max) = (self.min, self.max);
        [
            Point3::new(min.x, min.y, min.z),
            Point3::new(max.x, min.y, min.z),
            Point3::new(min.x, max.y, min.z),
            Point3::new(max.x, max.y, min.z),
            Point3::new(min.x, min.y, max.z),
            Point3::new(max.x, min.y, max.z),
            Point3::new(min.x, max.y, max.z),
            Point3::new(max.x, max.y, max.z),
        ]
    }

    /// Whether the box overlaps the unit cell of a voxel. Touching faces do
    /// not count.
    pub fn overlaps_voxel(&self, voxel: Point3<i32>) -> bool {
        let low = Point3::new(voxel.x as f32, voxel.y as f32, voxel.z as f32);
        self.min.x < low.x + 1.0
            && self.max.x > low.x
            && self.min.y < low.y + 1.0
            && self.max.y > low.y
            && self.min.z < low.z + 1.0
            && self.max.z > low.z
    }
}

/// Whether a point is inside a voxel that stops movement.
///
/// Air and water are passable, and so is space in chunks that do not exist.
fn blocks(world: &World, point: Point3<f32>) -> bool {
    world
        .get_voxel(coords::voxel_of(point))
        .is_some_and(|voxel| !voxel.is_passable())
}

/// Clips a movement of the observer against the world.
///
/// # Arguments
/// * `world` - The world to collide with
/// * `eye` - The observer's current eye position
/// * `delta` - The requested movement
///
/// # Returns
/// `delta` with every blocked axis zeroed.
pub fn resolve_movement(world: &World, eye: Point3<f32>, delta: Vector3<f32>) -> Vector3<f32> {
    let mut allowed = delta;

    for corner in BoundingBox::around_eye(eye).corners() {
        if allowed.x != 0.0 && blocks(world, Point3::new(corner.x + delta.x, corner.y, corner.z)) {
            allowed.x = 0.0;
        }
        if allowed.y != 0.0 && blocks(world, Point3::new(corner.x, corner.y + delta.y, corner.z)) {
            allowed.y = 0.0;
        }
        if allowed.z != 0.0 && blocks(world, Point3::new(corner.x, corner.y, corner.z + delta.z)) {
            allowed.z = 0.0;
        }
    }

    allowed
}
