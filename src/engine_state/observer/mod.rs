//! # Observer
//!
//! The point of view the world is streamed around and edited from.
//!
//! ## Core Components
//! - [`Observer`]: What the engine needs to know about any observer
//! - [`ObserverState`]: A concrete observer with a position, a render distance
//!   and the surface it is currently targeting
//! - `collision`: The observer's bounding box and movement clipping
//! - `placement`: Voxel placement and removal at the targeted surface
//!
//! Ray targeting itself happens outside the engine: whoever casts the ray
//! hands the hit to [`ObserverState::set_targeted_surface`].

use cgmath::{Point3, Vector3};

use crate::engine_state::voxels::{coords, ChunkCoord};

pub mod collision;
pub mod placement;

pub use collision::BoundingBox;
pub use placement::PlacementOutcome;

/// Chunk-coordinate bounds of the region an observer wants rendered.
///
/// All bounds are inclusive. The vertical pair is always `0..=0` because
/// every chunk spans the full height of the world.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowBounds {
    /// Lowest chunk x
    pub pbx: i32,
    /// Highest chunk x
    pub pfx: i32,
    /// Lowest chunk y
    pub pby: i32,
    /// Highest chunk y
    pub pfy: i32,
    /// Lowest chunk z
    pub pbz: i32,
    /// Highest chunk z
    pub pfz: i32,
}

/// A point on a voxel surface hit by the observer's view ray.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetedSurface {
    /// Where the ray hit, in world space
    pub position: Point3<f32>,
    /// Outward normal of the face that was hit
    pub normal: Vector3<f32>,
}

/// What the engine reads from an observer.
pub trait Observer {
    /// The chunk the observer is in.
    fn current_chunk_coordinate(&self) -> ChunkCoord;

    /// The chunks the observer wants rendered.
    fn rendering_window_bounds(&self) -> WindowBounds;

    /// The surface the observer is looking at, if any.
    fn targeted_surface(&self) -> Option<TargetedSurface>;

    /// The space the observer's body occupies.
    fn occupied_volume(&self) -> BoundingBox;
}

/// A free-moving observer.
#[derive(Debug, Clone, PartialEq)]
pub struct ObserverState {
    /// Eye position in world space
    pub position: Point3<f32>,
    render_distance: i32,
    targeted: Option<TargetedSurface>,
}

impl ObserverState {
    /// Creates an observer with its eye at `position`.
    pub fn new(position: Point3<f32>, render_distance: i32) -> Self {
        ObserverState {
            position,
            render_distance: render_distance.max(0),
            targeted: None,
        }
    }

    /// The radius of the rendered window in chunks.
    pub fn render_distance(&self) -> i32 {
        self.render_distance
    }

    /// Records the result of the latest view-ray cast.
    pub fn set_targeted_surface(&mut self, surface: Option<TargetedSurface>) {
        self.targeted = surface;
    }

    /// The voxel under the targeted surface, for the selection highlight.
    pub fn highlighted_voxel(&self) -> Option<Point3<i32>> {
        self.targeted
            .map(|surface| coords::voxel_of(surface.position - surface.normal * 0.5))
    }
}

impl Observer for ObserverState {
    fn current_chunk_coordinate(&self) -> ChunkCoord {
        ChunkCoord::of_world_position(self.position)
    }

    fn rendering_window_bounds(&self) -> WindowBounds {
        let chunk = self.current_chunk_coordinate();
        WindowBounds {
            pbx: chunk.x.saturating_sub(self.render_distance),
            pfx: chunk.x.saturating_add(self.render_distance),
            pby: 0,
            pfy: 0,
            pbz: chunk.z.saturating_sub(self.render_distance),
            pfz: chunk.z.saturating_add(self.render_distance),
        }
    }

    fn targeted_surface(&self) -> Option<TargetedSurface> {
        self.targeted
    }

    fn occupied_volume(&self) -> BoundingBox {
        BoundingBox::around_eye(self.position)
    }
}
