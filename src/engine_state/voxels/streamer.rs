//! # Streamer Module
//!
//! Keeps the render target showing exactly the chunks around the observer.
//!
//! Each tick recomputes a square window of chunk coordinates from the
//! observer's bounds. Chunks inside the window are created, decorated and
//! meshed as needed and attached; attached chunks outside it are detached.
//! Detached chunks stay in the store with their voxels and meshes, so walking
//! back attaches them again without regenerating anything.

use log::debug;

use super::{coords::ChunkCoord, world::World};
use crate::engine_state::{
    observer::WindowBounds,
    rendering::{MeshKind, RenderTarget},
};

/// An inclusive rectangle of chunk coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreamingWindow {
    /// Smallest chunk coordinate in the window (inclusive)
    pub min: ChunkCoord,
    /// Largest chunk coordinate in the window (inclusive)
    pub max: ChunkCoord,
}

impl StreamingWindow {
    /// The square window of side `2 * radius + 1` centred on a chunk.
    pub fn around(center: ChunkCoord, radius: i32) -> Self {
        let radius = radius.max(0);
        StreamingWindow {
            min: center.offset(-radius, -radius),
            max: center.offset(radius, radius),
        }
    }

    /// The window spanned by an observer's bounds. Vertical bounds are
    /// ignored: every chunk spans the whole height of the world.
    pub fn from_bounds(bounds: WindowBounds) -> Self {
        StreamingWindow {
            min: ChunkCoord::new(bounds.pbx.min(bounds.pfx), bounds.pbz.min(bounds.pfz)),
            max: ChunkCoord::new(bounds.pbx.max(bounds.pfx), bounds.pbz.max(bounds.pfz)),
        }
    }

    /// Whether a chunk lies in the window. Chunks on the border are inside.
    pub fn contains(&self, coord: ChunkCoord) -> bool {
        (self.min.x..=self.max.x).contains(&coord.x) && (self.min.z..=self.max.z).contains(&coord.z)
    }

    /// Every chunk coordinate in the window, row by row.
    pub fn coords(&self) -> impl Iterator<Item = ChunkCoord> {
        let StreamingWindow { min, max } = *self;
        (min.z..=max.z).flat_map(move |z| (min.x..=max.x).map(move |x| ChunkCoord::new(x, z)))
    }

    /// The number of chunks in the window.
    pub fn len(&self) -> usize {
        let span = |min: i32, max: i32| (i64::from(max) - i64::from(min) + 1).max(0) as usize;
        span(self.min.x, self.max.x) * span(self.min.z, self.max.z)
    }

    /// Whether the window is empty. A window always holds at least its
    /// centre, so this is `false` for every window built by this module.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// What one streaming tick changed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StreamingReport {
    /// Chunks that became visible this tick
    pub attached: Vec<ChunkCoord>,
    /// Visible chunks whose meshes were replaced with a newer revision
    pub refreshed: Vec<ChunkCoord>,
    /// Chunks hidden this tick
    pub detached: Vec<ChunkCoord>,
    /// Chunks that were generated, wired or meshed this tick
    pub prepared: Vec<ChunkCoord>,
}

impl StreamingReport {
    /// Whether the tick changed nothing.
    pub fn is_empty(&self) -> bool {
        self.attached.is_empty()
            && self.refreshed.is_empty()
            && self.detached.is_empty()
            && self.prepared.is_empty()
    }
}

/// Computes the streaming window and syncs the render target with it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorldStreamer {
    render_distance: i32,
}

impl WorldStreamer {
    /// Creates a streamer with a render-distance radius in chunks.
    pub fn new(render_distance: i32) -> Self {
        WorldStreamer {
            render_distance: render_distance.max(0),
        }
    }

    /// The radius of the window in chunks.
    pub fn render_distance(&self) -> i32 {
        self.render_distance
    }

    /// The window around a chunk at this streamer's render distance.
    pub fn window_around(&self, center: ChunkCoord) -> StreamingWindow {
        StreamingWindow::around(center, self.render_distance)
    }

    /// Runs one streaming tick.
    ///
    /// # Arguments
    /// * `world` - The world to take chunks from
    /// * `window` - The chunks that must be visible after the tick
    /// * `observer_chunk` - The chunk outlined in debug presentation
    /// * `target` - The render target to sync
    ///
    /// # Panics
    /// Panics if a chunk in the window still has no meshes after being
    /// prepared; attaching an absent mesh would break the mesh/voxel
    /// consistency the renderer relies on.
    pub fn tick<T: RenderTarget + ?Sized>(
        &self,
        world: &mut World,
        window: StreamingWindow,
        observer_chunk: ChunkCoord,
        target: &mut T,
    ) -> StreamingReport {
        let presentation = world.presentation();
        target.apply_presentation(&presentation);
        target.show_chunk_outline(presentation.chunk_outline.then(|| observer_chunk.center()));

        let mut report = StreamingReport::default();

        for coord in window.coords() {
            let ready = world
                .store()
                .get(coord)
                .is_some_and(|chunk| chunk.has_meshes() && chunk.neighbors_wired() && chunk.decorations_applied());
            if !ready {
                world.prepare_chunk(coord);
                report.prepared.push(coord);
            }

            let meshes = world
                .store()
                .get(coord)
                .and_then(|chunk| chunk.meshes())
                .unwrap_or_else(|| panic!("chunk {:?} has no meshes to attach", coord));

            let mut newly_attached = false;
            let mut refreshed = false;
            for kind in MeshKind::ALL {
                match target.attached_revision(coord, kind) {
                    Some(revision) if revision == meshes.revision() => {}
                    previous => {
                        newly_attached |= previous.is_none();
                        refreshed |= previous.is_some();
                        target.attach(coord, kind, meshes.get(kind));
                    }
                }
            }

            if newly_attached {
                report.attached.push(coord);
            } else if refreshed {
                report.refreshed.push(coord);
            }
        }

        for coord in target.attached_chunks() {
            if !window.contains(coord) {
                for kind in MeshKind::ALL {
                    target.detach(coord, kind);
                }
                report.detached.push(coord);
            }
        }

        if !report.is_empty() {
            debug!(
                "Streaming tick: {} attached, {} refreshed, {} detached, {} prepared",
                report.attached.len(),
                report.refreshed.len(),
                report.detached.len(),
                report.prepared.len()
            );
        }

        report
    }
}
