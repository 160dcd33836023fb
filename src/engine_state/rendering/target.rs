//! The rendering collaborator contract.
//!
//! The engine never draws anything itself. It hands mesh artifacts to a
//! [`RenderTarget`], keyed by chunk coordinate and mesh kind, and tells it how
//! to present them. [`SceneTarget`] is an in-memory target that records what
//! it was given, used by the headless driver and the tests.

use std::collections::{BTreeSet, HashMap};

use cgmath::Point3;

use super::{
    materials::{Materials, Presentation},
    meshing::{ChunkMesh, MeshKind},
};
use crate::engine_state::voxels::coords::ChunkCoord;

/// Receives chunk meshes and presentation state from the engine.
pub trait RenderTarget {
    /// Receives the shared materials. Called once, before any mesh is
    /// attached.
    fn bind_materials(&mut self, materials: &Materials);

    /// Makes a chunk mesh visible, replacing any mesh already attached under
    /// the same key.
    fn attach(&mut self, coord: ChunkCoord, kind: MeshKind, mesh: &ChunkMesh);

    /// Hides a chunk mesh. Detaching a mesh that is not attached is a no-op.
    fn detach(&mut self, coord: ChunkCoord, kind: MeshKind);

    /// The revision of the mesh attached under a key, if any.
    fn attached_revision(&self, coord: ChunkCoord, kind: MeshKind) -> Option<u64>;

    /// Whether a mesh is attached under a key.
    fn is_attached(&self, coord: ChunkCoord, kind: MeshKind) -> bool {
        self.attached_revision(coord, kind).is_some()
    }

    /// Every chunk with at least one attached mesh.
    fn attached_chunks(&self) -> Vec<ChunkCoord>;

    /// Applies a presentation to everything drawn from now on.
    fn apply_presentation(&mut self, presentation: &Presentation);

    /// Shows (or with `None`, hides) the outline of a chunk centred at the
    /// given point.
    fn show_chunk_outline(&mut self, _center: Option<Point3<f32>>) {}
}

/// What a [`SceneTarget`] keeps about an attached mesh.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttachedMesh {
    /// Revision of the attached mesh
    pub revision: u64,
    /// Number of faces in the mesh
    pub face_count: usize,
    /// Number of indices in the mesh
    pub index_count: usize,
}

/// An in-memory render target.
#[derive(Debug, Default)]
pub struct SceneTarget {
    attached: HashMap<(ChunkCoord, MeshKind), AttachedMesh>,
    materials: Option<Materials>,
    presentation: Option<Presentation>,
    chunk_outline: Option<Point3<f32>>,
    attach_count: usize,
}

impl SceneTarget {
    /// Creates an empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// What is attached under a key.
    pub fn attached(&self, coord: ChunkCoord, kind: MeshKind) -> Option<&AttachedMesh> {
        self.attached.get(&(coord, kind))
    }

    /// The materials bound to the scene.
    pub fn materials(&self) -> Option<&Materials> {
        self.materials.as_ref()
    }

    /// The presentation last applied.
    pub fn presentation(&self) -> Option<&Presentation> {
        self.presentation.as_ref()
    }

    /// The centre of the outlined chunk, if one is shown.
    pub fn chunk_outline(&self) -> Option<Point3<f32>> {
        self.chunk_outline
    }

    /// How many attach calls the scene has received in total.
    pub fn attach_count(&self) -> usize {
        self.attach_count
    }

    /// Total faces across all attached meshes.
    pub fn face_count(&self) -> usize {
        self.attached.values().map(|mesh| mesh.face_count).sum()
    }
}

impl RenderTarget for SceneTarget {
    fn bind_materials(&mut self, materials: &Materials) {
        self.materials = Some(materials.clone());
    }

    fn attach(&mut self, coord: ChunkCoord, kind: MeshKind, mesh: &ChunkMesh) {
        self.attach_count += 1;
        self.attached.insert(
            (coord, kind),
            AttachedMesh {
                revision: mesh.revision,
                face_count: mesh.face_count(),
                index_count: mesh.indices.len(),
            },
        );
    }

    fn detach(&mut self, coord: ChunkCoord, kind: MeshKind) {
        self.attached.remove(&(coord, kind));
    }

    fn attached_revision(&self, coord: ChunkCoord, kind: MeshKind) -> Option<u64> {
        self.attached.get(&(coord, kind)).map(|mesh| mesh.revision)
    }

    fn attached_chunks(&self) -> Vec<ChunkCoord> {
        let coords: BTreeSet<ChunkCoord> = self.attached.keys().map(|(coord, _)| *coord).collect();
        coords.into_iter().collect()
    }

    fn apply_presentation(&mut self, presentation: &Presentation) {
        self.presentation = Some(*presentation);
    }

    fn show_chunk_outline(&mut self, center: Option<Point3<f32>>) {
        self.chunk_outline = center;
    }
}
