//! Mesh data structures for chunk rendering.
//!
//! A chunk produces two mesh artifacts: one for opaque voxels and one for
//! translucent voxels, so the renderer can draw them with different material
//! settings (water needs back faces and partial transparency).

use cgmath::Point3;

use super::face::Face;
use crate::engine_state::rendering::Vertex;

/// Selects one of a chunk's two mesh artifacts.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MeshKind {
    /// Faces of opaque voxels.
    Opaque,
    /// Faces of translucent voxels (water).
    Translucent,
}

impl MeshKind {
    /// Both mesh kinds, opaque first.
    pub const ALL: [MeshKind; 2] = [MeshKind::Opaque, MeshKind::Translucent];
}

/// Visible-surface geometry for one kind of voxel in one chunk.
///
/// Each visible face contributes four vertices and six indices (two
/// triangles). The face list is kept alongside the buffers so callers can
/// inspect the surface without decoding vertices.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChunkMesh {
    /// The chunk mesh revision this mesh was built at
    pub revision: u64,
    /// Every emitted face, in emission order
    pub faces: Vec<Face>,
    /// Four vertices per face
    pub vertices: Vec<Vertex>,
    /// Six indices per face
    pub indices: Vec<u32>,
}

impl ChunkMesh {
    /// Creates a new, empty mesh tagged with a revision.
    pub fn new(revision: u64) -> Self {
        ChunkMesh {
            revision,
            ..Default::default()
        }
    }

    /// Appends one face, generating its vertices and indices.
    pub fn add_face(&mut self, face: Face) {
        let base = self.vertices.len() as u32;
        self.vertices.extend(Self::generate_face_vertices(&face));
        self.indices.extend(Self::generate_face_indices(base));
        self.faces.push(face);
    }

    /// Generates the four vertices of a face.
    ///
    /// The order matches [`Face::corners`]: lower-left, lower-right,
    /// upper-left, upper-right.
    pub fn generate_face_vertices(face: &Face) -> [Vertex; 4] {
        let [ll, lr, ul, ur] = face.corners();
        [
            Vertex::new(ll, face.voxel, face.side, 0, 1),
            Vertex::new(lr, face.voxel, face.side, 1, 1),
            Vertex::new(ul, face.voxel, face.side, 0, 0),
            Vertex::new(ur, face.voxel, face.side, 1, 0),
        ]
    }

    /// Generates the indices of the two triangles of a face whose first
    /// vertex sits at `base`.
    pub fn generate_face_indices(base: u32) -> [u32; 6] {
        [base, base + 1, base + 3, base, base + 3, base + 2]
    }

    /// The number of faces in the mesh.
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Whether the mesh has no geometry.
    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    /// Whether the mesh contains a face for the given voxel and side.
    pub fn has_face_at(&self, position: Point3<i32>, side: crate::engine_state::voxels::voxel::VoxelSide) -> bool {
        self.faces
            .iter()
            .any(|face| face.position == position && face.side == side)
    }

    /// The vertex buffer as raw bytes, ready for upload.
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// The index buffer as raw bytes, ready for upload.
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }
}

/// The pair of mesh artifacts of one chunk.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChunkMeshes {
    /// Faces of opaque voxels
    pub opaque: ChunkMesh,
    /// Faces of translucent voxels
    pub translucent: ChunkMesh,
}

impl ChunkMeshes {
    /// Creates an empty pair tagged with a revision.
    pub fn new(revision: u64) -> Self {
        ChunkMeshes {
            opaque: ChunkMesh::new(revision),
            translucent: ChunkMesh::new(revision),
        }
    }

    /// The revision both meshes were built at.
    pub fn revision(&self) -> u64 {
        self.opaque.revision
    }

    /// Gets one of the two meshes.
    pub fn get(&self, kind: MeshKind) -> &ChunkMesh {
        match kind {
            MeshKind::Opaque => &self.opaque,
            MeshKind::Translucent => &self.translucent,
        }
    }

    /// Gets one of the two meshes mutably.
    pub fn get_mut(&mut self, kind: MeshKind) -> &mut ChunkMesh {
        match kind {
            MeshKind::Opaque => &mut self.opaque,
            MeshKind::Translucent => &mut self.translucent,
        }
    }

    /// Total faces across both meshes.
    pub fn face_count(&self) -> usize {
        self.opaque.face_count() + self.translucent.face_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine_state::voxels::voxel::{VoxelSide, VoxelType};

    #[test]
    fn faces_produce_quads() {
        let mut mesh = ChunkMesh::new(3);
        mesh.add_face(Face::new(Point3::new(0, 0, 0), VoxelType::Dirt, VoxelSide::Top));
        mesh.add_face(Face::new(Point3::new(1, 0, 0), VoxelType::Dirt, VoxelSide::Top));

        assert_eq!(mesh.face_count(), 2);
        assert_eq!(mesh.vertices.len(), 8);
        assert_eq!(mesh.indices, vec![0, 1, 3, 0, 3, 2, 4, 5, 7, 4, 7, 6]);
        assert_eq!(mesh.vertex_bytes().len(), 8 * 28);
        assert_eq!(mesh.index_bytes().len(), 12 * 4);
        assert!(mesh.has_face_at(Point3::new(1, 0, 0), VoxelSide::Top));
        assert!(!mesh.has_face_at(Point3::new(1, 0, 0), VoxelSide::Bottom));
    }
}
