//! Shared material state and presentation modes.
//!
//! Materials are written once at startup and read by every chunk's meshes
//! afterwards. Presentation (normal or debug) is derived from them on demand
//! and never stored back, so toggling debug mode cannot alter voxel data or
//! mesh topology.

use serde::{Deserialize, Serialize};

use super::meshing::MeshKind;
use crate::error::EngineError;

/// Render settings for one kind of chunk mesh.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MaterialState {
    /// Draw edges only
    pub wireframe: bool,
    /// Blend with what is behind
    pub transparent: bool,
    /// Opacity used when `transparent` is set (0.0-1.0)
    pub opacity: f32,
    /// Disable back-face culling
    pub double_sided: bool,
}

impl MaterialState {
    /// The default material of opaque terrain.
    pub const OPAQUE: MaterialState = MaterialState {
        wireframe: false,
        transparent: false,
        opacity: 1.0,
        double_sided: false,
    };

    /// The default material of water. Water is seen from below as well, so
    /// back faces are kept.
    pub const TRANSLUCENT: MaterialState = MaterialState {
        wireframe: false,
        transparent: true,
        opacity: 1.0,
        double_sided: true,
    };
}

/// How the world is presented.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PresentationMode {
    /// Regular textured rendering with fog.
    #[default]
    Normal,
    /// Wireframe, see-through terrain, no fog and the current chunk outlined.
    Debug,
}

impl PresentationMode {
    /// The other mode.
    pub fn toggled(self) -> Self {
        match self {
            PresentationMode::Normal => PresentationMode::Debug,
            PresentationMode::Debug => PresentationMode::Normal,
        }
    }

    /// Whether this is the debug mode.
    pub fn is_debug(self) -> bool {
        self == PresentationMode::Debug
    }
}

/// Everything the render target needs to present a frame in a given mode.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Presentation {
    /// Which mode produced this presentation
    pub mode: PresentationMode,
    /// Material applied to opaque meshes
    pub opaque: MaterialState,
    /// Material applied to translucent meshes
    pub translucent: MaterialState,
    /// Whether scene fog is enabled
    pub fog: bool,
    /// Whether the observer's chunk is outlined
    pub chunk_outline: bool,
}

impl Presentation {
    /// The material for one kind of mesh.
    pub fn material(&self, kind: MeshKind) -> MaterialState {
        match kind {
            MeshKind::Opaque => self.opaque,
            MeshKind::Translucent => self.translucent,
        }
    }
}

/// The shared materials of the world.
///
/// Holds the base opaque and translucent materials plus the texture atlas
/// binding, which may be set at most once.
#[derive(Debug, Clone, PartialEq)]
pub struct Materials {
    opaque: MaterialState,
    translucent: MaterialState,
    texture: Option<String>,
}

impl Default for Materials {
    fn default() -> Self {
        Materials {
            opaque: MaterialState::OPAQUE,
            translucent: MaterialState::TRANSLUCENT,
            texture: None,
        }
    }
}

impl Materials {
    /// Creates the default material set with no texture bound.
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds the texture atlas shared by every chunk mesh.
    ///
    /// # Errors
    /// Returns [`EngineError::TextureAlreadyBound`] if a texture is already
    /// bound; the existing binding is kept.
    pub fn bind_texture(&mut self, name: impl Into<String>) -> Result<(), EngineError> {
        if let Some(existing) = &self.texture {
            return Err(EngineError::TextureAlreadyBound {
                existing: existing.clone(),
            });
        }

        self.texture = Some(name.into());
        Ok(())
    }

    /// The bound texture atlas, if any.
    pub fn texture(&self) -> Option<&str> {
        self.texture.as_deref()
    }

    /// The base material for one kind of mesh.
    pub fn material(&self, kind: MeshKind) -> MaterialState {
        match kind {
            MeshKind::Opaque => self.opaque,
            MeshKind::Translucent => self.translucent,
        }
    }

    /// Derives the presentation for a mode from the base materials.
    pub fn present(&self, mode: PresentationMode) -> Presentation {
        match mode {
            PresentationMode::Normal => Presentation {
                mode,
                opaque: self.opaque,
                translucent: self.translucent,
                fog: true,
                chunk_outline: false,
            },
            PresentationMode::Debug => Presentation {
                mode,
                opaque: MaterialState {
                    wireframe: true,
                    transparent: true,
                    ..self.opaque
                },
                translucent: MaterialState {
                    wireframe: true,
                    opacity: 0.5,
                    ..self.translucent
                },
                fog: false,
                chunk_outline: true,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn texture_binds_once() {
        let mut materials = Materials::new();
        assert!(materials.texture().is_none());

        materials.bind_texture("atlas.png").unwrap();
        let err = materials.bind_texture("other.png").unwrap_err();

        assert!(matches!(err, EngineError::TextureAlreadyBound { .. }));
        assert_eq!(materials.texture(), Some("atlas.png"));
    }

    #[test]
    fn debug_presentation() {
        let materials = Materials::new();
        let normal = materials.present(PresentationMode::Normal);
        let debug = materials.present(PresentationMode::Debug);

        assert!(normal.fog && !normal.chunk_outline);
        assert_eq!(normal.opaque, MaterialState::OPAQUE);

        assert!(!debug.fog && debug.chunk_outline);
        assert!(debug.opaque.wireframe && debug.opaque.transparent);
        assert!(debug.translucent.wireframe);
        assert_eq!(debug.translucent.opacity, 0.5);
        assert_eq!(debug.material(MeshKind::Translucent), debug.translucent);

        // The base materials are untouched.
        assert_eq!(materials.material(MeshKind::Opaque), MaterialState::OPAQUE);
    }

    #[test]
    fn toggling_twice_returns_to_normal() {
        let mode = PresentationMode::default();
        assert!(mode.toggled().is_debug());
        assert_eq!(mode.toggled().toggled(), mode);
    }
}
