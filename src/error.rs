//! Errors returned by the engine.
//!
//! Only setup can fail: reading and validating configuration, and binding
//! the shared texture. Voxel queries report absence with `Option`, and broken
//! engine invariants panic.

use std::path::PathBuf;

use thiserror::Error;

/// The crate's error type.
#[derive(Error, Debug)]
pub enum EngineError {
    /// A configuration file could not be read.
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        /// The file that was read
        path: PathBuf,
        /// The underlying error
        source: std::io::Error,
    },

    /// A configuration document is not valid JSON for the expected shape.
    #[error("invalid configuration: {0}")]
    ConfigParse(#[from] serde_json::Error),

    /// A configuration value is out of range.
    #[error("invalid value for `{field}`: {reason}")]
    InvalidConfig {
        /// The offending field
        field: &'static str,
        /// Why the value was rejected
        reason: String,
    },

    /// The shared texture was bound twice.
    #[error("a texture is already bound ({existing})")]
    TextureAlreadyBound {
        /// The texture that stays bound
        existing: String,
    },
}
