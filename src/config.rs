//! World configuration.
//!
//! Configuration is a JSON document; every field is optional and falls back
//! to its default.
//!
//! ```json
//! {
//!   "seed": 1234,
//!   "render_distance": 3,
//!   "generation": { "method": "flat", "height": 10 },
//!   "terrain": { "sea_level": 20 },
//!   "decorations": { "trees": false }
//! }
//! ```

use std::{fs, path::Path};

use log::info;
use serde::{Deserialize, Serialize};

use crate::{
    engine_state::voxels::{
        coords::CHUNK_HEIGHT,
        generation::{terrain::MAX_OCTAVES, DecorationConfig, GenerationMethod, TerrainConfig},
    },
    error::EngineError,
};

/// The largest accepted render distance, in chunks.
pub const MAX_RENDER_DISTANCE: i32 = 32;

/// Settings fixed when a world is created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Generation seed; drawn at random when absent
    pub seed: Option<u32>,
    /// Radius of the streaming window in chunks
    pub render_distance: i32,
    /// How new chunks are filled
    pub generation: GenerationMethod,
    /// Heightfield parameters
    pub terrain: TerrainConfig,
    /// Tree placement
    pub decorations: DecorationConfig,
}

impl Default for WorldConfig {
    fn default() -> Self {
        WorldConfig {
            seed: None,
            render_distance: 2,
            generation: GenerationMethod::default(),
            terrain: TerrainConfig::default(),
            decorations: DecorationConfig::default(),
        }
    }
}

fn invalid(field: &'static str, reason: impl Into<String>) -> EngineError {
    EngineError::InvalidConfig {
        field,
        reason: reason.into(),
    }
}

impl WorldConfig {
    /// Parses and validates a JSON document.
    pub fn from_json(json: &str) -> Result<Self, EngineError> {
        let config: WorldConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, EngineError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| EngineError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let config = Self::from_json(&json)?;
        info!("Loaded world configuration from {}", path.display());
        Ok(config)
    }

    /// Checks every value is in range.
    pub fn validate(&self) -> Result<(), EngineError> {
        if !(0..=MAX_RENDER_DISTANCE).contains(&self.render_distance) {
            return Err(invalid(
                "render_distance",
                format!("{} is outside 0..={}", self.render_distance, MAX_RENDER_DISTANCE),
            ));
        }

        if let GenerationMethod::Flat { height } = self.generation {
            if !(0..=CHUNK_HEIGHT).contains(&height) {
                return Err(invalid(
                    "generation.height",
                    format!("{} is outside 0..={}", height, CHUNK_HEIGHT),
                ));
            }
        }

        let terrain = &self.terrain;
        if !terrain.base_height.is_finite() || !terrain.amplitude.is_finite() {
            return Err(invalid("terrain.base_height", "base height and amplitude must be finite"));
        }
        if !(terrain.frequency.is_finite() && terrain.frequency > 0.0) {
            return Err(invalid("terrain.frequency", "must be a positive number"));
        }
        if !(1..=MAX_OCTAVES).contains(&terrain.octaves) {
            return Err(invalid(
                "terrain.octaves",
                format!("{} is outside 1..={}", terrain.octaves, MAX_OCTAVES),
            ));
        }
        if !terrain.persistence.is_finite() || !terrain.lacunarity.is_finite() {
            return Err(invalid("terrain.persistence", "persistence and lacunarity must be finite"));
        }
        if !(0..CHUNK_HEIGHT).contains(&terrain.sea_level) {
            return Err(invalid(
                "terrain.sea_level",
                format!("{} is outside 0..{}", terrain.sea_level, CHUNK_HEIGHT),
            ));
        }
        if terrain.dirt_depth < 0 {
            return Err(invalid("terrain.dirt_depth", "must not be negative"));
        }

        if !(0.0..=1.0).contains(&self.decorations.tree_density) {
            return Err(invalid(
                "decorations.tree_density",
                format!("{} is outside 0..=1", self.decorations.tree_density),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_is_the_default() {
        assert_eq!(WorldConfig::from_json("{}").unwrap(), WorldConfig::default());
    }

    #[test]
    fn nested_fields_keep_their_defaults() {
        let config = WorldConfig::from_json(r#"{"terrain": {"sea_level": 12}}"#).unwrap();

        assert_eq!(config.terrain.sea_level, 12);
        assert_eq!(config.terrain.octaves, TerrainConfig::default().octaves);
    }

    #[test]
    fn out_of_range_values_are_rejected() {
        for (json, field) in [
            (r#"{"render_distance": 33}"#, "render_distance"),
            (r#"{"render_distance": -1}"#, "render_distance"),
            (r#"{"terrain": {"octaves": 0}}"#, "terrain.octaves"),
            (r#"{"terrain": {"sea_level": 64}}"#, "terrain.sea_level"),
            (r#"{"generation": {"method": "flat", "height": 65}}"#, "generation.height"),
            (r#"{"decorations": {"tree_density": 1.5}}"#, "decorations.tree_density"),
        ] {
            match WorldConfig::from_json(json) {
                Err(EngineError::InvalidConfig { field: rejected, .. }) => assert_eq!(rejected, field),
                other => panic!("{} was not rejected: {:?}", json, other),
            }
        }
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        assert!(matches!(
            WorldConfig::from_json(r#"{"seed": "abc"}"#),
            Err(EngineError::ConfigParse(_))
        ));
    }
}
