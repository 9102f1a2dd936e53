//! Entity document from the LDtk simplified export
//!
//! Shape: `{ "entities": [{ "__identifier": "...", "px": [x, y] }], ... }`.
//! Records are read once at build time; unknown JSON fields are ignored.

use serde::{Deserialize, Serialize};

use super::LevelError;

/// One entity placement: a type identifier and a pixel position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityRecord {
    /// LDtk entity name; doubles as the visual/behavioral key
    #[serde(rename = "__identifier")]
    pub identifier: String,
    /// Position in pixels
    pub px: [f32; 2],
}

/// The parsed entity-and-metadata document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LevelData {
    #[serde(default)]
    pub entities: Vec<EntityRecord>,
    /// Level pixel dimensions, when the export carries them. Used to
    /// validate the configured cell size against the grid.
    #[serde(default)]
    pub width: Option<f32>,
    #[serde(default)]
    pub height: Option<f32>,
}

impl LevelData {
    pub fn parse(raw: &str) -> Result<Self, LevelError> {
        Ok(serde_json::from_str(raw)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_entities() {
        let json = r##"{
            "entities": [
                { "__identifier": "Star", "px": [96, 32], "color": "#FFD700" },
                { "__identifier": "Door", "px": [640, 480] }
            ],
            "width": 800,
            "height": 600
        }"##;
        let data = LevelData::parse(json).unwrap();
        assert_eq!(data.entities.len(), 2);
        assert_eq!(data.entities[0].identifier, "Star");
        assert_eq!(data.entities[0].px, [96.0, 32.0]);
        assert_eq!(data.width, Some(800.0));
    }

    #[test]
    fn test_parse_missing_entities_defaults_empty() {
        let data = LevelData::parse("{}").unwrap();
        assert!(data.entities.is_empty());
        assert!(data.width.is_none());
    }

    #[test]
    fn test_parse_malformed_is_fatal() {
        assert!(matches!(
            LevelData::parse("{ entities: ["),
            Err(LevelError::BadEntityDocument(_))
        ));
    }
}
