//! Remembers the last player the CLI was asked about.

use serde::{Deserialize, Serialize};
use std::path::Path;

use super::ConfigError;
use crate::models::Region;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LastQuery {
    #[serde(default)]
    pub game_name: String,
    #[serde(default)]
    pub tag_line: String,
    #[serde(default)]
    pub region: Option<Region>,
}

impl LastQuery {
    /// Read the memory file. A missing or unreadable file is an empty memory.
    pub fn load(path: &Path) -> Self {
        std::fs::read_to_string(path)
            .ok()
            .and_then(|s| serde_json::from_str(&s).ok())
            .unwrap_or_default()
    }

    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| ConfigError::ValidationError(e.to_string()))?;
        std::fs::write(path, json)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".sniped_memory.json");

        let query = LastQuery {
            game_name: "Faker".to_string(),
            tag_line: "KR1".to_string(),
            region: Some(Region::Kr),
        };
        query.save(&path).unwrap();
        assert_eq!(LastQuery::load(&path), query);
    }

    #[test]
    fn test_missing_or_corrupt_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("memory.json");
        assert_eq!(LastQuery::load(&path), LastQuery::default());

        std::fs::write(&path, "{not json").unwrap();
        assert_eq!(LastQuery::load(&path), LastQuery::default());
    }
}
