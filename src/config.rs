// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Startup configuration.
//!
//! Settings are read once from an optional YAML or JSON file. Every field is
//! optional; anything missing falls back to the defaults below.

use crate::io::media::DEFAULT_IMAGE_EXTENSIONS;
use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Config file looked up in the working directory when none is given.
pub const DEFAULT_CONFIG_FILE: &str = "labeler.yaml";

/// Team identifier used when the prompt is left empty or cancelled.
pub const UNKNOWN_TEAM: &str = "Unknown";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelerConfig {
    /// Preset team number; skips the startup prompt.
    pub team_id: Option<String>,
    /// Extensions (without dot) picked up when opening a directory.
    pub image_extensions: Vec<String>,
    pub window_size: [f32; 2],
}

impl Default for LabelerConfig {
    fn default() -> Self {
        Self {
            team_id: None,
            image_extensions: DEFAULT_IMAGE_EXTENSIONS
                .iter()
                .map(|ext| ext.to_string())
                .collect(),
            window_size: [1000.0, 700.0],
        }
    }
}

impl LabelerConfig {
    /// Parse a config file, choosing the format by extension.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let extension = path.extension().and_then(|s| s.to_str());
        let config: Self = match extension {
            Some("yaml") | Some("yml") => serde_yaml::from_str(&text)?,
            Some("json") => serde_json::from_str(&text)?,
            _ => bail!("Unsupported config extension: {:?}", extension),
        };
        Ok(config)
    }

    /// Load `path` if it exists; otherwise, or on a parse error, use defaults.
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            log::debug!("No config at {}, using defaults", path.display());
            return Self::default();
        }
        match Self::load(path) {
            Ok(config) => {
                log::info!("Loaded config from {}", path.display());
                config
            }
            Err(e) => {
                log::warn!("Ignoring config {}: {}", path.display(), e);
                Self::default()
            }
        }
    }
}

/// Trimmed team identifier, or [`UNKNOWN_TEAM`] when blank.
pub fn team_or_unknown(input: &str) -> String {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        UNKNOWN_TEAM.to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_yaml_partial_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("labeler.yaml");
        std::fs::write(&path, "team_id: \"5\"\n").unwrap();

        let config = LabelerConfig::load(&path).unwrap();
        assert_eq!(config.team_id.as_deref(), Some("5"));
        assert_eq!(config.image_extensions, LabelerConfig::default().image_extensions);
    }

    #[test]
    fn test_json_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("labeler.json");
        std::fs::write(&path, r#"{"image_extensions": ["png"], "window_size": [800.0, 600.0]}"#).unwrap();

        let config = LabelerConfig::load(&path).unwrap();
        assert_eq!(config.team_id, None);
        assert_eq!(config.image_extensions, vec!["png".to_string()]);
        assert_eq!(config.window_size, [800.0, 600.0]);
    }

    #[test]
    fn test_bad_config_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("labeler.yaml");
        std::fs::write(&path, "team_id: [unclosed").unwrap();

        assert_eq!(LabelerConfig::load_or_default(&path), LabelerConfig::default());
        assert_eq!(
            LabelerConfig::load_or_default(&dir.path().join("missing.yaml")),
            LabelerConfig::default()
        );
    }

    #[test]
    fn test_unsupported_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("labeler.ini");
        std::fs::write(&path, "team_id=5").unwrap();
        assert!(LabelerConfig::load(&path).is_err());
    }

    #[test]
    fn test_team_or_unknown() {
        assert_eq!(team_or_unknown("  12 "), "12");
        assert_eq!(team_or_unknown("   "), "Unknown");
    }
}
