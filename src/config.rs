//! Pipeline configuration loaded from config.json.
//!
//! Holds the colour thresholds, clustering parameters and the match manifest.
//! If the file is missing or unreadable the defaults are used, which describe
//! the four screenshots the thresholds were calibrated against.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::detection::DetectionParams;

/// One screenshot to process.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MatchInput {
    /// Short key used in log lines and diagnostic file names
    pub name: String,
    /// Human-readable opponent label
    pub label: String,
    /// Key in the output JSON
    pub match_num: u32,
    /// Screenshot path, relative paths resolve against the config file
    pub path: PathBuf,
}

impl MatchInput {
    fn new(name: &str, label: &str, match_num: u32, file: &str) -> Self {
        Self {
            name: name.to_string(),
            label: label.to_string(),
            match_num,
            path: Path::new("assets").join(file),
        }
    }
}

/// Complete pipeline configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    #[serde(flatten)]
    pub detection: DetectionParams,
    /// Where the arrow JSON is written
    pub output_path: PathBuf,
    /// Processed in this order
    pub matches: Vec<MatchInput>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            detection: DetectionParams::default(),
            output_path: Path::new("outputs").join("inaccurate_estimated.json"),
            matches: vec![
                MatchInput::new("ohiggins", "vs O'Higgins", 1, "image-1772176970380.png"),
                MatchInput::new("calera", "vs La Calera", 2, "image-1772177022786.png"),
                MatchInput::new("everton", "vs Everton", 3, "image-1772177032339.png"),
                MatchInput::new("limache", "vs Limache", 4, "image-1772177040733.png"),
            ],
        }
    }
}

impl PipelineConfig {
    /// Load config from file, or return defaults if it can't be used.
    ///
    /// Relative paths are resolved against the directory holding `config_path`.
    pub fn load(config_path: &Path) -> Self {
        crate::log(&format!("Looking for config at: {}", config_path.display()));

        let config = if config_path.exists() {
            match fs::read_to_string(config_path) {
                Ok(contents) => match serde_json::from_str(&contents) {
                    Ok(config) => {
                        crate::log(&format!("Config loaded from {}", config_path.display()));
                        config
                    }
                    Err(e) => {
                        crate::log(&format!("Failed to parse config: {}. Using defaults.", e));
                        Self::default()
                    }
                },
                Err(e) => {
                    crate::log(&format!("Failed to read config: {}. Using defaults.", e));
                    Self::default()
                }
            }
        } else {
            crate::log("Config not found. Using default config.");
            Self::default()
        };

        match config_path.parent() {
            Some(base) => config.resolved_against(base),
            None => config,
        }
    }

    /// Returns a copy with relative output and manifest paths joined onto `base`.
    pub fn resolved_against(mut self, base: &Path) -> Self {
        if self.output_path.is_relative() {
            self.output_path = base.join(&self.output_path);
        }
        for m in &mut self.matches {
            if m.path.is_relative() {
                m.path = base.join(&m.path);
            }
        }
        self
    }

    /// Write the default config to `config_path` as a starting point.
    pub fn save_default(config_path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(&Self::default())
            .context("Failed to serialize default config")?;
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)
                .context(format!("Failed to create directory: {}", parent.display()))?;
        }
        fs::write(config_path, json)
            .context(format!("Failed to write config: {}", config_path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detection::ColorRange;
    use tempfile::tempdir;

    #[test]
    fn test_defaults_match_calibration() {
        let config = PipelineConfig::default();
        assert_eq!(config.detection.pitch_color, ColorRange::PITCH_GREEN);
        assert_eq!(config.detection.pass_color, ColorRange::INACCURATE_RED);
        assert_eq!(config.detection.cluster_gap, 12);
        assert_eq!(config.detection.min_cluster_size, 4);
        let nums: Vec<u32> = config.matches.iter().map(|m| m.match_num).collect();
        assert_eq!(nums, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_flat_json_layout() {
        let json = r#"{
            "cluster_gap": 15,
            "pass_color": {"r": [190, 240], "g": [60, 110], "b": [40, 90]},
            "matches": [
                {"name": "a", "label": "vs A", "match_num": 7, "path": "a.png"}
            ]
        }"#;
        let config: PipelineConfig = serde_json::from_str(json).unwrap();

        assert_eq!(config.detection.cluster_gap, 15);
        assert_eq!(config.detection.min_cluster_size, 4);
        assert_eq!(config.detection.pass_color.r, (190, 240));
        assert_eq!(config.detection.pitch_color, ColorRange::PITCH_GREEN);
        assert_eq!(config.matches.len(), 1);
        assert_eq!(config.matches[0].match_num, 7);
    }

    #[test]
    fn test_load_resolves_relative_paths() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(
            &path,
            r#"{"output_path": "out/arrows.json",
                "matches": [{"name": "a", "label": "vs A", "match_num": 1, "path": "shots/a.png"}]}"#,
        )
        .unwrap();

        let config = PipelineConfig::load(&path);

        assert_eq!(config.output_path, dir.path().join("out/arrows.json"));
        assert_eq!(config.matches[0].path, dir.path().join("shots/a.png"));
    }

    #[test]
    fn test_load_falls_back_on_bad_json() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{ not json").unwrap();

        let config = PipelineConfig::load(&path);

        assert_eq!(config.detection, DetectionParams::default());
        assert_eq!(config.matches.len(), 4);
    }

    #[test]
    fn test_save_default_round_trips() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");

        PipelineConfig::save_default(&path).unwrap();
        let content = fs::read_to_string(&path).unwrap();
        let parsed: PipelineConfig = serde_json::from_str(&content).unwrap();

        assert_eq!(parsed, PipelineConfig::default());
        assert!(content.contains("\"cluster_gap\": 12"));
    }
}
