//! Batch extraction over the match manifest.
//!
//! This module provides:
//! - The per-match arrow report in manifest order
//! - The batch runner that skips unusable screenshots
//! - JSON export of the report

pub mod export;

use anyhow::{Context, Result};
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::path::Path;

use crate::config::{MatchInput, PipelineConfig};
use crate::detection::{self, DetectionParams, ImageDetection, PassArrow};

/// Arrows per match number, kept in the order matches were processed.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ArrowReport {
    entries: Vec<(u32, Vec<PassArrow>)>,
}

impl ArrowReport {
    /// Stores arrows for a match. A repeated match number replaces the earlier
    /// arrows but keeps its original position.
    pub fn insert(&mut self, match_num: u32, arrows: Vec<PassArrow>) {
        match self.entries.iter_mut().find(|(num, _)| *num == match_num) {
            Some(entry) => entry.1 = arrows,
            None => self.entries.push((match_num, arrows)),
        }
    }

    pub fn get(&self, match_num: u32) -> Option<&[PassArrow]> {
        self.entries
            .iter()
            .find(|(num, _)| *num == match_num)
            .map(|(_, arrows)| arrows.as_slice())
    }

    pub fn match_numbers(&self) -> Vec<u32> {
        self.entries.iter().map(|(num, _)| *num).collect()
    }

    pub fn total_arrows(&self) -> usize {
        self.entries.iter().map(|(_, arrows)| arrows.len()).sum()
    }
}

impl Serialize for ArrowReport {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (num, arrows) in &self.entries {
            map.serialize_entry(&num.to_string(), arrows)?;
        }
        map.end()
    }
}

/// Decodes one screenshot and runs detection on it.
///
/// Decoding failures come back as `Err`; detection failures as `Ok(Err(_))`
/// so the caller can tell them apart in its log.
fn process_match(
    input: &MatchInput,
    params: &DetectionParams,
) -> Result<Result<ImageDetection, detection::DetectionError>> {
    let img = load_rgb(&input.path)?;
    Ok(detection::detect_arrows(&img, params))
}

/// Opens an image file and converts it to 8-bit RGB.
pub fn load_rgb(path: &Path) -> Result<image::RgbImage> {
    let img = image::open(path).context(format!("Failed to open image: {}", path.display()))?;
    Ok(img.to_rgb8())
}

/// Runs detection for every match in the manifest.
///
/// Screenshots that can't be decoded or have no usable pitch are logged and
/// left out of the report. They never stop the batch.
pub fn run_batch(config: &PipelineConfig) -> ArrowReport {
    let mut report = ArrowReport::default();

    for input in &config.matches {
        let found = match process_match(input, &config.detection) {
            Ok(Ok(found)) => found,
            Ok(Err(e)) => {
                crate::log(&format!("{}: {}, skipping", input.name, e));
                continue;
            }
            Err(e) => {
                crate::log(&format!("{}: {:#}, skipping", input.name, e));
                continue;
            }
        };

        let pitch = found.pitch;
        crate::log(&format!(
            "{} ({}): pitch x={}-{} y={}-{}  red pixels={}",
            input.name,
            input.label,
            pitch.x_min,
            pitch.x_max,
            pitch.y_min,
            pitch.y_max,
            found.pass_pixels
        ));
        crate::log(&format!("  Clusters detected: {}", found.arrows.len()));
        for (i, (arrow, size)) in found.arrows.iter().zip(&found.cluster_sizes).enumerate() {
            crate::log(&format!(
                "    Arrow {}: ({},{}) -> ({},{})  [{} px]",
                i + 1,
                arrow.x,
                arrow.y,
                arrow.end_x,
                arrow.end_y,
                size
            ));
        }

        report.insert(input.match_num, found.arrows);
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detection::test_support::*;
    use image::RgbImage;
    use std::path::PathBuf;
    use tempfile::tempdir;

    fn input(name: &str, match_num: u32, path: PathBuf) -> MatchInput {
        MatchInput {
            name: name.to_string(),
            label: format!("vs {}", name),
            match_num,
            path,
        }
    }

    #[test]
    fn test_insert_replaces_in_place() {
        let mut report = ArrowReport::default();
        report.insert(3, Vec::new());
        report.insert(1, Vec::new());
        report.insert(3, vec![PassArrow::inaccurate((1.0, 2.0), (3.0, 4.0))]);

        assert_eq!(report.match_numbers(), vec![3, 1]);
        assert_eq!(report.get(3).unwrap().len(), 1);
        assert_eq!(report.total_arrows(), 1);
    }

    #[test]
    fn test_batch_skips_bad_images() {
        let dir = tempdir().unwrap();

        let mut with_arrow = synthetic_pitch();
        paint_stroke(&mut with_arrow, 30, 40, 12);
        let good = dir.path().join("good.png");
        with_arrow.save(&good).unwrap();

        let blank = dir.path().join("blank.png");
        RgbImage::from_pixel(30, 30, WHITE).save(&blank).unwrap();

        let config = PipelineConfig {
            matches: vec![
                input("missing", 1, dir.path().join("missing.png")),
                input("blank", 2, blank),
                input("good", 3, good),
            ],
            ..PipelineConfig::default()
        };

        let report = run_batch(&config);

        assert_eq!(report.match_numbers(), vec![3]);
        assert_eq!(report.get(3).unwrap().len(), 1);
        assert!(report.get(2).is_none());
    }

    #[test]
    fn test_serialize_uses_string_keys() {
        let mut report = ArrowReport::default();
        report.insert(4, Vec::new());
        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value, serde_json::json!({ "4": [] }));
    }
}
