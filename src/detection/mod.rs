//! Inaccurate-pass arrow detection on match-centre screenshots.
//!
//! This module provides:
//! - Fixed-range colour classification (pitch green, inaccurate-pass red)
//! - Pitch bounding box location and percent-of-pitch normalisation
//! - Greedy clustering of red pixels into arrows
//! - Arrow records ready for JSON export

pub mod arrows;
pub mod cluster;
pub mod color;
pub mod error;
pub mod mask;
pub mod pitch;

pub use arrows::PassArrow;
pub use color::ColorRange;
pub use error::DetectionError;
pub use mask::Mask;
pub use pitch::BoundingBox;

use image::RgbImage;
use serde::{Deserialize, Serialize};

/// Thresholds for one detection pass.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectionParams {
    /// Turf colour used to find the pitch box
    pub pitch_color: ColorRange,
    /// Arrow colour for inaccurate passes
    pub pass_color: ColorRange,
    /// Max per-axis pixel distance for two arrow pixels to be grouped
    pub cluster_gap: u32,
    /// Clusters with fewer pixels are treated as noise
    pub min_cluster_size: usize,
}

impl Default for DetectionParams {
    fn default() -> Self {
        Self {
            pitch_color: ColorRange::PITCH_GREEN,
            pass_color: ColorRange::INACCURATE_RED,
            cluster_gap: 12,
            min_cluster_size: 4,
        }
    }
}

/// Everything found in one screenshot.
#[derive(Clone, Debug)]
pub struct ImageDetection {
    pub pitch: BoundingBox,
    /// Pass-coloured pixels inside the pitch box
    pub pass_pixels: usize,
    /// Pixel count of each surviving cluster, in arrow order
    pub cluster_sizes: Vec<usize>,
    pub arrows: Vec<PassArrow>,
}

/// Runs the full pipeline on one decoded screenshot.
pub fn detect_arrows(
    img: &RgbImage,
    params: &DetectionParams,
) -> Result<ImageDetection, DetectionError> {
    let pitch_mask = Mask::classify(img, &params.pitch_color);
    let pitch = pitch::locate_pitch(&pitch_mask)?;
    pitch.ensure_usable()?;

    let pass_mask = Mask::classify(img, &params.pass_color).restrict_to(&pitch);
    let points = pass_mask.points();
    let pass_pixels = points.len();

    let clusters = cluster::greedy_cluster(points, params.cluster_gap, params.min_cluster_size);
    let arrows = arrows::extract_arrows(&clusters, &pitch)?;

    Ok(ImageDetection {
        pitch,
        pass_pixels,
        cluster_sizes: clusters.iter().map(|c| c.len()).collect(),
        arrows,
    })
}
