//! Arrow-pixel inspection inside the detected pitch.
//!
//! Everything on the pitch that is neither turf nor white markings is
//! treated as a candidate arrow pixel. The colour histogram of those pixels is
//! what the inaccurate-pass range was tuned from.

use anyhow::{Context, Result};
use image::{Rgb, RgbImage};
use std::path::{Path, PathBuf};

use super::palette::{self, ColorBucket, TieOrder};
use crate::config::MatchInput;
use crate::detection::{pitch, BoundingBox, ColorRange, DetectionError, Mask};

/// Pitch markings: every channel strictly above this.
pub const WHITE_THRESHOLD: u8 = 150;

/// Summary of one inspected screenshot.
#[derive(Clone, Debug)]
pub struct Inspection {
    pub pitch: BoundingBox,
    pub arrow_pixels: usize,
    pub buckets: Vec<ColorBucket>,
    /// Pitch crop with only arrow pixels kept, everything else black
    pub diagnostic: RgbImage,
}

pub fn is_white(pixel: &Rgb<u8>) -> bool {
    pixel.0.iter().all(|&c| c > WHITE_THRESHOLD)
}

/// Cells that are neither `pitch_color` nor white.
pub fn arrow_pixel_mask(region: &RgbImage, pitch_color: &ColorRange) -> Mask {
    let (w, h) = region.dimensions();
    Mask::from_fn(w, h, |x, y| {
        let p = region.get_pixel(x, y);
        !pitch_color.matches_pixel(p) && !is_white(p)
    })
}

/// Crops the half-open pitch box and isolates arrow pixels in it.
pub fn inspect_image(
    img: &RgbImage,
    pitch_color: &ColorRange,
) -> Result<Inspection, DetectionError> {
    let bbox = pitch::locate_pitch(&Mask::classify(img, pitch_color))?;
    bbox.ensure_usable()?;

    let region =
        image::imageops::crop_imm(img, bbox.x_min, bbox.y_min, bbox.width(), bbox.height())
            .to_image();
    let mask = arrow_pixel_mask(&region, pitch_color);

    let colors: Vec<Rgb<u8>> = mask
        .points()
        .iter()
        .map(|p| *region.get_pixel(p.x, p.y))
        .collect();

    let diagnostic = RgbImage::from_fn(region.width(), region.height(), |x, y| {
        if mask.get(x, y) {
            *region.get_pixel(x, y)
        } else {
            Rgb([0, 0, 0])
        }
    });

    Ok(Inspection {
        pitch: bbox,
        arrow_pixels: mask.count(),
        buckets: palette::top_buckets(&colors, 20, TieOrder::FirstSeen),
        diagnostic,
    })
}

/// Inspects one manifest entry, logs the histogram and writes `diag_<name>.png`.
///
/// Returns `Ok(None)` when the screenshot has no usable pitch.
pub fn inspect_match(
    input: &MatchInput,
    pitch_color: &ColorRange,
    out_dir: &Path,
) -> Result<Option<PathBuf>> {
    let img = crate::report::load_rgb(&input.path)?;
    let (w, h) = img.dimensions();
    crate::log(&format!("=== {} === {}x{}", input.name, w, h));

    let inspection = match inspect_image(&img, pitch_color) {
        Ok(inspection) => inspection,
        Err(e) => {
            crate::log(&format!("  {}", e));
            return Ok(None);
        }
    };

    let bbox = inspection.pitch;
    crate::log(&format!(
        "  Pitch: x={}-{}  y={}-{}",
        bbox.x_min, bbox.x_max, bbox.y_min, bbox.y_max
    ));
    crate::log(&format!(
        "  Arrow pixels (non-green, non-white): {}",
        inspection.arrow_pixels
    ));
    crate::log("  Top colors (quantized by 20)  count:");
    for bucket in &inspection.buckets {
        let c = bucket.color;
        crate::log(&format!(
            "    RGB~({}, {}, {})  x{}",
            c[0], c[1], c[2], bucket.count
        ));
    }

    std::fs::create_dir_all(out_dir)
        .context(format!("Failed to create directory: {}", out_dir.display()))?;
    let out_path = out_dir.join(format!("diag_{}.png", input.name));
    inspection
        .diagnostic
        .save(&out_path)
        .context(format!("Failed to save diagnostic image: {}", out_path.display()))?;
    crate::log(&format!("  -> {} saved", out_path.display()));

    Ok(Some(out_path))
}
