//! Dominant colour report used to calibrate the classifier ranges.

use image::{Rgb, RgbImage};
use std::collections::HashMap;

/// Rows sampled for the strip profile, as fractions of the height.
const STRIP_ROWS: [(f64, &str); 8] = [
    (0.04, "4%"),
    (0.08, "8%"),
    (0.12, "12%"),
    (0.18, "18%"),
    (0.30, "30%"),
    (0.50, "50%"),
    (0.80, "80%"),
    (0.95, "95%"),
];

/// Columns sampled on each strip row, as fractions of the width.
const STRIP_COLUMNS: [f64; 7] = [0.05, 0.20, 0.35, 0.50, 0.65, 0.80, 0.95];

/// Channel values are floored to a multiple of this before counting.
pub const BUCKET_STEP: u8 = 20;

/// Upper bound on pixels looked at when counting buckets.
pub const MAX_SAMPLES: usize = 30_000;

#[derive(Clone, Debug, PartialEq)]
pub struct StripRow {
    pub label: &'static str,
    pub y: u32,
    pub colors: Vec<Rgb<u8>>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ColorBucket {
    pub color: Rgb<u8>,
    pub count: usize,
    /// Percent of the counted pixels
    pub share: f64,
}

pub fn hex(color: &Rgb<u8>) -> String {
    format!("#{:02X}{:02X}{:02X}", color[0], color[1], color[2])
}

pub fn quantize(color: &Rgb<u8>) -> Rgb<u8> {
    Rgb(color.0.map(|c| c / BUCKET_STEP * BUCKET_STEP))
}

/// Samples fixed rows and columns across the image.
pub fn strip_profile(img: &RgbImage) -> Vec<StripRow> {
    let (w, h) = img.dimensions();
    if w == 0 || h == 0 {
        return Vec::new();
    }

    STRIP_ROWS
        .iter()
        .map(|&(frac, label)| {
            let y = ((frac * f64::from(h)) as u32).min(h - 1);
            let colors = STRIP_COLUMNS
                .iter()
                .map(|&c| {
                    let x = ((c * f64::from(w)) as u32).min(w - 1);
                    *img.get_pixel(x, y)
                })
                .collect();
            StripRow { label, y, colors }
        })
        .collect()
}

/// Evenly strided sample of at most `max` pixels, in row-major order.
pub fn sample_pixels(img: &RgbImage, max: usize) -> Vec<Rgb<u8>> {
    let total = img.width() as usize * img.height() as usize;
    if total == 0 || max == 0 {
        return Vec::new();
    }
    let stride = total.div_ceil(max);
    img.pixels().step_by(stride).copied().collect()
}

/// How buckets with equal counts are ordered.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TieOrder {
    /// Larger `[r, g, b]` first. Used by the palette report.
    BrighterFirst,
    /// Bucket whose first pixel came earliest in `colors`. Used by inspection.
    FirstSeen,
}

/// Most frequent quantised colours, largest first, with ties broken by `order`.
pub fn top_buckets(colors: &[Rgb<u8>], limit: usize, order: TieOrder) -> Vec<ColorBucket> {
    if colors.is_empty() {
        return Vec::new();
    }

    // bucket -> (count, index of first pixel)
    let mut counts: HashMap<[u8; 3], (usize, usize)> = HashMap::new();
    for (i, c) in colors.iter().enumerate() {
        counts.entry(quantize(c).0).or_insert((0, i)).0 += 1;
    }

    let mut ranked: Vec<([u8; 3], (usize, usize))> = counts.into_iter().collect();
    ranked.sort_by(|a, b| {
        let by_count = b.1.0.cmp(&a.1.0);
        match order {
            TieOrder::BrighterFirst => by_count.then(b.0.cmp(&a.0)),
            TieOrder::FirstSeen => by_count.then(a.1.1.cmp(&b.1.1)),
        }
    });

    let total = colors.len() as f64;
    ranked
        .into_iter()
        .take(limit)
        .map(|(color, (count, _))| ColorBucket {
            color: Rgb(color),
            count,
            share: count as f64 / total * 100.0,
        })
        .collect()
}

/// Logs the strip profile and the top 18 buckets of one image.
pub fn log_palette(name: &str, img: &RgbImage) {
    let (w, h) = img.dimensions();
    crate::log(&"=".repeat(65));
    crate::log(&format!("  {}  [{}x{}]", name, w, h));

    crate::log("  Horizontal strip profile:");
    for row in strip_profile(img) {
        let hexes: Vec<String> = row.colors.iter().map(hex).collect();
        crate::log(&format!(
            "    row {:3} y={:4}: {}",
            row.label,
            row.y,
            hexes.join(" ")
        ));
    }

    crate::log("  Top color buckets (quantized by 20):");
    for bucket in top_buckets(
        &sample_pixels(img, MAX_SAMPLES),
        18,
        TieOrder::BrighterFirst,
    ) {
        crate::log(&format!("    {}  {:5.1}%", hex(&bucket.color), bucket.share));
    }
}
