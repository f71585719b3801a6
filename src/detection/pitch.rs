//! Pitch bounding box detection and coordinate normalisation.

use serde::Serialize;

use super::error::DetectionError;
use super::mask::Mask;

/// Axis-aligned pitch box in pixel coordinates. `x_max`/`y_max` are the
/// largest coordinates that were classified as pitch.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct BoundingBox {
    pub x_min: u32,
    pub x_max: u32,
    pub y_min: u32,
    pub y_max: u32,
}

impl BoundingBox {
    pub fn width(&self) -> u32 {
        self.x_max - self.x_min
    }

    pub fn height(&self) -> u32 {
        self.y_max - self.y_min
    }

    /// Half-open containment: the `x_max` column and `y_max` row are outside.
    pub fn contains(&self, x: u32, y: u32) -> bool {
        x >= self.x_min && x < self.x_max && y >= self.y_min && y < self.y_max
    }

    /// Rejects boxes that cannot be used as a normalisation frame.
    pub fn ensure_usable(&self) -> Result<(), DetectionError> {
        if self.width() == 0 || self.height() == 0 {
            return Err(DetectionError::DegeneratePitch {
                width: self.width(),
                height: self.height(),
            });
        }
        Ok(())
    }

    /// Maps a pixel to percent of the pitch box, rounded to one decimal.
    pub fn normalize(&self, x: u32, y: u32) -> Result<(f64, f64), DetectionError> {
        self.ensure_usable()?;
        let nx = (f64::from(x) - f64::from(self.x_min)) / f64::from(self.width()) * 100.0;
        let ny = (f64::from(y) - f64::from(self.y_min)) / f64::from(self.height()) * 100.0;
        Ok((round1(nx), round1(ny)))
    }
}

/// One decimal, exact halves to even (`1.25 -> 1.2`, `3.75 -> 3.8`).
fn round1(value: f64) -> f64 {
    (value * 10.0).round_ties_even() / 10.0
}

/// Finds the axis-aligned extent of all pitch-classified pixels.
///
/// The box is not a hull: lines, players and arrows inside the turf are part
/// of the pitch even though they are not green.
pub fn locate_pitch(pitch_mask: &Mask) -> Result<BoundingBox, DetectionError> {
    let mut points = pitch_mask.points().into_iter();
    let first = points.next().ok_or(DetectionError::PitchNotDetected)?;

    let init = BoundingBox {
        x_min: first.x,
        x_max: first.x,
        y_min: first.y,
        y_max: first.y,
    };
    Ok(points.fold(init, |b, p| BoundingBox {
        x_min: b.x_min.min(p.x),
        x_max: b.x_max.max(p.x),
        y_min: b.y_min.min(p.y),
        y_max: b.y_max.max(p.y),
    }))
}
