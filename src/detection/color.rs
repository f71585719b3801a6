//! Fixed-range colour classification.
//!
//! Both palettes were calibrated by hand against the match-centre renderer,
//! so the bounds are plain per-channel windows, not a colour-space distance.

use image::Rgb;
use serde::{Deserialize, Serialize};

/// Per-channel window with exclusive bounds: a value `v` matches iff `low < v < high`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorRange {
    pub r: (u8, u8),
    pub g: (u8, u8),
    pub b: (u8, u8),
}

impl ColorRange {
    /// Pitch turf green.
    pub const PITCH_GREEN: ColorRange = ColorRange {
        r: (20, 100),
        g: (70, 160),
        b: (30, 100),
    };

    /// Red used for inaccurate passes.
    pub const INACCURATE_RED: ColorRange = ColorRange {
        r: (180, 250),
        g: (50, 115),
        b: (30, 95),
    };

    #[must_use]
    pub fn matches(&self, r: u8, g: u8, b: u8) -> bool {
        within(r, self.r) && within(g, self.g) && within(b, self.b)
    }

    #[must_use]
    pub fn matches_pixel(&self, pixel: &Rgb<u8>) -> bool {
        let Rgb([r, g, b]) = *pixel;
        self.matches(r, g, b)
    }
}

fn within(value: u8, (low, high): (u8, u8)) -> bool {
    low < value && value < high
}

pub fn is_pitch_green(r: u8, g: u8, b: u8) -> bool {
    ColorRange::PITCH_GREEN.matches(r, g, b)
}

pub fn is_inaccurate_red(r: u8, g: u8, b: u8) -> bool {
    ColorRange::INACCURATE_RED.matches(r, g, b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_are_exclusive() {
        assert!(!is_pitch_green(20, 100, 50));
        assert!(is_pitch_green(21, 100, 50));
        assert!(!is_pitch_green(100, 100, 50));
        assert!(is_pitch_green(99, 159, 99));
        assert!(!is_pitch_green(99, 160, 99));

        assert!(!is_inaccurate_red(180, 80, 60));
        assert!(is_inaccurate_red(181, 80, 60));
        assert!(is_inaccurate_red(249, 114, 94));
        assert!(!is_inaccurate_red(250, 80, 60));
        assert!(!is_inaccurate_red(200, 115, 60));
        assert!(!is_inaccurate_red(200, 80, 30));
    }

    #[test]
    fn test_typical_palette_samples() {
        // #2D5E3E turf
        assert!(is_pitch_green(0x2d, 0x5e, 0x3e));
        // Arrow red around (215, 80, 60)
        assert!(is_inaccurate_red(215, 80, 60));
        // White pitch markings are neither
        assert!(!is_pitch_green(255, 255, 255));
        assert!(!is_inaccurate_red(255, 255, 255));
    }

    #[test]
    fn test_green_and_red_never_overlap() {
        // Only the green window can produce a green match, so walking it is exhaustive.
        for r in 21..100u8 {
            for g in 71..160u8 {
                for b in 31..100u8 {
                    assert!(is_pitch_green(r, g, b));
                    assert!(!is_inaccurate_red(r, g, b), "overlap at ({r}, {g}, {b})");
                }
            }
        }
    }

    #[test]
    fn test_matches_pixel() {
        let range = ColorRange::INACCURATE_RED;
        assert!(range.matches_pixel(&Rgb([200, 90, 70])));
        assert!(!range.matches_pixel(&Rgb([40, 120, 60])));
    }
}
