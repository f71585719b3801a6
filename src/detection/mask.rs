//! Boolean classification masks over a pixel grid.

use image::RgbImage;

use super::cluster::Point;
use super::color::ColorRange;
use super::pitch::BoundingBox;

/// Row-major boolean mask, same dimensions as the image it was classified from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Mask {
    width: u32,
    height: u32,
    cells: Vec<bool>,
}

impl Mask {
    /// Builds a mask by evaluating `f(x, y)` for every cell.
    pub fn from_fn(width: u32, height: u32, mut f: impl FnMut(u32, u32) -> bool) -> Self {
        let mut cells = Vec::with_capacity(width as usize * height as usize);
        for y in 0..height {
            for x in 0..width {
                cells.push(f(x, y));
            }
        }
        Self {
            width,
            height,
            cells,
        }
    }

    /// Marks every pixel of `img` that falls inside `range`.
    pub fn classify(img: &RgbImage, range: &ColorRange) -> Self {
        let (width, height) = img.dimensions();
        let cells = img.pixels().map(|p| range.matches_pixel(p)).collect();
        Self {
            width,
            height,
            cells,
        }
    }

    pub fn get(&self, x: u32, y: u32) -> bool {
        x < self.width && y < self.height && self.cells[self.index(x, y)]
    }

    pub fn count(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }

    /// Coordinates of every set cell, in row-major order.
    pub fn points(&self) -> Vec<Point> {
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &set)| set)
            .map(|(i, _)| {
                let w = self.width as usize;
                Point::new((i % w) as u32, (i / w) as u32)
            })
            .collect()
    }

    /// Returns a copy with every cell outside `bbox` cleared.
    ///
    /// Uses the half-open box `[x_min, x_max) x [y_min, y_max)`, so the last
    /// row and column of the pitch are cleared too. Never sets a cell.
    pub fn restrict_to(&self, bbox: &BoundingBox) -> Mask {
        let mut restricted = self.clone();
        for y in 0..self.height {
            for x in 0..self.width {
                if !bbox.contains(x, y) {
                    let i = self.index(x, y);
                    restricted.cells[i] = false;
                }
            }
        }
        restricted
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }
}
