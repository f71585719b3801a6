//! Pass arrow records derived from pixel clusters.

use serde::{Deserialize, Serialize};

use super::cluster::{Cluster, Point};
use super::error::DetectionError;
use super::pitch::BoundingBox;

/// One estimated pass, in percent of the pitch box.
///
/// Field names and the two `false` flags are read by the downstream pass map,
/// so keep them stable.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PassArrow {
    pub x: f64,
    pub y: f64,
    pub end_x: f64,
    pub end_y: f64,
    pub accurate: bool,
    pub keypass: bool,
}

impl PassArrow {
    /// An inaccurate, non-key pass between two normalised points.
    pub fn inaccurate(start: (f64, f64), end: (f64, f64)) -> Self {
        Self {
            x: start.0,
            y: start.1,
            end_x: end.0,
            end_y: end.1,
            accurate: false,
            keypass: false,
        }
    }
}

/// Leftmost and rightmost points of a cluster; ties keep the earlier point.
///
/// Returns `None` for an empty cluster.
pub fn arrow_endpoints(cluster: &Cluster) -> Option<(Point, Point)> {
    let points = cluster.points();
    let start = points
        .iter()
        .copied()
        .reduce(|best, p| if p.x < best.x { p } else { best })?;
    let end = points
        .iter()
        .copied()
        .reduce(|best, p| if p.x > best.x { p } else { best })?;
    Some((start, end))
}

/// Converts clusters to arrows: the leftmost pixel becomes the pass origin and
/// the rightmost its end. Output keeps cluster order.
pub fn extract_arrows(
    clusters: &[Cluster],
    pitch: &BoundingBox,
) -> Result<Vec<PassArrow>, DetectionError> {
    pitch.ensure_usable()?;

    let mut arrows = Vec::with_capacity(clusters.len());
    for (start, end) in clusters.iter().filter_map(arrow_endpoints) {
        arrows.push(PassArrow::inaccurate(
            pitch.normalize(start.x, start.y)?,
            pitch.normalize(end.x, end.y)?,
        ));
    }
    Ok(arrows)
}
