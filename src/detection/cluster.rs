//! Greedy grouping of arrow pixels.
//!
//! Points are sorted, then each one joins the first existing cluster that has
//! a point within `gap` on both axes among its last few additions. Unlike
//! connected components the result depends on visiting order, so a stroke can
//! be split or two strokes joined.

use serde::Serialize;

/// How many of a cluster's most recent points a candidate is compared to.
pub const RECENT_WINDOW: usize = 5;

/// Pixel coordinate. Ordering is by `x`, then `y`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Point {
    pub x: u32,
    pub y: u32,
}

impl Point {
    pub fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }

    /// Both axis distances are within `gap`.
    pub fn is_near(&self, other: &Point, gap: u32) -> bool {
        self.x.abs_diff(other.x) <= gap && self.y.abs_diff(other.y) <= gap
    }
}

/// Points believed to belong to one rendered arrow, in insertion order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Cluster {
    points: Vec<Point>,
}

impl Cluster {
    fn seeded(p: Point) -> Self {
        Self { points: vec![p] }
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    fn accepts(&self, p: &Point, gap: u32) -> bool {
        let start = self.points.len().saturating_sub(RECENT_WINDOW);
        self.points[start..].iter().any(|q| p.is_near(q, gap))
    }
}

impl From<Vec<Point>> for Cluster {
    fn from(points: Vec<Point>) -> Self {
        Self { points }
    }
}

/// Groups `points` into clusters and drops those smaller than `min_size`.
///
/// Surviving clusters keep creation order.
pub fn greedy_cluster(mut points: Vec<Point>, gap: u32, min_size: usize) -> Vec<Cluster> {
    points.sort_unstable();
    let mut iter = points.into_iter();
    let Some(first) = iter.next() else {
        return Vec::new();
    };

    let mut clusters = vec![Cluster::seeded(first)];
    for p in iter {
        match clusters.iter_mut().find(|c| c.accepts(&p, gap)) {
            Some(cluster) => cluster.points.push(p),
            None => clusters.push(Cluster::seeded(p)),
        }
    }

    clusters.retain(|c| c.len() >= min_size);
    clusters
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pts(coords: &[(u32, u32)]) -> Vec<Point> {
        coords.iter().map(|&(x, y)| Point::new(x, y)).collect()
    }

    #[test]
    fn test_tight_group_survives_isolated_points_dropped() {
        let input = pts(&[(0, 0), (5, 5), (50, 50), (55, 52), (56, 53), (57, 54)]);
        let clusters = greedy_cluster(input, 12, 4);

        assert_eq!(clusters.len(), 1);
        assert_eq!(
            clusters[0].points(),
            pts(&[(50, 50), (55, 52), (56, 53), (57, 54)]).as_slice()
        );
    }

    #[test]
    fn test_empty_input() {
        assert!(greedy_cluster(Vec::new(), 12, 4).is_empty());
    }

    #[test]
    fn test_input_order_does_not_matter() {
        let a = pts(&[(10, 10), (11, 11), (12, 12), (13, 13), (80, 5), (81, 6), (82, 7), (83, 8)]);
        let mut b = a.clone();
        b.reverse();
        b.swap(1, 5);

        assert_eq!(greedy_cluster(a, 12, 4), greedy_cluster(b, 12, 4));
    }

    #[test]
    fn test_two_separate_strokes_in_creation_order() {
        let input = pts(&[
            (100, 10),
            (101, 11),
            (102, 12),
            (103, 13),
            (10, 90),
            (11, 89),
            (12, 88),
            (13, 87),
        ]);
        let clusters = greedy_cluster(input, 12, 4);

        assert_eq!(clusters.len(), 2);
        assert_eq!(clusters[0].points()[0], Point::new(10, 90));
        assert_eq!(clusters[1].points()[0], Point::new(100, 10));
    }

    #[test]
    fn test_zero_min_size_keeps_only_seeded_clusters() {
        let input = pts(&[(0, 0), (40, 40), (41, 41), (90, 5)]);
        let clusters = greedy_cluster(input, 12, 0);

        assert_eq!(clusters.len(), 3);
        assert!(clusters.iter().all(|c| !c.is_empty()));
        assert!(Cluster::default().is_empty());
    }

    #[test]
    fn test_gap_is_inclusive_per_axis() {
        let input = pts(&[(0, 0), (12, 12), (24, 24), (36, 36)]);
        assert_eq!(greedy_cluster(input.clone(), 12, 4).len(), 1);
        assert!(greedy_cluster(input, 11, 4).is_empty());
    }

    #[test]
    fn test_only_recent_window_is_compared() {
        // A column walking down from (0,20); after five more additions the
        // seed is no longer in the comparison window.
        let mut input = pts(&[(0, 20), (1, 30), (2, 40), (3, 50), (4, 60), (5, 70)]);
        // Near (0,20) only.
        input.push(Point::new(6, 15));

        let clusters = greedy_cluster(input, 12, 1);

        assert_eq!(clusters.len(), 2);
        assert_eq!(clusters[0].len(), 6);
        assert_eq!(clusters[1].points(), &[Point::new(6, 15)]);
    }

    #[test]
    fn test_first_fit_not_best_fit() {
        // (5,10) is within gap of both seeds and joins the earlier one.
        let input = pts(&[(0, 20), (5, 10), (0, 0)]);
        let clusters = greedy_cluster(input, 12, 1);

        assert_eq!(clusters.len(), 2);
        assert_eq!(clusters[0].points(), pts(&[(0, 0), (5, 10)]).as_slice());
        assert_eq!(clusters[1].points(), &[Point::new(0, 20)]);
    }
}
