//! R-tree over source sites for neighbour queries.

use rstar::{AABB, PointDistance, RTree, RTreeObject};

use crate::types::Point2D;

/// Source site stored in the tree, tagged with its position in the
/// flattened source.
#[derive(Clone, Copy, Debug)]
struct SiteEntry {
    point: Point2D,
    index: usize,
}

impl RTreeObject for SiteEntry {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_point([self.point.x, self.point.y])
    }
}

impl PointDistance for SiteEntry {
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let dx = self.point.x - point[0];
        let dy = self.point.y - point[1];
        dx * dx + dy * dy
    }
}

/// Spatial index of source sites.
///
/// Non-finite sites are left out and never selected.
pub(crate) struct SiteIndex {
    tree: RTree<SiteEntry>,
}

impl SiteIndex {
    pub fn new(points: &[Point2D]) -> Self {
        let entries = points
            .iter()
            .enumerate()
            .filter(|(_, p)| p.is_finite())
            .map(|(index, &point)| SiteEntry { point, index })
            .collect();
        Self {
            tree: RTree::bulk_load(entries),
        }
    }

    /// Up to `limit` sites within squared distance `max_d2` of `p`, as
    /// `(squared distance, site index)` ordered by distance then index.
    ///
    /// Ties at the cut-off distance go to the lower index.
    pub fn neighbours(&self, p: Point2D, limit: usize, max_d2: f64) -> Vec<(f64, usize)> {
        let mut found: Vec<(f64, usize)> = Vec::new();
        for (entry, d2) in self.tree.nearest_neighbor_iter_with_distance_2(&[p.x, p.y]) {
            if d2 > max_d2 {
                break;
            }
            if found.len() >= limit && found.last().is_some_and(|&(last, _)| d2 > last) {
                break;
            }
            found.push((d2, entry.index));
        }
        found.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));
        found.truncate(limit);
        found
    }

    /// Nearest site to `p` as `(squared distance, site index)`.
    pub fn nearest(&self, p: Point2D) -> Option<(f64, usize)> {
        self.neighbours(p, 1, f64::INFINITY).into_iter().next()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index() -> SiteIndex {
        SiteIndex::new(&[
            Point2D::new(0.0, 0.0),
            Point2D::new(2.0, 0.0),
            Point2D::new(f64::NAN, 0.0),
            Point2D::new(0.0, 2.0),
            Point2D::new(5.0, 5.0),
        ])
    }

    #[test]
    fn test_nearest() {
        assert_eq!(index().nearest(Point2D::new(4.0, 4.5)), Some((1.25, 4)));
    }

    #[test]
    fn test_ties_broken_by_index() {
        // (0,0), (2,0) and (0,2) are equidistant from (1,1)
        let n = index().neighbours(Point2D::new(1.0, 1.0), 2, f64::INFINITY);
        assert_eq!(n, vec![(2.0, 0), (2.0, 1)]);
        let n = index().neighbours(Point2D::new(1.0, 1.0), 3, f64::INFINITY);
        assert_eq!(n.iter().map(|&(_, i)| i).collect::<Vec<_>>(), vec![0, 1, 3]);
    }

    #[test]
    fn test_cutoff_distance() {
        let n = index().neighbours(Point2D::new(0.0, 0.0), 10, 4.0);
        assert_eq!(n, vec![(0.0, 0), (4.0, 1), (4.0, 3)]);
    }

    #[test]
    fn test_empty() {
        let idx = SiteIndex::new(&[]);
        assert!(idx.nearest(Point2D::new(0.0, 0.0)).is_none());
    }
}
