//! Divide-and-conquer closest pair of points.
//!
//! Used to detect the native point spacing of scattered (station-like)
//! datasets, where a brute-force O(n²) scan over thousands of spectral
//! sites is too slow to run on every boundary request.
//!
//! # Algorithm
//!
//! 1. Sort a local copy of the points by x (ties broken by y).
//! 2. Split at the median index and recurse on both halves.
//! 3. With `d = min(left, right)`, collect the strip of points closer than
//!    `d` to the split line in x.
//! 4. Sort the strip by y and compare each point only with the following
//!    points whose y-distance is below the running minimum.
//!
//! Total cost is O(n log² n).

use crate::types::Point2D;

/// Minimum Euclidean distance between any two points.
///
/// Points with a non-finite coordinate are ignored. The caller's slice is
/// never reordered.
///
/// Returns `f64::INFINITY` when fewer than two points remain: no pair
/// exists and the caller must take its spacing from elsewhere. Duplicate
/// points give `0.0`.
///
/// # Example
///
/// ```
/// use nest_rs::geometry::min_distance;
/// use nest_rs::types::Point2D;
///
/// let pts = [
///     Point2D::new(0.0, 0.0),
///     Point2D::new(5.0, 5.0),
///     Point2D::new(5.0, 6.5),
///     Point2D::new(10.0, 0.0),
/// ];
/// assert_eq!(min_distance(&pts), 1.5);
/// assert_eq!(min_distance(&pts[..1]), f64::INFINITY);
/// ```
pub fn min_distance(points: &[Point2D]) -> f64 {
    let mut sorted: Vec<Point2D> = points.iter().copied().filter(Point2D::is_finite).collect();
    sorted.sort_by(Point2D::total_cmp_xy);
    min_distance_sorted(&sorted)
}

/// Minimum distance for points given as parallel coordinate arrays.
///
/// Extra entries in the longer array are ignored.
pub fn min_distance_xy(x: &[f64], y: &[f64]) -> f64 {
    let points: Vec<Point2D> = x
        .iter()
        .zip(y)
        .map(|(&x, &y)| Point2D::new(x, y))
        .collect();
    min_distance(&points)
}

/// Recursive step over a slice already sorted by x.
fn min_distance_sorted(points: &[Point2D]) -> f64 {
    let n = points.len();
    if n <= 1 {
        return f64::INFINITY;
    }
    if n == 2 {
        return points[0].distance(&points[1]);
    }

    let mid = n / 2;
    let split_x = points[mid].x;

    let left_min = min_distance_sorted(&points[..mid]);
    let right_min = min_distance_sorted(&points[mid..]);
    let d = left_min.min(right_min);

    if d == 0.0 {
        return 0.0;
    }

    let mut strip: Vec<Point2D> = points
        .iter()
        .copied()
        .filter(|p| (p.x - split_x).abs() < d)
        .collect();
    strip.sort_by(|a, b| a.y.total_cmp(&b.y).then_with(|| a.x.total_cmp(&b.x)));

    let mut best = d;
    for (i, p) in strip.iter().enumerate() {
        for q in &strip[i + 1..] {
            if q.y - p.y >= best {
                break;
            }
            best = best.min(p.distance(q));
        }
    }

    best
}
