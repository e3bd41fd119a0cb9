use std::cmp::Ordering;

use super::{cross_2d, Point2};

/// Computes the signed area of a closed polygon (shoelace formula).
///
/// Positive for counter-clockwise, negative for clockwise.
#[must_use]
pub fn signed_area_2d(points: &[Point2]) -> f64 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }
    let mut sum = 0.0;
    for i in 0..n {
        let j = (i + 1) % n;
        sum += points[i].x * points[j].y - points[j].x * points[i].y;
    }
    sum * 0.5
}

/// Returns the vertex average of a polygon.
#[must_use]
pub fn vertex_centroid(points: &[Point2]) -> Point2 {
    let n = points.len();
    if n == 0 {
        return Point2::origin();
    }
    #[allow(clippy::cast_precision_loss)]
    let inv_n = 1.0 / n as f64;
    Point2::new(
        points.iter().map(|p| p.x).sum::<f64>() * inv_n,
        points.iter().map(|p| p.y).sum::<f64>() * inv_n,
    )
}

/// Tests whether a closed polygon is convex.
///
/// Sweeps the turn at every vertex and requires all non-negligible turns to
/// share one sign. Turns with `|cross| <= eps` are treated as straight.
#[must_use]
pub fn is_convex(points: &[Point2], eps: f64) -> bool {
    let n = points.len();
    if n < 3 {
        return false;
    }
    let mut winding: Option<bool> = None;
    for i in 0..n {
        let a = points[i];
        let b = points[(i + 1) % n];
        let c = points[(i + 2) % n];
        let turn = cross_2d(&(b - a), &(c - b));
        if turn.abs() <= eps {
            continue;
        }
        let left = turn > 0.0;
        match winding {
            None => winding = Some(left),
            Some(w) if w != left => return false,
            Some(_) => {}
        }
    }
    winding.is_some()
}

/// Axis-aligned bounds of a point set as `(min, max)`, or `None` when empty.
#[must_use]
pub fn bounds_2d<'a>(points: impl IntoIterator<Item = &'a Point2>) -> Option<(Point2, Point2)> {
    let mut iter = points.into_iter();
    let first = iter.next()?;
    let mut min = *first;
    let mut max = *first;
    for p in iter {
        min.x = min.x.min(p.x);
        min.y = min.y.min(p.y);
        max.x = max.x.max(p.x);
        max.y = max.y.max(p.y);
    }
    Some((min, max))
}

/// Even-odd point-in-polygon test over a closed ring.
///
/// Points exactly on the boundary may fall either way.
#[must_use]
pub fn point_in_ring(p: &Point2, ring: &[Point2]) -> bool {
    let n = ring.len();
    let mut inside = false;
    for i in 0..n {
        let a = ring[i];
        let b = ring[(i + 1) % n];
        if (a.y > p.y) != (b.y > p.y) {
            let x_cross = a.x + (p.y - a.y) / (b.y - a.y) * (b.x - a.x);
            if p.x < x_cross {
                inside = !inside;
            }
        }
    }
    inside
}

/// Index of the lexicographically smallest point (x, then y).
#[must_use]
pub fn min_point_index(points: &[Point2]) -> Option<usize> {
    points
        .iter()
        .enumerate()
        .min_by(|(_, a), (_, b)| a.x.total_cmp(&b.x).then(a.y.total_cmp(&b.y)))
        .map(|(i, _)| i)
}

/// Total order over point sequences, comparing coordinates lexicographically.
#[must_use]
pub fn compare_point_sequences(a: &[Point2], b: &[Point2]) -> Ordering {
    for (pa, pb) in a.iter().zip(b) {
        let ord = pa.x.total_cmp(&pb.x).then(pa.y.total_cmp(&pb.y));
        if ord != Ordering::Equal {
            return ord;
        }
    }
    a.len().cmp(&b.len())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    fn square() -> Vec<Point2> {
        vec![
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(1.0, 1.0),
            Point2::new(0.0, 1.0),
        ]
    }

    #[test]
    fn signed_area_ccw_square() {
        assert_relative_eq!(signed_area_2d(&square()), 1.0);
    }

    #[test]
    fn signed_area_cw_square() {
        let mut pts = square();
        pts.reverse();
        assert_relative_eq!(signed_area_2d(&pts), -1.0);
    }

    #[test]
    fn signed_area_degenerate() {
        assert_relative_eq!(signed_area_2d(&[Point2::new(0.0, 0.0)]), 0.0);
        assert_relative_eq!(signed_area_2d(&[]), 0.0);
    }

    #[test]
    fn centroid_of_square() {
        let c = vertex_centroid(&square());
        assert_relative_eq!(c.x, 0.5);
        assert_relative_eq!(c.y, 0.5);
    }

    #[test]
    fn convex_square_and_concave_arrow() {
        assert!(is_convex(&square(), 1e-9));
        let arrow = vec![
            Point2::new(0.0, 0.0),
            Point2::new(2.0, 1.0),
            Point2::new(0.0, 2.0),
            Point2::new(1.0, 1.0),
        ];
        assert!(!is_convex(&arrow, 1e-9));
    }

    #[test]
    fn convexity_ignores_collinear_vertices() {
        let pts = vec![
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(2.0, 0.0),
            Point2::new(2.0, 2.0),
            Point2::new(0.0, 2.0),
        ];
        assert!(is_convex(&pts, 1e-9));
    }

    #[test]
    fn bounds_of_points() {
        let pts = [Point2::new(3.0, -1.0), Point2::new(-2.0, 4.0)];
        let (min, max) = bounds_2d(&pts).unwrap();
        assert_relative_eq!(min.x, -2.0);
        assert_relative_eq!(min.y, -1.0);
        assert_relative_eq!(max.x, 3.0);
        assert_relative_eq!(max.y, 4.0);
        assert!(bounds_2d(&[] as &[Point2]).is_none());
    }

    #[test]
    fn point_in_triangle() {
        let tri = [
            Point2::new(0.0, 0.0),
            Point2::new(100.0, 0.0),
            Point2::new(0.0, 100.0),
        ];
        assert!(point_in_ring(&Point2::new(10.0, 10.0), &tri));
        assert!(!point_in_ring(&Point2::new(80.0, 80.0), &tri));
        assert!(!point_in_ring(&Point2::new(-1.0, 5.0), &tri));
    }

    #[test]
    fn smallest_point_breaks_ties_on_y() {
        let pts = [
            Point2::new(1.0, 0.0),
            Point2::new(0.0, 5.0),
            Point2::new(0.0, 2.0),
        ];
        assert_eq!(min_point_index(&pts), Some(2));
        assert_eq!(min_point_index(&[]), None);
    }

    #[test]
    fn point_sequence_order() {
        let a = [Point2::new(0.0, 0.0), Point2::new(1.0, 0.0)];
        let b = [Point2::new(0.0, 0.0), Point2::new(1.0, 1.0)];
        assert_eq!(compare_point_sequences(&a, &b), Ordering::Less);
        assert_eq!(compare_point_sequences(&b, &a), Ordering::Greater);
        assert_eq!(compare_point_sequences(&a, &a), Ordering::Equal);
    }
}
