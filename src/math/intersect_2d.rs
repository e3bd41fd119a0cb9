use super::{cross_2d, Point2};

/// Orientation of the triple `(p, q, r)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    CounterClockwise,
    Clockwise,
    Collinear,
}

/// Classifies the turn `p -> q -> r`.
///
/// Cross products with magnitude `<= eps` count as collinear.
#[must_use]
pub fn orientation(p: &Point2, q: &Point2, r: &Point2, eps: f64) -> Orientation {
    let cross = cross_2d(&(q - p), &(r - p));
    if cross > eps {
        Orientation::CounterClockwise
    } else if cross < -eps {
        Orientation::Clockwise
    } else {
        Orientation::Collinear
    }
}

/// Returns `true` if `q` lies inside the bounding box of segment `p-r`,
/// widened by `eps`. Only meaningful when the three points are collinear.
#[must_use]
pub fn on_segment(p: &Point2, q: &Point2, r: &Point2, eps: f64) -> bool {
    q.x <= p.x.max(r.x) + eps
        && q.x >= p.x.min(r.x) - eps
        && q.y <= p.y.max(r.y) + eps
        && q.y >= p.y.min(r.y) - eps
}

/// Tests whether the closed segments `a0-a1` and `b0-b1` share any point.
///
/// Covers proper crossings, endpoint touches and collinear overlap.
#[must_use]
pub fn segments_intersect(a0: &Point2, a1: &Point2, b0: &Point2, b1: &Point2, eps: f64) -> bool {
    let o1 = orientation(a0, a1, b0, eps);
    let o2 = orientation(a0, a1, b1, eps);
    let o3 = orientation(b0, b1, a0, eps);
    let o4 = orientation(b0, b1, a1, eps);

    if o1 != o2 && o3 != o4 {
        return true;
    }

    (o1 == Orientation::Collinear && on_segment(a0, b0, a1, eps))
        || (o2 == Orientation::Collinear && on_segment(a0, b1, a1, eps))
        || (o3 == Orientation::Collinear && on_segment(b0, a0, b1, eps))
        || (o4 == Orientation::Collinear && on_segment(b0, a1, b1, eps))
}

/// Intersects segment `p0-p1` with the infinite line through `l0-l1`.
///
/// Returns `None` when the segment is parallel to the line.
#[must_use]
pub fn segment_line_intersect_2d(
    p0: &Point2,
    p1: &Point2,
    l0: &Point2,
    l1: &Point2,
) -> Option<Point2> {
    let dp = p1 - p0;
    let dl = l1 - l0;
    let denom = cross_2d(&dp, &dl);
    if denom.abs() < f64::EPSILON {
        return None;
    }
    let t = cross_2d(&(l0 - p0), &dl) / denom;
    Some(p0 + dp * t)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    const EPS: f64 = 1e-9;

    fn p(x: f64, y: f64) -> Point2 {
        Point2::new(x, y)
    }

    #[test]
    fn orientation_basic() {
        let o = orientation(&p(0.0, 0.0), &p(1.0, 0.0), &p(1.0, 1.0), EPS);
        assert_eq!(o, Orientation::CounterClockwise);
        let o = orientation(&p(0.0, 0.0), &p(1.0, 0.0), &p(1.0, -1.0), EPS);
        assert_eq!(o, Orientation::Clockwise);
        let o = orientation(&p(0.0, 0.0), &p(1.0, 0.0), &p(2.0, 0.0), EPS);
        assert_eq!(o, Orientation::Collinear);
    }

    #[test]
    fn crossing_segments() {
        assert!(segments_intersect(
            &p(0.0, 0.0),
            &p(2.0, 2.0),
            &p(0.0, 2.0),
            &p(2.0, 0.0),
            EPS
        ));
    }

    #[test]
    fn disjoint_segments() {
        assert!(!segments_intersect(
            &p(0.0, 0.0),
            &p(1.0, 0.0),
            &p(0.0, 1.0),
            &p(1.0, 1.0),
            EPS
        ));
    }

    #[test]
    fn collinear_overlap() {
        assert!(segments_intersect(
            &p(0.0, 0.0),
            &p(2.0, 0.0),
            &p(1.0, 0.0),
            &p(3.0, 0.0),
            EPS
        ));
    }

    #[test]
    fn collinear_but_apart() {
        assert!(!segments_intersect(
            &p(0.0, 0.0),
            &p(1.0, 0.0),
            &p(2.0, 0.0),
            &p(3.0, 0.0),
            EPS
        ));
    }

    #[test]
    fn touching_endpoint_counts() {
        assert!(segments_intersect(
            &p(0.0, 0.0),
            &p(2.0, 0.0),
            &p(1.0, 0.0),
            &p(1.0, 1.0),
            EPS
        ));
    }

    #[test]
    fn segment_line_crossing() {
        let hit =
            segment_line_intersect_2d(&p(0.0, -1.0), &p(0.0, 1.0), &p(-5.0, 0.5), &p(5.0, 0.5))
                .unwrap();
        assert_relative_eq!(hit.x, 0.0);
        assert_relative_eq!(hit.y, 0.5);
    }

    #[test]
    fn segment_line_parallel() {
        assert!(
            segment_line_intersect_2d(&p(0.0, 0.0), &p(1.0, 0.0), &p(0.0, 1.0), &p(1.0, 1.0))
                .is_none()
        );
    }
}
