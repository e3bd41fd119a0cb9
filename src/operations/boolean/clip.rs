use crate::math::intersect_2d::segment_line_intersect_2d;
use crate::math::{cross_2d, Point2};

/// Clips `subject` against the convex polygon `clip` (Sutherland–Hodgman).
///
/// Both polygons must be counter-clockwise; `clip` must be convex. Points on
/// a clip edge count as inside. Consecutive output points closer than `eps`
/// are merged. The result may have fewer than 3 points when the polygons do
/// not overlap.
#[must_use]
pub fn clip_convex(subject: &[Point2], clip: &[Point2], eps: f64) -> Vec<Point2> {
    let mut output = subject.to_vec();
    let m = clip.len();

    for i in 0..m {
        if output.is_empty() {
            break;
        }
        let c0 = clip[i];
        let c1 = clip[(i + 1) % m];
        let edge = c1 - c0;
        let inside = |p: &Point2| cross_2d(&edge, &(p - c0)) >= 0.0;

        let input = std::mem::take(&mut output);
        let mut prev = input[input.len() - 1];
        for &cur in &input {
            match (inside(&prev), inside(&cur)) {
                (true, true) => output.push(cur),
                (true, false) => {
                    output.extend(segment_line_intersect_2d(&prev, &cur, &c0, &c1));
                }
                (false, true) => {
                    output.extend(segment_line_intersect_2d(&prev, &cur, &c0, &c1));
                    output.push(cur);
                }
                (false, false) => {}
            }
            prev = cur;
        }
    }

    dedup_closed(output, eps)
}

/// Removes consecutive points (including the wraparound pair) within `eps`.
fn dedup_closed(points: Vec<Point2>, eps: f64) -> Vec<Point2> {
    let mut kept: Vec<Point2> = Vec::with_capacity(points.len());
    for p in points {
        match kept.last() {
            Some(prev) if (p - prev).norm() <= eps => {}
            _ => kept.push(p),
        }
    }
    while kept.len() > 1 && (kept[kept.len() - 1] - kept[0]).norm() <= eps {
        kept.pop();
    }
    kept
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::math::polygon_2d::{bounds_2d, signed_area_2d};

    fn rect(x: f64, y: f64, w: f64, h: f64) -> Vec<Point2> {
        vec![
            Point2::new(x, y),
            Point2::new(x + w, y),
            Point2::new(x + w, y + h),
            Point2::new(x, y + h),
        ]
    }

    #[test]
    fn overlapping_squares() {
        let out = clip_convex(&rect(0.0, 0.0, 100.0, 100.0), &rect(50.0, 50.0, 100.0, 100.0), 1e-9);
        assert_eq!(out.len(), 4);
        assert_relative_eq!(signed_area_2d(&out), 2500.0);
        let (min, max) = bounds_2d(&out).unwrap_or((Point2::origin(), Point2::origin()));
        assert_relative_eq!(min.x, 50.0);
        assert_relative_eq!(min.y, 50.0);
        assert_relative_eq!(max.x, 100.0);
        assert_relative_eq!(max.y, 100.0);
    }

    #[test]
    fn disjoint_squares_clip_to_nothing() {
        let out = clip_convex(&rect(0.0, 0.0, 10.0, 10.0), &rect(20.0, 0.0, 10.0, 10.0), 1e-9);
        assert!(out.len() < 3);
    }

    #[test]
    fn contained_subject_is_unchanged() {
        let inner = rect(10.0, 10.0, 5.0, 5.0);
        let out = clip_convex(&inner, &rect(0.0, 0.0, 100.0, 100.0), 1e-9);
        assert_eq!(out, inner);
    }

    #[test]
    fn triangle_against_square() {
        let tri = vec![
            Point2::new(-5.0, 0.0),
            Point2::new(5.0, 0.0),
            Point2::new(0.0, 10.0),
        ];
        let out = clip_convex(&tri, &rect(0.0, 0.0, 10.0, 10.0), 1e-9);
        assert_relative_eq!(signed_area_2d(&out), 25.0);
    }
}
