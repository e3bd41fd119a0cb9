use crate::math::{Point2, Vector2};

/// An anchor point of a vector path.
///
/// Handles are offsets from the anchor. A missing or zero-length handle means
/// the adjacent segment leaves or enters the anchor as a straight line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VectorVertex {
    pub position: Point2,
    pub handle_in: Option<Vector2>,
    pub handle_out: Option<Vector2>,
}

impl VectorVertex {
    /// Creates a corner vertex without handles.
    #[must_use]
    pub fn corner(x: f64, y: f64) -> Self {
        Self {
            position: Point2::new(x, y),
            handle_in: None,
            handle_out: None,
        }
    }

    /// Creates a vertex with both curve handles.
    #[must_use]
    pub fn smooth(x: f64, y: f64, handle_in: Vector2, handle_out: Vector2) -> Self {
        Self {
            position: Point2::new(x, y),
            handle_in: Some(handle_in),
            handle_out: Some(handle_out),
        }
    }

    /// Returns the outgoing handle if it has non-zero length.
    #[must_use]
    pub fn curve_out(&self) -> Option<Vector2> {
        self.handle_out.filter(|h| h.norm_squared() > 0.0)
    }

    /// Returns the incoming handle if it has non-zero length.
    #[must_use]
    pub fn curve_in(&self) -> Option<Vector2> {
        self.handle_in.filter(|h| h.norm_squared() > 0.0)
    }
}

/// A directed segment between two vertices, by index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VectorSegment {
    pub start: usize,
    pub end: usize,
}

impl VectorSegment {
    #[must_use]
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }
}

/// The vector definition of a path node.
///
/// Without explicit `segments`, vertices connect in order, and the last
/// vertex connects back to the first when `closed` is set.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VectorPath {
    pub vertices: Vec<VectorVertex>,
    pub segments: Option<Vec<VectorSegment>>,
    pub closed: bool,
}

impl VectorPath {
    /// Creates a closed path connecting `vertices` in order.
    #[must_use]
    pub fn closed(vertices: Vec<VectorVertex>) -> Self {
        Self {
            vertices,
            segments: None,
            closed: true,
        }
    }

    /// Creates a closed path from straight-edged corner points.
    #[must_use]
    pub fn polygon(points: &[(f64, f64)]) -> Self {
        Self::closed(
            points
                .iter()
                .map(|&(x, y)| VectorVertex::corner(x, y))
                .collect(),
        )
    }

    /// Replaces the implicit ordering with an explicit segment list.
    #[must_use]
    pub fn with_segments(mut self, segments: Vec<VectorSegment>) -> Self {
        self.segments = Some(segments);
        self
    }

    /// Returns the effective segment list.
    ///
    /// Explicit segments referencing missing vertices are dropped.
    #[must_use]
    pub fn resolved_segments(&self) -> Vec<VectorSegment> {
        let n = self.vertices.len();
        if let Some(segments) = &self.segments {
            return segments
                .iter()
                .copied()
                .filter(|s| s.start < n && s.end < n)
                .collect();
        }
        if n < 2 {
            return Vec::new();
        }
        let mut segments: Vec<VectorSegment> =
            (0..n - 1).map(|i| VectorSegment::new(i, i + 1)).collect();
        if self.closed {
            segments.push(VectorSegment::new(n - 1, 0));
        }
        segments
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn implicit_segments_close_the_loop() {
        let path = VectorPath::polygon(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0)]);
        let segs = path.resolved_segments();
        assert_eq!(segs.len(), 3);
        assert_eq!(segs[2], VectorSegment::new(2, 0));
    }

    #[test]
    fn open_path_has_no_closing_segment() {
        let mut path = VectorPath::polygon(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0)]);
        path.closed = false;
        assert_eq!(path.resolved_segments().len(), 2);
    }

    #[test]
    fn explicit_segments_drop_out_of_range() {
        let path = VectorPath::polygon(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0)]).with_segments(vec![
            VectorSegment::new(0, 1),
            VectorSegment::new(1, 7),
            VectorSegment::new(2, 0),
        ]);
        assert_eq!(
            path.resolved_segments(),
            vec![VectorSegment::new(0, 1), VectorSegment::new(2, 0)]
        );
    }

    #[test]
    fn zero_length_handles_are_ignored() {
        let v = VectorVertex::smooth(0.0, 0.0, Vector2::zeros(), Vector2::new(1.0, 0.0));
        assert!(v.curve_in().is_none());
        assert!(v.curve_out().is_some());
    }
}
