use std::f64::consts::TAU;

use crate::document::{Document, Node, NodeId, ShapeKind, VectorPath};
use crate::error::{GeometryError, Result};
use crate::math::bezier_2d::CubicBezier2;
use crate::math::{Point2, Vector2};

use super::operand::{RawOperand, Tolerance};

/// Parameters controlling how shapes are turned into polygon rings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExtractionParams {
    /// Number of samples on an ellipse boundary.
    pub ellipse_segments: usize,
    /// Minimum number of points a flattened curve segment produces.
    pub min_curve_points: usize,
    /// Maximum number of points a flattened curve segment produces.
    pub max_curve_points: usize,
    /// Control-polygon length covered by one flattening step.
    pub curve_pixels_per_step: f64,
}

impl Default for ExtractionParams {
    fn default() -> Self {
        Self {
            ellipse_segments: 48,
            min_curve_points: 8,
            max_curve_points: 96,
            curve_pixels_per_step: 4.0,
        }
    }
}

/// Extracts the closed polygon rings of a single operand node.
///
/// Coordinates are the node's geometry translated by its own position plus
/// `offset` (typically the node's ancestor offset, giving world space).
///
/// Composite nodes (booleans), frames and text produce no rings: booleans
/// must be resolved to concrete geometry before being used as operands.
pub struct ExtractOperand {
    node: NodeId,
    params: ExtractionParams,
    tolerance: Tolerance,
    offset: Vector2,
}

impl ExtractOperand {
    /// Creates a new `ExtractOperand` operation with default parameters.
    #[must_use]
    pub fn new(node: NodeId) -> Self {
        Self {
            node,
            params: ExtractionParams::default(),
            tolerance: Tolerance::default(),
            offset: Vector2::zeros(),
        }
    }

    #[must_use]
    pub fn with_params(mut self, params: ExtractionParams) -> Self {
        self.params = params;
        self
    }

    #[must_use]
    pub fn with_tolerance(mut self, tolerance: Tolerance) -> Self {
        self.tolerance = tolerance;
        self
    }

    #[must_use]
    pub fn with_offset(mut self, offset: Vector2) -> Self {
        self.offset = offset;
        self
    }

    /// Executes the extraction.
    ///
    /// # Errors
    ///
    /// Returns an error if the node is missing from the document or its
    /// position or size is not finite.
    pub fn execute(&self, doc: &Document) -> Result<RawOperand> {
        let node = doc.node(self.node)?;
        check_finite(node.position.x, node.position.y)?;
        check_finite(node.size.x, node.size.y)?;

        let origin = node.position + self.offset;
        let rings = match &node.kind {
            ShapeKind::Rectangle => rectangle_ring(origin, node).into_iter().collect(),
            ShapeKind::Ellipse => ellipse_ring(origin, node, self.params.ellipse_segments)
                .into_iter()
                .collect(),
            ShapeKind::Path(path) => path_ring(origin, path, &self.params, self.tolerance)
                .into_iter()
                .collect(),
            ShapeKind::Boolean(_) | ShapeKind::Frame | ShapeKind::Text => Vec::new(),
        };

        Ok(RawOperand {
            id: self.node,
            rings,
        })
    }
}

fn check_finite(x: f64, y: f64) -> std::result::Result<(), GeometryError> {
    if x.is_finite() && y.is_finite() {
        Ok(())
    } else {
        Err(GeometryError::NonFinite { x, y })
    }
}

/// Four corners in clockwise screen order (y down): TL, TR, BR, BL.
fn rectangle_ring(origin: Point2, node: &Node) -> Option<Vec<Point2>> {
    let (w, h) = (node.size.x, node.size.y);
    if w <= 0.0 || h <= 0.0 {
        return None;
    }
    Some(vec![
        origin,
        Point2::new(origin.x + w, origin.y),
        Point2::new(origin.x + w, origin.y + h),
        Point2::new(origin.x, origin.y + h),
    ])
}

fn ellipse_ring(origin: Point2, node: &Node, segments: usize) -> Option<Vec<Point2>> {
    let rx = node.size.x * 0.5;
    let ry = node.size.y * 0.5;
    if rx <= 0.0 || ry <= 0.0 || segments < 3 {
        return None;
    }
    let cx = origin.x + rx;
    let cy = origin.y + ry;
    #[allow(clippy::cast_precision_loss)]
    let step = TAU / segments as f64;
    Some(
        (0..segments)
            .map(|i| {
                #[allow(clippy::cast_precision_loss)]
                let angle = step * i as f64;
                Point2::new(cx + rx * angle.cos(), cy + ry * angle.sin())
            })
            .collect(),
    )
}

/// Walks the segment graph of a closed vector path into a single ring.
///
/// From each arrived-at vertex the first unvisited outgoing segment is
/// taken. The walk ends on returning to the start vertex, at a dead end, or
/// after twice the segment count, so malformed adjacency always terminates.
fn path_ring(
    origin: Point2,
    path: &VectorPath,
    params: &ExtractionParams,
    tolerance: Tolerance,
) -> Option<Vec<Point2>> {
    if !path.closed || path.vertices.len() < 3 {
        return None;
    }
    let segments = path.resolved_segments();
    let first = segments.first()?;

    let mut outgoing: Vec<Vec<usize>> = vec![Vec::new(); path.vertices.len()];
    for (i, seg) in segments.iter().enumerate() {
        outgoing[seg.start].push(i);
    }

    let anchor = |index: usize| origin + path.vertices[index].position.coords;
    let start = first.start;
    let mut current = start;
    let mut visited = vec![false; segments.len()];
    let mut ring = vec![anchor(start)];

    for _ in 0..segments.len() * 2 {
        let Some(&seg_index) = outgoing[current].iter().find(|&&i| !visited[i]) else {
            break;
        };
        visited[seg_index] = true;
        let seg = segments[seg_index];

        let a = &path.vertices[seg.start];
        let b = &path.vertices[seg.end];
        match (a.curve_out(), b.curve_in()) {
            (None, None) => ring.push(anchor(seg.end)),
            (out, inc) => {
                let from = anchor(seg.start);
                let to = anchor(seg.end);
                let curve = CubicBezier2::new(
                    from,
                    from + out.unwrap_or_else(Vector2::zeros),
                    to + inc.unwrap_or_else(Vector2::zeros),
                    to,
                );
                let steps = curve.step_count(
                    params.curve_pixels_per_step,
                    params.min_curve_points,
                    params.max_curve_points,
                );
                ring.extend(curve.flatten(steps));
            }
        }

        current = seg.end;
        if current == start {
            break;
        }
    }

    if ring.len() > 1 {
        let closing = (ring[ring.len() - 1] - ring[0]).norm();
        if closing <= tolerance.value() {
            ring.pop();
        }
    }

    Some(ring)
}
