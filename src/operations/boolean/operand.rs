use tracing::warn;

use crate::document::NodeId;
use crate::math::{
    polygon_2d::signed_area_2d, Point2, DEFAULT_TOLERANCE, MAX_TOLERANCE, MIN_TOLERANCE,
};

/// Snapping granularity, minimum segment length and minimum ring area of a
/// boolean evaluation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tolerance(f64);

impl Tolerance {
    /// Resolves a requested tolerance.
    ///
    /// Missing, non-finite or non-positive values fall back to
    /// [`DEFAULT_TOLERANCE`]; others are clamped to
    /// `[MIN_TOLERANCE, MAX_TOLERANCE]`.
    #[must_use]
    pub fn resolve(requested: Option<f64>) -> Self {
        match requested {
            None => Self::default(),
            Some(value) if value.is_finite() && value > 0.0 => {
                Self(value.clamp(MIN_TOLERANCE, MAX_TOLERANCE))
            }
            Some(value) => {
                warn!(value, "invalid boolean tolerance, using default");
                Self::default()
            }
        }
    }

    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }

    /// Minimum accepted ring area.
    #[must_use]
    pub fn min_area(self) -> f64 {
        self.0 * self.0
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Self(DEFAULT_TOLERANCE)
    }
}

/// A closed, counter-clockwise, non-self-intersecting polygon loop.
///
/// The closing edge from the last point back to the first is implicit.
/// Instances are only produced by preflight normalization.
#[derive(Debug, Clone, PartialEq)]
pub struct PolygonRing {
    points: Vec<Point2>,
}

impl PolygonRing {
    /// Wraps points already known to satisfy the ring invariants.
    pub(crate) fn from_normalized(points: Vec<Point2>) -> Self {
        debug_assert!(points.len() >= 3);
        debug_assert!(signed_area_2d(&points) > 0.0);
        Self { points }
    }

    #[must_use]
    pub fn points(&self) -> &[Point2] {
        &self.points
    }
}

/// Operand geometry as extracted from a node, before normalization.
#[derive(Debug, Clone, PartialEq)]
pub struct RawOperand {
    pub id: NodeId,
    pub rings: Vec<Vec<Point2>>,
}

/// Operand geometry after preflight normalization.
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedOperand {
    pub id: NodeId,
    pub rings: Vec<PolygonRing>,
}
