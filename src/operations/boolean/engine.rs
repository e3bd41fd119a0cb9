use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::BooleanError;
use crate::math::intersect_2d::segments_intersect;
use crate::math::polygon_2d::{
    bounds_2d, compare_point_sequences, is_convex, min_point_index, point_in_ring,
    signed_area_2d, vertex_centroid,
};
use crate::math::Point2;

use super::clip::clip_convex;
use super::operand::{PolygonRing, PreparedOperand, Tolerance};
use super::select::{BooleanOp, FillRule};

/// Identifies the engine that produced a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EngineKind {
    /// Compiled clipping library, when linked in.
    Native,
    /// Deterministic in-crate fallback.
    Portable,
}

impl EngineKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Native => "native",
            Self::Portable => "portable",
        }
    }
}

/// Successful output of a clipping engine.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineOutput {
    pub engine: EngineKind,
    /// Output rings; holes carry clockwise winding.
    pub rings: Vec<Vec<Point2>>,
    pub fill_rule: FillRule,
}

/// Outcome of a single engine attempt.
pub type EngineResult = Result<EngineOutput, BooleanError>;

/// A polygon clipping backend.
pub trait BooleanEngine {
    /// Which engine this is.
    fn kind(&self) -> EngineKind;

    /// Combines prepared operands with `op`.
    ///
    /// # Errors
    ///
    /// Returns `engine_error` if the engine cannot run, or `empty_result` if
    /// the operation covers no area.
    fn solve(
        &self,
        op: BooleanOp,
        operands: &[PreparedOperand],
        tolerance: Tolerance,
    ) -> EngineResult;
}

/// Hook for a compiled clipping library.
///
/// No native runtime is linked into this build, so every call fails with
/// `engine_error` and the solver moves on to the next engine.
#[derive(Debug, Default, Clone, Copy)]
pub struct NativeEngine;

impl BooleanEngine for NativeEngine {
    fn kind(&self) -> EngineKind {
        EngineKind::Native
    }

    fn solve(
        &self,
        _op: BooleanOp,
        _operands: &[PreparedOperand],
        _tolerance: Tolerance,
    ) -> EngineResult {
        Err(BooleanError::engine("native boolean runtime is not initialized")
            .with_engine(self.kind()))
    }
}

/// Always-available deterministic engine.
///
/// `union` and `exclude` stack every ring and rely on the fill rule.
/// `subtract` stacks reversed cutter rings, clipped to the base, as holes. `intersect` clips
/// convex single-ring operands with Sutherland–Hodgman and gives up (empty
/// result) on anything else.
#[derive(Debug, Default, Clone, Copy)]
pub struct PortableEngine;

impl BooleanEngine for PortableEngine {
    fn kind(&self) -> EngineKind {
        EngineKind::Portable
    }

    fn solve(
        &self,
        op: BooleanOp,
        operands: &[PreparedOperand],
        tolerance: Tolerance,
    ) -> EngineResult {
        let rings = match op {
            BooleanOp::Union | BooleanOp::Exclude => all_rings(operands),
            BooleanOp::Subtract => subtract_rings(operands, tolerance),
            BooleanOp::Intersect => intersect_rings(operands, tolerance),
        };

        if rings.is_empty() {
            return Err(BooleanError::empty_result(format!(
                "{} produced no filled area",
                op.as_str()
            ))
            .with_engine(self.kind()));
        }

        Ok(EngineOutput {
            engine: self.kind(),
            rings: sort_rings(rings),
            fill_rule: op.fill_rule(),
        })
    }
}

fn all_rings(operands: &[PreparedOperand]) -> Vec<Vec<Point2>> {
    operands
        .iter()
        .flat_map(|o| o.rings.iter().map(|r| r.points().to_vec()))
        .collect()
}

/// Base rings followed by every cutter ring, reversed to wind as a hole.
///
/// A single convex base ring clips each cutter exactly. Otherwise cutters
/// that touch no base ring are dropped and the rest are clipped to the
/// bounding box of the base. Either way a cutter that misses the base
/// contributes nothing.
fn subtract_rings(operands: &[PreparedOperand], tolerance: Tolerance) -> Vec<Vec<Point2>> {
    let Some((base, cutters)) = operands.split_first() else {
        return Vec::new();
    };
    let Some((min, max)) = bounds_2d(base.rings.iter().flat_map(PolygonRing::points)) else {
        return Vec::new();
    };
    let window = [
        min,
        Point2::new(max.x, min.y),
        max,
        Point2::new(min.x, max.y),
    ];
    let convex_base = match base.rings.as_slice() {
        [ring] if is_convex(ring.points(), tolerance.min_area()) => Some(ring.points()),
        _ => None,
    };

    let tol = tolerance.value();
    let mut rings: Vec<Vec<Point2>> = base.rings.iter().map(|r| r.points().to_vec()).collect();
    for ring in cutters.iter().flat_map(|o| o.rings.iter()) {
        let clipped = match convex_base {
            Some(base_ring) => clip_convex(ring.points(), base_ring, tol),
            None if base
                .rings
                .iter()
                .any(|b| rings_touch(b.points(), ring.points(), tol)) =>
            {
                clip_convex(ring.points(), &window, tol)
            }
            None => continue,
        };
        if clipped.len() < 3 || signed_area_2d(&clipped).abs() < tolerance.min_area() {
            continue;
        }
        rings.push(clipped.into_iter().rev().collect());
    }
    rings
}

/// Returns `true` if two closed rings cross, touch, or one contains the other.
fn rings_touch(a: &[Point2], b: &[Point2], eps: f64) -> bool {
    let (n, m) = (a.len(), b.len());
    for i in 0..n {
        for j in 0..m {
            if segments_intersect(&a[i], &a[(i + 1) % n], &b[j], &b[(j + 1) % m], eps) {
                return true;
            }
        }
    }
    a.first().is_some_and(|p| point_in_ring(p, b)) || b.first().is_some_and(|p| point_in_ring(p, a))
}

/// Successive convex clipping. Any unsupported operand yields no rings.
fn intersect_rings(operands: &[PreparedOperand], tolerance: Tolerance) -> Vec<Vec<Point2>> {
    let convex_eps = tolerance.min_area();
    let mut convex = Vec::with_capacity(operands.len());
    for operand in operands {
        match operand.rings.as_slice() {
            [ring] if is_convex(ring.points(), convex_eps) => convex.push(ring.points()),
            _ => {
                debug!(
                    operand = ?operand.id,
                    "intersect supports only convex single-ring operands"
                );
                return Vec::new();
            }
        }
    }

    let Some((first, rest)) = convex.split_first() else {
        return Vec::new();
    };
    let mut current = first.to_vec();
    for clip in rest {
        current = clip_convex(&current, clip, tolerance.value());
        if current.len() < 3 || signed_area_2d(&current).abs() < tolerance.min_area() {
            return Vec::new();
        }
    }
    vec![current]
}

/// Puts rings into canonical form so output does not depend on operand
/// order.
///
/// Each ring is rotated to start at its smallest point (x, then y). Rings are
/// then ordered by absolute area (descending), centroid x, centroid y and
/// finally point coordinates.
#[must_use]
pub fn sort_rings(mut rings: Vec<Vec<Point2>>) -> Vec<Vec<Point2>> {
    for ring in &mut rings {
        if let Some(start) = min_point_index(ring) {
            ring.rotate_left(start);
        }
    }
    rings.sort_by(|a, b| ring_order(a, b));
    rings
}

/// Tries engines in order; the first success wins.
///
/// When every engine fails, the last failure is returned.
pub struct Solver {
    engines: Vec<Box<dyn BooleanEngine>>,
}

impl Solver {
    /// Creates a solver over the given engines, tried in order.
    #[must_use]
    pub fn new(engines: Vec<Box<dyn BooleanEngine>>) -> Self {
        Self { engines }
    }

    /// Solves `op` over `operands`.
    ///
    /// # Errors
    ///
    /// Returns the last engine failure, or `engine_error` if no engines are
    /// configured.
    pub fn solve(
        &self,
        op: BooleanOp,
        operands: &[PreparedOperand],
        tolerance: Tolerance,
    ) -> EngineResult {
        let mut last_error = None;
        for engine in &self.engines {
            match engine.solve(op, operands, tolerance) {
                Ok(output) => return Ok(output),
                Err(err) => {
                    debug!(engine = engine.kind().as_str(), code = %err.code, "engine attempt failed");
                    last_error = Some(err);
                }
            }
        }
        Err(last_error.unwrap_or_else(|| BooleanError::engine("no boolean engine configured")))
    }
}

impl Default for Solver {
    fn default() -> Self {
        Self::new(vec![Box::new(NativeEngine), Box::new(PortableEngine)])
    }
}

impl std::fmt::Debug for Solver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.engines.iter().map(|e| e.kind()))
            .finish()
    }
}

/// Compares two rings for the deterministic output order.
///
/// Centroids are vertex averages.
#[must_use]
pub fn ring_order(a: &[Point2], b: &[Point2]) -> Ordering {
    let (aa, ab) = (signed_area_2d(a).abs(), signed_area_2d(b).abs());
    let (ca, cb) = (vertex_centroid(a), vertex_centroid(b));
    ab.total_cmp(&aa)
        .then(ca.x.total_cmp(&cb.x))
        .then(ca.y.total_cmp(&cb.y))
        .then_with(|| compare_point_sequences(a, b))
}
