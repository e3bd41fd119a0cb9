use tracing::debug;

use crate::error::BooleanError;
use crate::math::intersect_2d::segments_intersect;
use crate::math::polygon_2d::signed_area_2d;
use crate::math::Point2;

use super::operand::{PolygonRing, PreparedOperand, RawOperand, Tolerance};

/// Why a single ring was not accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RingRejection {
    /// Fewer than 3 distinct points, or area below tolerance squared.
    Degenerate,
    /// Two non-adjacent edges touch or cross.
    SelfIntersecting,
}

/// Normalizes and validates raw operands before clipping.
///
/// # Algorithm (per ring)
///
/// 1. Reject rings with fewer than 3 raw points
/// 2. Snap coordinates to the tolerance grid, dropping non-finite points
/// 3. Drop points within tolerance of the previously kept point
/// 4. Drop the last point if it closes onto the first
/// 5. Reject rings left with fewer than 3 points
/// 6. Reject rings whose non-adjacent edges touch or cross
/// 7. Reject rings with `|area| < tolerance²`
/// 8. Reverse clockwise rings
///
/// Degenerate rings are skipped; a self-intersecting ring fails its whole
/// operand. An operand left without rings fails as degenerate, and at least
/// two operands must survive.
#[derive(Debug, Clone, Copy)]
pub struct Preflight {
    tolerance: Tolerance,
}

impl Preflight {
    /// Creates a new `Preflight` pass.
    #[must_use]
    pub fn new(tolerance: Tolerance) -> Self {
        Self { tolerance }
    }

    /// Prepares every operand, failing on the first invalid one.
    ///
    /// # Errors
    ///
    /// - `degenerate` if an operand has no valid ring or fewer than 2 operands are given
    /// - `self_intersection` if an operand ring crosses itself
    pub fn execute(&self, operands: &[RawOperand]) -> Result<Vec<PreparedOperand>, BooleanError> {
        let prepared = operands
            .iter()
            .map(|raw| self.prepare_operand(raw))
            .collect::<Result<Vec<_>, _>>()?;

        if prepared.len() < 2 {
            return Err(BooleanError::degenerate(format!(
                "boolean operations need at least 2 operands with geometry, got {}",
                prepared.len()
            )));
        }
        Ok(prepared)
    }

    /// Prepares a single operand.
    ///
    /// # Errors
    ///
    /// Fails with the operand's id attached if it self-intersects or has no
    /// valid ring.
    pub fn prepare_operand(&self, raw: &RawOperand) -> Result<PreparedOperand, BooleanError> {
        let mut rings = Vec::with_capacity(raw.rings.len());
        for (index, points) in raw.rings.iter().enumerate() {
            match self.normalize_ring(points) {
                Ok(ring) => rings.push(ring),
                Err(RingRejection::Degenerate) => {
                    debug!(operand = ?raw.id, ring = index, "skipping degenerate ring");
                }
                Err(RingRejection::SelfIntersecting) => {
                    return Err(BooleanError::self_intersection(format!(
                        "ring {index} of the operand intersects itself"
                    ))
                    .with_operand(raw.id));
                }
            }
        }

        if rings.is_empty() {
            return Err(
                BooleanError::degenerate("operand has no valid geometry after normalization")
                    .with_operand(raw.id),
            );
        }
        Ok(PreparedOperand { id: raw.id, rings })
    }

    /// Normalizes one ring.
    ///
    /// # Errors
    ///
    /// Returns the reason the ring cannot be used.
    pub fn normalize_ring(&self, points: &[Point2]) -> Result<PolygonRing, RingRejection> {
        if points.len() < 3 {
            return Err(RingRejection::Degenerate);
        }
        let tol = self.tolerance.value();

        let mut kept: Vec<Point2> = Vec::with_capacity(points.len());
        for p in points {
            let snapped = Point2::new(snap(p.x, tol), snap(p.y, tol));
            if !snapped.x.is_finite() || !snapped.y.is_finite() {
                continue;
            }
            match kept.last() {
                Some(prev) if (snapped - prev).norm() <= tol => {}
                _ => kept.push(snapped),
            }
        }

        if kept.len() > 1 && (kept[kept.len() - 1] - kept[0]).norm() <= tol {
            kept.pop();
        }
        if kept.len() < 3 {
            return Err(RingRejection::Degenerate);
        }
        if has_self_intersection(&kept, tol) {
            return Err(RingRejection::SelfIntersecting);
        }

        let area = signed_area_2d(&kept);
        if area.abs() < self.tolerance.min_area() {
            return Err(RingRejection::Degenerate);
        }
        if area < 0.0 {
            kept.reverse();
        }
        Ok(PolygonRing::from_normalized(kept))
    }
}

/// Rounds `value` to the nearest multiple of `tol`.
fn snap(value: f64, tol: f64) -> f64 {
    (value / tol).round() * tol
}

/// Tests every pair of non-adjacent edges of a closed ring for contact.
///
/// Edges sharing a vertex, including the wraparound pair, are skipped.
/// This is O(n²) in the number of points.
///
/// `eps` bounds the cross products used for orientation, so it acts as an
/// area rather than a length. For rings whose edges are only a few `eps`
/// long, nearly every turn reads as collinear and the test degrades to
/// bounding-box overlap of non-adjacent edges, which rejects some valid
/// slivers.
#[must_use]
pub fn has_self_intersection(points: &[Point2], eps: f64) -> bool {
    let n = points.len();
    if n < 4 {
        return false;
    }
    for i in 0..n {
        let a0 = &points[i];
        let a1 = &points[(i + 1) % n];
        for j in (i + 2)..n {
            if i == 0 && j == n - 1 {
                continue;
            }
            let b0 = &points[j];
            let b1 = &points[(j + 1) % n];
            if segments_intersect(a0, a1, b0, b1, eps) {
                return true;
            }
        }
    }
    false
}
