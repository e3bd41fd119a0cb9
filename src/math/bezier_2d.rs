use super::Point2;

/// A cubic Bezier segment in the plane.
///
/// `P(t) = (1-t)^3 from + 3(1-t)^2 t ctrl1 + 3(1-t) t^2 ctrl2 + t^3 to`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicBezier2 {
    pub from: Point2,
    pub ctrl1: Point2,
    pub ctrl2: Point2,
    pub to: Point2,
}

impl CubicBezier2 {
    #[must_use]
    pub fn new(from: Point2, ctrl1: Point2, ctrl2: Point2, to: Point2) -> Self {
        Self {
            from,
            ctrl1,
            ctrl2,
            to,
        }
    }

    /// Samples the curve at `t` (expected in `[0, 1]`).
    #[must_use]
    pub fn sample(&self, t: f64) -> Point2 {
        let t2 = t * t;
        let t3 = t2 * t;
        let one_t = 1.0 - t;
        let one_t2 = one_t * one_t;
        let one_t3 = one_t2 * one_t;

        Point2::from(
            self.from.coords * one_t3
                + self.ctrl1.coords * (3.0 * one_t2 * t)
                + self.ctrl2.coords * (3.0 * one_t * t2)
                + self.to.coords * t3,
        )
    }

    /// Length of the control polygon, an upper bound on the arc length.
    #[must_use]
    pub fn control_polygon_length(&self) -> f64 {
        (self.ctrl1 - self.from).norm() + (self.ctrl2 - self.ctrl1).norm() + (self.to - self.ctrl2).norm()
    }

    /// Number of flattening steps for this curve.
    ///
    /// One step per `pixels_per_step` of control-polygon length, clamped to
    /// the range spanned by `min_steps` and `max_steps` (in either order).
    /// Never returns zero.
    #[must_use]
    pub fn step_count(&self, pixels_per_step: f64, min_steps: usize, max_steps: usize) -> usize {
        let lo = min_steps.min(max_steps).max(1);
        let hi = min_steps.max(max_steps).max(1);
        let length = self.control_polygon_length();
        if !length.is_finite() || !pixels_per_step.is_finite() || pixels_per_step <= 0.0 {
            return lo;
        }
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let steps = (length / pixels_per_step).ceil() as usize;
        steps.clamp(lo, hi)
    }

    /// Flattens the curve into `steps` points, excluding `from` and ending
    /// exactly at `to`.
    #[must_use]
    pub fn flatten(&self, steps: usize) -> Vec<Point2> {
        let steps = steps.max(1);
        let mut points = Vec::with_capacity(steps);
        for i in 1..steps {
            #[allow(clippy::cast_precision_loss)]
            let t = i as f64 / steps as f64;
            points.push(self.sample(t));
        }
        points.push(self.to);
        points
    }
}
