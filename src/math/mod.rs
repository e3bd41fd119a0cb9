pub mod bezier_2d;
pub mod intersect_2d;
pub mod polygon_2d;

/// 2D point type.
pub type Point2 = nalgebra::Point2<f64>;

/// 2D vector type.
pub type Vector2 = nalgebra::Vector2<f64>;

/// Tolerance used when a boolean node does not supply a valid one.
pub const DEFAULT_TOLERANCE: f64 = 0.001;

/// Smallest tolerance a boolean node may request.
pub const MIN_TOLERANCE: f64 = 1e-6;

/// Largest tolerance a boolean node may request.
pub const MAX_TOLERANCE: f64 = 1.0;

/// Returns the z component of the 2D cross product `a x b`.
#[must_use]
pub fn cross_2d(a: &Vector2, b: &Vector2) -> f64 {
    a.x * b.y - a.y * b.x
}
