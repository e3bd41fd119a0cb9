use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

use crate::document::NodeId;
use crate::error::{BooleanError, BooleanErrorCode};
use crate::math::polygon_2d::bounds_2d;
use crate::math::Point2;

use super::engine::{EngineKind, EngineOutput};
use super::select::FillRule;

/// Axis-aligned bounds of a boolean result.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    /// Returns `true` if `other` lies within these bounds, allowing `eps` slack.
    #[must_use]
    pub fn contains(&self, other: &Bounds, eps: f64) -> bool {
        other.x >= self.x - eps
            && other.y >= self.y - eps
            && other.x + other.width <= self.x + self.width + eps
            && other.y + other.height <= self.y + self.height + eps
    }
}

/// A successfully resolved boolean path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BooleanPath {
    /// SVG-style path data (`M`, `L`, `Z`), coordinates rounded to 3 decimals.
    pub path_data: String,
    pub fill_rule: FillRule,
    pub bounds: Bounds,
    pub engine: EngineKind,
}

/// A boolean evaluation that could not produce a path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BooleanFailure {
    pub code: BooleanErrorCode,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub affected_operand_id: Option<NodeId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub engine: Option<EngineKind>,
}

impl From<BooleanError> for BooleanFailure {
    fn from(err: BooleanError) -> Self {
        Self {
            code: err.code,
            message: err.message,
            affected_operand_id: err.operand,
            engine: err.engine,
        }
    }
}

/// What the scene graph receives for a boolean node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum BooleanPathResult {
    Ok(BooleanPath),
    Invalid(BooleanFailure),
}

impl BooleanPathResult {
    #[must_use]
    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Ok(_))
    }

    #[must_use]
    pub fn path(&self) -> Option<&BooleanPath> {
        match self {
            Self::Ok(path) => Some(path),
            Self::Invalid(_) => None,
        }
    }

    #[must_use]
    pub fn failure(&self) -> Option<&BooleanFailure> {
        match self {
            Self::Ok(_) => None,
            Self::Invalid(failure) => Some(failure),
        }
    }
}

impl From<Result<BooleanPath, BooleanError>> for BooleanPathResult {
    fn from(result: Result<BooleanPath, BooleanError>) -> Self {
        match result {
            Ok(path) => Self::Ok(path),
            Err(err) => Self::Invalid(err.into()),
        }
    }
}

/// Turns engine output into path data and bounds.
///
/// # Errors
///
/// Returns `empty_result` if the output contains no points.
pub fn assemble_result(output: &EngineOutput) -> Result<BooleanPath, BooleanError> {
    let Some((min, max)) = bounds_2d(output.rings.iter().flatten()) else {
        return Err(BooleanError::empty_result("boolean result has no points")
            .with_engine(output.engine));
    };

    Ok(BooleanPath {
        path_data: path_data(&output.rings),
        fill_rule: output.fill_rule,
        bounds: Bounds {
            x: min.x,
            y: min.y,
            width: max.x - min.x,
            height: max.y - min.y,
        },
        engine: output.engine,
    })
}

/// Serializes rings as `M x y L x y ... Z`, skipping rings under 3 points.
#[must_use]
pub fn path_data(rings: &[Vec<Point2>]) -> String {
    let mut data = String::new();
    for ring in rings.iter().filter(|r| r.len() >= 3) {
        if !data.is_empty() {
            data.push(' ');
        }
        for (i, p) in ring.iter().enumerate() {
            let cmd = if i == 0 { 'M' } else { 'L' };
            if i > 0 {
                data.push(' ');
            }
            let _ = write!(data, "{cmd}{} {}", format_coord(p.x), format_coord(p.y));
        }
        data.push_str(" Z");
    }
    data
}

/// Rounds to 3 decimals and prints without trailing zeros.
#[must_use]
pub fn format_coord(value: f64) -> String {
    // Adding 0.0 turns -0 into 0.
    let rounded = (value * 1000.0).round() / 1000.0 + 0.0;
    format!("{rounded}")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    fn square() -> Vec<Point2> {
        vec![
            Point2::new(0.0, 0.0),
            Point2::new(10.0, 0.0),
            Point2::new(10.0, 10.0),
            Point2::new(0.0, 10.0),
        ]
    }

    #[test]
    fn coordinates_are_rounded() {
        assert_eq!(format_coord(1.0), "1");
        assert_eq!(format_coord(12.34567), "12.346");
        assert_eq!(format_coord(-0.0001), "0");
        assert_eq!(format_coord(-2.5), "-2.5");
    }

    #[test]
    fn path_data_for_two_rings() {
        let tri = vec![
            Point2::new(1.0, 1.0),
            Point2::new(2.0, 1.0),
            Point2::new(1.5, 2.0),
        ];
        let line = vec![Point2::new(0.0, 0.0), Point2::new(1.0, 1.0)];
        let data = path_data(&[square(), line, tri]);
        assert_eq!(
            data,
            "M0 0 L10 0 L10 10 L0 10 Z M1 1 L2 1 L1.5 2 Z"
        );
    }

    #[test]
    fn assemble_computes_bounds() {
        let output = EngineOutput {
            engine: EngineKind::Portable,
            rings: vec![square()],
            fill_rule: FillRule::NonZero,
        };
        let path = assemble_result(&output).unwrap();
        assert_relative_eq!(path.bounds.width, 10.0);
        assert_relative_eq!(path.bounds.height, 10.0);
        assert_eq!(path.engine, EngineKind::Portable);
    }

    #[test]
    fn assemble_without_points_is_empty() {
        let output = EngineOutput {
            engine: EngineKind::Portable,
            rings: vec![],
            fill_rule: FillRule::NonZero,
        };
        let err = assemble_result(&output).unwrap_err();
        assert_eq!(err.code, BooleanErrorCode::EmptyResult);
    }

    #[test]
    fn bounds_containment() {
        let outer = Bounds {
            x: 0.0,
            y: 0.0,
            width: 10.0,
            height: 10.0,
        };
        let inner = Bounds {
            x: 2.0,
            y: 2.0,
            width: 3.0,
            height: 3.0,
        };
        assert!(outer.contains(&inner, 0.0));
        assert!(!inner.contains(&outer, 0.0));
    }

    #[test]
    fn serialized_shape() {
        let ok = BooleanPathResult::Ok(BooleanPath {
            path_data: "M0 0 L1 0 L1 1 Z".into(),
            fill_rule: FillRule::EvenOdd,
            bounds: Bounds {
                x: 0.0,
                y: 0.0,
                width: 1.0,
                height: 1.0,
            },
            engine: EngineKind::Portable,
        });
        let json = serde_json::to_value(&ok).unwrap();
        assert_eq!(json["status"], "ok");
        assert_eq!(json["fillRule"], "evenodd");
        assert_eq!(json["pathData"], "M0 0 L1 0 L1 1 Z");
        assert_eq!(json["engine"], "portable");

        let invalid: BooleanPathResult =
            Err::<BooleanPath, _>(BooleanError::self_intersection("crossing")).into();
        let json = serde_json::to_value(&invalid).unwrap();
        assert_eq!(json["status"], "invalid");
        assert_eq!(json["code"], "self_intersection");
        assert!(json.get("affectedOperandId").is_none());

        let back: BooleanPathResult = serde_json::from_value(json).unwrap();
        assert_eq!(back, invalid);
    }
}
