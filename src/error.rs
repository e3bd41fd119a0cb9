use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::document::NodeId;
use crate::operations::boolean::EngineKind;

/// Top-level error type for the Vectis boolean engine.
#[derive(Debug, Error)]
pub enum VectisError {
    #[error(transparent)]
    Document(#[from] DocumentError),

    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Boolean(#[from] BooleanError),
}

/// Errors raised by the scene-graph lookups.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DocumentError {
    #[error("node not found: {0:?}")]
    NodeNotFound(NodeId),

    #[error("node {0:?} is not a boolean node")]
    NotABooleanNode(NodeId),
}

/// Errors related to geometric computations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    #[error("non-finite coordinate ({x}, {y})")]
    NonFinite { x: f64, y: f64 },
}

/// Machine-readable category of a boolean failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BooleanErrorCode {
    /// An operand has no usable geometry, or fewer than two operands remain.
    Degenerate,
    /// An operand's outline crosses itself.
    SelfIntersection,
    /// The clipping engine is unavailable or cannot handle the request.
    EngineError,
    /// The inputs were valid but the operation covers no area.
    EmptyResult,
}

impl BooleanErrorCode {
    /// Returns the stable string form of the code.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Degenerate => "degenerate",
            Self::SelfIntersection => "self_intersection",
            Self::EngineError => "engine_error",
            Self::EmptyResult => "empty_result",
        }
    }
}

impl fmt::Display for BooleanErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A recoverable failure of the boolean pipeline.
///
/// Every stage reports failures through this type; none of them panic.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{code}: {message}")]
pub struct BooleanError {
    pub code: BooleanErrorCode,
    pub message: String,
    /// The operand the failure is attributable to, if any.
    pub operand: Option<NodeId>,
    /// The engine that produced the failure, if any.
    pub engine: Option<EngineKind>,
}

impl BooleanError {
    /// Creates an error with the given code and message.
    pub fn new(code: BooleanErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            operand: None,
            engine: None,
        }
    }

    pub fn degenerate(message: impl Into<String>) -> Self {
        Self::new(BooleanErrorCode::Degenerate, message)
    }

    pub fn self_intersection(message: impl Into<String>) -> Self {
        Self::new(BooleanErrorCode::SelfIntersection, message)
    }

    pub fn engine(message: impl Into<String>) -> Self {
        Self::new(BooleanErrorCode::EngineError, message)
    }

    pub fn empty_result(message: impl Into<String>) -> Self {
        Self::new(BooleanErrorCode::EmptyResult, message)
    }

    /// Attributes the error to an operand.
    #[must_use]
    pub fn with_operand(mut self, operand: NodeId) -> Self {
        self.operand = Some(operand);
        self
    }

    /// Records which engine produced the error.
    #[must_use]
    pub fn with_engine(mut self, engine: EngineKind) -> Self {
        self.engine = Some(engine);
        self
    }
}

/// Convenience type alias for results using [`VectisError`].
pub type Result<T> = std::result::Result<T, VectisError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn code_strings_are_stable() {
        assert_eq!(BooleanErrorCode::Degenerate.as_str(), "degenerate");
        assert_eq!(
            BooleanErrorCode::SelfIntersection.to_string(),
            "self_intersection"
        );
        assert_eq!(BooleanErrorCode::EngineError.as_str(), "engine_error");
        assert_eq!(BooleanErrorCode::EmptyResult.as_str(), "empty_result");
    }

    #[test]
    fn boolean_error_display_includes_code() {
        let err = BooleanError::degenerate("operand has no rings");
        assert_eq!(err.to_string(), "degenerate: operand has no rings");
    }

    #[test]
    fn boolean_error_converts_into_top_level() {
        let err: VectisError = BooleanError::engine("offline").into();
        assert!(matches!(err, VectisError::Boolean(_)));
    }
}
