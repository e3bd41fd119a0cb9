use crate::math::{Point2, Vector2};
use crate::operations::boolean::BooleanOp;

use super::vector_path::VectorPath;

slotmap::new_key_type! {
    /// Unique identifier for a node in the document.
    pub struct NodeId;
}

/// Descriptor of a boolean node: which operation combines which operands.
#[derive(Debug, Clone, PartialEq)]
pub struct BooleanNode {
    pub op: BooleanOp,
    pub operands: Vec<NodeId>,
    /// Snapping tolerance; invalid or missing values fall back to the default.
    pub tolerance: Option<f64>,
}

/// The geometry kind of a node.
#[derive(Debug, Clone, PartialEq)]
pub enum ShapeKind {
    /// Axis-aligned rectangle spanning `position .. position + size`.
    Rectangle,
    /// Ellipse inscribed in the node's box.
    Ellipse,
    /// Vector path with vertices relative to the node position.
    Path(VectorPath),
    /// Composite of other nodes.
    Boolean(BooleanNode),
    /// Container; offsets its children.
    Frame,
    /// Text layer; carries no outline geometry here.
    Text,
}

/// A node of the scene graph.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub name: String,
    pub kind: ShapeKind,
    /// Position relative to the parent node.
    pub position: Point2,
    pub size: Vector2,
    pub parent: Option<NodeId>,
}

impl Node {
    /// Creates a node of the given kind.
    #[must_use]
    pub fn new(name: impl Into<String>, kind: ShapeKind, position: Point2, size: Vector2) -> Self {
        Self {
            name: name.into(),
            kind,
            position,
            size,
            parent: None,
        }
    }

    #[must_use]
    pub fn rectangle(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self::new(
            "Rectangle",
            ShapeKind::Rectangle,
            Point2::new(x, y),
            Vector2::new(width, height),
        )
    }

    #[must_use]
    pub fn ellipse(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self::new(
            "Ellipse",
            ShapeKind::Ellipse,
            Point2::new(x, y),
            Vector2::new(width, height),
        )
    }

    /// Creates a path node at `(x, y)`; the size is not used for extraction.
    #[must_use]
    pub fn path(x: f64, y: f64, path: VectorPath) -> Self {
        Self::new(
            "Vector",
            ShapeKind::Path(path),
            Point2::new(x, y),
            Vector2::zeros(),
        )
    }

    #[must_use]
    pub fn frame(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self::new(
            "Frame",
            ShapeKind::Frame,
            Point2::new(x, y),
            Vector2::new(width, height),
        )
    }

    #[must_use]
    pub fn text(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self::new(
            "Text",
            ShapeKind::Text,
            Point2::new(x, y),
            Vector2::new(width, height),
        )
    }

    #[must_use]
    pub fn boolean(op: BooleanOp, operands: Vec<NodeId>) -> Self {
        Self::new(
            op.label(),
            ShapeKind::Boolean(BooleanNode {
                op,
                operands,
                tolerance: None,
            }),
            Point2::origin(),
            Vector2::zeros(),
        )
    }

    /// Sets the tolerance of a boolean node. No effect on other kinds.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        if let ShapeKind::Boolean(b) = &mut self.kind {
            b.tolerance = Some(tolerance);
        }
        self
    }

    #[must_use]
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
}
