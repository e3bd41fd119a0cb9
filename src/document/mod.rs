pub mod node;
pub mod vector_path;

pub use node::{BooleanNode, Node, NodeId, ShapeKind};
pub use vector_path::{VectorPath, VectorSegment, VectorVertex};

use crate::error::DocumentError;
use crate::math::Vector2;
use slotmap::SlotMap;

/// Arena owning every node of a design document.
///
/// Nodes reference each other via typed IDs (generational indices), so a
/// removed operand is reported as missing rather than dangling.
#[derive(Debug, Default)]
pub struct Document {
    nodes: SlotMap<NodeId, Node>,
}

impl Document {
    /// Creates a new, empty document.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a top-level node and returns its ID.
    pub fn add_node(&mut self, node: Node) -> NodeId {
        self.nodes.insert(node)
    }

    /// Inserts a node under `parent` and returns its ID.
    ///
    /// # Errors
    ///
    /// Returns an error if `parent` is not in the document.
    pub fn add_child(&mut self, parent: NodeId, mut node: Node) -> Result<NodeId, DocumentError> {
        if !self.nodes.contains_key(parent) {
            return Err(DocumentError::NodeNotFound(parent));
        }
        node.parent = Some(parent);
        Ok(self.nodes.insert(node))
    }

    /// Removes a node, returning it if it existed. Children are left in place.
    pub fn remove_node(&mut self, id: NodeId) -> Option<Node> {
        self.nodes.remove(id)
    }

    /// Returns a reference to the node, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the node is not in the document.
    pub fn node(&self, id: NodeId) -> Result<&Node, DocumentError> {
        self.nodes.get(id).ok_or(DocumentError::NodeNotFound(id))
    }

    /// Returns a mutable reference to the node, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the node is not in the document.
    pub fn node_mut(&mut self, id: NodeId) -> Result<&mut Node, DocumentError> {
        self.nodes.get_mut(id).ok_or(DocumentError::NodeNotFound(id))
    }

    /// Sum of the positions of every ancestor of `id`, excluding `id` itself.
    ///
    /// Adding a node's own position to this yields its world position. The
    /// walk stops at a missing parent and is bounded by the node count, so a
    /// corrupt parent cycle cannot loop forever.
    ///
    /// # Errors
    ///
    /// Returns an error if `id` is not in the document.
    pub fn world_offset(&self, id: NodeId) -> Result<Vector2, DocumentError> {
        let mut offset = Vector2::zeros();
        let mut current = self.node(id)?.parent;
        let mut steps = 0;
        while let Some(parent_id) = current {
            if steps >= self.nodes.len() {
                break;
            }
            let Some(parent) = self.nodes.get(parent_id) else {
                break;
            };
            offset += parent.position.coords;
            current = parent.parent;
            steps += 1;
        }
        Ok(offset)
    }

    /// Number of nodes in the document.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
