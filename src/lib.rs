//! Boolean path operations for a vector design tool.
//!
//! Shapes live in a [`Document`]; a boolean node combines operand nodes with
//! one of four operations and resolves to SVG-style path data.

pub mod document;
pub mod error;
pub mod math;
pub mod operations;

pub use document::{Document, Node, NodeId};
pub use error::{Result, VectisError};
pub use operations::boolean::{
    resolve_boolean_node_path, BooleanOp, BooleanPathResult, MemoryCache, ResolveBooleanPath,
};
