//! Boolean path resolution.
//!
//! A boolean node is resolved in stages: operand extraction, preflight
//! normalization, an ordered engine chain, and assembly into path data.
//! Results are cached per node under a signature of every input.

mod assemble;
mod cache;
mod clip;
mod engine;
mod extract;
mod operand;
mod preflight;
mod resolve;
mod select;

pub use assemble::{assemble_result, path_data, BooleanFailure, BooleanPath, BooleanPathResult, Bounds};
pub use cache::{signature, MemoryCache, ResultCache, SignatureOperand};
pub use clip::clip_convex;
pub use engine::{
    ring_order, sort_rings, BooleanEngine, EngineKind, EngineOutput, EngineResult, NativeEngine,
    PortableEngine, Solver,
};
pub use extract::{ExtractOperand, ExtractionParams};
pub use operand::{PolygonRing, PreparedOperand, RawOperand, Tolerance};
pub use preflight::{has_self_intersection, Preflight, RingRejection};
pub use resolve::{resolve_boolean_node_path, ResolveBooleanPath};
pub use select::{BooleanOp, FillRule};
