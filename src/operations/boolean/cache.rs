use std::collections::HashMap;
use std::fmt::Write as _;
use std::sync::Arc;

use slotmap::Key;

use crate::document::NodeId;

use super::assemble::BooleanPathResult;
use super::operand::{RawOperand, Tolerance};
use super::select::BooleanOp;

/// Storage for resolved boolean results, keyed by boolean node and signature.
///
/// Eviction is up to the implementation; the resolver only reads and writes.
pub trait ResultCache {
    /// Returns the stored result for `node` computed under `signature`.
    fn get(&self, node: NodeId, signature: &str) -> Option<Arc<BooleanPathResult>>;

    /// Stores a result for `node` under `signature`.
    fn insert(&mut self, node: NodeId, signature: String, result: Arc<BooleanPathResult>);
}

/// Unbounded in-memory [`ResultCache`].
///
/// Keeps only the latest signature per node, since an older signature can
/// only match again if the user restores the exact previous geometry.
#[derive(Debug, Default)]
pub struct MemoryCache {
    entries: HashMap<NodeId, (String, Arc<BooleanPathResult>)>,
}

impl MemoryCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl ResultCache for MemoryCache {
    fn get(&self, node: NodeId, signature: &str) -> Option<Arc<BooleanPathResult>> {
        self.entries
            .get(&node)
            .filter(|(sig, _)| sig == signature)
            .map(|(_, result)| Arc::clone(result))
    }

    fn insert(&mut self, node: NodeId, signature: String, result: Arc<BooleanPathResult>) {
        self.entries.insert(node, (signature, result));
    }
}

/// Operand input to a signature: extracted geometry, or a marker that the
/// operand could not be extracted.
#[derive(Debug, Clone, Copy)]
pub enum SignatureOperand<'a> {
    Extracted(&'a RawOperand),
    Missing(NodeId),
}

/// Builds the canonical cache signature of a boolean evaluation.
///
/// Covers the operation, the tolerance and every operand's id and extracted
/// coordinates, so any input change that can alter the result changes the
/// signature.
#[must_use]
pub fn signature(
    op: BooleanOp,
    tolerance: Tolerance,
    operands: &[SignatureOperand<'_>],
) -> String {
    let mut sig = String::new();
    let _ = write!(sig, "{}|{:.6}", op.as_str(), tolerance.value());
    for operand in operands {
        match operand {
            SignatureOperand::Extracted(raw) => {
                let _ = write!(sig, "|{}:", raw.id.data().as_ffi());
                for ring in &raw.rings {
                    sig.push('[');
                    for p in ring {
                        let _ = write!(sig, "{:.6},{:.6};", p.x, p.y);
                    }
                    sig.push(']');
                }
            }
            SignatureOperand::Missing(id) => {
                let _ = write!(sig, "|{}:missing", id.data().as_ffi());
            }
        }
    }
    sig
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use slotmap::SlotMap;

    use super::*;
    use crate::error::BooleanError;
    use crate::math::Point2;
    use crate::operations::boolean::BooleanPath;

    fn ids(n: usize) -> Vec<NodeId> {
        let mut map: SlotMap<NodeId, ()> = SlotMap::with_key();
        (0..n).map(|_| map.insert(())).collect()
    }

    fn raw(id: NodeId, x: f64) -> RawOperand {
        RawOperand {
            id,
            rings: vec![vec![
                Point2::new(x, 0.0),
                Point2::new(x + 1.0, 0.0),
                Point2::new(x + 1.0, 1.0),
            ]],
        }
    }

    #[test]
    fn signature_is_stable() {
        let ids = ids(2);
        let (a, b) = (raw(ids[0], 0.0), raw(ids[1], 5.0));
        let ops = [SignatureOperand::Extracted(&a), SignatureOperand::Extracted(&b)];
        let s1 = signature(BooleanOp::Union, Tolerance::default(), &ops);
        let s2 = signature(BooleanOp::Union, Tolerance::default(), &ops);
        assert_eq!(s1, s2);
        assert!(s1.starts_with("union|0.001000|"));
    }

    #[test]
    fn signature_tracks_every_input() {
        let ids = ids(2);
        let (a, b) = (raw(ids[0], 0.0), raw(ids[1], 5.0));
        let moved = raw(ids[1], 5.5);
        let base = signature(
            BooleanOp::Union,
            Tolerance::default(),
            &[SignatureOperand::Extracted(&a), SignatureOperand::Extracted(&b)],
        );
        let other_op = signature(
            BooleanOp::Exclude,
            Tolerance::default(),
            &[SignatureOperand::Extracted(&a), SignatureOperand::Extracted(&b)],
        );
        let other_tol = signature(
            BooleanOp::Union,
            Tolerance::resolve(Some(0.01)),
            &[SignatureOperand::Extracted(&a), SignatureOperand::Extracted(&b)],
        );
        let other_geom = signature(
            BooleanOp::Union,
            Tolerance::default(),
            &[SignatureOperand::Extracted(&a), SignatureOperand::Extracted(&moved)],
        );
        let missing = signature(
            BooleanOp::Union,
            Tolerance::default(),
            &[SignatureOperand::Extracted(&a), SignatureOperand::Missing(ids[1])],
        );
        for sig in [&other_op, &other_tol, &other_geom, &missing] {
            assert_ne!(&base, sig);
        }
    }

    #[test]
    fn memory_cache_matches_on_signature() {
        let node = ids(1)[0];
        let mut cache = MemoryCache::new();
        let result = Arc::new(BooleanPathResult::from(Err::<BooleanPath, _>(
            BooleanError::degenerate("nothing"),
        )));
        cache.insert(node, "sig-a".into(), Arc::clone(&result));
        assert!(Arc::ptr_eq(&cache.get(node, "sig-a").unwrap(), &result));
        assert!(cache.get(node, "sig-b").is_none());

        cache.insert(node, "sig-b".into(), Arc::clone(&result));
        assert!(cache.get(node, "sig-a").is_none());
        assert_eq!(cache.len(), 1);
    }
}
