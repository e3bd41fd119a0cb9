use std::sync::Arc;

use tracing::debug;

use crate::document::{Document, NodeId, ShapeKind};
use crate::error::{BooleanError, DocumentError};

use super::assemble::{assemble_result, BooleanPathResult};
use super::cache::{signature, ResultCache, SignatureOperand};
use super::engine::Solver;
use super::extract::{ExtractOperand, ExtractionParams};
use super::operand::{RawOperand, Tolerance};
use super::preflight::Preflight;

/// Resolves a boolean node into path data.
///
/// Each operand is extracted in world space, the evaluation signature is
/// looked up in the cache, and on a miss the operands go through preflight,
/// the engine chain and assembly. Successes and failures are both cached.
///
/// Never panics and never returns an error: every failure is reported as a
/// [`BooleanPathResult::Invalid`].
pub struct ResolveBooleanPath {
    node: NodeId,
    params: ExtractionParams,
    solver: Solver,
}

impl ResolveBooleanPath {
    /// Creates a new `ResolveBooleanPath` operation with the default engine
    /// chain and extraction parameters.
    #[must_use]
    pub fn new(node: NodeId) -> Self {
        Self {
            node,
            params: ExtractionParams::default(),
            solver: Solver::default(),
        }
    }

    #[must_use]
    pub fn with_solver(mut self, solver: Solver) -> Self {
        self.solver = solver;
        self
    }

    #[must_use]
    pub fn with_params(mut self, params: ExtractionParams) -> Self {
        self.params = params;
        self
    }

    /// Executes the resolution against `doc`, reading and filling `cache`.
    pub fn execute<C>(&self, doc: &Document, cache: &mut C) -> Arc<BooleanPathResult>
    where
        C: ResultCache + ?Sized,
    {
        let boolean = match doc.node(self.node).map(|n| &n.kind) {
            Ok(ShapeKind::Boolean(boolean)) => boolean,
            Ok(_) => {
                return invalid(
                    BooleanError::degenerate(DocumentError::NotABooleanNode(self.node).to_string())
                        .with_operand(self.node),
                );
            }
            Err(err) => return invalid(BooleanError::degenerate(err.to_string())),
        };

        let tolerance = Tolerance::resolve(boolean.tolerance);
        let extracted: Vec<Option<RawOperand>> = boolean
            .operands
            .iter()
            .map(|&id| self.extract(doc, id, tolerance))
            .collect();

        let sig_operands: Vec<SignatureOperand<'_>> = boolean
            .operands
            .iter()
            .zip(&extracted)
            .map(|(&id, raw)| match raw {
                Some(raw) => SignatureOperand::Extracted(raw),
                None => SignatureOperand::Missing(id),
            })
            .collect();
        let sig = signature(boolean.op, tolerance, &sig_operands);

        if let Some(hit) = cache.get(self.node, &sig) {
            debug!(node = ?self.node, op = boolean.op.as_str(), "boolean cache hit");
            return hit;
        }

        let outcome = boolean
            .operands
            .iter()
            .zip(extracted)
            .map(|(&id, raw)| {
                raw.ok_or_else(|| {
                    BooleanError::degenerate("operand is missing or has no usable geometry")
                        .with_operand(id)
                })
            })
            .collect::<Result<Vec<_>, _>>()
            .and_then(|raws| Preflight::new(tolerance).execute(&raws))
            .and_then(|prepared| self.solver.solve(boolean.op, &prepared, tolerance))
            .and_then(|output| assemble_result(&output));

        if let Err(err) = &outcome {
            debug!(node = ?self.node, op = boolean.op.as_str(), code = %err.code, "boolean evaluation failed");
        }

        let result = Arc::new(BooleanPathResult::from(outcome));
        cache.insert(self.node, sig, Arc::clone(&result));
        result
    }

    fn extract(&self, doc: &Document, id: NodeId, tolerance: Tolerance) -> Option<RawOperand> {
        let extracted = doc.world_offset(id).map_err(Into::into).and_then(|offset| {
            ExtractOperand::new(id)
                .with_params(self.params)
                .with_tolerance(tolerance)
                .with_offset(offset)
                .execute(doc)
        });
        match extracted {
            Ok(raw) => Some(raw),
            Err(err) => {
                debug!(operand = ?id, error = %err, "operand extraction failed");
                None
            }
        }
    }
}

fn invalid(err: BooleanError) -> Arc<BooleanPathResult> {
    Arc::new(BooleanPathResult::Invalid(err.into()))
}

/// Resolves `node` with the default engine chain and extraction parameters.
pub fn resolve_boolean_node_path<C>(
    doc: &Document,
    node: NodeId,
    cache: &mut C,
) -> Arc<BooleanPathResult>
where
    C: ResultCache + ?Sized,
{
    ResolveBooleanPath::new(node).execute(doc, cache)
}
