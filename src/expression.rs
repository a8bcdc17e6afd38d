//! Expression evaluator collaborator boundary.
//!
//! Edge conditions are opaque strings in an external expression
//! language; this crate only asks the evaluator whether they are well
//! formed. Evaluator faults are converted to diagnostics at the call
//! site and never propagated out of a validation pass.

use serde::{Deserialize, Serialize};

/// Bindings visible to an edge condition.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpressionContext {
    pub edge_id: String,
    pub source_node: String,
    pub target_node: String,
}

/// Evaluation findings. An empty error list means the expression is fine.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EvalReport {
    pub errors: Vec<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum ExpressionError {
    #[error("{0}")]
    Failed(String),
}

pub trait ExpressionEvaluator {
    fn evaluate(
        &self,
        expression: &str,
        context: &ExpressionContext,
    ) -> Result<EvalReport, ExpressionError>;
}

/// Evaluator that accepts every expression. Used where the embedding
/// host owns the expression language, e.g. the WASM surface.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullEvaluator;

impl ExpressionEvaluator for NullEvaluator {
    fn evaluate(
        &self,
        _expression: &str,
        _context: &ExpressionContext,
    ) -> Result<EvalReport, ExpressionError> {
        Ok(EvalReport::default())
    }
}
