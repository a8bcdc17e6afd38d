//! Parse phase: editor JSON → workflow types + graph construction.

pub mod graph;
pub mod types;

pub use graph::WorkflowGraph;
pub use types::*;

use crate::error::Diagnostic;

/// Deserialize a workflow JSON string into a `Workflow` struct.
pub fn parse(json: &str) -> Result<Workflow, Diagnostic> {
    serde_json::from_str::<Workflow>(json).map_err(|e| {
        Diagnostic::configuration("P001", format!("Failed to parse workflow JSON: {}", e))
    })
}
