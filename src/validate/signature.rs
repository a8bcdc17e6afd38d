//! Node signature and pairwise capability validation (G001–G006).
//!
//! Everything here reads from the external node registry; registry
//! faults are converted to scoped diagnostics so a single bad lookup
//! never aborts the pass.

use serde_json::json;

use crate::error::Diagnostic;
use crate::parse::types::{Workflow, WorkflowNode};
use crate::registry::NodeRegistry;

pub fn validate_signatures(workflow: &Workflow, registry: &dyn NodeRegistry) -> Vec<Diagnostic> {
    let mut errors = Vec::new();
    for node in &workflow.nodes {
        validate_node_signature(node, registry, &mut errors);
    }
    pairwise_capability_conflicts(workflow, registry, &mut errors);
    errors
}

/// Signature lookup and shape checks for a single node. An unknown type
/// short-circuits the remaining checks for that node only, since they
/// all need the signature.
pub fn validate_node_signature(
    node: &WorkflowNode,
    registry: &dyn NodeRegistry,
    errors: &mut Vec<Diagnostic>,
) {
    let signature = match registry.get_signature(&node.node_type) {
        Ok(Some(signature)) => signature,
        Ok(None) => {
            errors.push(
                Diagnostic::configuration("G001", format!("Unknown node type '{}'", node.node_type))
                    .with_node(&node.id),
            );
            return;
        }
        Err(e) => {
            errors.push(
                Diagnostic::configuration(
                    "G006",
                    format!("Registry lookup for '{}' failed: {}", node.node_type, e),
                )
                .with_node(&node.id),
            );
            return;
        }
    };

    match registry.validate_signature_shape(&signature) {
        Ok(report) => {
            for message in report.errors {
                errors.push(
                    Diagnostic::configuration(
                        "G002",
                        format!("Signature for '{}' is malformed: {}", node.node_type, message),
                    )
                    .with_node(&node.id),
                );
            }
        }
        Err(e) => {
            errors.push(
                Diagnostic::configuration(
                    "G006",
                    format!("Signature shape check for '{}' failed: {}", node.node_type, e),
                )
                .with_node(&node.id),
            );
        }
    }

    if node.inputs.len() != signature.inputs.len() {
        errors.push(
            Diagnostic::configuration(
                "G003",
                format!(
                    "Node has {} input ports but signature '{}' declares {}",
                    node.inputs.len(),
                    node.node_type,
                    signature.inputs.len()
                ),
            )
            .with_node(&node.id),
        );
    }
    if node.outputs.len() != signature.outputs.len() {
        errors.push(
            Diagnostic::configuration(
                "G004",
                format!(
                    "Node has {} output ports but signature '{}' declares {}",
                    node.outputs.len(),
                    node.node_type,
                    signature.outputs.len()
                ),
            )
            .with_node(&node.id),
        );
    }
}

/// Every unordered node pair is queried, O(n^2) in node count, which is
/// fine at editor scale. Only resource conflicts become errors: generic
/// incompatibilities do not prevent safe concurrent execution.
fn pairwise_capability_conflicts(
    workflow: &Workflow,
    registry: &dyn NodeRegistry,
    errors: &mut Vec<Diagnostic>,
) {
    for (i, a) in workflow.nodes.iter().enumerate() {
        for b in workflow.nodes.iter().skip(i + 1) {
            match registry.check_pairwise_compatibility(&a.node_type, &b.node_type) {
                Ok(result) => {
                    for resource in result.resource_conflicts {
                        errors.push(
                            Diagnostic::configuration(
                                "G005",
                                format!(
                                    "Nodes '{}' and '{}' contend for the same resource: {}",
                                    a.id, b.id, resource
                                ),
                            )
                            .with_node(&a.id)
                            .with_details(json!({
                                "nodes": [a.id.as_str(), b.id.as_str()],
                                "resource": resource.as_str(),
                            })),
                        );
                    }
                }
                Err(e) => {
                    errors.push(Diagnostic::configuration(
                        "G006",
                        format!(
                            "Capability query for '{}' and '{}' failed: {}",
                            a.node_type, b.node_type, e
                        ),
                    ));
                }
            }
        }
    }
}
