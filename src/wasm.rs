//! WASM entry points for browser use.

use wasm_bindgen::prelude::*;

use crate::error::Diagnostic;
use crate::expression::NullEvaluator;
use crate::lattice::KindLattice;
use crate::registry::{InMemoryRegistry, NodeSignature, ResourceConflict};
use crate::validate::{self, ValidationOptions, ValidationReport};

/// Validate a workflow JSON against a signature catalog JSON.
/// Returns the serialized `ValidationReport`.
#[wasm_bindgen]
pub fn validate_workflow(workflow_json: &str, catalog_json: &str, max_coercion_cost: u32) -> JsValue {
    let report = validate_workflow_inner(workflow_json, catalog_json, max_coercion_cost);
    serde_wasm_bindgen::to_value(&report).unwrap_or(JsValue::NULL)
}

fn validate_workflow_inner(
    workflow_json: &str,
    catalog_json: &str,
    max_coercion_cost: u32,
) -> ValidationReport {
    let workflow = match crate::parse::parse(workflow_json) {
        Ok(workflow) => workflow,
        Err(diagnostic) => return ValidationReport::parse_failure(diagnostic),
    };
    let registry = match parse_catalog(catalog_json) {
        Ok(registry) => registry,
        Err(diagnostic) => return ValidationReport::parse_failure(diagnostic),
    };

    let lattice = KindLattice::standard();
    let options = ValidationOptions {
        max_coercion_cost,
        ..ValidationOptions::default()
    };
    // The browser host owns the expression language; its findings arrive
    // by a different path than this report.
    validate::validate(&workflow, &registry, &NullEvaluator, &lattice, &options)
}

/// Validate a single node JSON against a signature catalog JSON.
/// Returns a JSON array of Diagnostic objects, used for live per-node
/// feedback while editing.
#[wasm_bindgen]
pub fn validate_node(node_json: &str, catalog_json: &str) -> JsValue {
    let diagnostics = validate_node_inner(node_json, catalog_json);
    serde_wasm_bindgen::to_value(&diagnostics).unwrap_or(JsValue::NULL)
}

fn validate_node_inner(node_json: &str, catalog_json: &str) -> Vec<Diagnostic> {
    let node = match serde_json::from_str::<crate::parse::types::WorkflowNode>(node_json) {
        Ok(node) => node,
        Err(e) => {
            return vec![Diagnostic::configuration(
                "P001",
                format!("Failed to parse node JSON: {}", e),
            )];
        }
    };
    let registry = match parse_catalog(catalog_json) {
        Ok(registry) => registry,
        Err(diagnostic) => return vec![diagnostic],
    };

    let mut errors = Vec::new();
    validate::signature::validate_node_signature(&node, &registry, &mut errors);
    validate::config_rules::validate_node_config(&node, &registry, &mut errors);
    errors
}

// ---------------------------------------------------------------------------
// Catalog DTO
// ---------------------------------------------------------------------------

#[derive(serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct CatalogDto {
    signatures: Vec<NodeSignature>,
    #[serde(default)]
    resource_conflicts: Vec<ResourceConflict>,
}

fn parse_catalog(json: &str) -> Result<InMemoryRegistry, Diagnostic> {
    let dto: CatalogDto = serde_json::from_str(json).map_err(|e| {
        Diagnostic::configuration("P001", format!("Failed to parse signature catalog JSON: {}", e))
    })?;

    let mut registry = InMemoryRegistry::new();
    for signature in dto.signatures {
        registry.register(signature);
    }
    for conflict in dto.resource_conflicts {
        registry.declare_resource_conflict(&conflict.type_a, &conflict.type_b, &conflict.resource);
    }
    Ok(registry)
}
