//! Schema-driven configuration checks and required input bindings
//! (C001–C004).

use serde_json::Value;

use crate::error::Diagnostic;
use crate::parse::types::{Workflow, WorkflowNode};
use crate::registry::{ConfigSchema, NodeRegistry, NodeSignature, PropertyType};

pub fn validate_configuration(workflow: &Workflow, registry: &dyn NodeRegistry) -> Vec<Diagnostic> {
    let mut errors = Vec::new();
    for node in &workflow.nodes {
        validate_node_config(node, registry, &mut errors);
    }
    errors
}

/// Config and binding checks for a single node. Unknown types are the
/// signature check's finding; here they just mean nothing to check.
pub fn validate_node_config(
    node: &WorkflowNode,
    registry: &dyn NodeRegistry,
    errors: &mut Vec<Diagnostic>,
) {
    let Ok(Some(signature)) = registry.get_signature(&node.node_type) else {
        return;
    };
    if let Some(schema) = &signature.config_schema {
        check_config_values(node, schema, errors);
    }
    check_required_bindings(node, &signature, errors);
}

/// Keys present in both the node's config and the schema's property map
/// are checked for declared type and, for numbers, declared bounds.
/// Each violated constraint is its own error.
fn check_config_values(node: &WorkflowNode, schema: &ConfigSchema, errors: &mut Vec<Diagnostic>) {
    for (key, value) in &node.config {
        let Some(property) = schema.properties.get(key) else {
            continue;
        };
        match property.property_type {
            PropertyType::String => {
                if !value.is_string() {
                    errors.push(type_mismatch(node, key, "string", value));
                }
            }
            PropertyType::Boolean => {
                if !value.is_boolean() {
                    errors.push(type_mismatch(node, key, "boolean", value));
                }
            }
            PropertyType::Number => match value.as_f64() {
                None => errors.push(type_mismatch(node, key, "number", value)),
                Some(number) => {
                    if let Some(minimum) = property.minimum {
                        if number < minimum {
                            errors.push(
                                Diagnostic::configuration(
                                    "C002",
                                    format!(
                                        "Config key '{}' on node '{}' is {} but must be at least {}",
                                        key, node.id, number, minimum
                                    ),
                                )
                                .with_node(&node.id),
                            );
                        }
                    }
                    if let Some(maximum) = property.maximum {
                        if number > maximum {
                            errors.push(
                                Diagnostic::configuration(
                                    "C003",
                                    format!(
                                        "Config key '{}' on node '{}' is {} but must be at most {}",
                                        key, node.id, number, maximum
                                    ),
                                )
                                .with_node(&node.id),
                            );
                        }
                    }
                }
            },
        }
    }
}

fn check_required_bindings(
    node: &WorkflowNode,
    signature: &NodeSignature,
    errors: &mut Vec<Diagnostic>,
) {
    for (index, spec) in signature.inputs.iter().enumerate() {
        if !spec.required {
            continue;
        }
        // A short port list is a count mismatch, reported elsewhere.
        let Some(port_id) = node.inputs.get(index) else {
            continue;
        };
        if !node.input_bindings.contains_key(port_id) {
            errors.push(
                Diagnostic::configuration(
                    "C004",
                    format!("Required input '{}' on node '{}' has no binding", port_id, node.id),
                )
                .with_node(&node.id),
            );
        }
    }
}

fn type_mismatch(node: &WorkflowNode, key: &str, expected: &str, value: &Value) -> Diagnostic {
    Diagnostic::configuration(
        "C001",
        format!(
            "Config key '{}' on node '{}' must be a {}, got {}",
            key,
            node.id,
            expected,
            value_type_name(value)
        ),
    )
    .with_node(&node.id)
}

fn value_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
