//! Validation orchestrator.
//!
//! Runs every check against the whole workflow, aggregates diagnostics,
//! and derives remediation suggestions. All checks run to completion;
//! a single pass surfaces the complete diagnostic set, never fail-fast.

pub mod config_rules;
pub mod signature;
pub mod structural;
pub mod type_check;

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::error::{Diagnostic, DiagnosticKind};
use crate::expression::{ExpressionContext, ExpressionEvaluator};
use crate::lattice::KindLattice;
use crate::parse::graph::WorkflowGraph;
use crate::parse::types::Workflow;
use crate::registry::NodeRegistry;

pub use type_check::{EdgeReport, TypeCompatibilityRecord};

#[derive(Debug, Clone)]
pub struct ValidationOptions {
    /// Upper bound on the total cost of a discovered coercion chain.
    pub max_coercion_cost: u32,
    /// Node count past which an advisory warning is emitted.
    pub large_workflow_threshold: usize,
}

impl Default for ValidationOptions {
    fn default() -> Self {
        ValidationOptions {
            max_coercion_cost: 10,
            large_workflow_threshold: 50,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    pub valid: bool,
    pub errors: Vec<Diagnostic>,
    pub warnings: Vec<Diagnostic>,
    pub suggestions: Vec<String>,
    /// Per-edge type records keyed by edge id: a side-table rather than
    /// in-place edge mutation, so concurrent validations of a shared
    /// workflow cannot race on caller-owned edges.
    pub edges: BTreeMap<String, EdgeReport>,
}

impl ValidationReport {
    /// Report for input that never reached validation (JSON parse failure).
    pub fn parse_failure(diagnostic: Diagnostic) -> Self {
        ValidationReport {
            valid: false,
            errors: vec![diagnostic],
            warnings: Vec::new(),
            suggestions: Vec::new(),
            edges: BTreeMap::new(),
        }
    }
}

/// Validate a workflow against its collaborators. The workflow is only
/// borrowed; every finding lands in the returned report.
pub fn validate(
    workflow: &Workflow,
    registry: &dyn NodeRegistry,
    evaluator: &dyn ExpressionEvaluator,
    lattice: &KindLattice,
    options: &ValidationOptions,
) -> ValidationReport {
    let graph = WorkflowGraph::build(workflow);

    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    errors.extend(structural::validate_structural(workflow, &graph));
    errors.extend(signature::validate_signatures(workflow, registry));

    let outcome =
        type_check::validate_edge_types(workflow, registry, lattice, options.max_coercion_cost);
    errors.extend(outcome.errors);
    warnings.extend(outcome.warnings);

    errors.extend(config_rules::validate_configuration(workflow, registry));
    errors.extend(check_conditions(workflow, evaluator));

    warnings.extend(advisory_warnings(workflow, options));

    let suggestions = derive_suggestions(&errors);

    ValidationReport {
        valid: errors.is_empty(),
        errors,
        warnings,
        suggestions,
        edges: outcome.edge_reports,
    }
}

/// Hand every edge condition to the external evaluator. Reported errors
/// and evaluator faults alike become one `dkel` error per edge; faults
/// are captured, never propagated.
fn check_conditions(workflow: &Workflow, evaluator: &dyn ExpressionEvaluator) -> Vec<Diagnostic> {
    let mut errors = Vec::new();
    for edge in &workflow.edges {
        let Some(condition) = &edge.condition else {
            continue;
        };
        let context = ExpressionContext {
            edge_id: edge.id.clone(),
            source_node: edge.source.clone(),
            target_node: edge.target.clone(),
        };
        match evaluator.evaluate(condition, &context) {
            Ok(report) if report.errors.is_empty() => {}
            Ok(report) => {
                errors.push(
                    Diagnostic::dkel(
                        "X001",
                        format!(
                            "Condition on edge '{}' is invalid: {}",
                            edge.id,
                            report.errors.join("; ")
                        ),
                    )
                    .with_edge(&edge.id)
                    .with_details(json!({ "errors": report.errors })),
                );
            }
            Err(e) => {
                errors.push(
                    Diagnostic::dkel(
                        "X002",
                        format!("Condition on edge '{}' could not be evaluated: {}", edge.id, e),
                    )
                    .with_edge(&edge.id),
                );
            }
        }
    }
    errors
}

fn advisory_warnings(workflow: &Workflow, options: &ValidationOptions) -> Vec<Diagnostic> {
    let mut warnings = Vec::new();

    let mut connected: HashSet<&str> = HashSet::new();
    for edge in &workflow.edges {
        connected.insert(edge.source.as_str());
        connected.insert(edge.target.as_str());
    }
    for node in &workflow.nodes {
        if !connected.contains(node.id.as_str()) {
            warnings.push(
                Diagnostic::dag("W001", format!("Node '{}' is not connected to any edge", node.id))
                    .with_node(&node.id),
            );
        }
    }

    if workflow.nodes.len() > options.large_workflow_threshold {
        warnings.push(Diagnostic::dag(
            "W002",
            format!(
                "Workflow has {} nodes, above the advisory threshold of {}",
                workflow.nodes.len(),
                options.large_workflow_threshold
            ),
        ));
    }

    warnings
}

/// At most one suggestion per diagnostic category, in a fixed order.
fn derive_suggestions(errors: &[Diagnostic]) -> Vec<String> {
    let has = |kind: DiagnosticKind| errors.iter().any(|e| e.kind == kind);
    let mut suggestions = Vec::new();
    if has(DiagnosticKind::Dag) {
        suggestions.push("Fix the graph structure: remove cycles and reconnect isolated groups".to_string());
    }
    if has(DiagnosticKind::Configuration) {
        suggestions.push("Review node configurations against their declared schemas".to_string());
    }
    if has(DiagnosticKind::TypeCompatibility) {
        suggestions.push("Insert the suggested adapter nodes to bridge incompatible ports".to_string());
    }
    if has(DiagnosticKind::Dkel) {
        suggestions.push("Correct the edge condition expressions".to_string());
    }
    suggestions
}
