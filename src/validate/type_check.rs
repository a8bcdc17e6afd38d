//! Per-edge port type compatibility, coercion chains, and adapter
//! suggestions (T001–T004).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::adapters::{plan_adapters, AdapterInsertion};
use crate::error::Diagnostic;
use crate::lattice::search::find_chain;
use crate::lattice::{Coercion, DataKind, KindLattice};
use crate::parse::types::{Workflow, WorkflowNode};
use crate::registry::{NodeRegistry, NodeSignature, PortSpec};

/// The per-edge record the editor renders on the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeCompatibilityRecord {
    pub source_kind: DataKind,
    pub target_kind: DataKind,
    pub compatible: bool,
    pub subtyping: bool,
    pub coercion_chain: Vec<Coercion>,
    pub total_cost: u32,
    pub max_cost_bound: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EdgeReport {
    pub type_compatibility: TypeCompatibilityRecord,
    pub adapters: Vec<AdapterInsertion>,
}

pub struct TypeCheckOutcome {
    pub errors: Vec<Diagnostic>,
    pub warnings: Vec<Diagnostic>,
    pub edge_reports: BTreeMap<String, EdgeReport>,
}

pub fn validate_edge_types(
    workflow: &Workflow,
    registry: &dyn NodeRegistry,
    lattice: &KindLattice,
    max_cost: u32,
) -> TypeCheckOutcome {
    let mut outcome = TypeCheckOutcome {
        errors: Vec::new(),
        warnings: Vec::new(),
        edge_reports: BTreeMap::new(),
    };

    for edge in &workflow.edges {
        // Dangling endpoints and unknown node types are someone else's
        // finding; this check skips edges it cannot resolve.
        let Some(source_node) = workflow.nodes.iter().find(|n| n.id == edge.source) else {
            continue;
        };
        let Some(target_node) = workflow.nodes.iter().find(|n| n.id == edge.target) else {
            continue;
        };
        let Ok(Some(source_signature)) = registry.get_signature(&source_node.node_type) else {
            continue;
        };
        let Ok(Some(target_signature)) = registry.get_signature(&target_node.node_type) else {
            continue;
        };

        let source_spec = match resolve_port(
            source_node,
            &source_signature,
            edge.source_port.as_ref(),
            Side::Output,
        ) {
            PortLookup::Found(spec) => spec,
            PortLookup::Unknown(message) => {
                outcome
                    .errors
                    .push(Diagnostic::type_compatibility("T001", message).with_edge(&edge.id));
                continue;
            }
            PortLookup::Unresolved => continue,
        };
        let target_spec = match resolve_port(
            target_node,
            &target_signature,
            edge.target_port.as_ref(),
            Side::Input,
        ) {
            PortLookup::Found(spec) => spec,
            PortLookup::Unknown(message) => {
                outcome
                    .errors
                    .push(Diagnostic::type_compatibility("T001", message).with_edge(&edge.id));
                continue;
            }
            PortLookup::Unresolved => continue,
        };

        let compatibility = lattice.check_port_compatibility(source_spec, target_spec);

        // Facets are checked independently of kinds; a mismatch warns and
        // makes the edge incompatible, but never hides a kind mismatch.
        if let Some(violation) = &compatibility.facet_violation {
            let actual = violation.actual.as_deref().unwrap_or("nothing");
            outcome.warnings.push(
                Diagnostic::type_compatibility(
                    "T004",
                    format!(
                        "Edge '{}' fails facet '{}': target requires '{}', source provides {}",
                        edge.id, violation.facet, violation.expected, actual
                    ),
                )
                .with_edge(&edge.id)
                .with_details(json!({
                    "facet": violation.facet,
                    "expected": violation.expected,
                    "actual": violation.actual,
                })),
            );
        }

        if compatibility.subtyping {
            // A coercion cannot repair a facet mismatch, so no chain is
            // searched for when only the facets failed.
            outcome.edge_reports.insert(
                edge.id.clone(),
                EdgeReport {
                    type_compatibility: TypeCompatibilityRecord {
                        source_kind: source_spec.kind,
                        target_kind: target_spec.kind,
                        compatible: compatibility.compatible,
                        subtyping: true,
                        coercion_chain: Vec::new(),
                        total_cost: 0,
                        max_cost_bound: max_cost,
                    },
                    adapters: Vec::new(),
                },
            );
            continue;
        }

        // Kinds are unrelated; look for a conversion path. A resolvable
        // mismatch is still an error: bridging it takes an explicit,
        // externally applied adapter insertion.
        let chain = find_chain(lattice, source_spec.kind, target_spec.kind, max_cost);
        if chain.found {
            let adapter_ids: Vec<&str> = chain.steps.iter().map(|s| s.adapter.as_str()).collect();
            let loss = if chain.safe { "" } else { "; the conversion is lossy" };
            outcome.errors.push(
                Diagnostic::type_compatibility(
                    "T002",
                    format!(
                        "Edge '{}' connects {} to {}; a {}-step conversion is available at cost {}{}",
                        edge.id,
                        source_spec.kind,
                        target_spec.kind,
                        chain.steps.len(),
                        chain.total_cost,
                        loss
                    ),
                )
                .with_edge(&edge.id)
                .with_details(json!({
                    "adapterChain": adapter_ids,
                    "totalCost": chain.total_cost,
                    "safe": chain.safe,
                })),
            );
            let adapters = plan_adapters(
                &edge.id,
                source_node.position,
                target_node.position,
                &chain.steps,
            );
            outcome.edge_reports.insert(
                edge.id.clone(),
                EdgeReport {
                    type_compatibility: TypeCompatibilityRecord {
                        source_kind: source_spec.kind,
                        target_kind: target_spec.kind,
                        compatible: false,
                        subtyping: false,
                        coercion_chain: chain.steps,
                        total_cost: chain.total_cost,
                        max_cost_bound: max_cost,
                    },
                    adapters,
                },
            );
        } else {
            outcome.errors.push(
                Diagnostic::type_compatibility(
                    "T003",
                    format!(
                        "Edge '{}' connects {} to {} and no conversion exists within cost bound {}",
                        edge.id, source_spec.kind, target_spec.kind, max_cost
                    ),
                )
                .with_edge(&edge.id),
            );
            outcome.edge_reports.insert(
                edge.id.clone(),
                EdgeReport {
                    type_compatibility: TypeCompatibilityRecord {
                        source_kind: source_spec.kind,
                        target_kind: target_spec.kind,
                        compatible: false,
                        subtyping: false,
                        coercion_chain: Vec::new(),
                        total_cost: 0,
                        max_cost_bound: max_cost,
                    },
                    adapters: Vec::new(),
                },
            );
        }
    }

    outcome
}

#[derive(Clone, Copy)]
enum Side {
    Input,
    Output,
}

impl Side {
    fn name(self) -> &'static str {
        match self {
            Side::Input => "input",
            Side::Output => "output",
        }
    }
}

enum PortLookup<'a> {
    Found(&'a PortSpec),
    /// The edge names a port the node does not have, or omits the port
    /// id on a node where the sole-port default does not apply.
    Unknown(String),
    /// Index valid on the node but not on the signature; the port count
    /// mismatch is already reported by the signature check.
    Unresolved,
}

fn resolve_port<'a>(
    node: &WorkflowNode,
    signature: &'a NodeSignature,
    port: Option<&String>,
    side: Side,
) -> PortLookup<'a> {
    let (ids, specs) = match side {
        Side::Input => (&node.inputs, &signature.inputs),
        Side::Output => (&node.outputs, &signature.outputs),
    };

    let index = match port {
        Some(port_id) => match ids.iter().position(|id| id == port_id) {
            Some(index) => index,
            None => {
                return PortLookup::Unknown(format!(
                    "Node '{}' has no {} port '{}'",
                    node.id,
                    side.name(),
                    port_id
                ));
            }
        },
        None if ids.len() == 1 => 0,
        None => {
            return PortLookup::Unknown(format!(
                "Edge names no {} port, and node '{}' has {} of them",
                side.name(),
                node.id,
                ids.len()
            ));
        }
    };

    match specs.get(index) {
        Some(spec) => PortLookup::Found(spec),
        None => PortLookup::Unresolved,
    }
}
