//! Graph-level structural validation rules (S001–S006).

use std::collections::HashSet;

use petgraph::algo::connected_components;
use petgraph::graph::NodeIndex;
use serde_json::json;

use crate::error::Diagnostic;
use crate::parse::graph::WorkflowGraph;
use crate::parse::types::Workflow;

/// Run all structural rules. Every rule runs to completion; nothing
/// short-circuits on earlier findings.
pub fn validate_structural(workflow: &Workflow, graph: &WorkflowGraph) -> Vec<Diagnostic> {
    let mut errors = Vec::new();

    s001_no_duplicate_node_ids(workflow, &mut errors);
    s002_no_duplicate_edge_ids(workflow, &mut errors);
    s003_s004_edges_reference_existing_nodes(workflow, &mut errors);
    s005_first_cycle(workflow, graph, &mut errors);
    s006_single_component(workflow, graph, &mut errors);

    errors
}

fn s001_no_duplicate_node_ids(workflow: &Workflow, errors: &mut Vec<Diagnostic>) {
    let mut seen = HashSet::new();
    for node in &workflow.nodes {
        if !seen.insert(node.id.as_str()) {
            errors.push(
                Diagnostic::dag("S001", format!("Duplicate node id '{}'", node.id))
                    .with_node(&node.id),
            );
        }
    }
}

fn s002_no_duplicate_edge_ids(workflow: &Workflow, errors: &mut Vec<Diagnostic>) {
    let mut seen = HashSet::new();
    for edge in &workflow.edges {
        if !seen.insert(edge.id.as_str()) {
            errors.push(
                Diagnostic::dag("S002", format!("Duplicate edge id '{}'", edge.id))
                    .with_edge(&edge.id),
            );
        }
    }
}

fn s003_s004_edges_reference_existing_nodes(workflow: &Workflow, errors: &mut Vec<Diagnostic>) {
    let node_ids: HashSet<&str> = workflow.nodes.iter().map(|n| n.id.as_str()).collect();
    for edge in &workflow.edges {
        if !node_ids.contains(edge.source.as_str()) {
            errors.push(
                Diagnostic::dag(
                    "S003",
                    format!("Edge '{}' references unknown source node '{}'", edge.id, edge.source),
                )
                .with_edge(&edge.id),
            );
        }
        if !node_ids.contains(edge.target.as_str()) {
            errors.push(
                Diagnostic::dag(
                    "S004",
                    format!("Edge '{}' references unknown target node '{}'", edge.id, edge.target),
                )
                .with_edge(&edge.id),
            );
        }
    }
}

/// Depth-first back-edge detection in node declaration order. Only the
/// first cycle encountered is reported, then detection stops; exhaustive
/// cycle enumeration is deliberately not attempted.
fn s005_first_cycle(workflow: &Workflow, graph: &WorkflowGraph, errors: &mut Vec<Diagnostic>) {
    let mut visited = HashSet::new();
    for node in &workflow.nodes {
        let Some(&idx) = graph.node_indices.get(&node.id) else {
            continue;
        };
        if visited.contains(&idx) {
            continue;
        }
        let mut path = Vec::new();
        let mut on_stack = HashSet::new();
        if let Some(cycle) = dfs_cycle(graph, idx, &mut visited, &mut path, &mut on_stack) {
            errors.push(
                Diagnostic::dag("S005", format!("Workflow contains a cycle: {}", cycle.join(" -> ")))
                    .with_node(cycle[0].clone())
                    .with_details(json!({ "cycle": cycle })),
            );
            return;
        }
    }
}

fn dfs_cycle(
    graph: &WorkflowGraph,
    idx: NodeIndex,
    visited: &mut HashSet<NodeIndex>,
    path: &mut Vec<NodeIndex>,
    on_stack: &mut HashSet<NodeIndex>,
) -> Option<Vec<String>> {
    visited.insert(idx);
    on_stack.insert(idx);
    path.push(idx);

    for next in graph.graph.neighbors(idx) {
        if on_stack.contains(&next) {
            let start = path.iter().position(|&n| n == next).unwrap_or(0);
            let mut cycle: Vec<String> =
                path[start..].iter().map(|&n| graph.graph[n].clone()).collect();
            cycle.push(graph.graph[next].clone());
            return Some(cycle);
        }
        if !visited.contains(&next) {
            if let Some(cycle) = dfs_cycle(graph, next, visited, path, on_stack) {
                return Some(cycle);
            }
        }
    }

    path.pop();
    on_stack.remove(&idx);
    None
}

/// Weakly-connected component count over the undirected view. More than
/// one component yields a single error naming the count, so a workflow
/// with several nodes and no edges is always flagged.
fn s006_single_component(workflow: &Workflow, graph: &WorkflowGraph, errors: &mut Vec<Diagnostic>) {
    if workflow.nodes.len() < 2 {
        return;
    }
    let components = connected_components(&graph.graph);
    if components > 1 {
        errors.push(
            Diagnostic::dag(
                "S006",
                format!("Workflow is split into {} disconnected groups", components),
            )
            .with_details(json!({ "components": components })),
        );
    }
}
