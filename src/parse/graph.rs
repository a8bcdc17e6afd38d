//! petgraph-based directed graph wrapper for the visual workflow.

use std::collections::HashMap;

use petgraph::graph::{DiGraph, NodeIndex};

use super::types::Workflow;

/// Node weights are node ids, edge weights are edge ids.
pub struct WorkflowGraph {
    pub graph: DiGraph<String, String>,
    pub node_indices: HashMap<String, NodeIndex>,
}

impl WorkflowGraph {
    /// Build the directed graph. Edges referencing unknown nodes are
    /// skipped here; the structural validator reports them.
    pub fn build(workflow: &Workflow) -> Self {
        let mut graph = DiGraph::new();
        let mut node_indices = HashMap::new();

        for node in &workflow.nodes {
            let idx = graph.add_node(node.id.clone());
            node_indices.insert(node.id.clone(), idx);
        }

        for edge in &workflow.edges {
            if let (Some(&s), Some(&t)) = (
                node_indices.get(&edge.source),
                node_indices.get(&edge.target),
            ) {
                graph.add_edge(s, t, edge.id.clone());
            }
        }

        WorkflowGraph { graph, node_indices }
    }
}
