//! Rust types mirroring the editor's workflow JSON.
//!
//! These types are the serde target for the canvas frontend. The
//! validator borrows a `Workflow` for one pass and never mutates it;
//! per-edge findings are returned in the report's side-table instead.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Workflow {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub version: String,
    pub nodes: Vec<WorkflowNode>,
    pub edges: Vec<WorkflowEdge>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowNode {
    pub id: String,
    /// Type tag resolved against the node registry's signatures.
    #[serde(rename = "type")]
    pub node_type: String,
    pub position: Position,
    /// Ordered input port ids; length must match the signature.
    #[serde(default)]
    pub inputs: Vec<String>,
    /// Ordered output port ids; length must match the signature.
    #[serde(default)]
    pub outputs: Vec<String>,
    #[serde(default)]
    pub config: BTreeMap<String, serde_json::Value>,
    /// Input port id -> bound value source.
    #[serde(default)]
    pub input_bindings: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowEdge {
    pub id: String,
    pub source: String,
    pub target: String,
    /// Defaults to the node's sole output port when omitted.
    #[serde(default)]
    pub source_port: Option<String>,
    /// Defaults to the node's sole input port when omitted.
    #[serde(default)]
    pub target_port: Option<String>,
    /// Opaque condition expression, handed to the expression evaluator.
    #[serde(default)]
    pub condition: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}
