#![allow(dead_code)]

use std::collections::BTreeMap;

use flow_validator::lattice::{DataKind, Facets};
use flow_validator::parse::types::{Position, Workflow, WorkflowEdge, WorkflowNode};
use flow_validator::registry::{
    ConfigSchema, InMemoryRegistry, NodeSignature, PortSpec, PropertySchema, PropertyType,
};

// =============================================================================
// Workflow builders
// =============================================================================

pub fn workflow(nodes: Vec<WorkflowNode>, edges: Vec<WorkflowEdge>) -> Workflow {
    Workflow {
        id: "wf-test".into(),
        name: "Test Workflow".into(),
        description: None,
        version: "1.0.0".into(),
        nodes,
        edges,
        tags: vec![],
        created_at: "2026-01-01T00:00:00Z".into(),
        updated_at: "2026-01-01T00:00:00Z".into(),
    }
}

pub fn node(id: &str, node_type: &str, inputs: &[&str], outputs: &[&str]) -> WorkflowNode {
    WorkflowNode {
        id: id.into(),
        node_type: node_type.into(),
        position: Position { x: 0.0, y: 0.0 },
        inputs: inputs.iter().map(|s| s.to_string()).collect(),
        outputs: outputs.iter().map(|s| s.to_string()).collect(),
        config: BTreeMap::new(),
        input_bindings: BTreeMap::new(),
    }
}

pub fn edge(id: &str, source: &str, target: &str) -> WorkflowEdge {
    WorkflowEdge {
        id: id.into(),
        source: source.into(),
        target: target.into(),
        source_port: None,
        target_port: None,
        condition: None,
    }
}

pub fn edge_with_ports(
    id: &str,
    source: &str,
    source_port: &str,
    target: &str,
    target_port: &str,
) -> WorkflowEdge {
    WorkflowEdge {
        source_port: Some(source_port.into()),
        target_port: Some(target_port.into()),
        ..edge(id, source, target)
    }
}

pub fn edge_with_condition(id: &str, source: &str, target: &str, condition: &str) -> WorkflowEdge {
    WorkflowEdge {
        condition: Some(condition.into()),
        ..edge(id, source, target)
    }
}

// =============================================================================
// Signature builders
// =============================================================================

pub fn port(kind: DataKind) -> PortSpec {
    PortSpec {
        kind,
        facets: Facets::new(),
        required: false,
    }
}

pub fn required_port(kind: DataKind) -> PortSpec {
    PortSpec {
        required: true,
        ..port(kind)
    }
}

pub fn port_with_facet(kind: DataKind, facet: &str, value: &str) -> PortSpec {
    let mut spec = port(kind);
    spec.facets.insert(facet.into(), value.into());
    spec
}

pub fn signature(type_tag: &str, inputs: Vec<PortSpec>, outputs: Vec<PortSpec>) -> NodeSignature {
    NodeSignature {
        type_tag: type_tag.into(),
        inputs,
        outputs,
        config_schema: None,
    }
}

/// Registry with the node types the integration tests use.
pub fn test_registry() -> InMemoryRegistry {
    let mut registry = InMemoryRegistry::new();

    registry.register(signature("text-source", vec![], vec![port(DataKind::Text)]));
    registry.register(signature("markdown-source", vec![], vec![port(DataKind::Markdown)]));
    registry.register(signature("clipboard-source", vec![], vec![port(DataKind::Clipboard)]));
    registry.register(signature("text-sink", vec![port(DataKind::Text)], vec![]));
    registry.register(signature("json-sink", vec![port(DataKind::Json)], vec![]));
    registry.register(signature("relay", vec![port(DataKind::Text)], vec![port(DataKind::Text)]));
    registry.register(signature("island", vec![], vec![]));
    registry.register(signature(
        "dual-source",
        vec![],
        vec![port(DataKind::Text), port(DataKind::Uri)],
    ));
    registry.register(signature("camera-feed", vec![], vec![port(DataKind::Binary)]));
    registry.register(signature("screen-recorder", vec![], vec![port(DataKind::Binary)]));

    let mut llm_schema = ConfigSchema::default();
    llm_schema.properties.insert(
        "temperature".into(),
        PropertySchema {
            property_type: PropertyType::Number,
            minimum: Some(0.0),
            maximum: Some(2.0),
        },
    );
    llm_schema.properties.insert(
        "model".into(),
        PropertySchema {
            property_type: PropertyType::String,
            minimum: None,
            maximum: None,
        },
    );
    llm_schema.properties.insert(
        "stream".into(),
        PropertySchema {
            property_type: PropertyType::Boolean,
            minimum: None,
            maximum: None,
        },
    );
    let mut llm = signature(
        "llm",
        vec![required_port(DataKind::Text)],
        vec![port(DataKind::Text)],
    );
    llm.config_schema = Some(llm_schema);
    registry.register(llm);

    registry
}
