//! Node Registry collaborator boundary.
//!
//! The registry owns the catalog of node signatures and capability
//! declarations; this crate only queries it. `InMemoryRegistry` is the
//! implementation used by tests and the WASM surface, where the editor
//! ships its catalog alongside the workflow.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::lattice::{DataKind, Facets};

/// A typed input or output slot declared by a signature.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortSpec {
    pub kind: DataKind,
    #[serde(default)]
    pub facets: Facets,
    /// Inputs only: the port must be bound in the node's input-binding map.
    #[serde(default)]
    pub required: bool,
}

/// The registry-declared port/configuration contract for a node type.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeSignature {
    pub type_tag: String,
    pub inputs: Vec<PortSpec>,
    pub outputs: Vec<PortSpec>,
    #[serde(default)]
    pub config_schema: Option<ConfigSchema>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigSchema {
    pub properties: std::collections::BTreeMap<String, PropertySchema>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertySchema {
    #[serde(rename = "type")]
    pub property_type: PropertyType,
    #[serde(default)]
    pub minimum: Option<f64>,
    #[serde(default)]
    pub maximum: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PropertyType {
    String,
    Number,
    Boolean,
}

/// Result of the registry's own completeness check on a signature.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignatureShapeReport {
    pub valid: bool,
    pub errors: Vec<String>,
}

/// Result of the pairwise capability query. Generic conflicts merely
/// mean the pair cannot share data; resource conflicts mean the pair
/// cannot safely run concurrently and are the only ones surfaced as
/// validation errors.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PairwiseCompatibility {
    pub compatible: bool,
    pub conflicts: Vec<String>,
    pub resource_conflicts: Vec<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("registry backend unavailable: {0}")]
    Unavailable(String),
    #[error("registry query for '{type_tag}' failed: {message}")]
    Query { type_tag: String, message: String },
}

pub trait NodeRegistry {
    fn get_signature(&self, type_tag: &str) -> Result<Option<NodeSignature>, RegistryError>;

    fn validate_signature_shape(
        &self,
        signature: &NodeSignature,
    ) -> Result<SignatureShapeReport, RegistryError>;

    fn check_pairwise_compatibility(
        &self,
        type_a: &str,
        type_b: &str,
    ) -> Result<PairwiseCompatibility, RegistryError>;
}

/// A declared contention between two node types over a named resource.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceConflict {
    pub type_a: String,
    pub type_b: String,
    pub resource: String,
}

#[derive(Debug, Default)]
pub struct InMemoryRegistry {
    signatures: HashMap<String, NodeSignature>,
    generic_conflicts: Vec<(String, String, String)>,
    resource_conflicts: Vec<ResourceConflict>,
}

impl InMemoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, signature: NodeSignature) {
        self.signatures.insert(signature.type_tag.clone(), signature);
    }

    /// Declare a generic (non-resource) incompatibility between two types.
    pub fn declare_conflict(&mut self, type_a: &str, type_b: &str, description: &str) {
        self.generic_conflicts
            .push((type_a.into(), type_b.into(), description.into()));
    }

    /// Declare that two types contend for the same resource.
    pub fn declare_resource_conflict(&mut self, type_a: &str, type_b: &str, resource: &str) {
        self.resource_conflicts.push(ResourceConflict {
            type_a: type_a.into(),
            type_b: type_b.into(),
            resource: resource.into(),
        });
    }
}

fn pair_matches(a: &str, b: &str, type_a: &str, type_b: &str) -> bool {
    (a == type_a && b == type_b) || (a == type_b && b == type_a)
}

impl NodeRegistry for InMemoryRegistry {
    fn get_signature(&self, type_tag: &str) -> Result<Option<NodeSignature>, RegistryError> {
        Ok(self.signatures.get(type_tag).cloned())
    }

    fn validate_signature_shape(
        &self,
        signature: &NodeSignature,
    ) -> Result<SignatureShapeReport, RegistryError> {
        let mut errors = Vec::new();
        if signature.type_tag.trim().is_empty() {
            errors.push("signature type tag is empty".to_string());
        }
        if let Some(schema) = &signature.config_schema {
            for (key, prop) in &schema.properties {
                if let (Some(min), Some(max)) = (prop.minimum, prop.maximum) {
                    if min > max {
                        errors.push(format!(
                            "config property '{}' declares minimum {} above maximum {}",
                            key, min, max
                        ));
                    }
                }
            }
        }
        Ok(SignatureShapeReport {
            valid: errors.is_empty(),
            errors,
        })
    }

    fn check_pairwise_compatibility(
        &self,
        type_a: &str,
        type_b: &str,
    ) -> Result<PairwiseCompatibility, RegistryError> {
        let conflicts: Vec<String> = self
            .generic_conflicts
            .iter()
            .filter(|(a, b, _)| pair_matches(a, b, type_a, type_b))
            .map(|(_, _, description)| description.clone())
            .collect();
        let resource_conflicts: Vec<String> = self
            .resource_conflicts
            .iter()
            .filter(|c| pair_matches(&c.type_a, &c.type_b, type_a, type_b))
            .map(|c| c.resource.clone())
            .collect();
        Ok(PairwiseCompatibility {
            compatible: conflicts.is_empty() && resource_conflicts.is_empty(),
            conflicts,
            resource_conflicts,
        })
    }
}
