//! Diagnostic type shared by every validation check.

use serde::{Deserialize, Serialize};

/// Category tag carried by every diagnostic. Serialized as the wire-level
/// kind the editor groups findings by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    Dag,
    Configuration,
    TypeCompatibility,
    Dkel,
}

impl std::fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DiagnosticKind::Dag => write!(f, "dag"),
            DiagnosticKind::Configuration => write!(f, "configuration"),
            DiagnosticKind::TypeCompatibility => write!(f, "type_compatibility"),
            DiagnosticKind::Dkel => write!(f, "dkel"),
        }
    }
}

/// A single validation finding. Severity is positional: the report keeps
/// errors and warnings in separate lists.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagnostic {
    /// Stable rule identifier (S001, G005, T002, ...).
    pub code: String,
    pub kind: DiagnosticKind,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edge_id: Option<String>,
    /// Structured payload (cycle path, component count, chain summary, ...).
    #[serde(default, skip_serializing_if = "serde_json::Value::is_null")]
    pub details: serde_json::Value,
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}:{}] {}", self.kind, self.code, self.message)?;
        if let Some(id) = &self.node_id {
            write!(f, " (node '{}')", id)?;
        }
        if let Some(id) = &self.edge_id {
            write!(f, " (edge '{}')", id)?;
        }
        Ok(())
    }
}

impl std::error::Error for Diagnostic {}

impl Diagnostic {
    fn new(kind: DiagnosticKind, code: &str, message: impl Into<String>) -> Self {
        Diagnostic {
            code: code.into(),
            kind,
            message: message.into(),
            node_id: None,
            edge_id: None,
            details: serde_json::Value::Null,
        }
    }

    pub fn dag(code: &str, message: impl Into<String>) -> Self {
        Self::new(DiagnosticKind::Dag, code, message)
    }

    pub fn configuration(code: &str, message: impl Into<String>) -> Self {
        Self::new(DiagnosticKind::Configuration, code, message)
    }

    pub fn type_compatibility(code: &str, message: impl Into<String>) -> Self {
        Self::new(DiagnosticKind::TypeCompatibility, code, message)
    }

    pub fn dkel(code: &str, message: impl Into<String>) -> Self {
        Self::new(DiagnosticKind::Dkel, code, message)
    }

    pub fn with_node(mut self, node_id: impl Into<String>) -> Self {
        self.node_id = Some(node_id.into());
        self
    }

    pub fn with_edge(mut self, edge_id: impl Into<String>) -> Self {
        self.edge_id = Some(edge_id.into());
        self
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = details;
        self
    }
}
