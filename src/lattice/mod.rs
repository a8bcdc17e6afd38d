//! Data-kind lattice: subtype and coercion relations over port kinds.
//!
//! Subtype edges are zero-cost and lossless (markdown is-a text). Coercion
//! edges are directed, weighted, and possibly lossy; each one names the
//! adapter that realizes it. Together they form the graph the chain
//! search in [`search`] walks.

pub mod search;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::registry::PortSpec;

/// Semantic shape of data flowing through a port.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataKind {
    Text,
    Markdown,
    Uri,
    Json,
    Binary,
    Clipboard,
    Artifact,
    Boolean,
    Transcript,
}

impl DataKind {
    pub const ALL: [DataKind; 9] = [
        DataKind::Text,
        DataKind::Markdown,
        DataKind::Uri,
        DataKind::Json,
        DataKind::Binary,
        DataKind::Clipboard,
        DataKind::Artifact,
        DataKind::Boolean,
        DataKind::Transcript,
    ];
}

impl std::fmt::Display for DataKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            DataKind::Text => "text",
            DataKind::Markdown => "markdown",
            DataKind::Uri => "uri",
            DataKind::Json => "json",
            DataKind::Binary => "binary",
            DataKind::Clipboard => "clipboard",
            DataKind::Artifact => "artifact",
            DataKind::Boolean => "boolean",
            DataKind::Transcript => "transcript",
        };
        write!(f, "{}", name)
    }
}

/// Refinement attributes on a port (encoding, schema reference, ...).
/// The target's map is a constraint set the source must match exactly.
pub type Facets = BTreeMap<String, String>;

/// A directed, weighted conversion between two kinds, realized by an
/// adapter. Not assumed symmetric.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Coercion {
    pub from: DataKind,
    pub to: DataKind,
    pub cost: u32,
    /// True when the conversion is lossless and total.
    pub safe: bool,
    pub adapter: String,
    pub description: String,
}

#[derive(Debug, thiserror::Error)]
pub enum LatticeError {
    #[error("subtype edge {child} -> {parent} would create a cycle")]
    SubtypeCycle { child: DataKind, parent: DataKind },
}

/// Result of a direct port-to-port compatibility check. Coercion chains
/// are the caller's concern; see [`search::find_chain`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortCompatibility {
    pub compatible: bool,
    pub subtyping: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub facet_violation: Option<FacetViolation>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FacetViolation {
    pub facet: String,
    pub expected: String,
    pub actual: Option<String>,
}

/// The combined subtype + coercion graph over all data kinds.
#[derive(Debug, Clone, Default)]
pub struct KindLattice {
    /// (child, parent) pairs; acyclic by construction.
    subtypes: Vec<(DataKind, DataKind)>,
    coercions: Vec<Coercion>,
}

impl KindLattice {
    pub fn new() -> Self {
        Self::default()
    }

    /// The crate's default relations.
    pub fn standard() -> Self {
        let subtypes = vec![
            (DataKind::Markdown, DataKind::Text),
            (DataKind::Uri, DataKind::Text),
            (DataKind::Transcript, DataKind::Markdown),
        ];
        let coercions = vec![
            coercion(DataKind::Clipboard, DataKind::Text, 1, true, "clipboard-to-text",
                "Extract plain text from a clipboard capture"),
            coercion(DataKind::Text, DataKind::Json, 1, false, "text-to-json",
                "Parse text as JSON; fails on malformed input"),
            coercion(DataKind::Json, DataKind::Text, 1, true, "json-to-text",
                "Serialize a JSON document to text"),
            coercion(DataKind::Boolean, DataKind::Text, 1, true, "boolean-to-text",
                "Render a boolean as 'true' or 'false'"),
            coercion(DataKind::Text, DataKind::Markdown, 1, true, "text-to-markdown",
                "Wrap plain text as a markdown document"),
            coercion(DataKind::Json, DataKind::Artifact, 2, true, "json-to-artifact",
                "Store a JSON document as an artifact"),
            coercion(DataKind::Artifact, DataKind::Binary, 1, true, "artifact-to-binary",
                "Load artifact content as raw bytes"),
            coercion(DataKind::Binary, DataKind::Artifact, 2, true, "binary-to-artifact",
                "Store raw bytes as an artifact"),
            coercion(DataKind::Clipboard, DataKind::Binary, 2, false, "clipboard-to-binary",
                "Snapshot clipboard content as bytes; DOM references are dropped"),
        ];
        KindLattice { subtypes, coercions }
    }

    /// Add a subtype edge. Rejects edges that would make the subtype
    /// relation cyclic.
    pub fn add_subtype(&mut self, child: DataKind, parent: DataKind) -> Result<(), LatticeError> {
        if child == parent || self.is_subtype(parent, child) {
            return Err(LatticeError::SubtypeCycle { child, parent });
        }
        self.subtypes.push((child, parent));
        Ok(())
    }

    pub fn add_coercion(&mut self, coercion: Coercion) {
        self.coercions.push(coercion);
    }

    /// True iff `a == b` or `b` is reachable from `a` over subtype edges.
    /// Reflexive and transitive by construction.
    pub fn is_subtype(&self, a: DataKind, b: DataKind) -> bool {
        if a == b {
            return true;
        }
        let mut seen = vec![false; DataKind::ALL.len()];
        let mut stack = vec![a];
        while let Some(kind) = stack.pop() {
            for parent in self.direct_supertypes(kind) {
                if parent == b {
                    return true;
                }
                if !seen[parent as usize] {
                    seen[parent as usize] = true;
                    stack.push(parent);
                }
            }
        }
        false
    }

    /// Direct compatibility between two ports. Kinds must be in a subtype
    /// relation, and the source's facets must satisfy every constraint
    /// the target declares; a facet mismatch makes the ports
    /// incompatible even when the kinds line up.
    pub fn check_port_compatibility(&self, source: &PortSpec, target: &PortSpec) -> PortCompatibility {
        let subtyping = self.is_subtype(source.kind, target.kind);
        for (facet, expected) in &target.facets {
            let actual = source.facets.get(facet);
            if actual != Some(expected) {
                return PortCompatibility {
                    compatible: false,
                    subtyping,
                    facet_violation: Some(FacetViolation {
                        facet: facet.clone(),
                        expected: expected.clone(),
                        actual: actual.cloned(),
                    }),
                };
            }
        }
        PortCompatibility {
            compatible: subtyping,
            subtyping,
            facet_violation: None,
        }
    }

    pub(crate) fn direct_supertypes(&self, kind: DataKind) -> impl Iterator<Item = DataKind> + '_ {
        self.subtypes
            .iter()
            .filter(move |(child, _)| *child == kind)
            .map(|(_, parent)| *parent)
    }

    pub(crate) fn coercions_from(&self, kind: DataKind) -> impl Iterator<Item = &Coercion> + '_ {
        self.coercions.iter().filter(move |c| c.from == kind)
    }
}

fn coercion(
    from: DataKind,
    to: DataKind,
    cost: u32,
    safe: bool,
    adapter: &str,
    description: &str,
) -> Coercion {
    Coercion {
        from,
        to,
        cost,
        safe,
        adapter: adapter.into(),
        description: description.into(),
    }
}
