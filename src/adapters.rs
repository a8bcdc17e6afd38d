//! Adapter-insertion suggestions for bridging incompatible ports.
//!
//! Suggestions are never applied here; materializing an adapter node is
//! an editor concern, so `inserted` is always false.

use serde::{Deserialize, Serialize};

use crate::lattice::Coercion;
use crate::parse::types::Position;

const SPACING_X: f64 = 160.0;
const OFFSET_Y: f64 = 40.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdapterInsertion {
    pub id: String,
    pub coercion: Coercion,
    pub position: Position,
    pub inserted: bool,
}

/// One insertion per chain step, spread horizontally around the midpoint
/// of the edge with a small vertical fan away from the chain's center.
/// Ids derive from the edge id and step index, so regenerating for the
/// same edge and chain is idempotent.
pub fn plan_adapters(
    edge_id: &str,
    source: Position,
    target: Position,
    chain: &[Coercion],
) -> Vec<AdapterInsertion> {
    let mid_x = (source.x + target.x) / 2.0;
    let mid_y = (source.y + target.y) / 2.0;
    let center = (chain.len() as f64 - 1.0) / 2.0;

    chain
        .iter()
        .enumerate()
        .map(|(index, coercion)| {
            let offset = index as f64 - center;
            AdapterInsertion {
                id: format!("{}-adapter-{}", edge_id, index),
                coercion: coercion.clone(),
                position: Position {
                    x: mid_x + offset * SPACING_X,
                    y: mid_y + offset.abs() * OFFSET_Y,
                },
                inserted: false,
            }
        })
        .collect()
}
