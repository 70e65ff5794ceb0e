//! Self-reported topology descriptors.
//!
//! Shapes are deliberately lenient. Firmware frequently omits fields or
//! reports half-filled children; a malformed descriptor is data to be
//! filtered during the walk, not an error.

use serde::{Deserialize, Serialize};

/// Raw response to a topology query.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TopoGraphResponse {
    #[serde(default)]
    pub graph: Option<TopologyNode>,
    #[serde(default)]
    pub code: i64,
}

/// One node in a reported topology: the device itself at the top level,
/// attached children in `leafs`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TopologyNode {
    /// Address the node reports for itself. May be empty.
    #[serde(default)]
    pub ip: String,
    /// Hardware model string. Children missing this are skipped.
    #[serde(default)]
    pub hardware: String,
    /// Directly attached children.
    #[serde(default)]
    pub leafs: Vec<TopologyNode>,
}

impl TopoGraphResponse {
    /// Parse a raw topology payload. Any shape mismatch yields `None`
    /// rather than an error; the caller treats that as "not well-formed".
    pub fn parse(value: &serde_json::Value) -> Option<Self> {
        serde_json::from_value(value.clone()).ok()
    }

    /// Whether the descriptor carries a usable self address.
    pub fn is_well_formed(&self) -> bool {
        self.graph
            .as_ref()
            .map(|g| !g.ip.trim().is_empty())
            .unwrap_or(false)
    }
}
