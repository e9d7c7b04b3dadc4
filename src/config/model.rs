// src/config/model.rs

use std::collections::BTreeMap;

use serde::Deserialize;

/// Top-level graph configuration as read from a TOML or JSON file.
///
/// The file is a flat mapping of vertex id to vertex description:
///
/// ```toml
/// [A]
/// start = true
/// edges = { B = 5, C = 7 }
///
/// [B]
/// edges = {}
///
/// [C]
/// edges = {}
/// ```
///
/// or, equivalently:
///
/// ```json
/// { "A": { "start": true, "edges": { "B": 5, "C": 7 } },
///   "B": { "edges": {} },
///   "C": { "edges": {} } }
/// ```
///
/// Keys are kept in a `BTreeMap` so iteration is deterministic.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct GraphConfig {
    pub vertices: BTreeMap<String, VertexConfig>,
}

/// One `[<vertex id>]` section.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VertexConfig {
    /// Outgoing edges: child id -> delay.
    ///
    /// Delays are read as signed integers so that a negative value is
    /// reported as a configuration error naming the edge, rather than as an
    /// opaque deserialization failure.
    pub edges: BTreeMap<String, i64>,

    /// Marks the traversal root. Exactly one vertex must set this.
    #[serde(default)]
    pub start: bool,
}

impl GraphConfig {
    /// Ids of the vertices that set `start = true`, in key order.
    pub fn start_vertices(&self) -> Vec<&str> {
        self.vertices
            .iter()
            .filter(|(_, v)| v.start)
            .map(|(id, _)| id.as_str())
            .collect()
    }
}
