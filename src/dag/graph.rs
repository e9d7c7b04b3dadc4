// src/dag/graph.rs

use std::collections::BTreeMap;

use tracing::{debug, trace};

use crate::config::model::GraphConfig;
use crate::config::validate::validate_config;
use crate::errors::{DelayDagError, Result};
use crate::types::{Delay, VertexId};

/// Children of one vertex: child id -> delay on the edge.
pub type Children = BTreeMap<VertexId, Delay>;

/// Immutable in-memory DAG keyed by vertex id.
///
/// Built once at startup and then shared read-only (behind an `Arc`) by every
/// concurrent traversal branch, so it needs no locking. Acyclicity is assumed,
/// not checked.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Graph {
    adjacency: BTreeMap<VertexId, Children>,
    start: Option<VertexId>,
}

impl Graph {
    /// Hand-build a graph from an adjacency map.
    ///
    /// Unlike [`Graph::build`], no validation happens here: `start` may be
    /// `None` (traversal then fails with a configuration error) and child ids
    /// missing from `adjacency` surface as [`DelayDagError::UnknownVertex`]
    /// when reached.
    pub fn new(adjacency: BTreeMap<VertexId, Children>, start: Option<VertexId>) -> Self {
        Self { adjacency, start }
    }

    /// Build a graph from a parsed [`GraphConfig`].
    ///
    /// Fails with [`DelayDagError::ConfigError`] if zero or several vertices
    /// set `start = true`, or if any delay is negative. Ids that only appear
    /// as edge targets get an empty entry.
    pub fn build(cfg: &GraphConfig) -> Result<Self> {
        let start = validate_config(cfg)?;

        let mut adjacency: BTreeMap<VertexId, Children> = cfg
            .vertices
            .keys()
            .map(|id| (id.clone(), Children::new()))
            .collect();

        for (id, vertex) in cfg.vertices.iter() {
            for (child, delay) in vertex.edges.iter() {
                let delay = Delay::try_from(*delay).map_err(|_| {
                    DelayDagError::ConfigError(format!(
                        "edge '{}' -> '{}' has invalid delay {}",
                        id, child, delay
                    ))
                })?;

                if !adjacency.contains_key(child) {
                    trace!(vertex = %child, parent = %id, "auto-inserting edge target without a section");
                    adjacency.insert(child.clone(), Children::new());
                }

                if let Some(children) = adjacency.get_mut(id) {
                    children.insert(child.clone(), delay);
                }
            }
        }

        let graph = Self {
            adjacency,
            start: Some(start),
        };
        debug!(
            vertices = graph.len(),
            edges = graph.edge_count(),
            start = ?graph.start,
            "graph built"
        );
        Ok(graph)
    }

    /// The designated root vertex, if any.
    pub fn start(&self) -> Option<&str> {
        self.start.as_deref()
    }

    /// Children of `vertex` with their edge delays.
    ///
    /// Empty for leaves; [`DelayDagError::UnknownVertex`] for ids absent from
    /// the adjacency structure.
    pub fn children(&self, vertex: &str) -> Result<&Children> {
        self.adjacency
            .get(vertex)
            .ok_or_else(|| DelayDagError::UnknownVertex(vertex.to_string()))
    }

    pub fn contains(&self, vertex: &str) -> bool {
        self.adjacency.contains_key(vertex)
    }

    /// All vertex ids, in key order.
    pub fn vertices(&self) -> impl Iterator<Item = &str> {
        self.adjacency.keys().map(|s| s.as_str())
    }

    pub fn len(&self) -> usize {
        self.adjacency.len()
    }

    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }

    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(|c| c.len()).sum()
    }
}
