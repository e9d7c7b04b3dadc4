#![allow(dead_code)]

use std::collections::BTreeMap;
use std::sync::Arc;

use delaydag::config::{GraphConfig, VertexConfig};
use delaydag::dag::Graph;

/// Builder for `GraphConfig` to simplify test setup.
pub struct GraphConfigBuilder {
    config: GraphConfig,
}

impl GraphConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: GraphConfig {
                vertices: BTreeMap::new(),
            },
        }
    }

    pub fn with_vertex(mut self, id: &str, vertex: VertexConfig) -> Self {
        self.config.vertices.insert(id.to_string(), vertex);
        self
    }

    /// Shorthand for a vertex with no outgoing edges.
    pub fn with_leaf(self, id: &str) -> Self {
        self.with_vertex(id, VertexBuilder::new().build())
    }

    /// The raw config, without validation.
    pub fn build(self) -> GraphConfig {
        self.config
    }

    /// Validated graph, shared the way the engine expects it.
    pub fn graph(self) -> Arc<Graph> {
        Arc::new(Graph::build(&self.config).expect("Failed to build valid graph from builder"))
    }
}

impl Default for GraphConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for `VertexConfig`.
pub struct VertexBuilder {
    vertex: VertexConfig,
}

impl VertexBuilder {
    pub fn new() -> Self {
        Self {
            vertex: VertexConfig {
                edges: BTreeMap::new(),
                start: false,
            },
        }
    }

    pub fn start(mut self) -> Self {
        self.vertex.start = true;
        self
    }

    pub fn edge(mut self, child: &str, delay: i64) -> Self {
        self.vertex.edges.insert(child.to_string(), delay);
        self
    }

    pub fn build(self) -> VertexConfig {
        self.vertex
    }
}

impl Default for VertexBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// `{A:start,edges:{B:5,C:7}; B:{}; C:{}}`
pub fn fan_out_config() -> GraphConfig {
    GraphConfigBuilder::new()
        .with_vertex("A", VertexBuilder::new().start().edge("B", 5).edge("C", 7).build())
        .with_leaf("B")
        .with_leaf("C")
        .build()
}

/// A long cheap chain under `C` overtakes the single expensive edge to `B`.
pub fn chain_overtakes_config() -> GraphConfig {
    GraphConfigBuilder::new()
        .with_vertex("A", VertexBuilder::new().start().edge("B", 5).edge("C", 1).build())
        .with_leaf("B")
        .with_vertex("C", VertexBuilder::new().edge("D", 1).build())
        .with_vertex("D", VertexBuilder::new().edge("E", 1).build())
        .with_vertex("E", VertexBuilder::new().edge("F", 1).build())
        .with_leaf("F")
        .build()
}

/// Two subtrees whose visits interleave.
pub fn interleaved_config() -> GraphConfig {
    GraphConfigBuilder::new()
        .with_vertex("A", VertexBuilder::new().start().edge("B", 3).edge("C", 1).build())
        .with_vertex("B", VertexBuilder::new().edge("G", 2).build())
        .with_vertex("C", VertexBuilder::new().edge("D", 1).build())
        .with_vertex("D", VertexBuilder::new().edge("E", 2).build())
        .with_vertex("E", VertexBuilder::new().edge("F", 2).build())
        .with_leaf("F")
        .with_leaf("G")
        .build()
}
