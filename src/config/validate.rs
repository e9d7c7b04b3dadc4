// src/config/validate.rs

use crate::config::model::GraphConfig;
use crate::errors::{DelayDagError, Result};
use crate::types::VertexId;

/// Check the invariants the graph model relies on and return the id of the
/// start vertex.
///
/// Cycles are deliberately not checked here: the traversal engine assumes a
/// DAG. See [`crate::dag::plan`] for an opt-in check.
pub fn validate_config(cfg: &GraphConfig) -> Result<VertexId> {
    ensure_has_vertices(cfg)?;
    validate_vertex_ids(cfg)?;
    validate_delays(cfg)?;
    single_start_vertex(cfg)
}

fn ensure_has_vertices(cfg: &GraphConfig) -> Result<()> {
    if cfg.vertices.is_empty() {
        return Err(DelayDagError::ConfigError(
            "config must contain at least one vertex".to_string(),
        ));
    }
    Ok(())
}

fn validate_vertex_ids(cfg: &GraphConfig) -> Result<()> {
    for (id, vertex) in cfg.vertices.iter() {
        if id.trim().is_empty() {
            return Err(DelayDagError::ConfigError(
                "vertex ids must not be empty".to_string(),
            ));
        }
        if vertex.edges.keys().any(|child| child.trim().is_empty()) {
            return Err(DelayDagError::ConfigError(format!(
                "vertex '{}' has an edge to an empty vertex id",
                id
            )));
        }
    }
    Ok(())
}

fn validate_delays(cfg: &GraphConfig) -> Result<()> {
    for (id, vertex) in cfg.vertices.iter() {
        for (child, delay) in vertex.edges.iter() {
            if *delay < 0 {
                return Err(DelayDagError::ConfigError(format!(
                    "edge '{}' -> '{}' has negative delay {}",
                    id, child, delay
                )));
            }
        }
    }
    Ok(())
}

fn single_start_vertex(cfg: &GraphConfig) -> Result<VertexId> {
    match cfg.start_vertices().as_slice() {
        [start] => Ok(start.to_string()),
        [] => Err(DelayDagError::ConfigError(
            "no vertex is marked with `start = true`".to_string(),
        )),
        many => Err(DelayDagError::ConfigError(format!(
            "exactly one vertex may set `start = true`, found {}: {}",
            many.len(),
            many.join(", ")
        ))),
    }
}
