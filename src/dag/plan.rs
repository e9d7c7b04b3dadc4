// src/dag/plan.rs

//! Static visit plan: when each reachable vertex *would* be visited.
//!
//! The plan is computed without running any hook. It backs `--dry-run` and
//! serves as an oracle for the traversal engine: every visit the engine makes
//! happens at the virtual time `T(V) = T(parent) + delay(parent -> V)` listed
//! here.

use std::collections::{BTreeSet, VecDeque};

use petgraph::algo::toposort;
use petgraph::graphmap::DiGraphMap;
use tracing::debug;

use crate::dag::graph::Graph;
use crate::errors::{DelayDagError, Result};
use crate::types::{Delay, VertexId};

/// One scheduled visit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedVisit {
    pub vertex: VertexId,
    /// Virtual time of the visit, in delay units since the traversal started.
    pub at: Delay,
    /// The vertex whose fan-out launches this visit (`None` for the root).
    pub parent: Option<VertexId>,
}

/// Visits sorted by virtual time.
///
/// Like the engine, the plan does not deduplicate: a vertex reachable through
/// two paths is listed once per path.
#[derive(Debug, Clone, Default)]
pub struct VisitPlan {
    visits: Vec<PlannedVisit>,
}

impl VisitPlan {
    /// Plan a traversal from the graph's designated start vertex.
    pub fn from_graph(graph: &Graph) -> Result<Self> {
        let start = graph.start().ok_or_else(|| {
            DelayDagError::ConfigError("graph has no start vertex".to_string())
        })?;
        Self::compute(graph, start, 0)
    }

    /// Plan a traversal from `start`, whose incoming edge waits
    /// `initial_delay`.
    ///
    /// Unlike the engine, this refuses cyclic graphs with
    /// [`DelayDagError::DagCycle`], since a cycle would make the plan
    /// infinite.
    pub fn compute(graph: &Graph, start: &str, initial_delay: Delay) -> Result<Self> {
        ensure_acyclic_from(graph, start)?;

        let mut visits = Vec::new();
        let mut stack: Vec<(VertexId, Delay, Option<VertexId>)> =
            vec![(start.to_string(), initial_delay, None)];

        while let Some((vertex, at, parent)) = stack.pop() {
            for (child, delay) in graph.children(&vertex)?.iter().rev() {
                let child_at = at.checked_add(*delay).ok_or_else(|| {
                    DelayDagError::ConfigError(format!(
                        "cumulative delay overflows at edge '{}' -> '{}'",
                        vertex, child
                    ))
                })?;
                stack.push((child.clone(), child_at, Some(vertex.clone())));
            }
            visits.push(PlannedVisit { vertex, at, parent });
        }

        // Stable: ties keep depth-first discovery order.
        visits.sort_by_key(|v| v.at);

        debug!(start, visits = visits.len(), "visit plan computed");
        Ok(Self { visits })
    }

    pub fn visits(&self) -> &[PlannedVisit] {
        &self.visits
    }

    /// Vertex ids in visit order.
    pub fn order(&self) -> Vec<&str> {
        self.visits.iter().map(|v| v.vertex.as_str()).collect()
    }

    /// Virtual time of the first visit of `vertex`.
    pub fn time_of(&self, vertex: &str) -> Option<Delay> {
        self.visits
            .iter()
            .find(|v| v.vertex == vertex)
            .map(|v| v.at)
    }

    /// Virtual time of the last visit: a lower bound for the run's wall time.
    pub fn makespan(&self) -> Delay {
        self.visits.iter().map(|v| v.at).max().unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.visits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.visits.is_empty()
    }
}

/// Reject cycles reachable from `start`.
fn ensure_acyclic_from(graph: &Graph, start: &str) -> Result<()> {
    let mut reachable: DiGraphMap<&str, Delay> = DiGraphMap::new();
    let mut seen: BTreeSet<&str> = BTreeSet::new();
    let mut queue: VecDeque<&str> = VecDeque::new();

    if !graph.contains(start) {
        return Err(DelayDagError::UnknownVertex(start.to_string()));
    }
    reachable.add_node(start);
    seen.insert(start);
    queue.push_back(start);

    while let Some(vertex) = queue.pop_front() {
        for (child, delay) in graph.children(vertex)?.iter() {
            reachable.add_edge(vertex, child.as_str(), *delay);
            if seen.insert(child.as_str()) {
                queue.push_back(child.as_str());
            }
        }
    }

    match toposort(&reachable, None) {
        Ok(_order) => Ok(()),
        Err(cycle) => Err(DelayDagError::DagCycle(format!(
            "cycle reachable from '{}' involves vertex '{}'",
            start,
            cycle.node_id()
        ))),
    }
}
