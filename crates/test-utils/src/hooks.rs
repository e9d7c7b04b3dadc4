use std::collections::{BTreeSet, HashMap};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::bail;
use tokio::time::Instant;

use delaydag::engine::{EdgeWait, HookFuture, TraversalHooks};
use delaydag::types::Delay;

/// One recorded vertex action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Visit {
    pub vertex: String,
    /// Time since the hooks were created.
    pub elapsed: Duration,
}

impl Visit {
    /// Elapsed time rounded to whole seconds.
    pub fn secs(&self) -> u64 {
        self.elapsed.as_secs_f64().round() as u64
    }
}

/// Hooks that sleep like the defaults and record every visit with its time.
///
/// Meant for `#[tokio::test(start_paused = true)]`: the paused clock makes
/// the recorded times exact while the test itself finishes instantly.
#[derive(Debug, Clone)]
pub struct RecordingHooks {
    origin: Instant,
    visits: Arc<Mutex<Vec<Visit>>>,
    edge_calls: Arc<Mutex<Vec<Delay>>>,
    fail_edges: BTreeSet<Delay>,
    fail_vertices: BTreeSet<String>,
    panic_vertices: BTreeSet<String>,
    /// Extra time the vertex action of some vertices takes.
    slow_vertices: HashMap<String, Duration>,
}

impl RecordingHooks {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
            visits: Arc::new(Mutex::new(Vec::new())),
            edge_calls: Arc::new(Mutex::new(Vec::new())),
            fail_edges: BTreeSet::new(),
            fail_vertices: BTreeSet::new(),
            panic_vertices: BTreeSet::new(),
            slow_vertices: HashMap::new(),
        }
    }

    /// The vertex action for `vertex` returns an error.
    pub fn failing_on(mut self, vertex: &str) -> Self {
        self.fail_vertices.insert(vertex.to_string());
        self
    }

    /// The edge action fails (after waiting) for edges with this delay.
    pub fn failing_edge(mut self, delay: Delay) -> Self {
        self.fail_edges.insert(delay);
        self
    }

    /// The vertex action for `vertex` panics.
    pub fn panicking_on(mut self, vertex: &str) -> Self {
        self.panic_vertices.insert(vertex.to_string());
        self
    }

    pub fn slow_on(mut self, vertex: &str, extra: Duration) -> Self {
        self.slow_vertices.insert(vertex.to_string(), extra);
        self
    }

    pub fn visits(&self) -> Vec<Visit> {
        self.visits.lock().unwrap().clone()
    }

    /// Visited vertex ids in the order the actions ran.
    pub fn order(&self) -> Vec<String> {
        self.visits().into_iter().map(|v| v.vertex).collect()
    }

    /// Rounded visit time per vertex (last visit wins).
    pub fn times(&self) -> HashMap<String, u64> {
        self.visits()
            .into_iter()
            .map(|v| {
                let secs = v.secs();
                (v.vertex, secs)
            })
            .collect()
    }

    pub fn edge_calls(&self) -> Vec<Delay> {
        self.edge_calls.lock().unwrap().clone()
    }
}

impl Default for RecordingHooks {
    fn default() -> Self {
        Self::new()
    }
}

impl TraversalHooks for RecordingHooks {
    fn edge_action(&self, edge: EdgeWait) -> HookFuture<'_> {
        Box::pin(async move {
            let delay = edge.delay;
            self.edge_calls.lock().unwrap().push(delay);
            if delay > 0 {
                let deadline = edge.origin + Duration::from_secs(edge.at);
                tokio::time::sleep_until(deadline).await;
            }
            if self.fail_edges.contains(&delay) {
                bail!("edge with delay {delay} rejected");
            }
            Ok(())
        })
    }

    fn vertex_action<'a>(&'a self, vertex: &'a str) -> HookFuture<'a> {
        Box::pin(async move {
            if self.panic_vertices.contains(vertex) {
                panic!("vertex action exploded at {vertex}");
            }
            if self.fail_vertices.contains(vertex) {
                bail!("vertex {vertex} refused to be visited");
            }
            let elapsed = self.origin.elapsed();
            self.visits.lock().unwrap().push(Visit {
                vertex: vertex.to_string(),
                elapsed,
            });
            if let Some(extra) = self.slow_vertices.get(vertex) {
                tokio::time::sleep(*extra).await;
            }
            Ok(())
        })
    }
}
