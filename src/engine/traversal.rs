// src/engine/traversal.rs

//! Concurrent delayed traversal.
//!
//! Every recursive call:
//! 1. awaits the edge action for its incoming delay,
//! 2. runs the vertex action,
//! 3. spawns one Tokio task per child edge into a `JoinSet`,
//! 4. drains the `JoinSet` before returning.
//!
//! Because siblings wait in parallel, a vertex is visited at the sum of the
//! delays on its root path, independently of how deep it sits. Each branch
//! carries that sum down so the edge action can wait on an absolute
//! deadline measured from the start of the run.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use tokio::task::{JoinError, JoinSet};
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, trace};

use crate::dag::Graph;
use crate::engine::hooks::{EdgeWait, TraversalHooks};
use crate::engine::state::BranchState;
use crate::errors::{DelayDagError, Result};
use crate::types::{Delay, HookStage, VertexId};

/// What to do with sibling branches once one branch fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// Let every launched branch run to completion and aggregate failures.
    #[default]
    Continue,
    /// Cancel all outstanding edge waits of this run on the first failure.
    CancelSiblings,
}

/// Knobs for [`run_with`].
#[derive(Debug, Clone, Default)]
pub struct TraversalOptions {
    /// Start here instead of the graph's start vertex.
    pub start: Option<VertexId>,
    /// Delay passed to the root's edge action.
    pub initial_delay: Delay,
    /// Cancelling this token stops the traversal at the next edge wait.
    /// The engine itself never cancels it.
    pub cancel: CancellationToken,
    pub failure_policy: FailurePolicy,
}

impl TraversalOptions {
    pub fn starting_at(mut self, vertex: impl Into<VertexId>) -> Self {
        self.start = Some(vertex.into());
        self
    }

    pub fn with_initial_delay(mut self, delay: Delay) -> Self {
        self.initial_delay = delay;
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }

    pub fn with_failure_policy(mut self, policy: FailurePolicy) -> Self {
        self.failure_policy = policy;
        self
    }
}

/// Result of a traversal in which every branch succeeded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraversalSummary {
    pub start: VertexId,
    /// Number of vertex actions that completed.
    pub visited: usize,
    pub elapsed: Duration,
}

/// Traverse `graph` from its start vertex.
pub async fn run(
    graph: Arc<Graph>,
    hooks: Arc<dyn TraversalHooks>,
) -> Result<TraversalSummary> {
    run_with(graph, hooks, TraversalOptions::default()).await
}

/// Traverse `graph` with explicit [`TraversalOptions`].
///
/// Returns once every launched branch has settled. A single failure is
/// returned as-is; several are returned as [`DelayDagError::Aggregate`] in
/// the order they were observed at the join points. Branches stopped by
/// cancellation only show up (as [`DelayDagError::Cancelled`]) when nothing
/// else failed.
///
/// A vertex id missing from the graph (an unknown start override or a
/// hand-built dangling edge) is never visited: its branch fails with
/// [`DelayDagError::UnknownVertex`] before the vertex action runs.
pub async fn run_with(
    graph: Arc<Graph>,
    hooks: Arc<dyn TraversalHooks>,
    options: TraversalOptions,
) -> Result<TraversalSummary> {
    let start = match options.start.clone().or_else(|| graph.start().map(str::to_string)) {
        Some(start) => start,
        None => {
            return Err(DelayDagError::ConfigError(
                "graph has no start vertex and no start override was given".to_string(),
            ));
        }
    };

    info!(
        start = %start,
        initial_delay = options.initial_delay,
        policy = ?options.failure_policy,
        "traversal started"
    );
    let started = Instant::now();

    let walker = Arc::new(Walker {
        graph,
        hooks,
        cancel: options.cancel.child_token(),
        policy: options.failure_policy,
        origin: started,
    });

    let root = tokio::spawn(visit(
        Arc::clone(&walker),
        start.clone(),
        options.initial_delay,
        options.initial_delay,
    ));
    let outcome = match root.await {
        Ok(outcome) => outcome,
        Err(err) => BranchOutcome::failed(DelayDagError::BranchPanicked {
            parent: start.clone(),
            message: join_error_message(err),
        }),
    };

    let elapsed = started.elapsed();
    let BranchOutcome { visited, failures } = outcome;

    match DelayDagError::from_failures(surface_failures(failures)) {
        None => {
            info!(start = %start, visited, ?elapsed, "traversal finished");
            Ok(TraversalSummary {
                start,
                visited,
                elapsed,
            })
        }
        Some(err) => {
            error!(start = %start, visited, ?elapsed, error = %err, "traversal failed");
            Err(err)
        }
    }
}

/// Shared, read-only state of one traversal.
struct Walker {
    graph: Arc<Graph>,
    hooks: Arc<dyn TraversalHooks>,
    cancel: CancellationToken,
    policy: FailurePolicy,
    /// Deadlines of every edge wait are measured from here.
    origin: Instant,
}

impl Walker {
    fn fail(&self, err: DelayDagError) -> BranchOutcome {
        error!(error = %err, "traversal branch failed");
        if self.policy == FailurePolicy::CancelSiblings && !self.cancel.is_cancelled() {
            info!("fail-fast: cancelling remaining branches");
            self.cancel.cancel();
        }
        BranchOutcome::failed(err)
    }

    fn hook_failed(&self, vertex: VertexId, stage: HookStage, source: anyhow::Error) -> BranchOutcome {
        self.fail(DelayDagError::HookFailure {
            vertex,
            stage,
            source: source.into(),
        })
    }
}

/// Settled subtree: visits made and failures collected below it.
#[derive(Debug, Default)]
struct BranchOutcome {
    visited: usize,
    failures: Vec<DelayDagError>,
}

impl BranchOutcome {
    fn failed(err: DelayDagError) -> Self {
        Self {
            visited: 0,
            failures: vec![err],
        }
    }

    fn absorb(&mut self, child: BranchOutcome) {
        self.visited += child.visited;
        self.failures.extend(child.failures);
    }
}

type BranchFuture = Pin<Box<dyn Future<Output = BranchOutcome> + Send>>;

/// `at` is the cumulative delay of `vertex` from the start of the run.
fn visit(walker: Arc<Walker>, vertex: VertexId, delay: Delay, at: Delay) -> BranchFuture {
    Box::pin(async move {
        let mut state = BranchState::default();
        trace!(vertex = %vertex, delay, at, %state, "branch launched");

        let edge = EdgeWait {
            delay,
            at,
            origin: walker.origin,
        };

        let waited = tokio::select! {
            biased;
            _ = walker.cancel.cancelled() => {
                debug!(vertex = %vertex, delay, "branch cancelled during edge wait");
                return BranchOutcome::failed(DelayDagError::Cancelled(vertex));
            }
            res = walker.hooks.edge_action(edge) => res,
        };
        if let Err(source) = waited {
            return walker.hook_failed(vertex, HookStage::Edge, source);
        }
        state = state.edge_elapsed();
        trace!(vertex = %vertex, %state, "edge elapsed");

        // Resolve children first so an id missing from the graph is never
        // reported as visited.
        let children: Vec<(VertexId, Delay)> = match walker.graph.children(&vertex) {
            Ok(children) => children.iter().map(|(id, d)| (id.clone(), *d)).collect(),
            Err(err) => return walker.fail(err),
        };

        let marked = walker.hooks.vertex_action(&vertex).await;
        if let Err(source) = marked {
            return walker.hook_failed(vertex, HookStage::Vertex, source);
        }
        state = state.visited();

        let mut outcome = BranchOutcome {
            visited: 1,
            failures: Vec::new(),
        };

        if walker.cancel.is_cancelled() {
            debug!(vertex = %vertex, children = children.len(), "cancelled before fan-out");
            outcome
                .failures
                .extend(children.into_iter().map(|(child, _)| DelayDagError::Cancelled(child)));
            return outcome;
        }

        let mut branches = JoinSet::new();
        for (child, child_delay) in children {
            let child_at = at.saturating_add(child_delay);
            branches.spawn(visit(Arc::clone(&walker), child, child_delay, child_at));
        }
        state = state.launched(branches.len());
        trace!(vertex = %vertex, %state, "fanned out");

        while let Some(joined) = branches.join_next().await {
            match joined {
                Ok(child) => outcome.absorb(child),
                Err(err) => {
                    let failure = DelayDagError::BranchPanicked {
                        parent: vertex.clone(),
                        message: join_error_message(err),
                    };
                    outcome.absorb(walker.fail(failure));
                }
            }
            state = state.child_settled();
        }

        trace!(vertex = %vertex, %state, visited = outcome.visited, "branch settled");
        outcome
    })
}

/// Drop cancellations caused by a real failure; keep only the first
/// cancellation when nothing else went wrong.
fn surface_failures(failures: Vec<DelayDagError>) -> Vec<DelayDagError> {
    let (cancelled, real): (Vec<_>, Vec<_>) =
        failures.into_iter().partition(DelayDagError::is_cancellation);

    if real.is_empty() {
        cancelled.into_iter().take(1).collect()
    } else {
        real
    }
}

fn join_error_message(err: JoinError) -> String {
    if !err.is_panic() {
        return err.to_string();
    }
    let payload = err.into_panic();
    if let Some(msg) = payload.downcast_ref::<&str>() {
        (*msg).to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "non-string panic payload".to_string()
    }
}
