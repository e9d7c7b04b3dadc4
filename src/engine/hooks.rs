// src/engine/hooks.rs

//! Pluggable edge/vertex actions.
//!
//! The traversal engine talks to a [`TraversalHooks`] implementation instead
//! of sleeping and printing directly. This makes it easy to swap in
//! recording or failing hooks in tests while keeping the production
//! behaviour in [`DelayedVisit`].

use std::future::Future;
use std::pin::Pin;

use anyhow::Context;
use tokio::time::Instant;
use tracing::info;

use crate::sink::VisitSink;
use crate::types::{Delay, DelayUnit};

/// Boxed future returned by the hooks.
pub type HookFuture<'a> = Pin<Box<dyn Future<Output = anyhow::Result<()>> + Send + 'a>>;

/// Timing of one edge wait, handed to [`TraversalHooks::edge_action`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EdgeWait {
    /// Delay on the incoming edge (the initial delay for the root).
    pub delay: Delay,
    /// Sum of the delays from the start of the traversal to this visit.
    pub at: Delay,
    /// When the traversal started.
    pub origin: Instant,
}

impl EdgeWait {
    /// Absolute instant at which this edge elapses, or `None` if it does not
    /// fit the clock.
    ///
    /// A visit wakes at `origin + at` whatever lag its ancestors picked up.
    pub fn deadline(&self, unit: DelayUnit) -> Option<Instant> {
        self.origin.checked_add(unit.duration(self.at))
    }
}

/// The two capabilities the engine needs at every step.
pub trait TraversalHooks: Send + Sync {
    /// Runs before a vertex is visited, with the delay of its incoming edge
    /// (0 for the root unless overridden). This is the only point where a
    /// branch suspends.
    fn edge_action(&self, edge: EdgeWait) -> HookFuture<'_>;

    /// Marks `vertex` as visited. Called once per visit.
    fn vertex_action<'a>(&'a self, vertex: &'a str) -> HookFuture<'a>;
}

/// Default hooks: wait out the edge delay, then emit the vertex id.
#[derive(Debug, Clone)]
pub struct DelayedVisit<S> {
    unit: DelayUnit,
    sink: S,
}

impl<S: VisitSink> DelayedVisit<S> {
    /// Delays are interpreted in seconds.
    pub fn new(sink: S) -> Self {
        Self {
            unit: DelayUnit::Seconds,
            sink,
        }
    }

    pub fn with_unit(mut self, unit: DelayUnit) -> Self {
        self.unit = unit;
        self
    }

    pub fn unit(&self) -> DelayUnit {
        self.unit
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }
}

impl<S: VisitSink> TraversalHooks for DelayedVisit<S> {
    fn edge_action(&self, edge: EdgeWait) -> HookFuture<'_> {
        let unit = self.unit;

        Box::pin(async move {
            // The parent already waited until this same deadline.
            if edge.delay == 0 {
                return Ok(());
            }
            match edge.deadline(unit) {
                Some(deadline) => tokio::time::sleep_until(deadline).await,
                None => tokio::time::sleep(unit.duration(edge.delay)).await,
            }
            Ok(())
        })
    }

    fn vertex_action<'a>(&'a self, vertex: &'a str) -> HookFuture<'a> {
        Box::pin(async move {
            info!(vertex = %vertex, "vertex visited");
            self.sink
                .emit(vertex)
                .with_context(|| format!("writing vertex '{vertex}' to sink"))
        })
    }
}
