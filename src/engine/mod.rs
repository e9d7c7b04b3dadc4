// src/engine/mod.rs

//! Traversal engine for delaydag.
//!
//! This module ties together:
//! - the hook capability the engine calls at every step ([`hooks`])
//! - the per-branch state machine ([`state`])
//! - the concurrent walker with its join barriers and cancellation
//!   ([`traversal`])

pub mod hooks;
pub mod state;
pub mod traversal;

pub use hooks::{DelayedVisit, EdgeWait, HookFuture, TraversalHooks};
pub use state::BranchState;
pub use traversal::{FailurePolicy, TraversalOptions, TraversalSummary, run, run_with};
