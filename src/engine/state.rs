// src/engine/state.rs

//! Per-branch state machine.

use std::fmt;

/// Where a single recursive traversal call currently is.
///
/// Transitions are linear:
/// `PendingEdge -> VisitingVertex -> FanningOut -> Joining -> Done`.
/// A leaf skips `Joining`. Calling a transition from the wrong state leaves
/// the state unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BranchState {
    /// Waiting for the incoming edge's action to finish.
    PendingEdge,
    /// Running the vertex action.
    VisitingVertex,
    /// Vertex visited; children about to be launched.
    FanningOut,
    /// Waiting for `remaining` child subtrees to settle.
    Joining { remaining: usize },
    /// Subtree complete (successfully or not).
    Done,
}

impl BranchState {
    pub fn edge_elapsed(self) -> Self {
        match self {
            BranchState::PendingEdge => BranchState::VisitingVertex,
            other => other,
        }
    }

    pub fn visited(self) -> Self {
        match self {
            BranchState::VisitingVertex => BranchState::FanningOut,
            other => other,
        }
    }

    /// `launched` children were spawned; with none the branch is done.
    pub fn launched(self, launched: usize) -> Self {
        match self {
            BranchState::FanningOut if launched == 0 => BranchState::Done,
            BranchState::FanningOut => BranchState::Joining {
                remaining: launched,
            },
            other => other,
        }
    }

    /// One child subtree settled; the barrier releases at zero.
    pub fn child_settled(self) -> Self {
        match self {
            BranchState::Joining { remaining } if remaining <= 1 => BranchState::Done,
            BranchState::Joining { remaining } => BranchState::Joining {
                remaining: remaining - 1,
            },
            other => other,
        }
    }

    pub fn is_done(self) -> bool {
        self == BranchState::Done
    }
}

impl Default for BranchState {
    fn default() -> Self {
        BranchState::PendingEdge
    }
}

impl fmt::Display for BranchState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BranchState::PendingEdge => f.write_str("pending-edge"),
            BranchState::VisitingVertex => f.write_str("visiting-vertex"),
            BranchState::FanningOut => f.write_str("fanning-out"),
            BranchState::Joining { remaining } => write!(f, "joining({remaining})"),
            BranchState::Done => f.write_str("done"),
        }
    }
}
