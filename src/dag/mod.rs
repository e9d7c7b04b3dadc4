// src/dag/mod.rs

//! Graph model and static planning.
//!
//! - [`graph`] holds the immutable adjacency structure and start vertex.
//! - [`plan`] computes the virtual visit time of every reachable vertex
//!   without running anything.

pub mod graph;
pub mod plan;

pub use graph::{Children, Graph};
pub use plan::{PlannedVisit, VisitPlan};
