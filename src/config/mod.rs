// src/config/mod.rs

//! Configuration loading and validation for delaydag.
//!
//! Responsibilities:
//! - Define the serde-backed data model (`model.rs`).
//! - Load a config file from disk, as TOML or JSON (`loader.rs`).
//! - Validate start markers and delays (`validate.rs`).

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{ConfigFormat, load_from_path, load_graph, parse_str};
pub use model::{GraphConfig, VertexConfig};
pub use validate::validate_config;
