// src/cli.rs

//! CLI argument parsing using `clap`.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::types::{Delay, DelayUnit, VertexId};

/// Command-line arguments for `delaydag`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "delaydag",
    version,
    about = "Walk a weighted DAG, visiting each vertex once its edge delay has elapsed.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the graph config (TOML, or JSON when the file ends in `.json`).
    #[arg(value_name = "CONFIG")]
    pub config: PathBuf,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `DELAYDAG_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Parse + validate, print the visit plan, but don't traverse.
    #[arg(long)]
    pub dry_run: bool,

    /// Start from this vertex instead of the one marked `start = true`.
    #[arg(long, value_name = "ID")]
    pub start: Option<VertexId>,

    /// Delay applied before visiting the start vertex.
    #[arg(long, value_name = "N", default_value_t = 0)]
    pub initial_delay: Delay,

    /// Unit of edge delays.
    #[arg(long, value_enum, value_name = "UNIT", default_value_t = DelayUnit::Seconds)]
    pub delay_unit: DelayUnit,

    /// Cancel all outstanding branches as soon as one fails.
    #[arg(long)]
    pub fail_fast: bool,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// `EnvFilter` directive for this level.
    pub fn directive(self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
