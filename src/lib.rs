// src/lib.rs

pub mod cli;
pub mod config;
pub mod dag;
pub mod engine;
pub mod errors;
pub mod logging;
pub mod sink;
pub mod types;

use std::sync::Arc;

use anyhow::Result;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::cli::CliArgs;
use crate::config::load_graph;
use crate::dag::{Graph, VisitPlan};
use crate::engine::{DelayedVisit, FailurePolicy, TraversalOptions, run_with};
use crate::errors::DelayDagError;
use crate::sink::StdoutSink;

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - config loading and graph construction
/// - the default sleep-then-print hooks
/// - the traversal engine
/// - Ctrl-C handling
pub async fn run(args: CliArgs) -> Result<()> {
    let graph = load_graph(&args.config)?;

    if args.dry_run {
        print_dry_run(&graph, &args)?;
        return Ok(());
    }

    // Ctrl-C → stop waiting on edges.
    let cancel = CancellationToken::new();
    {
        let token = cancel.clone();
        tokio::spawn(async move {
            if let Err(e) = tokio::signal::ctrl_c().await {
                warn!(error = %e, "failed to listen for Ctrl+C");
                return;
            }
            info!("Ctrl+C received; cancelling traversal");
            token.cancel();
        });
    }

    let options = traversal_options(&args, cancel);
    let hooks = Arc::new(DelayedVisit::new(StdoutSink).with_unit(args.delay_unit));

    let summary = run_with(Arc::new(graph), hooks, options).await?;
    debug!(?summary, "run complete");
    Ok(())
}

/// Map the CLI flags onto [`TraversalOptions`].
pub fn traversal_options(args: &CliArgs, cancel: CancellationToken) -> TraversalOptions {
    let policy = if args.fail_fast {
        FailurePolicy::CancelSiblings
    } else {
        FailurePolicy::Continue
    };

    let mut options = TraversalOptions::default()
        .with_initial_delay(args.initial_delay)
        .with_cancellation(cancel)
        .with_failure_policy(policy);
    if let Some(ref start) = args.start {
        options = options.starting_at(start.clone());
    }
    options
}

/// Dry-run output: graph shape and the computed visit plan.
fn print_dry_run(graph: &Graph, args: &CliArgs) -> Result<()> {
    let start = args
        .start
        .as_deref()
        .or(graph.start())
        .ok_or_else(|| DelayDagError::ConfigError("graph has no start vertex".to_string()))?;
    let plan = VisitPlan::compute(graph, start, args.initial_delay)?;
    let unit = args.delay_unit;

    println!("delaydag dry-run");
    println!("  start = {start}");
    println!("  delay unit = {unit}");
    println!("  vertices = {}, edges = {}", graph.len(), graph.edge_count());
    println!();

    println!(
        "visit plan ({} visits, last at {}{unit}):",
        plan.len(),
        plan.makespan()
    );
    for visit in plan.visits() {
        match visit.parent {
            Some(ref parent) => {
                println!("  t={}{unit}\t{}\t(after {parent})", visit.at, visit.vertex)
            }
            None => println!("  t={}{unit}\t{}", visit.at, visit.vertex),
        }
    }

    debug!("dry-run complete (no traversal)");
    Ok(())
}
