// tests/real_time.rs

// These run on the real clock, like the binary does. Millisecond delays are
// close to the timer resolution, so any per-hop lag shows up as a reordering.

use std::sync::Arc;
use std::time::Duration;

use delaydag::dag::Graph;
use delaydag::engine::{DelayedVisit, EdgeWait, run};
use delaydag::sink::MemorySink;
use delaydag::types::DelayUnit;
use delaydag_test_utils::builders::{GraphConfigBuilder, VertexBuilder, interleaved_config};
use delaydag_test_utils::{init_tracing, with_timeout};
use tokio::time::Instant;

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn millisecond_waits_keep_deep_paths_in_order() {
    init_tracing();
    let graph = Arc::new(Graph::build(&interleaved_config()).unwrap());
    let sink = MemorySink::new();
    let hooks = Arc::new(DelayedVisit::new(sink.clone()).with_unit(DelayUnit::Millis));

    let summary = with_timeout(run(graph, hooks)).await.unwrap();

    // E sits three hops deep at t=4ms; G two hops deep at t=5ms.
    assert_eq!(sink.lines(), vec!["A", "C", "D", "B", "E", "G", "F"]);
    assert!(summary.elapsed >= Duration::from_millis(6));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn long_chain_keeps_pace_with_direct_edge() {
    init_tracing();
    // v0 -> v1 -> ... -> v8 at 2ms per hop (t=16ms) against v0 -> far (t=18ms).
    let mut cfg = GraphConfigBuilder::new().with_vertex(
        "v0",
        VertexBuilder::new().start().edge("v1", 2).edge("far", 18).build(),
    );
    for i in 1..8 {
        let next = format!("v{}", i + 1);
        cfg = cfg.with_vertex(&format!("v{i}"), VertexBuilder::new().edge(&next, 2).build());
    }
    let graph = cfg.with_leaf("v8").with_leaf("far").graph();

    let sink = MemorySink::new();
    let hooks = Arc::new(DelayedVisit::new(sink.clone()).with_unit(DelayUnit::Millis));
    with_timeout(run(graph, hooks)).await.unwrap();

    let lines = sink.lines();
    assert_eq!(lines.len(), 10);
    assert_eq!(lines[8], "v8");
    assert_eq!(lines[9], "far");
}

#[test]
fn edge_deadline_is_measured_from_origin() {
    let origin = Instant::now();
    let edge = EdgeWait {
        delay: 2,
        at: 5,
        origin,
    };

    assert_eq!(
        edge.deadline(DelayUnit::Millis),
        Some(origin + Duration::from_millis(5))
    );
    assert_eq!(
        edge.deadline(DelayUnit::Seconds),
        Some(origin + Duration::from_secs(5))
    );

    let unreachable = EdgeWait { at: u64::MAX, ..edge };
    assert_eq!(unreachable.deadline(DelayUnit::Seconds), None);
}
