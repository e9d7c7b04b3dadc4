// tests/config_loading.rs

use std::io::Write;

use delaydag::config::{ConfigFormat, load_from_path, load_graph, parse_str};
use delaydag::dag::Graph;
use delaydag::errors::DelayDagError;
use delaydag_test_utils::builders::{GraphConfigBuilder, VertexBuilder, fan_out_config};
use tempfile::{Builder, NamedTempFile};

fn temp_config(suffix: &str, contents: &str) -> NamedTempFile {
    let mut file = Builder::new().suffix(suffix).tempfile().unwrap();
    write!(file, "{contents}").unwrap();
    file
}

fn expect_config_error(result: delaydag::errors::Result<Graph>) -> String {
    match result {
        Err(DelayDagError::ConfigError(msg)) => msg,
        Err(e) => panic!("Expected ConfigError, got: {:?}", e),
        Ok(g) => panic!("Expected error, got Ok({:?})", g),
    }
}

#[test]
fn toml_config_builds_graph() {
    let file = temp_config(
        ".toml",
        r#"
[A]
start = true
edges = { B = 5, C = 7 }

[B]
edges = {}

[C]
edges = {}
"#,
    );

    let graph = load_graph(file.path()).unwrap();

    assert_eq!(graph.start(), Some("A"));
    assert_eq!(graph.len(), 3);
    assert_eq!(graph.edge_count(), 2);
    let children = graph.children("A").unwrap();
    assert_eq!(children.get("B"), Some(&5));
    assert_eq!(children.get("C"), Some(&7));
    assert!(graph.children("B").unwrap().is_empty());
}

#[test]
fn json_config_matches_toml_config() {
    let file = temp_config(
        ".json",
        r#"{
            "A": {"start": true, "edges": {"B": 5, "C": 7}},
            "B": {"edges": {}},
            "C": {"edges": {}}
        }"#,
    );

    let from_json = load_graph(file.path()).unwrap();
    let from_builder = Graph::build(&fan_out_config()).unwrap();

    assert_eq!(from_json, from_builder);
}

#[test]
fn format_follows_extension() {
    assert_eq!(ConfigFormat::from_path("dag.json".as_ref()), ConfigFormat::Json);
    assert_eq!(ConfigFormat::from_path("dag.JSON".as_ref()), ConfigFormat::Json);
    assert_eq!(ConfigFormat::from_path("dag.toml".as_ref()), ConfigFormat::Toml);
    assert_eq!(ConfigFormat::from_path("dag".as_ref()), ConfigFormat::Toml);
}

#[test]
fn missing_start_marker_is_rejected() {
    let cfg = GraphConfigBuilder::new()
        .with_vertex("A", VertexBuilder::new().edge("B", 5).edge("C", 7).build())
        .with_leaf("B")
        .with_leaf("C")
        .build();

    let msg = expect_config_error(Graph::build(&cfg));
    assert!(msg.contains("start"), "{msg}");
}

#[test]
fn explicit_false_start_is_rejected() {
    let cfg = parse_str(
        r#"{"A": {"start": false, "edges": {"B": 5, "C": 7}},
            "B": {"edges": {}}, "C": {"edges": {}}}"#,
        ConfigFormat::Json,
    )
    .unwrap();

    expect_config_error(Graph::build(&cfg));
}

#[test]
fn multiple_start_markers_are_rejected() {
    let cfg = GraphConfigBuilder::new()
        .with_vertex("A", VertexBuilder::new().start().edge("B", 1).build())
        .with_vertex("B", VertexBuilder::new().start().build())
        .build();

    let msg = expect_config_error(Graph::build(&cfg));
    assert!(msg.contains("found 2"), "{msg}");
    assert!(msg.contains("A") && msg.contains("B"), "{msg}");
}

#[test]
fn negative_delay_is_rejected() {
    let cfg = GraphConfigBuilder::new()
        .with_vertex("A", VertexBuilder::new().start().edge("B", -1).build())
        .with_leaf("B")
        .build();

    let msg = expect_config_error(Graph::build(&cfg));
    assert!(msg.contains("negative delay"), "{msg}");
    assert!(msg.contains("'A' -> 'B'"), "{msg}");
}

#[test]
fn empty_config_is_rejected() {
    let cfg = GraphConfigBuilder::new().build();
    expect_config_error(Graph::build(&cfg));
}

#[test]
fn edge_targets_without_section_are_inserted() {
    let cfg = GraphConfigBuilder::new()
        .with_vertex("A", VertexBuilder::new().start().edge("B", 2).build())
        .build();

    let graph = Graph::build(&cfg).unwrap();

    assert!(graph.contains("B"));
    assert!(graph.children("B").unwrap().is_empty());
    assert_eq!(graph.vertices().collect::<Vec<_>>(), vec!["A", "B"]);
}

#[test]
fn unknown_vertex_lookup_fails() {
    let graph = Graph::build(&fan_out_config()).unwrap();

    match graph.children("Z") {
        Err(DelayDagError::UnknownVertex(id)) => assert_eq!(id, "Z"),
        other => panic!("Expected UnknownVertex, got {:?}", other),
    }
}

#[test]
fn missing_edges_field_is_a_parse_error() {
    let file = temp_config(".toml", "[A]\nstart = true\n");

    match load_from_path(file.path()) {
        Err(DelayDagError::TomlError(e)) => assert!(e.to_string().contains("edges")),
        other => panic!("Expected TomlError, got {:?}", other),
    }
}

#[test]
fn unknown_vertex_field_is_a_parse_error() {
    let result = parse_str(
        r#"{"A": {"start": true, "edges": {}, "weight": 3}}"#,
        ConfigFormat::Json,
    );

    assert!(matches!(result, Err(DelayDagError::JsonError(_))));
}

#[test]
fn missing_file_is_an_io_error() {
    let result = load_graph("/definitely/not/here/dag.toml");
    assert!(matches!(result, Err(DelayDagError::IoError(_))));
}
