//! End-to-end tests: raw pairs through matrices and graphs to reports.

use affinity_core::{
    AnalysisConfig, AnalysisError, LabelOrder, NodeRole, Projection, WeightedPair,
};
use affinity_metrics::{GraphKind, Measure, UndefinedReason, run_analysis};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn pairs(raw: &[(&str, &str, f64)]) -> Vec<WeightedPair> {
    raw.iter()
        .map(|(s, t, w)| WeightedPair::new(*s, *t, *w))
        .collect()
}

#[test]
fn three_pair_scenario() {
    init_tracing();
    let input = pairs(&[("S1", "T1", 1.0), ("S1", "T2", 1.0), ("S2", "T1", 1.0)]);
    let run = run_analysis(&input, &AnalysisConfig::default()).expect("analysis");

    // Incidence matrix.
    let inc = run.incidence().table();
    assert_eq!(inc.row_labels(), ["S1", "S2"]);
    assert_eq!(inc.col_labels(), ["T1", "T2"]);
    assert_eq!(inc.get("S1", "T1"), Some(1.0));
    assert_eq!(inc.get("S1", "T2"), Some(1.0));
    assert_eq!(inc.get("S2", "T1"), Some(1.0));
    assert_eq!(inc.get("S2", "T2"), Some(0.0));

    // Similarity: S1·S2 = 1*1 + 1*0.
    assert_eq!(run.similarity().table().get("S1", "S2"), Some(1.0));
    assert_eq!(run.similarity().table().get("S1", "S1"), Some(0.0));
    let sim_graph = run.graph(GraphKind::Similarity);
    assert_eq!(sim_graph.edge_count(), 1);
    let s1 = sim_graph.node_index(NodeRole::Source, "S1").expect("S1");
    let s2 = sim_graph.node_index(NodeRole::Source, "S2").expect("S2");
    assert_eq!(sim_graph.edge_weight(s1, s2), Some(1.0));

    // Co-occurrence: T1·T2 = 1*1 + 1*0.
    assert_eq!(run.cooccurrence().table().get("T1", "T2"), Some(1.0));
    let co_graph = run.graph(GraphKind::CoOccurrence);
    assert_eq!(co_graph.edge_count(), 1);
    let t1 = co_graph.node_index(NodeRole::Target, "T1").expect("T1");
    let t2 = co_graph.node_index(NodeRole::Target, "T2").expect("T2");
    assert_eq!(co_graph.edge_weight(t1, t2), Some(1.0));

    // Incidence graph: 4 nodes, 3 edges, density 3/6.
    let report = run.report(GraphKind::Incidence);
    assert_eq!(report.node_count, 4);
    assert_eq!(report.edge_count, 3);
    assert!((report.density - 0.5).abs() < 1e-12);

    // S2 - T1 - S1 - T2 is a path of four.
    assert_eq!(report.diameter, Measure::Defined(3));
    let avg = report.average_path_length.value().copied().expect("connected");
    assert!((avg - 10.0 / 6.0).abs() < 1e-12);
}

#[test]
fn empty_input_fails_fast() {
    let err = run_analysis(&[], &AnalysisConfig::default()).expect_err("empty input");
    assert_eq!(err, AnalysisError::EmptyInput);
    assert_eq!(err.code().code(), "E2001");
}

#[test]
fn negative_weight_fails_fast() {
    let input = pairs(&[("S1", "T1", 1.0), ("S2", "T1", -0.5)]);
    let err = run_analysis(&input, &AnalysisConfig::default()).expect_err("negative weight");
    assert!(matches!(err, AnalysisError::InvalidWeight { .. }));
}

#[test]
fn single_source_degrades_gracefully() {
    let input = pairs(&[("only", "x", 1.0), ("only", "y", 2.0)]);
    let run = run_analysis(&input, &AnalysisConfig::default()).expect("analysis");

    let sim = run.report(GraphKind::Similarity);
    assert_eq!(sim.node_count, 1);
    assert_eq!(sim.edge_count, 0);
    assert!((sim.density - 0.0).abs() < f64::EPSILON);
    assert_eq!(
        sim.average_clustering,
        Measure::Undefined(UndefinedReason::SingleNode)
    );
    assert_eq!(sim.diameter, Measure::Undefined(UndefinedReason::SingleNode));

    let co = run.report(GraphKind::CoOccurrence);
    assert_eq!(co.node_count, 2);
    assert_eq!(co.edge_count, 1);
    assert_eq!(co.diameter, Measure::Defined(1));
}

#[test]
fn disjoint_interactions_are_disconnected() {
    let input = pairs(&[("a", "x", 1.0), ("b", "y", 1.0)]);
    let run = run_analysis(&input, &AnalysisConfig::default()).expect("analysis");

    for (kind, graph, report) in run.reports() {
        assert!(graph.node_count() >= 2, "{kind}");
        assert_eq!(
            report.diameter,
            Measure::Undefined(UndefinedReason::Disconnected),
            "{kind}"
        );
    }
    assert_eq!(run.graph(GraphKind::Similarity).edge_count(), 0);
}

#[test]
fn reports_are_in_pipeline_order() {
    let input = pairs(&[("a", "x", 1.0)]);
    let run = run_analysis(&input, &AnalysisConfig::default()).expect("analysis");
    let kinds: Vec<GraphKind> = run.reports().map(|(kind, _, _)| kind).collect();
    assert_eq!(
        kinds,
        [GraphKind::Incidence, GraphKind::Similarity, GraphKind::CoOccurrence]
    );
}

#[test]
fn repeated_runs_are_identical() {
    let input = pairs(&[
        ("u2", "g1", 3.0),
        ("u1", "g2", 1.0),
        ("u3", "g1", 2.0),
        ("u1", "g1", 4.0),
        ("u2", "g2", 0.5),
    ]);
    let mut shuffled = input.clone();
    shuffled.reverse();

    let config = AnalysisConfig::default();
    let a = run_analysis(&input, &config).expect("first run");
    let b = run_analysis(&shuffled, &config).expect("second run");

    assert_eq!(a.incidence().content_hash(), b.incidence().content_hash());
    assert_eq!(a.similarity(), b.similarity());
    assert_eq!(a.report(GraphKind::Incidence), b.report(GraphKind::Incidence));
}

#[test]
fn first_seen_order_is_respected() {
    let mut config = AnalysisConfig::default();
    config.labels.order = LabelOrder::FirstSeen;
    let input = pairs(&[("zed", "b", 1.0), ("amy", "a", 1.0), ("zed", "a", 1.0)]);
    let run = run_analysis(&input, &config).expect("analysis");

    assert_eq!(run.incidence().table().row_labels(), ["zed", "amy"]);
    assert_eq!(run.incidence().table().col_labels(), ["b", "a"]);
    assert_eq!(run.similarity().table().row_labels(), ["zed", "amy"]);
}

#[test]
fn display_has_one_section_per_graph() {
    let input = pairs(&[("S1", "T1", 1.0), ("S1", "T2", 1.0), ("S2", "T1", 1.0)]);
    let run = run_analysis(&input, &AnalysisConfig::default()).expect("analysis");
    let rendered = run.to_string();

    assert!(rendered.contains("== Incidence graph (sources x targets) =="));
    assert!(rendered.contains("== Similarity graph (sources) =="));
    assert!(rendered.contains("== Co-occurrence graph (targets) =="));
    assert!(rendered.contains("Density: 0.5000"));
}

#[test]
fn run_serializes_for_persistence() {
    let input = pairs(&[("S1", "T1", 1.0), ("S2", "T1", 2.0)]);
    let run = run_analysis(&input, &AnalysisConfig::default()).expect("analysis");
    let json = serde_json::to_value(&run).expect("serialize run");

    assert_eq!(json["incidence"]["table"]["rows"], serde_json::json!(["S1", "S2"]));
    assert_eq!(
        json["similarity"]["table"]["values"],
        serde_json::json!([[0.0, 2.0], [2.0, 0.0]])
    );
    assert_eq!(json["incidence_report"]["node_count"], 3);
    assert_eq!(
        json["similarity_report"]["diameter"],
        serde_json::json!({"status": "defined", "value": 1})
    );
}
