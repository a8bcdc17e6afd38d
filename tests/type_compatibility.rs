//! Integration tests for per-edge type compatibility (T001–T004),
//! including the chain search and adapter suggestions.

mod helpers;

use flow_validator::error::DiagnosticKind;
use flow_validator::expression::NullEvaluator;
use flow_validator::lattice::{DataKind, KindLattice};
use flow_validator::parse::types::Workflow;
use flow_validator::registry::InMemoryRegistry;
use flow_validator::validate::{validate, ValidationOptions, ValidationReport};

use helpers::{edge, edge_with_ports, node, port, port_with_facet, signature, test_registry, workflow};

fn run(workflow: &Workflow, registry: &InMemoryRegistry, max_cost: u32) -> ValidationReport {
    let options = ValidationOptions {
        max_coercion_cost: max_cost,
        ..ValidationOptions::default()
    };
    validate(workflow, registry, &NullEvaluator, &KindLattice::standard(), &options)
}

#[test]
fn same_kind_edge_is_compatible() {
    // Scenario A: text -> text
    let wf = workflow(
        vec![
            node("src", "text-source", &[], &["out"]),
            node("sink", "text-sink", &["in"], &[]),
        ],
        vec![edge("e1", "src", "sink")],
    );
    let report = run(&wf, &test_registry(), 10);
    assert!(report.valid, "{:?}", report.errors);

    let record = &report.edges["e1"].type_compatibility;
    assert!(record.compatible);
    assert!(record.subtyping);
    assert!(record.coercion_chain.is_empty());
    assert_eq!(record.total_cost, 0);
    assert_eq!(record.max_cost_bound, 10);
    assert!(report.edges["e1"].adapters.is_empty());
}

#[test]
fn subtype_edge_is_compatible_without_a_chain() {
    // markdown is a declared subtype of text
    let wf = workflow(
        vec![
            node("src", "markdown-source", &[], &["out"]),
            node("sink", "text-sink", &["in"], &[]),
        ],
        vec![edge("e1", "src", "sink")],
    );
    let report = run(&wf, &test_registry(), 10);
    assert!(report.valid, "{:?}", report.errors);

    let record = &report.edges["e1"].type_compatibility;
    assert_eq!(record.source_kind, DataKind::Markdown);
    assert_eq!(record.target_kind, DataKind::Text);
    assert!(record.compatible);
    assert!(record.subtyping);
    assert!(record.coercion_chain.is_empty());
}

#[test]
fn resolvable_mismatch_is_an_error_with_suggestions() {
    // Scenario C: clipboard -> json bridged via text at cost 2
    let wf = workflow(
        vec![
            node("src", "clipboard-source", &[], &["out"]),
            node("sink", "json-sink", &["in"], &[]),
        ],
        vec![edge("e1", "src", "sink")],
    );
    let report = run(&wf, &test_registry(), 10);
    assert!(!report.valid);

    let type_errors: Vec<_> = report
        .errors
        .iter()
        .filter(|e| e.kind == DiagnosticKind::TypeCompatibility)
        .collect();
    assert_eq!(type_errors.len(), 1, "{:?}", report.errors);
    assert_eq!(type_errors[0].code, "T002");

    let edge_report = &report.edges["e1"];
    let record = &edge_report.type_compatibility;
    assert!(!record.compatible);
    assert!(!record.subtyping);
    assert_eq!(record.coercion_chain.len(), 2);
    assert_eq!(record.total_cost, 2);
    let adapters: Vec<&str> = record.coercion_chain.iter().map(|c| c.adapter.as_str()).collect();
    assert_eq!(adapters, ["clipboard-to-text", "text-to-json"]);

    assert_eq!(edge_report.adapters.len(), 2);
    assert_eq!(edge_report.adapters[0].id, "e1-adapter-0");
    assert_eq!(edge_report.adapters[1].id, "e1-adapter-1");
    assert!(edge_report.adapters.iter().all(|a| !a.inserted));
}

#[test]
fn tight_bound_leaves_the_mismatch_unresolved() {
    // Scenario D: same edge, bound 1
    let wf = workflow(
        vec![
            node("src", "clipboard-source", &[], &["out"]),
            node("sink", "json-sink", &["in"], &[]),
        ],
        vec![edge("e1", "src", "sink")],
    );
    let report = run(&wf, &test_registry(), 1);
    assert!(!report.valid);

    let error = report
        .errors
        .iter()
        .find(|e| e.code == "T003")
        .expect("expected a no-chain error");
    assert!(error.message.contains("within cost bound 1"), "{}", error.message);

    let edge_report = &report.edges["e1"];
    assert!(edge_report.type_compatibility.coercion_chain.is_empty());
    assert!(edge_report.adapters.is_empty());
}

#[test]
fn facet_mismatch_downgrades_a_matching_kind_to_a_warning() {
    let mut registry = test_registry();
    registry.register(signature("json-source", vec![], vec![port(DataKind::Json)]));
    registry.register(signature(
        "invoice-sink",
        vec![port_with_facet(DataKind::Json, "schemaRef", "invoice-v2")],
        vec![],
    ));

    let wf = workflow(
        vec![
            node("src", "json-source", &[], &["out"]),
            node("sink", "invoice-sink", &["in"], &[]),
        ],
        vec![edge("e1", "src", "sink")],
    );
    let report = run(&wf, &registry, 10);

    assert!(report.valid, "facet mismatch is a warning, not an error: {:?}", report.errors);
    let warning = report
        .warnings
        .iter()
        .find(|w| w.code == "T004")
        .expect("expected a facet warning");
    assert!(warning.message.contains("schemaRef"), "{}", warning.message);

    let record = &report.edges["e1"].type_compatibility;
    assert!(!record.compatible);
    assert!(record.subtyping, "the kinds themselves still match");
    assert!(record.coercion_chain.is_empty());
}

#[test]
fn unknown_port_id_is_reported() {
    let wf = workflow(
        vec![
            node("src", "text-source", &[], &["out"]),
            node("sink", "text-sink", &["in"], &[]),
        ],
        vec![edge_with_ports("e1", "src", "nope", "sink", "in")],
    );
    let report = run(&wf, &test_registry(), 10);
    let error = report
        .errors
        .iter()
        .find(|e| e.code == "T001")
        .expect("expected an unknown-port error");
    assert!(error.message.contains("'nope'"), "{}", error.message);
    assert!(!report.edges.contains_key("e1"));
}

#[test]
fn omitted_port_id_needs_a_sole_port() {
    let wf = workflow(
        vec![
            node("src", "dual-source", &[], &["text", "link"]),
            node("sink", "text-sink", &["in"], &[]),
        ],
        vec![edge("e1", "src", "sink")],
    );
    let report = run(&wf, &test_registry(), 10);
    let error = report
        .errors
        .iter()
        .find(|e| e.code == "T001")
        .expect("expected an ambiguous-port error");
    assert!(error.message.contains("2 of them"), "{}", error.message);
}

#[test]
fn named_ports_on_a_multi_port_node_resolve() {
    let wf = workflow(
        vec![
            node("src", "dual-source", &[], &["text", "link"]),
            node("sink", "text-sink", &["in"], &[]),
        ],
        vec![edge_with_ports("e1", "src", "link", "sink", "in")],
    );
    let report = run(&wf, &test_registry(), 10);
    assert!(report.valid, "{:?}", report.errors);
    // uri is a subtype of text, so the second output connects cleanly
    let record = &report.edges["e1"].type_compatibility;
    assert_eq!(record.source_kind, DataKind::Uri);
    assert!(record.subtyping);
}
