//! Tests for the validator checks and diagnostic ordering.
mod common;
use common::*;
use weft::prelude::*;

#[test]
fn test_valid_graph_has_no_diagnostics() {
    let graph = create_merged_pair();
    let report = Validator::new(&graph).run();

    assert!(report.is_valid());
    assert!(report.diagnostics.is_empty());
}

#[test]
fn test_dangling_edge_detected() {
    let graph = MergedGraph::new(
        vec![graph_node("flow", "start", NodeKind::Trigger)],
        vec![main_edge("flow.start", "flow.ghost")],
    );
    let report = Validator::new(&graph).run();

    assert!(!report.is_valid());
    let dangling: Vec<_> = report
        .diagnostics
        .iter()
        .filter(|d| d.code == DiagnosticCode::DanglingEdge)
        .collect();
    assert_eq!(dangling.len(), 1);
    assert_eq!(dangling[0].severity, Severity::Error);
    assert_eq!(dangling[0].node_ids, vec!["flow.ghost".to_string()]);
}

#[test]
fn test_no_entry_point() {
    let graph = MergedGraph::new(
        vec![
            graph_node("flow", "a", NodeKind::Action),
            graph_node("flow", "b", NodeKind::Action),
        ],
        vec![main_edge("flow.a", "flow.b")],
    );
    let report = Validator::new(&graph).run();

    assert!(!report.is_valid());
    assert!(
        report
            .diagnostics
            .iter()
            .any(|d| d.code == DiagnosticCode::NoEntryPoint)
    );
}

#[test]
fn test_trigger_with_inbound_edge() {
    let graph = MergedGraph::new(
        vec![
            graph_node("flow", "first", NodeKind::Trigger),
            graph_node("flow", "second", NodeKind::Trigger),
        ],
        vec![main_edge("flow.first", "flow.second")],
    );
    let report = Validator::new(&graph).run();

    let bad: Vec<_> = report
        .diagnostics
        .iter()
        .filter(|d| d.code == DiagnosticCode::InvalidTriggerTopology)
        .collect();
    assert_eq!(bad.len(), 1);
    assert_eq!(bad[0].node_ids, vec!["flow.second".to_string()]);
}

#[test]
fn test_inbound_error_edge_also_disqualifies_trigger() {
    let graph = MergedGraph::new(
        vec![
            graph_node("flow", "start", NodeKind::Trigger),
            graph_node("flow", "work", NodeKind::Action),
        ],
        vec![
            main_edge("flow.start", "flow.work"),
            error_edge("flow.work", "flow.start"),
        ],
    );
    let report = Validator::new(&graph).run();

    assert!(
        report
            .diagnostics
            .iter()
            .any(|d| d.code == DiagnosticCode::InvalidTriggerTopology)
    );
}

#[test]
fn test_orphan_node_is_warning_by_default() {
    let graph = MergedGraph::new(
        vec![
            graph_node("flow", "start", NodeKind::Trigger),
            graph_node("flow", "staged", NodeKind::Action),
        ],
        vec![],
    );
    let report = Validator::new(&graph).run();

    let orphans: Vec<_> = report
        .diagnostics
        .iter()
        .filter(|d| d.code == DiagnosticCode::OrphanNode)
        .collect();
    assert_eq!(orphans.len(), 1);
    assert_eq!(orphans[0].severity, Severity::Warning);
    // Warnings do not block validity.
    assert!(report.is_valid());
}

#[test]
fn test_orphan_severity_is_configurable() {
    let graph = MergedGraph::new(
        vec![
            graph_node("flow", "start", NodeKind::Trigger),
            graph_node("flow", "staged", NodeKind::Action),
        ],
        vec![],
    );
    let options = ValidationOptions {
        orphan_severity: Severity::Error,
    };
    let report = Validator::with_options(&graph, options).run();

    assert!(!report.is_valid());
}

#[test]
fn test_error_edges_do_not_count_for_reachability() {
    let graph = MergedGraph::new(
        vec![
            graph_node("flow", "start", NodeKind::Trigger),
            graph_node("flow", "handler", NodeKind::Action),
        ],
        vec![error_edge("flow.start", "flow.handler")],
    );
    let report = Validator::new(&graph).run();

    assert!(
        report
            .diagnostics
            .iter()
            .any(|d| d.code == DiagnosticCode::OrphanNode
                && d.node_ids == vec!["flow.handler".to_string()])
    );
}

#[test]
fn test_terminal_with_outbound_main_edge() {
    let graph = MergedGraph::new(
        vec![
            graph_node("flow", "start", NodeKind::Trigger),
            graph_node("flow", "end", NodeKind::Terminal),
            graph_node("flow", "after", NodeKind::Action),
        ],
        vec![
            main_edge("flow.start", "flow.end"),
            main_edge("flow.end", "flow.after"),
        ],
    );
    let report = Validator::new(&graph).run();

    let bad: Vec<_> = report
        .diagnostics
        .iter()
        .filter(|d| d.code == DiagnosticCode::InvalidTerminalTopology)
        .collect();
    assert_eq!(bad.len(), 1);
    assert_eq!(bad[0].node_ids, vec!["flow.end".to_string()]);
}

#[test]
fn test_terminal_outbound_error_edge_is_legal() {
    let graph = MergedGraph::new(
        vec![
            graph_node("flow", "start", NodeKind::Trigger),
            graph_node("flow", "end", NodeKind::Terminal),
            graph_node("flow", "cleanup", NodeKind::Action),
        ],
        vec![
            main_edge("flow.start", "flow.end"),
            error_edge("flow.end", "flow.cleanup"),
        ],
    );
    let report = Validator::new(&graph).run();

    assert!(
        !report
            .diagnostics
            .iter()
            .any(|d| d.code == DiagnosticCode::InvalidTerminalTopology)
    );
}

#[test]
fn test_cycle_through_merge_point_is_allowed() {
    let graph = create_cycle_graph(NodeKind::MergePoint);
    let report = Validator::new(&graph).run();

    assert!(
        !report
            .diagnostics
            .iter()
            .any(|d| d.code == DiagnosticCode::UnintendedCycle)
    );
    assert!(report.is_valid());
}

#[test]
fn test_cycle_without_merge_point_is_flagged() {
    let graph = create_cycle_graph(NodeKind::Action);
    let report = Validator::new(&graph).run();

    let cycles: Vec<_> = report
        .diagnostics
        .iter()
        .filter(|d| d.code == DiagnosticCode::UnintendedCycle)
        .collect();
    assert_eq!(cycles.len(), 1);
    assert_eq!(
        cycles[0].node_ids,
        vec!["flow.b".to_string(), "flow.c".to_string()]
    );
    assert!(!report.is_valid());
}

#[test]
fn test_self_loop_is_flagged() {
    let graph = MergedGraph::new(
        vec![
            graph_node("flow", "start", NodeKind::Trigger),
            graph_node("flow", "spin", NodeKind::Action),
        ],
        vec![
            main_edge("flow.start", "flow.spin"),
            main_edge("flow.spin", "flow.spin"),
        ],
    );
    let report = Validator::new(&graph).run();

    assert!(
        report
            .diagnostics
            .iter()
            .any(|d| d.code == DiagnosticCode::UnintendedCycle)
    );
}

#[test]
fn test_self_loop_on_merge_point_is_allowed() {
    let graph = MergedGraph::new(
        vec![
            graph_node("flow", "start", NodeKind::Trigger),
            graph_node("flow", "batch", NodeKind::MergePoint),
        ],
        vec![
            main_edge("flow.start", "flow.batch"),
            main_edge("flow.batch", "flow.batch"),
        ],
    );
    let report = Validator::new(&graph).run();

    assert!(
        !report
            .diagnostics
            .iter()
            .any(|d| d.code == DiagnosticCode::UnintendedCycle)
    );
}

#[test]
fn test_duplicate_identifiers_violate_invariant() {
    // Built outside the merge engine on purpose; merging cannot produce this.
    let graph = MergedGraph::new(
        vec![
            graph_node("flow", "twin", NodeKind::Trigger),
            graph_node("flow", "twin", NodeKind::Action),
        ],
        vec![],
    );
    let report = Validator::new(&graph).run();

    assert!(!report.is_valid());
    assert!(
        report
            .diagnostics
            .iter()
            .any(|d| d.code == DiagnosticCode::InternalInvariantViolation)
    );
}

#[test]
fn test_all_checks_run_without_early_exit() {
    // One graph with several unrelated defects: a dangling edge, a cycle,
    // and an orphan. Every check must still report.
    let graph = MergedGraph::new(
        vec![
            graph_node("flow", "start", NodeKind::Trigger),
            graph_node("flow", "u", NodeKind::Action),
            graph_node("flow", "v", NodeKind::Action),
            graph_node("flow", "staged", NodeKind::Action),
        ],
        vec![
            main_edge("flow.start", "flow.u"),
            main_edge("flow.u", "flow.v"),
            main_edge("flow.v", "flow.u"),
            main_edge("flow.start", "flow.ghost"),
        ],
    );
    let report = Validator::new(&graph).run();

    let codes: Vec<DiagnosticCode> = report.diagnostics.iter().map(|d| d.code).collect();
    assert!(codes.contains(&DiagnosticCode::DanglingEdge));
    assert!(codes.contains(&DiagnosticCode::UnintendedCycle));
    assert!(codes.contains(&DiagnosticCode::OrphanNode));
}

#[test]
fn test_diagnostics_are_sorted_by_code_then_identifier() {
    let graph = MergedGraph::new(
        vec![
            graph_node("flow", "start", NodeKind::Trigger),
            graph_node("flow", "b-staged", NodeKind::Action),
            graph_node("flow", "a-staged", NodeKind::Action),
        ],
        vec![main_edge("flow.start", "flow.ghost")],
    );
    let report = Validator::new(&graph).run();

    // DanglingEdge sorts before OrphanNode; the two orphans sort by id.
    let codes: Vec<&str> = report
        .diagnostics
        .iter()
        .map(|d| d.code.as_str())
        .collect();
    let mut sorted = codes.clone();
    sorted.sort();
    assert_eq!(codes, sorted);

    let orphan_ids: Vec<_> = report
        .diagnostics
        .iter()
        .filter(|d| d.code == DiagnosticCode::OrphanNode)
        .map(|d| d.node_ids[0].clone())
        .collect();
    assert_eq!(
        orphan_ids,
        vec!["flow.a-staged".to_string(), "flow.b-staged".to_string()]
    );
}
