//! Validator: decides whether a merged graph is executable-ready.
//!
//! All checks are independent and all of them run on every invocation; the
//! validator enumerates every defect instead of stopping at the first one.
//! It never aborts the pipeline: the result is a [`ValidationReport`], not
//! an error.

pub mod diagnostic;

pub use diagnostic::{Diagnostic, DiagnosticCode, Severity, ValidationReport};

use crate::graph::{EdgeKind, MergedGraph, NodeKind};
use ahash::AHashMap;
use itertools::Itertools;
use log::debug;

/// Tunable validation policy.
#[derive(Debug, Clone, Copy)]
pub struct ValidationOptions {
    /// Severity assigned to unreachable nodes. Defaults to `Warning`:
    /// orphan nodes may be intentionally staged for future wiring, but a
    /// stricter host can raise this to `Error`.
    pub orphan_severity: Severity,
}

impl Default for ValidationOptions {
    fn default() -> Self {
        Self {
            orphan_severity: Severity::Warning,
        }
    }
}

/// Runs the structural checks of a merged graph and collects diagnostics.
pub struct Validator<'a> {
    graph: &'a MergedGraph,
    options: ValidationOptions,
}

impl<'a> Validator<'a> {
    pub fn new(graph: &'a MergedGraph) -> Self {
        Self::with_options(graph, ValidationOptions::default())
    }

    pub fn with_options(graph: &'a MergedGraph, options: ValidationOptions) -> Self {
        Self { graph, options }
    }

    /// Runs every check and returns the findings in stable order
    /// (check code, then offending node/edge identifiers).
    pub fn run(&self) -> ValidationReport {
        let mut diagnostics = Vec::new();

        self.check_identifier_uniqueness(&mut diagnostics);
        self.check_referential_integrity(&mut diagnostics);
        self.check_triggers(&mut diagnostics);
        self.check_reachability(&mut diagnostics);
        self.check_terminals(&mut diagnostics);
        self.check_cycles(&mut diagnostics);

        diagnostics.sort_by(|a, b| {
            (a.code.as_str(), &a.node_ids, &a.edge_refs, &a.message).cmp(&(
                b.code.as_str(),
                &b.node_ids,
                &b.edge_refs,
                &b.message,
            ))
        });

        debug!(
            "validation finished: {} error(s), {} warning(s)",
            diagnostics.iter().filter(|d| d.severity.is_error()).count(),
            diagnostics
                .iter()
                .filter(|d| d.severity.is_warning())
                .count()
        );

        ValidationReport { diagnostics }
    }

    /// Identifier uniqueness holds by construction after a merge; a
    /// violation here means the graph was built outside the merge engine
    /// or the engine itself broke.
    fn check_identifier_uniqueness(&self, out: &mut Vec<Diagnostic>) {
        let mut counts: AHashMap<&str, usize> = AHashMap::new();
        for node in self.graph.nodes() {
            *counts.entry(node.id.as_str()).or_default() += 1;
        }
        for (id, count) in counts {
            if count > 1 {
                out.push(Diagnostic {
                    severity: Severity::Error,
                    code: DiagnosticCode::InternalInvariantViolation,
                    message: format!("Node identifier '{}' appears {} times", id, count),
                    node_ids: vec![id.to_string()],
                    edge_refs: vec![],
                });
            }
        }
    }

    fn check_referential_integrity(&self, out: &mut Vec<Diagnostic>) {
        for edge in self.graph.edges() {
            for endpoint in [&edge.source, &edge.target] {
                if !self.graph.contains_node(endpoint) {
                    out.push(Diagnostic {
                        severity: Severity::Error,
                        code: DiagnosticCode::DanglingEdge,
                        message: format!(
                            "Edge '{}' references missing node '{}'",
                            edge, endpoint
                        ),
                        node_ids: vec![endpoint.clone()],
                        edge_refs: vec![edge.to_string()],
                    });
                }
            }
        }
    }

    fn check_triggers(&self, out: &mut Vec<Diagnostic>) {
        let triggers = self.graph.trigger_nodes();
        if triggers.is_empty() {
            out.push(Diagnostic {
                severity: Severity::Error,
                code: DiagnosticCode::NoEntryPoint,
                message: "Graph contains no trigger node".to_string(),
                node_ids: vec![],
                edge_refs: vec![],
            });
            return;
        }

        // Inbound edges of either kind disqualify a trigger.
        let mut inbound: AHashMap<&str, usize> = AHashMap::new();
        for edge in self.graph.edges() {
            *inbound.entry(edge.target.as_str()).or_default() += 1;
        }
        for trigger in triggers {
            let count = inbound.get(trigger.id.as_str()).copied().unwrap_or(0);
            if count > 0 {
                out.push(Diagnostic {
                    severity: Severity::Error,
                    code: DiagnosticCode::InvalidTriggerTopology,
                    message: format!(
                        "Trigger '{}' has {} inbound edge(s)",
                        trigger.id, count
                    ),
                    node_ids: vec![trigger.id.clone()],
                    edge_refs: vec![],
                });
            }
        }
    }

    fn check_reachability(&self, out: &mut Vec<Diagnostic>) {
        let roots: Vec<&str> = self
            .graph
            .trigger_nodes()
            .iter()
            .map(|n| n.id.as_str())
            .collect();
        let reachable = self.graph.reachable_from(roots);

        for node in self.graph.nodes() {
            if node.kind != NodeKind::Trigger && !reachable.contains(&node.id) {
                out.push(Diagnostic {
                    severity: self.options.orphan_severity,
                    code: DiagnosticCode::OrphanNode,
                    message: format!(
                        "Node '{}' is not reachable from any trigger over main edges",
                        node.id
                    ),
                    node_ids: vec![node.id.clone()],
                    edge_refs: vec![],
                });
            }
        }
    }

    fn check_terminals(&self, out: &mut Vec<Diagnostic>) {
        let mut outbound_main: AHashMap<&str, usize> = AHashMap::new();
        for edge in self.graph.edges() {
            if edge.kind == EdgeKind::Main {
                *outbound_main.entry(edge.source.as_str()).or_default() += 1;
            }
        }
        for node in self.graph.nodes() {
            if node.kind != NodeKind::Terminal {
                continue;
            }
            let count = outbound_main.get(node.id.as_str()).copied().unwrap_or(0);
            if count > 0 {
                out.push(Diagnostic {
                    severity: Severity::Error,
                    code: DiagnosticCode::InvalidTerminalTopology,
                    message: format!(
                        "Terminal '{}' has {} outbound main edge(s)",
                        node.id, count
                    ),
                    node_ids: vec![node.id.clone()],
                    edge_refs: vec![],
                });
            }
        }
    }

    /// A cycle composed entirely of non-merge-point nodes exists exactly
    /// when the main-edge subgraph without merge-point nodes still contains
    /// a cycle, so merge-point nodes are deleted first and any strongly
    /// connected component of the remainder with a cycle is flagged.
    fn check_cycles(&self, out: &mut Vec<Diagnostic>) {
        let mut ids: Vec<&str> = Vec::new();
        let mut positions: AHashMap<&str, usize> = AHashMap::new();
        for node in self.graph.nodes() {
            if node.kind == NodeKind::MergePoint || positions.contains_key(node.id.as_str()) {
                continue;
            }
            positions.insert(node.id.as_str(), ids.len());
            ids.push(node.id.as_str());
        }

        let mut adjacency: Vec<Vec<usize>> = vec![Vec::new(); ids.len()];
        let mut self_loop = vec![false; ids.len()];
        for edge in self.graph.edges() {
            if edge.kind != EdgeKind::Main {
                continue;
            }
            let (Some(&from), Some(&to)) = (
                positions.get(edge.source.as_str()),
                positions.get(edge.target.as_str()),
            ) else {
                continue;
            };
            if from == to {
                self_loop[from] = true;
            }
            adjacency[from].push(to);
        }

        for component in strongly_connected_components(&adjacency) {
            let cyclic = component.len() > 1 || self_loop[component[0]];
            if !cyclic {
                continue;
            }
            let members: Vec<String> = component
                .iter()
                .map(|&i| ids[i].to_string())
                .sorted()
                .collect();
            out.push(Diagnostic {
                severity: Severity::Error,
                code: DiagnosticCode::UnintendedCycle,
                message: format!(
                    "Cycle with no merge-point node through: {}",
                    members.iter().join(", ")
                ),
                node_ids: members,
                edge_refs: vec![],
            });
        }
    }
}

/// Tarjan's algorithm over an index-based adjacency list.
fn strongly_connected_components(adjacency: &[Vec<usize>]) -> Vec<Vec<usize>> {
    struct State<'g> {
        adjacency: &'g [Vec<usize>],
        index: Vec<Option<usize>>,
        lowlink: Vec<usize>,
        on_stack: Vec<bool>,
        stack: Vec<usize>,
        next_index: usize,
        components: Vec<Vec<usize>>,
    }

    fn connect(state: &mut State<'_>, v: usize) {
        state.index[v] = Some(state.next_index);
        state.lowlink[v] = state.next_index;
        state.next_index += 1;
        state.stack.push(v);
        state.on_stack[v] = true;

        for i in 0..state.adjacency[v].len() {
            let w = state.adjacency[v][i];
            if state.index[w].is_none() {
                connect(state, w);
                state.lowlink[v] = state.lowlink[v].min(state.lowlink[w]);
            } else if state.on_stack[w] {
                state.lowlink[v] = state.lowlink[v].min(state.index[w].unwrap_or(0));
            }
        }

        if Some(state.lowlink[v]) == state.index[v] {
            let mut component = Vec::new();
            while let Some(w) = state.stack.pop() {
                state.on_stack[w] = false;
                component.push(w);
                if w == v {
                    break;
                }
            }
            state.components.push(component);
        }
    }

    let n = adjacency.len();
    let mut state = State {
        adjacency,
        index: vec![None; n],
        lowlink: vec![0; n],
        on_stack: vec![false; n],
        stack: Vec::new(),
        next_index: 0,
        components: Vec::new(),
    };
    for v in 0..n {
        if state.index[v].is_none() {
            connect(&mut state, v);
        }
    }
    state.components
}
