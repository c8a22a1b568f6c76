//! Common test utilities for building subsection definitions and graphs.
use weft::prelude::*;

/// Creates a node definition whose display name matches its id.
#[allow(dead_code)]
pub fn node_def(id: &str, kind: NodeKind) -> NodeDefinition {
    NodeDefinition {
        id: id.to_string(),
        display_name: id.to_string(),
        kind,
        config: ConfigMap::new(),
    }
}

/// Creates a `main` connection on port 0 of both ends.
#[allow(dead_code)]
pub fn connect(source: &str, target: &str) -> ConnectionDefinition {
    ConnectionDefinition {
        source: source.to_string(),
        source_port: 0,
        target: target.to_string(),
        target_port: 0,
        kind: EdgeKind::Main,
    }
}

/// Creates the `input` subsection of the two-subsection example:
/// `start` (trigger) -> `validate` (action), exporting port `validated`.
#[allow(dead_code)]
pub fn create_input_subsection() -> SubsectionDefinition {
    SubsectionDefinition {
        name: "input".to_string(),
        nodes: vec![
            node_def("start", NodeKind::Trigger),
            node_def("validate", NodeKind::Action),
        ],
        connections: vec![connect("start", "validate")],
        boundary: BoundaryContract {
            imports: vec![],
            exports: vec![ExportPort {
                name: "validated".to_string(),
                source: "validate".to_string(),
                source_port: 0,
            }],
        },
    }
}

/// Creates the `processing` subsection of the two-subsection example:
/// `transform` (action) -> `done` (terminal), importing port `raw`.
#[allow(dead_code)]
pub fn create_processing_subsection() -> SubsectionDefinition {
    SubsectionDefinition {
        name: "processing".to_string(),
        nodes: vec![
            node_def("transform", NodeKind::Action),
            node_def("done", NodeKind::Terminal),
        ],
        connections: vec![connect("transform", "done")],
        boundary: BoundaryContract {
            imports: vec![ImportPort {
                name: "raw".to_string(),
                target: "transform".to_string(),
                target_port: 0,
            }],
            exports: vec![],
        },
    }
}

/// The single binding wiring `input.validated` to `processing.raw`.
#[allow(dead_code)]
pub fn create_pair_binding() -> BindingDefinition {
    BindingDefinition {
        export_subsection: "input".to_string(),
        export_port: "validated".to_string(),
        import_subsection: "processing".to_string(),
        import_port: "raw".to_string(),
    }
}

/// Merges the two-subsection example into a graph.
#[allow(dead_code)]
pub fn create_merged_pair() -> MergedGraph {
    Merger::new(
        vec![create_input_subsection(), create_processing_subsection()],
        vec![create_pair_binding()],
    )
    .merge()
    .expect("example pair should merge")
}

/// Creates a node carrying a namespaced id, for building graphs directly.
#[allow(dead_code)]
pub fn graph_node(subsection: &str, local_id: &str, kind: NodeKind) -> Node {
    Node {
        id: namespaced_id(subsection, local_id),
        display_name: local_id.to_string(),
        kind,
        config: ConfigMap::new(),
        subsection: subsection.to_string(),
        local_id: local_id.to_string(),
    }
}

/// Creates a `main` edge on port 0 of both ends.
#[allow(dead_code)]
pub fn main_edge(source: &str, target: &str) -> Edge {
    Edge {
        source: source.to_string(),
        source_port: 0,
        target: target.to_string(),
        target_port: 0,
        kind: EdgeKind::Main,
    }
}

/// Creates an `error` edge on port 0 of both ends.
#[allow(dead_code)]
pub fn error_edge(source: &str, target: &str) -> Edge {
    Edge {
        source: source.to_string(),
        source_port: 0,
        target: target.to_string(),
        target_port: 0,
        kind: EdgeKind::Error,
    }
}

/// The cycle example: `a` (trigger) -> `b` -> `c` -> `b`, with `b` typed
/// per the caller. A merge-point `b` legalizes the loop; anything else
/// leaves an unintended cycle.
#[allow(dead_code)]
pub fn create_cycle_graph(loop_kind: NodeKind) -> MergedGraph {
    MergedGraph::new(
        vec![
            graph_node("flow", "a", NodeKind::Trigger),
            graph_node("flow", "b", loop_kind),
            graph_node("flow", "c", NodeKind::Action),
        ],
        vec![
            main_edge("flow.a", "flow.b"),
            main_edge("flow.b", "flow.c"),
            main_edge("flow.c", "flow.b"),
        ],
    )
}

/// The two-subsection example as an on-disk subsection-set document.
#[allow(dead_code)]
pub const SIMPLE_SET_JSON: &str = r#"{
  "subsections": [
    {
      "name": "input",
      "nodes": [
        { "id": "start", "display_name": "Start", "kind": "trigger" },
        { "id": "validate", "display_name": "Validate", "kind": "action",
          "config": { "operation": "validate" } }
      ],
      "connections": [
        { "source": "start", "source_port": 0, "target": "validate", "target_port": 0 }
      ],
      "boundary": {
        "imports": [],
        "exports": [ { "port": "validated", "node": "validate", "index": 0 } ]
      }
    },
    {
      "name": "processing",
      "nodes": [
        { "id": "transform", "display_name": "Transform", "kind": "action" },
        { "id": "done", "display_name": "Done", "kind": "terminal" }
      ],
      "connections": [
        { "source": "transform", "source_port": 0, "target": "done", "target_port": 0 }
      ],
      "boundary": {
        "imports": [ { "port": "raw", "node": "transform", "index": 0 } ],
        "exports": []
      }
    }
  ]
}"#;

/// The binding list pairing with [`SIMPLE_SET_JSON`].
#[allow(dead_code)]
pub const SIMPLE_BINDINGS_JSON: &str = r#"[
  {
    "export_subsection": "input",
    "export_port": "validated",
    "import_subsection": "processing",
    "import_port": "raw"
  }
]"#;

/// Same documents written with camelCase keys, as some authoring tools emit.
#[allow(dead_code)]
pub const CAMEL_CASE_SET_JSON: &str = r#"{
  "subsections": [
    {
      "name": "solo",
      "nodes": [
        { "id": "go", "displayName": "Go", "kind": "trigger" },
        { "id": "stop", "displayName": "Stop", "kind": "terminal" }
      ],
      "connections": [
        { "source": "go", "sourcePort": 0, "target": "stop", "targetPort": 0, "kind": "main" }
      ],
      "boundary": { "imports": [], "exports": [] }
    }
  ]
}"#;

#[allow(dead_code)]
pub const CAMEL_CASE_BINDINGS_JSON: &str = "[]";
