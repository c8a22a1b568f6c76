use crate::graph::{ConfigMap, EdgeKind, NodeKind, PortIndex};

/// The complete, canonical definition of one independently authored
/// subsection, ready for merging.
/// This is the target structure for any custom data model conversion.
#[derive(Debug, Clone, Default)]
pub struct SubsectionDefinition {
    pub name: String,
    pub nodes: Vec<NodeDefinition>,
    pub connections: Vec<ConnectionDefinition>,
    pub boundary: BoundaryContract,
}

/// Defines a single node inside a subsection.
/// `id` is local to the subsection; the merge engine namespaces it.
#[derive(Debug, Clone)]
pub struct NodeDefinition {
    pub id: String,
    pub display_name: String,
    pub kind: NodeKind,
    pub config: ConfigMap,
}

/// Defines a connection between two nodes of the same subsection.
#[derive(Debug, Clone)]
pub struct ConnectionDefinition {
    pub source: String,
    pub source_port: PortIndex,
    pub target: String,
    pub target_port: PortIndex,
    pub kind: EdgeKind,
}

/// The ordered import/export ports a subsection exposes for wiring.
/// Every port must be bound exactly once during a merge.
#[derive(Debug, Clone, Default)]
pub struct BoundaryContract {
    pub imports: Vec<ImportPort>,
    pub exports: Vec<ExportPort>,
}

/// A dangling input the subsection expects to receive from elsewhere.
#[derive(Debug, Clone)]
pub struct ImportPort {
    pub name: String,
    pub target: String,
    pub target_port: PortIndex,
}

/// A dangling output the subsection offers to other subsections.
#[derive(Debug, Clone)]
pub struct ExportPort {
    pub name: String,
    pub source: String,
    pub source_port: PortIndex,
}

/// A declared connection from one subsection's export port to another
/// subsection's import port.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindingDefinition {
    pub export_subsection: String,
    pub export_port: String,
    pub import_subsection: String,
    pub import_port: String,
}
