//! Merge engine: composes subsection definitions into one [`MergedGraph`].
//!
//! Merging is all-or-nothing. Node identifiers are namespaced by subsection
//! name first, then one `main` edge is synthesized per binding, and finally
//! every boundary port must have been satisfied exactly once. Any invalid
//! binding or leftover unbound port aborts the merge with no partial graph.

use crate::error::MergeError;
use crate::graph::{Edge, EdgeKind, MergedGraph, Node};
use crate::workflow::{BindingDefinition, SubsectionDefinition};
use ahash::{AHashMap, AHashSet};
use itertools::Itertools;
use log::debug;

/// Separator between a subsection name and a local node id in merged ids.
pub const NAMESPACE_SEPARATOR: char = '.';

/// Builds the globally unique identifier a node carries after merging,
/// e.g. `checkout.validate-input`.
pub fn namespaced_id(subsection: &str, local_id: &str) -> String {
    format!("{}{}{}", subsection, NAMESPACE_SEPARATOR, local_id)
}

/// Composes an ordered sequence of subsections and a binding list into a
/// single graph.
pub struct Merger {
    subsections: Vec<SubsectionDefinition>,
    bindings: Vec<BindingDefinition>,
}

impl Merger {
    pub fn new(subsections: Vec<SubsectionDefinition>, bindings: Vec<BindingDefinition>) -> Self {
        Self {
            subsections,
            bindings,
        }
    }

    pub fn merge(self) -> Result<MergedGraph, MergeError> {
        let Merger {
            subsections,
            bindings,
        } = self;

        // Subsection names are the namespace roots; a repeat would collapse
        // two namespaces into one.
        let mut seen_names: AHashSet<&str> = AHashSet::new();
        for subsection in &subsections {
            if !seen_names.insert(subsection.name.as_str()) {
                return Err(MergeError::DuplicateSubsection(subsection.name.clone()));
            }
        }

        let (nodes, mut edges) = namespace_pass(&subsections)?;
        debug!(
            "namespaced {} subsections into {} nodes and {} edges",
            subsections.len(),
            nodes.len(),
            edges.len()
        );

        let synthesized = resolve_bindings(&subsections, &bindings)?;
        debug!("synthesized {} binding edges", synthesized.len());
        edges.extend(synthesized);

        Ok(MergedGraph::new(nodes, edges))
    }
}

/// Renames every node to its namespaced identifier, rewriting the
/// subsection-internal connections in lock-step.
fn namespace_pass(
    subsections: &[SubsectionDefinition],
) -> Result<(Vec<Node>, Vec<Edge>), MergeError> {
    let mut nodes = Vec::new();
    let mut edges = Vec::new();

    for subsection in subsections {
        let mut seen_local: AHashSet<&str> = AHashSet::new();
        for node in &subsection.nodes {
            if !seen_local.insert(node.id.as_str()) {
                return Err(MergeError::DuplicateNode {
                    subsection: subsection.name.clone(),
                    local_id: node.id.clone(),
                });
            }
            nodes.push(Node {
                id: namespaced_id(&subsection.name, &node.id),
                display_name: node.display_name.clone(),
                kind: node.kind,
                config: node.config.clone(),
                subsection: subsection.name.clone(),
                local_id: node.id.clone(),
            });
        }

        for connection in &subsection.connections {
            edges.push(Edge {
                source: namespaced_id(&subsection.name, &connection.source),
                source_port: connection.source_port,
                target: namespaced_id(&subsection.name, &connection.target),
                target_port: connection.target_port,
                kind: connection.kind,
            });
        }
    }

    Ok((nodes, edges))
}

/// Synthesizes one `main` edge per binding and verifies that afterwards no
/// boundary port of any subsection is left unbound.
fn resolve_bindings(
    subsections: &[SubsectionDefinition],
    bindings: &[BindingDefinition],
) -> Result<Vec<Edge>, MergeError> {
    let by_name: AHashMap<&str, &SubsectionDefinition> = subsections
        .iter()
        .map(|subsection| (subsection.name.as_str(), subsection))
        .collect();

    let mut bound_exports: AHashSet<(&str, &str)> = AHashSet::new();
    let mut bound_imports: AHashSet<(&str, &str)> = AHashSet::new();
    let mut synthesized = Vec::with_capacity(bindings.len());

    for binding in bindings {
        let export_sub = by_name
            .get(binding.export_subsection.as_str())
            .ok_or_else(|| {
                invalid_binding(
                    binding,
                    format!("unknown subsection '{}'", binding.export_subsection),
                )
            })?;
        let export = export_sub
            .boundary
            .exports
            .iter()
            .find(|port| port.name == binding.export_port)
            .ok_or_else(|| {
                invalid_binding(
                    binding,
                    format!(
                        "subsection '{}' declares no export port '{}'",
                        binding.export_subsection, binding.export_port
                    ),
                )
            })?;

        let import_sub = by_name
            .get(binding.import_subsection.as_str())
            .ok_or_else(|| {
                invalid_binding(
                    binding,
                    format!("unknown subsection '{}'", binding.import_subsection),
                )
            })?;
        let import = import_sub
            .boundary
            .imports
            .iter()
            .find(|port| port.name == binding.import_port)
            .ok_or_else(|| {
                invalid_binding(
                    binding,
                    format!(
                        "subsection '{}' declares no import port '{}'",
                        binding.import_subsection, binding.import_port
                    ),
                )
            })?;

        // A port binds exactly once; the later binding loses, the earlier
        // one is never overwritten.
        if !bound_exports.insert((
            binding.export_subsection.as_str(),
            binding.export_port.as_str(),
        )) {
            return Err(invalid_binding(
                binding,
                format!("export port '{}' is already bound", binding.export_port),
            ));
        }
        if !bound_imports.insert((
            binding.import_subsection.as_str(),
            binding.import_port.as_str(),
        )) {
            return Err(invalid_binding(
                binding,
                format!("import port '{}' is already bound", binding.import_port),
            ));
        }

        synthesized.push(Edge {
            source: namespaced_id(&binding.export_subsection, &export.source),
            source_port: export.source_port,
            target: namespaced_id(&binding.import_subsection, &import.target),
            target_port: import.target_port,
            kind: EdgeKind::Main,
        });
    }

    let mut unbound: Vec<String> = Vec::new();
    for subsection in subsections {
        for port in &subsection.boundary.imports {
            if !bound_imports.contains(&(subsection.name.as_str(), port.name.as_str())) {
                unbound.push(format!("{}.{} (import)", subsection.name, port.name));
            }
        }
        for port in &subsection.boundary.exports {
            if !bound_exports.contains(&(subsection.name.as_str(), port.name.as_str())) {
                unbound.push(format!("{}.{} (export)", subsection.name, port.name));
            }
        }
    }

    if !unbound.is_empty() {
        return Err(MergeError::UnboundPorts {
            count: unbound.len(),
            ports: unbound.iter().join(", "),
        });
    }

    Ok(synthesized)
}

fn invalid_binding(binding: &BindingDefinition, message: String) -> MergeError {
    MergeError::InvalidBinding {
        export_subsection: binding.export_subsection.clone(),
        export_port: binding.export_port.clone(),
        import_subsection: binding.import_subsection.clone(),
        import_port: binding.import_port.clone(),
        message,
    }
}
