//! In-memory graph model: typed nodes, typed edges, and structural queries.
//!
//! The model carries no behavior beyond shape questions (neighbors, degrees,
//! reachability). It never executes node logic and performs no I/O. A
//! [`MergedGraph`] is immutable once constructed; the validator and layout
//! engine are pure functions over it.

use crate::error::GraphError;
use ahash::{AHashMap, AHashSet};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;

/// Index of an output or input port on a node.
pub type PortIndex = u32;

/// Opaque configuration payload attached to a node. Never interpreted here.
pub type ConfigMap = serde_json::Map<String, serde_json::Value>;

/// The fixed set of node types. The type tag determines fan-in/fan-out
/// legality: triggers take no inbound edges, terminals emit no outbound
/// `main` edges, and only merge-points may close a cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NodeKind {
    Trigger,
    Action,
    Conditional,
    MergePoint,
    Terminal,
    SubsectionBoundary,
}

impl NodeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeKind::Trigger => "trigger",
            NodeKind::Action => "action",
            NodeKind::Conditional => "conditional",
            NodeKind::MergePoint => "merge-point",
            NodeKind::Terminal => "terminal",
            NodeKind::SubsectionBoundary => "subsection-boundary",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Edge kind. `Error` edges do not count toward success-path reachability.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeKind {
    #[default]
    Main,
    Error,
}

impl EdgeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EdgeKind::Main => "main",
            EdgeKind::Error => "error",
        }
    }
}

impl fmt::Display for EdgeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single node of a merged graph.
///
/// `id` is globally unique after a merge (`<subsection>.<local_id>`); the
/// `subsection` and `local_id` fields record where the node came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: String,
    pub display_name: String,
    pub kind: NodeKind,
    pub config: ConfigMap,
    pub subsection: String,
    pub local_id: String,
}

/// A directed, ported edge between two nodes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Edge {
    pub source: String,
    pub source_port: PortIndex,
    pub target: String,
    pub target_port: PortIndex,
    pub kind: EdgeKind,
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}[{}] -> {}[{}]",
            self.source, self.source_port, self.target, self.target_port
        )?;
        if self.kind == EdgeKind::Error {
            write!(f, " [error]")?;
        }
        Ok(())
    }
}

/// The single composed graph produced by the merge engine.
///
/// Construction indexes nodes and adjacency once; afterwards the graph is
/// read-only. Edges whose endpoints do not resolve to a node are kept (the
/// validator reports them) but never traversed.
#[derive(Debug, Clone)]
pub struct MergedGraph {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    index: AHashMap<String, usize>,
    outgoing: AHashMap<String, Vec<usize>>,
    incoming: AHashMap<String, Vec<usize>>,
}

impl MergedGraph {
    pub fn new(nodes: Vec<Node>, edges: Vec<Edge>) -> Self {
        let mut index = AHashMap::with_capacity(nodes.len());
        for (i, node) in nodes.iter().enumerate() {
            // First occurrence wins; duplicates surface as a validator
            // invariant violation, not a construction failure.
            index.entry(node.id.clone()).or_insert(i);
        }

        let mut outgoing: AHashMap<String, Vec<usize>> = AHashMap::new();
        let mut incoming: AHashMap<String, Vec<usize>> = AHashMap::new();
        for (i, edge) in edges.iter().enumerate() {
            outgoing.entry(edge.source.clone()).or_default().push(i);
            incoming.entry(edge.target.clone()).or_default().push(i);
        }

        Self {
            nodes,
            edges,
            index,
            outgoing,
            incoming,
        }
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.index.get(id).map(|&i| &self.nodes[i])
    }

    pub fn contains_node(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// All nodes typed [`NodeKind::Trigger`], in node order.
    pub fn trigger_nodes(&self) -> Vec<&Node> {
        self.nodes
            .iter()
            .filter(|n| n.kind == NodeKind::Trigger)
            .collect()
    }

    /// Target identifiers of all `kind` edges leaving `id`, in edge order.
    ///
    /// Targets are returned as written on the edge, whether or not they
    /// resolve to a node.
    pub fn neighbors_of(&self, id: &str, kind: EdgeKind) -> Result<Vec<&str>, GraphError> {
        if !self.contains_node(id) {
            return Err(GraphError::UnknownNode(id.to_string()));
        }
        Ok(self
            .outgoing
            .get(id)
            .map(|edge_ids| {
                edge_ids
                    .iter()
                    .map(|&i| &self.edges[i])
                    .filter(|e| e.kind == kind)
                    .map(|e| e.target.as_str())
                    .collect()
            })
            .unwrap_or_default())
    }

    pub fn in_degree(&self, id: &str, kind: EdgeKind) -> Result<usize, GraphError> {
        if !self.contains_node(id) {
            return Err(GraphError::UnknownNode(id.to_string()));
        }
        Ok(self
            .incoming
            .get(id)
            .map(|edge_ids| {
                edge_ids
                    .iter()
                    .filter(|&&i| self.edges[i].kind == kind)
                    .count()
            })
            .unwrap_or(0))
    }

    pub fn out_degree(&self, id: &str, kind: EdgeKind) -> Result<usize, GraphError> {
        if !self.contains_node(id) {
            return Err(GraphError::UnknownNode(id.to_string()));
        }
        Ok(self
            .outgoing
            .get(id)
            .map(|edge_ids| {
                edge_ids
                    .iter()
                    .filter(|&&i| self.edges[i].kind == kind)
                    .count()
            })
            .unwrap_or(0))
    }

    /// Breadth-first reachability over `main` edges from `roots`.
    ///
    /// Roots that are not present in the graph are ignored; the result has
    /// set semantics only.
    pub fn reachable_from<'a, I>(&self, roots: I) -> AHashSet<String>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut seen: AHashSet<String> = AHashSet::new();
        let mut queue: VecDeque<String> = VecDeque::new();

        for root in roots {
            if self.contains_node(root) && seen.insert(root.to_string()) {
                queue.push_back(root.to_string());
            }
        }

        while let Some(id) = queue.pop_front() {
            if let Some(edge_ids) = self.outgoing.get(&id) {
                for &i in edge_ids {
                    let edge = &self.edges[i];
                    if edge.kind != EdgeKind::Main || !self.contains_node(&edge.target) {
                        continue;
                    }
                    if seen.insert(edge.target.clone()) {
                        queue.push_back(edge.target.clone());
                    }
                }
            }
        }
        seen
    }
}
