//! Layout engine: deterministic layered coordinates plus ASCII rendering.
//!
//! A node's rank is the length of the longest `main`-edge path from any
//! trigger to it. Loop-closing edges are detected first and ignored while
//! ranking (they are still rendered). The engine accepts invalid graphs;
//! nodes that earn no rank are appended in a trailing unreachable block so
//! the diagram never silently omits a node. Identical input always yields
//! an identical diagram.

mod renderer;

use crate::graph::{EdgeKind, MergedGraph, Node};
use ahash::{AHashMap, AHashSet};
use log::debug;
use std::collections::BTreeSet;

/// A node's computed coordinate: `rank` is the diagram column, `row` the
/// position within the rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub rank: u32,
    pub row: u32,
}

/// Derived layout data. Recomputed on every render, never persisted as
/// authoritative state.
#[derive(Debug, Clone)]
pub struct Layout {
    /// Coordinates for every ranked node.
    pub positions: AHashMap<String, Position>,
    /// Nodes with no computed rank, ordered by (subsection, local id).
    pub unreachable: Vec<String>,
    /// The fixed-width ASCII rendering.
    pub ascii: String,
}

/// Computes layered positions and the ASCII diagram for a merged graph.
pub struct LayoutEngine<'a> {
    graph: &'a MergedGraph,
}

impl<'a> LayoutEngine<'a> {
    pub fn new(graph: &'a MergedGraph) -> Self {
        Self { graph }
    }

    pub fn compute(&self) -> Layout {
        let back_edges = self.loop_closing_edges();
        let ranks = self.assign_ranks(&back_edges);
        debug!(
            "ranked {} of {} nodes, {} loop-closing edge(s)",
            ranks.len(),
            self.graph.nodes().len(),
            back_edges.len()
        );

        let max_rank = ranks.values().copied().max();
        let mut grid: Vec<Vec<&Node>> = match max_rank {
            Some(max) => vec![Vec::new(); max as usize + 1],
            None => Vec::new(),
        };
        let mut unreachable: Vec<&Node> = Vec::new();
        for node in self.graph.nodes() {
            match ranks.get(node.id.as_str()) {
                Some(&rank) => grid[rank as usize].push(node),
                None => unreachable.push(node),
            }
        }
        // Stable in-rank order keyed on origin, not on merged id, so a
        // rename of the separator cannot reshuffle the diagram.
        for column in &mut grid {
            column.sort_by(|a, b| {
                (&a.subsection, &a.local_id).cmp(&(&b.subsection, &b.local_id))
            });
        }
        unreachable
            .sort_by(|a, b| (&a.subsection, &a.local_id).cmp(&(&b.subsection, &b.local_id)));

        let mut positions: AHashMap<String, Position> = AHashMap::new();
        for (x, column) in grid.iter().enumerate() {
            for (y, node) in column.iter().enumerate() {
                positions.insert(
                    node.id.clone(),
                    Position {
                        rank: x as u32,
                        row: y as u32,
                    },
                );
            }
        }

        let unreachable: Vec<String> = unreachable.iter().map(|n| n.id.clone()).collect();
        let ascii = renderer::render(self.graph, &grid, &positions, &back_edges, &unreachable);

        Layout {
            positions,
            unreachable,
            ascii,
        }
    }

    /// Finds loop-closing `main` edges via depth-first search, visiting the
    /// sorted trigger set first and then any remaining nodes in sorted
    /// order so the result is deterministic.
    fn loop_closing_edges(&self) -> AHashSet<usize> {
        #[derive(Clone, Copy, PartialEq)]
        enum Color {
            White,
            Gray,
            Black,
        }

        let edges = self.graph.edges();
        let mut outgoing: AHashMap<&str, Vec<usize>> = AHashMap::new();
        for (i, edge) in edges.iter().enumerate() {
            if edge.kind == EdgeKind::Main
                && self.graph.contains_node(&edge.source)
                && self.graph.contains_node(&edge.target)
            {
                outgoing.entry(edge.source.as_str()).or_default().push(i);
            }
        }

        let mut roots: Vec<&str> = self
            .graph
            .trigger_nodes()
            .iter()
            .map(|n| n.id.as_str())
            .collect();
        roots.sort_unstable();
        let mut rest: Vec<&str> = self.graph.nodes().iter().map(|n| n.id.as_str()).collect();
        rest.sort_unstable();
        roots.extend(rest);

        let mut color: AHashMap<&str, Color> = AHashMap::new();
        let mut back: AHashSet<usize> = AHashSet::new();

        for root in roots {
            if color.get(root).copied().unwrap_or(Color::White) != Color::White {
                continue;
            }
            color.insert(root, Color::Gray);
            let mut stack: Vec<(&str, usize)> = vec![(root, 0)];
            while let Some(&(node, cursor)) = stack.last() {
                let list = outgoing.get(node).map(|v| v.as_slice()).unwrap_or(&[]);
                if cursor >= list.len() {
                    color.insert(node, Color::Black);
                    stack.pop();
                    continue;
                }
                if let Some(frame) = stack.last_mut() {
                    frame.1 += 1;
                }
                let edge_idx = list[cursor];
                let target = edges[edge_idx].target.as_str();
                match color.get(target).copied().unwrap_or(Color::White) {
                    Color::White => {
                        color.insert(target, Color::Gray);
                        stack.push((target, 0));
                    }
                    Color::Gray => {
                        back.insert(edge_idx);
                    }
                    Color::Black => {}
                }
            }
        }
        back
    }

    /// Longest-path layering over the DAG left after removing loop-closing
    /// edges. Only nodes reachable from a trigger earn a rank.
    fn assign_ranks(&self, back_edges: &AHashSet<usize>) -> AHashMap<&str, u32> {
        let edges = self.graph.edges();
        let mut dag_out: AHashMap<&str, Vec<&str>> = AHashMap::new();
        for (i, edge) in edges.iter().enumerate() {
            if edge.kind == EdgeKind::Main
                && !back_edges.contains(&i)
                && self.graph.contains_node(&edge.source)
                && self.graph.contains_node(&edge.target)
            {
                dag_out
                    .entry(edge.source.as_str())
                    .or_default()
                    .push(edge.target.as_str());
            }
        }

        let triggers: Vec<&str> = self
            .graph
            .trigger_nodes()
            .iter()
            .map(|n| n.id.as_str())
            .collect();

        // Reachable set over the DAG.
        let mut reach: AHashSet<&str> = AHashSet::new();
        let mut queue: Vec<&str> = Vec::new();
        for &t in &triggers {
            if reach.insert(t) {
                queue.push(t);
            }
        }
        while let Some(id) = queue.pop() {
            if let Some(targets) = dag_out.get(id) {
                for &t in targets {
                    if reach.insert(t) {
                        queue.push(t);
                    }
                }
            }
        }

        // Kahn over the reachable subgraph; a BTreeSet ready-set keeps the
        // processing order deterministic.
        let mut indegree: AHashMap<&str, usize> = reach.iter().map(|&id| (id, 0)).collect();
        for &id in &reach {
            if let Some(targets) = dag_out.get(id) {
                for &t in targets {
                    if let Some(count) = indegree.get_mut(t) {
                        *count += 1;
                    }
                }
            }
        }

        let mut ready: BTreeSet<&str> = indegree
            .iter()
            .filter(|&(_, &count)| count == 0)
            .map(|(&id, _)| id)
            .collect();
        let mut ranks: AHashMap<&str, u32> = AHashMap::new();

        while let Some(&id) = ready.iter().next() {
            ready.remove(id);
            let rank = ranks.get(id).copied().unwrap_or(0);
            ranks.entry(id).or_insert(rank);
            if let Some(targets) = dag_out.get(id) {
                for &t in targets {
                    if !reach.contains(t) {
                        continue;
                    }
                    let entry = ranks.entry(t).or_insert(0);
                    *entry = (*entry).max(rank + 1);
                    if let Some(count) = indegree.get_mut(t) {
                        *count -= 1;
                        if *count == 0 {
                            ready.insert(t);
                        }
                    }
                }
            }
        }
        ranks
    }
}
