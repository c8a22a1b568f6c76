//! Formats a laid-out graph into a fixed-width ASCII diagram.

use super::Position;
use crate::graph::{EdgeKind, MergedGraph, Node};
use ahash::{AHashMap, AHashSet};
use itertools::Itertools;
use std::fmt::Write;

/// Width of the ` --> ` / blank connector between adjacent rank columns.
const CONNECTOR_WIDTH: usize = 5;

pub(super) fn render(
    graph: &MergedGraph,
    grid: &[Vec<&Node>],
    positions: &AHashMap<String, Position>,
    back_edges: &AHashSet<usize>,
    unreachable: &[String],
) -> String {
    let mut output = String::new();
    writeln!(&mut output, "======== WORKFLOW DIAGRAM ========").unwrap();

    // All boxes share one width so columns stay aligned.
    let width = graph
        .nodes()
        .iter()
        .map(|n| n.id.len())
        .max()
        .unwrap_or(0);

    // A main edge draws inline when it connects adjacent ranks on the same
    // visual row; everything else becomes a jump reference below the grid.
    let mut inline_edges: AHashSet<usize> = AHashSet::new();
    let mut connectors: AHashSet<(u32, u32)> = AHashSet::new();
    for (i, edge) in graph.edges().iter().enumerate() {
        if edge.kind != EdgeKind::Main || back_edges.contains(&i) {
            continue;
        }
        if let (Some(from), Some(to)) = (positions.get(&edge.source), positions.get(&edge.target))
        {
            if to.rank == from.rank + 1 && to.row == from.row {
                inline_edges.insert(i);
                connectors.insert((from.rank, from.row));
            }
        }
    }

    let rows = grid.iter().map(|column| column.len()).max().unwrap_or(0);
    if rows > 0 {
        writeln!(&mut output).unwrap();
    }
    for row in 0..rows {
        let mut line = String::new();
        for (rank, column) in grid.iter().enumerate() {
            if rank > 0 {
                if connectors.contains(&((rank - 1) as u32, row as u32)) {
                    line.push_str(" --> ");
                } else {
                    line.push_str(&" ".repeat(CONNECTOR_WIDTH));
                }
            }
            match column.get(row) {
                Some(node) => {
                    write!(&mut line, "[{:<width$}]", node.id, width = width).unwrap();
                }
                None => line.push_str(&" ".repeat(width + 2)),
            }
        }
        writeln!(&mut output, "{}", line.trim_end()).unwrap();
    }

    // Main edges that could not be drawn inline: rank gaps, cross-row
    // connections, loop closers, and edges with unranked endpoints.
    let jumps: Vec<String> = graph
        .edges()
        .iter()
        .enumerate()
        .filter(|(i, edge)| edge.kind == EdgeKind::Main && !inline_edges.contains(i))
        .map(|(i, edge)| {
            if back_edges.contains(&i) {
                format!("{} (loop)", edge)
            } else {
                edge.to_string()
            }
        })
        .sorted()
        .collect();
    if !jumps.is_empty() {
        writeln!(&mut output, "\n---- JUMP EDGES ----").unwrap();
        for jump in jumps {
            writeln!(&mut output, "{}", jump).unwrap();
        }
    }

    let error_edges: Vec<String> = graph
        .edges()
        .iter()
        .filter(|edge| edge.kind == EdgeKind::Error)
        .map(|edge| {
            format!(
                "{}[{}] ~~> {}[{}]",
                edge.source, edge.source_port, edge.target, edge.target_port
            )
        })
        .sorted()
        .collect();
    if !error_edges.is_empty() {
        writeln!(&mut output, "\n---- ERROR EDGES ----").unwrap();
        for edge in error_edges {
            writeln!(&mut output, "{}", edge).unwrap();
        }
    }

    if !unreachable.is_empty() {
        writeln!(&mut output, "\n---- UNREACHABLE ----").unwrap();
        for id in unreachable {
            writeln!(&mut output, "[{:<width$}]", id, width = width).unwrap();
        }
    }

    writeln!(&mut output, "\n======== END OF DIAGRAM ========").unwrap();
    output
}
