//! petgraph interop.
//!
//! This module is feature-gated behind `petgraph` because the most practical
//! caller for dependency-graph style reductions is a `petgraph::DiGraph`
//! (build graphs, module graphs, task schedulers).
//!
//! petgraph's graph types carry no type flags, so the entry point scans for
//! the shapes the reducer cannot accept (self-loops, parallel edges) before
//! converting.

use std::collections::HashSet;

use petgraph::graph::{IndexType, NodeIndex};
use petgraph::{Directed, Graph};

use crate::cyclic::{cyclic_reduce, ReduceConfig};
use crate::digraph::Digraph;
use crate::{Error, Result};

/// Converts a petgraph digraph into a [`Digraph`] over `NodeIndex::index()`
/// values. Node and edge weights are dropped; parallel edges collapse into
/// one.
///
/// # Panics
///
/// If the graph contains a self-loop, which the target container rejects.
/// [`cyclic_reduce_petgraph`] screens for this and returns an error instead.
pub fn digraph_from_petgraph<N, E, Ix: IndexType>(
    graph: &Graph<N, E, Directed, Ix>,
) -> Digraph<usize> {
    let mut out = Digraph::new();
    for index in graph.node_indices() {
        out.add_vertex(index.index());
    }
    for edge in graph.edge_indices() {
        if let Some((source, target)) = graph.edge_endpoints(edge) {
            out.add_edge(source.index(), target.index());
        }
    }
    out
}

/// Transitively reduces a petgraph digraph in place, cycles included.
///
/// Edge weights of removed edges are dropped; edges introduced under
/// synthetic mode carry `E::default()`.
///
/// # Errors
///
/// [`Error::InvalidInput`] when the graph contains a self-loop or parallel
/// edges.
pub fn cyclic_reduce_petgraph<N, E: Default, Ix: IndexType>(
    graph: &mut Graph<N, E, Directed, Ix>,
    config: ReduceConfig,
) -> Result<()> {
    let mut seen: HashSet<(usize, usize)> = HashSet::with_capacity(graph.edge_count());
    for edge in graph.edge_indices() {
        if let Some((source, target)) = graph.edge_endpoints(edge) {
            if source == target {
                return Err(Error::InvalidInput(
                    "graph must not contain self-loops".into(),
                ));
            }
            if !seen.insert((source.index(), target.index())) {
                return Err(Error::InvalidInput(
                    "graph must not contain parallel edges".into(),
                ));
            }
        }
    }

    let mut reduced = digraph_from_petgraph(graph);
    cyclic_reduce(&mut reduced, config)?;

    graph.retain_edges(|g, edge| {
        g.edge_endpoints(edge)
            .map(|(s, t)| reduced.contains_edge(&s.index(), &t.index()))
            .unwrap_or(false)
    });

    // Synthetic mode may have introduced pairs the input never had.
    let existing: HashSet<(usize, usize)> = graph
        .edge_indices()
        .filter_map(|e| graph.edge_endpoints(e))
        .map(|(s, t)| (s.index(), t.index()))
        .collect();
    for (_, &source, &target) in reduced.edges() {
        if !existing.contains(&(source, target)) {
            graph.add_edge(
                NodeIndex::new(source),
                NodeIndex::new(target),
                E::default(),
            );
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use petgraph::graph::DiGraph;

    #[test]
    fn reduces_a_cyclic_petgraph() {
        // 4-cycle with both chords.
        let mut g: DiGraph<(), ()> = DiGraph::new();
        let nodes: Vec<_> = (0..4).map(|_| g.add_node(())).collect();
        for i in 0..4 {
            g.add_edge(nodes[i], nodes[(i + 1) % 4], ());
        }
        g.add_edge(nodes[0], nodes[2], ());
        g.add_edge(nodes[3], nodes[1], ());

        cyclic_reduce_petgraph(&mut g, ReduceConfig::default()).unwrap();
        assert_eq!(g.node_count(), 4);
        assert_eq!(g.edge_count(), 4);
    }

    #[test]
    fn self_loop_is_invalid() {
        let mut g: DiGraph<(), ()> = DiGraph::new();
        let a = g.add_node(());
        g.add_edge(a, a, ());
        assert!(matches!(
            cyclic_reduce_petgraph(&mut g, ReduceConfig::default()),
            Err(Error::InvalidInput(_))
        ));
    }
}
