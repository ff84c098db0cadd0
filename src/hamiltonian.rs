//! Directed Hamiltonian cycle search.
//!
//! Exhaustive depth-first backtracking over tour positions, with the first
//! vertex pinned to kill the rotational symmetry of cyclic tours. Candidates
//! are tried in ascending vertex position, so for a fixed vertex enumeration
//! the first cycle in that order is the one reported: reproducible, but not
//! any particular cycle.
//!
//! Runtime grows exponentially with the vertex count; the cyclic reducer only
//! invokes this per strongly connected component, which bounds the damage but
//! does not remove it. The search recurses one frame per vertex, so stack
//! depth equals the component size.

use std::hash::Hash;

use crate::bitmatrix::BitMatrix;
use crate::connectivity;
use crate::digraph::Digraph;
use crate::{Error, Result};

/// "No candidate chosen yet" marker; advancing it wraps to position 0.
const UNSET: usize = usize::MAX;

/// Computes a Hamiltonian cycle of a directed graph.
///
/// Returns the tour as the `n` distinct vertices in cycle order; the closing
/// edge from the last vertex back to the first is implied. Returns `Ok(None)`
/// when the graph is not strongly connected, which rules a cycle out without
/// searching.
///
/// # Errors
///
/// [`Error::InvalidInput`] when the graph is undirected, weighted, has fewer
/// than 3 vertices, or allows self-loops or parallel edges.
/// [`Error::InternalInvariant`] when the search exhausts on a strongly
/// connected graph. Strong connectivity is necessary but not sufficient for
/// a Hamiltonian cycle (a figure-eight is the classic counterexample), so
/// this error doubles as the "no cycle despite strong connectivity" report.
pub fn hamiltonian_cycle<V: Clone + Eq + Hash>(graph: &Digraph<V>) -> Result<Option<Vec<V>>> {
    validate(graph)?;
    if !connectivity::is_strongly_connected(graph) {
        return Ok(None);
    }

    let n = graph.vertex_count();
    let mut search = Search {
        max_index: n - 1,
        adjacency: BitMatrix::adjacency(graph),
        tour: vec![UNSET; n],
    };
    // The starting vertex is fixed; the search fills positions 1..n.
    search.tour[0] = 0;
    if !search.extend(1) {
        return Err(Error::InternalInvariant(
            "no Hamiltonian cycle found in a strongly connected graph; \
             the search contract is broken"
                .into(),
        ));
    }

    let order: Vec<&V> = graph.vertices().collect();
    Ok(Some(
        search.tour.into_iter().map(|p| order[p].clone()).collect(),
    ))
}

fn validate<V: Clone + Eq + Hash>(graph: &Digraph<V>) -> Result<()> {
    let spec = graph.spec();
    if !spec.directed {
        return Err(Error::InvalidInput("graph must be directed".into()));
    }
    if graph.vertex_count() < 3 {
        return Err(Error::InvalidInput(
            "a directed graph needs at least 3 vertices to contain a cycle".into(),
        ));
    }
    if spec.allows_self_loops {
        return Err(Error::InvalidInput(
            "graph must not allow self-loops".into(),
        ));
    }
    if spec.weighted {
        return Err(Error::InvalidInput("graph must be unweighted".into()));
    }
    if spec.allows_multi_edges {
        return Err(Error::InvalidInput(
            "graph must not allow parallel edges".into(),
        ));
    }
    Ok(())
}

struct Search {
    max_index: usize,
    adjacency: BitMatrix,
    tour: Vec<usize>,
}

impl Search {
    /// Fills tour positions `depth..` depth-first. Returns `true` once a
    /// complete cycle is in `tour`, `false` when this depth is a dead end.
    fn extend(&mut self, depth: usize) -> bool {
        loop {
            self.next_vertex(depth);
            if self.tour[depth] == UNSET {
                return false;
            }
            if depth == self.max_index {
                return true;
            }
            if self.extend(depth + 1) {
                return true;
            }
        }
    }

    /// Advances `tour[depth]` to the next viable candidate. Exactly three
    /// exits: dead end (position reset to unset), partial tour extended, or
    /// final position filled with the closing edge present.
    fn next_vertex(&mut self, depth: usize) {
        loop {
            // Next untried candidate; UNSET wraps to position 0.
            self.tour[depth] = self.tour[depth].wrapping_add(1);
            if self.tour[depth] > self.max_index {
                // Dead end: every candidate at this depth is exhausted.
                self.tour[depth] = UNSET;
                return;
            }
            let candidate = self.tour[depth];
            if !self.adjacency.contains(self.tour[depth - 1], candidate) {
                continue;
            }
            if self.tour[..depth].contains(&candidate) {
                continue;
            }
            if depth < self.max_index {
                // Tour still incomplete: hand back to the caller to recurse.
                return;
            }
            if self.adjacency.contains(candidate, self.tour[0]) {
                // Last position filled and the cycle closes.
                return;
            }
        }
    }
}
