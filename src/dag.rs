//! Transitive reduction for acyclic digraphs.
//!
//! Harry Hsu's path-matrix method: turn the adjacency matrix into a
//! reachability matrix by row-ORing, then strike every edge that a two-hop
//! path re-derives. O(V³) bit operations, with the inner loops running over
//! machine words. Feeding it a cyclic graph deletes every edge of each cycle,
//! which is why [`crate::cyclic::cyclic_reduce`] exists.

use std::hash::Hash;

use crate::bitmatrix::BitMatrix;
use crate::connectivity;
use crate::digraph::Digraph;
use crate::{Error, Result};

/// Removes all transitive edges from the acyclic digraph, in place.
///
/// Reachability between any two vertices is unchanged; no edge is ever added,
/// and surviving edges keep their identities. Pass `check_for_cycles = false`
/// only when acyclicity has already been established; the check exists
/// because the result is silently wrong for cyclic input.
///
/// # Errors
///
/// [`Error::InvalidInput`] when the graph is not directed;
/// [`Error::NotAcyclic`] when checking is enabled and a cycle exists.
pub fn dag_reduce<V: Clone + Eq + Hash>(
    graph: &mut Digraph<V>,
    check_for_cycles: bool,
) -> Result<()> {
    if !graph.spec().directed {
        return Err(Error::InvalidInput("graph must be directed".into()));
    }
    if check_for_cycles && connectivity::has_cycle(graph) {
        return Err(Error::NotAcyclic(
            "the graph contains a cycle; use cyclic_reduce instead".into(),
        ));
    }

    let mut matrix = BitMatrix::adjacency(graph);
    transform_to_path_matrix(&mut matrix);
    transitive_reduction(&mut matrix);

    // Drop every original edge whose bit the reduction cleared.
    let order: Vec<V> = graph.vertices().cloned().collect();
    for (i, source) in order.iter().enumerate() {
        for (j, target) in order.iter().enumerate() {
            if !matrix.contains(i, j) {
                if let Some(id) = graph.edge_between(source, target) {
                    graph.remove_edge(id);
                }
            }
        }
    }
    Ok(())
}

/// Phase 1: closure. Afterwards `matrix[i][j]` is set iff `j` is reachable
/// from `i`.
fn transform_to_path_matrix(matrix: &mut BitMatrix) {
    let n = matrix.len();
    for i in 0..n {
        for j in 0..n {
            if i == j {
                continue;
            }
            if matrix.contains(j, i) {
                matrix.or_row_into(i, j);
            }
        }
    }
}

/// Phase 2: reduction. Discards `i -> k` whenever `i -> j -> k` also holds.
/// Shares storage with phase 1; the matrix is reduced in place.
fn transitive_reduction(matrix: &mut BitMatrix) {
    let n = matrix.len();
    for j in 0..n {
        for i in 0..n {
            if i == j {
                continue;
            }
            if matrix.contains(i, j) {
                matrix.subtract_row(i, j);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::digraph::GraphSpec;

    fn matrix(n: usize, bits: &[(usize, usize)]) -> BitMatrix {
        let mut m = BitMatrix::new(n);
        for &(i, j) in bits {
            m.set(i, j);
        }
        m
    }

    fn pairs(m: &BitMatrix) -> Vec<(usize, usize)> {
        let mut out = Vec::new();
        for i in 0..m.len() {
            for j in 0..m.len() {
                if m.contains(i, j) {
                    out.push((i, j));
                }
            }
        }
        out
    }

    #[test]
    fn path_matrix_of_chain() {
        let mut m = matrix(3, &[(0, 1), (1, 2)]);
        transform_to_path_matrix(&mut m);
        assert_eq!(pairs(&m), vec![(0, 1), (0, 2), (1, 2)]);
    }

    #[test]
    fn reduction_strikes_the_shortcut() {
        let mut m = matrix(3, &[(0, 1), (1, 2)]);
        transform_to_path_matrix(&mut m);
        transitive_reduction(&mut m);
        assert_eq!(pairs(&m), vec![(0, 1), (1, 2)]);
    }

    #[test]
    fn diamond_with_shortcut() {
        let mut g = Digraph::new();
        g.add_edge("a", "b");
        g.add_edge("a", "c");
        g.add_edge("b", "d");
        g.add_edge("c", "d");
        let shortcut = g.add_edge("a", "d");
        dag_reduce(&mut g, true).unwrap();
        assert_eq!(g.edge_count(), 4);
        assert_eq!(g.endpoints(shortcut), None);
    }

    #[test]
    fn undirected_graph_is_rejected() {
        let mut g = Digraph::with_spec(GraphSpec {
            directed: false,
            ..GraphSpec::default()
        });
        g.add_edge("a", "b");
        assert!(matches!(
            dag_reduce(&mut g, true),
            Err(Error::InvalidInput(_))
        ));
    }

    #[test]
    fn cyclic_graph_is_rejected_when_checking() {
        let mut g = Digraph::new();
        g.add_edge("a", "b");
        g.add_edge("b", "a");
        assert!(matches!(dag_reduce(&mut g, true), Err(Error::NotAcyclic(_))));
        // With checking off the caller owns the precondition.
        assert!(dag_reduce(&mut g, false).is_ok());
    }
}
