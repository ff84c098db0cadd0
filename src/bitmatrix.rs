//! Packed square bit matrix.
//!
//! Both reduction phases and the Hamiltonian search address vertices by dense
//! position, so the matrix is row-major with one word-packed row per
//! position. Row-level OR and AND-NOT are the hot paths; they go through
//! `FixedBitSet`'s word-wise set operations rather than per-bit loops.

use std::hash::Hash;

use fixedbitset::FixedBitSet;

use crate::digraph::Digraph;

#[derive(Debug, Clone)]
pub(crate) struct BitMatrix {
    rows: Vec<FixedBitSet>,
}

impl BitMatrix {
    pub(crate) fn new(n: usize) -> Self {
        Self {
            rows: vec![FixedBitSet::with_capacity(n); n],
        }
    }

    /// Adjacency matrix of `graph`, indexed by the container's vertex order.
    pub(crate) fn adjacency<V: Clone + Eq + Hash>(graph: &Digraph<V>) -> Self {
        let mut matrix = Self::new(graph.vertex_count());
        for (_, source, target) in graph.edges() {
            let i = graph
                .vertex_position(source)
                .expect("edge source missing from vertex set");
            let j = graph
                .vertex_position(target)
                .expect("edge target missing from vertex set");
            matrix.set(i, j);
        }
        matrix
    }

    pub(crate) fn len(&self) -> usize {
        self.rows.len()
    }

    pub(crate) fn set(&mut self, i: usize, j: usize) {
        self.rows[i].insert(j);
    }

    pub(crate) fn clear(&mut self, i: usize, j: usize) {
        self.rows[i].set(j, false);
    }

    pub(crate) fn contains(&self, i: usize, j: usize) -> bool {
        self.rows[i].contains(j)
    }

    /// `rows[dst] |= rows[src]`, a word at a time.
    pub(crate) fn or_row_into(&mut self, src: usize, dst: usize) {
        let (dst_row, src_row) = self.two_rows(dst, src);
        dst_row.union_with(src_row);
    }

    /// `rows[dst] &= !rows[src]`, a word at a time.
    pub(crate) fn subtract_row(&mut self, dst: usize, src: usize) {
        let (dst_row, src_row) = self.two_rows(dst, src);
        dst_row.difference_with(src_row);
    }

    /// Mutable/shared access to two distinct rows at once.
    fn two_rows(&mut self, a: usize, b: usize) -> (&mut FixedBitSet, &FixedBitSet) {
        debug_assert_ne!(a, b);
        if a < b {
            let (left, right) = self.rows.split_at_mut(b);
            (&mut left[a], &right[0])
        } else {
            let (left, right) = self.rows.split_at_mut(a);
            (&mut right[0], &left[b])
        }
    }
}
