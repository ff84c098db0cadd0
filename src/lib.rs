//! # tred
//!
//! Transitive reduction for directed graphs, including graphs that contain
//! cycles.
//!
//! The plain reduction algorithm for DAGs deletes every edge of a cycle when
//! it is fed cyclic input, so this crate splits the problem: strongly
//! connected components are condensed away, the acyclic condensation is
//! reduced, each component is shrunk to a Hamiltonian cycle, and the result
//! is projected back into the caller's graph.
//!
//! ## Design contract
//!
//! - **Reachability is sacred**: every reduction leaves the reachability
//!   closure of the input graph untouched. Vertices are never added or
//!   removed; the edge count never grows.
//! - **Edge identity survives by default**: in the default exact-subset mode
//!   only pre-existing edges remain, under their original [`EdgeId`]s, so
//!   host metadata keyed by edge handle stays valid. The opt-in synthetic
//!   mode trades that guarantee for speed on large components.
//! - **Determinism is a first-class option**: the container enumerates
//!   vertices and edges in insertion order, so for a fixed build order the
//!   reduced graph (including tie-broken witness edges) is reproducible.
//!
//! ## References (what motivated the implementations/tests)
//!
//! - Hsu (1975): *An algorithm for finding a minimal equivalent graph of a
//!   digraph*, JACM 22(1). The DAG reducer in [`dag`].
//! - Sharir (1981) / Kosaraju: strong components via two depth-first passes.
//!   The condensation in [`connectivity`].
//! - Classic backtracking enumeration of directed Hamiltonian cycles; see
//!   [`hamiltonian`] for the search order contract.

mod bitmatrix;
pub mod connectivity;
#[cfg(feature = "petgraph")]
pub mod convert;
pub mod cyclic;
pub mod dag;
pub mod digraph;
pub mod hamiltonian;

pub use connectivity::{
    condensation, has_cycle, is_strongly_connected, strongly_connected_components, Condensation,
};
#[cfg(feature = "petgraph")]
pub use convert::{cyclic_reduce_petgraph, digraph_from_petgraph};
pub use cyclic::{cyclic_reduce, ReduceConfig};
pub use dag::dag_reduce;
pub use digraph::{Digraph, EdgeId, GraphSpec};
pub use hamiltonian::hamiltonian_cycle;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The input graph has a type flag or shape the algorithm cannot accept
    /// (undirected, weighted, self-loops or parallel edges permitted, too few
    /// vertices for a cycle).
    #[error("invalid input: {0}")]
    InvalidInput(String),
    /// The DAG reducer was invoked with cycle checking enabled and the input
    /// contains a cycle.
    #[error("not acyclic: {0}")]
    NotAcyclic(String),
    /// A contract-level impossibility was observed, e.g. the exhaustive
    /// search coming up empty where its precondition held. Surfaces loudly
    /// with a diagnostic; never retried.
    #[error("internal invariant violated: {0}")]
    InternalInvariant(String),
}

pub type Result<T> = std::result::Result<T, Error>;
