//! Transitive reduction for digraphs that may contain cycles.
//!
//! The DAG reducer falsely deletes every edge of a cycle, so cyclic input is
//! handled by isolating the cycles first: condense the graph into its
//! strongly connected components, reduce the acyclic condensation, shrink
//! each component to a single Hamiltonian cycle, and project the result back
//! into the caller's graph.
//!
//! A `reduce` call requires exclusive access to the graph for its whole
//! duration; the `&mut` borrow enforces the single-threaded contract.

use std::collections::{HashMap, HashSet};
use std::hash::Hash;

use crate::connectivity::{self, Condensation};
use crate::dag::dag_reduce;
use crate::digraph::{Digraph, EdgeId};
use crate::hamiltonian::hamiltonian_cycle;
use crate::{Error, Result};

/// Mode policy for [`cyclic_reduce`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReduceConfig {
    /// Allow the reduction to introduce edges absent from the input.
    ///
    /// When set, each strongly connected component is replaced by a cycle
    /// over its vertices in enumeration order instead of searching for an
    /// existing Hamiltonian cycle, and inter-component witness edges may be
    /// fabricated between arbitrary vertex pairs. Much faster on dense
    /// components, but edge identities (and any host metadata attached to
    /// them) only survive for edges the rewrite happens to keep.
    ///
    /// Off by default: only pre-existing edges survive, under their original
    /// identities.
    pub allow_synthetic_edges: bool,
}

/// Removes all transitive edges from the directed, possibly cyclic graph, in
/// place.
///
/// Reachability between any two vertices is unchanged. Each strongly
/// connected component ends up as a single cycle through all its vertices,
/// and exactly one witness edge remains per surviving inter-component link.
///
/// # Errors
///
/// [`Error::InvalidInput`] when the graph is undirected or weighted, or
/// allows self-loops or parallel edges. [`Error::InternalInvariant`] when a
/// component that is strongly connected by construction yields no Hamiltonian
/// cycle.
pub fn cyclic_reduce<V: Clone + Eq + Hash>(
    graph: &mut Digraph<V>,
    config: ReduceConfig,
) -> Result<()> {
    validate(graph)?;

    if !connectivity::has_cycle(graph) {
        // Acyclic fast path. Cycle freedom was established a moment ago, so
        // the re-check inside the DAG reducer is skipped.
        return dag_reduce(graph, false);
    }

    let mut cond = connectivity::condensation(graph);
    prune_condensed(graph, &mut cond, config)?;
    expand_condensed(graph, &cond, config)?;
    Ok(())
}

fn validate<V: Clone + Eq + Hash>(graph: &Digraph<V>) -> Result<()> {
    let spec = graph.spec();
    if !spec.directed {
        return Err(Error::InvalidInput("graph must be directed".into()));
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

/// Reduces the condensation and shrinks every component to one cycle.
///
/// Components with fewer than 3 edges are already minimal. Synthetic mode
/// clears a component and writes an enumeration-order cycle into both the
/// parent graph and the component copy; exact-subset mode keeps precisely
/// the edges lying on a found Hamiltonian tour, identities untouched.
fn prune_condensed<V: Clone + Eq + Hash>(
    graph: &mut Digraph<V>,
    cond: &mut Condensation<V>,
    config: ReduceConfig,
) -> Result<()> {
    // Condensations are acyclic by construction; no need to re-check.
    dag_reduce(&mut cond.graph, false)?;

    for component in &mut cond.components {
        if component.edge_count() < 3 {
            continue;
        }

        if config.allow_synthetic_edges {
            let cycle: Vec<V> = component.vertices().cloned().collect();
            let old_edges: Vec<EdgeId> = component.edge_ids().collect();
            for id in old_edges {
                component.remove_edge(id);
            }
            for (i, source) in cycle.iter().enumerate() {
                let target = &cycle[(i + 1) % cycle.len()];
                // The parent owns edge identities: mint (or find) the edge
                // there first, then mirror the same handle into the copy.
                let id = graph.add_edge(source.clone(), target.clone());
                component.add_edge_with_id(source.clone(), target.clone(), id);
            }
        } else {
            let tour = hamiltonian_cycle(component)?.ok_or_else(|| {
                Error::InternalInvariant(
                    "strongly connected component reported as not strongly connected".into(),
                )
            })?;
            let position: HashMap<&V, usize> =
                tour.iter().enumerate().map(|(i, v)| (v, i)).collect();

            let edges: Vec<(EdgeId, V, V)> = component
                .edges()
                .map(|(id, s, t)| (id, s.clone(), t.clone()))
                .collect();
            for (id, source, target) in edges {
                let distance = position[&source].abs_diff(position[&target]);
                // Tour neighbours are index distance 1 apart, or m-1 for the
                // wrap-around pair; everything else is a shortcut.
                if distance != 1 && distance + 1 != tour.len() {
                    component.remove_edge(id);
                }
            }
        }
    }
    Ok(())
}

/// Projects the pruned condensation back into the parent graph.
///
/// One witness edge is chosen per surviving inter-component link, every
/// non-witness edge is removed from the parent, and the components' surviving
/// edges are then re-materialized under their original identities. The order
/// matters: pruning goes by witness membership first, component edges are
/// re-added second.
fn expand_condensed<V: Clone + Eq + Hash>(
    graph: &mut Digraph<V>,
    cond: &Condensation<V>,
    config: ReduceConfig,
) -> Result<()> {
    let links: Vec<(usize, usize)> = cond.graph.edges().map(|(_, s, t)| (*s, *t)).collect();
    let mut witnesses: HashSet<EdgeId> = HashSet::with_capacity(links.len());
    for (source, target) in links {
        let id = if config.allow_synthetic_edges {
            synthetic_component_link(graph, &cond.components[source], &cond.components[target])
        } else {
            existing_component_link(graph, &cond.components[source], &cond.components[target])?
        };
        witnesses.insert(id);
    }

    let doomed: Vec<EdgeId> = graph
        .edge_ids()
        .filter(|id| !witnesses.contains(id))
        .collect();
    for id in doomed {
        graph.remove_edge(id);
    }

    for component in &cond.components {
        for (id, source, target) in component.edges() {
            graph.add_edge_with_id(source.clone(), target.clone(), id);
        }
    }
    Ok(())
}

/// First existing edge from any source-component vertex to any
/// target-component vertex, in enumeration order.
fn existing_component_link<V: Clone + Eq + Hash>(
    graph: &Digraph<V>,
    source: &Digraph<V>,
    target: &Digraph<V>,
) -> Result<EdgeId> {
    for u in source.vertices() {
        for v in target.vertices() {
            if let Some(id) = graph.edge_between(u, v) {
                return Ok(id);
            }
        }
    }
    Err(Error::InternalInvariant(
        "condensation edge without a backing edge between its components".into(),
    ))
}

/// Links the first vertex of each component, creating the edge if the input
/// did not already contain it.
fn synthetic_component_link<V: Clone + Eq + Hash>(
    graph: &mut Digraph<V>,
    source: &Digraph<V>,
    target: &Digraph<V>,
) -> EdgeId {
    let u = source
        .vertices()
        .next()
        .expect("strongly connected component cannot be empty");
    let v = target
        .vertices()
        .next()
        .expect("strongly connected component cannot be empty");
    graph.add_edge(u.clone(), v.clone())
}
