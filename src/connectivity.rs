//! Strong connectivity and cycle analysis.
//!
//! Kosaraju's two-pass algorithm drives everything here: component discovery,
//! the strong-connectivity test used by the Hamiltonian search, and the
//! condensation consumed by the cyclic reducer. All traversals are iterative
//! and follow the container's vertex order, so results are deterministic for
//! a fixed build order.

use std::hash::Hash;

use crate::digraph::Digraph;

/// The condensation of a digraph: one side-table entry per strongly connected
/// component, plus an acyclic digraph over component positions.
///
/// Components are induced subgraphs; their edges carry the parent graph's
/// identities, so edits made to a component can later be projected back into
/// the parent under the original handles. Component nodes are addressed by
/// position rather than embedding graphs as vertices.
#[derive(Debug, Clone)]
pub struct Condensation<V> {
    /// Induced SCC subgraphs, in component discovery order.
    pub components: Vec<Digraph<V>>,
    /// Inter-component links; vertices are indices into `components`.
    /// Acyclic by construction.
    pub graph: Digraph<usize>,
}

/// Out-neighbor lists indexed by vertex position.
fn adjacency_positions<V: Clone + Eq + Hash>(graph: &Digraph<V>) -> Vec<Vec<usize>> {
    let mut adjacency = vec![Vec::new(); graph.vertex_count()];
    for (_, source, target) in graph.edges() {
        let i = graph
            .vertex_position(source)
            .expect("edge source missing from vertex set");
        let j = graph
            .vertex_position(target)
            .expect("edge target missing from vertex set");
        adjacency[i].push(j);
    }
    adjacency
}

/// Whether the graph contains a directed cycle (self-loops count).
pub fn has_cycle<V: Clone + Eq + Hash>(graph: &Digraph<V>) -> bool {
    const WHITE: u8 = 0;
    const GRAY: u8 = 1;
    const BLACK: u8 = 2;

    let adjacency = adjacency_positions(graph);
    let n = adjacency.len();
    let mut color = vec![WHITE; n];
    let mut stack: Vec<(usize, usize)> = Vec::new();

    for root in 0..n {
        if color[root] != WHITE {
            continue;
        }
        color[root] = GRAY;
        stack.push((root, 0));
        while let Some(frame) = stack.last_mut() {
            let v = frame.0;
            if frame.1 < adjacency[v].len() {
                let w = adjacency[v][frame.1];
                frame.1 += 1;
                match color[w] {
                    WHITE => {
                        color[w] = GRAY;
                        stack.push((w, 0));
                    }
                    GRAY => return true,
                    _ => {}
                }
            } else {
                color[v] = BLACK;
                stack.pop();
            }
        }
    }
    false
}

/// Vertex positions grouped into strongly connected components.
fn scc_positions(adjacency: &[Vec<usize>]) -> Vec<Vec<usize>> {
    let n = adjacency.len();

    // Pass 1: record DFS finish order on the forward graph.
    let mut visited = vec![false; n];
    let mut finish_order = Vec::with_capacity(n);
    let mut stack: Vec<(usize, usize)> = Vec::new();
    for root in 0..n {
        if visited[root] {
            continue;
        }
        visited[root] = true;
        stack.push((root, 0));
        while let Some(frame) = stack.last_mut() {
            let v = frame.0;
            if frame.1 < adjacency[v].len() {
                let w = adjacency[v][frame.1];
                frame.1 += 1;
                if !visited[w] {
                    visited[w] = true;
                    stack.push((w, 0));
                }
            } else {
                finish_order.push(v);
                stack.pop();
            }
        }
    }

    // Pass 2: sweep the reverse graph in reverse finish order.
    let mut reverse = vec![Vec::new(); n];
    for (v, out) in adjacency.iter().enumerate() {
        for &w in out {
            reverse[w].push(v);
        }
    }
    let mut component_of = vec![usize::MAX; n];
    let mut components = Vec::new();
    let mut work = Vec::new();
    for &root in finish_order.iter().rev() {
        if component_of[root] != usize::MAX {
            continue;
        }
        let id = components.len();
        let mut members = Vec::new();
        component_of[root] = id;
        work.push(root);
        while let Some(v) = work.pop() {
            members.push(v);
            for &w in &reverse[v] {
                if component_of[w] == usize::MAX {
                    component_of[w] = id;
                    work.push(w);
                }
            }
        }
        components.push(members);
    }
    components
}

/// Strongly connected components, as vertex groups.
pub fn strongly_connected_components<V: Clone + Eq + Hash>(graph: &Digraph<V>) -> Vec<Vec<V>> {
    let order: Vec<&V> = graph.vertices().collect();
    scc_positions(&adjacency_positions(graph))
        .into_iter()
        .map(|members| members.into_iter().map(|i| order[i].clone()).collect())
        .collect()
}

/// Whether every vertex can reach every other. `false` for the empty graph.
pub fn is_strongly_connected<V: Clone + Eq + Hash>(graph: &Digraph<V>) -> bool {
    scc_positions(&adjacency_positions(graph)).len() == 1
}

/// Condenses `graph` into its SCC structure.
///
/// Each component subgraph inherits the parent's spec and lists its vertices
/// in parent order; intra-component edges keep the parent's identities.
pub fn condensation<V: Clone + Eq + Hash>(graph: &Digraph<V>) -> Condensation<V> {
    let order: Vec<&V> = graph.vertices().collect();
    let groups = scc_positions(&adjacency_positions(graph));

    let mut component_of = vec![usize::MAX; order.len()];
    for (id, members) in groups.iter().enumerate() {
        for &position in members {
            component_of[position] = id;
        }
    }

    let mut components: Vec<Digraph<V>> = groups
        .iter()
        .map(|_| Digraph::with_spec(graph.spec()))
        .collect();
    // Parent vertex order, restricted to each component.
    for (position, vertex) in order.iter().enumerate() {
        components[component_of[position]].add_vertex((*vertex).clone());
    }

    let mut condensed: Digraph<usize> = Digraph::new();
    for id in 0..components.len() {
        condensed.add_vertex(id);
    }
    for (id, source, target) in graph.edges() {
        let from = component_of[graph
            .vertex_position(source)
            .expect("edge source missing from vertex set")];
        let to = component_of[graph
            .vertex_position(target)
            .expect("edge target missing from vertex set")];
        if from == to {
            components[from].add_edge_with_id(source.clone(), target.clone(), id);
        } else if !condensed.contains_edge(&from, &to) {
            condensed.add_edge(from, to);
        }
    }

    Condensation {
        components,
        graph: condensed,
    }
}
