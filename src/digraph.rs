//! Directed graph container with stable edge identities.
//!
//! The reducers mutate a caller-owned graph in place, so the container
//! guarantees two things they rely on:
//!
//! - enumeration is deterministic: vertices iterate in insertion order and
//!   edges in identity order (identities are assigned monotonically, so this
//!   is insertion order too);
//! - removing an edge never disturbs any other edge's identity, so a handle
//!   held across a reduction stays valid exactly when its edge survived.

use std::collections::{BTreeMap, HashMap};
use std::hash::Hash;

/// Opaque edge handle.
///
/// Host applications may key auxiliary edge state by it; exact-subset
/// reduction preserves the handles of all surviving edges. Handles are never
/// reused within a graph, even after removal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EdgeId(u64);

/// Type flags reported by a graph. The reduction entry points validate
/// against these rather than scanning the edge set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GraphSpec {
    pub directed: bool,
    pub weighted: bool,
    pub allows_self_loops: bool,
    pub allows_multi_edges: bool,
}

impl Default for GraphSpec {
    /// Directed, unweighted, simple: the only shape the reducers accept.
    fn default() -> Self {
        Self {
            directed: true,
            weighted: false,
            allows_self_loops: false,
            allows_multi_edges: false,
        }
    }
}

/// An insertion-ordered digraph over vertices of type `V`.
///
/// Vertex lookup and vertex-to-position mapping are O(1); both the Hsu
/// reducer and the Hamiltonian search address the bit matrix through
/// [`Digraph::vertex_position`].
#[derive(Debug, Clone)]
pub struct Digraph<V> {
    spec: GraphSpec,
    vertices: Vec<V>,
    positions: HashMap<V, usize>,
    edges: BTreeMap<EdgeId, (V, V)>,
    by_endpoints: HashMap<(V, V), EdgeId>,
    next_edge: u64,
}

impl<V: Clone + Eq + Hash> Digraph<V> {
    /// An empty graph with the default (directed simple unweighted) spec.
    pub fn new() -> Self {
        Self::with_spec(GraphSpec::default())
    }

    /// An empty graph with explicit type flags. Mostly useful for exercising
    /// the validation paths of the reducers.
    pub fn with_spec(spec: GraphSpec) -> Self {
        Self {
            spec,
            vertices: Vec::new(),
            positions: HashMap::new(),
            edges: BTreeMap::new(),
            by_endpoints: HashMap::new(),
            next_edge: 0,
        }
    }

    pub fn spec(&self) -> GraphSpec {
        self.spec
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Vertices in insertion order.
    pub fn vertices(&self) -> impl Iterator<Item = &V> {
        self.vertices.iter()
    }

    pub fn contains_vertex(&self, vertex: &V) -> bool {
        self.positions.contains_key(vertex)
    }

    /// Dense position of `vertex` in the stable enumeration, if present.
    pub fn vertex_position(&self, vertex: &V) -> Option<usize> {
        self.positions.get(vertex).copied()
    }

    /// Adds a vertex; returns `false` if it was already present.
    pub fn add_vertex(&mut self, vertex: V) -> bool {
        if self.positions.contains_key(&vertex) {
            return false;
        }
        self.positions.insert(vertex.clone(), self.vertices.len());
        self.vertices.push(vertex);
        true
    }

    /// Adds an edge, inserting missing endpoints.
    ///
    /// When parallel edges are disallowed and the edge already exists, the
    /// existing handle is returned instead of creating a duplicate.
    ///
    /// # Panics
    ///
    /// If `source == target` while the spec disallows self-loops.
    pub fn add_edge(&mut self, source: V, target: V) -> EdgeId {
        assert!(
            self.spec.allows_self_loops || source != target,
            "graph does not allow self-loops"
        );
        if !self.spec.allows_multi_edges {
            if let Some(&id) = self.by_endpoints.get(&(source.clone(), target.clone())) {
                return id;
            }
        }
        self.add_vertex(source.clone());
        self.add_vertex(target.clone());
        let id = EdgeId(self.next_edge);
        self.next_edge += 1;
        self.insert_edge(source, target, id);
        id
    }

    /// Re-materializes an edge under a caller-chosen identity, e.g. when
    /// projecting surviving component edges back into a parent graph.
    ///
    /// # Panics
    ///
    /// If `id` is currently in use, or the edge already exists while the spec
    /// disallows parallel edges.
    pub fn add_edge_with_id(&mut self, source: V, target: V, id: EdgeId) {
        assert!(
            self.spec.allows_self_loops || source != target,
            "graph does not allow self-loops"
        );
        assert!(!self.edges.contains_key(&id), "edge identity already in use");
        assert!(
            self.spec.allows_multi_edges || !self.contains_edge(&source, &target),
            "graph does not allow parallel edges"
        );
        self.add_vertex(source.clone());
        self.add_vertex(target.clone());
        self.next_edge = self.next_edge.max(id.0 + 1);
        self.insert_edge(source, target, id);
    }

    fn insert_edge(&mut self, source: V, target: V, id: EdgeId) {
        self.by_endpoints.insert((source.clone(), target.clone()), id);
        self.edges.insert(id, (source, target));
    }

    /// Removes an edge by identity, returning its endpoints. Other edges keep
    /// their identities.
    pub fn remove_edge(&mut self, id: EdgeId) -> Option<(V, V)> {
        let (source, target) = self.edges.remove(&id)?;
        let key = (source.clone(), target.clone());
        if self.by_endpoints.get(&key) == Some(&id) {
            self.by_endpoints.remove(&key);
        }
        Some((source, target))
    }

    /// Removes every vertex, and with them every edge.
    pub fn remove_all_vertices(&mut self) {
        self.vertices.clear();
        self.positions.clear();
        self.edges.clear();
        self.by_endpoints.clear();
    }

    pub fn contains_edge(&self, source: &V, target: &V) -> bool {
        self.by_endpoints
            .contains_key(&(source.clone(), target.clone()))
    }

    /// The edge from `source` to `target`, if one exists. For multigraphs
    /// this is one arbitrary representative of the parallel bundle.
    pub fn edge_between(&self, source: &V, target: &V) -> Option<EdgeId> {
        self.by_endpoints
            .get(&(source.clone(), target.clone()))
            .copied()
    }

    pub fn endpoints(&self, id: EdgeId) -> Option<(&V, &V)> {
        self.edges.get(&id).map(|(s, t)| (s, t))
    }

    /// Edge identities in ascending (= insertion) order.
    pub fn edge_ids(&self) -> impl Iterator<Item = EdgeId> + '_ {
        self.edges.keys().copied()
    }

    /// `(id, source, target)` triples in identity order.
    pub fn edges(&self) -> impl Iterator<Item = (EdgeId, &V, &V)> {
        self.edges.iter().map(|(&id, (s, t))| (id, s, t))
    }
}

impl<V: Clone + Eq + Hash> Default for Digraph<V> {
    fn default() -> Self {
        Self::new()
    }
}
