use std::collections::HashSet;
use std::hash::Hash;

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tred::{hamiltonian_cycle, Digraph, Error, GraphSpec};

fn add_cycle<V: Clone + Eq + Hash>(g: &mut Digraph<V>, vertices: &[V]) {
    for v in vertices {
        g.add_vertex(v.clone());
    }
    for i in 0..vertices.len() {
        g.add_edge(
            vertices[i].clone(),
            vertices[(i + 1) % vertices.len()].clone(),
        );
    }
}

/// A dense strongly connected graph on `n` vertices: a Hamiltonian cycle plus
/// redundant edges from smaller to bigger vertex index between all remaining
/// pairs.
fn dense_scc(n: usize) -> Digraph<usize> {
    let mut g = Digraph::new();
    add_cycle(&mut g, &(0..n).collect::<Vec<_>>());
    for source in 0..n {
        for target in source + 1..n {
            if g.contains_edge(&source, &target) || g.contains_edge(&target, &source) {
                continue;
            }
            g.add_edge(source, target);
        }
    }
    g
}

fn shuffled<V: Clone + Eq + Hash>(g: &Digraph<V>, seed: u64) -> Digraph<V> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut vertices: Vec<V> = g.vertices().cloned().collect();
    let mut edges: Vec<(V, V)> = g.edges().map(|(_, u, v)| (u.clone(), v.clone())).collect();
    vertices.shuffle(&mut rng);
    edges.shuffle(&mut rng);
    let mut out = Digraph::with_spec(g.spec());
    for v in vertices {
        out.add_vertex(v);
    }
    for (u, v) in edges {
        out.add_edge(u, v);
    }
    out
}

/// The tour must visit every vertex exactly once, walk only along existing
/// edges, and close back to its first vertex.
fn assert_hamiltonian<V: Clone + Eq + Hash + std::fmt::Debug>(g: &Digraph<V>, tour: &[V]) {
    assert_eq!(tour.len(), g.vertex_count());
    let distinct: HashSet<&V> = tour.iter().collect();
    assert_eq!(distinct.len(), tour.len(), "tour repeats a vertex");
    for i in 0..tour.len() {
        let u = &tour[i];
        let v = &tour[(i + 1) % tour.len()];
        assert!(g.contains_edge(u, v), "tour step {u:?} -> {v:?} is not an edge");
    }
}

#[test]
fn small_hamiltonian_graph() {
    let mut g = Digraph::new();
    add_cycle(&mut g, &["a", "b", "c", "d"]);
    let tour = hamiltonian_cycle(&g).unwrap().unwrap();
    assert_hamiltonian(&g, &tour);

    g.add_edge("a", "c");
    g.add_edge("b", "d");
    let tour = hamiltonian_cycle(&g).unwrap().unwrap();
    assert_hamiltonian(&g, &tour);
}

#[test]
fn small_non_hamiltonian_graph() {
    let mut g = Digraph::new();
    g.add_edge("a", "b");
    g.add_edge("b", "c");
    g.add_edge("b", "d");
    assert_eq!(hamiltonian_cycle(&g).unwrap(), None);
}

#[test]
fn exhausted_search_on_strongly_connected_input_is_an_internal_error() {
    // Figure-eight: two triangles sharing vertex m. Strongly connected, but
    // every cycle through m covers only one triangle, so no Hamiltonian
    // cycle exists and the search exhausts.
    let mut g = Digraph::new();
    for (u, v) in [
        ("a", "b"),
        ("b", "m"),
        ("m", "a"),
        ("m", "c"),
        ("c", "d"),
        ("d", "m"),
    ] {
        g.add_edge(u, v);
    }
    assert!(matches!(
        hamiltonian_cycle(&g),
        Err(Error::InternalInvariant(_))
    ));
}

#[test]
fn medium_hamiltonian_graph() {
    let g = shuffled(&dense_scc(16), 3);
    let tour = hamiltonian_cycle(&g).unwrap().unwrap();
    assert_hamiltonian(&g, &tour);
}

#[test]
fn randomized_sizes_all_find_tours() {
    for n in 3..=12 {
        let g = shuffled(&dense_scc(n), n as u64);
        let tour = hamiltonian_cycle(&g).unwrap().unwrap();
        assert_hamiltonian(&g, &tour);
    }
}

#[test]
fn result_is_deterministic_for_a_fixed_enumeration() {
    let g = shuffled(&dense_scc(9), 17);
    let first = hamiltonian_cycle(&g).unwrap().unwrap();
    let second = hamiltonian_cycle(&g).unwrap().unwrap();
    assert_eq!(first, second);
}

#[test]
fn invalid_shapes_are_rejected() {
    let specs = [
        GraphSpec {
            directed: false,
            ..GraphSpec::default()
        },
        GraphSpec {
            weighted: true,
            ..GraphSpec::default()
        },
        GraphSpec {
            allows_self_loops: true,
            ..GraphSpec::default()
        },
        GraphSpec {
            allows_multi_edges: true,
            ..GraphSpec::default()
        },
    ];
    for spec in specs {
        let mut g = Digraph::with_spec(spec);
        add_cycle(&mut g, &["a", "b", "c", "d"]);
        assert!(
            matches!(hamiltonian_cycle(&g), Err(Error::InvalidInput(_))),
            "spec {spec:?} should be rejected"
        );
    }
}

#[test]
fn graphs_below_three_vertices_are_rejected() {
    let empty: Digraph<&str> = Digraph::new();
    assert!(matches!(
        hamiltonian_cycle(&empty),
        Err(Error::InvalidInput(_))
    ));

    let mut tiny = Digraph::new();
    tiny.add_edge("a", "b");
    assert!(matches!(
        hamiltonian_cycle(&tiny),
        Err(Error::InvalidInput(_))
    ));
}
