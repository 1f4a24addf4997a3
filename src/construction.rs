//! Standard graph families and seeded random generators.
//!
//! The named families have known planarity: paths, trees, cycles, wheels, grids and the
//! octahedron are planar; `K5`, `K3,3` and the Petersen graph are not. Tests and the bundled
//! validation lean on these.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::graph::Graph;

// ============================================================================
// Named families
// ============================================================================

/// Complete graph `K_n`.
pub fn complete(n: usize) -> Graph {
    let mut g = Graph::new(n);
    for u in 0..n {
        for v in (u + 1)..n {
            g.link(u, v);
        }
    }
    g
}

/// Complete bipartite graph `K_{a,b}` with sides `0..a` and `a..a+b`.
pub fn complete_bipartite(a: usize, b: usize) -> Graph {
    let mut g = Graph::new(a + b);
    for u in 0..a {
        for v in a..(a + b) {
            g.link(u, v);
        }
    }
    g
}

/// Path `0 - 1 - ... - (n-1)`.
pub fn path(n: usize) -> Graph {
    let mut g = Graph::new(n);
    for v in 1..n {
        g.link(v - 1, v);
    }
    g
}

/// Cycle on `n` vertices. Falls back to a path for `n < 3`.
pub fn cycle(n: usize) -> Graph {
    let mut g = path(n);
    if n >= 3 {
        g.link(n - 1, 0);
    }
    g
}

/// Star with centre `0` and `n - 1` leaves.
pub fn star(n: usize) -> Graph {
    let mut g = Graph::new(n);
    for v in 1..n {
        g.link(0, v);
    }
    g
}

/// Wheel: hub `0` joined to every vertex of the rim cycle `1..=rim`.
pub fn wheel(rim: usize) -> Graph {
    let mut g = Graph::new(rim + 1);
    for v in 1..=rim {
        g.link(0, v);
        if rim >= 3 {
            g.link(v, v % rim + 1);
        }
    }
    g
}

/// `rows x cols` grid; vertex `(r, c)` is `r * cols + c`.
pub fn grid(rows: usize, cols: usize) -> Graph {
    let mut g = Graph::new(rows * cols);
    for r in 0..rows {
        for c in 0..cols {
            let v = r * cols + c;
            if c + 1 < cols {
                g.link(v, v + 1);
            }
            if r + 1 < rows {
                g.link(v, v + cols);
            }
        }
    }
    g
}

/// Grid with one diagonal `(r, c) - (r+1, c+1)` per square: a planar near-triangulation.
pub fn triangulated_grid(rows: usize, cols: usize) -> Graph {
    let mut g = grid(rows, cols);
    for r in 0..rows.saturating_sub(1) {
        for c in 0..cols.saturating_sub(1) {
            let v = r * cols + c;
            g.link(v, v + cols + 1);
        }
    }
    g
}

/// Octahedron `K_{2,2,2}`: every vertex is adjacent to all others except its opposite
/// (`0/1`, `2/3`, `4/5`). A maximal planar graph with `3V - 6` edges.
pub fn octahedron() -> Graph {
    let mut g = Graph::new(6);
    for u in 0..6 {
        for v in (u + 1)..6 {
            if u / 2 != v / 2 {
                g.link(u, v);
            }
        }
    }
    g
}

/// Petersen graph: outer 5-cycle `0..5`, spokes `i - i+5`, inner pentagram `5..10`.
pub fn petersen() -> Graph {
    let mut g = Graph::new(10);
    for i in 0..5 {
        g.link(i, (i + 1) % 5);
        g.link(i, i + 5);
        g.link(5 + i, 5 + (i + 2) % 5);
    }
    g
}

// ============================================================================
// Derived graphs
// ============================================================================

/// Replaces the edge `(u, v)` by a path `u - s - v` through a new vertex `s`.
///
/// Returns `None` if `(u, v)` is not an edge of a live pair.
pub fn subdivided(g: &Graph, u: usize, v: usize) -> Option<Graph> {
    let mut out = g.clone();
    if !out.remove_edge(u, v).ok()? {
        return None;
    }
    let s = out.add_vertex();
    out.link(u, s);
    out.link(s, v);
    Some(out)
}

/// Appends `extra` isolated vertices.
pub fn with_isolated(g: &Graph, extra: usize) -> Graph {
    let mut out = g.clone();
    for _ in 0..extra {
        out.add_vertex();
    }
    out
}

// ============================================================================
// Random graphs
// ============================================================================

/// Uniformly random permutation of `0..n`.
pub fn random_permutation<R: Rng>(rng: &mut R, n: usize) -> Vec<usize> {
    let mut perm: Vec<usize> = (0..n).collect();
    perm.shuffle(rng);
    perm
}

/// Relabels `g` by a random permutation; returns the graph and the permutation used
/// (`old -> new`).
pub fn permuted<R: Rng>(rng: &mut R, g: &Graph) -> (Graph, Vec<usize>) {
    let perm = random_permutation(rng, g.order());
    (g.relabeled(&perm), perm)
}

/// Random recursive tree on `n` vertices with shuffled labels.
pub fn random_tree<R: Rng>(rng: &mut R, n: usize) -> Graph {
    let perm = random_permutation(rng, n);
    let mut g = Graph::new(n);
    for v in 1..n {
        let parent = rng.random_range(0..v);
        g.link(perm[parent], perm[v]);
    }
    g
}

/// Erdős–Rényi `G(n, p)`.
pub fn random_graph<R: Rng>(rng: &mut R, n: usize, p: f64) -> Graph {
    debug_assert!((0.0..=1.0).contains(&p), "p must be in [0, 1]");
    let mut g = Graph::new(n);
    for u in 0..n {
        for v in (u + 1)..n {
            if rng.random_bool(p) {
                g.link(u, v);
            }
        }
    }
    g
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_xorshift::XorShiftRng;

    fn is_connected(g: &Graph) -> bool {
        let Some(start) = g.live_vertices().next() else {
            return true;
        };
        let mut seen = vec![false; g.order()];
        let mut todo = vec![start];
        seen[start] = true;
        while let Some(v) = todo.pop() {
            for n in g.neighbors(v) {
                if !seen[n] {
                    seen[n] = true;
                    todo.push(n);
                }
            }
        }
        g.live_vertices().all(|v| seen[v])
    }

    #[test]
    fn family_sizes() {
        assert_eq!(complete(5).edge_count(), 10);
        assert_eq!(complete_bipartite(3, 3).edge_count(), 9);
        assert_eq!(path(6).edge_count(), 5);
        assert_eq!(cycle(6).edge_count(), 6);
        assert_eq!(cycle(2).edge_count(), 1);
        assert_eq!(star(5).edge_count(), 4);
        assert_eq!(wheel(5).edge_count(), 10);
        assert_eq!(grid(3, 4).edge_count(), 3 * 3 + 2 * 4);
        assert_eq!(triangulated_grid(3, 4).edge_count(), 3 * 3 + 2 * 4 + 2 * 3);
        assert_eq!(octahedron().edge_count(), 12);
        assert_eq!(petersen().edge_count(), 15);
    }

    #[test]
    fn petersen_is_cubic() {
        let g = petersen();
        assert!((0..10).all(|v| g.degree(v) == 3));
        assert!(is_connected(&g));
    }

    #[test]
    fn octahedron_is_four_regular() {
        let g = octahedron();
        assert!((0..6).all(|v| g.degree(v) == 4));
        assert!(!g.has_edge(0, 1) && !g.has_edge(2, 3) && !g.has_edge(4, 5));
    }

    #[test]
    fn complete_bipartite_has_no_edges_within_sides() {
        let g = complete_bipartite(3, 3);
        for (u, v) in g.edges() {
            assert!(u < 3 && v >= 3);
        }
    }

    #[test]
    fn subdivided_replaces_edge_with_path() {
        let g = subdivided(&complete(5), 0, 1).unwrap();
        assert_eq!(g.order(), 6);
        assert_eq!(g.edge_count(), 11);
        assert!(!g.has_edge(0, 1));
        assert!(g.has_edge(0, 5) && g.has_edge(5, 1));
        assert!(subdivided(&path(3), 0, 2).is_none());
        assert!(subdivided(&path(3), 0, 7).is_none());
    }

    #[test]
    fn with_isolated_appends_vertices() {
        let g = with_isolated(&complete(5), 3);
        assert_eq!(g.order(), 8);
        assert_eq!(g.edge_count(), 10);
        assert!((5..8).all(|v| g.degree(v) == 0));
    }

    #[test]
    fn random_trees_are_spanning_trees() {
        let mut rng = XorShiftRng::seed_from_u64(0x7EE5);
        for n in 1..40 {
            let t = random_tree(&mut rng, n);
            assert_eq!(t.order(), n);
            assert_eq!(t.edge_count(), n - 1);
            assert!(is_connected(&t));
        }
    }

    #[test]
    fn random_permutation_is_a_permutation() {
        let mut rng = XorShiftRng::seed_from_u64(17);
        let mut perm = random_permutation(&mut rng, 50);
        perm.sort_unstable();
        assert_eq!(perm, (0..50).collect::<Vec<_>>());
    }

    #[test]
    fn permuted_preserves_degree_sequence() {
        let mut rng = XorShiftRng::seed_from_u64(99);
        let g = random_graph(&mut rng, 20, 0.3);
        let (h, perm) = permuted(&mut rng, &g);
        assert_eq!(g.edge_count(), h.edge_count());
        for v in 0..20 {
            assert_eq!(g.degree(v), h.degree(perm[v]));
        }
    }

    #[test]
    fn random_graph_extremes() {
        let mut rng = XorShiftRng::seed_from_u64(1);
        assert_eq!(random_graph(&mut rng, 10, 0.0).edge_count(), 0);
        assert_eq!(random_graph(&mut rng, 10, 1.0), complete(10));
    }
}
