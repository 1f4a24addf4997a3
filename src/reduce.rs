//! Edge-contraction reduction.
//!
//! An edge `(u, v)` is *admissible* when `u` and `v` have no common neighbour, so that
//! merging them can create neither a parallel edge nor a loop. The reducer contracts the
//! first admissible edge it finds (lowest `u`, then lowest `v`), rescans from the start, and
//! stops once no edge is admissible: at that point every remaining edge lies on a triangle.
//!
//! Each contraction removes exactly one live vertex and one edge, so the loop runs at most
//! `live_vertex_count - 1` times. The reduced graph is simple and is a minor of the input.
//!
//! The admissibility rule is a conservative heuristic. Textbook reductions merge parallel
//! edges instead of refusing the contraction, and contracting an admissible edge can
//! destroy a Kuratowski subgraph (every edge of `K3,3` is admissible), so a planar result
//! after reduction is not a proof of planarity.
//!
//! For example, `K3,3` with the edge `0-3` subdivided by vertex 6 has no `K5` or `K3,3`
//! subgraph. It reduces through `(0, 4) -> 7` and `(1, 3) -> 8` to 5 vertices and 8 edges,
//! which contains neither pattern and satisfies `E <= 3V - 6`, so it passes as planar.

use log::{debug, trace};

use crate::bitset::VertexSet;
use crate::graph::Graph;

/// Returns whether `(u, v)` is an edge whose endpoints share no neighbour.
pub fn is_admissible(g: &Graph, u: usize, v: usize) -> bool {
    u != v && g.has_edge(u, v) && !g.neighbors(u).intersects(g.neighbors(v))
}

/// First admissible edge `(u, v)`, `u < v`, by lowest `u` then lowest `v`.
pub fn find_admissible_edge(g: &Graph) -> Option<(usize, usize)> {
    for u in g.live_vertices() {
        let nu = g.neighbors(u);
        if let Some(v) = nu
            .iter()
            .filter(|&v| v > u)
            .find(|&v| !nu.intersects(g.neighbors(v)))
        {
            return Some((u, v));
        }
    }
    None
}

/// One applied contraction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Contraction {
    /// Lower endpoint.
    pub u: usize,
    /// Higher endpoint.
    pub v: usize,
    /// Index of the merged vertex.
    pub merged: usize,
}

/// Contracts admissible edges to a fixpoint while tracking which original vertices each
/// vertex stands for.
#[derive(Clone, Debug, Default)]
pub struct Reducer {
    branch_sets: Vec<VertexSet>,
    contractions: Vec<Contraction>,
}

impl Reducer {
    /// Creates an idle reducer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reduces `g` in place and returns the number of contractions applied.
    ///
    /// Vertices present when the call starts are their own branch sets; every merged vertex
    /// gets the union of its endpoints' branch sets.
    pub fn reduce(&mut self, g: &mut Graph) -> usize {
        self.branch_sets = (0..g.order())
            .map(|v| VertexSet::from_vertices(&[v]))
            .collect();
        self.contractions.clear();

        while let Some((u, v)) = find_admissible_edge(g) {
            let merged = match g.contract_edge(u, v) {
                Ok(w) => w,
                Err(e) => {
                    // find_admissible_edge only yields live edges.
                    debug_assert!(false, "admissible edge ({u}, {v}) failed to contract: {e}");
                    break;
                }
            };

            let mut branch = self.branch_sets[u].clone();
            branch.union_with(&self.branch_sets[v]);
            self.branch_sets.resize(merged, VertexSet::new());
            self.branch_sets.push(branch);
            self.contractions.push(Contraction { u, v, merged });
            trace!("contracted ({u}, {v}) into {merged}");
        }

        debug!(
            "reduction: {} contractions, {} live vertices, {} edges",
            self.contractions.len(),
            g.live_vertex_count(),
            g.edge_count()
        );
        self.contractions.len()
    }

    /// Contractions applied by the last [`reduce`](Self::reduce), in order.
    pub fn contractions(&self) -> &[Contraction] {
        &self.contractions
    }

    /// Original vertices merged into `v` by the last reduction.
    pub fn branch_set(&self, v: usize) -> Option<&VertexSet> {
        self.branch_sets.get(v)
    }
}

/// Reduces `g` in place; returns the number of contractions.
pub fn reduce(g: &mut Graph) -> usize {
    Reducer::new().reduce(g)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::construction::{
        complete, complete_bipartite, cycle, octahedron, path, random_graph, random_tree,
        subdivided, wheel,
    };
    use crate::detect::find_k5;
    use rand::SeedableRng;
    use rand_xorshift::XorShiftRng;

    #[test]
    fn admissibility_rule() {
        let tri = complete(3);
        assert!(!is_admissible(&tri, 0, 1));

        let p = path(3);
        assert!(is_admissible(&p, 0, 1));
        assert!(is_admissible(&p, 1, 0));
        assert!(!is_admissible(&p, 0, 2));
        assert!(!is_admissible(&p, 1, 1));
        assert!(!is_admissible(&p, 1, 9));
    }

    #[test]
    fn first_found_edge_is_lowest() {
        assert_eq!(find_admissible_edge(&path(4)), Some((0, 1)));
        assert_eq!(find_admissible_edge(&complete(4)), None);

        // Triangle 0-1-2 with pendant 2-3: only the pendant edge is admissible.
        let g = Graph::from_edges(4, &[(0, 1), (1, 2), (0, 2), (2, 3)]).unwrap();
        assert_eq!(find_admissible_edge(&g), Some((2, 3)));
    }

    #[test]
    fn trees_reduce_to_a_single_vertex() {
        let mut rng = XorShiftRng::seed_from_u64(0x7233);
        for n in 1..30 {
            let mut t = random_tree(&mut rng, n);
            assert_eq!(reduce(&mut t), n - 1);
            assert_eq!(t.live_vertex_count(), 1);
            assert_eq!(t.edge_count(), 0);
        }
    }

    #[test]
    fn cycles_reduce_to_a_triangle() {
        for n in 3..12 {
            let mut c = cycle(n);
            assert_eq!(reduce(&mut c), n - 3);
            assert_eq!(c.live_vertex_count(), 3);
            assert_eq!(c.edge_count(), 3);
        }
    }

    #[test]
    fn triangulated_graphs_are_fixpoints() {
        for g in [complete(4), complete(5), wheel(6), octahedron()] {
            let mut h = g.clone();
            assert_eq!(reduce(&mut h), 0);
            assert_eq!(h, g);
        }
    }

    #[test]
    fn each_contraction_removes_one_vertex_and_one_edge() {
        let mut rng = XorShiftRng::seed_from_u64(0xED6E);
        for _ in 0..50 {
            let mut g = random_graph(&mut rng, 14, 0.2);
            while let Some((u, v)) = find_admissible_edge(&g) {
                let (vs, es) = (g.live_vertex_count(), g.edge_count());
                g.contract_edge(u, v).unwrap();
                assert_eq!(g.live_vertex_count(), vs - 1);
                assert_eq!(g.edge_count(), es - 1);
            }
        }
    }

    #[test]
    fn fixpoint_puts_every_edge_on_a_triangle() {
        let mut rng = XorShiftRng::seed_from_u64(0xF1C5);
        for _ in 0..50 {
            let mut g = random_graph(&mut rng, 16, 0.15);
            reduce(&mut g);
            for (u, v) in g.edges() {
                assert!(!g.common_neighbors(u, v).is_empty());
            }
        }
    }

    #[test]
    fn branch_sets_partition_the_original_vertices() {
        let mut rng = XorShiftRng::seed_from_u64(0xB5);
        for _ in 0..30 {
            let original = random_graph(&mut rng, 15, 0.18);
            let mut g = original.clone();
            let mut reducer = Reducer::new();
            let n = reducer.reduce(&mut g);
            assert_eq!(reducer.contractions().len(), n);

            let mut covered = VertexSet::new();
            for v in g.live_vertices() {
                let branch = reducer.branch_set(v).unwrap();
                assert!(!branch.intersects(&covered));
                covered.union_with(branch);
            }
            assert_eq!(covered, (0..original.order()).collect::<VertexSet>());
        }
    }

    #[test]
    fn subdivided_k5_reduces_to_k5() {
        let mut g = subdivided(&complete(5), 0, 1).unwrap();
        let mut reducer = Reducer::new();
        assert_eq!(reducer.reduce(&mut g), 1);
        assert_eq!(
            reducer.contractions(),
            &[Contraction { u: 0, v: 5, merged: 6 }]
        );
        assert_eq!(find_k5(&g), Some([1, 2, 3, 4, 6]));
        assert_eq!(reducer.branch_set(6), Some(&VertexSet::from_vertices(&[0, 5])));
    }

    #[test]
    fn reduction_can_destroy_k33() {
        let mut g = complete_bipartite(3, 3);
        assert_eq!(find_admissible_edge(&g), Some((0, 3)));
        assert_eq!(reduce(&mut g), 1);
        assert_eq!(g.live_vertex_count(), 5);
        assert_eq!(g.edge_count(), 8);
        assert!(!crate::detect::has_k33(&g));
    }

    #[test]
    fn subdivided_k33_passes_as_planar() {
        let original = subdivided(&complete_bipartite(3, 3), 0, 3).unwrap();
        assert_eq!(crate::detect::find_forbidden(&original), None);

        let mut g = original.clone();
        let mut reducer = Reducer::new();
        assert_eq!(reducer.reduce(&mut g), 2);
        assert_eq!(
            reducer.contractions(),
            &[
                Contraction { u: 0, v: 4, merged: 7 },
                Contraction { u: 1, v: 3, merged: 8 },
            ]
        );
        assert_eq!(g.live_vertices().collect::<Vec<_>>(), vec![2, 5, 6, 7, 8]);
        assert_eq!(g.edge_count(), 8);
        assert_eq!(crate::detect::find_forbidden(&g), None);

        // A known false positive of the reduction heuristic.
        let report = crate::oracle::check(&original);
        assert!(report.verdict.is_planar());
        assert!(report.edge_bound_holds);
    }
}
