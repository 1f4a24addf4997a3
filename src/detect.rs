//! Forbidden-subgraph detection: `K5` and `K3,3` as subgraphs of a [`Graph`].
//!
//! A match is any vertex subset carrying all the required edges; extra edges and extra
//! vertices are allowed, and the result does not depend on how vertices are labelled.
//!
//! `K5` is found by a clique search: branch and bound over bitset candidate sets, with a
//! greedy colouring of the candidates as the upper bound (Tomita-style). `K3,3` is found by
//! enumerating one side `x1 < x2 < x3` among vertices of degree at least 3 and intersecting
//! their neighbourhoods; any three common neighbours form the other side.

use std::fmt;

use crate::bitset::VertexSet;
use crate::graph::Graph;

// ============================================================================
// Witness
// ============================================================================

/// A located Kuratowski subgraph, in the vertex labels of the searched graph.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SubgraphWitness {
    /// Five pairwise adjacent vertices, ascending.
    K5([usize; 5]),
    /// Two disjoint triples with all nine cross edges present.
    K33 {
        /// One side, ascending.
        left: [usize; 3],
        /// The other side, ascending.
        right: [usize; 3],
    },
}

impl SubgraphWitness {
    /// Short name of the pattern.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::K5(_) => "K5",
            Self::K33 { .. } => "K3,3",
        }
    }

    /// The witness vertices; for `K3,3` the left side comes first.
    pub fn vertices(&self) -> Vec<usize> {
        match self {
            Self::K5(vs) => vs.to_vec(),
            Self::K33 { left, right } => left.iter().chain(right).copied().collect(),
        }
    }

    /// The edges the pattern requires.
    pub fn required_edges(&self) -> Vec<(usize, usize)> {
        match self {
            Self::K5(vs) => {
                let mut out = Vec::with_capacity(10);
                for (i, &u) in vs.iter().enumerate() {
                    out.extend(vs[i + 1..].iter().map(|&v| (u, v)));
                }
                out
            }
            Self::K33 { left, right } => left
                .iter()
                .flat_map(|&u| right.iter().map(move |&v| (u, v)))
                .collect(),
        }
    }

    /// Returns whether the witness is still present in `g`: distinct live vertices and
    /// every required edge.
    pub fn is_present_in(&self, g: &Graph) -> bool {
        let vertices = self.vertices();
        let distinct: VertexSet = vertices.iter().copied().collect();
        distinct.len() == vertices.len()
            && vertices.iter().all(|&v| v < g.order() && !g.is_retired(v))
            && self.required_edges().iter().all(|&(u, v)| g.has_edge(u, v))
    }
}

impl fmt::Display for SubgraphWitness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::K5(vs) => write!(f, "K5 on {vs:?}"),
            Self::K33 { left, right } => write!(f, "K3,3 on {left:?} | {right:?}"),
        }
    }
}

// ============================================================================
// SubgraphDetector
// ============================================================================

/// Exact detector for cliques and the two Kuratowski subgraphs.
///
/// Reuses its scratch buffers across queries.
#[derive(Clone, Debug, Default)]
pub struct SubgraphDetector {
    stack: Vec<usize>,
    common: VertexSet,
}

impl SubgraphDetector {
    /// Creates a detector with empty scratch space.
    pub fn new() -> Self {
        Self::default()
    }

    /// Finds `k` pairwise adjacent live vertices, returned ascending.
    pub fn find_clique(&mut self, g: &Graph, k: usize) -> Option<Vec<usize>> {
        if k == 0 {
            return Some(Vec::new());
        }
        // A vertex of a k-clique has degree at least k - 1.
        let candidates: VertexSet = g
            .live_vertices()
            .filter(|&v| g.degree(v) + 1 >= k)
            .collect();

        self.stack.clear();
        let mut out = Vec::with_capacity(k);
        if self.search_clique(g, k, candidates, &mut out) {
            out.sort_unstable();
            Some(out)
        } else {
            None
        }
    }

    /// Finds a `K5` subgraph.
    pub fn find_k5(&mut self, g: &Graph) -> Option<[usize; 5]> {
        let vs = self.find_clique(g, 5)?;
        Some([vs[0], vs[1], vs[2], vs[3], vs[4]])
    }

    /// Finds two disjoint triples `(left, right)` with every cross pair adjacent.
    pub fn find_k33(&mut self, g: &Graph) -> Option<([usize; 3], [usize; 3])> {
        let candidates: Vec<usize> = g.live_vertices().filter(|&v| g.degree(v) >= 3).collect();

        for (i, &x1) in candidates.iter().enumerate() {
            for (j, &x2) in candidates.iter().enumerate().skip(i + 1) {
                let c12 = g.common_neighbors(x1, x2);
                if c12.len() < 3 {
                    continue;
                }
                for &x3 in &candidates[j + 1..] {
                    if c12.intersection_len(g.neighbors(x3)) < 3 {
                        continue;
                    }
                    // No vertex neighbours itself, so the common set never meets {x1, x2, x3}.
                    self.common.clone_from(&c12);
                    self.common.intersect_with(g.neighbors(x3));
                    let mut it = self.common.iter();
                    if let (Some(y1), Some(y2), Some(y3)) = (it.next(), it.next(), it.next()) {
                        return Some(([x1, x2, x3], [y1, y2, y3]));
                    }
                }
            }
        }
        None
    }

    /// Finds a `K5`, failing that a `K3,3`.
    pub fn find_forbidden(&mut self, g: &Graph) -> Option<SubgraphWitness> {
        if let Some(vs) = self.find_k5(g) {
            return Some(SubgraphWitness::K5(vs));
        }
        self.find_k33(g)
            .map(|(left, right)| SubgraphWitness::K33 { left, right })
    }

    fn search_clique(
        &mut self,
        g: &Graph,
        k: usize,
        mut candidates: VertexSet,
        out: &mut Vec<usize>,
    ) -> bool {
        let size = self.stack.len();
        if size >= k {
            out.clear();
            out.extend_from_slice(&self.stack);
            return true;
        }
        if size + candidates.len() < k {
            return false;
        }

        let (order, colors) = color_sort(g, &candidates);
        for idx in (0..order.len()).rev() {
            if size + colors[idx] < k {
                return false;
            }

            let v = order[idx];
            self.stack.push(v);
            let next = candidates.intersection(g.neighbors(v));
            if self.search_clique(g, k, next, out) {
                return true;
            }
            self.stack.pop();
            candidates.remove(v);
        }
        false
    }
}

// ============================================================================
// Free functions
// ============================================================================

/// Finds `k` pairwise adjacent live vertices, returned ascending.
pub fn find_clique(g: &Graph, k: usize) -> Option<Vec<usize>> {
    SubgraphDetector::new().find_clique(g, k)
}

/// Finds five pairwise adjacent vertices.
pub fn find_k5(g: &Graph) -> Option<[usize; 5]> {
    SubgraphDetector::new().find_k5(g)
}

/// Finds two disjoint triples `(left, right)` with every cross pair adjacent.
pub fn find_k33(g: &Graph) -> Option<([usize; 3], [usize; 3])> {
    SubgraphDetector::new().find_k33(g)
}

/// Returns `true` iff `g` contains a `K5` subgraph.
pub fn has_k5(g: &Graph) -> bool {
    find_k5(g).is_some()
}

/// Returns `true` iff `g` contains a `K3,3` subgraph.
pub fn has_k33(g: &Graph) -> bool {
    find_k33(g).is_some()
}

/// Finds a `K5`, failing that a `K3,3`.
pub fn find_forbidden(g: &Graph) -> Option<SubgraphWitness> {
    SubgraphDetector::new().find_forbidden(g)
}

// ============================================================================
// Greedy coloring for clique bound
// ============================================================================

/// Orders `candidates` by greedy colour class; `colors[i]` bounds the clique size among
/// `order[..=i]`.
fn color_sort(g: &Graph, candidates: &VertexSet) -> (Vec<usize>, Vec<usize>) {
    let mut remaining = candidates.clone();
    let mut order = Vec::with_capacity(candidates.len());
    let mut colors = Vec::with_capacity(candidates.len());
    let mut color = 0usize;

    while !remaining.is_empty() {
        color += 1;
        let mut available = remaining.clone();
        while let Some(v) = available.first() {
            order.push(v);
            colors.push(color);
            remaining.remove(v);
            available.remove(v);
            available.difference_with(g.neighbors(v));
        }
    }
    (order, colors)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::construction::{
        complete, complete_bipartite, cycle, grid, octahedron, permuted, petersen, random_graph,
        with_isolated,
    };
    use rand::SeedableRng;
    use rand_xorshift::XorShiftRng;

    fn brute_k5(g: &Graph) -> bool {
        let n = g.order();
        let adj = |u: usize, v: usize| g.has_edge(u, v);
        for a in 0..n {
            for b in (a + 1)..n {
                if !adj(a, b) { continue; }
                for c in (b + 1)..n {
                    if !(adj(a, c) && adj(b, c)) { continue; }
                    for d in (c + 1)..n {
                        if !(adj(a, d) && adj(b, d) && adj(c, d)) { continue; }
                        for e in (d + 1)..n {
                            if adj(a, e) && adj(b, e) && adj(c, e) && adj(d, e) {
                                return true;
                            }
                        }
                    }
                }
            }
        }
        false
    }

    fn brute_k33(g: &Graph) -> bool {
        let n = g.order();
        for mask in 0u32..(1 << n) {
            if mask.count_ones() != 6 {
                continue;
            }
            let vs: Vec<usize> = (0..n).filter(|&v| (mask & (1 << v)) != 0).collect();
            // Every 3/3 split with vs[0] on the left.
            for i in 1..6 {
                for j in (i + 1)..6 {
                    let left = [vs[0], vs[i], vs[j]];
                    let right: Vec<usize> =
                        vs.iter().copied().filter(|v| !left.contains(v)).collect();
                    if left
                        .iter()
                        .all(|&x| right.iter().all(|&y| g.has_edge(x, y)))
                    {
                        return true;
                    }
                }
            }
        }
        false
    }

    // -------------------------------------------------------------------------
    // K5
    // -------------------------------------------------------------------------

    #[test]
    fn k5_is_found_exactly() {
        assert_eq!(find_k5(&complete(5)), Some([0, 1, 2, 3, 4]));
    }

    #[test]
    fn k5_survives_isolated_vertices() {
        let g = with_isolated(&complete(5), 4);
        assert_eq!(find_k5(&g), Some([0, 1, 2, 3, 4]));
    }

    #[test]
    fn k4_and_k5_minus_edge_have_no_k5() {
        assert!(!has_k5(&complete(4)));
        let mut g = complete(5);
        g.remove_edge(1, 3).unwrap();
        assert!(!has_k5(&g));
    }

    #[test]
    fn k5_witness_follows_relabelling() {
        let mut rng = XorShiftRng::seed_from_u64(0x5EED);
        let base = with_isolated(&complete(5), 5);
        for _ in 0..20 {
            let (g, perm) = permuted(&mut rng, &base);
            let mut expected: Vec<usize> = (0..5).map(|v| perm[v]).collect();
            expected.sort_unstable();
            assert_eq!(find_k5(&g).map(|w| w.to_vec()), Some(expected));
        }
    }

    #[test]
    fn clique_search_in_dense_graph() {
        let g = complete(9);
        let clique = find_clique(&g, 7).unwrap();
        assert_eq!(clique.len(), 7);
        assert!(find_clique(&g, 10).is_none());
        assert_eq!(find_clique(&g, 0), Some(vec![]));
    }

    #[test]
    fn k5_matches_brute_force() {
        let mut rng = XorShiftRng::seed_from_u64(0xC11C);
        for _ in 0..200 {
            let g = random_graph(&mut rng, 9, 0.6);
            let found = find_k5(&g);
            assert_eq!(found.is_some(), brute_k5(&g));
            if let Some(vs) = found {
                assert!(SubgraphWitness::K5(vs).is_present_in(&g));
            }
        }
    }

    // -------------------------------------------------------------------------
    // K3,3
    // -------------------------------------------------------------------------

    #[test]
    fn k33_is_found_exactly() {
        assert_eq!(
            find_k33(&complete_bipartite(3, 3)),
            Some(([0, 1, 2], [3, 4, 5]))
        );
    }

    #[test]
    fn k33_with_chords_is_still_found() {
        let mut g = complete_bipartite(3, 3);
        g.add_edge(0, 1).unwrap();
        g.add_edge(4, 5).unwrap();
        let (left, right) = find_k33(&g).unwrap();
        let w = SubgraphWitness::K33 { left, right };
        assert!(w.is_present_in(&g));
    }

    #[test]
    fn k33_is_label_independent() {
        let mut rng = XorShiftRng::seed_from_u64(33);
        let base = with_isolated(&complete_bipartite(3, 3), 3);
        for _ in 0..30 {
            let (g, _) = permuted(&mut rng, &base);
            let (left, right) = find_k33(&g).unwrap();
            assert!(SubgraphWitness::K33 { left, right }.is_present_in(&g));
        }
    }

    #[test]
    fn reused_detector_does_not_leak_scratch_between_graphs() {
        let mut detector = SubgraphDetector::new();
        let big = with_isolated(&complete_bipartite(3, 3), 70);
        assert_eq!(detector.find_k33(&big), Some(([0, 1, 2], [3, 4, 5])));

        let mut g = complete_bipartite(3, 3);
        g.remove_edge(2, 5).unwrap();
        assert_eq!(detector.find_k33(&g), None);
        assert_eq!(
            detector.find_k33(&complete_bipartite(3, 4)),
            Some(([0, 1, 2], [3, 4, 5]))
        );
        assert_eq!(
            detector.find_forbidden(&complete(5)),
            Some(SubgraphWitness::K5([0, 1, 2, 3, 4]))
        );
    }

    #[test]
    fn k33_minus_edge_is_not_found() {
        let mut g = complete_bipartite(3, 3);
        g.remove_edge(2, 5).unwrap();
        assert!(!has_k33(&g));
    }

    #[test]
    fn planar_families_have_no_forbidden_subgraph() {
        for g in [octahedron(), grid(4, 4), cycle(8), complete(4)] {
            assert_eq!(find_forbidden(&g), None);
        }
    }

    #[test]
    fn petersen_has_no_forbidden_subgraph() {
        // Non-planar, but only through a subdivision / minor.
        assert_eq!(find_forbidden(&petersen()), None);
    }

    #[test]
    fn k33_matches_brute_force() {
        let mut rng = XorShiftRng::seed_from_u64(0xB1_9A_27);
        for _ in 0..100 {
            let g = random_graph(&mut rng, 8, 0.55);
            let found = find_k33(&g);
            assert_eq!(found.is_some(), brute_k33(&g));
            if let Some((left, right)) = found {
                assert!(SubgraphWitness::K33 { left, right }.is_present_in(&g));
            }
        }
    }

    // -------------------------------------------------------------------------
    // Witness
    // -------------------------------------------------------------------------

    #[test]
    fn find_forbidden_prefers_k5() {
        // K6 contains both patterns.
        let w = find_forbidden(&complete(6)).unwrap();
        assert_eq!(w.name(), "K5");
        assert_eq!(w.vertices().len(), 5);
    }

    #[test]
    fn witness_detects_removed_edge() {
        let mut g = complete_bipartite(3, 3);
        let w = find_forbidden(&g).unwrap();
        assert_eq!(w.required_edges().len(), 9);
        assert!(w.is_present_in(&g));
        g.remove_edge(0, 3).unwrap();
        assert!(!w.is_present_in(&g));
    }

    #[test]
    fn witness_rejects_retired_vertices() {
        let mut g = with_isolated(&complete(5), 1);
        g.add_edge(4, 5).unwrap();
        let w = SubgraphWitness::K5([0, 1, 2, 3, 4]);
        assert!(w.is_present_in(&g));
        g.contract_edge(4, 5).unwrap();
        assert!(!w.is_present_in(&g));
    }

    #[test]
    fn witness_display() {
        assert_eq!(SubgraphWitness::K5([0, 1, 2, 3, 4]).to_string(), "K5 on [0, 1, 2, 3, 4]");
        let w = SubgraphWitness::K33 { left: [0, 1, 2], right: [3, 4, 5] };
        assert_eq!(w.to_string(), "K3,3 on [0, 1, 2] | [3, 4, 5]");
    }
}
