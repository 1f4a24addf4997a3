//! # Planarity
//!
//! Planarity screening of simple undirected graphs by Kuratowski obstructions.
//!
//! This crate provides:
//! - A growable bitset graph store with edge contraction that retires merged endpoints.
//! - An exact **subgraph** detector for `K5` (branch-and-bound clique search with
//!   greedy-colouring bounds) and `K3,3` (neighbourhood intersection), independent of labels.
//! - An edge-contraction reducer that shrinks the graph to a simple minor.
//! - A planarity oracle combining both with the Euler bound `E <= 3V - 6`.
//!
//! Every non-planar verdict is backed by a subgraph, a minor, or the edge bound on a minor.
//! Planar verdicts are a heuristic: the reduction is not a complete decision procedure.
//!
//! ## Quick Start
//!
//! ```
//! use planarity::graph::Graph;
//! use planarity::oracle::{is_planar, PlanarityVerdict};
//! use planarity::detect::SubgraphWitness;
//!
//! let mut g = Graph::new(5);
//! for u in 0..5 {
//!     for v in (u + 1)..5 {
//!         g.add_edge(u, v).unwrap();
//!     }
//! }
//! assert_eq!(
//!     is_planar(&g),
//!     PlanarityVerdict::NonPlanar { witness: Some(SubgraphWitness::K5([0, 1, 2, 3, 4])) }
//! );
//!
//! g.remove_edge(0, 1).unwrap();
//! assert!(is_planar(&g).is_planar());
//! ```
//!
//! ## Reading Graphs
//!
//! ```
//! use planarity::graph::{parse_edge_list, IndexBase};
//! use planarity::oracle::{check, Stage};
//!
//! // K5 with the edge 0-1 subdivided by vertex 5.
//! let text = "6 11\n0 5 5 1\n0 2 0 3 0 4\n1 2 1 3 1 4\n2 3 2 4\n3 4\n";
//! let g = parse_edge_list(text, IndexBase::Zero).unwrap();
//!
//! let report = check(&g);
//! assert!(!report.verdict.is_planar());
//! assert_eq!(report.stage, Stage::Reduced);
//! assert!(report.minor.is_some());
//! ```
//!
//! ## Validating Bundled Graphs
//!
//! ```
//! use planarity::validate::validate_known_graphs;
//!
//! validate_known_graphs().expect("bundled graphs should be classified correctly");
//! ```
//!
//! ## Modules
//!
//! - [`bitset`]: Growable `u64` vertex sets.
//! - [`graph`]: Graph store, contraction and text formats.
//! - [`detect`]: Exact `K5` / `K3,3` subgraph search.
//! - [`reduce`]: Admissible-edge contraction to a fixpoint.
//! - [`oracle`]: Detect, reduce, bound; verdicts and reports.
//! - [`construction`]: Named graph families and seeded random generators.
//! - [`survey`]: Parallel classification of random graphs.
//! - [`validate`]: Deterministic validation of bundled graphs.
//!
//! ## Performance Notes
//!
//! - The `K5` search prunes candidates to vertices of degree at least 4 and bounds each
//!   branch by a greedy colouring; the `K3,3` search only visits vertices of degree at least 3.
//! - Contraction appends the merged vertex, so the index space grows by one per contraction;
//!   use [`graph::Graph::compacted`] to renumber live vertices.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::cargo)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::similar_names)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::many_single_char_names)] // u, v, w, x, y
#![allow(clippy::needless_range_loop)] // Often clearer for matrix indexing
#![allow(clippy::doc_markdown)] // K5, K3,3, G(n, p)
#![allow(clippy::multiple_crate_versions)] // Cargo.lock management is external

pub mod bitset;
pub mod construction;
pub mod detect;
pub mod graph;
pub mod oracle;
pub mod reduce;
pub mod survey;
pub mod validate;

/// Re-export commonly used types for convenience.
pub mod prelude {
    pub use crate::bitset::VertexSet;
    pub use crate::detect::{find_forbidden, SubgraphDetector, SubgraphWitness};
    pub use crate::graph::{
        load_from_file, parse_adjacency_matrix, parse_edge_list, EdgeError, Graph, IndexBase,
        InputFormat,
    };
    pub use crate::oracle::{
        check, is_planar, OracleConfig, PlanarityOracle, PlanarityReport, PlanarityVerdict,
        Stage,
    };
    pub use crate::reduce::Reducer;
    pub use crate::survey::{run_survey, SurveyConfig, SurveyError};
    pub use crate::validate::validate_known_graphs;
}
