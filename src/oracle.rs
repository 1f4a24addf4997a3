//! Planarity oracle: forbidden-subgraph detection, then reduction, then the edge bound.
//!
//! Evaluation ends in one of three stages:
//! 1. [`Stage::Trivial`]: fewer than 4 live vertices, always planar.
//! 2. [`Stage::Forbidden`]: the input contains a `K5` or `K3,3` subgraph.
//! 3. [`Stage::Reduced`]: admissible edges are contracted to a fixpoint; the reduced graph is
//!    searched again for `K5` / `K3,3` (unless disabled) and must satisfy `E <= 3V - 6`.
//!
//! Every `NonPlanar` verdict is sound: a Kuratowski subgraph of the input, a Kuratowski
//! subgraph of a minor of the input, or the Euler bound violated by a simple minor. A
//! `Planar` verdict is a heuristic; the admissible-edge reduction is not a complete decision
//! procedure.

use std::fmt;

use log::debug;
use rayon::prelude::*;

use crate::bitset::VertexSet;
use crate::detect::{SubgraphDetector, SubgraphWitness};
use crate::graph::Graph;
use crate::reduce::Reducer;

/// Graphs with fewer live vertices than this are planar without further checks.
pub const TRIVIAL_ORDER: usize = 4;

/// Euler bound for simple planar graphs: `E <= 3V - 6` when `V >= 3`.
#[inline]
pub const fn satisfies_edge_bound(vertices: usize, edges: usize) -> bool {
    vertices < 3 || edges + 6 <= 3 * vertices
}

// ============================================================================
// Configuration
// ============================================================================

/// Oracle configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OracleConfig {
    /// Search the reduced graph for `K5` / `K3,3` before trusting the edge bound.
    /// Disabling this decides the reduced stage on the edge bound alone.
    pub recheck_after_reduction: bool,
}

impl Default for OracleConfig {
    fn default() -> Self {
        Self {
            recheck_after_reduction: true,
        }
    }
}

// ============================================================================
// Results
// ============================================================================

/// Outcome of a planarity check.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PlanarityVerdict {
    /// No obstruction was found.
    Planar,
    /// The graph is not planar. `witness` is set when a Kuratowski subgraph of the input
    /// itself was located.
    NonPlanar {
        /// Subgraph of the input graph, in its labels.
        witness: Option<SubgraphWitness>,
    },
}

impl PlanarityVerdict {
    /// Returns `true` for [`PlanarityVerdict::Planar`].
    pub const fn is_planar(&self) -> bool {
        matches!(self, Self::Planar)
    }

    /// The located subgraph, if any.
    pub const fn witness(&self) -> Option<&SubgraphWitness> {
        match self {
            Self::Planar => None,
            Self::NonPlanar { witness } => witness.as_ref(),
        }
    }
}

impl fmt::Display for PlanarityVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(if self.is_planar() { "planar" } else { "not planar" })
    }
}

/// Where evaluation stopped.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Stage {
    /// Fewer than [`TRIVIAL_ORDER`] live vertices.
    Trivial,
    /// A `K5` or `K3,3` subgraph of the input was found.
    Forbidden,
    /// Decided after reduction.
    Reduced,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Trivial => "trivial",
            Self::Forbidden => "forbidden subgraph",
            Self::Reduced => "reduced",
        })
    }
}

/// A Kuratowski subgraph of the reduced graph, mapped back to the input.
///
/// `branch_sets[i]` holds the input vertices contracted into `pattern.vertices()[i]`; each
/// branch set is connected in the input, so this certifies a `K5` / `K3,3` minor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MinorWitness {
    /// The pattern, in reduced-graph labels.
    pub pattern: SubgraphWitness,
    /// Input vertices behind each pattern vertex.
    pub branch_sets: Vec<VertexSet>,
}

impl fmt::Display for MinorWitness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} minor with branch sets {:?}",
            self.pattern.name(),
            self.branch_sets
        )
    }
}

/// Full diagnostics of one evaluation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlanarityReport {
    /// The verdict.
    pub verdict: PlanarityVerdict,
    /// Stage that produced the verdict.
    pub stage: Stage,
    /// Contractions applied (0 unless `stage == Reduced`).
    pub contractions: usize,
    /// Live vertices when evaluation stopped.
    pub reduced_vertices: usize,
    /// Edges when evaluation stopped.
    pub reduced_edges: usize,
    /// Whether `reduced_edges <= 3 * reduced_vertices - 6` (or fewer than 3 vertices).
    pub edge_bound_holds: bool,
    /// Kuratowski minor found after reduction.
    pub minor: Option<MinorWitness>,
}

impl fmt::Display for PlanarityReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "verdict: {} (stage: {})", self.verdict, self.stage)?;
        match self.stage {
            Stage::Trivial => write!(
                f,
                "\n  fewer than {TRIVIAL_ORDER} vertices ({} vertices, {} edges)",
                self.reduced_vertices, self.reduced_edges
            )?,
            Stage::Forbidden => {
                if let Some(w) = self.verdict.witness() {
                    write!(f, "\n  subgraph: {w}")?;
                }
            }
            Stage::Reduced => {
                write!(
                    f,
                    "\n  {} contractions -> {} vertices, {} edges; edge bound {}",
                    self.contractions,
                    self.reduced_vertices,
                    self.reduced_edges,
                    if self.edge_bound_holds { "holds" } else { "violated" }
                )?;
                if let Some(m) = &self.minor {
                    write!(f, "\n  {m}")?;
                }
            }
        }
        Ok(())
    }
}

// ============================================================================
// PlanarityOracle
// ============================================================================

/// Runs the detect / reduce / bound pipeline.
#[derive(Clone, Copy, Debug, Default)]
pub struct PlanarityOracle {
    config: OracleConfig,
}

impl PlanarityOracle {
    /// Creates an oracle with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an oracle with an explicit configuration.
    pub const fn with_config(config: OracleConfig) -> Self {
        Self { config }
    }

    /// Evaluates `g` on a private copy; `g` is left untouched.
    pub fn check(&self, g: &Graph) -> PlanarityReport {
        let mut work = g.clone();
        self.check_in_place(&mut work)
    }

    /// Evaluates `g`, contracting it in place when the reduction stage runs.
    pub fn check_in_place(&self, g: &mut Graph) -> PlanarityReport {
        let vertices = g.live_vertex_count();
        if vertices < TRIVIAL_ORDER {
            debug!("trivial: {vertices} live vertices");
            return Self::finish(g, PlanarityVerdict::Planar, Stage::Trivial, 0, None);
        }

        let mut detector = SubgraphDetector::new();
        if let Some(w) = detector.find_forbidden(g) {
            debug!("forbidden subgraph in input: {w}");
            let verdict = PlanarityVerdict::NonPlanar { witness: Some(w) };
            return Self::finish(g, verdict, Stage::Forbidden, 0, None);
        }

        let mut reducer = Reducer::new();
        let contractions = reducer.reduce(g);

        let minor = if self.config.recheck_after_reduction {
            detector.find_forbidden(g).map(|pattern| MinorWitness {
                branch_sets: pattern
                    .vertices()
                    .iter()
                    .map(|&v| reducer.branch_set(v).cloned().unwrap_or_default())
                    .collect(),
                pattern,
            })
        } else {
            None
        };
        if let Some(m) = &minor {
            debug!("forbidden subgraph after reduction: {m}");
        }

        let bound = satisfies_edge_bound(g.live_vertex_count(), g.edge_count());
        let verdict = if minor.is_none() && bound {
            PlanarityVerdict::Planar
        } else {
            PlanarityVerdict::NonPlanar { witness: None }
        };
        Self::finish(g, verdict, Stage::Reduced, contractions, minor)
    }

    /// Verdict only; `g` is left untouched.
    pub fn is_planar(&self, g: &Graph) -> PlanarityVerdict {
        self.check(g).verdict
    }

    /// Evaluates independent graphs in parallel; results are in input order.
    pub fn check_all(&self, graphs: &[Graph]) -> Vec<PlanarityVerdict> {
        graphs.par_iter().map(|g| self.is_planar(g)).collect()
    }

    fn finish(
        g: &Graph,
        verdict: PlanarityVerdict,
        stage: Stage,
        contractions: usize,
        minor: Option<MinorWitness>,
    ) -> PlanarityReport {
        let (reduced_vertices, reduced_edges) = (g.live_vertex_count(), g.edge_count());
        PlanarityReport {
            verdict,
            stage,
            contractions,
            reduced_vertices,
            reduced_edges,
            edge_bound_holds: satisfies_edge_bound(reduced_vertices, reduced_edges),
            minor,
        }
    }
}

/// Checks `g` with the default oracle; `g` is left untouched.
pub fn is_planar(g: &Graph) -> PlanarityVerdict {
    PlanarityOracle::new().is_planar(g)
}

/// Full report with the default oracle; `g` is left untouched.
pub fn check(g: &Graph) -> PlanarityReport {
    PlanarityOracle::new().check(g)
}

// ============================================================================
// Tests
// ============================================================================
