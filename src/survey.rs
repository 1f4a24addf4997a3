//! Parallel classification of seeded random graphs.
//!
//! Each sample is an independent `G(n, p)` graph drawn from its own `SmallRng`, seeded from
//! the base seed and the sample index, so results do not depend on rayon's scheduling.

use std::fmt;

use rand::rngs::SmallRng;
use rand::SeedableRng;
use rayon::prelude::*;
use thiserror::Error;

use crate::construction::random_graph;
use crate::oracle::{OracleConfig, PlanarityOracle, Stage};

// ============================================================================
// Configuration
// ============================================================================

/// Survey parameters.
#[derive(Clone, Debug, PartialEq)]
pub struct SurveyConfig {
    /// Vertices per sample.
    pub order: usize,
    /// Independent edge probability.
    pub edge_probability: f64,
    /// Number of graphs to classify.
    pub samples: usize,
    /// Optional deterministic base seed.
    pub seed: Option<u64>,
    /// Oracle settings applied to every sample.
    pub oracle: OracleConfig,
}

impl Default for SurveyConfig {
    fn default() -> Self {
        Self {
            order: 12,
            edge_probability: 0.3,
            samples: 1000,
            seed: None,
            oracle: OracleConfig::default(),
        }
    }
}

/// Rejected survey parameters.
#[derive(Clone, Copy, Debug, PartialEq, Error)]
pub enum SurveyError {
    /// The edge probability is NaN or outside `[0, 1]`.
    #[error("edge probability must be in [0, 1], got {0}")]
    InvalidProbability(f64),
}

// ============================================================================
// Summary
// ============================================================================

/// Per-stage tallies of a survey.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SurveySummary {
    /// Base seed actually used.
    pub seed: u64,
    /// Graphs classified.
    pub samples: usize,
    /// Planar at the trivial stage.
    pub trivial: usize,
    /// Non-planar by a `K5` / `K3,3` subgraph of the input.
    pub forbidden: usize,
    /// Planar after reduction.
    pub reduced_planar: usize,
    /// Non-planar after reduction (minor or edge bound).
    pub reduced_non_planar: usize,
    /// Of `reduced_non_planar`, those with a Kuratowski minor located.
    pub minors: usize,
}

impl SurveySummary {
    /// Graphs judged planar.
    pub const fn planar(&self) -> usize {
        self.trivial + self.reduced_planar
    }

    /// Graphs judged non-planar.
    pub const fn non_planar(&self) -> usize {
        self.forbidden + self.reduced_non_planar
    }

    fn merge(mut self, other: Self) -> Self {
        self.samples += other.samples;
        self.trivial += other.trivial;
        self.forbidden += other.forbidden;
        self.reduced_planar += other.reduced_planar;
        self.reduced_non_planar += other.reduced_non_planar;
        self.minors += other.minors;
        self
    }
}

impl fmt::Display for SurveySummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "samples:            {}", self.samples)?;
        writeln!(f, "planar:             {}", self.planar())?;
        writeln!(f, "  trivial:          {}", self.trivial)?;
        writeln!(f, "  after reduction:  {}", self.reduced_planar)?;
        writeln!(f, "not planar:         {}", self.non_planar())?;
        writeln!(f, "  subgraph:         {}", self.forbidden)?;
        write!(
            f,
            "  after reduction:  {} ({} with minor)",
            self.reduced_non_planar, self.minors
        )
    }
}

// ============================================================================
// Driver
// ============================================================================

/// Classifies `cfg.samples` random graphs in parallel.
///
/// # Errors
/// Returns [`SurveyError::InvalidProbability`] if `cfg.edge_probability` is NaN or outside
/// `[0, 1]`; nothing is sampled in that case.
pub fn run_survey(cfg: &SurveyConfig) -> Result<SurveySummary, SurveyError> {
    let p = cfg.edge_probability;
    if !(0.0..=1.0).contains(&p) {
        return Err(SurveyError::InvalidProbability(p));
    }
    let base_seed = cfg.seed.unwrap_or_else(rand::random::<u64>);
    let oracle = PlanarityOracle::with_config(cfg.oracle);

    let summary = (0..cfg.samples)
        .into_par_iter()
        .map(|i| {
            let mut rng = SmallRng::seed_from_u64(splitmix64(base_seed ^ i as u64));
            let g = random_graph(&mut rng, cfg.order, p);
            let report = oracle.check(&g);

            let mut one = SurveySummary {
                samples: 1,
                ..SurveySummary::default()
            };
            match (report.stage, report.verdict.is_planar()) {
                (Stage::Trivial, _) => one.trivial = 1,
                (Stage::Forbidden, _) => one.forbidden = 1,
                (Stage::Reduced, true) => one.reduced_planar = 1,
                (Stage::Reduced, false) => {
                    one.reduced_non_planar = 1;
                    one.minors = usize::from(report.minor.is_some());
                }
            }
            one
        })
        .reduce(SurveySummary::default, SurveySummary::merge);

    Ok(SurveySummary {
        seed: base_seed,
        ..summary
    })
}

/// SplitMix64 mixer for deriving per-sample seeds from a base seed.
#[inline]
fn splitmix64(mut x: u64) -> u64 {
    x = x.wrapping_add(0x9E37_79B9_7F4A_7C15);
    let mut z = x;
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

// ============================================================================
// Tests
// ============================================================================
