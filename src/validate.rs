//! Fast deterministic validation of bundled graphs with known planarity.

use crate::graph::{parse_edge_list, Graph, IndexBase};
use crate::oracle::{PlanarityOracle, Stage};

// ============================================================================
// Public API
// ============================================================================

/// What a bundled graph is expected to produce.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Expected {
    /// Expected verdict.
    pub planar: bool,
    /// Stage expected to decide it.
    pub stage: Stage,
}

impl Expected {
    /// Non-planar by a subgraph of the input.
    pub const FORBIDDEN: Self = Self {
        planar: false,
        stage: Stage::Forbidden,
    };
    /// Non-planar after reduction.
    pub const REDUCED_NON_PLANAR: Self = Self {
        planar: false,
        stage: Stage::Reduced,
    };
    /// Planar after reduction.
    pub const REDUCED_PLANAR: Self = Self {
        planar: true,
        stage: Stage::Reduced,
    };
}

/// Validates the bundled graphs:
/// - `K5` and `K3,3` (with and without a chord) are caught as subgraphs
/// - a subdivided `K5` is caught after reduction
/// - the octahedron, a maximal planar graph, is accepted
///
/// # Errors
/// Returns an error message if any bundled graph fails validation.
pub fn validate_known_graphs() -> Result<(), String> {
    validate_case(include_str!("../graph_k5.txt"), "graph_k5.txt", Expected::FORBIDDEN)?;
    validate_case(include_str!("../graph_k33.txt"), "graph_k33.txt", Expected::FORBIDDEN)?;
    validate_case(
        include_str!("../graph_k33_chord.txt"),
        "graph_k33_chord.txt",
        Expected::FORBIDDEN,
    )?;
    validate_case(
        include_str!("../graph_subdivided_k5.txt"),
        "graph_subdivided_k5.txt",
        Expected::REDUCED_NON_PLANAR,
    )?;
    validate_case(
        include_str!("../graph_octahedron.txt"),
        "graph_octahedron.txt",
        Expected::REDUCED_PLANAR,
    )?;
    Ok(())
}

/// Parses a zero-based edge list and validates it against `expected`.
///
/// # Errors
/// Returns an error message if parsing fails or the graph is judged differently.
pub fn validate_case(text: &str, name: &str, expected: Expected) -> Result<(), String> {
    let g = parse_edge_list(text, IndexBase::Zero).map_err(|e| format!("{name}: {e}"))?;
    validate_graph(&g, expected).map_err(|e| format!("{name}: {e}"))
}

/// Checks `g` with the default oracle against `expected`, and re-verifies any witness.
///
/// # Errors
/// Returns an error message if the verdict or stage differs, or a witness is not present.
pub fn validate_graph(g: &Graph, expected: Expected) -> Result<(), String> {
    let report = PlanarityOracle::new().check(g);

    if report.verdict.is_planar() != expected.planar || report.stage != expected.stage {
        return Err(format!(
            "expected {} at stage {}, got {} at stage {}",
            if expected.planar { "planar" } else { "not planar" },
            expected.stage,
            report.verdict,
            report.stage
        ));
    }

    if let Some(w) = report.verdict.witness() {
        if !w.is_present_in(g) {
            return Err(format!("reported {w} is not a subgraph"));
        }
    }

    Ok(())
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::construction::{complete, cycle};

    #[test]
    fn bundled_graphs_are_valid() {
        validate_known_graphs().unwrap();
    }

    #[test]
    fn validate_graph_rejects_wrong_verdict() {
        let err = validate_graph(&complete(5), Expected::REDUCED_PLANAR).unwrap_err();
        assert!(err.contains("not planar"));
    }

    #[test]
    fn validate_graph_rejects_wrong_stage() {
        let err = validate_graph(&cycle(3), Expected::REDUCED_PLANAR).unwrap_err();
        assert!(err.contains("stage trivial"));
    }

    #[test]
    fn validate_case_parses_and_checks() {
        let text = "4 3\n0 1\n1 2\n2 3\n";
        assert!(validate_case(text, "path", Expected::REDUCED_PLANAR).is_ok());
    }

    #[test]
    fn validate_case_reports_parse_errors_with_name() {
        let err = validate_case("4 3\n0 1\n", "short", Expected::REDUCED_PLANAR).unwrap_err();
        assert!(err.starts_with("short: "));
    }

    #[test]
    fn bundled_graph_sizes() {
        for (text, v, e) in [
            (include_str!("../graph_k5.txt"), 5, 10),
            (include_str!("../graph_k33.txt"), 6, 9),
            (include_str!("../graph_k33_chord.txt"), 6, 10),
            (include_str!("../graph_octahedron.txt"), 6, 12),
            (include_str!("../graph_subdivided_k5.txt"), 6, 11),
        ] {
            let g = parse_edge_list(text, IndexBase::Zero).unwrap();
            assert_eq!((g.order(), g.edge_count()), (v, e));
        }
    }
}
