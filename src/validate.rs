//! Checks on colorings and the bundled known-graph table.

use thiserror::Error;

use crate::error::{ColoringError, FormatError, SolveError, StateError};
use crate::model::GraphModel;
use crate::solver::Solver;

const KNOWN_GRAPHS: &str = include_str!("../known_graphs.txt");

// ============================================================================
// Public API
// ============================================================================

/// Checks that `coloring` is a complete injective coloring using colors
/// `1..=palette`; returns the largest color used.
///
/// # Errors
/// Returns the first violation found: wrong length, an uncolored vertex, a color
/// above `palette`, or two injective neighbors sharing a color.
pub fn validate_coloring(
    model: &GraphModel,
    coloring: &[usize],
    palette: usize,
) -> Result<usize, ColoringError> {
    let n = model.order();
    if coloring.len() != n {
        return Err(ColoringError::LengthMismatch {
            expected: n,
            got: coloring.len(),
        });
    }
    for (vertex, &color) in coloring.iter().enumerate() {
        if color == 0 {
            return Err(ColoringError::Uncolored { vertex });
        }
        if color > palette {
            return Err(ColoringError::OutOfPalette {
                vertex,
                color,
                palette,
            });
        }
    }
    for u in 0..n {
        for v in model.injective_neighbors(u).iter().filter(|&v| v > u) {
            if coloring[u] == coloring[v] {
                return Err(ColoringError::Conflict {
                    u,
                    v,
                    color: coloring[u],
                });
            }
        }
    }
    Ok(coloring.iter().copied().max().unwrap_or(0))
}

/// Failure of a bundled known-graph check.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum KnownGraphError {
    /// A table line is not `<graph6> <number>`.
    #[error("known_graphs.txt line {line}: malformed entry {text:?}")]
    Table {
        /// 1-based line number.
        line: usize,
        /// The offending line.
        text: String,
    },
    /// The graph6 string did not decode.
    #[error("{graph6}: {source}")]
    Format {
        /// The graph.
        graph6: String,
        /// Decoder error.
        source: FormatError,
    },
    /// The search did not finish.
    #[error("{graph6}: {source}")]
    Solve {
        /// The graph.
        graph6: String,
        /// Solver error.
        source: SolveError,
    },
    /// The witness coloring is invalid.
    #[error("{graph6}: {source}")]
    Coloring {
        /// The graph.
        graph6: String,
        /// Validation error.
        source: ColoringError,
    },
    /// The solver disagrees with the table.
    #[error("{graph6}: expected injective chromatic number {expected}, got {got}")]
    Mismatch {
        /// The graph.
        graph6: String,
        /// Tabulated value.
        expected: usize,
        /// Computed value.
        got: usize,
    },
}

/// Solves every graph in the bundled `known_graphs.txt` and compares the result and
/// witness against the table; returns the number of graphs checked.
///
/// # Errors
/// Returns the first graph that fails.
pub fn validate_known_graphs() -> Result<usize, KnownGraphError> {
    validate_table(KNOWN_GRAPHS)
}

/// Like [`validate_known_graphs`] for a caller-supplied table.
///
/// Lines are `<graph6> <number>`; blank lines and `#` comments are skipped.
///
/// # Errors
/// Returns the first malformed line or failing graph.
pub fn validate_table(text: &str) -> Result<usize, KnownGraphError> {
    let mut checked = 0;
    for (idx, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let mut fields = line.split_whitespace();
        let (Some(graph6), Some(expected), None) = (fields.next(), fields.next(), fields.next())
        else {
            return Err(table_error(idx, raw));
        };
        let expected = expected.parse().map_err(|_| table_error(idx, raw))?;
        validate_case(graph6, expected)?;
        checked += 1;
    }
    Ok(checked)
}

// ============================================================================
// Internal
// ============================================================================

fn table_error(idx: usize, raw: &str) -> KnownGraphError {
    KnownGraphError::Table {
        line: idx + 1,
        text: raw.to_owned(),
    }
}

fn validate_case(graph6: &str, expected: usize) -> Result<(), KnownGraphError> {
    let mut solver = Solver::from_graph6(graph6).map_err(|source| KnownGraphError::Format {
        graph6: graph6.to_owned(),
        source,
    })?;
    let solve_error = |source: SolveError| KnownGraphError::Solve {
        graph6: graph6.to_owned(),
        source,
    };
    solver.solve().map_err(solve_error)?;
    let got = solver
        .injective_chromatic_number()
        .map_err(|e: StateError| solve_error(e.into()))?;
    if got != expected {
        return Err(KnownGraphError::Mismatch {
            graph6: graph6.to_owned(),
            expected,
            got,
        });
    }

    let coloring = solver
        .final_coloring()
        .map_err(|e| solve_error(e.into()))?;
    validate_coloring(solver.model(), coloring, got).map_err(|source| {
        KnownGraphError::Coloring {
            graph6: graph6.to_owned(),
            source,
        }
    })?;
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================
