//! Sequential driver over many graphs.
//!
//! Each graph is decoded, solved and checked independently; a failure is logged and
//! recorded against its record, and the batch moves on.

use std::panic::{self, AssertUnwindSafe};

use log::{debug, warn};

use crate::error::Error;
use crate::io::GraphRecord;
use crate::solver::{SearchStats, SearchStatus, SolverConfig};
use crate::validate::validate_coloring;

/// Result of one solved graph.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GraphReport {
    /// 1-based input line of the record.
    pub line: usize,
    /// graph6 notation of the graph.
    pub graph6: String,
    /// Number of vertices.
    pub dimension: usize,
    /// Maximum degree.
    pub max_degree: usize,
    /// Colors used by the best coloring.
    pub colors: usize,
    /// Whether `colors` is proven optimal.
    pub status: SearchStatus,
    /// The best coloring, `1`-based per vertex.
    pub coloring: Vec<usize>,
    /// Search counters.
    pub stats: SearchStats,
}

impl GraphReport {
    /// Tab-separated `graph6  max_degree  colors [coloring]`.
    ///
    /// A bounded result is prefixed with `<=`.
    pub fn format_line(&self, with_coloring: bool) -> String {
        let bound = match self.status {
            SearchStatus::Optimal => "",
            SearchStatus::Bounded => "<=",
        };
        let mut line = format!("{}\t{}\t{bound}{}", self.graph6, self.max_degree, self.colors);
        if with_coloring {
            line.push('\t');
            line.push_str(&format!("{:?}", self.coloring));
        }
        line
    }
}

/// A record that could not be solved.
#[derive(Debug)]
pub struct BatchFailure {
    /// 1-based input line of the record.
    pub line: usize,
    /// Label of the record (graph6 text or line).
    pub label: String,
    /// What went wrong.
    pub error: Error,
}

/// Everything a batch produced, in input order.
#[derive(Debug, Default)]
pub struct BatchOutcome {
    /// Solved graphs.
    pub reports: Vec<GraphReport>,
    /// Failed graphs.
    pub failures: Vec<BatchFailure>,
}

impl BatchOutcome {
    /// Returns `true` when no record failed.
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Decodes, solves and validates one record.
///
/// A panic inside the search is caught and reported as [`Error::Panicked`].
///
/// # Errors
/// Returns the decode, search or validation error for this record.
pub fn solve_record(record: &GraphRecord, config: &SolverConfig) -> Result<GraphReport, Error> {
    let solver = record.to_solver()?.with_config(config.clone());
    let outcome = panic::catch_unwind(AssertUnwindSafe(move || {
        let mut solver = solver;
        let solution = solver.solve()?.clone();
        Ok::<_, Error>((solver, solution))
    }));
    let (solver, solution) = match outcome {
        Ok(result) => result?,
        Err(payload) => {
            let message = payload
                .downcast_ref::<&str>()
                .map(|s| (*s).to_owned())
                .or_else(|| payload.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "unknown panic".to_owned());
            return Err(Error::Panicked { message });
        }
    };

    validate_coloring(solver.model(), &solution.coloring, solution.colors)?;
    debug!(
        "line {}: {} -> {} colors in {} nodes",
        record.line,
        solver.graph6_notation(),
        solution.colors,
        solution.stats.nodes
    );

    Ok(GraphReport {
        line: record.line,
        graph6: solver.graph6_notation().to_owned(),
        dimension: solver.dimension(),
        max_degree: solver.max_degree(),
        colors: solution.colors,
        status: solution.status,
        coloring: solution.coloring,
        stats: solution.stats,
    })
}

/// Solves every record in order, collecting reports and failures.
pub fn solve_all<'a, I>(records: I, config: &SolverConfig) -> BatchOutcome
where
    I: IntoIterator<Item = &'a GraphRecord>,
{
    let mut outcome = BatchOutcome::default();
    for record in records {
        match solve_record(record, config) {
            Ok(report) => outcome.reports.push(report),
            Err(error) => {
                let label = record.label();
                warn!("line {}: {label}: {error}", record.line);
                outcome.failures.push(BatchFailure {
                    line: record.line,
                    label,
                    error,
                });
            }
        }
    }
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{FormatError, SolveError};
    use crate::io::{read_records, InputFormat};
    use std::io::Cursor;
    use std::time::Duration;

    fn records(data: &str) -> Vec<GraphRecord> {
        read_records(Cursor::new(data), InputFormat::Graph6).unwrap()
    }

    #[test]
    fn solves_known_graphs_in_order() {
        let outcome = solve_all(&records("Bw\nCh\nDhc\n"), &SolverConfig::default());
        assert!(outcome.is_success());
        let colors: Vec<_> = outcome.reports.iter().map(|r| r.colors).collect();
        assert_eq!(colors, vec![3, 2, 3]);
        assert!(outcome
            .reports
            .iter()
            .all(|r| r.status == SearchStatus::Optimal));
    }

    #[test]
    fn bad_record_does_not_stop_the_batch() {
        let outcome = solve_all(&records("Ch\nC\nBw\n"), &SolverConfig::default());
        assert_eq!(outcome.reports.len(), 2);
        assert_eq!(outcome.failures.len(), 1);
        let failure = &outcome.failures[0];
        assert_eq!(failure.line, 2);
        assert_eq!(failure.label, "C");
        assert!(matches!(
            failure.error,
            Error::Format(FormatError::LengthMismatch { expected: 1, got: 0 })
        ));
        assert_eq!(outcome.reports[1].graph6, "Bw");
    }

    #[test]
    fn report_line_format() {
        let report = solve_record(&records("Ch\n")[0], &SolverConfig::default()).unwrap();
        assert_eq!(report.dimension, 4);
        assert_eq!(report.format_line(false), "Ch\t2\t2");
        assert_eq!(report.format_line(true), "Ch\t2\t2\t[1, 1, 2, 2]");
    }

    #[test]
    fn bounded_result_is_marked() {
        let config = SolverConfig {
            time_limit: Some(Duration::ZERO),
            deadline_check_interval: 9,
        };
        let report = solve_record(&records("IheA@GUAo\n")[0], &config).unwrap();
        assert_eq!(report.status, SearchStatus::Bounded);
        assert_eq!(report.format_line(false), "IheA@GUAo\t3\t<=5");
    }

    #[test]
    fn timeout_without_coloring_is_a_failure() {
        let config = SolverConfig {
            time_limit: Some(Duration::ZERO),
            deadline_check_interval: 1,
        };
        let outcome = solve_all(&records("IheA@GUAo\n"), &config);
        assert!(!outcome.is_success());
        assert!(matches!(
            outcome.failures[0].error,
            Error::Solve(SolveError::TimeLimitExceeded { .. })
        ));
    }
}
