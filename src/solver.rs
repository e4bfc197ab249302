//! Exact injective chromatic number by saturation-ordered branch and bound.
//!
//! The search colors one vertex per level. The next vertex is the uncolored one with
//! the most forbidden colors (lowest index on ties), and every vertex tries each
//! color already in use plus one new color. A branch stops as soon as it uses as
//! many colors as the best complete coloring found so far.
//!
//! Before branching, isolated vertices take color `1` and the neighbors of the
//! first maximum-degree vertex take colors `1..=Δ`. Those neighbors share a common
//! neighbor and must differ anyway, so this only tightens the start.

use std::time::{Duration, Instant};

use crate::error::{FormatError, SolveError, StateError};
use crate::graph6;
use crate::matrix::AdjacencyMatrix;
use crate::model::GraphModel;
use crate::restriction::RestrictionTracker;

// ============================================================================
// Configuration
// ============================================================================

/// Search configuration parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SolverConfig {
    /// Wall-clock budget for one `solve()`; `None` runs to exhaustion.
    pub time_limit: Option<Duration>,
    /// The clock is read once per this many search nodes.
    pub deadline_check_interval: u64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            time_limit: None,
            deadline_check_interval: 1024,
        }
    }
}

// ============================================================================
// Results
// ============================================================================

/// How far the search got.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SearchStatus {
    /// The tree was fully explored; the color count is the injective chromatic number.
    Optimal,
    /// The time limit cut the search short; the coloring is valid but may not be minimal.
    Bounded,
}

/// Counters collected during one search.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Recursive branch calls, including the ones that completed a coloring.
    pub nodes: u64,
    /// Complete colorings accepted as the new best (ties included).
    pub recorded: u64,
    /// Wall-clock time spent in `solve()`.
    pub elapsed: Duration,
}

/// Best coloring found by a search.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Solution {
    /// Number of colors used by `coloring`.
    pub colors: usize,
    /// `coloring[v]` is the color of `v`, in `1..=colors`.
    ///
    /// On ties the coloring found last wins.
    pub coloring: Vec<usize>,
    /// Whether `colors` is proven minimal.
    pub status: SearchStatus,
    /// Search counters.
    pub stats: SearchStats,
}

// ============================================================================
// Solver
// ============================================================================

#[derive(Clone, Debug)]
enum SolverState {
    Ready,
    Solved(Solution),
    TimedOut,
}

/// Computes the injective chromatic number of one graph.
///
/// A solver owns its graph and runs at most one search.
#[derive(Clone, Debug)]
pub struct Solver {
    model: GraphModel,
    graph6: String,
    config: SolverConfig,
    state: SolverState,
}

impl Solver {
    /// Decodes a graph6 string.
    ///
    /// # Errors
    /// Returns a [`FormatError`] if the string is not valid graph6.
    pub fn from_graph6(text: &str) -> Result<Self, FormatError> {
        let matrix = graph6::decode(text)?;
        Ok(Self::build(matrix, graph6::strip(text).to_owned()))
    }

    /// Wraps a prebuilt adjacency matrix.
    pub fn from_matrix(matrix: AdjacencyMatrix) -> Self {
        let notation = matrix.to_graph6();
        Self::build(matrix, notation)
    }

    fn build(matrix: AdjacencyMatrix, graph6: String) -> Self {
        Self {
            model: GraphModel::new(matrix),
            graph6,
            config: SolverConfig::default(),
            state: SolverState::Ready,
        }
    }

    /// Replaces the search configuration.
    pub fn with_config(mut self, config: SolverConfig) -> Self {
        self.config = config;
        self
    }

    /// Derived graph data.
    pub fn model(&self) -> &GraphModel {
        &self.model
    }

    /// Number of vertices.
    pub fn dimension(&self) -> usize {
        self.model.order()
    }

    /// Maximum vertex degree.
    pub fn max_degree(&self) -> usize {
        self.model.max_degree()
    }

    /// The graph6 form of the input graph.
    pub fn graph6_notation(&self) -> &str {
        &self.graph6
    }

    /// Runs the search.
    ///
    /// # Errors
    /// - [`StateError::AlreadySolved`] if called more than once.
    /// - [`SolveError::TimeLimitExceeded`] if the time limit expired before the first
    ///   complete coloring.
    pub fn solve(&mut self) -> Result<&Solution, SolveError> {
        if !matches!(self.state, SolverState::Ready) {
            return Err(StateError::AlreadySolved.into());
        }

        let started = Instant::now();
        let deadline = self.config.time_limit.and_then(|l| started.checked_add(l));
        let (best, colors, interrupted, mut stats) = {
            let interval = self.config.deadline_check_interval;
            let mut search = Search::new(&self.model, deadline, interval);
            search.run();
            (search.best, search.best_count, search.interrupted, search.stats)
        };
        stats.elapsed = started.elapsed();

        let Some(coloring) = best else {
            log::warn!(
                "{}: no complete coloring within {:?} ({} nodes)",
                self.graph6,
                stats.elapsed,
                stats.nodes
            );
            self.state = SolverState::TimedOut;
            return Err(SolveError::TimeLimitExceeded {
                limit: self.config.time_limit.unwrap_or_default(),
            });
        };

        let status = if interrupted {
            log::warn!(
                "{}: search interrupted after {:?}, best coloring uses {colors} colors",
                self.graph6,
                stats.elapsed
            );
            SearchStatus::Bounded
        } else {
            SearchStatus::Optimal
        };
        log::debug!(
            "{}: n={} edges={} max_degree={} colors={colors} nodes={} recorded={} elapsed={:?}",
            self.graph6,
            self.dimension(),
            self.model.matrix().edge_count(),
            self.max_degree(),
            stats.nodes,
            stats.recorded,
            stats.elapsed
        );

        self.state = SolverState::Solved(Solution {
            colors,
            coloring,
            status,
            stats,
        });
        self.solution().map_err(SolveError::from)
    }

    /// The recorded solution.
    ///
    /// # Errors
    /// [`StateError::NotSolved`] before `solve()`, [`StateError::Interrupted`] if the
    /// search timed out without any coloring.
    pub fn solution(&self) -> Result<&Solution, StateError> {
        match &self.state {
            SolverState::Ready => Err(StateError::NotSolved),
            SolverState::Solved(solution) => Ok(solution),
            SolverState::TimedOut => Err(StateError::Interrupted),
        }
    }

    /// The injective chromatic number.
    ///
    /// # Errors
    /// Fails before `solve()` and when the search was interrupted, since the count is
    /// then only an upper bound.
    pub fn injective_chromatic_number(&self) -> Result<usize, StateError> {
        let solution = self.solution()?;
        match solution.status {
            SearchStatus::Optimal => Ok(solution.colors),
            SearchStatus::Bounded => Err(StateError::Interrupted),
        }
    }

    /// The coloring achieving the best count (valid even when the search was bounded).
    ///
    /// # Errors
    /// Fails before `solve()` or if no coloring was found.
    pub fn final_coloring(&self) -> Result<&[usize], StateError> {
        self.solution().map(|s| s.coloring.as_slice())
    }
}

// ============================================================================
// Search
// ============================================================================

struct Search<'a> {
    model: &'a GraphModel,
    /// `0` means uncolored.
    coloring: Vec<usize>,
    restrictions: RestrictionTracker,
    colored: usize,
    best_count: usize,
    best: Option<Vec<usize>>,
    deadline: Option<Instant>,
    check_interval: u64,
    interrupted: bool,
    stats: SearchStats,
}

impl<'a> Search<'a> {
    fn new(model: &'a GraphModel, deadline: Option<Instant>, check_interval: u64) -> Self {
        let n = model.order();
        Self {
            model,
            coloring: vec![0; n],
            restrictions: RestrictionTracker::new(n),
            colored: 0,
            best_count: usize::MAX,
            best: None,
            deadline,
            check_interval: check_interval.max(1),
            interrupted: false,
            stats: SearchStats::default(),
        }
    }

    fn run(&mut self) {
        let Some(hub) = self.model.max_degree_vertex() else {
            self.record(0);
            return;
        };
        let used = self.seed(hub);
        let next = self.next_vertex();
        self.branch(next, used);
        debug_assert_eq!(self.restrictions.pending(), 0);
    }

    /// Colors isolated vertices and the neighborhood of `hub`; returns the colors used.
    fn seed(&mut self, hub: usize) -> usize {
        let model = self.model;
        for &v in model.isolated() {
            self.coloring[v] = 1;
            self.colored += 1;
        }
        if model.degree(hub) == 0 {
            return 1;
        }

        let mut used = 0;
        for v in model.neighbors(hub) {
            used += 1;
            self.coloring[v] = used;
            self.colored += 1;
            let applied = self.restrictions.apply(model, &self.coloring, v, used);
            self.restrictions.commit(applied);
        }
        used
    }

    /// Uncolored vertex with the largest saturation, lowest index first.
    fn next_vertex(&self) -> Option<usize> {
        let mut best = None;
        let mut saturation = 0;
        for v in 0..self.coloring.len() {
            if self.coloring[v] != 0 {
                continue;
            }
            let s = self.restrictions.saturation(v);
            if best.is_none() || s > saturation {
                best = Some(v);
                saturation = s;
            }
        }
        best
    }

    fn deadline_passed(&self) -> bool {
        match self.deadline {
            Some(deadline) if self.stats.nodes % self.check_interval == 0 => {
                Instant::now() >= deadline
            }
            _ => false,
        }
    }

    fn record(&mut self, used: usize) {
        self.best_count = used;
        self.stats.recorded += 1;
        match &mut self.best {
            Some(best) => best.copy_from_slice(&self.coloring),
            None => self.best = Some(self.coloring.clone()),
        }
        log::trace!(
            "complete coloring with {used} colors after {} nodes",
            self.stats.nodes
        );
    }

    fn branch(&mut self, vertex: Option<usize>, used: usize) {
        self.stats.nodes += 1;

        if self.colored == self.coloring.len() {
            // Ties overwrite: the last optimal coloring found is kept.
            if used <= self.best_count {
                self.record(used);
            }
            return;
        }
        if self.deadline_passed() {
            self.interrupted = true;
            return;
        }
        let Some(v) = vertex else {
            return;
        };

        let model = self.model;
        for c in 1..=used + 1 {
            if self.interrupted || used >= self.best_count {
                break;
            }
            if self.restrictions.is_forbidden(v, c) {
                continue;
            }

            self.coloring[v] = c;
            self.colored += 1;
            let applied = self.restrictions.apply(model, &self.coloring, v, c);
            let next = self.next_vertex();

            if c == used + 1 {
                if used + 1 < self.best_count {
                    self.branch(next, used + 1);
                }
            } else {
                self.branch(next, used);
            }

            self.restrictions.undo(applied);
            self.coloring[v] = 0;
            self.colored -= 1;
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
