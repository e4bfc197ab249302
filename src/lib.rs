//! # Injective Coloring Solver
//!
//! Exact computation of the injective chromatic number of simple undirected graphs.
//!
//! Two vertices are *injective neighbors* when some third vertex is adjacent to
//! both. An injective coloring gives injective neighbors different colors; the
//! injective chromatic number is the fewest colors any injective coloring needs.
//!
//! This crate provides:
//! - A graph6 codec and readers for plain `0/1` matrices and DIMACS edge lists.
//! - A precomputed [`model::GraphModel`] with neighbor and injective-neighbor bitsets.
//! - An undoable [`restriction::RestrictionTracker`] of forbidden colors.
//! - An exact branch-and-bound [`solver::Solver`] (DSATUR-style vertex order,
//!   symmetry-broken color choice) with an optional time limit.
//!
//! ## Quick Start
//!
//! ```
//! use injective_coloring::solver::Solver;
//!
//! // Path on four vertices.
//! let mut solver = Solver::from_graph6("Ch").unwrap();
//! solver.solve().unwrap();
//!
//! assert_eq!(solver.injective_chromatic_number(), Ok(2));
//! assert_eq!(solver.final_coloring().unwrap(), &[1, 1, 2, 2]);
//! ```
//!
//! ## Validating Known Graphs
//!
//! ```
//! use injective_coloring::validate::validate_known_graphs;
//!
//! // Solve the bundled table and check each witness coloring.
//! assert_eq!(validate_known_graphs(), Ok(13));
//! ```
//!
//! ## Batches
//!
//! ```
//! use std::io::Cursor;
//! use injective_coloring::batch::solve_all;
//! use injective_coloring::io::{read_records, InputFormat};
//! use injective_coloring::solver::SolverConfig;
//!
//! let records = read_records(Cursor::new("Bw\nnot graph6\nD~{\n"), InputFormat::Graph6).unwrap();
//! let outcome = solve_all(&records, &SolverConfig::default());
//!
//! assert_eq!(outcome.reports.len(), 2);
//! assert_eq!(outcome.failures[0].line, 2);
//! ```
//!
//! ## Modules
//!
//! - [`graph6`]: graph6 encoding and decoding.
//! - [`matrix`]: Bitset adjacency matrix and the plain matrix format.
//! - [`model`]: Degrees, isolated vertices and injective neighborhoods.
//! - [`restriction`]: Forbidden-color bookkeeping with LIFO undo.
//! - [`solver`]: The branch-and-bound search.
//! - [`validate`]: Coloring checks and the bundled known-graph table.
//! - [`io`]: Splitting input into per-graph records; DIMACS parsing.
//! - [`batch`]: Sequential driver that isolates per-graph failures.
//!
//! ## Performance Notes
//!
//! - Vertex sets are `u64` bitsets stored inline for up to 128 vertices.
//! - Each color choice touches only the injective neighborhood of one vertex.
//! - The search is exponential in the worst case; use
//!   [`solver::SolverConfig::time_limit`] for large inputs.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::similar_names)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::inline_always)] // Hot-path accessors
#![allow(clippy::many_single_char_names)] // Graph notation: u, v, w, n
#![allow(clippy::needless_range_loop)] // Often clearer for matrix indexing
#![allow(clippy::doc_markdown)]

pub mod batch;
pub mod bitset;
pub mod error;
pub mod graph6;
pub mod io;
pub mod matrix;
pub mod model;
pub mod restriction;
pub mod solver;
pub mod validate;

/// Re-export commonly used types for convenience.
pub mod prelude {
    pub use crate::batch::{solve_all, solve_record, BatchOutcome, GraphReport};
    pub use crate::error::{ColoringError, Error, FormatError, SolveError, StateError};
    pub use crate::io::{read_records, GraphRecord, InputFormat};
    pub use crate::matrix::{parse_adjacency_matrix, AdjacencyMatrix};
    pub use crate::model::GraphModel;
    pub use crate::solver::{SearchStatus, Solution, Solver, SolverConfig};
    pub use crate::validate::{validate_coloring, validate_known_graphs};
}
