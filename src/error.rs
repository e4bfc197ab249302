//! Error types shared across the crate.

use std::time::Duration;

use thiserror::Error;

/// Errors raised while decoding graph input (graph6, plain matrices, DIMACS).
///
/// Decoding is eager: every variant is produced before any structural
/// derivation or search starts.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum FormatError {
    /// The input contained no graph data.
    #[error("input is empty")]
    Empty,
    /// The graph6 size header is malformed: the first byte decodes to a negative
    /// vertex count, or the extended form is truncated.
    #[error("invalid graph6 size header starting with byte {byte:#04x}")]
    InvalidHeader {
        /// Offending header byte.
        byte: u8,
    },
    /// A graph6 byte lies outside the printable range `63..=126`.
    #[error("invalid graph6 byte {byte:#04x} at position {position}")]
    InvalidByte {
        /// Byte offset in the (trimmed) input.
        position: usize,
        /// Offending byte.
        byte: u8,
    },
    /// The graph is larger than the 18-bit graph6 size form allows.
    #[error("graph with {n} vertices exceeds the supported graph6 size range")]
    TooManyVertices {
        /// Requested vertex count (a lower bound when the 8-byte form was seen).
        n: usize,
    },
    /// The graph6 body does not have the number of bytes implied by the header.
    #[error("graph6 body has {got} bytes, expected {expected}")]
    LengthMismatch {
        /// Bytes required for `n(n-1)/2` bits.
        expected: usize,
        /// Bytes present.
        got: usize,
    },
    /// A plain matrix row has the wrong number of entries.
    #[error("adjacency matrix is not square: row {row} has length {got}, expected {expected}")]
    NonSquare {
        /// Row index.
        row: usize,
        /// Expected length.
        expected: usize,
        /// Actual length.
        got: usize,
    },
    /// A plain matrix entry is not `0` or `1`.
    #[error("invalid matrix entry at ({row}, {col}): {entry:?} (expected 0 or 1)")]
    InvalidEntry {
        /// Row index.
        row: usize,
        /// Column index.
        col: usize,
        /// The offending token.
        entry: String,
    },
    /// Diagonal entry set.
    #[error("self-loop at vertex {vertex}")]
    SelfLoop {
        /// The vertex with a self-loop.
        vertex: usize,
    },
    /// `A[i][j] != A[j][i]`.
    #[error("matrix is not symmetric at ({i}, {j})")]
    NotSymmetric {
        /// Row index.
        i: usize,
        /// Column index.
        j: usize,
    },
    /// An edge names a vertex outside `0..n`.
    #[error("edge ({u}, {v}) is out of range for {n} vertices")]
    VertexOutOfRange {
        /// First endpoint.
        u: usize,
        /// Second endpoint.
        v: usize,
        /// Vertex count.
        n: usize,
    },
    /// Malformed DIMACS line.
    #[error("DIMACS line {line}: {message}")]
    Dimacs {
        /// 1-based line number.
        line: usize,
        /// What went wrong.
        message: String,
    },
}

/// Accessor misuse on a [`Solver`](crate::solver::Solver).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum StateError {
    /// The result was requested before `solve()` completed.
    #[error("injective chromatic number not calculated yet")]
    NotSolved,
    /// `solve()` may run only once per solver.
    #[error("solver has already run")]
    AlreadySolved,
    /// The search hit its time limit; only an upper bound is known.
    #[error("search was interrupted; the result is only an upper bound")]
    Interrupted,
}

/// Failure of a single `solve()` call.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SolveError {
    /// Contract violation.
    #[error(transparent)]
    State(#[from] StateError),
    /// The time limit expired before any complete coloring was found.
    #[error("time limit of {limit:?} exceeded before a complete coloring was found")]
    TimeLimitExceeded {
        /// Configured limit.
        limit: Duration,
    },
}

/// A coloring that violates the injective constraint.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ColoringError {
    /// The coloring does not cover every vertex.
    #[error("coloring has {got} entries for a graph with {expected} vertices")]
    LengthMismatch {
        /// Vertex count.
        expected: usize,
        /// Coloring length.
        got: usize,
    },
    /// A vertex was left uncolored.
    #[error("vertex {vertex} is uncolored")]
    Uncolored {
        /// The uncolored vertex.
        vertex: usize,
    },
    /// A color lies above the claimed palette size.
    #[error("vertex {vertex} has color {color}, palette has only {palette} colors")]
    OutOfPalette {
        /// Vertex.
        vertex: usize,
        /// Its color.
        color: usize,
        /// Palette size.
        palette: usize,
    },
    /// Two injective neighbors share a color.
    #[error("injective neighbors {u} and {v} share color {color}")]
    Conflict {
        /// First vertex.
        u: usize,
        /// Second vertex.
        v: usize,
        /// Shared color.
        color: usize,
    },
}

/// Any failure while processing one graph of a batch.
#[derive(Debug, Error)]
pub enum Error {
    /// Input could not be decoded.
    #[error(transparent)]
    Format(#[from] FormatError),
    /// The search failed.
    #[error(transparent)]
    Solve(#[from] SolveError),
    /// The produced coloring failed validation.
    #[error(transparent)]
    Coloring(#[from] ColoringError),
    /// Reading the input failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    /// The search panicked; the batch continues with the next graph.
    #[error("search aborted: {message}")]
    Panicked {
        /// Panic payload, when it was a string.
        message: String,
    },
}

impl From<StateError> for Error {
    fn from(e: StateError) -> Self {
        Error::Solve(SolveError::State(e))
    }
}
