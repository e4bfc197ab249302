//! Structural facts derived once from an adjacency matrix.

use crate::bitset::BitSet;
use crate::matrix::AdjacencyMatrix;

/// Read-only view of a graph with everything the injective search needs precomputed.
///
/// - `neighbors(v)` is row `v` of the adjacency matrix.
/// - `injective_neighbors(v)` holds every `u != v` that shares a common neighbor
///   `w ∉ {u, v}` with `v`, whether or not `u` and `v` are adjacent.
/// - `isolated()` lists the degree-0 vertices in increasing order.
#[derive(Clone, Debug)]
pub struct GraphModel {
    matrix: AdjacencyMatrix,
    degrees: Vec<usize>,
    injective: Vec<BitSet>,
    isolated: Vec<usize>,
    max_degree: usize,
    max_degree_vertex: Option<usize>,
}

impl GraphModel {
    /// Derives neighbor, degree and injective-neighbor data from `matrix`.
    pub fn new(matrix: AdjacencyMatrix) -> Self {
        let n = matrix.order();

        let degrees: Vec<usize> = (0..n).map(|v| matrix.row(v).len()).collect();
        let isolated = (0..n).filter(|&v| degrees[v] == 0).collect();

        // First vertex reaching the maximum wins.
        let mut max_degree = 0;
        let mut max_degree_vertex = None;
        for (v, &d) in degrees.iter().enumerate() {
            if max_degree_vertex.is_none() || d > max_degree {
                max_degree = d;
                max_degree_vertex = Some(v);
            }
        }

        let injective = (0..n)
            .map(|v| compute_injective_neighbors(&matrix, v))
            .collect();

        Self {
            matrix,
            degrees,
            injective,
            isolated,
            max_degree,
            max_degree_vertex,
        }
    }

    /// Number of vertices.
    #[inline(always)]
    pub fn order(&self) -> usize {
        self.matrix.order()
    }

    /// The underlying adjacency matrix.
    #[inline(always)]
    pub fn matrix(&self) -> &AdjacencyMatrix {
        &self.matrix
    }

    /// Neighbor set of `v`.
    #[inline(always)]
    pub fn neighbors(&self, v: usize) -> &BitSet {
        self.matrix.row(v)
    }

    /// Degree of `v`.
    #[inline(always)]
    pub fn degree(&self, v: usize) -> usize {
        self.degrees[v]
    }

    /// Injective-neighbor set of `v`.
    #[inline(always)]
    pub fn injective_neighbors(&self, v: usize) -> &BitSet {
        &self.injective[v]
    }

    /// Returns whether `u` and `v` share a common neighbor.
    #[inline(always)]
    pub fn are_injective_neighbors(&self, u: usize, v: usize) -> bool {
        self.injective[v].contains(u)
    }

    /// Degree-0 vertices, ascending.
    #[inline]
    pub fn isolated(&self) -> &[usize] {
        &self.isolated
    }

    /// Maximum degree (`0` for edgeless or empty graphs).
    #[inline(always)]
    pub fn max_degree(&self) -> usize {
        self.max_degree
    }

    /// The lowest-indexed vertex of maximum degree, or `None` when `n == 0`.
    #[inline(always)]
    pub fn max_degree_vertex(&self) -> Option<usize> {
        self.max_degree_vertex
    }
}

/// `⋃_{w ∈ N(v)} N(w) \ {v}`.
///
/// Any `u` in that union shares `w` with `v`; `w` differs from both because the
/// matrix has no self-loops.
fn compute_injective_neighbors(matrix: &AdjacencyMatrix, v: usize) -> BitSet {
    let mut out = BitSet::with_capacity(matrix.order());
    for w in matrix.row(v) {
        out.union_with(matrix.row(w));
    }
    out.remove(v);
    out
}
