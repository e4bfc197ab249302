//! Validated adjacency matrices and the plain-text matrix format.

use rand::Rng;

use crate::bitset::BitSet;
use crate::error::FormatError;
use crate::graph6;

// ============================================================================
// AdjacencyMatrix
// ============================================================================

/// Square 0/1 adjacency matrix of a simple undirected graph.
///
/// Invariants: symmetric, zero diagonal. Row `v` is stored as the neighbor bitset of
/// `v`. The matrix cannot be mutated after construction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AdjacencyMatrix {
    rows: Vec<BitSet>,
}

impl AdjacencyMatrix {
    /// Edgeless graph on `n` vertices.
    pub fn empty(n: usize) -> Self {
        Self {
            rows: vec![BitSet::with_capacity(n); n],
        }
    }

    /// Complete graph `K_n`.
    pub fn complete(n: usize) -> Self {
        let mut m = Self::empty(n);
        for u in 0..n {
            for v in (u + 1)..n {
                m.link(u, v);
            }
        }
        m
    }

    /// Builds a graph from an edge list.
    ///
    /// Duplicate edges are merged.
    ///
    /// # Errors
    /// Returns an error on self-loops or endpoints outside `0..n`.
    pub fn from_edges<I>(n: usize, edges: I) -> Result<Self, FormatError>
    where
        I: IntoIterator<Item = (usize, usize)>,
    {
        let mut m = Self::empty(n);
        for (u, v) in edges {
            if u >= n || v >= n {
                return Err(FormatError::VertexOutOfRange { u, v, n });
            }
            if u == v {
                return Err(FormatError::SelfLoop { vertex: u });
            }
            m.link(u, v);
        }
        Ok(m)
    }

    /// Builds a graph from a dense 0/1 matrix given row by row.
    ///
    /// # Errors
    /// Returns an error if the rows are not square, contain values other than `0/1`,
    /// have a non-zero diagonal, or are not symmetric.
    pub fn from_rows(rows: &[Vec<u8>]) -> Result<Self, FormatError> {
        let n = rows.len();
        let mut m = Self::empty(n);
        for (i, row) in rows.iter().enumerate() {
            if row.len() != n {
                return Err(FormatError::NonSquare {
                    row: i,
                    expected: n,
                    got: row.len(),
                });
            }
            for (j, &entry) in row.iter().enumerate() {
                match entry {
                    0 => {}
                    1 => {
                        m.rows[i].insert(j);
                    }
                    other => {
                        return Err(FormatError::InvalidEntry {
                            row: i,
                            col: j,
                            entry: other.to_string(),
                        })
                    }
                }
            }
        }
        m.check_simple()?;
        Ok(m)
    }

    /// Erdős–Rényi `G(n, p)` sample.
    pub fn random<R: Rng>(rng: &mut R, n: usize, p: f64) -> Self {
        debug_assert!((0.0..=1.0).contains(&p), "p must be in [0, 1]");
        let mut m = Self::empty(n);
        for u in 0..n {
            for v in (u + 1)..n {
                if rng.random_bool(p) {
                    m.link(u, v);
                }
            }
        }
        m
    }

    /// Inserts the undirected edge `{u, v}`; used only while building.
    #[inline(always)]
    pub(crate) fn link(&mut self, u: usize, v: usize) {
        debug_assert!(u != v);
        self.rows[u].insert(v);
        self.rows[v].insert(u);
    }

    fn check_simple(&self) -> Result<(), FormatError> {
        let n = self.order();
        for i in 0..n {
            if self.rows[i].contains(i) {
                return Err(FormatError::SelfLoop { vertex: i });
            }
        }
        for i in 0..n {
            for j in (i + 1)..n {
                if self.rows[i].contains(j) != self.rows[j].contains(i) {
                    return Err(FormatError::NotSymmetric { i, j });
                }
            }
        }
        Ok(())
    }

    /// Number of vertices.
    #[inline(always)]
    pub fn order(&self) -> usize {
        self.rows.len()
    }

    /// Returns whether `{u, v}` is an edge.
    #[inline(always)]
    pub fn has_edge(&self, u: usize, v: usize) -> bool {
        self.rows[u].contains(v)
    }

    /// Neighbor bitset of `v`.
    #[inline(always)]
    pub fn row(&self, v: usize) -> &BitSet {
        &self.rows[v]
    }

    /// Number of edges.
    pub fn edge_count(&self) -> usize {
        self.rows.iter().map(BitSet::len).sum::<usize>() / 2
    }

    /// Encodes the graph in graph6.
    pub fn to_graph6(&self) -> String {
        graph6::encode(self)
    }

}

// ============================================================================
// Parsing
// ============================================================================

/// Parses a `0/1` adjacency matrix from text.
///
/// Rules:
/// - Blank lines are ignored.
/// - A row is either whitespace-separated entries (`0 1 0`) or a contiguous string
///   (`010`).
/// - The matrix must be square, symmetric, and have a zero diagonal.
///
/// # Errors
/// Returns an error if the input is empty, non-square, contains invalid entries,
/// has self-loops, or is not symmetric.
pub fn parse_adjacency_matrix(text: &str) -> Result<AdjacencyMatrix, FormatError> {
    let lines: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();
    if lines.is_empty() {
        return Err(FormatError::Empty);
    }

    let mut rows = Vec::with_capacity(lines.len());
    for (i, line) in lines.iter().enumerate() {
        let tokens: Vec<&str> = if line.contains(char::is_whitespace) {
            line.split_whitespace().collect()
        } else {
            line.char_indices().map(|(k, c)| &line[k..k + c.len_utf8()]).collect()
        };
        let mut row = Vec::with_capacity(tokens.len());
        for (j, tok) in tokens.iter().enumerate() {
            match *tok {
                "0" => row.push(0),
                "1" => row.push(1),
                other => {
                    return Err(FormatError::InvalidEntry {
                        row: i,
                        col: j,
                        entry: other.to_string(),
                    })
                }
            }
        }
        rows.push(row);
    }
    AdjacencyMatrix::from_rows(&rows)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_xorshift::XorShiftRng;

    #[test]
    fn complete_graph_properties() {
        let m = AdjacencyMatrix::complete(5);
        assert_eq!(m.edge_count(), 10);
        for v in 0..5 {
            assert!(!m.has_edge(v, v));
            assert_eq!(m.row(v).len(), 4);
        }
    }

    #[test]
    fn from_edges_rejects_bad_edges() {
        assert_eq!(
            AdjacencyMatrix::from_edges(3, [(0, 3)]).unwrap_err(),
            FormatError::VertexOutOfRange { u: 0, v: 3, n: 3 }
        );
        assert_eq!(
            AdjacencyMatrix::from_edges(3, [(1, 1)]).unwrap_err(),
            FormatError::SelfLoop { vertex: 1 }
        );
    }

    #[test]
    fn random_graph_is_symmetric() {
        let mut rng = XorShiftRng::seed_from_u64(0xC0FFEE);
        let m = AdjacencyMatrix::random(&mut rng, 20, 0.3);
        for u in 0..20 {
            assert!(!m.has_edge(u, u));
            for v in 0..20 {
                assert_eq!(m.has_edge(u, v), m.has_edge(v, u));
            }
        }
    }

    #[test]
    fn parse_reads_spaced_rows() {
        let mut rng = XorShiftRng::seed_from_u64(0x1234);
        let m = AdjacencyMatrix::random(&mut rng, 10, 0.4);

        let text: String = (0..10)
            .map(|i| {
                let row: Vec<_> = (0..10)
                    .map(|j| u8::from(m.has_edge(i, j)).to_string())
                    .collect();
                row.join(" ") + "\n"
            })
            .collect();

        assert_eq!(parse_adjacency_matrix(&text).unwrap(), m);
    }

    #[test]
    fn parse_accepts_contiguous_rows() {
        let m = parse_adjacency_matrix("0100\n1010\n0101\n0010\n").unwrap();
        assert_eq!(m.order(), 4);
        assert_eq!(m.edge_count(), 3);
        assert!(m.has_edge(2, 3));
    }

    #[test]
    fn parse_rejects_non_square() {
        let err = parse_adjacency_matrix("0 1 0\n1 0\n").unwrap_err();
        assert!(matches!(err, FormatError::NonSquare { .. }));
    }

    #[test]
    fn parse_rejects_invalid_entry() {
        let err = parse_adjacency_matrix("0 2\n2 0\n").unwrap_err();
        assert!(matches!(err, FormatError::InvalidEntry { row: 0, col: 1, .. }));
    }

    #[test]
    fn parse_rejects_self_loop() {
        let err = parse_adjacency_matrix("1 0\n0 0\n").unwrap_err();
        assert_eq!(err, FormatError::SelfLoop { vertex: 0 });
    }

    #[test]
    fn parse_rejects_non_symmetric() {
        let err = parse_adjacency_matrix("0 1\n0 0\n").unwrap_err();
        assert_eq!(err, FormatError::NotSymmetric { i: 0, j: 1 });
    }

    #[test]
    fn parse_rejects_whitespace_only() {
        assert_eq!(parse_adjacency_matrix("  \n\n ").unwrap_err(), FormatError::Empty);
    }
}
