//! Splitting input into per-graph records, and the DIMACS edge format.
//!
//! Reading only cuts the input into one record per graph. Each record is decoded
//! later, on its own, so a malformed graph fails alone instead of taking the rest
//! of the input down with it.
//!
//! Supported formats:
//! - **graph6**: one graph per non-blank line.
//! - **matrix**: `0/1` adjacency matrices (rows space-separated or contiguous),
//!   separated by blank lines.
//! - **DIMACS**: a single graph given as `p edge N M` followed by 1-based `e U V`
//!   lines. `c`, `d`, `v`, `x` and `n` lines are ignored.

use std::fmt;
use std::io::{self, BufRead, Read};
use std::str::FromStr;

use thiserror::Error;

use crate::error::FormatError;
use crate::graph6;
use crate::matrix::{parse_adjacency_matrix, AdjacencyMatrix};
use crate::solver::Solver;

/// Identifier for an input format.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum InputFormat {
    /// One graph6 string per line.
    #[default]
    Graph6,
    /// Blank-line separated `0/1` matrices.
    Matrix,
    /// DIMACS edge format.
    Dimacs,
}

/// An input format name that is not recognised.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("unknown input format {0:?} (expected graph6, matrix or dimacs)")]
pub struct UnknownFormat(pub String);

impl FromStr for InputFormat {
    type Err = UnknownFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "graph6" | "g6" => Ok(InputFormat::Graph6),
            "matrix" | "adj" => Ok(InputFormat::Matrix),
            "dimacs" | "col" => Ok(InputFormat::Dimacs),
            _ => Err(UnknownFormat(s.to_owned())),
        }
    }
}

impl fmt::Display for InputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            InputFormat::Graph6 => "graph6",
            InputFormat::Matrix => "matrix",
            InputFormat::Dimacs => "dimacs",
        })
    }
}

/// Undecoded text of one graph.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GraphSource {
    /// A graph6 line.
    Graph6(String),
    /// A plain matrix block.
    Matrix(String),
    /// A whole DIMACS document.
    Dimacs(String),
}

/// One graph of an input stream.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GraphRecord {
    /// 1-based line where the graph starts.
    pub line: usize,
    /// Its undecoded text.
    pub source: GraphSource,
}

impl GraphRecord {
    /// Decodes the record into a fresh solver.
    ///
    /// # Errors
    /// Returns the decoder's [`FormatError`].
    pub fn to_solver(&self) -> Result<Solver, FormatError> {
        match &self.source {
            GraphSource::Graph6(text) => Solver::from_graph6(text),
            GraphSource::Matrix(text) => parse_adjacency_matrix(text).map(Solver::from_matrix),
            GraphSource::Dimacs(text) => parse_dimacs(text).map(Solver::from_matrix),
        }
    }

    /// Short human-readable label: the graph6 text, or the start line otherwise.
    pub fn label(&self) -> String {
        match &self.source {
            GraphSource::Graph6(text) => graph6::strip(text).to_owned(),
            GraphSource::Matrix(_) | GraphSource::Dimacs(_) => format!("line {}", self.line),
        }
    }
}

/// Lines as text; bytes that are not UTF-8 become `U+FFFD` so the decoder rejects
/// only the line that holds them.
fn text_lines<R: BufRead>(reader: R) -> impl Iterator<Item = io::Result<String>> {
    reader.split(b'\n').map(|line| {
        line.map(|bytes| {
            let mut text = String::from_utf8_lossy(&bytes).into_owned();
            if text.ends_with('\r') {
                text.pop();
            }
            text
        })
    })
}

/// Cuts `reader` into per-graph records.
///
/// # Errors
/// Returns an error only if reading fails; malformed graphs, including lines that
/// are not UTF-8, surface later from [`GraphRecord::to_solver`].
pub fn read_records<R: BufRead>(
    mut reader: R,
    format: InputFormat,
) -> io::Result<Vec<GraphRecord>> {
    let mut records = Vec::new();
    match format {
        InputFormat::Graph6 => {
            for (idx, line) in text_lines(reader).enumerate() {
                let line = line?;
                if line.trim().is_empty() {
                    continue;
                }
                records.push(GraphRecord {
                    line: idx + 1,
                    source: GraphSource::Graph6(line),
                });
            }
        }
        InputFormat::Matrix => {
            let mut block = String::new();
            let mut start = 0;
            for (idx, line) in text_lines(reader).enumerate() {
                let line = line?;
                if line.trim().is_empty() {
                    if !block.is_empty() {
                        records.push(GraphRecord {
                            line: start,
                            source: GraphSource::Matrix(std::mem::take(&mut block)),
                        });
                    }
                    continue;
                }
                if block.is_empty() {
                    start = idx + 1;
                }
                block.push_str(&line);
                block.push('\n');
            }
            if !block.is_empty() {
                records.push(GraphRecord {
                    line: start,
                    source: GraphSource::Matrix(block),
                });
            }
        }
        InputFormat::Dimacs => {
            let mut bytes = Vec::new();
            reader.read_to_end(&mut bytes)?;
            let text = String::from_utf8_lossy(&bytes).into_owned();
            if !text.trim().is_empty() {
                records.push(GraphRecord {
                    line: 1,
                    source: GraphSource::Dimacs(text),
                });
            }
        }
    }
    Ok(records)
}

/// Parses a DIMACS edge-format graph.
///
/// # Errors
/// Returns an error for a missing or repeated `p` line, a problem type other than
/// `edge`/`col`, unparsable numbers, unknown line types, or out-of-range vertices.
pub fn parse_dimacs(text: &str) -> Result<AdjacencyMatrix, FormatError> {
    let mut n: Option<usize> = None;
    let mut edges = Vec::new();

    for (idx, line) in text.lines().enumerate() {
        let line_no = idx + 1;
        let err = |message: &str| FormatError::Dimacs {
            line: line_no,
            message: message.to_owned(),
        };
        let number = |tok: Option<&str>| -> Result<usize, FormatError> {
            tok.and_then(|t| t.parse().ok())
                .ok_or_else(|| err("expected a non-negative integer"))
        };

        let mut tokens = line.split_whitespace();
        match tokens.next() {
            None | Some("c" | "d" | "v" | "x" | "n") => {}
            Some("p") => {
                if n.is_some() {
                    return Err(err("duplicate problem line"));
                }
                if !matches!(tokens.next(), Some("edge" | "col")) {
                    return Err(err("problem type must be `edge` or `col`"));
                }
                n = Some(number(tokens.next())?);
            }
            Some("e") => {
                let order = n.ok_or_else(|| err("edge before problem line"))?;
                let u = number(tokens.next())?;
                let v = number(tokens.next())?;
                if u == 0 || v == 0 || u > order || v > order {
                    return Err(err("vertex out of range (vertices are 1-based)"));
                }
                edges.push((u - 1, v - 1));
            }
            Some(_) => return Err(err("unknown line type")),
        }
    }

    let Some(n) = n else {
        return Err(if text.trim().is_empty() {
            FormatError::Empty
        } else {
            FormatError::Dimacs {
                line: 0,
                message: "missing problem line".to_owned(),
            }
        });
    };
    AdjacencyMatrix::from_edges(n, edges)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn format_names_parse() {
        assert_eq!("graph6".parse(), Ok(InputFormat::Graph6));
        assert_eq!("Matrix".parse(), Ok(InputFormat::Matrix));
        assert_eq!("dimacs".parse(), Ok(InputFormat::Dimacs));
        assert_eq!(
            "metis".parse::<InputFormat>(),
            Err(UnknownFormat("metis".to_owned()))
        );
        assert_eq!(InputFormat::Dimacs.to_string(), "dimacs");
    }

    #[test]
    fn graph6_records_skip_blank_lines() {
        let data = "Ch\n\n!bad\nDhc\n";
        let records = read_records(Cursor::new(data), InputFormat::Graph6).unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[1].line, 3);
        assert_eq!(records[2].label(), "Dhc");

        assert!(records[0].to_solver().is_ok());
        assert_eq!(
            records[1].to_solver().unwrap_err(),
            FormatError::InvalidHeader { byte: b'!' }
        );
        assert_eq!(records[2].to_solver().unwrap().dimension(), 5);
    }

    #[test]
    fn non_utf8_line_fails_alone() {
        let data: &[u8] = b"Ch\n\xff\xfe\r\nDhc\n";
        let records = read_records(Cursor::new(data), InputFormat::Graph6).unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[1].line, 2);

        assert_eq!(records[0].to_solver().unwrap().graph6_notation(), "Ch");
        assert!(matches!(
            records[1].to_solver().unwrap_err(),
            FormatError::InvalidByte { position: 0, .. }
        ));
        assert_eq!(records[2].to_solver().unwrap().graph6_notation(), "Dhc");
    }

    #[test]
    fn non_utf8_matrix_block_fails_alone() {
        let data: &[u8] = b"0 1\n1 0\n\n0 \xff\n1 0\n\n0\n";
        let records = read_records(Cursor::new(data), InputFormat::Matrix).unwrap();
        assert_eq!(records.len(), 3);
        assert!(records[0].to_solver().is_ok());
        assert!(records[1].to_solver().is_err());
        assert_eq!(records[2].to_solver().unwrap().dimension(), 1);
    }

    #[test]
    fn matrix_blocks_are_split_on_blank_lines() {
        let data = "0 1\n1 0\n\n\n0 1 0\n1 0 1\n0 1 0\n\n0 1\n0 0\n";
        let records = read_records(Cursor::new(data), InputFormat::Matrix).unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(
            records.iter().map(|r| r.line).collect::<Vec<_>>(),
            vec![1, 5, 9]
        );
        assert_eq!(records[1].to_solver().unwrap().graph6_notation(), "Bg");
        assert_eq!(records[1].label(), "line 5");
        assert_eq!(
            records[2].to_solver().unwrap_err(),
            FormatError::NotSymmetric { i: 0, j: 1 }
        );
    }

    #[test]
    fn dimacs_is_a_single_record() {
        let data = "c triangle\np edge 3 3\ne 1 2\ne 2 3\ne 1 3\n";
        let records = read_records(Cursor::new(data), InputFormat::Dimacs).unwrap();
        assert_eq!(records.len(), 1);
        let solver = records[0].to_solver().unwrap();
        assert_eq!(solver.graph6_notation(), "Bw");
    }

    #[test]
    fn empty_inputs_yield_no_records() {
        for format in [InputFormat::Graph6, InputFormat::Matrix, InputFormat::Dimacs] {
            assert!(read_records(Cursor::new("\n \n"), format).unwrap().is_empty());
        }
    }

    #[test]
    fn dimacs_errors_carry_line_numbers() {
        assert_eq!(
            parse_dimacs("e 1 2\n").unwrap_err(),
            FormatError::Dimacs {
                line: 1,
                message: "edge before problem line".to_owned()
            }
        );
        assert!(matches!(
            parse_dimacs("p edge 2 1\ne 1 3\n").unwrap_err(),
            FormatError::Dimacs { line: 2, .. }
        ));
        assert!(matches!(
            parse_dimacs("p cnf 2 1\n").unwrap_err(),
            FormatError::Dimacs { line: 1, .. }
        ));
        assert!(matches!(
            parse_dimacs("p edge 2 1\np edge 2 1\n").unwrap_err(),
            FormatError::Dimacs { line: 2, .. }
        ));
        assert!(matches!(
            parse_dimacs("c only comments\n").unwrap_err(),
            FormatError::Dimacs { line: 0, .. }
        ));
        assert_eq!(parse_dimacs("").unwrap_err(), FormatError::Empty);
        assert_eq!(
            parse_dimacs("p edge 2 1\ne 2 2\n").unwrap_err(),
            FormatError::SelfLoop { vertex: 1 }
        );
    }
}
