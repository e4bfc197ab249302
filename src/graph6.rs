//! The graph6 text encoding.
//!
//! A graph6 string is a size header followed by the strict upper triangle of the
//! adjacency matrix, packed six bits per printable byte (`value + 63`). Bits are
//! taken column by column (`col = 1..n`, `row = 0..col`), most significant bit
//! first, and the last byte is zero-padded.
//!
//! Sizes `0..=62` take one header byte. Sizes up to [`MAX_VERTICES`] use `'~'`
//! followed by three bytes holding an 18-bit big-endian value.

use crate::error::FormatError;
use crate::matrix::AdjacencyMatrix;

/// Optional file header some tools prepend to graph6 lines.
pub const HEADER: &str = ">>graph6<<";

/// Largest order representable with the 4-byte size header.
pub const MAX_VERTICES: usize = (1 << 18) - 1;

const BIAS: u8 = 63;
const MAX_PRINTABLE: u8 = 126;
const LONG_SIZE_MARKER: u8 = 126;
const SHORT_SIZE_LIMIT: usize = 62;

#[inline(always)]
const fn choose2(n: usize) -> usize {
    n * n.saturating_sub(1) / 2
}

#[inline(always)]
fn six_bits(position: usize, byte: u8) -> Result<u8, FormatError> {
    if (BIAS..=MAX_PRINTABLE).contains(&byte) {
        Ok(byte - BIAS)
    } else {
        Err(FormatError::InvalidByte { position, byte })
    }
}

/// Reads the size header; returns the order and the offset where the body starts.
fn decode_size(bytes: &[u8]) -> Result<(usize, usize), FormatError> {
    let &first = bytes.first().ok_or(FormatError::Empty)?;
    if first < BIAS {
        return Err(FormatError::InvalidHeader { byte: first });
    }
    let first = six_bits(0, first)?;
    if first + BIAS != LONG_SIZE_MARKER {
        return Ok((first as usize, 1));
    }

    if bytes.len() < 4 {
        return Err(FormatError::InvalidHeader { byte: LONG_SIZE_MARKER });
    }
    if bytes[1] == LONG_SIZE_MARKER {
        return Err(FormatError::TooManyVertices { n: MAX_VERTICES + 1 });
    }
    let mut n = 0usize;
    for (position, &byte) in bytes.iter().enumerate().take(4).skip(1) {
        n = (n << 6) | six_bits(position, byte)? as usize;
    }
    Ok((n, 4))
}

/// Trims whitespace and a leading [`HEADER`].
pub(crate) fn strip(text: &str) -> &str {
    let text = text.trim();
    text.strip_prefix(HEADER).unwrap_or(text)
}

/// Decodes a single graph6 string.
///
/// Surrounding whitespace and a leading [`HEADER`] are ignored.
///
/// # Errors
/// Returns a [`FormatError`] if the header is malformed, a byte is outside
/// `63..=126`, or the body length does not match the declared order.
pub fn decode(text: &str) -> Result<AdjacencyMatrix, FormatError> {
    let bytes = strip(text).as_bytes();
    let (n, start) = decode_size(bytes)?;
    let body = &bytes[start..];

    let expected = choose2(n).div_ceil(6);
    if body.len() != expected {
        return Err(FormatError::LengthMismatch {
            expected,
            got: body.len(),
        });
    }
    let values = body
        .iter()
        .enumerate()
        .map(|(i, &b)| six_bits(start + i, b))
        .collect::<Result<Vec<u8>, _>>()?;

    let mut matrix = AdjacencyMatrix::empty(n);
    let mut k = 0usize;
    for col in 1..n {
        for row in 0..col {
            if (values[k / 6] >> (5 - k % 6)) & 1 == 1 {
                matrix.link(row, col);
            }
            k += 1;
        }
    }
    Ok(matrix)
}

/// Encodes a matrix as graph6 (no [`HEADER`], no trailing newline).
pub fn encode(matrix: &AdjacencyMatrix) -> String {
    let n = matrix.order();
    let mut out = Vec::with_capacity(8 + choose2(n).div_ceil(6));

    if n <= SHORT_SIZE_LIMIT {
        out.push(n as u8 + BIAS);
    } else if n <= MAX_VERTICES {
        out.push(LONG_SIZE_MARKER);
        for shift in [12, 6, 0] {
            out.push(((n >> shift) & 0x3F) as u8 + BIAS);
        }
    } else {
        out.extend([LONG_SIZE_MARKER, LONG_SIZE_MARKER]);
        for shift in [30, 24, 18, 12, 6, 0] {
            out.push(((n >> shift) & 0x3F) as u8 + BIAS);
        }
    }

    let mut acc = 0u8;
    let mut filled = 0u32;
    for col in 1..n {
        for row in 0..col {
            acc = (acc << 1) | u8::from(matrix.has_edge(row, col));
            filled += 1;
            if filled == 6 {
                out.push(acc + BIAS);
                acc = 0;
                filled = 0;
            }
        }
    }
    if filled > 0 {
        out.push((acc << (6 - filled)) + BIAS);
    }

    out.into_iter().map(char::from).collect()
}

// ============================================================================
// Tests
// ============================================================================
