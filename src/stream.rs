//! Stream Driver
//!
//! Repeatedly invokes the Decoder until a buffer is exhausted, and exposes
//! the convenience roundtrip predicate used throughout the test suite.

use crate::decode::{decode, DecodeError};
use crate::encode::encode;
use crate::term::Term;

/// Decode every term in `input`, in order, failing on the first error.
///
/// Empty input yields an empty list.
pub fn decode_all(input: &[u8]) -> Result<Vec<Term>, DecodeError> {
    let mut remaining = input;
    let mut terms = Vec::new();
    while !remaining.is_empty() {
        let (term, rest) = decode(remaining)?;
        terms.push(term);
        remaining = rest;
    }
    Ok(terms)
}

/// True if `bytes` decodes to a single term with no trailing bytes, and
/// re-encoding that term reproduces `bytes` exactly.
///
/// Any decode failure, including a malformed stream or leftover trailing
/// bytes, counts as a non-roundtrip and yields `false` rather than
/// propagating the error.
pub fn roundtrip(bytes: &[u8]) -> bool {
    match decode(bytes) {
        Ok((term, rest)) => rest.is_empty() && encode(&term) == bytes,
        Err(_) => false,
    }
}
