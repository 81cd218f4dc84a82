//! Decoder
//!
//! Consumes a compact-term byte prefix and yields a [`Term`] plus the
//! unconsumed remainder. All four length forms (§4.2.1 of the wire format
//! this mirrors) and the six known extended sub-tags are handled here; an
//! extended sub-tag this codec does not recognize decodes to
//! [`Term::Extended`] instead of failing, so forward-compatible streams never
//! trip a hard error on an unrecognized but well-formed tag.

use crate::constants::*;
use crate::int_bytes::{from_twos_complement_be, from_unsigned_be};
use crate::term::Term;
use malachite::Integer;

/// Failure decoding a compact term.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// A read would have consumed more bytes than remain in the buffer.
    UnexpectedEndOfInput {
        needed: usize,
        available: usize,
        offset: usize,
    },
    /// An extended format's inner term violated its shape requirement (a
    /// length prefix that isn't a non-negative Integer, a negative payload
    /// where an unsigned one is required, and similar strictness failures).
    MalformedFraming {
        expected: &'static str,
        offset: usize,
    },
}

/// Decode a single compact term from the front of `input`.
///
/// Returns the decoded term and the unconsumed remainder of `input`.
pub fn decode(input: &[u8]) -> Result<(Term, &[u8]), DecodeError> {
    let mut pos = 0usize;
    let term = decode_term(input, &mut pos)?;
    Ok((term, &input[pos..]))
}

fn peek_byte(input: &[u8], pos: usize) -> Result<u8, DecodeError> {
    input
        .get(pos)
        .copied()
        .ok_or(DecodeError::UnexpectedEndOfInput {
            needed: 1,
            available: input.len().saturating_sub(pos),
            offset: pos,
        })
}

fn read_byte(input: &[u8], pos: &mut usize) -> Result<u8, DecodeError> {
    let byte = peek_byte(input, *pos)?;
    *pos += 1;
    Ok(byte)
}

fn read_bytes<'a>(input: &'a [u8], pos: &mut usize, n: usize) -> Result<&'a [u8], DecodeError> {
    if *pos + n > input.len() {
        return Err(DecodeError::UnexpectedEndOfInput {
            needed: n,
            available: input.len() - *pos,
            offset: *pos,
        });
    }
    let slice = &input[*pos..*pos + n];
    *pos += n;
    Ok(slice)
}

fn decode_term(input: &[u8], pos: &mut usize) -> Result<Term, DecodeError> {
    let start = *pos;
    let first = peek_byte(input, start)?;
    let primary = first & PRIMARY_TAG_MASK;
    if primary == EXTENDED {
        decode_extended(input, pos, first)
    } else {
        *pos += 1;
        let value = decode_value_payload(input, pos, first, primary)?;
        term_from_primary(primary, value, start)
    }
}

/// Resolve the length-form value following a starter byte `b` already
/// consumed from `input`. `primary` gates the sign rule: only the Integer
/// tag (1) sign-extends the large form's high bit.
fn decode_value_payload(
    input: &[u8],
    pos: &mut usize,
    b: u8,
    primary: u8,
) -> Result<Integer, DecodeError> {
    if b & FORM_BIT == 0 {
        return Ok(Integer::from(b >> 4));
    }
    if b & FORM_SELECT_MASK == FORM_MEDIUM {
        let lo = read_byte(input, pos)?;
        let hi = ((b & 0xE0) >> 5) as u64;
        return Ok(Integer::from((hi << 8) | lo as u64));
    }
    debug_assert_eq!(b & FORM_SELECT_MASK, FORM_LARGE);
    let s = (b & LARGE_SIZE_MASK) >> 5;
    let n: usize = if s == LARGE_SIZE_ESCAPE {
        let escape_offset = *pos;
        let size_term = decode_term(input, pos)?;
        let k = require_nonneg_u64(&size_term, escape_offset, "non-negative Integer size escape")?;
        escape_size_byte_count(k, *pos, input.len() - *pos)?
    } else {
        s as usize + 2
    };
    let bytes = read_bytes(input, pos, n)?;
    if primary == INTEGER && bytes[0] & 0x80 != 0 {
        Ok(from_twos_complement_be(bytes))
    } else {
        Ok(from_unsigned_be(bytes))
    }
}

/// Byte count `k + 9` for the large form's escape-size path, guarding the
/// addition against a corrupt or adversarial `k` near `u64::MAX`: plain
/// `k as usize + 9` would panic on overflow-checked builds or silently wrap
/// to a tiny `n` otherwise, reading far fewer bytes than the stream claims.
fn escape_size_byte_count(k: u64, offset: usize, available: usize) -> Result<usize, DecodeError> {
    k.checked_add(9)
        .and_then(|n| usize::try_from(n).ok())
        .ok_or(DecodeError::UnexpectedEndOfInput {
            needed: usize::MAX,
            available,
            offset,
        })
}

fn term_from_primary(primary: u8, value: Integer, offset: usize) -> Result<Term, DecodeError> {
    Ok(match primary {
        LITERAL => Term::Literal(integer_to_u64(&value, offset)?),
        INTEGER => Term::Integer(value),
        ATOM => Term::Atom(integer_to_u64(&value, offset)?),
        X_REG => Term::XReg(integer_to_u64(&value, offset)?),
        Y_REG => Term::YReg(integer_to_u64(&value, offset)?),
        LABEL => Term::Label(integer_to_u64(&value, offset)?),
        CHAR => Term::Char(integer_to_u64(&value, offset)?),
        _ => unreachable!("primary tag 7 is dispatched separately"),
    })
}

fn integer_to_u64(value: &Integer, offset: usize) -> Result<u64, DecodeError> {
    u64::try_from(value).map_err(|_| DecodeError::MalformedFraming {
        expected: "non-negative u64-representable index",
        offset,
    })
}

fn require_nonneg_u64(
    term: &Term,
    offset: usize,
    expected: &'static str,
) -> Result<u64, DecodeError> {
    match term {
        Term::Integer(n) => {
            u64::try_from(n).map_err(|_| DecodeError::MalformedFraming { expected, offset })
        }
        _ => Err(DecodeError::MalformedFraming { expected, offset }),
    }
}

/// Validate a decoded element count against the bytes actually remaining
/// before it's used to pre-size a `Vec`. Each element costs at least
/// `bytes_per_item` bytes, so a `len` that couldn't possibly fit the
/// remaining buffer is rejected here rather than handed to
/// `Vec::with_capacity`, which would otherwise abort the process on a
/// corrupt or adversarial length (e.g. a list length near `2^40` encoded in
/// a handful of bytes via the large form) well before the per-item decode
/// loop gets a chance to fail normally.
fn bounded_len(
    len: u64,
    bytes_per_item: u64,
    offset: usize,
    available: usize,
) -> Result<usize, DecodeError> {
    let min_bytes = len.checked_mul(bytes_per_item).unwrap_or(u64::MAX);
    if min_bytes > available as u64 {
        return Err(DecodeError::UnexpectedEndOfInput {
            needed: usize::try_from(min_bytes).unwrap_or(usize::MAX),
            available,
            offset,
        });
    }
    // min_bytes <= available fits usize, and len <= min_bytes since bytes_per_item >= 1.
    Ok(len as usize)
}

/// Extract a numeric payload from any index-bearing term, for the 0x47
/// extended-literal path, which is deliberately lenient about which
/// index-bearing variant carried the payload.
fn numeric_payload(term: &Term, offset: usize) -> Result<u64, DecodeError> {
    match term {
        Term::Integer(n) => u64::try_from(n).map_err(|_| DecodeError::MalformedFraming {
            expected: "non-negative numeric payload",
            offset,
        }),
        Term::Literal(v)
        | Term::Atom(v)
        | Term::XReg(v)
        | Term::YReg(v)
        | Term::Label(v)
        | Term::Char(v) => Ok(*v),
        _ => Err(DecodeError::MalformedFraming {
            expected: "index-bearing term",
            offset,
        }),
    }
}

fn decode_extended(input: &[u8], pos: &mut usize, first: u8) -> Result<Term, DecodeError> {
    *pos += 1;
    match first {
        EXT_FLOAT => {
            let bytes = read_bytes(input, pos, 8)?;
            let mut buf = [0u8; 8];
            buf.copy_from_slice(bytes);
            Ok(Term::Float(f64::from_be_bytes(buf)))
        }
        EXT_LIST => {
            let len_offset = *pos;
            let len_term = decode_term(input, pos)?;
            let len = require_nonneg_u64(&len_term, len_offset, "non-negative Integer list length")?;
            let len = bounded_len(len, 1, *pos, input.len() - *pos)?;
            let mut items = Vec::with_capacity(len);
            for _ in 0..len {
                items.push(decode_term(input, pos)?);
            }
            Ok(Term::List(items))
        }
        EXT_FLOAT_REG => {
            let reg_offset = *pos;
            let reg_term = decode_term(input, pos)?;
            let n = require_nonneg_u64(&reg_term, reg_offset, "non-negative Integer float register index")?;
            Ok(Term::FloatReg(n))
        }
        EXT_ALLOC_LIST => {
            let len_offset = *pos;
            let len_term = decode_term(input, pos)?;
            let len = require_nonneg_u64(&len_term, len_offset, "non-negative Integer alloc-list length")?;
            let len = bounded_len(len, 2, *pos, input.len() - *pos)?;
            let mut pairs = Vec::with_capacity(len);
            for _ in 0..len {
                let kind = decode_term(input, pos)?;
                let value = decode_term(input, pos)?;
                pairs.push((kind, value));
            }
            Ok(Term::Alloc(pairs))
        }
        EXT_LITERAL => {
            let inner_offset = *pos;
            let inner = decode_term(input, pos)?;
            let index = numeric_payload(&inner, inner_offset)?;
            Ok(Term::Literal(index))
        }
        EXT_TYPED_REG => {
            let register = decode_term(input, pos)?;
            let type_offset = *pos;
            let type_term = decode_term(input, pos)?;
            let type_index = require_nonneg_u64(&type_term, type_offset, "non-negative Integer type index")?;
            Ok(Term::TypedReg(Box::new(register), type_index))
        }
        other => {
            // Unknown extended sub-tag: primary tag 7 never sign-extends, so
            // decode the length form exactly as the non-extended tags do.
            let value = decode_value_payload(input, pos, other, EXTENDED)?;
            let offset = *pos;
            let v = integer_to_u64(&value, offset)?;
            Ok(Term::Extended(other & 0xF8, v))
        }
    }
}
