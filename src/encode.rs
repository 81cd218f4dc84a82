//! Encoder
//!
//! Produces the canonical, minimal-length byte sequence for a [`Term`]. Every
//! variant maps to exactly one encoding; there is no lossy or ambiguous path.
//! `encode` is total over well-formed terms — a malformed precondition (a
//! negative value stuffed into a non-Integer variant) is a programming error
//! caught by a debug assertion, not a recoverable `Result`.

use crate::constants::*;
use crate::int_bytes::{twos_complement_minimal_be, unsigned_fixed_be, unsigned_minimal_be};
use crate::term::Term;
use malachite::Integer;

/// Encode a single term in canonical form.
pub fn encode(term: &Term) -> Vec<u8> {
    match term {
        Term::XReg(v) => encode_tagged_nonneg(X_REG, &Integer::from(*v)),
        Term::YReg(v) => encode_tagged_nonneg(Y_REG, &Integer::from(*v)),
        Term::Label(v) => encode_tagged_nonneg(LABEL, &Integer::from(*v)),
        Term::Atom(v) => encode_tagged_nonneg(ATOM, &Integer::from(*v)),
        Term::Literal(v) => encode_tagged_nonneg(LITERAL, &Integer::from(*v)),
        Term::Char(v) => encode_tagged_nonneg(CHAR, &Integer::from(*v)),
        Term::Integer(n) => {
            if *n >= 0 {
                encode_tagged_nonneg(INTEGER, n)
            } else {
                encode_negative_integer(n)
            }
        }
        Term::Float(f) => {
            let mut out = Vec::with_capacity(9);
            out.push(EXT_FLOAT);
            out.extend_from_slice(&f.to_be_bytes());
            out
        }
        Term::FloatReg(n) => {
            let mut out = vec![EXT_FLOAT_REG];
            out.extend(encode(&Term::Integer(Integer::from(*n))));
            out
        }
        Term::TypedReg(register, type_index) => {
            let mut out = vec![EXT_TYPED_REG];
            out.extend(encode(register));
            out.extend(encode(&Term::Integer(Integer::from(*type_index))));
            out
        }
        Term::List(items) => {
            let mut out = vec![EXT_LIST];
            out.extend(encode(&Term::Integer(Integer::from(items.len() as u64))));
            for item in items {
                out.extend(encode(item));
            }
            out
        }
        Term::Alloc(pairs) => {
            let mut out = vec![EXT_ALLOC_LIST];
            out.extend(encode(&Term::Integer(Integer::from(pairs.len() as u64))));
            for (kind, value) in pairs {
                out.extend(encode(kind));
                out.extend(encode(value));
            }
            out
        }
        Term::Extended(sub_tag, value) => {
            debug_assert_eq!(sub_tag & PRIMARY_TAG_MASK, 0, "sub_tag must have its low 3 bits masked off");
            encode_extended_passthrough(*sub_tag, *value)
        }
    }
}

/// Canonical non-negative tagged encoding (small/medium/large form selection).
fn encode_tagged_nonneg(tag: u8, value: &Integer) -> Vec<u8> {
    debug_assert!(*value >= 0, "encode_tagged_nonneg requires a non-negative value");
    if let Ok(v) = u64::try_from(value) {
        if v < 16 {
            return vec![((v as u8) << 4) | tag];
        }
        if v < 2048 {
            let hhh = ((v >> 8) & 0x07) as u8;
            let lo = (v & 0xFF) as u8;
            return vec![(hhh << 5) | FORM_MEDIUM | tag, lo];
        }
    }
    emit_large(tag, large_form_bytes(tag, value))
}

/// Minimal unsigned big-endian bytes for the large form, with a leading
/// `0x00` inserted only for the Integer tag when the natural minimal bytes
/// would otherwise read as negative under the large form's sign rule
/// (§4.2.1). Non-Integer tags never sign-extend on decode, so they need no
/// such guard byte — inserting one unconditionally would make their large
/// form one byte longer than the minimal canonical length.
fn large_form_bytes(tag: u8, value: &Integer) -> Vec<u8> {
    let mut m = unsigned_minimal_be(value);
    if tag == INTEGER && m[0] & 0x80 != 0 {
        m.insert(0, 0x00);
    }
    m
}

/// Wrap minimal-form bytes `m` in the large-form starter byte (embedded size
/// or, past 8 bytes, the recursively-encoded escape size).
fn emit_large(tag: u8, m: Vec<u8>) -> Vec<u8> {
    let n = m.len();
    if n <= 8 {
        let s = (n - 2) as u8;
        let mut out = Vec::with_capacity(1 + n);
        out.push((s << 5) | FORM_LARGE | tag);
        out.extend_from_slice(&m);
        out
    } else {
        let mut out = vec![(LARGE_SIZE_ESCAPE << 5) | FORM_LARGE | tag];
        out.extend(encode_tagged_nonneg(INTEGER, &Integer::from((n - 9) as u64)));
        out.extend_from_slice(&m);
        out
    }
}

/// Canonical negative-integer encoding (§4.3.3): minimal two's-complement
/// bytes, always emitted via the Integer tag's large form. The small and
/// medium forms are unsigned by construction and are never used here even
/// when the magnitude would otherwise fit.
fn encode_negative_integer(value: &Integer) -> Vec<u8> {
    debug_assert!(*value < 0, "encode_negative_integer requires a negative value");
    emit_large(INTEGER, twos_complement_minimal_be(value))
}

/// Reproduce an unrecognized extended sub-tag's starter byte bit-for-bit.
///
/// `sub_tag` carries the original starter byte's form-selector and size bits
/// (its low 3 bits, always 7, were masked off when the term was decoded).
/// For the small, medium, and embedded-size large forms, that starter byte
/// together with `value` fully determines the original bytes, so they are
/// reproduced exactly. The escape-size large form (size field == 7) doesn't
/// retain the original recursively-encoded byte count in `Term::Extended`,
/// so a non-canonical stream that reached that form is re-emitted in the
/// ordinary canonical form for `value` instead — consistent with this
/// codec's general treatment of non-canonical input (it decodes, but does
/// not necessarily round-trip byte-for-bit).
fn encode_extended_passthrough(sub_tag: u8, value: u64) -> Vec<u8> {
    if sub_tag & FORM_BIT == 0 {
        return vec![sub_tag | EXTENDED];
    }
    if sub_tag & FORM_SELECT_MASK == FORM_MEDIUM {
        let lo = (value & 0xFF) as u8;
        return vec![sub_tag | EXTENDED, lo];
    }
    let s = (sub_tag & LARGE_SIZE_MASK) >> 5;
    if s == LARGE_SIZE_ESCAPE {
        return encode_tagged_nonneg(EXTENDED, &Integer::from(value));
    }
    let n = s as usize + 2;
    let m = unsigned_fixed_be(&Integer::from(value), n);
    let mut out = Vec::with_capacity(1 + n);
    out.push(sub_tag | EXTENDED);
    out.extend_from_slice(&m);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::decode;

    #[test]
    fn small_form_round_trips() {
        assert_eq!(encode(&Term::XReg(0)), vec![0x03]);
        assert_eq!(encode(&Term::XReg(5)), vec![0x53]);
    }

    #[test]
    fn medium_form_round_trips() {
        assert_eq!(encode(&Term::XReg(100)), vec![0x0B, 0x64]);
        assert_eq!(encode(&Term::XReg(1000)), vec![0x6B, 0xE8]);
    }

    #[test]
    fn canonical_size_boundaries() {
        for v in [0u64, 15] {
            assert_eq!(encode(&Term::Label(v)).len(), 1);
        }
        for v in [16u64, 2047] {
            assert_eq!(encode(&Term::Label(v)).len(), 2);
        }
    }

    #[test]
    fn negative_integer_boundaries_round_trip() {
        for v in [-1i64, -128, -129, -32768, -32769, i64::MIN] {
            let term = Term::Integer(Integer::from(v));
            let bytes = encode(&term);
            let (decoded, rest) = decode(&bytes).unwrap();
            assert_eq!(decoded, term);
            assert!(rest.is_empty());
        }
    }

    #[test]
    fn float_round_trips_bit_exact() {
        let term = Term::Float(3.14159);
        let bytes = encode(&term);
        let (decoded, _) = decode(&bytes).unwrap();
        assert!(decoded.bit_eq(&term));
    }

    #[test]
    fn nested_list_round_trips() {
        let term = Term::List(vec![Term::Atom(1), Term::Integer(Integer::from(2))]);
        let bytes = encode(&term);
        let (decoded, rest) = decode(&bytes).unwrap();
        assert_eq!(decoded, term);
        assert!(rest.is_empty());
    }

    #[test]
    fn typed_reg_round_trips() {
        let term = Term::TypedReg(Box::new(Term::XReg(5)), 42);
        let bytes = encode(&term);
        let (decoded, rest) = decode(&bytes).unwrap();
        assert_eq!(decoded, term);
        assert!(rest.is_empty());
    }

    #[test]
    fn unknown_extended_sub_tag_small_form_round_trips() {
        let term = Term::Extended(0xF0, 15);
        let bytes = encode(&term);
        assert_eq!(bytes, vec![0xF7]);
        let (decoded, rest) = decode(&bytes).unwrap();
        assert_eq!(decoded, term);
        assert!(rest.is_empty());
    }

    #[test]
    fn non_integer_tag_large_form_is_one_byte_shorter_than_naive_guard() {
        // Atom 65535 needs its high bit set in the natural minimal bytes,
        // but since Atom never sign-extends on decode, no guard byte is
        // inserted: large form is exactly 2 bytes (S=0, N=2), not 3.
        let bytes = encode(&Term::Atom(65535));
        assert_eq!(bytes.len(), 3); // starter byte + 2-byte payload
        let (decoded, _) = decode(&bytes).unwrap();
        assert_eq!(decoded, Term::Atom(65535));
    }
}
