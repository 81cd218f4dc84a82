//! Integer Byte Helpers
//!
//! Minimal big-endian byte conversions between arbitrary-precision integers
//! and the raw byte arrays the large form of the compact term format reads
//! and writes. Shared by both the Decoder and the Encoder so the two-sided
//! sign rule (§4.2.1/§4.3.2 of the wire format) is centralized in one place.
//!
//! Byte extraction and reconstruction are done by repeated division by 256
//! rather than bit-shifting, matching the technique used elsewhere in this
//! codebase for converting between `malachite::Integer` and raw byte arrays.

use malachite::Integer;

/// Minimal unsigned big-endian bytes of a non-negative integer. Always at
/// least one byte; zero encodes as `[0]`.
fn unsigned_be_bytes(value: &Integer) -> Vec<u8> {
    let mut little_endian = Vec::new();
    let mut v = value.clone();
    let base = Integer::from(256);
    while v > 0 {
        let remainder = &v % &base;
        let byte = u64::try_from(&remainder).unwrap_or(0) as u8;
        little_endian.push(byte);
        v = &v / &base;
    }
    little_endian.reverse();
    if little_endian.is_empty() {
        little_endian.push(0);
    }
    little_endian
}

/// Parse unsigned big-endian bytes into a non-negative [`Integer`].
pub fn from_unsigned_be(bytes: &[u8]) -> Integer {
    let mut value = Integer::from(0);
    let base = Integer::from(256);
    for &byte in bytes {
        value = value * &base + Integer::from(byte);
    }
    value
}

/// Minimal unsigned big-endian encoding of a non-negative value. This is the
/// `M` of §4.3.2 before the "keep it unambiguously non-negative" leading-zero
/// rule is applied by the caller.
pub fn unsigned_minimal_be(value: &Integer) -> Vec<u8> {
    debug_assert!(*value >= 0, "unsigned_minimal_be called on a negative value");
    unsigned_be_bytes(value)
}

/// Render a non-negative value as exactly `width` unsigned big-endian bytes,
/// left-padding with zero bytes as needed.
pub(crate) fn unsigned_fixed_be(value: &Integer, width: usize) -> Vec<u8> {
    let mut be = unsigned_be_bytes(value);
    while be.len() < width {
        be.insert(0, 0);
    }
    be
}

/// Decode `bytes` as a two's-complement big-endian signed integer.
pub fn from_twos_complement_be(bytes: &[u8]) -> Integer {
    if bytes.is_empty() {
        return Integer::from(0);
    }
    let magnitude = from_unsigned_be(bytes);
    if bytes[0] & 0x80 != 0 {
        let modulus = Integer::from(1) << (bytes.len() as u64 * 8);
        magnitude - modulus
    } else {
        magnitude
    }
}

/// Minimal two's-complement big-endian encoding of a negative integer (§4.3.3).
///
/// The large form's embedded-size byte count is structurally at least 2 (the
/// 3-bit size field encodes `N - 2` and only escapes to the recursive form at
/// `N > 8`), so small magnitudes like `-1` are rendered at a floor width of 2
/// bytes rather than the 1 byte their two's-complement value would otherwise
/// need — `-1` becomes `0xFF 0xFF`, not the bare `0xFF` that would collide
/// with the large form's minimum byte count.
pub fn twos_complement_minimal_be(value: &Integer) -> Vec<u8> {
    debug_assert!(*value < 0, "twos_complement_minimal_be called on a non-negative value");
    let magnitude = -value.clone();
    let width = unsigned_minimal_be(&magnitude).len().max(2);
    let modulus = Integer::from(1) << (width as u64 * 8);
    let rendered_value = value.clone() + &modulus;
    let mut rendered = unsigned_fixed_be(&rendered_value, width);
    if rendered[0] & 0x80 == 0 {
        rendered.insert(0, 0xFF);
    }
    rendered
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsigned_roundtrip() {
        for v in [0u64, 1, 15, 16, 255, 256, 2047, 2048, u64::MAX] {
            let n = Integer::from(v);
            let bytes = unsigned_minimal_be(&n);
            assert_eq!(from_unsigned_be(&bytes), n);
        }
    }

    #[test]
    fn unsigned_minimal_zero_is_one_byte() {
        assert_eq!(unsigned_minimal_be(&Integer::from(0)), vec![0]);
    }

    #[test]
    fn negative_minus_one_floors_to_two_bytes() {
        let bytes = twos_complement_minimal_be(&Integer::from(-1));
        assert_eq!(bytes, vec![0xFF, 0xFF]);
        assert_eq!(from_twos_complement_be(&bytes), Integer::from(-1));
    }

    #[test]
    fn negative_straddle_requires_extra_prefix_byte() {
        // -32769 doesn't fit signed 16-bit (-32768..=32767); needs a third byte.
        let n = Integer::from(-32769i64);
        let bytes = twos_complement_minimal_be(&n);
        assert_eq!(bytes.len(), 3);
        assert_eq!(bytes[0], 0xFF);
        assert_eq!(from_twos_complement_be(&bytes), n);
    }

    #[test]
    fn negative_roundtrip_boundaries() {
        for v in [-1i64, -128, -129, -32768, -32769, i64::MIN] {
            let n = Integer::from(v);
            let bytes = twos_complement_minimal_be(&n);
            assert_eq!(from_twos_complement_be(&bytes), n);
            assert!(bytes.len() >= 2);
        }
    }
}
