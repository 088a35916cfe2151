/*!
Arbitrary-width integer, boolean and character codecs.

Signed integers use a sign bit followed by a magnitude: the value itself for
non-negative numbers, or `-value - 1` with every bit inverted for negative
ones. The result is bit-for-bit identical to two's complement at the same
width.
*/

use crate::bits::BitString;
use crate::error::{BinReprError, Result};
use crate::protocol::{CHAR_NARROW_BITS, CHAR_WIDE_BITS, LOG10_2};
use num_traits::PrimInt;

/// Largest unsigned integer of `width` bits
pub fn max_uint(width: usize) -> Result<u128> {
    match width {
        0 => Ok(0),
        w if w < u128::BITS as usize => Ok((1u128 << w) - 1),
        w if w == u128::BITS as usize => Ok(u128::MAX),
        w => Err(BinReprError::overflow(w, u128::BITS as usize)),
    }
}

/// Largest signed integer of `width` bits
pub fn max_int(width: usize) -> Result<i128> {
    check_signed_width(width)?;
    Ok(max_uint(width - 1)? as i128)
}

/// Smallest signed integer of `width` bits
pub fn min_int(width: usize) -> Result<i128> {
    Ok(-max_int(width)? - 1)
}

/// Maximum number of decimal digits of an integer of `width` bits.
///
/// With `signed`, the sign bit does not count towards the magnitude.
pub fn max_digits(width: usize, signed: bool) -> usize {
    let magnitude_bits = if signed { width.saturating_sub(1) } else { width };
    (magnitude_bits as f64 * LOG10_2) as usize + 1
}

fn check_signed_width(width: usize) -> Result<()> {
    if width == 0 {
        return Err(BinReprError::below_minimum(0, 1));
    }
    if width > u128::BITS as usize {
        return Err(BinReprError::overflow(width, u128::BITS as usize));
    }
    Ok(())
}

/// Encode a non-negative integer as a zero-padded magnitude of `width` bits
pub fn encode_unsigned<T: PrimInt>(value: T, width: usize) -> Result<BitString> {
    match value.to_u128() {
        Some(magnitude) => BitString::from_u128(magnitude, width),
        // Only negative values fail to convert, and every negative primitive fits in i128
        None => Err(BinReprError::Sign(value.to_i128().unwrap_or(i128::MIN))),
    }
}

/// Decode a base-2 magnitude
pub fn decode_unsigned(bits: &BitString) -> Result<u128> {
    bits.to_u128()
}

/// Encode a signed integer as sign bit plus (possibly inverted) magnitude
pub fn encode_signed<T: PrimInt>(value: T, width: usize) -> Result<BitString> {
    if width == 0 {
        return Err(BinReprError::below_minimum(0, 1));
    }
    let unrepresentable = || BinReprError::overflow(u128::BITS as usize + 1, width);
    let negative = value < T::zero();
    let magnitude = if negative {
        let v = value.to_i128().ok_or_else(unrepresentable)?;
        (-(v + 1)) as u128
    } else {
        value.to_u128().ok_or_else(unrepresentable)?
    };
    let body = BitString::from_u128(magnitude, width - 1).map_err(|_| {
        // Report the width the value would need including its sign bit
        let required = (u128::BITS - magnitude.leading_zeros()) as usize + 1;
        BinReprError::overflow(required, width)
    })?;

    let mut bits = BitString::zeros(1);
    bits.set(0, negative);
    if negative {
        bits.append(&body.inverted());
    } else {
        bits.append(&body);
    }
    Ok(bits)
}

/// Decode a sign bit plus (possibly inverted) magnitude
pub fn decode_signed(bits: &BitString) -> Result<i128> {
    let Some(negative) = bits.get(0) else {
        return Ok(0);
    };
    let body = bits.slice(1..);
    if !negative {
        let magnitude = body.to_u128()?;
        return i128::try_from(magnitude)
            .map_err(|_| BinReprError::overflow(bits.len() - bits.leading_zeros() + 1, 128));
    }

    let inverted = body.inverted();
    let magnitude = inverted.to_u128()?;
    match i128::try_from(magnitude) {
        Ok(m) => Ok(-m - 1),
        Err(_) => Err(BinReprError::overflow(
            inverted.len() - inverted.leading_zeros() + 1,
            128,
        )),
    }
}

/// Encode a boolean in the lowest bit of a `width`-bit field
pub fn encode_bool(value: bool, width: usize) -> Result<BitString> {
    if width == 0 {
        return Err(BinReprError::below_minimum(0, 1));
    }
    BitString::from_u128(value as u128, width)
}

/// Any set bit decodes to `true`
pub fn decode_bool(bits: &BitString) -> bool {
    bits.any()
}

/// Encode a character's code point at 8 bits if it fits, else at 32 bits
pub fn encode_char(c: char) -> BitString {
    let code = c as u32;
    let width = if code < 1 << CHAR_NARROW_BITS {
        CHAR_NARROW_BITS
    } else {
        CHAR_WIDE_BITS
    };
    BitString::from_bytes(&code.to_be_bytes()).slice(CHAR_WIDE_BITS - width..)
}

/// Decode a code point back into a character
pub fn decode_char(bits: &BitString) -> Result<char> {
    let code = bits.to_u128()?;
    u32::try_from(code)
        .ok()
        .and_then(char::from_u32)
        .ok_or(BinReprError::InvalidCodePoint(code))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bits(s: &str) -> BitString {
        s.parse().unwrap()
    }

    #[test]
    fn test_integer_bounds() {
        assert_eq!(max_uint(8).unwrap(), 255);
        assert_eq!(max_int(8).unwrap(), 127);
        assert_eq!(min_int(8).unwrap(), -128);
        assert_eq!(max_uint(128).unwrap(), u128::MAX);
        assert_eq!(max_int(128).unwrap(), i128::MAX);
        assert_eq!(min_int(128).unwrap(), i128::MIN);
        assert_eq!(max_int(1).unwrap(), 0);
        assert_eq!(min_int(1).unwrap(), -1);
        assert!(max_uint(129).unwrap_err().is_width());
        assert!(max_int(0).unwrap_err().is_width());
    }

    #[test]
    fn test_max_digits() {
        assert_eq!(max_digits(8, false), 3);
        assert_eq!(max_digits(8, true), 3);
        assert_eq!(max_digits(32, false), 10);
        assert_eq!(max_digits(64, false), 20);
        assert_eq!(max_digits(64, true), 19);
    }

    #[test]
    fn test_unsigned_encoding() {
        assert_eq!(encode_unsigned(5u8, 8).unwrap(), bits("00000101"));
        assert_eq!(encode_unsigned(255, 8).unwrap(), bits("11111111"));
        assert_eq!(encode_unsigned(0, 3).unwrap(), bits("000"));
        assert_eq!(encode_unsigned(u128::MAX, 128).unwrap(), BitString::ones(128));
    }

    #[test]
    fn test_unsigned_rejects_negative() {
        assert_eq!(encode_unsigned(-1, 8).unwrap_err(), BinReprError::Sign(-1));
        assert!(encode_unsigned(i64::MIN, 64).unwrap_err().is_sign());
    }

    #[test]
    fn test_unsigned_overflow() {
        assert_eq!(
            encode_unsigned(256, 8).unwrap_err(),
            BinReprError::overflow(9, 8)
        );
    }

    #[test]
    fn test_signed_encoding_matches_twos_complement() {
        assert_eq!(encode_signed(5, 8).unwrap(), bits("00000101"));
        assert_eq!(encode_signed(-1, 8).unwrap(), bits("11111111"));
        assert_eq!(encode_signed(-128, 8).unwrap(), bits("10000000"));
        assert_eq!(encode_signed(127, 8).unwrap(), bits("01111111"));
        assert_eq!(encode_signed(-6, 4).unwrap(), bits("1010"));
        assert_eq!(encode_signed(-1, 1).unwrap(), bits("1"));
        assert_eq!(encode_signed(0, 1).unwrap(), bits("0"));

        for v in [-300i16, -2, 0, 1, 12345, i16::MIN, i16::MAX] {
            let expected = BitString::from_bytes(&v.to_be_bytes());
            assert_eq!(encode_signed(v, 16).unwrap(), expected, "{v}");
        }
    }

    #[test]
    fn test_signed_overflow() {
        assert_eq!(
            encode_signed(200, 8).unwrap_err(),
            BinReprError::overflow(9, 8)
        );
        assert!(encode_signed(-129, 8).unwrap_err().is_width());
        assert!(encode_signed(128, 8).unwrap_err().is_width());
        assert_eq!(
            encode_signed(u128::MAX, 128).unwrap_err(),
            BinReprError::overflow(129, 128)
        );
        assert!(encode_signed(0, 0).unwrap_err().is_width());
    }

    #[test]
    fn test_signed_accepts_full_u128_in_wide_fields() {
        let wide = encode_signed(u128::MAX, 200).unwrap();
        assert_eq!(wide.len(), 200);
        assert_eq!(wide.get(0), Some(false));
        assert_eq!(wide.leading_zeros(), 72);
        assert_eq!(wide.count_ones(), 128);
        assert_eq!(decode_unsigned(&wide).unwrap(), u128::MAX);

        let min = encode_signed(i128::MIN, 200).unwrap();
        assert_eq!(min.leading_zeros(), 0);
        assert_eq!(decode_signed(&min).unwrap(), i128::MIN);
    }

    #[test]
    fn test_signed_decoding() {
        assert_eq!(decode_signed(&bits("11111111")).unwrap(), -1);
        assert_eq!(decode_signed(&bits("10000000")).unwrap(), -128);
        assert_eq!(decode_signed(&bits("01111111")).unwrap(), 127);
        assert_eq!(decode_signed(&bits("1")).unwrap(), -1);
        assert_eq!(decode_signed(&BitString::default()).unwrap(), 0);
    }

    #[test]
    fn test_wide_integers() {
        let encoded = encode_signed(-3, 200).unwrap();
        assert_eq!(encoded.len(), 200);
        assert_eq!(encoded.count_ones(), 199);
        assert_eq!(decode_signed(&encoded).unwrap(), -3);

        let encoded = encode_unsigned(42u8, 300).unwrap();
        assert_eq!(decode_unsigned(&encoded).unwrap(), 42);

        let mut huge = BitString::zeros(200);
        huge.set(10, true);
        assert!(decode_unsigned(&huge).unwrap_err().is_width());
        assert!(decode_signed(&huge).unwrap_err().is_width());
    }

    #[test]
    fn test_roundtrip_at_standard_widths() {
        for width in [8usize, 16, 32, 64, 128] {
            let (lo, hi) = (min_int(width).unwrap(), max_int(width).unwrap());
            for v in [lo, lo + 1, -1, 0, 1, hi - 1, hi] {
                let encoded = encode_signed(v, width).unwrap();
                assert_eq!(encoded.len(), width);
                assert_eq!(decode_signed(&encoded).unwrap(), v);
            }

            let top = max_uint(width).unwrap();
            for v in [0, 1, top / 2, top - 1, top] {
                let encoded = encode_unsigned(v, width).unwrap();
                assert_eq!(encoded.len(), width);
                assert_eq!(decode_unsigned(&encoded).unwrap(), v);
            }
        }
    }

    #[test]
    fn test_bool_codec() {
        assert_eq!(encode_bool(true, 1).unwrap(), bits("1"));
        assert_eq!(encode_bool(false, 1).unwrap(), bits("0"));
        assert_eq!(encode_bool(true, 8).unwrap(), bits("00000001"));
        assert!(decode_bool(&bits("0010")));
        assert!(!decode_bool(&bits("0000")));
        assert!(!decode_bool(&BitString::default()));
        assert!(encode_bool(true, 0).unwrap_err().is_width());
    }

    #[test]
    fn test_char_codec() {
        assert_eq!(encode_char('A'), bits("01000001"));
        assert_eq!(encode_char('ÿ').len(), 8);
        let euro = encode_char('€');
        assert_eq!(euro.len(), 32);
        assert_eq!(euro.as_bytes(), &[0x00, 0x00, 0x20, 0xAC]);
        assert_eq!(decode_char(&euro).unwrap(), '€');
        assert_eq!(decode_char(&encode_char('A')).unwrap(), 'A');
        assert_eq!(decode_char(&encode_char('🦀')).unwrap(), '🦀');

        let surrogate = BitString::from_u128(0xD800, 32).unwrap();
        assert_eq!(
            decode_char(&surrogate).unwrap_err(),
            BinReprError::InvalidCodePoint(0xD800)
        );
    }

    mod properties {
        use super::super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn test_signed_roundtrip_i64(v in any::<i64>()) {
                let encoded = encode_signed(v, 64).unwrap();
                prop_assert_eq!(encoded.to_bytes(), v.to_be_bytes().to_vec());
                prop_assert_eq!(decode_signed(&encoded).unwrap(), v as i128);
            }

            #[test]
            fn test_signed_roundtrip_i128(v in any::<i128>()) {
                prop_assert_eq!(decode_signed(&encode_signed(v, 128).unwrap()).unwrap(), v);
            }

            #[test]
            fn test_unsigned_roundtrip_u128(v in any::<u128>()) {
                prop_assert_eq!(decode_unsigned(&encode_unsigned(v, 128).unwrap()).unwrap(), v);
            }

            #[test]
            fn test_signed_roundtrip_any_width(width in 1usize..=128, seed in any::<i128>()) {
                // Arithmetic shift keeps the value within `width` signed bits
                let v = seed >> (128 - width);
                let encoded = encode_signed(v, width).unwrap();
                prop_assert_eq!(encoded.len(), width);
                prop_assert_eq!(decode_signed(&encoded).unwrap(), v);
            }

            #[test]
            fn test_unsigned_roundtrip_any_width(width in 1usize..=128, seed in any::<u128>()) {
                let v = seed >> (128 - width);
                let encoded = encode_unsigned(v, width).unwrap();
                prop_assert_eq!(encoded.len(), width);
                prop_assert_eq!(decode_unsigned(&encoded).unwrap(), v);
            }
        }
    }
}
