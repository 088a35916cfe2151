/*!
Generalized-width floating-point codec.

Values are laid out as `sign | exponent | mantissa` using the field widths
from [`FormatDescriptor`]. Normal numbers carry an implicit leading one;
an all-zero exponent field marks subnormals and an all-ones exponent field
marks infinity (zero mantissa) or NaN (any other mantissa).

Rounding adds half of a normal-precision mantissa step, then truncates to
the available mantissa bits. Three things set this apart from IEEE-754
round-to-nearest-even:

- ties round away from zero instead of to even;
- a carry out of the mantissa is dropped, so values just below a power of
  two keep the all-ones mantissa of the smaller exponent (1.9999 at 16 bits
  encodes as 1.9990234375, not 2.0);
- subnormals are truncated, since the half step is sized for the full
  mantissa rather than the reduced subnormal precision.
*/

use crate::bits::BitString;
use crate::error::{BinReprError, Result};
use crate::format::{pow2, FormatDescriptor};
use num_traits::Float;
use tracing::debug;

/// Encode `value` as a float of `total_bits` bits
pub fn encode_float<F: Float>(value: F, total_bits: usize) -> Result<BitString> {
    let format = FormatDescriptor::derive(total_bits)?;
    // Every primitive float widens to f64 losslessly
    let value = value.to_f64().unwrap_or(f64::NAN);
    encode_with(&format, value)
}

/// Decode a float whose width is the length of `bits`
pub fn decode_float(bits: &BitString) -> Result<f64> {
    let format = FormatDescriptor::derive(bits.len())?;
    decode_with(&format, bits)
}

/// Encode `value` using an already derived format
pub fn encode_with(format: &FormatDescriptor, value: f64) -> Result<BitString> {
    let exponent_bits = format.exponent_bits;
    let mantissa_bits = format.significand_bits;

    if value.is_nan() {
        let mut bits = BitString::ones(format.total_bits);
        bits.set(0, false);
        return Ok(bits);
    }
    if value == 0.0 {
        return Ok(BitString::zeros(format.total_bits));
    }

    let negative = value < 0.0;
    let mut f = value.abs();
    let field_max = format.exponent_field_max();

    // Biased exponent; normalization brings f into [1, 2)
    let mut exponent = if f.is_infinite() {
        field_max
    } else {
        let mut exponent = format.bias;
        while f < 1.0 {
            f *= 2.0;
            exponent -= 1;
        }
        while f >= 2.0 {
            f *= 0.5;
            exponent += 1;
        }
        exponent
    };

    let mut bits = BitString::zeros(1);
    bits.set(0, negative);

    if exponent >= field_max {
        if value.is_finite() {
            debug!(value, total_bits = format.total_bits, "saturating to infinity");
        }
        bits.append(&BitString::ones(exponent_bits));
        bits.append(&BitString::zeros(mantissa_bits));
        return Ok(bits);
    }

    let mut mantissa = BitString::default();
    let mut precision = mantissa_bits as i64;
    if exponent <= 0 {
        // Subnormal: the leading one becomes explicit and precision shrinks
        precision += exponent - 1;
        exponent = 0;
        if precision >= 0 {
            mantissa.push(true);
        }
    }

    // Drop the leading one and add half a step to round
    f += pow2(-(mantissa_bits as i64) - 1) - 1.0;
    for _ in 0..precision.max(0) {
        f *= 2.0;
        if f >= 1.0 {
            f -= 1.0;
            mantissa.push(true);
        } else {
            mantissa.push(false);
        }
    }

    // The exponent is within [0, field_max) here
    bits.append(&BitString::from_u128(exponent as u128, exponent_bits)?);
    bits.append(&left_pad(&mantissa, mantissa_bits));
    Ok(bits)
}

/// Decode `bits` using an already derived format.
///
/// Fails with a length mismatch unless `bits` is exactly `format.total_bits` long.
pub fn decode_with(format: &FormatDescriptor, bits: &BitString) -> Result<f64> {
    if bits.len() != format.total_bits {
        return Err(BinReprError::length_mismatch(format.total_bits, bits.len()));
    }
    let exponent_field = bits.slice(1..=format.exponent_bits);
    let mantissa = bits.slice(format.exponent_bits + 1..);

    let magnitude = if exponent_field.all() {
        if mantissa.any() {
            f64::NAN
        } else {
            f64::INFINITY
        }
    } else {
        // The exponent field is at most 62 bits wide
        let field = exponent_field.to_u128()? as i64;
        let mut step = pow2(field - format.bias);
        let mut f = if field > 0 {
            step
        } else {
            // Subnormal: no implicit one, exponent pinned at 1 - bias
            step *= 2.0;
            0.0
        };
        for bit in mantissa.iter() {
            step *= 0.5;
            if bit {
                f += step;
            }
        }
        f
    };

    if bits.get(0) == Some(true) {
        Ok(-magnitude)
    } else {
        Ok(magnitude)
    }
}

fn left_pad(bits: &BitString, width: usize) -> BitString {
    let mut padded = BitString::zeros(width.saturating_sub(bits.len()));
    padded.append(bits);
    padded
}
