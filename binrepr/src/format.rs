/*!
Generalized floating-point format derivation.

Given only a total bit width, [`FormatDescriptor::derive`] works out how many
bits go to the exponent and to the significand, the exponent bias and the
exponent range. At 16, 32, 64 and 128 bits this reproduces the IEEE-754
half, single, double and quadruple layouts; every other width (24, 40,
256, ...) follows the same growth law.
*/

use crate::error::{BinReprError, Result};
use crate::protocol::{
    LOG10_2, MAX_EXPONENT_BITS, MIN_FLOAT_BITS, REFERENCE_EXPONENT_BITS, REFERENCE_WIDTH,
};
use serde::{Deserialize, Serialize};
use tracing::trace;

/// Number of exponent bits for a float of `total_bits` bits.
///
/// Starting from 3 exponent bits at 8 bits, the reference width doubles
/// until it reaches `total_bits`. Each doubling adds the current increment
/// (initially 2) to the exponent width, and the increment itself grows by one
/// after it has been applied as many times as its own value minus one. This
/// yields 3, 5, 8, 11, 15, 19, 23, 28, ... at 8, 16, 32, 64, 128, 256, 512,
/// 1024 bits.
pub fn exponent_bits(total_bits: usize) -> Result<usize> {
    if total_bits < MIN_FLOAT_BITS {
        return Err(BinReprError::below_minimum(total_bits, MIN_FLOAT_BITS));
    }

    let mut reference = REFERENCE_WIDTH;
    let mut exponent = REFERENCE_EXPONENT_BITS;
    let mut increment = 2;
    let mut steps = 1;
    while reference < total_bits {
        reference = reference.saturating_mul(2);
        exponent += increment;
        steps += 1;
        if steps == increment {
            increment += 1;
            steps = 1;
        }
    }
    Ok(exponent)
}

/// Field layout and exponent range of a floating-point format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FormatDescriptor {
    /// Total width including the sign bit
    pub total_bits: usize,
    /// Width of the biased exponent field
    pub exponent_bits: usize,
    /// Width of the stored mantissa field (implicit bit excluded)
    pub significand_bits: usize,
    pub bias: i64,
    /// Largest unbiased exponent of a finite value
    pub max_exponent: i64,
    /// Smallest unbiased exponent of a normal value
    pub min_exponent_normal: i64,
    /// Exponent of the smallest subnormal value
    pub min_exponent_subnormal: i64,
}

impl FormatDescriptor {
    /// Derive the format for a float of `total_bits` bits
    pub fn derive(total_bits: usize) -> Result<Self> {
        let exponent_bits = exponent_bits(total_bits)?;
        // Exponent arithmetic is carried out in i64
        if exponent_bits > MAX_EXPONENT_BITS {
            return Err(BinReprError::overflow(exponent_bits, MAX_EXPONENT_BITS));
        }
        let significand_bits = total_bits - exponent_bits - 1;

        // Largest signed integer of `exponent_bits` bits
        let bias = (1i64 << (exponent_bits - 1)) - 1;
        let min_exponent_normal = 1 - bias;

        let descriptor = Self {
            total_bits,
            exponent_bits,
            significand_bits,
            bias,
            max_exponent: bias,
            min_exponent_normal,
            min_exponent_subnormal: min_exponent_normal - significand_bits as i64,
        };
        trace!(?descriptor, "derived float format");
        Ok(descriptor)
    }

    /// Significand width including the implicit leading bit
    pub fn precision(&self) -> usize {
        self.significand_bits + 1
    }

    /// Value of an all-ones exponent field (reserved for infinity and NaN)
    pub fn exponent_field_max(&self) -> i64 {
        (1i64 << self.exponent_bits) - 1
    }

    /// Smallest exponent, optionally reaching into the subnormal range
    pub fn min_exponent(&self, subnormal: bool) -> i64 {
        if subnormal {
            self.min_exponent_subnormal
        } else {
            self.min_exponent_normal
        }
    }

    /// Decimal digits carried by the significand
    pub fn significand_digits(&self) -> f64 {
        self.precision() as f64 * LOG10_2
    }

    /// Maximum number of decimal digits of a base-10 exponent
    pub fn max_exponent_digits(&self) -> usize {
        ((-self.min_exponent_subnormal) as f64 * LOG10_2).log10() as usize + 1
    }

    /// Largest finite value, saturating to infinity beyond `f64` range
    pub fn max_float(&self) -> f64 {
        (2.0 - pow2(-(self.significand_bits as i64))) * pow2(self.max_exponent)
    }

    /// Smallest positive value, normal or subnormal
    pub fn min_float(&self, subnormal: bool) -> f64 {
        pow2(self.min_exponent(subnormal))
    }
}

/// Exact `2^exponent` as an `f64`, flushing to zero or infinity out of range
pub(crate) fn pow2(exponent: i64) -> f64 {
    const MANTISSA_BITS: i64 = f64::MANTISSA_DIGITS as i64 - 1;
    const MAX_EXP: i64 = f64::MAX_EXP as i64 - 1;
    const MIN_NORMAL_EXP: i64 = f64::MIN_EXP as i64 - 1;

    if exponent > MAX_EXP {
        f64::INFINITY
    } else if exponent >= MIN_NORMAL_EXP {
        f64::from_bits(((exponent + MAX_EXP) as u64) << MANTISSA_BITS)
    } else if exponent >= MIN_NORMAL_EXP - MANTISSA_BITS {
        f64::from_bits(1u64 << (exponent - MIN_NORMAL_EXP + MANTISSA_BITS))
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ieee_exponent_widths() {
        assert_eq!(exponent_bits(8).unwrap(), 3);
        assert_eq!(exponent_bits(16).unwrap(), 5);
        assert_eq!(exponent_bits(32).unwrap(), 8);
        assert_eq!(exponent_bits(64).unwrap(), 11);
        assert_eq!(exponent_bits(128).unwrap(), 15);
        assert_eq!(exponent_bits(256).unwrap(), 19);
    }

    #[test]
    fn test_growth_law_extrapolation() {
        assert_eq!(exponent_bits(512).unwrap(), 23);
        assert_eq!(exponent_bits(1024).unwrap(), 28);
        assert_eq!(exponent_bits(2048).unwrap(), 33);
        // Odd widths take the exponent width of the next power of two
        assert_eq!(exponent_bits(9).unwrap(), 5);
        assert_eq!(exponent_bits(24).unwrap(), 8);
        assert_eq!(exponent_bits(33).unwrap(), 11);
    }

    #[test]
    fn test_minimum_width() {
        assert_eq!(
            exponent_bits(7).unwrap_err(),
            BinReprError::below_minimum(7, 8)
        );
        assert!(FormatDescriptor::derive(0).unwrap_err().is_width());
        assert_eq!(
            FormatDescriptor::derive(1 << 20).unwrap_err(),
            BinReprError::overflow(87, 62)
        );
    }

    #[test]
    fn test_single_precision_layout() {
        let f = FormatDescriptor::derive(32).unwrap();
        assert_eq!(f.exponent_bits, 8);
        assert_eq!(f.significand_bits, 23);
        assert_eq!(f.precision(), 24);
        assert_eq!(f.bias, 127);
        assert_eq!(f.max_exponent, 127);
        assert_eq!(f.min_exponent_normal, -126);
        assert_eq!(f.min_exponent_subnormal, -149);
        assert_eq!(f.exponent_field_max(), 255);
    }

    #[test]
    fn test_descriptor_invariants() {
        for total in [8, 12, 16, 24, 32, 40, 64, 80, 128, 256, 1000] {
            let f = FormatDescriptor::derive(total).unwrap();
            assert_eq!(f.exponent_bits + f.significand_bits + 1, total);
            assert_eq!(f.bias, f.max_exponent);
            assert_eq!(f.bias, (1 << (f.exponent_bits - 1)) - 1);
            assert_eq!(f.min_exponent_normal, 1 - f.bias);
            assert_eq!(
                f.min_exponent_subnormal,
                f.min_exponent_normal - (f.precision() as i64 - 1)
            );
        }
    }

    #[test]
    fn test_value_range() {
        let single = FormatDescriptor::derive(32).unwrap();
        assert_eq!(single.max_float(), f32::MAX as f64);
        assert_eq!(single.min_float(false), f32::MIN_POSITIVE as f64);
        assert_eq!(single.min_float(true), 2f64.powi(-149));

        let double = FormatDescriptor::derive(64).unwrap();
        assert_eq!(double.max_float(), f64::MAX);
        assert_eq!(double.min_float(false), f64::MIN_POSITIVE);
        assert_eq!(double.min_float(true), f64::from_bits(1));

        let half = FormatDescriptor::derive(16).unwrap();
        assert_eq!(half.max_float(), 65504.0);

        let quad = FormatDescriptor::derive(128).unwrap();
        assert!(quad.max_float().is_infinite());
        assert_eq!(quad.min_float(true), 0.0);
    }

    #[test]
    fn test_digit_counts() {
        let double = FormatDescriptor::derive(64).unwrap();
        assert!((double.significand_digits() - 15.95).abs() < 0.01);
        assert_eq!(double.max_exponent_digits(), 3);

        let single = FormatDescriptor::derive(32).unwrap();
        assert_eq!(single.max_exponent_digits(), 2);
    }

    #[test]
    fn test_pow2_is_exact() {
        assert_eq!(pow2(0), 1.0);
        assert_eq!(pow2(10), 1024.0);
        assert_eq!(pow2(-1), 0.5);
        assert_eq!(pow2(1023), 2f64.powi(1023));
        assert_eq!(pow2(-1022), f64::MIN_POSITIVE);
        assert_eq!(pow2(-1074), f64::from_bits(1));
        assert_eq!(pow2(-1075), 0.0);
        assert_eq!(pow2(1024), f64::INFINITY);
    }
}
