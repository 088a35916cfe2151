/*!
# Binary Representations

This crate converts scalar values (booleans, characters, signed and unsigned
integers and floating-point numbers) into fixed-length bit strings and back.

Floats are not tied to the machine's 16/32/64-bit formats: any width of at
least 8 bits gets an exponent/significand split derived from a single growth
law, which reproduces the IEEE-754 layouts at the standard widths.

## Core Types

- [`BitString`] - Packed, MSB-first, fixed-length bit sequence
- [`FormatDescriptor`] - Field layout of a generalized float
- [`Scalar`] / [`ScalarKind`] - Tagged values for dispatch and batches
- [`ByteOrder`] - Explicit byte order for native conversions

## Modules

- [`bits`] - Bit string storage and text view
- [`format`] - Float format derivation
- [`integer`] - Unsigned, signed, boolean and character codecs
- [`float`] - Generalized floating-point codec
- [`fixed`] - Native 8/16/32/64-bit conversions
- [`batch`] - Parallel conversion of many values
- [`error`] - Common error types

## Example

```
use binrepr::{decode_float, encode_float, encode_signed};

let bits = encode_float(-2.0, 32).unwrap();
assert_eq!(bits.to_string(), "11000000000000000000000000000000");
assert_eq!(decode_float(&bits).unwrap(), -2.0);

assert_eq!(encode_signed(-1, 8).unwrap().to_string(), "11111111");
```
*/

pub mod batch;
pub mod bits;
pub mod error;
pub mod fixed;
pub mod float;
pub mod format;
pub mod integer;
pub mod scalar;

// Re-export commonly used types
pub use bits::BitString;
pub use error::{BinReprError, Result, WidthError};
pub use fixed::{pack, unpack, ByteOrder, NativeScalar};
pub use float::{decode_float, encode_float};
pub use format::{exponent_bits, FormatDescriptor};
pub use integer::{
    decode_bool, decode_char, decode_signed, decode_unsigned, encode_bool, encode_char,
    encode_signed, encode_unsigned, max_int, max_uint, min_int,
};
pub use scalar::{Scalar, ScalarKind};

/// Version information for the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Format constants
pub mod protocol {
    /// Smallest width a generalized float can have
    pub const MIN_FLOAT_BITS: usize = 8;

    /// Starting point of the exponent growth law
    pub const REFERENCE_WIDTH: usize = 8;

    /// Exponent bits at the reference width
    pub const REFERENCE_EXPONENT_BITS: usize = 3;

    /// Widest exponent field whose arithmetic fits in an i64
    pub const MAX_EXPONENT_BITS: usize = 62;

    /// Width of characters whose code point is below 256
    pub const CHAR_NARROW_BITS: usize = 8;

    /// Width of all other characters
    pub const CHAR_WIDE_BITS: usize = 32;

    /// Widths with a native fixed-size representation
    pub const NATIVE_WIDTHS: [usize; 4] = [8, 16, 32, 64];

    pub const LOG10_2: f64 = std::f64::consts::LOG10_2;
}
