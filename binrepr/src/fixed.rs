/*!
Native fixed-width conversions for 8, 16, 32 and 64 bit values.

These bypass the generalized codecs and use the platform's own byte
conversions (`to_be_bytes` and friends). The byte order is always passed
explicitly. With [`ByteOrder::BigEndian`] the output is bit-for-bit the
same as [`crate::integer`] and [`crate::float`] produce at the same width.
*/

use crate::bits::BitString;
use crate::error::{BinReprError, Result};
use crate::integer::{encode_signed, encode_unsigned};
use crate::scalar::{Scalar, ScalarKind};
use half::f16;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Byte order of a native fixed-width conversion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ByteOrder {
    /// Most significant byte first (also network order)
    #[default]
    BigEndian,
    LittleEndian,
    /// Whatever the host uses
    Native,
}

impl ByteOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BigEndian => "big-endian",
            Self::LittleEndian => "little-endian",
            Self::Native => "native",
        }
    }
}

impl fmt::Display for ByteOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ByteOrder {
    type Err = BinReprError;

    /// Parse a byte order name (case-insensitive)
    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "big-endian" | "big" | "be" | "network" => Ok(Self::BigEndian),
            "little-endian" | "little" | "le" => Ok(Self::LittleEndian),
            "native" => Ok(Self::Native),
            _ => Err(BinReprError::InvalidByteOrder(s.to_string())),
        }
    }
}

/// A value with a native fixed-size byte representation
pub trait NativeScalar: Sized + Copy {
    /// Width of the representation in bits
    const BITS: usize;

    fn to_ordered_bytes(self, order: ByteOrder) -> Vec<u8>;

    /// `None` unless `bytes` has exactly `BITS / 8` bytes
    fn from_ordered_bytes(bytes: &[u8], order: ByteOrder) -> Option<Self>;
}

macro_rules! native_scalar {
    ($($t:ty),* $(,)?) => {$(
        impl NativeScalar for $t {
            const BITS: usize = std::mem::size_of::<$t>() * 8;

            fn to_ordered_bytes(self, order: ByteOrder) -> Vec<u8> {
                match order {
                    ByteOrder::BigEndian => self.to_be_bytes().to_vec(),
                    ByteOrder::LittleEndian => self.to_le_bytes().to_vec(),
                    ByteOrder::Native => self.to_ne_bytes().to_vec(),
                }
            }

            fn from_ordered_bytes(bytes: &[u8], order: ByteOrder) -> Option<Self> {
                let array: [u8; std::mem::size_of::<$t>()] = bytes.try_into().ok()?;
                Some(match order {
                    ByteOrder::BigEndian => <$t>::from_be_bytes(array),
                    ByteOrder::LittleEndian => <$t>::from_le_bytes(array),
                    ByteOrder::Native => <$t>::from_ne_bytes(array),
                })
            }
        }
    )*};
}

native_scalar!(i8, u8, i16, u16, i32, u32, i64, u64, f16, f32, f64);

impl NativeScalar for bool {
    const BITS: usize = 8;

    fn to_ordered_bytes(self, _order: ByteOrder) -> Vec<u8> {
        vec![self as u8]
    }

    fn from_ordered_bytes(bytes: &[u8], _order: ByteOrder) -> Option<Self> {
        match bytes {
            [byte] => Some(*byte != 0),
            _ => None,
        }
    }
}

/// Render a value's native bytes MSB first, byte by byte
pub fn pack<T: NativeScalar>(value: T, order: ByteOrder) -> BitString {
    BitString::from_bytes(&value.to_ordered_bytes(order))
}

/// Read a value back from its native bit representation
pub fn unpack<T: NativeScalar>(bits: &BitString, order: ByteOrder) -> Result<T> {
    if bits.len() != T::BITS {
        return Err(BinReprError::length_mismatch(T::BITS, bits.len()));
    }
    T::from_ordered_bytes(bits.as_bytes(), order)
        .ok_or_else(|| BinReprError::length_mismatch(T::BITS, bits.len()))
}

/// The 8-bit pad byte
pub fn pad_byte() -> BitString {
    BitString::zeros(8)
}

/// A raw byte as 8 bits
pub fn pack_byte(byte: u8) -> BitString {
    BitString::from_bytes(&[byte])
}

/// Narrow an already range-checked integer to its native type
fn narrow<S, T: TryFrom<S>>(value: S, width: usize) -> Result<T> {
    T::try_from(value).map_err(|_| BinReprError::overflow(width + 1, width))
}

/// Pack a tagged value natively at one of the standard widths.
///
/// Integers are range-checked with the generalized codec first, so the
/// errors match [`crate::integer`]. Floats are narrowed with the host's
/// round-to-nearest-even conversion.
pub fn pack_scalar(value: &Scalar, width: usize, order: ByteOrder) -> Result<BitString> {
    let kind = value.kind().as_str();
    match (*value, width) {
        (Scalar::Bool(b), 8) => Ok(pack(b, order)),
        (Scalar::Char(c), 8) => {
            let code = narrow::<u32, u8>(c as u32, width)?;
            Ok(pack_byte(code))
        }
        (Scalar::Unsigned(u), 8 | 16 | 32 | 64) => {
            encode_unsigned(u, width)?;
            Ok(match width {
                8 => pack(narrow::<_, u8>(u, width)?, order),
                16 => pack(narrow::<_, u16>(u, width)?, order),
                32 => pack(narrow::<_, u32>(u, width)?, order),
                _ => pack(narrow::<_, u64>(u, width)?, order),
            })
        }
        (Scalar::Signed(i), 8 | 16 | 32 | 64) => {
            encode_signed(i, width)?;
            Ok(match width {
                8 => pack(narrow::<_, i8>(i, width)?, order),
                16 => pack(narrow::<_, i16>(i, width)?, order),
                32 => pack(narrow::<_, i32>(i, width)?, order),
                _ => pack(narrow::<_, i64>(i, width)?, order),
            })
        }
        (Scalar::Float(f), 16) => Ok(pack(f16::from_f64(f), order)),
        (Scalar::Float(f), 32) => Ok(pack(f as f32, order)),
        (Scalar::Float(f), 64) => Ok(pack(f, order)),
        _ => Err(BinReprError::not_native(kind, width)),
    }
}

/// Unpack a native representation; the width is the length of `bits`
pub fn unpack_scalar(kind: ScalarKind, bits: &BitString, order: ByteOrder) -> Result<Scalar> {
    Ok(match (kind, bits.len()) {
        (ScalarKind::Bool, 8) => Scalar::Bool(unpack(bits, order)?),
        (ScalarKind::Char, 8) => Scalar::Char(char::from(unpack::<u8>(bits, order)?)),
        (ScalarKind::Unsigned, 8) => Scalar::Unsigned(unpack::<u8>(bits, order)?.into()),
        (ScalarKind::Unsigned, 16) => Scalar::Unsigned(unpack::<u16>(bits, order)?.into()),
        (ScalarKind::Unsigned, 32) => Scalar::Unsigned(unpack::<u32>(bits, order)?.into()),
        (ScalarKind::Unsigned, 64) => Scalar::Unsigned(unpack::<u64>(bits, order)?.into()),
        (ScalarKind::Signed, 8) => Scalar::Signed(unpack::<i8>(bits, order)?.into()),
        (ScalarKind::Signed, 16) => Scalar::Signed(unpack::<i16>(bits, order)?.into()),
        (ScalarKind::Signed, 32) => Scalar::Signed(unpack::<i32>(bits, order)?.into()),
        (ScalarKind::Signed, 64) => Scalar::Signed(unpack::<i64>(bits, order)?.into()),
        (ScalarKind::Float, 16) => Scalar::Float(unpack::<f16>(bits, order)?.to_f64()),
        (ScalarKind::Float, 32) => Scalar::Float(unpack::<f32>(bits, order)?.into()),
        (ScalarKind::Float, 64) => Scalar::Float(unpack::<f64>(bits, order)?),
        (kind, width) => return Err(BinReprError::not_native(kind.as_str(), width)),
    })
}
