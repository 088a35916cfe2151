/*!
Packed, fixed-length, MSB-first bit strings.

[`BitString`] is the canonical intermediate representation produced and
consumed by every codec in this crate. Storage is a `BitVec<u8, Msb0>`, so
bit 0 is the most significant bit of the first byte. The textual `0`/`1`
form only exists at the presentation boundary (`Display`, `FromStr` and
serde).
*/

use crate::error::{BinReprError, Result};
use bitvec::prelude::*;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::ops::{Bound, RangeBounds};
use std::str::FromStr;

/// A fixed-length sequence of bits, most significant bit first
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct BitString {
    bits: BitVec<u8, Msb0>,
}

impl BitString {
    /// Wrap a bit vector, starting it on a byte boundary with zeroed pad bits
    fn from_bitvec(mut bits: BitVec<u8, Msb0>) -> Self {
        bits.force_align();
        bits.set_uninitialized(false);
        Self { bits }
    }

    /// Create a bit string of `len` zero bits
    pub fn zeros(len: usize) -> Self {
        Self::from_bitvec(BitVec::repeat(false, len))
    }

    /// Create a bit string of `len` one bits
    pub fn ones(len: usize) -> Self {
        Self::from_bitvec(BitVec::repeat(true, len))
    }

    /// Create a bit string from whole bytes, MSB first, byte by byte
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self::from_bitvec(BitVec::from_slice(bytes))
    }

    /// Encode `value` as a zero-padded magnitude of exactly `width` bits
    pub fn from_u128(value: u128, width: usize) -> Result<Self> {
        let required = (u128::BITS - value.leading_zeros()) as usize;
        if required > width {
            return Err(BinReprError::overflow(required, width));
        }

        let mut bits = BitVec::<u8, Msb0>::repeat(false, width - required);
        bits.extend((0..required).rev().map(|k| (value >> k) & 1 == 1));
        Ok(Self::from_bitvec(bits))
    }

    /// Number of bits
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    /// True if the bit string holds no bits
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// Get the bit at `index`, or `None` past the end
    pub fn get(&self, index: usize) -> Option<bool> {
        self.bits.get(index).map(|bit| *bit)
    }

    /// Set the bit at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    pub fn set(&mut self, index: usize, value: bool) {
        self.bits.set(index, value);
    }

    /// Append a bit at the least significant end
    pub fn push(&mut self, value: bool) {
        self.bits.push(value);
    }

    /// Append all bits of `other`
    pub fn append(&mut self, other: &BitString) {
        self.bits.extend_from_bitslice(&other.bits);
        self.bits.set_uninitialized(false);
    }

    /// Concatenate two bit strings into a new one
    pub fn concat(&self, other: &BitString) -> BitString {
        let mut joined = self.clone();
        joined.append(other);
        joined
    }

    /// Iterate over the bits, MSB first
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = bool> + ExactSizeIterator + '_ {
        self.bits.iter().by_vals()
    }

    /// Copy out the bits within `range`.
    ///
    /// # Panics
    ///
    /// Panics if the range is out of bounds or reversed.
    pub fn slice<R: RangeBounds<usize>>(&self, range: R) -> BitString {
        let start = match range.start_bound() {
            Bound::Included(&s) => s,
            Bound::Excluded(&s) => s + 1,
            Bound::Unbounded => 0,
        };
        let end = match range.end_bound() {
            Bound::Included(&e) => e + 1,
            Bound::Excluded(&e) => e,
            Bound::Unbounded => self.len(),
        };
        assert!(
            start <= end && end <= self.len(),
            "bit range {}..{} out of range for length {}",
            start,
            end,
            self.len()
        );
        Self::from_bitvec(self.bits[start..end].to_bitvec())
    }

    /// Return a copy with every bit flipped
    pub fn inverted(&self) -> BitString {
        Self::from_bitvec(!self.bits.clone())
    }

    /// Number of one bits
    pub fn count_ones(&self) -> usize {
        self.bits.count_ones()
    }

    /// Number of zero bits before the first one bit
    pub fn leading_zeros(&self) -> usize {
        self.bits.leading_zeros()
    }

    /// True if at least one bit is set
    pub fn any(&self) -> bool {
        self.bits.any()
    }

    /// True if every bit is set (vacuously true when empty)
    pub fn all(&self) -> bool {
        self.bits.all()
    }

    /// The packed bytes, left aligned; trailing pad bits are zero
    pub fn as_bytes(&self) -> &[u8] {
        self.bits.as_raw_slice()
    }

    /// Copy of the packed bytes, left aligned
    pub fn to_bytes(&self) -> Vec<u8> {
        self.as_bytes().to_vec()
    }

    /// Interpret the bits as a base-2 magnitude.
    ///
    /// Leading zeros are ignored, so strings longer than 128 bits decode as
    /// long as their magnitude fits.
    pub fn to_u128(&self) -> Result<u128> {
        let significant = self.len() - self.leading_zeros();
        if significant > u128::BITS as usize {
            return Err(BinReprError::overflow(significant, u128::BITS as usize));
        }
        Ok(self.bits[self.len() - significant..]
            .iter()
            .by_vals()
            .fold(0u128, |acc, bit| (acc << 1) | bit as u128))
    }
}

impl FromIterator<bool> for BitString {
    fn from_iter<I: IntoIterator<Item = bool>>(iter: I) -> Self {
        Self::from_bitvec(iter.into_iter().collect())
    }
}

impl Extend<bool> for BitString {
    fn extend<I: IntoIterator<Item = bool>>(&mut self, iter: I) {
        self.bits.extend(iter);
        self.bits.set_uninitialized(false);
    }
}

impl fmt::Display for BitString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text: String = self.iter().map(|bit| if bit { '1' } else { '0' }).collect();
        f.pad(&text)
    }
}

impl FromStr for BitString {
    type Err = BinReprError;

    fn from_str(s: &str) -> Result<Self> {
        s.chars()
            .enumerate()
            .map(|(position, c)| match c {
                '0' => Ok(false),
                '1' => Ok(true),
                found => Err(BinReprError::InvalidDigit { position, found }),
            })
            .collect()
    }
}

impl Serialize for BitString {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for BitString {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}
