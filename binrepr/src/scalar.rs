/*!
Tagged scalar values and dispatch to the matching codec.
*/

use crate::bits::BitString;
use crate::error::Result;
use crate::{float, integer};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The kinds of value that have a binary representation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScalarKind {
    Bool,
    Char,
    #[serde(rename = "uint")]
    Unsigned,
    #[serde(rename = "int")]
    Signed,
    Float,
}

impl ScalarKind {
    /// Parse scalar kind from string (case-insensitive)
    pub fn from_name(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "bool" | "boolean" => Some(Self::Bool),
            "char" | "character" => Some(Self::Char),
            "uint" | "unsigned" => Some(Self::Unsigned),
            "int" | "signed" => Some(Self::Signed),
            "float" => Some(Self::Float),
            _ => None,
        }
    }

    /// Convert to string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::Char => "char",
            Self::Unsigned => "uint",
            Self::Signed => "int",
            Self::Float => "float",
        }
    }

    /// Decode `bits` as a value of this kind
    pub fn decode(&self, bits: &BitString) -> Result<Scalar> {
        Ok(match self {
            Self::Bool => Scalar::Bool(integer::decode_bool(bits)),
            Self::Char => Scalar::Char(integer::decode_char(bits)?),
            Self::Unsigned => Scalar::Unsigned(integer::decode_unsigned(bits)?),
            Self::Signed => Scalar::Signed(integer::decode_signed(bits)?),
            Self::Float => Scalar::Float(float::decode_float(bits)?),
        })
    }
}

impl fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single value to be converted
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum Scalar {
    Bool(bool),
    Char(char),
    #[serde(rename = "uint")]
    Unsigned(u128),
    #[serde(rename = "int")]
    Signed(i128),
    Float(f64),
}

impl Scalar {
    pub fn kind(&self) -> ScalarKind {
        match self {
            Self::Bool(_) => ScalarKind::Bool,
            Self::Char(_) => ScalarKind::Char,
            Self::Unsigned(_) => ScalarKind::Unsigned,
            Self::Signed(_) => ScalarKind::Signed,
            Self::Float(_) => ScalarKind::Float,
        }
    }

    /// Encode at `width` bits.
    ///
    /// Characters pick their own width (8 or 32 bits) and ignore `width`.
    pub fn encode(&self, width: usize) -> Result<BitString> {
        match *self {
            Self::Bool(b) => integer::encode_bool(b, width),
            Self::Char(c) => Ok(integer::encode_char(c)),
            Self::Unsigned(u) => integer::encode_unsigned(u, width),
            Self::Signed(i) => integer::encode_signed(i, width),
            Self::Float(f) => float::encode_float(f, width),
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{}", b),
            Self::Char(c) => write!(f, "{:?}", c),
            Self::Unsigned(u) => write!(f, "{}", u),
            Self::Signed(i) => write!(f, "{}", i),
            Self::Float(x) => write!(f, "{:e}", x),
        }
    }
}
