/*!
Parsing of command-line values and dispatch to the library codecs.
*/

use anyhow::{bail, Context, Result};
use binrepr::fixed::{pack_scalar, unpack_scalar};
use binrepr::{BinReprError, BitString, ByteOrder, FormatDescriptor, Scalar, ScalarKind};
use serde::Serialize;

/// Parse a scalar kind name for clap
pub fn parse_kind(s: &str) -> std::result::Result<ScalarKind, String> {
    ScalarKind::from_name(s)
        .ok_or_else(|| format!("unknown kind '{}' (expected bool, char, uint, int or float)", s))
}

/// Parse the textual form of a value of `kind`
pub fn parse_value(kind: ScalarKind, text: &str) -> Result<Scalar> {
    let text = text.trim();
    let value = match kind {
        ScalarKind::Bool => match text.to_lowercase().as_str() {
            "true" | "1" | "yes" => Scalar::Bool(true),
            "false" | "0" | "no" => Scalar::Bool(false),
            _ => bail!("expected a boolean, got '{}'", text),
        },
        ScalarKind::Char => {
            let mut chars = text.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Scalar::Char(c),
                _ => bail!("expected a single character, got '{}'", text),
            }
        }
        ScalarKind::Unsigned => {
            if let Ok(v) = text.parse::<i128>() {
                if v < 0 {
                    return Err(BinReprError::Sign(v).into());
                }
            }
            let v = text
                .parse::<u128>()
                .with_context(|| format!("expected an unsigned integer, got '{}'", text))?;
            Scalar::Unsigned(v)
        }
        ScalarKind::Signed => {
            let v = text
                .parse::<i128>()
                .with_context(|| format!("expected a signed integer, got '{}'", text))?;
            Scalar::Signed(v)
        }
        ScalarKind::Float => {
            let v = text
                .parse::<f64>()
                .with_context(|| format!("expected a floating-point number, got '{}'", text))?;
            Scalar::Float(v)
        }
    };
    Ok(value)
}

/// Encode with the generalized codecs, or natively when a byte order is given
pub fn encode(value: &Scalar, width: usize, native: Option<ByteOrder>) -> binrepr::Result<BitString> {
    match native {
        Some(order) => pack_scalar(value, width, order),
        None => value.encode(width),
    }
}

/// Decode with the generalized codecs, or natively when a byte order is given
pub fn decode(kind: ScalarKind, bits: &BitString, native: Option<ByteOrder>) -> binrepr::Result<Scalar> {
    match native {
        Some(order) => unpack_scalar(kind, bits, order),
        None => kind.decode(bits),
    }
}

/// One conversion, as reported by `--json`
#[derive(Debug, Serialize)]
pub struct Conversion {
    pub kind: ScalarKind,
    pub value: Scalar,
    pub width: usize,
    pub bits: BitString,
    pub hex: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub byte_order: Option<ByteOrder>,
}

impl Conversion {
    pub fn new(value: Scalar, bits: BitString, native: Option<ByteOrder>) -> Self {
        Self {
            kind: value.kind(),
            value,
            width: bits.len(),
            hex: hex::encode(bits.as_bytes()),
            bits,
            byte_order: native,
        }
    }
}

/// Format layout summary, as printed by the `layout` command
#[derive(Debug, Serialize)]
pub struct Layout {
    #[serde(flatten)]
    pub format: FormatDescriptor,
    pub precision: usize,
    pub max_float: f64,
    pub min_float_normal: f64,
    pub min_float_subnormal: f64,
    pub significand_digits: f64,
    pub max_exponent_digits: usize,
}

impl Layout {
    pub fn derive(width: usize) -> binrepr::Result<Self> {
        let format = FormatDescriptor::derive(width)?;
        Ok(Self {
            precision: format.precision(),
            max_float: format.max_float(),
            min_float_normal: format.min_float(false),
            min_float_subnormal: format.min_float(true),
            significand_digits: format.significand_digits(),
            max_exponent_digits: format.max_exponent_digits(),
            format,
        })
    }
}
