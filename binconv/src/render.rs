/*!
Terminal rendering of bit strings with their fields highlighted.

Floats are split into sign (blue), exponent (green) and mantissa (red);
signed integers into sign (blue) and magnitude (red). Field boundaries come
from [`binrepr::exponent_bits`], the same growth law the codec uses.
*/

use binrepr::{exponent_bits, BitString, ByteOrder, ScalarKind};
use colored::Colorize;

/// The fields of a bit string as shown to the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fields {
    pub sign: Option<String>,
    pub exponent: Option<String>,
    pub body: String,
}

/// True if bytes in `order` keep the most significant bit first
fn msb_first(order: ByteOrder) -> bool {
    match order {
        ByteOrder::BigEndian => true,
        ByteOrder::LittleEndian => false,
        ByteOrder::Native => cfg!(target_endian = "big"),
    }
}

/// Split `bits` into display fields for a value of `kind`.
///
/// `native` carries the byte order of a native conversion. Byte-swapped
/// layouts and float widths below the 8-bit floor fall back to an undivided
/// body.
pub fn split_fields(kind: ScalarKind, bits: &BitString, native: Option<ByteOrder>) -> Fields {
    let plain = || Fields {
        sign: None,
        exponent: None,
        body: bits.to_string(),
    };
    if bits.is_empty() || !native.map_or(true, msb_first) {
        return plain();
    }

    match kind {
        ScalarKind::Float => {
            let Ok(exponent) = exponent_bits(bits.len()) else {
                return plain();
            };
            Fields {
                sign: Some(bits.slice(..1).to_string()),
                exponent: Some(bits.slice(1..=exponent).to_string()),
                body: bits.slice(exponent + 1..).to_string(),
            }
        }
        ScalarKind::Signed => Fields {
            sign: Some(bits.slice(..1).to_string()),
            exponent: None,
            body: bits.slice(1..).to_string(),
        },
        _ => plain(),
    }
}

/// Render `bits` for the terminal, colored when `color` is set
pub fn render(
    kind: ScalarKind,
    bits: &BitString,
    native: Option<ByteOrder>,
    color: bool,
) -> String {
    let fields = split_fields(kind, bits, native);
    let mut out = String::new();

    if let Some(sign) = &fields.sign {
        out.push_str(&paint(sign, color, |s| s.blue().to_string()));
    }
    if let Some(exponent) = &fields.exponent {
        out.push_str(&paint(exponent, color, |s| s.green().to_string()));
    }
    out.push_str(&paint(&fields.body, color, |s| s.red().to_string()));
    out
}

fn paint(text: &str, color: bool, style: impl Fn(&str) -> String) -> String {
    if color && !text.is_empty() {
        style(text)
    } else {
        text.to_string()
    }
}
