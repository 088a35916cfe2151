/*!
Parallel conversion of many independent values.

Every conversion is a pure function of its input, so batches are mapped
over rayon's thread pool without any coordination. Output order always
matches input order.
*/

use crate::bits::BitString;
use crate::error::Result;
use crate::scalar::{Scalar, ScalarKind};
use rayon::prelude::*;
use tracing::debug;

/// Encode every value at `width` bits, failing on the first error
pub fn encode_all(values: &[Scalar], width: usize) -> Result<Vec<BitString>> {
    debug!(count = values.len(), width, "encoding batch");
    values.par_iter().map(|value| value.encode(width)).collect()
}

/// Decode every bit string as `kind`, failing on the first error
pub fn decode_all(kind: ScalarKind, bits: &[BitString]) -> Result<Vec<Scalar>> {
    debug!(count = bits.len(), %kind, "decoding batch");
    bits.par_iter().map(|b| kind.decode(b)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_batch_preserves_order() {
        let values: Vec<Scalar> = (-500i128..500).map(Scalar::Signed).collect();
        let encoded = encode_all(&values, 16).unwrap();
        assert_eq!(encoded.len(), values.len());
        assert!(encoded.iter().all(|b| b.len() == 16));

        let decoded = decode_all(ScalarKind::Signed, &encoded).unwrap();
        assert_eq!(decoded, values);
    }

    #[test]
    fn test_batch_floats() {
        let values: Vec<Scalar> = (0..256).map(|i| Scalar::Float(i as f64 / 8.0)).collect();
        let encoded = encode_all(&values, 32).unwrap();
        assert_eq!(decode_all(ScalarKind::Float, &encoded).unwrap(), values);
    }

    #[test]
    fn test_batch_reports_errors() {
        let values = [Scalar::Unsigned(1), Scalar::Unsigned(1 << 20), Scalar::Unsigned(3)];
        assert!(encode_all(&values, 8).unwrap_err().is_width());
        assert!(encode_all(&[], 8).unwrap().is_empty());
    }
}
