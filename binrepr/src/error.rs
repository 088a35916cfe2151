/*!
Common error types for binary representation conversions.
*/

use thiserror::Error;

/// Common result type used throughout the library
pub type Result<T> = std::result::Result<T, BinReprError>;

/// Errors raised when a requested width cannot hold a value or format
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WidthError {
    #[error("not enough bits: {width} requested, at least {minimum} required")]
    BelowMinimum { width: usize, minimum: usize },

    #[error("not enough bits: value needs {required}, only {available} available")]
    Overflow { required: usize, available: usize },

    #[error("bit length mismatch: expected {expected}, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    #[error("no native representation for {kind} at {width} bits")]
    NotNative { kind: &'static str, width: usize },
}

/// Comprehensive error type for all conversion operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BinReprError {
    /// Width violations (format floor, integer overflow, native size)
    #[error("width error: {0}")]
    Width(#[from] WidthError),

    /// Negative value given to an unsigned-only operation
    #[error("unsigned integer expected, got {0}")]
    Sign(i128),

    /// Non-binary character in a textual bit string
    #[error("invalid bit {found:?} at position {position}")]
    InvalidDigit { position: usize, found: char },

    /// Decoded value is not a Unicode scalar value
    #[error("invalid code point: {0:#x}")]
    InvalidCodePoint(u128),

    /// Unknown byte order name
    #[error("invalid byte order: {0}")]
    InvalidByteOrder(String),
}

impl BinReprError {
    /// Create a new width-below-minimum error
    pub fn below_minimum(width: usize, minimum: usize) -> Self {
        Self::Width(WidthError::BelowMinimum { width, minimum })
    }

    /// Create a new overflow error
    pub fn overflow(required: usize, available: usize) -> Self {
        Self::Width(WidthError::Overflow { required, available })
    }

    /// Create a new length mismatch error
    pub fn length_mismatch(expected: usize, actual: usize) -> Self {
        Self::Width(WidthError::LengthMismatch { expected, actual })
    }

    /// Create a new missing native representation error
    pub fn not_native(kind: &'static str, width: usize) -> Self {
        Self::Width(WidthError::NotNative { kind, width })
    }

    /// True for any width violation
    pub fn is_width(&self) -> bool {
        matches!(self, Self::Width(_))
    }

    /// True for a sign violation
    pub fn is_sign(&self) -> bool {
        matches!(self, Self::Sign(_))
    }
}
