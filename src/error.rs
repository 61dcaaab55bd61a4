//! Error types shared by every code in the crate.

use thiserror::Error;

/// Errors produced while building, encoding or decoding a code.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Input length does not match the length derived from the code parameter
    #[error("invalid length: {0}")]
    InvalidLength(String),

    /// A character other than `0` or `1` in an input bit string
    #[error("invalid symbol {symbol:?} at position {position}")]
    InvalidSymbol { symbol: char, position: usize },

    /// A majority vote tied while decoding message bit `bit` (1-based)
    #[error("too many errors in received word: majority vote tied for message bit {bit}")]
    TooManyErrors { bit: usize },

    /// Code parameter outside the supported range
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Matrix entry other than 0 or 1
    #[error("non-binary value {value} at row {row}, column {col}")]
    NonBinaryValue { value: u8, row: usize, col: usize },

    /// Operand shapes are incompatible
    #[error("dimension mismatch: {0}")]
    DimensionMismatch(String),
}

/// Result type for all fallible operations in the crate
pub type Result<T> = std::result::Result<T, Error>;
