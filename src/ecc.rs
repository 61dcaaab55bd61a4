//! Error correction codes over GF(2).
//!
//! This module provides:
//! - Binary linear algebra (matrices and vectors mod 2)
//! - Hamming single-error-correcting codes of any order `r`
//! - First-order Reed-Muller codes with majority-logic decoding
//! - A binary symmetric channel for simulating transmission errors
//!
//! Both codes are available through a string interface (`"0"`/`"1"` text in and out) and
//! through the [`BlockCode`] trait working on bit vectors.
//!
//! # Examples
//!
//! ```rust
//! use lincodes::ecc::{BlockCode, HammingCode, ReedMullerCode};
//! use lincodes::ecc::bits::{format_bits, parse_bits};
//!
//! let codes: Vec<Box<dyn BlockCode>> = vec![
//!     Box::new(HammingCode::new(3).unwrap()),
//!     Box::new(ReedMullerCode::new(4).unwrap()),
//! ];
//! for code in &codes {
//!     let message = parse_bits("1011").unwrap();
//!     let codeword = code.encode(&message).unwrap();
//!     assert_eq!(code.decode(&codeword).unwrap(), message);
//! }
//! assert_eq!(format_bits(&codes[1].encode(&parse_bits("1011").unwrap()).unwrap()), "10011001");
//! ```

use crate::ecc::bits::Bits;
use crate::error::Result;
use bitvec::prelude::*;

/// Trait for fixed-length binary block codes
pub trait BlockCode {
    /// Number of message bits per block
    fn message_len(&self) -> usize;

    /// Number of codeword bits per block
    fn codeword_len(&self) -> usize;

    /// Encode one message block
    fn encode(&self, message: &BitSlice<u8, Msb0>) -> Result<Bits>;

    /// Decode one received block, correcting errors if possible
    fn decode(&self, received: &BitSlice<u8, Msb0>) -> Result<Bits>;
}

pub mod bits;
pub mod channel;
pub mod gf2;

/// Hamming single-error-correcting codes
pub mod hamming;
pub use hamming::{hamming_decode, hamming_encode, HammingCode, HammingDecoded};

/// Reed-Muller RM(1, m - 1) codes
pub mod reed_muller;
pub use reed_muller::{rm_decode, rm_encode, ReedMullerCode};
