pub mod ecc;
pub mod error;

pub use ecc::{hamming_decode, hamming_encode, rm_decode, rm_encode, BlockCode};
pub use error::{Error, Result};
