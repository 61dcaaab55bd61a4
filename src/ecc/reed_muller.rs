//! First-order Reed-Muller code RM(1, m - 1) with majority-logic decoding.
//!
//! Reed-Muller codes were introduced by David Muller in 1954, and Irving Reed gave the
//! majority-logic decoder the same year. Here the code is parameterized by its message length
//! `m`: an `m`-bit message becomes a `2^(m-1)`-bit codeword, the evaluation of the affine
//! function `m1 + m2*x1 + ... + mm*x(m-1)` at every point of GF(2)^(m-1).
//!
//! The generator matrix has a row of ones followed by the binary expansions of the column
//! index, most significant bit first. Bit `m - i` of the message (1-based) is therefore the
//! difference between any two codeword positions that differ only in bit `i` of their index,
//! and the decoder takes a majority vote over the `N / 2` disjoint pairs of that kind.
//! Once bits `2..=m` are known the first bit is a majority over the residual word.
//!
//! With minimum distance `d = 2^(m-2)` the decoder corrects up to `2^(m-3) - 1` errors.
//! When a vote ties it stops with [`Error::TooManyErrors`] rather than guessing.
//!
//! # Example
//! ```
//! use lincodes::ecc::reed_muller::{rm_decode, rm_encode};
//!
//! let codeword = rm_encode("1011").unwrap();
//! assert_eq!(codeword, "10011001");
//! assert_eq!(rm_decode(&codeword).unwrap(), "1011");
//! ```

use crate::ecc::bits::{format_bits, parse_bits, Bits};
use crate::ecc::gf2::BinaryMatrix;
use crate::ecc::BlockCode;
use crate::error::{Error, Result};
use bitvec::prelude::*;
use log::{debug, log_enabled, trace, Level};

/// Smallest supported message length
pub const MIN_MESSAGE_LEN: usize = 2;

/// Largest supported message length (codeword length 65536)
pub const MAX_MESSAGE_LEN: usize = 17;

/// Reed-Muller RM(1, m - 1) code for `m`-bit messages
#[derive(Debug, Clone)]
pub struct ReedMullerCode {
    message_len: usize,
    /// `m x 2^(m-1)` generator matrix
    generator: BinaryMatrix,
}

impl ReedMullerCode {
    /// Creates the code for messages of `message_len` bits.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidLength`] unless
    /// `MIN_MESSAGE_LEN <= message_len <= MAX_MESSAGE_LEN`.
    pub fn new(message_len: usize) -> Result<Self> {
        if !(MIN_MESSAGE_LEN..=MAX_MESSAGE_LEN).contains(&message_len) {
            return Err(Error::InvalidLength(format!(
                "Reed-Muller message must be between {} and {} bits, got {}",
                MIN_MESSAGE_LEN, MAX_MESSAGE_LEN, message_len
            )));
        }

        let generator = generator_matrix(message_len);
        if log_enabled!(Level::Trace) {
            trace!("RM generator matrix for m = {}:\n{}", message_len, generator);
        }

        Ok(ReedMullerCode {
            message_len,
            generator,
        })
    }

    /// Creates the code whose codewords are `codeword_len` bits long.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidLength`] unless `codeword_len` is a power of two
    /// between 2 and `2^(MAX_MESSAGE_LEN - 1)`.
    pub fn for_codeword_len(codeword_len: usize) -> Result<Self> {
        if codeword_len < 2 || !codeword_len.is_power_of_two() {
            return Err(Error::InvalidLength(format!(
                "Reed-Muller codeword length must be a power of two of at least 2, got {}",
                codeword_len
            )));
        }
        Self::new(codeword_len.trailing_zeros() as usize + 1)
    }

    pub fn message_len(&self) -> usize {
        self.message_len
    }

    /// Codeword length `N = 2^(m-1)`
    pub fn codeword_len(&self) -> usize {
        1 << (self.message_len - 1)
    }

    /// Number of errors every received word may carry and still decode correctly
    pub fn correctable_errors(&self) -> usize {
        (self.codeword_len() / 4).saturating_sub(1)
    }

    pub fn generator_matrix(&self) -> &BinaryMatrix {
        &self.generator
    }

    /// Encodes `message` as `message · G` mod 2.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidLength`] unless `message.len() == m`.
    pub fn encode(&self, message: &BitSlice<u8, Msb0>) -> Result<Bits> {
        if message.len() != self.message_len {
            return Err(Error::InvalidLength(format!(
                "Reed-Muller message must be {} bits, got {}",
                self.message_len,
                message.len()
            )));
        }
        self.generator.vector_mul(message)
    }

    /// Decodes `received` by majority logic.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidLength`] unless `received.len() == 2^(m-1)`, and
    /// [`Error::TooManyErrors`] if any majority vote ties.
    pub fn decode(&self, received: &BitSlice<u8, Msb0>) -> Result<Bits> {
        let n = self.codeword_len();
        if received.len() != n {
            return Err(Error::InvalidLength(format!(
                "Reed-Muller codeword must be {} bits, got {}",
                n,
                received.len()
            )));
        }

        let m = self.message_len;
        let mut message = bitvec![u8, Msb0; 0; m];

        // Level i recovers message bit m - i, from the last bit down to the second
        for level in 0..m - 1 {
            let bit = m - level;
            if log_enabled!(Level::Trace) {
                let pairs: Vec<String> = check_pairs(level, n)
                    .map(|(p, q)| format!("c{} + c{}", p + 1, q + 1))
                    .collect();
                trace!("m{}: {}", bit, pairs.join(", "));
            }

            let estimates = check_pairs(level, n).map(|(p, q)| received[p] ^ received[q]);
            let value = majority(estimates, bit)?;
            debug!("m{} = {}", bit, u8::from(value));
            message.set(bit - 1, value);
        }

        // The first bit is still 0 here, so re-encoding gives the word without its
        // constant term; what remains after adding it to the received word is m1 everywhere
        let predicted = self.encode(&message)?;
        trace!(
            "mock message {} encodes to {}",
            format_bits(&message),
            format_bits(&predicted)
        );
        let estimates = predicted
            .iter()
            .by_vals()
            .zip(received.iter().by_vals())
            .map(|(p, r)| p ^ r);
        let first = majority(estimates, 1)?;
        debug!("m1 = {}", u8::from(first));
        message.set(0, first);

        Ok(message)
    }
}

impl BlockCode for ReedMullerCode {
    fn message_len(&self) -> usize {
        ReedMullerCode::message_len(self)
    }

    fn codeword_len(&self) -> usize {
        ReedMullerCode::codeword_len(self)
    }

    fn encode(&self, message: &BitSlice<u8, Msb0>) -> Result<Bits> {
        ReedMullerCode::encode(self, message)
    }

    fn decode(&self, received: &BitSlice<u8, Msb0>) -> Result<Bits> {
        ReedMullerCode::decode(self, received)
    }
}

/// Builds the `m x 2^(m-1)` generator matrix.
///
/// Column `j` is a one followed by the `(m-1)`-bit expansion of `j`, most significant bit first.
pub fn generator_matrix(message_len: usize) -> BinaryMatrix {
    let vars = message_len - 1;
    BinaryMatrix::from_fn(message_len, 1 << vars, |row, col| {
        row == 0 || (col >> (vars - row)) & 1 == 1
    })
}

/// Check pairs for decoding level `level` of a `codeword_len`-bit word.
///
/// Positions are split into blocks of `2^(level+1)`; the first half of each block is paired
/// with the second half, so every pair `(p, p + 2^level)` is 0-based and the pairs are
/// disjoint. Each level yields `codeword_len / 2` pairs.
///
/// # Example
/// ```
/// use lincodes::ecc::reed_muller::check_pairs;
///
/// let pairs: Vec<_> = check_pairs(1, 8).collect();
/// assert_eq!(pairs, vec![(0, 2), (1, 3), (4, 6), (5, 7)]);
/// ```
pub fn check_pairs(level: usize, codeword_len: usize) -> impl Iterator<Item = (usize, usize)> {
    let stride = 1 << level;
    (0..codeword_len)
        .step_by(stride * 2)
        .flat_map(move |start| (start..start + stride).map(move |p| (p, p + stride)))
}

/// Majority value of `estimates`; a tie fails with [`Error::TooManyErrors`] for message bit `bit`
fn majority<I>(estimates: I, bit: usize) -> Result<bool>
where
    I: Iterator<Item = bool>,
{
    let (ones, total) = estimates.fold((0usize, 0usize), |(ones, total), estimate| {
        (ones + usize::from(estimate), total + 1)
    });

    if ones * 2 == total {
        debug!("m{}: {} of {} estimates are 1, vote is tied", bit, ones, total);
        return Err(Error::TooManyErrors { bit });
    }
    Ok(ones * 2 > total)
}

/// Encodes a `0`/`1` message string; its length fixes the code
pub fn rm_encode(message: &str) -> Result<String> {
    let message = parse_bits(message)?;
    let code = ReedMullerCode::new(message.len())?;
    code.encode(&message).map(|codeword| format_bits(&codeword))
}

/// Decodes a `0`/`1` codeword string; its length fixes the code
pub fn rm_decode(code: &str) -> Result<String> {
    let received = parse_bits(code)?;
    let rm = ReedMullerCode::for_codeword_len(received.len())?;
    rm.decode(&received).map(|message| format_bits(&message))
}
