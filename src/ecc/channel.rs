//! Noise models for exercising the decoders.
//!
//! A binary symmetric channel flips every bit independently with the same
//! probability. For exact error counts use [`random_error_pattern`] and
//! [`flip_bits`] instead.

use crate::ecc::bits::Bits;
use crate::ecc::BlockCode;
use crate::error::{Error, Result};
use bitvec::prelude::*;
use log::debug;
use rand::seq::index;
use rand::Rng;
use rand_distr::Bernoulli;

/// Binary symmetric channel with crossover probability `p`
#[derive(Debug, Clone, Copy)]
pub struct BinarySymmetricChannel {
    flip_probability: f64,
    flips: Bernoulli,
}

impl BinarySymmetricChannel {
    /// Creates a channel that flips each bit with probability `flip_probability`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] unless `0 <= flip_probability <= 1`.
    pub fn new(flip_probability: f64) -> Result<Self> {
        let flips = Bernoulli::new(flip_probability).map_err(|_| {
            Error::InvalidParameter(format!(
                "flip probability must be within [0, 1], got {}",
                flip_probability
            ))
        })?;

        Ok(BinarySymmetricChannel {
            flip_probability,
            flips,
        })
    }

    pub fn flip_probability(&self) -> f64 {
        self.flip_probability
    }

    /// Sends `codeword` through the channel
    pub fn transmit<R: Rng + ?Sized>(&self, codeword: &BitSlice<u8, Msb0>, rng: &mut R) -> Bits {
        codeword
            .iter()
            .by_vals()
            .map(|bit| bit ^ rng.sample(self.flips))
            .collect()
    }
}

/// Picks `weight` distinct positions out of `len`, in increasing order.
///
/// # Errors
///
/// Returns [`Error::InvalidParameter`] if `weight > len`.
pub fn random_error_pattern<R: Rng + ?Sized>(
    len: usize,
    weight: usize,
    rng: &mut R,
) -> Result<Vec<usize>> {
    if weight > len {
        return Err(Error::InvalidParameter(format!(
            "cannot place {} errors in {} bits",
            weight, len
        )));
    }

    let mut positions = index::sample(rng, len, weight).into_vec();
    positions.sort_unstable();
    Ok(positions)
}

/// Returns a copy of `codeword` with the bits at `positions` flipped.
///
/// Flipping the same position twice restores it.
///
/// # Errors
///
/// Returns [`Error::InvalidLength`] if a position lies outside the codeword.
pub fn flip_bits(codeword: &BitSlice<u8, Msb0>, positions: &[usize]) -> Result<Bits> {
    let mut flipped = codeword.to_bitvec();
    for &position in positions {
        if position >= flipped.len() {
            return Err(Error::InvalidLength(format!(
                "position {} is outside a {}-bit codeword",
                position,
                flipped.len()
            )));
        }
        let bit = flipped[position];
        flipped.set(position, !bit);
    }
    Ok(flipped)
}

/// Outcome counts of a [`simulate`] run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SimulationSummary {
    pub trials: usize,
    /// Decoded to the transmitted message
    pub decoded: usize,
    /// Decoded without complaint to a different message
    pub miscorrected: usize,
    /// Rejected with [`Error::TooManyErrors`]
    pub detected: usize,
    /// Total number of bits the channel flipped
    pub flipped_bits: usize,
}

/// Sends `trials` random messages through `channel` and decodes them with `code`.
///
/// # Errors
///
/// Propagates any decoder error other than [`Error::TooManyErrors`], which is counted.
pub fn simulate<R: Rng + ?Sized>(
    code: &dyn BlockCode,
    channel: &BinarySymmetricChannel,
    trials: usize,
    rng: &mut R,
) -> Result<SimulationSummary> {
    let mut summary = SimulationSummary {
        trials,
        ..SimulationSummary::default()
    };

    for _ in 0..trials {
        let message: Bits = (0..code.message_len()).map(|_| rng.gen::<bool>()).collect();
        let codeword = code.encode(&message)?;
        let received = channel.transmit(&codeword, rng);
        summary.flipped_bits += (received.clone() ^ codeword.as_bitslice()).count_ones();

        match code.decode(&received) {
            Ok(decoded) if decoded == message => summary.decoded += 1,
            Ok(_) => summary.miscorrected += 1,
            Err(Error::TooManyErrors { .. }) => summary.detected += 1,
            Err(err) => return Err(err),
        }
    }

    debug!("simulation finished: {:?}", summary);
    Ok(summary)
}
