//! Hamming single-error-correcting code.
//!
//! Hamming codes are a family of linear error-correcting codes developed by Richard Hamming in 1950.
//! For a redundancy order `r` the code maps `k = 2^r - r - 1` message bits onto `n = 2^r - 1`
//! codeword bits. Parity bits sit at the 0-based positions `2^a - 1` (0, 1, 3, 7, ...) and the
//! message bits fill the remaining positions in order, so the codeword is systematic.
//!
//! Decoding multiplies the received word by the parity-check matrix `H`, whose row `i` is the
//! binary representation of `i`. A non-zero syndrome is the 1-based position of the flipped bit.
//!
//! # Limitations
//!
//! The code corrects exactly one error per codeword. With two or more errors the syndrome
//! points at an unrelated position (or is zero), and decoding returns a wrong message of the
//! correct length without reporting anything. The code cannot tell this case apart from a
//! single error, so it is not an error condition.
//!
//! # Example
//! ```
//! use lincodes::ecc::hamming::{hamming_decode, hamming_encode};
//!
//! let code = hamming_encode(3, "0001").unwrap();
//! assert_eq!(code, "1101001");
//! assert_eq!(hamming_decode(3, "1111001").unwrap(), "0001");
//! ```

use crate::ecc::bits::{format_bits, parse_bits, to_usize_msb, Bits};
use crate::ecc::gf2::BinaryMatrix;
use crate::ecc::BlockCode;
use crate::error::{Error, Result};
use bitvec::prelude::*;
use log::{debug, log_enabled, trace, Level};

/// Smallest supported redundancy order
pub const MIN_ORDER: usize = 2;

/// Largest supported redundancy order (codeword length 65535)
pub const MAX_ORDER: usize = 16;

/// Element of a codeword under construction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot {
    Filled(bool),
    /// Unsolved parity bit `a`, living at position `2^a - 1`
    ParitySlot(usize),
}

/// A decoded message together with the position the decoder flipped
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HammingDecoded {
    pub message: Bits,
    /// 0-based codeword position that was corrected, if the syndrome was non-zero
    pub corrected: Option<usize>,
}

/// Hamming code of redundancy order `r`.
#[derive(Debug, Clone)]
pub struct HammingCode {
    /// Number of parity bits
    order: usize,
    /// `n x r` parity-check matrix
    parity_check: BinaryMatrix,
}

impl HammingCode {
    /// Creates the Hamming code with `order` parity bits.
    ///
    /// # Arguments
    ///
    /// * `order` - Redundancy order `r`, between [`MIN_ORDER`] and [`MAX_ORDER`]
    ///
    /// # Returns
    ///
    /// A new `HammingCode` instance or an error if the order is out of range
    pub fn new(order: usize) -> Result<Self> {
        if !(MIN_ORDER..=MAX_ORDER).contains(&order) {
            return Err(Error::InvalidParameter(format!(
                "Hamming order must be between {} and {}, got {}",
                MIN_ORDER, MAX_ORDER, order
            )));
        }

        let parity_check = parity_check_matrix(order);
        if log_enabled!(Level::Trace) {
            trace!("Hamming({}) parity-check matrix:\n{}", order, parity_check);
        }

        Ok(HammingCode {
            order,
            parity_check,
        })
    }

    /// Creates the standard (7,4) Hamming code
    pub fn standard_7_4() -> Self {
        HammingCode {
            order: 3,
            parity_check: parity_check_matrix(3),
        }
    }

    pub fn order(&self) -> usize {
        self.order
    }

    /// Codeword length `n = 2^r - 1`
    pub fn codeword_len(&self) -> usize {
        (1 << self.order) - 1
    }

    /// Message length `k = 2^r - r - 1`
    pub fn message_len(&self) -> usize {
        self.codeword_len() - self.order
    }

    pub fn parity_check_matrix(&self) -> &BinaryMatrix {
        &self.parity_check
    }

    /// Codeword positions holding parity bits, in increasing order
    pub fn parity_positions(&self) -> impl Iterator<Item = usize> {
        (0..self.order).map(|a| (1 << a) - 1)
    }

    /// Encodes `message` into a systematic codeword.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidLength`] unless `message.len() == 2^r - r - 1`.
    pub fn encode(&self, message: &BitSlice<u8, Msb0>) -> Result<Bits> {
        if message.len() != self.message_len() {
            return Err(Error::InvalidLength(format!(
                "Hamming({}) message must be {} bits, got {}",
                self.order,
                self.message_len(),
                message.len()
            )));
        }

        let mut template = self.template(message);
        trace!("codeword template {:?}", template);

        // Each column of H covers exactly one parity position: row 2^a - 1 is the only
        // power-of-two row with bit a set. Every other covered row holds a message bit.
        for column in self.parity_check.columns() {
            let mut solving = None;
            let mut sum = false;
            for row in column.iter_ones() {
                match template[row] {
                    Slot::ParitySlot(_) => solving = Some(row),
                    Slot::Filled(bit) => {
                        trace!("adding template bit {} from position {}", u8::from(bit), row);
                        sum ^= bit;
                    }
                }
            }
            if let Some(position) = solving {
                trace!("parity bit at position {} = {}", position, u8::from(sum));
                template[position] = Slot::Filled(sum);
            }
        }

        Ok(template
            .into_iter()
            .map(|slot| match slot {
                Slot::Filled(bit) => bit,
                Slot::ParitySlot(a) => unreachable!("parity slot {} left unsolved", a),
            })
            .collect())
    }

    /// Computes the syndrome `received · H` mod 2.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidLength`] unless `received.len() == 2^r - 1`.
    pub fn syndrome(&self, received: &BitSlice<u8, Msb0>) -> Result<Bits> {
        self.check_codeword_len(received)?;
        self.parity_check.vector_mul(received)
    }

    /// Decodes `received`, correcting at most one flipped bit.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidLength`] unless `received.len() == 2^r - 1`.
    pub fn decode(&self, received: &BitSlice<u8, Msb0>) -> Result<Bits> {
        self.decode_with_report(received)
            .map(|decoded| decoded.message)
    }

    /// Decodes `received` and reports which position, if any, was corrected
    pub fn decode_with_report(&self, received: &BitSlice<u8, Msb0>) -> Result<HammingDecoded> {
        let syndrome = self.syndrome(received)?;
        let mut corrected_word = received.to_bitvec();

        // Syndrome value v names the 1-based erroneous position; v == 0 means no error
        let corrected = match to_usize_msb(&syndrome) {
            0 => {
                debug!("syndrome {} is zero, codeword is error-free", format_bits(&syndrome));
                None
            }
            value => {
                let position = value - 1;
                debug!(
                    "syndrome {} points at position {}",
                    format_bits(&syndrome),
                    position
                );
                let bit = corrected_word[position];
                corrected_word.set(position, !bit);
                Some(position)
            }
        };
        trace!("corrected codeword {}", format_bits(&corrected_word));

        let message = corrected_word
            .iter()
            .enumerate()
            .filter(|(i, _)| !is_parity_position(*i))
            .map(|(_, bit)| *bit)
            .collect();

        Ok(HammingDecoded { message, corrected })
    }

    fn template(&self, message: &BitSlice<u8, Msb0>) -> Vec<Slot> {
        let mut message_bits = message.iter().by_vals();
        let mut parity_index = 0;

        (0..self.codeword_len())
            .map(|i| {
                if is_parity_position(i) {
                    parity_index += 1;
                    Slot::ParitySlot(parity_index - 1)
                } else {
                    Slot::Filled(message_bits.next().unwrap_or(false))
                }
            })
            .collect()
    }

    fn check_codeword_len(&self, received: &BitSlice<u8, Msb0>) -> Result<()> {
        if received.len() != self.codeword_len() {
            return Err(Error::InvalidLength(format!(
                "Hamming({}) codeword must be {} bits, got {}",
                self.order,
                self.codeword_len(),
                received.len()
            )));
        }
        Ok(())
    }
}

impl BlockCode for HammingCode {
    fn message_len(&self) -> usize {
        HammingCode::message_len(self)
    }

    fn codeword_len(&self) -> usize {
        HammingCode::codeword_len(self)
    }

    fn encode(&self, message: &BitSlice<u8, Msb0>) -> Result<Bits> {
        HammingCode::encode(self, message)
    }

    fn decode(&self, received: &BitSlice<u8, Msb0>) -> Result<Bits> {
        HammingCode::decode(self, received)
    }
}

/// Returns true for the 0-based positions `2^a - 1`
fn is_parity_position(i: usize) -> bool {
    (i + 1).is_power_of_two()
}

/// Builds the `(2^r - 1) x r` parity-check matrix; row `i` (0-based) is `i + 1` in binary,
/// most significant bit first.
pub fn parity_check_matrix(order: usize) -> BinaryMatrix {
    let n = (1 << order) - 1;
    BinaryMatrix::from_fn(n, order, |i, j| ((i + 1) >> (order - 1 - j)) & 1 == 1)
}

/// Encodes a `0`/`1` message string with the order-`r` Hamming code
pub fn hamming_encode(r: usize, message: &str) -> Result<String> {
    let code = HammingCode::new(r)?;
    let message = parse_bits(message)?;
    code.encode(&message).map(|codeword| format_bits(&codeword))
}

/// Decodes a `0`/`1` codeword string with the order-`r` Hamming code
pub fn hamming_decode(r: usize, code: &str) -> Result<String> {
    let hamming = HammingCode::new(r)?;
    let received = parse_bits(code)?;
    hamming
        .decode(&received)
        .map(|message| format_bits(&message))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hamming_creation() {
        let hamming = HammingCode::standard_7_4();
        assert_eq!(hamming.order(), 3);
        assert_eq!(hamming.codeword_len(), 7);
        assert_eq!(hamming.message_len(), 4);

        let hamming = HammingCode::new(4).unwrap();
        assert_eq!(hamming.codeword_len(), 15);
        assert_eq!(hamming.message_len(), 11);

        let hamming = HammingCode::new(2).unwrap();
        assert_eq!(hamming.codeword_len(), 3);
        assert_eq!(hamming.message_len(), 1);

        assert!(matches!(
            HammingCode::new(1),
            Err(Error::InvalidParameter(_))
        ));
        assert!(matches!(
            HammingCode::new(MAX_ORDER + 1),
            Err(Error::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_parity_check_matrix() {
        let h = parity_check_matrix(3);
        assert_eq!((h.nrows(), h.ncols()), (7, 3));
        assert_eq!(h.row(0), bitvec![u8, Msb0; 0, 0, 1]);
        assert_eq!(h.row(3), bitvec![u8, Msb0; 1, 0, 0]);
        assert_eq!(h.row(6), bitvec![u8, Msb0; 1, 1, 1]);

        let positions: Vec<usize> = HammingCode::new(4).unwrap().parity_positions().collect();
        assert_eq!(positions, vec![0, 1, 3, 7]);
    }

    #[test]
    fn test_encode_known_codeword() {
        let hamming = HammingCode::standard_7_4();
        let codeword = hamming.encode(&parse_bits("0001").unwrap()).unwrap();
        assert_eq!(format_bits(&codeword), "1101001");

        let codeword = hamming.encode(&parse_bits("0000").unwrap()).unwrap();
        assert_eq!(format_bits(&codeword), "0000000");

        let codeword = hamming.encode(&parse_bits("1111").unwrap()).unwrap();
        assert_eq!(format_bits(&codeword), "1111111");
    }

    #[test]
    fn test_codewords_have_zero_syndrome() {
        let hamming = HammingCode::new(4).unwrap();
        for value in [0usize, 1, 0x2AA, 0x555, 0x7FF] {
            let message = crate::ecc::bits::from_usize_msb(value, hamming.message_len());
            let codeword = hamming.encode(&message).unwrap();
            assert!(hamming.syndrome(&codeword).unwrap().not_any());
        }
    }

    #[test]
    fn test_decode_reports_correction() {
        let hamming = HammingCode::standard_7_4();

        let clean = hamming
            .decode_with_report(&parse_bits("1101001").unwrap())
            .unwrap();
        assert_eq!(format_bits(&clean.message), "0001");
        assert_eq!(clean.corrected, None);

        let fixed = hamming
            .decode_with_report(&parse_bits("1111001").unwrap())
            .unwrap();
        assert_eq!(format_bits(&fixed.message), "0001");
        assert_eq!(fixed.corrected, Some(2));
    }

    #[test]
    fn test_every_single_error_is_corrected() {
        let hamming = HammingCode::standard_7_4();
        for value in 0..16 {
            let message = crate::ecc::bits::from_usize_msb(value, 4);
            let codeword = hamming.encode(&message).unwrap();
            for position in 0..codeword.len() {
                let mut received = codeword.clone();
                let bit = received[position];
                received.set(position, !bit);

                let decoded = hamming.decode_with_report(&received).unwrap();
                assert_eq!(decoded.message, message);
                assert_eq!(decoded.corrected, Some(position));
            }
        }
    }

    #[test]
    fn test_double_error_is_silently_miscorrected() {
        let hamming = HammingCode::standard_7_4();
        let message = parse_bits("0001").unwrap();
        let mut received = hamming.encode(&message).unwrap();
        let first = received[0];
        let second = received[1];
        received.set(0, !first);
        received.set(1, !second);

        // Both flips land on parity bits; the syndrome blames position 2, a data bit
        let decoded = hamming.decode_with_report(&received).unwrap();
        assert_eq!(decoded.corrected, Some(2));
        assert_eq!(decoded.message.len(), 4);
        assert_ne!(decoded.message, message);
    }

    #[test]
    fn test_length_validation() {
        let hamming = HammingCode::standard_7_4();
        assert!(matches!(
            hamming.encode(&parse_bits("00011").unwrap()),
            Err(Error::InvalidLength(_))
        ));
        assert!(matches!(
            hamming.decode(&parse_bits("110100").unwrap()),
            Err(Error::InvalidLength(_))
        ));
        assert!(matches!(
            hamming.syndrome(&Bits::new()),
            Err(Error::InvalidLength(_))
        ));
    }

    #[test]
    fn test_string_helpers() {
        assert_eq!(hamming_encode(3, "0001").unwrap(), "1101001");
        assert_eq!(hamming_decode(3, "1101001").unwrap(), "0001");
        assert_eq!(hamming_decode(3, "1111001").unwrap(), "0001");
        assert_eq!(hamming_encode(2, "1").unwrap(), "111");

        assert!(matches!(
            hamming_encode(3, "00011"),
            Err(Error::InvalidLength(_))
        ));
        assert!(matches!(
            hamming_encode(3, "00x1"),
            Err(Error::InvalidSymbol { symbol: 'x', .. })
        ));
        assert!(matches!(
            hamming_decode(0, "1"),
            Err(Error::InvalidParameter(_))
        ));
    }
}
