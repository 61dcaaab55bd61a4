//! Bit strings as they cross the crate boundary.
//!
//! Messages and codewords are stored as `BitVec<u8, Msb0>`; callers outside the
//! crate usually hand us text made of `0` and `1` characters, so this module
//! owns the conversion in both directions.

use crate::error::{Error, Result};
use bitvec::prelude::*;

/// Owned bit vector used for messages, codewords and syndromes
pub type Bits = BitVec<u8, Msb0>;

/// Parses a string of `0`/`1` characters into bits.
///
/// # Errors
///
/// Returns [`Error::InvalidSymbol`] for the first character that is not `0` or `1`.
///
/// # Example
/// ```
/// use lincodes::ecc::bits::{format_bits, parse_bits};
///
/// let bits = parse_bits("1011").unwrap();
/// assert_eq!(bits.len(), 4);
/// assert_eq!(format_bits(&bits), "1011");
/// ```
pub fn parse_bits(text: &str) -> Result<Bits> {
    let mut bits = Bits::with_capacity(text.len());
    for (position, symbol) in text.chars().enumerate() {
        match symbol {
            '0' => bits.push(false),
            '1' => bits.push(true),
            _ => return Err(Error::InvalidSymbol { symbol, position }),
        }
    }
    Ok(bits)
}

/// Renders bits as a string of `0`/`1` characters
pub fn format_bits(bits: &BitSlice<u8, Msb0>) -> String {
    bits.iter().map(|bit| if *bit { '1' } else { '0' }).collect()
}

/// Reads bits as an unsigned integer, most significant bit first.
///
/// An empty slice reads as zero.
pub fn to_usize_msb(bits: &BitSlice<u8, Msb0>) -> usize {
    bits.iter()
        .fold(0usize, |acc, bit| (acc << 1) | usize::from(*bit))
}

/// Writes the low `width` bits of `value`, most significant bit first
pub fn from_usize_msb(value: usize, width: usize) -> Bits {
    (0..width).rev().map(|shift| (value >> shift) & 1 == 1).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_format() {
        let bits = parse_bits("0010110").unwrap();
        assert_eq!(bits, bitvec![u8, Msb0; 0, 0, 1, 0, 1, 1, 0]);
        assert_eq!(format_bits(&bits), "0010110");

        assert!(parse_bits("").unwrap().is_empty());
        assert_eq!(format_bits(&Bits::new()), "");
    }

    #[test]
    fn test_parse_rejects_non_binary() {
        assert_eq!(
            parse_bits("01a1"),
            Err(Error::InvalidSymbol {
                symbol: 'a',
                position: 2
            })
        );
        assert_eq!(
            parse_bits("2"),
            Err(Error::InvalidSymbol {
                symbol: '2',
                position: 0
            })
        );
        assert!(matches!(
            parse_bits("10 1"),
            Err(Error::InvalidSymbol { symbol: ' ', .. })
        ));
    }

    #[test]
    fn test_integer_conversion() {
        assert_eq!(to_usize_msb(&bitvec![u8, Msb0; 1, 0, 1]), 5);
        assert_eq!(to_usize_msb(&bitvec![u8, Msb0; 0, 0, 0]), 0);
        assert_eq!(to_usize_msb(BitSlice::<u8, Msb0>::empty()), 0);

        assert_eq!(from_usize_msb(5, 3), bitvec![u8, Msb0; 1, 0, 1]);
        assert_eq!(from_usize_msb(1, 4), bitvec![u8, Msb0; 0, 0, 0, 1]);

        for value in 0..16 {
            assert_eq!(to_usize_msb(&from_usize_msb(value, 4)), value);
        }
    }
}
