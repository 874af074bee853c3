//! Seven-bit codec for the 128-symbol alphabet.
//!
//! Each byte `0..=127` maps to its fixed 7-bit big-endian code.  Encoding a
//! text concatenates the codes in order; decoding splits a bit string back
//! into 7-bit chunks.

use crate::bits::BitString;
use crate::error::{GammaError, Result};

/// Number of bits used for a single alphabet symbol.
pub const BITS_PER_SYMBOL: usize = 7;

/// Largest byte value that belongs to the alphabet.
pub const MAX_SYMBOL: u8 = 127;

/// Checks that every byte of `text` belongs to the alphabet.
///
/// Reports the first offending byte together with its offset.
pub fn validate(text: &[u8]) -> Result<()> {
    match text.iter().position(|&b| b > MAX_SYMBOL) {
        Some(position) => Err(GammaError::OutOfRangeSymbol {
            value: text[position],
            position,
        }),
        None => Ok(()),
    }
}

/// Encodes `text` as a bit string of `7 * text.len()` bits.
pub fn encode(text: &[u8]) -> Result<BitString> {
    validate(text)?;
    let mut bits = BitString::with_capacity(text.len() * BITS_PER_SYMBOL);
    for &symbol in text {
        bits.push_word(u64::from(symbol), BITS_PER_SYMBOL as u32);
    }
    Ok(bits)
}

/// Decodes a bit string whose length is a multiple of 7.
pub fn decode(bits: &BitString) -> Result<Vec<u8>> {
    if bits.len() % BITS_PER_SYMBOL != 0 {
        return Err(GammaError::MisalignedLength { len: bits.len() });
    }
    Ok(bits
        .as_slice()
        .chunks(BITS_PER_SYMBOL)
        .map(|chunk| chunk.iter().fold(0u8, |acc, &bit| (acc << 1) | u8::from(bit)))
        .collect())
}
