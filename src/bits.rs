//! Owned bit sequences with a `0`/`1` text form.
//!
//! Every stage of the pipeline exchanges bits as a [`BitString`]: the codec
//! produces one from text, the gamma generator accumulates one from BBS
//! blocks, and the cipher combines two of them.  The text form matches the
//! audit files written next to each run.

use std::fmt;
use std::str::FromStr;

use crate::error::{GammaError, Result};

/// Ordered sequence of bits, most significant first within each appended word.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct BitString {
    bits: Vec<bool>,
}

impl BitString {
    /// Creates an empty bit string.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty bit string with room for `capacity` bits.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            bits: Vec::with_capacity(capacity),
        }
    }

    /// Returns the number of bits.
    #[inline]
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    /// Returns `true` when the string holds no bits.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// Appends a single bit.
    #[inline]
    pub fn push(&mut self, bit: bool) {
        self.bits.push(bit);
    }

    /// Appends the low `width` bits of `value`, big-endian.
    ///
    /// # Panics
    ///
    /// Panics if `width` exceeds 64.
    pub fn push_word(&mut self, value: u64, width: u32) {
        assert!(width <= 64, "word width must be at most 64 bits");
        for shift in (0..width).rev() {
            self.bits.push((value >> shift) & 1 == 1);
        }
    }

    /// Shortens the string to `len` bits; no-op when already shorter.
    pub fn truncate(&mut self, len: usize) {
        self.bits.truncate(len);
    }

    /// Returns the bits as a slice.
    pub fn as_slice(&self) -> &[bool] {
        &self.bits
    }

    /// Iterates over the bits in order.
    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        self.bits.iter().copied()
    }

    /// Returns at most the first `limit` bits as text, followed by `...` if cut.
    pub fn preview(&self, limit: usize) -> String {
        let mut out: String = self
            .bits
            .iter()
            .take(limit)
            .map(|&b| if b { '1' } else { '0' })
            .collect();
        if self.bits.len() > limit {
            out.push_str("...");
        }
        out
    }
}

impl From<Vec<bool>> for BitString {
    fn from(bits: Vec<bool>) -> Self {
        Self { bits }
    }
}

impl FromIterator<bool> for BitString {
    fn from_iter<I: IntoIterator<Item = bool>>(iter: I) -> Self {
        Self {
            bits: iter.into_iter().collect(),
        }
    }
}

impl fmt::Display for BitString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &bit in &self.bits {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

impl FromStr for BitString {
    type Err = GammaError;

    fn from_str(s: &str) -> Result<Self> {
        s.chars()
            .enumerate()
            .map(|(position, ch)| match ch {
                '0' => Ok(false),
                '1' => Ok(true),
                _ => Err(GammaError::InvalidBitChar { ch, position }),
            })
            .collect()
    }
}
