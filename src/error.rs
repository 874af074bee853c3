//! Error type shared by every stage of the keystream pipeline.

use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, GammaError>;

/// Errors raised by the codec, generators, cipher and key manager.
#[derive(Debug, Error)]
pub enum GammaError {
    #[error("symbol {value} at position {position} is outside the 7-bit alphabet 0..=127")]
    /// Input byte does not belong to the 128-symbol alphabet.
    OutOfRangeSymbol {
        /// Offending byte value.
        value: u8,
        /// Zero-based byte offset inside the input.
        position: usize,
    },
    #[error("bit length {len} is not a multiple of 7")]
    /// Bit string cannot be split into whole 7-bit symbols.
    MisalignedLength {
        /// Length of the rejected bit string.
        len: usize,
    },
    #[error("bit strings differ in length ({left} vs {right})")]
    /// XOR operands have different lengths.
    LengthMismatch {
        /// Length of the left operand.
        left: usize,
        /// Length of the right operand.
        right: usize,
    },
    #[error("no prime found after {attempts} attempts")]
    /// Prime search exhausted its attempt bound.
    PrimeGenerationFailure {
        /// Number of candidates tested before giving up.
        attempts: u32,
    },
    #[error("invalid bit character {ch:?} at position {position}")]
    /// Text form of a bit string contains something other than `0` or `1`.
    InvalidBitChar {
        /// Offending character.
        ch: char,
        /// Zero-based character offset.
        position: usize,
    },
    #[error("invalid key: {0}")]
    /// Key record failed validation.
    InvalidKey(String),
    #[error("configuration error: {0}")]
    /// Environment override could not be parsed.
    Config(String),
    #[error("io error: {0}")]
    /// Underlying filesystem failure.
    Io(#[from] std::io::Error),
    #[error("decode error: {0}")]
    /// Key record could not be (de)serialized.
    Json(#[from] serde_json::Error),
}
