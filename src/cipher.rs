//! The design philosophy underlying `gamma_stream` is pedagogical, yet mathematically rigorous.
//! Each module encapsulates a discrete concept from classical pseudorandom generation,
//! illustrating how modest abstractions compose into a cohesive keystream pipeline.
//!
//! This crate aspires to bridge gaps between theoretical exposition and practical engineering,
//! serving both as a didactic resource and a foundation for future cryptographic coursework.
//! Stream cipher over the 7-bit alphabet.
//!
//! Encryption and decryption are the same operation: the input is encoded,
//! XORed with `7 × len` bits of gamma and decoded again.  Both directions
//! must start from the same key snapshot to reproduce the keystream; the
//! returned [`CipherRun::key`] carries the advanced LCG state to persist
//! afterwards.
//!
//! # Examples
//!
//! ```
//! use gamma_stream::{decrypt, encrypt, BbsParams, KeyRecord, LcgParams};
//!
//! let key = KeyRecord {
//!     lcg: LcgParams { a: 1_664_525, b: 1_013_904_223, m: 1 << 20, seed: 17 },
//!     bbs: BbsParams { p: 4_294_967_291, q: 4_294_967_279 },
//! };
//! let sealed = encrypt(&key, b"attack at dawn").unwrap();
//! let opened = decrypt(&key, &sealed.output).unwrap();
//! assert_eq!(opened.output, b"attack at dawn");
//! assert_eq!(sealed.key, opened.key);
//! ```

use tracing::debug;

use crate::bits::BitString;
use crate::codec;
use crate::error::{GammaError, Result};
use crate::gamma;
use crate::key::KeyRecord;

/// XORs two equal-length bit strings.
pub fn xor(a: &BitString, b: &BitString) -> Result<BitString> {
    if a.len() != b.len() {
        return Err(GammaError::LengthMismatch {
            left: a.len(),
            right: b.len(),
        });
    }
    Ok(a.iter().zip(b.iter()).map(|(x, y)| x ^ y).collect())
}

/// Cipher direction, used to label audit artifacts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Plaintext in, ciphertext out.
    Encrypt,
    /// Ciphertext in, plaintext out.
    Decrypt,
}

/// Intermediate values of a run, kept for inspection and debugging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditArtifacts {
    /// Encoded plaintext.
    pub plaintext_bits: BitString,
    /// Every consumed BBS block as 16 hex digits.
    pub gamma_blocks_hex: Vec<String>,
    /// Keystream bits actually used.
    pub gamma_bits: BitString,
    /// Encoded ciphertext.
    pub ciphertext_bits: BitString,
    /// Number of gamma rounds executed.
    pub rounds: usize,
}

/// Result of [`encrypt`] or [`decrypt`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CipherRun {
    /// Direction that produced this run.
    pub direction: Direction,
    /// Input bytes as given.
    pub input: Vec<u8>,
    /// Ciphertext for encryption, plaintext for decryption.
    pub output: Vec<u8>,
    /// Key with its LCG seed advanced past the consumed keystream.
    pub key: KeyRecord,
    /// Intermediate bit strings.
    pub audit: AuditArtifacts,
}

impl CipherRun {
    /// Returns the plaintext side of the run.
    pub fn plaintext(&self) -> &[u8] {
        match self.direction {
            Direction::Encrypt => &self.input,
            Direction::Decrypt => &self.output,
        }
    }

    /// Returns the ciphertext side of the run.
    pub fn ciphertext(&self) -> &[u8] {
        match self.direction {
            Direction::Encrypt => &self.output,
            Direction::Decrypt => &self.input,
        }
    }
}

/// Encrypts `plaintext` with the keystream starting at `key`'s LCG state.
pub fn encrypt(key: &KeyRecord, plaintext: &[u8]) -> Result<CipherRun> {
    apply(key, plaintext, Direction::Encrypt)
}

/// Decrypts `ciphertext`; `key` must be the snapshot used for encryption.
pub fn decrypt(key: &KeyRecord, ciphertext: &[u8]) -> Result<CipherRun> {
    apply(key, ciphertext, Direction::Decrypt)
}

fn apply(key: &KeyRecord, input: &[u8], direction: Direction) -> Result<CipherRun> {
    codec::validate(input)?;
    key.validate()?;

    let input_bits = codec::encode(input)?;
    let gamma = gamma::generate(key.lcg(), &key.primes(), input_bits.len());
    let output_bits = xor(&input_bits, &gamma.bits)?;
    let output = codec::decode(&output_bits)?;
    debug!(?direction, symbols = input.len(), rounds = gamma.rounds, "cipher run");

    let gamma_blocks_hex = gamma.blocks_hex();
    let (plaintext_bits, ciphertext_bits) = match direction {
        Direction::Encrypt => (input_bits, output_bits),
        Direction::Decrypt => (output_bits, input_bits),
    };
    Ok(CipherRun {
        direction,
        input: input.to_vec(),
        output,
        key: key.with_lcg_state(gamma.lcg.state()),
        audit: AuditArtifacts {
            plaintext_bits,
            gamma_blocks_hex,
            gamma_bits: gamma.bits,
            ciphertext_bits,
            rounds: gamma.rounds,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::key::{BbsParams, LcgParams};
    use crate::lcg::{DEFAULT_LCG_A, DEFAULT_LCG_B, LCG_MODULUS};
    use proptest::prelude::*;

    fn key(seed: u64) -> KeyRecord {
        KeyRecord {
            lcg: LcgParams {
                a: DEFAULT_LCG_A,
                b: DEFAULT_LCG_B,
                m: LCG_MODULUS,
                seed,
            },
            bbs: BbsParams {
                p: 4_294_967_291,
                q: 4_294_967_279,
            },
        }
    }

    #[test]
    fn round_trip_from_same_snapshot() {
        let key0 = key(100);
        let text = b"The quick brown fox jumps over the lazy dog.\n\t~";
        let sealed = encrypt(&key0, text).unwrap();
        assert_ne!(sealed.output, text.to_vec());
        assert!(sealed.output.iter().all(|&b| b <= 127));
        let opened = decrypt(&key0, &sealed.output).unwrap();
        assert_eq!(opened.output, text.to_vec());
        assert_eq!(opened.audit.gamma_bits, sealed.audit.gamma_bits);
        assert_eq!(opened.audit.plaintext_bits, sealed.audit.plaintext_bits);
        assert_eq!(opened.audit.ciphertext_bits, sealed.audit.ciphertext_bits);
    }

    #[test]
    fn advanced_key_does_not_decrypt() {
        let key0 = key(100);
        let text = b"same keystream twice would leak";
        let sealed = encrypt(&key0, text).unwrap();
        assert_ne!(sealed.key, key0);
        let wrong = decrypt(&sealed.key, &sealed.output).unwrap();
        assert_ne!(wrong.output, text.to_vec());
    }

    #[test]
    fn consumes_seven_bits_per_symbol() {
        let run = encrypt(&key(5), b"abcde").unwrap();
        assert_eq!(run.audit.gamma_bits.len(), 35);
        assert_eq!(run.audit.plaintext_bits.len(), 35);
        assert_eq!(run.audit.rounds, 1);
        assert_eq!(run.audit.gamma_blocks_hex.len(), 5);
        assert_eq!(run.plaintext(), b"abcde");
        assert_eq!(run.ciphertext(), &run.output[..]);
    }

    #[test]
    fn empty_input_runs_no_rounds() {
        let key0 = key(64);
        let run = encrypt(&key0, b"").unwrap();
        assert!(run.output.is_empty());
        assert_eq!(run.audit.rounds, 0);
        assert!(run.audit.gamma_blocks_hex.is_empty());
        assert_eq!(run.key, key0);
    }

    #[test]
    fn out_of_range_byte_fails_before_any_work() {
        let err = encrypt(&key(1), b"caf\xc8").unwrap_err();
        assert!(matches!(
            err,
            GammaError::OutOfRangeSymbol {
                value: 200,
                position: 3
            }
        ));
    }

    #[test]
    fn invalid_key_is_rejected() {
        let mut bad = key(1);
        bad.lcg.m = 1 << 10;
        assert!(matches!(
            decrypt(&bad, b"x"),
            Err(GammaError::InvalidKey(_))
        ));
    }

    #[test]
    fn xor_requires_equal_lengths() {
        let a: BitString = "101".parse().unwrap();
        let b: BitString = "10".parse().unwrap();
        assert!(matches!(
            xor(&a, &b),
            Err(GammaError::LengthMismatch { left: 3, right: 2 })
        ));
    }

    proptest! {
        #[test]
        fn xor_is_self_inverse(pair in (0usize..200).prop_flat_map(|n| (
            proptest::collection::vec(any::<bool>(), n),
            proptest::collection::vec(any::<bool>(), n),
        ))) {
            let x = BitString::from(pair.0);
            let y = BitString::from(pair.1);
            prop_assert_eq!(xor(&xor(&x, &y).unwrap(), &y).unwrap(), x.clone());
            prop_assert!(xor(&x, &x).unwrap().iter().all(|bit| !bit));
        }

        #[test]
        fn any_ascii_text_round_trips(
            text in proptest::collection::vec(0u8..=127, 0..80),
            seed in 0u64..LCG_MODULUS,
        ) {
            let key0 = key(seed);
            let sealed = encrypt(&key0, &text).unwrap();
            prop_assert_eq!(decrypt(&key0, &sealed.output).unwrap().output, text);
        }
    }
}
