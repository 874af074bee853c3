#![deny(missing_docs)]

//! The design philosophy underlying `gamma_stream` is pedagogical, yet mathematically rigorous.
//! Each module encapsulates a discrete concept from classical pseudorandom generation,
//! illustrating how modest abstractions compose into a cohesive keystream pipeline.
//!
//! This crate aspires to bridge gaps between theoretical exposition and practical engineering,
//! serving both as a didactic resource and a foundation for future cryptographic coursework.
//! # gamma_stream
//!
//! **gamma_stream** implements a two-stage pseudorandom bit generator and the
//! stream cipher ("gamma cipher") built on top of it.  Texts are drawn from a
//! 128-symbol alphabet (bytes `0..=127`), each symbol occupying 7 bits.
//!
//! ## Features
//!
//! * **Seven-bit codec** via the [`codec`](codec/index.html) module and the
//!   [`BitString`](struct.BitString.html) type.
//! * **Miller–Rabin primality testing** and a search for 32-bit Blum primes
//!   (`p ≡ 3 mod 4`) driven by a cryptographic random source.
//! * **Linear congruential generator** over the fixed modulus `2^20`.
//! * **Blum–Blum–Shub generator** over `n = p·q` with 128-bit-safe squaring.
//! * **Gamma generator**: the [`gamma`](gamma/index.html) module couples both
//!   stages in a feedback loop; seven LCG draws seed each BBS round, and the
//!   top 20 bits of the round's last BBS output reseed the LCG.
//! * **Stream cipher** and **key records**: [`encrypt`] and [`decrypt`] take a
//!   [`KeyRecord`] snapshot and hand back the advanced key to persist.
//!
//! The generator makes no claim of cryptographic strength; 32-bit BBS primes
//! are far too small for real use.
//!
//! ## Usage
//!
//! ```rust
//! use gamma_stream::{Bbs, Lcg};
//!
//! // The textbook BBS sequence modulo 77.
//! let mut bbs = Bbs::new(7, 11, 5);
//! assert_eq!(bbs.state(), 25);
//! assert_eq!(bbs.outputs(2), vec![9, 4]);
//!
//! // The LCG over 2^20 with the Numerical Recipes constants.
//! let mut lcg = Lcg::with_default_modulus(1_664_525, 1_013_904_223, 0);
//! assert_eq!(lcg.next(), 1_013_904_223 % (1 << 20));
//! ```

mod bbs;
mod bits;
pub mod cipher;
pub mod codec;
pub mod config;
mod error;
pub mod gamma;
mod io;
mod key;
mod lcg;
mod modular;
mod primality;
mod primegen;

pub use bbs::Bbs;
pub use bits::BitString;
pub use cipher::{decrypt, encrypt, xor, AuditArtifacts, CipherRun, Direction};
pub use config::{KeygenSettings, PrimeSearch};
pub use error::{GammaError, Result};
pub use gamma::{BbsPrimes, Gamma};
pub use io::{run_files, write_artifacts};
pub use key::{generate_key, generate_key_with, BbsParams, KeyRecord, LcgParams};
pub use lcg::{Lcg, DEFAULT_LCG_A, DEFAULT_LCG_B, LCG_MODULUS};
pub use modular::{gcd, Modulus};
pub use primality::is_probable_prime;
pub use primegen::generate_prime_3_mod_4;
