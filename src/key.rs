//! Durable key record: LCG parameters and state plus the BBS primes.
//!
//! The record is created once by [`generate_key`], loaded before every run
//! and rewritten with the advanced LCG state before a run writes its output,
//! so two sessions that share a key never reuse keystream.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use rand::rngs::OsRng;
use rand::{CryptoRng, Rng, RngCore};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::PrimeSearch;
use crate::error::{GammaError, Result};
use crate::gamma::BbsPrimes;
use crate::lcg::{Lcg, LCG_MODULUS};
use crate::primegen::generate_prime_3_mod_4;

/// First-stage parameters as persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LcgParams {
    /// Multiplier.
    pub a: u64,
    /// Increment.
    pub b: u64,
    /// Modulus, always `2^20`.
    pub m: u64,
    /// Current state; replaced after every run.
    pub seed: u64,
}

/// Second-stage primes as persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BbsParams {
    /// First 32-bit prime, `≡ 3 (mod 4)`.
    pub p: u64,
    /// Second 32-bit prime, `≡ 3 (mod 4)`.
    pub q: u64,
}

/// Complete key material for the two-stage generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyRecord {
    /// LCG parameters and current state.
    pub lcg: LcgParams,
    /// BBS primes.
    pub bbs: BbsParams,
}

impl KeyRecord {
    /// Checks the structural constraints of the record.
    ///
    /// Primality of `p` and `q` is trusted; it was established when the key
    /// was generated.
    pub fn validate(&self) -> Result<()> {
        if self.lcg.m != LCG_MODULUS {
            return Err(GammaError::InvalidKey(format!(
                "lcg.m must be {LCG_MODULUS}, found {}",
                self.lcg.m
            )));
        }
        for (name, prime) in [("bbs.p", self.bbs.p), ("bbs.q", self.bbs.q)] {
            if prime > u64::from(u32::MAX) {
                return Err(GammaError::InvalidKey(format!(
                    "{name} = {prime} does not fit in 32 bits"
                )));
            }
            if prime % 4 != 3 {
                return Err(GammaError::InvalidKey(format!(
                    "{name} = {prime} is not congruent to 3 mod 4"
                )));
            }
        }
        if self.bbs.p == self.bbs.q {
            return Err(GammaError::InvalidKey("bbs.p and bbs.q must differ".into()));
        }
        Ok(())
    }

    /// Builds the first-stage generator positioned at the stored seed.
    pub fn lcg(&self) -> Lcg {
        Lcg::new(self.lcg.a, self.lcg.b, self.lcg.m, self.lcg.seed)
    }

    /// Returns the BBS primes.
    pub fn primes(&self) -> BbsPrimes {
        BbsPrimes {
            p: self.bbs.p,
            q: self.bbs.q,
        }
    }

    /// Returns a copy whose LCG seed is `state`.
    pub fn with_lcg_state(&self, state: u64) -> Self {
        let mut next = *self;
        next.lcg.seed = state;
        next
    }

    /// Loads and validates a record from JSON.
    pub fn load(path: &Path) -> Result<Self> {
        let bytes = fs::read(path)?;
        let key: Self = serde_json::from_slice(&bytes)?;
        key.validate()?;
        Ok(key)
    }

    /// Persists the record as pretty JSON, replacing `path` atomically.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let mut data = serde_json::to_vec_pretty(self)?;
        data.push(b'\n');
        let tmp_path = tmp_path_for(path);
        fs::write(&tmp_path, data)?;
        if let Err(err) = fs::rename(&tmp_path, path) {
            let _ = fs::remove_file(&tmp_path);
            return Err(err.into());
        }
        debug!(path = %path.display(), seed = self.lcg.seed, "key record saved");
        Ok(())
    }
}

fn tmp_path_for(path: &Path) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(".tmp");
    PathBuf::from(name)
}

/// Generates a key with fresh primes and seed from the operating system RNG.
pub fn generate_key(lcg_a: u64, lcg_b: u64) -> Result<KeyRecord> {
    generate_key_with(&mut OsRng, lcg_a, lcg_b, &PrimeSearch::default())
}

/// Generates a key from an injectable cryptographic RNG.
pub fn generate_key_with<R>(
    rng: &mut R,
    lcg_a: u64,
    lcg_b: u64,
    search: &PrimeSearch,
) -> Result<KeyRecord>
where
    R: RngCore + CryptoRng,
{
    let p = generate_prime_3_mod_4(rng, search)?;
    let mut q = generate_prime_3_mod_4(rng, search)?;
    while q == p {
        q = generate_prime_3_mod_4(rng, search)?;
    }
    let seed = rng.gen_range(0..LCG_MODULUS);
    let key = KeyRecord {
        lcg: LcgParams {
            a: lcg_a,
            b: lcg_b,
            m: LCG_MODULUS,
            seed,
        },
        bbs: BbsParams { p, q },
    };
    debug!(p, q, seed, "key generated");
    Ok(key)
}
