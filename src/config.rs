//! Tunable parameters and their environment overrides.
//!
//! Defaults reproduce the laboratory variant: 10 Miller–Rabin rounds, at most
//! 100 000 prime candidates, and the Numerical Recipes LCG constants.  The CLI
//! reads overrides from the environment; explicit flags win over both.

use std::env;
use std::str::FromStr;

use crate::error::{GammaError, Result};
use crate::lcg::{DEFAULT_LCG_A, DEFAULT_LCG_B};

/// Environment variable overriding the Miller–Rabin round count.
pub const ENV_MR_ROUNDS: &str = "GAMMA_MR_ROUNDS";
/// Environment variable overriding the prime search attempt bound.
pub const ENV_PRIME_ATTEMPTS: &str = "GAMMA_PRIME_ATTEMPTS";
/// Environment variable overriding the default LCG multiplier.
pub const ENV_LCG_A: &str = "GAMMA_LCG_A";
/// Environment variable overriding the default LCG increment.
pub const ENV_LCG_B: &str = "GAMMA_LCG_B";
/// Environment variable holding the `tracing` filter directive.
pub const ENV_LOG: &str = "GAMMA_LOG";

/// Parameters of the BBS prime search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrimeSearch {
    /// Miller–Rabin witnesses drawn per candidate.
    pub rounds: u32,
    /// Candidates tested before the search is declared failed.
    pub max_attempts: u32,
}

impl Default for PrimeSearch {
    fn default() -> Self {
        Self {
            rounds: 10,
            max_attempts: 100_000,
        }
    }
}

/// Settings resolved for a key generation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeygenSettings {
    /// LCG multiplier stored in new keys.
    pub lcg_a: u64,
    /// LCG increment stored in new keys.
    pub lcg_b: u64,
    /// Prime search parameters.
    pub search: PrimeSearch,
}

impl Default for KeygenSettings {
    fn default() -> Self {
        Self {
            lcg_a: DEFAULT_LCG_A,
            lcg_b: DEFAULT_LCG_B,
            search: PrimeSearch::default(),
        }
    }
}

impl KeygenSettings {
    /// Loads the defaults and applies any overrides present in the environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an injectable variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut settings = Self::default();
        if let Some(v) = parse_var(&lookup, ENV_LCG_A)? {
            settings.lcg_a = v;
        }
        if let Some(v) = parse_var(&lookup, ENV_LCG_B)? {
            settings.lcg_b = v;
        }
        if let Some(v) = parse_var(&lookup, ENV_MR_ROUNDS)? {
            settings.search.rounds = v;
        }
        if let Some(v) = parse_var(&lookup, ENV_PRIME_ATTEMPTS)? {
            settings.search.max_attempts = v;
        }
        Ok(settings)
    }
}

fn parse_var<F, T>(lookup: &F, name: &str) -> Result<Option<T>>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(name) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| GammaError::Config(format!("{name} is not a valid integer: {raw}"))),
    }
}
