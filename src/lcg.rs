//! The design philosophy underlying `gamma_stream` is pedagogical, yet mathematically rigorous.
//! Each module encapsulates a discrete concept from classical pseudorandom generation,
//! illustrating how modest abstractions compose into a cohesive keystream pipeline.
//!
//! This crate aspires to bridge gaps between theoretical exposition and practical engineering,
//! serving both as a didactic resource and a foundation for future cryptographic coursework.
//! Linear congruential generator, the fast first stage.
//!
//! The generator is deliberately weak: it only supplies seeds for the
//! Blum–Blum–Shub stage and receives feedback from it after every round.

/// Modulus of the first stage, fixed at `2^20`.
pub const LCG_MODULUS: u64 = 1 << 20;
/// Default multiplier (Numerical Recipes).
pub const DEFAULT_LCG_A: u64 = 1_664_525;
/// Default increment (Numerical Recipes).
pub const DEFAULT_LCG_B: u64 = 1_013_904_223;

/// Deterministic recurrence `s' = (a·s + b) mod m`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lcg {
    a: u64,
    b: u64,
    m: u64,
    state: u64,
}

impl Lcg {
    /// Creates a generator; `seed` is reduced modulo `m`.
    ///
    /// # Panics
    ///
    /// Panics if `m` is zero.
    pub fn new(a: u64, b: u64, m: u64, seed: u64) -> Self {
        assert!(m != 0, "modulus must be non-zero");
        Self {
            a,
            b,
            m,
            state: seed % m,
        }
    }

    /// Creates a generator over the fixed `2^20` modulus.
    pub fn with_default_modulus(a: u64, b: u64, seed: u64) -> Self {
        Self::new(a, b, LCG_MODULUS, seed)
    }

    /// Returns the multiplier.
    pub fn multiplier(&self) -> u64 {
        self.a
    }

    /// Returns the increment.
    pub fn increment(&self) -> u64 {
        self.b
    }

    /// Returns the modulus.
    pub fn modulus(&self) -> u64 {
        self.m
    }

    /// Returns the current state.
    pub fn state(&self) -> u64 {
        self.state
    }

    /// Replaces the current state with `state mod m`.
    pub fn set_state(&mut self, state: u64) {
        self.state = state % self.m;
    }

    /// Advances the recurrence and returns the new state.
    pub fn next(&mut self) -> u64 {
        let wide = self.a as u128 * self.state as u128 + self.b as u128;
        self.state = (wide % self.m as u128) as u64;
        self.state
    }

    /// Returns the next `n` states in order.
    pub fn generate_n(&mut self, n: usize) -> Vec<u64> {
        (0..n).map(|_| self.next()).collect()
    }
}
