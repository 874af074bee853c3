//! Blum–Blum–Shub generator, the quadratic-residue second stage.
//!
//! The state is squared modulo a Blum integer `n = p·q` on every step, so
//! after construction it is always a quadratic residue.  A fresh instance is
//! built for every gamma round from the sum of seven LCG draws.

use tracing::trace;

use crate::modular::{gcd, Modulus};

/// Repeated-squaring generator over `n = p·q`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bbs {
    ring: Modulus,
    state: u64,
}

impl Bbs {
    /// Builds a generator from two primes and an arbitrary-width seed.
    ///
    /// A seed sharing a factor with `n` is incremented until it is coprime;
    /// the repair is deterministic so both cipher directions agree.  The
    /// initial state is `seed² mod n`.
    ///
    /// # Panics
    ///
    /// Panics if `p·q` overflows `u64` or is less than 2.
    pub fn new(p: u64, q: u64, seed: u128) -> Self {
        let n = match p.checked_mul(q) {
            Some(n) => n,
            None => panic!("p·q must fit in 64 bits"),
        };
        let ring = Modulus::new(n);
        // Incrementing the seed and incrementing its residue pick the same state.
        let mut s = ring.reduce(seed);
        if gcd(s, n) != 1 {
            let original = s;
            while gcd(s, n) != 1 {
                s = (s + 1) % n;
            }
            trace!(original, repaired = s, "seed shares a factor with modulus");
        }
        Self {
            ring,
            state: ring.square(s),
        }
    }

    /// Returns the modulus `n`.
    pub fn modulus(&self) -> u64 {
        self.ring.value()
    }

    /// Returns the current state.
    pub fn state(&self) -> u64 {
        self.state
    }

    /// Squares the state and returns it.
    pub fn next_state(&mut self) -> u64 {
        self.state = self.ring.square(self.state);
        self.state
    }

    /// Returns `count` successive states truncated to their low 64 bits.
    pub fn outputs(&mut self, count: usize) -> Vec<u64> {
        // n < 2^64, so every state already fits the 64-bit block.
        (0..count).map(|_| self.next_state()).collect()
    }
}
