//! The design philosophy underlying `gamma_stream` is pedagogical, yet mathematically rigorous.
//! Each module encapsulates a discrete concept from classical pseudorandom generation,
//! illustrating how modest abstractions compose into a cohesive keystream pipeline.
//!
//! This crate aspires to bridge gaps between theoretical exposition and practical engineering,
//! serving both as a didactic resource and a foundation for future cryptographic coursework.
//! Modular arithmetic over a `u64` modulus.
//!
//! The [`Modulus`](struct.Modulus.html) type wraps an arbitrary modulus
//! (prime or composite) and exposes multiplication, squaring and
//! exponentiation.  Every product is formed in `u128`, so the operations are
//! exact for any modulus up to `u64::MAX`, which covers Blum integers built
//! from two 32-bit primes.

/// A residue ring `Z/nZ` defined by a modulus `n >= 2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Modulus {
    n: u64,
}

impl Modulus {
    /// Creates a ring with the given modulus.
    ///
    /// # Panics
    ///
    /// Panics if the modulus is less than 2.
    pub fn new(n: u64) -> Self {
        assert!(n >= 2, "modulus must be at least 2");
        Modulus { n }
    }

    /// Returns the modulus.
    #[inline]
    pub fn value(&self) -> u64 {
        self.n
    }

    /// Reduces an arbitrary-width value into `[0, n)`.
    #[inline]
    pub fn reduce(&self, a: u128) -> u64 {
        (a % self.n as u128) as u64
    }

    /// Multiplies two residues.
    #[inline]
    pub fn mul(&self, a: u64, b: u64) -> u64 {
        let a = a % self.n;
        let b = b % self.n;
        ((a as u128 * b as u128) % self.n as u128) as u64
    }

    /// Squares a residue.
    #[inline]
    pub fn square(&self, a: u64) -> u64 {
        self.mul(a, a)
    }

    /// Exponentiates `a` by `e` modulo `n`.
    #[inline]
    pub fn pow(&self, mut a: u64, mut e: u64) -> u64 {
        a %= self.n;
        let mut result = 1u64;
        while e > 0 {
            if e & 1 == 1 {
                result = self.mul(result, a);
            }
            a = self.mul(a, a);
            e >>= 1;
        }
        result
    }
}

/// Greatest common divisor by the Euclidean algorithm.
pub fn gcd(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        let t = a % b;
        a = b;
        b = t;
    }
    a
}
