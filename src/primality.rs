//! Miller–Rabin probabilistic primality test.
//!
//! Candidates are first trial-divided by the primes up to 29, which settles
//! every small input exactly.  Larger candidates face `rounds` random
//! witnesses; a composite survives a single witness with probability at most
//! 1/4, so the false-positive rate is bounded by `4^-rounds`.

use rand::Rng;

use crate::modular::Modulus;

/// Primes used for trial division before any witness is drawn.
pub const SMALL_PRIMES: [u64; 10] = [2, 3, 5, 7, 11, 13, 17, 19, 23, 29];

/// Returns `true` if `n` is probably prime after `rounds` random witnesses.
///
/// The result depends only on `n`, `rounds` and the values drawn from `rng`.
pub fn is_probable_prime<R: Rng + ?Sized>(n: u64, rounds: u32, rng: &mut R) -> bool {
    if n < 2 {
        return false;
    }
    for &p in &SMALL_PRIMES {
        if n % p == 0 {
            return n == p;
        }
    }

    // n - 1 = d * 2^s with d odd
    let mut d = n - 1;
    let mut s = 0u32;
    while d % 2 == 0 {
        d /= 2;
        s += 1;
    }

    let ring = Modulus::new(n);
    'witness: for _ in 0..rounds {
        let a = rng.gen_range(2..=n - 2);
        let mut x = ring.pow(a, d);
        if x == 1 || x == n - 1 {
            continue;
        }
        for _ in 1..s {
            x = ring.square(x);
            if x == n - 1 {
                continue 'witness;
            }
        }
        return false;
    }
    true
}
