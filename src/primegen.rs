//! Search for 32-bit Blum primes (`p ≡ 3 mod 4`).

use rand::{CryptoRng, RngCore};
use tracing::debug;

use crate::config::PrimeSearch;
use crate::error::{GammaError, Result};
use crate::primality::is_probable_prime;

const TOP_BIT: u64 = 1 << 31;

/// Forces a raw 32-bit draw into a candidate `>= 2^31` that is `≡ 3 (mod 4)`.
fn shape_candidate(raw: u32) -> u64 {
    let v = u64::from(raw) | TOP_BIT | 1;
    v + (3 - v % 4) % 4
}

/// Draws random 32-bit candidates until one passes Miller–Rabin.
///
/// Returns [`GammaError::PrimeGenerationFailure`] once `search.max_attempts`
/// candidates have been rejected.
pub fn generate_prime_3_mod_4<R>(rng: &mut R, search: &PrimeSearch) -> Result<u64>
where
    R: RngCore + CryptoRng,
{
    for attempt in 1..=search.max_attempts {
        let candidate = shape_candidate(rng.next_u32());
        if is_probable_prime(candidate, search.rounds, rng) {
            debug!(candidate, attempt, "found 32-bit prime congruent to 3 mod 4");
            return Ok(candidate);
        }
    }
    Err(GammaError::PrimeGenerationFailure {
        attempts: search.max_attempts,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn candidates_are_32_bit_and_3_mod_4() {
        for raw in [0u32, 1, 2, 0x7fff_fffc, 0xffff_fffc, 0xffff_fffd, u32::MAX] {
            let c = shape_candidate(raw);
            assert!(c >= TOP_BIT && c <= u64::from(u32::MAX), "{c:#x}");
            assert_eq!(c % 4, 3);
        }
    }

    #[test]
    fn generated_primes_satisfy_blum_condition() {
        let mut rng = StdRng::seed_from_u64(22);
        let search = PrimeSearch::default();
        for _ in 0..4 {
            let p = generate_prime_3_mod_4(&mut rng, &search).unwrap();
            assert!(p >= TOP_BIT && p <= u64::from(u32::MAX));
            assert_eq!(p % 4, 3);
            let mut check = StdRng::seed_from_u64(p);
            assert!(is_probable_prime(p, 32, &mut check));
        }
    }

    #[test]
    fn exhausted_search_fails() {
        let mut rng = StdRng::seed_from_u64(1);
        let search = PrimeSearch {
            rounds: 10,
            max_attempts: 0,
        };
        let err = generate_prime_3_mod_4(&mut rng, &search).unwrap_err();
        assert!(matches!(
            err,
            GammaError::PrimeGenerationFailure { attempts: 0 }
        ));
    }
}
