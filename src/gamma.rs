//! Two-stage gamma generator coupling the LCG and BBS stages.
//!
//! Each round draws seven LCG values, sums them without reduction and uses
//! the sum to seed a fresh [`Bbs`] instance.  Five 64-bit BBS outputs are
//! appended to the keystream, and the top 20 bits of the fifth become the new
//! LCG state.  Rounds repeat until enough bits are available, and the result
//! is truncated to exactly the requested length.
//!
//! Round `k`'s feedback seeds round `k + 1`, so the keystream depends on the
//! exact per-round ordering, not only on the total number of bits.

use tracing::{debug, trace};

use crate::bbs::Bbs;
use crate::bits::BitString;
use crate::lcg::Lcg;

/// LCG draws summed into each BBS seed.
pub const LCG_DRAWS_PER_ROUND: usize = 7;
/// BBS outputs taken per round.
pub const BBS_OUTPUTS_PER_ROUND: usize = 5;
/// Width of a single BBS output block.
pub const BLOCK_BITS: u32 = 64;
/// Bits fed back from the last block of a round into the LCG.
pub const FEEDBACK_BITS: u32 = 20;
/// Keystream bits produced by one round.
pub const BITS_PER_ROUND: usize = BBS_OUTPUTS_PER_ROUND * BLOCK_BITS as usize;

/// The two BBS primes of a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BbsPrimes {
    /// First prime, `≡ 3 (mod 4)`.
    pub p: u64,
    /// Second prime, `≡ 3 (mod 4)`.
    pub q: u64,
}

/// Keystream produced by [`generate`] together with the advanced LCG.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Gamma {
    /// Exactly the requested number of keystream bits.
    pub bits: BitString,
    /// Every BBS output consumed, in order, for auditing.
    pub blocks: Vec<u64>,
    /// Number of rounds executed.
    pub rounds: usize,
    /// First-stage generator after the last feedback step.
    pub lcg: Lcg,
}

impl Gamma {
    /// Renders every block as 16 lowercase hex digits.
    pub fn blocks_hex(&self) -> Vec<String> {
        self.blocks
            .iter()
            .map(|block| hex::encode(block.to_be_bytes()))
            .collect()
    }
}

/// Top `FEEDBACK_BITS` bits of a 64-bit block.
#[inline]
fn feedback_value(block: u64) -> u64 {
    block >> (BLOCK_BITS - FEEDBACK_BITS)
}

/// Runs one round: seeds BBS from seven LCG draws, then reseeds the LCG.
fn run_round(lcg: &mut Lcg, primes: &BbsPrimes) -> Vec<u64> {
    let seed: u128 = lcg
        .generate_n(LCG_DRAWS_PER_ROUND)
        .into_iter()
        .map(u128::from)
        .sum();
    let mut bbs = Bbs::new(primes.p, primes.q, seed);
    let outputs = bbs.outputs(BBS_OUTPUTS_PER_ROUND);
    // Only the fifth block feeds back.
    if let Some(&last) = outputs.last() {
        lcg.set_state(feedback_value(last));
    }
    trace!(seed = %seed, lcg_state = lcg.state(), "gamma round");
    outputs
}

/// Generates `required_bits` of keystream starting from `lcg`.
///
/// The generator is consumed and handed back advanced in [`Gamma::lcg`];
/// callers persist that state so the next session continues the keystream.
pub fn generate(mut lcg: Lcg, primes: &BbsPrimes, required_bits: usize) -> Gamma {
    let rounds = required_bits.div_ceil(BITS_PER_ROUND);
    let mut bits = BitString::with_capacity(rounds * BITS_PER_ROUND);
    let mut blocks = Vec::with_capacity(rounds * BBS_OUTPUTS_PER_ROUND);
    let mut executed = 0;
    while bits.len() < required_bits {
        for block in run_round(&mut lcg, primes) {
            bits.push_word(block, BLOCK_BITS);
            blocks.push(block);
        }
        executed += 1;
    }
    bits.truncate(required_bits);
    debug!(required_bits, rounds = executed, "gamma generated");
    Gamma {
        bits,
        blocks,
        rounds: executed,
        lcg,
    }
}
