//! Cryptographic shuffling with an auditable, non-repudiable record of how
//! the deck was ordered.

use std::time::{SystemTime, UNIX_EPOCH};

use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;
use sha2::{Digest, Sha256};

use crate::card::Card;
use crate::deck::Deck;

/// Everything needed to later prove a shuffle was committed to before a
/// hand began, without revealing the seed itself.
#[derive(Debug, Clone)]
pub struct ShuffleAuditRecord {
    pub table_id: uuid::Uuid,
    pub hand_id: uuid::Uuid,
    /// `sha256(seed || hand_id)`. Never invertible to the seed; a regulator
    /// with the seed in hand can recompute it and compare.
    pub seed_commitment_hash: [u8; 32],
    pub algorithm_name: &'static str,
    pub prng_name: &'static str,
    pub permutation: Vec<Card>,
    pub timestamp_unix_secs: u64,
}

/// Produces unbiased deck permutations and their audit trail.
pub struct Shuffler {
    rng: ChaCha20Rng,
    seed: [u8; 32],
}

impl Shuffler {
    /// Seeds from the platform's secure random source. Used in production;
    /// the seed is held only long enough to compute the commitment hash
    /// and is never logged or returned.
    pub fn cryptographic() -> Self {
        let mut seed = [0u8; 32];
        rand::rngs::OsRng.fill_bytes(&mut seed);
        Self {
            rng: ChaCha20Rng::from_seed(seed),
            seed,
        }
    }
    /// Seeds deterministically from a caller-supplied byte string. Identical
    /// seeds produce identical permutations — for tests and replay only.
    pub fn deterministic(seed: [u8; 32]) -> Self {
        Self {
            rng: ChaCha20Rng::from_seed(seed),
            seed,
        }
    }

    /// Shuffles a fresh 52-card deck via Fisher-Yates with rejection-sampled
    /// unbiased index draws, and returns both the resulting deck and the
    /// audit record committing to it.
    pub fn shuffle(&mut self, table_id: uuid::Uuid, hand_id: uuid::Uuid) -> (Deck, ShuffleAuditRecord) {
        let mut cards = Card::deck();
        for i in (1..cards.len()).rev() {
            let j = unbiased_index(&mut self.rng, i as u32) as usize;
            cards.swap(i, j);
        }
        let mut hasher = Sha256::new();
        hasher.update(self.seed);
        hasher.update(hand_id.as_bytes());
        let seed_commitment_hash: [u8; 32] = hasher.finalize().into();

        let record = ShuffleAuditRecord {
            table_id,
            hand_id,
            seed_commitment_hash,
            algorithm_name: "Fisher-Yates",
            prng_name: "ChaCha20Rng",
            permutation: cards.clone(),
            timestamp_unix_secs: SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .expect("system clock before unix epoch")
                .as_secs(),
        };
        (Deck::from_order(cards), record)
    }
}

/// Draws an unbiased random integer in `0..=bound` from `rng`, rejecting
/// samples that would introduce modulo bias rather than reducing them with
/// `%` directly.
fn unbiased_index<R: RngCore>(rng: &mut R, bound: u32) -> u32 {
    let range = bound as u64 + 1;
    let limit = ((u32::MAX as u64 + 1) / range) * range;
    loop {
        let candidate = rng.next_u32() as u64;
        if candidate < limit {
            return (candidate % range) as u32;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shuffle_produces_all_52_distinct_cards() {
        let mut shuffler = Shuffler::deterministic([7u8; 32]);
        let (deck, _) = shuffler.shuffle(uuid::Uuid::nil(), uuid::Uuid::nil());
        assert_eq!(deck.len(), 52);
        let unique: std::collections::HashSet<_> =
            deck.as_slice().iter().map(|c| u8::from(*c)).collect();
        assert_eq!(unique.len(), 52);
    }

    #[test]
    fn deterministic_seed_reproduces_permutation() {
        let mut a = Shuffler::deterministic([42u8; 32]);
        let mut b = Shuffler::deterministic([42u8; 32]);
        let hand = uuid::Uuid::nil();
        let (deck_a, _) = a.shuffle(uuid::Uuid::nil(), hand);
        let (deck_b, _) = b.shuffle(uuid::Uuid::nil(), hand);
        assert_eq!(deck_a.as_slice(), deck_b.as_slice());
    }

    #[test]
    fn different_seeds_produce_different_permutations() {
        let mut a = Shuffler::deterministic([1u8; 32]);
        let mut b = Shuffler::deterministic([2u8; 32]);
        let hand = uuid::Uuid::nil();
        let (deck_a, _) = a.shuffle(uuid::Uuid::nil(), hand);
        let (deck_b, _) = b.shuffle(uuid::Uuid::nil(), hand);
        assert_ne!(deck_a.as_slice(), deck_b.as_slice());
    }

    #[test]
    fn seed_commitment_does_not_equal_raw_seed() {
        let mut shuffler = Shuffler::deterministic([9u8; 32]);
        let (_, record) = shuffler.shuffle(uuid::Uuid::nil(), uuid::Uuid::nil());
        assert_ne!(record.seed_commitment_hash, [9u8; 32]);
        assert_eq!(record.algorithm_name, "Fisher-Yates");
    }

    #[test]
    fn unbiased_index_never_exceeds_bound() {
        let mut rng = ChaCha20Rng::from_seed([3u8; 32]);
        for _ in 0..10_000 {
            let v = unbiased_index(&mut rng, 5);
            assert!(v <= 5);
        }
    }
}
