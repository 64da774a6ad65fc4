//! Pure, stateless 5-to-7 card hand evaluation.
//!
//! Operates directly on rank/suit bitmasks rather than enumerating 5-card
//! subsets: every category (straight, flush, quads, ...) has a
//! constant-time bitwise test over at most 13 rank bits and 4 suit lanes,
//! so evaluating a 7-card hand costs the same handful of instructions as a
//! 5-card one.

use crate::hand::Hand;
use crate::kickers::Kickers;
use crate::rank::Rank;
use crate::ranking::Ranking;
use crate::strength::Strength;
use crate::suit::Suit;

/// The wheel: A-2-3-4-5, bits for Two,Three,Four,Five (0..3) and Ace (12).
const WHEEL: u16 = 0b1_0000_0000_1111;

/// Evaluates 5, 6, or 7 cards and returns the best possible 5-card strength.
///
/// # Panics
/// Panics if `hand` has fewer than 5 or more than 7 cards, or contains
/// duplicate cards — both are programmer errors upstream, not user input,
/// per the evaluator's no-fail contract.
pub fn evaluate(hand: Hand) -> Strength {
    let n = hand.len();
    assert!((5..=7).contains(&n), "evaluator expects 5..=7 cards, got {n}");

    if let Some((top, suit)) = find_straight_flush(hand) {
        return Strength::new(Ranking::StraightFlush, Kickers::new(vec![top_of(suit, top)]));
    }

    let counts = rank_counts(hand);

    if let Some(quad) = find_n_of_a_kind(&counts, 4, None) {
        let kicker = best_kicker(hand.rank_mask(), &[quad], 1);
        return Strength::new(Ranking::FourOfAKind, Kickers::new(vec![quad, kicker[0]]));
    }

    if let Some(trip) = find_n_of_a_kind(&counts, 3, None) {
        if let Some(pair) = find_n_of_a_kind(&counts, 2, Some(trip))
            .or_else(|| find_n_of_a_kind(&counts, 3, Some(trip)))
        {
            return Strength::new(Ranking::FullHouse, Kickers::new(vec![trip, pair]));
        }
    }

    if let Some(suit) = find_flush_suit(hand) {
        let lane = hand.suit_lane(suit);
        let top5 = top_n_ranks(lane, 5);
        return Strength::new(Ranking::Flush, Kickers::new(top5));
    }

    if let Some(top) = find_straight(hand.rank_mask()) {
        return Strength::new(Ranking::Straight, Kickers::new(vec![top]));
    }

    if let Some(trip) = find_n_of_a_kind(&counts, 3, None) {
        let kickers = best_kicker(hand.rank_mask(), &[trip], 2);
        let mut ks = vec![trip];
        ks.extend(kickers);
        return Strength::new(Ranking::ThreeOfAKind, Kickers::new(ks));
    }

    if let Some(high_pair) = find_n_of_a_kind(&counts, 2, None) {
        if let Some(low_pair) = find_n_of_a_kind(&counts, 2, Some(high_pair)) {
            let kicker = best_kicker(hand.rank_mask(), &[high_pair, low_pair], 1);
            return Strength::new(
                Ranking::TwoPair,
                Kickers::new(vec![high_pair, low_pair, kicker[0]]),
            );
        }
        let kickers = best_kicker(hand.rank_mask(), &[high_pair], 3);
        let mut ks = vec![high_pair];
        ks.extend(kickers);
        return Strength::new(Ranking::OnePair, Kickers::new(ks));
    }

    let top5 = top_n_ranks(hand.rank_mask(), 5);
    Strength::new(Ranking::HighCard, Kickers::new(top5))
}

fn top_of(suit: Suit, top: Rank) -> Rank {
    let _ = suit;
    top
}

/// Per-rank suit counts: `counts[rank as usize]` is how many suits hold
/// that rank in `hand` (0..=4).
fn rank_counts(hand: Hand) -> [u8; 13] {
    let mut counts = [0u8; 13];
    for suit in Suit::all() {
        let lane = hand.suit_lane(suit);
        for (i, count) in counts.iter_mut().enumerate() {
            if lane & (1 << i) != 0 {
                *count += 1;
            }
        }
    }
    counts
}

/// Highest rank with at least `n` of a kind, excluding `exclude` if given.
/// Used both to find the primary group and, with `exclude` set, the second
/// group for full house / two pair.
fn find_n_of_a_kind(counts: &[u8; 13], n: u8, exclude: Option<Rank>) -> Option<Rank> {
    Rank::all().into_iter().rev().find(|&r| {
        counts[u8::from(r) as usize] >= n && Some(r) != exclude
    })
}

/// Top `n` distinct ranks from a 13-bit rank mask, excluding any in `skip`.
fn best_kicker(mask: u16, skip: &[Rank], n: usize) -> Vec<Rank> {
    let mut masked = mask;
    for &r in skip {
        masked &= !(1 << u8::from(r));
    }
    top_n_ranks(masked, n)
}

fn top_n_ranks(mask: u16, n: usize) -> Vec<Rank> {
    Rank::all()
        .into_iter()
        .rev()
        .filter(|r| mask & (1 << u8::from(*r)) != 0)
        .take(n)
        .collect()
}

/// Highest straight top rank present in a 13-bit rank mask, if any. The
/// wheel (A-2-3-4-5) is checked last since it is the weakest straight.
fn find_straight(mask: u16) -> Option<Rank> {
    for top in (4..=12u8).rev() {
        let window = 0b11111u16 << (top - 4);
        if mask & window == window {
            return Some(Rank::from(top));
        }
    }
    if mask & WHEEL == WHEEL {
        return Some(Rank::Five);
    }
    None
}

/// A suit holding 5 or more cards, if any. At most one suit can qualify in
/// a hand of 7 or fewer cards.
fn find_flush_suit(hand: Hand) -> Option<Suit> {
    Suit::all()
        .into_iter()
        .find(|&s| hand.suit_lane(s).count_ones() >= 5)
}

/// Straight-flush top rank and suit, if any.
fn find_straight_flush(hand: Hand) -> Option<(Rank, Suit)> {
    let suit = find_flush_suit(hand)?;
    let top = find_straight(hand.suit_lane(suit))?;
    Some((top, suit))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hand::Hand;

    fn hand(s: &str) -> Hand {
        Hand::try_from(s).unwrap()
    }

    #[test]
    fn royal_flush_beats_everything() {
        let royal = evaluate(hand("Ts Js Qs Ks As"));
        let quads = evaluate(hand("2c 2d 2h 2s Ah 7d 8h"));
        assert!(royal > quads);
        assert_eq!(royal.category(), Ranking::StraightFlush);
    }

    #[test]
    fn wheel_is_five_high_straight() {
        let wheel = evaluate(hand("As 2c 3d 4h 5s Kd Kc"));
        assert_eq!(wheel.category(), Ranking::Straight);
        assert_eq!(wheel.kickers().ranks(), &[Rank::Five]);
    }

    #[test]
    fn flush_beats_straight() {
        let flush = evaluate(hand("2s 5s 8s Js Ks 3d 4h"));
        let straight = evaluate(hand("4c 5d 6h 7s 8c 2d 3h"));
        assert!(flush > straight);
    }

    #[test]
    fn full_house_over_flush() {
        let boat = evaluate(hand("2c 2d 2h 5s 5d 9c Ah"));
        let flush = evaluate(hand("2s 5s 8s Js Ks 3d 4h"));
        assert!(boat > flush);
    }

    #[test]
    fn seven_card_picks_best_five() {
        // Two pair on the board plus pocket aces: best hand is trip aces
        // plus the two board pairs collapse to one kept as kicker pair.
        let s = evaluate(hand("Ah Ac 9s 9d 4c 4h 2s"));
        assert_eq!(s.category(), Ranking::TwoPair);
    }

    #[test]
    fn quad_beats_full_house() {
        let quad = evaluate(hand("7c 7d 7h 7s 2c 2d 9h"));
        assert_eq!(quad.category(), Ranking::FourOfAKind);
    }

    #[test]
    fn total_order_is_antisymmetric() {
        let a = evaluate(hand("As Ks Qs Js Ts"));
        let b = evaluate(hand("2c 3d 4h 5s 7d"));
        assert_eq!(a.cmp(&b), std::cmp::Ordering::Greater);
        assert_eq!(b.cmp(&a), std::cmp::Ordering::Less);
    }

    #[test]
    fn two_overlapping_trips_yield_full_house_not_two_trips() {
        let s = evaluate(hand("Kc Kd Kh Qs Qd Qc 2h"));
        assert_eq!(s.category(), Ranking::FullHouse);
        assert_eq!(s.kickers().ranks(), &[Rank::King, Rank::Queen]);
    }
}
