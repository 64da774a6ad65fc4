use poker_cards::{evaluate, Hand, Street, Strength};
use poker_core::Position;

use crate::seat::Seat;

/// A single seat's share of a single pot: winner positions plus amount.
#[derive(Debug, Clone)]
pub struct PotAward {
    pub winners: Vec<Position>,
    pub amount_each: poker_core::Chips,
    pub remainder: poker_core::Chips,
}

/// Result of running a variant's showdown comparison over one pot.
#[derive(Debug, Clone)]
pub struct ShowdownResult {
    pub high: PotAward,
    /// Present only for Hi-Lo variants when a qualifying low exists.
    pub low: Option<PotAward>,
}

/// The capability set a poker variant must provide.
///
/// Variants are composed from behavior, not inherited: Omaha Hi-Lo is not
/// "Omaha plus a subclass override", it is Omaha's hole/community rules
/// plus a low-hand qualifier bolted on via [`Variant::low_qualifier`].
/// This mirrors spec §9's explicit rejection of an inheritance hierarchy.
pub trait Variant {
    fn hole_card_count(&self) -> usize;
    /// Community cards are only meaningful for board variants; Stud/Draw
    /// return 0 for every street.
    fn community_card_count(&self, street: Street) -> usize;
    fn streets(&self) -> &'static [Street] {
        &[Street::Pref, Street::Flop, Street::Turn, Street::Rive]
    }

    /// Builds the best evaluable hand for a seat given their hole cards and
    /// the shared board. Omaha variants must use exactly 2 hole + 3 board
    /// (enforced here, not left to the evaluator); Hold'em allows any mix.
    fn best_hand(&self, hole: Hand, board: Hand) -> Strength;

    /// For Hi-Lo variants, the best *qualifying* low hand, if any (e.g.
    /// 8-or-better for Omaha Hi-Lo). `None` means either no qualifying low
    /// exists or the variant has no low side at all.
    fn low_qualifier(&self, _hole: Hand, _board: Hand) -> Option<LowHand> {
        None
    }

    fn has_low(&self) -> bool {
        false
    }

    /// Splits one pot's chips among its eligible, contesting seats.
    fn determine_winners(&self, seats: &[Seat], eligible: &[Position], board: Hand, pot_amount: poker_core::Chips) -> ShowdownResult {
        let seat_at = |p: Position| seats.iter().find(|s| s.seat_index == p).expect("eligible position must name a seat present in `seats`");

        let contesting: Vec<Position> = eligible
            .iter()
            .copied()
            .filter(|&p| seat_at(p).status.is_contesting())
            .collect();

        let high_strengths: Vec<(Position, Strength)> = contesting
            .iter()
            .map(|&p| (p, self.best_hand(seat_at(p).hole_cards, board)))
            .collect();
        let best_high = high_strengths.iter().map(|(_, s)| s).max().cloned().unwrap();
        let high_winners: Vec<Position> = high_strengths
            .iter()
            .filter(|(_, s)| *s == best_high)
            .map(|(p, _)| *p)
            .collect();

        if !self.has_low() {
            let (each, remainder) = split(pot_amount, high_winners.len() as u32);
            return ShowdownResult {
                high: PotAward { winners: high_winners, amount_each: each, remainder },
                low: None,
            };
        }

        let low_strengths: Vec<(Position, LowHand)> = contesting
            .iter()
            .filter_map(|&p| self.low_qualifier(seat_at(p).hole_cards, board).map(|s| (p, s)))
            .collect();

        if low_strengths.is_empty() {
            // No qualifying low: high hand takes the whole pot (scoop).
            let (each, remainder) = split(pot_amount, high_winners.len() as u32);
            return ShowdownResult {
                high: PotAward { winners: high_winners, amount_each: each, remainder },
                low: None,
            };
        }

        let best_low = low_strengths.iter().map(|(_, s)| s).min().cloned().unwrap();
        let low_winners: Vec<Position> = low_strengths
            .iter()
            .filter(|(_, s)| *s == best_low)
            .map(|(p, _)| *p)
            .collect();

        let high_half = pot_amount / 2;
        let low_half = pot_amount - high_half;
        let (high_each, high_remainder) = split(high_half, high_winners.len() as u32);
        let (low_each, low_remainder) = split(low_half, low_winners.len() as u32);
        ShowdownResult {
            high: PotAward { winners: high_winners, amount_each: high_each, remainder: high_remainder },
            low: Some(PotAward { winners: low_winners, amount_each: low_each, remainder: low_remainder }),
        }
    }
}

fn split(amount: poker_core::Chips, winners: u32) -> (poker_core::Chips, poker_core::Chips) {
    if winners == 0 {
        return (0, amount);
    }
    (amount / winners, amount % winners)
}

pub struct HoldEmVariant;
impl Variant for HoldEmVariant {
    fn hole_card_count(&self) -> usize {
        2
    }
    fn community_card_count(&self, street: Street) -> usize {
        street.n_revealed_community()
    }
    fn best_hand(&self, hole: Hand, board: Hand) -> Strength {
        evaluate(hole.union(board))
    }
}

pub struct OmahaVariant;
impl Variant for OmahaVariant {
    fn hole_card_count(&self) -> usize {
        4
    }
    fn community_card_count(&self, street: Street) -> usize {
        street.n_revealed_community()
    }
    fn best_hand(&self, hole: Hand, board: Hand) -> Strength {
        best_omaha_hand(hole, board, |h, b| evaluate(h.union(b)))
    }
}

pub struct OmahaHiLoVariant;
impl Variant for OmahaHiLoVariant {
    fn hole_card_count(&self) -> usize {
        4
    }
    fn community_card_count(&self, street: Street) -> usize {
        street.n_revealed_community()
    }
    fn best_hand(&self, hole: Hand, board: Hand) -> Strength {
        best_omaha_hand(hole, board, |h, b| evaluate(h.union(b)))
    }
    fn has_low(&self) -> bool {
        true
    }
    fn low_qualifier(&self, hole: Hand, board: Hand) -> Option<LowHand> {
        best_omaha_low(hole, board)
    }
}

pub struct StudVariant;
impl Variant for StudVariant {
    fn hole_card_count(&self) -> usize {
        7
    }
    fn community_card_count(&self, _street: Street) -> usize {
        0
    }
    fn best_hand(&self, hole: Hand, _board: Hand) -> Strength {
        evaluate(hole)
    }
}

pub struct DrawVariant;
impl Variant for DrawVariant {
    fn hole_card_count(&self) -> usize {
        5
    }
    fn community_card_count(&self, _street: Street) -> usize {
        0
    }
    fn best_hand(&self, hole: Hand, _board: Hand) -> Strength {
        evaluate(hole)
    }
}

/// Enumerates every way to pick exactly 2 of the 4 hole cards combined with
/// exactly 3 of the board, since Omaha forbids using any other split.
fn best_omaha_hand(hole: Hand, board: Hand, score: impl Fn(Hand, Hand) -> Strength) -> Strength {
    let hole_cards: Vec<_> = hole.iter().collect();
    let board_cards: Vec<_> = board.iter().collect();
    let mut best: Option<Strength> = None;
    for hi in 0..hole_cards.len() {
        for hj in (hi + 1)..hole_cards.len() {
            let two_hole = Hand::empty().add(hole_cards[hi]).add(hole_cards[hj]);
            for bi in 0..board_cards.len() {
                for bj in (bi + 1)..board_cards.len() {
                    for bk in (bj + 1)..board_cards.len() {
                        let three_board = Hand::empty()
                            .add(board_cards[bi])
                            .add(board_cards[bj])
                            .add(board_cards[bk]);
                        let s = score(two_hole, three_board);
                        best = Some(match best {
                            Some(b) if b >= s => b,
                            _ => s,
                        });
                    }
                }
            }
        }
    }
    best.expect("board and hole must be non-empty by the time best_hand is called")
}

/// An 8-or-better low hand's five pip values, descending, Ace counted as
/// the lowest pip (1). `Ord` is plain lexicographic `Vec<u8>` comparison,
/// which happens to implement ace-to-five ranking exactly: compare the
/// highest pip first, the hand with the smaller high pip wins, ties break
/// card by card down to the low end. A smaller `LowHand` is a *better*
/// low, so callers pick the winner with `Iterator::min`.
///
/// This is deliberately independent of [`Rank`](poker_cards::Rank)'s `Ord`,
/// which ranks Ace high — reusing it here would make the wheel low
/// (A-2-3-4-5) compare as the *worst* low instead of the best.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct LowHand(Vec<u8>);

/// Best qualifying 8-or-better low using exactly 2 hole + 3 board cards, by
/// A-5 lowball rules (straights/flushes don't count against a low, aces
/// play low). Returns `None` if no combination of 5 distinct ranks at or
/// under eight exists.
fn best_omaha_low(hole: Hand, board: Hand) -> Option<LowHand> {
    let hole_cards: Vec<_> = hole.iter().collect();
    let board_cards: Vec<_> = board.iter().collect();
    let mut best: Option<LowHand> = None;

    for hi in 0..hole_cards.len() {
        for hj in (hi + 1)..hole_cards.len() {
            for bi in 0..board_cards.len() {
                for bj in (bi + 1)..board_cards.len() {
                    for bk in (bj + 1)..board_cards.len() {
                        let five = [hole_cards[hi], hole_cards[hj], board_cards[bi], board_cards[bj], board_cards[bk]];
                        if let Some(candidate) = qualifying_low_pips(&five) {
                            best = Some(match best {
                                Some(b) if b <= candidate => b,
                                _ => candidate,
                            });
                        }
                    }
                }
            }
        }
    }
    best
}

fn qualifying_low_pips(cards: &[poker_cards::Card]) -> Option<LowHand> {
    let mut pips: Vec<u8> = cards.iter().map(|c| pip_value_for_low(c.rank())).collect();
    pips.sort_unstable();
    pips.dedup();
    if pips.len() != 5 {
        return None; // a pair among the five kills low eligibility
    }
    if *pips.last().unwrap() > 8 {
        return None;
    }
    pips.reverse(); // descending, so Vec<u8> Ord matches ace-to-five ranking
    Some(LowHand(pips))
}

/// Ace-low pip value: Ace = 1, face cards already excluded by the
/// 8-or-better ceiling so only 2..8 and Ace ever pass.
fn pip_value_for_low(rank: poker_cards::Rank) -> u8 {
    match rank {
        poker_cards::Rank::Ace => 1,
        other => u8::from(other) + 2,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use poker_cards::Card;

    fn hand_of(cards: &[&str]) -> Hand {
        cards.iter().map(|s| Card::try_from(*s).unwrap()).collect()
    }

    #[test]
    fn holdem_uses_all_seven_cards() {
        let variant = HoldEmVariant;
        let hole = hand_of(&["As", "Ks"]);
        let board = hand_of(&["Qs", "Js", "Ts", "2c", "3d"]);
        let strength = variant.best_hand(hole, board);
        assert_eq!(strength.category(), poker_cards::Ranking::StraightFlush);
    }

    #[test]
    fn omaha_must_use_exactly_two_hole_cards() {
        let variant = OmahaVariant;
        // Four suited hole cards look like a flush draw, but the board has
        // no three-card suited run to pair with any two; best hand should
        // not be a flush unless two hole + three board cards actually make one.
        let hole = hand_of(&["As", "2s", "3s", "4s"]);
        let board = hand_of(&["5s", "6d", "7h", "8c", "9d"]);
        let strength = variant.best_hand(hole, board);
        assert_ne!(strength.category(), poker_cards::Ranking::Flush);
    }

    #[test]
    fn omaha_hi_lo_finds_no_low_above_eight() {
        let variant = OmahaHiLoVariant;
        let hole = hand_of(&["9s", "Ts", "Js", "Qs"]);
        let board = hand_of(&["Ks", "Ac", "2d", "3h", "4c"]);
        assert!(variant.low_qualifier(hole, board).is_none());
    }

    #[test]
    fn omaha_hi_lo_finds_eight_low() {
        let variant = OmahaHiLoVariant;
        let hole = hand_of(&["Ac", "2d", "9s", "Ts"]);
        let board = hand_of(&["3h", "4c", "8d", "Ks", "Qs"]);
        assert!(variant.low_qualifier(hole, board).is_some());
    }
}
