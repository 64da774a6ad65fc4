use poker_cards::{Deck, Hand, Street};
use poker_core::{Chips, Position};

use crate::config::TableConfig;
use crate::seat::{Seat, SeatStatus};
use crate::variant::Variant;

/// Deals each contesting seat its hole cards for the hand, lowest seat
/// index first, one card at a time around the table — the order a real
/// dealer would use, rather than dealing one seat's full hand before
/// moving to the next. Matters for Stud, whose later streets deal
/// additional hole cards only to seats still in the hand.
pub fn deal_hole(seats: &mut [Option<Seat>], deck: &mut Deck, count: usize) {
    for _ in 0..count {
        for seat in seats.iter_mut() {
            if let Some(seat) = seat {
                if seat.status.is_contesting() {
                    let card = deck.deal(1);
                    seat.hole_cards = seat.hole_cards.union(card.into_iter().collect());
                }
            }
        }
    }
}

/// Appends the board cards revealed on entry to `street`, for
/// community-card variants. A no-op (zero cards) for Stud/Draw, whose
/// `Variant::community_card_count` returns zero on every street.
pub fn deal_community(board: &mut Hand, deck: &mut Deck, variant: &dyn Variant, street: Street) {
    let n = variant.community_card_count(street);
    if n == 0 {
        return;
    }
    *board = board.union(deck.deal(n).into_iter().collect());
}

/// Small and big blind seats, posted and debited.
///
/// Heads-up is the one case where button and small blind are the same
/// seat; `seats` must already exclude anyone not ready for this hand (the
/// caller filters by `SeatStatus::Active` at hand start).
pub struct BlindsPosted {
    pub small_blind_seat: Position,
    pub big_blind_seat: Position,
}

/// Identifies the blind seats relative to the button and debits them,
/// capping each post at the seat's stack (a short stack posts all-in).
/// Returns `None` if fewer than two contesting seats exist.
pub fn collect_blinds(
    seats: &mut [Option<Seat>],
    config: &TableConfig,
    dealer_button: Position,
) -> Option<BlindsPosted> {
    // Inclusive of the button itself: heads-up, the button *is* the small
    // blind, so it must appear as the first entry rather than be skipped.
    let order = seats_clockwise_inclusive(seats, dealer_button);
    if order.len() < 2 {
        return None;
    }
    // Heads-up: button posts small blind, the other seat posts big blind.
    let (sb_index, bb_index) = if order.len() == 2 {
        (order[0], order[1])
    } else {
        (order[1], order[2])
    };
    if let Some(seat) = seats[sb_index].as_mut() {
        let paid = seat.commit(config.small_blind);
        seat.current_bet = paid;
        seat.total_invested = paid;
    }
    if let Some(seat) = seats[bb_index].as_mut() {
        let paid = seat.commit(config.big_blind);
        seat.current_bet = paid;
        seat.total_invested = paid;
    }
    Some(BlindsPosted {
        small_blind_seat: sb_index,
        big_blind_seat: bb_index,
    })
}

/// The first seat to act, given the phase.
///
/// Preflop: the seat left of the big blind (so, two seats past the small
/// blind, three past the button). Post-flop: the first contesting seat
/// left of the button.
pub fn first_actor(
    seats: &[Option<Seat>],
    dealer_button: Position,
    big_blind_seat: Option<Position>,
    is_preflop: bool,
) -> Option<Position> {
    let from = if is_preflop {
        big_blind_seat.unwrap_or(dealer_button)
    } else {
        dealer_button
    };
    seats_clockwise_from(seats, from)
        .into_iter()
        .find(|&p| seat_can_act(seats, p))
}

fn seat_can_act(seats: &[Option<Seat>], index: Position) -> bool {
    matches!(seats[index].as_ref().map(|s| s.status), Some(SeatStatus::Active))
}

/// Seat indices in clockwise order starting just after `from`, restricted
/// to occupied seats. `from` itself is never included.
fn seats_clockwise_from(seats: &[Option<Seat>], from: Position) -> Vec<Position> {
    let n = seats.len();
    (1..=n)
        .map(|offset| (from + offset) % n)
        .filter(|i| seats[*i].is_some())
        .collect()
}

/// Like [`seats_clockwise_from`] but starting at `from` itself, which is
/// included first if occupied. Used for blind posting, where the button
/// seat is the reference point for heads-up small blind assignment.
fn seats_clockwise_inclusive(seats: &[Option<Seat>], from: Position) -> Vec<Position> {
    let n = seats.len();
    (0..n)
        .map(|offset| (from + offset) % n)
        .filter(|i| seats[*i].is_some())
        .collect()
}

/// Whether `seat_index` was occupied by a seat that was not `SittingOut`
/// when the hand began — the eligibility test for holding the button.
pub fn button_holder_eligible(seats: &[Option<Seat>], seat_index: Position) -> bool {
    matches!(
        seats[seat_index].as_ref().map(|s| s.status),
        Some(SeatStatus::Active) | Some(SeatStatus::AllIn)
    )
}

/// Chips each contesting seat owes this street to match the current bet.
pub fn call_amount(seat: &Seat, current_bet: Chips) -> Chips {
    current_bet.saturating_sub(seat.current_bet)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{FeatureFlags, GameType};
    use crate::seat::Player;
    use poker_cards::Deck;
    use poker_core::ID;
    use std::time::Duration;

    fn config() -> TableConfig {
        TableConfig {
            table_id: ID::random(),
            game_type: GameType::HoldEm,
            betting_structure: crate::betting::BettingStructure::NoLimit,
            min_players: 2,
            max_players: 10,
            small_blind: 5,
            big_blind: 10,
            buy_in_min: 100,
            buy_in_max: 1000,
            action_timeout: Duration::from_secs(30),
            feature_flags: FeatureFlags::default(),
        }
    }

    fn seat(index: Position, chips: Chips) -> Option<Seat> {
        Some(Seat::new(index, ID::<Player>::random(), format!("P{index}"), chips))
    }

    #[test]
    fn heads_up_blinds_button_is_small_blind() {
        let mut seats = vec![seat(0, 1000), seat(1, 1000)];
        let posted = collect_blinds(&mut seats, &config(), 0).unwrap();
        assert_eq!(posted.small_blind_seat, 0);
        assert_eq!(posted.big_blind_seat, 1);
        assert_eq!(seats[0].as_ref().unwrap().current_bet, 5);
        assert_eq!(seats[1].as_ref().unwrap().current_bet, 10);
    }

    #[test]
    fn three_handed_blinds_skip_the_button() {
        let mut seats = vec![seat(0, 1000), seat(1, 1000), seat(2, 1000)];
        let posted = collect_blinds(&mut seats, &config(), 0).unwrap();
        assert_eq!(posted.small_blind_seat, 1);
        assert_eq!(posted.big_blind_seat, 2);
    }

    #[test]
    fn short_stack_blind_is_capped() {
        let mut seats = vec![seat(0, 1000), seat(1, 3)];
        let posted = collect_blinds(&mut seats, &config(), 0).unwrap();
        assert_eq!(posted.big_blind_seat, 1);
        assert_eq!(seats[1].as_ref().unwrap().current_bet, 3);
        assert_eq!(seats[1].as_ref().unwrap().status, SeatStatus::AllIn);
    }

    #[test]
    fn preflop_first_actor_is_left_of_big_blind() {
        let seats = vec![seat(0, 1000), seat(1, 1000), seat(2, 1000)];
        let actor = first_actor(&seats, 0, Some(2), true);
        assert_eq!(actor, Some(0));
    }

    #[test]
    fn postflop_first_actor_is_left_of_button() {
        let seats = vec![seat(0, 1000), seat(1, 1000), seat(2, 1000)];
        let actor = first_actor(&seats, 0, None, false);
        assert_eq!(actor, Some(1));
    }

    #[test]
    fn deal_hole_gives_every_contesting_seat_variant_count() {
        let mut seats = vec![seat(0, 1000), seat(1, 1000)];
        let mut deck = Deck::fresh();
        deal_hole(&mut seats, &mut deck, 2);
        assert_eq!(seats[0].as_ref().unwrap().hole_cards.len(), 2);
        assert_eq!(seats[1].as_ref().unwrap().hole_cards.len(), 2);
        assert_eq!(deck.len(), 48);
    }
}
