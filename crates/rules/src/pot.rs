use std::collections::BTreeSet;

use poker_core::{Chips, Position};

use crate::seat::{Seat, SeatStatus};

/// A pot (main or side) with its eligible contestants.
#[derive(Debug, Clone)]
pub struct Pot {
    pub amount: Chips,
    pub eligible: BTreeSet<Position>,
    pub is_side: bool,
}

/// Builds the main pot and any side pots from seats' `total_invested`
/// values, driven by investment level rather than all-in order.
///
/// # Algorithm
/// 1. Collect distinct positive investment levels, ascending: `L1 < L2 <
///    ... < Lk`.
/// 2. For each level `Li`, the pot at that level is
///    `sum over seats of min(seat.total_invested, Li) - contributions already
///    attributed to lower levels`, and its eligible set is every seat with
///    `total_invested >= Li` that has not folded.
/// 3. The lowest level is the main pot; every level above it is a side pot.
///
/// This handles interleaved all-ins correctly: a player folding after
/// contributing at some level still funds that level's pot (dead money)
/// without being eligible to win it.
pub fn build_pots(seats: &[Seat]) -> Vec<Pot> {
    let mut levels: Vec<Chips> = seats
        .iter()
        .map(|s| s.total_invested)
        .filter(|&n| n > 0)
        .collect();
    levels.sort_unstable();
    levels.dedup();

    let mut pots = Vec::with_capacity(levels.len());
    let mut previous = 0 as Chips;
    for (i, &level) in levels.iter().enumerate() {
        let amount: Chips = seats
            .iter()
            .map(|s| s.total_invested.min(level).saturating_sub(previous))
            .sum();
        let eligible: BTreeSet<Position> = seats
            .iter()
            .filter(|s| s.total_invested >= level && s.status != SeatStatus::Folded)
            .map(|s| s.seat_index)
            .collect();
        pots.push(Pot {
            amount,
            eligible,
            is_side: i > 0,
        });
        previous = level;
    }
    pots
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seat::SeatStatus;
    use poker_core::ID;

    fn seat(index: Position, invested: Chips, status: SeatStatus) -> Seat {
        let mut s = Seat::new(index, ID::random(), format!("P{index}"), 0);
        s.total_invested = invested;
        s.status = status;
        s
    }

    #[test]
    fn single_level_yields_one_pot() {
        let seats = vec![
            seat(0, 100, SeatStatus::Active),
            seat(1, 100, SeatStatus::Active),
            seat(2, 100, SeatStatus::Active),
        ];
        let pots = build_pots(&seats);
        assert_eq!(pots.len(), 1);
        assert_eq!(pots[0].amount, 300);
        assert!(!pots[0].is_side);
        assert_eq!(pots[0].eligible.len(), 3);
    }

    #[test]
    fn short_all_in_creates_side_pot() {
        // A all-in for 100, B and C call 500 (scenario 2 from spec).
        let seats = vec![
            seat(0, 100, SeatStatus::AllIn),
            seat(1, 500, SeatStatus::Active),
            seat(2, 500, SeatStatus::Active),
        ];
        let pots = build_pots(&seats);
        assert_eq!(pots.len(), 2);
        assert_eq!(pots[0].amount, 300); // 100 * 3, main pot
        assert!(pots[0].eligible.contains(&0));
        assert_eq!(pots[1].amount, 800); // (500-100)*2, side pot
        assert!(!pots[1].eligible.contains(&0));
        assert!(pots[1].eligible.contains(&1));
        assert!(pots[1].eligible.contains(&2));
    }

    #[test]
    fn folded_contribution_stays_dead_money() {
        let seats = vec![
            seat(0, 50, SeatStatus::Folded),
            seat(1, 100, SeatStatus::Active),
            seat(2, 100, SeatStatus::Active),
        ];
        let pots = build_pots(&seats);
        assert_eq!(pots.len(), 2);
        assert_eq!(pots[0].amount, 150); // 50*3
        assert!(!pots[0].eligible.contains(&0)); // folded, not eligible
        assert_eq!(pots[1].amount, 100); // (100-50)*2
    }

    #[test]
    fn conservation_holds() {
        let seats = vec![
            seat(0, 100, SeatStatus::AllIn),
            seat(1, 250, SeatStatus::AllIn),
            seat(2, 500, SeatStatus::Active),
        ];
        let pots = build_pots(&seats);
        let total: Chips = pots.iter().map(|p| p.amount).sum();
        let invested: Chips = seats.iter().map(|s| s.total_invested).sum();
        assert_eq!(total, invested);
    }
}
