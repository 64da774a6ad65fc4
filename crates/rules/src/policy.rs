use poker_core::Chips;

use crate::action::Action;
use crate::betting::{BettingStructure, SizingContext};
use crate::deal::call_amount;
use crate::errors::ActionError;
use crate::seat::{Seat, SeatStatus};

/// Everything `validate_action`/`apply_action` need about the betting
/// round in progress, independent of the engine's own `TableState` layout
/// so the policy stays a pure function of its inputs.
#[derive(Debug, Clone, Copy)]
pub struct RoundContext {
    pub current_bet: Chips,
    pub min_raise: Chips,
    pub pot_before: Chips,
    pub raises_this_round: u8,
    pub small_bet: Chips,
    pub big_bet: Chips,
}

/// The kind of action a seat may legally take, without a committed
/// amount — `getValidActions`' vocabulary. `validate_action` accepts
/// exactly the [`Action`]s whose kind appears here (spec's action
/// legality closure property).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionKind {
    Fold,
    Check,
    Call,
    Bet,
    Raise,
    AllIn,
}

/// Enumerates the action kinds legal for `seat` given the round in
/// progress. Folded, sitting-out, all-in, and busted seats have none.
pub fn legal_action_kinds(seat: &Seat, structure: BettingStructure, ctx: &RoundContext) -> Vec<ActionKind> {
    if seat.status != SeatStatus::Active || seat.chips == 0 {
        return Vec::new();
    }
    let mut kinds = vec![ActionKind::Fold];
    let owed = call_amount(seat, ctx.current_bet);
    if owed == 0 {
        kinds.push(ActionKind::Check);
    } else {
        kinds.push(ActionKind::Call);
    }
    let sizing = sizing_context(seat, ctx);
    if ctx.current_bet == 0 {
        kinds.push(ActionKind::Bet);
    } else if structure.raise_allowed(&sizing) {
        kinds.push(ActionKind::Raise);
    }
    kinds.push(ActionKind::AllIn);
    kinds
}

fn sizing_context(seat: &Seat, ctx: &RoundContext) -> SizingContext {
    SizingContext {
        pot_before: ctx.pot_before,
        current_bet: ctx.current_bet,
        min_raise_increment: ctx.min_raise,
        stack: seat.chips,
        small_bet: ctx.small_bet,
        big_bet: ctx.big_bet,
        raises_this_round: ctx.raises_this_round,
    }
}

/// Checks turn order has already been confirmed by the caller (the
/// engine only calls this for the seat actually on the clock); validates
/// the action's legality by context and, for `Bet`/`Raise`, its size.
pub fn validate_action(action: Action, seat: &Seat, structure: BettingStructure, ctx: &RoundContext) -> Result<(), ActionError> {
    if seat.status != SeatStatus::Active {
        return Err(ActionError::InvalidAction);
    }
    let owed = call_amount(seat, ctx.current_bet);
    let sizing = sizing_context(seat, ctx);
    match action {
        Action::Fold => Ok(()),
        Action::Check => {
            if owed != 0 {
                return Err(ActionError::CannotCheck);
            }
            Ok(())
        }
        Action::Call => {
            if owed == 0 {
                return Err(ActionError::CannotCall);
            }
            Ok(())
        }
        Action::Bet(amount) => {
            if ctx.current_bet != 0 {
                return Err(ActionError::CannotBet);
            }
            validate_size(amount, seat, structure, &sizing)
        }
        Action::Raise(amount) => {
            if ctx.current_bet == 0 {
                return Err(ActionError::CannotRaise);
            }
            if !structure.raise_allowed(&sizing) {
                return Err(ActionError::CannotRaise);
            }
            validate_size(amount, seat, structure, &sizing)
        }
        Action::AllIn => {
            if seat.chips == 0 {
                return Err(ActionError::InsufficientChips);
            }
            Ok(())
        }
    }
}

/// Validates a bet/raise-to `amount` (total street commitment, not a
/// delta) against the betting structure's min/max and the seat's stack.
fn validate_size(amount: Chips, seat: &Seat, structure: BettingStructure, sizing: &SizingContext) -> Result<(), ActionError> {
    let all_in_amount = seat.current_bet + seat.chips;
    if amount > all_in_amount {
        return Err(ActionError::InsufficientChips);
    }
    let min = structure.min_legal_to(sizing);
    let max = structure.max_legal_to(sizing);
    // A short all-in below the structure's minimum is itself always legal
    // (a player may shove for less than a full raise); anything else below
    // the minimum is rejected.
    if amount < min && amount != all_in_amount {
        return Err(ActionError::RaiseTooSmall);
    }
    if amount > max {
        return Err(ActionError::BetExceedsPot);
    }
    Ok(())
}

/// The effect of applying a validated action: what the seat paid, the
/// round's new standing bet and minimum raise increment, and whether this
/// action re-opens action for seats that already acted this round.
#[derive(Debug, Clone, Copy)]
pub struct ActionEffect {
    pub paid: Chips,
    pub new_current_bet: Chips,
    pub new_min_raise: Chips,
    pub reopens_action: bool,
}

/// Mutates `seat`'s chips/bet bookkeeping and reports the round-level
/// effect. Caller (the engine) is responsible for folding the seat,
/// advancing the actor, and clearing `playersActedThisRound` when
/// `reopens_action` is true.
///
/// A short all-in below the round's minimum raise increment does not
/// re-open action for players who already acted this round — the
/// standard no-limit rule that prevents a tiny shove from forcing a full
/// new round of decisions.
pub fn apply_action(action: Action, seat: &mut Seat, ctx: &RoundContext) -> ActionEffect {
    match action {
        Action::Fold => {
            seat.status = SeatStatus::Folded;
            ActionEffect {
                paid: 0,
                new_current_bet: ctx.current_bet,
                new_min_raise: ctx.min_raise,
                reopens_action: false,
            }
        }
        Action::Check => ActionEffect {
            paid: 0,
            new_current_bet: ctx.current_bet,
            new_min_raise: ctx.min_raise,
            reopens_action: false,
        },
        Action::Call => {
            let owed = call_amount(seat, ctx.current_bet);
            let paid = seat.commit(owed);
            ActionEffect {
                paid,
                new_current_bet: ctx.current_bet,
                new_min_raise: ctx.min_raise,
                reopens_action: false,
            }
        }
        Action::Bet(amount) | Action::Raise(amount) => commit_to(seat, amount, ctx),
        Action::AllIn => {
            let target = seat.current_bet + seat.chips;
            commit_to(seat, target, ctx)
        }
    }
}

/// Commits `seat` up to a total street bet of `to_amount`, computing the
/// raise increment actually delivered (which becomes the new minimum
/// raise for subsequent players, not doubled, per standard no-limit
/// rules) and whether the increment was large enough to reopen action.
fn commit_to(seat: &mut Seat, to_amount: Chips, ctx: &RoundContext) -> ActionEffect {
    let delta = to_amount.saturating_sub(seat.current_bet);
    let paid = seat.commit(delta);
    let new_current_bet = seat.current_bet.max(ctx.current_bet);
    let raise_increment = new_current_bet.saturating_sub(ctx.current_bet);
    let full_raise = raise_increment >= ctx.min_raise || ctx.current_bet == 0;
    ActionEffect {
        paid,
        new_current_bet,
        new_min_raise: if full_raise { raise_increment.max(ctx.min_raise) } else { ctx.min_raise },
        reopens_action: full_raise && new_current_bet > ctx.current_bet,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seat::Player;
    use poker_core::ID;

    fn seat(chips: Chips) -> Seat {
        Seat::new(0, ID::<Player>::random(), "P0".into(), chips)
    }

    fn ctx(current_bet: Chips, min_raise: Chips) -> RoundContext {
        RoundContext {
            current_bet,
            min_raise,
            pot_before: 100,
            raises_this_round: 0,
            small_bet: 10,
            big_bet: 20,
        }
    }

    #[test]
    fn check_illegal_when_facing_a_bet() {
        let seat = seat(1000);
        let result = validate_action(Action::Check, &seat, BettingStructure::NoLimit, &ctx(50, 50));
        assert_eq!(result, Err(ActionError::CannotCheck));
    }

    #[test]
    fn call_illegal_with_nothing_to_call() {
        let seat = seat(1000);
        let result = validate_action(Action::Call, &seat, BettingStructure::NoLimit, &ctx(0, 10));
        assert_eq!(result, Err(ActionError::CannotCall));
    }

    #[test]
    fn raise_below_minimum_rejected() {
        let seat = seat(1000);
        let result = validate_action(Action::Raise(60), &seat, BettingStructure::NoLimit, &ctx(50, 50));
        assert_eq!(result, Err(ActionError::RaiseTooSmall));
    }

    #[test]
    fn short_all_in_raise_is_always_legal() {
        let seat = seat(55);
        let result = validate_action(Action::Raise(55), &seat, BettingStructure::NoLimit, &ctx(50, 50));
        assert_eq!(result, Ok(()));
    }

    #[test]
    fn short_all_in_does_not_reopen_action() {
        let mut seat = seat(55);
        let effect = apply_action(Action::Raise(55), &mut seat, &ctx(50, 50));
        assert!(!effect.reopens_action);
    }

    #[test]
    fn full_raise_reopens_action_and_sets_min_raise() {
        let mut seat = seat(1000);
        let effect = apply_action(Action::Raise(120), &mut seat, &ctx(50, 50));
        assert!(effect.reopens_action);
        assert_eq!(effect.new_min_raise, 70);
        assert_eq!(effect.new_current_bet, 120);
    }

    #[test]
    fn folded_seat_has_no_legal_actions() {
        let mut seat = seat(1000);
        seat.status = SeatStatus::Folded;
        let kinds = legal_action_kinds(&seat, BettingStructure::NoLimit, &ctx(50, 50));
        assert!(kinds.is_empty());
    }
}
