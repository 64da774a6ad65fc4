//! The per-table state machine: phase sequencing, action application,
//! side-pot construction, and showdown distribution (the Table Engine's
//! core, independent of the async loop that drives it in [`crate::table`]).
//!
//! Every method here is synchronous and infallible except
//! [`TableState::submit_action`], which returns a typed rejection rather
//! than mutating on an illegal action. No I/O happens in this module —
//! that separation is what makes the phase machine unit-testable without
//! a runtime.

use std::collections::HashSet;

use poker_cards::{Card, Deck, Hand, ShuffleAuditRecord, Shuffler, Street};
use poker_core::{Chips, Position, ID};
use poker_rules::{
    apply_action, build_pots, button_holder_eligible, collect_blinds, deal_community, deal_hole,
    first_actor, legal_action_kinds, validate_action, Action, ActionError, ActionKind, Player, Pot,
    RoundContext, Seat, SeatStatus, Table, TableConfig, Variant,
};

use crate::phase::Phase;
use crate::timer::Timer;

/// One player action as it was applied, for the caller to turn into
/// wire/audit events.
#[derive(Debug, Clone)]
pub enum Outcome {
    HandStarted { dealer: Position, audit: ShuffleAuditRecord },
    HoleCardsDealt { seat: Position },
    CommunityDealt { street: Street, board: Hand },
    ActionApplied { seat: Position, action: Action, pot: Chips },
    ActorToAct { seat: Position, legal: Vec<Action> },
    HandEndedEarly { winner: Position, amount: Chips },
    Showdown { awards: Vec<(Position, Chips)> },
    HandComplete,
}

/// The authoritative state of one table: the fixed-length seat array, the
/// in-progress hand's cards/pots/bets, and the phase cursor driving it.
///
/// Owned exclusively by one [`crate::table::Table`] event loop; every
/// outside read is a deep copy via [`crate::snapshot::TableSnapshot`].
pub struct TableState {
    pub table_id: ID<Table>,
    pub config: TableConfig,
    variant: Box<dyn Variant + Send + Sync>,

    pub phase: Phase,
    pub dealer_button_seat: Option<Position>,
    pub current_actor_seat: Option<Position>,
    pub small_blind_seat: Option<Position>,
    pub big_blind_seat: Option<Position>,

    pub community_cards: Hand,
    pub pots: Vec<Pot>,
    pub seats: Vec<Option<Seat>>,

    pub last_bet: Chips,
    pub min_raise: Chips,
    raises_this_round: u8,

    deck: Deck,
    pub hand_number: u64,
    /// Deadline for the seat currently on the clock; unrelated to how long
    /// the street itself has run, since each actor gets a fresh timeout.
    actor_timer: Timer,
    pub players_acted_this_round: HashSet<Position>,
    pub players_to_act: Vec<Position>,

    /// Set once an invariant violation halts the table; no further
    /// mutation is accepted afterward (spec's failure semantics §7).
    pub halted: Option<String>,
}

impl TableState {
    pub fn new(config: TableConfig, variant: Box<dyn Variant + Send + Sync>) -> Self {
        let n = config.max_players;
        let table_id = config.table_id;
        let actor_timer = Timer::new(config.action_timeout);
        Self {
            table_id,
            config,
            variant,
            phase: Phase::Waiting,
            dealer_button_seat: None,
            current_actor_seat: None,
            small_blind_seat: None,
            big_blind_seat: None,
            community_cards: Hand::empty(),
            pots: Vec::new(),
            seats: vec![None; n],
            last_bet: 0,
            min_raise: 0,
            raises_this_round: 0,
            deck: Deck::fresh(),
            hand_number: 0,
            actor_timer,
            players_acted_this_round: HashSet::new(),
            players_to_act: Vec::new(),
            halted: None,
        }
    }

    /// Starts or clears the per-actor timer to match `current_actor_seat`.
    fn sync_actor_timer(&mut self) {
        if self.current_actor_seat.is_some() {
            self.actor_timer.start();
        } else {
            self.actor_timer.clear();
        }
    }

    pub fn is_halted(&self) -> bool {
        self.halted.is_some()
    }

    fn halt(&mut self, reason: impl Into<String>) {
        self.halted = Some(reason.into());
    }

    /// Every seat's total investment this hand, across every street —
    /// invariant 1's "pot total" term. Deliberately sums `total_invested`
    /// rather than `current_bet` (which `advance_street` zeroes every
    /// street) or `self.pots` (only populated at showdown): this is the
    /// one quantity that stays correct continuously from the first blind
    /// through the last river bet without drifting out of sync with
    /// `seats`.
    pub fn pot_total(&self) -> Chips {
        self.seats.iter().flatten().map(|s| s.total_invested).sum::<Chips>()
    }

    /// Sum of every seat's chips plus the pot total — must never change
    /// across a hand (invariant 1, chip conservation).
    pub fn conserved_chips(&self) -> Chips {
        self.seats.iter().flatten().map(|s| s.chips).sum::<Chips>() + self.pot_total()
    }

    fn occupied_seats_snapshot(&self) -> Vec<Seat> {
        self.seats.iter().flatten().cloned().collect()
    }

    /// Seats ready to play the next hand: occupied, not sitting out, not
    /// disconnected, with at least one chip.
    pub fn count_ready(&self) -> usize {
        self.seats
            .iter()
            .flatten()
            .filter(|s| matches!(s.status, SeatStatus::Active | SeatStatus::AllIn) && s.chips > 0)
            .count()
    }

    fn lowest_free_seat(&self) -> Option<Position> {
        self.seats.iter().position(|s| s.is_none())
    }

    pub fn find_seat_by_player(&self, player_id: ID<Player>) -> Option<Position> {
        self.seats
            .iter()
            .flatten()
            .find(|s| s.player_id == player_id)
            .map(|s| s.seat_index)
    }

    /// Places a new player in the lowest-index free seat, or reattaches a
    /// disconnected occupant without touching their chips.
    pub fn seat_player(&mut self, player_id: ID<Player>, display_name: String, buy_in: Chips) -> Result<Position, ActionError> {
        if buy_in < self.config.buy_in_min || buy_in > self.config.buy_in_max {
            return Err(ActionError::InvalidBetAmount);
        }
        if let Some(existing) = self.find_seat_by_player(player_id) {
            if let Some(seat) = self.seats[existing].as_mut() {
                seat.connected = true;
                if seat.status == SeatStatus::Disconnected {
                    seat.status = SeatStatus::Active;
                }
            }
            return Ok(existing);
        }
        let index = self.lowest_free_seat().ok_or(ActionError::TableFull)?;
        self.seats[index] = Some(Seat::new(index, player_id, display_name, buy_in));
        Ok(index)
    }

    /// Marks a seat for release. If no hand is running, the seat is freed
    /// immediately; otherwise the caller (the loop) must fold the occupant
    /// and defer the actual release to the next hand boundary.
    pub fn leave(&mut self, player_id: ID<Player>) -> Result<(), ActionError> {
        let index = self.find_seat_by_player(player_id).ok_or(ActionError::PlayerNotFound)?;
        if let Some(seat) = self.seats[index].as_mut() {
            seat.connected = false;
        }
        if self.phase == Phase::Waiting {
            self.seats[index] = None;
        } else if let Some(seat) = self.seats[index].as_mut() {
            if seat.status == SeatStatus::Active {
                seat.status = SeatStatus::Folded;
            }
        }
        Ok(())
    }

    pub fn sit_out(&mut self, player_id: ID<Player>) -> Result<(), ActionError> {
        let index = self.find_seat_by_player(player_id).ok_or(ActionError::PlayerNotFound)?;
        if let Some(seat) = self.seats[index].as_mut() {
            seat.status = SeatStatus::SittingOut;
        }
        Ok(())
    }

    /// Detaches busted players and anyone who disconnected while sitting
    /// out of a hand; called at the Waiting boundary between hands.
    fn release_departed_seats(&mut self) {
        for slot in self.seats.iter_mut() {
            let should_release = matches!(
                slot,
                Some(s) if s.status == SeatStatus::Busted || (!s.connected && s.status != SeatStatus::SittingOut)
            );
            if should_release {
                *slot = None;
            }
        }
    }

    // ---- phase transitions -------------------------------------------------

    /// Drives one tick of the phase machine: starts a hand if the table
    /// was waiting and is now ready, advances a completed betting round,
    /// or applies a timed-out seat's auto-action. Returns the events the
    /// caller should publish.
    pub fn tick(&mut self, shuffler: &mut Shuffler) -> Vec<Outcome> {
        if self.is_halted() {
            return Vec::new();
        }
        match self.phase {
            Phase::Waiting => self.maybe_start_hand(shuffler),
            Phase::HandComplete => self.finish_hand(),
            phase if phase.is_betting_round() => self.maybe_advance_betting_round(),
            Phase::Showdown => self.run_showdown(),
        }
    }

    fn maybe_start_hand(&mut self, shuffler: &mut Shuffler) -> Vec<Outcome> {
        // Clears last hand's Folded/AllIn statuses back to Active (or to
        // Busted/SittingOut/Disconnected, whichever applies) before
        // `count_ready` looks at them — otherwise a seat that folded or
        // went all-in last hand reads as not-ready forever and the table
        // can never leave `Waiting` again.
        for seat in self.seats.iter_mut().flatten() {
            seat.reset_for_new_hand();
        }

        if self.count_ready() < self.config.min_players {
            return Vec::new();
        }
        self.hand_number += 1;
        self.community_cards = Hand::empty();
        self.pots.clear();
        self.last_bet = 0;
        self.min_raise = self.config.big_blind;
        self.raises_this_round = 0;
        self.players_acted_this_round.clear();

        self.rotate_button();
        let hand_id = uuid::Uuid::now_v7();
        let (deck, audit) = shuffler.shuffle(self.table_id.uuid(), hand_id);
        self.deck = deck;

        let dealer = self.dealer_button_seat.expect("hand start requires a button seat");
        let posted = collect_blinds(&mut self.seats, &self.config, dealer);
        if let Some(posted) = posted {
            self.small_blind_seat = Some(posted.small_blind_seat);
            self.big_blind_seat = Some(posted.big_blind_seat);
            self.last_bet = self.config.big_blind;
            self.min_raise = self.config.big_blind;
        }

        deal_hole(&mut self.seats, &mut self.deck, self.variant.hole_card_count());
        self.phase = Phase::Preflop;
        self.current_actor_seat = first_actor(&self.seats, dealer, self.big_blind_seat, true);
        self.sync_actor_timer();
        self.rebuild_players_to_act();

        let mut events = vec![Outcome::HandStarted { dealer, audit }];
        for seat in self.seats.iter().flatten() {
            events.push(Outcome::HoleCardsDealt { seat: seat.seat_index });
        }
        self.push_decision_event(&mut events);
        events
    }

    fn rotate_button(&mut self) {
        let occupied: Vec<Position> = self.seats.iter().flatten().map(|s| s.seat_index).collect();
        if occupied.is_empty() {
            self.dealer_button_seat = None;
            return;
        }
        let n = self.seats.len();
        let next = match self.dealer_button_seat {
            None => occupied[0],
            Some(current) => (1..=n)
                .map(|offset| (current + offset) % n)
                .find(|p| button_holder_eligible(&self.seats, *p))
                .unwrap_or(occupied[0]),
        };
        self.dealer_button_seat = Some(next);
    }

    fn round_context(&self) -> RoundContext {
        RoundContext {
            current_bet: self.last_bet,
            min_raise: self.min_raise,
            pot_before: self.pot_total(),
            raises_this_round: self.raises_this_round,
            small_bet: self.config.big_blind / 2,
            big_bet: self.config.big_blind,
        }
    }

    /// Whether every contesting seat has acted this round and matched the
    /// standing bet — the round completion predicate (spec §4.1).
    fn round_complete(&self) -> bool {
        let contesting: Vec<&Seat> = self.seats.iter().flatten().filter(|s| s.status.is_contesting()).collect();
        if contesting.len() <= 1 {
            return true;
        }
        let active: Vec<&&Seat> = contesting.iter().filter(|s| s.status == SeatStatus::Active).collect();
        let all_acted = active.iter().all(|s| self.players_acted_this_round.contains(&s.seat_index));
        let all_matched = contesting.iter().all(|s| s.status == SeatStatus::AllIn || s.current_bet == self.last_bet);
        all_acted && all_matched
    }

    fn remaining_contestants(&self) -> Vec<Position> {
        self.seats.iter().flatten().filter(|s| s.status.is_contesting()).map(|s| s.seat_index).collect()
    }

    fn maybe_advance_betting_round(&mut self) -> Vec<Outcome> {
        if let Some(outcome) = self.maybe_resolve_auto_action() {
            return outcome;
        }
        let remaining = self.remaining_contestants();
        if remaining.len() <= 1 {
            return self.award_uncontested(remaining);
        }
        if !self.round_complete() {
            return Vec::new();
        }
        // Every remaining contestant already all-in: run out the board
        // without soliciting further action.
        let anyone_can_act = remaining.iter().any(|&p| self.seats[p].as_ref().unwrap().status == SeatStatus::Active);
        if !anyone_can_act {
            return self.fast_forward_to_showdown();
        }
        self.advance_street()
    }

    fn award_uncontested(&mut self, remaining: Vec<Position>) -> Vec<Outcome> {
        let winner = match remaining.first() {
            Some(&p) => p,
            None => return Vec::new(),
        };
        let amount = self.pot_total();
        self.pots.clear();
        for seat in self.seats.iter_mut().flatten() {
            if seat.seat_index == winner {
                seat.chips += amount;
            }
            seat.current_bet = 0;
            seat.total_invested = 0;
        }
        self.phase = Phase::HandComplete;
        self.current_actor_seat = None;
        self.sync_actor_timer();
        vec![Outcome::HandEndedEarly { winner, amount }, Outcome::HandComplete]
    }

    fn advance_street(&mut self) -> Vec<Outcome> {
        for seat in self.seats.iter_mut().flatten() {
            seat.reset_for_new_street();
        }
        self.last_bet = 0;
        self.min_raise = self.config.big_blind;
        self.raises_this_round = 0;
        self.players_acted_this_round.clear();

        let next_phase = self.phase.next_street().unwrap_or(Phase::Showdown);
        self.phase = next_phase;

        let mut events = Vec::new();
        if let Some(street) = next_phase.street() {
            deal_community(&mut self.community_cards, &mut self.deck, self.variant.as_ref(), street);
            events.push(Outcome::CommunityDealt { street, board: self.community_cards });
        }

        if next_phase == Phase::Showdown {
            self.current_actor_seat = None;
            self.sync_actor_timer();
            return events;
        }

        let dealer = self.dealer_button_seat.expect("street advance requires a seated button");
        self.current_actor_seat = first_actor(&self.seats, dealer, None, false);
        self.sync_actor_timer();
        self.rebuild_players_to_act();
        self.push_decision_event(&mut events);
        events
    }

    fn fast_forward_to_showdown(&mut self) -> Vec<Outcome> {
        let mut events = Vec::new();
        while self.phase.is_betting_round() && self.phase != Phase::River {
            let next = self.phase.next_street().expect("betting rounds before river always have a next street");
            self.phase = next;
            if let Some(street) = next.street() {
                deal_community(&mut self.community_cards, &mut self.deck, self.variant.as_ref(), street);
                events.push(Outcome::CommunityDealt { street, board: self.community_cards });
            }
        }
        self.phase = Phase::Showdown;
        events
    }

    /// Checks the seat on the clock for an expired turn timer and, if
    /// expired, injects the auto-action (Check if legal, else Fold) —
    /// spec's failure-semantics timeout rule. Disconnection is not
    /// distinguished from a plain stall; both wait out the same timer.
    fn maybe_resolve_auto_action(&mut self) -> Option<Vec<Outcome>> {
        let actor = self.current_actor_seat?;
        if !self.actor_timer.expired() {
            return None;
        }
        let ctx = self.round_context();
        let seat = self.seats[actor].as_ref()?;
        let kinds = legal_action_kinds(seat, self.config.betting_structure, &ctx);
        let action = if kinds.contains(&ActionKind::Check) { Action::Check } else { Action::Fold };
        Some(self.apply_validated_action(actor, action).unwrap_or_default())
    }

    /// Validates and applies `action` for `seat`, advancing the actor and
    /// clearing (or not) `players_acted_this_round` per whether the action
    /// re-opens the round.
    pub fn submit_action(&mut self, seat: Position, action: Action) -> Result<Vec<Outcome>, ActionError> {
        if self.is_halted() {
            return Err(ActionError::InvalidAction);
        }
        if Some(seat) != self.current_actor_seat {
            return Err(ActionError::NotYourTurn);
        }
        let ctx = self.round_context();
        let seat_ref = self.seats[seat].as_ref().ok_or(ActionError::PlayerNotFound)?;
        validate_action(action, seat_ref, self.config.betting_structure, &ctx)?;
        Ok(self.apply_validated_action(seat, action).unwrap_or_default())
    }

    fn apply_validated_action(&mut self, seat: Position, action: Action) -> Option<Vec<Outcome>> {
        let ctx = self.round_context();
        let before_total = self.conserved_chips();
        let seat_mut = self.seats[seat].as_mut()?;
        let effect = apply_action(action, seat_mut, &ctx);
        self.last_bet = effect.new_current_bet;
        self.min_raise = effect.new_min_raise;
        // Gate on whether the action actually re-opens the round, not on
        // whether it was merely an aggressive action kind: a short all-in
        // below `min_raise` is `Action::AllIn` but must not clear other
        // players' acted status or consume a fixed-limit raise-cap slot
        // (spec §4.2).
        if effect.reopens_action {
            self.raises_this_round = self.raises_this_round.saturating_add(1);
            self.players_acted_this_round.clear();
        }
        self.players_acted_this_round.insert(seat);

        if self.conserved_chips() != before_total {
            self.halt("chip conservation violated applying action");
            return None;
        }

        let pot_after = self.pot_total();
        let mut events = vec![Outcome::ActionApplied { seat, action, pot: pot_after }];

        let remaining = self.remaining_contestants();
        if remaining.len() <= 1 {
            let more = self.award_uncontested(remaining);
            events.extend(more);
            return Some(events);
        }

        self.advance_actor();
        if self.current_actor_seat.is_none() {
            // Round complete; the next tick drives the street transition.
            return Some(events);
        }
        self.push_decision_event(&mut events);
        Some(events)
    }

    fn advance_actor(&mut self) {
        let dealer = self.dealer_button_seat.unwrap_or(0);
        let from = self.current_actor_seat.unwrap_or(dealer);
        let n = self.seats.len();
        self.current_actor_seat = (1..=n)
            .map(|offset| (from + offset) % n)
            .find(|&p| self.seat_awaiting_action(p));
        self.sync_actor_timer();
    }

    fn seat_awaiting_action(&self, p: Position) -> bool {
        match self.seats[p].as_ref() {
            Some(seat) if seat.status == SeatStatus::Active => {
                !self.players_acted_this_round.contains(&p) || seat.current_bet != self.last_bet
            }
            _ => false,
        }
    }

    fn rebuild_players_to_act(&mut self) {
        self.players_to_act = self
            .seats
            .iter()
            .flatten()
            .filter(|s| s.status == SeatStatus::Active)
            .map(|s| s.seat_index)
            .collect();
    }

    fn push_decision_event(&self, events: &mut Vec<Outcome>) {
        if let Some(actor) = self.current_actor_seat {
            let ctx = self.round_context();
            if let Some(seat) = self.seats[actor].as_ref() {
                let legal = legal_action_kinds(seat, self.config.betting_structure, &ctx)
                    .into_iter()
                    .map(kind_to_action_hint)
                    .collect();
                events.push(Outcome::ActorToAct { seat: actor, legal });
            }
        }
    }

    fn run_showdown(&mut self) -> Vec<Outcome> {
        let seats = self.occupied_seats_snapshot();
        let pots = build_pots(&seats);
        let mut awards: Vec<(Position, Chips)> = Vec::new();

        for pot in &pots {
            let eligible: Vec<Position> = pot.eligible.iter().copied().collect();
            let result = self.variant.determine_winners(&seats, &eligible, self.community_cards, pot.amount);
            award_split(&mut awards, &result.high, self.dealer_button_seat.unwrap_or(0), self.seats.len());
            if let Some(low) = &result.low {
                award_split(&mut awards, low, self.dealer_button_seat.unwrap_or(0), self.seats.len());
            }
        }
        self.pots = pots;

        let before_total = self.conserved_chips();
        for (seat_index, amount) in &awards {
            if let Some(seat) = self.seats[*seat_index].as_mut() {
                seat.chips += amount;
            }
        }
        // `self.pots` above is retained only so a snapshot taken after this
        // hand can still show its final pot breakdown; the money it
        // represents has just been credited to `chips`, so the seats'
        // *own* running totals must drop to zero here (not just at the
        // next hand's reset) or `conserved_chips` would count it twice.
        for seat in self.seats.iter_mut().flatten() {
            seat.current_bet = 0;
            seat.total_invested = 0;
        }
        if self.conserved_chips() != before_total {
            self.halt("chip conservation violated at showdown distribution");
            return Vec::new();
        }

        self.phase = Phase::HandComplete;
        vec![Outcome::Showdown { awards: awards.clone() }, Outcome::HandComplete]
    }

    fn finish_hand(&mut self) -> Vec<Outcome> {
        self.phase = Phase::Waiting;
        self.current_actor_seat = None;
        self.small_blind_seat = None;
        self.big_blind_seat = None;
        for seat in self.seats.iter_mut().flatten() {
            if seat.chips == 0 {
                seat.status = SeatStatus::Busted;
            }
        }
        self.release_departed_seats();
        Vec::new()
    }

    pub fn initial_deck_order(&self) -> Vec<Card> {
        self.deck.as_slice().to_vec()
    }
}

/// Splits a pot award's winners, crediting the per-winner share to
/// `awards` and routing the integer remainder to the first winner
/// clockwise from the seat left of the dealer button.
fn award_split(awards: &mut Vec<(Position, Chips)>, award: &poker_rules::PotAward, dealer: Position, n: usize) {
    if award.winners.is_empty() {
        return;
    }
    let remainder_recipient = (1..=n)
        .map(|offset| (dealer + offset) % n)
        .find(|p| award.winners.contains(p))
        .unwrap_or(award.winners[0]);
    for &winner in &award.winners {
        let share = if winner == remainder_recipient { award.amount_each + award.remainder } else { award.amount_each };
        if share > 0 {
            awards.push((winner, share));
        }
    }
}

/// A coarse action hint for `Decision` events — the kind of action, not
/// its exact legal amount range (callers query `legal_action_kinds`
/// directly, via the engine's validation path, for sizing).
fn kind_to_action_hint(kind: ActionKind) -> Action {
    match kind {
        ActionKind::Fold => Action::Fold,
        ActionKind::Check => Action::Check,
        ActionKind::Call => Action::Call,
        ActionKind::Bet => Action::Bet(0),
        ActionKind::Raise => Action::Raise(0),
        ActionKind::AllIn => Action::AllIn,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use poker_cards::Shuffler;
    use poker_rules::{BettingStructure, FeatureFlags, GameType, Player};
    use std::time::Duration as StdDuration;

    fn config() -> TableConfig {
        TableConfig {
            table_id: ID::random(),
            game_type: GameType::HoldEm,
            betting_structure: BettingStructure::NoLimit,
            min_players: 2,
            max_players: 6,
            small_blind: 5,
            big_blind: 10,
            buy_in_min: 100,
            buy_in_max: 10_000,
            action_timeout: StdDuration::from_secs(30),
            feature_flags: FeatureFlags::default(),
        }
    }

    fn new_state() -> TableState {
        let cfg = config();
        TableState::new(cfg, poker_rules::variant_for(GameType::HoldEm))
    }

    #[test]
    fn heads_up_fold_awards_whole_pot() {
        let mut state = new_state();
        let a = state.seat_player(ID::<Player>::random(), "A".into(), 1000).unwrap();
        let b = state.seat_player(ID::<Player>::random(), "B".into(), 1000).unwrap();
        let mut shuffler = Shuffler::deterministic([1u8; 32]);
        state.tick(&mut shuffler);
        assert_eq!(state.phase, Phase::Preflop);

        let folding_seat = state.current_actor_seat.unwrap();
        let events = state.submit_action(folding_seat, Action::Fold).unwrap();
        assert!(matches!(events.last(), Some(Outcome::HandComplete)));
        assert_eq!(state.phase, Phase::HandComplete);

        let total: Chips = state.seats.iter().flatten().map(|s| s.chips).sum();
        assert_eq!(total, 2000);
        let winner = if folding_seat == a { b } else { a };
        assert_eq!(state.seats[winner].as_ref().unwrap().chips, 1005);
        assert_eq!(state.seats[folding_seat].as_ref().unwrap().chips, 995);
    }

    #[test]
    fn all_in_short_stack_builds_side_pot_and_conserves_chips() {
        let mut state = new_state();
        state.seat_player(ID::<Player>::random(), "A".into(), 100).unwrap();
        state.seat_player(ID::<Player>::random(), "B".into(), 500).unwrap();
        state.seat_player(ID::<Player>::random(), "C".into(), 500).unwrap();
        let before: Chips = 1100;
        let mut shuffler = Shuffler::deterministic([2u8; 32]);
        state.tick(&mut shuffler);

        while state.phase != Phase::HandComplete && !state.is_halted() {
            if let Some(actor) = state.current_actor_seat {
                let ctx = state.round_context();
                let seat = state.seats[actor].clone().unwrap();
                let kinds = legal_action_kinds(&seat, state.config.betting_structure, &ctx);
                let action = if kinds.contains(&ActionKind::Call) {
                    Action::Call
                } else if kinds.contains(&ActionKind::Check) {
                    Action::Check
                } else {
                    Action::AllIn
                };
                state.submit_action(actor, action).unwrap();
            } else {
                state.tick(&mut shuffler);
            }
        }
        assert!(!state.is_halted(), "{:?}", state.halted);
        let after: Chips = state.seats.iter().flatten().map(|s| s.chips).sum();
        assert_eq!(before, after);
    }

    #[test]
    fn seat_player_rejects_out_of_range_buy_in() {
        let mut state = new_state();
        let result = state.seat_player(ID::<Player>::random(), "A".into(), 1);
        assert_eq!(result, Err(ActionError::InvalidBetAmount));
    }

    #[test]
    fn table_full_when_no_free_seats() {
        let mut state = new_state();
        for _ in 0..state.config.max_players {
            state.seat_player(ID::<Player>::random(), "P".into(), 500).unwrap();
        }
        let result = state.seat_player(ID::<Player>::random(), "extra".into(), 500);
        assert_eq!(result, Err(ActionError::TableFull));
    }

    #[test]
    fn not_your_turn_is_rejected_without_state_change() {
        let mut state = new_state();
        state.seat_player(ID::<Player>::random(), "A".into(), 1000).unwrap();
        state.seat_player(ID::<Player>::random(), "B".into(), 1000).unwrap();
        let mut shuffler = Shuffler::deterministic([3u8; 32]);
        state.tick(&mut shuffler);
        let not_actor = self_other_seat(&state);
        let result = state.submit_action(not_actor, Action::Fold);
        assert_eq!(result, Err(ActionError::NotYourTurn));
    }

    fn self_other_seat(state: &TableState) -> Position {
        let actor = state.current_actor_seat.unwrap();
        state.seats.iter().flatten().map(|s| s.seat_index).find(|&p| p != actor).unwrap()
    }
}
