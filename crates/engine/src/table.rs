//! The async event loop that owns one [`TableState`] and the handle other
//! tasks use to talk to it.
//!
//! Every operation — seating, leaving, submitting an action, reading a
//! snapshot — round-trips through a single bounded inbox, so the table's
//! state is only ever touched from the one task running [`Table::run`].
//! Callers never take a lock; they send a command and await a reply,
//! mirroring the teacher's `Actor`/`Table` split (`gameroom::actor`,
//! `gameroom::table`) generalized from per-seat channels to one inbox
//! serving the whole table.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{broadcast, mpsc, oneshot};
use tokio::time::interval;

use poker_core::{Chips, Position, ID};
use poker_rules::{variant_for, Action, ActionError, Player, TableConfig};

use crate::errors::TableError;
use crate::event::Event;
use crate::history::{ActionRecord, HandAuditRecord, HistoryRepository};
use crate::snapshot::{SeatView, SnapshotPot, TableSnapshot};
use crate::state::{Outcome, TableState};

/// Commands the table loop already be running in order to process
/// arrives on the inbox, one at a time; the table loop never blocks on
/// one while another is outstanding.
const INBOX_CAPACITY: usize = 256;
const EVENT_CAPACITY: usize = 1024;
const TICK_INTERVAL: Duration = Duration::from_millis(200);

enum Command {
    Seat {
        player_id: ID<Player>,
        display_name: String,
        buy_in: Chips,
        reply: oneshot::Sender<Result<Position, TableError>>,
    },
    Leave {
        player_id: ID<Player>,
        reply: oneshot::Sender<Result<(), TableError>>,
    },
    SitOut {
        player_id: ID<Player>,
        reply: oneshot::Sender<Result<(), TableError>>,
    },
    SubmitAction {
        seat: Position,
        action: Action,
        reply: oneshot::Sender<Result<(), TableError>>,
    },
    Snapshot {
        reply: oneshot::Sender<TableSnapshot>,
    },
    Stop,
}

/// A cheap, cloneable reference to a running table.
///
/// Cloning shares the same inbox and broadcast channel; dropping every
/// handle does not stop the loop (only [`TableHandle::stop`] or the inbox
/// itself being dropped by its owner does) — holding a handle is how the
/// registry keeps a table alive.
#[derive(Clone)]
pub struct TableHandle {
    table_id: ID<poker_rules::Table>,
    inbox: mpsc::Sender<Command>,
    events: broadcast::Sender<Event>,
}

impl TableHandle {
    pub fn table_id(&self) -> ID<poker_rules::Table> {
        self.table_id
    }

    pub async fn seat(&self, player_id: ID<Player>, display_name: String, buy_in: Chips) -> Result<Position, TableError> {
        self.call(|reply| Command::Seat { player_id, display_name, buy_in, reply }).await
    }

    pub async fn leave(&self, player_id: ID<Player>) -> Result<(), TableError> {
        self.call(|reply| Command::Leave { player_id, reply }).await
    }

    pub async fn sit_out(&self, player_id: ID<Player>) -> Result<(), TableError> {
        self.call(|reply| Command::SitOut { player_id, reply }).await
    }

    pub async fn submit_action(&self, seat: Position, action: Action) -> Result<(), TableError> {
        self.call(|reply| Command::SubmitAction { seat, action, reply }).await
    }

    /// The table's full, unredacted state. Callers who forward this to a
    /// particular player must call [`TableSnapshot::redact_for`]
    /// themselves, or use [`TableHandle::snapshot_for`].
    pub async fn snapshot(&self) -> Result<TableSnapshot, TableError> {
        let (tx, rx) = oneshot::channel();
        self.inbox
            .send(Command::Snapshot { reply: tx })
            .await
            .map_err(|_| TableError::Halted("table loop stopped".into()))?;
        rx.await.map_err(|_| TableError::Halted("table loop stopped".into()))
    }

    pub async fn snapshot_for(&self, viewer: Option<Position>) -> Result<TableSnapshot, TableError> {
        Ok(self.snapshot().await?.redact_for(viewer))
    }

    /// Subscribes to this table's internal event stream. Each subscriber
    /// gets every event from the moment of subscription onward; a slow
    /// subscriber that falls behind the broadcast channel's capacity sees
    /// [`broadcast::error::RecvError::Lagged`] rather than blocking the
    /// table loop.
    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.events.subscribe()
    }

    /// Requests the table loop stop. Idempotent; a second call after the
    /// loop has already exited is a harmless no-op.
    pub async fn stop(&self) {
        let _ = self.inbox.send(Command::Stop).await;
    }

    async fn call<T>(&self, build: impl FnOnce(oneshot::Sender<Result<T, TableError>>) -> Command) -> Result<T, TableError> {
        let (tx, rx) = oneshot::channel();
        self.inbox.send(build(tx)).await.map_err(|_| TableError::Backpressure)?;
        rx.await.map_err(|_| TableError::Halted("table loop stopped".into()))?
    }
}

/// Owns the table's [`TableState`] and drives it forward: processing
/// inbound commands, ticking the phase machine, and publishing the
/// resulting [`Event`]s to subscribers and the history repository.
pub struct Table {
    state: TableState,
    shuffler: poker_cards::Shuffler,
    history: Arc<dyn HistoryRepository>,
    events: broadcast::Sender<Event>,
    inbox: mpsc::Receiver<Command>,
    pending_actions: Vec<ActionRecord>,
    current_hand_audit: Option<poker_cards::ShuffleAuditRecord>,
    current_initial_deck: Vec<poker_cards::Card>,
}

impl Table {
    /// Spawns the loop as its own tokio task and returns a handle to it.
    /// The caller is responsible for eventually calling
    /// [`TableHandle::stop`] (or dropping every clone of the handle, which
    /// drops the inbox sender and ends the loop on its own).
    pub fn spawn(config: TableConfig, history: Arc<dyn HistoryRepository>) -> TableHandle {
        let table_id = config.table_id;
        let variant = variant_for(config.game_type);
        let (inbox_tx, inbox_rx) = mpsc::channel(INBOX_CAPACITY);
        let (events_tx, _) = broadcast::channel(EVENT_CAPACITY);

        let table = Table {
            state: TableState::new(config, variant),
            shuffler: poker_cards::Shuffler::cryptographic(),
            history,
            events: events_tx.clone(),
            inbox: inbox_rx,
            pending_actions: Vec::new(),
            current_hand_audit: None,
            current_initial_deck: Vec::new(),
        };
        tokio::spawn(table.run());
        TableHandle { table_id, inbox: inbox_tx, events: events_tx }
    }

    async fn run(mut self) {
        let mut ticker = interval(TICK_INTERVAL);
        loop {
            tokio::select! {
                received = self.inbox.recv() => {
                    match received {
                        Some(Command::Stop) | None => break,
                        Some(cmd) => self.handle_command(cmd).await,
                    }
                }
                _ = ticker.tick() => {
                    self.drive(Vec::new()).await;
                }
            }
        }
        log::info!("table {} loop stopped", self.state.table_id);
    }

    async fn handle_command(&mut self, cmd: Command) {
        match cmd {
            Command::Seat { player_id, display_name, buy_in, reply } => {
                let result = self.state.seat_player(player_id, display_name, buy_in).map_err(|e| map_lifecycle_error(e, buy_in));
                let _ = reply.send(result);
            }
            Command::Leave { player_id, reply } => {
                let result = self.state.leave(player_id).map_err(|e| map_lifecycle_error(e, 0));
                let _ = reply.send(result);
            }
            Command::SitOut { player_id, reply } => {
                let result = self.state.sit_out(player_id).map_err(|e| map_lifecycle_error(e, 0));
                let _ = reply.send(result);
            }
            Command::SubmitAction { seat, action, reply } => {
                if let Some(reason) = self.state.halted.clone() {
                    let _ = reply.send(Err(TableError::Halted(reason)));
                    return;
                }
                match self.state.submit_action(seat, action) {
                    Ok(outcomes) => {
                        let _ = reply.send(Ok(()));
                        self.drive(outcomes).await;
                    }
                    Err(e) => {
                        let _ = reply.send(Err(TableError::ActionRejected(e)));
                    }
                }
            }
            Command::Snapshot { reply } => {
                let _ = reply.send(self.build_snapshot());
            }
            Command::Stop => {}
        }
    }

    /// Publishes `seed`, then keeps ticking the phase machine and
    /// publishing whatever each tick produces until a tick yields nothing
    /// — folding a cascade (hand start into the first decision, a
    /// completed round into the next street's deal and decision) into one
    /// pass instead of waiting out the tick interval between each step.
    async fn drive(&mut self, seed: Vec<Outcome>) {
        if !seed.is_empty() {
            self.publish(seed).await;
            if let Some(reason) = &self.state.halted {
                let _ = self.events.send(Event::Fatal(reason.clone()));
                return;
            }
        }
        // Always ticks at least once, even for an empty seed — this is the
        // only path that lets a `Waiting` table pick up a newly-met
        // `min_players` threshold on the periodic ticker, which calls
        // `drive(Vec::new())` with nothing of its own to publish.
        loop {
            let outcomes = self.state.tick(&mut self.shuffler);
            if outcomes.is_empty() {
                break;
            }
            self.publish(outcomes).await;
            if let Some(reason) = &self.state.halted {
                let _ = self.events.send(Event::Fatal(reason.clone()));
                break;
            }
        }
    }

    async fn publish(&mut self, outcomes: Vec<Outcome>) {
        for outcome in outcomes {
            match outcome {
                Outcome::HandStarted { dealer, audit } => {
                    self.current_hand_audit = Some(audit);
                    self.current_initial_deck = self.state.initial_deck_order();
                    self.pending_actions.clear();
                    let stacks = self.state.seats.iter().flatten().map(|s| s.chips).collect();
                    let _ = self.events.send(Event::HandStart { hand: self.state.hand_number, dealer, stacks });
                }
                Outcome::HoleCardsDealt { seat } => {
                    if let Some(s) = self.state.seats[seat].as_ref() {
                        let _ = self.events.send(Event::HoleCards { hand: self.state.hand_number, seat, hole: s.hole_cards });
                    }
                }
                Outcome::CommunityDealt { street, board } => {
                    let _ = self.events.send(Event::Board { hand: self.state.hand_number, street, board });
                }
                Outcome::ActionApplied { seat, action, pot } => {
                    self.pending_actions.push(ActionRecord { seat, action, timestamp_unix_secs: unix_now() });
                    let _ = self.events.send(Event::Action { hand: self.state.hand_number, seat, action, pot });
                }
                Outcome::ActorToAct { seat, legal } => {
                    let _ = self.events.send(Event::Decision { hand: self.state.hand_number, seat, legal });
                }
                Outcome::HandEndedEarly { winner, amount } => {
                    self.finalize_hand(vec![(winner, amount)]).await;
                }
                Outcome::Showdown { awards } => {
                    for seat in self.state.seats.iter().flatten() {
                        let hole = seat.status.is_contesting().then_some(seat.hole_cards);
                        let _ = self.events.send(Event::Showdown { hand: self.state.hand_number, seat: seat.seat_index, hole });
                    }
                    self.finalize_hand(awards).await;
                }
                Outcome::HandComplete => {}
            }
        }
    }

    async fn finalize_hand(&mut self, pot_disposition: Vec<(Position, Chips)>) {
        let _ = self.events.send(Event::HandEnd { hand: self.state.hand_number, winners: pot_disposition.clone() });
        let Some(shuffle) = self.current_hand_audit.take() else { return };
        let record = HandAuditRecord {
            table_id: self.state.table_id,
            hand_number: self.state.hand_number,
            shuffle,
            initial_deck: std::mem::take(&mut self.current_initial_deck),
            actions: std::mem::take(&mut self.pending_actions),
            pot_disposition,
        };
        if let Err(err) = self.history.record_hand(record).await {
            log::warn!("table {} failed to record hand history: {err:#}", self.state.table_id);
        }
    }

    fn build_snapshot(&self) -> TableSnapshot {
        let seats = self
            .state
            .seats
            .iter()
            .map(|slot| {
                slot.as_ref().map(|s| SeatView {
                    seat_index: s.seat_index,
                    display_name: s.display_name.clone(),
                    chips: s.chips,
                    hole_cards: Some(s.hole_cards),
                    current_bet: s.current_bet,
                    total_invested: s.total_invested,
                    status: s.status,
                    connected: s.connected,
                    dealer_flag: self.state.dealer_button_seat == Some(s.seat_index),
                })
            })
            .collect();
        TableSnapshot {
            table_id: self.state.table_id,
            phase: self.state.phase,
            dealer_button_seat: self.state.dealer_button_seat,
            current_actor_seat: self.state.current_actor_seat,
            community_cards: self.state.community_cards,
            pots: self.state.pots.iter().map(SnapshotPot::from).collect(),
            seats,
            last_bet: self.state.last_bet,
            min_raise: self.state.min_raise,
            pot_total: self.state.pot_total(),
            hand_number: self.state.hand_number,
        }
    }
}

/// Maps a rules-engine rejection onto the table-level vocabulary for
/// seat lifecycle operations; `submit_action` rejections stay wrapped as
/// [`TableError::ActionRejected`] instead since they have no table-level
/// equivalent.
fn map_lifecycle_error(e: ActionError, buy_in: Chips) -> TableError {
    match e {
        ActionError::TableFull => TableError::TableFull,
        ActionError::NoSeatsAvailable => TableError::NoSeatsAvailable,
        ActionError::PlayerNotFound => TableError::PlayerNotFound,
        ActionError::NotEnoughPlayers => TableError::NotEnoughPlayers,
        ActionError::InvalidBetAmount => TableError::BuyInOutOfRange(buy_in),
        other => TableError::ActionRejected(other),
    }
}

fn unix_now() -> u64 {
    std::time::SystemTime::now().duration_since(std::time::UNIX_EPOCH).unwrap_or_default().as_secs()
}

#[cfg(test)]
mod tests {
    use super::*;
    use poker_rules::{BettingStructure, FeatureFlags, GameType};
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

    #[tokio::test]
    async fn seating_two_players_starts_a_hand() {
        let handle = Table::spawn(config(), Arc::new(crate::history::NullHistoryRepository));
        let mut events = handle.subscribe();

        handle.seat(ID::random(), "Alice".into(), 1000).await.unwrap();
        handle.seat(ID::random(), "Bob".into(), 1000).await.unwrap();

        let event = tokio::time::timeout(Duration::from_secs(1), events.recv()).await.unwrap().unwrap();
        assert!(matches!(event, Event::HandStart { .. }));

        let snapshot = handle.snapshot().await.unwrap();
        assert_eq!(snapshot.phase, crate::phase::Phase::Preflop);
        handle.stop().await;
    }

    #[tokio::test]
    async fn rejects_action_from_the_wrong_seat() {
        let handle = Table::spawn(config(), Arc::new(crate::history::NullHistoryRepository));
        handle.seat(ID::random(), "Alice".into(), 1000).await.unwrap();
        handle.seat(ID::random(), "Bob".into(), 1000).await.unwrap();

        let snapshot = loop {
            let s = handle.snapshot().await.unwrap();
            if s.current_actor_seat.is_some() {
                break s;
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        };
        let actor = snapshot.current_actor_seat.unwrap();
        let other = (actor + 1) % 2;
        let result = handle.submit_action(other, Action::Fold).await;
        assert!(matches!(result, Err(TableError::ActionRejected(ActionError::NotYourTurn))));
        handle.stop().await;
    }

    #[tokio::test]
    async fn stop_ends_the_loop() {
        let handle = Table::spawn(config(), Arc::new(crate::history::NullHistoryRepository));
        handle.stop().await;
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(handle.snapshot().await.is_err());
    }
}
