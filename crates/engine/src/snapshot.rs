use poker_cards::{Hand, Hole};
use poker_core::{Chips, Position, ID};
use poker_rules::{Pot, SeatStatus, Table};

use crate::phase::Phase;

/// A seat as seen from *some* viewpoint: a viewer's own hole cards are
/// populated, everyone else's are `None`. This is the only place
/// redaction happens — callers never get a raw [`poker_rules::Seat`].
#[derive(Debug, Clone, serde::Serialize)]
pub struct SeatView {
    pub seat_index: Position,
    pub display_name: String,
    pub chips: Chips,
    pub hole_cards: Option<Hole>,
    pub current_bet: Chips,
    pub total_invested: Chips,
    pub status: SeatStatus,
    pub connected: bool,
    pub dealer_flag: bool,
}

/// A deep, copy-on-read view of one table's state (spec §3's `TableState`,
/// as handed to callers). Never aliases the engine's live state: every
/// field is owned data, so holding a snapshot can never block the table's
/// loop or observe a half-applied mutation.
#[derive(Debug, Clone, serde::Serialize)]
pub struct TableSnapshot {
    pub table_id: ID<Table>,
    pub phase: Phase,
    pub dealer_button_seat: Option<Position>,
    pub current_actor_seat: Option<Position>,
    pub community_cards: Hand,
    pub pots: Vec<SnapshotPot>,
    pub seats: Vec<Option<SeatView>>,
    pub last_bet: Chips,
    pub min_raise: Chips,
    pub pot_total: Chips,
    pub hand_number: u64,
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct SnapshotPot {
    pub amount: Chips,
    pub eligible: Vec<Position>,
    pub is_side: bool,
}

impl From<&Pot> for SnapshotPot {
    fn from(pot: &Pot) -> Self {
        Self {
            amount: pot.amount,
            eligible: pot.eligible.iter().copied().collect(),
            is_side: pot.is_side,
        }
    }
}

impl TableSnapshot {
    /// Blanks every seat's hole cards except `viewer`'s own. Passing
    /// `None` (a spectator or server-side log) blanks every seat.
    pub fn redact_for(mut self, viewer: Option<Position>) -> Self {
        for (index, seat) in self.seats.iter_mut().enumerate() {
            if let Some(view) = seat {
                if Some(index) != viewer {
                    view.hole_cards = None;
                }
            }
        }
        self
    }
}
