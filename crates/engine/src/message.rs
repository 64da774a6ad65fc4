use poker_core::{Chips, Position};

use crate::snapshot::TableSnapshot;

/// Messages sent from server to client, spec §6's outbound vocabulary
/// (`state_update`/`pot_won`/`error`) plus the teacher's finer per-event
/// convenience pushes layered on top. Clients that only care about the
/// canonical snapshot can ignore everything but `StateUpdate`.
#[derive(Clone, Debug, serde::Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    /// The canonical full-or-redacted state push, spec §6.
    StateUpdate {
        state: TableSnapshot,
        viewer_seat: Option<Position>,
    },
    /// Settlement at hand completion, spec §6.
    PotWon {
        hand_number: u64,
        winners: Vec<Winner>,
    },
    /// A rejected action or a halted table, spec §6.
    Error { message: String },

    // --- Convenience pushes, additive over the spec's minimal trio ---
    HandStart {
        hand: u64,
        dealer: Position,
        stacks: Vec<Chips>,
    },
    HoleCards {
        hand: u64,
        cards: String,
    },
    Board {
        hand: u64,
        street: String,
        cards: Vec<String>,
    },
    Action {
        hand: u64,
        seat: Position,
        action: String,
        pot: Chips,
    },
    Decision {
        hand: u64,
        seat: Position,
        legal: Vec<String>,
    },
    Showdown {
        hand: u64,
        reveals: Vec<Reveal>,
    },
}

#[derive(Clone, Debug, serde::Serialize)]
pub struct Reveal {
    pub seat: Position,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cards: Option<String>,
}

#[derive(Clone, Debug, serde::Serialize)]
pub struct Winner {
    pub seat: Position,
    pub amount: Chips,
}

impl ServerMessage {
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).expect("serialize server message")
    }
}
