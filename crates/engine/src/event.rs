use poker_cards::{Hand, Hole, Street};
use poker_core::{Chips, Position};
use poker_rules::Action;

/// Internal events broadcast by a table's loop to its subscribers.
///
/// This is the engine's own vocabulary, richer than the wire-level
/// `state_update`/`pot_won`/`error` trio in spec §6: each event carries
/// just the delta that happened, and [`crate::protocol::Protocol`]
/// flattens it down to the coarser snapshot push the spec mandates, plus
/// the finer per-event convenience messages layered on top.
#[derive(Clone, Debug)]
pub enum Event {
    HandStart {
        hand: u64,
        dealer: Position,
        stacks: Vec<Chips>,
    },
    HoleCards {
        hand: u64,
        seat: Position,
        hole: Hole,
    },
    Board {
        hand: u64,
        street: Street,
        board: Hand,
    },
    Action {
        hand: u64,
        seat: Position,
        action: Action,
        pot: Chips,
    },
    /// It is `seat`'s turn; `legal` enumerates what the rules engine will
    /// currently accept.
    Decision {
        hand: u64,
        seat: Position,
        legal: Vec<Action>,
    },
    Showdown {
        hand: u64,
        seat: Position,
        hole: Option<Hole>,
    },
    HandEnd {
        hand: u64,
        winners: Vec<(Position, Chips)>,
    },
    Disconnect(Position),
    /// An invariant violation halted the table; no further actions are
    /// accepted after this event.
    Fatal(String),
}

impl std::fmt::Display for Event {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Event::HandStart { hand, dealer, .. } => write!(f, "hand #{hand} starting, dealer P{dealer}"),
            Event::HoleCards { seat, .. } => write!(f, "hole cards dealt to P{seat}"),
            Event::Board { street, board, .. } => write!(f, "{street}: {board}"),
            Event::Action { seat, action, .. } => write!(f, "P{seat}: {action}"),
            Event::Decision { seat, .. } => write!(f, "P{seat} to act"),
            Event::Showdown { seat, hole: Some(h), .. } => write!(f, "P{seat}: {h}"),
            Event::Showdown { seat, hole: None, .. } => write!(f, "P{seat}: mucks"),
            Event::HandEnd { winners, .. } => {
                let s = winners.iter().map(|(p, c)| format!("P{p} wins {c}")).collect::<Vec<_>>().join(", ");
                write!(f, "winners: {s}")
            }
            Event::Disconnect(seat) => write!(f, "P{seat} disconnected"),
            Event::Fatal(reason) => write!(f, "table halted: {reason}"),
        }
    }
}
