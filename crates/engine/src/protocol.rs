use poker_rules::Action;

use crate::event::Event;
use crate::message::{Reveal, ServerMessage, Winner};
use crate::snapshot::TableSnapshot;

/// Errors parsing or validating a client-submitted action string.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ProtocolError {
    #[error("invalid_action: {0}")]
    InvalidAction(String),
    #[error("invalid_action: {0} is not currently legal")]
    IllegalAction(String),
}

/// Converts internal [`Event`]s to wire [`ServerMessage`]s and parses
/// client action strings, centralizing the boundary between internal
/// vocabulary and the wire contract.
pub struct Protocol;

impl Protocol {
    /// The canonical snapshot push, spec §6's `state_update`.
    pub fn state_update(snapshot: TableSnapshot, viewer_seat: Option<poker_core::Position>) -> ServerMessage {
        ServerMessage::StateUpdate {
            state: snapshot.redact_for(viewer_seat),
            viewer_seat,
        }
    }

    /// Converts an internal event to its additive convenience message.
    /// Returns `None` for events with no client-facing wire form
    /// (`Disconnect`, `Fatal` — the latter is instead surfaced as an
    /// `Error` through [`Protocol::error`]).
    pub fn encode(event: &Event) -> Option<ServerMessage> {
        match event {
            Event::HandStart { hand, dealer, stacks } => Some(ServerMessage::HandStart {
                hand: *hand,
                dealer: *dealer,
                stacks: stacks.clone(),
            }),
            Event::HoleCards { hand, hole, .. } => Some(ServerMessage::HoleCards {
                hand: *hand,
                cards: hole.to_string(),
            }),
            Event::Board { hand, street, board } => Some(ServerMessage::Board {
                hand: *hand,
                street: street.label().to_string(),
                cards: board.iter().map(|c| c.to_string()).collect(),
            }),
            Event::Action { hand, seat, action, pot } => Some(ServerMessage::Action {
                hand: *hand,
                seat: *seat,
                action: action.to_string(),
                pot: *pot,
            }),
            Event::Decision { hand, seat, legal } => Some(ServerMessage::Decision {
                hand: *hand,
                seat: *seat,
                legal: legal.iter().map(|a| a.label().to_string()).collect(),
            }),
            Event::Showdown { hand, seat, hole } => Some(ServerMessage::Showdown {
                hand: *hand,
                reveals: vec![Reveal { seat: *seat, cards: hole.map(|h| h.to_string()) }],
            }),
            Event::HandEnd { hand, winners } => Some(ServerMessage::PotWon {
                hand_number: *hand,
                winners: winners.iter().map(|(seat, amount)| Winner { seat: *seat, amount: *amount }).collect(),
            }),
            Event::Disconnect(_) => None,
            Event::Fatal(_) => None,
        }
    }

    pub fn error(message: impl Into<String>) -> ServerMessage {
        ServerMessage::Error { message: message.into() }
    }

    /// Parses a client action string (`"fold"`, `"bet 10"`, `"raise 20"`,
    /// `"all_in"`) into an [`Action`].
    pub fn decode(s: &str) -> Result<Action, ProtocolError> {
        let mut parts = s.trim().split_whitespace();
        let label = parts.next().ok_or_else(|| ProtocolError::InvalidAction(s.to_string()))?;
        match label {
            "fold" => Ok(Action::Fold),
            "check" => Ok(Action::Check),
            "call" => Ok(Action::Call),
            "all_in" => Ok(Action::AllIn),
            "bet" | "raise" => {
                let amount: poker_core::Chips = parts
                    .next()
                    .and_then(|n| n.parse().ok())
                    .ok_or_else(|| ProtocolError::InvalidAction(s.to_string()))?;
                Ok(if label == "bet" { Action::Bet(amount) } else { Action::Raise(amount) })
            }
            _ => Err(ProtocolError::InvalidAction(s.to_string())),
        }
    }

    /// Confirms `action` is among the currently legal actions.
    pub fn validate(action: Action, legal: &[Action]) -> Result<Action, ProtocolError> {
        legal.contains(&action).then_some(action).ok_or_else(|| ProtocolError::IllegalAction(action.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_valid_actions() {
        assert_eq!(Protocol::decode("fold").unwrap(), Action::Fold);
        assert_eq!(Protocol::decode("check").unwrap(), Action::Check);
        assert_eq!(Protocol::decode("bet 10").unwrap(), Action::Bet(10));
        assert_eq!(Protocol::decode("raise 20").unwrap(), Action::Raise(20));
        assert_eq!(Protocol::decode("all_in").unwrap(), Action::AllIn);
    }

    #[test]
    fn decode_rejects_missing_amount() {
        assert!(Protocol::decode("bet").is_err());
        assert!(Protocol::decode("nonsense").is_err());
    }

    #[test]
    fn validate_rejects_illegal_action() {
        let legal = vec![Action::Fold, Action::Check];
        assert!(Protocol::validate(Action::Fold, &legal).is_ok());
        assert!(Protocol::validate(Action::Raise(10), &legal).is_err());
    }
}
