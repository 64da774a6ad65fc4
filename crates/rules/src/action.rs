use poker_core::Chips;

/// A player decision submitted for validation and application.
///
/// Mirrors the wire vocabulary of the `action` inbound message: `bet` opens
/// a round with no chips yet in front of anyone, `raise` increases an
/// existing bet; the two are kept distinct because their legality
/// conditions differ (`Bet` only when `lastBet = 0`, `Raise` only when
/// `lastBet > 0`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Fold,
    Check,
    Call,
    Bet(Chips),
    Raise(Chips),
    AllIn,
}

impl Action {
    pub fn is_aggressive(&self) -> bool {
        matches!(self, Action::Bet(_) | Action::Raise(_) | Action::AllIn)
    }
    pub fn is_passive(&self) -> bool {
        matches!(self, Action::Fold | Action::Check)
    }
    pub fn amount(&self) -> Option<Chips> {
        match self {
            Action::Bet(n) | Action::Raise(n) => Some(*n),
            _ => None,
        }
    }
    pub fn label(&self) -> &'static str {
        match self {
            Action::Fold => "fold",
            Action::Check => "check",
            Action::Call => "call",
            Action::Bet(_) => "bet",
            Action::Raise(_) => "raise",
            Action::AllIn => "all_in",
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Action::Bet(n) => write!(f, "bet {n}"),
            Action::Raise(n) => write!(f, "raise {n}"),
            other => write!(f, "{}", other.label()),
        }
    }
}
