/// Reasons a [`crate::config::TableConfig`] fails `validate`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("min/max players must be within the supported seat range")]
    SeatBoundsOutOfRange,
    #[error("min_players exceeds max_players")]
    MinExceedsMax,
    #[error("big_blind must exceed small_blind, and small_blind must be positive")]
    InvalidBlindStructure,
    #[error("buy_in_min exceeds buy_in_max")]
    InvalidBuyInRange,
    #[error("fixed-limit raise cap must be at least 1")]
    InvalidRaiseCap,
}

/// Stable, textual error identifiers for rejected actions, matching §6's
/// error code vocabulary exactly so callers can match without parsing
/// message text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ActionError {
    #[error("table_full")]
    TableFull,
    #[error("no_seats_available")]
    NoSeatsAvailable,
    #[error("player_not_found")]
    PlayerNotFound,
    #[error("invalid_action")]
    InvalidAction,
    #[error("not_enough_players")]
    NotEnoughPlayers,
    #[error("invalid_bet_amount")]
    InvalidBetAmount,
    #[error("not_your_turn")]
    NotYourTurn,
    #[error("cannot_check")]
    CannotCheck,
    #[error("cannot_call")]
    CannotCall,
    #[error("cannot_bet")]
    CannotBet,
    #[error("cannot_raise")]
    CannotRaise,
    #[error("raise_too_small")]
    RaiseTooSmall,
    #[error("bet_exceeds_pot")]
    BetExceedsPot,
    #[error("insufficient_chips")]
    InsufficientChips,
}

impl ActionError {
    /// The stable wire identifier, same as `Display` but explicit for
    /// serialization call sites that want a `&'static str` without
    /// allocating.
    pub fn code(&self) -> &'static str {
        match self {
            ActionError::TableFull => "table_full",
            ActionError::NoSeatsAvailable => "no_seats_available",
            ActionError::PlayerNotFound => "player_not_found",
            ActionError::InvalidAction => "invalid_action",
            ActionError::NotEnoughPlayers => "not_enough_players",
            ActionError::InvalidBetAmount => "invalid_bet_amount",
            ActionError::NotYourTurn => "not_your_turn",
            ActionError::CannotCheck => "cannot_check",
            ActionError::CannotCall => "cannot_call",
            ActionError::CannotBet => "cannot_bet",
            ActionError::CannotRaise => "cannot_raise",
            ActionError::RaiseTooSmall => "raise_too_small",
            ActionError::BetExceedsPot => "bet_exceeds_pot",
            ActionError::InsufficientChips => "insufficient_chips",
        }
    }
}
