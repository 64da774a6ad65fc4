/// Operation-level failures from the table's public surface (spec §4.1),
/// distinct from [`poker_rules::ActionError`] which covers per-action
/// legality during a betting round.
#[derive(Debug, Clone, thiserror::Error)]
pub enum TableError {
    #[error("table_full")]
    TableFull,
    #[error("no_seats_available")]
    NoSeatsAvailable,
    #[error("player_not_found")]
    PlayerNotFound,
    #[error("not_enough_players")]
    NotEnoughPlayers,
    #[error("player already seated at this table")]
    AlreadySeated,
    #[error("buy-in {0} is outside the table's configured range")]
    BuyInOutOfRange(poker_core::Chips),
    #[error("action rejected: {0}")]
    ActionRejected(#[from] poker_rules::ActionError),
    #[error("table action inbox is full, try again")]
    Backpressure,
    #[error("table has halted after an invariant violation: {0}")]
    Halted(String),
}
