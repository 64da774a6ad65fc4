//! Card representation, 7-card hand evaluation, and the auditable shuffler.
//!
//! - [`Card`], [`Rank`], [`Suit`] — the 52-card deck, bijective with `0..52`
//!   for transport.
//! - [`Hand`] — a bitmask set of cards; also used to represent a seat's
//!   hole cards ([`Hole`]) and the community board.
//! - [`Street`] — the four betting rounds of a community-card hand.
//! - [`evaluate`] — pure 5-to-7 card hand evaluation returning a totally
//!   ordered [`Strength`].
//! - [`Shuffler`] — cryptographic Fisher-Yates shuffling with an
//!   auditable commitment record.

mod card;
mod deck;
mod evaluator;
mod hand;
mod kickers;
mod rank;
mod ranking;
mod shuffle;
mod strength;
mod street;
mod suit;

pub use card::Card;
pub use deck::Deck;
pub use evaluator::evaluate;
pub use hand::Hand;
pub use kickers::Kickers;
pub use rank::Rank;
pub use ranking::Ranking;
pub use shuffle::{ShuffleAuditRecord, Shuffler};
pub use strength::Strength;
pub use street::Street;
pub use suit::Suit;

/// A seat's private hole cards. Structurally identical to [`Hand`] but
/// named for where it's used — kept as a type alias rather than a newtype
/// since no hole-card-specific behaviour diverges from a plain card set.
pub type Hole = Hand;
