use crate::rank::Rank;
use crate::suit::Suit;

/// A single playing card: a rank and a suit.
///
/// Bijective with `0..52` for compact transport (`u8::from`/`Card::from`);
/// internally, [`crate::hand::Hand`] uses a different, suit-major bit
/// layout optimized for evaluation rather than transport compactness.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct Card {
    rank: Rank,
    suit: Suit,
}

impl Card {
    pub const fn new(rank: Rank, suit: Suit) -> Self {
        Self { rank, suit }
    }
    pub const fn rank(&self) -> Rank {
        self.rank
    }
    pub const fn suit(&self) -> Suit {
        self.suit
    }
    /// A full, unordered 52-card deck in a fixed canonical order (rank-major).
    pub fn deck() -> Vec<Card> {
        let mut cards = Vec::with_capacity(52);
        for rank in Rank::all() {
            for suit in Suit::all() {
                cards.push(Card::new(rank, suit));
            }
        }
        cards
    }
}

/// `card = rank * 4 + suit`, so `0..52` bijects onto the 52-card deck.
impl From<u8> for Card {
    fn from(n: u8) -> Card {
        assert!(n < 52, "invalid card index {n}");
        Card::new(Rank::from(n / 4), Suit::from(n % 4))
    }
}
impl From<Card> for u8 {
    fn from(c: Card) -> u8 {
        u8::from(c.rank) * 4 + u8::from(c.suit)
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}{}", self.rank.ascii(), self.suit.ascii())
    }
}

impl TryFrom<&str> for Card {
    type Error = &'static str;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        let mut chars = s.trim().chars();
        let rank = chars
            .next()
            .and_then(|c| Rank::try_from(c).ok())
            .ok_or("invalid rank character")?;
        let suit = chars
            .next()
            .and_then(|c| Suit::try_from(c).ok())
            .ok_or("invalid suit character")?;
        if chars.next().is_some() {
            return Err("trailing characters after card notation");
        }
        Ok(Card::new(rank, suit))
    }
}
