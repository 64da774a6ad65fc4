use crate::card::Card;
use crate::rank::Rank;
use crate::suit::Suit;

/// A set of cards packed into a `u64` bitmask.
///
/// Layout is suit-major: each suit gets a 16-bit lane (only the low 13 bits
/// of each lane are used, one per rank), so `bit = suit * 16 + rank`. This
/// lets the evaluator mask out a single suit's ranks, or OR all four lanes
/// down into a 13-bit rank-presence mask, with plain shifts — no branching
/// per card.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
pub struct Hand(u64);

impl Hand {
    pub const fn empty() -> Self {
        Self(0)
    }
    pub const fn bits(&self) -> u64 {
        self.0
    }
    pub const fn from_bits(bits: u64) -> Self {
        Self(bits)
    }
    pub fn add(self, card: Card) -> Self {
        Self(self.0 | Self::mask(card))
    }
    pub fn remove(self, card: Card) -> Self {
        Self(self.0 & !Self::mask(card))
    }
    pub fn contains(&self, card: Card) -> bool {
        self.0 & Self::mask(card) != 0
    }
    pub fn len(&self) -> u32 {
        self.0.count_ones()
    }
    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }
    pub fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    fn mask(card: Card) -> u64 {
        let suit: u8 = card.suit().into();
        let rank: u8 = card.rank().into();
        1u64 << (suit as u32 * 16 + rank as u32)
    }

    /// This suit's 13-bit rank-presence lane, right-shifted to bit 0.
    pub fn suit_lane(&self, suit: Suit) -> u16 {
        let s: u8 = suit.into();
        ((self.0 >> (s as u32 * 16)) & 0x1FFF) as u16
    }
    /// All four suit lanes OR'd together: a 13-bit mask of which ranks are
    /// present in the hand at all, irrespective of suit.
    pub fn rank_mask(&self) -> u16 {
        Suit::all()
            .into_iter()
            .map(|s| self.suit_lane(s))
            .fold(0u16, |acc, lane| acc | lane)
    }

    pub fn iter(&self) -> impl Iterator<Item = Card> + '_ {
        Suit::all().into_iter().flat_map(move |suit| {
            let lane = self.suit_lane(suit);
            Rank::all()
                .into_iter()
                .filter(move |r| lane & (1 << u8::from(*r)) != 0)
                .map(move |r| Card::new(r, suit))
        })
    }
}

impl FromIterator<Card> for Hand {
    fn from_iter<I: IntoIterator<Item = Card>>(iter: I) -> Self {
        iter.into_iter().fold(Hand::empty(), Hand::add)
    }
}

impl From<Card> for Hand {
    fn from(card: Card) -> Self {
        Hand::empty().add(card)
    }
}

impl IntoIterator for Hand {
    type Item = Card;
    type IntoIter = std::vec::IntoIter<Card>;
    fn into_iter(self) -> Self::IntoIter {
        self.iter().collect::<Vec<_>>().into_iter()
    }
}

impl std::fmt::Display for Hand {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let cards: Vec<String> = self.iter().map(|c| c.to_string()).collect();
        write!(f, "{}", cards.join(" "))
    }
}

impl TryFrom<&str> for Hand {
    type Error = &'static str;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        s.split_whitespace()
            .map(Card::try_from)
            .collect::<Result<Vec<_>, _>>()
            .map(|cards| cards.into_iter().collect())
    }
}
