use crate::card::Card;

/// An ordered sequence of cards, consumed from the front.
///
/// Created fresh (52 distinct cards) at hand start, shuffled once by
/// [`crate::shuffle::Shuffler`], then dealt from incrementally as the hand
/// progresses. Never reshuffled mid-hand.
#[derive(Debug, Clone)]
pub struct Deck(Vec<Card>);

impl Deck {
    /// A deck in canonical (unshuffled) order. Callers must shuffle before
    /// dealing; an unshuffled deck is deterministic and must never be dealt
    /// from directly in a live hand.
    pub fn fresh() -> Self {
        Self(Card::deck())
    }
    /// Builds a deck from an already-determined card order, typically the
    /// permutation produced by a shuffle audit record.
    pub fn from_order(cards: Vec<Card>) -> Self {
        Self(cards)
    }
    pub fn len(&self) -> usize {
        self.0.len()
    }
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
    pub fn as_slice(&self) -> &[Card] {
        &self.0
    }
    /// Removes and returns the next `n` cards from the front.
    ///
    /// # Panics
    /// Panics if fewer than `n` cards remain — a hand dealing more cards
    /// than a 52-card deck can supply is a programmer error, not user
    /// input (a Stud table seats at most 10, and 10 players * 7 cards plus
    /// a full board never exceeds 52).
    pub fn deal(&mut self, n: usize) -> Vec<Card> {
        assert!(self.0.len() >= n, "deck exhausted: have {}, need {n}", self.0.len());
        self.0.drain(..n).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_deck_has_52_cards() {
        assert_eq!(Deck::fresh().len(), 52);
    }

    #[test]
    fn deal_consumes_from_front() {
        let mut deck = Deck::fresh();
        let first_two = deck.as_slice()[..2].to_vec();
        let dealt = deck.deal(2);
        assert_eq!(dealt, first_two);
        assert_eq!(deck.len(), 50);
    }

    #[test]
    #[should_panic(expected = "deck exhausted")]
    fn deal_more_than_remaining_panics() {
        let mut deck = Deck::fresh();
        deck.deal(53);
    }
}
