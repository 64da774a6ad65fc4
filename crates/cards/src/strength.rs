use crate::kickers::Kickers;
use crate::ranking::Ranking;

/// A hand's full evaluated strength: category plus ordered tiebreakers.
///
/// Comparison is lexicographic — category first, then kickers — because
/// `category` is declared before `kickers` and both field types derive
/// [`Ord`].
#[derive(Debug, Clone, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct Strength {
    category: Ranking,
    kickers: Kickers,
}

impl Strength {
    pub fn new(category: Ranking, kickers: Kickers) -> Self {
        Self { category, kickers }
    }
    pub fn category(&self) -> Ranking {
        self.category
    }
    pub fn kickers(&self) -> &Kickers {
        &self.kickers
    }
}

impl std::fmt::Display for Strength {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{} ({})", self.category, self.kickers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rank::Rank;

    #[test]
    fn category_dominates_kickers() {
        let weak_straight_flush = Strength::new(
            Ranking::StraightFlush,
            Kickers::new(vec![Rank::Six]),
        );
        let strong_quads = Strength::new(
            Ranking::FourOfAKind,
            Kickers::new(vec![Rank::Ace, Rank::Ace, Rank::Ace, Rank::Ace, Rank::King]),
        );
        assert!(weak_straight_flush > strong_quads);
    }
}
