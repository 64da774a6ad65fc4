use crate::rank::Rank;

/// Ordered tiebreaker ranks, highest first, used to disambiguate two hands
/// of the same [`crate::ranking::Ranking`].
///
/// The derived [`Ord`] compares element-by-element in declaration order
/// (i.e. [`Vec::cmp`]'s lexicographic rule), which is exactly the
/// tiebreaking rule poker uses: the first differing kicker decides, and a
/// higher rank there wins regardless of what follows.
#[derive(Debug, Clone, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct Kickers(Vec<Rank>);

impl Kickers {
    pub fn new(mut ranks: Vec<Rank>) -> Self {
        ranks.sort_unstable_by(|a, b| b.cmp(a));
        Self(ranks)
    }
    pub fn ranks(&self) -> &[Rank] {
        &self.0
    }
}

impl std::fmt::Display for Kickers {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let s: Vec<String> = self.0.iter().map(|r| r.to_string()).collect();
        write!(f, "{}", s.join(""))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn higher_first_kicker_wins() {
        let a = Kickers::new(vec![Rank::Ace, Rank::Two]);
        let b = Kickers::new(vec![Rank::King, Rank::Queen]);
        assert!(a > b);
    }

    #[test]
    fn ties_fall_through_to_next_kicker() {
        let a = Kickers::new(vec![Rank::Ace, Rank::King, Rank::Two]);
        let b = Kickers::new(vec![Rank::Ace, Rank::King, Rank::Three]);
        assert!(b > a);
    }

    #[test]
    fn sorts_descending_regardless_of_input_order() {
        let k = Kickers::new(vec![Rank::Two, Rank::Ace, Rank::Jack]);
        assert_eq!(k.ranks(), &[Rank::Ace, Rank::Jack, Rank::Two]);
    }
}
