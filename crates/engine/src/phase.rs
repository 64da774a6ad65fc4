/// A table's position in the hand lifecycle (spec §4.1).
///
/// `Waiting` is both the start and end state: a hand completes, the table
/// returns to `Waiting`, and either re-enters `Preflop` immediately (enough
/// ready players) or sits idle until it does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Phase {
    Waiting,
    Preflop,
    Flop,
    Turn,
    River,
    Showdown,
    HandComplete,
}

impl Phase {
    /// Is this phase a betting round where actions are solicited?
    pub fn is_betting_round(&self) -> bool {
        matches!(self, Phase::Preflop | Phase::Flop | Phase::Turn | Phase::River)
    }

    /// The community-card street this phase corresponds to, if any.
    pub fn street(&self) -> Option<poker_cards::Street> {
        match self {
            Phase::Preflop => Some(poker_cards::Street::Pref),
            Phase::Flop => Some(poker_cards::Street::Flop),
            Phase::Turn => Some(poker_cards::Street::Turn),
            Phase::River => Some(poker_cards::Street::Rive),
            _ => None,
        }
    }

    /// The next betting-round phase after this one completes, or
    /// `Showdown` once the river is done. `Waiting`, `Showdown`, and
    /// `HandComplete` have no "next street" and return `None`.
    pub fn next_street(&self) -> Option<Phase> {
        match self {
            Phase::Preflop => Some(Phase::Flop),
            Phase::Flop => Some(Phase::Turn),
            Phase::Turn => Some(Phase::River),
            Phase::River => Some(Phase::Showdown),
            _ => None,
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let s = match self {
            Phase::Waiting => "waiting",
            Phase::Preflop => "preflop",
            Phase::Flop => "flop",
            Phase::Turn => "turn",
            Phase::River => "river",
            Phase::Showdown => "showdown",
            Phase::HandComplete => "hand_complete",
        };
        write!(f, "{s}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn street_progression_ends_at_showdown() {
        assert_eq!(Phase::Preflop.next_street(), Some(Phase::Flop));
        assert_eq!(Phase::River.next_street(), Some(Phase::Showdown));
        assert_eq!(Phase::Showdown.next_street(), None);
    }
}
