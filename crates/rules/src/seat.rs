use poker_cards::Hole;
use poker_core::{Chips, Position, ID};

/// Marker type for player identifiers; never instantiated.
pub struct Player;

/// A seat's full record: identity, chips, and this hand's betting state.
///
/// Persists across hands while the player stays seated; `hole_cards`,
/// `current_bet`, and `total_invested` are reset at each hand boundary,
/// `chips` and `status` carry across hands.
#[derive(Debug, Clone)]
pub struct Seat {
    pub seat_index: Position,
    pub player_id: ID<Player>,
    pub display_name: String,
    pub chips: Chips,
    pub hole_cards: Hole,
    /// Chips put into this street.
    pub current_bet: Chips,
    /// Chips put into this hand, across all streets.
    pub total_invested: Chips,
    pub status: SeatStatus,
    pub connected: bool,
    pub dealer_flag: bool,
}

/// A seat's standing within the current hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SeatStatus {
    Active,
    Folded,
    AllIn,
    SittingOut,
    Disconnected,
    Busted,
}

impl SeatStatus {
    pub fn is_contesting(&self) -> bool {
        matches!(self, SeatStatus::Active | SeatStatus::AllIn)
    }
}

impl Seat {
    pub fn new(seat_index: Position, player_id: ID<Player>, display_name: String, chips: Chips) -> Self {
        Self {
            seat_index,
            player_id,
            display_name,
            chips,
            hole_cards: Hole::empty(),
            current_bet: 0,
            total_invested: 0,
            status: SeatStatus::Active,
            connected: true,
            dealer_flag: false,
        }
    }

    /// Commits `amount` from stack to pot, capping at the seat's remaining
    /// chips and promoting to AllIn when the cap binds.
    pub fn commit(&mut self, amount: Chips) -> Chips {
        let paid = amount.min(self.chips);
        self.chips -= paid;
        self.current_bet += paid;
        self.total_invested += paid;
        if self.chips == 0 && self.status == SeatStatus::Active {
            self.status = SeatStatus::AllIn;
        }
        paid
    }

    pub fn reset_for_new_street(&mut self) {
        self.current_bet = 0;
    }

    pub fn reset_for_new_hand(&mut self) {
        self.current_bet = 0;
        self.total_invested = 0;
        self.hole_cards = Hole::empty();
        if self.chips == 0 {
            self.status = SeatStatus::Busted;
        } else if self.status != SeatStatus::SittingOut && self.status != SeatStatus::Disconnected {
            self.status = SeatStatus::Active;
        }
    }
}
