use std::time::Duration;

use poker_core::{Chips, ID, MAX_SEATS, MIN_SEATS};

use crate::betting::BettingStructure;
use crate::errors::ConfigError;

/// Marker type for table identifiers; never instantiated.
pub struct Table;

/// The poker variant played at a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameType {
    HoldEm,
    Omaha,
    OmahaHiLo,
    Stud,
    Draw,
}

/// Flags for features the engine exposes but, per the open questions this
/// spec was distilled from, does not implement end-to-end. Left as
/// documented no-ops rather than invented semantics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FeatureFlags {
    pub straddle: bool,
    pub run_it_twice: bool,
    pub auto_rebuy: bool,
}

#[derive(Debug, Clone)]
pub struct TableConfig {
    pub table_id: ID<Table>,
    pub game_type: GameType,
    pub betting_structure: BettingStructure,
    pub min_players: usize,
    pub max_players: usize,
    pub small_blind: Chips,
    pub big_blind: Chips,
    pub buy_in_min: Chips,
    pub buy_in_max: Chips,
    pub action_timeout: Duration,
    pub feature_flags: FeatureFlags,
}

impl TableConfig {
    /// Sanity-checks blind structure, player-count bounds, and buy-in
    /// range. Does not touch any live table state.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(MIN_SEATS..=MAX_SEATS).contains(&self.min_players)
            || !(MIN_SEATS..=MAX_SEATS).contains(&self.max_players)
        {
            return Err(ConfigError::SeatBoundsOutOfRange);
        }
        if self.min_players > self.max_players {
            return Err(ConfigError::MinExceedsMax);
        }
        if self.small_blind == 0 || self.big_blind <= self.small_blind {
            return Err(ConfigError::InvalidBlindStructure);
        }
        if self.buy_in_min > self.buy_in_max {
            return Err(ConfigError::InvalidBuyInRange);
        }
        if let BettingStructure::FixedLimit { raise_cap } = self.betting_structure {
            if raise_cap == 0 {
                return Err(ConfigError::InvalidRaiseCap);
            }
        }
        Ok(())
    }
}
