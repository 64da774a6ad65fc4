//! The table data model and variant/betting-structure policy — the Rules
//! Engine (spec §4.2) plus the shared Data Model types (spec §3) that the
//! engine crate builds its state machine on top of.
//!
//! - [`Action`] — a submitted player decision.
//! - [`Seat`], [`SeatStatus`] — per-player state within a hand.
//! - [`Pot`], [`build_pots`] — side-pot construction from investment levels.
//! - [`TableConfig`], [`GameType`], [`FeatureFlags`] — static table setup.
//! - [`BettingStructure`] — No-Limit / Pot-Limit / Fixed-Limit bet sizing.
//! - [`Variant`] and its implementations — per-game-type hole/community
//!   card counts and showdown comparison, composed rather than inherited.
//! - [`deal_hole`], [`deal_community`], [`collect_blinds`], [`first_actor`] —
//!   dealing and blind-posting, shared across variants.
//! - [`validate_action`], [`apply_action`], [`legal_action_kinds`] — turn
//!   order and bet-size legality for a betting round in progress.
//! - [`ConfigError`], [`ActionError`] — typed, wire-stable error identifiers.

mod action;
mod betting;
mod config;
mod deal;
mod errors;
mod policy;
mod pot;
mod seat;
mod variant;

pub use action::Action;
pub use betting::{BettingStructure, SizingContext};
pub use config::{FeatureFlags, GameType, Table, TableConfig};
pub use deal::{button_holder_eligible, call_amount, collect_blinds, deal_community, deal_hole, first_actor, BlindsPosted};
pub use errors::{ActionError, ConfigError};
pub use policy::{apply_action, legal_action_kinds, validate_action, ActionEffect, ActionKind, RoundContext};
pub use pot::{build_pots, Pot};
pub use seat::{Player, Seat, SeatStatus};
pub use variant::{
    DrawVariant, HoldEmVariant, LowHand, OmahaHiLoVariant, OmahaVariant, PotAward, ShowdownResult,
    StudVariant, Variant,
};

/// Resolves the [`Variant`] implementation for a [`GameType`].
pub fn variant_for(game_type: GameType) -> Box<dyn Variant + Send + Sync> {
    match game_type {
        GameType::HoldEm => Box::new(HoldEmVariant),
        GameType::Omaha => Box::new(OmahaVariant),
        GameType::OmahaHiLo => Box::new(OmahaHiLoVariant),
        GameType::Stud => Box::new(StudVariant),
        GameType::Draw => Box::new(DrawVariant),
    }
}
