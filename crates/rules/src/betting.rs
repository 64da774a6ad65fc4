use poker_core::Chips;

/// How much a player may bet or raise, per spec §4.2.
///
/// Each variant owns its own min/max legality rather than a shared
/// table of constants, since No-Limit, Pot-Limit, and Fixed-Limit
/// disagree about what "legal" even depends on (stack size vs. pot size
/// vs. a fixed per-street increment).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BettingStructure {
    NoLimit,
    PotLimit,
    /// `raise_cap` bounds how many raises are allowed in a single
    /// betting round (spec default: 4).
    FixedLimit { raise_cap: u8 },
}

/// Inputs a `BettingStructure` needs to size a legal bet or raise.
/// `pot_before` excludes chips already in front of players this street;
/// `current_bet` is the street's standing bet (0 if unopened).
pub struct SizingContext {
    pub pot_before: Chips,
    pub current_bet: Chips,
    pub min_raise_increment: Chips,
    pub stack: Chips,
    pub small_bet: Chips,
    pub big_bet: Chips,
    pub raises_this_round: u8,
}

impl BettingStructure {
    /// The smallest legal bet-to or raise-to amount (total, not delta),
    /// given the context. Always capped by the player's stack.
    pub fn min_legal_to(&self, ctx: &SizingContext) -> Chips {
        let floor = if ctx.current_bet == 0 {
            ctx.min_raise_increment
        } else {
            ctx.current_bet + ctx.min_raise_increment
        };
        match self {
            BettingStructure::FixedLimit { .. } => {
                let fixed = if ctx.current_bet == 0 { ctx.small_bet.max(ctx.big_bet) } else { ctx.current_bet + ctx.big_bet };
                fixed.min(ctx.current_bet + ctx.stack)
            }
            _ => floor.min(ctx.current_bet + ctx.stack),
        }
    }

    /// The largest legal bet-to or raise-to amount (total, not delta).
    ///
    /// Pot-Limit uses the standard formula from spec scenario 3: the max
    /// raise-to is `callAmount + (pot_before + callAmount + callAmount)`,
    /// i.e. the pot as it would stand immediately after calling the
    /// current bet, doubled by the raiser's own call and matched raise.
    pub fn max_legal_to(&self, ctx: &SizingContext) -> Chips {
        let all_in = ctx.current_bet + ctx.stack;
        match self {
            BettingStructure::NoLimit => all_in,
            BettingStructure::PotLimit => {
                let call_amount = ctx.current_bet;
                let pot_after_call = ctx.pot_before + call_amount;
                let max_raise_to = call_amount + pot_after_call + call_amount;
                max_raise_to.min(all_in)
            }
            BettingStructure::FixedLimit { .. } => self.min_legal_to(ctx),
        }
    }

    /// Whether another raise is still permitted this round (Fixed-Limit
    /// only; No-Limit and Pot-Limit are uncapped in raise count).
    pub fn raise_allowed(&self, ctx: &SizingContext) -> bool {
        match self {
            BettingStructure::FixedLimit { raise_cap } => ctx.raises_this_round < *raise_cap,
            _ => true,
        }
    }
}
