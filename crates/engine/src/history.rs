use poker_cards::{Card, ShuffleAuditRecord};
use poker_core::{Chips, Position, ID};
use poker_rules::{Action, Table};

/// One player action as it happened, for audit replay.
#[derive(Debug, Clone)]
pub struct ActionRecord {
    pub seat: Position,
    pub action: Action,
    pub timestamp_unix_secs: u64,
}

/// Everything needed to reconstruct one hand after the fact (spec §6's
/// "Audit records"): the shuffle commitment, the deck order it produced,
/// every action in submission order, and how the pot was finally split.
#[derive(Debug, Clone)]
pub struct HandAuditRecord {
    pub table_id: ID<Table>,
    pub hand_number: u64,
    pub shuffle: ShuffleAuditRecord,
    pub initial_deck: Vec<Card>,
    pub actions: Vec<ActionRecord>,
    pub pot_disposition: Vec<(Position, Chips)>,
}

/// A narrow persistence port for hand history. Deliberately an interface
/// only — concrete storage (Postgres, S3, whatever a deployment picks) is
/// explicitly out of scope (spec §1: "persistence... reached via narrow
/// repository ports"); the engine depends on this trait, never on a
/// storage crate.
#[async_trait::async_trait]
pub trait HistoryRepository: Send + Sync {
    async fn record_hand(&self, record: HandAuditRecord) -> anyhow::Result<()>;
}

/// A `HistoryRepository` that discards everything, for tables run without
/// persistence (tests, ephemeral play-money tables).
pub struct NullHistoryRepository;

#[async_trait::async_trait]
impl HistoryRepository for NullHistoryRepository {
    async fn record_hand(&self, _record: HandAuditRecord) -> anyhow::Result<()> {
        Ok(())
    }
}
