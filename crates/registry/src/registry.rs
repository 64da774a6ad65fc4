use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::{Mutex, RwLock};

use poker_core::ID;
use poker_engine::{HistoryRepository, Table, TableHandle};
use poker_rules::TableConfig;

use crate::errors::RegistryError;

/// One table's entry in the registry: the handle used to talk to it, its
/// config (kept for `list()` summaries), and the bookkeeping the reaper
/// needs to judge idleness without asking the table loop on every tick.
struct Entry {
    handle: TableHandle,
    config: TableConfig,
    /// When this table was first observed `Waiting` with no seated
    /// players, or `None` if it isn't currently in that state. Cleared the
    /// moment a seat is occupied or a hand starts.
    empty_since: Mutex<Option<Instant>>,
}

/// Process-wide `tableId -> TableEngine` map (spec §4.5, the Table
/// Registry). Owns no table state itself — each entry is just a cheap
/// handle — and never holds its own lock while awaiting a call into a
/// table, so a slow or wedged table can't stall registry-wide operations
/// like `list()` or another table's `create`.
pub struct TableRegistry {
    tables: RwLock<HashMap<ID<poker_rules::Table>, Entry>>,
    history: Arc<dyn HistoryRepository>,
    max_tables: usize,
}

/// A point-in-time summary for `list()`, cheap to clone and safe to hand
/// to callers without exposing the live handle.
#[derive(Debug, Clone)]
pub struct TableSummary {
    pub table_id: ID<poker_rules::Table>,
    pub config: TableConfig,
}

impl TableRegistry {
    pub fn new(max_tables: usize, history: Arc<dyn HistoryRepository>) -> Arc<Self> {
        Arc::new(Self {
            tables: RwLock::new(HashMap::new()),
            history,
            max_tables,
        })
    }

    /// Creates and spawns a table for `config`. Idempotent by id: a second
    /// call with an id already present returns the existing handle rather
    /// than spawning a duplicate or erroring (see `DESIGN.md` for why this
    /// reading of "idempotent... or a conflict error" was chosen over
    /// rejecting the second call).
    pub async fn create(&self, config: TableConfig) -> Result<TableHandle, RegistryError> {
        config.validate()?;
        let id = config.table_id;

        {
            let tables = self.tables.read().await;
            if let Some(entry) = tables.get(&id) {
                return Ok(entry.handle.clone());
            }
            if tables.len() >= self.max_tables {
                return Err(RegistryError::AtCapacity(self.max_tables));
            }
        }

        let mut tables = self.tables.write().await;
        // Re-check after re-acquiring the lock as a writer: another task
        // may have created or filled the last slot between our read and
        // write locks.
        if let Some(entry) = tables.get(&id) {
            return Ok(entry.handle.clone());
        }
        if tables.len() >= self.max_tables {
            return Err(RegistryError::AtCapacity(self.max_tables));
        }

        let handle = Table::spawn(config.clone(), self.history.clone());
        log::info!("registry: created table {id}");
        tables.insert(
            id,
            Entry {
                handle: handle.clone(),
                config,
                empty_since: Mutex::new(None),
            },
        );
        Ok(handle)
    }

    pub async fn get(&self, id: ID<poker_rules::Table>) -> Option<TableHandle> {
        self.tables.read().await.get(&id).map(|e| e.handle.clone())
    }

    pub async fn list(&self) -> Vec<TableSummary> {
        self.tables
            .read()
            .await
            .values()
            .map(|e| TableSummary { table_id: e.handle.table_id(), config: e.config.clone() })
            .collect()
    }

    /// Removes `id` from the map and asks its loop to stop. The handle is
    /// removed from the map before the (possibly slow) stop call so the
    /// registry's own lock is never held across it.
    pub async fn stop(&self, id: ID<poker_rules::Table>) -> Result<(), RegistryError> {
        let handle = self.tables.write().await.remove(&id).map(|e| e.handle).ok_or(RegistryError::NotFound)?;
        handle.stop().await;
        log::info!("registry: stopped table {id}");
        Ok(())
    }

    pub async fn stop_all(&self) {
        let handles: Vec<TableHandle> = {
            let mut tables = self.tables.write().await;
            tables.drain().map(|(_, e)| e.handle).collect()
        };
        for handle in handles {
            handle.stop().await;
        }
    }

    pub async fn table_count(&self) -> usize {
        self.tables.read().await.len()
    }

    /// One reaper sweep: any table `Waiting` with no seated players for at
    /// least `ttl` is stopped and removed. Snapshots are taken with no
    /// registry lock held; only the final removal briefly takes the write
    /// lock per reaped table.
    pub(crate) async fn reap_once(&self, ttl: Duration) {
        let candidates: Vec<(ID<poker_rules::Table>, TableHandle)> = {
            let tables = self.tables.read().await;
            tables.iter().map(|(id, e)| (*id, e.handle.clone())).collect()
        };

        for (id, handle) in candidates {
            let Ok(snapshot) = handle.snapshot().await else {
                // Loop already gone; drop it from the map.
                self.tables.write().await.remove(&id);
                continue;
            };
            let is_idle = snapshot.phase == poker_engine::Phase::Waiting && snapshot.seats.iter().all(Option::is_none);

            let should_reap = {
                let tables = self.tables.read().await;
                let Some(entry) = tables.get(&id) else { continue };
                let mut empty_since = entry.empty_since.lock().await;
                if !is_idle {
                    *empty_since = None;
                    false
                } else {
                    let since = *empty_since.get_or_insert(Instant::now());
                    since.elapsed() >= ttl
                }
            };

            if should_reap {
                log::debug!("registry: reaping idle table {id}");
                if let Some(entry) = self.tables.write().await.remove(&id) {
                    entry.handle.stop().await;
                }
            }
        }
    }
}
