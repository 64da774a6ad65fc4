/// Failures from the registry's own surface (spec §4.5), distinct from
/// [`poker_engine::TableError`] which covers a single table's operations.
#[derive(Debug, Clone, thiserror::Error)]
pub enum RegistryError {
    #[error("table configuration invalid: {0}")]
    InvalidConfig(#[from] poker_rules::ConfigError),
    #[error("registry is at capacity ({0} tables)")]
    AtCapacity(usize),
    #[error("no table registered with that id")]
    NotFound,
}
