//! The Table Registry (spec §4.5): a process-wide map from table id to a
//! running [`poker_engine::Table`] handle, plus the idle-table reaper.
//!
//! Tables never share mutable state with each other (spec §5); the
//! registry's own lock guards only the map itself and is never held while
//! awaiting a call into a table, mirroring the teacher's `Casino`
//! (`hosting::casino.rs`) — generalized from one `Casino` per HTTP process
//! handing out two-seat rooms to a capped, reapable map of many-seat
//! tables.
//!
//! - [`TableRegistry`] — `create` / `get` / `list` / `stop` / `stop_all`.
//! - [`reaper::spawn_reaper`] — the background sweep that stops tables
//!   left `Waiting` and empty past a configurable TTL.
//! - [`RegistryError`] — typed rejections from the registry's own surface.

mod errors;
mod reaper;
mod registry;

pub use errors::RegistryError;
pub use reaper::spawn_reaper;
pub use registry::{TableRegistry, TableSummary};
