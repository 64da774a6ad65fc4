//! The Table Engine: a per-table phase state machine, its async event
//! loop, and the wire protocol clients speak to it.
//!
//! - [`state::TableState`] — phase sequencing, action application,
//!   side-pot construction, showdown distribution. Synchronous and
//!   unit-testable without a runtime.
//! - [`table::Table`], [`table::TableHandle`] — the single-consumer async
//!   loop that owns one `TableState` and the cloneable handle other tasks
//!   use to talk to it (seat, leave, submit an action, read a snapshot).
//! - [`snapshot::TableSnapshot`] — the copy-on-read, redaction-on-read
//!   view handed to callers.
//! - [`event::Event`], [`message::ServerMessage`], [`protocol::Protocol`] —
//!   the engine's internal event vocabulary, its wire form, and the
//!   bridge between them.
//! - [`history::HistoryRepository`] — the narrow persistence port hand
//!   audit records are written through.
//! - [`timer::Timer`] — per-actor turn deadline tracking.
//! - [`errors::TableError`] — operation-level rejections from the
//!   table's public surface.

mod errors;
mod event;
mod history;
mod message;
mod phase;
mod protocol;
mod snapshot;
mod state;
mod table;
mod timer;

pub use errors::TableError;
pub use event::Event;
pub use history::{ActionRecord, HandAuditRecord, HistoryRepository, NullHistoryRepository};
pub use message::{Reveal, ServerMessage, Winner};
pub use phase::Phase;
pub use protocol::{Protocol, ProtocolError};
pub use snapshot::{SeatView, SnapshotPot, TableSnapshot};
pub use state::{Outcome, TableState};
pub use table::{Table, TableHandle};
pub use timer::Timer;
