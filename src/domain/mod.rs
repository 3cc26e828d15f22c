//! Domain models for codecs
//!
//! Commands, their kinds and identity, and the log entry record.
//! No I/O happens here.

mod command;
mod kind;
mod log_entry;

pub use command::{default_title, Behavior, BuildError, Command, CommandBuilder};
pub use kind::{CommandKey, CommandKind, KindError};
pub use log_entry::LogEntry;
