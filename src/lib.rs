//! Codecs - decoders, encoders, hashers and scripts behind one interface
//!
//! Every text operation is a [`Command`]: something with a name, a kind,
//! a title, and `run`/`select` entry points. Plugins implement [`Plugin`]
//! and are wrapped into commands; built-in operations can also be built
//! directly from closures with [`CommandBuilder`].

pub mod cli;
pub mod domain;
pub mod host;
pub mod plugin;

pub use domain::{Command, CommandBuilder, CommandKey, CommandKind, LogEntry};
pub use host::CommandRegistry;
pub use plugin::{Plugin, PluginExt, PluginInfo};
