//! # Command-Line Interface
//!
//! A small host for the codec commands.
//!
//! ## Commands
//!
//! | Command | Purpose | Example |
//! |---------|---------|---------|
//! | `list` | Show available commands | `codecs list --kind hasher` |
//! | `run` | Run a command | `codecs run encoder base64 hello` |
//! | `select` | Configure, then run | `codecs select script "search and replace" --set search=a --set replace=b` |
//! | `smart-decode` | Guess decoders | `echo SGVsbG8= \| codecs smart-decode` |
//! | `deps` | Unresolved plugin dependencies | `codecs deps` |
//! | `config` | Show configuration in effect | `codecs config` |
//!
//! ## Output Formats
//!
//! All commands support `--format`:
//! - `text` (default) - Human-readable output
//! - `json` - Machine-parseable JSON
//!
//! ## Verbose Mode
//!
//! `--verbose` (or `-v`) prints log entries and debug traces to stderr.
//!
//! ## Entry Point
//!
//! Call [`run()`] to parse arguments and execute the appropriate command.

mod app;
mod codec_cmd;
mod output;

pub use app::{run, Cli, Commands};
pub use output::{Output, OutputFormat};
