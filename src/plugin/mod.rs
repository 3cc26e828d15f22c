//! # Plugin System
//!
//! Contract every codec plugin satisfies, plus the codecs shipped with the
//! crate.
//!
//! ## Plugin Kinds
//!
//! | Kind | Constructor | Purpose |
//! |------|-------------|---------|
//! | Decoder | [`PluginInfo::decoder`] | Turn encoded text back into plain text |
//! | Encoder | [`PluginInfo::encoder`] | Encode plain text |
//! | Hasher | [`PluginInfo::hasher`] | Produce a digest |
//! | Script | [`PluginInfo::script`] | Anything else, often configurable |
//!
//! ## Lifecycle
//!
//! ```text
//! Host                          Plugin
//!  │                               │
//!  ├── check_dependencies() ──────►│  unresolved list, never fails
//!  │                               │
//!  ├── select(text) ──────────────►│  first activation, may configure
//!  │                               │
//!  └── run(text) ─────────────────►│  repeat activation, reuses config
//! ```
//!
//! Finding and loading third-party plugins is the host's job; this module
//! only describes what a loaded plugin looks like.
//!
//! ## Key Types
//!
//! - [`Plugin`] - Trait implemented by plugin authors
//! - [`PluginExt`] - Title, identity and dependency checks for every plugin
//! - [`DependencyResolver`] - Decides whether a dependency is available

mod base;
mod codecs;
mod deps;
mod filter;
mod prompt;
mod scripts;

pub use base::{run_lines, try_run_lines, Plugin, PluginError, PluginExt, PluginInfo, LINE_SEPARATOR};
pub use codecs::{builtin_codecs, SimpleCodec, BUILTIN_AUTHOR};
pub use deps::{unresolved, DependencyResolver, ExecutableResolver, FirstOf, KnownModules, ResolveError};
pub use filter::FilterScript;
pub use prompt::{NoPrompt, PresetPrompt, Prompt};
pub use scripts::{Case, CaseScript, Replacement, SearchAndReplace};
