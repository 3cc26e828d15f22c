//! # Host Side
//!
//! What an application embedding the codecs keeps around: the registry of
//! available commands and the user configuration that shapes it.
//!
//! ## Configuration
//!
//! | Key | Meaning |
//! |-----|---------|
//! | `default_format` | `text` or `json` |
//! | `disabled` | Commands to hide, as `kind:name` |
//! | `search_paths` | Extra directories for dependency resolution |
//! | `smart_decode_depth` | Decoders chained by smart decode |
//! | `filters` | Scripts backed by external programs |
//!
//! ## Key Types
//!
//! - [`CommandRegistry`] - Commands indexed by name and kind
//! - [`Config`] - User configuration

mod builtin;
mod config;
mod registry;

pub use builtin::{load_registry, register_all, resolver_for};
pub use config::{Config, ConfigError, FilterConfig, OutputFormat};
pub use registry::{CommandRegistry, RegistryError, SmartDecode, Unavailable};
