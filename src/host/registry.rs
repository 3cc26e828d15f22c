//! Command registry
//!
//! The host's list of commands, indexed by [`CommandKey`]. Registering a
//! command with an existing key replaces the old one, so updated behavior
//! keeps the same slot. Plugins with unresolved dependencies are kept aside
//! as unavailable instead of being registered.

use std::collections::BTreeMap;
use std::rc::Rc;

use anyhow::Result;
use serde::Serialize;
use thiserror::Error;

use crate::domain::{Command, CommandKey, CommandKind};
use crate::plugin::{DependencyResolver, Plugin, PluginExt};

#[derive(Debug, Error, PartialEq)]
pub enum RegistryError {
    #[error("Command not found: {0}")]
    NotFound(String),
}

/// A plugin that could not be registered
#[derive(Debug, Clone, Serialize)]
pub struct Unavailable {
    pub key: CommandKey,
    pub title: String,
    pub unresolved: Vec<String>,
}

/// Outcome of smart decode
#[derive(Debug, Clone, Serialize)]
pub struct SmartDecode {
    /// Decoders applied, in order
    pub steps: Vec<CommandKey>,
    /// Text after the last applied decoder
    pub output: String,
}

struct Entry {
    command: Command,
    plugin: Option<Rc<dyn Plugin>>,
}

/// Registry of the commands available to the host
#[derive(Default)]
pub struct CommandRegistry {
    entries: BTreeMap<CommandKey, Entry>,
    unavailable: BTreeMap<CommandKey, Unavailable>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a command, returning the one it replaced
    ///
    /// The null command has no identity and is ignored.
    pub fn register(&mut self, command: Command) -> Option<Command> {
        self.insert(command, None)
    }

    /// Registers a plugin if all its dependencies resolve
    ///
    /// Returns the unresolved dependencies; when the list is not empty no
    /// command is registered. The plugin is recorded as unavailable unless a
    /// command with the same key is already registered, which is kept.
    pub fn register_plugin(&mut self, plugin: Rc<dyn Plugin>, resolver: &dyn DependencyResolver) -> Vec<String> {
        let key = plugin.key().clone();
        let unresolved = plugin.check_dependencies(resolver);

        if !unresolved.is_empty() {
            // A command already registered under this key stays in place
            if self.entries.contains_key(&key) {
                tracing::warn!(
                    "Plugin {} skipped, unresolved dependencies: {}; keeping registered command",
                    key,
                    unresolved.join(", ")
                );
                return unresolved;
            }

            tracing::warn!(
                "Plugin {} disabled, unresolved dependencies: {}",
                key,
                unresolved.join(", ")
            );
            self.unavailable.insert(
                key.clone(),
                Unavailable {
                    key,
                    title: plugin.title(),
                    unresolved: unresolved.clone(),
                },
            );
            return unresolved;
        }

        self.insert(Command::from_plugin(Rc::clone(&plugin)), Some(plugin));
        unresolved
    }

    fn insert(&mut self, command: Command, plugin: Option<Rc<dyn Plugin>>) -> Option<Command> {
        let key = match command.key() {
            Some(key) => key.clone(),
            None => {
                tracing::debug!("Ignoring null command");
                return None;
            }
        };

        tracing::debug!("Registering command: {} ({})", key, command.title());
        self.unavailable.remove(&key);
        self.entries
            .insert(key, Entry { command, plugin })
            .map(|old| old.command)
    }

    /// Removes a command
    pub fn remove(&mut self, key: &CommandKey) -> Option<Command> {
        self.entries.remove(key).map(|entry| entry.command)
    }

    pub fn get(&self, key: &CommandKey) -> Option<&Command> {
        self.entries.get(key).map(|entry| &entry.command)
    }

    /// Like [`get`](Self::get), but falls back to the null command
    pub fn get_or_null(&self, key: &CommandKey) -> Command {
        self.get(key).cloned().unwrap_or_else(Command::null)
    }

    /// Looks up a command by name, ignoring case
    pub fn find(&self, kind: CommandKind, name: &str) -> Result<&Command, RegistryError> {
        let exact = CommandKey::new(name, kind);
        if let Some(command) = self.get(&exact) {
            return Ok(command);
        }

        self.by_kind(kind)
            .find(|command| command.name().eq_ignore_ascii_case(name))
            .ok_or_else(|| RegistryError::NotFound(exact.to_string()))
    }

    /// All commands ordered by kind, then name
    pub fn iter(&self) -> impl Iterator<Item = &Command> {
        self.entries.values().map(|entry| &entry.command)
    }

    pub fn by_kind(&self, kind: CommandKind) -> impl Iterator<Item = &Command> {
        self.iter().filter(move |command| command.kind() == Some(kind))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Plugins that were not registered because of unresolved dependencies
    pub fn unavailable(&self) -> impl Iterator<Item = &Unavailable> {
        self.unavailable.values()
    }

    /// Decoders whose plugin thinks it can decode the input
    pub fn smart_decode_candidates(&self, input: &str) -> Vec<&Command> {
        self.entries
            .values()
            .filter(|entry| entry.command.kind() == Some(CommandKind::Decoder))
            .filter(|entry| {
                entry
                    .plugin
                    .as_ref()
                    .map(|plugin| plugin.can_be_decoded(input))
                    .unwrap_or(false)
            })
            .map(|entry| &entry.command)
            .collect()
    }

    /// Repeatedly applies the first matching decoder, up to `depth` rounds
    ///
    /// Stops early when no decoder claims the text, when a decoder fails or
    /// when decoding no longer changes the text.
    pub fn smart_decode(&self, input: &str, depth: u32) -> SmartDecode {
        let mut result = SmartDecode {
            steps: Vec::new(),
            output: input.to_string(),
        };

        for _ in 0..depth {
            let candidates = self.smart_decode_candidates(&result.output);
            let Some(command) = candidates.first() else {
                break;
            };

            match command.run(&result.output) {
                Ok(decoded) if decoded != result.output => {
                    if let Some(key) = command.key() {
                        result.steps.push(key.clone());
                    }
                    result.output = decoded;
                }
                Ok(_) => break,
                Err(e) => {
                    tracing::debug!("Smart decode stopped at {}: {:#}", command.name(), e);
                    break;
                }
            }
        }

        result
    }
}
