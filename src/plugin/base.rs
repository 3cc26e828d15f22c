//! Plugin contract
//!
//! Every plugin carries a [`PluginInfo`] created through one of the
//! per-kind constructors, so a plugin author can never pick a kind that
//! differs from what the constructor fixes. The [`Plugin`] trait only asks
//! for `run`; `select` and `can_be_decoded` have defaults. Title, identity
//! and dependency checks come from [`PluginExt`] and cannot be overridden.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::rc::Rc;

use anyhow::Result;
use thiserror::Error;

use super::deps::{self, DependencyResolver};
use crate::domain::{default_title, Behavior, Command, CommandKey, CommandKind};

#[derive(Debug, Error, PartialEq)]
pub enum PluginError {
    #[error("Plugin name is required and must not be empty")]
    EmptyName,

    #[error("Plugin author is required and must not be empty")]
    EmptyAuthor,
}

/// Line separator used when rejoining lines
#[cfg(windows)]
pub const LINE_SEPARATOR: &str = "\r\n";

/// Line separator used when rejoining lines
#[cfg(not(windows))]
pub const LINE_SEPARATOR: &str = "\n";

/// Static description of a plugin
#[derive(Debug, Clone)]
pub struct PluginInfo {
    key: CommandKey,
    author: String,
    dependencies: Vec<String>,
}

impl PluginInfo {
    fn new(name: impl Into<String>, kind: CommandKind, author: impl Into<String>) -> Result<Self, PluginError> {
        let name = name.into();
        let author = author.into();

        if name.is_empty() {
            return Err(PluginError::EmptyName);
        }
        if author.is_empty() {
            return Err(PluginError::EmptyAuthor);
        }

        Ok(Self {
            key: CommandKey::new(name, kind),
            author,
            dependencies: Vec::new(),
        })
    }

    /// Info for a decoder plugin
    pub fn decoder(name: impl Into<String>, author: impl Into<String>) -> Result<Self, PluginError> {
        Self::new(name, CommandKind::Decoder, author)
    }

    /// Info for an encoder plugin
    pub fn encoder(name: impl Into<String>, author: impl Into<String>) -> Result<Self, PluginError> {
        Self::new(name, CommandKind::Encoder, author)
    }

    /// Info for a hasher plugin
    pub fn hasher(name: impl Into<String>, author: impl Into<String>) -> Result<Self, PluginError> {
        Self::new(name, CommandKind::Hasher, author)
    }

    /// Info for a script plugin
    pub fn script(name: impl Into<String>, author: impl Into<String>) -> Result<Self, PluginError> {
        Self::new(name, CommandKind::Script, author)
    }

    /// Declares external units this plugin needs (kept in order)
    pub fn with_dependencies<I, S>(mut self, dependencies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.dependencies = dependencies.into_iter().map(Into::into).collect();
        self
    }

    pub fn name(&self) -> &str {
        self.key.name()
    }

    pub fn kind(&self) -> CommandKind {
        self.key.kind()
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn dependencies(&self) -> &[String] {
        &self.dependencies
    }

    pub fn key(&self) -> &CommandKey {
        &self.key
    }

    /// Title in the fixed `"{name} {Kind}"` format
    pub fn title(&self) -> String {
        default_title(self.name(), self.kind())
    }
}

impl PartialEq for PluginInfo {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for PluginInfo {}

impl Hash for PluginInfo {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key.hash(state);
    }
}

/// A codec supplied by a plugin author
///
/// Stateful plugins (e.g. ones remembering the configuration gathered in
/// `select`) keep that state behind interior mutability.
pub trait Plugin {
    /// Static description; create it with [`PluginInfo::decoder`] and friends
    fn info(&self) -> &PluginInfo;

    /// Transforms the input with the current configuration
    fn run(&self, input: &str) -> Result<String>;

    /// Called when the plugin is first selected; may configure before running
    fn select(&self, input: &str) -> Result<String> {
        self.run(input)
    }

    /// Whether the input looks like something this plugin can decode
    ///
    /// Only consulted for decoders, to guess candidates for smart decode.
    fn can_be_decoded(&self, _input: &str) -> bool {
        false
    }
}

/// Fixed behavior shared by all plugins
pub trait PluginExt {
    fn name(&self) -> &str;
    fn kind(&self) -> CommandKind;
    fn author(&self) -> &str;
    fn key(&self) -> &CommandKey;
    fn title(&self) -> String;

    /// Returns the declared dependencies that could not be resolved
    fn check_dependencies(&self, resolver: &dyn DependencyResolver) -> Vec<String>;
}

impl<P: Plugin + ?Sized> PluginExt for P {
    fn name(&self) -> &str {
        self.info().name()
    }

    fn kind(&self) -> CommandKind {
        self.info().kind()
    }

    fn author(&self) -> &str {
        self.info().author()
    }

    fn key(&self) -> &CommandKey {
        self.info().key()
    }

    fn title(&self) -> String {
        self.info().title()
    }

    fn check_dependencies(&self, resolver: &dyn DependencyResolver) -> Vec<String> {
        deps::unresolved(self.info().dependencies(), resolver)
    }
}

impl PartialEq for dyn Plugin {
    fn eq(&self, other: &Self) -> bool {
        self.info() == other.info()
    }
}

impl Eq for dyn Plugin {}

impl Hash for dyn Plugin {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.info().hash(state);
    }
}

impl fmt::Debug for dyn Plugin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Plugin").field("info", self.info()).finish()
    }
}

/// Applies `callback` to every whitespace-separated token, keeping lines
///
/// Tokens are rejoined with single spaces and lines with [`LINE_SEPARATOR`],
/// so runs of whitespace inside a line collapse to one space.
pub fn run_lines<F>(text: &str, mut callback: F) -> String
where
    F: FnMut(&str) -> String,
{
    text.lines()
        .map(|line| {
            line.split_whitespace()
                .map(&mut callback)
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect::<Vec<_>>()
        .join(LINE_SEPARATOR)
}

/// Fallible variant of [`run_lines`]; stops at the first failing token
pub fn try_run_lines<F>(text: &str, mut callback: F) -> Result<String>
where
    F: FnMut(&str) -> Result<String>,
{
    let mut lines = Vec::new();
    for line in text.lines() {
        let tokens = line
            .split_whitespace()
            .map(&mut callback)
            .collect::<Result<Vec<_>>>()?;
        lines.push(tokens.join(" "));
    }
    Ok(lines.join(LINE_SEPARATOR))
}

/// Exposes a plugin as a [`Behavior`]
struct PluginBehavior(Rc<dyn Plugin>);

impl Behavior for PluginBehavior {
    fn title(&self) -> String {
        self.0.title()
    }

    fn run(&self, input: &str) -> Result<String> {
        self.0.run(input)
    }

    fn select(&self, input: &str) -> Result<String> {
        self.0.select(input)
    }
}

impl Command {
    /// Wraps a plugin into the uniform command view
    pub fn from_plugin(plugin: Rc<dyn Plugin>) -> Self {
        let key = plugin.key().clone();
        let author = plugin.author().to_string();
        Command::from_parts(key, author, Rc::new(PluginBehavior(plugin)))
    }
}
