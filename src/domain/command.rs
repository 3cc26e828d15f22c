//! Command domain model
//!
//! A [`Command`] is the uniform view the host has of any text operation:
//! built-in closures and wrapped plugins look the same once they are
//! commands. Commands are built once through [`CommandBuilder`] and never
//! change afterwards; any configuration a command remembers lives inside
//! its behavior.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::rc::Rc;

use anyhow::Result;
use thiserror::Error;

use super::kind::{CommandKey, CommandKind};

#[derive(Debug, Error, PartialEq)]
pub enum BuildError {
    #[error("Name is required and must not be empty")]
    MissingName,

    #[error("Kind is required")]
    MissingKind,

    #[error("Run behavior is required")]
    MissingRun,
}

/// The three operations behind every command
///
/// `run` executes the transformation with the current configuration.
/// `select` is the first-activation path and may gather configuration
/// before running; it must never be required for `run` to work.
pub trait Behavior {
    /// Title shown to the user, may reflect the current configuration
    fn title(&self) -> String;

    /// Transforms the input
    fn run(&self, input: &str) -> Result<String>;

    /// Configures (if needed) and transforms the input
    fn select(&self, input: &str) -> Result<String> {
        self.run(input)
    }
}

type TitleFn = Box<dyn Fn() -> String>;
type RunFn = Rc<dyn Fn(&str) -> Result<String>>;
type SelectFn = Box<dyn Fn(&str) -> Result<String>>;

/// Adapter turning free closures into a [`Behavior`]
struct FnBehavior {
    title: TitleFn,
    run: RunFn,
    select: SelectFn,
}

impl Behavior for FnBehavior {
    fn title(&self) -> String {
        (self.title)()
    }

    fn run(&self, input: &str) -> Result<String> {
        (self.run)(input)
    }

    fn select(&self, input: &str) -> Result<String> {
        (self.select)(input)
    }
}

/// Behavior of the null command: passes input through untouched
struct NullBehavior;

impl Behavior for NullBehavior {
    fn title(&self) -> String {
        String::new()
    }

    fn run(&self, input: &str) -> Result<String> {
        Ok(input.to_string())
    }
}

/// Default title: `"{name} {Kind}"`, e.g. "Base64 Decoder"
pub fn default_title(name: &str, kind: CommandKind) -> String {
    format!("{} {}", name, kind.label())
}

/// A named, typed text operation
///
/// Equality and hashing use only the [`CommandKey`] (name and kind).
#[derive(Clone)]
pub struct Command {
    key: Option<CommandKey>,
    author: String,
    behavior: Rc<dyn Behavior>,
}

impl Command {
    /// Starts building a command
    pub fn builder() -> CommandBuilder {
        CommandBuilder::new()
    }

    /// Builds a command around an existing behavior
    pub fn from_behavior(
        name: impl Into<String>,
        kind: CommandKind,
        author: impl Into<String>,
        behavior: Rc<dyn Behavior>,
    ) -> std::result::Result<Self, BuildError> {
        let name = name.into();
        if name.is_empty() {
            return Err(BuildError::MissingName);
        }

        Ok(Self {
            key: Some(CommandKey::new(name, kind)),
            author: author.into(),
            behavior,
        })
    }

    /// Builds a command from an already validated key
    pub(crate) fn from_parts(
        key: CommandKey,
        author: impl Into<String>,
        behavior: Rc<dyn Behavior>,
    ) -> Self {
        Self {
            key: Some(key),
            author: author.into(),
            behavior,
        }
    }

    /// The null command: empty identity, `run` and `select` pass input through
    pub fn null() -> Self {
        Self {
            key: None,
            author: String::new(),
            behavior: Rc::new(NullBehavior),
        }
    }

    /// Returns true for the null command
    pub fn is_null(&self) -> bool {
        self.key.is_none()
    }

    /// Static name (e.g. "Search and Replace"), empty for the null command
    pub fn name(&self) -> &str {
        self.key.as_ref().map(|k| k.name()).unwrap_or("")
    }

    /// Kind of the command, `None` for the null command
    pub fn kind(&self) -> Option<CommandKind> {
        self.key.as_ref().map(|k| k.kind())
    }

    /// Identity key, `None` for the null command
    pub fn key(&self) -> Option<&CommandKey> {
        self.key.as_ref()
    }

    /// Author of the command; built-ins usually leave it empty
    pub fn author(&self) -> &str {
        &self.author
    }

    /// Dynamic title (e.g. `Replace "A" with "B"` instead of the static name)
    pub fn title(&self) -> String {
        self.behavior.title()
    }

    /// Runs the transformation with the current configuration
    pub fn run(&self, input: &str) -> Result<String> {
        self.behavior.run(input)
    }

    /// First activation: may configure the command before running it
    pub fn select(&self, input: &str) -> Result<String> {
        self.behavior.select(input)
    }
}

impl PartialEq for Command {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for Command {}

impl Hash for Command {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key.hash(state);
    }
}

impl fmt::Debug for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Command")
            .field("key", &self.key)
            .field("author", &self.author)
            .finish_non_exhaustive()
    }
}

/// Builder for [`Command`]
///
/// `name`, `kind` and `run` are required. When no `select` is given the
/// command's select forwards to `run` and returns its output. When no
/// `title` is given the title is `"{name} {Kind}"`.
#[derive(Default)]
pub struct CommandBuilder {
    name: Option<String>,
    kind: Option<CommandKind>,
    author: Option<String>,
    title: Option<TitleFn>,
    run: Option<RunFn>,
    select: Option<SelectFn>,
}

impl CommandBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn kind(mut self, kind: CommandKind) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    pub fn title<F>(mut self, title: F) -> Self
    where
        F: Fn() -> String + 'static,
    {
        self.title = Some(Box::new(title));
        self
    }

    pub fn run<F>(mut self, run: F) -> Self
    where
        F: Fn(&str) -> Result<String> + 'static,
    {
        self.run = Some(Rc::new(run));
        self
    }

    pub fn select<F>(mut self, select: F) -> Self
    where
        F: Fn(&str) -> Result<String> + 'static,
    {
        self.select = Some(Box::new(select));
        self
    }

    /// Validates the configuration and builds the command
    pub fn build(self) -> std::result::Result<Command, BuildError> {
        let name = self
            .name
            .filter(|n| !n.is_empty())
            .ok_or(BuildError::MissingName)?;
        let kind = self.kind.ok_or(BuildError::MissingKind)?;
        let run = self.run.ok_or(BuildError::MissingRun)?;

        let select = match self.select {
            Some(select) => select,
            None => {
                let run = Rc::clone(&run);
                Box::new(move |input: &str| run(input)) as SelectFn
            }
        };

        let title = match self.title {
            Some(title) => title,
            None => {
                let title = default_title(&name, kind);
                Box::new(move || title.clone()) as TitleFn
            }
        };

        Ok(Command {
            key: Some(CommandKey::new(name, kind)),
            author: self.author.unwrap_or_default(),
            behavior: Rc::new(FnBehavior { title, run, select }),
        })
    }
}
