//! Built-in scripts

use std::cell::RefCell;
use std::rc::Rc;

use anyhow::Result;

use super::base::{run_lines, Plugin, PluginError, PluginExt, PluginInfo};
use super::codecs::BUILTIN_AUTHOR;
use super::prompt::Prompt;
use crate::domain::{BuildError, Command};

/// Search/replace pair remembered between `select` and `run`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Replacement {
    pub search: String,
    pub replace: String,
}

/// Replaces every occurrence of a search term
///
/// `select` asks the prompt for `search` and `replace`; `run` reuses the
/// last configuration. The plugin title is fixed, so the configured title
/// (`Replace "A" with "B"`) is exposed through [`SearchAndReplace::into_command`].
pub struct SearchAndReplace {
    info: PluginInfo,
    prompt: Box<dyn Prompt>,
    config: RefCell<Option<Replacement>>,
}

impl SearchAndReplace {
    pub fn new(prompt: Box<dyn Prompt>) -> Result<Self, PluginError> {
        Ok(Self {
            info: PluginInfo::script("Search and Replace", BUILTIN_AUTHOR)?,
            prompt,
            config: RefCell::new(None),
        })
    }

    pub fn configure(&self, search: impl Into<String>, replace: impl Into<String>) {
        *self.config.borrow_mut() = Some(Replacement {
            search: search.into(),
            replace: replace.into(),
        });
    }

    pub fn replacement(&self) -> Option<Replacement> {
        self.config.borrow().clone()
    }

    /// Title reflecting the current configuration
    pub fn configured_title(&self) -> String {
        match &*self.config.borrow() {
            Some(r) => format!("Replace \"{}\" with \"{}\"", r.search, r.replace),
            None => self.title(),
        }
    }

    /// Command view whose title follows the configuration
    pub fn into_command(self: Rc<Self>) -> Result<Command, BuildError> {
        let title = Rc::clone(&self);
        let run = Rc::clone(&self);
        let select = Rc::clone(&self);

        Command::builder()
            .name(self.name())
            .kind(self.kind())
            .author(self.author())
            .title(move || title.configured_title())
            .run(move |input| run.run(input))
            .select(move |input| select.select(input))
            .build()
    }
}

impl Plugin for SearchAndReplace {
    fn info(&self) -> &PluginInfo {
        &self.info
    }

    fn run(&self, input: &str) -> Result<String> {
        let config = self.config.borrow();
        let replacement = config
            .as_ref()
            .ok_or_else(|| anyhow::anyhow!("Search and Replace is not configured; select it first"))?;

        if replacement.search.is_empty() {
            return Ok(input.to_string());
        }

        Ok(input.replace(&replacement.search, &replacement.replace))
    }

    fn select(&self, input: &str) -> Result<String> {
        let current = self.replacement();

        let search = self
            .prompt
            .ask("search", current.as_ref().map(|r| r.search.as_str()))
            .or_else(|| current.as_ref().map(|r| r.search.clone()));
        let replace = self
            .prompt
            .ask("replace", current.as_ref().map(|r| r.replace.as_str()))
            .or_else(|| current.as_ref().map(|r| r.replace.clone()))
            .unwrap_or_default();

        if let Some(search) = search {
            tracing::debug!("Search and Replace configured: {:?} -> {:?}", search, replace);
            self.configure(search, replace);
        }

        self.run(input)
    }
}

/// Letter case applied by [`CaseScript`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Case {
    Upper,
    Lower,
}

/// Changes the case of every word, one line at a time
pub struct CaseScript {
    info: PluginInfo,
    case: Case,
}

impl CaseScript {
    pub fn new(case: Case) -> Result<Self, PluginError> {
        let name = match case {
            Case::Upper => "Upper Case",
            Case::Lower => "Lower Case",
        };
        Ok(Self {
            info: PluginInfo::script(name, BUILTIN_AUTHOR)?,
            case,
        })
    }
}

impl Plugin for CaseScript {
    fn info(&self) -> &PluginInfo {
        &self.info
    }

    fn run(&self, input: &str) -> Result<String> {
        Ok(match self.case {
            Case::Upper => run_lines(input, str::to_uppercase),
            Case::Lower => run_lines(input, str::to_lowercase),
        })
    }
}
