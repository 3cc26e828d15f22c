//! Configuration prompts used by `select`
//!
//! A GUI host shows a dialog; the command line answers from `--set` values.

use std::collections::HashMap;

/// Asks the user for a configuration value
pub trait Prompt {
    /// Returns the new value for `field`, or `None` to keep `current`
    fn ask(&self, field: &str, current: Option<&str>) -> Option<String>;
}

/// Never answers; `select` keeps whatever configuration exists
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPrompt;

impl Prompt for NoPrompt {
    fn ask(&self, _field: &str, _current: Option<&str>) -> Option<String> {
        None
    }
}

/// Answers from a fixed set of `field=value` pairs
#[derive(Debug, Clone, Default)]
pub struct PresetPrompt {
    values: HashMap<String, String>,
}

impl PresetPrompt {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(field.into(), value.into());
        self
    }

    /// Parses `field=value` assignments, as given on the command line
    pub fn from_assignments<I, S>(assignments: I) -> anyhow::Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut prompt = Self::new();
        for assignment in assignments {
            let assignment = assignment.as_ref();
            let (field, value) = assignment
                .split_once('=')
                .ok_or_else(|| anyhow::anyhow!("Expected field=value, got '{}'", assignment))?;
            prompt.values.insert(field.trim().to_string(), value.to_string());
        }
        Ok(prompt)
    }
}

impl Prompt for PresetPrompt {
    fn ask(&self, field: &str, _current: Option<&str>) -> Option<String> {
        self.values.get(field).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preset_answers_known_fields() {
        let prompt = PresetPrompt::new().set("search", "a");
        assert_eq!(prompt.ask("search", None), Some("a".to_string()));
        assert_eq!(prompt.ask("replace", Some("b")), None);
    }

    #[test]
    fn parse_assignments() {
        let prompt = PresetPrompt::from_assignments(["search=a=b", "replace="]).unwrap();
        assert_eq!(prompt.ask("search", None), Some("a=b".to_string()));
        assert_eq!(prompt.ask("replace", None), Some(String::new()));

        assert!(PresetPrompt::from_assignments(["nope"]).is_err());
    }

    #[test]
    fn no_prompt_keeps_current() {
        assert_eq!(NoPrompt.ask("search", Some("x")), None);
    }
}
