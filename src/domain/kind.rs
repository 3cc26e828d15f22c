//! Codec kinds and the identity key shared by commands and plugins

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum KindError {
    #[error("Unknown codec kind '{0}': expected decoder, encoder, hasher or script")]
    Unknown(String),

    #[error("Invalid command key '{0}': expected '{{kind}}:{{name}}'")]
    InvalidKey(String),
}

/// The four operation kinds a codec can have
///
/// Ordering follows the order the host displays them in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommandKind {
    Decoder,
    Encoder,
    Hasher,
    Script,
}

impl CommandKind {
    /// All kinds, in display order
    pub const ALL: [CommandKind; 4] = [
        CommandKind::Decoder,
        CommandKind::Encoder,
        CommandKind::Hasher,
        CommandKind::Script,
    ];

    /// Capitalized label used in titles (e.g. "Decoder")
    pub fn label(&self) -> &'static str {
        match self {
            CommandKind::Decoder => "Decoder",
            CommandKind::Encoder => "Encoder",
            CommandKind::Hasher => "Hasher",
            CommandKind::Script => "Script",
        }
    }

    /// Lowercase form used on the command line and in config files
    pub fn as_str(&self) -> &'static str {
        match self {
            CommandKind::Decoder => "decoder",
            CommandKind::Encoder => "encoder",
            CommandKind::Hasher => "hasher",
            CommandKind::Script => "script",
        }
    }
}

impl fmt::Display for CommandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for CommandKind {
    type Err = KindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "decoder" | "decode" => Ok(CommandKind::Decoder),
            "encoder" | "encode" => Ok(CommandKind::Encoder),
            "hasher" | "hash" => Ok(CommandKind::Hasher),
            "script" => Ok(CommandKind::Script),
            _ => Err(KindError::Unknown(s.to_string())),
        }
    }
}

/// Identity of a command or plugin
///
/// Two commands (or plugins) are the same entry iff their names and kinds
/// match. Author and behavior never take part in identity, so re-registering
/// a command with new behavior replaces the old entry instead of adding one.
///
/// Keys order by kind first, then by name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CommandKey {
    kind: CommandKind,
    name: String,
}

impl CommandKey {
    pub fn new(name: impl Into<String>, kind: CommandKind) -> Self {
        Self {
            kind,
            name: name.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> CommandKind {
        self.kind
    }
}

impl fmt::Display for CommandKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind.as_str(), self.name)
    }
}

impl FromStr for CommandKey {
    type Err = KindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (kind, name) = s
            .split_once(':')
            .ok_or_else(|| KindError::InvalidKey(s.to_string()))?;

        let name = name.trim();
        if name.is_empty() {
            return Err(KindError::InvalidKey(s.to_string()));
        }

        Ok(Self::new(name, kind.parse()?))
    }
}

impl TryFrom<String> for CommandKey {
    type Error = KindError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<CommandKey> for String {
    fn from(key: CommandKey) -> Self {
        key.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn kind_labels_are_capitalized() {
        assert_eq!(CommandKind::Decoder.to_string(), "Decoder");
        assert_eq!(CommandKind::Script.label(), "Script");
    }

    #[test]
    fn parse_kind_is_case_insensitive() {
        assert_eq!("DECODER".parse::<CommandKind>(), Ok(CommandKind::Decoder));
        assert_eq!("hash".parse::<CommandKind>(), Ok(CommandKind::Hasher));
        assert!(matches!(
            "compressor".parse::<CommandKind>(),
            Err(KindError::Unknown(_))
        ));
    }

    #[test]
    fn key_equality_uses_name_and_kind() {
        let a = CommandKey::new("Base64", CommandKind::Decoder);
        let b = CommandKey::new("Base64", CommandKind::Decoder);
        let c = CommandKey::new("Base64", CommandKind::Encoder);

        assert_eq!(a, b);
        assert_ne!(a, c);

        let set: HashSet<_> = [a, b, c].into_iter().collect();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn keys_order_by_kind_then_name() {
        let mut keys = vec![
            CommandKey::new("Hex", CommandKind::Encoder),
            CommandKey::new("Url", CommandKind::Decoder),
            CommandKey::new("Base64", CommandKind::Decoder),
        ];
        keys.sort();

        let names: Vec<_> = keys.iter().map(|k| k.to_string()).collect();
        assert_eq!(names, vec!["decoder:Base64", "decoder:Url", "encoder:Hex"]);
    }

    #[test]
    fn parse_key() {
        let key: CommandKey = "hasher:SHA256".parse().unwrap();
        assert_eq!(key.kind(), CommandKind::Hasher);
        assert_eq!(key.name(), "SHA256");

        assert!("SHA256".parse::<CommandKey>().is_err());
        assert!("hasher:".parse::<CommandKey>().is_err());
    }

    #[test]
    fn key_serde_uses_string_form() {
        let key = CommandKey::new("Search and Replace", CommandKind::Script);
        let json = serde_json::to_string(&key).unwrap();
        assert_eq!(json, "\"script:Search and Replace\"");

        let parsed: CommandKey = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, key);
    }
}
