//! Populates a registry with everything that ships with the crate

use std::rc::Rc;

use anyhow::{Context, Result};

use super::config::Config;
use super::registry::CommandRegistry;
use crate::plugin::{
    builtin_codecs, Case, CaseScript, DependencyResolver, ExecutableResolver, FilterScript, Prompt,
    SearchAndReplace,
};

/// Resolver honoring the configured search paths
pub fn resolver_for(config: &Config) -> ExecutableResolver {
    let mut resolver = ExecutableResolver::new();
    for dir in &config.search_paths {
        resolver.add_search_path(dir);
    }
    resolver
}

/// Registers built-in codecs, scripts and configured filters
///
/// `prompt` answers the configuration questions asked by `select`.
/// Commands listed as disabled in the config are removed afterwards.
pub fn register_all(
    registry: &mut CommandRegistry,
    config: &Config,
    resolver: &dyn DependencyResolver,
    prompt: Box<dyn Prompt>,
) -> Result<()> {
    for codec in builtin_codecs()? {
        registry.register_plugin(Rc::new(codec), resolver);
    }

    for case in [Case::Upper, Case::Lower] {
        registry.register_plugin(Rc::new(CaseScript::new(case)?), resolver);
    }

    let search_and_replace = Rc::new(SearchAndReplace::new(prompt)?);
    registry.register(search_and_replace.into_command()?);

    for filter in &config.filters {
        let script = FilterScript::new(&filter.name, &filter.author, &filter.program, filter.args.clone())
            .with_context(|| format!("Invalid filter '{}'", filter.name))?;
        registry.register_plugin(Rc::new(script), resolver);
    }

    let disabled: Vec<_> = registry
        .iter()
        .filter_map(|command| command.key())
        .filter(|key| config.is_disabled(key))
        .cloned()
        .collect();
    for key in disabled {
        registry.remove(&key);
        tracing::debug!("Disabled by config: {}", key);
    }

    Ok(())
}

/// Builds a registry for `config`, resolving dependencies on PATH
pub fn load_registry(config: &Config, prompt: Box<dyn Prompt>) -> Result<CommandRegistry> {
    let mut registry = CommandRegistry::new();
    let resolver = resolver_for(config);
    register_all(&mut registry, config, &resolver, prompt)?;
    Ok(registry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CommandKey, CommandKind};
    use crate::host::config::FilterConfig;
    use crate::plugin::{KnownModules, NoPrompt, PresetPrompt};

    #[test]
    fn registers_every_kind() {
        let registry = load_registry(&Config::default(), Box::new(NoPrompt)).unwrap();

        for kind in CommandKind::ALL {
            assert!(registry.by_kind(kind).count() > 0, "no {} registered", kind);
        }
    }

    #[test]
    fn disabled_commands_are_removed() {
        let config = Config {
            disabled: vec![CommandKey::new("MD5", CommandKind::Hasher)],
            ..Config::default()
        };
        let registry = load_registry(&config, Box::new(NoPrompt)).unwrap();

        assert!(registry.get(&CommandKey::new("MD5", CommandKind::Hasher)).is_none());
        assert!(registry.get(&CommandKey::new("SHA256", CommandKind::Hasher)).is_some());
    }

    #[test]
    fn filters_depend_on_their_program() {
        let config = Config {
            filters: vec![
                FilterConfig {
                    name: "Sorted".to_string(),
                    program: "sort".to_string(),
                    args: vec![],
                    author: "me".to_string(),
                },
                FilterConfig {
                    name: "Pretty".to_string(),
                    program: "jq".to_string(),
                    args: vec![".".to_string()],
                    author: "me".to_string(),
                },
            ],
            ..Config::default()
        };

        let mut registry = CommandRegistry::new();
        let resolver = KnownModules::new(["sort"]);
        register_all(&mut registry, &config, &resolver, Box::new(NoPrompt)).unwrap();

        assert!(registry.get(&CommandKey::new("Sorted", CommandKind::Script)).is_some());
        let unavailable: Vec<_> = registry.unavailable().map(|u| u.key.name().to_string()).collect();
        assert_eq!(unavailable, vec!["Pretty"]);
    }

    #[test]
    fn unavailable_filter_keeps_builtin_script() {
        let config = Config {
            filters: vec![FilterConfig {
                name: "Upper Case".to_string(),
                program: "nonexistent_xyz_filter".to_string(),
                args: vec![],
                author: "me".to_string(),
            }],
            ..Config::default()
        };

        let mut registry = CommandRegistry::new();
        register_all(&mut registry, &config, &KnownModules::default(), Box::new(NoPrompt)).unwrap();

        let upper = registry.find(CommandKind::Script, "Upper Case").unwrap();
        assert_eq!(upper.run("abc").unwrap(), "ABC");
        assert_eq!(upper.author(), crate::plugin::BUILTIN_AUTHOR);
    }

    #[test]
    fn search_and_replace_uses_prompt() {
        let prompt = PresetPrompt::new().set("search", "cat").set("replace", "dog");
        let registry = load_registry(&Config::default(), Box::new(prompt)).unwrap();

        let command = registry.find(CommandKind::Script, "search and replace").unwrap();
        assert_eq!(command.select("cat nap").unwrap(), "dog nap");
        assert_eq!(command.title(), "Replace \"cat\" with \"dog\"");
    }
}
