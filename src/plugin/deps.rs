//! Dependency resolution for plugins
//!
//! A dependency is the name of an external unit a plugin needs. Resolving
//! is a query: every dependency gets its own `Result`, failures are
//! collected and reported, and the host decides what to do with a plugin
//! whose list of unresolved dependencies is not empty.

use std::collections::HashSet;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ResolveError {
    #[error("Dependency not found: {0}")]
    NotFound(String),

    #[error("Invalid dependency name: '{0}'")]
    InvalidName(String),
}

/// Something that can tell whether a named dependency is available
pub trait DependencyResolver {
    fn resolve(&self, name: &str) -> Result<(), ResolveError>;
}

/// Returns the dependencies that failed to resolve, in declaration order
pub fn unresolved(dependencies: &[String], resolver: &dyn DependencyResolver) -> Vec<String> {
    dependencies
        .iter()
        .filter(|dependency| match resolver.resolve(dependency) {
            Ok(()) => false,
            Err(e) => {
                tracing::debug!("Unresolved dependency {}: {}", dependency, e);
                true
            }
        })
        .cloned()
        .collect()
}

fn validate(name: &str) -> Result<(), ResolveError> {
    if name.trim().is_empty() {
        return Err(ResolveError::InvalidName(name.to_string()));
    }
    Ok(())
}

/// Resolves dependencies as executables on `PATH` or in extra directories
#[derive(Debug, Clone, Default)]
pub struct ExecutableResolver {
    search_paths: Vec<PathBuf>,
}

impl ExecutableResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a directory searched after `PATH`
    pub fn add_search_path(&mut self, dir: impl Into<PathBuf>) {
        self.search_paths.push(dir.into());
    }
}

impl DependencyResolver for ExecutableResolver {
    fn resolve(&self, name: &str) -> Result<(), ResolveError> {
        validate(name)?;

        if which::which(name).is_ok() {
            return Ok(());
        }

        let found = self
            .search_paths
            .iter()
            .filter(|dir| dir.is_dir())
            .any(|dir| which::which_in(name, Some(dir.as_os_str()), dir).is_ok());

        if found {
            Ok(())
        } else {
            Err(ResolveError::NotFound(name.to_string()))
        }
    }
}

/// Resolves against a fixed set of names
#[derive(Debug, Clone, Default)]
pub struct KnownModules {
    names: HashSet<String>,
}

impl KnownModules {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }
}

impl DependencyResolver for KnownModules {
    fn resolve(&self, name: &str) -> Result<(), ResolveError> {
        validate(name)?;

        if self.names.contains(name) {
            Ok(())
        } else {
            Err(ResolveError::NotFound(name.to_string()))
        }
    }
}

/// Resolves a dependency if any of its resolvers does
#[derive(Default)]
pub struct FirstOf {
    resolvers: Vec<Box<dyn DependencyResolver>>,
}

impl FirstOf {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, resolver: impl DependencyResolver + 'static) -> Self {
        self.resolvers.push(Box::new(resolver));
        self
    }
}

impl DependencyResolver for FirstOf {
    fn resolve(&self, name: &str) -> Result<(), ResolveError> {
        validate(name)?;

        let mut last = ResolveError::NotFound(name.to_string());
        for resolver in &self.resolvers {
            match resolver.resolve(name) {
                Ok(()) => return Ok(()),
                Err(e) => last = e,
            }
        }
        Err(last)
    }
}
