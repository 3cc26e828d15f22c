//! Scripts that pipe text through an external program
//!
//! The program is the script's only dependency, so a filter whose program
//! is missing shows up as unresolved and is never registered.

use std::io::{ErrorKind, Write};
use std::process::{Command as Process, Stdio};
use std::thread;

use anyhow::{Context, Result};

use super::base::{Plugin, PluginError, PluginInfo};

/// Runs `program args...` with the input on stdin and returns its stdout
#[derive(Debug)]
pub struct FilterScript {
    info: PluginInfo,
    program: String,
    args: Vec<String>,
}

impl FilterScript {
    pub fn new(
        name: impl Into<String>,
        author: impl Into<String>,
        program: impl Into<String>,
        args: Vec<String>,
    ) -> Result<Self, PluginError> {
        let program = program.into();
        let info = PluginInfo::script(name, author)?.with_dependencies([program.clone()]);

        Ok(Self {
            info,
            program,
            args,
        })
    }
}

impl Plugin for FilterScript {
    fn info(&self) -> &PluginInfo {
        &self.info
    }

    fn run(&self, input: &str) -> Result<String> {
        let mut child = Process::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .with_context(|| format!("Failed to spawn filter: {}", self.program))?;

        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| anyhow::anyhow!("Failed to open stdin of {}", self.program))?;

        // stdin is fed from its own thread while stdout drains here
        let data = input.as_bytes().to_vec();
        let writer = thread::spawn(move || stdin.write_all(&data));

        let output = child
            .wait_with_output()
            .with_context(|| format!("Failed to read output of filter: {}", self.program))?;

        match writer.join() {
            // A filter may exit without reading all of stdin; its status decides
            Ok(Err(e)) if e.kind() != ErrorKind::BrokenPipe => {
                return Err(e).with_context(|| format!("Failed to write to filter: {}", self.program));
            }
            Ok(_) => {}
            Err(_) => anyhow::bail!("Writer thread for filter {} panicked", self.program),
        }

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            anyhow::bail!("Filter {} failed: {}", self.program, stderr.trim());
        }

        String::from_utf8(output.stdout)
            .with_context(|| format!("Filter {} produced invalid UTF-8", self.program))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plugin::deps::KnownModules;
    use crate::plugin::PluginExt;

    #[test]
    fn program_is_declared_as_dependency() {
        let filter = FilterScript::new("Sort", "me", "sort", vec![]).unwrap();

        assert_eq!(filter.info().dependencies(), ["sort".to_string()]);
        assert_eq!(filter.title(), "Sort Script");

        let resolver = KnownModules::default();
        assert_eq!(filter.check_dependencies(&resolver), vec!["sort"]);
    }

    #[test]
    fn missing_program_fails_to_run() {
        let filter = FilterScript::new("Nope", "me", "nonexistent_xyz_filter", vec![]).unwrap();
        let err = filter.run("abc").unwrap_err();
        assert!(format!("{:#}", err).contains("Failed to spawn filter"));
    }

    #[cfg(unix)]
    #[test]
    fn pipes_input_through_program() {
        let filter = FilterScript::new("Cat", "me", "cat", vec![]).unwrap();
        assert_eq!(filter.run("hello\nworld").unwrap(), "hello\nworld");
    }

    #[cfg(unix)]
    #[test]
    fn large_input_does_not_block() {
        let filter = FilterScript::new("Cat", "me", "cat", vec![]).unwrap();
        let input = "x".repeat(1 << 20);

        let output = filter.run(&input).unwrap();
        assert_eq!(output.len(), input.len());
    }

    #[cfg(unix)]
    #[test]
    fn nonzero_exit_is_an_error() {
        let filter = FilterScript::new("False", "me", "sh", vec!["-c".into(), "echo bad >&2; exit 3".into()]).unwrap();
        let err = filter.run("x").unwrap_err();
        assert!(err.to_string().contains("bad"));
    }
}
