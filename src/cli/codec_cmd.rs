//! Codec commands: list, run, select and smart decode

use std::io::Read;

use anyhow::{Context, Result};

use super::output::Output;
use crate::domain::{Command, CommandKind};
use crate::host::{CommandRegistry, Config};

/// Uses `text` if given, otherwise reads stdin (dropping one trailing newline)
pub fn read_input(text: Option<String>) -> Result<String> {
    if let Some(text) = text {
        return Ok(text);
    }

    let mut input = String::new();
    std::io::stdin()
        .read_to_string(&mut input)
        .context("Failed to read input from stdin")?;

    if input.ends_with('\n') {
        input.pop();
        if input.ends_with('\r') {
            input.pop();
        }
    }
    Ok(input)
}

fn describe(command: &Command) -> serde_json::Value {
    serde_json::json!({
        "key": command.key(),
        "name": command.name(),
        "kind": command.kind(),
        "title": command.title(),
        "author": command.author(),
    })
}

pub fn list(output: &Output, registry: &CommandRegistry, kind: Option<CommandKind>) -> Result<()> {
    let commands: Vec<&Command> = match kind {
        Some(kind) => registry.by_kind(kind).collect(),
        None => registry.iter().collect(),
    };
    output.verbose_ctx("list", &format!("{} command(s)", commands.len()));

    if output.is_json() {
        let items: Vec<_> = commands.iter().map(|c| describe(c)).collect();
        output.data(&items);
    } else if commands.is_empty() {
        println!("No commands available.");
    } else {
        println!("{:<10} {:<22} {:<34} AUTHOR", "KIND", "NAME", "TITLE");
        println!("{}", "-".repeat(76));
        for command in commands {
            println!(
                "{:<10} {:<22} {:<34} {}",
                command.kind().map(|k| k.label()).unwrap_or(""),
                command.name(),
                command.title(),
                command.author()
            );
        }
    }

    Ok(())
}

/// Runs (or selects) a command and prints the transformed text
pub fn execute(
    output: &Output,
    registry: &CommandRegistry,
    kind: CommandKind,
    name: &str,
    input: &str,
    select: bool,
) -> Result<()> {
    let command = registry.find(kind, name)?;
    output.verbose_ctx(
        if select { "select" } else { "run" },
        &format!("{} on {} byte(s)", command.title(), input.len()),
    );

    let result = match select {
        true => command.select(input),
        false => command.run(input),
    };
    let result = result.with_context(|| format!("{} failed", command.title()))?;

    if output.is_json() {
        output.data(&serde_json::json!({
            "command": command.key(),
            "title": command.title(),
            "output": result,
        }));
    } else {
        println!("{}", result);
    }

    Ok(())
}

pub fn smart_decode(output: &Output, registry: &CommandRegistry, config: &Config, input: &str, depth: Option<u32>) -> Result<()> {
    let depth = depth.unwrap_or(config.smart_decode_depth);
    output.verbose_ctx("smart-decode", &format!("depth {}", depth));

    let result = registry.smart_decode(input, depth);

    if output.is_json() {
        output.data(&result);
    } else {
        for step in &result.steps {
            output.verbose_ctx("smart-decode", &format!("applied {}", step));
        }
        if result.steps.is_empty() {
            eprintln!("No decoder matched the input.");
        }
        println!("{}", result.output);
    }

    Ok(())
}

pub fn deps(output: &Output, registry: &CommandRegistry) -> Result<()> {
    let unavailable: Vec<_> = registry.unavailable().collect();

    if output.is_json() {
        output.data(&unavailable);
    } else if unavailable.is_empty() {
        output.success("All plugin dependencies resolved.");
    } else {
        println!("Unavailable plugins:");
        for item in unavailable {
            println!("  {:<30} missing: {}", item.title, item.unresolved.join(", "));
        }
    }

    Ok(())
}
