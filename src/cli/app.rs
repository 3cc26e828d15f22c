//! Main CLI application structure

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use super::codec_cmd;
use super::output::{Output, OutputFormat};
use crate::domain::CommandKind;
use crate::host::{self, Config};
use crate::plugin::{NoPrompt, PresetPrompt, Prompt};

#[derive(Parser)]
#[command(name = "codecs")]
#[command(author, version, about = "Decode, encode, hash and script text")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format (defaults to the configured format)
    #[arg(long, short = 'f', global = true)]
    pub format: Option<OutputFormat>,

    /// Enable verbose output for debugging
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Configuration file to use instead of the default location
    #[arg(long, global = true, env = "CODECS_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List available commands
    List {
        /// Only show one kind (decoder, encoder, hasher, script)
        #[arg(long, short)]
        kind: Option<CommandKind>,
    },

    /// Run a command on TEXT (or stdin)
    Run {
        /// Command kind
        kind: CommandKind,

        /// Command name (case-insensitive)
        name: String,

        /// Input text; read from stdin when omitted
        text: Option<String>,
    },

    /// Select a command: configure it, then run it on TEXT (or stdin)
    Select {
        /// Command kind
        kind: CommandKind,

        /// Command name (case-insensitive)
        name: String,

        /// Input text; read from stdin when omitted
        text: Option<String>,

        /// Configuration answers, e.g. --set search=foo --set replace=bar
        #[arg(long = "set", value_name = "FIELD=VALUE")]
        set: Vec<String>,
    },

    /// Guess and apply decoders to TEXT (or stdin)
    SmartDecode {
        /// Input text; read from stdin when omitted
        text: Option<String>,

        /// Maximum number of decoders to chain
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
        depth: Option<u32>,
    },

    /// Show plugins disabled by unresolved dependencies
    Deps,

    /// Show the configuration in effect
    Config,
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("codecs=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    // A subscriber may already be installed when embedded; that is fine
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Main entry point for the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = Config::load(cli.config.as_deref())?;
    let format = cli.format.unwrap_or_else(|| config.default_format.into());
    let output = Output::new(format, cli.verbose);

    output.verbose("codecs starting");

    let prompt: Box<dyn Prompt> = match &cli.command {
        Commands::Select { set, .. } => Box::new(PresetPrompt::from_assignments(set)?),
        _ => Box::new(NoPrompt),
    };
    let registry = host::load_registry(&config, prompt)?;
    output.verbose(&format!("{} command(s) registered", registry.len()));

    match cli.command {
        Commands::List { kind } => codec_cmd::list(&output, &registry, kind)?,

        Commands::Run { kind, name, text } => {
            let input = codec_cmd::read_input(text)?;
            codec_cmd::execute(&output, &registry, kind, &name, &input, false)?
        }

        Commands::Select { kind, name, text, .. } => {
            let input = codec_cmd::read_input(text)?;
            codec_cmd::execute(&output, &registry, kind, &name, &input, true)?
        }

        Commands::SmartDecode { text, depth } => {
            let input = codec_cmd::read_input(text)?;
            codec_cmd::smart_decode(&output, &registry, &config, &input, depth)?
        }

        Commands::Deps => codec_cmd::deps(&output, &registry)?,

        Commands::Config => show_config(&output, &config, cli.config.as_deref())?,
    }

    output.verbose("Command completed successfully");
    Ok(())
}

fn show_config(output: &Output, config: &Config, explicit: Option<&std::path::Path>) -> Result<()> {
    let path = explicit.map(|p| p.to_path_buf()).or_else(Config::config_path);

    if output.is_json() {
        output.data(&serde_json::json!({
            "path": path.as_ref().map(|p| p.display().to_string()),
            "config": config,
        }));
    } else {
        match &path {
            Some(path) => println!("# {}", path.display()),
            None => println!("# no config directory available"),
        }
        print!("{}", toml::to_string_pretty(config)?);
    }

    Ok(())
}
