mod config;

use std::fmt::Display;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use serde_json::Value;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use logrelay_core::{Fields, Level};
use logrelay_tracing::native::Formatter;

use crate::config::RelayConfig;

#[derive(Parser, Debug)]
#[command(
    name = "logrelay",
    about = "Write a log entry through the logrelay tracing adapter",
    version
)]
struct Cli {
    /// Message to log; words are joined with spaces
    #[arg(required = true)]
    message: Vec<String>,

    /// Path to config file (default: ./logrelay.toml if present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Minimum level written
    #[arg(short, long, value_enum)]
    level: Option<LevelChoice>,

    /// Entry layout
    #[arg(short, long, value_enum)]
    format: Option<FormatChoice>,

    /// stderr, stdout or a file path
    #[arg(short, long)]
    output: Option<String>,

    /// Include source file and line
    #[arg(long)]
    report_caller: bool,

    /// Field attached to the entry, as key=value (repeatable)
    #[arg(short = 'F', long = "field", value_parser = parse_field)]
    fields: Vec<(String, Value)>,

    /// Level the message is logged at
    #[arg(long, value_enum, default_value = "info")]
    at: LevelChoice,

    /// Show the adapter's own diagnostics on stderr (filter with RUST_LOG)
    #[arg(long)]
    diagnostics: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LevelChoice {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
    Fatal,
}

impl From<LevelChoice> for Level {
    fn from(choice: LevelChoice) -> Self {
        match choice {
            LevelChoice::Trace => Level::Trace,
            LevelChoice::Debug => Level::Debug,
            LevelChoice::Info => Level::Info,
            LevelChoice::Warn => Level::Warn,
            LevelChoice::Error => Level::Error,
            LevelChoice::Fatal => Level::Fatal,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum FormatChoice {
    Text,
    Json,
    Compact,
}

impl From<FormatChoice> for Formatter {
    fn from(choice: FormatChoice) -> Self {
        match choice {
            FormatChoice::Text => Formatter::Text,
            FormatChoice::Json => Formatter::Json,
            FormatChoice::Compact => Formatter::Compact,
        }
    }
}

impl Cli {
    /// Flags in config file shape, for merging over the file
    fn overrides(&self) -> RelayConfig {
        RelayConfig {
            level: self.level.map(Level::from),
            format: self.format.map(Formatter::from),
            output: self.output.clone(),
            report_caller: self.report_caller,
            fields: self.fields.iter().cloned().collect(),
        }
    }
}

/// Parse `key=value`; the value is a JSON scalar when it parses as one
fn parse_field(raw: &str) -> Result<(String, Value), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("Expected key=value, got '{}'", raw))?;
    if key.is_empty() {
        return Err(format!("Field key is empty in '{}'", raw));
    }

    let value = match serde_json::from_str::<Value>(value) {
        Ok(parsed) if !parsed.is_object() && !parsed.is_array() => parsed,
        _ => Value::String(value.to_string()),
    };
    Ok((key.to_string(), value))
}

fn init_diagnostics() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("logrelay_tracing=debug"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.diagnostics {
        init_diagnostics();
    }

    let file_config = match &cli.config {
        Some(path) => RelayConfig::load_from(path)?,
        None => {
            let working_dir =
                std::env::current_dir().context("Failed to get current directory")?;
            RelayConfig::load(&working_dir)?.unwrap_or_default()
        }
    };
    let config = file_config.merge(cli.overrides());

    let mut logger = logrelay_tracing::new_logger(Vec::new());
    logger
        .init(config.logger_options()?)
        .context("Failed to initialize logger")?;
    logrelay_core::set_default_logger(logger);

    let words: Vec<&dyn Display> = cli.message.iter().map(|word| word as &dyn Display).collect();
    logrelay_core::log(cli.at.into(), &words);

    Ok(())
}
