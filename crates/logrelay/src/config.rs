//! Configuration file support for logrelay.
//!
//! Loads configuration from `logrelay.toml` in the working directory, or
//! from the path given with `--config`.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use logrelay_core::{with_fields, with_level, with_output, Fields, Level, LoggerOption, Output};
use logrelay_tracing::native::Formatter;
use logrelay_tracing::{report_caller, with_formatter};
use serde::Deserialize;
use tracing_appender::rolling::{RollingFileAppender, Rotation};

/// The config file name
pub const CONFIG_FILE_NAME: &str = "logrelay.toml";

/// Settings read from `logrelay.toml`.
///
/// Command line flags are collected into the same shape and merged on top
/// with [`RelayConfig::merge`].
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RelayConfig {
    /// Minimum level written
    pub level: Option<Level>,
    /// Entry layout
    pub format: Option<Formatter>,
    /// `stderr`, `stdout` or a file path
    pub output: Option<String>,
    #[serde(default)]
    pub report_caller: bool,
    /// Attached to every entry
    #[serde(default)]
    pub fields: Fields,
}

impl RelayConfig {
    /// Load configuration from the working directory.
    ///
    /// Returns:
    /// - `Ok(Some(config))` if file exists and parses successfully
    /// - `Ok(None)` if file does not exist
    /// - `Err(...)` if file exists but fails to parse (hard error)
    pub fn load(working_dir: &Path) -> Result<Option<Self>> {
        let config_path = working_dir.join(CONFIG_FILE_NAME);

        if !config_path.exists() {
            return Ok(None);
        }

        Self::load_from(&config_path).map(Some)
    }

    /// Load an explicitly named file, which must exist
    pub fn load_from(config_path: &Path) -> Result<Self> {
        let content = fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read {}", config_path.display()))?;

        let config: RelayConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", config_path.display()))?;

        Ok(config)
    }

    /// Layer `overrides` on top of `self`.
    /// Priority: overrides > file > default. Fields merge key by key.
    pub fn merge(self, overrides: RelayConfig) -> RelayConfig {
        let mut fields = self.fields;
        fields.merge(overrides.fields);

        RelayConfig {
            level: overrides.level.or(self.level),
            format: overrides.format.or(self.format),
            output: overrides.output.or(self.output),
            report_caller: overrides.report_caller || self.report_caller,
            fields,
        }
    }

    pub fn output_target(&self) -> Result<OutputTarget> {
        match self.output.as_deref() {
            None => Ok(OutputTarget::Stderr),
            Some(output) => OutputTarget::parse(output),
        }
    }

    /// Turn the merged settings into adapter options, opening the output
    pub fn logger_options(&self) -> Result<Vec<LoggerOption>> {
        let mut opts = vec![
            with_level(self.level.unwrap_or_default()),
            with_output(self.output_target()?.open()?),
            with_formatter(self.format.unwrap_or_default()),
        ];
        if !self.fields.is_empty() {
            opts.push(with_fields(self.fields.clone()));
        }
        if self.report_caller {
            opts.push(report_caller());
        }
        Ok(opts)
    }
}

/// Where entries are written
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    Stderr,
    Stdout,
    File(PathBuf),
}

impl OutputTarget {
    pub fn parse(output: &str) -> Result<Self> {
        match output.trim() {
            "" => bail!("Output must be stderr, stdout or a file path"),
            "stderr" => Ok(OutputTarget::Stderr),
            "stdout" => Ok(OutputTarget::Stdout),
            path => Ok(OutputTarget::File(PathBuf::from(path))),
        }
    }

    /// Open the sink. Files are appended to and their parent directory is created.
    pub fn open(&self) -> Result<Output> {
        match self {
            OutputTarget::Stderr => Ok(Output::stderr()),
            OutputTarget::Stdout => Ok(Output::stdout()),
            OutputTarget::File(path) => {
                let Some(file_name) = path.file_name() else {
                    bail!("Output path has no file name: {}", path.display());
                };
                let dir = match path.parent() {
                    Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
                    _ => PathBuf::from("."),
                };
                fs::create_dir_all(&dir)
                    .with_context(|| format!("Failed to create log directory {}", dir.display()))?;

                let appender = RollingFileAppender::builder()
                    .rotation(Rotation::NEVER)
                    .filename_prefix(file_name.to_string_lossy())
                    .build(&dir)
                    .with_context(|| format!("Failed to open log file {}", path.display()))?;
                Ok(Output::named(path.display().to_string(), appender))
            }
        }
    }
}
