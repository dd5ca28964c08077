use std::any::{self, Any};
use std::fmt;
use std::sync::Arc;

use logrelay_core::{with_extension, Extensions, LoggerOption, Options};

use crate::level::{from_native, to_native};
use crate::native::{process_exit, Entry, ExitFn, Formatter, LevelHooks, TracingLogger};
use crate::ConfigurationError;

/// Full adapter configuration: the facade options plus the settings only
/// a [`TracingLogger`] understands.
#[derive(Clone)]
pub struct TracingOptions {
    pub options: Options,
    pub formatter: Formatter,
    pub hooks: LevelHooks,
    /// Include source location in entries
    pub report_caller: bool,
    /// Called after a fatal entry is written
    pub exit_fn: ExitFn,
}

impl TracingOptions {
    pub fn new(opts: impl IntoIterator<Item = LoggerOption>) -> Self {
        Self {
            options: Options::new(opts),
            formatter: Formatter::Text,
            hooks: LevelHooks::new(),
            report_caller: false,
            exit_fn: process_exit(),
        }
    }

    /// Copy adapter settings stashed in the option extensions
    pub(crate) fn apply_extensions(&mut self) {
        let extensions = &self.options.extensions;
        if let Some(FormatterOption(formatter)) = extensions.get::<FormatterOption>() {
            self.formatter = *formatter;
        }
        if let Some(HooksOption(hooks)) = extensions.get::<HooksOption>() {
            self.hooks = hooks.clone();
        }
        if let Some(ReportCallerOption(true)) = extensions.get::<ReportCallerOption>() {
            self.report_caller = true;
        }
        if let Some(ExitFnOption(exit_fn)) = extensions.get::<ExitFnOption>() {
            self.exit_fn = Arc::clone(exit_fn);
        }
    }

    /// Build a fresh logger from this configuration
    pub(crate) fn build_logger(&self) -> TracingLogger {
        let mut logger = TracingLogger::new();
        logger.set_level(to_native(self.options.level));
        logger.set_output(self.options.out.clone());
        logger.set_formatter(self.formatter);
        logger.replace_hooks(self.hooks.clone());
        logger.set_report_caller(self.report_caller);
        logger.set_exit_fn(Arc::clone(&self.exit_fn));
        logger
    }

    /// Overwrite every backend setting with what `logger` actually uses
    pub(crate) fn adopt(&mut self, logger: &TracingLogger) {
        self.options.level = from_native(logger.level());
        self.options.out = logger.output().clone();
        self.formatter = logger.formatter();
        self.hooks = logger.hooks().clone();
        self.report_caller = logger.report_caller();
        self.exit_fn = Arc::clone(logger.exit_fn());
    }
}

impl Default for TracingOptions {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl fmt::Debug for TracingOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TracingOptions")
            .field("options", &self.options)
            .field("formatter", &self.formatter)
            .field("hooks", &self.hooks)
            .field("report_caller", &self.report_caller)
            .finish_non_exhaustive()
    }
}

struct FormatterOption(Formatter);

struct HooksOption(LevelHooks);

struct ReportCallerOption(bool);

struct ExitFnOption(ExitFn);

/// Whatever the caller passed to [`with_logger`], resolved at init
struct PrebuiltOption {
    value: Arc<dyn Any + Send + Sync>,
    type_name: &'static str,
}

/// The pre-built logger forms the adapter accepts
pub(crate) enum Prebuilt {
    None,
    Logger(Arc<TracingLogger>),
    Entry(Entry),
}

impl Prebuilt {
    pub(crate) fn from_extensions(extensions: &Extensions) -> Result<Self, ConfigurationError> {
        let Some(prebuilt) = extensions.get::<PrebuiltOption>() else {
            return Ok(Prebuilt::None);
        };

        let value = Arc::clone(&prebuilt.value);
        if let Some(logger) = value.downcast_ref::<Arc<TracingLogger>>() {
            return Ok(Prebuilt::Logger(Arc::clone(logger)));
        }
        if let Some(entry) = value.downcast_ref::<Entry>() {
            return Ok(Prebuilt::Entry(entry.clone()));
        }
        match value.downcast::<TracingLogger>() {
            Ok(logger) => Ok(Prebuilt::Logger(logger)),
            Err(_) => Err(ConfigurationError::UnsupportedLogger {
                type_name: prebuilt.type_name,
            }),
        }
    }
}

/// Select the entry layout; see [`Formatter`] for what stays fixed
pub fn with_formatter(formatter: Formatter) -> LoggerOption {
    with_extension(FormatterOption(formatter))
}

pub fn with_text_formatter() -> LoggerOption {
    with_formatter(Formatter::Text)
}

pub fn with_json_formatter() -> LoggerOption {
    with_formatter(Formatter::Json)
}

pub fn with_level_hooks(hooks: LevelHooks) -> LoggerOption {
    with_extension(HooksOption(hooks))
}

/// Include source file and line in entries.
///
/// Entries are emitted from inside this crate, so the reported location is
/// the adapter's, not the caller's.
pub fn report_caller() -> LoggerOption {
    with_extension(ReportCallerOption(true))
}

pub fn with_exit_fn(exit_fn: impl Fn(i32) + Send + Sync + 'static) -> LoggerOption {
    with_extension(ExitFnOption(Arc::new(exit_fn)))
}

/// Wrap an already configured logger instead of building one.
///
/// Accepts a [`TracingLogger`], an `Arc<TracingLogger>` or an [`Entry`].
/// Anything else makes `init` fail with
/// [`ConfigurationError::UnsupportedLogger`].
pub fn with_logger<L: Any + Send + Sync>(logger: L) -> LoggerOption {
    with_extension(PrebuiltOption {
        value: Arc::new(logger),
        type_name: any::type_name::<L>(),
    })
}
