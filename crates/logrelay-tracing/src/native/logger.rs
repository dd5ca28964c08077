use std::fmt::{self, Arguments};
use std::io::Write;
use std::mem;
use std::sync::{Arc, OnceLock};

use logrelay_core::{Fields, Output};
use tracing::{debug, Dispatch};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{fmt as tracing_fmt, Layer, Registry};

use super::writer::EntryWriter;
use super::{Entry, Formatter, Hook, HookRecord, LevelHooks, NativeLevel};

/// Called with the exit code after a fatal entry is written
pub type ExitFn = Arc<dyn Fn(i32) + Send + Sync>;

/// The exit function loggers start with
pub fn process_exit() -> ExitFn {
    Arc::new(|code| std::process::exit(code))
}

/// A configured logger writing through its own `tracing` dispatcher.
///
/// Configuration is plain data readable through getters. The
/// `tracing-subscriber` stack is built from it on first use and rebuilt
/// after a setter changes output, formatter or caller reporting.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use logrelay_core::Output;
/// use logrelay_tracing::native::{Formatter, NativeLevel, TracingLogger};
///
/// let mut logger = TracingLogger::new();
/// logger.set_level(NativeLevel::Debug);
/// logger.set_formatter(Formatter::Json);
/// logger.set_output(Output::stdout());
///
/// let logger = Arc::new(logger);
/// logger.log(NativeLevel::Info, format_args!("ready"));
/// ```
pub struct TracingLogger {
    level: NativeLevel,
    out: Output,
    formatter: Formatter,
    hooks: LevelHooks,
    report_caller: bool,
    exit_fn: ExitFn,
    dispatch: OnceLock<Dispatch>,
}

impl TracingLogger {
    /// Info level, text to stderr, no hooks, no caller info, exit via `std::process::exit`
    pub fn new() -> Self {
        Self {
            level: NativeLevel::Info,
            out: Output::stderr(),
            formatter: Formatter::default(),
            hooks: LevelHooks::new(),
            report_caller: false,
            exit_fn: process_exit(),
            dispatch: OnceLock::new(),
        }
    }

    pub fn set_level(&mut self, level: NativeLevel) {
        self.level = level;
    }

    pub fn set_output(&mut self, out: Output) {
        self.out = out;
        self.reset_dispatch();
    }

    pub fn set_formatter(&mut self, formatter: Formatter) {
        self.formatter = formatter;
        self.reset_dispatch();
    }

    /// Swap in a new hook table, returning the old one
    pub fn replace_hooks(&mut self, hooks: LevelHooks) -> LevelHooks {
        mem::replace(&mut self.hooks, hooks)
    }

    pub fn add_hook(&mut self, hook: Arc<dyn Hook>) {
        self.hooks.add(hook);
    }

    /// Include source file and line in each entry.
    ///
    /// The location is where the entry is emitted inside this crate, not the
    /// application call site.
    pub fn set_report_caller(&mut self, report_caller: bool) {
        self.report_caller = report_caller;
        self.reset_dispatch();
    }

    pub fn set_exit_fn(&mut self, exit_fn: ExitFn) {
        self.exit_fn = exit_fn;
    }

    pub fn level(&self) -> NativeLevel {
        self.level
    }

    pub fn output(&self) -> &Output {
        &self.out
    }

    pub fn formatter(&self) -> Formatter {
        self.formatter
    }

    pub fn hooks(&self) -> &LevelHooks {
        &self.hooks
    }

    pub fn report_caller(&self) -> bool {
        self.report_caller
    }

    pub fn exit_fn(&self) -> &ExitFn {
        &self.exit_fn
    }

    pub fn is_level_enabled(&self, level: NativeLevel) -> bool {
        level <= self.level
    }

    /// Start an entry carrying `fields`
    pub fn with_fields(self: &Arc<Self>, fields: Fields) -> Entry {
        Entry::new(Arc::clone(self)).with_fields(fields)
    }

    pub fn log(&self, level: NativeLevel, args: Arguments<'_>) {
        self.write_entry(level, &Fields::new(), args);
    }

    pub(crate) fn write_entry(&self, level: NativeLevel, fields: &Fields, args: Arguments<'_>) {
        if !self.is_level_enabled(level) {
            return;
        }

        let message = args.to_string();
        let record = HookRecord {
            level,
            message: &message,
            fields,
        };
        if let Err(err) = self.hooks.fire(&record) {
            let _ = writeln!(std::io::stderr(), "Failed to fire hook: {}", err);
        }

        tracing::dispatcher::with_default(self.dispatch(), || emit(level, fields, &message));

        match level {
            NativeLevel::Fatal => (self.exit_fn)(1),
            NativeLevel::Panic => panic!("{}", message),
            _ => {}
        }
    }

    fn dispatch(&self) -> &Dispatch {
        self.dispatch.get_or_init(|| self.build_dispatch())
    }

    fn reset_dispatch(&mut self) {
        self.dispatch = OnceLock::new();
    }

    fn build_dispatch(&self) -> Dispatch {
        debug!(
            formatter = %self.formatter,
            output = self.out.label(),
            report_caller = self.report_caller,
            "Building tracing dispatcher"
        );

        let layer = tracing_fmt::layer()
            .with_writer(EntryWriter(self.out.clone()))
            .with_ansi(false)
            .with_target(false)
            .with_file(self.report_caller)
            .with_line_number(self.report_caller);

        let layer: Box<dyn Layer<Registry> + Send + Sync> = match self.formatter {
            Formatter::Text => layer.boxed(),
            Formatter::Json => layer.json().boxed(),
            Formatter::Compact => layer.compact().boxed(),
        };

        Dispatch::new(tracing_subscriber::registry().with(layer))
    }
}

impl Default for TracingLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for TracingLogger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TracingLogger")
            .field("level", &self.level)
            .field("out", &self.out)
            .field("formatter", &self.formatter)
            .field("hooks", &self.hooks)
            .field("report_caller", &self.report_caller)
            .finish_non_exhaustive()
    }
}

/// Emit one event on the current dispatcher.
///
/// `tracing` needs the level at compile time, hence one macro call per level.
fn emit(level: NativeLevel, fields: &Fields, message: &str) {
    let fields = (!fields.is_empty()).then(|| tracing::field::display(fields));
    match level {
        NativeLevel::Panic => tracing::error!(fields, panic = true, "{}", message),
        NativeLevel::Fatal => tracing::error!(fields, fatal = true, "{}", message),
        NativeLevel::Error => tracing::error!(fields, "{}", message),
        NativeLevel::Warn => tracing::warn!(fields, "{}", message),
        NativeLevel::Info => tracing::info!(fields, "{}", message),
        NativeLevel::Debug => tracing::debug!(fields, "{}", message),
        NativeLevel::Trace => tracing::trace!(fields, "{}", message),
    }
}
