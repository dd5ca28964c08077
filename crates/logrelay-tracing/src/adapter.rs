use std::fmt::{Arguments, Display};
use std::sync::Arc;

use logrelay_core::{Fields, InitError, JoinedArgs, Level, Logger, LoggerOption, Options};
use tracing::debug;

use crate::level::to_native;
use crate::native::{Entry, NativeLevel, TracingLogger};
use crate::options::{Prebuilt, TracingOptions};
use crate::ADAPTER_NAME;

/// What the adapter writes through once initialized
#[derive(Debug, Clone)]
enum Handle {
    Logger(Arc<TracingLogger>),
    Entry(Entry),
}

impl Handle {
    fn is_level_enabled(&self, level: NativeLevel) -> bool {
        match self {
            Handle::Logger(logger) => logger.is_level_enabled(level),
            Handle::Entry(entry) => entry.is_level_enabled(level),
        }
    }

    fn with_fields(&self, fields: Fields) -> Handle {
        match self {
            Handle::Logger(logger) => Handle::Entry(logger.with_fields(fields)),
            Handle::Entry(entry) => Handle::Entry(entry.with_fields(fields)),
        }
    }

    fn log(&self, level: NativeLevel, args: Arguments<'_>) {
        match self {
            Handle::Logger(logger) => logger.log(level, args),
            Handle::Entry(entry) => entry.log(level, args),
        }
    }
}

/// [`Logger`] implementation that forwards to a [`TracingLogger`].
///
/// A new adapter holds only configuration. [`Logger::init`] resolves the
/// logger it writes through: one built from the options, or the one passed
/// with [`with_logger`](crate::with_logger), whose own settings then replace
/// the option values. Logging before `init` does nothing.
#[derive(Debug, Clone)]
pub struct TracingAdapter {
    handle: Option<Handle>,
    opts: TracingOptions,
}

impl TracingAdapter {
    pub fn new(opts: impl IntoIterator<Item = LoggerOption>) -> Self {
        Self {
            handle: None,
            opts: TracingOptions::new(opts),
        }
    }

    /// Complete configuration, including the settings [`Logger::options`] cannot carry
    pub fn tracing_options(&self) -> &TracingOptions {
        &self.opts
    }

    pub fn is_initialized(&self) -> bool {
        self.handle.is_some()
    }
}

impl Default for TracingAdapter {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl Logger for TracingAdapter {
    fn init(&mut self, opts: Vec<LoggerOption>) -> Result<(), InitError> {
        let mut next = self.opts.clone();
        next.options.apply(opts);
        next.apply_extensions();

        let (handle, source) = match Prebuilt::from_extensions(&next.options.extensions)? {
            Prebuilt::None => (Handle::Logger(Arc::new(next.build_logger())), "options"),
            Prebuilt::Logger(logger) => {
                next.adopt(&logger);
                (Handle::Logger(logger), "prebuilt logger")
            }
            Prebuilt::Entry(entry) => {
                next.adopt(entry.logger());
                (Handle::Entry(entry), "prebuilt entry")
            }
        };

        let handle = if next.options.fields.is_empty() {
            handle
        } else {
            handle.with_fields(next.options.fields.clone())
        };

        debug!(
            source,
            level = %next.options.level,
            formatter = %next.formatter,
            output = next.options.out.label(),
            "Tracing adapter initialized"
        );

        self.opts = next;
        self.handle = Some(handle);
        Ok(())
    }

    /// Facade options only; formatter, hooks, caller reporting and the exit
    /// function are not representable there. See [`TracingAdapter::tracing_options`].
    fn options(&self) -> Options {
        self.opts.options.clone()
    }

    fn name(&self) -> &str {
        ADAPTER_NAME
    }

    /// Defaults to `true` before `init` so nothing is dropped by mistake
    fn v(&self, level: Level) -> bool {
        self.handle
            .as_ref()
            .map_or(true, |handle| handle.is_level_enabled(to_native(level)))
    }

    fn fields(&self, fields: Fields) -> Box<dyn Logger> {
        Box::new(TracingAdapter {
            handle: self.handle.as_ref().map(|handle| handle.with_fields(fields)),
            opts: self.opts.clone(),
        })
    }

    fn log(&self, level: Level, args: &[&dyn Display]) {
        if !self.v(level) {
            return;
        }
        if let Some(handle) = &self.handle {
            handle.log(to_native(level), format_args!("{}", JoinedArgs(args)));
        }
    }

    fn logf(&self, level: Level, args: Arguments<'_>) {
        if !self.v(level) {
            return;
        }
        if let Some(handle) = &self.handle {
            handle.log(to_native(level), args);
        }
    }
}

/// Create an uninitialized adapter behind the facade trait
pub fn new_logger(opts: Vec<LoggerOption>) -> Box<dyn Logger> {
    Box::new(TracingAdapter::new(opts))
}
