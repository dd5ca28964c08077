use std::fmt::{self, Arguments, Display};

use crate::{Fields, InitError, Level, LoggerOption, Options};

/// The logging contract every backend adapter implements.
///
/// `log` takes loose arguments that are joined with spaces, `logf` takes
/// pre-built format arguments. Neither formats anything unless the level is
/// enabled, so callers may pass values that are costly to render.
///
/// There is no per-call context argument. Values that must travel with a
/// logger go in [`Fields`] via [`Logger::fields`], and backend settings go in
/// [`Options::extensions`].
///
/// # Example
///
/// ```
/// use logrelay_core::{log_info, Logger, NoopLogger};
///
/// let logger = NoopLogger::default();
/// logger.info(&[&"service", &"started"]);
/// log_info!(logger, "listening on {}", 8080);
/// ```
pub trait Logger: Send + Sync {
    /// Apply options and (re)build the backend
    fn init(&mut self, opts: Vec<LoggerOption>) -> Result<(), InitError>;

    /// Backend-agnostic view of the current configuration
    fn options(&self) -> Options;

    /// Identifies the backend
    fn name(&self) -> &str;

    /// Whether a message at `level` would be emitted
    fn v(&self, level: Level) -> bool;

    /// Return a child logger that attaches `fields` to every entry
    fn fields(&self, fields: Fields) -> Box<dyn Logger>;

    fn log(&self, level: Level, args: &[&dyn Display]);

    fn logf(&self, level: Level, args: Arguments<'_>);

    fn trace(&self, args: &[&dyn Display]) {
        self.log(Level::Trace, args);
    }

    fn tracef(&self, args: Arguments<'_>) {
        self.logf(Level::Trace, args);
    }

    fn debug(&self, args: &[&dyn Display]) {
        self.log(Level::Debug, args);
    }

    fn debugf(&self, args: Arguments<'_>) {
        self.logf(Level::Debug, args);
    }

    fn info(&self, args: &[&dyn Display]) {
        self.log(Level::Info, args);
    }

    fn infof(&self, args: Arguments<'_>) {
        self.logf(Level::Info, args);
    }

    fn warn(&self, args: &[&dyn Display]) {
        self.log(Level::Warn, args);
    }

    fn warnf(&self, args: Arguments<'_>) {
        self.logf(Level::Warn, args);
    }

    fn error(&self, args: &[&dyn Display]) {
        self.log(Level::Error, args);
    }

    fn errorf(&self, args: Arguments<'_>) {
        self.logf(Level::Error, args);
    }

    fn fatal(&self, args: &[&dyn Display]) {
        self.log(Level::Fatal, args);
    }

    fn fatalf(&self, args: Arguments<'_>) {
        self.logf(Level::Fatal, args);
    }
}

/// Renders loose log arguments separated by single spaces
pub struct JoinedArgs<'a, 'b>(pub &'a [&'b dyn Display]);

impl Display for JoinedArgs<'_, '_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, arg) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            arg.fmt(f)?;
        }
        Ok(())
    }
}

/// A logger that discards everything.
///
/// Installed as the process default until an adapter replaces it.
#[derive(Debug, Clone, Default)]
pub struct NoopLogger {
    options: Options,
}

impl Logger for NoopLogger {
    fn init(&mut self, opts: Vec<LoggerOption>) -> Result<(), InitError> {
        self.options.apply(opts);
        Ok(())
    }

    fn options(&self) -> Options {
        self.options.clone()
    }

    fn name(&self) -> &str {
        "noop"
    }

    fn v(&self, _level: Level) -> bool {
        false
    }

    fn fields(&self, fields: Fields) -> Box<dyn Logger> {
        let mut child = self.clone();
        child.options.fields.merge(fields);
        Box::new(child)
    }

    fn log(&self, _level: Level, _args: &[&dyn Display]) {}

    fn logf(&self, _level: Level, _args: Arguments<'_>) {}
}

#[macro_export]
macro_rules! log_at {
    ($logger:expr, $level:expr, $($arg:tt)+) => {{
        use $crate::Logger as _;
        $logger.logf($level, format_args!($($arg)+))
    }};
}

#[macro_export]
macro_rules! log_trace {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log_at!($logger, $crate::Level::Trace, $($arg)+)
    };
}

#[macro_export]
macro_rules! log_debug {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log_at!($logger, $crate::Level::Debug, $($arg)+)
    };
}

#[macro_export]
macro_rules! log_info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log_at!($logger, $crate::Level::Info, $($arg)+)
    };
}

#[macro_export]
macro_rules! log_warn {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log_at!($logger, $crate::Level::Warn, $($arg)+)
    };
}

#[macro_export]
macro_rules! log_error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log_at!($logger, $crate::Level::Error, $($arg)+)
    };
}

#[macro_export]
macro_rules! log_fatal {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log_at!($logger, $crate::Level::Fatal, $($arg)+)
    };
}
