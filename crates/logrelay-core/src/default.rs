//! Process-wide default logger.
//!
//! Holds a [`NoopLogger`] until something calls [`set_default_logger`],
//! normally once at startup. Tests may swap it freely. Adapters never
//! replace it on their own.

use std::fmt::{Arguments, Display};
use std::sync::{PoisonError, RwLock};

use lazy_static::lazy_static;

use crate::{Fields, InitError, Level, Logger, LoggerOption, NoopLogger};

lazy_static! {
    static ref DEFAULT_LOGGER: RwLock<Box<dyn Logger>> = RwLock::new(Box::new(NoopLogger::default()));
}

/// Install `logger` as the process default and return the previous one
pub fn set_default_logger(logger: Box<dyn Logger>) -> Box<dyn Logger> {
    let mut slot = DEFAULT_LOGGER
        .write()
        .unwrap_or_else(PoisonError::into_inner);
    std::mem::replace(&mut *slot, logger)
}

/// Re-initialize the default logger with additional options
pub fn init(opts: Vec<LoggerOption>) -> Result<(), InitError> {
    DEFAULT_LOGGER
        .write()
        .unwrap_or_else(PoisonError::into_inner)
        .init(opts)
}

/// Run `f` against the default logger
pub fn with_default_logger<R>(f: impl FnOnce(&dyn Logger) -> R) -> R {
    let logger = DEFAULT_LOGGER.read().unwrap_or_else(PoisonError::into_inner);
    f(&**logger)
}

pub fn v(level: Level) -> bool {
    with_default_logger(|logger| logger.v(level))
}

/// Child of the default logger with `fields` attached
pub fn fields(fields: Fields) -> Box<dyn Logger> {
    with_default_logger(|logger| logger.fields(fields))
}

pub fn log(level: Level, args: &[&dyn Display]) {
    with_default_logger(|logger| logger.log(level, args));
}

pub fn logf(level: Level, args: Arguments<'_>) {
    with_default_logger(|logger| logger.logf(level, args));
}

pub fn trace(args: &[&dyn Display]) {
    log(Level::Trace, args);
}

pub fn tracef(args: Arguments<'_>) {
    logf(Level::Trace, args);
}

pub fn debug(args: &[&dyn Display]) {
    log(Level::Debug, args);
}

pub fn debugf(args: Arguments<'_>) {
    logf(Level::Debug, args);
}

pub fn info(args: &[&dyn Display]) {
    log(Level::Info, args);
}

pub fn infof(args: Arguments<'_>) {
    logf(Level::Info, args);
}

pub fn warn(args: &[&dyn Display]) {
    log(Level::Warn, args);
}

pub fn warnf(args: Arguments<'_>) {
    logf(Level::Warn, args);
}

pub fn error(args: &[&dyn Display]) {
    log(Level::Error, args);
}

pub fn errorf(args: Arguments<'_>) {
    logf(Level::Error, args);
}

pub fn fatal(args: &[&dyn Display]) {
    log(Level::Fatal, args);
}

pub fn fatalf(args: Arguments<'_>) {
    logf(Level::Fatal, args);
}
