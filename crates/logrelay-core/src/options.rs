use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::{Fields, Level, Output};

/// Typed values stashed by backend-specific options.
///
/// Each value is keyed by its own type, so a backend defines a private
/// newtype per setting and reads it back with [`Extensions::get`]. Inserting
/// a second value of the same type replaces the first.
#[derive(Clone, Default)]
pub struct Extensions {
    map: HashMap<TypeId, Arc<dyn Any + Send + Sync>>,
}

impl Extensions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert<T: Any + Send + Sync>(&mut self, value: T) {
        self.map.insert(TypeId::of::<T>(), Arc::new(value));
    }

    pub fn get<T: Any + Send + Sync>(&self) -> Option<&T> {
        self.map
            .get(&TypeId::of::<T>())
            .and_then(|value| (**value).downcast_ref::<T>())
    }

    pub fn contains<T: Any + Send + Sync>(&self) -> bool {
        self.map.contains_key(&TypeId::of::<T>())
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

impl fmt::Debug for Extensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Extensions")
            .field("len", &self.map.len())
            .finish()
    }
}

/// Backend-agnostic logger configuration
#[derive(Debug, Clone, Default)]
pub struct Options {
    /// Minimum level that gets emitted
    pub level: Level,
    /// Where entries are written
    pub out: Output,
    /// Fields attached to every entry
    pub fields: Fields,
    /// Backend-specific settings
    pub extensions: Extensions,
}

impl Options {
    pub fn new(opts: impl IntoIterator<Item = LoggerOption>) -> Self {
        let mut options = Self::default();
        options.apply(opts);
        options
    }

    /// Apply options in order; later options override earlier ones
    pub fn apply(&mut self, opts: impl IntoIterator<Item = LoggerOption>) {
        for opt in opts {
            opt.apply(self);
        }
    }
}

/// A deferred change to [`Options`]
pub struct LoggerOption(Box<dyn FnOnce(&mut Options) + Send>);

impl LoggerOption {
    pub fn new(f: impl FnOnce(&mut Options) + Send + 'static) -> Self {
        Self(Box::new(f))
    }

    pub fn apply(self, options: &mut Options) {
        (self.0)(options)
    }
}

impl fmt::Debug for LoggerOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("LoggerOption")
    }
}

pub fn with_level(level: Level) -> LoggerOption {
    LoggerOption::new(move |options| options.level = level)
}

pub fn with_output(out: Output) -> LoggerOption {
    LoggerOption::new(move |options| options.out = out)
}

/// Attach fields to every entry; merges with fields set earlier
pub fn with_fields(fields: Fields) -> LoggerOption {
    LoggerOption::new(move |options| options.fields.merge(fields))
}

pub fn with_extension<T: Any + Send + Sync>(value: T) -> LoggerOption {
    LoggerOption::new(move |options| options.extensions.insert(value))
}
