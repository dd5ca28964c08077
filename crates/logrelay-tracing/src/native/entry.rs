use std::fmt::Arguments;
use std::sync::Arc;

use logrelay_core::Fields;
use serde_json::Value;

use super::{NativeLevel, TracingLogger};

/// A [`TracingLogger`] with fields attached to everything it writes.
///
/// Entries are cheap to clone and never modify their parent; each
/// `with_*` call returns a new entry.
#[derive(Debug, Clone)]
pub struct Entry {
    logger: Arc<TracingLogger>,
    data: Fields,
}

impl Entry {
    pub fn new(logger: Arc<TracingLogger>) -> Self {
        Self {
            logger,
            data: Fields::new(),
        }
    }

    /// The logger this entry writes through
    pub fn logger(&self) -> &Arc<TracingLogger> {
        &self.logger
    }

    pub fn data(&self) -> &Fields {
        &self.data
    }

    /// New entry with `fields` added; on key clashes the new value wins
    pub fn with_fields(&self, fields: Fields) -> Self {
        let mut data = self.data.clone();
        data.merge(fields);
        Self {
            logger: Arc::clone(&self.logger),
            data,
        }
    }

    pub fn with_field(&self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.with_fields(Fields::new().with(key, value))
    }

    pub fn is_level_enabled(&self, level: NativeLevel) -> bool {
        self.logger.is_level_enabled(level)
    }

    pub fn log(&self, level: NativeLevel, args: Arguments<'_>) {
        self.logger.write_entry(level, &self.data, args);
    }
}
