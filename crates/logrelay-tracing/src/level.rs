//! Mapping between facade levels and native levels.

use logrelay_core::Level;

use crate::native::NativeLevel;

pub fn to_native(level: Level) -> NativeLevel {
    match level {
        Level::Trace => NativeLevel::Trace,
        Level::Debug => NativeLevel::Debug,
        Level::Info => NativeLevel::Info,
        Level::Warn => NativeLevel::Warn,
        Level::Error => NativeLevel::Error,
        Level::Fatal => NativeLevel::Fatal,
    }
}

/// Levels the facade has no name for map to `Info`
pub fn from_native(level: NativeLevel) -> Level {
    match level {
        NativeLevel::Trace => Level::Trace,
        NativeLevel::Debug => Level::Debug,
        NativeLevel::Info => Level::Info,
        NativeLevel::Warn => Level::Warn,
        NativeLevel::Error => Level::Error,
        NativeLevel::Fatal => Level::Fatal,
        _ => Level::Info,
    }
}
