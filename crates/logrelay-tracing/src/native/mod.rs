//! Logger and entry handles backed by `tracing-subscriber`.
//!
//! These are the objects callers configure directly when they want full
//! control over output, layout, hooks and exit behavior, and then hand to
//! the adapter with [`with_logger`](crate::with_logger).
//!
//! - [`TracingLogger`]: owns its configuration and a private dispatcher
//! - [`Entry`]: a logger plus attached fields

mod entry;
mod formatter;
mod hooks;
mod level;
mod logger;
mod writer;

pub use entry::Entry;
pub use formatter::Formatter;
pub use hooks::{Hook, HookError, HookRecord, LevelHooks};
pub use level::NativeLevel;
pub use logger::{process_exit, ExitFn, TracingLogger};
