//! # logrelay-tracing
//!
//! Adapter that implements the `logrelay-core` [`Logger`](logrelay_core::Logger)
//! contract on top of `tracing` and `tracing-subscriber`.
//!
//! ## Key Types
//!
//! - [`TracingAdapter`] - The facade implementation
//! - [`TracingOptions`] - Facade options plus formatter, hooks, caller and exit settings
//! - [`native::TracingLogger`] / [`native::Entry`] - The handles the adapter writes through
//!
//! ## Usage
//!
//! ```rust,ignore
//! use logrelay_core::{with_level, Level, Logger};
//! use logrelay_tracing::{new_logger, with_json_formatter};
//!
//! let mut logger = new_logger(vec![with_level(Level::Debug), with_json_formatter()]);
//! logger.init(Vec::new())?;
//! logger.infof(format_args!("cache warmed in {}ms", elapsed));
//! ```
//!
//! A logger configured elsewhere can be wrapped instead of building a new one:
//!
//! ```rust,ignore
//! let mut native = TracingLogger::new();
//! native.set_level(NativeLevel::Warn);
//!
//! let mut logger = new_logger(vec![with_logger(native)]);
//! logger.init(Vec::new())?;
//! assert_eq!(logger.options().level, Level::Warn);
//! ```

mod adapter;
mod error;
mod level;
pub mod native;
mod options;
#[cfg(test)]
mod test_support;

/// Name reported by [`TracingAdapter`] and attached to its init errors
pub const ADAPTER_NAME: &str = "tracing";

pub use adapter::{new_logger, TracingAdapter};
pub use error::ConfigurationError;
pub use level::{from_native, to_native};
pub use options::{
    report_caller, with_exit_fn, with_formatter, with_json_formatter, with_level_hooks,
    with_logger, with_text_formatter, TracingOptions,
};
