//! # logrelay-core
//!
//! Backend-agnostic logging facade.
//!
//! Application code logs through the [`Logger`] trait; an adapter crate
//! (such as `logrelay-tracing`) supplies the implementation and can be
//! installed as the process-wide default.
//!
//! ## Key Types
//!
//! - [`Logger`] - The logging contract
//! - [`Level`] - Trace through Fatal
//! - [`Options`] / [`LoggerOption`] - Configuration shared by all backends
//! - [`Extensions`] - Typed slots for backend-specific settings
//! - [`Fields`] - Key/value pairs attached to child loggers
//! - [`Output`] - Shared writer handle; backends lock it once per entry
//!
//! ## Usage
//!
//! ```rust,ignore
//! use logrelay_core::{with_level, Level, Logger};
//!
//! let mut logger = logrelay_tracing::new_logger(vec![with_level(Level::Debug)]);
//! logger.init(Vec::new())?;
//! logrelay_core::set_default_logger(logger);
//!
//! logrelay_core::infof(format_args!("listening on {}", addr));
//! ```

mod default;
mod error;
mod fields;
mod level;
mod logger;
mod options;
mod output;

pub use default::{
    debug, debugf, error, errorf, fatal, fatalf, fields, info, infof, init, log, logf,
    set_default_logger, trace, tracef, v, warn, warnf, with_default_logger,
};
pub use error::{FieldsError, InitError};
pub use fields::Fields;
pub use level::Level;
pub use logger::{JoinedArgs, Logger, NoopLogger};
pub use options::{
    with_extension, with_fields, with_level, with_output, Extensions, LoggerOption, Options,
};
pub use output::{Output, OutputWriter};
