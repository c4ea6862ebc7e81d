//! # errorlog
//!
//! A minimal leveled logger with printf-style formatting.
//!
//! ## Features
//!
//! - **Forgiving formatting**: `%s`, `%d`, `%j` and `%%` placeholders; extra
//!   arguments are appended as JSON and errors dump their stack
//! - **Pluggable sinks**: timestamped streams, plain callbacks, or another logger
//! - **Live defaults**: default sink, level and colorization are read on
//!   every call, so changing them affects existing loggers
//!
//! ```
//! use errorlog::{create, Defaults, Level, LogArg};
//!
//! Defaults::global().set_level(Level::DEBUG);
//!
//! let log = create("my category");
//! errorlog::info!(log, "I have %d %s", 3, "apples");
//! log.debug([LogArg::from("extra"), serde_json::json!({"foo": "bar"}).into()]);
//! ```

pub mod core;
pub mod macros;
pub mod sinks;

pub mod prelude {
    pub use crate::core::{
        Defaults, ErrorArg, Level, LogArg, LogArgs, Logger, LoggerBuilder, LoggerConfig,
        LoggerError, LoggerOptions, Result,
    };
    pub use crate::sinks::{Sink, StreamSink};
}

pub use crate::core::{
    format, Defaults, ErrorArg, Level, LogArg, LogArgs, Logger, LoggerBuilder, LoggerConfig,
    LoggerError, LoggerOptions, Result, SinkMetrics, Tier, TimestampFormat,
};
pub use sinks::{Sink, StreamSink};

/// Create a logger bound to the process-wide [`Defaults`].
///
/// Accepts `()`, a category string, a [`Sink`], a [`StreamSink`], another
/// [`Logger`], or a [`LoggerConfig`].
pub fn create(options: impl Into<LoggerOptions>) -> Logger {
    Logger::create(options)
}
