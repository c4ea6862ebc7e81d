//! Core logger types

pub mod ansi;
pub mod defaults;
pub mod error;
pub mod formatter;
pub mod log_arg;
pub mod log_level;
pub mod logger;
pub mod metrics;
pub mod timestamp;

pub use defaults::{Defaults, COLOR_ENV, LEVEL_ENV};
pub use error::{LoggerError, Result};
pub use formatter::format;
pub use log_arg::{ErrorArg, LogArg, LogArgs};
pub use log_level::{Level, Tier};
pub use logger::{Logger, LoggerBuilder, LoggerConfig, LoggerOptions};
pub use metrics::SinkMetrics;
pub use timestamp::TimestampFormat;
