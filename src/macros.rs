//! Logging macros for variadic, printf-style calls.
//!
//! Every argument is converted with `LogArg::from`, so strings, numbers,
//! booleans, `Option`s, `serde_json::Value`s and ready-made `LogArg`s can be
//! mixed freely. The level check happens before any argument is converted.
//!
//! # Examples
//!
//! ```
//! use errorlog::prelude::*;
//! use errorlog::{info, logfmt};
//!
//! let logger = Logger::builder().sink(Sink::callback(|_| {})).build();
//!
//! info!(logger, "Server listening on port %d", 8080);
//!
//! let err = std::io::Error::new(std::io::ErrorKind::Other, "disk gone");
//! info!(logger, "write failed", LogArg::error(&err));
//!
//! assert_eq!(logfmt!("%s has %d items", "cart", 3), "cart has 3 items");
//! ```

/// Format arguments into a message without logging it.
///
/// ```
/// use errorlog::logfmt;
/// assert_eq!(logfmt!("%d %d %d %d", 1, 2, 3), "1 2 3 %d");
/// ```
#[macro_export]
macro_rules! logfmt {
    ($($arg:expr),+ $(,)?) => {
        $crate::format(&[$($crate::LogArg::from($arg)),+])
    };
}

/// Log at an explicit level.
///
/// ```
/// # use errorlog::prelude::*;
/// # let logger = Logger::builder().sink(Sink::callback(|_| {})).build();
/// use errorlog::log_at;
/// log_at!(logger, Level::new(250), "between %s and %s", "info", "warn");
/// ```
#[macro_export]
macro_rules! log_at {
    ($logger:expr, $level:expr, $($arg:expr),+ $(,)?) => {{
        let logger = &$logger;
        let level: $crate::Level = $level;
        if logger.is_enabled(level) {
            logger.log_at(level, [$($crate::LogArg::from($arg)),+]);
        }
    }};
}

/// Log at the bare `LOG` level.
///
/// ```
/// # use errorlog::prelude::*;
/// # let logger = Logger::builder().sink(Sink::callback(|_| {})).build();
/// use errorlog::log;
/// log!(logger, "I have %d %s", 3, "apples");
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $($arg:expr),+ $(,)?) => {
        $crate::log_at!($logger, $crate::Level::LOG, $($arg),+)
    };
}

/// Log a trace-level message.
///
/// ```
/// # use errorlog::prelude::*;
/// # let logger = Logger::builder().sink(Sink::callback(|_| {})).level(Level::ALL).build();
/// use errorlog::trace;
/// trace!(logger, "Entering %s", "calculate()");
/// ```
#[macro_export]
macro_rules! trace {
    ($logger:expr, $($arg:expr),+ $(,)?) => {
        $crate::log_at!($logger, $crate::Level::TRACE, $($arg),+)
    };
}

/// Log a debug-level message.
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:expr),+ $(,)?) => {
        $crate::log_at!($logger, $crate::Level::DEBUG, $($arg),+)
    };
}

/// Log an info-level message.
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:expr),+ $(,)?) => {
        $crate::log_at!($logger, $crate::Level::INFO, $($arg),+)
    };
}

/// Log a warning-level message.
#[macro_export]
macro_rules! warn {
    ($logger:expr, $($arg:expr),+ $(,)?) => {
        $crate::log_at!($logger, $crate::Level::WARN, $($arg),+)
    };
}

/// Log an error-level message.
///
/// ```
/// # use errorlog::prelude::*;
/// # let logger = Logger::builder().sink(Sink::callback(|_| {})).build();
/// use errorlog::error;
/// let err = "x".parse::<i32>().unwrap_err();
/// error!(logger, "bad input %j", "x", LogArg::error(&err));
/// ```
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:expr),+ $(,)?) => {
        $crate::log_at!($logger, $crate::Level::ERROR, $($arg),+)
    };
}

/// Log a fatal-level message.
#[macro_export]
macro_rules! fatal {
    ($logger:expr, $($arg:expr),+ $(,)?) => {
        $crate::log_at!($logger, $crate::Level::FATAL, $($arg),+)
    };
}
