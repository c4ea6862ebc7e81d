//! Sink implementations
//!
//! A sink accepts one finished line of text. Stream sinks add a timestamp
//! and a newline, callbacks receive the line untouched, and a logger sink
//! feeds the line to another logger's bare `log` entry point.

pub mod stream;

pub use stream::StreamSink;

use crate::core::{Logger, LoggerError, Result, SinkMetrics};
use std::cell::Cell;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

/// Deepest chain of logger sinks followed before a line is dropped.
const MAX_FORWARD_DEPTH: usize = 16;

thread_local! {
    static FORWARD_DEPTH: Cell<usize> = const { Cell::new(0) };
}

/// Line callback
pub type LineCallback = Arc<dyn Fn(&str) + Send + Sync>;

/// Destination of composed log lines
#[derive(Clone)]
pub enum Sink {
    Stream(Arc<StreamSink>),
    Callback(LineCallback),
    Logger(Logger),
}

impl Sink {
    /// Standard error, color eligible when it is a terminal
    pub fn stderr() -> Self {
        Sink::from(StreamSink::stderr())
    }

    /// Standard output, color eligible when it is a terminal
    pub fn stdout() -> Self {
        Sink::from(StreamSink::stdout())
    }

    /// Any writer, wrapped as a non-terminal stream
    pub fn stream(writer: impl std::io::Write + Send + 'static) -> Self {
        Sink::from(StreamSink::new(writer))
    }

    pub fn callback(f: impl Fn(&str) + Send + Sync + 'static) -> Self {
        Sink::Callback(Arc::new(f))
    }

    /// Resolve a sink named in configuration: `stderr` or `stdout`.
    pub fn from_name(name: &str) -> Result<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "stderr" => Ok(Sink::stderr()),
            "stdout" => Ok(Sink::stdout()),
            _ => Err(LoggerError::invalid_argument(format!(
                "The \"logger\" must be a callback or a writable stream, got '{}'",
                name
            ))),
        }
    }

    /// Whether ANSI colors may be written to this sink at all.
    pub fn is_color_eligible(&self) -> bool {
        match self {
            Sink::Stream(stream) => stream.is_terminal(),
            Sink::Callback(_) | Sink::Logger(_) => false,
        }
    }

    /// Counters of a stream sink.
    pub fn metrics(&self) -> Option<&SinkMetrics> {
        match self {
            Sink::Stream(stream) => Some(stream.metrics()),
            _ => None,
        }
    }

    /// Deliver one composed line. `colorize` is the current defaults flag.
    ///
    /// A panicking callback is contained here and reported on stderr.
    pub fn write_line(&self, line: &str, colorize: bool) {
        let result = panic::catch_unwind(AssertUnwindSafe(|| self.dispatch(line, colorize)));

        if let Err(panic_info) = result {
            let panic_msg = if let Some(s) = panic_info.downcast_ref::<&str>() {
                s.to_string()
            } else if let Some(s) = panic_info.downcast_ref::<String>() {
                s.clone()
            } else {
                "Unknown panic".to_string()
            };
            eprintln!("[LOGGER CRITICAL] Sink panicked: {}. Line dropped.", panic_msg);
        }
    }

    fn dispatch(&self, line: &str, colorize: bool) {
        match self {
            Sink::Stream(stream) => stream.write_line(line, colorize),
            Sink::Callback(callback) => callback(line),
            Sink::Logger(logger) => {
                let Some(_guard) = ForwardGuard::enter() else {
                    eprintln!(
                        "[LOGGER ERROR] Logger sink chain deeper than {} levels, line dropped",
                        MAX_FORWARD_DEPTH
                    );
                    return;
                };
                logger.log_line(line);
            }
        }
    }
}

/// Tracks how many logger sinks the current thread is nested in.
struct ForwardGuard;

impl ForwardGuard {
    fn enter() -> Option<Self> {
        FORWARD_DEPTH.with(|depth| {
            if depth.get() >= MAX_FORWARD_DEPTH {
                None
            } else {
                depth.set(depth.get() + 1);
                Some(ForwardGuard)
            }
        })
    }
}

impl Drop for ForwardGuard {
    fn drop(&mut self) {
        FORWARD_DEPTH.with(|depth| depth.set(depth.get().saturating_sub(1)));
    }
}

impl From<StreamSink> for Sink {
    fn from(stream: StreamSink) -> Self {
        Sink::Stream(Arc::new(stream))
    }
}

impl From<Logger> for Sink {
    fn from(logger: Logger) -> Self {
        Sink::Logger(logger)
    }
}

impl fmt::Debug for Sink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sink::Stream(stream) => f.debug_tuple("Stream").field(stream).finish(),
            Sink::Callback(_) => f.write_str("Callback"),
            Sink::Logger(logger) => f
                .debug_struct("Logger")
                .field("category", &logger.category())
                .finish_non_exhaustive(),
        }
    }
}
