//! Logger factory and emitter

use super::{
    ansi,
    defaults::Defaults,
    error::{LoggerError, Result},
    formatter,
    log_arg::LogArgs,
    log_level::Level,
};
use crate::sinks::{Sink, StreamSink};
use serde_json::Value;
use std::sync::Arc;

/// A categorized, leveled emitter.
///
/// Immutable once built and cheap to clone. Anything not overridden (sink,
/// minimum level) is read from the logger's [`Defaults`] on every call.
#[derive(Debug, Clone)]
pub struct Logger {
    inner: Arc<LoggerInner>,
}

#[derive(Debug)]
struct LoggerInner {
    category: Option<String>,
    sink: Option<Sink>,
    level: Option<Level>,
    defaults: Arc<Defaults>,
}

impl Logger {
    /// Create a logger from any supported option shape.
    ///
    /// ```
    /// use errorlog::{Logger, LoggerConfig, Level, Sink};
    ///
    /// let plain = Logger::create(());
    /// let categorized = Logger::create("database");
    /// let redirected = Logger::create(Sink::stdout());
    /// let configured = Logger::create(
    ///     LoggerConfig::new().category("http").level(Level::DEBUG),
    /// );
    /// assert_eq!(categorized.category(), Some("database"));
    /// assert_eq!(configured.level_override(), Some(Level::DEBUG));
    /// # let _ = (plain, redirected);
    /// ```
    pub fn create(options: impl Into<LoggerOptions>) -> Logger {
        options.into().into_builder().build()
    }

    /// Create a logger from dynamically shaped options.
    ///
    /// Fails with `InvalidArgument` for shapes other than null, a string or
    /// an options object.
    pub fn from_value(options: &Value) -> Result<Logger> {
        Ok(Self::create(LoggerOptions::try_from(options)?))
    }

    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }

    pub fn category(&self) -> Option<&str> {
        self.inner.category.as_deref()
    }

    pub fn sink_override(&self) -> Option<&Sink> {
        self.inner.sink.as_ref()
    }

    pub fn level_override(&self) -> Option<Level> {
        self.inner.level
    }

    pub fn defaults(&self) -> &Arc<Defaults> {
        &self.inner.defaults
    }

    /// Minimum level in force right now.
    pub fn effective_level(&self) -> Level {
        self.inner
            .level
            .unwrap_or_else(|| self.inner.defaults.level())
    }

    /// Sink lines go to right now.
    pub fn effective_sink(&self) -> Sink {
        match &self.inner.sink {
            Some(sink) => sink.clone(),
            None => self.inner.defaults.sink(),
        }
    }

    /// Whether a message at `level` would be emitted right now. A minimum
    /// of `OFF` admits nothing, not even messages at `OFF` itself.
    #[inline]
    pub fn is_enabled(&self, level: Level) -> bool {
        let minimum = self.effective_level();
        minimum != Level::OFF && level >= minimum
    }

    /// Format and emit `args` at an arbitrary level.
    ///
    /// Nothing is formatted when the level is disabled.
    pub fn log_at(&self, level: Level, args: impl Into<LogArgs>) {
        if !self.is_enabled(level) {
            return;
        }

        let args = args.into();
        let message = formatter::format(&args);
        self.emit(level, &message);
    }

    /// Bare entry point, gated like ERROR-or-above and labeled `LOG`.
    pub fn log(&self, args: impl Into<LogArgs>) {
        self.log_at(Level::LOG, args)
    }

    pub fn trace(&self, args: impl Into<LogArgs>) {
        self.log_at(Level::TRACE, args)
    }

    pub fn debug(&self, args: impl Into<LogArgs>) {
        self.log_at(Level::DEBUG, args)
    }

    pub fn info(&self, args: impl Into<LogArgs>) {
        self.log_at(Level::INFO, args)
    }

    pub fn warn(&self, args: impl Into<LogArgs>) {
        self.log_at(Level::WARN, args)
    }

    pub fn error(&self, args: impl Into<LogArgs>) {
        self.log_at(Level::ERROR, args)
    }

    pub fn fatal(&self, args: impl Into<LogArgs>) {
        self.log_at(Level::FATAL, args)
    }

    /// Emit an already formatted line at the bare level; used when this
    /// logger is another logger's sink.
    pub(crate) fn log_line(&self, line: &str) {
        if self.is_enabled(Level::LOG) {
            self.emit(Level::LOG, line);
        }
    }

    fn emit(&self, level: Level, message: &str) {
        let sink = self.effective_sink();
        let colorize_flag = self.inner.defaults.colorize();
        let colorize = sink.is_color_eligible() && colorize_flag;
        let line = self.compose(level, colorize, message);
        sink.write_line(&line, colorize_flag);
    }

    /// `<LABEL> - [<category>: ]<message>`, with ANSI fragments when colorizing.
    fn compose(&self, level: Level, colorize: bool, message: &str) -> String {
        let tier = level.tier();
        let category_len = self.inner.category.as_ref().map_or(0, |c| c.len() + 2);
        let mut line = String::with_capacity(message.len() + category_len + 40);

        if colorize {
            line.push_str(ansi::RESET);
            line.push_str(&ansi::fg(tier.label_color()));
        }
        line.push_str(tier.label());
        line.push_str(" - ");
        if colorize {
            line.push_str(ansi::RESET);
        }

        if let Some(category) = &self.inner.category {
            if colorize {
                line.push_str(&ansi::underline(tier.category_color()));
            }
            line.push_str(category);
            line.push_str(": ");
            if colorize {
                line.push_str(ansi::RESET);
            }
        }

        line.push_str(message);
        line
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// Builder for configuring a [`Logger`]
///
/// # Example
///
/// ```
/// use errorlog::{Defaults, Level, Logger, Sink};
/// use std::sync::Arc;
///
/// let defaults = Arc::new(Defaults::new(Sink::stderr(), Level::INFO, false));
/// let logger = Logger::builder()
///     .category("worker")
///     .level(Level::DEBUG)
///     .sink(Sink::stdout())
///     .defaults(defaults)
///     .build();
///
/// assert!(logger.is_enabled(Level::DEBUG));
/// ```
#[derive(Debug, Default)]
pub struct LoggerBuilder {
    category: Option<String>,
    sink: Option<Sink>,
    level: Option<Level>,
    defaults: Option<Arc<Defaults>>,
}

impl LoggerBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the category; an empty string means no category.
    #[must_use]
    pub fn category(mut self, category: impl Into<String>) -> Self {
        let category = category.into();
        self.category = (!category.is_empty()).then_some(category);
        self
    }

    #[must_use]
    pub fn level(mut self, level: impl Into<Level>) -> Self {
        self.level = Some(level.into());
        self
    }

    /// Set the minimum level by name or number; unrecognized input leaves
    /// the level to the defaults.
    #[must_use]
    pub fn level_name(mut self, name: &str) -> Self {
        if let Ok(level) = name.parse() {
            self.level = Some(level);
        }
        self
    }

    #[must_use]
    pub fn sink(mut self, sink: impl Into<Sink>) -> Self {
        self.sink = Some(sink.into());
        self
    }

    /// Resolve unset values against `defaults` instead of the process-wide
    /// instance.
    #[must_use]
    pub fn defaults(mut self, defaults: Arc<Defaults>) -> Self {
        self.defaults = Some(defaults);
        self
    }

    pub fn build(self) -> Logger {
        Logger {
            inner: Arc::new(LoggerInner {
                category: self.category,
                sink: self.sink,
                level: self.level,
                defaults: self
                    .defaults
                    .unwrap_or_else(|| Arc::clone(Defaults::global())),
            }),
        }
    }
}

/// Explicit logger configuration; unset fields fall back to the defaults.
#[derive(Debug, Clone, Default)]
pub struct LoggerConfig {
    pub category: Option<String>,
    pub level: Option<Level>,
    pub sink: Option<Sink>,
}

impl LoggerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    #[must_use]
    pub fn level(mut self, level: impl Into<Level>) -> Self {
        self.level = Some(level.into());
        self
    }

    #[must_use]
    pub fn sink(mut self, sink: impl Into<Sink>) -> Self {
        self.sink = Some(sink.into());
        self
    }

    fn from_object(map: &serde_json::Map<String, Value>) -> Result<Self> {
        let category = match map.get("category") {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) => Some(s.clone()),
            Some(Value::Number(n)) => Some(n.to_string()),
            Some(Value::Bool(b)) => Some(b.to_string()),
            Some(_) => {
                return Err(LoggerError::invalid_argument(
                    "The \"category\" must be a string",
                ))
            }
        };

        let level = match map.get("level") {
            Some(Value::Number(n)) => n
                .as_i64()
                .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f as i64))
                .map(Level::new),
            Some(Value::String(s)) => s.parse().ok(),
            _ => None,
        };

        let sink = match map.get("logger") {
            None | Some(Value::Null) => None,
            Some(Value::String(name)) => Some(Sink::from_name(name)?),
            Some(other) => {
                return Err(LoggerError::invalid_argument(format!(
                    "The \"logger\" must be a callback or a writable stream, got {}",
                    other
                )))
            }
        };

        Ok(Self {
            category,
            level,
            sink,
        })
    }
}

/// Every shape a logger can be created from.
#[derive(Debug, Clone, Default)]
pub enum LoggerOptions {
    #[default]
    Default,
    Category(String),
    Sink(Sink),
    Config(LoggerConfig),
}

impl LoggerOptions {
    /// Parse options from JSON text.
    ///
    /// ```
    /// use errorlog::{Level, LoggerOptions};
    ///
    /// let options = LoggerOptions::from_json_str(r#"{"category": "db", "level": "warn"}"#).unwrap();
    /// assert!(matches!(options, LoggerOptions::Config(ref c) if c.level == Some(Level::WARN)));
    ///
    /// assert!(LoggerOptions::from_json_str("42").is_err());
    /// ```
    pub fn from_json_str(json: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(json)?;
        Self::try_from(&value)
    }

    fn into_builder(self) -> LoggerBuilder {
        let builder = LoggerBuilder::new();
        match self {
            LoggerOptions::Default => builder,
            LoggerOptions::Category(category) => builder.category(category),
            LoggerOptions::Sink(sink) => builder.sink(sink),
            LoggerOptions::Config(config) => {
                let mut builder = builder;
                if let Some(category) = config.category {
                    builder = builder.category(category);
                }
                if let Some(level) = config.level {
                    builder = builder.level(level);
                }
                if let Some(sink) = config.sink {
                    builder = builder.sink(sink);
                }
                builder
            }
        }
    }
}

impl From<()> for LoggerOptions {
    fn from(_: ()) -> Self {
        LoggerOptions::Default
    }
}

impl From<&str> for LoggerOptions {
    fn from(category: &str) -> Self {
        LoggerOptions::Category(category.to_string())
    }
}

impl From<String> for LoggerOptions {
    fn from(category: String) -> Self {
        LoggerOptions::Category(category)
    }
}

impl From<Sink> for LoggerOptions {
    fn from(sink: Sink) -> Self {
        LoggerOptions::Sink(sink)
    }
}

impl From<StreamSink> for LoggerOptions {
    fn from(stream: StreamSink) -> Self {
        LoggerOptions::Sink(stream.into())
    }
}

impl From<Logger> for LoggerOptions {
    fn from(logger: Logger) -> Self {
        LoggerOptions::Sink(Sink::Logger(logger))
    }
}

impl From<LoggerConfig> for LoggerOptions {
    fn from(config: LoggerConfig) -> Self {
        LoggerOptions::Config(config)
    }
}

impl TryFrom<&Value> for LoggerOptions {
    type Error = LoggerError;

    fn try_from(value: &Value) -> Result<Self> {
        match value {
            Value::Null => Ok(LoggerOptions::Default),
            Value::String(category) => Ok(LoggerOptions::Category(category.clone())),
            Value::Object(map) => Ok(LoggerOptions::Config(LoggerConfig::from_object(map)?)),
            other => Err(LoggerError::invalid_argument(format!(
                "Must be called with a string, sink, callback or options, got {}",
                other
            ))),
        }
    }
}

impl TryFrom<Value> for LoggerOptions {
    type Error = LoggerError;

    fn try_from(value: Value) -> Result<Self> {
        Self::try_from(&value)
    }
}
