//! Live-mutable logger defaults
//!
//! `Defaults` holds the sink, minimum level and colorize flag used by every
//! logger that does not override them. Loggers read these values on each
//! emission, so changing a default affects loggers created earlier.

use super::log_level::Level;
use crate::sinks::Sink;
use parking_lot::RwLock;
use std::io::IsTerminal;
use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};
use std::sync::{Arc, OnceLock};

/// Environment variable seeding the default level.
pub const LEVEL_ENV: &str = "LOG_LEVEL";

/// Environment variable seeding the default colorize flag.
pub const COLOR_ENV: &str = "LOG_COLOR";

/// Shared, synchronized default configuration.
///
/// # Example
///
/// ```
/// use errorlog::{Defaults, Level, Logger, Sink};
/// use std::sync::{Arc, Mutex};
///
/// let lines = Arc::new(Mutex::new(Vec::new()));
/// let captured = Arc::clone(&lines);
/// let defaults = Arc::new(Defaults::new(
///     Sink::callback(move |line| captured.lock().unwrap().push(line.to_string())),
///     Level::OFF,
///     false,
/// ));
///
/// let logger = Logger::builder().defaults(Arc::clone(&defaults)).build();
/// logger.log("hidden");
/// defaults.set_level(Level::ALL);
/// logger.log("shown");
///
/// assert_eq!(*lines.lock().unwrap(), vec!["  LOG - shown".to_string()]);
/// ```
#[derive(Debug)]
pub struct Defaults {
    sink: RwLock<Sink>,
    level: AtomicI64,
    colorize: AtomicBool,
}

impl Defaults {
    pub fn new(sink: impl Into<Sink>, level: impl Into<Level>, colorize: bool) -> Self {
        Self {
            sink: RwLock::new(sink.into()),
            level: AtomicI64::new(level.into().value()),
            colorize: AtomicBool::new(colorize),
        }
    }

    /// Defaults seeded from the process environment: stderr as the sink,
    /// `LOG_LEVEL` (else INFO) as the level and `LOG_COLOR` (else whether
    /// stderr is a terminal) as the colorize flag.
    pub fn from_env() -> Self {
        Self::from_vars(
            std::env::var(LEVEL_ENV).ok().as_deref(),
            std::env::var(COLOR_ENV).ok().as_deref(),
        )
    }

    fn from_vars(level: Option<&str>, color: Option<&str>) -> Self {
        let level = level.map_or(Level::INFO, |s| Level::parse_or(s, Level::INFO));
        let colorize = color
            .and_then(parse_bool)
            .unwrap_or_else(|| std::io::stderr().is_terminal());
        Self::new(Sink::stderr(), level, colorize)
    }

    /// The process-wide instance, created from the environment on first use.
    pub fn global() -> &'static Arc<Defaults> {
        static GLOBAL: OnceLock<Arc<Defaults>> = OnceLock::new();
        GLOBAL.get_or_init(|| Arc::new(Defaults::from_env()))
    }

    /// Current default sink (a cheap handle clone).
    pub fn sink(&self) -> Sink {
        self.sink.read().clone()
    }

    pub fn set_sink(&self, sink: impl Into<Sink>) {
        *self.sink.write() = sink.into();
    }

    pub fn level(&self) -> Level {
        Level::new(self.level.load(Ordering::Relaxed))
    }

    pub fn set_level(&self, level: impl Into<Level>) {
        self.level.store(level.into().value(), Ordering::Relaxed);
    }

    /// Set the level from a name or number; unrecognized input selects INFO.
    pub fn set_level_name(&self, name: &str) {
        self.set_level(Level::parse_or(name, Level::INFO));
    }

    pub fn colorize(&self) -> bool {
        self.colorize.load(Ordering::Relaxed)
    }

    pub fn set_colorize(&self, colorize: bool) {
        self.colorize.store(colorize, Ordering::Relaxed);
    }
}

fn parse_bool(s: &str) -> Option<bool> {
    let s = s.trim();
    ["1", "true", "yes", "on"]
        .iter()
        .any(|v| s.eq_ignore_ascii_case(v))
        .then_some(true)
        .or_else(|| {
            ["0", "false", "no", "off"]
                .iter()
                .any(|v| s.eq_ignore_ascii_case(v))
                .then_some(false)
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_vars() {
        let defaults = Defaults::from_vars(Some("debug"), Some("yes"));
        assert_eq!(defaults.level(), Level::DEBUG);
        assert!(defaults.colorize());

        let defaults = Defaults::from_vars(Some("nonsense"), Some("off"));
        assert_eq!(defaults.level(), Level::INFO);
        assert!(!defaults.colorize());

        let defaults = Defaults::from_vars(Some(" 350 "), None);
        assert_eq!(defaults.level(), Level::new(350));

        let defaults = Defaults::from_vars(None, None);
        assert_eq!(defaults.level(), Level::INFO);
        assert!(matches!(defaults.sink(), Sink::Stream(_)));
    }

    #[test]
    fn test_parse_bool() {
        assert_eq!(parse_bool("TRUE"), Some(true));
        assert_eq!(parse_bool(" 1 "), Some(true));
        assert_eq!(parse_bool("No"), Some(false));
        assert_eq!(parse_bool("maybe"), None);
    }

    #[test]
    fn test_setters() {
        let defaults = Defaults::new(Sink::callback(|_| {}), Level::INFO, true);

        defaults.set_level(Level::ERROR);
        assert_eq!(defaults.level(), Level::ERROR);

        defaults.set_level_name("FATAL");
        assert_eq!(defaults.level(), Level::FATAL);

        defaults.set_level_name("garbage");
        assert_eq!(defaults.level(), Level::INFO);

        defaults.set_colorize(false);
        assert!(!defaults.colorize());

        defaults.set_sink(Sink::stdout());
        assert!(matches!(defaults.sink(), Sink::Stream(_)));
    }
}
