//! Log level definitions

use colored::Color;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Severity on an open integer scale.
///
/// Named tiers sit at fixed points and any other value is allowed; a message
/// is emitted when its level is greater than or equal to the effective
/// minimum level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Level(i64);

impl Level {
    pub const ALL: Level = Level(-1);
    pub const TRACE: Level = Level(0);
    pub const DEBUG: Level = Level(100);
    pub const INFO: Level = Level(200);
    pub const WARN: Level = Level(300);
    pub const ERROR: Level = Level(400);
    pub const FATAL: Level = Level(500);
    pub const OFF: Level = Level(i64::MAX);

    /// Level of the bare `log` entry point: above FATAL, below OFF.
    pub const LOG: Level = Level(i64::MAX - 1);

    const NAMED: [(&'static str, Level); 8] = [
        ("ALL", Level::ALL),
        ("TRACE", Level::TRACE),
        ("DEBUG", Level::DEBUG),
        ("INFO", Level::INFO),
        ("WARN", Level::WARN),
        ("ERROR", Level::ERROR),
        ("FATAL", Level::FATAL),
        ("OFF", Level::OFF),
    ];

    pub const fn new(value: i64) -> Self {
        Level(value)
    }

    pub const fn value(self) -> i64 {
        self.0
    }

    /// Parse a level name or number, falling back to `default` on anything
    /// unrecognized.
    ///
    /// ```
    /// use errorlog::Level;
    ///
    /// assert_eq!(Level::parse_or(" debug ", Level::INFO), Level::DEBUG);
    /// assert_eq!(Level::parse_or("150", Level::INFO), Level::new(150));
    /// assert_eq!(Level::parse_or("loud", Level::INFO), Level::INFO);
    /// ```
    pub fn parse_or(input: &str, default: Level) -> Level {
        input.parse().unwrap_or(default)
    }

    /// Name of the tier this exact value denotes, if any.
    pub fn name(self) -> Option<&'static str> {
        if self == Level::LOG {
            return Some("LOG");
        }
        Self::NAMED
            .iter()
            .find(|(_, level)| *level == self)
            .map(|(name, _)| *name)
    }

    /// Tier used to label and color a message emitted at this level.
    pub fn tier(self) -> Tier {
        Tier::of(self)
    }

    /// Five-character, right-aligned label of this level's tier.
    pub fn label(self) -> &'static str {
        self.tier().label()
    }
}

impl Default for Level {
    fn default() -> Self {
        Level::INFO
    }
}

impl From<i64> for Level {
    fn from(value: i64) -> Self {
        Level(value)
    }
}

impl From<i32> for Level {
    fn from(value: i32) -> Self {
        Level(i64::from(value))
    }
}

impl From<Level> for i64 {
    fn from(level: Level) -> Self {
        level.0
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => f.write_str(name),
            None => write!(f, "{}", self.0),
        }
    }
}

impl FromStr for Level {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Some((_, level)) = Self::NAMED
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(trimmed))
        {
            return Ok(*level);
        }
        if let Ok(value) = trimmed.parse::<i64>() {
            return Ok(Level(value));
        }
        match trimmed.parse::<f64>() {
            Ok(value) if value.is_finite() => Ok(Level(value.trunc() as i64)),
            _ => Err(format!("Invalid log level: '{}'", s)),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum LevelRepr {
    Number(i64),
    Name(String),
}

impl<'de> Deserialize<'de> for Level {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match LevelRepr::deserialize(deserializer)? {
            LevelRepr::Number(value) => Ok(Level(value)),
            LevelRepr::Name(name) => name.parse().map_err(serde::de::Error::custom),
        }
    }
}

/// Label and color bucket of a message level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
    Fatal,
    Log,
}

impl Tier {
    /// First tier whose threshold is at or above `level`.
    pub fn of(level: Level) -> Tier {
        if level <= Level::TRACE {
            Tier::Trace
        } else if level <= Level::DEBUG {
            Tier::Debug
        } else if level <= Level::INFO {
            Tier::Info
        } else if level <= Level::WARN {
            Tier::Warn
        } else if level <= Level::ERROR {
            Tier::Error
        } else if level <= Level::FATAL {
            Tier::Fatal
        } else {
            Tier::Log
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Tier::Trace => "TRACE",
            Tier::Debug => "DEBUG",
            Tier::Info => " INFO",
            Tier::Warn => " WARN",
            Tier::Error => "ERROR",
            Tier::Fatal => "FATAL",
            Tier::Log => "  LOG",
        }
    }

    pub fn label_color(self) -> Color {
        use colored::Color::*;
        match self {
            Tier::Trace => BrightBlack,
            Tier::Debug => Blue,
            Tier::Info => Green,
            Tier::Warn => Yellow,
            Tier::Error => Red,
            Tier::Fatal => Magenta,
            Tier::Log => BrightWhite,
        }
    }

    /// Category color; the category is underlined as well.
    pub fn category_color(self) -> Color {
        use colored::Color::*;
        match self {
            Tier::Trace => White,
            Tier::Debug => Cyan,
            Tier::Info => BrightGreen,
            Tier::Warn => BrightYellow,
            Tier::Error => BrightRed,
            Tier::Fatal => BrightMagenta,
            Tier::Log => BrightCyan,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_constants() {
        assert_eq!(Level::ALL.value(), -1);
        assert_eq!(Level::TRACE.value(), 0);
        assert_eq!(Level::DEBUG.value(), 100);
        assert_eq!(Level::INFO.value(), 200);
        assert_eq!(Level::WARN.value(), 300);
        assert_eq!(Level::ERROR.value(), 400);
        assert_eq!(Level::FATAL.value(), 500);
        assert_eq!(Level::OFF.value(), i64::MAX);
        assert!(Level::FATAL < Level::LOG && Level::LOG < Level::OFF);
    }

    #[test]
    fn test_parse_names() {
        for (name, level) in [
            ("ALL", Level::ALL),
            ("trace", Level::TRACE),
            (" Debug", Level::DEBUG),
            ("info ", Level::INFO),
            ("WARN", Level::WARN),
            ("error", Level::ERROR),
            ("FaTaL", Level::FATAL),
            ("\toff\n", Level::OFF),
        ] {
            assert_eq!(name.parse::<Level>(), Ok(level), "parsing {:?}", name);
        }
    }

    #[test]
    fn test_parse_numbers_and_fallback() {
        assert_eq!(Level::parse_or("250", Level::INFO), Level::new(250));
        assert_eq!(Level::parse_or("-1", Level::INFO), Level::ALL);
        assert_eq!(Level::parse_or("12.9", Level::INFO), Level::new(12));
        assert_eq!(Level::parse_or("verbose", Level::WARN), Level::WARN);
        assert_eq!(Level::parse_or("", Level::ERROR), Level::ERROR);
        assert!("warning".parse::<Level>().is_err());
    }

    #[test]
    fn test_tier_labels() {
        assert_eq!(Level::ALL.label(), "TRACE");
        assert_eq!(Level::TRACE.label(), "TRACE");
        assert_eq!(Level::new(1).label(), "DEBUG");
        assert_eq!(Level::DEBUG.label(), "DEBUG");
        assert_eq!(Level::INFO.label(), " INFO");
        assert_eq!(Level::new(250).label(), " WARN");
        assert_eq!(Level::ERROR.label(), "ERROR");
        assert_eq!(Level::FATAL.label(), "FATAL");
        assert_eq!(Level::LOG.label(), "  LOG");
        for tier in [
            Tier::Trace,
            Tier::Debug,
            Tier::Info,
            Tier::Warn,
            Tier::Error,
            Tier::Fatal,
            Tier::Log,
        ] {
            assert_eq!(tier.label().len(), 5);
            assert_ne!(tier.label_color(), tier.category_color());
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(Level::WARN.to_string(), "WARN");
        assert_eq!(Level::LOG.to_string(), "LOG");
        assert_eq!(Level::new(42).to_string(), "42");
    }

    #[test]
    fn test_serde() {
        let level: Level = serde_json::from_str("\"debug\"").unwrap();
        assert_eq!(level, Level::DEBUG);
        let level: Level = serde_json::from_str("300").unwrap();
        assert_eq!(level, Level::WARN);
        assert!(serde_json::from_str::<Level>("\"chatty\"").is_err());
        assert_eq!(serde_json::to_string(&Level::ERROR).unwrap(), "400");
    }
}
