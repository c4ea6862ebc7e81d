//! Positional arguments accepted by the message formatter
//!
//! This module provides:
//! - `LogArg`: one formatter argument (text, number, JSON value, error, ...)
//! - `ErrorArg`: the error capability (name, message, stack text, own fields)
//! - `LogArgs`: an argument list, the input of every logger entry point

use serde::Serialize;
use serde_json::{Map, Value};
use std::backtrace::Backtrace;
use std::ops::Deref;

/// Value type for formatter arguments
#[derive(Debug, Clone, PartialEq)]
pub enum LogArg {
    /// Absent value; skipped when trailing
    Undefined,
    Str(String),
    Number(f64),
    Json(Value),
    /// A value the serializer refused, with the serializer's error text
    Unserializable(String),
    Error(ErrorArg),
}

impl LogArg {
    /// Serialize any `Serialize` value into an argument.
    ///
    /// Serialization failures are kept as `Unserializable` and rendered as
    /// `(circular structure)` by the formatter.
    ///
    /// ```
    /// use errorlog::LogArg;
    /// use std::collections::HashMap;
    ///
    /// let mut bad = HashMap::new();
    /// bad.insert((1, 2), "tuple keys are not JSON");
    /// assert!(matches!(LogArg::json(&bad), LogArg::Unserializable(_)));
    /// ```
    pub fn json<T: Serialize + ?Sized>(value: &T) -> Self {
        match serde_json::to_value(value) {
            Ok(Value::String(s)) => LogArg::Str(s),
            Ok(value) => LogArg::Json(value),
            Err(e) => LogArg::Unserializable(e.to_string()),
        }
    }

    /// Capture an error, including a backtrace taken here.
    pub fn error<E: std::error::Error + ?Sized>(err: &E) -> Self {
        LogArg::Error(ErrorArg::from_error(err))
    }

    pub fn is_error(&self) -> bool {
        matches!(self, LogArg::Error(_))
    }

    pub fn as_error(&self) -> Option<&ErrorArg> {
        match self {
            LogArg::Error(err) => Some(err),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            LogArg::Str(s) => Some(s),
            _ => None,
        }
    }

    /// String conversion used by `%s`.
    pub fn to_display_string(&self) -> String {
        match self {
            LogArg::Undefined => "undefined".to_string(),
            LogArg::Str(s) => s.clone(),
            LogArg::Number(n) => number_to_string(*n),
            LogArg::Json(value) => value_to_display(value),
            LogArg::Unserializable(_) => "[object Object]".to_string(),
            LogArg::Error(err) => err.to_string(),
        }
    }

    /// Numeric conversion used by `%d`; `NaN` when not convertible.
    pub fn to_number(&self) -> f64 {
        match self {
            LogArg::Undefined => f64::NAN,
            LogArg::Str(s) => str_to_number(s),
            LogArg::Number(n) => *n,
            LogArg::Json(value) => value_to_number(value),
            LogArg::Unserializable(_) | LogArg::Error(_) => f64::NAN,
        }
    }

    /// JSON text of this argument.
    ///
    /// `Ok(None)` for `Undefined`, which has no JSON form; `Err` carries the
    /// serializer's message when the value cannot be represented.
    pub fn to_json(&self) -> Result<Option<String>, String> {
        let json = match self {
            LogArg::Undefined => return Ok(None),
            LogArg::Str(s) => serde_json::to_string(s),
            LogArg::Number(n) if n.is_finite() => return Ok(Some(number_to_string(*n))),
            LogArg::Number(_) => return Ok(Some("null".to_string())),
            LogArg::Json(value) => serde_json::to_string(value),
            LogArg::Unserializable(message) => return Err(message.clone()),
            LogArg::Error(err) => serde_json::to_string(err.fields()),
        };
        json.map(Some).map_err(|e| e.to_string())
    }
}

/// Render a number the way `%d` and JSON show it: shortest round-trip
/// digits, fixed notation for decimal exponents in `-7..21`, exponent form
/// such as `1e+21` or `1.5e-7` outside it, and `NaN`, `Infinity` and
/// `-Infinity` for the special values.
pub fn number_to_string(n: f64) -> String {
    if n.is_nan() {
        return "NaN".to_string();
    }
    if n.is_infinite() {
        let text = if n > 0.0 { "Infinity" } else { "-Infinity" };
        return text.to_string();
    }
    if n == 0.0 {
        return "0".to_string();
    }

    // `{:e}` yields the shortest digits that round-trip, e.g. `1.5e-7`
    let scientific = format!("{:e}", n.abs());
    let (mantissa, exponent) = scientific
        .split_once('e')
        .unwrap_or((scientific.as_str(), "0"));
    let digits: String = mantissa.chars().filter(|c| *c != '.').collect();
    let exponent: i32 = exponent.parse().unwrap_or(0);
    let len = digits.len() as i32;
    let point = exponent + 1;

    let mut out = String::with_capacity(digits.len() + 8);
    if n < 0.0 {
        out.push('-');
    }
    if len <= point && point <= 21 {
        out.push_str(&digits);
        out.extend(std::iter::repeat('0').take((point - len) as usize));
    } else if 0 < point && point <= 21 {
        let (whole, fraction) = digits.split_at(point as usize);
        out.push_str(whole);
        out.push('.');
        out.push_str(fraction);
    } else if -6 < point && point <= 0 {
        out.push_str("0.");
        out.extend(std::iter::repeat('0').take((-point) as usize));
        out.push_str(&digits);
    } else {
        let (first, rest) = digits.split_at(1);
        out.push_str(first);
        if !rest.is_empty() {
            out.push('.');
            out.push_str(rest);
        }
        out.push('e');
        out.push(if exponent < 0 { '-' } else { '+' });
        out.push_str(&exponent.abs().to_string());
    }
    out
}

fn json_number_to_string(n: &serde_json::Number) -> String {
    if let Some(i) = n.as_i64() {
        i.to_string()
    } else if let Some(u) = n.as_u64() {
        u.to_string()
    } else {
        number_to_string(n.as_f64().unwrap_or(f64::NAN))
    }
}

fn value_to_display(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => json_number_to_string(n),
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::Null => String::new(),
                other => value_to_display(other),
            })
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => "[object Object]".to_string(),
    }
}

fn value_to_number(value: &Value) -> f64 {
    match value {
        Value::Null => 0.0,
        Value::Bool(b) => f64::from(u8::from(*b)),
        Value::Number(n) => n.as_f64().unwrap_or(f64::NAN),
        Value::String(s) => str_to_number(s),
        Value::Array(items) => match items.as_slice() {
            [] => 0.0,
            [single] => str_to_number(&value_to_display(single)),
            _ => f64::NAN,
        },
        Value::Object(_) => f64::NAN,
    }
}

fn str_to_number(s: &str) -> f64 {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return 0.0;
    }

    match trimmed {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }

    for (prefix, radix) in [("0x", 16), ("0X", 16), ("0o", 8), ("0O", 8), ("0b", 2), ("0B", 2)] {
        if let Some(digits) = trimmed.strip_prefix(prefix) {
            return u64::from_str_radix(digits, radix)
                .map(|v| v as f64)
                .unwrap_or(f64::NAN);
        }
    }

    // Rust accepts "inf" and "nan" spellings that are not numbers here
    if trimmed
        .chars()
        .any(|c| c.is_ascii_alphabetic() && c != 'e' && c != 'E')
    {
        return f64::NAN;
    }

    trimmed.parse().unwrap_or(f64::NAN)
}

/// An error-like argument: a name, a message, a stack text and the error's
/// own JSON fields (empty unless added).
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorArg {
    name: String,
    message: String,
    stack: String,
    fields: Map<String, Value>,
}

impl ErrorArg {
    /// Build an error by hand; the stack is captured at this call.
    pub fn new(name: impl Into<String>, message: impl Into<String>) -> Self {
        let name = name.into();
        let message = message.into();
        let mut stack = header(&name, &message);
        push_frames(&mut stack, &Backtrace::force_capture());
        Self {
            name,
            message,
            stack,
            fields: Map::new(),
        }
    }

    /// Build an error from an already rendered stack; no backtrace is
    /// captured.
    pub fn from_parts(
        name: impl Into<String>,
        message: impl Into<String>,
        stack: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            message: message.into(),
            stack: stack.into(),
            fields: Map::new(),
        }
    }

    /// Capture any `std::error::Error`.
    ///
    /// The name is the error's type name without its module path. The stack
    /// lists the frames of a backtrace captured here, then the `source()`
    /// chain.
    pub fn from_error<E: std::error::Error + ?Sized>(err: &E) -> Self {
        let name = short_type_name(std::any::type_name::<E>()).to_string();
        let message = err.to_string();
        let mut stack = header(&name, &message);
        push_frames(&mut stack, &Backtrace::force_capture());

        let mut source = err.source();
        while let Some(cause) = source {
            stack.push_str("\n    caused by: ");
            stack.push_str(&cause.to_string());
            source = cause.source();
        }

        Self {
            name,
            message,
            stack,
            fields: Map::new(),
        }
    }

    /// Replace the stack text.
    #[must_use]
    pub fn with_stack(mut self, stack: impl Into<String>) -> Self {
        self.stack = stack.into();
        self
    }

    /// Add a field to the error's own JSON projection.
    #[must_use]
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn stack(&self) -> &str {
        &self.stack
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }
}

impl std::fmt::Display for ErrorArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&header(&self.name, &self.message))
    }
}

fn header(name: &str, message: &str) -> String {
    if message.is_empty() {
        name.to_string()
    } else {
        format!("{}: {}", name, message)
    }
}

fn short_type_name(full: &str) -> &str {
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base).trim()
}

/// Append one `    at <symbol>` line per frame of `backtrace`, starting at
/// the first frame outside the capture machinery.
fn push_frames(stack: &mut String, backtrace: &Backtrace) {
    let rendered = backtrace.to_string();
    let symbols = rendered.lines().filter_map(|line| {
        let (index, symbol) = line.trim_start().split_once(": ")?;
        (!index.is_empty() && index.bytes().all(|b| b.is_ascii_digit())).then(|| symbol.trim())
    });

    for symbol in symbols.skip_while(|symbol| is_capture_frame(symbol)) {
        stack.push_str("\n    at ");
        stack.push_str(symbol);
    }
}

fn is_capture_frame(symbol: &str) -> bool {
    symbol.starts_with("std::backtrace")
        || symbol.contains(concat!(module_path!(), "::ErrorArg::"))
        || symbol.contains(concat!(module_path!(), "::LogArg::"))
        || symbol.contains("LogArg as core::convert::From")
}

impl From<ErrorArg> for LogArg {
    fn from(err: ErrorArg) -> Self {
        LogArg::Error(err)
    }
}

impl From<&str> for LogArg {
    fn from(s: &str) -> Self {
        LogArg::Str(s.to_string())
    }
}

impl From<String> for LogArg {
    fn from(s: String) -> Self {
        LogArg::Str(s)
    }
}

impl From<&String> for LogArg {
    fn from(s: &String) -> Self {
        LogArg::Str(s.clone())
    }
}

impl From<char> for LogArg {
    fn from(c: char) -> Self {
        LogArg::Str(c.to_string())
    }
}

impl From<bool> for LogArg {
    fn from(b: bool) -> Self {
        LogArg::Json(Value::Bool(b))
    }
}

impl From<f64> for LogArg {
    fn from(n: f64) -> Self {
        LogArg::Number(n)
    }
}

impl From<f32> for LogArg {
    fn from(n: f32) -> Self {
        LogArg::Number(f64::from(n))
    }
}

macro_rules! impl_from_integer {
    ($($t:ty),*) => {
        $(
            impl From<$t> for LogArg {
                fn from(n: $t) -> Self {
                    LogArg::Json(Value::from(n))
                }
            }
        )*
    };
}

impl_from_integer!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl From<Value> for LogArg {
    fn from(value: Value) -> Self {
        match value {
            Value::String(s) => LogArg::Str(s),
            other => LogArg::Json(other),
        }
    }
}

impl From<&Value> for LogArg {
    fn from(value: &Value) -> Self {
        LogArg::from(value.clone())
    }
}

impl<T: Into<LogArg>> From<Option<T>> for LogArg {
    fn from(value: Option<T>) -> Self {
        value.map_or(LogArg::Undefined, Into::into)
    }
}

/// Argument list of one logging call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LogArgs(Vec<LogArg>);

impl LogArgs {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Append an argument (builder style).
    #[must_use]
    pub fn arg(mut self, arg: impl Into<LogArg>) -> Self {
        self.0.push(arg.into());
        self
    }

    pub fn into_vec(self) -> Vec<LogArg> {
        self.0
    }
}

impl Deref for LogArgs {
    type Target = [LogArg];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<Vec<LogArg>> for LogArgs {
    fn from(args: Vec<LogArg>) -> Self {
        Self(args)
    }
}

impl From<&[LogArg]> for LogArgs {
    fn from(args: &[LogArg]) -> Self {
        Self(args.to_vec())
    }
}

impl<const N: usize> From<[LogArg; N]> for LogArgs {
    fn from(args: [LogArg; N]) -> Self {
        Self(args.into())
    }
}

impl From<LogArg> for LogArgs {
    fn from(arg: LogArg) -> Self {
        Self(vec![arg])
    }
}

impl From<ErrorArg> for LogArgs {
    fn from(err: ErrorArg) -> Self {
        Self(vec![LogArg::Error(err)])
    }
}

impl From<&str> for LogArgs {
    fn from(s: &str) -> Self {
        Self(vec![LogArg::from(s)])
    }
}

impl From<String> for LogArgs {
    fn from(s: String) -> Self {
        Self(vec![LogArg::Str(s)])
    }
}
