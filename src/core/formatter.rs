//! printf-style message formatting
//!
//! A leading string argument is a template understanding `%s`, `%d`, `%j` and
//! `%%`. Every argument the template does not consume is appended on its own
//! `>>>` line as JSON, and every error argument also dumps its stack.
//!
//! Formatting never fails: missing arguments leave placeholders verbatim and
//! values the serializer refuses print as `(circular structure)`.

use super::log_arg::{number_to_string, LogArg};

pub const CIRCULAR: &str = "(circular structure)";
const EXTRA_PREFIX: &str = "\n  >>> ";
const STACK_PREFIX: &str = "\n  ";

/// Format a list of arguments into one message.
///
/// # Examples
///
/// ```
/// use errorlog::{format, LogArg};
///
/// let args = [LogArg::from("%d %d %d %d"), 1.into(), 2.into(), 3.into()];
/// assert_eq!(format(&args), "1 2 3 %d");
///
/// let args = [LogArg::from("%s"), "a".into(), "b".into()];
/// assert_eq!(format(&args), "a\n  >>> \"b\"");
/// ```
pub fn format(args: &[LogArg]) -> String {
    // A lone error formats as `[message, error]`
    if let [LogArg::Error(err)] = args {
        let headline = if err.message().is_empty() {
            err.to_string()
        } else {
            err.message().to_string()
        };
        return format(&[LogArg::Str(headline), args[0].clone()]);
    }

    let mut msg = String::new();
    let mut next = 0;

    if let Some(LogArg::Str(template)) = args.first() {
        let consumed = expand_template(template, &args[1..], &mut msg);
        next = 1 + consumed;
    }

    for arg in &args[next..] {
        append_extra(&mut msg, arg);
    }

    msg
}

/// Expand `template` into `out`, returning how many arguments were consumed.
fn expand_template(template: &str, args: &[LogArg], out: &mut String) -> usize {
    let mut consumed = 0;
    let mut chars = template.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '%' {
            out.push(c);
            continue;
        }

        let spec = match chars.peek() {
            Some(&spec @ ('s' | 'd' | 'j' | '%')) => spec,
            _ => {
                out.push('%');
                continue;
            }
        };
        chars.next();

        if consumed >= args.len() {
            out.push('%');
            out.push(spec);
            continue;
        }

        match spec {
            '%' => out.push('%'),
            's' => {
                out.push_str(&args[consumed].to_display_string());
                consumed += 1;
            }
            'd' => {
                out.push_str(&number_to_string(args[consumed].to_number()));
                consumed += 1;
            }
            _ => {
                match args[consumed].to_json() {
                    Ok(Some(json)) => out.push_str(&json),
                    Ok(None) => out.push_str("undefined"),
                    Err(_) => out.push_str(CIRCULAR),
                }
                consumed += 1;
            }
        }
    }

    consumed
}

fn append_extra(msg: &mut String, arg: &LogArg) {
    match arg.to_json() {
        Ok(None) => {}
        // A bare error serializes to `{}`; its stack below says more
        Ok(Some(json)) if json == "{}" && arg.is_error() => {}
        Ok(Some(json)) => {
            msg.push_str(EXTRA_PREFIX);
            msg.push_str(&json);
        }
        Err(_) => {
            msg.push_str(EXTRA_PREFIX);
            msg.push_str(CIRCULAR);
        }
    }

    if let LogArg::Error(err) = arg {
        msg.push_str(STACK_PREFIX);
        msg.push_str(err.stack());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::log_arg::ErrorArg;
    use serde_json::json;

    fn args<const N: usize>(args: [LogArg; N]) -> Vec<LogArg> {
        args.into()
    }

    fn error(message: &str) -> LogArg {
        ErrorArg::from_parts("Error", message, format!("Error: {}\n    at test", message)).into()
    }

    #[test]
    fn test_exact_arguments() {
        let a = args(["%d %d %d".into(), 1.into(), 2.into(), 3.into()]);
        assert_eq!(format(&a), "1 2 3");
    }

    #[test]
    fn test_insufficient_arguments() {
        let a = args(["%d %d %d %d".into(), 1.into(), 2.into(), 3.into()]);
        assert_eq!(format(&a), "1 2 3 %d");

        let a = args(["%s and %% and %j".into()]);
        assert_eq!(format(&a), "%s and %% and %j");
    }

    #[test]
    fn test_mixed_placeholders() {
        let a = args([
            "number %d string %s json %j percent % and %% borked %x nan %d end".into(),
            123.456.into(),
            "foobar".into(),
            json!({"hello": "world"}).into(),
            "foo".into(),
        ]);
        assert_eq!(
            format(&a),
            "number 123.456 string foobar json {\"hello\":\"world\"} percent % and % borked %x nan NaN end"
        );
    }

    #[test]
    fn test_extra_arguments() {
        let a = args([
            "%d %d %d %d".into(),
            1.into(),
            2.into(),
            3.into(),
            4.into(),
            5.into(),
            "hello".into(),
            json!({"foo": "bar"}).into(),
        ]);
        assert_eq!(
            format(&a),
            "1 2 3 4\n  >>> 5\n  >>> \"hello\"\n  >>> {\"foo\":\"bar\"}"
        );
    }

    #[test]
    fn test_falsy_extras_are_printed() {
        let a = args(["msg".into(), 0.into(), "".into(), false.into(), json!(null).into()]);
        assert_eq!(
            format(&a),
            "msg\n  >>> 0\n  >>> \"\"\n  >>> false\n  >>> null"
        );
    }

    #[test]
    fn test_undefined_extras_are_skipped() {
        let a = args(["msg".into(), LogArg::Undefined, 1.into()]);
        assert_eq!(format(&a), "msg\n  >>> 1");
    }

    #[test]
    fn test_non_string_first_argument() {
        let a = args([42.into(), "x".into()]);
        assert_eq!(format(&a), "\n  >>> 42\n  >>> \"x\"");
        assert_eq!(format(&[]), "");
    }

    #[test]
    fn test_unserializable_values() {
        let broken = LogArg::Unserializable("key must be a string".into());
        let a = args(["json %j".into(), broken.clone(), broken]);
        assert_eq!(
            format(&a),
            "json (circular structure)\n  >>> (circular structure)"
        );
    }

    #[test]
    fn test_undefined_placeholders() {
        let a = args(["%s %j %d".into(), LogArg::Undefined, LogArg::Undefined, LogArg::Undefined]);
        assert_eq!(format(&a), "undefined undefined NaN");
    }

    #[test]
    fn test_error_argument() {
        let a = args(["test message".into(), error("error title")]);
        assert_eq!(format(&a), "test message\n  Error: error title\n    at test");
    }

    #[test]
    fn test_error_with_extras() {
        let a = args([
            "test %s message".into(),
            "nice".into(),
            json!({"foo": "bar"}).into(),
            error("error title"),
        ]);
        assert_eq!(
            format(&a),
            "test nice message\n  >>> {\"foo\":\"bar\"}\n  Error: error title\n    at test"
        );
    }

    #[test]
    fn test_error_with_fields_is_printed() {
        let err = ErrorArg::from_parts("Error", "coded", "Error: coded\n    at test")
            .with_field("code", 7);
        let a = args(["failed".into(), err.into()]);
        assert_eq!(
            format(&a),
            "failed\n  >>> {\"code\":7}\n  Error: coded\n    at test"
        );
    }

    #[test]
    fn test_single_error() {
        let a = args([error("simple error")]);
        assert_eq!(format(&a), "simple error\n  Error: simple error\n    at test");

        let bare = ErrorArg::from_parts("Timeout", "", "Timeout\n    at test");
        assert_eq!(format(&[bare.into()]), "Timeout\n  Timeout\n    at test");
    }

    #[test]
    fn test_single_error_message_is_a_template() {
        let a = args([error("100%% done")]);
        assert_eq!(format(&a), "100% done\n  Error: 100%% done\n    at test");

        let a = args([error("50% off")]);
        assert_eq!(format(&a), "50% off\n  Error: 50% off\n    at test");
    }

    #[test]
    fn test_captured_stack_has_frames() {
        let io_err = std::io::Error::new(std::io::ErrorKind::Other, "error title");
        let a = args(["test message".into(), LogArg::error(&io_err)]);
        let out = format(&a);
        assert!(
            out.starts_with("test message\n  Error: error title\n    at "),
            "unexpected output: {}",
            out
        );
    }

    #[test]
    fn test_idempotent() {
        let a = args(["%s=%d".into(), "k".into(), 2.into(), json!([1, 2]).into()]);
        assert_eq!(format(&a), format(&a));
    }

    #[test]
    fn test_trailing_percent() {
        let a = args(["100%".into(), 1.into()]);
        assert_eq!(format(&a), "100%\n  >>> 1");
    }
}
