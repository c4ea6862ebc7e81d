//! Stream sink: timestamped lines on any `std::io::Write`

use crate::core::ansi::{DIM, RESET};
use crate::core::{Result, SinkMetrics, TimestampFormat};
use parking_lot::Mutex;
use std::fmt;
use std::fs::OpenOptions;
use std::io::{self, IsTerminal, Write};
use std::path::Path;

/// Wraps a writer so that each line becomes `<timestamp> - <line>\n`.
///
/// Only streams known to be terminals are eligible for ANSI colors.
pub struct StreamSink {
    writer: Mutex<Box<dyn Write + Send>>,
    terminal: bool,
    timestamp_format: TimestampFormat,
    metrics: SinkMetrics,
}

impl StreamSink {
    /// Wrap an arbitrary writer; it is not treated as a terminal.
    pub fn new(writer: impl Write + Send + 'static) -> Self {
        Self {
            writer: Mutex::new(Box::new(writer)),
            terminal: false,
            timestamp_format: TimestampFormat::default(),
            metrics: SinkMetrics::new(),
        }
    }

    pub fn stderr() -> Self {
        let terminal = io::stderr().is_terminal();
        Self::new(io::stderr()).with_terminal(terminal)
    }

    pub fn stdout() -> Self {
        let terminal = io::stdout().is_terminal();
        Self::new(io::stdout()).with_terminal(terminal)
    }

    /// Append to a file, creating it when missing.
    ///
    /// ```no_run
    /// use errorlog::StreamSink;
    ///
    /// let sink = StreamSink::file("/var/log/app.log").unwrap();
    /// ```
    pub fn file(path: impl AsRef<Path>) -> Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self::new(file))
    }

    /// Declare whether the wrapped writer is an interactive terminal.
    #[must_use]
    pub fn with_terminal(mut self, terminal: bool) -> Self {
        self.terminal = terminal;
        self
    }

    /// Set the timestamp format for this sink. A custom pattern chrono cannot
    /// render is replaced by the default ISO 8601 format.
    ///
    /// ```
    /// use errorlog::{StreamSink, TimestampFormat};
    ///
    /// let sink = StreamSink::new(std::io::sink())
    ///     .with_timestamp_format(TimestampFormat::Iso8601Micros);
    /// ```
    #[must_use]
    pub fn with_timestamp_format(mut self, format: TimestampFormat) -> Self {
        if format.is_valid() {
            self.timestamp_format = format;
        } else {
            eprintln!(
                "[LOGGER ERROR] Invalid timestamp format {:?}, using ISO 8601",
                format
            );
            self.timestamp_format = TimestampFormat::default();
        }
        self
    }

    pub fn is_terminal(&self) -> bool {
        self.terminal
    }

    pub fn metrics(&self) -> &SinkMetrics {
        &self.metrics
    }

    /// Write one line. The timestamp is dimmed only when this stream is a
    /// terminal and `colorize` is set. Failures are counted and reported on
    /// stderr, never returned.
    pub fn write_line(&self, line: &str, colorize: bool) {
        let timestamp = self.timestamp_format.now();
        let mut output = String::with_capacity(timestamp.len() + line.len() + 16);
        if self.terminal && colorize {
            output.push_str(DIM);
            output.push_str(&timestamp);
            output.push_str(RESET);
        } else {
            output.push_str(&timestamp);
        }
        output.push_str(" - ");
        output.push_str(line);
        output.push('\n');

        let result = {
            let mut writer = self.writer.lock();
            writer
                .write_all(output.as_bytes())
                .and_then(|()| writer.flush())
        };

        match result {
            Ok(()) => self.metrics.record_written(),
            Err(e) => {
                let failed = self.metrics.record_failed();
                // Report the first failure and periodically thereafter
                if failed == 0 || (failed + 1) % 1000 == 0 {
                    eprintln!(
                        "[LOGGER ERROR] Stream sink write failed ({} failures): {}",
                        failed + 1,
                        e
                    );
                }
            }
        }
    }
}

impl fmt::Debug for StreamSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StreamSink")
            .field("terminal", &self.terminal)
            .field("timestamp_format", &self.timestamp_format)
            .field("metrics", &self.metrics)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[derive(Clone, Default)]
    struct SharedBuf(Arc<Mutex<Vec<u8>>>);

    impl SharedBuf {
        fn contents(&self) -> String {
            String::from_utf8(self.0.lock().clone()).unwrap()
        }
    }

    impl Write for SharedBuf {
        fn write(&mut self, bytes: &[u8]) -> io::Result<usize> {
            self.0.lock().extend_from_slice(bytes);
            Ok(bytes.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _bytes: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_timestamp_prefix_and_newline() {
        let buf = SharedBuf::default();
        let sink = StreamSink::new(buf.clone());
        sink.write_line("  LOG - hello", true);

        let out = buf.contents();
        assert!(out.ends_with(" -   LOG - hello\n"), "{:?}", out);
        assert_eq!(&out[10..11], "T");
        assert_eq!(&out[23..27], "Z - ");
        assert!(!out.contains('\x1b'));
        assert_eq!(sink.metrics().lines_written(), 1);
    }

    #[test]
    fn test_dimmed_timestamp_on_terminal() {
        let buf = SharedBuf::default();
        let sink = StreamSink::new(buf.clone()).with_terminal(true);

        sink.write_line("colored", true);
        sink.write_line("plain", false);

        let out = buf.contents();
        let lines: Vec<&str> = out.lines().collect();
        assert!(lines[0].starts_with(DIM));
        assert!(lines[0].ends_with(&format!("{} - colored", RESET)));
        assert!(!lines[1].contains('\x1b'));
    }

    #[test]
    fn test_custom_timestamp() {
        let buf = SharedBuf::default();
        let sink = StreamSink::new(buf.clone())
            .with_timestamp_format(TimestampFormat::Custom("[ts]".to_string()));
        sink.write_line("x", false);
        assert_eq!(buf.contents(), "[ts] - x\n");
    }

    #[test]
    fn test_invalid_custom_timestamp_keeps_lines() {
        let buf = SharedBuf::default();
        let sink = StreamSink::new(buf.clone())
            .with_timestamp_format(TimestampFormat::Custom("%Q".to_string()));
        sink.write_line(" INFO - hello", false);

        let out = buf.contents();
        assert!(out.ends_with(" -  INFO - hello\n"), "{:?}", out);
        assert_eq!(&out[23..27], "Z - ");
        assert_eq!(sink.metrics().lines_written(), 1);
    }

    #[test]
    fn test_write_failure_is_counted() {
        let sink = StreamSink::new(BrokenPipe);
        sink.write_line("lost", false);
        sink.write_line("lost again", false);
        assert_eq!(sink.metrics().failed_writes(), 2);
        assert_eq!(sink.metrics().lines_written(), 0);
    }

    #[test]
    fn test_file_sink() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("app.log");

        let sink = StreamSink::file(&path)?;
        sink.write_line("first", false);
        sink.write_line("second", false);

        let content = std::fs::read_to_string(&path)?;
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with(" - first"));
        assert!(lines[1].ends_with(" - second"));
        Ok(())
    }
}
