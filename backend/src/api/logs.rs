//! Log broadcaster.
//!
//! Every log line from the parser, the builder and the server goes through
//! [`LOG_BROADCASTER`]: it is written to stderr and fanned out to SSE clients
//! on `/api/logs`, so a page open on the dev server sees skipped manifest rows
//! as they happen. Stdout stays free for command output such as
//! `gallery parse` JSON.

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::io::{self, Write};
use std::sync::Mutex;
use tokio::sync::broadcast;

/// Capacity of the broadcast channel; slow clients lose the oldest entries.
const CHANNEL_CAPACITY: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Info,
    Success,
    Warning,
    Error,
}

impl LogLevel {
    fn prefix(self) -> &'static str {
        match self {
            LogLevel::Info => "   ",
            LogLevel::Success => "   ✓",
            LogLevel::Warning => "   ⚠️",
            LogLevel::Error => "   ❌",
        }
    }
}

/// A single log entry
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogEntry {
    pub level: LogLevel,
    pub message: String,
    /// Nesting depth for display
    #[serde(default)]
    pub indent: u8,
    pub timestamp: DateTime<Utc>,
}

impl LogEntry {
    pub fn new(level: LogLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            indent: 0,
            timestamp: Utc::now(),
        }
    }

    pub fn with_indent(mut self, indent: u8) -> Self {
        self.indent = indent;
        self
    }

    /// Console form: indent, level marker, message.
    pub fn render(&self) -> String {
        let indent = "   ".repeat(self.indent as usize);
        format!("{}{} {}", indent, self.level.prefix(), self.message)
    }
}

/// Global log broadcaster
pub static LOG_BROADCASTER: Lazy<LogBroadcaster> = Lazy::new(LogBroadcaster::new);

/// Writes log entries to a console sink and forwards them to subscribers.
pub struct LogBroadcaster {
    sender: broadcast::Sender<LogEntry>,
    console: Mutex<Box<dyn Write + Send>>,
}

impl LogBroadcaster {
    /// Broadcaster writing to stderr.
    pub fn new() -> Self {
        Self::with_console(io::stderr())
    }

    /// Broadcaster writing console lines to `console` instead of stderr.
    pub fn with_console(console: impl Write + Send + 'static) -> Self {
        let (sender, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self {
            sender,
            console: Mutex::new(Box::new(console)),
        }
    }

    pub fn log(&self, entry: LogEntry) {
        if let Ok(mut console) = self.console.lock() {
            let _ = writeln!(console, "{}", entry.render());
        }

        // No subscribers is fine
        let _ = self.sender.send(entry);
    }

    /// Get a receiver for SSE streaming
    pub fn subscribe(&self) -> broadcast::Receiver<LogEntry> {
        self.sender.subscribe()
    }
}

impl Default for LogBroadcaster {
    fn default() -> Self {
        Self::new()
    }
}

pub fn log_info(msg: impl Into<String>) {
    LOG_BROADCASTER.log(LogEntry::new(LogLevel::Info, msg));
}

pub fn log_success(msg: impl Into<String>) {
    LOG_BROADCASTER.log(LogEntry::new(LogLevel::Success, msg));
}

pub fn log_warning(msg: impl Into<String>) {
    LOG_BROADCASTER.log(LogEntry::new(LogLevel::Warning, msg));
}

pub fn log_error(msg: impl Into<String>) {
    LOG_BROADCASTER.log(LogEntry::new(LogLevel::Error, msg));
}

pub fn log_info_indent(msg: impl Into<String>, indent: u8) {
    LOG_BROADCASTER.log(LogEntry::new(LogLevel::Info, msg).with_indent(indent));
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::sync::Arc;

    /// In-memory console sink shared with the test.
    #[derive(Clone, Default)]
    pub(crate) struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

    impl SharedBuffer {
        pub(crate) fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    impl Write for SharedBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_console_sink_receives_rendered_line() {
        let buffer = SharedBuffer::default();
        let broadcaster = LogBroadcaster::with_console(buffer.clone());

        broadcaster.log(LogEntry::new(LogLevel::Warning, "Skipping row 3"));

        assert_eq!(buffer.contents(), "   ⚠️ Skipping row 3\n");
    }

    #[test]
    fn test_render_indent() {
        let entry = LogEntry::new(LogLevel::Warning, "Skipping row 3").with_indent(1);
        assert_eq!(entry.render(), "      ⚠️ Skipping row 3");
    }

    #[test]
    fn test_serialized_shape() {
        let json = serde_json::to_value(LogEntry::new(LogLevel::Success, "done")).unwrap();
        assert_eq!(json["level"], "success");
        assert_eq!(json["message"], "done");
        assert_eq!(json["indent"], 0);
        assert!(json["timestamp"].is_string());
    }

    #[test]
    fn test_subscriber_receives_entries() {
        let broadcaster = LogBroadcaster::new();
        let mut rx = broadcaster.subscribe();

        broadcaster.log(LogEntry::new(LogLevel::Info, "hello"));

        let entry = rx.try_recv().unwrap();
        assert_eq!(entry.level, LogLevel::Info);
        assert_eq!(entry.message, "hello");
    }

    #[test]
    fn test_log_without_subscribers() {
        // Must not panic or block.
        LogBroadcaster::new().log(LogEntry::new(LogLevel::Error, "nobody listening"));
    }
}
