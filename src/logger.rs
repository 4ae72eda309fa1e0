//! Custom logging module.
//!
//! This module provides a custom logger implementation that captures log entries
//! and forwards them to a callback, which the application points at the
//! `LogBuffer` drawn in the log region.

use crate::error::{AppError, AppResult};
use log::{Level, LevelFilter, Log, Metadata, Record};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, PoisonError};

/// Format a log record into a string for display
///
pub fn format_log(record: &Record) -> String {
    let timestamp = chrono::Utc::now().format("%Y-%m-%d %H:%M:%S%.3f");
    let level_str = match record.level() {
        Level::Error => "ERROR",
        Level::Warn => "WARN",
        Level::Info => "INFO",
        Level::Debug => "DEBUG",
        Level::Trace => "TRACE",
    };
    format!("{} {} {}", timestamp, level_str, record.args())
}

type LogCallback = Box<dyn Fn(Level, String) + Send + Sync>;

/// Custom logger that forwards formatted records to a callback
///
pub struct CustomLogger {
    level: LevelFilter,
    log_callback: Arc<Mutex<Option<LogCallback>>>,
}

impl CustomLogger {
    pub fn new(level: LevelFilter) -> Self {
        CustomLogger {
            level,
            log_callback: Arc::new(Mutex::new(None)),
        }
    }

    pub fn set_log_callback(&self, callback: LogCallback) {
        if let Ok(mut guard) = self.log_callback.lock() {
            *guard = Some(callback);
        }
    }

    /// Install as the global logger.
    ///
    pub fn init(self) -> AppResult<()> {
        let level = self.level;
        log::set_boxed_logger(Box::new(self)).map_err(|e| AppError::Logger(e.to_string()))?;
        log::set_max_level(level);
        Ok(())
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            if let Ok(callback) = self.log_callback.lock() {
                if let Some(ref cb) = *callback {
                    cb(record.level(), format_log(record));
                }
            }
        }
    }

    fn flush(&self) {}
}

/// Number of entries kept for the log region.
///
pub const LOG_CAPACITY: usize = 200;

/// A formatted record and its level.
///
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LogEntry {
    pub level: Level,
    pub line: String,
}

/// Most recent log entries, shared between the logger and the log region.
///
#[derive(Clone, Default)]
pub struct LogBuffer {
    entries: Arc<Mutex<VecDeque<LogEntry>>>,
}

impl LogBuffer {
    /// Append an entry, dropping the oldest once `LOG_CAPACITY` is reached.
    ///
    pub fn push(&self, level: Level, line: String) {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        if entries.len() == LOG_CAPACITY {
            entries.pop_front();
        }
        entries.push_back(LogEntry { level, line });
    }

    /// Return a copy of the kept entries, oldest first.
    ///
    pub fn entries(&self) -> Vec<LogEntry> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(level: Level, logger: &CustomLogger) {
        logger.log(
            &Record::builder()
                .level(level)
                .args(format_args!("request failed"))
                .build(),
        );
    }

    #[test]
    fn format_includes_level_and_message() {
        let line = format_log(
            &Record::builder()
                .level(Level::Warn)
                .args(format_args!("hello"))
                .build(),
        );
        assert!(line.ends_with("WARN hello"));
    }

    #[test]
    fn forwards_enabled_records_with_level() {
        let buffer = LogBuffer::default();
        let logger = CustomLogger::new(LevelFilter::Warn);
        let sink = buffer.clone();
        logger.set_log_callback(Box::new(move |level, line| sink.push(level, line)));

        record(Level::Error, &logger);
        record(Level::Info, &logger);

        let entries = buffer.entries();
        assert_eq!(1, entries.len());
        assert_eq!(Level::Error, entries[0].level);
        assert!(entries[0].line.contains("ERROR request failed"));
    }

    #[test]
    fn buffer_keeps_most_recent_entries() {
        let buffer = LogBuffer::default();
        for i in 0..LOG_CAPACITY + 5 {
            buffer.push(Level::Info, format!("entry {}", i));
        }
        let entries = buffer.entries();
        assert_eq!(LOG_CAPACITY, entries.len());
        assert_eq!("entry 5", entries[0].line);
        assert_eq!(format!("entry {}", LOG_CAPACITY + 4), entries[LOG_CAPACITY - 1].line);
    }

    #[test]
    fn without_callback_records_are_dropped() {
        let logger = CustomLogger::new(LevelFilter::Trace);
        record(Level::Error, &logger);
    }
}
