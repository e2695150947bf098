//! Console Logger
//!
//! `log` backend that writes to the browser console on wasm32 (stderr on
//! native targets) and keeps the most recent lines in a ring buffer so the
//! UI can show them after the fact.

use std::collections::VecDeque;
use std::sync::{Mutex, OnceLock};

use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError};

/// Default number of lines retained in memory
pub const DEFAULT_CAPACITY: usize = 200;

/// Console logger with a bounded history
pub struct ConsoleLogger {
    level: LevelFilter,
    capacity: usize,
    recent: Mutex<VecDeque<String>>,
}

impl ConsoleLogger {
    pub fn new(level: LevelFilter) -> Self {
        Self::with_capacity(level, DEFAULT_CAPACITY)
    }

    pub fn with_capacity(level: LevelFilter, capacity: usize) -> Self {
        Self {
            level,
            capacity,
            recent: Mutex::new(VecDeque::with_capacity(capacity)),
        }
    }

    /// Snapshot of the retained lines, oldest first
    pub fn recent(&self) -> Vec<String> {
        match self.recent.lock() {
            Ok(lines) => lines.iter().cloned().collect(),
            Err(_) => Vec::new(),
        }
    }

    fn remember(&self, line: &str) {
        if self.capacity == 0 {
            return;
        }
        if let Ok(mut lines) = self.recent.lock() {
            while lines.len() >= self.capacity {
                lines.pop_front();
            }
            lines.push_back(line.to_string());
        }
    }
}

/// Format a record as `HH:MM:SS.mmm [LEVEL target] message`
pub fn format_record(record: &Record) -> String {
    format!(
        "{} [{} {}] {}",
        chrono::Local::now().format("%H:%M:%S%.3f"),
        record.level(),
        record.target(),
        record.args()
    )
}

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = format_record(record);
        emit(record.level(), &line);
        self.remember(&line);
    }

    fn flush(&self) {}
}

#[cfg(target_arch = "wasm32")]
fn emit(level: Level, line: &str) {
    let value = wasm_bindgen::JsValue::from_str(line);
    match level {
        Level::Error => web_sys::console::error_1(&value),
        Level::Warn => web_sys::console::warn_1(&value),
        Level::Info => web_sys::console::info_1(&value),
        Level::Debug | Level::Trace => web_sys::console::debug_1(&value),
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn emit(_level: Level, line: &str) {
    eprintln!("{}", line);
}

static INSTALLED: OnceLock<&'static ConsoleLogger> = OnceLock::new();

/// Install a leaked `ConsoleLogger` as the global logger
pub fn init(level: LevelFilter) -> Result<&'static ConsoleLogger, SetLoggerError> {
    let logger: &'static ConsoleLogger = Box::leak(Box::new(ConsoleLogger::new(level)));
    log::set_logger(logger)?;
    log::set_max_level(level);
    let _ = INSTALLED.set(logger);
    Ok(logger)
}

/// The logger installed by `init`, if any
pub fn installed() -> Option<&'static ConsoleLogger> {
    INSTALLED.get().copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn log_line(logger: &ConsoleLogger, level: Level, msg: &str) {
        logger.log(
            &Record::builder()
                .level(level)
                .target("test")
                .args(format_args!("{}", msg))
                .build(),
        );
    }

    #[test]
    fn test_level_filter() {
        let logger = ConsoleLogger::new(LevelFilter::Warn);
        log_line(&logger, Level::Info, "hidden");
        log_line(&logger, Level::Error, "shown");

        let recent = logger.recent();
        assert_eq!(recent.len(), 1);
        assert!(recent[0].ends_with("[ERROR test] shown"));
    }

    #[test]
    fn test_ring_buffer_drops_oldest() {
        let logger = ConsoleLogger::with_capacity(LevelFilter::Trace, 2);
        log_line(&logger, Level::Info, "one");
        log_line(&logger, Level::Info, "two");
        log_line(&logger, Level::Info, "three");

        let recent = logger.recent();
        assert_eq!(recent.len(), 2);
        assert!(recent[0].ends_with("two"));
        assert!(recent[1].ends_with("three"));
    }

    #[test]
    fn test_init_exposes_history() {
        let logger = init(LevelFilter::Info).unwrap();
        log::info!(target: "app", "booted");
        log::debug!(target: "app", "filtered");

        let installed = installed().unwrap();
        assert!(std::ptr::eq(logger, installed));
        let recent = installed.recent();
        assert!(recent.iter().any(|line| line.ends_with("[INFO app] booted")));
        assert!(!recent.iter().any(|line| line.contains("filtered")));
        assert!(init(LevelFilter::Info).is_err());
    }

    #[test]
    fn test_zero_capacity_keeps_nothing() {
        let logger = ConsoleLogger::with_capacity(LevelFilter::Trace, 0);
        log_line(&logger, Level::Info, "gone");
        assert!(logger.recent().is_empty());
    }
}
