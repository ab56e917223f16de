use crate::domain::logging::{LogEntry, LogLevel, Logger, TimeProvider, get_time_provider};
use crate::domain::market_data::IndexPicker;
use std::sync::Mutex;

/// Console logger implementation for WASM environment
pub struct ConsoleLogger {
    min_level: LogLevel,
}

impl ConsoleLogger {
    pub fn new(min_level: LogLevel) -> Self {
        Self { min_level }
    }
}

impl Logger for ConsoleLogger {
    fn log(&self, entry: LogEntry) {
        if entry.level < self.min_level {
            return;
        }
        let formatted = wasm_bindgen::JsValue::from(entry.format());
        match entry.level {
            LogLevel::Trace | LogLevel::Debug => web_sys::console::debug_1(&formatted),
            LogLevel::Info => web_sys::console::info_1(&formatted),
            LogLevel::Warn => web_sys::console::warn_1(&formatted),
            LogLevel::Error => web_sys::console::error_1(&formatted),
        }
    }
}

/// Keeps formatted lines in memory; handy for asserting on log output.
#[derive(Default)]
pub struct MemoryLogger {
    lines: Mutex<Vec<(LogLevel, String)>>,
}

impl MemoryLogger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<(LogLevel, String)> {
        self.lines.lock().map(|lines| lines.clone()).unwrap_or_default()
    }

    pub fn contains(&self, level: LogLevel, needle: &str) -> bool {
        self.lines().iter().any(|(l, line)| *l == level && line.contains(needle))
    }
}

impl Logger for MemoryLogger {
    fn log(&self, entry: LogEntry) {
        if let Ok(mut lines) = self.lines.lock() {
            lines.push((entry.level, entry.format()));
        }
    }
}

/// Wall clock backed by `Date.now()`
#[derive(Default)]
pub struct BrowserTimeProvider;

impl BrowserTimeProvider {
    pub fn new() -> Self {
        Self
    }
}

impl TimeProvider for BrowserTimeProvider {
    fn current_timestamp(&self) -> u64 {
        js_sys::Date::now() as u64
    }

    fn format_timestamp(&self, timestamp: u64) -> String {
        let date = js_sys::Date::new(&(timestamp as f64).into());
        format!(
            "{:02}:{:02}:{:02}.{:03}",
            date.get_hours(),
            date.get_minutes(),
            date.get_seconds(),
            date.get_milliseconds()
        )
    }
}

/// Milliseconds since the epoch from whichever clock is installed.
pub fn now_ms() -> u64 {
    get_time_provider().current_timestamp()
}

/// `Math.random()` based picker
#[derive(Debug, Default, Clone, Copy)]
pub struct JsRandomPicker;

impl IndexPicker for JsRandomPicker {
    fn pick(&mut self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        ((js_sys::Math::random() * len as f64) as usize).min(len - 1)
    }
}

/// Deterministic picker cycling through a fixed list of choices.
#[derive(Debug, Clone)]
pub struct FixedPicker {
    choices: Vec<usize>,
    cursor: usize,
}

impl FixedPicker {
    pub fn new(choices: Vec<usize>) -> Self {
        Self { choices, cursor: 0 }
    }
}

impl IndexPicker for FixedPicker {
    fn pick(&mut self, len: usize) -> usize {
        if len == 0 || self.choices.is_empty() {
            return 0;
        }
        let choice = self.choices[self.cursor % self.choices.len()];
        self.cursor += 1;
        choice % len
    }
}
