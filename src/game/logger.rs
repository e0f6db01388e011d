//! Centralized game logger
//!
//! Every engine message goes through here. Output can go to stdout, to a
//! bounded in-memory buffer of recent entries (what a presentation layer
//! reads), or both.

use serde::{Deserialize, Serialize};
use std::cell::{Ref, RefCell};
use std::collections::VecDeque;
use std::ops::Deref;

/// Default number of entries kept in memory
pub const DEFAULT_LOG_CAPACITY: usize = 200;

/// Verbosity level for game output
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub enum VerbosityLevel {
    /// Silent - no output during game
    Silent = 0,
    /// Minimal - only game outcome
    Minimal = 1,
    /// Normal - turns, phases, and key actions (default)
    #[default]
    Normal = 2,
    /// Verbose - all actions, rejections and state changes
    Verbose = 3,
}

/// Output destination for log messages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum OutputMode {
    /// Output only to stdout (default)
    #[default]
    Stdout,
    /// Capture only to in-memory buffer (no stdout)
    Memory,
    /// Both stdout and in-memory buffer
    Both,
}

/// A log entry with owned strings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    pub level: VerbosityLevel,
    pub message: String,
}

/// Read-only access to captured log entries
pub struct LogGuard<'a> {
    guard: Ref<'a, VecDeque<LogEntry>>,
}

impl<'a> Deref for LogGuard<'a> {
    type Target = VecDeque<LogEntry>;

    fn deref(&self) -> &Self::Target {
        &self.guard
    }
}

/// Centralized logger
///
/// Logging methods take `&self` so read-only code paths (views, listeners
/// that only report) can log too.
pub struct GameLogger {
    verbosity: VerbosityLevel,
    output_mode: OutputMode,
    capacity: usize,
    log_buffer: RefCell<VecDeque<LogEntry>>,
}

impl GameLogger {
    /// Create a new logger with default verbosity (Normal)
    pub fn new() -> Self {
        Self::with_verbosity(VerbosityLevel::default())
    }

    /// Create a logger with specified verbosity
    pub fn with_verbosity(verbosity: VerbosityLevel) -> Self {
        GameLogger {
            verbosity,
            output_mode: OutputMode::default(),
            capacity: DEFAULT_LOG_CAPACITY,
            log_buffer: RefCell::new(VecDeque::with_capacity(DEFAULT_LOG_CAPACITY)),
        }
    }

    /// Set output mode (Stdout, Memory, or Both)
    pub fn set_output_mode(&mut self, mode: OutputMode) {
        self.output_mode = mode;
    }

    /// Capture to memory only (suppresses stdout)
    pub fn enable_capture(&mut self) {
        self.output_mode = OutputMode::Memory;
    }

    pub fn is_capturing(&self) -> bool {
        matches!(self.output_mode, OutputMode::Memory | OutputMode::Both)
    }

    /// Change how many entries are kept, evicting the oldest if needed
    pub fn set_capacity(&mut self, capacity: usize) {
        self.capacity = capacity.max(1);
        let buffer = self.log_buffer.get_mut();
        while buffer.len() > self.capacity {
            buffer.pop_front();
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn verbosity(&self) -> VerbosityLevel {
        self.verbosity
    }

    /// Captured entries, oldest first
    pub fn logs(&self) -> LogGuard<'_> {
        LogGuard {
            guard: self.log_buffer.borrow(),
        }
    }

    /// The last `n` captured messages, oldest first
    pub fn recent(&self, n: usize) -> Vec<String> {
        let buffer = self.log_buffer.borrow();
        let skip = buffer.len().saturating_sub(n);
        buffer.iter().skip(skip).map(|e| e.message.clone()).collect()
    }

    /// Print buffered logs the verbosity allows, then clear the buffer
    pub fn flush_buffer(&mut self) {
        for entry in self.log_buffer.get_mut().drain(..) {
            if entry.level <= self.verbosity {
                Self::log_to_stdout(entry.level, &entry.message);
            }
        }
    }

    #[inline]
    fn log_to_stdout(level: VerbosityLevel, message: &str) {
        if level == VerbosityLevel::Minimal {
            println!("{}", message);
        } else {
            println!("  {}", message);
        }
    }

    fn log(&self, level: VerbosityLevel, message: &str) {
        let should_capture = self.is_capturing();
        let should_output = matches!(self.output_mode, OutputMode::Stdout | OutputMode::Both);

        // Early exit if message won't be used
        if level > self.verbosity && !should_capture {
            return;
        }

        if should_capture {
            let mut buffer = self.log_buffer.borrow_mut();
            if buffer.len() >= self.capacity {
                buffer.pop_front();
            }
            buffer.push_back(LogEntry {
                level,
                message: message.to_string(),
            });
        }

        if should_output && level <= self.verbosity {
            Self::log_to_stdout(level, message);
        }
    }

    /// Log at Minimal level
    #[inline]
    pub fn minimal(&self, message: &str) {
        self.log(VerbosityLevel::Minimal, message);
    }

    /// Log at Normal level
    #[inline]
    pub fn normal(&self, message: &str) {
        self.log(VerbosityLevel::Normal, message);
    }

    /// Log at Verbose level
    #[inline]
    pub fn verbose(&self, message: &str) {
        self.log(VerbosityLevel::Verbose, message);
    }
}

impl Default for GameLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for GameLogger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameLogger")
            .field("verbosity", &self.verbosity)
            .field("output_mode", &self.output_mode)
            .field("log_count", &self.log_buffer.borrow().len())
            .finish()
    }
}
