//! Bounded log history shown in the monitor's log pane.

use std::collections::VecDeque;

/// Number of log lines kept for display.
pub const LOG_CAPACITY: usize = 8;

/// Severity of a log-pane entry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogLevel {
    #[default]
    Info,
    Success,
    Warn,
    Error,
}

impl LogLevel {
    /// Upper-case name used in the session log file.
    pub fn as_str(self) -> &'static str {
        match self {
            LogLevel::Info => "INFO",
            LogLevel::Success => "SUCCESS",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
        }
    }
}

/// A formatted log-pane line together with its severity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogLine {
    pub level: LogLevel,
    pub text: String,
}

/// Fixed-capacity FIFO of log lines. Pushing onto a full ring evicts the
/// oldest line.
#[derive(Debug, Clone)]
pub struct LogRing {
    lines: VecDeque<LogLine>,
    capacity: usize,
}

impl LogRing {
    pub fn new(capacity: usize) -> Self {
        Self {
            lines: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn push(&mut self, line: LogLine) {
        if self.capacity == 0 {
            return;
        }
        if self.lines.len() == self.capacity {
            self.lines.pop_front();
        }
        self.lines.push_back(line);
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Lines from oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &LogLine> {
        self.lines.iter()
    }

    #[cfg(test)]
    pub fn last(&self) -> Option<&LogLine> {
        self.lines.back()
    }
}

impl Default for LogRing {
    fn default() -> Self {
        Self::new(LOG_CAPACITY)
    }
}
