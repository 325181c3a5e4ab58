//! Append-only session log file.
//!
//! Mirrors every log-pane line to a plain text file so a session can be
//! reviewed after the live view is gone. Write failures are logged at debug
//! level and otherwise ignored; the monitor never stops because of them.

use chrono::Utc;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::history::LogLevel;

/// Default file name, created in the working directory.
pub const SESSION_LOG_FILE: &str = "broadcaster-monitor.log";

pub struct SessionLog {
    file_path: PathBuf,
}

impl SessionLog {
    pub fn new(file_path: impl Into<PathBuf>) -> Self {
        Self {
            file_path: file_path.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.file_path
    }

    /// Writes the banner that separates sessions.
    pub fn begin_session(&self) {
        self.write_line(&format!(
            "\n--- New Session Started at {} ---",
            Utc::now().to_rfc3339()
        ));
    }

    /// Appends one timestamped log line.
    pub fn append(&self, level: LogLevel, message: &str) {
        self.write_line(&format!(
            "[{}] [{}] {}",
            Utc::now().to_rfc3339(),
            level.as_str(),
            message
        ));
    }

    fn write_line(&self, line: &str) {
        let result = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.file_path)
            .and_then(|mut file| writeln!(file, "{}", line));

        if let Err(e) = result {
            log::debug!(
                "Failed to append to session log file={}: {}",
                self.file_path.display(),
                e
            );
        }
    }
}
