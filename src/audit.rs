//! Audit logging of command invocations.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;

use crate::cli::{Command, Execution};
use crate::dialect::Dialect;

/// Longest input summary kept in a log entry.
const MAX_SUMMARY_LEN: usize = 200;

/// An audit log entry.
#[derive(Debug, Serialize)]
pub struct AuditEntry {
    /// Timestamp of the event.
    pub timestamp: DateTime<Utc>,
    /// Subcommand that ran.
    pub command: &'static str,
    /// Dialect used.
    pub mode: Dialect,
    /// Number of tokens produced.
    pub tokens: usize,
    /// Start of the processed input.
    pub summary: String,
}

impl AuditEntry {
    pub fn new(command: Command, execution: &Execution) -> Self {
        Self {
            timestamp: Utc::now(),
            command: command.name(),
            mode: execution.dialect,
            tokens: execution.tokens,
            summary: truncate_string(&execution.input, MAX_SUMMARY_LEN),
        }
    }
}

/// Truncate to at most `max_len` bytes on a char boundary, marking the cut with `...`.
fn truncate_string(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        return s.to_string();
    }
    let mut end = max_len - 3;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &s[..end])
}

/// Audit logger for writing entries to a file.
pub struct AuditLogger {
    file: File,
}

impl AuditLogger {
    /// Open or create an audit log file.
    pub fn open(path: &Path) -> std::io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self { file })
    }

    /// Write an audit entry to the log.
    pub fn log(&mut self, entry: &AuditEntry) -> std::io::Result<()> {
        let json = serde_json::to_string(entry)?;
        writeln!(self.file, "{}", json)?;
        self.file.flush()
    }

    /// Open `path` and log a single finished command.
    pub fn append(path: &Path, command: Command, execution: &Execution) -> std::io::Result<()> {
        Self::open(path)?.log_execution(command, execution)
    }

    /// Log a finished command.
    pub fn log_execution(&mut self, command: Command, execution: &Execution) -> std::io::Result<()> {
        self.log(&AuditEntry::new(command, execution))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    fn execution(input: &str, tokens: usize) -> Execution {
        Execution {
            output: None,
            input: input.to_string(),
            tokens,
            dialect: Dialect::Posix,
        }
    }

    #[test]
    fn test_audit_entry() {
        let entry = AuditEntry::new(Command::Split, &execution("ls -la", 2));
        assert_eq!(entry.command, "split");
        assert_eq!(entry.mode, Dialect::Posix);
        assert_eq!(entry.tokens, 2);
        assert_eq!(entry.summary, "ls -la");
    }

    #[test]
    fn test_audit_logger() {
        let temp_file = NamedTempFile::new().unwrap();
        let mut logger = AuditLogger::open(temp_file.path()).unwrap();

        logger
            .log_execution(Command::Quote, &execution("a b", 1))
            .unwrap();
        logger
            .log_execution(Command::Split, &execution("a b", 2))
            .unwrap();

        let content = std::fs::read_to_string(temp_file.path()).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);
        let first: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first["command"], "quote");
        assert_eq!(first["mode"], "posix");
        assert_eq!(first["tokens"], 1);
        assert!(first["timestamp"].is_string());
    }

    #[test]
    fn test_append_to_directory_fails() {
        let dir = tempfile::TempDir::new().unwrap();
        let result = AuditLogger::append(dir.path(), Command::Split, &execution("a", 1));
        assert!(result.is_err());
    }

    #[test]
    fn test_append_creates_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("audit.log");
        AuditLogger::append(&path, Command::Split, &execution("a b", 2)).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("\"tokens\":2"));
    }

    #[test]
    fn test_truncate_summary() {
        let long_input = "a".repeat(300);
        let entry = AuditEntry::new(Command::Split, &execution(&long_input, 1));
        assert!(entry.summary.len() <= MAX_SUMMARY_LEN);
        assert!(entry.summary.ends_with("..."));
    }

    #[test]
    fn test_truncate_respects_char_boundary() {
        let input = "é".repeat(150);
        let summary = truncate_string(&input, MAX_SUMMARY_LEN);
        assert!(summary.len() <= MAX_SUMMARY_LEN);
        assert!(summary.ends_with("..."));
    }
}
