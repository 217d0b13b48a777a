//! Logging sink for human-readable progress messages.

use std::cell::RefCell;

use console::Term;

use super::formatter;

/// Receives progress messages from the release pipeline
pub trait Logger {
    fn log(&self, message: &str);
    fn success(&self, message: &str);
    fn warn(&self, message: &str);
    fn error(&self, message: &str);
}

/// Writes styled lines to the terminal
///
/// Progress and success lines go to the chosen stream; warnings and errors
/// always go to stderr.
#[derive(Debug, Clone)]
pub struct ConsoleLogger {
    progress: Term,
}

impl ConsoleLogger {
    pub fn stdout() -> Self {
        ConsoleLogger {
            progress: Term::stdout(),
        }
    }

    /// Keeps stdout free for machine-readable output
    pub fn stderr() -> Self {
        ConsoleLogger {
            progress: Term::stderr(),
        }
    }

    fn write(term: &Term, line: &str) {
        // Write failures are ignored
        let _ = term.write_line(line);
    }
}

impl Default for ConsoleLogger {
    fn default() -> Self {
        ConsoleLogger::stdout()
    }
}

impl Logger for ConsoleLogger {
    fn log(&self, message: &str) {
        Self::write(&self.progress, &formatter::status_line(message));
    }

    fn success(&self, message: &str) {
        Self::write(&self.progress, &formatter::success_line(message));
    }

    fn warn(&self, message: &str) {
        Self::write(&Term::stderr(), &formatter::warning_line(message));
    }

    fn error(&self, message: &str) {
        Self::write(&Term::stderr(), &formatter::error_line(message));
    }
}

/// Keeps every message in memory, in order
#[derive(Debug, Default)]
pub struct RecordingLogger {
    lines: RefCell<Vec<String>>,
}

impl RecordingLogger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<String> {
        self.lines.borrow().clone()
    }

    /// Whether any recorded line contains `needle`
    pub fn contains(&self, needle: &str) -> bool {
        self.lines.borrow().iter().any(|line| line.contains(needle))
    }

    fn record(&self, level: &str, message: &str) {
        self.lines.borrow_mut().push(format!("{} {}", level, message));
    }
}

impl Logger for RecordingLogger {
    fn log(&self, message: &str) {
        self.record("[log]", message);
    }

    fn success(&self, message: &str) {
        self.record("[success]", message);
    }

    fn warn(&self, message: &str) {
        self.record("[warn]", message);
    }

    fn error(&self, message: &str) {
        self.record("[error]", message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_logger_keeps_order_and_level() {
        let logger = RecordingLogger::new();
        logger.log("first");
        logger.warn("second");

        assert_eq!(logger.lines(), vec!["[log] first", "[warn] second"]);
        assert!(logger.contains("second"));
        assert!(!logger.contains("third"));
    }

    #[test]
    fn test_console_logger_prints() {
        // Visual verification test - output is printed to stdout/stderr
        let logger = ConsoleLogger::default();
        logger.log("status");
        logger.success("done");
        ConsoleLogger::stderr().error("failed");
    }
}
