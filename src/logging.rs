//! Logging collaborator
//!
//! The trainer logs through an injected [`TrainLogger`] instead of a
//! process-wide named logger. [`LogFacade`] is the default and forwards to
//! the `log` crate; [`RecordingLogger`] captures lines in memory for tests.

use std::cell::RefCell;
use std::rc::Rc;

/// Sink for the trainer's per-epoch progress lines
pub trait TrainLogger {
    /// Emit one informational line
    fn info(&mut self, message: &str);
}

/// Default logger forwarding to the `log` facade
#[derive(Debug, Default)]
pub struct LogFacade;

impl TrainLogger for LogFacade {
    fn info(&mut self, message: &str) {
        log::info!("{message}");
    }
}

/// In-memory logger for tests
///
/// Clone a handle before handing the logger to the trainer to inspect the
/// captured lines afterwards.
#[derive(Debug, Clone, Default)]
pub struct RecordingLogger {
    lines: Rc<RefCell<Vec<String>>>,
}

impl RecordingLogger {
    pub fn new() -> Self {
        Self::default()
    }

    /// All lines logged so far
    pub fn lines(&self) -> Vec<String> {
        self.lines.borrow().clone()
    }
}

impl TrainLogger for RecordingLogger {
    fn info(&mut self, message: &str) {
        self.lines.borrow_mut().push(message.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_logger_captures_lines() {
        let logger = RecordingLogger::new();
        let mut sink = logger.clone();
        sink.info("first");
        sink.info("second");
        assert_eq!(logger.lines(), vec!["first", "second"]);
    }

    #[test]
    fn test_log_facade_does_not_panic() {
        LogFacade.info("epoch line");
    }
}
