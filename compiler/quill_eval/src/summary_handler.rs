//! Where debug-mode assignment summaries go.
//!
//! In debug mode every successful `(set:)`, `(put:)` or `(move:)` reports
//! what it changed (`$x is now 1; $y is now 2`). The handler decides whether
//! that line is printed, captured for inspection, or dropped.

use std::sync::Arc;

use parking_lot::Mutex;

/// Captures summary lines in memory.
pub struct BufferSummaryHandler {
    buffer: Mutex<Vec<String>>,
}

impl BufferSummaryHandler {
    pub fn new() -> Self {
        BufferSummaryHandler {
            buffer: Mutex::new(Vec::new()),
        }
    }

    pub fn line(&self, summary: &str) {
        self.buffer.lock().push(summary.to_string());
    }

    /// Every captured line, oldest first.
    pub fn lines(&self) -> Vec<String> {
        self.buffer.lock().clone()
    }

    pub fn clear(&self) {
        self.buffer.lock().clear();
    }
}

impl Default for BufferSummaryHandler {
    fn default() -> Self {
        Self::new()
    }
}

/// Summary handler, dispatched by variant.
pub enum SummaryHandlerImpl {
    /// Prints each line to stdout.
    Stdout,
    /// Captures lines (tests, embedding hosts).
    Buffer(BufferSummaryHandler),
    /// Drops everything.
    Silent,
}

impl SummaryHandlerImpl {
    pub fn line(&self, summary: &str) {
        match self {
            Self::Stdout => println!("{summary}"),
            Self::Buffer(h) => h.line(summary),
            Self::Silent => {}
        }
    }

    /// Captured lines; empty for handlers that don't capture.
    pub fn lines(&self) -> Vec<String> {
        match self {
            Self::Buffer(h) => h.lines(),
            Self::Stdout | Self::Silent => Vec::new(),
        }
    }

    pub fn clear(&self) {
        if let Self::Buffer(h) = self {
            h.clear();
        }
    }
}

pub type SharedSummaryHandler = Arc<SummaryHandlerImpl>;

pub fn stdout_handler() -> SharedSummaryHandler {
    Arc::new(SummaryHandlerImpl::Stdout)
}

pub fn buffer_handler() -> SharedSummaryHandler {
    Arc::new(SummaryHandlerImpl::Buffer(BufferSummaryHandler::new()))
}

pub fn silent_handler() -> SharedSummaryHandler {
    Arc::new(SummaryHandlerImpl::Silent)
}
