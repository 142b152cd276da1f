// src/progress.rs
/// Lightweight progress reporting for the two pipeline stages (fetch/parse).
/// Frontends (GUI/CLI) implement this to surface status to users.
/// Each stage gets its own sink, so implementations only need `Send`.
pub trait Progress: Send {
    /// Called at the start with the total number of items.
    fn begin(&mut self, _total: usize) {}

    /// Free-form status line for human eyes.
    fn log(&mut self, _msg: &str) {}

    /// One entity reached a successful terminal state (cached / skeleton written).
    fn item_done(&mut self, _name: &str) {}

    /// One entity reached a failed or unsupported terminal state.
    fn item_failed(&mut self, _name: &str, _reason: &str) {}

    /// Called at the end, successful or not.
    fn finish(&mut self) {}
}

/// A no-op progress sink.
pub struct NullProgress;
impl Progress for NullProgress {}

/// Counts outcomes; handy for tests and summaries.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CountingProgress {
    pub total: usize,
    pub done: Vec<String>,
    pub failed: Vec<String>,
    pub finished: bool,
}

impl Progress for CountingProgress {
    fn begin(&mut self, total: usize) {
        self.total = total;
    }
    fn item_done(&mut self, name: &str) {
        self.done.push(s!(name));
    }
    fn item_failed(&mut self, name: &str, _reason: &str) {
        self.failed.push(s!(name));
    }
    fn finish(&mut self) {
        self.finished = true;
    }
}
