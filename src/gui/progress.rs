// src/gui/progress.rs
use std::sync::{Arc, Mutex, MutexGuard};

use crate::progress::Progress;

/// What the worker threads publish and the UI thread draws.
#[derive(Debug, Default)]
pub struct StatusBoard {
    pub fetch: String,
    pub parse: String,
    pub log: Vec<String>,
    pub running: bool,
    max_log_lines: usize,
}

pub type SharedStatus = Arc<Mutex<StatusBoard>>;

impl StatusBoard {
    pub fn shared(max_log_lines: usize) -> SharedStatus {
        Arc::new(Mutex::new(Self {
            fetch: s!("Idle"),
            parse: s!("Idle"),
            max_log_lines,
            ..Self::default()
        }))
    }

    pub fn push_log(&mut self, line: impl Into<String>) {
        self.log.push(line.into());
        if self.log.len() > self.max_log_lines {
            let extra = self.log.len() - self.max_log_lines;
            self.log.drain(..extra);
        }
    }
}

/// A poisoned board is still readable; the worker that poisoned it is gone.
pub fn board(status: &SharedStatus) -> MutexGuard<'_, StatusBoard> {
    status.lock().unwrap_or_else(|e| e.into_inner())
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stage {
    Fetch,
    Parse,
}

impl Stage {
    fn label(self) -> &'static str {
        match self {
            Stage::Fetch => "Fetch",
            Stage::Parse => "Parse",
        }
    }
}

pub struct GuiProgress {
    status: SharedStatus,
    stage: Stage,
    done: usize,
    failed: usize,
    total: usize,
}

impl GuiProgress {
    pub fn new(status: SharedStatus, stage: Stage) -> Self {
        Self { status, stage, done: 0, failed: 0, total: 0 }
    }

    pub fn boxed(status: &SharedStatus, stage: Stage) -> Box<dyn Progress> {
        Box::new(Self::new(status.clone(), stage))
    }

    fn set_status(&self, msg: impl Into<String>) {
        let text = msg.into();
        let mut b = board(&self.status);
        match self.stage {
            Stage::Fetch => b.fetch = text,
            Stage::Parse => b.parse = text,
        }
    }

    fn counts(&self) -> String {
        format!("{}/{}", self.done + self.failed, self.total)
    }
}

impl Progress for GuiProgress {
    fn begin(&mut self, total: usize) {
        self.total = total;
        self.set_status(format!("{}: 0/{total}", self.stage.label()));
    }
    fn log(&mut self, msg: &str) {
        board(&self.status).push_log(format!("[{}] {msg}", self.stage.label()));
    }
    fn item_done(&mut self, name: &str) {
        self.done += 1;
        self.set_status(format!("{}: {} ({})", self.stage.label(), self.counts(), name));
    }
    fn item_failed(&mut self, name: &str, reason: &str) {
        self.failed += 1;
        self.log(&format!("{name}: {reason}"));
        self.set_status(format!("{}: {}", self.stage.label(), self.counts()));
    }
    fn finish(&mut self) {
        if self.total == 0 {
            self.set_status(format!("{}: complete", self.stage.label()));
        } else {
            self.set_status(format!(
                "{}: complete ({} ok, {} not ok)",
                self.stage.label(), self.done, self.failed
            ));
        }
    }
}
