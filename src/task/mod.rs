//! Install tasks: one streaming `brew install` per package, a capped log of
//! its output and a heuristic progress bar.

mod progress;
mod registry;
mod worker;

use std::collections::VecDeque;
use std::time::Instant;

pub use progress::{COMPLETE, KeywordScorer, ProgressMeter, ProgressScorer, RUNNING_CEILING};
pub use registry::TaskRegistry;
pub use worker::run_install;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TaskStatus {
    Running,
    Succeeded,
    Failed,
    Errored,
}

impl TaskStatus {
    pub fn label(self) -> &'static str {
        match self {
            Self::Running => "Installing",
            Self::Succeeded => "Succeeded",
            Self::Failed => "Failed",
            Self::Errored => "Errored",
        }
    }

    pub fn is_terminal(self) -> bool {
        !matches!(self, Self::Running)
    }
}

/// How the install process ended.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TaskOutcome {
    Exited(i32),
    Errored(String),
}

/// Published by install workers onto the app's event queue.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TaskEvent {
    Output {
        pkg: String,
        line: String,
        progress: u8,
    },
    Finished {
        pkg: String,
        outcome: TaskOutcome,
    },
}

impl TaskEvent {
    pub fn pkg(&self) -> &str {
        match self {
            Self::Output { pkg, .. } | Self::Finished { pkg, .. } => pkg,
        }
    }
}

#[derive(Debug)]
pub struct InstallTask {
    pkg: String,
    log: VecDeque<String>,
    log_cap: usize,
    progress: u8,
    status: TaskStatus,
    started_at: Instant,
    finished_at: Option<Instant>,
}

impl InstallTask {
    pub fn new(pkg: impl Into<String>, log_cap: usize) -> Self {
        let log_cap = log_cap.max(1);
        Self {
            pkg: pkg.into(),
            log: VecDeque::with_capacity(log_cap.min(256)),
            log_cap,
            progress: 0,
            status: TaskStatus::Running,
            started_at: Instant::now(),
            finished_at: None,
        }
    }

    pub fn pkg(&self) -> &str {
        &self.pkg
    }

    pub fn status(&self) -> TaskStatus {
        self.status
    }

    pub fn is_running(&self) -> bool {
        self.status == TaskStatus::Running
    }

    pub fn progress(&self) -> u8 {
        self.progress
    }

    pub fn started_at(&self) -> Instant {
        self.started_at
    }

    pub fn finished_at(&self) -> Option<Instant> {
        self.finished_at
    }

    pub fn log_lines(&self) -> impl ExactSizeIterator<Item = &str> + DoubleEndedIterator {
        self.log.iter().map(String::as_str)
    }

    pub fn last_line(&self) -> Option<&str> {
        self.log.back().map(String::as_str)
    }

    /// Records one output line. Ignored once the task has finished.
    pub fn apply_output(&mut self, line: String, progress: u8) {
        if !self.is_running() {
            return;
        }
        self.push_log(line);
        self.progress = self.progress.max(progress.min(RUNNING_CEILING));
    }

    /// Moves to a terminal status; later calls leave the first result alone.
    pub fn finish(&mut self, outcome: TaskOutcome) -> TaskStatus {
        if !self.is_running() {
            return self.status;
        }

        self.status = match outcome {
            TaskOutcome::Exited(0) => TaskStatus::Succeeded,
            TaskOutcome::Exited(_) => TaskStatus::Failed,
            TaskOutcome::Errored(message) => {
                self.push_log(format!("Exception: {message}"));
                TaskStatus::Errored
            }
        };
        self.progress = COMPLETE;
        self.finished_at = Some(Instant::now());
        self.status
    }

    fn push_log(&mut self, line: String) {
        while self.log.len() >= self.log_cap {
            self.log.pop_front();
        }
        self.log.push_back(line);
    }
}
