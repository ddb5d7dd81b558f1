use std::time::Duration;

use super::{InstallTask, TaskStatus};

/// Install tasks in the order they were started. Holds at most one task per
/// package name.
#[derive(Debug, Default)]
pub struct TaskRegistry {
    tasks: Vec<InstallTask>,
}

impl TaskRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a new running task for `pkg`.
    ///
    /// Returns `false` and leaves the registry alone when `pkg` is already
    /// installing. A finished task of the same name is replaced.
    pub fn try_start(&mut self, pkg: &str, log_cap: usize) -> bool {
        if let Some(existing) = self.get(pkg) {
            if existing.is_running() {
                return false;
            }
            self.remove(pkg);
        }
        self.tasks.push(InstallTask::new(pkg, log_cap));
        true
    }

    pub fn get(&self, pkg: &str) -> Option<&InstallTask> {
        self.tasks.iter().find(|task| task.pkg() == pkg)
    }

    pub fn get_mut(&mut self, pkg: &str) -> Option<&mut InstallTask> {
        self.tasks.iter_mut().find(|task| task.pkg() == pkg)
    }

    pub fn at(&self, index: usize) -> Option<&InstallTask> {
        self.tasks.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &InstallTask> {
        self.tasks.iter()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn running_count(&self) -> usize {
        self.tasks.iter().filter(|task| task.is_running()).count()
    }

    pub fn remove(&mut self, pkg: &str) -> Option<InstallTask> {
        let index = self.tasks.iter().position(|task| task.pkg() == pkg)?;
        Some(self.tasks.remove(index))
    }

    /// Drops the finished task at `index`. Running tasks cannot be dismissed.
    pub fn dismiss(&mut self, index: usize) -> Option<InstallTask> {
        if self.tasks.get(index)?.is_running() {
            return None;
        }
        Some(self.tasks.remove(index))
    }

    /// Removes finished tasks once they have been on screen long enough.
    /// Failed and errored tasks get their own, usually longer, linger so
    /// their logs can still be opened.
    pub fn prune_expired(&mut self, succeeded: Duration, failed: Duration) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|task| {
            let linger = match task.status() {
                TaskStatus::Running => return true,
                TaskStatus::Succeeded => succeeded,
                TaskStatus::Failed | TaskStatus::Errored => failed,
            };
            !task.finished_at().is_some_and(|at| at.elapsed() >= linger)
        });
        self.tasks.len() != before
    }
}
