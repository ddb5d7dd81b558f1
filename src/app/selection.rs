use super::*;

impl App {
    pub fn selected_candidate(&self) -> Option<&str> {
        let selected = self.candidates_selected?;
        self.candidates.get(selected).map(String::as_str)
    }

    pub fn selected_installed(&self) -> Option<&str> {
        let selected = self.installed_selected?;
        self.installed.get(selected).map(String::as_str)
    }

    pub fn selected_task(&self) -> Option<&InstallTask> {
        self.tasks.at(self.tasks_selected?)
    }

    /// Package under the cursor in the focused pane.
    pub fn selected_package_name(&self) -> Option<&str> {
        match self.focus_panel {
            FocusedPanel::Candidates => self.selected_candidate(),
            FocusedPanel::Tasks => self.selected_task().map(InstallTask::pkg),
            FocusedPanel::Installed => self.selected_installed(),
        }
    }

    pub fn select_next(&mut self) {
        match self.focus_panel {
            FocusedPanel::Candidates => {
                self.candidates_selected = next_index(self.candidates_selected, self.candidates.len());
            }
            FocusedPanel::Tasks => {
                self.tasks_selected = next_index(self.tasks_selected, self.tasks.len());
            }
            FocusedPanel::Installed => {
                self.installed_selected = next_index(self.installed_selected, self.installed.len());
            }
        }
        self.needs_redraw = true;
    }

    pub fn select_prev(&mut self) {
        match self.focus_panel {
            FocusedPanel::Candidates => {
                self.candidates_selected = prev_index(self.candidates_selected, self.candidates.len());
            }
            FocusedPanel::Tasks => {
                self.tasks_selected = prev_index(self.tasks_selected, self.tasks.len());
            }
            FocusedPanel::Installed => {
                self.installed_selected = prev_index(self.installed_selected, self.installed.len());
            }
        }
        self.needs_redraw = true;
    }

    pub(super) fn clamp_task_selection(&mut self) {
        self.tasks_selected = clamp_index(self.tasks_selected, self.tasks.len());
    }
}

fn next_index(selected: Option<usize>, len: usize) -> Option<usize> {
    if len == 0 {
        return None;
    }
    Some(match selected {
        Some(idx) => (idx + 1).min(len - 1),
        None => 0,
    })
}

fn prev_index(selected: Option<usize>, len: usize) -> Option<usize> {
    if len == 0 {
        return None;
    }
    Some(match selected {
        Some(idx) => idx.saturating_sub(1).min(len - 1),
        None => 0,
    })
}

/// Keeps a selection inside a list that was just replaced or shrunk.
pub(super) fn clamp_index(selected: Option<usize>, len: usize) -> Option<usize> {
    if len == 0 {
        return None;
    }
    Some(selected.unwrap_or(0).min(len - 1))
}

#[cfg(test)]
mod tests {
    use super::{clamp_index, next_index, prev_index};

    #[test]
    fn moves_stop_at_the_ends() {
        assert_eq!(next_index(Some(2), 3), Some(2));
        assert_eq!(next_index(None, 3), Some(0));
        assert_eq!(prev_index(Some(0), 3), Some(0));
        assert_eq!(prev_index(Some(7), 3), Some(2));
        assert_eq!(next_index(Some(1), 0), None);
    }

    #[test]
    fn clamp_follows_shrinking_lists() {
        assert_eq!(clamp_index(Some(9), 4), Some(3));
        assert_eq!(clamp_index(None, 4), Some(0));
        assert_eq!(clamp_index(Some(1), 0), None);
    }
}
