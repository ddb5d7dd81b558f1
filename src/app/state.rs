use tracing::warn;

use super::*;

impl App {
    pub fn new(settings: Settings) -> Self {
        let theme_mode = settings.theme;
        Self {
            brew: Brew::from_command_line(&settings.brew),
            icons_ascii: settings.ascii_icons,
            settings,
            started_at: Instant::now(),
            last_refresh: Instant::now(),
            status: "Ready".to_string(),
            toast: None,
            theme_mode,
            theme: Theme::for_mode(theme_mode),
            input_mode: InputMode::Normal,
            focus_panel: FocusedPanel::Candidates,
            search_query: String::new(),
            catalog: Vec::new(),
            pending_catalog: false,
            candidates: Vec::new(),
            candidate_source: CandidateSource::Recommended,
            candidates_selected: None,
            pending_search: None,
            installed: Vec::new(),
            installed_selected: None,
            pending_installed: false,
            installed_refresh_queued: false,
            last_installed_refresh: None,
            tasks: TaskRegistry::new(),
            tasks_selected: None,
            info_cache: LruCache::new(
                NonZeroUsize::new(INFO_CACHE_CAPACITY).unwrap_or(NonZeroUsize::MIN),
            ),
            pending_info: None,
            stale_info: None,
            popup: None,
            needs_redraw: true,
            screen_height: DEFAULT_SCREEN_HEIGHT,
        }
    }

    pub fn on_tick(&mut self) {
        // Running tasks show elapsed time
        if self.tasks.running_count() > 0 {
            self.needs_redraw = true;
        }

        let viewing_log = matches!(self.popup, Some(Popup::Log { .. }));
        if !viewing_log
            && self
                .tasks
                .prune_expired(self.settings.finished_linger(), self.settings.failed_linger())
        {
            self.clamp_task_selection();
            self.needs_redraw = true;
        }

        if self.last_refresh.elapsed() >= Duration::from_secs(5) {
            self.last_refresh = Instant::now();
            if self.status != "Idle" {
                self.status = "Idle".to_string();
                self.needs_redraw = true;
            }
        }

        if self
            .toast
            .as_ref()
            .is_some_and(|toast| toast.created_at.elapsed() > TOAST_DURATION)
        {
            self.toast = None;
            self.needs_redraw = true;
        }
    }

    pub fn set_status(&mut self, status: impl Into<String>) {
        self.status = status.into();
        self.last_refresh = Instant::now();
        self.needs_redraw = true;
    }

    pub fn show_toast(&mut self, level: ToastLevel, message: impl Into<String>) {
        self.toast = Some(Toast {
            level,
            message: message.into(),
            created_at: Instant::now(),
        });
        self.needs_redraw = true;
    }

    pub fn show_error(&mut self, title: impl Into<String>, message: impl Into<String>) {
        let title = title.into();
        self.status = title.clone();
        self.last_refresh = Instant::now();
        self.popup = Some(Popup::Error {
            title,
            message: message.into(),
        });
        self.needs_redraw = true;
    }

    pub fn cycle_theme(&mut self) {
        self.theme_mode = self.theme_mode.next();
        self.theme = Theme::for_mode(self.theme_mode);
        self.set_status(format!("Theme: {}", self.theme_mode.label()));
    }

    pub fn cycle_focus(&mut self) {
        self.focus_panel = match self.focus_panel {
            FocusedPanel::Candidates => FocusedPanel::Tasks,
            FocusedPanel::Tasks => FocusedPanel::Installed,
            FocusedPanel::Installed => FocusedPanel::Candidates,
        };
    }

    pub fn cycle_focus_back(&mut self) {
        self.focus_panel = match self.focus_panel {
            FocusedPanel::Candidates => FocusedPanel::Installed,
            FocusedPanel::Tasks => FocusedPanel::Candidates,
            FocusedPanel::Installed => FocusedPanel::Tasks,
        };
    }

    pub fn toggle_help(&mut self) {
        self.popup = match self.popup {
            Some(Popup::Help { .. }) => None,
            _ => Some(Popup::Help { scroll: 0 }),
        };
    }

    pub fn close_popup(&mut self) {
        self.popup = None;
        if let Some(pkg) = self.stale_info.take() {
            self.info_cache.pop(&pkg);
        }
        self.needs_redraw = true;
    }

    pub fn open_selected_log(&mut self) {
        let Some(pkg) = self.selected_task().map(|task| task.pkg().to_string()) else {
            self.set_status("No install task selected");
            return;
        };
        // Start at the tail, where the latest output is.
        self.popup = Some(Popup::Log { pkg, scroll: 0 });
        self.scroll_popup(isize::MAX);
        self.needs_redraw = true;
    }

    /// Copies the raw `brew info` text shown in the info popup.
    pub fn copy_info(&mut self) {
        let Some(Popup::Info { pkg, .. }) = self.popup.as_ref() else {
            return;
        };
        let pkg = pkg.clone();
        let Some(raw) = self.info_cache.peek(&pkg).map(|info| info.raw.clone()) else {
            self.set_status(format!("No info loaded for {pkg}"));
            return;
        };

        match crate::clipboard::copy_text(&raw) {
            Ok(()) => {
                self.set_status(format!("Copied info for {pkg}"));
                self.show_toast(ToastLevel::Success, format!("Copied info for {pkg}"));
            }
            Err(err) => {
                warn!(%pkg, error = %err, "clipboard copy failed");
                self.set_status("Clipboard copy failed");
                self.show_toast(ToastLevel::Error, format!("Clipboard copy failed: {err:#}"));
            }
        }
    }

    pub fn dismiss_selected_task(&mut self) {
        let Some(index) = self.tasks_selected else {
            self.set_status("No install task selected");
            return;
        };
        match self.tasks.dismiss(index) {
            Some(task) => {
                self.clamp_task_selection();
                self.set_status(format!("Dismissed {}", task.pkg()));
            }
            None => self.set_status("Running installs cannot be dismissed"),
        }
    }

    /// Lines of scrollable content in the open popup.
    pub fn popup_content_len(&self) -> usize {
        match &self.popup {
            Some(Popup::Info { pkg, .. }) => self
                .info_cache
                .peek(pkg)
                .map(PackageInfo::display_height)
                .unwrap_or(0),
            Some(Popup::Log { pkg, .. }) => self
                .tasks
                .get(pkg)
                .map(|task| task.log_lines().len())
                .unwrap_or(0),
            Some(Popup::Help { .. }) => crate::ui::help::help_line_count(),
            _ => 0,
        }
    }

    /// Furthest scroll that still fills the popup body.
    pub fn popup_max_scroll(&self) -> usize {
        let Some(popup) = self.popup.as_ref() else {
            return 0;
        };
        let visible = crate::ui::popup::visible_rows(popup, self.screen_height);
        self.popup_content_len().saturating_sub(visible)
    }

    pub fn scroll_popup(&mut self, delta: isize) {
        let max = self.popup_max_scroll();
        if let Some(scroll) = self.popup.as_mut().and_then(Popup::scroll_mut) {
            *scroll = scroll.saturating_add_signed(delta).min(max);
            self.needs_redraw = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::TaskOutcome;

    fn app_with_log(lines: usize, screen_height: u16) -> App {
        let mut app = App::new(Settings::default());
        app.screen_height = screen_height;
        assert!(app.tasks.try_start("wget", 200));
        let task = app.tasks.get_mut("wget").unwrap();
        for idx in 0..lines {
            task.apply_output(format!("logline-{idx:02}"), 10);
        }
        app.tasks_selected = Some(0);
        app
    }

    fn log_scroll(app: &App) -> usize {
        match app.popup {
            Some(Popup::Log { scroll, .. }) => scroll,
            ref other => panic!("expected log popup, got {other:?}"),
        }
    }

    #[test]
    fn short_log_opens_at_the_top() {
        let mut app = app_with_log(30, 50);
        app.open_selected_log();
        assert_eq!(log_scroll(&app), 0);

        app.scroll_popup(isize::MAX);
        assert_eq!(log_scroll(&app), 0);
    }

    #[test]
    fn long_log_opens_with_the_last_page_visible() {
        // 50 rows: a 40 row popup with 38 rows of body
        let mut app = app_with_log(100, 50);
        app.open_selected_log();
        assert_eq!(log_scroll(&app), 62);

        app.scroll_popup(5);
        assert_eq!(log_scroll(&app), 62);
        app.scroll_popup(-10);
        assert_eq!(log_scroll(&app), 52);
        app.scroll_popup(isize::MIN);
        assert_eq!(log_scroll(&app), 0);
    }

    #[test]
    fn smaller_screens_allow_more_scrolling() {
        // 20 rows: popup shrinks to 16 rows, 14 of body
        let mut app = app_with_log(30, 20);
        app.open_selected_log();
        assert_eq!(log_scroll(&app), 16);
    }

    #[test]
    fn finished_tasks_leave_after_their_linger() {
        let mut app = App::new(Settings {
            finished_linger_secs: 0,
            failed_linger_secs: 0,
            ..Settings::default()
        });
        assert!(app.tasks.try_start("bogus-xyz", 200));
        app.tasks
            .get_mut("bogus-xyz")
            .unwrap()
            .finish(TaskOutcome::Exited(1));
        app.tasks_selected = Some(0);

        app.open_selected_log();
        app.on_tick();
        assert_eq!(app.tasks.len(), 1);

        app.close_popup();
        app.on_tick();
        assert!(app.tasks.is_empty());
        assert_eq!(app.tasks_selected, None);
    }
}
