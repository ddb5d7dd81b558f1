use tracing::{debug, warn};

use super::selection::clamp_index;
use super::*;
use crate::task::TaskOutcome;

impl App {
    pub fn apply_catalog_message(&mut self, message: CatalogMessage) {
        self.pending_catalog = false;
        match message.result {
            Ok(catalog) => {
                debug!(count = catalog.len(), "catalog loaded");
                self.catalog = catalog;
                // A search typed while the catalog loaded wins over a draw.
                if self.pending_search.is_none()
                    && self.candidate_source == CandidateSource::Recommended
                {
                    self.show_recommendations();
                }
            }
            Err(err) => {
                warn!(error = %err, "catalog load failed");
                self.catalog.clear();
                self.show_error("Failed to load packages", err.to_string());
            }
        }
        self.needs_redraw = true;
    }

    pub fn apply_search_message(&mut self, message: SearchMessage) {
        if self.pending_search.as_deref() != Some(message.keyword.as_str()) {
            debug!(keyword = %message.keyword, "dropping stale search result");
            return;
        }
        self.pending_search = None;

        match message.result {
            Ok(results) => {
                self.set_status(format!(
                    "{} results for {}",
                    results.len(),
                    message.keyword
                ));
                self.candidates = results;
                self.candidates_selected = clamp_index(None, self.candidates.len());
                self.candidate_source = CandidateSource::Search(message.keyword);
            }
            Err(err) => {
                warn!(keyword = %message.keyword, error = %err, "search failed");
                self.show_error("Search failed", err.to_string());
            }
        }
    }

    pub fn apply_installed_message(&mut self, message: InstalledMessage) {
        self.pending_installed = false;
        match message.result {
            Ok(installed) => {
                self.installed = installed;
                self.installed_selected =
                    clamp_index(self.installed_selected, self.installed.len());
                self.last_installed_refresh = Some(Instant::now());
                self.set_status(format!("{} packages installed", self.installed.len()));
            }
            Err(err) => {
                warn!(error = %err, "installed list failed");
                self.show_error("Failed to list installed packages", err.to_string());
            }
        }
    }

    /// True once per refresh that was asked for while another was in flight.
    pub fn take_queued_installed_refresh(&mut self) -> bool {
        std::mem::take(&mut self.installed_refresh_queued)
    }

    pub fn apply_info_message(&mut self, message: InfoMessage) {
        let wanted = self.pending_info.as_deref() == Some(message.pkg.as_str());
        if wanted {
            self.pending_info = None;
        }

        match message.result {
            Ok(info) => {
                if self.stale_info.as_deref() == Some(message.pkg.as_str()) {
                    self.stale_info = None;
                }
                self.info_cache.put(message.pkg.clone(), info);
                if wanted {
                    self.set_status(format!("Info for {}", message.pkg));
                    self.popup = Some(Popup::Info {
                        pkg: message.pkg,
                        scroll: 0,
                    });
                }
            }
            Err(err) if wanted => {
                self.show_error(format!("Failed to load info for {}", message.pkg), err.to_string());
            }
            Err(err) => {
                debug!(pkg = %message.pkg, error = %err, "ignoring info failure");
            }
        }
        self.needs_redraw = true;
    }

    /// Forgets cached info for `pkg`. An info popup showing it keeps its
    /// text until closed.
    fn invalidate_info(&mut self, pkg: &str) {
        match &self.popup {
            Some(Popup::Info { pkg: shown, .. }) if shown == pkg => {
                self.stale_info = Some(pkg.to_string());
            }
            _ => {
                self.info_cache.pop(pkg);
            }
        }
    }

    /// Returns true when the installed list should be refreshed.
    pub fn apply_command_message(&mut self, message: CommandMessage) -> bool {
        let title = message.kind.action_title();
        self.invalidate_info(&message.pkg);

        match message.result {
            Ok(output) => {
                debug!(kind = %message.kind, pkg = %message.pkg, code = ?output.code, "command finished");
                let status = if output.success {
                    format!("{title} {} finished", message.pkg)
                } else {
                    match output.code {
                        Some(code) => format!("{title} {} exited with code {code}", message.pkg),
                        None => format!("{title} {} was interrupted", message.pkg),
                    }
                };
                self.set_status(status);
                true
            }
            Err(err) => {
                warn!(kind = %message.kind, pkg = %message.pkg, error = %err, "command failed to run");
                self.show_error(format!("{title} {} failed", message.pkg), err.to_string());
                false
            }
        }
    }

    /// Applies one install event. Returns true when the task just finished
    /// and the installed list should be refreshed.
    pub fn apply_task_event(&mut self, event: TaskEvent) -> bool {
        match event {
            TaskEvent::Output {
                pkg,
                line,
                progress,
            } => {
                if let Some(task) = self.tasks.get_mut(&pkg) {
                    task.apply_output(line, progress);
                    self.needs_redraw = true;
                }
                false
            }
            TaskEvent::Finished { pkg, outcome } => {
                let Some(task) = self.tasks.get_mut(&pkg) else {
                    return false;
                };
                if task.status().is_terminal() {
                    return false;
                }

                let detail = match &outcome {
                    TaskOutcome::Exited(code) => format!("exit code {code}"),
                    TaskOutcome::Errored(message) => message.clone(),
                };
                let status = task.finish(outcome);
                self.invalidate_info(&pkg);

                let (level, message) = match status {
                    TaskStatus::Succeeded => (ToastLevel::Success, format!("Installed {pkg}")),
                    TaskStatus::Failed => {
                        (ToastLevel::Error, format!("Install of {pkg} failed ({detail})"))
                    }
                    _ => (ToastLevel::Error, format!("Install of {pkg} errored: {detail}")),
                };
                self.set_status(message.clone());
                self.show_toast(level, message);
                true
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::brew::{BrewError, CommandOutput, parse_info};

    fn app() -> App {
        App::new(Settings::default())
    }

    fn names(items: &[&str]) -> Vec<String> {
        items.iter().map(|item| item.to_string()).collect()
    }

    fn pool(size: usize) -> Vec<String> {
        (0..size).map(|i| format!("pkg-{i}")).collect()
    }

    #[test]
    fn catalog_load_draws_recommendations() {
        let mut app = app();
        app.pending_catalog = true;
        app.apply_catalog_message(CatalogMessage {
            result: Ok(pool(100)),
        });

        assert!(!app.pending_catalog);
        assert_eq!(app.catalog.len(), 100);
        assert_eq!(app.candidates.len(), 20);
        assert_eq!(app.candidate_source, CandidateSource::Recommended);
        assert_eq!(app.candidates_selected, Some(0));
    }

    #[test]
    fn catalog_failure_empties_pool_and_shows_error() {
        let mut app = app();
        app.catalog = pool(3);
        app.apply_catalog_message(CatalogMessage {
            result: Err(BrewError::Failed("brew formulae failed".to_string())),
        });

        assert!(app.catalog.is_empty());
        assert!(matches!(app.popup, Some(Popup::Error { .. })));
    }

    #[test]
    fn empty_search_keyword_draws_recommendations() {
        let mut app = app();
        app.catalog = pool(50);
        app.candidates = names(&["old"]);
        app.candidate_source = CandidateSource::Search("old".to_string());
        app.search_query = "   ".to_string();

        let (tx, _rx) = crate::runtime::messages::create_channel();
        app.request_search(&tx);

        assert_eq!(app.candidate_source, CandidateSource::Recommended);
        assert_eq!(app.candidates.len(), 20);
        assert!(app.pending_search.is_none());
    }

    #[test]
    fn search_results_replace_candidates() {
        let mut app = app();
        app.candidates = names(&["old"]);
        app.pending_search = Some("wget".to_string());
        app.apply_search_message(SearchMessage {
            keyword: "wget".to_string(),
            result: Ok(names(&["wget", "wget2"])),
        });

        assert_eq!(app.candidates, names(&["wget", "wget2"]));
        assert_eq!(app.candidate_source, CandidateSource::Search("wget".to_string()));
        assert!(app.pending_search.is_none());
    }

    #[test]
    fn search_failure_keeps_previous_list() {
        let mut app = app();
        app.candidates = names(&["git", "curl"]);
        app.pending_search = Some("git".to_string());
        app.apply_search_message(SearchMessage {
            keyword: "git".to_string(),
            result: Err(BrewError::Failed("network down".to_string())),
        });

        assert_eq!(app.candidates, names(&["git", "curl"]));
        match &app.popup {
            Some(Popup::Error { message, .. }) => assert_eq!(message, "network down"),
            other => panic!("expected error popup, got {other:?}"),
        }
    }

    #[test]
    fn stale_search_results_are_dropped() {
        let mut app = app();
        app.candidates = names(&["git"]);
        app.pending_search = Some("wget".to_string());
        app.apply_search_message(SearchMessage {
            keyword: "wge".to_string(),
            result: Ok(names(&["wge-something"])),
        });

        assert_eq!(app.candidates, names(&["git"]));
        assert_eq!(app.pending_search.as_deref(), Some("wget"));
    }

    #[test]
    fn installed_list_is_replaced_and_selection_clamped() {
        let mut app = app();
        app.installed = names(&["a", "b", "c", "d"]);
        app.installed_selected = Some(3);
        app.pending_installed = true;
        app.apply_installed_message(InstalledMessage {
            result: Ok(names(&["a", "b"])),
        });

        assert_eq!(app.installed, names(&["a", "b"]));
        assert_eq!(app.installed_selected, Some(1));
        assert!(!app.pending_installed);
        assert!(app.last_installed_refresh.is_some());
    }

    #[test]
    fn queued_installed_refresh_is_taken_once() {
        let mut app = app();
        app.installed_refresh_queued = true;
        assert!(app.take_queued_installed_refresh());
        assert!(!app.take_queued_installed_refresh());
    }

    #[test]
    fn finished_install_requests_refresh_and_drops_cached_info() {
        let mut app = app();
        assert!(app.tasks.try_start("wget", 200));
        app.info_cache
            .put("wget".to_string(), parse_info("wget: stable 1.24.5\n"));

        let refresh = app.apply_task_event(TaskEvent::Output {
            pkg: "wget".to_string(),
            line: "==> Downloading wget".to_string(),
            progress: 8,
        });
        assert!(!refresh);
        assert_eq!(app.tasks.get("wget").unwrap().progress(), 8);

        let refresh = app.apply_task_event(TaskEvent::Finished {
            pkg: "wget".to_string(),
            outcome: TaskOutcome::Exited(0),
        });
        assert!(refresh);

        let task = app.tasks.get("wget").unwrap();
        assert_eq!(task.status(), TaskStatus::Succeeded);
        assert_eq!(task.progress(), 100);
        assert!(app.info_cache.peek("wget").is_none());
        assert_eq!(app.toast.as_ref().unwrap().level, ToastLevel::Success);
    }

    #[test]
    fn open_info_popup_keeps_its_text_until_closed() {
        let mut app = app();
        assert!(app.tasks.try_start("wget", 200));
        app.info_cache
            .put("wget".to_string(), parse_info("wget: stable 1.24.5\n"));
        app.popup = Some(Popup::Info {
            pkg: "wget".to_string(),
            scroll: 0,
        });

        app.apply_task_event(TaskEvent::Finished {
            pkg: "wget".to_string(),
            outcome: TaskOutcome::Exited(0),
        });
        assert!(app.info_cache.peek("wget").is_some());
        assert!(app.popup_content_len() > 0);

        app.close_popup();
        assert!(app.info_cache.peek("wget").is_none());
        assert!(app.stale_info.is_none());
    }

    #[test]
    fn failed_install_reports_exit_code() {
        let mut app = app();
        assert!(app.tasks.try_start("bogus-xyz", 200));
        app.apply_task_event(TaskEvent::Finished {
            pkg: "bogus-xyz".to_string(),
            outcome: TaskOutcome::Exited(1),
        });

        assert_eq!(
            app.tasks.get("bogus-xyz").unwrap().status(),
            TaskStatus::Failed
        );
        assert_eq!(app.status, "Install of bogus-xyz failed (exit code 1)");
    }

    #[test]
    fn events_for_unknown_tasks_are_ignored() {
        let mut app = app();
        let refresh = app.apply_task_event(TaskEvent::Finished {
            pkg: "ghost".to_string(),
            outcome: TaskOutcome::Exited(0),
        });
        assert!(!refresh);
        assert!(app.tasks.is_empty());
    }

    #[test]
    fn command_result_refreshes_even_on_nonzero_exit() {
        let mut app = app();
        let refresh = app.apply_command_message(CommandMessage {
            kind: CommandKind::Uninstall,
            pkg: "wget".to_string(),
            result: Ok(CommandOutput {
                stdout: String::new(),
                stderr: "Error: No such keg".to_string(),
                code: Some(1),
                success: false,
            }),
        });

        assert!(refresh);
        assert!(app.popup.is_none());
        assert_eq!(app.status, "Uninstall wget exited with code 1");
    }

    #[test]
    fn command_spawn_failure_shows_error_without_refresh() {
        let mut app = app();
        let refresh = app.apply_command_message(CommandMessage {
            kind: CommandKind::Upgrade,
            pkg: "wget".to_string(),
            result: Err(BrewError::Failed("failed to run brew".to_string())),
        });

        assert!(!refresh);
        assert!(matches!(app.popup, Some(Popup::Error { .. })));
    }

    #[test]
    fn info_result_opens_popup_when_requested() {
        let mut app = app();
        app.pending_info = Some("wget".to_string());
        app.apply_info_message(InfoMessage {
            pkg: "wget".to_string(),
            result: Ok(parse_info("wget: stable 1.24.5\n==> Description\nInternet file retriever\n")),
        });

        assert!(app.pending_info.is_none());
        assert!(app.info_cache.peek("wget").is_some());
        assert_eq!(
            app.popup,
            Some(Popup::Info {
                pkg: "wget".to_string(),
                scroll: 0
            })
        );
    }
}
