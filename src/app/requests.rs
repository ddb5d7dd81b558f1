use tracing::debug;

use super::*;

impl App {
    pub fn request_catalog(&mut self, tx: &EventSender) {
        if self.pending_catalog {
            return;
        }

        self.pending_catalog = true;
        self.set_status("Loading package catalog...");

        let brew = self.brew.clone();
        let tx = tx.clone();
        tokio::spawn(async move {
            let result = fetch_catalog(&brew).await;
            let _ = tx.send(AppEvent::Catalog(CatalogMessage { result }));
        });
    }

    /// Replaces the candidate list with a fresh random draw from the catalog.
    pub fn show_recommendations(&mut self) {
        let count = self.settings.recommendations;
        self.candidates = sample_recommendations(&self.catalog, count, &mut rand::rng());
        self.candidate_source = CandidateSource::Recommended;
        self.candidates_selected = super::selection::clamp_index(None, self.candidates.len());
        self.pending_search = None;

        let status = if self.catalog.is_empty() {
            "No packages to recommend yet".to_string()
        } else {
            format!("{} recommendations", self.candidates.len())
        };
        self.set_status(status);
    }

    /// Searches for the current query. A blank query draws recommendations.
    pub fn request_search(&mut self, tx: &EventSender) {
        let keyword = self.search_query.trim().to_string();
        if keyword.is_empty() {
            self.show_recommendations();
            return;
        }

        self.pending_search = Some(keyword.clone());
        self.set_status(format!("Searching for {keyword}..."));

        let brew = self.brew.clone();
        let tx = tx.clone();
        tokio::spawn(async move {
            let result = search_packages(&brew, &keyword).await;
            let _ = tx.send(AppEvent::Search(SearchMessage { keyword, result }));
        });
    }

    pub fn request_installed(&mut self, tx: &EventSender) {
        if self.pending_installed {
            // The listing in flight may predate the change that asked for this one.
            self.installed_refresh_queued = true;
            return;
        }

        self.pending_installed = true;
        self.set_status("Loading installed packages...");

        let brew = self.brew.clone();
        let tx = tx.clone();
        tokio::spawn(async move {
            let result = fetch_installed(&brew).await;
            let _ = tx.send(AppEvent::Installed(InstalledMessage { result }));
        });
    }

    pub fn request_info(&mut self, pkg: &str, tx: &EventSender) {
        if self.info_cache.get(pkg).is_some() {
            self.popup = Some(Popup::Info {
                pkg: pkg.to_string(),
                scroll: 0,
            });
            self.needs_redraw = true;
            return;
        }

        if self.pending_info.as_deref() == Some(pkg) {
            return;
        }

        let pkg = pkg.to_string();
        self.pending_info = Some(pkg.clone());
        self.set_status(format!("Loading info for {pkg}..."));

        let brew = self.brew.clone();
        let tx = tx.clone();
        tokio::spawn(async move {
            let result = fetch_info(&brew, &pkg).await;
            let _ = tx.send(AppEvent::Info(InfoMessage { pkg, result }));
        });
    }

    /// Starts an install task unless one is already running for `pkg`.
    pub fn start_install(&mut self, pkg: &str, tx: &EventSender) -> bool {
        let pkg = pkg.trim();
        if pkg.is_empty() {
            self.set_status("No package selected");
            return false;
        }

        if !self.tasks.try_start(pkg, self.settings.log_lines) {
            debug!(%pkg, "install already running");
            self.set_status(format!("{pkg} is already installing"));
            self.show_toast(ToastLevel::Info, format!("{pkg} is already installing"));
            return false;
        }

        self.tasks_selected = Some(self.tasks.len() - 1);
        self.set_status(format!("Installing {pkg}..."));

        let brew = self.brew.clone();
        let pkg = pkg.to_string();
        let tx = tx.clone();
        tokio::spawn(run_install(brew, pkg, KeywordScorer, tx));
        true
    }

    pub fn confirm_uninstall(&mut self, pkg: &str) {
        self.popup = Some(Popup::ConfirmUninstall {
            pkg: pkg.to_string(),
        });
        self.needs_redraw = true;
    }

    /// Fire-and-forget uninstall/upgrade; the installed list refreshes after.
    pub fn request_package_command(&mut self, kind: CommandKind, pkg: &str, tx: &EventSender) {
        let pkg = pkg.to_string();
        self.set_status(format!("Running {kind} {pkg}..."));

        let brew = self.brew.clone();
        let tx = tx.clone();
        tokio::spawn(async move {
            let result = run_package_command(&brew, kind, &pkg).await;
            let _ = tx.send(AppEvent::Command(CommandMessage { kind, pkg, result }));
        });
    }
}
